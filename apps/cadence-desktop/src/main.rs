mod keymap;
mod window;

use std::path::PathBuf;

use anyhow::Result;
use cadence_engine::{BacklogPolicy, Engine, EngineConfig, OptionsStore};
use cadence_kernel::EntityWorld;
use cadence_render::DebugTextRenderer;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::window::DesktopWindow;

#[derive(Parser)]
#[command(name = "cadence-desktop", about = "Cadence demo in a native window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Options file, created on first exit
    #[arg(long, default_value = "cadence-options.json")]
    options: PathBuf,

    /// Logic updates per second
    #[arg(long, default_value_t = 300)]
    ups: u32,

    /// Drop logic backlog beyond this many updates per frame
    #[arg(long)]
    max_updates_per_frame: Option<u32>,

    /// Directory for F1 screenshots
    #[arg(long)]
    screenshots: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cadence-desktop starting");

    let store = OptionsStore::new(cli.options);
    let options = store.load_or_default();

    let config = EngineConfig {
        updates_per_second: cli.ups,
        backlog: cli
            .max_updates_per_frame
            .map_or(BacklogPolicy::Unbounded, |max_steps| {
                BacklogPolicy::Clamp { max_steps }
            }),
        ..EngineConfig::default()
    };

    let mut renderer = DebugTextRenderer::new();
    if let Some(dir) = cli.screenshots {
        renderer = renderer.with_screenshot_dir(dir);
    }

    // winit wants its event loop on the main thread, so the loop runs here
    // rather than on a spawned thread.
    let engine = Engine::new(
        DesktopWindow::new("Cadence"),
        EntityWorld::demo(),
        renderer,
        options,
    )
    .with_store(store)
    .with_config(config);
    let stats = engine.run()?;

    tracing::info!(
        iterations = stats.iterations,
        updates = stats.updates,
        frames = stats.frames,
        "cadence-desktop exiting"
    );
    Ok(())
}
