use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use cadence_engine::{
    BacklogPolicy, Engine, EngineConfig, HeadlessWindow, LoopStats, Options, OptionsStore, World,
};
use cadence_kernel::EntityWorld;
use cadence_render::DebugTextRenderer;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cadence-cli", about = "Headless tools for the cadence engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default loop settings
    Info,
    /// Run the demo world in a headless window for a while
    Run {
        /// Wall-clock seconds to run
        #[arg(short, long, default_value_t = 2.0)]
        seconds: f64,
        /// Refresh rate the headless window reports, 0 for unknown
        #[arg(long, default_value_t = 60)]
        refresh_rate: u32,
        /// Render as fast as possible instead of pacing to the refresh rate
        #[arg(long)]
        no_vsync: bool,
        /// Logic updates per second
        #[arg(long, default_value_t = 300)]
        ups: u32,
        /// Drop logic backlog beyond this many updates per frame
        #[arg(long)]
        max_updates_per_frame: Option<u32>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Step the demo world directly, without the loop
    Simulate {
        /// Number of fixed steps
        #[arg(short, long, default_value_t = 300)]
        ticks: u64,
        /// Logic updates per second
        #[arg(long, default_value_t = 300)]
        ups: u32,
    },
    /// Show or reset a saved options file
    Options {
        #[arg(long, default_value = "cadence-options.json")]
        path: PathBuf,
        /// Overwrite the file with defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Debug, Serialize)]
struct RunReport {
    wall_seconds: f64,
    iterations: u64,
    updates: u64,
    frames: u64,
    render_failures: u64,
    last_fps: Option<u32>,
    dropped_backlog_ms: f64,
    measured_ups: f64,
}

impl RunReport {
    fn new(stats: &LoopStats, wall: Duration) -> Self {
        let wall_seconds = wall.as_secs_f64();
        Self {
            wall_seconds,
            iterations: stats.iterations,
            updates: stats.updates,
            frames: stats.frames,
            render_failures: stats.render_failures,
            last_fps: stats.last_fps,
            dropped_backlog_ms: stats.dropped_backlog.as_secs_f64() * 1000.0,
            measured_ups: if wall_seconds > 0.0 {
                stats.updates as f64 / wall_seconds
            } else {
                0.0
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = EngineConfig::default();
            println!("cadence-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("logic rate: {} updates/s", config.updates_per_second);
            println!("backlog policy: {:?}", config.backlog);
            println!("pacing granularity: {:?}", config.sync_granularity);
            println!("fallback refresh rate: {} Hz", config.fallback_refresh_rate);
        }
        Commands::Run {
            seconds,
            refresh_rate,
            no_vsync,
            ups,
            max_updates_per_frame,
            json,
        } => {
            let duration = Duration::try_from_secs_f64(seconds)
                .with_context(|| format!("invalid duration {seconds}"))?;
            let options = Options {
                vsync: !no_vsync,
                ..Options::default()
            };
            let config = EngineConfig {
                updates_per_second: ups,
                backlog: max_updates_per_frame.map_or(BacklogPolicy::Unbounded, |max_steps| {
                    BacklogPolicy::Clamp { max_steps }
                }),
                ..EngineConfig::default()
            };
            let window = HeadlessWindow::new("cadence-cli").with_refresh_rate(refresh_rate);

            let started = Instant::now();
            let handle = Engine::new(window, EntityWorld::demo(), DebugTextRenderer::new(), options)
                .with_config(config)
                .start()?;
            std::thread::sleep(duration);
            handle.stop();
            let stats = handle.join()?;
            let report = RunReport::new(&stats, started.elapsed());
            tracing::debug!(?report, "run finished");

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "ran {:.2}s: {} iterations, {} updates ({:.1}/s), {} frames, {} render failures",
                    report.wall_seconds,
                    report.iterations,
                    report.updates,
                    report.measured_ups,
                    report.frames,
                    report.render_failures
                );
                if let Some(fps) = report.last_fps {
                    println!("last fps: {fps}");
                }
            }
        }
        Commands::Simulate { ticks, ups } => {
            anyhow::ensure!(ups > 0, "updates per second must be positive");
            let step = 1.0 / ups as f32;
            let mut world = EntityWorld::demo();
            world
                .init(&Options::default())
                .map_err(|e| anyhow::anyhow!("world init failed: {e}"))?;
            for _ in 0..ticks {
                world
                    .update_logic(step)
                    .map_err(|e| anyhow::anyhow!("update failed: {e}"))?;
            }
            println!("{}", serde_json::to_string_pretty(&world.summary())?);
        }
        Commands::Options { path, reset } => {
            let store = OptionsStore::new(&path);
            if reset {
                store.save(&Options::default())?;
                println!("reset {}", path.display());
            } else {
                let options = store.load()?;
                println!("{}", serde_json::to_string_pretty(&options)?);
            }
        }
    }

    Ok(())
}
