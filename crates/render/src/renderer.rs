use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use cadence_common::WindowSize;
use cadence_engine::{BoxError, Options, Renderer, Window};
use cadence_kernel::EntityWorld;
use glam::Vec3;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
            aspect: 1.0,
        }
    }
}

impl RenderView {
    /// View through the world's camera into a window of `size`.
    pub fn from_world(world: &EntityWorld, size: WindowSize) -> Self {
        let camera = world.camera();
        Self {
            eye: camera.position,
            target: camera.position + camera.forward(),
            fov_degrees: 60.0,
            aspect: size.aspect(),
        }
    }
}

/// Renders the world as text.
///
/// Every frame replaces [`last_frame`](Self::last_frame). A screenshot writes
/// the last frame to the screenshot directory, if one was given.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    screenshot_dir: Option<PathBuf>,
    last_frame: String,
    frames: u64,
    screenshots: u32,
    initialised: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = Some(dir.into());
        self
    }

    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw one frame into a string.
    pub fn draw(world: &EntityWorld, view: &RenderView, options: &Options) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "=== World (tick={}, t={:.3}s) ===",
            world.tick(),
            world.sim_time()
        );
        let _ = writeln!(
            out,
            "Entities: {}  cull={} wireframe={}",
            world.entity_count(),
            options.cull_faces,
            options.wireframe
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.2}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees,
            view.aspect
        );
        for (id, body) in world.entities() {
            let p = body.transform.position;
            let (axis, angle) = body.transform.rotation.to_axis_angle();
            let _ = writeln!(
                out,
                "  [{id}] pos=({:.2}, {:.2}, {:.2}) rot={:.1}deg about ({:.2}, {:.2}, {:.2})",
                p.x,
                p.y,
                p.z,
                angle.to_degrees(),
                axis.x,
                axis.y,
                axis.z
            );
        }
        out
    }
}

impl Renderer<EntityWorld> for DebugTextRenderer {
    fn init(&mut self, window: &dyn Window, _options: &Options) -> Result<(), BoxError> {
        if let Some(dir) = &self.screenshot_dir {
            fs::create_dir_all(dir)?;
        }
        self.initialised = true;
        tracing::debug!(size = ?window.size(), "text renderer ready");
        Ok(())
    }

    fn dispose(&mut self) {
        if self.initialised {
            tracing::debug!(frames = self.frames, "text renderer disposed");
        }
        self.initialised = false;
    }

    fn render(
        &mut self,
        window: &dyn Window,
        world: &EntityWorld,
        options: &Options,
    ) -> Result<(), BoxError> {
        let view = RenderView::from_world(world, window.size());
        self.last_frame = Self::draw(world, &view, options);
        self.frames += 1;
        Ok(())
    }

    fn take_screenshot(&mut self) -> Result<(), BoxError> {
        let Some(dir) = &self.screenshot_dir else {
            tracing::info!("no screenshot directory configured");
            return Ok(());
        };
        self.screenshots += 1;
        let path = dir.join(format!("screenshot-{:04}.txt", self.screenshots));
        fs::write(&path, &self.last_frame)?;
        tracing::info!(path = %path.display(), "screenshot saved");
        Ok(())
    }

    fn description(&self) -> String {
        String::from("debug text renderer")
    }
}
