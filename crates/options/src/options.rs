use cadence_common::{DisplayMode, WindowSize};
use serde::{Deserialize, Serialize};

/// Current on-disk schema version.
pub const OPTIONS_SCHEMA_VERSION: u32 = 1;

/// User-facing engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub schema_version: u32,
    /// Cap the render rate to the display refresh rate.
    pub vsync: bool,
    pub display_mode: DisplayMode,
    pub cull_faces: bool,
    pub wireframe: bool,
    /// Window size used in windowed mode.
    pub window_size: WindowSize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            schema_version: OPTIONS_SCHEMA_VERSION,
            vsync: true,
            display_mode: DisplayMode::Windowed,
            cull_faces: true,
            wireframe: false,
            window_size: WindowSize::default(),
        }
    }
}

impl Options {
    pub fn is_vsync_enabled(&self) -> bool {
        self.vsync
    }

    pub fn is_full_screen(&self) -> bool {
        self.display_mode.is_full_screen()
    }

    /// Flip vsync and return the new value.
    pub fn toggle_vsync(&mut self) -> bool {
        self.vsync = !self.vsync;
        self.vsync
    }

    pub fn toggle_cull_faces(&mut self) -> bool {
        self.cull_faces = !self.cull_faces;
        self.cull_faces
    }

    pub fn toggle_wireframe(&mut self) -> bool {
        self.wireframe = !self.wireframe;
        self.wireframe
    }

    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        self.display_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert!(opts.is_vsync_enabled());
        assert!(!opts.is_full_screen());
        assert!(opts.cull_faces);
        assert!(!opts.wireframe);
        assert_eq!(opts.window_size, WindowSize::new(700, 600));
        assert_eq!(opts.schema_version, OPTIONS_SCHEMA_VERSION);
    }

    #[test]
    fn toggles_flip_and_report() {
        let mut opts = Options::default();
        assert!(!opts.toggle_vsync());
        assert!(opts.toggle_vsync());
        assert!(!opts.toggle_cull_faces());
        assert!(opts.toggle_wireframe());
        assert_eq!(opts.toggle_display_mode(), DisplayMode::FullScreen);
        assert!(opts.is_full_screen());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let opts: Options = serde_json::from_str(r#"{ "wireframe": true }"#).unwrap();
        assert!(opts.wireframe);
        assert!(opts.vsync);
        assert_eq!(opts.schema_version, OPTIONS_SCHEMA_VERSION);
    }
}
