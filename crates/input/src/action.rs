use crate::key::{Key, MouseButton};
use crate::state::InputState;

/// An engine-level command produced from raw input before the world sees it.
///
/// These affect the engine itself (window, options, lifetime), never world
/// state; world logic reads the [`InputState`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineAction {
    /// Capture the current frame through the renderer.
    Screenshot,
    /// Switch between windowed and full screen.
    ToggleFullScreen,
    ToggleCullFaces,
    ToggleWireframe,
    ToggleVSync,
    /// Hide and confine the pointer for camera look.
    CaptureCursor,
    /// Give the pointer back to the desktop.
    ReleaseCursor,
    /// Ask the loop to stop.
    Quit,
}

/// Keys and buttons bound to [`EngineAction`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub screenshot: Key,
    pub full_screen: Key,
    pub cull_faces: Key,
    pub wireframe: Key,
    pub vsync: Key,
    pub escape: Key,
    pub capture: MouseButton,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            screenshot: Key::F1,
            full_screen: Key::F2,
            cull_faces: Key::Digit1,
            wireframe: Key::Digit2,
            vsync: Key::Digit3,
            escape: Key::Escape,
            capture: MouseButton::Left,
        }
    }
}

impl KeyBindings {
    /// Actions triggered this frame, in a fixed order.
    ///
    /// Full screen only toggles while the cursor is captured. Cursor capture
    /// and quitting only apply in windowed mode: with a free cursor a click
    /// captures it and Escape quits; with a captured cursor Escape releases
    /// it.
    pub fn resolve(&self, input: &InputState, full_screen: bool) -> Vec<EngineAction> {
        let kb = &input.keyboard;
        let mut actions = Vec::new();

        if kb.is_tapped(self.screenshot) {
            actions.push(EngineAction::Screenshot);
        }
        if kb.is_tapped(self.full_screen) && input.cursor.is_captured() {
            actions.push(EngineAction::ToggleFullScreen);
        }
        if kb.is_tapped(self.cull_faces) {
            actions.push(EngineAction::ToggleCullFaces);
        }
        if kb.is_tapped(self.wireframe) {
            actions.push(EngineAction::ToggleWireframe);
        }
        if kb.is_tapped(self.vsync) {
            actions.push(EngineAction::ToggleVSync);
        }

        if !full_screen {
            if input.cursor.is_captured() {
                if kb.is_tapped(self.escape) {
                    actions.push(EngineAction::ReleaseCursor);
                }
            } else {
                if input.mouse_buttons.is_tapped(self.capture) {
                    actions.push(EngineAction::CaptureCursor);
                }
                if kb.is_tapped(self.escape) {
                    actions.push(EngineAction::Quit);
                }
            }
        }

        actions
    }
}
