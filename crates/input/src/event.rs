use glam::Vec2;

use crate::key::{Key, MouseButton};

/// Backend-neutral input event. Windows translate platform events into these
/// and feed them to [`InputState::apply`](crate::InputState::apply).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    ButtonPressed(MouseButton),
    ButtonReleased(MouseButton),
    /// Pointer moved to window coordinates.
    CursorMoved(Vec2),
    CursorEntered,
    CursorLeft,
    /// Raw device motion, unaffected by pointer acceleration or confinement.
    MouseMotion(Vec2),
    Scrolled(Vec2),
    /// Window focus was lost; held keys will not see their releases.
    FocusLost,
}
