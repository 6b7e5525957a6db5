use crate::buttons::{Keyboard, MouseButtons};
use crate::cursor::{Cursor, MouseWheel};
use crate::event::InputEvent;

/// Everything the loop knows about input for the current frame.
///
/// Filled by the window between frames, read by the engine and lent to the
/// world as an immutable snapshot, then advanced with [`update`](Self::update).
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: Keyboard,
    pub mouse_buttons: MouseButtons,
    pub cursor: Cursor,
    pub wheel: MouseWheel,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPressed(key) => self.keyboard.press(key),
            InputEvent::KeyReleased(key) => self.keyboard.release(key),
            InputEvent::ButtonPressed(button) => self.mouse_buttons.press(button),
            InputEvent::ButtonReleased(button) => self.mouse_buttons.release(button),
            InputEvent::CursorMoved(position) => self.cursor.move_to(position),
            InputEvent::CursorEntered => self.cursor.set_on_screen(true),
            InputEvent::CursorLeft => self.cursor.set_on_screen(false),
            InputEvent::MouseMotion(delta) => self.cursor.add_motion(delta),
            InputEvent::Scrolled(by) => self.wheel.scroll(by),
            InputEvent::FocusLost => {
                tracing::debug!("focus lost, releasing held keys and buttons");
                self.keyboard.clear();
                self.mouse_buttons.clear();
            }
        }
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Advance every device's edge state for the next frame.
    pub fn update(&mut self) {
        self.keyboard.update();
        self.mouse_buttons.update();
        self.cursor.update();
        self.wheel.update();
    }
}
