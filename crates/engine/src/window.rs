use cadence_common::WindowSize;
use cadence_input::InputState;
use cadence_options::Options;

use crate::error::BoxError;

/// Native window as seen by the loop.
///
/// A window may be constructed on any thread but is initialised, polled and
/// disposed only on the loop thread, so platform resources belong in
/// [`init`](Self::init), not in the constructor.
pub trait Window {
    fn init(&mut self, options: &Options) -> Result<(), BoxError>;

    /// Release platform resources. Must tolerate being called without a
    /// successful `init`.
    fn dispose(&mut self);

    fn is_open(&self) -> bool;
    fn is_focused(&self) -> bool;
    fn is_minimized(&self) -> bool;

    /// Display refresh rate in Hz, 0 if unknown.
    fn refresh_rate(&self) -> u32;

    fn size(&self) -> WindowSize;

    /// Drain pending platform events into `input`.
    fn poll_events(&mut self, input: &mut InputState);

    /// Replace the text shown after the base title.
    fn set_title_suffix(&mut self, suffix: &str);

    fn is_full_screen(&self) -> bool;
    fn set_full_screen(&mut self, full_screen: bool);

    fn set_cursor_captured(&mut self, captured: bool);

    /// Called right before each render.
    fn pre_render(&mut self) {}
}
