use cadence_input::InputState;
use cadence_options::Options;

use crate::error::BoxError;

/// Simulation driven by the loop.
pub trait World {
    fn init(&mut self, options: &Options) -> Result<(), BoxError>;

    /// Must tolerate being called without a successful `init`.
    fn dispose(&mut self);

    /// React to this frame's input. Only called while the window has focus and
    /// the cursor is over it.
    fn handle_input(&mut self, input: &InputState) -> Result<(), BoxError>;

    /// Advance by one fixed step of `step` seconds.
    fn update_logic(&mut self, step: f32) -> Result<(), BoxError>;

    /// Called right before each render.
    fn pre_render(&mut self) {}
}
