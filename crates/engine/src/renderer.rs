use cadence_options::Options;

use crate::error::BoxError;
use crate::window::Window;

/// Draws a world into a window.
///
/// The renderer reads world state, never mutates it. A failed `render` costs
/// one frame; the loop carries on.
pub trait Renderer<W: ?Sized> {
    fn init(&mut self, window: &dyn Window, options: &Options) -> Result<(), BoxError>;

    /// Must tolerate being called without a successful `init`.
    fn dispose(&mut self);

    fn render(
        &mut self,
        window: &dyn Window,
        world: &W,
        options: &Options,
    ) -> Result<(), BoxError>;

    fn take_screenshot(&mut self) -> Result<(), BoxError> {
        tracing::debug!("screenshots not supported by this renderer");
        Ok(())
    }

    /// One-line description for the boot log.
    fn description(&self) -> String {
        String::from("unnamed renderer")
    }
}
