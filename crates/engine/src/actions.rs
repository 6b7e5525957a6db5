use cadence_input::EngineAction;
use cadence_time::Clock;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::renderer::Renderer;
use crate::window::Window;
use crate::world::World;

impl<Win, Wld, R, C> Engine<Win, Wld, R, C>
where
    Win: Window,
    Wld: World,
    R: Renderer<Wld>,
    C: Clock,
{
    /// Engine bindings first, then the world if the cursor is over the
    /// window. Ends the input frame either way.
    pub(crate) fn handle_input(&mut self) -> Result<(), EngineError> {
        let actions = self
            .bindings
            .resolve(&self.input, self.window.is_full_screen());
        for action in actions {
            self.apply_action(action);
        }

        let result = if self.input.cursor.on_screen() {
            self.world
                .handle_input(&self.input)
                .map_err(EngineError::Input)
        } else {
            Ok(())
        };
        self.input.update();
        result
    }

    fn apply_action(&mut self, action: EngineAction) {
        match action {
            EngineAction::Screenshot => {
                if let Err(e) = self.renderer.take_screenshot() {
                    self.stats.render_failures += 1;
                    tracing::error!("screenshot failed: {e}");
                }
            }
            EngineAction::ToggleFullScreen => {
                self.options.toggle_display_mode();
                self.window.set_full_screen(self.options.is_full_screen());
            }
            EngineAction::ToggleCullFaces => {
                let cull_faces = self.options.toggle_cull_faces();
                tracing::debug!(cull_faces, "toggled face culling");
            }
            EngineAction::ToggleWireframe => {
                let wireframe = self.options.toggle_wireframe();
                tracing::debug!(wireframe, "toggled wireframe");
            }
            EngineAction::ToggleVSync => {
                let vsync = self.options.toggle_vsync();
                tracing::debug!(vsync, "toggled vsync");
            }
            EngineAction::CaptureCursor => {
                self.window.set_cursor_captured(true);
                self.input.cursor.set_captured(true);
            }
            EngineAction::ReleaseCursor => {
                self.window.set_cursor_captured(false);
                self.input.cursor.set_captured(false);
            }
            EngineAction::Quit => {
                tracing::info!("quit requested");
                self.running.stop();
            }
        }
    }
}
