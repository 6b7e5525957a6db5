//! Engine loop controller.
//!
//! Owns the clock and drives the collaborators through one dedicated thread:
//! input, fixed-rate logic updates, one render per iteration, platform events,
//! then optional pacing to the display refresh rate.
//!
//! # Invariants
//! - Logic always advances in fixed steps; after each drain less than one step
//!   of unspent time remains.
//! - Teardown runs exactly once, world then renderer then window, followed by
//!   saving options, however the loop ended.
//! - Render failures are counted and logged; they never end the loop.
//! - The running flag is the only state shared with other threads.

mod actions;
mod config;
mod engine;
mod error;
mod game_loop;
mod handle;
pub mod headless;
mod renderer;
mod window;
mod world;

#[cfg(test)]
mod testing;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{BoxError, EngineError};
pub use handle::{EngineHandle, LoopStats, StopSignal};
pub use headless::HeadlessWindow;
pub use renderer::Renderer;
pub use window::Window;
pub use world::World;

pub use cadence_input::{EngineAction, InputState, KeyBindings};
pub use cadence_options::{Options, OptionsStore};
pub use cadence_time::{BacklogPolicy, Clock, ManualClock, SystemClock};
