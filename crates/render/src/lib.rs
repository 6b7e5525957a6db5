//! Text renderer for the demo world.
//!
//! # Invariants
//! - Rendering reads the world, never mutates it.
//! - Render output derives only from world state, the view and the options.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView};
