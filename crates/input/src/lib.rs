//! Input sampling: per-device edge-triggered state owned by the engine loop.
//!
//! # Invariants
//! - A physical press reports `is_tapped` at most once between two `update()`
//!   calls on its device; OS key repeat never re-triggers it.
//! - Nothing here is global: the window fills an [`InputState`], the loop
//!   lends it immutably to the world, then advances it.

pub mod action;
mod buttons;
mod cursor;
mod event;
mod key;
mod state;

pub use action::{EngineAction, KeyBindings};
pub use buttons::{ButtonStates, Keyboard, MouseButtons};
pub use cursor::{Cursor, MouseWheel};
pub use event::InputEvent;
pub use key::{Key, MouseButton};
pub use state::InputState;
