//! Engine options: an explicit settings value, loaded once at startup and
//! written back once at shutdown.
//!
//! # Invariants
//! - There is no process-wide settings store; whoever needs options receives
//!   them by reference.
//! - A file written by a different schema version is rejected, never guessed at.
//! - Saves are atomic: readers see the old file or the new one, not a torn one.

mod options;
mod store;

pub use options::{Options, OPTIONS_SCHEMA_VERSION};
pub use store::{OptionsError, OptionsStore};
