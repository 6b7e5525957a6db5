//! Shared types and small numeric helpers used across the cadence crates.

pub mod maths;
pub mod types;

pub use types::{DisplayMode, EntityId, Transform, WindowSize};
