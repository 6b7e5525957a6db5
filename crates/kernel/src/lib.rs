//! Demo world: spinning bodies and a fly camera, stepped by the engine loop.
//!
//! # Invariants
//! - State changes only through `update_logic` (fixed steps) and `handle_input`
//!   (camera intent), never during rendering.
//! - Identical step sequences give identical state hashes.

mod camera;
pub mod world;

pub use camera::FlyCamera;
pub use world::{Body, DEMO_BODIES, EntityWorld, WorldSummary};
