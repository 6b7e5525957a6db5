//! Timing primitives for the engine loop.
//!
//! # Invariants
//! - Every measured interval is non-negative (`Duration` saturates at zero).
//! - Simulation time is accumulated in whole nanoseconds, so the number of
//!   fixed steps drained equals `floor(total / step)` exactly.
//! - Pacing waits never sleep longer than their granularity at a time.

mod clock;
mod fps;
mod pacing;
mod stopwatch;
mod timestep;

pub use clock::{Clock, ManualClock, SystemClock};
pub use fps::FpsCounter;
pub use pacing::{frame_period, refresh_period, FramePacer};
pub use stopwatch::StopWatch;
pub use timestep::{BacklogPolicy, FixedTimestep};
