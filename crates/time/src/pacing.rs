use std::num::NonZeroU32;
use std::time::Duration;

use crate::clock::Clock;

/// Frame period for a display refresh rate in Hz. `None` for 0 Hz.
pub fn frame_period(refresh_rate: u32) -> Option<Duration> {
    NonZeroU32::new(refresh_rate).map(refresh_period)
}

/// Frame period for a known refresh rate, rounded up to the next nanosecond
/// so frames are never closer than `1 / refresh_rate`.
pub fn refresh_period(refresh_rate: NonZeroU32) -> Duration {
    Duration::from_nanos(1_000_000_000u64.div_ceil(u64::from(refresh_rate.get())))
}

/// Cooperative frame limiter.
///
/// Waits for a deadline in short sleeps instead of one long one, checking a
/// caller-supplied condition between sleeps so a stop request is honoured
/// within one granularity.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    granularity: Duration,
}

impl FramePacer {
    pub fn new(granularity: Duration) -> Self {
        Self {
            granularity: granularity.max(Duration::from_micros(50)),
        }
    }

    pub fn granularity(&self) -> Duration {
        self.granularity
    }

    /// Sleep until `clock.now() >= deadline` or `keep_waiting` returns false.
    /// Returns the time spent waiting.
    pub fn wait_until<C: Clock>(
        &self,
        clock: &C,
        deadline: Duration,
        keep_waiting: impl Fn() -> bool,
    ) -> Duration {
        let began = clock.now();
        while clock.now() < deadline {
            if !keep_waiting() {
                break;
            }
            clock.sleep(self.granularity);
        }
        clock.now().saturating_sub(began)
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(1))
    }
}
