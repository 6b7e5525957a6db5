use std::num::NonZeroU32;
use std::time::Duration;

use cadence_time::BacklogPolicy;

/// 60 Hz.
const DEFAULT_FALLBACK_REFRESH_RATE: NonZeroU32 = NonZeroU32::MIN.saturating_add(59);

/// Loop tuning that is not a user preference.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed logic rate.
    pub updates_per_second: u32,
    /// What to do with a logic backlog after a stall.
    pub backlog: BacklogPolicy,
    /// Sleep slice while pacing to the refresh rate; also bounds how long a
    /// stop request can go unnoticed.
    pub sync_granularity: Duration,
    /// How often the FPS figure in the title is refreshed.
    pub fps_interval: Duration,
    /// Used for pacing when the window reports a refresh rate of 0. Cannot
    /// itself be 0.
    pub fallback_refresh_rate: NonZeroU32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            updates_per_second: 300,
            backlog: BacklogPolicy::Unbounded,
            sync_granularity: Duration::from_millis(1),
            fps_interval: Duration::from_secs(1),
            fallback_refresh_rate: DEFAULT_FALLBACK_REFRESH_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_time::refresh_period;

    #[test]
    fn default_fallback_paces_at_sixty_hertz() {
        let config = EngineConfig::default();
        assert_eq!(config.fallback_refresh_rate.get(), 60);
        assert_eq!(
            refresh_period(config.fallback_refresh_rate),
            Duration::from_nanos(16_666_667)
        );
    }
}
