use std::time::Duration;

use crate::clock::Clock;

/// Measures time since a movable reference point.
///
/// `stop` only records the lap and marks the watch idle; the next `elapsed`
/// still measures from the last `start`/`restart`. The loop relies on that so
/// no wall time falls between two iterations unmeasured.
#[derive(Debug, Clone)]
pub struct StopWatch<C: Clock> {
    clock: C,
    started_at: Duration,
    running: bool,
    last_lap: Duration,
}

impl<C: Clock> StopWatch<C> {
    /// Create an idle watch referenced to the clock's current time.
    pub fn new(clock: C) -> Self {
        let started_at = clock.now();
        Self {
            clock,
            started_at,
            running: false,
            last_lap: Duration::ZERO,
        }
    }

    /// Move the reference point to now and mark the watch running.
    pub fn start(&mut self) {
        self.started_at = self.clock.now();
        self.running = true;
    }

    /// Like [`start`](Self::start), returning the time measured before the reset.
    pub fn restart(&mut self) -> Duration {
        // single clock read so nothing falls between measure and reset
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.started_at);
        self.started_at = now;
        self.running = true;
        elapsed
    }

    /// Record the current lap and mark the watch idle.
    pub fn stop(&mut self) -> Duration {
        self.last_lap = self.elapsed();
        self.running = false;
        self.last_lap
    }

    /// Time since the reference point. Never negative.
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.started_at)
    }

    /// Clock reading at the last `start`/`restart`.
    pub fn start_time(&self) -> Duration {
        self.started_at
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Duration recorded by the most recent `stop`.
    pub fn last_lap(&self) -> Duration {
        self.last_lap
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn new_watch_is_idle() {
        let watch = StopWatch::new(ManualClock::new());
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(), Duration::ZERO);
    }

    #[test]
    fn elapsed_tracks_clock() {
        let clock = ManualClock::new();
        let mut watch = StopWatch::new(clock.clone());
        watch.start();
        clock.advance(ms(12));
        assert_eq!(watch.elapsed(), ms(12));
    }

    #[test]
    fn restart_returns_previous_elapsed_and_resets() {
        let clock = ManualClock::new();
        let mut watch = StopWatch::new(clock.clone());
        watch.start();
        clock.advance(ms(7));
        assert_eq!(watch.restart(), ms(7));
        assert_eq!(watch.elapsed(), Duration::ZERO);
        assert_eq!(watch.start_time(), ms(7));
        assert!(watch.is_running());
    }

    #[test]
    fn stop_records_lap_without_moving_reference() {
        let clock = ManualClock::new();
        let mut watch = StopWatch::new(clock.clone());
        watch.start();
        clock.advance(ms(4));
        assert_eq!(watch.stop(), ms(4));
        assert!(!watch.is_running());
        assert_eq!(watch.last_lap(), ms(4));

        clock.advance(ms(1));
        assert_eq!(watch.elapsed(), ms(5));
    }

    #[test]
    fn elapsed_never_negative_if_clock_is_reset() {
        let clock = ManualClock::new();
        clock.set(ms(100));
        let mut watch = StopWatch::new(clock.clone());
        watch.start();
        clock.set(ms(50));
        assert_eq!(watch.elapsed(), Duration::ZERO);
    }
}
