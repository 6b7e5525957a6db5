use std::time::Duration;

/// What to do when the accumulated backlog exceeds what one frame should drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BacklogPolicy {
    /// Drain every pending step, however many. A long stall (debugger, OS
    /// suspend) turns into a burst of catch-up updates.
    #[default]
    Unbounded,
    /// Drain at most `max_steps` per frame and discard the rest of the
    /// backlog, keeping only the sub-step remainder.
    Clamp { max_steps: u32 },
}

/// Fixed timestep accumulator.
///
/// Wall time goes in through [`accumulate`](Self::accumulate); fixed steps come
/// out of [`next_step`](Self::next_step) until less than one step remains.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
    policy: BacklogPolicy,
    steps_this_frame: u32,
    dropped: Duration,
}

impl FixedTimestep {
    /// A timestep of `step`. Zero is bumped to one nanosecond.
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Duration::from_nanos(1)),
            accumulator: Duration::ZERO,
            policy: BacklogPolicy::default(),
            steps_this_frame: 0,
            dropped: Duration::ZERO,
        }
    }

    /// A timestep running `updates_per_second` times per second.
    pub fn from_rate(updates_per_second: u32) -> Self {
        Self::new(Duration::from_nanos(
            1_000_000_000 / u64::from(updates_per_second.max(1)),
        ))
    }

    pub fn with_policy(mut self, policy: BacklogPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add measured wall time and begin a new frame's drain.
    pub fn accumulate(&mut self, elapsed: Duration) {
        self.accumulator = self.accumulator.saturating_add(elapsed);
        self.steps_this_frame = 0;
        self.dropped = Duration::ZERO;
    }

    /// Take one step from the accumulator, or `None` once less than a step is
    /// left (or the per-frame clamp was hit).
    pub fn next_step(&mut self) -> Option<Duration> {
        if self.accumulator < self.step {
            return None;
        }
        if let BacklogPolicy::Clamp { max_steps } = self.policy {
            if self.steps_this_frame >= max_steps.max(1) {
                let kept = self.remainder();
                self.dropped = self.accumulator - kept;
                self.accumulator = kept;
                tracing::warn!(
                    dropped_ms = self.dropped.as_secs_f64() * 1000.0,
                    max_steps,
                    "logic backlog clamped"
                );
                return None;
            }
        }
        self.accumulator -= self.step;
        self.steps_this_frame += 1;
        Some(self.step)
    }

    /// Backlog discarded by the clamp during the current frame, if any.
    pub fn dropped_backlog(&self) -> Option<Duration> {
        (!self.dropped.is_zero()).then_some(self.dropped)
    }

    /// Steps handed out since the last `accumulate`.
    pub fn steps_this_frame(&self) -> u32 {
        self.steps_this_frame
    }

    /// Interpolation factor between the last two steps, in `[0, 1)` after a
    /// full drain.
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f64() / self.step.as_secs_f64()) as f32
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    pub fn policy(&self) -> BacklogPolicy {
        self.policy
    }

    fn remainder(&self) -> Duration {
        let rem = self.accumulator.as_nanos() % self.step.as_nanos();
        Duration::from_nanos(u64::try_from(rem).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(ts: &mut FixedTimestep) -> u32 {
        let mut n = 0;
        while ts.next_step().is_some() {
            n += 1;
        }
        n
    }

    #[test]
    fn three_hundred_hertz_step() {
        let ts = FixedTimestep::from_rate(300);
        assert_eq!(ts.step(), Duration::from_nanos(3_333_333));
    }

    #[test]
    fn ten_milliseconds_yield_three_updates() {
        let mut ts = FixedTimestep::from_rate(300);
        ts.accumulate(Duration::from_millis(10));
        assert_eq!(drain(&mut ts), 3);
        assert!(ts.accumulator() < ts.step());
    }

    #[test]
    fn partial_frames_carry_over() {
        let mut ts = FixedTimestep::new(Duration::from_millis(10));
        ts.accumulate(Duration::from_millis(6));
        assert_eq!(drain(&mut ts), 0);
        ts.accumulate(Duration::from_millis(6));
        assert_eq!(drain(&mut ts), 1);
        assert_eq!(ts.accumulator(), Duration::from_millis(2));
    }

    #[test]
    fn total_updates_match_floor_of_total_time() {
        let mut ts = FixedTimestep::from_rate(300);
        let samples_us = [0_u64, 1, 999, 3_333, 3_334, 16_667, 250, 40_000, 7, 12_345];
        let mut total = Duration::ZERO;
        let mut updates: u128 = 0;
        for us in samples_us {
            let d = Duration::from_micros(us);
            total += d;
            ts.accumulate(d);
            updates += u128::from(drain(&mut ts));
            assert!(ts.accumulator() < ts.step());
        }
        assert_eq!(updates, total.as_nanos() / ts.step().as_nanos());
    }

    #[test]
    fn unbounded_policy_catches_up_fully() {
        let mut ts = FixedTimestep::from_rate(300);
        ts.accumulate(Duration::from_secs(2));
        assert_eq!(drain(&mut ts), 600);
        assert!(ts.dropped_backlog().is_none());
    }

    #[test]
    fn clamp_policy_drops_excess_backlog() {
        let mut ts = FixedTimestep::new(Duration::from_millis(10))
            .with_policy(BacklogPolicy::Clamp { max_steps: 5 });
        ts.accumulate(Duration::from_millis(123));
        assert_eq!(drain(&mut ts), 5);
        assert_eq!(ts.accumulator(), Duration::from_millis(3));
        assert_eq!(ts.dropped_backlog(), Some(Duration::from_millis(70)));

        ts.accumulate(Duration::from_millis(8));
        assert_eq!(drain(&mut ts), 1);
        assert!(ts.dropped_backlog().is_none());
    }

    #[test]
    fn clamp_of_zero_still_makes_progress() {
        let mut ts = FixedTimestep::new(Duration::from_millis(10))
            .with_policy(BacklogPolicy::Clamp { max_steps: 0 });
        ts.accumulate(Duration::from_millis(35));
        assert_eq!(drain(&mut ts), 1);
    }

    #[test]
    fn alpha_stays_below_one_after_drain() {
        let mut ts = FixedTimestep::new(Duration::from_millis(10));
        ts.accumulate(Duration::from_millis(25));
        drain(&mut ts);
        let a = ts.alpha();
        assert!((0.0..1.0).contains(&a), "alpha was {a}");
    }

    #[test]
    fn zero_step_is_bumped() {
        let ts = FixedTimestep::new(Duration::ZERO);
        assert_eq!(ts.step(), Duration::from_nanos(1));
    }
}
