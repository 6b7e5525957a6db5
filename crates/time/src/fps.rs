use std::time::Duration;

use crate::clock::Clock;
use crate::stopwatch::StopWatch;

/// Counts rendered frames and reports the total once per interval.
#[derive(Debug, Clone)]
pub struct FpsCounter<C: Clock> {
    timer: StopWatch<C>,
    interval: Duration,
    frames: u32,
    last_report: Option<u32>,
}

impl<C: Clock> FpsCounter<C> {
    pub fn new(clock: C, interval: Duration) -> Self {
        let mut timer = StopWatch::new(clock);
        timer.start();
        Self {
            timer,
            interval,
            frames: 0,
            last_report: None,
        }
    }

    /// Count one frame. Returns the frames counted in the previous interval
    /// when that interval has just run out.
    pub fn frame(&mut self) -> Option<u32> {
        let mut report = None;
        if self.timer.elapsed() > self.interval {
            self.timer.restart();
            report = Some(self.frames);
            self.last_report = report;
            self.frames = 0;
        }
        self.frames += 1;
        report
    }

    /// Most recent completed report.
    pub fn last_report(&self) -> Option<u32> {
        self.last_report
    }
}
