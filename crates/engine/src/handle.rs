use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::EngineError;

/// Counters collected by the loop. Diagnostic only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopStats {
    pub iterations: u64,
    pub updates: u64,
    /// Render attempts, failed ones included.
    pub frames: u64,
    pub render_failures: u64,
    /// Frames counted in the last completed FPS interval.
    pub last_fps: Option<u32>,
    /// Duration of the last complete iteration, pacing included.
    pub last_frame_time: Duration,
    /// Logic backlog discarded by a clamping backlog policy.
    pub dropped_backlog: Duration,
}

/// Cloneable view of the loop's running flag.
#[derive(Debug, Clone)]
pub struct StopSignal {
    running: Arc<AtomicBool>,
}

impl StopSignal {
    pub(crate) fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Ask the loop to exit at the top of its next iteration.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn set_running(&self) {
        self.running.store(true, Ordering::Release);
    }
}

/// Owner of a loop started with [`Engine::start`](crate::Engine::start).
#[derive(Debug)]
pub struct EngineHandle {
    signal: StopSignal,
    thread: JoinHandle<Result<LoopStats, EngineError>>,
}

impl EngineHandle {
    pub(crate) fn new(
        signal: StopSignal,
        thread: JoinHandle<Result<LoopStats, EngineError>>,
    ) -> Self {
        Self { signal, thread }
    }

    pub fn stop(&self) {
        self.signal.stop();
    }

    /// True until the loop exits for any reason.
    pub fn is_running(&self) -> bool {
        self.signal.is_running()
    }

    /// True once the loop thread, teardown included, has finished.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.signal.clone()
    }

    /// Wait for the loop thread and return how the loop ended.
    pub fn join(self) -> Result<LoopStats, EngineError> {
        match self.thread.join() {
            Ok(outcome) => outcome,
            Err(payload) => Err(EngineError::Panicked(crate::error::panic_message(
                payload.as_ref(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_clones_share_state() {
        let signal = StopSignal::new();
        let other = signal.clone();
        assert!(!other.is_running());
        signal.set_running();
        assert!(other.is_running());
        other.stop();
        assert!(!signal.is_running());
    }
}
