use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use cadence_time::{
    frame_period, refresh_period, Clock, FixedTimestep, FpsCounter, FramePacer, StopWatch,
};

use crate::engine::Engine;
use crate::error::{panic_message, EngineError};
use crate::renderer::Renderer;
use crate::window::Window;
use crate::world::World;

/// Timing state that lives only as long as one run of the loop.
struct LoopTimers<C: Clock> {
    timestep: FixedTimestep,
    watch: StopWatch<C>,
    fps: FpsCounter<C>,
    pacer: FramePacer,
}

impl<Win, Wld, R, C> Engine<Win, Wld, R, C>
where
    Win: Window,
    Wld: World,
    R: Renderer<Wld>,
    C: Clock,
{
    pub(crate) fn game_loop(&mut self) -> Result<(), EngineError> {
        let mut timers = LoopTimers {
            timestep: FixedTimestep::from_rate(self.config.updates_per_second)
                .with_policy(self.config.backlog),
            watch: StopWatch::new(self.clock.clone()),
            fps: FpsCounter::new(self.clock.clone(), self.config.fps_interval),
            pacer: FramePacer::new(self.config.sync_granularity),
        };
        timers.watch.start();

        while self.running.is_running() && self.window.is_open() {
            self.iteration(&mut timers)?;
        }
        Ok(())
    }

    fn iteration(&mut self, timers: &mut LoopTimers<C>) -> Result<(), EngineError> {
        let elapsed = timers.watch.restart();
        timers.timestep.accumulate(elapsed);
        let frame_start = timers.watch.start_time();
        self.stats.iterations += 1;

        if self.window.is_focused() {
            self.handle_input()?;
        }

        while let Some(step) = timers.timestep.next_step() {
            self.world
                .update_logic(step.as_secs_f32())
                .map_err(EngineError::Update)?;
            self.stats.updates += 1;
        }
        if let Some(dropped) = timers.timestep.dropped_backlog() {
            self.stats.dropped_backlog += dropped;
        }

        if !self.window.is_minimized() {
            self.render_frame(&mut timers.fps);
        }

        self.window.poll_events(&mut self.input);

        if self.options.is_vsync_enabled() {
            let deadline = frame_start + self.pacing_period();
            let running = &self.running;
            timers
                .pacer
                .wait_until(&self.clock, deadline, || running.is_running());
        }

        self.stats.last_frame_time = timers.watch.stop();
        tracing::trace!(
            frame_ms = self.stats.last_frame_time.as_secs_f64() * 1000.0,
            "iteration complete"
        );
        Ok(())
    }

    fn render_frame(&mut self, fps: &mut FpsCounter<C>) {
        if let Some(frames) = fps.frame() {
            self.window.set_title_suffix(&format!("FPS: {frames}"));
            self.stats.last_fps = Some(frames);
        }
        self.stats.frames += 1;

        self.window.pre_render();
        self.world.pre_render();

        let (window, world, options) = (&self.window, &self.world, &self.options);
        let renderer = &mut self.renderer;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            renderer.render(window, world, options)
        }));
        let failure = match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => format!("panic: {}", panic_message(payload.as_ref())),
        };
        self.stats.render_failures += 1;
        tracing::error!("render failed: {failure}");
    }

    /// Pacing period for the window's current refresh rate. Re-read every
    /// frame so moving to another monitor takes effect.
    fn pacing_period(&self) -> Duration {
        frame_period(self.window.refresh_rate())
            .unwrap_or_else(|| refresh_period(self.config.fallback_refresh_rate))
    }
}
