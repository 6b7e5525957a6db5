use std::panic::{self, AssertUnwindSafe};

use cadence_input::{InputState, KeyBindings};
use cadence_options::{Options, OptionsStore};
use cadence_time::{Clock, SystemClock};

use crate::config::EngineConfig;
use crate::error::{panic_message, EngineError};
use crate::handle::{EngineHandle, LoopStats, StopSignal};
use crate::renderer::Renderer;
use crate::window::Window;
use crate::world::World;

/// The engine: a window, a world and a renderer, plus the loop that drives them.
///
/// Construction only stores the collaborators. Nothing runs until
/// [`start`](Self::start) spawns the loop thread or [`run`](Self::run) takes
/// over the current one.
pub struct Engine<Win, Wld, R, C = SystemClock> {
    pub(crate) window: Win,
    pub(crate) world: Wld,
    pub(crate) renderer: R,
    pub(crate) options: Options,
    pub(crate) store: Option<OptionsStore>,
    pub(crate) config: EngineConfig,
    pub(crate) bindings: KeyBindings,
    pub(crate) clock: C,
    pub(crate) running: StopSignal,
    pub(crate) input: InputState,
    pub(crate) stats: LoopStats,
}

impl<Win, Wld, R> Engine<Win, Wld, R, SystemClock>
where
    Win: Window,
    Wld: World,
    R: Renderer<Wld>,
{
    pub fn new(window: Win, world: Wld, renderer: R, options: Options) -> Self {
        Self {
            window,
            world,
            renderer,
            options,
            store: None,
            config: EngineConfig::default(),
            bindings: KeyBindings::default(),
            clock: SystemClock::new(),
            running: StopSignal::new(),
            input: InputState::new(),
            stats: LoopStats::default(),
        }
    }
}

impl<Win, Wld, R, C> Engine<Win, Wld, R, C>
where
    Win: Window,
    Wld: World,
    R: Renderer<Wld>,
    C: Clock,
{
    /// Persist options to `store` when the engine shuts down.
    pub fn with_store(mut self, store: OptionsStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Swap the time source.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Engine<Win, Wld, R, C2> {
        Engine {
            window: self.window,
            world: self.world,
            renderer: self.renderer,
            options: self.options,
            store: self.store,
            config: self.config,
            bindings: self.bindings,
            clock,
            running: self.running,
            input: self.input,
            stats: self.stats,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Handle to the running flag, usable before the loop starts.
    pub fn stop_signal(&self) -> StopSignal {
        self.running.clone()
    }

    /// Run boot, loop and teardown on a dedicated thread.
    pub fn start(self) -> Result<EngineHandle, EngineError>
    where
        Win: Send + 'static,
        Wld: Send + 'static,
        R: Send + 'static,
        C: Send + 'static,
    {
        let signal = self.running.clone();
        signal.set_running();
        let spawned = std::thread::Builder::new()
            .name("cadence-loop".into())
            .spawn(move || self.execute());
        match spawned {
            Ok(thread) => Ok(EngineHandle::new(signal, thread)),
            Err(e) => {
                signal.stop();
                Err(EngineError::Spawn(e))
            }
        }
    }

    /// Run boot, loop and teardown on the calling thread.
    ///
    /// Returns the loop counters, or the error that ended the loop. Teardown
    /// has run in both cases.
    pub fn run(self) -> Result<LoopStats, EngineError> {
        self.running.set_running();
        self.execute()
    }

    /// Expects the running flag to be raised already, so a stop requested
    /// between `start` and the thread getting scheduled is not lost.
    fn execute(mut self) -> Result<LoopStats, EngineError> {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| self.boot_and_loop())) {
            Ok(result) => result,
            Err(payload) => Err(EngineError::Panicked(panic_message(payload.as_ref()))),
        };
        self.running.stop();

        if let Err(e) = &outcome {
            tracing::error!("engine loop terminated: {e}");
        }
        self.teardown();

        outcome.map(|()| self.stats.clone())
    }

    fn boot_and_loop(&mut self) -> Result<(), EngineError> {
        self.boot()?;
        self.game_loop()
    }

    fn boot(&mut self) -> Result<(), EngineError> {
        let _span = tracing::info_span!("engine_boot").entered();

        self.window
            .init(&self.options)
            .map_err(EngineError::WindowInit)?;
        tracing::info!("window initialised");

        self.renderer
            .init(&self.window, &self.options)
            .map_err(EngineError::RendererInit)?;
        tracing::info!("renderer initialised");

        self.world
            .init(&self.options)
            .map_err(EngineError::WorldInit)?;
        tracing::info!("world initialised");

        tracing::info!(
            renderer = %self.renderer.description(),
            refresh_rate = self.window.refresh_rate(),
            updates_per_second = self.config.updates_per_second,
            "successful boot"
        );
        Ok(())
    }

    fn teardown(&mut self) {
        let _span = tracing::info_span!("engine_teardown").entered();

        guarded("world", || self.world.dispose());
        guarded("renderer", || self.renderer.dispose());
        guarded("window", || self.window.dispose());

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.options) {
                tracing::error!("failed to save options: {e}");
            }
        }

        tracing::info!(
            iterations = self.stats.iterations,
            updates = self.stats.updates,
            frames = self.stats.frames,
            render_failures = self.stats.render_failures,
            "engine terminated"
        );
    }
}

/// Run one disposal step, containing a panic so the remaining steps still run.
fn guarded(what: &str, dispose: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(dispose)) {
        tracing::error!(
            "{what} dispose panicked: {}",
            panic_message(payload.as_ref())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessWindow;
    use crate::testing::{Call, Log, TestRenderer, TestWindow, TestWorld};
    use cadence_input::{InputEvent, Key};
    use cadence_time::ManualClock;
    use std::time::{Duration, Instant};

    fn teardown_calls(log: &Log) -> Vec<Call> {
        log.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::WorldDispose | Call::RendererDispose | Call::WindowDispose
                )
            })
            .collect()
    }

    #[test]
    fn init_order_is_window_renderer_world() {
        let log = Log::default();
        let window = TestWindow::new(log.clone(), HeadlessWindow::new("t").close_after_polls(1));
        let engine = Engine::new(
            window,
            TestWorld::new(log.clone()),
            TestRenderer::new(log.clone()),
            Options::default(),
        );
        engine.run().unwrap();

        let inits: Vec<Call> = log
            .calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::WindowInit | Call::RendererInit | Call::WorldInit
                )
            })
            .collect();
        assert_eq!(
            inits,
            vec![Call::WindowInit, Call::RendererInit, Call::WorldInit]
        );
        assert_eq!(
            teardown_calls(&log),
            vec![Call::WorldDispose, Call::RendererDispose, Call::WindowDispose]
        );
    }

    #[test]
    fn init_failure_aborts_boot_and_still_tears_down() {
        let log = Log::default();
        let window = TestWindow::new(log.clone(), HeadlessWindow::new("t"));
        let mut world = TestWorld::new(log.clone());
        world.fail_init = true;
        let engine = Engine::new(
            window,
            world,
            TestRenderer::new(log.clone()),
            Options::default(),
        );

        let err = engine.run().unwrap_err();
        assert!(matches!(err, EngineError::WorldInit(_)), "got {err}");
        assert!(!log.calls().iter().any(|c| matches!(c, Call::Render(_))));
        assert_eq!(
            teardown_calls(&log),
            vec![Call::WorldDispose, Call::RendererDispose, Call::WindowDispose]
        );
    }

    #[test]
    fn fatal_update_error_tears_down_once_in_order() {
        let log = Log::default();
        let clock = ManualClock::new();
        let window = TestWindow::new(log.clone(), HeadlessWindow::new("t"))
            .with_poll_cost(clock.clone(), Duration::from_millis(10));
        let mut world = TestWorld::new(log.clone());
        world.fail_update_at = Some(2);
        let mut options = Options::default();
        options.vsync = false;

        let engine = Engine::new(window, world, TestRenderer::new(log.clone()), options)
            .with_clock(clock);
        let err = engine.run().unwrap_err();

        assert!(matches!(err, EngineError::Update(_)), "got {err}");
        assert_eq!(log.count(|c| matches!(c, Call::Update)), 2);
        assert_eq!(
            teardown_calls(&log),
            vec![Call::WorldDispose, Call::RendererDispose, Call::WindowDispose]
        );
    }

    #[test]
    fn panic_in_update_is_fatal_and_contained() {
        let log = Log::default();
        let clock = ManualClock::new();
        let window = TestWindow::new(log.clone(), HeadlessWindow::new("t"))
            .with_poll_cost(clock.clone(), Duration::from_millis(10));
        let mut world = TestWorld::new(log.clone());
        world.panic_on_update = true;
        let mut options = Options::default();
        options.vsync = false;

        let engine = Engine::new(window, world, TestRenderer::new(log.clone()), options)
            .with_clock(clock);
        match engine.run() {
            Err(EngineError::Panicked(msg)) => assert!(msg.contains("world exploded")),
            other => panic!("expected Panicked, got {other:?}"),
        }
        assert_eq!(
            teardown_calls(&log),
            vec![Call::WorldDispose, Call::RendererDispose, Call::WindowDispose]
        );
    }

    #[test]
    fn options_saved_on_shutdown() {
        let tmp = tempfile::tempdir().unwrap();
        let store = OptionsStore::new(tmp.path().join("options.json"));
        let log = Log::default();
        let headless = HeadlessWindow::new("t")
            .queue_input(vec![InputEvent::KeyPressed(Key::Digit3)])
            .close_after_polls(3);
        let window = TestWindow::new(log.clone(), headless);

        let engine = Engine::new(
            window,
            TestWorld::new(log.clone()),
            TestRenderer::new(log.clone()),
            Options::default(),
        )
        .with_store(store.clone());
        engine.run().unwrap();

        let saved = store.load().unwrap();
        assert!(!saved.vsync, "vsync toggle should have been persisted");
    }

    #[test]
    fn options_saved_even_after_fatal_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = OptionsStore::new(tmp.path().join("options.json"));
        let log = Log::default();
        let window = TestWindow::new(log.clone(), HeadlessWindow::new("t"));
        let mut world = TestWorld::new(log.clone());
        world.fail_init = true;

        let engine = Engine::new(
            window,
            world,
            TestRenderer::new(log.clone()),
            Options::default(),
        )
        .with_store(store.clone());
        assert!(engine.run().is_err());
        assert!(store.path().is_file());
    }

    #[test]
    fn start_and_stop_from_another_thread() {
        let log = Log::default();
        let window = TestWindow::new(log.clone(), HeadlessWindow::new("t").with_refresh_rate(120));
        let engine = Engine::new(
            window,
            TestWorld::new(log.clone()),
            TestRenderer::new(log.clone()),
            Options::default(),
        );

        let handle = engine.start().unwrap();
        assert!(handle.is_running());
        std::thread::sleep(Duration::from_millis(30));

        let asked = Instant::now();
        handle.stop();
        let stats = handle.join().unwrap();

        assert!(asked.elapsed() < Duration::from_secs(1));
        assert!(stats.iterations > 0);
        assert_eq!(
            teardown_calls(&log),
            vec![Call::WorldDispose, Call::RendererDispose, Call::WindowDispose]
        );
    }

    #[test]
    fn handle_reports_finished_after_window_closes() {
        let log = Log::default();
        let window = TestWindow::new(log.clone(), HeadlessWindow::new("t").close_after_polls(2));
        let mut options = Options::default();
        options.vsync = false;
        let engine = Engine::new(
            window,
            TestWorld::new(log.clone()),
            TestRenderer::new(log.clone()),
            options,
        );

        let handle = engine.start().unwrap();
        let signal = handle.stop_signal();
        let stats = handle.join().unwrap();
        assert_eq!(stats.iterations, 2);
        assert!(!signal.is_running());
    }
}
