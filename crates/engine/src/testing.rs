//! Recording collaborators for loop tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cadence_common::WindowSize;
use cadence_input::{InputState, Key};
use cadence_options::Options;
use cadence_time::{Clock, ManualClock};

use crate::error::BoxError;
use crate::headless::HeadlessWindow;
use crate::renderer::Renderer;
use crate::window::Window;
use crate::world::World;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    WindowInit,
    WindowDispose,
    RendererInit,
    RendererDispose,
    WorldInit,
    WorldDispose,
    HandleInput,
    Update,
    /// Clock reading at render time.
    Render(Duration),
    Title(String),
    Screenshot,
    FullScreen(bool),
    CursorCaptured(bool),
}

#[derive(Debug, Clone, Default)]
pub struct Log(Arc<Mutex<Vec<Call>>>);

impl Log {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|c| pred(c)).count()
    }
}

/// A [`HeadlessWindow`] that records calls and can charge simulated time
/// for every poll.
pub struct TestWindow {
    log: Log,
    inner: HeadlessWindow,
    poll_cost: Option<(ManualClock, Duration)>,
}

impl TestWindow {
    pub fn new(log: Log, inner: HeadlessWindow) -> Self {
        Self {
            log,
            inner,
            poll_cost: None,
        }
    }

    pub fn with_poll_cost(mut self, clock: ManualClock, cost: Duration) -> Self {
        self.poll_cost = Some((clock, cost));
        self
    }
}

impl Window for TestWindow {
    fn init(&mut self, options: &Options) -> Result<(), BoxError> {
        self.log.push(Call::WindowInit);
        self.inner.init(options)
    }

    fn dispose(&mut self) {
        self.log.push(Call::WindowDispose);
        self.inner.dispose();
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    fn is_focused(&self) -> bool {
        self.inner.is_focused()
    }

    fn is_minimized(&self) -> bool {
        self.inner.is_minimized()
    }

    fn refresh_rate(&self) -> u32 {
        self.inner.refresh_rate()
    }

    fn size(&self) -> WindowSize {
        self.inner.size()
    }

    fn poll_events(&mut self, input: &mut InputState) {
        if let Some((clock, cost)) = &self.poll_cost {
            clock.advance(*cost);
        }
        self.inner.poll_events(input);
    }

    fn set_title_suffix(&mut self, suffix: &str) {
        self.log.push(Call::Title(suffix.to_owned()));
        self.inner.set_title_suffix(suffix);
    }

    fn is_full_screen(&self) -> bool {
        self.inner.is_full_screen()
    }

    fn set_full_screen(&mut self, full_screen: bool) {
        self.log.push(Call::FullScreen(full_screen));
        self.inner.set_full_screen(full_screen);
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        self.log.push(Call::CursorCaptured(captured));
        self.inner.set_cursor_captured(captured);
    }
}

pub struct TestWorld {
    log: Log,
    pub fail_init: bool,
    /// Fail the n-th update, counting from 1.
    pub fail_update_at: Option<u64>,
    pub panic_on_update: bool,
    pub updates: u64,
    pub steps: Arc<Mutex<Vec<f32>>>,
    pub space_taps: Arc<Mutex<u32>>,
}

impl TestWorld {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            fail_init: false,
            fail_update_at: None,
            panic_on_update: false,
            updates: 0,
            steps: Arc::default(),
            space_taps: Arc::default(),
        }
    }
}

impl World for TestWorld {
    fn init(&mut self, _options: &Options) -> Result<(), BoxError> {
        self.log.push(Call::WorldInit);
        if self.fail_init {
            return Err("world init failed".into());
        }
        Ok(())
    }

    fn dispose(&mut self) {
        self.log.push(Call::WorldDispose);
    }

    fn handle_input(&mut self, input: &InputState) -> Result<(), BoxError> {
        self.log.push(Call::HandleInput);
        if input.keyboard.is_tapped(Key::Space) {
            *self.space_taps.lock().unwrap() += 1;
        }
        Ok(())
    }

    fn update_logic(&mut self, step: f32) -> Result<(), BoxError> {
        self.updates += 1;
        self.log.push(Call::Update);
        self.steps.lock().unwrap().push(step);
        if self.panic_on_update {
            panic!("world exploded");
        }
        if self.fail_update_at == Some(self.updates) {
            return Err(format!("update {} failed", self.updates).into());
        }
        Ok(())
    }
}

pub struct TestRenderer {
    log: Log,
    clock: Option<ManualClock>,
    /// Fail every n-th render, counting from 1.
    pub fail_every: Option<u64>,
    pub panic_on_first: bool,
    pub fail_screenshot: bool,
    renders: u64,
}

impl TestRenderer {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            clock: None,
            fail_every: None,
            panic_on_first: false,
            fail_screenshot: false,
            renders: 0,
        }
    }

    /// Stamp render calls with readings from `clock`.
    pub fn with_clock(mut self, clock: ManualClock) -> Self {
        self.clock = Some(clock);
        self
    }
}

impl Renderer<TestWorld> for TestRenderer {
    fn init(&mut self, _window: &dyn Window, _options: &Options) -> Result<(), BoxError> {
        self.log.push(Call::RendererInit);
        Ok(())
    }

    fn dispose(&mut self) {
        self.log.push(Call::RendererDispose);
    }

    fn render(
        &mut self,
        _window: &dyn Window,
        _world: &TestWorld,
        _options: &Options,
    ) -> Result<(), BoxError> {
        self.renders += 1;
        let at = self.clock.as_ref().map_or(Duration::ZERO, |c| c.now());
        self.log.push(Call::Render(at));
        if self.panic_on_first && self.renders == 1 {
            panic!("renderer exploded");
        }
        if self.fail_every.is_some_and(|n| self.renders % n == 0) {
            return Err(format!("frame {} failed", self.renders).into());
        }
        Ok(())
    }

    fn take_screenshot(&mut self) -> Result<(), BoxError> {
        self.log.push(Call::Screenshot);
        if self.fail_screenshot {
            return Err("no frame to capture".into());
        }
        Ok(())
    }
}
