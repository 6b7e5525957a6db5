//! A window with no platform behind it.
//!
//! Used by the command-line runner and by tests. Input can be scripted one
//! batch per poll, and the window can be told to close after a number of
//! polls, which makes loop runs finite and repeatable.

use std::collections::VecDeque;

use cadence_common::WindowSize;
use cadence_input::{InputEvent, InputState};
use cadence_options::Options;

use crate::error::BoxError;
use crate::window::Window;

#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    title: String,
    suffix: String,
    size: WindowSize,
    refresh_rate: u32,
    focused: bool,
    minimized: bool,
    full_screen: bool,
    cursor_captured: bool,
    open: bool,
    polls: u64,
    close_after: Option<u64>,
    script: VecDeque<Vec<InputEvent>>,
}

impl HeadlessWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            suffix: String::new(),
            size: WindowSize::default(),
            refresh_rate: 60,
            focused: true,
            minimized: false,
            full_screen: false,
            cursor_captured: false,
            open: false,
            polls: 0,
            close_after: None,
            script: VecDeque::new(),
        }
    }

    /// Reported refresh rate. 0 means unknown.
    pub fn with_refresh_rate(mut self, hz: u32) -> Self {
        self.refresh_rate = hz;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn minimized(mut self, minimized: bool) -> Self {
        self.minimized = minimized;
        self
    }

    /// Close once `polls` event polls have happened.
    pub fn close_after_polls(mut self, polls: u64) -> Self {
        self.close_after = Some(polls);
        self
    }

    /// Queue one batch of events, delivered by a single poll. Batches are
    /// delivered in the order they were queued.
    pub fn queue_input(mut self, events: Vec<InputEvent>) -> Self {
        self.script.push_back(events);
        self
    }

    /// Base title plus the current suffix.
    pub fn title(&self) -> String {
        if self.suffix.is_empty() {
            self.title.clone()
        } else {
            format!("{} | {}", self.title, self.suffix)
        }
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Close the window at the next check.
    pub fn close(&mut self) {
        self.open = false;
    }
}

impl Window for HeadlessWindow {
    fn init(&mut self, options: &Options) -> Result<(), BoxError> {
        if options.window_size.is_empty() {
            return Err(format!("invalid window size {:?}", options.window_size).into());
        }
        self.size = options.window_size;
        self.full_screen = options.is_full_screen();
        self.open = true;
        tracing::debug!(title = %self.title, "headless window opened");
        Ok(())
    }

    fn dispose(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn refresh_rate(&self) -> u32 {
        self.refresh_rate
    }

    fn size(&self) -> WindowSize {
        self.size
    }

    fn poll_events(&mut self, input: &mut InputState) {
        self.polls += 1;
        if self.polls == 1 {
            input.apply(InputEvent::CursorEntered);
        }
        if let Some(batch) = self.script.pop_front() {
            input.apply_all(batch);
        }
        if self.close_after.is_some_and(|n| self.polls >= n) {
            self.open = false;
        }
    }

    fn set_title_suffix(&mut self, suffix: &str) {
        self.suffix = suffix.to_owned();
    }

    fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    fn set_full_screen(&mut self, full_screen: bool) {
        self.full_screen = full_screen;
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
    }
}
