use std::time::Duration;

use cadence_common::WindowSize;
use cadence_engine::{BoxError, InputState, Options, Window};
use cadence_input::InputEvent;
use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorGrabMode, Fullscreen, Window as WinitWindow, WindowId};

use crate::keymap::{translate_button, translate_key};

/// Pumps allowed for the platform to hand out the first window.
const CREATE_ATTEMPTS: u32 = 100;

/// Native window backed by winit.
///
/// The event loop is created in `init` and pumped without blocking from
/// `poll_events`, so it lives on whichever thread runs the engine loop. Most
/// platforms require that to be the main thread.
pub struct DesktopWindow {
    event_loop: Option<EventLoop<()>>,
    platform: Platform,
}

/// Event-loop side of the window: owns the winit window and buffers
/// translated input until the next poll.
struct Platform {
    title: String,
    window: Option<WinitWindow>,
    create_error: Option<String>,
    initial_size: WindowSize,
    start_full_screen: bool,
    open: bool,
    focused: bool,
    pending: Vec<InputEvent>,
}

impl DesktopWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            event_loop: None,
            platform: Platform {
                title: title.into(),
                window: None,
                create_error: None,
                initial_size: WindowSize::default(),
                start_full_screen: false,
                open: false,
                focused: false,
                pending: Vec::new(),
            },
        }
    }

    fn window(&self) -> Option<&WinitWindow> {
        self.platform.window.as_ref()
    }

    fn pump(&mut self, timeout: Duration) {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return;
        };
        let status = event_loop.pump_app_events(Some(timeout), &mut self.platform);
        if let PumpStatus::Exit(code) = status {
            tracing::debug!(code, "event loop exited");
            self.platform.open = false;
        }
    }
}

impl Window for DesktopWindow {
    fn init(&mut self, options: &Options) -> Result<(), BoxError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop = Some(event_loop);
        self.platform.initial_size = options.window_size;
        self.platform.start_full_screen = options.is_full_screen();

        for _ in 0..CREATE_ATTEMPTS {
            self.pump(Duration::from_millis(10));
            if let Some(reason) = self.platform.create_error.take() {
                return Err(format!("window creation failed: {reason}").into());
            }
            if self.platform.window.is_some() {
                self.platform.open = true;
                // events seen before the window existed are stale
                self.platform.pending.clear();
                return Ok(());
            }
        }
        Err("platform never provided a window".into())
    }

    fn dispose(&mut self) {
        self.platform.open = false;
        self.platform.window = None;
        self.event_loop = None;
    }

    fn is_open(&self) -> bool {
        self.platform.open
    }

    fn is_focused(&self) -> bool {
        self.platform.focused
    }

    fn is_minimized(&self) -> bool {
        self.window()
            .is_some_and(|w| w.is_minimized().unwrap_or(false) || self.size().is_empty())
    }

    fn refresh_rate(&self) -> u32 {
        self.window()
            .and_then(|w| w.current_monitor())
            .and_then(|m| m.refresh_rate_millihertz())
            .map_or(0, |mhz| (mhz + 500) / 1000)
    }

    fn size(&self) -> WindowSize {
        self.window().map_or(WindowSize::new(0, 0), |w| {
            let size = w.inner_size();
            WindowSize::new(size.width, size.height)
        })
    }

    fn poll_events(&mut self, input: &mut InputState) {
        self.pump(Duration::ZERO);
        input.apply_all(self.platform.pending.drain(..));
    }

    fn set_title_suffix(&mut self, suffix: &str) {
        if let Some(w) = self.window() {
            w.set_title(&format!("{} | {suffix}", self.platform.title));
        }
    }

    fn is_full_screen(&self) -> bool {
        self.window().is_some_and(|w| w.fullscreen().is_some())
    }

    fn set_full_screen(&mut self, full_screen: bool) {
        if let Some(w) = self.window() {
            w.set_fullscreen(full_screen.then_some(Fullscreen::Borderless(None)));
        }
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        let Some(w) = self.window() else {
            return;
        };
        let grab = if captured {
            w.set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| w.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            w.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = grab {
            tracing::warn!("cursor grab not applied: {e}");
        }
        w.set_cursor_visible(!captured);
    }
}

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let size = self.initial_size;
        let attrs = WinitWindow::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(size.width, size.height))
            .with_fullscreen(self.start_full_screen.then_some(Fullscreen::Borderless(None)));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                self.focused = window.has_focus();
                self.window = Some(window);
            }
            Err(e) => self.create_error = Some(e.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.open = false,
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    self.pending.push(InputEvent::FocusLost);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = translate_key(event.physical_key) {
                    self.pending.push(match event.state {
                        ElementState::Pressed => InputEvent::KeyPressed(key),
                        ElementState::Released => InputEvent::KeyReleased(key),
                    });
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = translate_button(button);
                self.pending.push(match state {
                    ElementState::Pressed => InputEvent::ButtonPressed(button),
                    ElementState::Released => InputEvent::ButtonReleased(button),
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                let at = Vec2::new(position.x as f32, position.y as f32);
                self.pending.push(InputEvent::CursorMoved(at));
            }
            WindowEvent::CursorEntered { .. } => self.pending.push(InputEvent::CursorEntered),
            WindowEvent::CursorLeft { .. } => self.pending.push(InputEvent::CursorLeft),
            WindowEvent::MouseWheel { delta, .. } => {
                let by = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
                    MouseScrollDelta::PixelDelta(p) => Vec2::new(p.x as f32, p.y as f32),
                };
                self.pending.push(InputEvent::Scrolled(by));
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let by = Vec2::new(delta.0 as f32, delta.1 as f32);
            self.pending.push(InputEvent::MouseMotion(by));
        }
    }
}
