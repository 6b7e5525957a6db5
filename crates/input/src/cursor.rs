use glam::Vec2;

/// Pointer position, per-frame motion and capture state.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    position: Vec2,
    delta: Vec2,
    on_screen: bool,
    captured: bool,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute move inside the window.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.on_screen = true;
    }

    /// Raw relative motion, reported independently of the visible pointer.
    pub fn add_motion(&mut self, delta: Vec2) {
        self.delta += delta;
    }

    pub fn set_on_screen(&mut self, on_screen: bool) {
        self.on_screen = on_screen;
    }

    /// Captured means hidden and confined: the camera-look mode.
    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Motion accumulated since the last `update`.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    pub fn on_screen(&self) -> bool {
        self.on_screen
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn update(&mut self) {
        self.delta = Vec2::ZERO;
    }
}

/// Scroll accumulated since the last `update`.
#[derive(Debug, Clone, Default)]
pub struct MouseWheel {
    scroll: Vec2,
}

impl MouseWheel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&mut self, by: Vec2) {
        self.scroll += by;
    }

    pub fn delta(&self) -> Vec2 {
        self.scroll
    }

    pub fn update(&mut self) {
        self.scroll = Vec2::ZERO;
    }
}
