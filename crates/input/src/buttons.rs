use std::collections::HashSet;
use std::hash::Hash;

use crate::key::{Key, MouseButton};

/// Held / tapped / released state for a set of binary inputs.
///
/// `tapped` and `released` are edges: they hold from the event that caused
/// them until the next [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct ButtonStates<B> {
    down: HashSet<B>,
    tapped: HashSet<B>,
    released: HashSet<B>,
}

impl<B: Copy + Eq + Hash> ButtonStates<B> {
    pub fn new() -> Self {
        Self {
            down: HashSet::new(),
            tapped: HashSet::new(),
            released: HashSet::new(),
        }
    }

    /// Record a press. Repeats while already held are ignored.
    pub fn press(&mut self, button: B) {
        if self.down.insert(button) {
            self.tapped.insert(button);
        }
    }

    /// Record a release. Releasing something not held is ignored.
    pub fn release(&mut self, button: B) {
        if self.down.remove(&button) {
            self.released.insert(button);
        }
    }

    pub fn is_down(&self, button: B) -> bool {
        self.down.contains(&button)
    }

    /// Pressed since the last `update`.
    pub fn is_tapped(&self, button: B) -> bool {
        self.tapped.contains(&button)
    }

    /// Released since the last `update`.
    pub fn is_released(&self, button: B) -> bool {
        self.released.contains(&button)
    }

    pub fn held(&self) -> impl Iterator<Item = B> + '_ {
        self.down.iter().copied()
    }

    /// Advance to the next frame: clear edges, keep held state.
    pub fn update(&mut self) {
        self.tapped.clear();
        self.released.clear();
    }

    /// Forget everything, e.g. when focus is lost and key-ups will never arrive.
    pub fn clear(&mut self) {
        self.down.clear();
        self.tapped.clear();
        self.released.clear();
    }
}

impl<B: Copy + Eq + Hash> Default for ButtonStates<B> {
    fn default() -> Self {
        Self::new()
    }
}

pub type Keyboard = ButtonStates<Key>;
pub type MouseButtons = ButtonStates<MouseButton>;
