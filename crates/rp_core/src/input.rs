//! Held-key tracking.
//!
//! Movement and jump are level-triggered: they read which keys are down at
//! the moment a fixed tick runs, matching a polled "is key pressed" model.
//! One-shot actions (pause, reload, overlay toggle) are handled by the frame
//! driver on the press event itself and never pass through here.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Escape,
    Space,
    F3,
    W,
    A,
    D,
    P,
    R,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// True when any of `keys` is held. Bindings with alternates (arrows and
    /// WASD) go through this.
    pub fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|key| self.held.contains(key))
    }

    /// Drop everything, e.g. when the window loses focus and release events
    /// will never arrive.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
