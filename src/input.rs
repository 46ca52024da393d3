//! Keyboard/touch state to per-frame [`TickInput`] snapshots
//!
//! Movement and fire follow the held state. Pause and start fire only on the
//! frame a key goes down, which is why the previous frame's keys are kept.

use std::collections::HashSet;

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Space,
    Z,
    P,
    Escape,
    Enter,
}

impl Key {
    /// Map a DOM-style key code (`"ArrowLeft"`, `"KeyZ"`, ...) to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "KeyA" => Some(Key::A),
            "KeyD" => Some(Key::D),
            "Space" => Some(Key::Space),
            "KeyZ" => Some(Key::Z),
            "KeyP" => Some(Key::P),
            "Escape" => Some(Key::Escape),
            "Enter" => Some(Key::Enter),
            _ => None,
        }
    }
}

/// Touch zones: a touch on the left half steers left, the right half steers
/// right, and any touch fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TouchState {
    /// Build from touch x positions on a surface `width` wide
    pub fn from_touches(xs: &[f32], width: f32) -> Self {
        let center = width / 2.0;
        Self {
            left: xs.iter().any(|&x| x < center),
            right: xs.iter().any(|&x| x >= center),
            fire: !xs.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    keys: HashSet<Key>,
    previous_keys: HashSet<Key>,
    touch: TouchState,
    previous_touch_fire: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn set_touch(&mut self, touch: TouchState) {
        self.touch = touch;
    }

    /// Focus lost: drop everything held
    pub fn clear(&mut self) {
        self.keys.clear();
        self.touch = TouchState::default();
    }

    fn held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn just_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key) && !self.previous_keys.contains(&key)
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.held(Key::Left) || self.held(Key::A) || self.touch.left,
            right: self.held(Key::Right) || self.held(Key::D) || self.touch.right,
            fire: self.held(Key::Space) || self.held(Key::Z) || self.touch.fire,
            pause: self.just_pressed(Key::P) || self.just_pressed(Key::Escape),
            start: self.just_pressed(Key::Space)
                || self.just_pressed(Key::Enter)
                || (self.touch.fire && !self.previous_touch_fire),
        }
    }

    /// Call once after the frame's tick
    pub fn end_frame(&mut self) {
        self.previous_keys.clone_from(&self.keys);
        self.previous_touch_fire = self.touch.fire;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_is_edge_triggered() {
        let mut input = InputTracker::new();
        input.key_down(Key::P);
        assert!(input.snapshot().pause);
        input.end_frame();

        // Still held on the next frame
        assert!(!input.snapshot().pause);

        input.key_up(Key::P);
        input.end_frame();
        input.key_down(Key::Escape);
        assert!(input.snapshot().pause);
    }

    #[test]
    fn test_space_fires_while_held_but_starts_once() {
        let mut input = InputTracker::new();
        input.key_down(Key::Space);
        let first = input.snapshot();
        assert!(first.fire && first.start);
        input.end_frame();

        let second = input.snapshot();
        assert!(second.fire);
        assert!(!second.start);
    }

    #[test]
    fn test_touch_zones() {
        let mut input = InputTracker::new();
        input.set_touch(TouchState::from_touches(&[50.0], 480.0));
        let snap = input.snapshot();
        assert!(snap.left && !snap.right && snap.fire && snap.start);
        input.end_frame();
        assert!(!input.snapshot().start);

        input.set_touch(TouchState::from_touches(&[], 480.0));
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_clear_releases_keys() {
        let mut input = InputTracker::new();
        input.key_down(Key::Left);
        input.key_down(Key::Z);
        input.clear();
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("KeyD"), Some(Key::D));
        assert_eq!(Key::from_code("KeyQ"), None);
    }
}
