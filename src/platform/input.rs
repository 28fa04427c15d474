//! Keyboard input
//!
//! Hosts forward key presses and releases by DOM key name (or legacy key
//! code). The set of held keys is sampled into a [`TickInput`] once per tick.

use std::collections::HashSet;

use crate::sim::tick::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `ArrowUp`
    Thrust,
    /// `ArrowLeft`
    SpinLeft,
    /// `ArrowRight`
    SpinRight,
    /// Space bar
    Fire,
    /// `p`
    Pause,
    /// `Enter`
    Confirm,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "ArrowUp" => Some(Key::Thrust),
            "ArrowLeft" => Some(Key::SpinLeft),
            "ArrowRight" => Some(Key::SpinRight),
            " " => Some(Key::Fire),
            "p" => Some(Key::Pause),
            "Enter" => Some(Key::Confirm),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode`, for hosts without key names
    pub fn from_code(code: u32) -> Option<Key> {
        match code {
            13 => Some(Key::Confirm),
            32 => Some(Key::Fire),
            37 => Some(Key::SpinLeft),
            38 => Some(Key::Thrust),
            39 => Some(Key::SpinRight),
            80 => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashSet<Key>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is one the game uses, so the host can swallow the event
    pub fn key_down(&mut self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.held.insert(key);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.held.remove(&key);
        }
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop everything held, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Controls for the coming tick
    pub fn sample(&self) -> TickInput {
        TickInput {
            thrust: self.is_held(Key::Thrust),
            spin_left: self.is_held(Key::SpinLeft),
            spin_right: self.is_held(Key::SpinRight),
            fire: self.is_held(Key::Fire),
            pause: self.is_held(Key::Pause),
            confirm: self.is_held(Key::Confirm),
        }
    }
}

impl<'a> FromIterator<&'a str> for Keyboard {
    /// Keyboard with the named keys held; unknown names are ignored
    fn from_iter<I: IntoIterator<Item = &'a str>>(names: I) -> Self {
        let mut keyboard = Keyboard::new();
        for name in names {
            keyboard.key_down(name);
        }
        keyboard
    }
}
