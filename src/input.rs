use std::collections::HashMap;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::constants::HOLD_WINDOW_FRAMES;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Down,
    Up,
}

/// Discrete key transition delivered to the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub transition: Transition,
}

impl InputEvent {
    pub fn down(key: Key) -> Self {
        InputEvent { key, transition: Transition::Down }
    }

    pub fn up(key: Key) -> Self {
        InputEvent { key, transition: Transition::Up }
    }
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

/// Turns the terminal's press/repeat/release stream into game key transitions.
///
/// Every press or repeat is forwarded as a Down, so a key held through a
/// respawn takes effect on the next repeat. The ship's handler is idempotent
/// for repeated Downs. Each release of a held key yields one Up.
///
/// Terminals without the keyboard-enhancement protocol never report releases;
/// OS key-repeat shows up as repeated presses instead. With `expire_silent_keys`
/// set, a key that has produced nothing for `HOLD_WINDOW_FRAMES` frames is
/// treated as released.
pub struct KeyTracker {
    held: HashMap<Key, u64>,
    expire_silent_keys: bool,
}

impl KeyTracker {
    pub fn new(expire_silent_keys: bool) -> Self {
        KeyTracker { held: HashMap::new(), expire_silent_keys }
    }

    pub fn on_key_event(&mut self, event: KeyEvent, frame: u64) -> Option<InputEvent> {
        let key = map_key(event.code)?;
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.insert(key, frame);
                Some(InputEvent::down(key))
            }
            KeyEventKind::Release => self.held.remove(&key).map(|_| InputEvent::up(key)),
        }
    }

    pub fn expire(&mut self, frame: u64) -> Vec<InputEvent> {
        if !self.expire_silent_keys {
            return Vec::new();
        }
        let mut released = Vec::new();
        self.held.retain(|&key, &mut last| {
            if frame.saturating_sub(last) > HOLD_WINDOW_FRAMES {
                released.push(InputEvent::up(key));
                false
            } else {
                true
            }
        });
        released
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }
}
