//! Input handling and player control.
//!
//! Keys are latched while held: a movement key acts once per press and must
//! be released before it acts again.

use std::collections::HashSet;

use crate::room::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    /// Toggle pause
    P,
    /// Reset the scene
    R,
}

impl Key {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Key::W),
            'a' => Some(Key::A),
            's' => Some(Key::S),
            'd' => Some(Key::D),
            'p' => Some(Key::P),
            'r' => Some(Key::R),
            _ => None,
        }
    }

    pub fn movement(self) -> Option<Direction> {
        match self {
            Key::W => Some(Direction::Up),
            Key::A => Some(Direction::Left),
            Key::S => Some(Direction::Down),
            Key::D => Some(Direction::Right),
            Key::P | Key::R => None,
        }
    }
}

/// What a key press asks the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Move(Direction),
    TogglePause,
    Reset,
}

/// Input state tracking
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a key-down into a command. Held movement keys yield nothing.
    pub fn press(&mut self, key: Key) -> Option<InputCommand> {
        match key {
            Key::P => Some(InputCommand::TogglePause),
            Key::R => Some(InputCommand::Reset),
            _ => {
                if !self.held.insert(key) {
                    return None;
                }
                key.movement().map(InputCommand::Move)
            }
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Parse a scripted key sequence such as `"ddds p r"`. Unknown characters are skipped.
pub fn parse_script(script: &str) -> Vec<Key> {
    script.chars().filter_map(Key::from_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_key_latches_until_release() {
        let mut input = InputState::new();
        assert_eq!(input.press(Key::D), Some(InputCommand::Move(Direction::Right)));
        assert_eq!(input.press(Key::D), None);
        assert!(input.is_held(Key::D));

        input.release(Key::D);
        assert_eq!(input.press(Key::D), Some(InputCommand::Move(Direction::Right)));
    }

    #[test]
    fn test_latches_are_per_key() {
        let mut input = InputState::new();
        assert!(input.press(Key::W).is_some());
        assert_eq!(input.press(Key::A), Some(InputCommand::Move(Direction::Left)));
    }

    #[test]
    fn test_pause_and_reset_do_not_latch() {
        let mut input = InputState::new();
        assert_eq!(input.press(Key::P), Some(InputCommand::TogglePause));
        assert_eq!(input.press(Key::P), Some(InputCommand::TogglePause));
        assert_eq!(input.press(Key::R), Some(InputCommand::Reset));
    }

    #[test]
    fn test_parse_script_skips_unknown() {
        assert_eq!(parse_script("Wx d-p"), vec![Key::W, Key::D, Key::P]);
        assert!(parse_script("").is_empty());
    }
}
