//! Keyboard/touch intent mapping
//!
//! Hosts forward raw key names (DOM `KeyboardEvent.key` values) and touch
//! button state; the engine only ever sees a `PlayerInput` snapshot.

use crate::sim::PlayerInput;

/// Logical action a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::Left),
            "ArrowRight" | "d" | "D" => Some(Action::Right),
            "ArrowUp" | "w" | "W" | " " => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Held-key state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: PlayerInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is bound (so the host can suppress scrolling)
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    fn set(&mut self, key: &str, pressed: bool) -> bool {
        match Action::from_key(key) {
            Some(Action::Left) => self.held.left = pressed,
            Some(Action::Right) => self.held.right = pressed,
            Some(Action::Jump) => self.held.jump = pressed,
            None => return false,
        }
        true
    }

    pub fn snapshot(&self) -> PlayerInput {
        self.held
    }

    /// Keyboard OR touch
    pub fn merge(&self, touch: &PlayerInput) -> PlayerInput {
        PlayerInput {
            left: self.held.left || touch.left,
            right: self.held.right || touch.right,
            jump: self.held.jump || touch.jump,
        }
    }

    /// Release everything (focus loss)
    pub fn clear(&mut self) {
        self.held = PlayerInput::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowLeft"));
        assert!(input.key_down("W"));
        assert!(!input.key_down("Escape"));
        assert_eq!(
            input.snapshot(),
            PlayerInput {
                left: true,
                right: false,
                jump: true
            }
        );

        input.key_up("ArrowLeft");
        input.key_up("W");
        assert_eq!(input.snapshot(), PlayerInput::default());
    }

    #[test]
    fn test_aliases_share_state() {
        let mut input = InputState::new();
        input.key_down("d");
        input.key_up("ArrowRight");
        assert!(!input.snapshot().right);
        input.key_down(" ");
        assert!(input.snapshot().jump);
    }

    #[test]
    fn test_merge_with_touch() {
        let mut input = InputState::new();
        input.key_down("a");
        let touch = PlayerInput {
            left: false,
            right: false,
            jump: true,
        };
        let merged = input.merge(&touch);
        assert!(merged.left && merged.jump && !merged.right);

        input.clear();
        assert_eq!(input.merge(&PlayerInput::default()), PlayerInput::default());
    }
}
