//! Manual-override policy driven by key state.
//!
//! Mirrors the classic hand-test setup: arrows drive and steer, space
//! fires, and two letter keys engage the seek selectors. The host UI
//! feeds key transitions in; this policy only composes them into an
//! action each tick.

use std::collections::HashSet;

use super::trait_::Policy;
use crate::action::ActionVector;

/// The keys the manual policy understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    A,
    S,
}

/// Composes the currently held keys into an action vector.
///
/// Every agent the policy is asked about gets the same action, so attach
/// it to a single agent for manual play. When opposing keys are held at
/// once the reverse key wins, as does steering left.
#[derive(Debug, Default)]
pub struct KeyboardPolicy {
    pressed: HashSet<Key>,
}

impl KeyboardPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn compose(&self) -> ActionVector {
        let mut out = [0u32; 5];
        if self.is_pressed(Key::Up) {
            out[0] = 1;
        }
        if self.is_pressed(Key::Down) {
            out[0] = 2;
        }
        if self.is_pressed(Key::Right) {
            out[1] = 1;
        }
        if self.is_pressed(Key::Left) {
            out[1] = 2;
        }
        if self.is_pressed(Key::Space) {
            out[2] = 1;
        }
        if self.is_pressed(Key::A) {
            out[3] = 1;
        }
        if self.is_pressed(Key::S) {
            out[4] = 1;
        }
        ActionVector::from_array(out)
    }
}

impl Policy for KeyboardPolicy {
    fn select_actions(&mut self, observations: &[Vec<f64>]) -> Vec<ActionVector> {
        vec![self.compose(); observations.len()]
    }

    fn name(&self) -> &str {
        "keyboard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{DriveDirection, TurnDirection};

    #[test]
    fn no_keys_means_idle() {
        let mut policy = KeyboardPolicy::new();
        let actions = policy.select_actions(&[vec![0.0; 21]]);
        assert_eq!(actions[0], ActionVector::idle());
    }

    #[test]
    fn bindings_reach_the_right_branches() {
        let mut policy = KeyboardPolicy::new();
        policy.press(Key::Up);
        policy.press(Key::Space);
        policy.press(Key::A);
        let action = policy.select_actions(&[vec![0.0; 21]])[0];
        assert_eq!(action.drive(), Some(DriveDirection::Forward));
        assert!(action.wants_shoot());
        assert!(action.wants_seek_target());
        assert!(!action.wants_seek_base());

        policy.release_all();
        policy.press(Key::Right);
        policy.press(Key::S);
        let action = policy.select_actions(&[vec![0.0; 21]])[0];
        assert_eq!(action.turn(), Some(TurnDirection::Right));
        assert!(action.wants_seek_base());
    }

    #[test]
    fn opposing_keys_resolve_consistently() {
        let mut policy = KeyboardPolicy::new();
        policy.press(Key::Up);
        policy.press(Key::Down);
        policy.press(Key::Right);
        policy.press(Key::Left);
        let action = policy.select_actions(&[vec![0.0; 21]])[0];
        assert_eq!(action.drive(), Some(DriveDirection::Backward));
        assert_eq!(action.turn(), Some(TurnDirection::Left));
    }

    #[test]
    fn release_undoes_press() {
        let mut policy = KeyboardPolicy::new();
        policy.press(Key::Space);
        policy.release(Key::Space);
        assert!(!policy.select_actions(&[vec![0.0; 21]])[0].wants_shoot());
    }

    #[test]
    fn every_agent_gets_the_same_action() {
        let mut policy = KeyboardPolicy::new();
        policy.press(Key::Up);
        let actions = policy.select_actions(&[vec![0.0; 21], vec![0.0; 21]]);
        assert_eq!(actions[0], actions[1]);
    }
}
