//! Random policy for testing and baselines.

use rand::Rng;

use super::trait_::Policy;
use crate::action::ActionVector;

/// Uniformly random action selection.
///
/// Each agent independently draws every action branch from its full
/// domain. Used for sanity checks and as a lower-bound baseline.
#[derive(Debug, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy.
    pub fn new() -> Self {
        Self
    }
}

impl Policy for RandomPolicy {
    fn select_actions(&mut self, observations: &[Vec<f64>]) -> Vec<ActionVector> {
        let mut rng = rand::thread_rng();
        (0..observations.len())
            .map(|_| {
                ActionVector::from_array([
                    rng.gen_range(0..3),
                    rng.gen_range(0..3),
                    rng.gen_range(0..2),
                    rng.gen_range(0..2),
                    rng.gen_range(0..2),
                ])
            })
            .collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_policy_returns_correct_count() {
        let mut policy = RandomPolicy::new();
        let obs = vec![vec![0.0; 21]; 4]; // 4 agents
        let actions = policy.select_actions(&obs);
        assert_eq!(actions.len(), 4);
    }

    #[test]
    fn random_policy_actions_in_domain() {
        let mut policy = RandomPolicy::new();
        let obs = vec![vec![0.0; 21]; 100];
        for action in policy.select_actions(&obs) {
            let [forward, rotate, shoot, seek_target, seek_base] = action.as_array();
            assert!(forward < 3);
            assert!(rotate < 3);
            assert!(shoot < 2);
            assert!(seek_target < 2);
            assert!(seek_base < 2);
        }
    }
}
