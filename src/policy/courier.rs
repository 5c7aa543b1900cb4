//! Scripted courier baseline.
//!
//! Ferries targets home using the two seek selectors: grab the nearest
//! takeable target, carry it to base, repeat. Never fires. Meant as the
//! competitive baseline a learned policy has to beat.

use super::trait_::Policy;
use crate::action::ActionVector;
use crate::observation::{PREFIX_DIM, TARGET_FEATURE_DIM};
use crate::types::Team;

/// Per-agent courier logic, working purely from observation vectors.
///
/// The policy needs to know which team each roster slot plays for, so it
/// can tell a target banked at home (done, leave it) from one banked in
/// the enemy base (steal it back).
#[derive(Debug, Clone)]
pub struct CourierPolicy {
    roster: Vec<Team>,
}

impl CourierPolicy {
    /// Creates a courier for a fixed roster, one team per agent slot.
    pub fn new(roster: Vec<Team>) -> Self {
        Self { roster }
    }
}

impl Policy for CourierPolicy {
    fn select_actions(&mut self, observations: &[Vec<f64>]) -> Vec<ActionVector> {
        let mut actions = vec![ActionVector::idle(); observations.len()];

        for (i, obs) in observations.iter().enumerate() {
            if obs.len() <= PREFIX_DIM || i >= self.roster.len() {
                continue;
            }
            // frozen flag is the last feature
            if obs[obs.len() - 1] > 0.5 {
                continue;
            }

            let my_code = (i + 1) as f64;
            let my_team_id = self.roster[i].id() as f64;

            let mut carrying = false;
            let mut takeable = false;
            for target in obs[PREFIX_DIM..obs.len() - 1].chunks(TARGET_FEATURE_DIM) {
                if target.len() < TARGET_FEATURE_DIM {
                    break;
                }
                let carried = target[3];
                let banked = target[4];
                if (carried - my_code).abs() < 0.5 {
                    carrying = true;
                } else if carried < 0.5 && (banked - my_team_id).abs() > 0.5 {
                    takeable = true;
                }
            }

            if carrying {
                actions[i] = ActionVector::from_array([0, 0, 0, 0, 1]);
            } else if takeable {
                actions[i] = ActionVector::from_array([0, 0, 0, 1, 0]);
            }
        }

        actions
    }

    fn name(&self) -> &str {
        "courier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentState;
    use crate::config::ArenaConfig;
    use crate::observation::ObservationBuilder;
    use crate::target::TargetHold;
    use crate::types::Vec3;
    use crate::world::World;

    fn setup() -> (World, AgentState, ObservationBuilder) {
        let config = ArenaConfig::default();
        let world = World::from_config(&config);
        let agent = AgentState::new("a".into(), Team::Red, Vec3::zero(), 0.0);
        let builder = ObservationBuilder::new(world.targets.len());
        (world, agent, builder)
    }

    #[test]
    fn empty_handed_courier_seeks_a_target() {
        let (world, agent, builder) = setup();
        let mut policy = CourierPolicy::new(vec![Team::Red]);
        let actions = policy.select_actions(&[builder.build(&agent, &world)]);
        assert_eq!(actions[0].as_array(), [0, 0, 0, 1, 0]);
    }

    #[test]
    fn loaded_courier_heads_home() {
        let (mut world, agent, builder) = setup();
        world.targets[2].hold = TargetHold::Carried(0);
        let mut policy = CourierPolicy::new(vec![Team::Red]);
        let actions = policy.select_actions(&[builder.build(&agent, &world)]);
        assert_eq!(actions[0].as_array(), [0, 0, 0, 0, 1]);
    }

    #[test]
    fn courier_rests_once_everything_is_banked_home() {
        let (mut world, agent, builder) = setup();
        for target in &mut world.targets {
            target.hold = TargetHold::Banked(Team::Red);
        }
        let mut policy = CourierPolicy::new(vec![Team::Red]);
        let actions = policy.select_actions(&[builder.build(&agent, &world)]);
        assert_eq!(actions[0], ActionVector::idle());
    }

    #[test]
    fn enemy_banked_targets_are_worth_stealing() {
        let (mut world, agent, builder) = setup();
        for target in &mut world.targets {
            target.hold = TargetHold::Banked(Team::Blue);
        }
        let mut policy = CourierPolicy::new(vec![Team::Red]);
        let actions = policy.select_actions(&[builder.build(&agent, &world)]);
        assert_eq!(actions[0].as_array(), [0, 0, 0, 1, 0]);
    }

    #[test]
    fn frozen_courier_idles() {
        let (world, mut agent, builder) = setup();
        agent.freeze(10);
        let mut policy = CourierPolicy::new(vec![Team::Red]);
        let actions = policy.select_actions(&[builder.build(&agent, &world)]);
        assert_eq!(actions[0], ActionVector::idle());
    }

    #[test]
    fn slots_beyond_the_roster_idle() {
        let (world, agent, builder) = setup();
        let mut policy = CourierPolicy::new(vec![Team::Red]);
        let obs = builder.build(&agent, &world);
        let actions = policy.select_actions(&[obs.clone(), obs]);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1], ActionVector::idle());
    }
}
