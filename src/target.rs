//! Targets: the objects agents pick up, carry, and bank at their base.

use crate::types::{Team, Vec3};
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Who, if anyone, holds a target.
///
/// A target is in exactly one of these states at any time: carried targets
/// are never simultaneously banked, and banking always clears the carrier.
/// Agent indices refer to the driver's fixed roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetHold {
    /// On the ground, up for grabs.
    #[default]
    Free,
    /// Carried by the agent at this roster index.
    Carried(usize),
    /// Resting in this team's base.
    Banked(Team),
}

/// A single target in the arena.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetState {
    /// Unique identifier.
    pub id: Id,
    /// Current position; tracks the carrier while carried.
    pub position: Vec3,
    /// Hold state.
    pub hold: TargetHold,
}

impl TargetState {
    /// Creates a free target at a position.
    pub fn new(id: Id, position: Vec3) -> Self {
        Self {
            id,
            position,
            hold: TargetHold::Free,
        }
    }

    /// Roster index of the carrying agent, if carried.
    pub fn carrier(&self) -> Option<usize> {
        match self.hold {
            TargetHold::Carried(agent) => Some(agent),
            _ => None,
        }
    }

    /// Team whose base holds this target, if banked.
    pub fn banked_team(&self) -> Option<Team> {
        match self.hold {
            TargetHold::Banked(team) => Some(team),
            _ => None,
        }
    }

    /// Whether an agent of `team` may pick this target up: not carried by
    /// anyone and not already banked in that team's own base. Targets banked
    /// in the enemy base remain eligible (stealing).
    pub fn eligible_for(&self, team: Team) -> bool {
        match self.hold {
            TargetHold::Free => true,
            TargetHold::Carried(_) => false,
            TargetHold::Banked(owner) => owner != team,
        }
    }

    /// Observation encoding of the carrier: `0` when free or banked,
    /// otherwise the carrier's 1-based roster index.
    pub fn carried_code(&self) -> f64 {
        match self.hold {
            TargetHold::Carried(agent) => (agent + 1) as f64,
            _ => 0.0,
        }
    }

    /// Observation encoding of the holding base: `0` when not banked,
    /// otherwise the team id (1 = red, 2 = blue).
    pub fn in_base_code(&self) -> f64 {
        match self.hold {
            TargetHold::Banked(team) => team.id() as f64,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_target() -> TargetState {
        TargetState::new("t0".into(), Vec3::new(1.0, 0.0, 2.0))
    }

    #[test]
    fn free_target_is_eligible_for_both_teams() {
        let t = free_target();
        assert!(t.eligible_for(Team::Red));
        assert!(t.eligible_for(Team::Blue));
    }

    #[test]
    fn carried_target_is_never_eligible() {
        let mut t = free_target();
        t.hold = TargetHold::Carried(0);
        assert!(!t.eligible_for(Team::Red));
        assert!(!t.eligible_for(Team::Blue));
    }

    #[test]
    fn banked_target_is_eligible_only_for_the_enemy() {
        let mut t = free_target();
        t.hold = TargetHold::Banked(Team::Red);
        assert!(!t.eligible_for(Team::Red));
        assert!(t.eligible_for(Team::Blue));
    }

    #[test]
    fn observation_codes() {
        let mut t = free_target();
        assert_eq!(t.carried_code(), 0.0);
        assert_eq!(t.in_base_code(), 0.0);

        t.hold = TargetHold::Carried(2);
        assert_eq!(t.carried_code(), 3.0); // 1-based
        assert_eq!(t.in_base_code(), 0.0);

        t.hold = TargetHold::Banked(Team::Blue);
        assert_eq!(t.carried_code(), 0.0);
        assert_eq!(t.in_base_code(), 2.0);
    }
}
