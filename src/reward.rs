//! Reward events and their pricing.
//!
//! Everything an agent can be paid (or fined) for is a [`RewardEvent`];
//! the amounts live in [`RewardConfig`] so experiments can re-weight the
//! game without touching the rules.

use std::fmt;

use crate::config::RewardConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single scoring occurrence, credited to one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RewardEvent {
    /// The agent was tagged by an enemy laser and froze.
    Frozen,
    /// The agent fired its laser this tick, hit or not.
    ShootingLaser,
    /// The agent's laser tagged an enemy.
    HitEnemy,
    /// The agent was tagged while carrying exactly one target.
    DroppedOneTarget,
    /// The agent was tagged while carrying two or more targets.
    DroppedTargets,
    /// The agent picked up a free (or stealable) target.
    PickedUpTarget,
    /// The agent ran into an arena wall.
    WallContact,
    /// The agent entered its base carrying `count` targets, banking them.
    Deposited { count: u32 },
    /// Flat per-tick existence cost, nudging agents to finish early.
    StepPenalty,
}

impl RewardEvent {
    /// The signed reward this event is worth under a given pricing.
    pub fn value_in(&self, rewards: &RewardConfig) -> f64 {
        match self {
            RewardEvent::Frozen => rewards.frozen,
            RewardEvent::ShootingLaser => rewards.shooting_laser,
            RewardEvent::HitEnemy => rewards.hit_enemy,
            RewardEvent::DroppedOneTarget => rewards.dropped_one_target,
            RewardEvent::DroppedTargets => rewards.dropped_targets,
            RewardEvent::PickedUpTarget => rewards.picked_up_target,
            RewardEvent::WallContact => rewards.wall_contact,
            RewardEvent::Deposited { count } => rewards.capture_per_target * *count as f64,
            RewardEvent::StepPenalty => rewards.step_penalty,
        }
    }
}

impl fmt::Display for RewardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardEvent::Frozen => write!(f, "frozen"),
            RewardEvent::ShootingLaser => write!(f, "shooting-laser"),
            RewardEvent::HitEnemy => write!(f, "hit-enemy"),
            RewardEvent::DroppedOneTarget => write!(f, "dropped-one-target"),
            RewardEvent::DroppedTargets => write!(f, "dropped-targets"),
            RewardEvent::PickedUpTarget => write!(f, "picked-up-target"),
            RewardEvent::WallContact => write!(f, "wall-contact"),
            RewardEvent::Deposited { count } => write!(f, "deposited-{count}"),
            RewardEvent::StepPenalty => write!(f, "step-penalty"),
        }
    }
}
