//! Shared arena state: targets, team bases, and the episode clock.
//!
//! The driver mutates the world between decision phases; controllers only
//! ever read it through an immutable snapshot, so every agent's decision in
//! a tick observes the same state.

use rand::Rng;

use crate::config::ArenaConfig;
use crate::target::{TargetHold, TargetState};
use crate::types::{Team, Vec3};
use crate::{generate_id, Id};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A team's home base: a circular trigger zone on the arena floor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Base {
    pub team: Team,
    pub position: Vec3,
    pub radius: f64,
}

/// Everything in the arena that is not an agent, plus the episode clock.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    /// All targets, in a fixed order that never changes within an episode.
    pub targets: Vec<TargetState>,
    /// Both home bases, indexed by [`Team::index`].
    pub bases: [Base; 2],
    /// Ticks left before the episode ends.
    pub ticks_remaining: u32,
    /// Tick length in seconds, for converting the clock to time.
    delta_t: f64,
}

impl World {
    /// Builds the world described by a configuration, with targets at their
    /// configured spawn positions.
    pub fn from_config(config: &ArenaConfig) -> Self {
        let targets = config
            .target_positions
            .iter()
            .map(|pos| TargetState::new(generate_id(), *pos))
            .collect();
        let bases = Team::all().map(|team| Base {
            team,
            position: config.base_position(team),
            radius: config.base_radius,
        });
        Self {
            targets,
            bases,
            ticks_remaining: config.episode_ticks(),
            delta_t: config.delta_t,
        }
    }

    /// Resets targets and clock for a new episode, keeping target ids.
    ///
    /// Spawn positions get a uniform per-axis jitter of up to
    /// `config.target_jitter` in the ground plane.
    pub fn reset<R: Rng>(&mut self, config: &ArenaConfig, rng: &mut R) {
        for (target, spawn) in self.targets.iter_mut().zip(&config.target_positions) {
            let mut pos = *spawn;
            if config.target_jitter > 0.0 {
                let j = config.target_jitter;
                pos.x += rng.gen_range(-j..=j);
                pos.z += rng.gen_range(-j..=j);
            }
            target.position = pos;
            target.hold = TargetHold::Free;
        }
        self.ticks_remaining = config.episode_ticks();
    }

    /// Home base of a team.
    pub fn base(&self, team: Team) -> &Base {
        &self.bases[team.index()]
    }

    /// Home base position of a team.
    pub fn base_position(&self, team: Team) -> Vec3 {
        self.bases[team.index()].position
    }

    /// Seconds left in the episode.
    pub fn time_remaining(&self) -> f64 {
        self.ticks_remaining as f64 * self.delta_t
    }

    /// Advances the episode clock by one tick.
    pub fn tick_clock(&mut self) {
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
    }

    /// Whether the episode clock has run out.
    pub fn expired(&self) -> bool {
        self.ticks_remaining == 0
    }

    /// Number of targets banked in a team's base (the team's score).
    pub fn banked_count(&self, team: Team) -> usize {
        self.targets
            .iter()
            .filter(|t| t.banked_team() == Some(team))
            .count()
    }

    /// Number of targets carried by the agent at a roster index.
    pub fn carried_count(&self, agent: usize) -> u32 {
        self.targets
            .iter()
            .filter(|t| t.carrier() == Some(agent))
            .count() as u32
    }

    /// Ids of all targets, in world order. Mostly useful for reports.
    pub fn target_ids(&self) -> Vec<&Id> {
        self.targets.iter().map(|t| &t.id).collect()
    }
}
