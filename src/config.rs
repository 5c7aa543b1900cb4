//! Configuration for the arena and its reward shaping.

use thiserror::Error;

use crate::types::{Team, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reward magnitudes for every event the core can emit.
///
/// This replaces the original's string-keyed reward dictionary with an
/// explicit struct: one field per event, fixed at construction, looked up
/// through [`RewardEvent::value_in`](crate::reward::RewardEvent::value_in).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewardConfig {
    /// Accrued by an agent when an enemy laser freezes it.
    pub frozen: f64,
    /// Accrued by an agent for each tick its laser is firing.
    pub shooting_laser: f64,
    /// Accrued by the shooter when its laser hits an enemy.
    pub hit_enemy: f64,
    /// Accrued by a frozen agent that dropped exactly one carried target.
    pub dropped_one_target: f64,
    /// Accrued by a frozen agent that dropped two or more carried targets.
    pub dropped_targets: f64,
    /// Accrued on picking up an eligible target.
    pub picked_up_target: f64,
    /// Accrued on touching a wall, regardless of any other state.
    pub wall_contact: f64,
    /// Accrued per carried target when depositing at the home base.
    pub capture_per_target: f64,
    /// Accrued once per tick per agent (existence cost).
    pub step_penalty: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            frozen: -0.1,
            shooting_laser: 0.0,
            hit_enemy: 0.5,
            dropped_one_target: 0.0,
            dropped_targets: 0.0,
            picked_up_target: 0.5,
            wall_contact: -0.1,
            capture_per_target: 0.1,
            step_penalty: -0.0005,
        }
    }
}

/// Configuration for the arena environment.
///
/// Controls arena geometry, agent dynamics, laser and freeze behavior,
/// target placement, and reward shaping. Constructed once per episode run
/// and shared immutably by the driver and every controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArenaConfig {
    // --- Arena geometry ---
    /// Half-extent of the arena along X; walls sit at ±half_width.
    pub half_width: f64,
    /// Half-extent of the arena along Z; walls sit at ±half_depth.
    pub half_depth: f64,
    /// Home base center per team, indexed by [`Team::index`].
    pub base_positions: [Vec3; 2],
    /// Radius of the base trigger zone.
    pub base_radius: f64,

    // --- Time ---
    /// Duration of one simulation tick, in seconds.
    pub delta_t: f64,
    /// Episode length, in seconds.
    pub episode_duration: f64,

    // --- Agent dynamics ---
    /// Velocity change applied per tick while driving.
    pub move_speed: f64,
    /// Turn rate in degrees per second.
    pub turn_speed: f64,
    /// Fraction of velocity shed each tick, in [0, 1).
    pub drag: f64,
    /// Body radius used for contact and laser hit tests.
    pub agent_radius: f64,

    // --- Laser and freezing ---
    /// Maximum reach of the laser beam.
    pub laser_range: f64,
    /// How long a hit agent stays frozen, in seconds.
    pub freeze_duration: f64,

    // --- Targets ---
    /// Spawn position of every target.
    pub target_positions: Vec<Vec3>,
    /// Contact radius of a target.
    pub target_radius: f64,
    /// Uniform per-axis jitter applied to target spawns on reset (0 = fixed).
    pub target_jitter: f64,

    // --- Rewards ---
    /// Reward magnitudes for every event.
    pub rewards: RewardConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_width: 20.0,
            half_depth: 20.0,
            base_positions: [Vec3::new(-16.0, 0.0, 0.0), Vec3::new(16.0, 0.0, 0.0)],
            base_radius: 3.0,
            delta_t: 0.02,
            episode_duration: 120.0,
            move_speed: 2.0,
            turn_speed: 180.0,
            drag: 0.2,
            agent_radius: 1.0,
            laser_range: 20.0,
            freeze_duration: 5.0,
            target_positions: vec![
                Vec3::new(0.0, 0.0, 8.0),
                Vec3::new(0.0, 0.0, -8.0),
                Vec3::new(4.0, 0.0, 0.0),
                Vec3::new(-4.0, 0.0, 0.0),
            ],
            target_radius: 0.5,
            target_jitter: 0.0,
            rewards: RewardConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Home base position for a team.
    pub fn base_position(&self, team: Team) -> Vec3 {
        self.base_positions[team.index()]
    }

    /// Number of ticks in one episode.
    pub fn episode_ticks(&self) -> u32 {
        (self.episode_duration / self.delta_t).round() as u32
    }

    /// Number of ticks an agent stays frozen after a hit.
    pub fn freeze_ticks(&self) -> u32 {
        (self.freeze_duration / self.delta_t).round() as u32
    }

    /// Checks the configuration for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delta_t <= 0.0 {
            return Err(ConfigError::NonPositive { field: "delta_t" });
        }
        if self.episode_duration <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "episode_duration",
            });
        }
        if self.half_width <= 0.0 {
            return Err(ConfigError::NonPositive { field: "half_width" });
        }
        if self.half_depth <= 0.0 {
            return Err(ConfigError::NonPositive { field: "half_depth" });
        }
        if self.agent_radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "agent_radius",
            });
        }
        if self.target_radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "target_radius",
            });
        }
        if self.base_radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "base_radius",
            });
        }
        if !(0.0..1.0).contains(&self.drag) {
            return Err(ConfigError::OutOfRange {
                field: "drag",
                min: 0.0,
                max: 1.0,
            });
        }
        if self.move_speed < 0.0 {
            return Err(ConfigError::Negative { field: "move_speed" });
        }
        if self.turn_speed < 0.0 {
            return Err(ConfigError::Negative { field: "turn_speed" });
        }
        if self.laser_range < 0.0 {
            return Err(ConfigError::Negative {
                field: "laser_range",
            });
        }
        if self.freeze_duration < 0.0 {
            return Err(ConfigError::Negative {
                field: "freeze_duration",
            });
        }
        if self.target_jitter < 0.0 {
            return Err(ConfigError::Negative {
                field: "target_jitter",
            });
        }
        Ok(())
    }
}

/// Errors raised by [`ArenaConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be > 0")]
    NonPositive { field: &'static str },

    #[error("{field} must be >= 0")]
    Negative { field: &'static str },

    #[error("{field} must lie in [{min}, {max})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ArenaConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.episode_ticks() > 0);
        assert!(cfg.freeze_ticks() > 0);
    }

    #[test]
    fn episode_ticks_from_duration() {
        let cfg = ArenaConfig {
            delta_t: 0.02,
            episode_duration: 120.0,
            ..ArenaConfig::default()
        };
        assert_eq!(cfg.episode_ticks(), 6000);
    }

    #[test]
    fn base_position_per_team() {
        let cfg = ArenaConfig::default();
        assert_eq!(cfg.base_position(Team::Red), cfg.base_positions[0]);
        assert_eq!(cfg.base_position(Team::Blue), cfg.base_positions[1]);
    }

    #[test]
    fn rejects_non_positive_tick() {
        let cfg = ArenaConfig {
            delta_t: 0.0,
            ..ArenaConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "delta_t" })
        );
    }

    #[test]
    fn rejects_out_of_range_drag() {
        let cfg = ArenaConfig {
            drag: 1.0,
            ..ArenaConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OutOfRange { field: "drag", .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_round_trips_through_json() {
        let cfg = ArenaConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ArenaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
