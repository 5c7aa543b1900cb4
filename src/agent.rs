//! Per-agent kinematic state and the active/frozen phase machine.

use crate::action::MovementIntent;
use crate::config::ArenaConfig;
use crate::types::{wrap_deg, Team, Vec3};
use crate::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Slack used when testing whether an agent rests against a wall.
const WALL_EPS: f64 = 1e-9;

/// Whether an agent can act, or is thawing out after a laser hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AgentPhase {
    #[default]
    Active,
    Frozen {
        remaining_ticks: u32,
    },
}

impl AgentPhase {
    pub fn is_frozen(&self) -> bool {
        matches!(self, AgentPhase::Frozen { .. })
    }

    /// Observation encoding of the phase: 1.0 while frozen, else 0.0.
    pub fn frozen_flag(&self) -> f64 {
        if self.is_frozen() {
            1.0
        } else {
            0.0
        }
    }
}

/// One agent's body: pose, momentum, phase, and laser state.
///
/// The roster index that names this agent in actions and observations is
/// owned by the arena, not stored here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentState {
    pub id: Id,
    pub team: Team,
    pub position: Vec3,
    /// Heading in degrees. 0 faces +Z, positive turns toward +X.
    pub yaw: f64,
    pub velocity: Vec3,
    pub phase: AgentPhase,
    /// True for the whole tick in which the agent fires.
    pub laser_on: bool,
}

impl AgentState {
    pub fn new(id: Id, team: Team, position: Vec3, yaw: f64) -> Self {
        Self {
            id,
            team,
            position,
            yaw: wrap_deg(yaw),
            velocity: Vec3::zero(),
            phase: AgentPhase::Active,
            laser_on: false,
        }
    }

    /// Unit vector the agent is facing, in the ground plane.
    pub fn heading(&self) -> Vec3 {
        Vec3::from_yaw(self.yaw)
    }

    /// Velocity decomposed into the agent's own frame, as
    /// `(rightward, forward)` components.
    pub fn local_velocity(&self) -> (f64, f64) {
        let forward = self.heading();
        let right = Vec3::from_yaw(self.yaw + 90.0);
        (
            self.velocity.planar_dot(&right),
            self.velocity.planar_dot(&forward),
        )
    }

    /// Puts the agent into the frozen phase for a number of ticks.
    ///
    /// Momentum is kept; drag bleeds it off over the following ticks.
    pub fn freeze(&mut self, ticks: u32) {
        self.phase = AgentPhase::Frozen {
            remaining_ticks: ticks,
        };
    }

    /// Counts the frozen phase down by one tick.
    ///
    /// Runs at the end of every tick, including the one that froze the
    /// agent, and the phase stays frozen until the count has been seen at
    /// zero. Freezing for N ticks therefore blocks exactly the next N
    /// decisions.
    pub fn tick_phase(&mut self) {
        if let AgentPhase::Frozen { remaining_ticks } = self.phase {
            self.phase = if remaining_ticks == 0 {
                AgentPhase::Active
            } else {
                AgentPhase::Frozen {
                    remaining_ticks: remaining_ticks - 1,
                }
            };
        }
    }

    /// Runs one tick of movement and returns whether the agent ends the
    /// tick pressed against a wall.
    ///
    /// A frozen agent ignores the intent entirely; a firing agent still
    /// turns but gets no drive impulse. Drag and integration always run,
    /// so leftover momentum keeps carrying the body.
    pub fn apply_movement(&mut self, movement: MovementIntent, config: &ArenaConfig) -> bool {
        if !self.phase.is_frozen() {
            match movement {
                MovementIntent::Hold => {}
                MovementIntent::Turn(turn) => {
                    self.yaw =
                        wrap_deg(self.yaw + turn.sign() * config.turn_speed * config.delta_t);
                }
                MovementIntent::Drive(drive) => {
                    if !self.laser_on {
                        let heading = self.heading();
                        let impulse = drive.sign() * config.move_speed;
                        self.velocity.x += heading.x * impulse;
                        self.velocity.z += heading.z * impulse;
                    }
                }
            }
        }

        self.velocity.x *= 1.0 - config.drag;
        self.velocity.z *= 1.0 - config.drag;

        self.position.x += self.velocity.x * config.delta_t;
        self.position.z += self.velocity.z * config.delta_t;

        let limit_x = config.half_width - config.agent_radius;
        let limit_z = config.half_depth - config.agent_radius;
        if self.position.x.abs() > limit_x {
            self.position.x = limit_x.copysign(self.position.x);
            self.velocity.x = 0.0;
        }
        if self.position.z.abs() > limit_z {
            self.position.z = limit_z.copysign(self.position.z);
            self.velocity.z = 0.0;
        }

        self.position.x.abs() >= limit_x - WALL_EPS || self.position.z.abs() >= limit_z - WALL_EPS
    }
}
