//! Fixed-layout observation vectors.
//!
//! Policies see the arena as a flat `Vec<f64>` whose layout depends only
//! on the target count, so two agents in the same arena always produce
//! vectors of the same length and meaning (each from its own point of
//! view).
//!
//! Layout, in order:
//! - local velocity (rightward, forward)
//! - seconds remaining in the episode
//! - yaw in degrees
//! - agent position `(x, y, z)`
//! - own base position `(x, y, z)`
//! - per target, in world order: position `(x, y, z)`, carrier code
//!   (1-based agent index, 0 when loose), bank code (team id, 0 when
//!   not banked)
//! - frozen flag (1.0 while frozen)

use crate::agent::AgentState;
use crate::world::World;

/// Features ahead of the target block.
pub const PREFIX_DIM: usize = 10;
/// Features per target.
pub const TARGET_FEATURE_DIM: usize = 5;
/// Trailing status features.
pub const STATUS_DIM: usize = 1;

/// Builds observation vectors for one fixed target count.
#[derive(Debug, Clone)]
pub struct ObservationBuilder {
    target_count: usize,
}

impl ObservationBuilder {
    pub fn new(target_count: usize) -> Self {
        Self { target_count }
    }

    /// Vector length this builder produces.
    pub fn dim(&self) -> usize {
        PREFIX_DIM + TARGET_FEATURE_DIM * self.target_count + STATUS_DIM
    }

    /// Assembles the observation for one agent.
    pub fn build(&self, agent: &AgentState, world: &World) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.dim());

        let (vel_right, vel_forward) = agent.local_velocity();
        out.push(vel_right);
        out.push(vel_forward);
        out.push(world.time_remaining());
        out.push(agent.yaw);
        out.push(agent.position.x);
        out.push(agent.position.y);
        out.push(agent.position.z);
        let base = world.base_position(agent.team);
        out.push(base.x);
        out.push(base.y);
        out.push(base.z);

        for target in &world.targets {
            out.push(target.position.x);
            out.push(target.position.y);
            out.push(target.position.z);
            out.push(target.carried_code());
            out.push(target.in_base_code());
        }

        out.push(agent.phase.frozen_flag());
        debug_assert_eq!(out.len(), self.dim());
        out
    }
}
