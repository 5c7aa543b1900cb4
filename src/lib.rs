//! capture_arena - a two-team capture-the-target arena
//!
//! A deterministic, fixed-tick simulation of the classic freeze-tag
//! capture game: agents drive around a walled arena, pick up targets,
//! ferry them home to score, and tag enemies with lasers to freeze them
//! and spill their cargo. Policies observe fixed-layout feature vectors
//! and emit five-axis discrete actions, one decision per tick.

pub mod action;
pub mod agent;
pub mod config;
pub mod controller;
pub mod environment;
pub mod metrics;
pub mod observation;
pub mod policy;
pub mod reward;
pub mod target;
pub mod types;
pub mod world;

pub use action::{ActionVector, ControlIntent, MovementIntent};
pub use agent::{AgentPhase, AgentState};
pub use config::{ArenaConfig, ConfigError, RewardConfig};
pub use controller::{AgentController, Contact, Overlap};
pub use environment::{Arena, StepResult};
pub use metrics::EvaluationMetrics;
pub use observation::ObservationBuilder;
pub use policy::{CourierPolicy, KeyboardPolicy, Policy, RandomPolicy};
pub use reward::RewardEvent;
pub use target::{TargetHold, TargetState};
pub use types::{Team, Vec3};
pub use world::World;

/// Identifier type used for agents and targets.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
