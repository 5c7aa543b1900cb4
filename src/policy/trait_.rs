//! Policy trait for the arena.

use crate::action::ActionVector;

/// A policy that selects actions for agents based on observations.
///
/// Policies see nothing but the observation vectors; whoever drives the
/// arena decides which roster indices a policy controls.
pub trait Policy: Send + Sync {
    /// Selects one action per agent given their observations.
    ///
    /// # Arguments
    ///
    /// * `observations` - Per-agent observation vectors, in roster order
    ///   (from [`ObservationBuilder`](crate::observation::ObservationBuilder))
    ///
    /// # Returns
    ///
    /// A vector of actions, one per agent.
    fn select_actions(&mut self, observations: &[Vec<f64>]) -> Vec<ActionVector>;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
