//! Evaluation metrics for the capture arena.
//!
//! Runs a policy for whole episodes and aggregates game outcomes, so
//! baselines and trained policies can be compared on the same footing.

use std::fmt;

use crate::environment::Arena;
use crate::policy::Policy;

/// Aggregated evaluation metrics over multiple episodes.
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    /// Mean number of deposits (targets banked) per episode.
    pub mean_captures: f64,
    /// Mean red score (targets banked red) at episode end.
    pub mean_red_banked: f64,
    /// Mean blue score at episode end.
    pub mean_blue_banked: f64,
    /// Mean frozen agent-ticks per episode (how long agents sat out).
    pub mean_frozen_ticks: f64,
    /// Mean per-agent episode reward, averaged over agents then episodes.
    pub mean_episode_reward: f64,
    /// Number of episodes evaluated.
    pub n_episodes: usize,
}

/// Tracks per-episode statistics during evaluation.
#[derive(Debug, Default)]
struct EpisodeStats {
    captures: u32,
    red_banked: usize,
    blue_banked: usize,
    frozen_ticks: u64,
    episode_reward: f64,
}

impl EvaluationMetrics {
    /// Evaluates a policy over multiple episodes and returns aggregated
    /// metrics. The policy drives every agent in the roster.
    ///
    /// # Arguments
    ///
    /// * `arena` - The arena to evaluate in
    /// * `policy` - The policy to evaluate
    /// * `n_episodes` - Number of episodes to run
    pub fn evaluate(arena: &mut Arena, policy: &mut dyn Policy, n_episodes: usize) -> Self {
        let mut all_stats = Vec::with_capacity(n_episodes);

        for _ in 0..n_episodes {
            let mut obs = arena.reset();
            let mut stats = EpisodeStats::default();

            loop {
                let actions = policy.select_actions(&obs);
                let result = arena.step(actions);

                stats.captures += result.targets_captured as u32;
                stats.frozen_ticks += result.agents_frozen as u64;
                obs = result.observations;

                if result.done {
                    stats.red_banked = result.banked_counts[0];
                    stats.blue_banked = result.banked_counts[1];
                    let returns = arena.episode_rewards();
                    stats.episode_reward =
                        returns.iter().sum::<f64>() / returns.len().max(1) as f64;
                    break;
                }
            }

            all_stats.push(stats);
        }

        let n = all_stats.len() as f64;
        Self {
            mean_captures: all_stats.iter().map(|s| s.captures as f64).sum::<f64>() / n,
            mean_red_banked: all_stats.iter().map(|s| s.red_banked as f64).sum::<f64>() / n,
            mean_blue_banked: all_stats.iter().map(|s| s.blue_banked as f64).sum::<f64>() / n,
            mean_frozen_ticks: all_stats
                .iter()
                .map(|s| s.frozen_ticks as f64)
                .sum::<f64>()
                / n,
            mean_episode_reward: all_stats.iter().map(|s| s.episode_reward).sum::<f64>() / n,
            n_episodes,
        }
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({} episodes) ===",
            self.n_episodes
        )?;
        writeln!(f, "  Mean targets captured:   {:.1}", self.mean_captures)?;
        writeln!(f, "  Mean red banked:         {:.1}", self.mean_red_banked)?;
        writeln!(f, "  Mean blue banked:        {:.1}", self.mean_blue_banked)?;
        writeln!(f, "  Mean frozen agent-ticks: {:.1}", self.mean_frozen_ticks)?;
        writeln!(
            f,
            "  Mean episode reward:     {:.3}",
            self.mean_episode_reward
        )
    }
}
