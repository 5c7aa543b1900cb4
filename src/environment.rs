//! The capture arena driver.
//!
//! Runs the fixed-tick simulation loop: decide → move → lasers →
//! contacts → sync → timers → observe. Decisions all read the same
//! pre-tick snapshot; mutations happen afterwards in a fixed agent-index
//! order, so a step is deterministic for a given seed and action set.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::action::ActionVector;
use crate::agent::{AgentPhase, AgentState};
use crate::config::ArenaConfig;
use crate::controller::{AgentController, Contact, Overlap};
use crate::observation::ObservationBuilder;
use crate::reward::RewardEvent;
use crate::types::{Team, Vec3};
use crate::world::World;
use crate::{generate_id, Id};

/// Result of a single arena step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Per-agent observations after the step, in roster order.
    pub observations: Vec<Vec<f64>>,
    /// Per-agent reward earned during this step.
    pub rewards: Vec<f64>,
    /// Whether the episode is over (clock ran out).
    pub done: bool,
    /// Current tick.
    pub time_step: u32,
    /// Targets banked during this step, across both teams.
    pub targets_captured: usize,
    /// Agents frozen at the end of the step.
    pub agents_frozen: usize,
    /// Targets currently banked per team, indexed by [`Team::index`].
    pub banked_counts: [usize; 2],
}

/// The two-team capture arena.
///
/// # Lifecycle
///
/// 1. Call [`Arena::new`] with configuration and seed.
/// 2. Populate the roster with [`Arena::set_roster`] or
///    [`Arena::spawn_agent`].
/// 3. Call [`Arena::reset`] to start an episode.
/// 4. Repeatedly call [`Arena::step`] with one action per agent until
///    `done`.
/// 5. Inspect [`StepResult`] for rewards, observations, and scores.
#[derive(Debug)]
pub struct Arena {
    /// Arena configuration.
    pub config: ArenaConfig,
    /// Agent bodies, in roster order.
    pub agents: Vec<AgentState>,
    /// Targets, bases, and the episode clock.
    pub world: World,
    /// Current tick.
    pub t: u32,
    controllers: Vec<AgentController>,
    rng: StdRng,
    seed: u64,
    /// Where each agent respawns on reset.
    spawn_poses: Vec<(Vec3, f64)>,
    // contact latches for edge-triggered handlers
    target_touch: Vec<Vec<bool>>,
    wall_touch: Vec<bool>,
    base_inside: Vec<[bool; 2]>,
}

impl Arena {
    /// Creates a new arena with the given configuration and RNG seed.
    ///
    /// # Arguments
    ///
    /// * `config` - Arena geometry, physics, and reward configuration
    /// * `seed` - Random seed for reproducible episodes
    pub fn new(config: ArenaConfig, seed: u64) -> Self {
        let world = World::from_config(&config);
        Self {
            config,
            agents: Vec::new(),
            world,
            t: 0,
            controllers: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
            spawn_poses: Vec::new(),
            target_touch: Vec::new(),
            wall_touch: Vec::new(),
            base_inside: Vec::new(),
        }
    }

    /// Adds one agent at an explicit spawn pose and returns its id.
    pub fn spawn_agent(&mut self, team: Team, position: Vec3, yaw: f64) -> Id {
        let id = generate_id();
        self.agents
            .push(AgentState::new(id.clone(), team, position, yaw));
        self.controllers.push(AgentController::new(
            self.agents.len() - 1,
            self.world.targets.len(),
        ));
        self.spawn_poses.push((position, yaw));
        self.target_touch
            .push(vec![false; self.world.targets.len()]);
        self.wall_touch.push(false);
        self.base_inside.push([false; 2]);
        id
    }

    /// Sets the roster for this arena.
    ///
    /// Agents spawn at the edge of their own base, facing the arena
    /// center, spread sideways so teammates do not stack.
    ///
    /// # Arguments
    ///
    /// * `composition` - Slice of `(count, Team)` pairs,
    ///   e.g. `&[(2, Team::Red), (2, Team::Blue)]`
    pub fn set_roster(&mut self, composition: &[(u32, Team)]) {
        self.agents.clear();
        self.controllers.clear();
        self.spawn_poses.clear();
        self.target_touch.clear();
        self.wall_touch.clear();
        self.base_inside.clear();

        for (count, team) in composition {
            for k in 0..*count {
                let base = self.config.base_position(*team);
                let center = Vec3::zero();
                let dist = base.planar_distance_to(&center);
                let (ux, uz) = if dist > 0.0 {
                    ((center.x - base.x) / dist, (center.z - base.z) / dist)
                } else {
                    (0.0, 1.0)
                };
                let standoff = self.config.base_radius + self.config.agent_radius;
                let mut position =
                    Vec3::new(base.x + ux * standoff, 0.0, base.z + uz * standoff);
                position.z += 2.0 * self.config.agent_radius * k as f64;
                let yaw = position.planar_bearing_to(&center);
                self.spawn_agent(*team, position, yaw);
            }
        }
    }

    /// Resets the arena for a new episode.
    ///
    /// Re-seeds the RNG (a different seed each episode), returns agents
    /// to their spawn poses, re-places targets, and returns the initial
    /// observations.
    pub fn reset(&mut self) -> Vec<Vec<f64>> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.seed += 1; // different seed each episode
        self.t = 0;

        self.world.reset(&self.config, &mut self.rng);
        for (agent, (position, yaw)) in self.agents.iter_mut().zip(&self.spawn_poses) {
            agent.position = *position;
            agent.yaw = *yaw;
            agent.velocity = Vec3::zero();
            agent.phase = AgentPhase::Active;
            agent.laser_on = false;
        }
        for controller in &mut self.controllers {
            controller.reset();
        }
        for row in &mut self.target_touch {
            row.fill(false);
        }
        self.wall_touch.fill(false);
        for row in &mut self.base_inside {
            *row = [false; 2];
        }

        self.observe_all()
    }

    /// Executes one arena tick.
    ///
    /// 1. Decision phase: every controller decodes its action against
    ///    the same pre-tick snapshot.
    /// 2. Movement: laser flags, impulses, turning, drag, integration,
    ///    wall clamping.
    /// 3. Laser resolution in agent-index order; an agent frozen by an
    ///    earlier shooter loses its own shot.
    /// 4. Contact-begin edges: walls, targets, base triggers.
    /// 5. Carried targets ride with their carriers.
    /// 6. Timers: per-tick cost, freeze countdown, episode clock.
    /// 7. Next observations and per-agent reward drain.
    ///
    /// # Arguments
    ///
    /// * `actions` - One action per agent, in roster order.
    pub fn step(&mut self, actions: Vec<ActionVector>) -> StepResult {
        assert_eq!(
            actions.len(),
            self.agents.len(),
            "Number of actions must match number of agents"
        );
        let n = self.agents.len();

        // 1. Decision phase
        let intents: Vec<_> = (0..n)
            .map(|i| self.controllers[i].decode_action(&actions[i], &self.agents[i], &self.world))
            .collect();

        // 2. Movement
        let mut wall_now = vec![false; n];
        for i in 0..n {
            self.agents[i].laser_on = intents[i].shoot;
            if intents[i].shoot {
                self.controllers[i].on_fired(&self.config.rewards);
            }
            wall_now[i] = self.agents[i].apply_movement(intents[i].movement, &self.config);
        }

        // 3. Laser resolution
        for s in 0..n {
            if !intents[s].shoot || self.agents[s].phase.is_frozen() {
                continue;
            }
            if let Some(v) = self.nearest_enemy_on_ray(s) {
                self.controllers[v].on_tagged(&mut self.agents[v], &mut self.world, &self.config);
                self.controllers[s].on_tagged_enemy(&self.config.rewards);
            }
        }

        // 4. Contact-begin edges
        let mut captured = 0usize;
        for i in 0..n {
            if wall_now[i] && !self.wall_touch[i] {
                self.controllers[i].on_contact(
                    Contact::Wall,
                    &self.agents[i],
                    &mut self.world,
                    &self.config.rewards,
                );
            }
            self.wall_touch[i] = wall_now[i];

            let touch_range = self.config.agent_radius + self.config.target_radius;
            for j in 0..self.world.targets.len() {
                let touching = self.agents[i]
                    .position
                    .planar_distance_to(&self.world.targets[j].position)
                    <= touch_range;
                if touching && !self.target_touch[i][j] {
                    self.controllers[i].on_contact(
                        Contact::Target { index: j },
                        &self.agents[i],
                        &mut self.world,
                        &self.config.rewards,
                    );
                }
                self.target_touch[i][j] = touching;
            }

            for team in Team::all() {
                let base_position = self.world.base_position(team);
                let inside = self.agents[i].position.planar_distance_to(&base_position)
                    <= self.config.base_radius + self.config.agent_radius;
                let k = team.index();
                if inside && !self.base_inside[i][k] {
                    if let Some(RewardEvent::Deposited { count }) = self.controllers[i].on_overlap(
                        Overlap::HomeBase { team },
                        &self.agents[i],
                        &mut self.world,
                        &self.config.rewards,
                    ) {
                        captured += count as usize;
                    }
                }
                self.base_inside[i][k] = inside;
            }
        }

        // 5. Carried targets ride with their carriers
        for target in &mut self.world.targets {
            if let Some(carrier) = target.carrier() {
                target.position = self.agents[carrier].position;
            }
        }

        // 6. Timers
        for i in 0..n {
            self.controllers[i].accrue_step_penalty(&self.config.rewards);
            self.agents[i].tick_phase();
        }
        self.world.tick_clock();
        self.t += 1;
        let done = self.world.expired();

        // 7. Observations and reward drain
        let observations = self.observe_all();
        let rewards = self
            .controllers
            .iter_mut()
            .map(|c| c.take_reward())
            .collect();

        StepResult {
            observations,
            rewards,
            done,
            time_step: self.t,
            targets_captured: captured,
            agents_frozen: self
                .agents
                .iter()
                .filter(|a| a.phase.is_frozen())
                .count(),
            banked_counts: [
                self.world.banked_count(Team::Red),
                self.world.banked_count(Team::Blue),
            ],
        }
    }

    /// The nearest active enemy whose body circle intersects the
    /// shooter's laser ray, if any.
    fn nearest_enemy_on_ray(&self, shooter: usize) -> Option<usize> {
        let origin = self.agents[shooter].position;
        let forward = self.agents[shooter].heading();
        let right = Vec3::from_yaw(self.agents[shooter].yaw + 90.0);
        let team = self.agents[shooter].team;

        let mut best: Option<(usize, f64)> = None;
        for (v, enemy) in self.agents.iter().enumerate() {
            if enemy.team == team || enemy.phase.is_frozen() {
                continue;
            }
            let to = Vec3::new(
                enemy.position.x - origin.x,
                0.0,
                enemy.position.z - origin.z,
            );
            let along = to.planar_dot(&forward);
            if along < 0.0 || along > self.config.laser_range {
                continue;
            }
            if to.planar_dot(&right).abs() > self.config.agent_radius {
                continue;
            }
            if best.map_or(true, |(_, d)| along < d) {
                best = Some((v, along));
            }
        }
        best.map(|(v, _)| v)
    }

    fn observe_all(&self) -> Vec<Vec<f64>> {
        self.controllers
            .iter()
            .zip(&self.agents)
            .map(|(c, a)| c.collect_observations(a, &self.world))
            .collect()
    }

    /// Returns the number of agents.
    pub fn n_agents(&self) -> usize {
        self.agents.len()
    }

    /// Team of each roster slot, in order.
    pub fn roster(&self) -> Vec<Team> {
        self.agents.iter().map(|a| a.team).collect()
    }

    /// Length of every observation vector this arena produces.
    pub fn observation_dim(&self) -> usize {
        ObservationBuilder::new(self.world.targets.len()).dim()
    }

    /// Cumulative per-agent reward for the current episode.
    pub fn episode_rewards(&self) -> Vec<f64> {
        self.controllers.iter().map(|c| c.episode_reward()).collect()
    }
}
