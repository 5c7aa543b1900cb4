//! Per-agent game logic: decoding raw actions into intents, assisted
//! navigation, and the contact rules that move targets around.
//!
//! The controller never touches its own body during the decision phase;
//! it reads agent and world state and hands the driver an intent. The
//! contact and laser handlers run later, in the driver's mutation phase,
//! and are the only controller code that writes to the world.

use crate::action::{ActionVector, ControlIntent, DriveDirection, MovementIntent, TurnDirection};
use crate::agent::AgentState;
use crate::config::{ArenaConfig, RewardConfig};
use crate::observation::ObservationBuilder;
use crate::reward::RewardEvent;
use crate::target::TargetHold;
use crate::types::{signed_yaw_delta, Team, Vec3};
use crate::world::World;

/// Targets past this distance are invisible to the seek selector.
pub const SEEK_RANGE: f64 = 200.0;

/// Heading error, in degrees, inside which assisted navigation drives
/// straight instead of turning.
pub const NAV_DEADBAND_DEG: f64 = 5.0;

/// A physical collision observed by the driver, from one agent's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Touched the target at this world index.
    Target { index: usize },
    /// Ran into an arena wall.
    Wall,
}

/// A trigger-zone overlap observed by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Entered the base belonging to `team`.
    HomeBase { team: Team },
}

/// Decision-and-reward logic for one agent.
#[derive(Debug)]
pub struct AgentController {
    index: usize,
    observer: ObservationBuilder,
    pending_reward: f64,
    episode_reward: f64,
}

impl AgentController {
    pub fn new(index: usize, target_count: usize) -> Self {
        Self {
            index,
            observer: ObservationBuilder::new(target_count),
            pending_reward: 0.0,
            episode_reward: 0.0,
        }
    }

    /// Roster index of the agent this controller drives.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Length of the observation vector this controller produces.
    pub fn observation_dim(&self) -> usize {
        self.observer.dim()
    }

    /// Turns a raw action vector into a control intent.
    ///
    /// The two seek selectors override manual control, base-seeking
    /// strongest; under manual control a turn request wins over a drive
    /// request, so at most one movement channel is ever live. A seek
    /// selector with nowhere to go holds still rather than falling back
    /// to the manual axes. Firing is independent of movement but gated
    /// off while frozen.
    pub fn decode_action(
        &self,
        action: &ActionVector,
        agent: &AgentState,
        world: &World,
    ) -> ControlIntent {
        let movement = if action.wants_seek_base() {
            self.auto_navigate(agent, &world.base_position(agent.team))
        } else if action.wants_seek_target() {
            match self.nearest_eligible_target(agent, world) {
                Some(i) => self.auto_navigate(agent, &world.targets[i].position),
                None => MovementIntent::Hold,
            }
        } else if let Some(turn) = action.turn() {
            MovementIntent::Turn(turn)
        } else if let Some(drive) = action.drive() {
            MovementIntent::Drive(drive)
        } else {
            MovementIntent::Hold
        };

        ControlIntent {
            movement,
            shoot: action.wants_shoot() && !agent.phase.is_frozen(),
        }
    }

    /// Index of the closest target this agent may take, if any is in
    /// seek range. Ties keep the earliest world index.
    pub fn nearest_eligible_target(&self, agent: &AgentState, world: &World) -> Option<usize> {
        let mut best = None;
        let mut best_distance = SEEK_RANGE;
        for (i, target) in world.targets.iter().enumerate() {
            if !target.eligible_for(agent.team) {
                continue;
            }
            let distance = agent.position.planar_distance_to(&target.position);
            if distance < best_distance {
                best = Some(i);
                best_distance = distance;
            }
        }
        best
    }

    /// Bang-bang steering towards a point: turn until the heading error
    /// is inside the dead band, then drive straight.
    pub fn auto_navigate(&self, agent: &AgentState, destination: &Vec3) -> MovementIntent {
        let delta = signed_yaw_delta(agent.yaw, &agent.position, destination);
        if delta.abs() <= NAV_DEADBAND_DEG {
            MovementIntent::Drive(DriveDirection::Forward)
        } else if delta > 0.0 {
            MovementIntent::Turn(TurnDirection::Right)
        } else {
            MovementIntent::Turn(TurnDirection::Left)
        }
    }

    /// Observation vector for this agent against the current world.
    pub fn collect_observations(&self, agent: &AgentState, world: &World) -> Vec<f64> {
        self.observer.build(agent, world)
    }

    /// Handles a collision edge. Returns the reward event it produced,
    /// which is also accrued internally.
    ///
    /// A wall hit always costs, frozen or not. A target contact only
    /// does something while active and while the target is takeable;
    /// either way the edge is spent.
    pub fn on_contact(
        &mut self,
        contact: Contact,
        agent: &AgentState,
        world: &mut World,
        rewards: &RewardConfig,
    ) -> Option<RewardEvent> {
        match contact {
            Contact::Wall => Some(self.accrue(RewardEvent::WallContact, rewards)),
            Contact::Target { index } => {
                if agent.phase.is_frozen() {
                    return None;
                }
                let target = world.targets.get_mut(index)?;
                if !target.eligible_for(agent.team) {
                    return None;
                }
                target.hold = TargetHold::Carried(self.index);
                target.position = agent.position;
                Some(self.accrue(RewardEvent::PickedUpTarget, rewards))
            }
        }
    }

    /// Handles a trigger overlap edge. Entering the home base banks the
    /// whole carried load in one deposit; the enemy base is inert.
    pub fn on_overlap(
        &mut self,
        overlap: Overlap,
        agent: &AgentState,
        world: &mut World,
        rewards: &RewardConfig,
    ) -> Option<RewardEvent> {
        let Overlap::HomeBase { team } = overlap;
        if team != agent.team || agent.phase.is_frozen() {
            return None;
        }
        let base_position = world.base_position(team);
        let mut count = 0u32;
        for target in &mut world.targets {
            if target.carrier() == Some(self.index) {
                target.hold = TargetHold::Banked(team);
                target.position = base_position;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        Some(self.accrue(RewardEvent::Deposited { count }, rewards))
    }

    /// The agent was tagged by an enemy laser: freeze it and spill its
    /// whole load where it stands.
    pub fn on_tagged(
        &mut self,
        agent: &mut AgentState,
        world: &mut World,
        config: &ArenaConfig,
    ) -> Vec<RewardEvent> {
        agent.freeze(config.freeze_ticks());

        let mut dropped = 0u32;
        for target in &mut world.targets {
            if target.carrier() == Some(self.index) {
                target.hold = TargetHold::Free;
                target.position = agent.position;
                dropped += 1;
            }
        }

        let mut events = vec![self.accrue(RewardEvent::Frozen, &config.rewards)];
        match dropped {
            0 => {}
            1 => events.push(self.accrue(RewardEvent::DroppedOneTarget, &config.rewards)),
            _ => events.push(self.accrue(RewardEvent::DroppedTargets, &config.rewards)),
        }
        events
    }

    /// The agent's laser tagged an enemy.
    pub fn on_tagged_enemy(&mut self, rewards: &RewardConfig) -> RewardEvent {
        self.accrue(RewardEvent::HitEnemy, rewards)
    }

    /// The agent fired its laser this tick.
    pub fn on_fired(&mut self, rewards: &RewardConfig) -> RewardEvent {
        self.accrue(RewardEvent::ShootingLaser, rewards)
    }

    /// Per-tick existence cost.
    pub fn accrue_step_penalty(&mut self, rewards: &RewardConfig) {
        self.accrue(RewardEvent::StepPenalty, rewards);
    }

    fn accrue(&mut self, event: RewardEvent, rewards: &RewardConfig) -> RewardEvent {
        let value = event.value_in(rewards);
        self.pending_reward += value;
        self.episode_reward += value;
        event
    }

    /// Drains the reward accrued since the last call.
    pub fn take_reward(&mut self) -> f64 {
        std::mem::take(&mut self.pending_reward)
    }

    /// Total reward accrued this episode.
    pub fn episode_reward(&self) -> f64 {
        self.episode_reward
    }

    /// Clears accrued reward for a new episode.
    pub fn reset(&mut self) {
        self.pending_reward = 0.0;
        self.episode_reward = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (ArenaConfig, World, AgentState, AgentController) {
        let config = ArenaConfig {
            target_positions: vec![Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -10.0)],
            ..ArenaConfig::default()
        };
        let world = World::from_config(&config);
        let agent = AgentState::new("a0".into(), Team::Red, Vec3::zero(), 0.0);
        let controller = AgentController::new(0, world.targets.len());
        (config, world, agent, controller)
    }

    #[test]
    fn zero_action_decodes_to_idle() {
        let (_, world, agent, controller) = fixture();
        let intent = controller.decode_action(&ActionVector::idle(), &agent, &world);
        assert_eq!(intent, ControlIntent::idle());
    }

    #[test]
    fn manual_turn_beats_manual_drive() {
        let (_, world, agent, controller) = fixture();
        let action = ActionVector::from_array([1, 2, 0, 0, 0]);
        let intent = controller.decode_action(&action, &agent, &world);
        assert_eq!(intent.movement, MovementIntent::Turn(TurnDirection::Left));
    }

    #[test]
    fn seek_target_overrides_manual_axes() {
        let (_, world, agent, controller) = fixture();
        // facing +Z with the nearest target dead ahead at (0,0,10)
        let action = ActionVector::from_array([2, 1, 0, 1, 0]);
        let intent = controller.decode_action(&action, &agent, &world);
        assert_eq!(intent.movement, MovementIntent::Drive(DriveDirection::Forward));
    }

    #[test]
    fn seek_base_overrides_seek_target() {
        let (config, world, agent, controller) = fixture();
        // red base is at (-16,0,0), west of an agent facing +Z: turn left
        assert_eq!(config.base_position(Team::Red), Vec3::new(-16.0, 0.0, 0.0));
        let action = ActionVector::from_array([0, 0, 0, 1, 1]);
        let intent = controller.decode_action(&action, &agent, &world);
        assert_eq!(intent.movement, MovementIntent::Turn(TurnDirection::Left));
    }

    #[test]
    fn seek_with_no_candidate_holds_still() {
        let (_, mut world, agent, controller) = fixture();
        for target in &mut world.targets {
            target.hold = TargetHold::Carried(1);
        }
        let action = ActionVector::from_array([1, 0, 0, 1, 0]);
        let intent = controller.decode_action(&action, &agent, &world);
        assert_eq!(intent.movement, MovementIntent::Hold);
    }

    #[test]
    fn frozen_agent_cannot_fire() {
        let (_, world, mut agent, controller) = fixture();
        let action = ActionVector::from_array([0, 0, 1, 0, 0]);
        assert!(controller.decode_action(&action, &agent, &world).shoot);
        agent.freeze(10);
        assert!(!controller.decode_action(&action, &agent, &world).shoot);
    }

    #[test]
    fn nearest_target_is_deterministic_and_capped() {
        let (_, mut world, agent, controller) = fixture();
        assert_eq!(controller.nearest_eligible_target(&agent, &world), Some(0));
        // same distances swap roles once index 0 is held by an ally
        world.targets[0].hold = TargetHold::Carried(1);
        assert_eq!(controller.nearest_eligible_target(&agent, &world), Some(1));
        // a target at exactly seek range is out of reach
        world.targets[0].hold = TargetHold::Free;
        world.targets[0].position = Vec3::new(0.0, 0.0, SEEK_RANGE);
        world.targets[1].hold = TargetHold::Carried(1);
        assert_eq!(controller.nearest_eligible_target(&agent, &world), None);
    }

    #[test]
    fn nearest_tie_keeps_the_earliest_index() {
        let (_, mut world, agent, controller) = fixture();
        world.targets[0].position = Vec3::new(7.0, 0.0, 0.0);
        world.targets[1].position = Vec3::new(-7.0, 0.0, 0.0);
        assert_eq!(controller.nearest_eligible_target(&agent, &world), Some(0));
    }

    #[test]
    fn banked_enemy_targets_can_be_sought() {
        let (_, mut world, agent, controller) = fixture();
        world.targets[0].hold = TargetHold::Banked(Team::Blue);
        world.targets[1].hold = TargetHold::Banked(Team::Red);
        assert_eq!(controller.nearest_eligible_target(&agent, &world), Some(0));
    }

    #[test]
    fn navigation_dead_band_boundary() {
        let (_, _, mut agent, controller) = fixture();
        // dead ahead has bearing exactly 0, so the heading error is the yaw
        let dest = Vec3::new(0.0, 0.0, 10.0);
        for yaw in [0.0, -5.0, 5.0] {
            agent.yaw = yaw;
            assert_eq!(
                controller.auto_navigate(&agent, &dest),
                MovementIntent::Drive(DriveDirection::Forward),
                "yaw {yaw}"
            );
        }
        agent.yaw = -5.001; // destination 5.001 degrees to the right
        assert_eq!(
            controller.auto_navigate(&agent, &dest),
            MovementIntent::Turn(TurnDirection::Right)
        );
        agent.yaw = 5.001;
        assert_eq!(
            controller.auto_navigate(&agent, &dest),
            MovementIntent::Turn(TurnDirection::Left)
        );
    }

    #[test]
    fn pickup_takes_the_target_and_pays_once() {
        let (config, mut world, agent, mut controller) = fixture();
        let event = controller.on_contact(
            Contact::Target { index: 0 },
            &agent,
            &mut world,
            &config.rewards,
        );
        assert_eq!(event, Some(RewardEvent::PickedUpTarget));
        assert_eq!(world.targets[0].hold, TargetHold::Carried(0));
        assert!((controller.take_reward() - 0.5).abs() < 1e-10);

        // a second contact with the now-carried target does nothing
        let event = controller.on_contact(
            Contact::Target { index: 0 },
            &agent,
            &mut world,
            &config.rewards,
        );
        assert_eq!(event, None);
        assert!(controller.take_reward().abs() < 1e-10);
    }

    #[test]
    fn frozen_agent_cannot_pick_up_but_still_pays_for_walls() {
        let (config, mut world, mut agent, mut controller) = fixture();
        agent.freeze(10);
        let event = controller.on_contact(
            Contact::Target { index: 0 },
            &agent,
            &mut world,
            &config.rewards,
        );
        assert_eq!(event, None);
        assert_eq!(world.targets[0].hold, TargetHold::Free);

        let event = controller.on_contact(Contact::Wall, &agent, &mut world, &config.rewards);
        assert_eq!(event, Some(RewardEvent::WallContact));
        assert!((controller.take_reward() + 0.1).abs() < 1e-10);
    }

    #[test]
    fn stealing_rebinds_a_banked_target() {
        let (config, mut world, agent, mut controller) = fixture();
        world.targets[1].hold = TargetHold::Banked(Team::Blue);
        let event = controller.on_contact(
            Contact::Target { index: 1 },
            &agent,
            &mut world,
            &config.rewards,
        );
        assert_eq!(event, Some(RewardEvent::PickedUpTarget));
        assert_eq!(world.targets[1].hold, TargetHold::Carried(0));
    }

    #[test]
    fn contact_with_an_unknown_index_is_ignored() {
        let (config, mut world, agent, mut controller) = fixture();
        let event = controller.on_contact(
            Contact::Target { index: 99 },
            &agent,
            &mut world,
            &config.rewards,
        );
        assert_eq!(event, None);
        assert!(controller.take_reward().abs() < 1e-10);
    }

    #[test]
    fn deposit_banks_the_whole_load() {
        let (config, mut world, agent, mut controller) = fixture();
        world.targets[0].hold = TargetHold::Carried(0);
        world.targets[1].hold = TargetHold::Carried(0);
        let event = controller.on_overlap(
            Overlap::HomeBase { team: Team::Red },
            &agent,
            &mut world,
            &config.rewards,
        );
        assert_eq!(event, Some(RewardEvent::Deposited { count: 2 }));
        assert_eq!(world.targets[0].hold, TargetHold::Banked(Team::Red));
        assert_eq!(world.targets[1].hold, TargetHold::Banked(Team::Red));
        assert_eq!(world.targets[0].position, world.base_position(Team::Red));
        assert!((controller.take_reward() - 0.2).abs() < 1e-10);
    }

    #[test]
    fn enemy_base_and_empty_hands_are_inert() {
        let (config, mut world, agent, mut controller) = fixture();
        world.targets[0].hold = TargetHold::Carried(0);
        let event = controller.on_overlap(
            Overlap::HomeBase { team: Team::Blue },
            &agent,
            &mut world,
            &config.rewards,
        );
        assert_eq!(event, None);
        assert_eq!(world.targets[0].hold, TargetHold::Carried(0));

        world.targets[0].hold = TargetHold::Free;
        let event = controller.on_overlap(
            Overlap::HomeBase { team: Team::Red },
            &agent,
            &mut world,
            &config.rewards,
        );
        assert_eq!(event, None);
    }

    #[test]
    fn tagging_freezes_and_spills_the_load() {
        let (config, mut world, mut agent, mut controller) = fixture();
        agent.position = Vec3::new(3.0, 0.0, 4.0);
        world.targets[0].hold = TargetHold::Carried(0);
        world.targets[1].hold = TargetHold::Carried(0);

        let events = controller.on_tagged(&mut agent, &mut world, &config);
        assert_eq!(events, vec![RewardEvent::Frozen, RewardEvent::DroppedTargets]);
        assert!(agent.phase.is_frozen());
        assert_eq!(world.targets[0].hold, TargetHold::Free);
        assert_eq!(world.targets[0].position, agent.position);
    }

    #[test]
    fn tagging_with_one_target_uses_the_single_drop_event() {
        let (config, mut world, mut agent, mut controller) = fixture();
        world.targets[0].hold = TargetHold::Carried(0);
        let events = controller.on_tagged(&mut agent, &mut world, &config);
        assert_eq!(events, vec![RewardEvent::Frozen, RewardEvent::DroppedOneTarget]);
    }

    #[test]
    fn tagging_empty_handed_only_freezes() {
        let (config, mut world, mut agent, mut controller) = fixture();
        let events = controller.on_tagged(&mut agent, &mut world, &config);
        assert_eq!(events, vec![RewardEvent::Frozen]);
    }

    #[test]
    fn rewards_accumulate_and_drain() {
        let (config, mut world, agent, mut controller) = fixture();
        controller.accrue_step_penalty(&config.rewards);
        controller.on_contact(
            Contact::Target { index: 0 },
            &agent,
            &mut world,
            &config.rewards,
        );
        let step = controller.take_reward();
        assert!((step - (0.5 - 0.0005)).abs() < 1e-10);
        assert!(controller.take_reward().abs() < 1e-10);
        assert!((controller.episode_reward() - step).abs() < 1e-10);
        controller.reset();
        assert!(controller.episode_reward().abs() < 1e-10);
    }
}
