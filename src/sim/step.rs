//! Discrete simulation step
//!
//! One call advances the episode by exactly one tick. Every phase runs in a
//! fixed order so the outcome is a pure function of the state, the action
//! and the RNG.

use rand::Rng;

use super::state::{Action, EpisodeState, Geometry};
use crate::config::EnvConfig;

/// Reward magnitudes for each outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rewards {
    pub catch: f64,
    pub miss: f64,
    pub lose: f64,
}

impl From<&EnvConfig> for Rewards {
    fn from(config: &EnvConfig) -> Self {
        Self {
            catch: config.catch_reward,
            miss: config.miss_reward,
            lose: config.lose_reward,
        }
    }
}

/// The single outcome a step is scored by
///
/// Later phases override earlier ones: a catch overrides a miss in the same
/// step, and losing the last life overrides both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Nothing happened
    Idle,
    /// Paddle intercepted the target
    Caught,
    /// Target reached the bottom edge
    Missed,
    /// Last life lost; episode over
    Lost,
}

impl StepEvent {
    pub fn reward(self, rewards: &Rewards) -> f64 {
        match self {
            StepEvent::Idle => 0.0,
            StepEvent::Caught => rewards.catch,
            StepEvent::Missed => rewards.miss,
            StepEvent::Lost => rewards.lose,
        }
    }
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub event: StepEvent,
    pub reward: f64,
    pub terminated: bool,
}

/// Advance the episode by one tick
pub fn step<R: Rng>(
    state: &mut EpisodeState,
    geometry: &Geometry,
    rewards: &Rewards,
    rng: &mut R,
    action: Action,
) -> StepOutcome {
    state.steps += 1;

    // Move paddle, then let the target fall
    state.agent = geometry.clamp(state.agent + action.direction() * geometry.agent_velocity);
    state.target = geometry.clamp(state.target + glam::IVec2::Y * geometry.target_velocity);

    let mut event = StepEvent::Idle;

    let missed = state.target.y == geometry.field_size;
    if missed {
        state.lives_left = state.lives_left.saturating_sub(1);
        event = StepEvent::Missed;
        log::debug!(
            "Missed target at x={} ({} lives left)",
            state.target.x,
            state.lives_left
        );
    }

    let caught = geometry
        .agent_rect(state.agent)
        .collides(&geometry.target_rect(state.target));
    if caught {
        event = StepEvent::Caught;
        log::debug!("Caught target at {:?}", state.target);
    }

    if caught || missed {
        state.target = geometry.spawn_target(rng);
        log::debug!("Respawned target at x={}", state.target.x);
    }

    let terminated = state.lives_left == 0;
    if terminated {
        event = StepEvent::Lost;
    }

    let reward = event.reward(rewards);
    state.episode_reward += reward;

    StepOutcome {
        event,
        reward,
        terminated,
    }
}
