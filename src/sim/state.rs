//! Episode state and core simulation types
//!
//! Positions are integer field units. Every size and speed is derived from
//! the field size by truncating multiplication, so two environments with the
//! same field size always share the same geometry.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::error::EnvError;
use crate::scaled;

/// Discrete paddle action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
}

impl Action {
    /// Number of discrete actions
    pub const COUNT: usize = 2;

    /// Unit direction vector for this action
    pub fn direction(self) -> IVec2 {
        match self {
            Action::Left => IVec2::new(-1, 0),
            Action::Right => IVec2::new(1, 0),
        }
    }

    /// Discrete index (0 = left, 1 = right)
    pub fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = EnvError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Action::Left),
            1 => Ok(Action::Right),
            other => Err(EnvError::InvalidAction(other)),
        }
    }
}

/// What the agent sees: paddle x and the full target position
///
/// The paddle's y is fixed for the whole episode and is not observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub agent: i32,
    pub target: IVec2,
}

impl Observation {
    /// Flattened `[agent_x, target_x, target_y]`
    pub fn to_array(&self) -> [i32; 3] {
        [self.agent, self.target.x, self.target.y]
    }
}

/// Sizes and speeds derived from the field size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub field_size: i32,
    pub agent_velocity: i32,
    pub target_velocity: i32,
    pub agent_start: IVec2,
    pub agent_size: IVec2,
    pub target_size: IVec2,
}

impl Geometry {
    pub fn new(field_size: u32) -> Self {
        Self {
            field_size: field_size as i32,
            agent_velocity: scaled(field_size, AGENT_VELOCITY_FRAC),
            target_velocity: scaled(field_size, TARGET_VELOCITY_FRAC),
            agent_start: IVec2::new(
                scaled(field_size, AGENT_START_X_FRAC),
                scaled(field_size, AGENT_START_Y_FRAC),
            ),
            agent_size: IVec2::new(
                scaled(field_size, AGENT_WIDTH_FRAC),
                scaled(field_size, AGENT_HEIGHT_FRAC),
            ),
            target_size: IVec2::splat(scaled(field_size, TARGET_SIZE_FRAC)),
        }
    }

    /// Upper corner of the play field (lower corner is the origin)
    pub fn bounds(&self) -> IVec2 {
        IVec2::splat(self.field_size)
    }

    /// Clamp a position into `[0, field_size]` on both axes
    pub fn clamp(&self, pos: IVec2) -> IVec2 {
        pos.clamp(IVec2::ZERO, self.bounds())
    }

    pub fn agent_rect(&self, pos: IVec2) -> Rect {
        Rect::new(pos, self.agent_size)
    }

    pub fn target_rect(&self, pos: IVec2) -> Rect {
        Rect::new(pos, self.target_size)
    }

    /// Inclusive range of x coordinates a freshly spawned target can take
    pub fn spawn_x_range(&self) -> (i32, i32) {
        let size = self.field_size as f64;
        (
            (size * SPAWN_MIN_FRAC) as i32,
            (size * (SPAWN_MIN_FRAC + SPAWN_SPAN_FRAC)) as i32,
        )
    }

    /// Place a new target at the top, away from the side walls
    pub fn spawn_target<R: Rng>(&self, rng: &mut R) -> IVec2 {
        let frac = rng.random::<f64>() * SPAWN_SPAN_FRAC + SPAWN_MIN_FRAC;
        IVec2::new((frac * self.field_size as f64) as i32, 0)
    }
}

/// Mutable state of one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeState {
    /// Paddle top-left corner
    pub agent: IVec2,
    /// Target top-left corner
    pub target: IVec2,
    /// Lives remaining (only ever decreases)
    pub lives_left: u32,
    /// Reward accumulated so far this episode
    pub episode_reward: f64,
    /// Steps taken this episode
    pub steps: u64,
}

impl EpisodeState {
    /// Fresh episode: paddle at its start position, full lives, given target
    pub fn new(geometry: &Geometry, lives: u32, target: IVec2) -> Self {
        Self {
            agent: geometry.agent_start,
            target,
            lives_left: lives,
            episode_reward: 0.0,
            steps: 0,
        }
    }

    pub fn observation(&self) -> Observation {
        Observation {
            agent: self.agent.x,
            target: self.target,
        }
    }
}
