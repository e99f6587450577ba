//! Environment wrappers

use crate::env::{Environment, Info, Transition};
use crate::error::EnvError;
use crate::renderer::Frame;
use crate::spaces::Discrete;

/// Truncates episodes after a fixed number of steps
pub struct TimeLimit<E> {
    env: E,
    max_episode_steps: Option<u32>,
    elapsed_steps: u32,
}

impl<E: Environment> TimeLimit<E> {
    /// Wrap `env`; `None` disables the limit
    pub fn new(env: E, max_episode_steps: Option<u32>) -> Self {
        Self {
            env,
            max_episode_steps,
            elapsed_steps: 0,
        }
    }

    pub fn max_episode_steps(&self) -> Option<u32> {
        self.max_episode_steps
    }

    /// Steps taken since the last reset
    pub fn elapsed_steps(&self) -> u32 {
        self.elapsed_steps
    }

    pub fn inner(&self) -> &E {
        &self.env
    }

    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn into_inner(self) -> E {
        self.env
    }
}

impl<E: Environment> Environment for TimeLimit<E> {
    type Action = E::Action;
    type Observation = E::Observation;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Observation, Info), EnvError> {
        self.elapsed_steps = 0;
        self.env.reset(seed)
    }

    fn step(&mut self, action: Self::Action) -> Result<Transition<Self::Observation>, EnvError> {
        let mut transition = self.env.step(action)?;
        self.elapsed_steps += 1;
        if let Some(limit) = self.max_episode_steps {
            if self.elapsed_steps >= limit {
                transition.truncated = true;
            }
        }
        Ok(transition)
    }

    fn render(&mut self) -> Result<Option<Frame>, EnvError> {
        self.env.render()
    }

    fn close(&mut self) {
        self.env.close()
    }

    fn action_space(&self) -> Discrete {
        self.env.action_space()
    }
}
