//! Driver-facing environment
//!
//! Wraps the deterministic simulation with seeding, episode bookkeeping and
//! optional rendering behind the usual `reset`/`step`/`render`/`close` loop.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{EnvConfig, RenderMode};
use crate::error::EnvError;
use crate::platform::Display;
use crate::renderer::{Frame, Scene, rasterize};
use crate::session::SessionState;
use crate::sim::{self, Action, EpisodeState, Geometry, Observation, Rewards, StepOutcome};
use crate::spaces::{Discrete, ObservationSpace};

/// Auxiliary diagnostics returned alongside observations (currently always empty)
pub type Info = serde_json::Map<String, serde_json::Value>;

/// Everything `step` reports back to the driver
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<O> {
    pub observation: O,
    pub reward: f64,
    /// Episode ended by the environment's own rules
    pub terminated: bool,
    /// Episode cut short from outside (step limits)
    pub truncated: bool,
    pub info: Info,
}

impl<O> Transition<O> {
    /// True if the driver must reset before stepping again
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Common interface for steppable environments
pub trait Environment {
    type Action;
    type Observation;

    /// Start a new episode, optionally reseeding the environment RNG
    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Observation, Info), EnvError>;

    /// Advance the current episode by one tick
    fn step(&mut self, action: Self::Action) -> Result<Transition<Self::Observation>, EnvError>;

    /// Produce a frame for pixel-buffer capture, if the render mode does so
    fn render(&mut self) -> Result<Option<Frame>, EnvError>;

    /// Release rendering resources; safe to call at any time
    fn close(&mut self);

    fn action_space(&self) -> Discrete;
}

/// The catcher game
pub struct CatcherEnv {
    config: EnvConfig,
    geometry: Geometry,
    rewards: Rewards,
    rng: Pcg32,
    /// Current episode; `None` until the first reset
    episode: Option<EpisodeState>,
    /// Set once a step terminates the episode
    awaiting_reset: bool,
    session: SessionState,
    /// Window and GPU resources, created on the first interactive frame
    display: Option<Display>,
}

impl CatcherEnv {
    /// Build an environment; the RNG is seeded from OS entropy until the
    /// first seeded reset
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;
        let geometry = Geometry::new(config.field_size);
        let rewards = Rewards::from(&config);
        log::debug!(
            "Catcher env: field {} lives {} render {}",
            config.field_size,
            config.lives,
            config.render_mode
        );
        Ok(Self {
            config,
            geometry,
            rewards,
            rng: Pcg32::from_rng(&mut rand::rng()),
            episode: None,
            awaiting_reset: true,
            session: SessionState::new(),
            display: None,
        })
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Current episode state, if an episode has been started
    pub fn episode(&self) -> Option<&EpisodeState> {
        self.episode.as_ref()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::new(0, self.geometry.field_size)
    }

    /// Compute the next episode state and RNG without touching `self`
    fn advance(&self, action: Action) -> Result<(EpisodeState, Pcg32, StepOutcome), EnvError> {
        if self.awaiting_reset {
            return Err(EnvError::ResetNeeded);
        }
        let Some(mut state) = self.episode.clone() else {
            return Err(EnvError::ResetNeeded);
        };
        let mut rng = self.rng.clone();
        let outcome = sim::step(&mut state, &self.geometry, &self.rewards, &mut rng, action);
        Ok((state, rng, outcome))
    }

    /// Show `state` in the window when in human mode
    fn present(&mut self, state: &EpisodeState) -> Result<(), EnvError> {
        if self.config.render_mode != RenderMode::Human {
            return Ok(());
        }
        let scene = Scene::new(&self.geometry, state);
        let (field_size, fps) = (self.config.field_size, self.config.render_fps);
        self.display
            .get_or_insert_with(|| Display::new(field_size, fps))
            .present(&scene)
    }
}

impl Environment for CatcherEnv {
    type Action = Action;
    type Observation = Observation;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Observation, Info), EnvError> {
        let mut rng = match seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => self.rng.clone(),
        };
        let target = self.geometry.spawn_target(&mut rng);
        let state = EpisodeState::new(&self.geometry, self.config.lives, target);

        // Draw first so a display failure leaves the environment as it was
        self.present(&state)?;

        let previous_total = self.episode.as_ref().map(|e| e.episode_reward);
        if let Some(total) = self.session.begin_episode(previous_total) {
            log::info!(
                "Episode {} finished with reward {}",
                self.session.episodes() - 1,
                total
            );
        }

        let observation = state.observation();
        self.rng = rng;
        self.episode = Some(state);
        self.awaiting_reset = false;

        Ok((observation, Info::new()))
    }

    fn step(&mut self, action: Action) -> Result<Transition<Observation>, EnvError> {
        let (state, rng, outcome) = self.advance(action)?;
        self.present(&state)?;

        let observation = state.observation();
        if outcome.terminated {
            log::debug!(
                "Episode {} terminated after {} steps",
                self.session.episodes(),
                state.steps
            );
            self.awaiting_reset = true;
        }
        self.rng = rng;
        self.episode = Some(state);

        Ok(Transition {
            observation,
            reward: outcome.reward,
            terminated: outcome.terminated,
            truncated: false,
            info: Info::new(),
        })
    }

    fn render(&mut self) -> Result<Option<Frame>, EnvError> {
        match self.config.render_mode {
            RenderMode::RgbArray => Ok(self
                .episode
                .as_ref()
                .map(|state| rasterize(&Scene::new(&self.geometry, state)))),
            RenderMode::Human => Ok(None),
            RenderMode::Off => {
                log::warn!("render() called without a render mode; set render_mode to \"rgb_array\" or \"human\"");
                Ok(None)
            }
        }
    }

    fn close(&mut self) {
        if self.display.take().is_some() {
            log::info!("Closed display");
        }
    }

    fn action_space(&self) -> Discrete {
        Discrete::new(Action::COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::palette;

    fn env() -> CatcherEnv {
        CatcherEnv::new(EnvConfig::default()).unwrap()
    }

    #[test]
    fn test_step_before_reset_fails() {
        let mut env = env();
        assert!(matches!(env.step(Action::Left), Err(EnvError::ResetNeeded)));
    }

    #[test]
    fn test_reset_places_paddle() {
        let mut env = env();
        let (obs, info) = env.reset(Some(0)).unwrap();
        assert_eq!(obs.agent, 64);
        assert_eq!(obs.target.y, 0);
        assert!(info.is_empty());

        let state = env.episode().unwrap();
        assert_eq!(state.agent.y, 121);
        assert_eq!(state.lives_left, 3);
        assert_eq!(env.session().episodes(), 1);
        assert!(env.session().is_empty());
    }

    #[test]
    fn test_reset_records_previous_episode() {
        let mut env = env();
        env.reset(Some(3)).unwrap();
        let mut total = 0.0;
        for i in 0..60 {
            let action = if i % 2 == 0 { Action::Left } else { Action::Right };
            total += env.step(action).unwrap().reward;
        }
        assert_eq!(env.episode().unwrap().episode_reward, total);

        env.reset(None).unwrap();
        assert_eq!(env.session().rewards(), &[total]);
        assert_eq!(env.session().episodes(), 2);
        assert_eq!(env.episode().unwrap().episode_reward, 0.0);
    }

    #[test]
    fn test_terminated_episode_requires_reset() {
        let config = EnvConfig {
            lives: 1,
            ..Default::default()
        };
        let mut env = CatcherEnv::new(config).unwrap();
        let (mut obs, _) = env.reset(Some(9)).unwrap();

        // Run away from the target until it lands
        let transition = loop {
            let action = if obs.target.x < 64 { Action::Right } else { Action::Left };
            let t = env.step(action).unwrap();
            obs = t.observation;
            if t.terminated {
                break t;
            }
        };
        assert_eq!(transition.reward, -5.0);
        assert!(!transition.truncated);
        assert!(matches!(env.step(Action::Left), Err(EnvError::ResetNeeded)));

        env.reset(None).unwrap();
        assert!(env.step(Action::Left).is_ok());
    }

    #[test]
    fn test_render_modes() {
        let mut off = env();
        off.reset(Some(1)).unwrap();
        assert_eq!(off.render().unwrap(), None);

        let config = EnvConfig::default().with_render_mode(RenderMode::RgbArray);
        let mut env = CatcherEnv::new(config).unwrap();
        // Nothing to draw before the first reset
        assert_eq!(env.render().unwrap(), None);

        env.reset(Some(1)).unwrap();
        let frame = env.render().unwrap().unwrap();
        assert_eq!(frame.shape(), (128, 128, 3));
        assert_eq!(frame.pixel(64, 121), Some(palette::PADDLE));
        let target = env.episode().unwrap().target;
        assert_eq!(
            frame.pixel(target.x as u32, target.y as u32),
            Some(palette::TARGET)
        );
    }

    #[test]
    fn test_close_without_display_is_noop() {
        let mut env = env();
        env.close();
        env.reset(None).unwrap();
        env.close();
        env.close();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EnvConfig {
            field_size: 10,
            ..Default::default()
        };
        assert!(matches!(
            CatcherEnv::new(config),
            Err(EnvError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_advance_leaves_env_untouched() {
        let mut env = env();
        assert!(matches!(env.advance(Action::Left), Err(EnvError::ResetNeeded)));

        env.reset(Some(4)).unwrap();
        let before = env.episode().cloned();
        let (pending, _, outcome) = env.advance(Action::Right).unwrap();
        assert_eq!(env.episode().cloned(), before);
        assert_eq!(pending.steps, 1);

        // Committing the same action lands on the previewed state
        let t = env.step(Action::Right).unwrap();
        assert_eq!(t.observation, pending.observation());
        assert_eq!(t.reward, outcome.reward);
        assert_eq!(env.episode(), Some(&pending));
    }

    #[test]
    fn test_oversized_field_rejected() {
        let config = EnvConfig {
            field_size: 3_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            CatcherEnv::new(config),
            Err(EnvError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_spaces() {
        let env = env();
        assert_eq!(env.action_space(), Discrete::new(2));
        assert_eq!(env.observation_space(), ObservationSpace::new(0, 128));
    }
}
