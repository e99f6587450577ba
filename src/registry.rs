//! Environment registry
//!
//! Maps string ids to a default configuration and an optional step limit so
//! drivers can build environments by name.

use std::collections::BTreeMap;

use crate::config::EnvConfig;
use crate::env::CatcherEnv;
use crate::error::EnvError;
use crate::wrappers::TimeLimit;

/// Id of the built-in catcher environment
pub const CATCHER_V0: &str = "Catcher-v0";

/// A registered environment variant
#[derive(Debug, Clone, PartialEq)]
pub struct EnvSpec {
    pub id: String,
    /// Truncate episodes after this many steps (`None` = never)
    pub max_episode_steps: Option<u32>,
    /// Config used when the caller does not supply one
    pub config: EnvConfig,
}

impl EnvSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_episode_steps: None,
            config: EnvConfig::default(),
        }
    }

    pub fn with_max_episode_steps(mut self, steps: u32) -> Self {
        self.max_episode_steps = Some(steps);
        self
    }

    pub fn with_config(mut self, config: EnvConfig) -> Self {
        self.config = config;
        self
    }
}

/// Registered environment specs by id
#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: BTreeMap<String, EnvSpec>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry containing the built-in environments
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry
            .specs
            .insert(CATCHER_V0.to_string(), EnvSpec::new(CATCHER_V0));
        registry
    }

    pub fn register(&mut self, spec: EnvSpec) -> Result<(), EnvError> {
        if self.specs.contains_key(&spec.id) {
            return Err(EnvError::DuplicateId(spec.id));
        }
        log::debug!("Registered environment {}", spec.id);
        self.specs.insert(spec.id.clone(), spec);
        Ok(())
    }

    pub fn spec(&self, id: &str) -> Option<&EnvSpec> {
        self.specs.get(id)
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Build a registered environment with its default config
    pub fn make(&self, id: &str) -> Result<TimeLimit<CatcherEnv>, EnvError> {
        let spec = self
            .spec(id)
            .ok_or_else(|| EnvError::UnknownEnv(id.to_string()))?;
        self.make_with(id, spec.config.clone())
    }

    /// Build a registered environment with an explicit config
    pub fn make_with(&self, id: &str, config: EnvConfig) -> Result<TimeLimit<CatcherEnv>, EnvError> {
        let spec = self
            .spec(id)
            .ok_or_else(|| EnvError::UnknownEnv(id.to_string()))?;
        let env = CatcherEnv::new(config)?;
        log::info!("Made environment {}", spec.id);
        Ok(TimeLimit::new(env, spec.max_episode_steps))
    }
}
