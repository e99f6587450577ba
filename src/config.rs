//! Environment configuration
//!
//! Immutable once an environment is built. Loadable from JSON so the demo
//! driver can be pointed at a config file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EnvError;

/// How (and whether) frames are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// No rendering
    #[default]
    #[serde(alias = "none")]
    Off,
    /// Native window, drawn on every reset/step and paced to `render_fps`
    Human,
    /// Off-screen pixel buffer returned from `render`
    #[serde(alias = "rgb-array")]
    RgbArray,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Off => "off",
            RenderMode::Human => "human",
            RenderMode::RgbArray => "rgb_array",
        }
    }
}

impl FromStr for RenderMode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Ok(RenderMode::Off),
            "human" => Ok(RenderMode::Human),
            "rgb_array" | "rgb-array" => Ok(RenderMode::RgbArray),
            _ => Err(EnvError::UnsupportedRenderMode(s.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Side length of the square play field
    pub field_size: u32,
    /// Lives at the start of every episode
    pub lives: u32,
    /// Reward for intercepting a target
    pub catch_reward: f64,
    /// Reward for letting a target reach the bottom
    pub miss_reward: f64,
    /// Reward on the step that loses the last life
    pub lose_reward: f64,
    /// Frame production mode
    pub render_mode: RenderMode,
    /// Frame rate cap for `RenderMode::Human`
    pub render_fps: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            field_size: DEFAULT_FIELD_SIZE,
            lives: DEFAULT_LIVES,
            catch_reward: DEFAULT_CATCH_REWARD,
            miss_reward: DEFAULT_MISS_REWARD,
            lose_reward: DEFAULT_LOSE_REWARD,
            render_mode: RenderMode::Off,
            render_fps: DEFAULT_RENDER_FPS,
        }
    }
}

impl EnvConfig {
    /// Copy of this config with a different render mode
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Reject configs the simulation cannot run
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.field_size < MIN_FIELD_SIZE {
            return Err(EnvError::InvalidConfig(format!(
                "field_size {} is below the minimum of {MIN_FIELD_SIZE}",
                self.field_size
            )));
        }
        if self.field_size > MAX_FIELD_SIZE {
            return Err(EnvError::InvalidConfig(format!(
                "field_size {} is above the maximum of {MAX_FIELD_SIZE}",
                self.field_size
            )));
        }
        if self.lives == 0 {
            return Err(EnvError::InvalidConfig("lives must be at least 1".into()));
        }
        if self.render_mode == RenderMode::Human && self.render_fps == 0 {
            return Err(EnvError::InvalidConfig(
                "render_fps must be non-zero in human mode".into(),
            ));
        }
        Ok(())
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, EnvError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mode_parse() {
        assert_eq!("human".parse::<RenderMode>().unwrap(), RenderMode::Human);
        assert_eq!("RGB_ARRAY".parse::<RenderMode>().unwrap(), RenderMode::RgbArray);
        assert_eq!("none".parse::<RenderMode>().unwrap(), RenderMode::Off);
        assert!(matches!(
            "ansi".parse::<RenderMode>(),
            Err(EnvError::UnsupportedRenderMode(s)) if s == "ansi"
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EnvConfig::from_json(r#"{"lives": 5, "render_mode": "rgb_array"}"#).unwrap();
        assert_eq!(config.lives, 5);
        assert_eq!(config.render_mode, RenderMode::RgbArray);
        assert_eq!(config.field_size, DEFAULT_FIELD_SIZE);
        assert_eq!(config.lose_reward, DEFAULT_LOSE_REWARD);
    }

    #[test]
    fn test_json_accepts_cli_render_mode_spellings() {
        for (json, mode) in [
            (r#"{"render_mode": "none"}"#, RenderMode::Off),
            (r#"{"render_mode": "rgb-array"}"#, RenderMode::RgbArray),
            (r#"{"render_mode": "off"}"#, RenderMode::Off),
        ] {
            assert_eq!(EnvConfig::from_json(json).unwrap().render_mode, mode);
        }
    }

    #[test]
    fn test_unknown_render_mode_in_json_is_rejected() {
        assert!(matches!(
            EnvConfig::from_json(r#"{"render_mode": "ascii"}"#),
            Err(EnvError::Config(_))
        ));
    }

    #[test]
    fn test_validate() {
        assert!(EnvConfig::default().validate().is_ok());

        let tiny = EnvConfig {
            field_size: MIN_FIELD_SIZE - 1,
            ..Default::default()
        };
        assert!(matches!(tiny.validate(), Err(EnvError::InvalidConfig(_))));

        let largest = EnvConfig {
            field_size: MAX_FIELD_SIZE,
            ..Default::default()
        };
        assert!(largest.validate().is_ok());

        for field_size in [MAX_FIELD_SIZE + 1, 3_000_000_000, u32::MAX] {
            let huge = EnvConfig {
                field_size,
                ..Default::default()
            };
            assert!(matches!(huge.validate(), Err(EnvError::InvalidConfig(_))));
        }

        let no_lives = EnvConfig {
            lives: 0,
            ..Default::default()
        };
        assert!(matches!(no_lives.validate(), Err(EnvError::InvalidConfig(_))));
    }
}
