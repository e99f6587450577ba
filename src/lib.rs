//! Catcher - a steppable paddle-and-falling-target environment
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, step function)
//! - `env`: Driver-facing environment (`reset`/`step`/`render`/`close`)
//! - `renderer`: Software rasterizer and WebGPU pipeline
//! - `platform`: Native window, event pumping and frame pacing
//! - `registry`: Environment ids and time-limit wrapping

pub mod config;
pub mod env;
pub mod error;
pub mod platform;
pub mod registry;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod spaces;
pub mod wrappers;

pub use config::{EnvConfig, RenderMode};
pub use env::{CatcherEnv, Environment, Info, Transition};
pub use error::EnvError;
pub use registry::{EnvSpec, Registry};
pub use session::SessionState;
pub use sim::{Action, Observation};
pub use wrappers::TimeLimit;

/// Environment constants
pub mod consts {
    /// Paddle displacement per step, as a fraction of the field size
    pub const AGENT_VELOCITY_FRAC: f64 = 0.06;
    /// Target fall distance per step, as a fraction of the field size
    pub const TARGET_VELOCITY_FRAC: f64 = 0.03;

    /// Paddle start position (fractions of the field size)
    pub const AGENT_START_X_FRAC: f64 = 0.5;
    pub const AGENT_START_Y_FRAC: f64 = 0.95;

    /// Paddle rectangle size
    pub const AGENT_WIDTH_FRAC: f64 = 0.2;
    pub const AGENT_HEIGHT_FRAC: f64 = 0.04;

    /// Target is a square
    pub const TARGET_SIZE_FRAC: f64 = 0.06;

    /// Targets spawn within [SPAWN_MIN_FRAC, SPAWN_MIN_FRAC + SPAWN_SPAN_FRAC] of the width
    pub const SPAWN_MIN_FRAC: f64 = 0.05;
    pub const SPAWN_SPAN_FRAC: f64 = 0.9;

    /// Smallest field whose target velocity is non-zero
    pub const MIN_FIELD_SIZE: u32 = 34;
    /// Largest field; keeps positions plus sizes well inside i32 and frames bounded
    pub const MAX_FIELD_SIZE: u32 = 4096;

    /// Default environment parameters
    pub const DEFAULT_FIELD_SIZE: u32 = 128;
    pub const DEFAULT_LIVES: u32 = 3;
    pub const DEFAULT_CATCH_REWARD: f64 = 1.0;
    pub const DEFAULT_MISS_REWARD: f64 = -1.0;
    pub const DEFAULT_LOSE_REWARD: f64 = -5.0;
    pub const DEFAULT_RENDER_FPS: u32 = 30;
}

/// Scale a field size by a fraction, truncating toward zero
#[inline]
pub fn scaled(field_size: u32, frac: f64) -> i32 {
    (field_size as f64 * frac) as i32
}
