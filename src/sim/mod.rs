//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick per step
//! - Seeded RNG only (passed in by the caller)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod step;

pub use collision::Rect;
pub use state::{Action, EpisodeState, Geometry, Observation};
pub use step::{Rewards, StepEvent, StepOutcome, step};
