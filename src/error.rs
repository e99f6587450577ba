//! Environment error type

use thiserror::Error;

/// Everything that can go wrong while building or driving an environment
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("unsupported render mode: {0:?} (expected \"off\", \"human\" or \"rgb_array\")")]
    UnsupportedRenderMode(String),

    #[error("invalid action {0}: expected 0 (left) or 1 (right)")]
    InvalidAction(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("environment must be reset before stepping")]
    ResetNeeded,

    #[error("display error: {0}")]
    Display(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no environment registered with id {0:?}")]
    UnknownEnv(String),

    #[error("environment id {0:?} is already registered")]
    DuplicateId(String),
}
