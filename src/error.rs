//! Error types
//!
//! The simulation itself cannot fail. Everything here comes from the
//! boundaries: startup configuration, the input backend and the display.

use thiserror::Error;

/// Rejected startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be a finite, non-negative number (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("{what} ({size}) does not fit in the screen {axis} ({screen})")]
    DoesNotFit {
        what: &'static str,
        axis: &'static str,
        size: f32,
        screen: f32,
    },
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Input backend failure
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input source disconnected")]
    Disconnected,
    #[error("bad input script: {0}")]
    Script(String),
    #[error("failed to read input script: {0}")]
    Io(#[from] std::io::Error),
}

/// Presentation backend failure
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("display lost")]
    DisplayLost,
    #[error("presentation failed: {0}")]
    Backend(String),
}

/// Fatal error from the outer game loop
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("input failure: {0}")]
    Input(#[from] InputError),
    #[error("presentation failure: {0}")]
    Present(#[from] PresentError),
}
