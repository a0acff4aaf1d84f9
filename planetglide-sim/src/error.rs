//! Error types for the simulation coordinator.

use planetglide_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while setting up a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed world file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
