//! Application error types for the `keymorph` shell.

use keymorph_core::EngineError;
use thiserror::Error;

/// Errors produced outside the engine: input collection, preferences, I/O.
#[derive(Debug, Error)]
pub enum AppError {
    /// The engine refused the request (an input was empty).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Preferences could not be resolved, validated, or saved.
    #[error("preferences error: {0}")]
    Preferences(String),

    /// Command input was malformed.
    #[error("invalid input: {0}")]
    Input(String),
}
