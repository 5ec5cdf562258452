//! Engine error types for `keymorph-core`.

use thiserror::Error;

/// Reasons a generation request cannot run.
///
/// The engine itself is total; these only report that a required input was
/// left empty, which the public [`crate::generate`] contract treats as a
/// silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The base password was empty.
    #[error("base password must not be empty")]
    MissingBasePassword,

    /// The master key was empty.
    #[error("master key must not be empty")]
    MissingMasterKey,
}
