//! Deterministic password derivation pipeline.
//!
//! `master key -> seed -> generator`, then:
//! - [`remap`]: one class-preserving substitution per base character
//! - [`repair`]: bounded policy repair continuing the same draw sequence
//!
//! The base password never influences the seed; only the remap pass reads it.

pub mod remap;
pub mod repair;

pub use remap::remap;
pub use repair::repair;

use zeroize::Zeroize;

use crate::error::EngineError;
use crate::seed::derive_seed;
use crate::sequence::Mulberry32;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum length of a generated password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Repair passes before the loop gives up and returns its best candidate.
pub const MAX_REPAIR_ATTEMPTS: u32 = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Result of one generation run.
///
/// `Debug` is manually implemented to mask the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Generation {
    /// The derived password (ASCII, at least [`MIN_PASSWORD_LENGTH`] long
    /// whenever the base password was non-empty).
    pub password: String,
    /// Repair passes performed.
    pub attempts: u32,
    /// `true` if the policy was met, `false` if attempts were exhausted.
    pub settled: bool,
}

impl std::fmt::Debug for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generation")
            .field("password", &"***")
            .field("attempts", &self.attempts)
            .field("settled", &self.settled)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the password for `(base, master_key)` along with repair diagnostics.
///
/// # Errors
///
/// Returns [`EngineError::MissingBasePassword`] or
/// [`EngineError::MissingMasterKey`] when the corresponding input is empty
/// (base password checked first).
pub fn generate_detailed(base: &str, master_key: &str) -> Result<Generation, EngineError> {
    if base.is_empty() {
        return Err(EngineError::MissingBasePassword);
    }
    if master_key.is_empty() {
        return Err(EngineError::MissingMasterKey);
    }

    let rng = Mulberry32::new(derive_seed(master_key));
    let (mut mapped, rng) = remap(base, rng);
    let (generation, _) = repair(&mapped, rng);
    mapped.zeroize();

    Ok(generation)
}

/// Derive the password for `(base, master_key)`.
///
/// Returns `None` when either input is empty. Otherwise always returns a
/// string of at least [`MIN_PASSWORD_LENGTH`] characters. Policy compliance is
/// best-effort; check it with [`crate::evaluate`] when it matters.
#[must_use]
pub fn generate(base: &str, master_key: &str) -> Option<String> {
    generate_detailed(base, master_key)
        .ok()
        .map(|generation| generation.password)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
