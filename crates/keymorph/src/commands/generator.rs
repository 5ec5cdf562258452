//! Password generation command.
//!
//! Stateless: wraps `keymorph_core::generate_detailed` for front ends.
//! Inputs are zeroized when the request is dropped and never logged.

use keymorph_core::{generate_detailed, validate_with, ValidationReport};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::AppError;
use crate::preferences::Preferences;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Front-end request DTO for password generation.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePasswordRequest {
    /// The memorable password being transformed.
    pub base_password: String,
    /// The key controlling the transformation.
    pub master_key: String,
}

impl std::fmt::Debug for GeneratePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratePasswordRequest")
            .field("base_password", &"***")
            .field("master_key", &"***")
            .finish()
    }
}

/// Result DTO returned to the front end.
///
/// `Debug` is manually implemented to mask the generated value.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePasswordResult {
    /// The derived password.
    pub value: String,
    /// Character count of `value`.
    pub length: usize,
    /// Repair passes the engine needed.
    pub attempts: u32,
    /// `false` when the repair loop gave up before meeting every rule.
    pub settled: bool,
    /// Validator verdict on `value`, when enabled in preferences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
}

impl std::fmt::Debug for GeneratePasswordResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratePasswordResult")
            .field("value", &"***")
            .field("length", &self.length)
            .field("attempts", &self.attempts)
            .field("settled", &self.settled)
            .field("report", &self.report)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Derive a password from the request's base password and master key.
///
/// Generated values are never logged.
///
/// # Errors
///
/// Returns a string error if either input is empty.
#[allow(clippy::needless_pass_by_value)]
pub fn generate_password(
    request: GeneratePasswordRequest,
    prefs: &Preferences,
) -> Result<GeneratePasswordResult, String> {
    let generation = generate_detailed(&request.base_password, &request.master_key)
        .map_err(|e| AppError::from(e).to_string())?;

    let length = generation.password.chars().count();
    tracing::info!(
        length,
        attempts = generation.attempts,
        settled = generation.settled,
        "Password generated"
    );

    let report = prefs
        .show_report
        .then(|| validate_with(&generation.password, prefs.language));

    Ok(GeneratePasswordResult {
        value: generation.password,
        length,
        attempts: generation.attempts,
        settled: generation.settled,
        report,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
