//! Password evaluation command: policy verdict plus located risks.
//!
//! Pure and cheap; suitable for live feedback on every keystroke.

use keymorph_core::{find_risks, validate_with, Language, Risk, ValidationReport};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::preferences::Preferences;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Front-end request DTO for evaluation.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatePasswordRequest {
    /// Candidate password.
    pub password: String,
}

impl std::fmt::Debug for EvaluatePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatePasswordRequest")
            .field("password", &"***")
            .finish()
    }
}

/// One located risk, safe to display (positions only, no characters).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskDto {
    /// `"repeat"` or `"sequence"`.
    #[serde(rename = "type")]
    pub risk_type: String,
    /// Character index where the weak window starts.
    pub index: usize,
    /// Window length.
    pub len: usize,
    /// Localized category.
    pub message: String,
}

impl RiskDto {
    fn from_risk(risk: &Risk, lang: Language) -> Self {
        Self {
            risk_type: risk.kind.category().to_owned(),
            index: risk.index,
            len: risk.len,
            message: risk.kind.message(lang).to_owned(),
        }
    }
}

/// Result DTO returned to the front end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatePasswordResult {
    pub report: ValidationReport,
    pub risks: Vec<RiskDto>,
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Evaluate a candidate password against the policy.
///
/// Total: the empty string yields an invalid report with no errors.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn evaluate_password(
    request: EvaluatePasswordRequest,
    prefs: &Preferences,
) -> EvaluatePasswordResult {
    let report = validate_with(&request.password, prefs.language);
    let risks = find_risks(&request.password)
        .iter()
        .map(|risk| RiskDto::from_risk(risk, prefs.language))
        .collect();

    tracing::debug!(
        valid = report.is_valid,
        score = report.score,
        "Password evaluated"
    );

    EvaluatePasswordResult { report, risks }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
