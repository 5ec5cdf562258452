//! Password policy validator for display.
//!
//! Scores any string against the generation policy: minimum length, the
//! four character classes, and the risk scan. Independent of the generation
//! pipeline; safe to call on every keystroke.

use serde::{Deserialize, Serialize};

use crate::locale::Language;
use crate::password::MIN_PASSWORD_LENGTH;
use crate::pools::{missing_classes, VALIDATOR_SYMBOLS};
use crate::risk;

/// Points deducted per error.
const PENALTY_PER_ERROR: u32 = 20;

/// Outcome of a policy check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// `true` iff `errors` is empty and the input was non-empty.
    pub is_valid: bool,
    /// 0–100.
    pub score: u32,
    /// Human-readable findings, in check order.
    pub errors: Vec<String>,
}

/// Validate `password` with messages in `lang`.
///
/// Empty input yields `{ is_valid: false, score: 0, errors: [] }`: "nothing
/// entered yet" is not an error, and callers must not read the empty list
/// as success.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn validate_with(password: &str, lang: Language) -> ValidationReport {
    if password.is_empty() {
        return ValidationReport::default();
    }

    let chars: Vec<char> = password.chars().collect();
    let mut errors = Vec::new();

    if chars.len() < MIN_PASSWORD_LENGTH {
        errors.push(lang.too_short().to_owned());
    }

    let missing = missing_classes(&chars, VALIDATOR_SYMBOLS);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|class| class.label(lang)).collect();
        errors.push(lang.missing(&names));
    }

    errors.extend(
        risk::scan(&chars)
            .iter()
            .map(|found| lang.contains(found.kind.message(lang))),
    );

    let is_valid = errors.is_empty();
    let score = if is_valid {
        100
    } else {
        let penalty = u32::try_from(errors.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(PENALTY_PER_ERROR);
        100u32.saturating_sub(penalty)
    };

    ValidationReport {
        is_valid,
        score,
        errors,
    }
}

/// Validate `password` with English messages.
///
/// Total over all strings, including the empty one.
#[must_use]
pub fn evaluate(password: &str) -> ValidationReport {
    validate_with(password, Language::En)
}
