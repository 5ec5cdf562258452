//! Preferences commands: read and update persisted settings.

use std::path::Path;

use keymorph_core::Language;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::preferences::{validate_log_level, Preferences};

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    /// ISO 639-1 code, e.g. `"en"` or `"zh"`.
    pub language: Option<String>,
    pub log_level: Option<String>,
    pub show_report: Option<bool>,
}

/// Current preferences.
#[must_use]
pub fn get_preferences(prefs: &Preferences) -> Preferences {
    prefs.clone()
}

/// Apply `request` to `prefs` and persist the result under `data_dir`.
///
/// `prefs` is only modified once the new values are saved.
///
/// # Errors
///
/// Returns a string error for an unknown language or log level, or when
/// the preferences file cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn update_preferences(
    data_dir: &Path,
    prefs: &mut Preferences,
    request: UpdatePreferencesRequest,
) -> Result<Preferences, String> {
    let mut updated = prefs.clone();

    if let Some(code) = &request.language {
        updated.language = Language::from_code(code).ok_or_else(|| {
            format!("Unknown language: '{code}'. Expected one of: en, zh.")
        })?;
    }
    if let Some(level) = &request.log_level {
        updated.log_level = validate_log_level(level).map_err(|e| match e {
            AppError::Preferences(msg) => msg,
            other => other.to_string(),
        })?;
    }
    if let Some(show) = request.show_report {
        updated.show_report = show;
    }

    updated
        .save(data_dir)
        .map_err(|e| format!("Failed to save preferences: {e}"))?;

    tracing::info!(
        language = updated.language.code(),
        log_level = %updated.log_level,
        show_report = updated.show_report,
        "Preferences updated"
    );

    *prefs = updated.clone();
    Ok(updated)
}
