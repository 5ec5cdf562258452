//! User preferences, stored as plain JSON and never containing secrets.
//!
//! Neither the base password nor the master key is ever written here; the
//! file only holds display and logging choices.

use std::fs;
use std::path::{Path, PathBuf};

use keymorph_core::Language;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ── Preferences ────────────────────────────────────────────────────

/// Persisted preferences.
///
/// Stored at `{data_dir}/preferences.json`. All fields have defaults via
/// [`Default`], so partial files load cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Language for validator messages.
    #[serde(default)]
    pub language: Language,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether `generate` reports the validator verdict on its output.
    #[serde(default = "default_show_report")]
    pub show_report: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::default(),
            log_level: default_log_level(),
            show_report: default_show_report(),
        }
    }
}

fn default_log_level() -> String {
    "warn".into()
}
const fn default_show_report() -> bool {
    true
}

/// Level names accepted for [`Preferences::log_level`].
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Check that `level` is one of [`LOG_LEVELS`] (case-insensitive).
///
/// # Errors
///
/// Returns [`AppError::Preferences`] for anything else.
pub fn validate_log_level(level: &str) -> Result<String, AppError> {
    let lowered = level.to_ascii_lowercase();
    if LOG_LEVELS.contains(&lowered.as_str()) {
        Ok(lowered)
    } else {
        Err(AppError::Preferences(format!(
            "unknown log level '{level}'. Expected one of: {}.",
            LOG_LEVELS.join(", ")
        )))
    }
}

// ── Data directory ─────────────────────────────────────────────────

const APP_DIR: &str = "keymorph";

/// Resolve the preferences directory: `explicit` if given, otherwise
/// `{config_dir}/keymorph`.
///
/// # Errors
///
/// Returns [`AppError::Preferences`] when no explicit directory is given and
/// the platform has no config directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| AppError::Preferences("cannot find a config directory".into()))
}

// ── File I/O ───────────────────────────────────────────────────────

const PREFERENCES_FILE: &str = "preferences.json";
const PREFERENCES_TMP_FILE: &str = ".preferences.json.tmp";

impl Preferences {
    /// Load preferences from `{data_dir}/preferences.json`.
    ///
    /// Returns [`Default::default()`] when the file is missing or contains
    /// invalid JSON.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        Self::try_load(data_dir).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable preferences file: {e}");
            Self::default()
        })
    }

    /// Load preferences, reporting a corrupt file instead of hiding it.
    ///
    /// A missing file yields [`Default::default()`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Preferences`] when the file exists but does not
    /// parse.
    pub fn try_load(data_dir: &Path) -> Result<Self, AppError> {
        let path = data_dir.join(PREFERENCES_FILE);
        let Ok(contents) = fs::read_to_string(&path) else {
            return Ok(Self::default());
        };
        serde_json::from_str(&contents)
            .map_err(|e| AppError::Preferences(format!("{}: {e}", path.display())))
    }

    /// Persist preferences to `{data_dir}/preferences.json`, creating the
    /// directory if needed.
    ///
    /// Writes to a `.tmp` file and renames it into place.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory cannot be created or the
    /// write/rename fails.
    pub fn save(&self, data_dir: &Path) -> std::io::Result<()> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(PREFERENCES_FILE);
        let tmp = data_dir.join(PREFERENCES_TMP_FILE);

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &path)?;

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_values_are_correct() {
        let prefs = Preferences::default();
        assert_eq!(prefs.language, Language::En);
        assert_eq!(prefs.log_level, "warn");
        assert!(prefs.show_report);
    }

    #[test]
    fn load_returns_default_on_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Preferences::load(dir.path()), Preferences::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let prefs = Preferences {
            language: Language::Zh,
            log_level: "debug".into(),
            show_report: false,
        };
        prefs.save(dir.path()).unwrap();
        assert_eq!(Preferences::load(dir.path()), prefs);
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        Preferences::default().save(&nested).unwrap();
        assert!(nested.join(PREFERENCES_FILE).exists());
    }

    #[test]
    fn load_recovers_from_corrupt_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILE), "{ not json ]").unwrap();
        assert_eq!(Preferences::load(dir.path()), Preferences::default());
    }

    #[test]
    fn try_load_reports_corrupt_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILE), "{ not json ]").unwrap();
        let err = Preferences::try_load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(PREFERENCES_FILE), "{err}");
        assert_eq!(
            Preferences::try_load(TempDir::new().unwrap().path()).unwrap(),
            Preferences::default()
        );
    }

    #[test]
    fn load_handles_partial_json_with_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILE), r#"{"language":"zh"}"#).unwrap();

        let prefs = Preferences::load(dir.path());
        assert_eq!(prefs.language, Language::Zh);
        assert_eq!(prefs.log_level, "warn");
        assert!(prefs.show_report);
    }

    #[test]
    fn unknown_language_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILE), r#"{"language":"fr"}"#).unwrap();
        assert_eq!(Preferences::load(dir.path()), Preferences::default());
    }

    #[test]
    fn save_is_atomic_via_tmp_file() {
        let dir = TempDir::new().unwrap();
        Preferences::default().save(dir.path()).unwrap();
        assert!(!dir.path().join(PREFERENCES_TMP_FILE).exists());
        assert!(dir.path().join(PREFERENCES_FILE).exists());
    }

    #[cfg(unix)]
    #[test]
    fn save_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        Preferences::default().save(dir.path()).unwrap();
        let meta = fs::metadata(dir.path().join(PREFERENCES_FILE)).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn serialized_keys_are_camel_case() {
        let json = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "language": "en", "logLevel": "warn", "showReport": true })
        );
    }

    #[test]
    fn log_level_validation() {
        assert_eq!(validate_log_level("DEBUG").unwrap(), "debug");
        assert!(validate_log_level("loud").is_err());
    }

    #[test]
    fn explicit_data_dir_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_data_dir(Some(dir.path())).unwrap(), dir.path());
    }
}
