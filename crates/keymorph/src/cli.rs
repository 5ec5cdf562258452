//! Command-line surface: argument parsing, input collection, rendering.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use keymorph_core::Language;

use crate::commands::evaluate::{evaluate_password, EvaluatePasswordRequest};
use crate::commands::generator::{generate_password, GeneratePasswordRequest};
use crate::commands::preferences::{get_preferences, update_preferences, UpdatePreferencesRequest};
use crate::error::AppError;
use crate::preferences::Preferences;

#[derive(Parser, Debug)]
#[command(
    name = "keymorph",
    version,
    about = "Derive a policy-compliant password from a base password and a master key"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "KEYMORPH_DATA_DIR",
        help = "Directory holding preferences.json"
    )]
    pub data_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_parser = parse_language,
        help = "Message language for this run (en, zh)"
    )]
    pub lang: Option<Language>,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive a password. Missing inputs are read from stdin, one per line.
    Generate {
        #[arg(long, help = "Base password (read from stdin if omitted)")]
        base: Option<String>,
        #[arg(long, help = "Master key (read from stdin if omitted)")]
        key: Option<String>,
    },
    /// Check a password against the policy.
    Evaluate {
        /// Password to check (read from stdin if omitted).
        password: Option<String>,
    },
    /// Show or change preferences.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the stored preferences.
    Show,
    /// Message language: en or zh.
    SetLanguage { code: String },
    /// Default log level when RUST_LOG is unset.
    SetLogLevel { level: String },
    /// Whether `generate` reports unmet rules.
    SetShowReport {
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| format!("unknown language '{code}' (expected en or zh)"))
}

impl Cli {
    /// Parse from an argument iterator.
    ///
    /// # Errors
    ///
    /// Returns the `clap` error for malformed arguments, `--help`, and
    /// `--version`.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Execute a parsed command against loaded preferences.
///
/// `input` supplies secrets not given as flags; results go to `out`,
/// advisory notes to `err`.
///
/// # Errors
///
/// Returns [`AppError`] for missing inputs, rejected preference updates, and
/// I/O failures.
pub fn execute(
    cli: Cli,
    data_dir: &std::path::Path,
    prefs: &mut Preferences,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), AppError> {
    if let Some(lang) = cli.lang {
        prefs.language = lang;
    }

    match cli.command {
        Commands::Generate { base, key } => {
            let base_password = match base {
                Some(value) => value,
                None => read_secret(input)?,
            };
            let master_key = match key {
                Some(value) => value,
                None => read_secret(input)?,
            };
            let request = GeneratePasswordRequest {
                base_password,
                master_key,
            };

            let result = generate_password(request, prefs).map_err(AppError::Input)?;
            if cli.json {
                writeln!(out, "{}", to_json(&result)?)?;
            } else {
                writeln!(out, "{}", result.value)?;
                if let Some(report) = result.report.as_ref().filter(|r| !r.is_valid) {
                    writeln!(err, "note: the result does not meet every rule:")?;
                    for line in &report.errors {
                        writeln!(err, "  - {line}")?;
                    }
                }
            }
        }
        Commands::Evaluate { password } => {
            let password = match password {
                Some(value) => value,
                None => read_secret(input)?,
            };
            let result = evaluate_password(EvaluatePasswordRequest { password }, prefs);
            if cli.json {
                writeln!(out, "{}", to_json(&result)?)?;
            } else {
                let verdict = if result.report.is_valid { "valid" } else { "invalid" };
                writeln!(out, "{verdict} (score {})", result.report.score)?;
                for line in &result.report.errors {
                    writeln!(out, "  - {line}")?;
                }
            }
        }
        Commands::Config { command } => {
            let request = match command {
                ConfigCommands::Show => None,
                ConfigCommands::SetLanguage { code } => Some(UpdatePreferencesRequest {
                    language: Some(code),
                    ..UpdatePreferencesRequest::default()
                }),
                ConfigCommands::SetLogLevel { level } => Some(UpdatePreferencesRequest {
                    log_level: Some(level),
                    ..UpdatePreferencesRequest::default()
                }),
                ConfigCommands::SetShowReport { value } => Some(UpdatePreferencesRequest {
                    show_report: Some(value),
                    ..UpdatePreferencesRequest::default()
                }),
            };
            let current = match request {
                Some(request) => {
                    // Persist the file's values, not this run's `--lang` override.
                    let mut stored = Preferences::load(data_dir);
                    let updated = update_preferences(data_dir, &mut stored, request)
                        .map_err(AppError::Preferences)?;
                    *prefs = updated.clone();
                    updated
                }
                None => get_preferences(prefs),
            };
            if cli.json {
                writeln!(out, "{}", to_json(&current)?)?;
            } else {
                writeln!(out, "language: {}", current.language.code())?;
                writeln!(out, "logLevel: {}", current.log_level)?;
                writeln!(out, "showReport: {}", current.show_report)?;
            }
        }
    }
    Ok(())
}

/// Read one line, stripping the trailing newline.
fn read_secret(input: &mut dyn BufRead) -> Result<String, AppError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(line)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(args: &[&str], stdin: &str, dir: &TempDir) -> Result<(String, String), AppError> {
        let mut argv = vec!["keymorph"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_args(argv).unwrap();
        let mut prefs = Preferences::load(dir.path());
        let mut input = stdin.as_bytes();
        let mut out = Vec::new();
        let mut err = Vec::new();
        execute(cli, dir.path(), &mut prefs, &mut input, &mut out, &mut err)?;
        Ok((
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        ))
    }

    #[test]
    fn generate_from_flags() {
        let dir = TempDir::new().unwrap();
        let (out, err) = run(&["generate", "--base", "hunter2", "--key", "github"], "", &dir).unwrap();
        assert_eq!(out, "iCxDqx9&\n");
        assert!(err.is_empty());
    }

    #[test]
    fn generate_from_stdin() {
        let dir = TempDir::new().unwrap();
        let (out, _) = run(&["generate"], "hunter2\r\ngithub\n", &dir).unwrap();
        assert_eq!(out, "iCxDqx9&\n");
    }

    #[test]
    fn generate_notes_unmet_rules() {
        let dir = TempDir::new().unwrap();
        let (out, err) = run(&["generate", "--base", "password", "--key", "2025"], "", &dir).unwrap();
        assert_eq!(out, "yjEBCw<,\n");
        assert!(err.contains("missing: digit"));
    }

    #[test]
    fn generate_rejects_empty_key() {
        let dir = TempDir::new().unwrap();
        let err = run(&["generate", "--base", "hunter2"], "", &dir).unwrap_err();
        assert_eq!(err.to_string(), "invalid input: master key must not be empty");
    }

    #[test]
    fn evaluate_text_output() {
        let dir = TempDir::new().unwrap();
        let (out, _) = run(&["evaluate", "Aa1!bxaz"], "", &dir).unwrap();
        assert_eq!(out, "valid (score 100)\n");
    }

    #[test]
    fn evaluate_json_in_chinese() {
        let dir = TempDir::new().unwrap();
        let (out, _) = run(&["--json", "--lang", "zh", "evaluate", "ab"], "", &dir).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["report"]["errors"][0], "长度不足8位");
    }

    #[test]
    fn config_set_and_show() {
        let dir = TempDir::new().unwrap();
        run(&["config", "set-language", "zh"], "", &dir).unwrap();
        run(&["config", "set-show-report", "false"], "", &dir).unwrap();
        let (out, _) = run(&["config", "show"], "", &dir).unwrap();
        assert_eq!(out, "language: zh\nlogLevel: warn\nshowReport: false\n");
    }

    #[test]
    fn lang_override_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        run(&["--lang", "zh", "config", "set-log-level", "debug"], "", &dir).unwrap();
        let stored = Preferences::load(dir.path());
        assert_eq!(stored.language, Language::En);
        assert_eq!(stored.log_level, "debug");
    }

    #[test]
    fn bad_language_flag_is_a_parse_error() {
        assert!(Cli::try_parse_args(["keymorph", "--lang", "xx", "config", "show"]).is_err());
    }
}
