//! `keymorph` command-line shell over `keymorph-core`.
//!
//! Resolves the data directory, loads preferences, installs logging, then
//! hands the parsed command to [`cli::execute`].

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod preferences;

use std::io::Write;
use std::process::ExitCode;

use cli::Cli;
use error::AppError;
use preferences::{resolve_data_dir, Preferences};

/// Entry point for the `keymorph` binary.
///
/// Exits 0 on success and 1 on any error; usage errors keep clap's own code.
#[must_use]
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            // Prints help/version on stdout, usage errors on stderr.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let mut stderr = std::io::stderr();
    match run_with(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(stderr, "error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_with(cli: Cli) -> Result<(), AppError> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let loaded = Preferences::try_load(&data_dir);
    let mut prefs = loaded.as_ref().cloned().unwrap_or_default();

    // Reported after init; a corrupt file runs on defaults.
    let _guard = logging::init(&logging::filter_directive(&prefs.log_level, cli.verbose));
    match loaded {
        Ok(_) => tracing::debug!(data_dir = %data_dir.display(), "Preferences loaded"),
        Err(e) => tracing::warn!("Ignoring unreadable preferences file: {e}"),
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr().lock();
    cli::execute(cli, &data_dir, &mut prefs, &mut input, &mut out, &mut err)
}
