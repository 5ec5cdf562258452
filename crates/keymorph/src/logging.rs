//! `tracing` subscriber setup.
//!
//! Logs go to stderr through a non-blocking writer so stdout stays clean for
//! the generated password. `RUST_LOG` overrides the configured level.

use std::io::IsTerminal;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Effective filter directive: `-v` raises the configured level to at least
/// info, `-vv` to debug, `-vvv` to trace. It never lowers it.
///
/// With no `-v` the configured value is used as-is, so `off` and custom
/// directives pass through.
#[must_use]
pub fn filter_directive(configured: &str, verbose: u8) -> String {
    let requested = match verbose {
        0 => return configured.to_owned(),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    configured
        .parse::<LevelFilter>()
        .map_or(requested, |level| level.max(requested))
        .to_string()
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered log lines on drop and must be held
/// until the process exits. A second call leaves the first subscriber in
/// place.
#[must_use = "dropping the guard stops log output"]
pub fn init(directive: &str) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    if tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    guard
}
