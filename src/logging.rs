//! Logging configuration using the tracing framework
//!
//! Console output goes to stderr so `wrdash chart` can stream SVG on stdout.
//! The terminal dashboard owns the screen, so it logs to a rolling file instead.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls log level (e.g., "debug", "info", "warn", "error")
//!   - Default: "wrdash=info,warn"
//!   - Examples:
//!     - `RUST_LOG=wrdash=debug` - Debug logs for the dashboard crate
//!     - `RUST_LOG=wrdash::client=trace` - Trace the stats client only

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "wrdash=info,warn";
const VERBOSE_FILTER: &str = "wrdash=debug,info";

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    })
}

/// Initialize console logging on stderr
///
/// `verbose` raises the default level to debug when `RUST_LOG` is unset.
pub fn init(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

/// Directory the rolling log files are written to
pub fn log_dir() -> std::io::Result<PathBuf> {
    match directories::ProjectDirs::from("com", "wrdash", "wrdash") {
        Some(proj_dirs) => {
            let log_path = proj_dirs.data_dir().join("logs");
            std::fs::create_dir_all(&log_path)?;
            Ok(log_path)
        }
        None => std::env::current_dir(),
    }
}

/// Initialize logging to a daily rolling file only
///
/// The returned guard flushes the background writer when dropped, so keep it
/// alive for as long as the terminal UI runs.
pub fn init_with_file(
    log_file_name: &str,
    verbose: bool,
) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir()?, log_file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()?;

    Ok(guard)
}

/// Initialize logging for tests
///
/// Only errors are shown by default.
pub fn init_test() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer())
        .try_init()
        .ok(); // Ignore errors if already initialized
}
