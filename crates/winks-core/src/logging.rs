//! Logging init: append to `winks.log` under the XDG state dir, or fall back to stderr.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,winks_core=debug,winks_cli=debug";

const LOG_FILE_NAME: &str = "winks.log";

/// Directory holding `winks.log` (`~/.local/state/winks/winks`).
fn log_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("winks")?;
    Ok(xdg_dirs.get_state_home().join("winks"))
}

/// Create `dir` if needed and open its log file for appending.
fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    Ok((path, file))
}

/// Install the global subscriber writing to the log file and return its path.
/// Errors leave no subscriber installed, so the caller can use [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let (path, file) = open_log_file(&log_dir()?)?;

    // `&File` is `Write`, so every event shares one handle.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "winks logging started");
    Ok(path)
}

/// Stderr-only logging for when the state dir is unusable.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
