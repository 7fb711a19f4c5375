//! Tracing setup. Events go to `cleanlinks.log` in the XDG state dir; callers
//! that can't open it use [`init_logging_stderr`] instead.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,cleanlinks=debug,cleanlinks_core=debug";
const LOG_FILE_NAME: &str = "cleanlinks.log";

/// Filter from `RUST_LOG` when it is set and valid, otherwise [`DEFAULT_FILTER`].
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn filter_from_env() -> EnvFilter {
    build_filter(std::env::var("RUST_LOG").ok().as_deref())
}

fn log_file_in(state_dir: &Path) -> PathBuf {
    state_dir.join(LOG_FILE_NAME)
}

/// `~/.local/state/cleanlinks/cleanlinks.log`, creating the directory.
pub fn log_file_path() -> Result<PathBuf> {
    let state_dir = xdg::BaseDirectories::with_prefix("cleanlinks")?.get_state_home();
    fs::create_dir_all(&state_dir)
        .with_context(|| format!("failed to create log dir {}", state_dir.display()))?;
    Ok(log_file_in(&state_dir))
}

/// Installs a plain-text subscriber appending to [`log_file_path`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    init_logging_to(&path)
}

/// Installs a subscriber appending to `path`. Fails if the file can't be opened
/// or a global subscriber is already set.
pub fn init_logging_to(path: &Path) -> Result<()> {
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install subscriber: {e}"))?;

    tracing::info!("cleanlinks logging initialized at {}", path.display());
    Ok(())
}

/// Stderr-only subscriber; a no-op if one is already installed.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
