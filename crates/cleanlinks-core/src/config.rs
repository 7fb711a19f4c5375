use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::{CallerProfile, DEFAULT_RESTRICTED_SITES};
use crate::policy::Policy;

/// Settings loaded from `~/.config/cleanlinks/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanLinksConfig {
    /// Cleaning policy: `mode`, `whitelist`, `blacklist` at the top level of the file.
    #[serde(flatten)]
    pub policy: Policy,
    /// Lowercase cleaned URLs for the interactive (command/popup) callers.
    #[serde(default = "default_true")]
    pub lowercase_output: bool,
    /// Refuse to clean URLs with homoglyph-looking hosts (interactive callers only).
    #[serde(default = "default_true")]
    pub skip_suspicious: bool,
    /// Pages where the copy listener stays inactive (substring match on host).
    #[serde(default = "default_restricted_sites")]
    pub restricted_sites: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_restricted_sites() -> Vec<String> {
    DEFAULT_RESTRICTED_SITES.iter().map(|s| s.to_string()).collect()
}

impl Default for CleanLinksConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            lowercase_output: true,
            skip_suspicious: true,
            restricted_sites: default_restricted_sites(),
        }
    }
}

impl CleanLinksConfig {
    /// Profile for the keyboard-command and popup callers, with config overrides applied.
    pub fn interactive_profile(&self) -> CallerProfile {
        CallerProfile {
            check_suspicious: self.skip_suspicious,
            lowercase: self.lowercase_output,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cleanlinks")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CleanLinksConfig> {
    load_or_init_at(&config_path()?)
}

/// As [`load_or_init`], for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<CleanLinksConfig> {
    if !path.exists() {
        let default_cfg = CleanLinksConfig::default();
        save_to(path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(path)
}

pub fn load_from(path: &Path) -> Result<CleanLinksConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: CleanLinksConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}

/// Like [`load_or_init_at`], but a broken settings store falls back to defaults.
pub fn load_or_default(path: &Path) -> CleanLinksConfig {
    match load_or_init_at(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("using default settings: {:#}", e);
            CleanLinksConfig::default()
        }
    }
}

/// TOML text of `cfg`, as written to disk.
pub fn render(cfg: &CleanLinksConfig) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}

pub fn save_to(path: &Path, cfg: &CleanLinksConfig) -> Result<()> {
    let toml = render(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("failed to write config {}", path.display()))?;
    tracing::debug!("saved config to {}", path.display());
    Ok(())
}
