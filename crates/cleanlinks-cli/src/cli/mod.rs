//! CLI for the Clean Links URL cleaner.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cleanlinks_core::config;
use cleanlinks_core::policy::{parse_param_list, Mode, Policy};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{
    run_check, run_clean, run_completions, run_config, run_filter, run_man, run_validate,
    CleanOptions,
};

/// Top-level CLI for Clean Links.
#[derive(Debug, Parser)]
#[command(name = "cleanlinks")]
#[command(about = "Strip tracking parameters and fragments from URLs", long_about = None)]
pub struct Cli {
    /// Settings file to use instead of ~/.config/cleanlinks/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Per-invocation policy overrides layered over the saved settings.
#[derive(Debug, Clone, Default, Args)]
pub struct PolicyArgs {
    /// Cleaning mode: remove_all, whitelist or blacklist.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<Mode>,
    /// Comma-separated parameters to keep in whitelist mode.
    #[arg(long, value_name = "LIST")]
    pub whitelist: Option<String>,
    /// Comma-separated parameters to drop in blacklist mode.
    #[arg(long, value_name = "LIST")]
    pub blacklist: Option<String>,
}

impl PolicyArgs {
    /// Layers the given flags over `policy`; the result has normalized name lists.
    pub fn apply(&self, mut policy: Policy) -> Policy {
        if let Some(mode) = self.mode {
            policy.mode = mode;
        }
        if let Some(list) = &self.whitelist {
            policy.whitelist = parse_param_list(list);
        }
        if let Some(list) = &self.blacklist {
            policy.blacklist = parse_param_list(list);
        }
        policy.normalized()
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Clean URLs given as arguments, or one per line on stdin.
    Clean {
        /// URLs to clean. Reads stdin when omitted.
        urls: Vec<String>,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Lowercase cleaned URLs (overrides lowercase_output).
        #[arg(long, conflicts_with = "keep_case")]
        lowercase: bool,

        /// Leave the case of cleaned URLs alone (overrides lowercase_output).
        #[arg(long)]
        keep_case: bool,

        /// Clean URLs even if their host contains suspicious characters.
        #[arg(long)]
        allow_suspicious: bool,
    },

    /// Copy-listener mode: echo stdin lines, cleaning the ones that are URLs.
    Filter {
        /// Host of the page the text was copied from (restricted sites are left alone).
        #[arg(long, value_name = "HOST")]
        origin: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Check a URL's host for homoglyph-style characters.
    Check {
        url: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Report whether the text is an http/https URL.
    Validate { text: String },

    /// Show or change saved settings.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff).
    Man,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the current settings as TOML.
    Show,
    /// Print the settings file path.
    Path,
    /// Overwrite the settings file with defaults.
    Reset,
    /// Set the cleaning mode.
    SetMode { mode: Mode },
    /// Replace the whitelist (comma-separated).
    SetWhitelist { list: String },
    /// Replace the blacklist (comma-separated).
    SetBlacklist { list: String },
}

impl CliCommand {
    pub fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();
        let config_path = match cli.config {
            Some(path) => Ok(path),
            None => config::config_path(),
        };

        match cli.command {
            CliCommand::Clean {
                urls,
                policy,
                lowercase,
                keep_case,
                allow_suspicious,
            } => {
                let cfg = load_settings(config_path);
                let lowercase = match (lowercase, keep_case) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                let opts = CleanOptions {
                    policy,
                    lowercase,
                    allow_suspicious,
                };
                run_clean(&cfg, &urls, &opts)
            }
            CliCommand::Filter { origin, policy } => {
                let cfg = load_settings(config_path);
                run_filter(&cfg, origin.as_deref(), &policy)
            }
            CliCommand::Check { url, json } => run_check(&url, json),
            CliCommand::Validate { text } => Ok(run_validate(&text)),
            CliCommand::Config { action } => run_config(&config_path?, action),
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man(),
        }
    }
}

/// Settings for cleaning commands; an unusable store falls back to defaults.
fn load_settings(path: Result<PathBuf>) -> config::CleanLinksConfig {
    match path {
        Ok(path) => {
            let cfg = config::load_or_default(&path);
            tracing::debug!("loaded config: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::warn!("no settings path, using defaults: {:#}", e);
            config::CleanLinksConfig::default()
        }
    }
}

#[cfg(test)]
mod tests;
