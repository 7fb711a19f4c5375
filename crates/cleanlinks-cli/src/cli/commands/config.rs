//! `cleanlinks config ...` – settings store management.

use anyhow::Result;
use cleanlinks_core::config::{self, CleanLinksConfig};
use cleanlinks_core::policy::parse_param_list;
use std::path::Path;
use std::process::ExitCode;

use crate::cli::ConfigCommand;

pub fn run_config(path: &Path, action: ConfigCommand) -> Result<ExitCode> {
    match action {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => {
            let cfg = config::load_or_init_at(path)?;
            print!("{}", config::render(&cfg)?);
        }
        ConfigCommand::Reset => {
            config::save_to(path, &CleanLinksConfig::default())?;
            println!("Settings reset to defaults");
        }
        ConfigCommand::SetMode { mode } => {
            update(path, |cfg| cfg.policy.mode = mode)?;
            println!("mode = {mode}");
        }
        ConfigCommand::SetWhitelist { list } => {
            let cfg = update(path, |cfg| cfg.policy.whitelist = parse_param_list(&list))?;
            println!("whitelist = [{}]", cfg.policy.whitelist.join(", "));
        }
        ConfigCommand::SetBlacklist { list } => {
            let cfg = update(path, |cfg| cfg.policy.blacklist = parse_param_list(&list))?;
            println!("blacklist = [{}]", cfg.policy.blacklist.join(", "));
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Loads, edits and saves the settings. Parameter lists are stored lowercased and deduplicated.
fn update(path: &Path, change: impl FnOnce(&mut CleanLinksConfig)) -> Result<CleanLinksConfig> {
    let mut cfg = config::load_or_init_at(path)?;
    change(&mut cfg);
    cfg.policy = cfg.policy.normalized();
    config::save_to(path, &cfg)?;
    tracing::info!("updated settings at {}", path.display());
    Ok(cfg)
}
