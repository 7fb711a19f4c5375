//! Tests for check, validate, config, completions, man.

use super::parse;
use crate::cli::{CliCommand, ConfigCommand};
use cleanlinks_core::policy::Mode;

#[test]
fn cli_parse_check() {
    match parse(&["cleanlinks", "check", "https://example.com/"]) {
        CliCommand::Check { url, json } => {
            assert_eq!(url, "https://example.com/");
            assert!(!json);
        }
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_check_json() {
    match parse(&["cleanlinks", "check", "--json", "https://example.com/"]) {
        CliCommand::Check { json, .. } => assert!(json),
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_validate() {
    match parse(&["cleanlinks", "validate", "ftp://x.com"]) {
        CliCommand::Validate { text } => assert_eq!(text, "ftp://x.com"),
        _ => panic!("expected Validate"),
    }
}

#[test]
fn cli_parse_config_show_path_reset() {
    assert!(matches!(
        parse(&["cleanlinks", "config", "show"]),
        CliCommand::Config {
            action: ConfigCommand::Show
        }
    ));
    assert!(matches!(
        parse(&["cleanlinks", "config", "path"]),
        CliCommand::Config {
            action: ConfigCommand::Path
        }
    ));
    assert!(matches!(
        parse(&["cleanlinks", "config", "reset"]),
        CliCommand::Config {
            action: ConfigCommand::Reset
        }
    ));
}

#[test]
fn cli_parse_config_set_mode() {
    match parse(&["cleanlinks", "config", "set-mode", "blacklist"]) {
        CliCommand::Config {
            action: ConfigCommand::SetMode { mode },
        } => assert_eq!(mode, Mode::Blacklist),
        _ => panic!("expected Config SetMode"),
    }
}

#[test]
fn cli_parse_config_set_lists() {
    match parse(&["cleanlinks", "config", "set-whitelist", "id,page"]) {
        CliCommand::Config {
            action: ConfigCommand::SetWhitelist { list },
        } => assert_eq!(list, "id,page"),
        _ => panic!("expected Config SetWhitelist"),
    }
    match parse(&["cleanlinks", "config", "set-blacklist", "ref"]) {
        CliCommand::Config {
            action: ConfigCommand::SetBlacklist { list },
        } => assert_eq!(list, "ref"),
        _ => panic!("expected Config SetBlacklist"),
    }
}

#[test]
fn cli_parse_completions_and_man() {
    match parse(&["cleanlinks", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
    assert!(matches!(parse(&["cleanlinks", "man"]), CliCommand::Man));
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    crate::cli::Cli::command().debug_assert();
}

mod config_runs {
    use crate::cli::commands::run_config;
    use crate::cli::ConfigCommand;
    use cleanlinks_core::config::{self, CleanLinksConfig};
    use cleanlinks_core::policy::Mode;

    #[test]
    fn set_commands_persist_to_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        run_config(&path, ConfigCommand::SetMode { mode: Mode::Whitelist }).unwrap();
        run_config(
            &path,
            ConfigCommand::SetWhitelist {
                list: "ID, id, Page".to_string(),
            },
        )
        .unwrap();
        run_config(
            &path,
            ConfigCommand::SetBlacklist {
                list: "Ref,fbclid".to_string(),
            },
        )
        .unwrap();

        let cfg = config::load_from(&path).unwrap();
        assert_eq!(cfg.policy.mode, Mode::Whitelist);
        assert_eq!(cfg.policy.whitelist, vec!["id", "page"]);
        assert_eq!(cfg.policy.blacklist, vec!["ref", "fbclid"]);
        assert!(cfg.lowercase_output);
    }

    #[test]
    fn reset_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        run_config(&path, ConfigCommand::SetMode { mode: Mode::Blacklist }).unwrap();
        run_config(&path, ConfigCommand::Reset).unwrap();
        assert_eq!(config::load_from(&path).unwrap(), CleanLinksConfig::default());
    }
}
