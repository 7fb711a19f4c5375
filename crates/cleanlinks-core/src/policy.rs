//! Cleaning policy: which query parameters survive.

use serde::{Deserialize, Serialize};

/// Tracking parameters stripped by the default blacklist.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
    "ref",
    "fbclid",
    "gclid",
];

/// How query parameters are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Drop every query parameter and the fragment.
    #[default]
    RemoveAll,
    /// Keep only parameters named in the whitelist.
    Whitelist,
    /// Drop only parameters named in the blacklist.
    Blacklist,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::RemoveAll => "remove_all",
            Mode::Whitelist => "whitelist",
            Mode::Blacklist => "blacklist",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    /// Accepts the snake_case names plus `-` spellings (`remove-all`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "remove_all" => Ok(Mode::RemoveAll),
            "whitelist" => Ok(Mode::Whitelist),
            "blacklist" => Ok(Mode::Blacklist),
            other => Err(format!(
                "unknown mode {other:?} (expected remove_all, whitelist or blacklist)"
            )),
        }
    }
}

/// Mode plus the two parameter-name lists. Names are compared lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub whitelist: Vec<String>,
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,
}

fn default_blacklist() -> Vec<String> {
    DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect()
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            mode: Mode::RemoveAll,
            whitelist: Vec::new(),
            blacklist: default_blacklist(),
        }
    }
}

impl Policy {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Lowercased, trimmed, deduplicated copy of both lists (first occurrence wins).
    pub fn normalized(&self) -> Self {
        Self {
            mode: self.mode,
            whitelist: normalize_names(&self.whitelist),
            blacklist: normalize_names(&self.blacklist),
        }
    }

    /// True if `key` is whitelisted, ignoring case.
    pub fn allows(&self, key: &str) -> bool {
        contains_ignore_case(&self.whitelist, key)
    }

    /// True if `key` is blacklisted, ignoring case.
    pub fn blocks(&self, key: &str) -> bool {
        contains_ignore_case(&self.blacklist, key)
    }
}

fn contains_ignore_case(names: &[String], key: &str) -> bool {
    let key = key.to_lowercase();
    names.iter().any(|n| n.to_lowercase() == key)
}

fn normalize_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim().to_lowercase();
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Parses a comma-separated list of parameter names as typed into a settings field.
///
/// Entries are trimmed and empty entries dropped; case is left alone.
pub fn parse_param_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_remove_all_with_tracking_blacklist() {
        let p = Policy::default();
        assert_eq!(p.mode, Mode::RemoveAll);
        assert!(p.whitelist.is_empty());
        assert_eq!(p.blacklist.len(), 8);
        assert!(p.blocks("utm_source"));
        assert!(p.blocks("gclid"));
        assert!(!p.blocks("id"));
    }

    #[test]
    fn matching_ignores_case() {
        let p = Policy {
            mode: Mode::Whitelist,
            whitelist: vec!["ID".to_string()],
            blacklist: vec!["utm_source".to_string()],
        };
        assert!(p.allows("id"));
        assert!(p.allows("Id"));
        assert!(p.blocks("UTM_SOURCE"));
    }

    #[test]
    fn mode_from_str_accepts_dashes_and_case() {
        assert_eq!("remove_all".parse::<Mode>(), Ok(Mode::RemoveAll));
        assert_eq!("Remove-All".parse::<Mode>(), Ok(Mode::RemoveAll));
        assert_eq!("WHITELIST".parse::<Mode>(), Ok(Mode::Whitelist));
        assert_eq!("blacklist".parse::<Mode>(), Ok(Mode::Blacklist));
        assert!("allowlist".parse::<Mode>().is_err());
    }

    #[test]
    fn mode_serializes_snake_case() {
        let json = serde_json::to_string(&Mode::RemoveAll).unwrap();
        assert_eq!(json, "\"remove_all\"");
        let m: Mode = serde_json::from_str("\"blacklist\"").unwrap();
        assert_eq!(m, Mode::Blacklist);
    }

    #[test]
    fn parse_param_list_trims_and_drops_empty() {
        assert_eq!(
            parse_param_list(" id, page ,,q , "),
            vec!["id".to_string(), "page".to_string(), "q".to_string()]
        );
        assert!(parse_param_list("").is_empty());
        assert!(parse_param_list(" , ,").is_empty());
    }

    #[test]
    fn normalized_lowercases_and_dedups() {
        let p = Policy {
            mode: Mode::Blacklist,
            whitelist: vec![" Id ".to_string(), "id".to_string()],
            blacklist: vec!["UTM_Source".to_string(), "utm_source".to_string(), "".to_string()],
        }
        .normalized();
        assert_eq!(p.whitelist, vec!["id".to_string()]);
        assert_eq!(p.blacklist, vec!["utm_source".to_string()]);
        assert_eq!(p.mode, Mode::Blacklist);
    }

    #[test]
    fn missing_blacklist_field_falls_back_to_default() {
        let p: Policy = serde_json::from_str(r#"{"mode":"whitelist","whitelist":["id"]}"#).unwrap();
        assert_eq!(p.mode, Mode::Whitelist);
        assert_eq!(p.blacklist, Policy::default().blacklist);
    }
}
