//! Suspicious-domain detector.
//!
//! Flags hosts containing anything outside `[a-zA-Z0-9.-]`, which catches
//! homoglyph lookalikes such as a Cyrillic `а` standing in for Latin `a`.
//! The parser stores internationalized hosts as punycode, so they are decoded
//! back to Unicode before inspection. Advisory only: nothing here blocks.

use serde::Serialize;
use url::{Host, Url};

/// Result of inspecting a URL's host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainReport {
    pub suspicious: bool,
    /// Distinct offending characters, in order of first appearance.
    pub chars: Vec<char>,
    /// Host as a user would read it (Unicode form).
    pub domain: String,
}

impl DomainReport {
    /// User-facing phishing warning, e.g.
    /// `⚠️ PHISHING WARNING: Suspicious characters in "аpple.com": а`.
    pub fn warning(&self) -> String {
        let chars: Vec<String> = self.chars.iter().map(|c| c.to_string()).collect();
        format!(
            "⚠️ PHISHING WARNING: Suspicious characters in \"{}\": {}",
            self.domain,
            chars.join(", ")
        )
    }
}

/// Inspects the host of `url`. Unparsable input yields an empty, non-suspicious report.
pub fn detect(url: &str) -> DomainReport {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!(input = url, error = %e, "detector: unparsable url");
            return DomainReport::default();
        }
    };

    let domain = match parsed.host() {
        Some(Host::Domain(d)) => url::quirks::domain_to_unicode(d),
        Some(ip @ (Host::Ipv4(_) | Host::Ipv6(_))) => {
            return DomainReport {
                suspicious: false,
                chars: Vec::new(),
                domain: ip.to_string(),
            }
        }
        None => return DomainReport::default(),
    };

    let chars = offending_chars(&domain);
    if !chars.is_empty() {
        tracing::warn!(domain = %domain, chars = ?chars, "suspicious characters in host");
    }
    DomainReport {
        suspicious: !chars.is_empty(),
        chars,
        domain,
    }
}

fn offending_chars(domain: &str) -> Vec<char> {
    let mut out = Vec::new();
    for c in domain.chars() {
        let allowed = c.is_ascii_alphanumeric() || c == '.' || c == '-';
        if !allowed && !out.contains(&c) {
            out.push(c);
        }
    }
    out
}
