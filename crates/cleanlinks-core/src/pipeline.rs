//! Shared caller flow: the checks every entry point (keyboard command, popup
//! button, page copy listener) runs around the sanitizer.

use crate::homoglyph::{self, DomainReport};
use crate::policy::Policy;
use crate::sanitize;
use crate::validate::is_valid_url;

/// Hosts where the page-level copy listener stays inactive.
pub const DEFAULT_RESTRICTED_SITES: &[&str] = &["web.whatsapp.com", "wa.me"];

/// Per-call-site options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerProfile {
    /// Refuse to clean URLs whose host looks like a homoglyph lookalike.
    pub check_suspicious: bool,
    /// Lowercase the cleaned URL before handing it back.
    pub lowercase: bool,
}

impl CallerProfile {
    /// Keyboard command: warns on suspicious hosts, lowercases output.
    pub const fn command() -> Self {
        Self {
            check_suspicious: true,
            lowercase: true,
        }
    }

    /// Popup button; same behaviour as [`CallerProfile::command`].
    pub const fn popup() -> Self {
        Self::command()
    }

    /// Page copy listener: no suspicious check, case preserved.
    pub const fn copy_event() -> Self {
        Self {
            check_suspicious: false,
            lowercase: false,
        }
    }
}

/// What happened to one piece of input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Empty,
    NotAUrl,
    /// Copy happened on a restricted site; nothing was attempted.
    RestrictedSite,
    Suspicious(DomainReport),
    CleanFailed,
    AlreadyClean,
    Cleaned(String),
}

impl Outcome {
    /// User-visible status text. `None` where the caller stays silent.
    pub fn message(&self) -> Option<String> {
        let msg = match self {
            Outcome::Empty => "Clipboard is empty".to_string(),
            Outcome::NotAUrl => "Clipboard does not contain a valid URL".to_string(),
            Outcome::RestrictedSite => return None,
            Outcome::Suspicious(report) => report.warning(),
            Outcome::CleanFailed => "Unable to clean URL".to_string(),
            Outcome::AlreadyClean => "URL is already clean".to_string(),
            Outcome::Cleaned(_) => "URL cleaned and copied!".to_string(),
        };
        Some(msg)
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Outcome::Empty | Outcome::NotAUrl | Outcome::Suspicious(_) | Outcome::CleanFailed
        )
    }

    /// The URL to hand back: the cleaned one, or `None` if there is nothing new.
    pub fn cleaned_url(&self) -> Option<&str> {
        match self {
            Outcome::Cleaned(url) => Some(url),
            _ => None,
        }
    }
}

/// Runs one cleaning pass over `text` as the caller described by `profile` would.
pub fn process(text: &str, policy: &Policy, profile: &CallerProfile) -> Outcome {
    let text = text.trim();
    if text.is_empty() {
        return Outcome::Empty;
    }
    if !is_valid_url(text) {
        return Outcome::NotAUrl;
    }

    if profile.check_suspicious {
        let report = homoglyph::detect(text);
        if report.suspicious {
            return Outcome::Suspicious(report);
        }
    }

    let cleaned = match sanitize::clean(text, policy) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = %e, "clean failed");
            return Outcome::CleanFailed;
        }
    };

    if cleaned == text {
        return Outcome::AlreadyClean;
    }

    let cleaned = if profile.lowercase {
        cleaned.to_lowercase()
    } else {
        cleaned
    };
    tracing::debug!(output = %cleaned, "url cleaned");
    Outcome::Cleaned(cleaned)
}

/// True if `host` contains any entry of `restricted` (substring match, ASCII case-insensitive).
pub fn is_restricted_site<S: AsRef<str>>(host: &str, restricted: &[S]) -> bool {
    let host = host.trim().to_ascii_lowercase();
    restricted.iter().any(|r| {
        let r: &str = r.as_ref();
        let r = r.trim().to_ascii_lowercase();
        !r.is_empty() && host.contains(r.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Mode;

    #[test]
    fn empty_and_blank_text() {
        let p = Policy::default();
        assert_eq!(process("", &p, &CallerProfile::command()), Outcome::Empty);
        assert_eq!(process("  \n", &p, &CallerProfile::command()), Outcome::Empty);
    }

    #[test]
    fn non_url_text() {
        let p = Policy::default();
        assert_eq!(
            process("hello world", &p, &CallerProfile::popup()),
            Outcome::NotAUrl
        );
        assert_eq!(
            process("ftp://x.com/a", &p, &CallerProfile::popup()),
            Outcome::NotAUrl
        );
    }

    #[test]
    fn command_profile_lowercases() {
        let p = Policy::default().with_mode(Mode::Blacklist);
        let out = process(
            "https://X.com/Path?Id=AbC&utm_source=n",
            &p,
            &CallerProfile::command(),
        );
        assert_eq!(out, Outcome::Cleaned("https://x.com/path?id=abc".to_string()));
    }

    #[test]
    fn copy_event_profile_preserves_case() {
        let p = Policy::default().with_mode(Mode::Blacklist);
        let out = process(
            "https://x.com/Path?Id=AbC&utm_source=n",
            &p,
            &CallerProfile::copy_event(),
        );
        assert_eq!(out, Outcome::Cleaned("https://x.com/Path?Id=AbC".to_string()));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let p = Policy::default();
        let out = process("  https://x.com/a?b=1\n", &p, &CallerProfile::copy_event());
        assert_eq!(out, Outcome::Cleaned("https://x.com/a".to_string()));
    }

    #[test]
    fn already_clean_is_reported() {
        let p = Policy::default();
        let out = process("https://x.com/a", &p, &CallerProfile::command());
        assert_eq!(out, Outcome::AlreadyClean);
        assert!(!out.is_error());
        assert_eq!(out.message().as_deref(), Some("URL is already clean"));
    }

    #[test]
    fn suspicious_host_stops_interactive_callers() {
        let p = Policy::default();
        let out = process(
            "https://\u{0430}pple.com/?utm_source=x",
            &p,
            &CallerProfile::command(),
        );
        match &out {
            Outcome::Suspicious(report) => assert_eq!(report.chars, vec!['\u{0430}']),
            other => panic!("expected Suspicious, got {other:?}"),
        }
        assert!(out.is_error());
        assert!(out.message().unwrap().starts_with("⚠️ PHISHING WARNING"));
    }

    #[test]
    fn copy_event_ignores_suspicious_host() {
        let p = Policy::default();
        let out = process(
            "https://\u{0430}pple.com/a?utm_source=x",
            &p,
            &CallerProfile::copy_event(),
        );
        assert_eq!(out, Outcome::Cleaned("https://xn--pple-43d.com/a".to_string()));
    }

    #[test]
    fn messages_match_outcomes() {
        assert_eq!(
            Outcome::Empty.message().as_deref(),
            Some("Clipboard is empty")
        );
        assert_eq!(
            Outcome::NotAUrl.message().as_deref(),
            Some("Clipboard does not contain a valid URL")
        );
        assert_eq!(
            Outcome::CleanFailed.message().as_deref(),
            Some("Unable to clean URL")
        );
        assert_eq!(
            Outcome::Cleaned("https://x.com/".into()).message().as_deref(),
            Some("URL cleaned and copied!")
        );
        assert_eq!(Outcome::RestrictedSite.message(), None);
    }

    #[test]
    fn restricted_site_substring_match() {
        assert!(is_restricted_site("web.whatsapp.com", DEFAULT_RESTRICTED_SITES));
        assert!(is_restricted_site("api.wa.me", DEFAULT_RESTRICTED_SITES));
        assert!(!is_restricted_site("example.com", DEFAULT_RESTRICTED_SITES));
        assert!(!is_restricted_site("example.com", &[""]));
    }

    #[test]
    fn restricted_site_ignores_host_case() {
        assert!(is_restricted_site("WEB.WHATSAPP.COM", &["web.whatsapp.com"]));
        assert!(is_restricted_site("Web.WhatsApp.com", DEFAULT_RESTRICTED_SITES));
        assert!(is_restricted_site("web.whatsapp.com", &["WEB.WhatsApp.com"]));
    }
}
