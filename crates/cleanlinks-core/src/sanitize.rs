//! URL sanitizer: strips query parameters and fragments according to a [`Policy`].

use url::Url;

use crate::error::CleanError;
use crate::policy::{Mode, Policy};

/// Cleans `url` under `policy`.
///
/// - `remove_all`: `scheme://host[:port]/path`, nothing else.
/// - `whitelist`: only whitelisted query parameters survive; fragment dropped.
/// - `blacklist`: blacklisted query parameters are removed; fragment dropped.
///
/// Keys are matched case-insensitively; values and key casing are untouched.
/// Returns [`CleanError::InvalidUrl`] unless `url` is an absolute `http`/`https` URL.
pub fn clean(url: &str, policy: &Policy) -> Result<String, CleanError> {
    let mut parsed = parse_http(url)?;

    let cleaned = match policy.mode {
        Mode::RemoveAll => origin_and_path(&parsed, url)?,
        Mode::Whitelist => {
            keep_whitelisted(&mut parsed, policy);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Mode::Blacklist => {
            drop_blacklisted(&mut parsed, policy);
            parsed.set_fragment(None);
            parsed.to_string()
        }
    };

    tracing::trace!(mode = %policy.mode, input = url, output = %cleaned, "cleaned url");
    Ok(cleaned)
}

/// Parses `url`, accepting only absolute `http`/`https` URLs with a host.
pub(crate) fn parse_http(url: &str) -> Result<Url, CleanError> {
    let parsed = Url::parse(url).map_err(|e| CleanError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CleanError::InvalidUrl(format!(
                "{url}: unsupported scheme {other:?}"
            )))
        }
    }
    if parsed.host_str().is_none() {
        return Err(CleanError::InvalidUrl(format!("{url}: missing host")));
    }
    Ok(parsed)
}

fn origin_and_path(parsed: &Url, input: &str) -> Result<String, CleanError> {
    let host = parsed
        .host_str()
        .ok_or_else(|| CleanError::InvalidUrl(format!("{input}: missing host")))?;
    let mut out = format!("{}://{}", parsed.scheme(), host);
    // `port()` is None for the scheme's default port.
    if let Some(port) = parsed.port() {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out.push_str(parsed.path());
    Ok(out)
}

fn keep_whitelisted(parsed: &mut Url, policy: &Policy) {
    // Same spelling collapses to one entry at its first position, last value wins.
    let mut kept: Vec<(String, String)> = Vec::new();
    for (key, value) in parsed.query_pairs() {
        if !policy.allows(&key) {
            continue;
        }
        match kept.iter_mut().find(|(k, _)| k.as_str() == &*key) {
            Some(slot) => slot.1 = value.into_owned(),
            None => kept.push((key.into_owned(), value.into_owned())),
        }
    }
    set_pairs(parsed, &kept);
}

fn drop_blacklisted(parsed: &mut Url, policy: &Policy) {
    let mut total = 0usize;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .inspect(|_| total += 1)
        .filter(|(key, _)| !policy.blocks(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    // Untouched queries keep their original encoding.
    if kept.len() == total {
        return;
    }
    set_pairs(parsed, &kept);
}

fn set_pairs(parsed: &mut Url, pairs: &[(String, String)]) {
    parsed.set_query(None);
    if !pairs.is_empty() {
        parsed
            .query_pairs_mut()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
}
