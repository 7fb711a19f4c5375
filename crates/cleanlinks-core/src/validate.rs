//! Guard check run before the sanitizer.

use url::Url;

/// True iff `text` parses as a URL whose scheme is exactly `http` or `https`.
pub fn is_valid_url(text: &str) -> bool {
    match Url::parse(text) {
        Ok(u) => matches!(u.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
