//! Error type for the URL sanitizer.

use thiserror::Error;

/// The only failure the sanitizer reports. Callers surface a message and stop;
/// there is no partial cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanError {
    /// Input is not an absolute `http`/`https` URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
