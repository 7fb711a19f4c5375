pub mod config;
pub mod error;
pub mod logging;

pub mod guard;
pub mod homoglyph;
pub mod pipeline;
pub mod policy;
pub mod sanitize;
pub mod validate;

pub use error::CleanError;
pub use homoglyph::{detect, DomainReport};
pub use pipeline::{process, CallerProfile, Outcome};
pub use policy::{Mode, Policy};
pub use sanitize::clean;
pub use validate::is_valid_url;
