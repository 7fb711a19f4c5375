//! CLI command handlers, one file per command.

mod check;
mod clean;
mod completions;
mod config;
mod filter;
mod validate;

pub use check::run_check;
pub use clean::{run_clean, CleanOptions};
pub use completions::{run_completions, run_man};
pub use config::run_config;
pub use filter::run_filter;
pub use validate::run_validate;

#[cfg(test)]
pub use clean::clean_lines;
#[cfg(test)]
pub use filter::filter_lines;
