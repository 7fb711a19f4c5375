//! `cleanlinks check <url>` – homoglyph report.

use anyhow::Result;
use cleanlinks_core::detect;
use std::process::ExitCode;

/// Prints the detector report. Exits non-zero when the host is suspicious.
pub fn run_check(url: &str, json: bool) -> Result<ExitCode> {
    let report = detect(url);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.suspicious {
        println!("{}", report.warning());
    } else if report.domain.is_empty() {
        println!("no host to check in {url:?}");
    } else {
        println!("{}: no suspicious characters", report.domain);
    }

    if report.suspicious {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
