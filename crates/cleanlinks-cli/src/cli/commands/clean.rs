//! `cleanlinks clean [URL]...` – the keyboard-command/popup flow.

use anyhow::Result;
use cleanlinks_core::config::CleanLinksConfig;
use cleanlinks_core::{process, CallerProfile, Outcome};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use crate::cli::PolicyArgs;

#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    pub policy: PolicyArgs,
    /// `Some` overrides the configured `lowercase_output`.
    pub lowercase: Option<bool>,
    pub allow_suspicious: bool,
}

impl CleanOptions {
    fn profile(&self, cfg: &CleanLinksConfig) -> CallerProfile {
        let mut profile = cfg.interactive_profile();
        if let Some(lowercase) = self.lowercase {
            profile.lowercase = lowercase;
        }
        if self.allow_suspicious {
            profile.check_suspicious = false;
        }
        profile
    }
}

/// Counts from one `clean` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanSummary {
    pub total: usize,
    pub failures: usize,
}

impl CleanSummary {
    pub fn exit_code(&self) -> ExitCode {
        if self.failures > 0 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Cleans each URL (or each non-blank stdin line) and prints the result.
/// Exits non-zero if any input could not be cleaned.
pub fn run_clean(cfg: &CleanLinksConfig, urls: &[String], opts: &CleanOptions) -> Result<ExitCode> {
    let summary = clean_lines(cfg, urls, opts, io::stdin().lock(), &mut io::stdout().lock())?;
    Ok(summary.exit_code())
}

/// As [`run_clean`], reading from `input` when `urls` is empty and writing to `out`.
pub fn clean_lines<R: BufRead, W: Write>(
    cfg: &CleanLinksConfig,
    urls: &[String],
    opts: &CleanOptions,
    input: R,
    out: &mut W,
) -> Result<CleanSummary> {
    let policy = opts.policy.apply(cfg.policy.clone());
    let profile = opts.profile(cfg);
    tracing::debug!(mode = %policy.mode, ?profile, "clean");

    let inputs: Vec<String> = if urls.is_empty() {
        input
            .lines()
            .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
            .collect::<io::Result<_>>()?
    } else {
        urls.to_vec()
    };

    let mut summary = CleanSummary {
        total: inputs.len(),
        failures: 0,
    };
    for input in &inputs {
        let outcome = process(input, &policy, &profile);
        match &outcome {
            Outcome::Cleaned(url) => writeln!(out, "{url}")?,
            Outcome::AlreadyClean => writeln!(out, "{}", input.trim())?,
            _ => summary.failures += 1,
        }
        if let Some(msg) = outcome.message() {
            if outcome.is_error() {
                eprintln!("cleanlinks: {msg}");
            } else {
                tracing::info!(input = %input.trim(), "{msg}");
            }
        }
    }

    if summary.failures > 0 {
        tracing::warn!("{} of {} inputs not cleaned", summary.failures, summary.total);
    }
    Ok(summary)
}
