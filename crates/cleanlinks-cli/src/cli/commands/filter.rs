//! `cleanlinks filter` – the page copy-listener flow over stdin.

use anyhow::Result;
use cleanlinks_core::config::CleanLinksConfig;
use cleanlinks_core::guard::CopyEventHandler;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use crate::cli::PolicyArgs;

/// Echoes every stdin line, replacing URLs with their cleaned form. Never fails on content.
pub fn run_filter(cfg: &CleanLinksConfig, origin: Option<&str>, overrides: &PolicyArgs) -> Result<ExitCode> {
    filter_lines(cfg, origin, overrides, io::stdin().lock(), &mut io::stdout().lock())?;
    Ok(ExitCode::SUCCESS)
}

pub fn filter_lines<R: BufRead, W: Write>(
    cfg: &CleanLinksConfig,
    origin: Option<&str>,
    overrides: &PolicyArgs,
    input: R,
    out: &mut W,
) -> Result<()> {
    let policy = overrides.apply(cfg.policy.clone());
    let handler = CopyEventHandler::new(policy, cfg.restricted_sites.clone());

    for line in input.lines() {
        let line = line?;
        let outcome = handler.handle(origin, &line);
        match outcome.as_ref().and_then(|o| o.cleaned_url()) {
            Some(url) => writeln!(out, "{url}")?,
            None => writeln!(out, "{line}")?,
        }
    }
    Ok(())
}
