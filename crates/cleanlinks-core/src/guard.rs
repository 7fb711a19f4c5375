//! Single-flight guard for the page-level copy listener, plus the handler that uses it.
//!
//! Clipboard reads and writes are asynchronous at the platform edge, so a second
//! copy event can arrive while the first pass is still writing back. The guard
//! drops such overlapping events instead of queueing them.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::pipeline::{self, CallerProfile, Outcome, DEFAULT_RESTRICTED_SITES};
use crate::policy::Policy;

/// Atomic "pass in progress" flag.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    busy: AtomicBool,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard. Returns `None` if a pass is already running.
    pub fn try_enter(&self) -> Option<EntryToken<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| EntryToken { guard: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the guard when dropped.
#[derive(Debug)]
pub struct EntryToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for EntryToken<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

/// Copy-event caller: restricted-site check, re-entrancy guard, then the
/// [`CallerProfile::copy_event`] pipeline.
#[derive(Debug)]
pub struct CopyEventHandler {
    policy: Policy,
    restricted_sites: Vec<String>,
    guard: ReentrancyGuard,
}

impl CopyEventHandler {
    pub fn new(policy: Policy, restricted_sites: Vec<String>) -> Self {
        Self {
            policy,
            restricted_sites,
            guard: ReentrancyGuard::new(),
        }
    }

    pub fn with_default_sites(policy: Policy) -> Self {
        let sites = DEFAULT_RESTRICTED_SITES.iter().map(|s| s.to_string()).collect();
        Self::new(policy, sites)
    }

    pub fn guard(&self) -> &ReentrancyGuard {
        &self.guard
    }

    /// Handles one copy event. `origin_host` is the page the text was copied on,
    /// when known. Returns `None` if another pass is still in flight.
    pub fn handle(&self, origin_host: Option<&str>, text: &str) -> Option<Outcome> {
        if let Some(host) = origin_host {
            if pipeline::is_restricted_site(host, self.restricted_sites.as_slice()) {
                return Some(Outcome::RestrictedSite);
            }
        }

        let Some(_token) = self.guard.try_enter() else {
            tracing::debug!("copy event dropped: pass already in flight");
            return None;
        };
        Some(pipeline::process(
            text,
            &self.policy,
            &CallerProfile::copy_event(),
        ))
    }
}
