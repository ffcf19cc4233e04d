// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Best-effort synchronization of one working copy.
//!
//! ```text
//! synchronize(backend, name, dir, url)
//!   Clone --> Pull --> Fetch      every step always runs
//!     |        |        |
//!     v        v        v
//!   StepOutcome (Succeeded | Failed(GitError)), logged
//!        |
//!        v
//!   SyncReport   for logging only, never changes control flow
//! ```

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use super::backend::{GitMutation, is_working_copy};
use crate::error::GitError;

/// One of the three synchronization steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Clone,
    Pull,
    Fetch,
}

impl SyncStep {
    /// All steps in execution order.
    pub const ALL: [Self; 3] = [Self::Clone, Self::Pull, Self::Fetch];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::Pull => "pull",
            Self::Fetch => "fetch",
        }
    }
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single step.
#[derive(Debug)]
pub enum StepOutcome {
    Succeeded,
    Failed(GitError),
}

impl StepOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Per-step results for one repository.
#[derive(Debug)]
pub struct SyncReport {
    repository: String,
    steps: Vec<(SyncStep, StepOutcome)>,
}

impl SyncReport {
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    #[must_use]
    pub fn outcome(&self, step: SyncStep) -> Option<&StepOutcome> {
        self.steps.iter().find(|(s, _)| *s == step).map(|(_, o)| o)
    }

    /// Steps that failed, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = (SyncStep, &GitError)> {
        self.steps.iter().filter_map(|(step, outcome)| match outcome {
            StepOutcome::Failed(e) => Some((*step, e)),
            StepOutcome::Succeeded => None,
        })
    }

    /// True when no step succeeded.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.steps.iter().all(|(_, o)| !o.is_success())
    }
}

/// Clone, pull and fetch `name` into `dir`, recording every step.
///
/// No failure stops the chain. A clone failure on a directory that already
/// holds a working copy is the normal re-run case and is logged at debug
/// level; every other failure is logged as a warning.
pub fn synchronize(backend: &dyn GitMutation, name: &str, dir: &Path, url: &str) -> SyncReport {
    let already_cloned = is_working_copy(dir);
    let mut steps = Vec::with_capacity(SyncStep::ALL.len());

    for step in SyncStep::ALL {
        let result = match step {
            SyncStep::Clone => backend.clone_repo(url, dir),
            SyncStep::Pull => backend.pull(dir),
            SyncStep::Fetch => backend.fetch(dir),
        };

        let outcome = match result {
            Ok(()) => {
                debug!(repo = name, %step, "step succeeded");
                StepOutcome::Succeeded
            }
            Err(e) => {
                if step == SyncStep::Clone && already_cloned {
                    debug!(repo = name, %step, error = %e, "already cloned, updating in place");
                } else {
                    warn!(repo = name, %step, error = %e, "sync step failed");
                }
                StepOutcome::Failed(e)
            }
        };
        steps.push((step, outcome));
    }

    let report = SyncReport {
        repository: name.to_string(),
        steps,
    };
    if report.failures().next().is_none() {
        info!(repo = name, dir = %dir.display(), "synchronized");
    }
    report
}
