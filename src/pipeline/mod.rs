// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fan-out of per-repository workers behind a join barrier.
//!
//! ```text
//! Pipeline::run(selected)
//!   for each record:  JoinSet::spawn
//!        |              [permit]   only when pipeline.max_concurrent is set
//!        v
//!   spawn_blocking, span "worker"
//!     synchronize(clone, pull, fetch)   failures logged
//!     create_archive(clone_dir, zip)    always attempted
//!        |
//!        v
//!   join_next() until empty             barrier, panics counted
//!        |
//!        v
//!   PipelineStats
//! ```

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, warn};

use crate::archive::create_archive;
use crate::config::Config;
use crate::git::backend::GitMutation;
use crate::git::sync::synchronize;
use crate::selection::SelectedSet;

/// Counts collected at the barrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Workers spawned.
    pub tasks: usize,
    /// Archives written.
    pub archived: usize,
    /// Archives that failed.
    pub archive_failures: usize,
    /// Workers that panicked.
    pub panicked: usize,
}

/// How a single worker ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerOutcome {
    Archived,
    ArchiveFailed,
    DryRun,
}

/// Runs one worker per selected repository and waits for all of them.
pub struct Pipeline {
    config: Arc<Config>,
    backend: Arc<dyn GitMutation>,
    semaphore: Option<Arc<Semaphore>>,
    dry_run: bool,
}

impl Pipeline {
    /// Build a pipeline from the resolved configuration.
    ///
    /// `pipeline.max_concurrent` bounds the number of running workers and
    /// `global.dry` turns workers into loggers.
    #[must_use]
    pub fn new(config: Arc<Config>, backend: Arc<dyn GitMutation>) -> Self {
        let semaphore = config
            .pipeline
            .max_concurrent
            .map(|n| Arc::new(Semaphore::new(n)));
        let dry_run = config.global.dry;
        Self {
            config,
            backend,
            semaphore,
            dry_run,
        }
    }

    /// Returns whether dry-run mode is enabled.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Synchronize and archive every repository in `selected`.
    ///
    /// Returns after every worker has finished. Worker failures and panics
    /// are logged and counted, never returned.
    pub async fn run(&self, selected: &SelectedSet) -> PipelineStats {
        let mut set = JoinSet::new();

        for record in selected {
            let name = record.name.clone();
            let config = Arc::clone(&self.config);
            let backend = Arc::clone(&self.backend);
            let semaphore = self.semaphore.clone();
            let dry_run = self.dry_run;

            set.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                tokio::task::spawn_blocking(move || {
                    let _span = info_span!("worker", repo = %name).entered();
                    if dry_run {
                        log_dry_run(&config, &name);
                        WorkerOutcome::DryRun
                    } else {
                        process_repository(&config, backend.as_ref(), &name)
                    }
                })
                .await
            });
        }

        let mut stats = PipelineStats {
            tasks: set.len(),
            ..PipelineStats::default()
        };

        while let Some(result) = set.join_next().await {
            match result.and_then(|inner| inner) {
                Ok(WorkerOutcome::Archived) => stats.archived += 1,
                Ok(WorkerOutcome::ArchiveFailed) => stats.archive_failures += 1,
                Ok(WorkerOutcome::DryRun) => {}
                Err(e) => {
                    stats.panicked += 1;
                    error!(error = %e, "worker panicked");
                }
            }
        }

        info!(
            tasks = stats.tasks,
            archived = stats.archived,
            archive_failures = stats.archive_failures,
            panicked = stats.panicked,
            "pipeline finished"
        );
        stats
    }
}

fn process_repository(config: &Config, backend: &dyn GitMutation, name: &str) -> WorkerOutcome {
    let dir = config.paths.clone_dir(name);
    let url = config.clone_url(name);

    let report = synchronize(backend, name, &dir, &url);
    if report.is_total_failure() {
        warn!(repo = name, "every sync step failed, archiving what is on disk");
    }

    let target = config.paths.archive_path(name);
    match create_archive(&dir, &target) {
        Ok(_) => WorkerOutcome::Archived,
        Err(e) => {
            error!(repo = name, error = %e, "archive failed");
            WorkerOutcome::ArchiveFailed
        }
    }
}

fn log_dry_run(config: &Config, name: &str) {
    info!(
        repo = name,
        url = %config.clone_url(name),
        dir = %config.paths.clone_dir(name).display(),
        archive = %config.paths.archive_path(name).display(),
        "[dry-run] Would synchronize and archive"
    );
}

#[cfg(test)]
mod tests;
