// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backup command: list, rank, write the manifest, then run the pipeline.
//!
//! ```text
//! fetch_selection ──► write_manifest ──► Pipeline::run ──► summary (stdout)
//!    fatal               fatal            never fails
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use tracing::info;

use crate::cmd::fetch_selection;
use crate::config::Config;
use crate::error::{Result, VaultError};
use crate::git::backend::{GitMutation, ShellBackend};
use crate::manifest::write_manifest;
use crate::pipeline::{Pipeline, PipelineStats};
use crate::selection::SelectedSet;

/// Everything a finished backup produced.
#[derive(Debug)]
pub struct BackupRun {
    /// Repositories processed, in ranking order.
    pub selected: SelectedSet,
    /// Manifest written, `None` in dry-run mode.
    pub manifest: Option<PathBuf>,
    /// Barrier counts.
    pub stats: PipelineStats,
}

/// Run a backup for the day `date` with the given git backend.
///
/// # Errors
///
/// Returns an error if listing fails or the manifest cannot be written.
/// Per-repository failures are logged by the pipeline and never returned.
pub async fn execute_backup(
    config: Arc<Config>,
    backend: Arc<dyn GitMutation>,
    date: NaiveDate,
) -> Result<BackupRun> {
    let selected = fetch_selection(&config).await?;

    let manifest = if config.global.dry {
        info!(
            path = %config.paths.manifest_path(&config.github.username, date).display(),
            "[dry-run] Would write manifest"
        );
        None
    } else {
        let path = write_manifest(
            &config.paths.manifests,
            &config.github.username,
            date,
            &selected,
        )
        .map_err(VaultError::from)
        .context("failed to write manifest")?;
        Some(path)
    };

    let stats = Pipeline::new(config, backend).run(&selected).await;

    Ok(BackupRun {
        selected,
        manifest,
        stats,
    })
}

/// Main handler for the backup command.
///
/// Uses the `git` executable and today's local date, then prints the ranked
/// summary once every worker has finished.
///
/// # Errors
///
/// Returns an error if `git` is missing (outside dry-run mode), listing fails
/// or the manifest cannot be written.
pub async fn run_backup_command(config: Arc<Config>) -> Result<()> {
    if !config.global.dry {
        ShellBackend::ensure_available().map_err(VaultError::from)?;
    }

    let today = Local::now().date_naive();
    let run = execute_backup(config, Arc::new(ShellBackend), today).await?;

    for line in run.selected.summary_lines() {
        println!("{line}");
    }
    Ok(())
}
