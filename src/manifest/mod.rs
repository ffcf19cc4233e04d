// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run manifest.
//!
//! ```text
//! {dir}/{username}_{YYYY-MM-DD}.csv
//!
//!   Username,RetrievalDate      header
//!   octocat,2024-03-02          run row
//!   B,2024-03-01T00:00:00Z      one row per selected repository
//!   C,2024-02-01T00:00:00Z
//!   ...
//! ```
//!
//! Written before any repository is touched; a failure here aborts the run.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::paths::manifest_file;
use crate::error::{PersistenceError, display_path};
use crate::selection::SelectedSet;

/// Header row of every manifest.
pub const HEADER: [&str; 2] = ["Username", "RetrievalDate"];

/// Create or overwrite the manifest for `username` on `date`.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns a `PersistenceError` if the directory or file cannot be created,
/// or if a row cannot be written or flushed.
pub fn write_manifest(
    dir: &Path,
    username: &str,
    date: NaiveDate,
    selected: &SelectedSet,
) -> Result<PathBuf, PersistenceError> {
    std::fs::create_dir_all(dir).map_err(|source| PersistenceError::CreateDir {
        path: display_path(dir),
        source,
    })?;

    let path = manifest_file(dir, username, date);
    let write_err = |e: &dyn std::fmt::Display| PersistenceError::Write {
        path: display_path(&path),
        message: e.to_string(),
    };

    let mut writer = csv::Writer::from_path(&path).map_err(|source| PersistenceError::Create {
        path: display_path(&path),
        source,
    })?;

    let retrieval_date = date.format("%Y-%m-%d").to_string();
    writer.write_record(HEADER).map_err(|e| write_err(&e))?;
    writer
        .write_record([username, retrieval_date.as_str()])
        .map_err(|e| write_err(&e))?;

    for repo in selected {
        writer
            .write_record([repo.name.as_str(), repo.pushed_at_string().as_str()])
            .map_err(|e| write_err(&e))?;
    }

    writer.flush().map_err(|e| write_err(&e))?;

    info!(
        path = %path.display(),
        repositories = selected.len(),
        "manifest written"
    );
    Ok(path)
}
