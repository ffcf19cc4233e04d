// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! prefix/            (optional, defaults to the working directory)
//!   clones/{repo}/
//!   archives/{repo}.zip
//!   csv/{username}_{YYYY-MM-DD}.csv
//! ```
//!
//! Relative directories are resolved against `prefix` when it is set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root for all relative output directories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PathBuf>,
    /// Working copies, one directory per repository.
    pub clones: PathBuf,
    /// Zip snapshots, one file per repository.
    pub archives: PathBuf,
    /// CSV manifests, one file per user and day.
    pub manifests: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            clones: PathBuf::from("clones"),
            archives: PathBuf::from("archives"),
            manifests: PathBuf::from("csv"),
        }
    }
}

impl PathsConfig {
    /// Resolve relative directories against `prefix`.
    pub fn resolve(&mut self) {
        let Some(prefix) = self.prefix.clone() else {
            return;
        };

        for dir in [&mut self.clones, &mut self.archives, &mut self.manifests] {
            if dir.is_relative() {
                *dir = prefix.join(&*dir);
            }
        }
    }

    /// Working copy directory for a repository.
    #[must_use]
    pub fn clone_dir(&self, repo: &str) -> PathBuf {
        self.clones.join(repo)
    }

    /// Archive file for a repository.
    #[must_use]
    pub fn archive_path(&self, repo: &str) -> PathBuf {
        self.archives.join(format!("{repo}.zip"))
    }

    /// Manifest file for a user on a given day.
    #[must_use]
    pub fn manifest_path(&self, username: &str, date: NaiveDate) -> PathBuf {
        manifest_file(&self.manifests, username, date)
    }
}

/// `{dir}/{username}_{YYYY-MM-DD}.csv`
pub(crate) fn manifest_file(dir: &Path, username: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{username}_{}.csv", date.format("%Y-%m-%d")))
}
