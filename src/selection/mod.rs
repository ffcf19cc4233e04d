// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ranking and selection of the repositories to back up.
//!
//! ```text
//! Vec<RepositoryRecord>
//!   stable sort by pushed_at, newest first
//!   truncate(limit)          default limit = MAX_SELECTED (100)
//!        |
//!        v
//!   SelectedSet   read-only, ranks start at 1
//! ```

use crate::github::RepositoryRecord;

/// Default cap on how many repositories a run processes.
pub const MAX_SELECTED: usize = 100;

/// Repositories chosen for a run, most recently pushed first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSet {
    records: Vec<RepositoryRecord>,
}

impl SelectedSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepositoryRecord> {
        self.records.iter()
    }

    /// `(rank, record)` pairs with 1-based ranks.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &RepositoryRecord)> {
        self.records.iter().enumerate().map(|(i, r)| (i + 1, r))
    }

    /// Ranked summary lines, one per repository, in selection order.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        self.ranked()
            .map(|(rank, repo)| {
                format!(
                    "{rank}. {} (last modified {})",
                    repo.name,
                    repo.pushed_at_string()
                )
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a SelectedSet {
    type Item = &'a RepositoryRecord;
    type IntoIter = std::slice::Iter<'a, RepositoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Rank `records` by recency and keep the first `limit`.
///
/// The sort is stable: repositories pushed at the same instant keep their
/// input order.
#[must_use]
pub fn select_recent(mut records: Vec<RepositoryRecord>, limit: usize) -> SelectedSet {
    records.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));
    records.truncate(limit);
    SelectedSet { records }
}
