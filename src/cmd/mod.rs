// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   backup, list, options, configs
//! ```

pub mod backup;
pub mod config;
pub mod list;

use anyhow::Context;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, VaultError};
use crate::github::GithubClient;
use crate::selection::{SelectedSet, select_recent};

/// List the configured user's repositories and keep the most recent ones.
///
/// # Errors
///
/// Returns an error if the hosting API cannot be queried or answers with
/// something other than a repository list.
pub async fn fetch_selection(config: &Config) -> Result<SelectedSet> {
    let username = &config.github.username;
    let records = GithubClient::new(&config.github.api_url)
        .list_repositories(username, &config.github.token)
        .await
        .map_err(VaultError::from)
        .with_context(|| format!("failed to list repositories for {username}"))?;

    let listed = records.len();
    let selected = select_recent(records, config.pipeline.max_repositories);
    info!(
        user = %username,
        listed,
        selected = selected.len(),
        "repositories ranked"
    );
    Ok(selected)
}
