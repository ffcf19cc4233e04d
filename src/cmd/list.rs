// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for repo-vault.

use crate::cmd::fetch_selection;
use crate::config::Config;
use crate::error::Result;

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the repositories cannot be listed.
pub async fn run_list_command(config: &Config) -> Result<()> {
    let selected = fetch_selection(config).await?;

    if selected.is_empty() {
        println!("No repositories found");
    } else {
        for line in selected.summary_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
