// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for repo-vault using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! repo-vault [global options] [command]
//! backup      (default)
//! list
//! options
//! configs
//! version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// GitHub repository snapshot tool
///
/// Lists a user's repositories, keeps the most recently pushed ones cloned
/// and up to date, and writes a zip snapshot of each.
#[derive(Debug, Parser)]
#[command(
    name = "repo-vault",
    author,
    version,
    about = "GitHub repository snapshot tool",
    long_about = "repo-vault Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Lists the repositories of GITHUB_USERNAME, ranks them by last\n\
                  push, writes a CSV manifest of the 100 most recent, then clones,\n\
                  pulls, fetches and zips each of them concurrently.\n\n\
                  Invoking `repo-vault -d some/prefix` runs a full backup into\n\
                  that directory. See `repo-vault <command> --help` for more\n\
                  information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from `repo-vault.toml` in the current directory\n\
                  if present, then from every --config file in order, then from\n\
                  REPO_VAULT__SECTION__KEY environment variables. GITHUB_USERNAME and\n\
                  GITHUB_TOKEN are read from the environment after `.env` (or\n\
                  --env-file) has been loaded. Command-line flags win over all of them."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute, `backup` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The command to run, with `backup` standing in for none.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Backup)
    }
}

/// Available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their resolved values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Lists and ranks repositories without cloning anything.
    List,

    /// Writes the manifest, then clones, updates and archives every selected repository.
    Backup,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
