// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --env-file FILE   ← Env file instead of ./.env
//! --dry             ← Log instead of cloning and archiving
//! --log-level N     ← Console verbosity (0-5)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --destination DIR ← paths.prefix override
//!
//! Precedence: CLI flags > env vars > --config > repo-vault.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Environment file to load instead of `.env` in the current directory.
    #[arg(long = "env-file", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Lists and ranks repositories but only logs what would be cloned,
    /// written and archived.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, defaults to --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Base output directory (will contain clones/, archives/ and csv/).
    #[arg(short = 'd', long = "destination", value_name = "DIR")]
    pub prefix: Option<PathBuf>,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level", level.to_string()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level", level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string()));
        }

        if self.dry {
            overrides.push(("global.dry", "true".to_string()));
        }

        if let Some(ref prefix) = self.prefix {
            overrides.push(("paths.prefix", prefix.display().to_string()));
        }

        overrides
    }

    /// Builds the layered loader for these options.
    ///
    /// `vars` supplies `GITHUB_USERNAME` and `GITHUB_TOKEN`; the binary
    /// passes the process environment after the env file is loaded.
    #[must_use]
    pub fn config_loader<I, K, V>(&self, vars: I) -> ConfigLoader
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut loader = ConfigLoader::new().add_toml_file_optional("repo-vault.toml");
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        loader = loader.with_env_prefix("REPO_VAULT").with_github_env(vars);

        for (key, value) in self.to_config_overrides() {
            loader = loader.set(key, value);
        }
        loader
    }
}
