// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, GithubConfig, PathsConfig, PipelineConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Default hosting API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default host serving clone URLs.
pub const DEFAULT_HOST: &str = "github.com";

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log what would be cloned and archived without touching the disk.
    pub dry: bool,
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file. No file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// Hosting account and endpoints.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// Account whose repositories are listed and cloned.
    pub username: String,
    /// API token. Empty means unauthenticated requests.
    pub token: String,
    /// API root, without trailing slash.
    pub api_url: String,
    /// Host used to build `https://{host}/{username}/{repo}.git`.
    pub host: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            token: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
        }
    }
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("username", &self.username)
            .field("token", &if self.token.is_empty() { "" } else { "[hidden]" })
            .field("api_url", &self.api_url)
            .field("host", &self.host)
            .finish()
    }
}

/// Fan-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// How many of the most recently pushed repositories to back up.
    pub max_repositories: usize,
    /// Upper bound on simultaneously running workers. Unbounded when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_repositories: crate::selection::MAX_SELECTED,
            max_concurrent: None,
        }
    }
}
