// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for repo-vault.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. repo-vault.toml (cwd, optional)
//! 3. --config FILE...
//! 4. REPO_VAULT__* env vars
//! 5. GITHUB_USERNAME / GITHUB_TOKEN (after .env is loaded)
//! 6. CLI overrides (--dry, --destination)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITHUB_USERNAME=octocat                → github.username
//! GITHUB_TOKEN=ghp_xxx                   → github.token
//! REPO_VAULT__PATHS__CLONES=/srv/clones  → paths.clones
//! REPO_VAULT__PIPELINE__MAX_CONCURRENT=8 → pipeline.max_concurrent
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GithubConfig, GlobalConfig, PipelineConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Hosting account and endpoints.
    pub github: GithubConfig,
    /// Output locations.
    pub paths: PathsConfig,
    /// Fan-out settings.
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repo_vault::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("repo-vault.toml")
    ///     .with_env_prefix("REPO_VAULT")
    ///     .with_github_env(std::env::vars())
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve paths and validate required values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `github.username` is empty or a pipeline
    /// limit is zero.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.github.username = self.github.username.trim().to_string();
        if self.github.username.is_empty() {
            return Err(ConfigError::MissingKey {
                section: "github".to_string(),
                key: "username".to_string(),
            }
            .into());
        }

        if self.pipeline.max_repositories == 0 {
            return Err(invalid_pipeline_value("max_repositories").into());
        }
        if self.pipeline.max_concurrent == Some(0) {
            return Err(invalid_pipeline_value("max_concurrent").into());
        }

        self.github.api_url = self.github.api_url.trim_end_matches('/').to_string();
        self.paths.resolve();
        Ok(())
    }

    /// HTTPS clone URL for one of the user's repositories.
    #[must_use]
    pub fn clone_url(&self, repo: &str) -> String {
        format!(
            "https://{}/{}/{}.git",
            self.github.host, self.github.username, repo
        )
    }

    /// Format configuration options for display.
    ///
    /// The token is replaced by `[hidden]`. Output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert("global.dry", self.global.dry.to_string());
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert("global.log_file", log_file.display().to_string());
        }

        options.insert("github.username", self.github.username.clone());
        options.insert(
            "github.token",
            if self.github.token.is_empty() {
                String::new()
            } else {
                "[hidden]".to_string()
            },
        );
        options.insert("github.api_url", self.github.api_url.clone());
        options.insert("github.host", self.github.host.clone());

        if let Some(prefix) = &self.paths.prefix {
            options.insert("paths.prefix", prefix.display().to_string());
        }
        options.insert("paths.clones", self.paths.clones.display().to_string());
        options.insert("paths.archives", self.paths.archives.display().to_string());
        options.insert(
            "paths.manifests",
            self.paths.manifests.display().to_string(),
        );

        options.insert(
            "pipeline.max_repositories",
            self.pipeline.max_repositories.to_string(),
        );
        options.insert(
            "pipeline.max_concurrent",
            self.pipeline
                .max_concurrent
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn invalid_pipeline_value(key: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: "pipeline".to_string(),
        key: key.to_string(),
        message: "must be greater than zero".to_string(),
    }
}
