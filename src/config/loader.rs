// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!   .with_env_prefix()        REPO_VAULT__SECTION__KEY
//!   .with_github_env(vars)    GITHUB_USERNAME / GITHUB_TOKEN
//!   .set()                    CLI overrides
//!        |
//!        v
//!    build() --> Config
//! ```
//!
//! The loader is the only place that looks at the process environment.
//! Everything downstream receives the resolved [`Config`].

use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Environment variable holding the account name.
pub const USERNAME_VAR: &str = "GITHUB_USERNAME";

/// Environment variable holding the API token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    github_env: Vec<(String, String)>,
    overrides: Vec<(String, config::Value)>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            github_env: Vec::new(),
            overrides: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file that must exist.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Reads `PREFIX__SECTION__KEY` variables, e.g. `REPO_VAULT__PATHS__CLONES`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Maps `GITHUB_USERNAME` and `GITHUB_TOKEN` onto `[github]`.
    ///
    /// Takes the variables as an iterator so callers decide where they come
    /// from (`std::env::vars()` in the binary, fixed pairs in tests).
    #[must_use]
    pub fn with_github_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let target = match key.as_ref() {
                USERNAME_VAR => "github.username",
                TOKEN_VAR => "github.token",
                _ => continue,
            };
            self.github_env.push((target.to_string(), value.into()));
        }
        self
    }

    /// Sets a configuration override with the highest priority.
    #[must_use]
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Self {
        self.overrides.push((key.to_string(), value.into()));
        self
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing or contain invalid TOML.
    /// - The merged configuration does not match the `Config` structure.
    /// - Validation fails (e.g. empty `github.username`).
    pub fn build(self) -> Result<Config> {
        let mut builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };

        for (key, value) in self.github_env {
            builder = builder.set_override(key, value)?;
        }
        for (key, value) in self.overrides {
            builder = builder.set_override(key, value)?;
        }

        let cfg = builder.build()?;
        let mut config: Config = cfg.try_deserialize()?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load an environment file into the process environment.
///
/// With `path = None` a `.env` in the working directory is loaded if present.
/// An explicit path must exist.
///
/// # Errors
///
/// Returns a `ConfigError::EnvFile` if an explicit file is missing or any
/// file is malformed.
pub fn load_env_file(path: Option<&Path>) -> std::result::Result<(), ConfigError> {
    match path {
        Some(path) => dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
        None => match dotenvy::dotenv() {
            Ok(_) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(ConfigError::EnvFile {
                path: ".env".to_string(),
                message: e.to_string(),
            }),
        },
    }
}
