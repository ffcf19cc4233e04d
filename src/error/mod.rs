// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 VaultError (~24 bytes)
//!                        |
//!   +---------+---------+---------+---------+
//!   |         |         |         |         |         |
//!   v         v         v         v         v         v
//! Transport Persist    Git     Archive   Config   Process
//!   Box       Box      Box       Box      Box       Box
//!
//! Fatal:      Transport, Persistence, Config, Process
//! Per-repo:   Git (sync step, logged), Archive (aborts that archive)
//! ```

use std::path::Path;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`VaultError`].
pub type VaultResult<T> = std::result::Result<T, VaultError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Hosting API could not be reached or answered garbage.
    #[error("transport error: {0}")]
    Transport(#[from] Box<TransportError>),

    /// Manifest could not be written.
    #[error("persistence error: {0}")]
    Persistence(#[from] Box<PersistenceError>),

    /// A git step failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Archive creation failed.
    #[error("archive error: {0}")]
    Archive(#[from] Box<ArchiveError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// External process could not be used.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),
}

// --- From implementations for boxing ---

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for VaultError {
                fn from(err: $error) -> Self {
                    VaultError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    TransportError => Transport,
    PersistenceError => Persistence,
    GitError => Git,
    ArchiveError => Archive,
    ConfigError => Config,
    ProcessError => Process,
}

// --- Transport Errors ---

/// Hosting API errors. Always fatal for the run.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Body is not the expected JSON array of repositories.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// --- Persistence Errors ---

/// Manifest write errors. Fatal, raised before any repository is touched.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Manifest directory could not be created.
    #[error("failed to create manifest directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Manifest file could not be created.
    #[error("failed to create manifest '{path}': {source}")]
    Create {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A row could not be written or flushed.
    #[error("failed to write manifest '{path}': {message}")]
    Write { path: String, message: String },
}

// --- Git Errors ---

/// Git step errors. Recorded per step, never propagated out of a worker.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git could not be started (missing working directory, missing binary).
    #[error("failed to run {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Git ran and exited unsuccessfully.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Destination path is not valid UTF-8.
    #[error("invalid path for {command}: {path}")]
    InvalidPath { command: String, path: String },
}

// --- Archive Errors ---

/// Archive errors. Abort the archive of one repository only.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Target archive file could not be created.
    #[error("failed to create archive '{path}': {source}")]
    CreateTarget {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("failed to walk '{path}': {message}")]
    Walk { path: String, message: String },

    /// Source file could not be opened.
    #[error("failed to open '{path}': {source}")]
    OpenSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Zip entry could not be started or the archive could not be finalized.
    #[error("zip error on '{path}': {source}")]
    Zip {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Copying file bytes into the entry failed.
    #[error("failed to copy '{path}' into archive: {source}")]
    Copy {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveError {
    /// Path the failure is attributed to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::CreateTarget { path, .. }
            | Self::Walk { path, .. }
            | Self::OpenSource { path, .. }
            | Self::Zip { path, .. }
            | Self::Copy { path, .. } => path,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment file could not be loaded.
    #[error("failed to load env file '{path}': {message}")]
    EnvFile { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process lookup errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },
}

/// Render a path for error messages.
pub(crate) fn display_path(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests;
