// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitMutation (write) --> ShellBackend (git CLI, blocking)
//! is_working_copy     --> gix (pure Rust, no subprocess)
//! ```

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::trace;

use crate::error::{GitError, ProcessError};

/// Git operations that modify a working copy.
///
/// Implementations block the calling thread; the pipeline runs them on the
/// blocking pool.
pub trait GitMutation: Send + Sync {
    /// Clone `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be started or exits unsuccessfully.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError>;

    /// Fetch and merge into the current branch of `repo_path`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be started or exits unsuccessfully.
    fn pull(&self, repo_path: &Path) -> Result<(), GitError>;

    /// Fetch remote refs of `repo_path` without merging.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be started or exits unsuccessfully.
    fn fetch(&self, repo_path: &Path) -> Result<(), GitError>;
}

/// Shell-based git backend using the git CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellBackend;

impl ShellBackend {
    /// Check that `git` is on PATH.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` when it is not.
    pub fn ensure_available() -> Result<(), ProcessError> {
        which::which("git")
            .map(|path| trace!(git = %path.display(), "found git"))
            .map_err(|_| ProcessError::ExecutableNotFound {
                name: "git".to_string(),
            })
    }

    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: Option<&Path>) -> Result<(), GitError> {
        let command = format!("git {}", args.join(" "));
        trace!(%command, cwd = ?cwd, "running");

        let mut cmd = Command::new("git");
        cmd.args(args)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdout(Stdio::null());
        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }

        let output = cmd
            .output()
            .map_err(|source| GitError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl GitMutation for ShellBackend {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        let dest_str = dest.to_str().ok_or_else(|| GitError::InvalidPath {
            command: "git clone".to_string(),
            path: dest.display().to_string(),
        })?;
        Self::git_command(&["clone", "--quiet", url, dest_str], None)
    }

    fn pull(&self, repo_path: &Path) -> Result<(), GitError> {
        Self::git_command(&["pull", "--quiet"], Some(repo_path))
    }

    fn fetch(&self, repo_path: &Path) -> Result<(), GitError> {
        Self::git_command(&["fetch", "--quiet"], Some(repo_path))
    }
}

/// Whether `path` already holds a git working copy (checked with gix).
#[must_use]
pub fn is_working_copy(path: &Path) -> bool {
    gix::open(path).is_ok()
}
