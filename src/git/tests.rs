// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::backend::{GitMutation, ShellBackend, is_working_copy};
use super::sync::{StepOutcome, SyncStep, synchronize};
use crate::error::GitError;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Records every call and fails the steps listed in `failing`.
struct ScriptedBackend {
    failing: Vec<SyncStep>,
    calls: Mutex<Vec<SyncStep>>,
}

impl ScriptedBackend {
    fn failing(failing: &[SyncStep]) -> Self {
        Self {
            failing: failing.to_vec(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, step: SyncStep) -> Result<(), GitError> {
        self.calls.lock().unwrap().push(step);
        if self.failing.contains(&step) {
            Err(GitError::CommandFailed {
                command: format!("git {step}"),
                message: "scripted failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl GitMutation for ScriptedBackend {
    fn clone_repo(&self, _url: &str, _dest: &Path) -> Result<(), GitError> {
        self.record(SyncStep::Clone)
    }

    fn pull(&self, _repo_path: &Path) -> Result<(), GitError> {
        self.record(SyncStep::Pull)
    }

    fn fetch(&self, _repo_path: &Path) -> Result<(), GitError> {
        self.record(SyncStep::Fetch)
    }
}

/// Create a repository with one commit. Uses shell git to stay independent
/// of gix internals.
fn init_origin(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)?;
    let run = |args: &[&str]| -> std::io::Result<()> {
        let output = Command::new("git").args(args).current_dir(path).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ))
        }
    };
    run(&["init", "--quiet"])?;
    run(&["config", "user.email", "test@example.com"])?;
    run(&["config", "user.name", "Test"])?;
    std::fs::write(path.join("README.md"), "# origin\n")?;
    run(&["add", "README.md"])?;
    run(&["commit", "--quiet", "-m", "Initial commit"])?;
    Ok(())
}

#[test]
fn test_all_steps_run_in_order() {
    let backend = ScriptedBackend::failing(&[]);
    let report = synchronize(&backend, "demo", Path::new("clones/demo"), "url");

    assert_eq!(*backend.calls.lock().unwrap(), SyncStep::ALL);
    assert_eq!(report.repository(), "demo");
    assert!(report.failures().next().is_none());
    assert!(!report.is_total_failure());
}

#[test]
fn test_clone_failure_does_not_block_pull_or_fetch() {
    let backend = ScriptedBackend::failing(&[SyncStep::Clone]);
    let report = synchronize(&backend, "demo", Path::new("clones/demo"), "url");

    assert_eq!(*backend.calls.lock().unwrap(), SyncStep::ALL);
    assert!(matches!(
        report.outcome(SyncStep::Clone),
        Some(StepOutcome::Failed(_))
    ));
    assert!(report.outcome(SyncStep::Pull).is_some_and(StepOutcome::is_success));
    assert!(report.outcome(SyncStep::Fetch).is_some_and(StepOutcome::is_success));
}

#[test]
fn test_pull_failure_does_not_block_fetch() {
    let backend = ScriptedBackend::failing(&[SyncStep::Pull]);
    let report = synchronize(&backend, "demo", Path::new("clones/demo"), "url");

    let failed: Vec<_> = report.failures().map(|(step, _)| step).collect();
    assert_eq!(failed, vec![SyncStep::Pull]);
    assert_eq!(backend.calls.lock().unwrap().len(), 3);
}

#[test]
fn test_every_step_failing_is_total_failure() {
    let backend = ScriptedBackend::failing(&SyncStep::ALL);
    let report = synchronize(&backend, "demo", Path::new("clones/demo"), "url");

    assert!(report.is_total_failure());
    assert_eq!(report.failures().count(), 3);
}

#[test]
fn test_step_names() {
    let names: Vec<_> = SyncStep::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(names, ["clone", "pull", "fetch"]);
}

#[test]
fn test_shell_backend_missing_directory_is_spawn_failure() {
    let temp = temp_dir();
    let err = ShellBackend.pull(&temp.path().join("absent")).unwrap_err();
    assert!(matches!(err, GitError::SpawnFailed { .. }));
}

#[test]
fn test_shell_backend_non_repository_is_command_failure() {
    let temp = temp_dir();
    let err = ShellBackend.fetch(temp.path()).unwrap_err();
    assert!(matches!(err, GitError::CommandFailed { .. }));
}

#[test]
fn test_synchronize_fresh_clone_then_rerun() {
    let temp = temp_dir();
    let origin = temp.path().join("origin");
    init_origin(&origin).unwrap();
    let url = origin.to_str().unwrap();
    let dest = temp.path().join("clones/demo");

    assert!(!is_working_copy(&dest));
    let first = synchronize(&ShellBackend, "demo", &dest, url);
    assert!(first.failures().next().is_none(), "{first:?}");
    assert!(is_working_copy(&dest));
    assert_eq!(
        std::fs::read_to_string(dest.join("README.md")).unwrap(),
        "# origin\n"
    );

    // Second run: clone collides with the existing copy, pull and fetch still work.
    let second = synchronize(&ShellBackend, "demo", &dest, url);
    let failed: Vec<_> = second.failures().map(|(step, _)| step).collect();
    assert_eq!(failed, vec![SyncStep::Clone]);
}

#[test]
fn test_synchronize_unreachable_remote_fails_every_step() {
    let temp = temp_dir();
    let dest = temp.path().join("clones/ghost");
    let url = temp.path().join("no-such-origin");

    let report = synchronize(&ShellBackend, "ghost", &dest, url.to_str().unwrap());
    assert!(report.is_total_failure());
    assert!(!dest.exists());
}
