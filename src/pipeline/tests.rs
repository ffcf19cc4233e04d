// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Pipeline, PipelineStats};
use crate::config::Config;
use crate::error::GitError;
use crate::git::backend::GitMutation;
use crate::github::RepositoryRecord;
use crate::selection::{SelectedSet, select_recent};
use chrono::{TimeZone, Utc};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Clones by writing a single README. Repositories named in `broken` fail
/// every step, `panics_on` panics during clone.
#[derive(Default)]
struct FakeBackend {
    broken: Vec<String>,
    panics_on: Option<String>,
    delay: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
    finished: AtomicUsize,
}

impl FakeBackend {
    fn fail(&self, path: &Path) -> Result<(), GitError> {
        Err(GitError::CommandFailed {
            command: format!("git in {}", path.display()),
            message: "remote unreachable".to_string(),
        })
    }
}

impl GitMutation for FakeBackend {
    fn clone_repo(&self, _url: &str, dest: &Path) -> Result<(), GitError> {
        let name = repo_name(dest);
        if self.panics_on.as_deref() == Some(name.as_str()) {
            panic!("backend exploded on {name}");
        }

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.active.fetch_sub(1, Ordering::SeqCst);

        if self.broken.contains(&name) {
            return self.fail(dest);
        }
        std::fs::create_dir_all(dest).unwrap();
        std::fs::write(dest.join("README.md"), format!("# {name}\n")).unwrap();
        Ok(())
    }

    fn pull(&self, repo_path: &Path) -> Result<(), GitError> {
        if self.broken.contains(&repo_name(repo_path)) {
            return self.fail(repo_path);
        }
        Ok(())
    }

    fn fetch(&self, repo_path: &Path) -> Result<(), GitError> {
        self.finished.fetch_add(1, Ordering::SeqCst);
        if self.broken.contains(&repo_name(repo_path)) {
            return self.fail(repo_path);
        }
        Ok(())
    }
}

fn config(root: &Path, extra: &str) -> Arc<Config> {
    let toml = format!(
        "[github]\nusername = 'octocat'\n[paths]\nprefix = '{}'\n{extra}",
        root.display()
    );
    Arc::new(Config::parse(&toml).unwrap())
}

fn selection(names: &[&str]) -> SelectedSet {
    let records = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let day = u32::try_from(i % 28).unwrap() + 1;
            RepositoryRecord::new(*name, Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
        })
        .collect();
    select_recent(records, 100)
}

fn entry_count(archive: &Path) -> usize {
    let file = std::fs::File::open(archive).unwrap();
    zip::ZipArchive::new(file).unwrap().len()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failing_repository_does_not_affect_others() {
    let temp = temp_dir();
    let config = config(temp.path(), "");
    let backend = Arc::new(FakeBackend {
        broken: vec!["broken".to_string()],
        ..FakeBackend::default()
    });

    let stats = Pipeline::new(Arc::clone(&config), backend)
        .run(&selection(&["alpha", "broken", "gamma"]))
        .await;

    assert_eq!(
        stats,
        PipelineStats {
            tasks: 3,
            archived: 3,
            archive_failures: 0,
            panicked: 0,
        }
    );
    assert_eq!(entry_count(&config.paths.archive_path("alpha")), 1);
    assert_eq!(entry_count(&config.paths.archive_path("gamma")), 1);
    // Nothing was cloned, so its archive is empty.
    assert_eq!(entry_count(&config.paths.archive_path("broken")), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_run_waits_for_slow_workers() {
    let temp = temp_dir();
    let config = config(temp.path(), "");
    let backend = Arc::new(FakeBackend {
        delay: Duration::from_millis(200),
        ..FakeBackend::default()
    });
    let names = ["one", "two", "three", "four"];

    let stats = Pipeline::new(Arc::clone(&config), Arc::clone(&backend) as Arc<dyn GitMutation>)
        .run(&selection(&names))
        .await;

    assert_eq!(backend.finished.load(Ordering::SeqCst), names.len());
    assert_eq!(stats.archived, names.len());
    for name in names {
        assert!(config.paths.archive_path(name).is_file(), "{name}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_cap_bounds_running_workers() {
    let temp = temp_dir();
    let config = config(temp.path(), "[pipeline]\nmax_concurrent = 2\n");
    let backend = Arc::new(FakeBackend {
        delay: Duration::from_millis(50),
        ..FakeBackend::default()
    });

    let stats = Pipeline::new(config, Arc::clone(&backend) as Arc<dyn GitMutation>)
        .run(&selection(&["a", "b", "c", "d", "e", "f"]))
        .await;

    assert_eq!(stats.archived, 6);
    let peak = backend.peak.load(Ordering::SeqCst);
    assert!((1..=2).contains(&peak), "peak = {peak}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_panicking_worker_is_counted() {
    let temp = temp_dir();
    let config = config(temp.path(), "");
    let backend = Arc::new(FakeBackend {
        panics_on: Some("cursed".to_string()),
        ..FakeBackend::default()
    });

    let stats = Pipeline::new(Arc::clone(&config), backend)
        .run(&selection(&["fine", "cursed"]))
        .await;

    assert_eq!(stats.tasks, 2);
    assert_eq!(stats.panicked, 1);
    assert_eq!(stats.archived, 1);
    assert!(config.paths.archive_path("fine").is_file());
    assert!(!config.paths.archive_path("cursed").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_archive_failure_is_counted() {
    let temp = temp_dir();
    let config = config(temp.path(), "");
    // A file where the archive directory should be.
    std::fs::write(temp.path().join("archives"), "not a directory").unwrap();

    let stats = Pipeline::new(config, Arc::new(FakeBackend::default()))
        .run(&selection(&["alpha", "beta"]))
        .await;

    assert_eq!(stats.archive_failures, 2);
    assert_eq!(stats.archived, 0);
    assert!(temp.path().join("clones/alpha/README.md").is_file());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_dry_run_touches_nothing() {
    let temp = temp_dir();
    let config = config(temp.path(), "[global]\ndry = true\n");
    let backend = Arc::new(FakeBackend::default());

    let pipeline = Pipeline::new(config, Arc::clone(&backend) as Arc<dyn GitMutation>);
    assert!(pipeline.is_dry_run());
    let stats = pipeline.run(&selection(&["alpha", "beta"])).await;

    assert_eq!(
        stats,
        PipelineStats {
            tasks: 2,
            ..PipelineStats::default()
        }
    );
    assert_eq!(backend.finished.load(Ordering::SeqCst), 0);
    assert!(!temp.path().join("clones").exists());
    assert!(!temp.path().join("archives").exists());
}

#[tokio::test]
async fn test_empty_selection_returns_immediately() {
    let temp = temp_dir();
    let stats = Pipeline::new(config(temp.path(), ""), Arc::new(FakeBackend::default()))
        .run(&selection(&[]))
        .await;

    assert_eq!(stats, PipelineStats::default());
}
