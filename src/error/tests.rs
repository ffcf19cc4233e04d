// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    ArchiveError, ConfigError, GitError, ProcessError, TransportError, VaultError, VaultResult,
};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "github".to_string(),
        key: "username".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'username' in section '[github]'");
}

#[test]
fn test_http_error_display() {
    let err = VaultError::from(TransportError::HttpError {
        status: 401,
        url: "https://api.github.com/users/octocat/repos".to_string(),
    });
    insta::assert_snapshot!(err.to_string(), @"transport error: http error 401: https://api.github.com/users/octocat/repos");
}

#[test]
fn test_git_error_display() {
    let err = GitError::CommandFailed {
        command: "git pull --quiet".to_string(),
        message: "fatal: not a git repository".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"git command failed: git pull --quiet - fatal: not a git repository");
}

#[test]
fn test_archive_error_path() {
    let err = ArchiveError::OpenSource {
        path: "clones/demo/README.md".to_string(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };
    assert_eq!(err.path(), "clones/demo/README.md");
}

#[test]
fn test_sub_errors_are_boxed() {
    let err = VaultError::from(ProcessError::ExecutableNotFound {
        name: "git".to_string(),
    });
    assert!(matches!(err, VaultError::Process(_)));
}

#[test]
fn test_vault_error_size() {
    // Every variant is a single Box
    let size = std::mem::size_of::<VaultError>();
    assert!(size <= 24, "VaultError is {size} bytes, expected <= 24");
}

#[test]
fn test_vault_result_size() {
    let size = std::mem::size_of::<VaultResult<()>>();
    assert!(size <= 24, "VaultResult<()> is {size} bytes, expected <= 24");
}
