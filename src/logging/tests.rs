// repo-vault: GitHub repository snapshot tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use crate::config::types::GlobalConfig;
use std::path::PathBuf;

#[test]
fn test_log_level_range() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(5), Some(LogLevel::TRACE));
    assert_eq!(LogLevel::from_u8(6), None);
    assert!(LogLevel::new(9).is_err());
}

#[test]
fn test_log_level_filters_keep_dependencies_quiet() {
    insta::assert_snapshot!(LogLevel::INFO.to_filter_string(), @"warn,repo_vault=info");
    insta::assert_snapshot!(LogLevel::DEBUG.to_filter_string(), @"warn,repo_vault=debug");
    assert_eq!(LogLevel::SILENT.to_filter_string(), "off");
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(ok, LogLevel::DEBUG);
    assert!(serde_json::from_str::<LogLevel>("7").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_file_level(LogLevel::TRACE)
        .with_log_file("logs/run.log".to_string())
        .build();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert_eq!(config.log_file(), Some("logs/run.log"));
}

#[test]
fn test_log_config_from_global_config() {
    let global = GlobalConfig {
        output_log_level: LogLevel::ERROR,
        file_log_level: LogLevel::TRACE,
        log_file: Some(PathBuf::from("logs/vault.log")),
        ..GlobalConfig::default()
    };

    let config = LogConfig::from(&global);
    assert_eq!(config.console_level(), LogLevel::ERROR);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert_eq!(config.log_file(), Some("logs/vault.log"));
}
