// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{LogConfig, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_range() {
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(4), Some(LogLevel::DEBUG));
    assert_eq!(LogLevel::from_u8(42), None);
}

#[test]
fn test_log_level_tracing_mapping() {
    assert_eq!(LogLevel::SILENT.to_tracing_level(), None);
    assert_eq!(LogLevel::WARN.to_tracing_level(), Some(Level::WARN));
    assert_eq!(LogLevel::DUMP.to_tracing_level(), Some(Level::TRACE));
}

#[test]
fn test_log_level_directives_scope_to_crate() {
    assert_eq!(LogLevel::SILENT.directives(), "off");
    assert_eq!(LogLevel::WARN.directives(), "slnenv_rs=warn");
    assert_eq!(LogLevel::TRACE.directives(), "slnenv_rs=trace");
    assert_eq!(LogLevel::DUMP.directives(), "trace");
}

#[test]
fn test_log_level_ordering() {
    assert!(LogLevel::DEBUG > LogLevel::WARN);
    assert_eq!(LogLevel::INFO.to_string(), "info");
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("3").unwrap();
    assert_eq!(ok, LogLevel::INFO);
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.color());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_file_level(LogLevel::DEBUG)
        .with_log_file("logs/slnenv.log")
        .build();
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some(Path::new("logs/slnenv.log")));
}
