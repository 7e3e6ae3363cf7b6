//! Tests for config

use super::*;
use std::fs;
use tempfile::TempDir;

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_config_default_values() {
    let config = Config::default();
    assert_eq!(config.display.width, DEFAULT_WIDTH);
    assert!(!config.display.line_numbers);
    assert!(!config.display.plain);
    assert_eq!(config.display.max_str_len, None);
    assert_eq!(config.filter.output, "output.jsonl");
    assert_eq!(config.analysis.min_n, 1);
}

#[test]
fn test_missing_file_returns_defaults() {
    let dir = TempDir::new().unwrap();
    let result = load_config_from(&dir.path().join("nope.toml"));
    assert!(result.warning.is_none());
    assert_eq!(result.config.display.width, DEFAULT_WIDTH);
}

#[test]
fn test_valid_file_is_loaded() {
    let (_dir, path) = write_config(
        r#"
[display]
width = 120
line_numbers = true
max_str_len = 500

[filter]
output = "keep.jsonl"
"#,
    );
    let result = load_config_from(&path);
    assert!(result.warning.is_none());
    assert_eq!(result.config.display.width, 120);
    assert!(result.config.display.line_numbers);
    assert_eq!(result.config.display.max_str_len, Some(500));
    assert_eq!(result.config.filter.output, "keep.jsonl");
}

#[test]
fn test_malformed_toml_missing_bracket() {
    let (_dir, path) = write_config("[display\nwidth = 80");
    let result = load_config_from(&path);
    assert!(result.warning.unwrap().starts_with("Invalid config"));
    assert_eq!(result.config.display.width, DEFAULT_WIDTH);
}

#[test]
fn test_malformed_toml_missing_value() {
    let (_dir, path) = write_config("[display]\n width");
    let result = load_config_from(&path);
    assert!(result.warning.is_some());
}

#[test]
fn test_config_path_is_stable() {
    let path = get_config_path();
    assert_eq!(path, get_config_path());
    let path_str = path.to_string_lossy();
    assert!(
        path_str.ends_with("jlens/config.toml") || path_str.ends_with("jlens\\config.toml"),
        "Config path should end with jlens/config.toml, got: {}",
        path_str
    );
}
