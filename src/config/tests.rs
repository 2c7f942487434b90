//! Tests for config functionality.

use crate::config::{Config, DEFAULT_LOCK_TIMEOUT, DEFAULT_SWEEP_INTERVAL};
use crate::error::LobbyLockError;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.sweep_interval_ms, 60_000);
    assert_eq!(config.default_timeout_ms, 5_000);
    assert_eq!(config.sweep_interval(), DEFAULT_SWEEP_INTERVAL);
    assert_eq!(config.default_timeout(), DEFAULT_LOCK_TIMEOUT);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let config = Config::from_yaml("default_timeout_ms: 1500").unwrap();

    assert_eq!(config.default_timeout(), Duration::from_millis(1500));
    assert_eq!(config.sweep_interval_ms, 60_000);
}

#[test]
fn test_zero_sweep_interval_is_valid() {
    let config = Config::from_yaml("sweep_interval_ms: 0").unwrap();
    assert_eq!(config.sweep_interval(), Duration::ZERO);
}

#[test]
fn test_parse_yaml_with_unknown_fields() {
    // Unknown fields should be silently ignored for forward compatibility
    let yaml = r#"
sweep_interval_ms: 250
unknown_field: "some value"
another_unknown:
  nested: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.sweep_interval_ms, 250);
    assert_eq!(config.default_timeout_ms, 5_000);
}

#[test]
fn test_validate_zero_default_timeout() {
    let result = Config::from_yaml("default_timeout_ms: 0");

    let err = result.unwrap_err();
    assert!(matches!(err, LobbyLockError::ConfigError(_)));
    assert!(err.to_string().contains("default_timeout_ms"));
    assert!(err.to_string().contains("greater than 0"));
}

#[test]
fn test_parse_invalid_yaml_type() {
    let err = Config::from_yaml("sweep_interval_ms: soon").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_to_yaml() {
    let config = Config {
        sweep_interval_ms: 10,
        default_timeout_ms: 20,
    };
    let yaml = config.to_yaml().unwrap();

    assert!(yaml.contains("sweep_interval_ms: 10"));
    assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_config_load_from_file() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "sweep_interval_ms: 30000").unwrap();
    writeln!(file, "default_timeout_ms: 750").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.sweep_interval_ms, 30_000);
    assert_eq!(config.default_timeout_ms, 750);
}

#[test]
fn test_config_load_missing_file() {
    let result = Config::load("/nonexistent/path/lobbylock.yaml");

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), crate::exit_codes::CONFIG_FAILURE);
    assert!(err.to_string().contains("failed to read config file"));
}
