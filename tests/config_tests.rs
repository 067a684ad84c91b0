//! Unit tests for configuration management
//!
//! These tests verify configuration parsing, defaults and validation without
//! requiring external services.

use std::io::Write;
use std::time::Duration;

use bridge_ledger_client::config::{ApiConfig, Config, ValidationConfig};
use bridge_ledger_client::{UnknownFields, DEFAULT_PAGE_SIZE};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn create_test_config() -> Config {
    Config {
        api: ApiConfig {
            base_url: "http://127.0.0.1:8080".to_string(),
            page_size: 50,
            request_timeout_ms: 5000,
        },
        validation: ValidationConfig {
            unknown_fields: UnknownFields::Ignore,
        },
    }
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(content.as_bytes()).expect("write temp config");
    file
}

// ============================================================================
// DEFAULTS
// ============================================================================

/// Test that the default configuration is valid
/// Why: The CLI falls back to it when only --api-url is given
#[test]
fn test_default_config_is_valid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.api.base_url, "http://127.0.0.1:8080");
    assert_eq!(config.page_size().get(), DEFAULT_PAGE_SIZE);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.validation.unknown_fields, UnknownFields::Reject);
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn test_config_validation_success() {
    assert!(create_test_config().validate().is_ok());
}

#[test]
fn test_config_rejects_invalid_base_url() {
    let mut config = create_test_config();
    config.api.base_url = "not a url".to_string();
    assert!(config.validate().is_err());

    config.api.base_url = "mailto:ops@example.com".to_string();
    assert!(config.validate().is_err());
}

/// Test that the page size must lie within 1..=100
#[test]
fn test_config_rejects_page_size_out_of_bounds() {
    let mut config = create_test_config();

    config.api.page_size = 0;
    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("page_size"));

    config.api.page_size = 101;
    assert!(config.validate().is_err());

    config.api.page_size = 100;
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_rejects_zero_timeout() {
    let mut config = create_test_config();
    config.api.request_timeout_ms = 0;
    assert!(config.validate().is_err());
}

// ============================================================================
// LOADING
// ============================================================================

/// Test that a full TOML file loads with every field
#[test]
fn test_load_from_path_full() {
    let file = write_config(
        r#"
[api]
base_url = "https://bridge.example/api"
page_size = 10
request_timeout_ms = 1500

[validation]
unknown_fields = "ignore"
"#,
    );

    let config = Config::load_from_path(file.path().to_str()).unwrap();

    assert_eq!(config.api.base_url, "https://bridge.example/api");
    assert_eq!(config.page_size().get(), 10);
    assert_eq!(config.request_timeout(), Duration::from_millis(1500));
    assert_eq!(config.validation.unknown_fields, UnknownFields::Ignore);
}

/// Test that optional sections and fields fall back to defaults
#[test]
fn test_load_from_path_minimal() {
    let file = write_config(
        r#"
[api]
base_url = "http://127.0.0.1:9000"
"#,
    );

    let config = Config::load_from_path(file.path().to_str()).unwrap();

    assert_eq!(config.api.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.api.request_timeout_ms, 30_000);
    assert_eq!(config.validation.unknown_fields, UnknownFields::Reject);
}

#[test]
fn test_load_from_path_runs_validation() {
    let file = write_config(
        r#"
[api]
base_url = "http://127.0.0.1:9000"
page_size = 1000
"#,
    );

    assert!(Config::load_from_path(file.path().to_str()).is_err());
}

#[test]
fn test_load_from_path_rejects_unknown_policy() {
    let file = write_config(
        r#"
[api]
base_url = "http://127.0.0.1:9000"

[validation]
unknown_fields = "maybe"
"#,
    );

    assert!(Config::load_from_path(file.path().to_str()).is_err());
}

/// Test that a missing file points at the template
#[test]
fn test_load_from_missing_path() {
    let error = Config::load_from_path(Some("/nonexistent/ledger.toml")).unwrap_err();
    let message = error.to_string();

    assert!(message.contains("/nonexistent/ledger.toml"));
    assert!(message.contains("ledger.template.toml"));
}

/// Test that an explicit path wins over the default location
#[test]
fn test_resolve_path_prefers_explicit_path() {
    assert_eq!(Config::resolve_path(Some("custom.toml")), "custom.toml");
}

/// Test that the config round-trips through TOML
#[test]
fn test_config_serialization() {
    let config = create_test_config();

    let toml = toml::to_string(&config).expect("Should serialize to TOML");
    let deserialized: Config = toml::from_str(&toml).expect("Should deserialize from TOML");

    assert_eq!(config, deserialized);
}
