//! Tests for configuration parsing

use licport_core::config::CONFIG_FILENAME;
use licport_core::PortalConfig;
use std::collections::HashMap;

#[test]
fn test_default_config() {
    let config = PortalConfig::default();
    assert_eq!(config.api.base_url, "https://api.example.com");
    assert_eq!(config.api.api_key_header, "X-API-Key");
    assert_eq!(config.api.token_header, "Authorization");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.output.format, "terminal");
    assert!(config.output.color);
    assert!(config.session.dir.is_none());
}

#[test]
fn test_serialize_config() {
    let config = PortalConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("base_url"));
    assert!(toml_str.contains("token_header"));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let toml_str = r#"
[api]
base_url = "https://portal.internal/api/"
timeout_secs = 5

[session]
dir = "/tmp/licport-session"
"#;
    let config: PortalConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.base_url(), "https://portal.internal/api");
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.api.api_key, "sample-api-key");
    assert_eq!(
        config.session.dir.as_deref(),
        Some(std::path::Path::new("/tmp/licport-session"))
    );
    assert_eq!(config.output.format, "terminal");
}

#[test]
fn test_find_and_load_walks_up() {
    let tmp = tempfile::tempdir().unwrap();
    let nested = tmp.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    let mut config = PortalConfig::default();
    config.api.base_url = "https://found.example".into();
    config.save(&tmp.path().join(CONFIG_FILENAME)).unwrap();

    let loaded = PortalConfig::find_and_load(&nested).unwrap();
    assert_eq!(loaded.api.base_url, "https://found.example");
}

#[test]
fn test_invalid_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(CONFIG_FILENAME);
    std::fs::write(&path, "[api\nbase_url = ").unwrap();
    assert!(PortalConfig::from_file(&path).is_err());
}

#[test]
fn test_env_overrides() {
    let env: HashMap<&str, &str> = [
        ("LICPORT_API_BASE_URL", "http://localhost:4000"),
        ("LICPORT_API_KEY", "local-key"),
        ("LICPORT_AUTH_HEADER", "X-Portal-Key"),
        ("LICPORT_TOKEN_HEADER", "   "),
    ]
    .into_iter()
    .collect();

    let mut config = PortalConfig::default();
    config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

    assert_eq!(config.api.base_url, "http://localhost:4000");
    assert_eq!(config.api.api_key, "local-key");
    assert_eq!(config.api.api_key_header, "X-Portal-Key");
    assert_eq!(config.api.token_header, "Authorization");
}
