//! Tests for configuration system

use inscription::config::Config;
use temp_dir::TempDir;

#[test]
fn test_config_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let config = Config::load(Some(dir.child("missing.toml").display().to_string()))
        .expect("Failed to load config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.rate_limit.inscription_per_minute, 5);
    assert_eq!(config.rate_limit.default_per_hour, 50);
    assert_eq!(config.rate_limit.default_per_day, 200);
    assert_eq!(config.site.root, "site");
    assert_eq!(config.backup.folder, "backups");
    assert_eq!(config.client.endpoint, "http://localhost:5000/inscription");
    assert_eq!(config.client.locale, "fr");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.child("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
host = "0.0.0.0"
port = 8080

[rate_limit]
inscription_per_minute = 2

[client]
locale = "en"
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.display().to_string())).unwrap();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.rate_limit.inscription_per_minute, 2);
    assert_eq!(config.rate_limit.default_per_hour, 50);
    assert_eq!(config.client.locale, "en");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_rejected_by_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.child("config.toml");
    std::fs::write(
        &path,
        r#"
[client]
endpoint = "not a url"
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.display().to_string())).unwrap();
    assert!(config.validate().is_err());
}
