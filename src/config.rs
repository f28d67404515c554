use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub backup: BackupConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SecurityConfig {
    /// Fernet key (url-safe base64, 32 bytes) used to encrypt e-mails at rest
    #[serde(default)]
    pub encryption_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_inscription_per_minute")]
    pub inscription_per_minute: u32,
    #[serde(default = "default_per_hour")]
    pub default_per_hour: u32,
    #[serde(default = "default_per_day")]
    pub default_per_day: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            inscription_per_minute: default_inscription_per_minute(),
            default_per_hour: default_per_hour(),
            default_per_day: default_per_day(),
        }
    }
}

fn default_inscription_per_minute() -> u32 {
    5
}

fn default_per_hour() -> u32 {
    50
}

fn default_per_day() -> u32 {
    200
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_site_root")]
    pub root: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_site_root(),
        }
    }
}

fn default_site_root() -> String {
    "site".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackupConfig {
    #[serde(default = "default_backup_folder")]
    pub folder: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            folder: default_backup_folder(),
        }
    }
}

fn default_backup_folder() -> String {
    "backups".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            locale: default_locale(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:5000/inscription".to_string()
}

fn default_locale() -> String {
    "fr".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn absolute(path: impl AsRef<Path>) -> Result<PathBuf, String> {
    std::path::absolute(path.as_ref())
        .map_err(|e| format!("Invalid path {}: {e}", path.as_ref().display()))
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (DATABASE_URL, ENCRYPTION_KEY)
    /// 2. Environment variables (INSCRIPTION__DATABASE__URL, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite:inscription.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("INSCRIPTION")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(encryption_key) = env::var("ENCRYPTION_KEY") {
            builder = builder.set_override("security.encryption_key", encryption_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }

        let limits = &self.rate_limit;
        if limits.inscription_per_minute == 0
            || limits.default_per_hour == 0
            || limits.default_per_day == 0
        {
            return Err("Rate limits must be greater than 0".to_string());
        }

        if let Err(e) = url::Url::parse(&self.client.endpoint) {
            return Err(format!("Client endpoint is not a valid URL: {e}"));
        }
        if !inscription_client::is_supported_locale(&self.client.locale) {
            return Err(format!(
                "Client locale must be one of {:?}",
                inscription_client::SUPPORTED_LOCALES
            ));
        }

        let site_root = absolute(&self.site.root)?;
        if let Some(database) = self.database_path() {
            if absolute(database)?.starts_with(&site_root) {
                return Err("Database must not live under the site root".to_string());
            }
        }
        if absolute(&self.backup.folder)?.starts_with(&site_root) {
            return Err("Backup folder must not live under the site root".to_string());
        }

        Ok(())
    }

    /// File behind `database.url`, `None` for in-memory databases.
    pub fn database_path(&self) -> Option<&str> {
        let path = self
            .database
            .url
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");
        let path = path.split('?').next().unwrap_or_default();

        if path.is_empty() || path == ":memory:" {
            None
        } else {
            Some(path)
        }
    }

    /// Encryption key, required by every command touching e-mails.
    pub fn encryption_key(&self) -> Result<&str, String> {
        match self.security.encryption_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(
                "Encryption key is missing: set ENCRYPTION_KEY or security.encryption_key"
                    .to_string(),
            ),
        }
    }
}
