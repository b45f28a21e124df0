//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
///
/// Every section has defaults, so the service starts without any config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,
    /// File storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Input template configuration.
    #[serde(default)]
    pub template: TemplateConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Upload limits.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted workbook size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_size_bytes: u64,
    /// Accepted file extensions, lowercase and without the dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_upload_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl UploadConfig {
    /// Returns true if `filename` carries one of the allowed extensions.
    ///
    /// A name without a dot never matches.
    #[must_use]
    pub fn is_extension_allowed(&self, filename: &str) -> bool {
        filename.rsplit_once('.').is_some_and(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            self.allowed_extensions.iter().any(|allowed| *allowed == ext)
        })
    }
}

fn default_max_upload_size() -> u64 {
    2 * 1024 * 1024 // 2 MB
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["xlsx".to_string()]
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Root directory for uploads and snapshots.
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./data")
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Idle lifetime of a session in seconds.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    /// Maximum number of live sessions kept in memory.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_secs: default_session_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_cookie_name() -> String {
    "finansi_session".to_string()
}

fn default_session_ttl() -> u64 {
    3600 // 1 hour
}

fn default_max_sessions() -> u64 {
    10_000
}

/// Input template configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    /// Path of the blank transaction workbook offered for download.
    #[serde(default = "default_template_path")]
    pub workbook_path: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            workbook_path: default_template_path(),
        }
    }
}

fn default_template_path() -> PathBuf {
    PathBuf::from("templates-excel/Template_Input_Transaksi.xlsx")
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FINANSI").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
