//! Configuration management
//!
//! Configuration loads from a YAML file (`config/board.yaml` by default) or
//! from environment variables, and is validated before the server starts.

use crate::utils::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Bearer token verification settings
    pub auth: AuthConfig,
    /// Document store settings
    pub storage: StorageConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

/// CORS settings for the browser UI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// Allowed origins; empty means allow any origin
    pub allowed_origins: Vec<String>,
    pub max_age_secs: usize,
}

/// Bearer token verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret shared with the identity provider
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Clock-skew tolerance when validating expiry
    pub leeway_secs: u64,
    /// Lifetime of locally issued tokens (tests / local development)
    pub token_ttl_secs: u64,
}

/// Document store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selector; only "memory" ships with this crate
    pub backend: String,
    pub tables: TableNames,
}

/// Table names in the document store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub users: String,
    pub labs: String,
    pub jobs: String,
    pub applications: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: Vec::new(),
            max_age_secs: 3600,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: None,
            audience: None,
            leeway_secs: 30,
            token_ttl_secs: 3600,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            tables: TableNames::default(),
        }
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            users: "users".to_string(),
            labs: "labs".to_string(),
            jobs: "jobs".to_string(),
            applications: "applications".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BoardError::config(format!("Failed to read config file: {e}")))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| BoardError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();
        if let Ok(host) = std::env::var("BOARD_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("BOARD_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| BoardError::config(format!("Invalid BOARD_PORT: {port}")))?;
        }
        if let Ok(secret) = std::env::var("BOARD_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(issuer) = std::env::var("BOARD_JWT_ISSUER") {
            config.auth.issuer = Some(issuer);
        }
        if let Ok(backend) = std::env::var("BOARD_STORAGE_BACKEND") {
            config.storage.backend = backend;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        if self.server.host.is_empty() {
            return Err(BoardError::config("server.host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(BoardError::config("server.port must not be 0"));
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(BoardError::config("auth.jwt_secret must not be empty"));
        }
        if self.storage.backend.is_empty() {
            return Err(BoardError::config("storage.backend must not be empty"));
        }
        for (name, value) in [
            ("users", &self.storage.tables.users),
            ("labs", &self.storage.tables.labs),
            ("jobs", &self.storage.tables.jobs),
            ("applications", &self.storage.tables.applications),
        ] {
            if value.is_empty() {
                return Err(BoardError::config(format!(
                    "storage.tables.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}
