//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{BoardError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| BoardError::config("Configuration is required"))?;
        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading.
///
/// Prefers `config/board.yaml`; falls back to environment variables when
/// the file is absent.
pub async fn run_server() -> Result<()> {
    info!("Starting research-lab job board");

    let config_path = "config/board.yaml";
    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration file loaded: {}", config_path);
            config
        }
        Err(e) => {
            info!(
                "Configuration file unavailable ({}), reading environment",
                e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at http://{}:{}",
        config.server.host, config.server.port
    );
    server.start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_config() {
        assert!(ServerBuilder::new().build().is_err());
    }

    #[test]
    fn test_builder_with_config() {
        let mut config = Config::default();
        config.auth.jwt_secret = "secret".to_string();
        assert!(ServerBuilder::new().with_config(config).build().is_ok());
    }
}
