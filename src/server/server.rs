//! HTTP server core implementation

use crate::auth::AuthSystem;
use crate::config::{Config, ServerConfig};
use crate::server::middleware::AuthMiddleware;
use crate::server::routes;
use crate::server::routes::health::health_check;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{BoardError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = StorageLayer::new(&config.storage)?;
        let auth = AuthSystem::new(&config.auth)?;
        let state = AppState::new(config.clone(), auth, storage);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create a server around pre-built components (tests inject a seeded
    /// storage layer through here)
    pub fn with_state(config: &Config, state: AppState) -> Self {
        Self {
            config: config.server.clone(),
            state,
        }
    }

    fn build_cors(config: &ServerConfig) -> Cors {
        let cors_config = &config.cors;
        if !cors_config.enabled {
            return Cors::default();
        }

        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header()
            .max_age(cors_config.max_age_secs);
        if cors_config.allowed_origins.is_empty() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }
        cors
    }

    /// Configure routes onto a service config; shared between the real
    /// server and in-process test apps
    pub fn configure_api(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope("/api")
                .configure(routes::labs::configure_routes)
                .configure(routes::jobs::configure_routes)
                .configure(routes::applications::configure_routes)
                .configure(routes::users::configure_routes),
        )
        .route("/health", web::get().to(health_check));
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let server_config = self.config.clone();

        let server = ActixHttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(AuthMiddleware)
                .wrap(Self::build_cors(&server_config))
                .wrap(TracingLogger::default())
                .configure(Self::configure_api)
        })
        .bind(&bind_addr)
        .map_err(|e| BoardError::server(format!("Failed to bind {bind_addr}: {e}")))?
        .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| BoardError::server(format!("Server error: {e}")))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
