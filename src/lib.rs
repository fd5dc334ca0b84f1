//! # labboard-rs
//!
//! A university research-lab job board: students browse and apply to
//! research positions, professors and lab assistants manage labs and review
//! applications, and admins manage roles.
//!
//! The interesting part is the role-based access control layer in
//! [`auth::rbac`]: a set of pure guard functions gating every read and
//! mutation across labs, jobs, and applications. Everything around it is
//! thin REST plumbing over a pluggable document store.
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use labboard_rs::{Config, JobBoard};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/board.yaml").await?;
//!     let board = JobBoard::new(config)?;
//!     board.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{BoardError, Result};

use tracing::info;

/// The job board service: configuration plus an HTTP server
pub struct JobBoard {
    config: Config,
    server: server::HttpServer,
}

impl JobBoard {
    /// Create a new service instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating job board instance");
        let server = server::HttpServer::new(&config)?;
        Ok(Self { config, server })
    }

    /// Run the HTTP server until shutdown
    pub async fn run(self) -> Result<()> {
        info!(
            host = %self.config.server.host,
            port = self.config.server.port,
            "Starting job board"
        );
        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "labboard-rs");
    }
}
