//! HTTP server
//!
//! Thin REST handlers over the storage layer, gated by the RBAC guards.

pub mod builder;
pub mod middleware;
pub mod routes;
mod server;
mod state;

pub use server::HttpServer;
pub use state::AppState;
