//! Error handling for the job board service
//!
//! This module defines all error types used throughout the service.

mod helpers;
mod response;
#[cfg(test)]
mod tests;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{BoardError, Result};
