//! Utility modules for the job board service

pub mod error;

pub use error::{BoardError, Result};
