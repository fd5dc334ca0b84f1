//! Core domain types for the job board

pub mod models;
