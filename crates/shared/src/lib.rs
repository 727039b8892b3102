//! Shared library for the AniDex catalog pipeline.
//!
//! This crate provides the functionality common to the pipeline binaries:
//! - Configuration management
//! - Database bootstrap and bulk-load store
//! - Row models for the normalized catalog schema
//! - Logging infrastructure

pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use logging::LogConfig;
pub use models::*;
pub use store::{MediaStore, StoreStats};

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
