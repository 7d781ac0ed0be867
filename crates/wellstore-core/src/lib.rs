//! Wellstore Core Library
//!
//! This crate provides core domain models, error types, configuration, and the
//! collaborator traits that are shared across all Wellstore components.

pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ImportConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use hooks::{CategoryLookup, ProductGateway, VendorLookup};
pub use storage_types::StorageBackend;
