//! Wellstore Storage Library
//!
//! This crate provides the storage abstraction used for product images, with
//! implementations for S3 and the local filesystem.
//!
//! # Storage key format
//!
//! All backends use the same key layout: `products/{uuid}.{ext}`. Keys must not
//! contain `..` or a leading `/`. Key generation is centralized in the `keys`
//! module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use wellstore_core::StorageBackend;
