//! Database repositories for data access layer
//!
//! Each repository is responsible for a specific domain entity. The catalog
//! repositories also implement the lookup and persistence traits the product
//! import consumes.

pub mod catalog;
pub mod message;
pub mod product;

pub use catalog::{CategoryRepository, VendorRepository};
pub use message::MessageRepository;
pub use product::ProductRepository;
