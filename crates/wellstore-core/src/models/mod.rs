//! Data models for the application
//!
//! Each sub-module represents a specific feature area of the admin console.

mod catalog;
mod message;
mod product;
mod product_import;

pub use catalog::*;
pub use message::*;
pub use product::*;
pub use product_import::*;
