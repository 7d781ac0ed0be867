//! Wellstore Database Library
//!
//! Postgres repositories for the catalog and the contact inbox. The schema is
//! managed outside this crate; see DESIGN.md for the tables these queries expect.

pub mod db;

pub use db::{CategoryRepository, MessageRepository, ProductRepository, VendorRepository};
