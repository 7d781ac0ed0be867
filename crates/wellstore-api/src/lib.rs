//! Wellstore API Library
//!
//! HTTP handlers, middleware wiring and application setup for the admin console.

mod api_doc;
mod handlers;
mod utils;

pub mod constants;
pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
