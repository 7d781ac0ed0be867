pub mod catalog;
pub mod health;
pub mod import;
pub mod messages;
