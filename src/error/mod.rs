//! Error handling
//!
//! Defines error types and their boundary codes for disk operations.

pub mod handlers;
pub mod types;

pub use types::*;
