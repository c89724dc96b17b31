//! Error handling
//!
//! Defines error types and user-facing message mapping for the workout core.

pub mod handlers;
pub mod types;

pub use types::*;
