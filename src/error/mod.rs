//! Error handling
//!
//! Defines error types and handling for the NAS proxy.

pub mod handlers;
pub mod types;

pub use types::*;
