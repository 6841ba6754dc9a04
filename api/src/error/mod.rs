//! Layered error types for the API crate.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all client operations
//! - [`ConfigError`] - Client construction and configuration errors
//! - [`ClientError`] - HTTP transport and network errors
//! - [`SigningError`] - Request signature computation errors

mod api_error;
mod client_error;
mod config_error;
mod signing_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use signing_error::SigningError;
