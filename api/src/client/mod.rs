//! HTTP client module.

mod executor;

pub use executor::{ApiClient, ApiClientBuilder};
