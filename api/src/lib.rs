//! Client SDK for the Echo-Five public API.
//!
//! [`ApiClient`] sends one request at a time to a configured host, attaching
//! a bearer token and, when a shared secret is configured, an HMAC-SHA256
//! `X-API-Signature` header computed over the key-sorted JSON parameters.
//! The last response and its transport metadata stay on the client, and an
//! opt-in debug mode accumulates request count, cumulative time and a
//! timestamped trace.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`client`] | [`ApiClient`] and its builder |
//! | [`config`] | [`ClientConfig`] validation and environment loading |
//! | [`params`] | [`Params`] and their JSON / query-string encodings |
//! | [`signer`] | [`RequestSigner`] |
//! | [`response`] | [`ApiResponse`], [`RequestInfo`] and lenient accessors |
//! | [`debug`] | [`DebugState`] and [`DebugReport`] |
//! | [`error`] | Layered error types |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use echo_five_api::{ApiClient, Params};
//!
//! # async fn run() -> Result<(), echo_five_api::ApiError> {
//! let mut api = ApiClient::new("api.example.com", "MY_API_KEY", "MY_API_SECRET")?;
//! let params = Params::new().with("foo", "Bar").with("biz", "Buz");
//!
//! api.request("post", "/api/v1/test/signed", &params, "json").await?;
//! println!("{}", api.response_status());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod debug;
pub mod endpoint;
pub mod error;
pub mod method;
pub mod mode;
pub mod params;
pub mod response;
pub mod signer;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use debug::{DebugReport, DebugState, RequestStats, RequestsReport};
pub use error::{ApiError, ClientError, ConfigError, SigningError};
pub use method::RestMethod;
pub use mode::RequestMode;
pub use params::Params;
pub use response::{ApiResponse, RequestInfo, ResponseBody};
pub use signer::RequestSigner;
