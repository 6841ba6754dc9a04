use thiserror::Error;

/// Errors raised while executing a request.
///
/// HTTP status codes are never reported here: a 404 or 500 response is a
/// completed exchange and its body is stored like any other.
#[derive(Debug, Error)]
pub enum ClientError {
    /// DNS, connect, TLS, timeout or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The resolved request URL could not be parsed.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The URL as resolved from host and endpoint.
        url: String,
        /// The parse failure.
        source: url::ParseError,
    },
}
