use thiserror::Error;

/// Errors raised while computing the `X-API-Signature` header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigningError {
    /// The shared secret was rejected as an HMAC key.
    #[error("invalid signing key")]
    InvalidKey,

    /// The computed signature is not a valid header value.
    #[error("signature is not a valid header value")]
    InvalidHeader,
}
