//! Request signing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{ApiError, SigningError};
use crate::params::Params;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature (`X-API-Signature`).
pub const SIGNATURE_HEADER: &str = "x-api-signature";

/// Computes `X-API-Signature` values from a shared secret.
///
/// The signature is the hex-encoded HMAC-SHA256 of the key-sorted JSON
/// encoding of the request parameters (see [`Params::to_signing_payload`]).
/// The server recomputes it the same way, so the payload must not depend
/// on insertion order.
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl RequestSigner {
    /// Creates a signer for the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signs a set of request parameters.
    ///
    /// ## Errors
    ///
    /// Returns an error if the parameters cannot be serialized or the secret
    /// is rejected as an HMAC key.
    pub fn sign_params(&self, params: &Params) -> Result<String, ApiError> {
        let payload = params.to_signing_payload()?;
        Ok(self.sign(&payload)?)
    }

    /// Signs an arbitrary payload and returns the hex-encoded digest.
    pub fn sign(&self, payload: &str) -> Result<String, SigningError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| SigningError::InvalidKey)?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // RFC 4231 test case 2.
        let signer = RequestSigner::new("Jefe");
        assert_eq!(
            signer.sign("what do ya want for nothing?").unwrap(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_signature_is_order_independent() {
        let signer = RequestSigner::new("MY_API_SECRET");
        let a = Params::new().with("biz", "Buz").with("foo", "Bar");
        let b = Params::new().with("foo", "Bar").with("biz", "Buz");

        assert_eq!(signer.sign_params(&a).unwrap(), signer.sign_params(&b).unwrap());
    }

    #[test]
    fn test_signature_covers_sorted_json() {
        let signer = RequestSigner::new("MY_API_SECRET");
        let params = Params::new().with("foo", "Bar").with("biz", "Buz");

        assert_eq!(
            signer.sign_params(&params).unwrap(),
            signer.sign(r#"{"biz":"Buz","foo":"Bar"}"#).unwrap()
        );
    }

    #[test]
    fn test_empty_params_sign_empty_array() {
        let signer = RequestSigner::new("s3cret");
        assert_eq!(
            signer.sign_params(&Params::new()).unwrap(),
            signer.sign("[]").unwrap()
        );
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let signature = RequestSigner::new("k").sign("payload").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", RequestSigner::new("top-secret"));
        assert!(!rendered.contains("top-secret"));
    }
}
