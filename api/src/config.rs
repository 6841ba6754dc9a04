//! Client configuration.

use std::env;

use reqwest::header::HeaderValue;

use crate::error::ConfigError;

/// Environment variable holding the API host.
pub const HOST_ENV: &str = "ECHO_FIVE_API_HOST";
/// Environment variable holding the API key.
pub const KEY_ENV: &str = "ECHO_FIVE_API_KEY";
/// Environment variable holding the optional signing secret.
pub const SECRET_ENV: &str = "ECHO_FIVE_API_SECRET";
/// Environment variable opting into relaxed TLS while debugging.
pub const INSECURE_DEBUG_TLS_ENV: &str = "ECHO_FIVE_API_INSECURE_DEBUG_TLS";

/// Immutable connection settings for an [`ApiClient`](crate::ApiClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    host: String,
    api_key: String,
    api_secret: String,
    insecure_debug_tls: bool,
}

impl ClientConfig {
    /// Validates and creates a configuration.
    ///
    /// An empty `api_secret` disables request signing.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::EmptyHost`] or [`ConfigError::EmptyApiKey`] when
    /// either value is blank, and [`ConfigError::InvalidApiKey`] when the key
    /// cannot be sent in an `Authorization` header.
    pub fn new(
        host: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let host = host.into().trim().to_string();
        if host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ConfigError::InvalidApiKey)?;

        Ok(Self {
            host,
            api_key,
            api_secret: api_secret.into(),
            insecure_debug_tls: false,
        })
    }

    /// Loads the configuration from `ECHO_FIVE_API_*` environment variables.
    ///
    /// `ECHO_FIVE_API_SECRET` and `ECHO_FIVE_API_INSECURE_DEBUG_TLS` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var(HOST_ENV).map_err(|_| ConfigError::MissingEnv { name: HOST_ENV })?;
        let api_key = env::var(KEY_ENV).map_err(|_| ConfigError::MissingEnv { name: KEY_ENV })?;
        let api_secret = env::var(SECRET_ENV).unwrap_or_default();
        let insecure = env::var(INSECURE_DEBUG_TLS_ENV)
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self::new(host, api_key, api_secret)?.with_insecure_debug_tls(insecure))
    }

    /// Allows TLS certificate verification to be skipped while debug mode is active.
    ///
    /// Off by default. Only meant for local or staging servers with
    /// self-signed certificates.
    pub fn with_insecure_debug_tls(mut self, enabled: bool) -> Self {
        self.insecure_debug_tls = enabled;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Returns `true` when requests carry an `X-API-Signature` header.
    pub fn signing_enabled(&self) -> bool {
        !self.api_secret.is_empty()
    }

    pub fn insecure_debug_tls(&self) -> bool {
        self.insecure_debug_tls
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("signing_enabled", &self.signing_enabled())
            .field("insecure_debug_tls", &self.insecure_debug_tls)
            .finish()
    }
}
