use thiserror::Error;

/// Errors raised while building a client configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No API host was provided.
    #[error("please provide the API host")]
    EmptyHost,

    /// No API key was provided.
    #[error("please provide the API key")]
    EmptyApiKey,

    /// The API key cannot be sent in an `Authorization` header.
    #[error("API key contains characters that are not valid in an HTTP header")]
    InvalidApiKey,

    /// A required environment variable was not set.
    #[error("environment variable {name} is not set")]
    MissingEnv {
        /// The variable name.
        name: &'static str,
    },
}
