use thiserror::Error;

use super::{ClientError, ConfigError, SigningError};

/// Top-level error returned by every fallible client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request could not be delivered or its response could not be read.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The request signature could not be computed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The request parameters could not be serialized.
    #[error("failed to serialize request parameters: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns `true` when the error was raised while constructing the client.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` when the error came from the network layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Client(ClientError::Transport(_)))
    }
}
