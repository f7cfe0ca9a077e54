//! Gateway Errors
//!
//! Every backend failure is reduced to one of four kinds before it reaches a
//! controller.

use serde::{Deserialize, Serialize};

/// Common result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Backend-facing error taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum GatewayError {
    /// Empty name or another rejected precondition
    #[error("Invalid input: {0}")]
    Validation(String),
    /// Stale or unknown node, map or tree
    #[error("Not found: {0}")]
    NotFound(String),
    /// No response: connection failure or timeout
    #[error("Network error: {0}")]
    Network(String),
    /// Backend reported a failure or answered with something unreadable
    #[error("Server error: {0}")]
    Server(String),
}

impl GatewayError {
    /// Short machine-readable kind, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation",
            GatewayError::NotFound(_) => "not_found",
            GatewayError::Network(_) => "network",
            GatewayError::Server(_) => "server",
        }
    }
}
