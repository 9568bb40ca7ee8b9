//! Activation error taxonomy.

use thiserror::Error;

/// Result type alias for activator and control-plane operations.
pub type ActivationResult<T> = Result<T, ActivationError>;

/// Errors that abort an activation.
///
/// Neither kind is handled locally: both surface to whatever invoked the
/// activator.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// The configured service did not resolve to exactly one entry.
    #[error("service lookup failed for {service} in cluster {cluster}: {reason}")]
    Lookup {
        cluster: String,
        service: String,
        reason: String,
    },

    /// The control-plane request could not be completed (network, auth,
    /// throttling, or a malformed response).
    #[error("{operation} request failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
}

impl ActivationError {
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
