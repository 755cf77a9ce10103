//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The description cannot be turned into a valid circuit.
    #[error("Invalid circuit: {reason}")]
    InvalidCircuit {
        /// Human-readable reason, surfaced verbatim to clients.
        reason: String,
    },
}

impl IrError {
    /// Shorthand for [`IrError::InvalidCircuit`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        IrError::InvalidCircuit {
            reason: reason.into(),
        }
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
