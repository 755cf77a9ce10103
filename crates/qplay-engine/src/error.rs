//! Error types for the engine.

use std::time::Duration;

use qplay_hal::HalError;
use qplay_ir::IrError;
use qplay_qasm::ParseError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The circuit description breaks an IR invariant.
    #[error(transparent)]
    InvalidCircuit(#[from] IrError),

    /// Assembly text could not be read.
    #[error(transparent)]
    Parse(ParseError),

    /// Request options are out of range.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backend failed while running.
    #[error("Simulation error: {detail}")]
    Simulation {
        /// Opaque backend message.
        detail: String,
    },

    /// The deadline fired before the backend returned.
    #[error("Simulation timeout after {}s", .after.as_secs_f64())]
    TimedOut {
        /// The deadline that was exceeded.
        after: Duration,
    },

    /// No simulation capability was found at startup.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Whether the caller caused the error (4xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidCircuit(_) | EngineError::Parse(_) | EngineError::InvalidRequest(_)
        )
    }
}

impl From<ParseError> for EngineError {
    fn from(err: ParseError) -> Self {
        match err {
            // Circuit-shape problems read the same whichever surface they came from.
            ParseError::Circuit(ir) => EngineError::InvalidCircuit(ir),
            other => EngineError::Parse(other),
        }
    }
}

impl From<HalError> for EngineError {
    fn from(err: HalError) -> Self {
        match err {
            HalError::BackendUnavailable(msg) => EngineError::BackendUnavailable(msg),
            // The request asked for more than the backend offers.
            err @ (HalError::CircuitTooLarge(_) | HalError::InvalidShots(_)) => {
                EngineError::InvalidRequest(err.to_string())
            }
            other => EngineError::Simulation {
                detail: other.to_string(),
            },
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(EngineError::from(IrError::invalid("bad")).is_client_error());
        assert!(EngineError::from(ParseError::MissingRegister).is_client_error());
        assert!(!EngineError::Simulation { detail: "x".into() }.is_client_error());
        assert!(
            !EngineError::TimedOut {
                after: Duration::from_secs(1)
            }
            .is_client_error()
        );
    }

    #[test]
    fn test_parse_circuit_error_unwrapped() {
        let err = EngineError::from(ParseError::Circuit(IrError::invalid("arity")));
        assert!(matches!(err, EngineError::InvalidCircuit(_)));
        assert_eq!(err.to_string(), "Invalid circuit: arity");
    }

    #[test]
    fn test_hal_conversion() {
        let err = EngineError::from(HalError::Backend("boom".into()));
        assert_eq!(err.to_string(), "Simulation error: Backend error: boom");

        let err = EngineError::from(HalError::BackendUnavailable("none".into()));
        assert!(matches!(err, EngineError::BackendUnavailable(_)));
        assert_eq!(err.to_string(), "Backend not available: none");
    }

    #[test]
    fn test_hal_limits_are_client_errors() {
        let err = EngineError::from(HalError::CircuitTooLarge("25 > 24".into()));
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Invalid request: Circuit exceeds backend capabilities: 25 > 24"
        );

        let err = EngineError::from(HalError::InvalidShots("0".into()));
        assert!(matches!(err, EngineError::InvalidRequest(_)));

        assert!(!EngineError::from(HalError::Unsupported("sv".into())).is_client_error());
    }

    #[test]
    fn test_timeout_message() {
        let err = EngineError::TimedOut {
            after: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "Simulation timeout after 1.5s");
    }
}
