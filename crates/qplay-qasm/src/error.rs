//! Error types for the QASM crate.

use qplay_ir::IrError;
use thiserror::Error;

/// Errors that can occur while reading assembly text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A statement the parser handles is malformed.
    #[error("Syntax error at line {line}: {detail}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        detail: String,
    },

    /// The text declares no quantum register.
    #[error("No quantum register declared")]
    MissingRegister,

    /// The statements parsed but do not form a valid circuit.
    #[error("Circuit error: {0}")]
    Circuit(#[from] IrError),
}

impl ParseError {
    pub(crate) fn syntax(line: usize, detail: impl Into<String>) -> Self {
        ParseError::Syntax {
            line,
            detail: detail.into(),
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
