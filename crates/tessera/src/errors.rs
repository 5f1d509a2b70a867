//! Error handling and exit codes.

use tessera_numeric::{ParseBigIntegerError, ParseRationalError};

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: u8 = 0;
    /// Generic error (I/O, serialization).
    pub const ERROR_GENERIC: u8 = 1;
    /// An operand or operator could not be parsed.
    pub const ERROR_PARSE: u8 = 2;
    /// Division or remainder by zero.
    pub const ERROR_DIVISION_BY_ZERO: u8 = 3;
}

/// Errors raised while evaluating a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An integer operand was malformed.
    #[error("invalid integer {input:?}: {source}")]
    Integer {
        /// The offending text.
        input: String,
        /// Why it was rejected.
        source: ParseBigIntegerError,
    },

    /// A rational operand was malformed.
    #[error("invalid fraction {input:?}: {source}")]
    Rational {
        /// The offending text.
        input: String,
        /// Why it was rejected.
        source: ParseRationalError,
    },

    /// The operator is not one of the supported symbols.
    #[error("unknown operator {0:?} (expected one of + - * / % < <= > >= == !=)")]
    Operator(String),

    /// A stream line did not have the `LHS OP RHS` shape.
    #[error("expected `LHS OP RHS`, got {0:?}")]
    Expression(String),

    /// The right-hand side of `/` or `%` was zero.
    #[error("division by zero")]
    DivisionByZero,
}

impl CliError {
    /// The exit code this error maps to.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Integer { .. }
            | Self::Rational { .. }
            | Self::Operator(_)
            | Self::Expression(_) => exit_codes::ERROR_PARSE,
            Self::DivisionByZero => exit_codes::ERROR_DIVISION_BY_ZERO,
        }
    }
}

/// Exit code for an error surfaced at the binary boundary.
#[must_use]
pub fn handle_error(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>()
        .map_or(exit_codes::ERROR_GENERIC, CliError::exit_code)
}
