//! Error types of the polynomial core and the command interpreter.

use thiserror::Error;

/// Failures of positional access, slot lookup and checked arithmetic.
///
/// An operation returning one of these leaves every polynomial it touched
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolyError {
    /// Positional access outside `[0, len)`.
    #[error("index {index} out of range for polynomial with {len} terms")]
    OutOfRange { index: usize, len: usize },

    /// Writing this exponent at this position would break the descending order.
    #[error("exponent {exponent} does not fit at position {index}")]
    Misplaced { index: usize, exponent: u32 },

    /// A name that is not one of the store slots.
    #[error("unknown polynomial {0:?}")]
    UnknownPolynomial(String),

    /// A coefficient or exponent did not fit in its type.
    #[error("arithmetic overflow")]
    Overflow,
}

/// Failures of the line-oriented command interpreter.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error(transparent)]
    Poly(#[from] PolyError),

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("command {command:?} is missing its {operand}")]
    MissingOperand {
        command: &'static str,
        operand: &'static str,
    },

    #[error("malformed {what}: {input:?}")]
    Malformed { what: &'static str, input: String },

    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}
