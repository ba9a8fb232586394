//! Error types for the Luma translator

use crate::types::PrimitiveType;
use thiserror::Error;

/// Translation errors
///
/// Every variant carries the source line the tree walk reported for the
/// offending construct. Translation is fail-fast: the first error aborts the
/// whole compilation and no output text is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Reference to an undeclared variable
    ///
    /// **Triggered by:** reading or printing a name that was never assigned
    /// in any visible scope
    /// **Example:** `print(x)` before any `x = ...`
    #[error("line {line}: unknown symbol `{name}`")]
    UnknownSymbol {
        /// Source line of the reference
        line: usize,
        /// The unresolved name
        name: String,
    },

    /// Call to an undeclared function
    #[error("line {line}: unknown function `{name}`")]
    UnknownFunction {
        /// Source line of the call
        line: usize,
        /// The unresolved callee name
        name: String,
    },

    /// Call argument count differs from the declared parameter count
    #[error("line {line}: `{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        /// Source line of the call
        line: usize,
        /// Callee name
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Static type disagreement
    ///
    /// **Triggered by:** operator operands of unequal type, assignment to a
    /// differently-typed symbol, aggregate homogeneity violations, argument
    /// or return types that differ from the declaration
    /// **Example:** `1 + 2.5` (INT + DOUBLE)
    #[error("line {line}: type mismatch: {message}")]
    TypeMismatch {
        /// Source line of the construct
        line: usize,
        /// What disagreed with what
        message: String,
    },

    /// Compile-time-provable array index outside `[0, length)`
    ///
    /// Only literal indices are checked; register-resident indices are
    /// never bounds-checked.
    #[error("line {line}: index {index} out of range for array of length {length}")]
    IndexOutOfRange {
        /// Source line of the access
        line: usize,
        /// The literal index
        index: i64,
        /// The array's fixed length
        length: usize,
    },

    /// Cast from a type with no defined conversion to the target
    #[error("line {line}: no conversion from {from} to {to}")]
    InvalidCast {
        /// Source line of the cast
        line: usize,
        /// Operand type
        from: PrimitiveType,
        /// Requested target type
        to: PrimitiveType,
    },

    /// `return <value>` inside a function declared VOID
    #[error("line {line}: void function cannot return a value")]
    VoidReturnWithValue {
        /// Source line of the return statement
        line: usize,
    },

    /// The tree-walk driver violated the event-stream contract
    ///
    /// **Triggered by:** operand-stack underflow, `return` outside a
    /// function body, unbalanced aggregate begin/end events, an unknown
    /// type keyword
    #[error("line {line}: malformed parse walk: {message}")]
    MalformedWalk {
        /// Source line of the offending event
        line: usize,
        /// Contract violation description
        message: String,
    },
}

impl Error {
    /// Source line the error was reported at
    pub fn line(&self) -> usize {
        match self {
            Error::UnknownSymbol { line, .. }
            | Error::UnknownFunction { line, .. }
            | Error::ArityMismatch { line, .. }
            | Error::TypeMismatch { line, .. }
            | Error::IndexOutOfRange { line, .. }
            | Error::InvalidCast { line, .. }
            | Error::VoidReturnWithValue { line }
            | Error::MalformedWalk { line, .. } => *line,
        }
    }

    /// Shorthand for a [`Error::TypeMismatch`] with a formatted message
    pub fn type_mismatch(line: usize, message: impl Into<String>) -> Self {
        Error::TypeMismatch {
            line,
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::MalformedWalk`] with a formatted message
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Error::MalformedWalk {
            line,
            message: message.into(),
        }
    }
}

/// Result type for Luma translation steps
pub type Result<T> = std::result::Result<T, Error>;
