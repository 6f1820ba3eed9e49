//! Error types for the QASM 2.0 parser.

use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at position {position}")]
    LexerError {
        /// Byte offset of the invalid token.
        position: usize,
    },

    /// Unexpected token.
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// What it found instead.
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// Invalid version.
    #[error("Invalid OPENQASM version: {0}")]
    InvalidVersion(String),

    /// Undefined register.
    #[error("Undefined register: {0}")]
    UndefinedRegister(String),

    /// Duplicate declaration.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// Unknown gate.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Wrong number of qubit arguments.
    #[error("Gate '{gate}' expects {expected} qubits, got {got}")]
    WrongQubitCount {
        /// The gate name.
        gate: String,
        /// Expected argument count.
        expected: usize,
        /// Actual argument count.
        got: usize,
    },

    /// Wrong number of parameters.
    #[error("Gate '{gate}' expects {expected} parameters, got {got}")]
    WrongParameterCount {
        /// The gate name.
        gate: String,
        /// Expected parameter count.
        expected: usize,
        /// Actual parameter count.
        got: usize,
    },

    /// Index out of bounds.
    #[error("Index {index} out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        /// The register name.
        register: String,
        /// The offending index.
        index: usize,
        /// The register size.
        size: usize,
    },

    /// Mismatched broadcast register sizes.
    #[error("Broadcast registers have mismatched sizes: {0} vs {1}")]
    BroadcastMismatch(usize, usize),

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    CircuitError(#[from] alsvin_ir::IrError),

    /// Unsupported construct (gate definitions, conditionals, …).
    #[error("Unsupported construct: {0}")]
    Unsupported(String),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
