//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur when building or mutating circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the circuit register.
    #[error("Qubit {qubit} out of range for circuit with {num_qubits} qubits{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// The register size.
        num_qubits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit index outside the circuit register.
    #[error("Classical bit {clbit} out of range for circuit with {num_clbits} classical bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// The register size.
        num_clbits: usize,
    },

    /// The same qubit used twice in one operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Pauli string length does not match the circuit register.
    #[error("Pauli string spans {got} qubits, expected {expected}")]
    PauliLengthMismatch {
        /// The register size.
        expected: usize,
        /// The string length.
        got: usize,
    },

    /// Pauli string is not of the form `[+-][XYZI]+`.
    #[error("Invalid Pauli string '{0}': expected a sign followed by letters from XYZI")]
    InvalidPauliString(String),

    /// Pauli-based and standard operations mixed in one circuit.
    #[error("Cannot mix Pauli-based operations with standard gates in one circuit")]
    MixedPauliOps,
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
