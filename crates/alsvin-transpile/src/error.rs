//! Error types for the transpilation crate.

use thiserror::Error;

/// Errors that can occur during transpilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranspileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] alsvin_ir::IrError),

    /// A pass that requires a Clifford+T circuit received something else.
    #[error("Pass '{pass}' requires a Clifford+T circuit")]
    NotCliffordT {
        /// The pass that rejected the circuit.
        pass: &'static str,
    },

    /// A pass that requires a Pauli-Based Circuit received something else.
    #[error("Pass '{pass}' requires a Pauli-Based Circuit")]
    NotPbc {
        /// The pass that rejected the circuit.
        pass: &'static str,
    },

    /// RZ synthesis was requested but no backend is registered.
    #[error("RZ synthesis requested but no grid-synthesis backend is available")]
    SynthesisUnavailable,

    /// A synthesized word failed the accuracy audit.
    #[error(
        "Synthesized word for rz({theta}) has operator-norm error {error:.3e}, \
         exceeding epsilon {epsilon:.3e}"
    )]
    SynthesisAccuracy {
        /// The rotation angle.
        theta: f64,
        /// The requested tolerance.
        epsilon: f64,
        /// The measured error.
        error: f64,
    },

    /// A synthesis backend returned a gate outside {H, S, S†, T, T†}.
    #[error("Synthesis backend returned gate '{gate}' outside the Clifford+T alphabet")]
    InvalidWord {
        /// The offending gate name.
        gate: &'static str,
    },
}

/// Result type for transpilation operations.
pub type TranspileResult<T> = Result<T, TranspileError>;
