//! The grid-synthesis collaborator interface.
//!
//! Approximating a single RZ(θ) by a Clifford+T word is a number-theoretic
//! routine over ℤ[√2, i] that lives outside this crate. The transpiler only
//! defines the contract; a backend is registered on the
//! [`Transpiler`](crate::Transpiler) and may be absent, in which case the
//! driver skips the synthesis pass with a warning.

use alsvin_ir::StandardGate;

use crate::error::{TranspileError, TranspileResult};

/// Default per-angle tolerance multiplier: ε(θ) = |θ| · this.
pub const DEFAULT_EPSILON_MULTIPLIER: f64 = 1e-10;

/// A grid-synthesis backend.
///
/// Contract: the returned word, read in circuit order, approximates RZ(θ) in
/// operator norm (up to global phase) with error at most `epsilon`, and is
/// drawn from the alphabet {H, S, S†, T, T†}.
pub trait RzSynthesizer: Send + Sync {
    /// Synthesize a Clifford+T word approximating RZ(`theta`) within
    /// `epsilon`.
    fn synthesize(&self, theta: f64, epsilon: f64) -> TranspileResult<Vec<StandardGate>>;
}

/// The tolerance for one angle: the override when set, the per-angle default
/// otherwise.
pub fn epsilon_for(theta: f64, epsilon_override: f64) -> f64 {
    if epsilon_override >= 0.0 {
        epsilon_override
    } else {
        theta.abs() * DEFAULT_EPSILON_MULTIPLIER
    }
}

/// Validate that a synthesized word stays within the Clifford+T alphabet.
pub fn validate_word(word: &[StandardGate]) -> TranspileResult<()> {
    for gate in word {
        match gate {
            StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg => {}
            other => {
                return Err(TranspileError::InvalidWord {
                    gate: other.name(),
                })
            }
        }
    }
    Ok(())
}
