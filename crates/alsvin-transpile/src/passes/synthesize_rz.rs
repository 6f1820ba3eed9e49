//! Replacement of residual RZ rotations by synthesized Clifford+T words.

use std::sync::Arc;

use tracing::debug;

use alsvin_ir::{Circuit, Instruction, InstructionKind, StandardGate};

use crate::error::{TranspileError, TranspileResult};
use crate::pass::Pass;
use crate::synthesis::{epsilon_for, validate_word, RzSynthesizer};
use crate::unitary::Unitary2x2;

/// Replaces each remaining RZ(θ) by a Clifford+T word from the registered
/// grid-synthesis backend, within absolute tolerance ε(θ).
///
/// The per-angle default is `|θ| · DEFAULT_EPSILON_MULTIPLIER`; a
/// non-negative `epsilon_override` replaces it uniformly. With the audit
/// enabled, every returned word is multiplied out and checked against RZ(θ)
/// projectively; a miss is a fatal [`TranspileError::SynthesisAccuracy`].
pub struct SynthesizeRzPass {
    synthesizer: Arc<dyn RzSynthesizer>,
    epsilon_override: f64,
    audit: bool,
}

impl SynthesizeRzPass {
    /// Create the pass with the given backend and epsilon override
    /// (negative selects the per-angle default).
    pub fn new(synthesizer: Arc<dyn RzSynthesizer>, epsilon_override: f64) -> Self {
        Self {
            synthesizer,
            epsilon_override,
            audit: false,
        }
    }

    /// Enable the post-synthesis accuracy audit.
    #[must_use]
    pub fn with_audit(mut self) -> Self {
        self.audit = true;
        self
    }

    fn audit_word(
        &self,
        word: &[StandardGate],
        theta: f64,
        epsilon: f64,
    ) -> TranspileResult<()> {
        // Multiply the word in circuit order: later gates compose on the left.
        let mut acc = Unitary2x2::identity();
        for gate in word {
            let m = Unitary2x2::from_gate(gate).expect("validated word");
            acc = m.matmul(&acc);
        }
        let error = acc.distance(&Unitary2x2::rz(theta));
        if error > epsilon {
            return Err(TranspileError::SynthesisAccuracy {
                theta,
                epsilon,
                error,
            });
        }
        Ok(())
    }
}

impl Pass for SynthesizeRzPass {
    fn name(&self) -> &'static str {
        "SYNTHESIZE_RZ"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let ops = circuit.take_operations();
        let mut out = Vec::with_capacity(ops.len());
        let mut modified = false;
        let mut result = Ok(());
        for inst in ops {
            if result.is_err() {
                out.push(inst);
                continue;
            }
            match &inst.kind {
                InstructionKind::Gate(StandardGate::Rz(theta)) => {
                    let theta = *theta;
                    let q = inst.qubits[0];
                    let epsilon = epsilon_for(theta, self.epsilon_override);
                    match self.synthesizer.synthesize(theta, epsilon) {
                        Ok(word) => {
                            if let Err(e) = validate_word(&word).and_then(|()| {
                                if self.audit {
                                    self.audit_word(&word, theta, epsilon)
                                } else {
                                    Ok(())
                                }
                            }) {
                                result = Err(e);
                                out.push(inst);
                                continue;
                            }
                            debug!(theta, epsilon, len = word.len(), "synthesized rz");
                            out.extend(
                                word.into_iter()
                                    .map(|g| Instruction::single_qubit_gate(g, q)),
                            );
                            modified = true;
                        }
                        Err(e) => {
                            result = Err(e);
                            out.push(inst);
                        }
                    }
                }
                _ => out.push(inst),
            }
        }
        circuit.set_operations(out)?;
        result.map(|()| modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvin_ir::QubitId;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    /// Test backend that handles exact multiples of π/4 only.
    struct EighthTurns;

    impl RzSynthesizer for EighthTurns {
        fn synthesize(&self, theta: f64, _epsilon: f64) -> TranspileResult<Vec<StandardGate>> {
            let k = (theta / FRAC_PI_4).round() as i64;
            if (theta - (k as f64) * FRAC_PI_4).abs() > 1e-12 {
                return Err(TranspileError::SynthesisUnavailable);
            }
            let gate = if k >= 0 { StandardGate::T } else { StandardGate::Tdg };
            Ok(vec![gate; k.unsigned_abs() as usize])
        }
    }

    /// Backend that returns a deliberately wrong word.
    struct Broken;

    impl RzSynthesizer for Broken {
        fn synthesize(&self, _theta: f64, _epsilon: f64) -> TranspileResult<Vec<StandardGate>> {
            Ok(vec![StandardGate::H])
        }
    }

    #[test]
    fn test_replaces_rz_with_word() {
        let mut circuit = Circuit::new(1, 0);
        circuit.rz(FRAC_PI_2, QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();

        let pass = SynthesizeRzPass::new(Arc::new(EighthTurns), -1.0);
        let modified = pass.run(&mut circuit).unwrap();
        assert!(modified);
        let names: Vec<_> = circuit.operations().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["t", "t", "h"]);
    }

    #[test]
    fn test_audit_passes_correct_word() {
        let mut circuit = Circuit::new(1, 0);
        circuit.rz(FRAC_PI_4, QubitId(0)).unwrap();

        let pass = SynthesizeRzPass::new(Arc::new(EighthTurns), 1e-9).with_audit();
        assert!(pass.run(&mut circuit).unwrap());
        assert!(circuit.is_clifford_t());
    }

    #[test]
    fn test_audit_rejects_bad_word() {
        let mut circuit = Circuit::new(1, 0);
        circuit.rz(FRAC_PI_4, QubitId(0)).unwrap();

        let pass = SynthesizeRzPass::new(Arc::new(Broken), 1e-9).with_audit();
        let err = pass.run(&mut circuit).unwrap_err();
        assert!(matches!(err, TranspileError::SynthesisAccuracy { .. }));
        // The failing RZ stays in place.
        assert_eq!(circuit.operations()[0].name(), "rz");
    }

    #[test]
    fn test_no_rz_means_no_change() {
        let mut circuit = Circuit::new(1, 0);
        circuit.h(QubitId(0)).unwrap();
        let pass = SynthesizeRzPass::new(Arc::new(EighthTurns), -1.0);
        assert!(!pass.run(&mut circuit).unwrap());
    }
}
