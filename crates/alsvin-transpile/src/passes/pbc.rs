//! Conversion of Clifford+T circuits into Pauli-Based Circuit form.

use alsvin_ir::{Circuit, Instruction, InstructionKind, StandardGate};

use crate::error::{TranspileError, TranspileResult};
use crate::frame::CliffordFrame;
use crate::pass::Pass;

/// Converts a Clifford+T circuit into a sequence of π/4, π/2 and π Pauli
/// rotations plus Pauli measurements, by propagating a Clifford frame to the
/// end of the circuit.
///
/// The frame is a symplectic tableau (see [`CliffordFrame`]). Scanning left
/// to right:
///
/// - H, CX, X, Y update the frame and emit nothing;
/// - T/T† emit `t_pauli(±C†Z_qC)`, S/S† emit `s_pauli(±C†Z_qC)`, Z emits
///   `z_pauli(C†Z_qC)`;
/// - measurements emit `m_pauli(C†Z_qC)` with the classical bit retained;
/// - resets emit an outcome-discarded `m_pauli` and flush the frame on the
///   qubit;
/// - barriers are preserved as fences.
///
/// With `keep_cx`, CX gates are emitted verbatim and the frame is conjugated
/// so later emissions stay correct. The trailing frame is discarded: every
/// measurement has already been folded into its Pauli, so the tail is
/// unobservable.
pub struct PbcPass {
    keep_cx: bool,
}

impl PbcPass {
    /// Create the pass.
    pub fn new(keep_cx: bool) -> Self {
        Self { keep_cx }
    }
}

impl Pass for PbcPass {
    fn name(&self) -> &'static str {
        "TO_PBC"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        if !circuit.is_clifford_t() {
            return Err(TranspileError::NotCliffordT { pass: self.name() });
        }
        let n = circuit.num_qubits();
        let mut frame = CliffordFrame::identity(n);
        let ops = circuit.take_operations();
        let mut out = Vec::with_capacity(ops.len());

        for inst in &ops {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    let q = inst.qubits[0];
                    match gate {
                        StandardGate::T => {
                            out.push(Instruction::t_pauli(frame.z_image(q).clone()));
                        }
                        StandardGate::Tdg => {
                            out.push(Instruction::t_pauli(frame.z_image(q).negated()));
                        }
                        StandardGate::S => {
                            out.push(Instruction::s_pauli(frame.z_image(q).clone()));
                        }
                        StandardGate::Sdg => {
                            out.push(Instruction::s_pauli(frame.z_image(q).negated()));
                        }
                        StandardGate::Z => {
                            out.push(Instruction::z_pauli(frame.z_image(q).clone()));
                        }
                        StandardGate::CX if self.keep_cx => {
                            out.push(inst.clone());
                            frame.conjugate_by_kept_cx(inst.qubits[0], inst.qubits[1]);
                        }
                        StandardGate::H
                        | StandardGate::X
                        | StandardGate::Y
                        | StandardGate::CX => {
                            frame.absorb(gate, &inst.qubits);
                        }
                        other => {
                            unreachable!("non-Clifford+T gate '{}' after guard", other.name())
                        }
                    }
                }
                InstructionKind::Measure => {
                    let q = inst.qubits[0];
                    out.push(Instruction::m_pauli(
                        frame.z_image(q).clone(),
                        inst.clbits.first().copied(),
                    ));
                }
                InstructionKind::Reset => {
                    let q = inst.qubits[0];
                    out.push(Instruction::m_pauli(frame.z_image(q).clone(), None));
                    frame.flush_qubit(q);
                }
                InstructionKind::Barrier => out.push(inst.clone()),
                other => unreachable!("Pauli-based op {other:?} after Clifford+T guard"),
            }
        }

        let modified = out != ops;
        circuit.set_operations(out)?;
        Ok(modified)
    }
}
