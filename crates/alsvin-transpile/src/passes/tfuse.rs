//! T-count optimization for Pauli-Based Circuits.

use alsvin_ir::{Circuit, Instruction, InstructionKind, PauliOp};

use crate::error::{TranspileError, TranspileResult};
use crate::pass::Pass;

/// Fuses adjacent Pauli rotations on equal strings and cancels opposite
/// pairs.
///
/// Rules, applied through a commuting-transparent forward scan:
/// - `t_pauli(P) · t_pauli(P)` → `s_pauli(P)`; opposite signs cancel;
/// - `s_pauli(P) · s_pauli(P)` → `z_pauli(P)`; opposite signs cancel;
/// - `z_pauli` pairs on the same string cancel regardless of sign (they
///   differ only by a global phase);
/// - commuting operations may be reordered past each other, so a rotation
///   fuses with the first matching partner reachable through operations that
///   all commute with it; anticommuting rotations, barriers and kept CX
///   gates are opaque, Pauli measurements are transparent iff they commute.
///
/// The pass iterates to a fixed point with a cap proportional to the number
/// of π/4 rotations and never increases the T-count.
pub struct TfusePass;

impl TfusePass {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TfusePass {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotation family of a PBC operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    T,
    S,
    Z,
}

fn family(inst: &Instruction) -> Option<Family> {
    match inst.kind {
        InstructionKind::TPauli(_) => Some(Family::T),
        InstructionKind::SPauli(_) => Some(Family::S),
        InstructionKind::ZPauli(_) => Some(Family::Z),
        _ => None,
    }
}

fn combine(fam: Family, op: PauliOp) -> Option<Instruction> {
    match fam {
        Family::T => Some(Instruction::s_pauli(op)),
        Family::S => Some(Instruction::z_pauli(op)),
        Family::Z => None,
    }
}

impl Pass for TfusePass {
    fn name(&self) -> &'static str {
        "TFUSE"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        // A PBC circuit contains only Pauli-based ops, barriers, and the CX
        // gates a keep_cx conversion left in place.
        let is_pbc_op = |inst: &Instruction| {
            inst.is_pauli_based() || inst.is_barrier() || inst.name() == "cx"
        };
        if !circuit.operations().iter().all(is_pbc_op) {
            return Err(TranspileError::NotPbc { pass: self.name() });
        }

        let cap = (2 * circuit.t_count()).max(circuit.num_ops()).max(4);
        let mut modified = false;
        for _ in 0..cap {
            if !self.sweep(circuit)? {
                break;
            }
            modified = true;
        }
        Ok(modified)
    }
}

impl TfusePass {
    /// One fusion sweep. Returns whether anything changed.
    fn sweep(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let ops = circuit.take_operations();
        let mut slots: Vec<Option<Instruction>> = ops.into_iter().map(Some).collect();
        let mut changed = false;

        for i in 0..slots.len() {
            let Some(inst) = slots[i].as_ref() else {
                continue;
            };
            let Some(fam) = family(inst) else {
                continue;
            };
            let p = inst.as_pauli().expect("rotation carries a Pauli").clone();

            for j in i + 1..slots.len() {
                let Some(other) = slots[j].as_ref() else {
                    continue;
                };
                match &other.kind {
                    InstructionKind::Barrier => break,
                    InstructionKind::MPauli(q) => {
                        if p.commutes_with(q) {
                            continue;
                        }
                        break;
                    }
                    InstructionKind::TPauli(q)
                    | InstructionKind::SPauli(q)
                    | InstructionKind::ZPauli(q) => {
                        let same_family = family(other) == Some(fam);
                        if same_family && p.same_string(q) {
                            let opposite = p.is_negative() != q.is_negative();
                            let merged = if fam == Family::Z || opposite {
                                // Opposite rotations cancel exactly; a pair
                                // of π rotations is a global phase.
                                None
                            } else {
                                combine(fam, p.clone())
                            };
                            slots[i] = merged;
                            slots[j] = None;
                            changed = true;
                            break;
                        }
                        if p.commutes_with(q) {
                            continue;
                        }
                        break;
                    }
                    // A kept CX (or anything else opaque) blocks the scan.
                    _ => break,
                }
            }
        }

        circuit.set_operations(slots.into_iter().flatten().collect())?;
        Ok(changed)
    }
}
