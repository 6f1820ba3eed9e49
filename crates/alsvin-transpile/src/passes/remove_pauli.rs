//! Removal of leading and trailing Pauli operators.

use rustc_hash::FxHashMap;

use alsvin_ir::{Circuit, InstructionKind, StandardGate};

use crate::error::TranspileResult;
use crate::pass::Pass;

/// Drops leading and trailing Pauli operators whose effect is absorbable
/// into state preparation or measurement outcomes.
///
/// **The classical record is not adjusted.** A trailing X before a Z-basis
/// measurement flips the interpretation of the classical bit; this pass
/// drops the Pauli and records nothing. Callers that need exact outcome
/// semantics must apply the inverse flips classically. The transformation is
/// a statistical-equivalence concession and is only run when explicitly
/// requested — it is not part of any predefined sequence.
///
/// On standard circuits, a Pauli gate is *leading* when it is the first
/// operation on its wire and *trailing* when only measurements and barriers
/// follow it on its wire. On PBC circuits, π rotations followed only by
/// barriers and Pauli measurements are dropped.
pub struct RemovePauliPass;

impl RemovePauliPass {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for RemovePauliPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for RemovePauliPass {
    fn name(&self) -> &'static str {
        "REMOVE_PAULI"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        if circuit.has_pauli_ops() {
            self.run_pbc(circuit)
        } else {
            self.run_standard(circuit)
        }
    }
}

fn is_pauli_gate(kind: &InstructionKind) -> bool {
    matches!(
        kind,
        InstructionKind::Gate(StandardGate::X | StandardGate::Y | StandardGate::Z)
    )
}

impl RemovePauliPass {
    fn run_standard(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        // Per-wire op positions, in circuit order.
        let mut wires: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        for (pos, inst) in circuit.operations().iter().enumerate() {
            for &q in &inst.qubits {
                wires.entry(q.index()).or_default().push(pos);
            }
        }

        let ops = circuit.take_operations();
        let mut keep = vec![true; ops.len()];

        for positions in wires.values() {
            // Leading run of Pauli gates on this wire.
            for &pos in positions {
                if is_pauli_gate(&ops[pos].kind) {
                    keep[pos] = false;
                } else {
                    break;
                }
            }
            // Trailing run: walk backwards past measurements and barriers,
            // then drop the contiguous Pauli run.
            let mut idx = positions.len();
            while idx > 0 {
                let pos = positions[idx - 1];
                if ops[pos].is_measure() || ops[pos].is_barrier() {
                    idx -= 1;
                } else {
                    break;
                }
            }
            while idx > 0 {
                let pos = positions[idx - 1];
                if is_pauli_gate(&ops[pos].kind) {
                    keep[pos] = false;
                    idx -= 1;
                } else {
                    break;
                }
            }
        }

        let out: Vec<_> = ops
            .into_iter()
            .zip(&keep)
            .filter_map(|(inst, &k)| k.then_some(inst))
            .collect();
        let modified = keep.iter().any(|&k| !k);
        circuit.set_operations(out)?;
        Ok(modified)
    }

    fn run_pbc(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let ops = circuit.take_operations();
        let mut keep = vec![true; ops.len()];

        // Walk backwards: barriers and Pauli measurements are transparent,
        // π rotations in the trailing region are dropped, anything else
        // ends the region.
        for (pos, inst) in ops.iter().enumerate().rev() {
            match &inst.kind {
                InstructionKind::Barrier | InstructionKind::MPauli(_) => {}
                InstructionKind::ZPauli(_) => keep[pos] = false,
                _ => break,
            }
        }

        let out: Vec<_> = ops
            .into_iter()
            .zip(&keep)
            .filter_map(|(inst, &k)| k.then_some(inst))
            .collect();
        let modified = keep.iter().any(|&k| !k);
        circuit.set_operations(out)?;
        Ok(modified)
    }
}
