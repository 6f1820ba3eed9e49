//! Decomposition into the universal Clifford+T+RZ gate set.

use alsvin_ir::{Circuit, Instruction, InstructionKind, QubitId, StandardGate};

use crate::error::TranspileResult;
use crate::pass::Pass;

/// Rewrites every operation into
/// {H, S, S†, T, T†, X, Y, Z, CX, RZ, measure, reset, barrier}, optionally
/// keeping CCX as a primitive.
///
/// Running the pass twice yields the same output.
pub struct DecomposePass {
    keep_ccx: bool,
}

impl DecomposePass {
    /// Create a decompose pass. With `keep_ccx`, Toffoli gates pass through
    /// unchanged; otherwise they expand to the standard ancilla-free
    /// 15-operation sequence (7 T/T†, 6 CX, 2 H).
    pub fn new(keep_ccx: bool) -> Self {
        Self { keep_ccx }
    }

    fn expand(&self, inst: &Instruction, out: &mut Vec<Instruction>) -> bool {
        let InstructionKind::Gate(gate) = &inst.kind else {
            out.push(inst.clone());
            return false;
        };
        match *gate {
            StandardGate::CCX if !self.keep_ccx => {
                let (a, b, c) = (inst.qubits[0], inst.qubits[1], inst.qubits[2]);
                expand_ccx(a, b, c, out);
                true
            }
            StandardGate::Swap => {
                let (a, b) = (inst.qubits[0], inst.qubits[1]);
                out.push(Instruction::two_qubit_gate(StandardGate::CX, a, b));
                out.push(Instruction::two_qubit_gate(StandardGate::CX, b, a));
                out.push(Instruction::two_qubit_gate(StandardGate::CX, a, b));
                true
            }
            StandardGate::CZ => {
                let (a, b) = (inst.qubits[0], inst.qubits[1]);
                out.push(Instruction::single_qubit_gate(StandardGate::H, b));
                out.push(Instruction::two_qubit_gate(StandardGate::CX, a, b));
                out.push(Instruction::single_qubit_gate(StandardGate::H, b));
                true
            }
            StandardGate::Rx(theta) => {
                let q = inst.qubits[0];
                out.push(Instruction::single_qubit_gate(StandardGate::H, q));
                out.push(Instruction::single_qubit_gate(StandardGate::Rz(theta), q));
                out.push(Instruction::single_qubit_gate(StandardGate::H, q));
                true
            }
            StandardGate::Ry(theta) => {
                // S·H·RZ(θ)·H·S† as a matrix product, so S† is applied first.
                let q = inst.qubits[0];
                out.push(Instruction::single_qubit_gate(StandardGate::Sdg, q));
                out.push(Instruction::single_qubit_gate(StandardGate::H, q));
                out.push(Instruction::single_qubit_gate(StandardGate::Rz(theta), q));
                out.push(Instruction::single_qubit_gate(StandardGate::H, q));
                out.push(Instruction::single_qubit_gate(StandardGate::S, q));
                true
            }
            StandardGate::SX => {
                let q = inst.qubits[0];
                out.push(Instruction::single_qubit_gate(StandardGate::H, q));
                out.push(Instruction::single_qubit_gate(StandardGate::S, q));
                out.push(Instruction::single_qubit_gate(StandardGate::H, q));
                true
            }
            StandardGate::SXdg => {
                let q = inst.qubits[0];
                out.push(Instruction::single_qubit_gate(StandardGate::H, q));
                out.push(Instruction::single_qubit_gate(StandardGate::Sdg, q));
                out.push(Instruction::single_qubit_gate(StandardGate::H, q));
                true
            }
            _ => {
                out.push(inst.clone());
                false
            }
        }
    }
}

/// The standard ancilla-free CCX expansion (control a, control b, target c).
fn expand_ccx(a: QubitId, b: QubitId, c: QubitId, out: &mut Vec<Instruction>) {
    use StandardGate::{Tdg, CX, H, T};
    out.push(Instruction::single_qubit_gate(H, c));
    out.push(Instruction::two_qubit_gate(CX, b, c));
    out.push(Instruction::single_qubit_gate(Tdg, c));
    out.push(Instruction::two_qubit_gate(CX, a, c));
    out.push(Instruction::single_qubit_gate(T, c));
    out.push(Instruction::two_qubit_gate(CX, b, c));
    out.push(Instruction::single_qubit_gate(Tdg, c));
    out.push(Instruction::two_qubit_gate(CX, a, c));
    out.push(Instruction::single_qubit_gate(T, b));
    out.push(Instruction::single_qubit_gate(T, c));
    out.push(Instruction::single_qubit_gate(H, c));
    out.push(Instruction::two_qubit_gate(CX, a, b));
    out.push(Instruction::single_qubit_gate(T, a));
    out.push(Instruction::single_qubit_gate(Tdg, b));
    out.push(Instruction::two_qubit_gate(CX, a, b));
}

impl Pass for DecomposePass {
    fn name(&self) -> &'static str {
        "DECOMPOSE"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let ops = circuit.take_operations();
        let mut out = Vec::with_capacity(ops.len());
        let mut modified = false;
        for inst in &ops {
            modified |= self.expand(inst, &mut out);
        }
        circuit.set_operations(out)?;
        Ok(modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvin_ir::QubitId;

    fn names(circuit: &Circuit) -> Vec<&'static str> {
        circuit.operations().iter().map(|i| i.name()).collect()
    }

    #[test]
    fn test_ccx_expansion() {
        let mut circuit = Circuit::new(3, 0);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();

        let modified = DecomposePass::new(false).run(&mut circuit).unwrap();
        assert!(modified);
        assert_eq!(circuit.num_ops(), 15);

        let counts = circuit.count_ops();
        assert_eq!(counts["cx"], 6);
        assert_eq!(counts["h"], 2);
        assert_eq!(counts.get("t").unwrap_or(&0) + counts.get("tdg").unwrap_or(&0), 7);
        assert_eq!(
            names(&circuit),
            vec![
                "h", "cx", "tdg", "cx", "t", "cx", "tdg", "cx", "t", "t", "h", "cx", "t", "tdg",
                "cx"
            ]
        );
        assert!(circuit.is_clifford_t());
    }

    #[test]
    fn test_ccx_kept() {
        let mut circuit = Circuit::new(3, 0);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();

        let modified = DecomposePass::new(true).run(&mut circuit).unwrap();
        assert!(!modified);
        assert_eq!(names(&circuit), vec!["ccx"]);
    }

    #[test]
    fn test_swap_cz_expansion() {
        let mut circuit = Circuit::new(2, 0);
        circuit.swap(QubitId(0), QubitId(1)).unwrap();
        circuit.cz(QubitId(0), QubitId(1)).unwrap();

        DecomposePass::new(false).run(&mut circuit).unwrap();
        assert_eq!(names(&circuit), vec!["cx", "cx", "cx", "h", "cx", "h"]);
        // SWAP alternates direction: a,b then b,a then a,b.
        assert_eq!(circuit.operations()[0].qubits, vec![QubitId(0), QubitId(1)]);
        assert_eq!(circuit.operations()[1].qubits, vec![QubitId(1), QubitId(0)]);
        assert_eq!(circuit.operations()[2].qubits, vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_rotation_expansion() {
        let mut circuit = Circuit::new(1, 0);
        circuit.rx(0.5, QubitId(0)).unwrap();
        circuit.ry(0.5, QubitId(0)).unwrap();

        DecomposePass::new(false).run(&mut circuit).unwrap();
        assert_eq!(
            names(&circuit),
            vec!["h", "rz", "h", "sdg", "h", "rz", "h", "s"]
        );
    }

    #[test]
    fn test_idempotence() {
        let mut circuit = Circuit::new(3, 1);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        circuit.swap(QubitId(0), QubitId(1)).unwrap();
        circuit.sx(QubitId(2)).unwrap();
        circuit.rx(1.25, QubitId(0)).unwrap();
        circuit.measure(QubitId(2), alsvin_ir::ClbitId(0)).unwrap();

        let pass = DecomposePass::new(false);
        pass.run(&mut circuit).unwrap();
        let first = circuit.clone();
        let modified = pass.run(&mut circuit).unwrap();
        assert!(!modified);
        assert_eq!(circuit, first);
    }

    #[test]
    fn test_passthrough() {
        let mut circuit = Circuit::new(2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.t(QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let modified = DecomposePass::new(false).run(&mut circuit).unwrap();
        assert!(!modified);
        assert_eq!(names(&circuit), vec!["h", "t", "cx"]);
    }
}
