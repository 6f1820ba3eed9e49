//! Peephole gate fusion.

use std::f64::consts::FRAC_PI_4;

use alsvin_ir::{Circuit, Instruction, InstructionKind, StandardGate};

use crate::error::TranspileResult;
use crate::pass::Pass;
use crate::passes::remove_trivial_rz::trivial_fragment;

/// Coalesces adjacent same-axis rotations and cancels adjacent self-inverse
/// pairs.
///
/// Adjacency is per qubit: operations on disjoint qubit sets are transparent,
/// barriers, measurements and resets are opaque. The Z-axis family
/// {Z, S, S†, T, T†, RZ} fuses by angle addition (exact eighth-turn
/// arithmetic for the named gates) and re-emits the minimal canonical
/// fragment; H·H, X·X, Y·Y and CX·CX on identical operands cancel. The pass
/// iterates to a fixed point with an iteration cap of `min(|ops|, 64)`.
pub struct GateFusionPass;

impl GateFusionPass {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for GateFusionPass {
    fn default() -> Self {
        Self::new()
    }
}

/// A single-qubit Z-axis rotation: an exact multiple of π/4 or a raw angle.
#[derive(Debug, Clone, Copy)]
enum ZAxis {
    /// k·π/4 with exact integer arithmetic.
    Eighths(i32),
    /// An arbitrary RZ angle.
    Angle(f64),
}

impl ZAxis {
    fn of(gate: &StandardGate) -> Option<ZAxis> {
        match gate {
            StandardGate::Z => Some(ZAxis::Eighths(4)),
            StandardGate::S => Some(ZAxis::Eighths(2)),
            StandardGate::Sdg => Some(ZAxis::Eighths(-2)),
            StandardGate::T => Some(ZAxis::Eighths(1)),
            StandardGate::Tdg => Some(ZAxis::Eighths(-1)),
            StandardGate::Rz(theta) => Some(ZAxis::Angle(*theta)),
            _ => None,
        }
    }

    fn angle(self) -> f64 {
        match self {
            ZAxis::Eighths(k) => f64::from(k) * FRAC_PI_4,
            ZAxis::Angle(theta) => theta,
        }
    }
}

/// The canonical fragment for k·π/4 with k balanced into [−4, 3].
fn eighths_fragment(k: i32) -> Vec<StandardGate> {
    let m = ((k + 4).rem_euclid(8)) - 4;
    match m {
        0 => vec![],
        1 => vec![StandardGate::T],
        -1 => vec![StandardGate::Tdg],
        2 => vec![StandardGate::S],
        -2 => vec![StandardGate::Sdg],
        3 => vec![StandardGate::S, StandardGate::T],
        -3 => vec![StandardGate::Sdg, StandardGate::Tdg],
        -4 => vec![StandardGate::Z],
        _ => unreachable!(),
    }
}

/// Outcome of trying to fuse two adjacent single-qubit gates.
enum Fuse {
    /// No fusion rule applies.
    None,
    /// The pair is already in canonical form; leave it alone.
    Canonical,
    /// Replace the pair with this fragment.
    Replace(Vec<StandardGate>),
}

fn fuse_1q(prev: &StandardGate, next: &StandardGate) -> Fuse {
    // Self-inverse pairs cancel. Z·Z is covered by the eighths arithmetic.
    if prev == next
        && matches!(prev, StandardGate::H | StandardGate::X | StandardGate::Y)
    {
        return Fuse::Replace(vec![]);
    }
    match (ZAxis::of(prev), ZAxis::of(next)) {
        (Some(ZAxis::Eighths(k1)), Some(ZAxis::Eighths(k2))) => {
            let fragment = eighths_fragment(k1 + k2);
            if fragment.len() == 2 && fragment[0] == *prev && fragment[1] == *next {
                Fuse::Canonical
            } else {
                Fuse::Replace(fragment)
            }
        }
        (Some(a), Some(b)) => {
            let theta = a.angle() + b.angle();
            match trivial_fragment(theta) {
                Some(fragment) => Fuse::Replace(fragment),
                None => Fuse::Replace(vec![StandardGate::Rz(theta)]),
            }
        }
        _ => Fuse::None,
    }
}

/// One fusion scan over an operation sequence.
struct Scanner {
    /// Output slots; cancelled operations become `None`.
    out: Vec<Option<Instruction>>,
    /// Per-qubit indices of live output ops touching that wire, in order.
    stacks: Vec<Vec<usize>>,
    modified: bool,
}

impl Scanner {
    fn new(num_qubits: usize, capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            stacks: vec![vec![]; num_qubits],
            modified: false,
        }
    }

    /// The live single-qubit gate on top of a wire, if any.
    fn top_1q(&self, q: usize) -> Option<StandardGate> {
        let &idx = self.stacks[q].last()?;
        let inst = self.out[idx].as_ref()?;
        match &inst.kind {
            InstructionKind::Gate(g) if inst.qubits.len() == 1 => Some(*g),
            _ => None,
        }
    }

    fn push_on(&mut self, inst: Instruction, wires: &[usize]) {
        let idx = self.out.len();
        for &w in wires {
            self.stacks[w].push(idx);
        }
        self.out.push(Some(inst));
    }

    fn remove_top(&mut self, q: usize) {
        let idx = self.stacks[q].pop().expect("wire stack underflow");
        self.out[idx] = None;
    }

    /// Emit a single-qubit gate, fusing against the wire top until stable.
    fn emit_1q(&mut self, mut gate: StandardGate, q: usize) {
        loop {
            let Some(prev) = self.top_1q(q) else {
                self.push_on(Instruction::single_qubit_gate(gate, q.into()), &[q]);
                return;
            };
            match fuse_1q(&prev, &gate) {
                Fuse::None | Fuse::Canonical => {
                    self.push_on(Instruction::single_qubit_gate(gate, q.into()), &[q]);
                    return;
                }
                Fuse::Replace(fragment) => {
                    self.remove_top(q);
                    self.modified = true;
                    match fragment.as_slice() {
                        [] => return,
                        [single] => gate = *single,
                        [first, second] => {
                            self.emit_1q(*first, q);
                            gate = *second;
                        }
                        _ => unreachable!("fusion fragments have at most two gates"),
                    }
                }
            }
        }
    }

    fn emit_cx(&mut self, inst: Instruction) {
        let c = inst.qubits[0].index();
        let t = inst.qubits[1].index();
        // Cancel against an identical CX that is the top of both wires.
        if let (Some(&a), Some(&b)) = (self.stacks[c].last(), self.stacks[t].last()) {
            if a == b {
                if let Some(prev) = self.out[a].as_ref() {
                    if prev.kind == inst.kind && prev.qubits == inst.qubits {
                        self.remove_top(c);
                        self.stacks[t].pop();
                        self.modified = true;
                        return;
                    }
                }
            }
        }
        self.push_on(inst, &[c, t]);
    }

    /// Emit an opaque operation: it blocks fusion across its wires.
    fn emit_blocker(&mut self, inst: Instruction, all_qubits: usize) {
        let wires: Vec<usize> = if inst.is_barrier() && inst.qubits.is_empty() {
            (0..all_qubits).collect()
        } else if let Some(op) = inst.as_pauli() {
            op.support().map(|q| q.index()).collect()
        } else {
            inst.qubits.iter().map(|q| q.index()).collect()
        };
        self.push_on(inst, &wires);
    }
}

impl Pass for GateFusionPass {
    fn name(&self) -> &'static str {
        "GATE_FUSION"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let num_qubits = circuit.num_qubits();
        let cap = circuit.num_ops().min(64).max(1);
        let mut modified = false;
        for _ in 0..cap {
            let ops = circuit.take_operations();
            let mut scanner = Scanner::new(num_qubits, ops.len());
            for inst in ops {
                match &inst.kind {
                    InstructionKind::Gate(g) if inst.qubits.len() == 1 => {
                        scanner.emit_1q(*g, inst.qubits[0].index());
                    }
                    InstructionKind::Gate(StandardGate::CX) => scanner.emit_cx(inst),
                    _ => scanner.emit_blocker(inst, num_qubits),
                }
            }
            let changed = scanner.modified;
            circuit.set_operations(scanner.out.into_iter().flatten().collect())?;
            modified |= changed;
            if !changed {
                break;
            }
        }
        Ok(modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvin_ir::{ClbitId, QubitId};
    use std::f64::consts::PI;

    fn names(circuit: &Circuit) -> Vec<&'static str> {
        circuit.operations().iter().map(|i| i.name()).collect()
    }

    #[test]
    fn test_self_inverse_pairs_cancel() {
        let mut circuit = Circuit::new(2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let modified = GateFusionPass::new().run(&mut circuit).unwrap();
        assert!(modified);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_nested_cancellation_single_scan() {
        let mut circuit = Circuit::new(1, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();

        GateFusionPass::new().run(&mut circuit).unwrap();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_rz_fusion() {
        let mut circuit = Circuit::new(1, 0);
        circuit.rz(0.3, QubitId(0)).unwrap();
        circuit.rz(0.4, QubitId(0)).unwrap();

        GateFusionPass::new().run(&mut circuit).unwrap();
        assert_eq!(circuit.num_ops(), 1);
        let gate = circuit.operations()[0].as_gate().unwrap();
        match gate {
            StandardGate::Rz(theta) => assert!((theta - 0.7).abs() < 1e-12),
            other => panic!("expected rz, got {}", other.name()),
        }
    }

    #[test]
    fn test_rz_fusion_to_identity() {
        let mut circuit = Circuit::new(1, 0);
        circuit.rz(0.3, QubitId(0)).unwrap();
        circuit.rz(-0.3, QubitId(0)).unwrap();

        GateFusionPass::new().run(&mut circuit).unwrap();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_named_z_axis_fusion() {
        // T·T → S, then S·S → Z, all in one run.
        let mut circuit = Circuit::new(1, 0);
        circuit.t(QubitId(0)).unwrap();
        circuit.t(QubitId(0)).unwrap();
        circuit.s(QubitId(0)).unwrap();

        GateFusionPass::new().run(&mut circuit).unwrap();
        assert_eq!(names(&circuit), vec!["z"]);

        // T·S† → T†.
        let mut circuit = Circuit::new(1, 0);
        circuit.t(QubitId(0)).unwrap();
        circuit.sdg(QubitId(0)).unwrap();
        GateFusionPass::new().run(&mut circuit).unwrap();
        assert_eq!(names(&circuit), vec!["tdg"]);
    }

    #[test]
    fn test_t_rz_mixed_fusion() {
        let mut circuit = Circuit::new(1, 0);
        circuit.t(QubitId(0)).unwrap();
        circuit.rz(PI / 4.0, QubitId(0)).unwrap();

        GateFusionPass::new().run(&mut circuit).unwrap();
        assert_eq!(names(&circuit), vec!["s"]);
    }

    #[test]
    fn test_disjoint_qubits_are_transparent() {
        let mut circuit = Circuit::new(3, 0);
        circuit.t(QubitId(0)).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();
        circuit.t(QubitId(0)).unwrap();

        GateFusionPass::new().run(&mut circuit).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts["s"], 1);
        assert_eq!(counts["cx"], 1);
        assert!(!counts.contains_key("t"));
    }

    #[test]
    fn test_barrier_and_measure_block_fusion() {
        let mut circuit = Circuit::new(1, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier([QubitId(0)]).unwrap();
        circuit.h(QubitId(0)).unwrap();

        let modified = GateFusionPass::new().run(&mut circuit).unwrap();
        assert!(!modified);
        assert_eq!(circuit.num_ops(), 3);

        let mut circuit = Circuit::new(1, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();

        let modified = GateFusionPass::new().run(&mut circuit).unwrap();
        assert!(!modified);
        assert_eq!(names(&circuit), vec!["h", "measure", "h"]);
    }

    #[test]
    fn test_cx_not_cancelled_across_intervening_gate() {
        let mut circuit = Circuit::new(2, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let modified = GateFusionPass::new().run(&mut circuit).unwrap();
        assert!(!modified);
        assert_eq!(circuit.num_ops(), 3);
    }

    #[test]
    fn test_reversed_cx_not_cancelled() {
        let mut circuit = Circuit::new(2, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(0)).unwrap();

        let modified = GateFusionPass::new().run(&mut circuit).unwrap();
        assert!(!modified);
        assert_eq!(circuit.num_ops(), 2);
    }

    #[test]
    fn test_fixed_point() {
        let mut circuit = Circuit::new(1, 0);
        circuit.s(QubitId(0)).unwrap();
        circuit.t(QubitId(0)).unwrap();

        // S·T is already canonical; the pass must report no change.
        let modified = GateFusionPass::new().run(&mut circuit).unwrap();
        assert!(!modified);
        assert_eq!(names(&circuit), vec!["s", "t"]);
    }
}
