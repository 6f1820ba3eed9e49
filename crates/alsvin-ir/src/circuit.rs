//! The circuit container and its builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::pauli::PauliOp;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit: an ordered sequence of operations over a fixed qubit
/// register plus a classical-bit register for measurement destinations.
///
/// Invariants, enforced on every append and on wholesale replacement:
/// - every qubit/clbit index is within the registers;
/// - multi-qubit gates have distinct operands;
/// - Pauli strings span exactly the qubit register;
/// - Pauli-based operations never coexist with standard operations in the
///   same circuit. Barriers are valid in both forms, and CX gates are
///   exempt as well: a PBC conversion asked to preserve CX leaves them
///   interleaved with the Pauli rotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    ops: Vec<Instruction>,
    /// Count of Pauli-based ops, kept for O(1) exclusivity checks.
    pauli_ops: usize,
    /// Count of exclusivity-relevant standard ops (everything that is not
    /// Pauli-based, a barrier, or a CX).
    standard_ops: usize,
}

/// Whether an instruction participates in the PBC exclusivity check on the
/// standard side.
fn is_exclusive_standard(inst: &Instruction) -> bool {
    !inst.is_pauli_based()
        && !inst.is_barrier()
        && !matches!(inst.kind, InstructionKind::Gate(StandardGate::CX))
}

impl Circuit {
    /// Create an empty circuit with fixed register sizes.
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits,
            ops: vec![],
            pauli_ops: 0,
            standard_ops: 0,
        }
    }

    // =========================================================================
    // Registers and accessors
    // =========================================================================

    /// The number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The number of classical bits.
    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// The operation sequence.
    #[inline]
    pub fn operations(&self) -> &[Instruction] {
        &self.ops
    }

    /// The number of operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Check whether the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Check whether any operation is Pauli-based.
    pub fn has_pauli_ops(&self) -> bool {
        self.pauli_ops > 0
    }

    /// Check whether any operation is standard in the exclusivity sense
    /// (a gate other than CX, a measurement, or a reset).
    pub fn has_standard_ops(&self) -> bool {
        self.standard_ops > 0
    }

    /// Parse a Pauli string, validating its length against this register.
    pub fn pauli_from_str(&self, s: &str) -> IrResult<PauliOp> {
        let op = PauliOp::from_str(s)?;
        if op.num_qubits() != self.num_qubits {
            return Err(IrError::PauliLengthMismatch {
                expected: self.num_qubits,
                got: op.num_qubits(),
            });
        }
        Ok(op)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append an instruction, validating every circuit invariant.
    pub fn push(&mut self, inst: Instruction) -> IrResult<()> {
        self.validate(&inst)?;
        if inst.is_pauli_based() {
            self.pauli_ops += 1;
        } else if is_exclusive_standard(&inst) {
            self.standard_ops += 1;
        }
        self.ops.push(inst);
        Ok(())
    }

    /// Replace the whole operation sequence, revalidating every invariant.
    ///
    /// Passes that rewrite the circuit wholesale build a fresh vector and
    /// install it through this method.
    pub fn set_operations(&mut self, ops: Vec<Instruction>) -> IrResult<()> {
        let mut pauli_ops = 0;
        let mut standard_ops = 0;
        for inst in &ops {
            self.validate_shape(inst)?;
            if inst.is_pauli_based() {
                pauli_ops += 1;
            } else if is_exclusive_standard(inst) {
                standard_ops += 1;
            }
        }
        if pauli_ops > 0 && standard_ops > 0 {
            return Err(IrError::MixedPauliOps);
        }
        self.ops = ops;
        self.pauli_ops = pauli_ops;
        self.standard_ops = standard_ops;
        Ok(())
    }

    /// Remove and return the whole operation sequence, leaving the circuit
    /// empty. The usual companion of [`Circuit::set_operations`].
    pub fn take_operations(&mut self) -> Vec<Instruction> {
        self.pauli_ops = 0;
        self.standard_ops = 0;
        std::mem::take(&mut self.ops)
    }

    /// Validate shape invariants plus PBC exclusivity against current state.
    fn validate(&self, inst: &Instruction) -> IrResult<()> {
        self.validate_shape(inst)?;
        if inst.is_pauli_based() {
            if self.standard_ops > 0 {
                return Err(IrError::MixedPauliOps);
            }
        } else if is_exclusive_standard(inst) && self.pauli_ops > 0 {
            return Err(IrError::MixedPauliOps);
        }
        Ok(())
    }

    /// Validate index ranges, operand distinctness and Pauli string lengths.
    fn validate_shape(&self, inst: &Instruction) -> IrResult<()> {
        for &qubit in &inst.qubits {
            if qubit.index() >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: Some(inst.name().to_string()),
                });
            }
        }
        for &clbit in &inst.clbits {
            if clbit.index() >= self.num_clbits {
                return Err(IrError::ClbitOutOfRange {
                    clbit,
                    num_clbits: self.num_clbits,
                });
            }
        }
        // Multi-qubit gates need distinct operands; barriers may list any set.
        if inst.is_gate() {
            for (i, &a) in inst.qubits.iter().enumerate() {
                if inst.qubits[i + 1..].contains(&a) {
                    return Err(IrError::DuplicateQubit {
                        qubit: a,
                        gate_name: Some(inst.name().to_string()),
                    });
                }
            }
        }
        if let Some(op) = inst.as_pauli() {
            if op.num_qubits() != self.num_qubits {
                return Err(IrError::PauliLengthMismatch {
                    expected: self.num_qubits,
                    got: op.num_qubits(),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Y, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Z, qubit))?;
        Ok(self)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::S, qubit))?;
        Ok(self)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))?;
        Ok(self)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::T, qubit))?;
        Ok(self)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))?;
        Ok(self)
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::SX, qubit))?;
        Ok(self)
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::SXdg, qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Rx(theta),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Ry(theta),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Rz(theta),
            qubit,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CX, control, target))?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::CZ, q1, q2))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::gate(StandardGate::CCX, [c1, c2, target]))?;
        Ok(self)
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::reset(qubit))?;
        Ok(self)
    }

    /// Apply a barrier to the specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Pauli-based operations
    // =========================================================================

    /// Apply a rotation by π/4 about the given Pauli string.
    pub fn t_pauli(&mut self, op: PauliOp) -> IrResult<&mut Self> {
        self.push(Instruction::t_pauli(op))?;
        Ok(self)
    }

    /// Apply a rotation by π/2 about the given Pauli string.
    pub fn s_pauli(&mut self, op: PauliOp) -> IrResult<&mut Self> {
        self.push(Instruction::s_pauli(op))?;
        Ok(self)
    }

    /// Apply a rotation by π about the given Pauli string.
    pub fn z_pauli(&mut self, op: PauliOp) -> IrResult<&mut Self> {
        self.push(Instruction::z_pauli(op))?;
        Ok(self)
    }

    /// Measure the given Pauli string projectively.
    pub fn m_pauli(&mut self, op: PauliOp, clbit: Option<ClbitId>) -> IrResult<&mut Self> {
        self.push(Instruction::m_pauli(op, clbit))?;
        Ok(self)
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Count operations by name.
    pub fn count_ops(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.ops {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// The circuit depth: the longest wire-respecting chain of operations.
    ///
    /// Barriers order operations but take no time slot themselves. A
    /// Pauli-based operation occupies every qubit in its string's support.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.num_qubits];
        let mut clbit_level = vec![0usize; self.num_clbits];
        let mut depth = 0;
        for inst in &self.ops {
            if inst.is_barrier() {
                continue;
            }
            let mut level = 0;
            if let Some(op) = inst.as_pauli() {
                for q in op.support() {
                    level = level.max(qubit_level[q.index()]);
                }
            }
            for &q in &inst.qubits {
                level = level.max(qubit_level[q.index()]);
            }
            for &c in &inst.clbits {
                level = level.max(clbit_level[c.index()]);
            }
            level += 1;
            if let Some(op) = inst.as_pauli() {
                for q in op.support() {
                    qubit_level[q.index()] = level;
                }
            }
            for &q in &inst.qubits {
                qubit_level[q.index()] = level;
            }
            for &c in &inst.clbits {
                clbit_level[c.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    /// The number of T gates: T/T† gates plus π/4 Pauli rotations.
    pub fn t_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|inst| {
                matches!(
                    inst.kind,
                    InstructionKind::Gate(StandardGate::T | StandardGate::Tdg)
                        | InstructionKind::TPauli(_)
                )
            })
            .count()
    }

    /// Check whether every operation is drawn from
    /// {H, S, S†, T, T†, X, Y, Z, CX, measure, reset, barrier}.
    pub fn is_clifford_t(&self) -> bool {
        self.ops.iter().all(|inst| match &inst.kind {
            InstructionKind::Gate(g) => g.is_clifford_t(),
            InstructionKind::Measure | InstructionKind::Reset | InstructionKind::Barrier => true,
            _ => false,
        })
    }

    /// A snapshot of the circuit statistics.
    pub fn stats(&self) -> CircuitStats {
        CircuitStats {
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            num_ops: self.num_ops(),
            depth: self.depth(),
            t_count: self.t_count(),
        }
    }
}

/// Aggregate circuit statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitStats {
    /// Qubit register size.
    pub num_qubits: usize,
    /// Classical register size.
    pub num_clbits: usize,
    /// Total operation count.
    pub num_ops: usize,
    /// Circuit depth.
    pub depth: usize,
    /// T-count.
    pub t_count: usize,
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "qubits: {}, clbits: {}, ops: {}, depth: {}, t-count: {}",
            self.num_qubits, self.num_clbits, self.num_ops, self.depth, self.t_count
        )
    }
}
