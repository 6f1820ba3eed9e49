//! Circuit instructions combining operations with operands.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::pauli::PauliOp;
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
///
/// The Pauli-based kinds (`TPauli`, `SPauli`, `ZPauli`, `MPauli`) form the
/// PBC instruction set: rotations by π/4, π/2 and π about a signed Pauli
/// string, and a projective Pauli measurement. They never coexist with
/// standard gates in one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A standard gate operation.
    Gate(StandardGate),
    /// Z-basis measurement into a classical bit.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,
    /// Barrier (opaque ordering fence).
    Barrier,
    /// Rotation by π/4 about a Pauli string (the PBC image of T).
    TPauli(PauliOp),
    /// Rotation by π/2 about a Pauli string (the PBC image of S).
    SPauli(PauliOp),
    /// Rotation by π about a Pauli string (the PBC image of Z).
    ZPauli(PauliOp),
    /// Projective measurement of a Pauli string.
    MPauli(PauliOp),
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on. Empty for Pauli-based kinds,
    /// whose footprint is the support of their Pauli string.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (measure, `MPauli`).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a π/4 Pauli rotation.
    pub fn t_pauli(op: PauliOp) -> Self {
        Self {
            kind: InstructionKind::TPauli(op),
            qubits: vec![],
            clbits: vec![],
        }
    }

    /// Create a π/2 Pauli rotation.
    pub fn s_pauli(op: PauliOp) -> Self {
        Self {
            kind: InstructionKind::SPauli(op),
            qubits: vec![],
            clbits: vec![],
        }
    }

    /// Create a π Pauli rotation.
    pub fn z_pauli(op: PauliOp) -> Self {
        Self {
            kind: InstructionKind::ZPauli(op),
            qubits: vec![],
            clbits: vec![],
        }
    }

    /// Create a Pauli measurement. The clbit receives the outcome; pass
    /// `None` for an outcome-discarding measurement.
    pub fn m_pauli(op: PauliOp, clbit: Option<ClbitId>) -> Self {
        Self {
            kind: InstructionKind::MPauli(op),
            qubits: vec![],
            clbits: clbit.into_iter().collect(),
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a reset.
    pub fn is_reset(&self) -> bool {
        matches!(self.kind, InstructionKind::Reset)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Check if this is one of the Pauli-based kinds.
    pub fn is_pauli_based(&self) -> bool {
        matches!(
            self.kind,
            InstructionKind::TPauli(_)
                | InstructionKind::SPauli(_)
                | InstructionKind::ZPauli(_)
                | InstructionKind::MPauli(_)
        )
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the Pauli string if this is a Pauli-based instruction.
    pub fn as_pauli(&self) -> Option<&PauliOp> {
        match &self.kind {
            InstructionKind::TPauli(op)
            | InstructionKind::SPauli(op)
            | InstructionKind::ZPauli(op)
            | InstructionKind::MPauli(op) => Some(op),
            _ => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
            InstructionKind::TPauli(_) => "t_pauli",
            InstructionKind::SPauli(_) => "s_pauli",
            InstructionKind::ZPauli(_) => "z_pauli",
            InstructionKind::MPauli(_) => "m_pauli",
        }
    }
}
