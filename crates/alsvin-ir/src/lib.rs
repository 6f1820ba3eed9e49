//! Alsvin Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Alsvin: a mutable ordered sequence of operations over a fixed
//! qubit register, plus the signed multi-qubit Pauli operators that back the
//! Pauli-Based Circuit (PBC) form.
//!
//! # Core components
//!
//! - **Qubits and classical bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] for the supported gate surface
//! - **Pauli algebra**: [`Pauli`], [`Phase`], [`PauliOp`] with commutation,
//!   phase-tracked multiplication and Clifford conjugation
//! - **Instructions**: [`Instruction`] combining operations with operands
//! - **Circuit**: [`Circuit`], the ordered operation sequence with a builder
//!   API and statistics
//!
//! # Example: building a Bell state
//!
//! ```rust
//! use alsvin_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::new(2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Example: a Pauli-Based Circuit
//!
//! Pauli-based operations (π/4, π/2 and π rotations about signed Pauli
//! strings, and Pauli measurements) form an exclusive circuit form: they
//! never mix with standard gates.
//!
//! ```rust
//! use alsvin_ir::Circuit;
//!
//! let mut pbc = Circuit::new(3, 0);
//! let op = pbc.pauli_from_str("+XIZ").unwrap();
//! pbc.t_pauli(op).unwrap();
//! assert_eq!(pbc.t_count(), 1);
//! assert!(!pbc.is_clifford_t());
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod pauli;
pub mod qubit;

pub use circuit::{Circuit, CircuitStats};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use pauli::{Pauli, PauliOp, Phase};
pub use qubit::{ClbitId, QubitId};
