//! `OpenQASM` 2.0 front and back end for Alsvin circuits.
//!
//! The parser produces an [`alsvin_ir::Circuit`] with a flattened register
//! (declaration order), the gate surface of the transpiler plus the common
//! qelib aliases, and the Pauli-based extension ops. The emitter writes the
//! same dialect back, so `parse(emit(c))` reproduces the operation sequence.
//!
//! # Example
//!
//! ```rust
//! let circuit = alsvin_qasm::parse(
//!     r#"
//!     OPENQASM 2.0;
//!     include "qelib1.inc";
//!     qreg q[2];
//!     creg c[2];
//!     h q[0];
//!     cx q[0], q[1];
//!     measure q -> c;
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//!
//! let qasm = alsvin_qasm::emit(&circuit);
//! assert!(qasm.contains("cx q[0],q[1];"));
//! ```

pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;

pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::parse;
