//! Alsvin Transpilation Engine
//!
//! This crate implements the pass-pipeline core of the Alsvin quantum-circuit
//! transpiler: the algebraic transformations that rewrite a gate-level
//! circuit into Clifford+T or Pauli-Based Circuit (PBC) form, optionally
//! optimized for T-count.
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       │
//!       ▼
//! ┌────────────┐
//! │ Transpiler │ ◄── PassConfig (keep_ccx, keep_cx, epsilon, silent)
//! └────────────┘ ◄── optional RzSynthesizer backend
//!       │
//!       ├── DecomposePass → RemoveTrivialRzPass → SynthesizeRzPass
//!       ├── GateFusionPass          (Clifford+T output)
//!       ├── PbcPass → TfusePass     (PBC output)
//!       └── CliffordReductionPass   (canonicalized Clifford+T output)
//!       │
//!       ▼
//! Output Circuit + per-pass statistics
//! ```
//!
//! # Example
//!
//! ```rust
//! use alsvin_ir::{Circuit, QubitId};
//! use alsvin_transpile::{sequences, PassConfig, Transpiler};
//!
//! let mut circuit = Circuit::new(2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.t(QubitId(1)).unwrap();
//!
//! let config = PassConfig { silent: true, ..PassConfig::default() };
//! let outcome = Transpiler::new().execute_sequence(circuit, sequences::TO_PBC, &config);
//! let pbc = outcome.into_result().unwrap();
//! assert_eq!(pbc.t_count(), 1);
//! ```
//!
//! # Custom passes
//!
//! Implement the [`Pass`] trait to run custom transformations through the
//! same machinery:
//!
//! ```rust
//! use alsvin_ir::Circuit;
//! use alsvin_transpile::{Pass, TranspileResult};
//!
//! struct CountOnly;
//!
//! impl Pass for CountOnly {
//!     fn name(&self) -> &'static str { "count_only" }
//!     fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
//!         let _ = circuit.num_ops();
//!         Ok(false)
//!     }
//! }
//! ```

pub mod error;
pub mod frame;
pub mod pass;
pub mod synthesis;
pub mod transpiler;
pub mod unitary;

// Built-in passes
pub mod passes;

pub use error::{TranspileError, TranspileResult};
pub use frame::CliffordFrame;
pub use pass::Pass;
pub use synthesis::{RzSynthesizer, DEFAULT_EPSILON_MULTIPLIER};
pub use transpiler::sequences;
pub use transpiler::{PassConfig, PassStats, PassType, TranspileOutcome, Transpiler};
pub use unitary::Unitary2x2;
