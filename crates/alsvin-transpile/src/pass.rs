//! The pass trait.

use alsvin_ir::Circuit;

use crate::error::TranspileResult;

/// A transpilation pass: a uniform, stateless operation over a circuit.
///
/// Passes mutate the circuit in place and report whether any observable
/// property changed. They must preserve semantics up to a global phase and
/// the outcome distribution of subsequent measurements, terminate on every
/// well-formed circuit, and leave the circuit in a valid state (in
/// particular, a pass that emits Pauli-based operations converts the whole
/// circuit — mixed forms are rejected by the IR).
///
/// Hard failures propagate as [`TranspileError`](crate::TranspileError); the
/// driver stops the pipeline and surfaces the partially transformed circuit.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &'static str;

    /// Run the pass, returning `true` iff the circuit was modified.
    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool>;
}
