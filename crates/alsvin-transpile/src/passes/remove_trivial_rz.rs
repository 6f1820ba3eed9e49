//! Replacement of RZ rotations at multiples of π/4 by exact Clifford+T gates.

use std::f64::consts::{FRAC_PI_4, PI};

use alsvin_ir::{Circuit, Instruction, InstructionKind, StandardGate};

use crate::error::TranspileResult;
use crate::pass::Pass;

/// Absolute tolerance for snapping an angle to a multiple of π/4.
pub const TRIVIAL_ANGLE_TOLERANCE: f64 = 1e-10;

/// Normalize an angle into [−π, π].
pub fn normalize_angle(theta: f64) -> f64 {
    let phi = theta.rem_euclid(2.0 * PI);
    if phi > PI {
        phi - 2.0 * PI
    } else {
        phi
    }
}

/// The minimal Clifford+T fragment equivalent to RZ(θ) up to global phase,
/// when θ is within [`TRIVIAL_ANGLE_TOLERANCE`] of a multiple of π/4.
pub fn trivial_fragment(theta: f64) -> Option<Vec<StandardGate>> {
    let phi = normalize_angle(theta);
    let k = (phi / FRAC_PI_4).round() as i32;
    if (phi - f64::from(k) * FRAC_PI_4).abs() > TRIVIAL_ANGLE_TOLERANCE {
        return None;
    }
    Some(match k {
        0 => vec![],
        1 => vec![StandardGate::T],
        -1 => vec![StandardGate::Tdg],
        2 => vec![StandardGate::S],
        -2 => vec![StandardGate::Sdg],
        3 => vec![StandardGate::S, StandardGate::T],
        -3 => vec![StandardGate::Sdg, StandardGate::Tdg],
        4 | -4 => vec![StandardGate::Z],
        _ => unreachable!("normalized angle exceeds π"),
    })
}

/// Drops or rewrites RZ gates whose angle is a multiple of π/4 within
/// tolerance; all other operations pass through unchanged.
pub struct RemoveTrivialRzPass;

impl RemoveTrivialRzPass {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Default for RemoveTrivialRzPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for RemoveTrivialRzPass {
    fn name(&self) -> &'static str {
        "REMOVE_TRIVIAL_RZ"
    }

    fn run(&self, circuit: &mut Circuit) -> TranspileResult<bool> {
        let ops = circuit.take_operations();
        let mut out = Vec::with_capacity(ops.len());
        let mut modified = false;
        for inst in ops {
            match &inst.kind {
                InstructionKind::Gate(StandardGate::Rz(theta)) => {
                    match trivial_fragment(*theta) {
                        Some(fragment) => {
                            let q = inst.qubits[0];
                            out.extend(
                                fragment
                                    .into_iter()
                                    .map(|g| Instruction::single_qubit_gate(g, q)),
                            );
                            modified = true;
                        }
                        None => out.push(inst),
                    }
                }
                _ => out.push(inst),
            }
        }
        circuit.set_operations(out)?;
        Ok(modified)
    }
}
