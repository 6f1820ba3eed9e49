//! Dense state-vector simulation for small circuits (n ≤ 5).
//!
//! Supports the full instruction surface including Pauli-based rotations and
//! projective Pauli measurements, for projective unitary comparison and
//! measurement-outcome distributions.

// Each test binary uses a different slice of this module.
#![allow(dead_code)]

use std::collections::HashMap;

use num_complex::Complex64;

use alsvin_ir::{Circuit, Instruction, InstructionKind, Pauli, PauliOp, QubitId, StandardGate};

pub const TOL: f64 = 1e-9;

const ONE: Complex64 = Complex64::new(1.0, 0.0);
const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// |0…0⟩ on `n` qubits. Qubit q is bit q of the basis index.
pub fn zero_state(n: usize) -> Vec<Complex64> {
    let mut state = vec![ZERO; 1 << n];
    state[0] = ONE;
    state
}

fn matrix_1q(gate: &StandardGate) -> [Complex64; 4] {
    let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
    let half = Complex64::new(0.5, 0.0);
    match gate {
        StandardGate::H => [s, s, s, -s],
        StandardGate::X => [ZERO, ONE, ONE, ZERO],
        StandardGate::Y => [ZERO, -I, I, ZERO],
        StandardGate::Z => [ONE, ZERO, ZERO, -ONE],
        StandardGate::S => [ONE, ZERO, ZERO, I],
        StandardGate::Sdg => [ONE, ZERO, ZERO, -I],
        StandardGate::T => [ONE, ZERO, ZERO, Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4)],
        StandardGate::Tdg => {
            [ONE, ZERO, ZERO, Complex64::from_polar(1.0, -std::f64::consts::FRAC_PI_4)]
        }
        StandardGate::SX => [
            half * (ONE + I),
            half * (ONE - I),
            half * (ONE - I),
            half * (ONE + I),
        ],
        StandardGate::SXdg => [
            half * (ONE - I),
            half * (ONE + I),
            half * (ONE + I),
            half * (ONE - I),
        ],
        StandardGate::Rx(t) => {
            let c = Complex64::new((t / 2.0).cos(), 0.0);
            let ms = Complex64::new(0.0, -(t / 2.0).sin());
            [c, ms, ms, c]
        }
        StandardGate::Ry(t) => {
            let c = Complex64::new((t / 2.0).cos(), 0.0);
            let sn = Complex64::new((t / 2.0).sin(), 0.0);
            [c, -sn, sn, c]
        }
        StandardGate::Rz(t) => [
            Complex64::from_polar(1.0, -t / 2.0),
            ZERO,
            ZERO,
            Complex64::from_polar(1.0, t / 2.0),
        ],
        other => panic!("{} is not a single-qubit gate", other.name()),
    }
}

fn apply_1q(state: &mut [Complex64], q: usize, m: [Complex64; 4]) {
    let step = 1usize << q;
    for i in 0..state.len() {
        if i & step == 0 {
            let j = i | step;
            let (a, b) = (state[i], state[j]);
            state[i] = m[0] * a + m[1] * b;
            state[j] = m[2] * a + m[3] * b;
        }
    }
}

/// Apply a signed Pauli operator to the state.
pub fn apply_pauli(state: &[Complex64], op: &PauliOp) -> Vec<Complex64> {
    let n = op.num_qubits();
    let mut xmask = 0usize;
    for q in 0..n {
        if matches!(op.factor(QubitId::from(q)), Pauli::X | Pauli::Y) {
            xmask |= 1 << q;
        }
    }
    let mut out = vec![ZERO; state.len()];
    for (i, &amp) in state.iter().enumerate() {
        let mut phase = if op.is_negative() { -ONE } else { ONE };
        for q in 0..n {
            let bit = (i >> q) & 1;
            match op.factor(QubitId::from(q)) {
                Pauli::Z => {
                    if bit == 1 {
                        phase = -phase;
                    }
                }
                Pauli::Y => {
                    phase *= if bit == 0 { I } else { -I };
                }
                _ => {}
            }
        }
        out[i ^ xmask] += phase * amp;
    }
    out
}

/// Apply `exp(-i·theta/2·P)`.
fn apply_pauli_rotation(state: &mut Vec<Complex64>, op: &PauliOp, theta: f64) {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let ms = Complex64::new(0.0, -(theta / 2.0).sin());
    let p_state = apply_pauli(state, op);
    for (a, b) in state.iter_mut().zip(p_state) {
        *a = c * *a + ms * b;
    }
}

/// Apply a unitary instruction. Panics on measurements and resets.
pub fn apply_instruction(state: &mut Vec<Complex64>, inst: &Instruction) {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
    match &inst.kind {
        InstructionKind::Gate(gate) => match gate {
            StandardGate::CX => {
                let (c, t) = (inst.qubits[0].index(), inst.qubits[1].index());
                for i in 0..state.len() {
                    if (i >> c) & 1 == 1 && (i >> t) & 1 == 0 {
                        state.swap(i, i | (1 << t));
                    }
                }
            }
            StandardGate::CZ => {
                let (a, b) = (inst.qubits[0].index(), inst.qubits[1].index());
                for (i, amp) in state.iter_mut().enumerate() {
                    if (i >> a) & 1 == 1 && (i >> b) & 1 == 1 {
                        *amp = -*amp;
                    }
                }
            }
            StandardGate::Swap => {
                let (a, b) = (inst.qubits[0].index(), inst.qubits[1].index());
                for i in 0..state.len() {
                    if (i >> a) & 1 == 1 && (i >> b) & 1 == 0 {
                        state.swap(i, i ^ (1 << a) ^ (1 << b));
                    }
                }
            }
            StandardGate::CCX => {
                let (c1, c2, t) = (
                    inst.qubits[0].index(),
                    inst.qubits[1].index(),
                    inst.qubits[2].index(),
                );
                for i in 0..state.len() {
                    if (i >> c1) & 1 == 1 && (i >> c2) & 1 == 1 && (i >> t) & 1 == 0 {
                        state.swap(i, i | (1 << t));
                    }
                }
            }
            g => apply_1q(state, inst.qubits[0].index(), matrix_1q(g)),
        },
        InstructionKind::TPauli(op) => apply_pauli_rotation(state, op, FRAC_PI_4),
        InstructionKind::SPauli(op) => apply_pauli_rotation(state, op, FRAC_PI_2),
        InstructionKind::ZPauli(op) => apply_pauli_rotation(state, op, PI),
        InstructionKind::Barrier => {}
        other => panic!("apply_instruction cannot handle {other:?}"),
    }
}

/// Run a measurement-free circuit on a state.
pub fn run_unitary(circuit: &Circuit, mut state: Vec<Complex64>) -> Vec<Complex64> {
    for inst in circuit.operations() {
        apply_instruction(&mut state, inst);
    }
    state
}

/// The full unitary as a column-major matrix of basis-state images.
pub fn unitary_matrix(circuit: &Circuit) -> Vec<Vec<Complex64>> {
    let n = circuit.num_qubits();
    (0..1usize << n)
        .map(|j| {
            let mut state = vec![ZERO; 1 << n];
            state[j] = ONE;
            run_unitary(circuit, state)
        })
        .collect()
}

/// Assert two measurement-free circuits implement the same unitary up to a
/// global phase.
pub fn assert_unitary_equiv(a: &Circuit, b: &Circuit) {
    assert_eq!(a.num_qubits(), b.num_qubits());
    let ua = unitary_matrix(a);
    let ub = unitary_matrix(b);
    // Optimal global phase from the overlap tr(Ua† · Ub).
    let mut overlap = ZERO;
    for (col_a, col_b) in ua.iter().zip(&ub) {
        for (x, y) in col_a.iter().zip(col_b) {
            overlap += x.conj() * y;
        }
    }
    let dim = ua.len() as f64;
    assert!(
        overlap.norm() > dim * 0.5,
        "unitaries are not phase-aligned: |tr| = {}",
        overlap.norm()
    );
    let phase = overlap / overlap.norm();
    for (col_a, col_b) in ua.iter().zip(&ub) {
        for (x, y) in col_a.iter().zip(col_b) {
            let diff = (phase * *x - *y).norm();
            assert!(diff < TOL, "unitary mismatch: |{x} - {y}| = {diff}");
        }
    }
}

/// The joint outcome distribution over classical bits, branching on every
/// measurement. Unwritten classical bits read 0.
pub fn outcome_distribution(circuit: &Circuit) -> HashMap<Vec<u8>, f64> {
    let mut dist = HashMap::new();
    let state = zero_state(circuit.num_qubits());
    let cbits = vec![0u8; circuit.num_clbits()];
    branch(circuit, 0, state, cbits, 1.0, &mut dist);
    dist
}

fn branch(
    circuit: &Circuit,
    from: usize,
    mut state: Vec<Complex64>,
    cbits: Vec<u8>,
    prob: f64,
    dist: &mut HashMap<Vec<u8>, f64>,
) {
    let n = circuit.num_qubits();
    for (k, inst) in circuit.operations().iter().enumerate().skip(from) {
        match &inst.kind {
            InstructionKind::Measure => {
                let op = PauliOp::single(n, inst.qubits[0], Pauli::Z);
                branch_measure(circuit, k, &state, &cbits, prob, dist, &op, inst, false);
                return;
            }
            InstructionKind::MPauli(op) => {
                let op = op.clone();
                branch_measure(circuit, k, &state, &cbits, prob, dist, &op, inst, false);
                return;
            }
            InstructionKind::Reset => {
                let op = PauliOp::single(n, inst.qubits[0], Pauli::Z);
                branch_measure(circuit, k, &state, &cbits, prob, dist, &op, inst, true);
                return;
            }
            _ => apply_instruction(&mut state, inst),
        }
    }
    *dist.entry(cbits).or_insert(0.0) += prob;
}

#[allow(clippy::too_many_arguments)]
fn branch_measure(
    circuit: &Circuit,
    at: usize,
    state: &[Complex64],
    cbits: &[u8],
    prob: f64,
    dist: &mut HashMap<Vec<u8>, f64>,
    op: &PauliOp,
    inst: &Instruction,
    reset: bool,
) {
    let p_state = apply_pauli(state, op);
    for outcome in 0..2u8 {
        let sign = if outcome == 0 { 1.0 } else { -1.0 };
        let mut projected: Vec<Complex64> = state
            .iter()
            .zip(&p_state)
            .map(|(a, b)| (*a + *b * sign) * 0.5)
            .collect();
        let p: f64 = projected.iter().map(|a| a.norm_sqr()).sum();
        if p < 1e-12 {
            continue;
        }
        let norm = p.sqrt();
        for a in &mut projected {
            *a /= norm;
        }
        if reset && outcome == 1 {
            // A reset flips the measured |1⟩ back to |0⟩.
            apply_1q(
                &mut projected,
                inst.qubits[0].index(),
                matrix_1q(&StandardGate::X),
            );
        }
        let mut cbits = cbits.to_vec();
        if !reset {
            if let Some(&c) = inst.clbits.first() {
                cbits[c.index()] = outcome;
            }
        }
        branch(circuit, at + 1, projected, cbits, prob * p, dist);
    }
}

/// Assert two circuits produce the same outcome distribution.
pub fn assert_same_distribution(a: &Circuit, b: &Circuit) {
    let da = outcome_distribution(a);
    let db = outcome_distribution(b);
    let keys: std::collections::HashSet<_> = da.keys().chain(db.keys()).collect();
    for key in keys {
        let pa = da.get(key).copied().unwrap_or(0.0);
        let pb = db.get(key).copied().unwrap_or(0.0);
        assert!(
            (pa - pb).abs() < TOL,
            "distribution mismatch at {key:?}: {pa} vs {pb}"
        );
    }
}
