//! 2x2 unitary matrix utilities.
//!
//! Used by the RZ synthesis audit to verify that a returned Clifford+T word
//! approximates the requested rotation within tolerance.

use num_complex::Complex64;
use std::f64::consts::PI;

use alsvin_ir::StandardGate;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// The Hadamard matrix.
    pub fn h() -> Self {
        let s = 1.0 / 2.0_f64.sqrt();
        Self::new(
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(-s, 0.0),
        )
    }

    /// The S matrix.
    pub fn s() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 1.0),
        )
    }

    /// The S-dagger matrix.
    pub fn sdg() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, -1.0),
        )
    }

    /// The T matrix.
    pub fn t() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::from_polar(1.0, PI / 4.0),
        )
    }

    /// The T-dagger matrix.
    pub fn tdg() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::from_polar(1.0, -PI / 4.0),
        )
    }

    /// The RZ(θ) matrix.
    pub fn rz(theta: f64) -> Self {
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// The matrix of a single-qubit Clifford+T alphabet gate, if it has one.
    pub fn from_gate(gate: &StandardGate) -> Option<Self> {
        match gate {
            StandardGate::H => Some(Self::h()),
            StandardGate::S => Some(Self::s()),
            StandardGate::Sdg => Some(Self::sdg()),
            StandardGate::T => Some(Self::t()),
            StandardGate::Tdg => Some(Self::tdg()),
            StandardGate::Rz(theta) => Some(Self::rz(*theta)),
            _ => None,
        }
    }

    /// Matrix product `self · other`.
    #[must_use]
    pub fn matmul(&self, other: &Unitary2x2) -> Unitary2x2 {
        let a = &self.data;
        let b = &other.data;
        Unitary2x2::new(
            a[0] * b[0] + a[1] * b[2],
            a[0] * b[1] + a[1] * b[3],
            a[2] * b[0] + a[3] * b[2],
            a[2] * b[1] + a[3] * b[3],
        )
    }

    /// Projective distance to `other`: `min_φ ‖self − e^{iφ}·other‖_F`.
    ///
    /// The Frobenius norm upper-bounds the operator norm, so a word passing
    /// this check approximates the target within the same tolerance.
    pub fn distance(&self, other: &Unitary2x2) -> f64 {
        // tr(self† · other)
        let mut trace = Complex64::new(0.0, 0.0);
        trace += self.data[0].conj() * other.data[0] + self.data[2].conj() * other.data[2];
        trace += self.data[1].conj() * other.data[1] + self.data[3].conj() * other.data[3];
        // ‖U − e^{iφ}V‖_F² = 4 − 2·|tr(U†V)| at the optimal phase.
        let frob_sq = (4.0 - 2.0 * trace.norm()).max(0.0);
        frob_sq.sqrt()
    }
}
