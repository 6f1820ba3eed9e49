//! Signed multi-qubit Pauli operators.
//!
//! A [`PauliOp`] is a signed tensor product `s · P₀ ⊗ P₁ ⊗ … ⊗ P_{n−1}` with
//! `s ∈ {+1, −1}` and each factor in {I, X, Y, Z}. The canonical textual form
//! is a leading `+` or `-` followed by exactly `n` letters from `XYZI`,
//! index 0 leftmost: `"+XIZ"` is `+X₀ ⊗ I₁ ⊗ Z₂`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// A single-qubit Pauli factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// The letter used in the canonical string form.
    #[inline]
    pub fn letter(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    fn from_letter(c: char) -> Option<Pauli> {
        match c {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }

    /// Check whether two factors anticommute (both non-identity and distinct).
    #[inline]
    pub fn anticommutes_with(self, other: Pauli) -> bool {
        self != Pauli::I && other != Pauli::I && self != other
    }

    /// Single-factor product with phase: `self · other = phase · result`.
    #[inline]
    fn mul_with_phase(self, other: Pauli) -> (Phase, Pauli) {
        use Pauli::{I, X, Y, Z};
        match (self, other) {
            (I, p) | (p, I) => (Phase::One, p),
            (a, b) if a == b => (Phase::One, I),
            (X, Y) => (Phase::PlusI, Z),
            (Y, Z) => (Phase::PlusI, X),
            (Z, X) => (Phase::PlusI, Y),
            (Y, X) => (Phase::MinusI, Z),
            (Z, Y) => (Phase::MinusI, X),
            (X, Z) => (Phase::MinusI, Y),
            _ => unreachable!(),
        }
    }
}

/// A phase from the group {+1, −1, +i, −i}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// +1
    One,
    /// −1
    MinusOne,
    /// +i
    PlusI,
    /// −i
    MinusI,
}

impl Phase {
    /// Check whether this phase is real (±1).
    #[inline]
    pub fn is_real(self) -> bool {
        matches!(self, Phase::One | Phase::MinusOne)
    }

    /// Check whether this phase is −1.
    #[inline]
    pub fn is_negative(self) -> bool {
        self == Phase::MinusOne
    }

    fn negated(self) -> Phase {
        match self {
            Phase::One => Phase::MinusOne,
            Phase::MinusOne => Phase::One,
            Phase::PlusI => Phase::MinusI,
            Phase::MinusI => Phase::PlusI,
        }
    }
}

impl Mul for Phase {
    type Output = Phase;

    fn mul(self, rhs: Phase) -> Phase {
        match (self, rhs) {
            (Phase::One, p) | (p, Phase::One) => p,
            (Phase::MinusOne, p) | (p, Phase::MinusOne) => p.negated(),
            (Phase::PlusI, Phase::PlusI) | (Phase::MinusI, Phase::MinusI) => Phase::MinusOne,
            (Phase::PlusI, Phase::MinusI) | (Phase::MinusI, Phase::PlusI) => Phase::One,
        }
    }
}

/// A signed multi-qubit Pauli operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliOp {
    negative: bool,
    paulis: Vec<Pauli>,
}

impl PauliOp {
    /// The positive identity operator on `n` qubits.
    pub fn identity(n: usize) -> Self {
        Self {
            negative: false,
            paulis: vec![Pauli::I; n],
        }
    }

    /// A single-qubit factor embedded into `n` qubits.
    pub fn single(n: usize, qubit: QubitId, pauli: Pauli) -> Self {
        let mut paulis = vec![Pauli::I; n];
        paulis[qubit.index()] = pauli;
        Self {
            negative: false,
            paulis,
        }
    }

    /// Build from a sign and factor vector.
    pub fn new(negative: bool, paulis: Vec<Pauli>) -> Self {
        Self { negative, paulis }
    }

    /// The number of qubits this operator spans.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.paulis.len()
    }

    /// Whether the sign is −1.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The factor on the given qubit.
    #[inline]
    pub fn factor(&self, qubit: QubitId) -> Pauli {
        self.paulis[qubit.index()]
    }

    /// All factors, index 0 first.
    #[inline]
    pub fn factors(&self) -> &[Pauli] {
        &self.paulis
    }

    /// Check whether every factor is the identity (the sign is ignored).
    pub fn is_identity(&self) -> bool {
        self.paulis.iter().all(|&p| p == Pauli::I)
    }

    /// The qubits carrying a non-identity factor, in index order.
    pub fn support(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.paulis
            .iter()
            .enumerate()
            .filter(|(_, &p)| p != Pauli::I)
            .map(|(i, _)| QubitId::from(i))
    }

    /// The number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.paulis.iter().filter(|&&p| p != Pauli::I).count()
    }

    /// This operator with the sign flipped.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            negative: !self.negative,
            paulis: self.paulis.clone(),
        }
    }

    /// Flip the sign in place.
    pub fn negate(&mut self) {
        self.negative = !self.negative;
    }

    /// Check whether this operator has the same factor string as `other`,
    /// ignoring signs.
    pub fn same_string(&self, other: &PauliOp) -> bool {
        self.paulis == other.paulis
    }

    /// Check whether `self` and `other` commute.
    ///
    /// Two Pauli operators commute iff the number of positions where the
    /// factors anticommute is even.
    pub fn commutes_with(&self, other: &PauliOp) -> bool {
        debug_assert_eq!(self.num_qubits(), other.num_qubits());
        let anti = self
            .paulis
            .iter()
            .zip(&other.paulis)
            .filter(|(&a, &b)| a.anticommutes_with(b))
            .count();
        anti % 2 == 0
    }

    /// Multiply `self · other`, returning the overall phase and the unsigned
    /// factor string.
    ///
    /// The returned [`PauliOp`] always has positive sign; the phase carries
    /// both input signs and the accumulated ±i factors. Commuting inputs
    /// always produce a real phase.
    pub fn mul_with_phase(&self, other: &PauliOp) -> (Phase, PauliOp) {
        debug_assert_eq!(self.num_qubits(), other.num_qubits());
        let mut phase = Phase::One;
        if self.negative {
            phase = phase * Phase::MinusOne;
        }
        if other.negative {
            phase = phase * Phase::MinusOne;
        }
        let paulis = self
            .paulis
            .iter()
            .zip(&other.paulis)
            .map(|(&a, &b)| {
                let (p, r) = a.mul_with_phase(b);
                phase = phase * p;
                r
            })
            .collect();
        (
            phase,
            PauliOp {
                negative: false,
                paulis,
            },
        )
    }

    // =========================================================================
    // Clifford conjugation: P ↦ U · P · U†
    // =========================================================================

    /// Conjugate by H on `qubit`: X ↔ Z, Y → −Y.
    pub fn conjugate_h(&mut self, qubit: QubitId) {
        match self.paulis[qubit.index()] {
            Pauli::X => self.paulis[qubit.index()] = Pauli::Z,
            Pauli::Z => self.paulis[qubit.index()] = Pauli::X,
            Pauli::Y => self.negative = !self.negative,
            Pauli::I => {}
        }
    }

    /// Conjugate by S on `qubit`: X → Y, Y → −X.
    pub fn conjugate_s(&mut self, qubit: QubitId) {
        match self.paulis[qubit.index()] {
            Pauli::X => self.paulis[qubit.index()] = Pauli::Y,
            Pauli::Y => {
                self.paulis[qubit.index()] = Pauli::X;
                self.negative = !self.negative;
            }
            _ => {}
        }
    }

    /// Conjugate by S† on `qubit`: X → −Y, Y → X.
    pub fn conjugate_sdg(&mut self, qubit: QubitId) {
        match self.paulis[qubit.index()] {
            Pauli::X => {
                self.paulis[qubit.index()] = Pauli::Y;
                self.negative = !self.negative;
            }
            Pauli::Y => self.paulis[qubit.index()] = Pauli::X,
            _ => {}
        }
    }

    /// Conjugate by X on `qubit`: Y → −Y, Z → −Z.
    pub fn conjugate_x(&mut self, qubit: QubitId) {
        if matches!(self.paulis[qubit.index()], Pauli::Y | Pauli::Z) {
            self.negative = !self.negative;
        }
    }

    /// Conjugate by Y on `qubit`: X → −X, Z → −Z.
    pub fn conjugate_y(&mut self, qubit: QubitId) {
        if matches!(self.paulis[qubit.index()], Pauli::X | Pauli::Z) {
            self.negative = !self.negative;
        }
    }

    /// Conjugate by Z on `qubit`: X → −X, Y → −Y.
    pub fn conjugate_z(&mut self, qubit: QubitId) {
        if matches!(self.paulis[qubit.index()], Pauli::X | Pauli::Y) {
            self.negative = !self.negative;
        }
    }

    /// Conjugate by CX with the given control and target.
    pub fn conjugate_cx(&mut self, control: QubitId, target: QubitId) {
        use Pauli::{I, X, Y, Z};
        let c = self.paulis[control.index()];
        let t = self.paulis[target.index()];
        let (c2, t2, flip) = match (c, t) {
            (I, Y) => (Z, Y, false),
            (I, Z) => (Z, Z, false),
            (X, I) => (X, X, false),
            (X, X) => (X, I, false),
            (X, Y) => (Y, Z, false),
            (X, Z) => (Y, Y, true),
            (Y, I) => (Y, X, false),
            (Y, X) => (Y, I, false),
            (Y, Y) => (X, Z, true),
            (Y, Z) => (X, Y, false),
            (Z, Y) => (I, Y, false),
            (Z, Z) => (I, Z, false),
            (a, b) => (a, b, false),
        };
        self.paulis[control.index()] = c2;
        self.paulis[target.index()] = t2;
        if flip {
            self.negative = !self.negative;
        }
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.negative { '-' } else { '+' })?;
        for p in &self.paulis {
            write!(f, "{}", p.letter())?;
        }
        Ok(())
    }
}

impl FromStr for PauliOp {
    type Err = IrError;

    fn from_str(s: &str) -> IrResult<Self> {
        let mut chars = s.chars();
        let negative = match chars.next() {
            Some('+') => false,
            Some('-') => true,
            _ => return Err(IrError::InvalidPauliString(s.to_string())),
        };
        let paulis: Vec<Pauli> = chars
            .map(|c| Pauli::from_letter(c).ok_or_else(|| IrError::InvalidPauliString(s.to_string())))
            .collect::<IrResult<_>>()?;
        if paulis.is_empty() {
            return Err(IrError::InvalidPauliString(s.to_string()));
        }
        Ok(PauliOp { negative, paulis })
    }
}
