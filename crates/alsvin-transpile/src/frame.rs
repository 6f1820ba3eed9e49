//! The Clifford frame: a symplectic tableau over the Pauli group.
//!
//! A frame represents an accumulated Clifford prefix C of a circuit scan by
//! storing, for each qubit q, the signed Pauli images `C† X_q C` and
//! `C† Z_q C`. This is the tableau representation: each row is an x/z bit
//! pair per column plus a sign, and gate absorption is O(n) row arithmetic
//! rather than matrix composition.

use alsvin_ir::{Instruction, Pauli, PauliOp, Phase, QubitId, StandardGate};

/// A Clifford frame over `n` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct CliffordFrame {
    /// `x_rows[q] = C† X_q C`.
    x_rows: Vec<PauliOp>,
    /// `z_rows[q] = C† Z_q C`.
    z_rows: Vec<PauliOp>,
}

/// Fold a multiplication result with an extra phase into a signed Pauli.
///
/// Frame row products always carry a real total phase; an imaginary residue
/// would mean the tableau lost a sign, which is a bug.
fn fold(extra: Phase, phase: Phase, op: PauliOp) -> PauliOp {
    let total = extra * phase;
    debug_assert!(total.is_real(), "Clifford frame row product lost a sign");
    if total.is_negative() {
        op.negated()
    } else {
        op
    }
}

impl CliffordFrame {
    /// The identity frame on `n` qubits.
    pub fn identity(n: usize) -> Self {
        Self {
            x_rows: (0..n)
                .map(|q| PauliOp::single(n, QubitId::from(q), Pauli::X))
                .collect(),
            z_rows: (0..n)
                .map(|q| PauliOp::single(n, QubitId::from(q), Pauli::Z))
                .collect(),
        }
    }

    /// The number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.x_rows.len()
    }

    /// Check whether the frame is the identity Clifford.
    pub fn is_identity(&self) -> bool {
        let n = self.num_qubits();
        (0..n).all(|q| {
            self.x_rows[q] == PauliOp::single(n, QubitId::from(q), Pauli::X)
                && self.z_rows[q] == PauliOp::single(n, QubitId::from(q), Pauli::Z)
        })
    }

    /// The image `C† X_q C`.
    pub fn x_image(&self, qubit: QubitId) -> &PauliOp {
        &self.x_rows[qubit.index()]
    }

    /// The image `C† Z_q C`.
    pub fn z_image(&self, qubit: QubitId) -> &PauliOp {
        &self.z_rows[qubit.index()]
    }

    /// The image `C† Y_q C`, computed from the X and Z rows (Y = i·X·Z).
    pub fn y_image(&self, qubit: QubitId) -> PauliOp {
        let (phase, op) =
            self.x_rows[qubit.index()].mul_with_phase(&self.z_rows[qubit.index()]);
        fold(Phase::PlusI, phase, op)
    }

    // =========================================================================
    // Absorption: C ← g·C
    // =========================================================================

    /// Absorb a Clifford gate into the frame: C ← g·C.
    ///
    /// The rows update by rewriting the basis images through g† P g. Only
    /// the frame gate set {H, S, S†, X, Y, Z, CX} may be absorbed; these are
    /// the Cliffords the scan passes encounter after decomposition.
    pub fn absorb(&mut self, gate: &StandardGate, qubits: &[QubitId]) {
        match gate {
            StandardGate::H => self.absorb_h(qubits[0]),
            StandardGate::S => self.absorb_s(qubits[0]),
            StandardGate::Sdg => self.absorb_sdg(qubits[0]),
            StandardGate::X => self.absorb_x(qubits[0]),
            StandardGate::Y => self.absorb_y(qubits[0]),
            StandardGate::Z => self.absorb_z(qubits[0]),
            StandardGate::CX => self.absorb_cx(qubits[0], qubits[1]),
            other => unreachable!("gate '{}' is not in the frame gate set", other.name()),
        }
    }

    /// Absorb H on `q`: H† X H = Z, H† Z H = X.
    pub fn absorb_h(&mut self, q: QubitId) {
        let i = q.index();
        std::mem::swap(&mut self.x_rows[i], &mut self.z_rows[i]);
    }

    /// Absorb S on `q`: S† X S = −Y, S† Z S = Z.
    pub fn absorb_s(&mut self, q: QubitId) {
        self.x_rows[q.index()] = self.y_image(q).negated();
    }

    /// Absorb S† on `q`: S X S† = Y, S Z S† = Z.
    pub fn absorb_sdg(&mut self, q: QubitId) {
        self.x_rows[q.index()] = self.y_image(q);
    }

    /// Absorb X on `q`: X Z X = −Z.
    pub fn absorb_x(&mut self, q: QubitId) {
        self.z_rows[q.index()].negate();
    }

    /// Absorb Y on `q`: Y X Y = −X, Y Z Y = −Z.
    pub fn absorb_y(&mut self, q: QubitId) {
        self.x_rows[q.index()].negate();
        self.z_rows[q.index()].negate();
    }

    /// Absorb Z on `q`: Z X Z = −X.
    pub fn absorb_z(&mut self, q: QubitId) {
        self.x_rows[q.index()].negate();
    }

    /// Absorb CX: X_c → X_c X_t, Z_t → Z_c Z_t (control and target rows
    /// combine; CX is self-inverse so conjugation direction is immaterial).
    pub fn absorb_cx(&mut self, control: QubitId, target: QubitId) {
        let (phase, op) =
            self.x_rows[control.index()].mul_with_phase(&self.x_rows[target.index()]);
        self.x_rows[control.index()] = fold(Phase::One, phase, op);

        let (phase, op) =
            self.z_rows[control.index()].mul_with_phase(&self.z_rows[target.index()]);
        self.z_rows[target.index()] = fold(Phase::One, phase, op);
    }

    /// Reset the rows of `q` to fresh ±X_q / ±Z_q images (frame flush on a
    /// single qubit, used when a reset discards the qubit's history).
    pub fn flush_qubit(&mut self, q: QubitId) {
        let n = self.num_qubits();
        self.x_rows[q.index()] = PauliOp::single(n, q, Pauli::X);
        self.z_rows[q.index()] = PauliOp::single(n, q, Pauli::Z);
    }

    /// Conjugate the frame by a CX kept verbatim in the output:
    /// C ← CX·C·CX.
    ///
    /// The basis rewrite (absorption) computes `C† (CX P CX) C`; conjugating
    /// every row by the CX afterwards accounts for the copy left in the
    /// emitted sequence.
    pub fn conjugate_by_kept_cx(&mut self, control: QubitId, target: QubitId) {
        self.absorb_cx(control, target);
        for row in self.x_rows.iter_mut().chain(self.z_rows.iter_mut()) {
            row.conjugate_cx(control, target);
        }
    }

    // =========================================================================
    // Synthesis: tableau → Clifford gate sequence
    // =========================================================================

    /// Synthesize the represented Clifford C into a gate sequence.
    ///
    /// Gaussian-elimination sweep: for each qubit the X row is normalized to
    /// +X_q and the Z row to +Z_q using {H, S, CX} conjugations applied to
    /// every row, with X/Z sign fixups. The gates, in the order applied,
    /// form a circuit for C. Gate count is O(n²).
    pub fn synthesize(&self) -> Vec<Instruction> {
        let mut frame = self.clone();
        let mut gates = Vec::new();
        let n = frame.num_qubits();
        for q in 0..n {
            frame.reduce_qubit(QubitId::from(q), &mut gates);
        }
        debug_assert!(frame.is_identity());
        gates
    }

    /// Apply a reduction gate: conjugate every row by it and record it.
    fn reduce_apply(&mut self, gate: StandardGate, qubits: &[QubitId], out: &mut Vec<Instruction>) {
        for row in self.x_rows.iter_mut().chain(self.z_rows.iter_mut()) {
            match gate {
                StandardGate::H => row.conjugate_h(qubits[0]),
                StandardGate::S => row.conjugate_s(qubits[0]),
                StandardGate::X => row.conjugate_x(qubits[0]),
                StandardGate::Z => row.conjugate_z(qubits[0]),
                StandardGate::CX => row.conjugate_cx(qubits[0], qubits[1]),
                _ => unreachable!("gate '{}' is not a reduction gate", gate.name()),
            }
        }
        out.push(Instruction::gate(gate, qubits.iter().copied()));
    }

    fn reduce_qubit(&mut self, q: QubitId, out: &mut Vec<Instruction>) {
        let n = self.num_qubits();

        // --- X row: normalize to ±X_q ---
        // Make every non-identity factor an X.
        for j in q.index()..n {
            let col = QubitId::from(j);
            match self.x_rows[q.index()].factor(col) {
                Pauli::Y => self.reduce_apply(StandardGate::S, &[col], out),
                Pauli::Z => self.reduce_apply(StandardGate::H, &[col], out),
                _ => {}
            }
        }
        // Bring an X onto column q if it is not there yet.
        if self.x_rows[q.index()].factor(q) != Pauli::X {
            let j = (q.index() + 1..n)
                .map(QubitId::from)
                .find(|&col| self.x_rows[q.index()].factor(col) == Pauli::X)
                .expect("X row lost its support");
            self.reduce_apply(StandardGate::CX, &[q, j], out);
            self.reduce_apply(StandardGate::CX, &[j, q], out);
            self.reduce_apply(StandardGate::CX, &[q, j], out);
        }
        // Clear the remaining columns.
        for j in q.index() + 1..n {
            let col = QubitId::from(j);
            if self.x_rows[q.index()].factor(col) == Pauli::X {
                self.reduce_apply(StandardGate::CX, &[q, col], out);
            }
        }

        // --- Z row: normalize to ±Z_q ---
        // Make every factor beyond column q a Z, then fold it into column q.
        for j in q.index() + 1..n {
            let col = QubitId::from(j);
            match self.z_rows[q.index()].factor(col) {
                Pauli::Y => {
                    self.reduce_apply(StandardGate::S, &[col], out);
                    self.reduce_apply(StandardGate::H, &[col], out);
                }
                Pauli::X => self.reduce_apply(StandardGate::H, &[col], out),
                _ => {}
            }
        }
        for j in q.index() + 1..n {
            let col = QubitId::from(j);
            if self.z_rows[q.index()].factor(col) == Pauli::Z {
                self.reduce_apply(StandardGate::CX, &[col, q], out);
            }
        }
        // The Z row anticommutes with X_q, so column q holds Z or Y.
        if self.z_rows[q.index()].factor(q) == Pauli::Y {
            // Conjugation by H·S·H maps Y → Z while fixing X.
            self.reduce_apply(StandardGate::H, &[q], out);
            self.reduce_apply(StandardGate::S, &[q], out);
            self.reduce_apply(StandardGate::H, &[q], out);
        }

        // --- Sign fixups ---
        if self.z_rows[q.index()].is_negative() {
            self.reduce_apply(StandardGate::X, &[q], out);
        }
        if self.x_rows[q.index()].is_negative() {
            self.reduce_apply(StandardGate::Z, &[q], out);
        }

        debug_assert_eq!(self.x_rows[q.index()], PauliOp::single(n, q, Pauli::X));
        debug_assert_eq!(self.z_rows[q.index()], PauliOp::single(n, q, Pauli::Z));
    }
}
