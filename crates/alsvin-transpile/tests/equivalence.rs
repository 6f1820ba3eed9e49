//! Projective unitary and outcome-distribution equivalence checks.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use alsvin_ir::{Circuit, ClbitId, QubitId};
use alsvin_transpile::passes::{
    CliffordReductionPass, DecomposePass, GateFusionPass, PbcPass, RemoveTrivialRzPass, TfusePass,
};
use alsvin_transpile::Pass;

mod common;
use common::{assert_same_distribution, assert_unitary_equiv};

/// Run a pass on a clone and compare unitaries projectively.
fn check_pass_preserves_unitary(pass: &dyn Pass, circuit: &Circuit) {
    let mut transformed = circuit.clone();
    pass.run(&mut transformed).unwrap();
    assert_unitary_equiv(circuit, &transformed);
}

// ============================================================================
// Decompose
// ============================================================================

#[test]
fn test_decompose_ccx_unitary() {
    let mut circuit = Circuit::new(3, 0);
    circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
    check_pass_preserves_unitary(&DecomposePass::new(false), &circuit);
}

#[test]
fn test_decompose_two_qubit_gates_unitary() {
    let mut circuit = Circuit::new(2, 0);
    circuit.swap(QubitId(0), QubitId(1)).unwrap();
    circuit.cz(QubitId(0), QubitId(1)).unwrap();
    check_pass_preserves_unitary(&DecomposePass::new(false), &circuit);
}

#[test]
fn test_decompose_rotations_unitary() {
    // Generic angles catch a reversed RY expansion, which would flip the
    // rotation's direction.
    for theta in [0.3, -1.1, 2.5] {
        let mut circuit = Circuit::new(1, 0);
        circuit.rx(theta, QubitId(0)).unwrap();
        check_pass_preserves_unitary(&DecomposePass::new(false), &circuit);

        let mut circuit = Circuit::new(1, 0);
        circuit.ry(theta, QubitId(0)).unwrap();
        check_pass_preserves_unitary(&DecomposePass::new(false), &circuit);
    }
}

#[test]
fn test_decompose_sx_unitary() {
    let mut circuit = Circuit::new(1, 0);
    circuit.sx(QubitId(0)).unwrap();
    circuit.sxdg(QubitId(0)).unwrap();
    check_pass_preserves_unitary(&DecomposePass::new(false), &circuit);
}

// ============================================================================
// Remove-trivial-RZ
// ============================================================================

#[test]
fn test_remove_trivial_rz_unitary() {
    for k in -4i32..=4 {
        let mut circuit = Circuit::new(1, 0);
        // Sandwich between H gates so a wrong replacement shows up in more
        // than the phases.
        circuit.h(QubitId(0)).unwrap();
        circuit.rz(f64::from(k) * FRAC_PI_4, QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        check_pass_preserves_unitary(&RemoveTrivialRzPass::new(), &circuit);
    }
}

// ============================================================================
// Gate fusion
// ============================================================================

#[test]
fn test_gate_fusion_unitary() {
    let mut circuit = Circuit::new(3, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.t(QubitId(0)).unwrap();
    circuit.t(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.rz(0.4, QubitId(1)).unwrap();
    circuit.rz(-0.4 + FRAC_PI_2, QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.s(QubitId(2)).unwrap();
    circuit.sdg(QubitId(2)).unwrap();
    circuit.h(QubitId(2)).unwrap();
    circuit.h(QubitId(2)).unwrap();
    circuit.x(QubitId(0)).unwrap();
    circuit.x(QubitId(0)).unwrap();
    check_pass_preserves_unitary(&GateFusionPass::new(), &circuit);
}

#[test]
fn test_gate_fusion_canonicalization_unitary() {
    let mut circuit = Circuit::new(1, 0);
    circuit.t(QubitId(0)).unwrap();
    circuit.s(QubitId(0)).unwrap();
    circuit.z(QubitId(0)).unwrap();
    circuit.tdg(QubitId(0)).unwrap();
    check_pass_preserves_unitary(&GateFusionPass::new(), &circuit);
}

// ============================================================================
// TFuse
// ============================================================================

#[test]
fn test_tfuse_unitary() {
    let mut circuit = Circuit::new(2, 0);
    circuit.t_pauli("+XZ".parse().unwrap()).unwrap();
    circuit.t_pauli("+ZI".parse().unwrap()).unwrap();
    circuit.t_pauli("+XZ".parse().unwrap()).unwrap();
    circuit.s_pauli("-YY".parse().unwrap()).unwrap();
    circuit.s_pauli("-YY".parse().unwrap()).unwrap();
    check_pass_preserves_unitary(&TfusePass::new(), &circuit);
}

#[test]
fn test_tfuse_cancel_unitary() {
    let mut circuit = Circuit::new(2, 0);
    circuit.t_pauli("+XY".parse().unwrap()).unwrap();
    circuit.t_pauli("-XY".parse().unwrap()).unwrap();
    circuit.z_pauli("+ZZ".parse().unwrap()).unwrap();
    circuit.z_pauli("+ZZ".parse().unwrap()).unwrap();
    check_pass_preserves_unitary(&TfusePass::new(), &circuit);
}

// ============================================================================
// Clifford reduction
// ============================================================================

#[test]
fn test_clifford_reduction_unitary() {
    // Measurement-free: the pass must preserve the full unitary, since the
    // tableau is re-emitted as a trailing block.
    let mut circuit = Circuit::new(3, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.s(QubitId(1)).unwrap();
    circuit.t(QubitId(1)).unwrap();
    circuit.cx(QubitId(1), QubitId(2)).unwrap();
    circuit.h(QubitId(2)).unwrap();
    circuit.tdg(QubitId(2)).unwrap();
    circuit.y(QubitId(0)).unwrap();
    circuit.t(QubitId(0)).unwrap();
    check_pass_preserves_unitary(&CliffordReductionPass::new(), &circuit);
}

#[test]
fn test_clifford_reduction_clifford_only_unitary() {
    let mut circuit = Circuit::new(2, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.s(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.sdg(QubitId(1)).unwrap();
    circuit.h(QubitId(1)).unwrap();
    circuit.x(QubitId(0)).unwrap();
    check_pass_preserves_unitary(&CliffordReductionPass::new(), &circuit);
}

#[test]
fn test_clifford_reduction_depth_not_worse_on_clifford_input() {
    let mut circuit = Circuit::new(2, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    let depth_before = circuit.depth();

    CliffordReductionPass::new().run(&mut circuit).unwrap();
    assert!(circuit.depth() <= depth_before);
}

#[test]
fn test_clifford_reduction_distribution_with_measurement() {
    let mut circuit = Circuit::new(2, 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.t(QubitId(1)).unwrap();
    circuit.h(QubitId(1)).unwrap();
    circuit.measure(QubitId(0), ClbitId(0)).unwrap();
    circuit.measure(QubitId(1), ClbitId(1)).unwrap();

    let mut transformed = circuit.clone();
    CliffordReductionPass::new().run(&mut transformed).unwrap();
    assert_same_distribution(&circuit, &transformed);
}

// ============================================================================
// PBC conversion: outcome distributions
// ============================================================================

#[test]
fn test_pbc_distribution_bell() {
    let mut circuit = Circuit::new(2, 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.measure(QubitId(0), ClbitId(0)).unwrap();
    circuit.measure(QubitId(1), ClbitId(1)).unwrap();

    let mut pbc = circuit.clone();
    PbcPass::new(false).run(&mut pbc).unwrap();
    assert_same_distribution(&circuit, &pbc);
}

#[test]
fn test_pbc_distribution_with_t() {
    let mut circuit = Circuit::new(2, 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.t(QubitId(0)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.measure(QubitId(0), ClbitId(0)).unwrap();
    circuit.measure(QubitId(1), ClbitId(1)).unwrap();

    let mut pbc = circuit.clone();
    PbcPass::new(false).run(&mut pbc).unwrap();
    assert_same_distribution(&circuit, &pbc);
}

#[test]
fn test_pbc_distribution_mid_circuit_measurement() {
    let mut circuit = Circuit::new(2, 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.measure(QubitId(0), ClbitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.s(QubitId(1)).unwrap();
    circuit.h(QubitId(1)).unwrap();
    circuit.measure(QubitId(1), ClbitId(1)).unwrap();

    let mut pbc = circuit.clone();
    PbcPass::new(false).run(&mut pbc).unwrap();
    assert_same_distribution(&circuit, &pbc);
}

#[test]
fn test_pbc_keep_cx_distribution() {
    let mut circuit = Circuit::new(2, 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.t(QubitId(1)).unwrap();
    circuit.h(QubitId(1)).unwrap();
    circuit.measure(QubitId(0), ClbitId(0)).unwrap();
    circuit.measure(QubitId(1), ClbitId(1)).unwrap();

    let mut pbc = circuit.clone();
    PbcPass::new(true).run(&mut pbc).unwrap();
    assert_same_distribution(&circuit, &pbc);
}

// ============================================================================
// Composition: decompose then fuse on a denser circuit
// ============================================================================

#[test]
fn test_decompose_then_fuse_unitary() {
    let mut circuit = Circuit::new(3, 0);
    circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
    circuit.rx(0.7, QubitId(1)).unwrap();
    circuit.swap(QubitId(1), QubitId(2)).unwrap();
    circuit.ry(PI / 3.0, QubitId(0)).unwrap();
    circuit.cz(QubitId(0), QubitId(2)).unwrap();

    let mut transformed = circuit.clone();
    DecomposePass::new(false).run(&mut transformed).unwrap();
    GateFusionPass::new().run(&mut transformed).unwrap();
    assert_unitary_equiv(&circuit, &transformed);
}
