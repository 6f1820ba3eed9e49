//! Built-in transpilation passes.

pub mod clifford_reduction;
pub mod decompose;
pub mod gate_fusion;
pub mod pbc;
pub mod remove_pauli;
pub mod remove_trivial_rz;
pub mod synthesize_rz;
pub mod tfuse;

pub use clifford_reduction::CliffordReductionPass;
pub use decompose::DecomposePass;
pub use gate_fusion::GateFusionPass;
pub use pbc::PbcPass;
pub use remove_pauli::RemovePauliPass;
pub use remove_trivial_rz::RemoveTrivialRzPass;
pub use synthesize_rz::SynthesizeRzPass;
pub use tfuse::TfusePass;
