//! The transpiler driver: pass kinds, configuration and pipeline execution.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use alsvin_ir::Circuit;

use crate::error::TranspileError;
use crate::pass::Pass;
use crate::passes::{
    CliffordReductionPass, DecomposePass, GateFusionPass, PbcPass, RemovePauliPass,
    RemoveTrivialRzPass, SynthesizeRzPass, TfusePass,
};
use crate::synthesis::RzSynthesizer;

/// The available transpilation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassType {
    /// Decompose gates to the basic gate set.
    Decompose,
    /// Remove RZ gates with trivial angles.
    RemoveTrivialRz,
    /// Fuse adjacent gates where possible.
    GateFusion,
    /// Remove leading/trailing Pauli gates.
    RemovePauli,
    /// Convert to Pauli-Based Circuit form.
    ToPbc,
    /// Canonicalize the Clifford portion.
    CliffordReduction,
    /// Synthesize RZ gates to Clifford+T (needs a grid-synthesis backend).
    SynthesizeRz,
    /// T-count optimization for PBC circuits.
    TFuse,
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PassType::Decompose => "DECOMPOSE",
            PassType::RemoveTrivialRz => "REMOVE_TRIVIAL_RZ",
            PassType::GateFusion => "GATE_FUSION",
            PassType::RemovePauli => "REMOVE_PAULI",
            PassType::ToPbc => "TO_PBC",
            PassType::CliffordReduction => "CLIFFORD_REDUCTION",
            PassType::SynthesizeRz => "SYNTHESIZE_RZ",
            PassType::TFuse => "TFUSE",
        };
        f.write_str(name)
    }
}

/// Predefined pass sequences for common workflows.
pub mod sequences {
    use super::PassType;

    /// Decomposition and trivial-angle cleanup.
    pub const BASIC_PREPROCESSING: &[PassType] =
        &[PassType::Decompose, PassType::RemoveTrivialRz];

    /// Basic preprocessing plus RZ synthesis.
    pub const FULL_PREPROCESSING: &[PassType] = &[
        PassType::Decompose,
        PassType::RemoveTrivialRz,
        PassType::SynthesizeRz,
    ];

    /// Convert to Clifford+T.
    pub const TO_CLIFFORD_T: &[PassType] = &[
        PassType::Decompose,
        PassType::RemoveTrivialRz,
        PassType::SynthesizeRz,
        PassType::GateFusion,
    ];

    /// Convert to PBC form.
    pub const TO_PBC: &[PassType] = &[
        PassType::Decompose,
        PassType::RemoveTrivialRz,
        PassType::SynthesizeRz,
        PassType::ToPbc,
    ];

    /// PBC with T-count optimization.
    pub const TO_PBC_OPTIMIZED: &[PassType] = &[
        PassType::Decompose,
        PassType::RemoveTrivialRz,
        PassType::SynthesizeRz,
        PassType::ToPbc,
        PassType::TFuse,
    ];

    /// Clifford reduction pipeline.
    pub const TO_CLIFFORD_REDUCTION: &[PassType] = &[
        PassType::Decompose,
        PassType::RemoveTrivialRz,
        PassType::SynthesizeRz,
        PassType::CliffordReduction,
    ];
}

/// Configuration options for pass execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassConfig {
    /// Preserve CCX gates during decomposition.
    pub keep_ccx: bool,
    /// Preserve CX gates in PBC form.
    pub keep_cx: bool,
    /// Override epsilon for RZ synthesis; negative selects the per-angle
    /// default.
    pub epsilon_override: f64,
    /// Suppress per-pass logging.
    pub silent: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            keep_ccx: false,
            keep_cx: false,
            epsilon_override: -1.0,
            silent: false,
        }
    }
}

/// One row of the pass-execution report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassStats {
    /// Pass name.
    pub pass: String,
    /// Whether the pass reported a modification. `None` for skipped passes.
    pub modified: Option<bool>,
    /// Gate count before the pass.
    pub gates_before: usize,
    /// Gate count after the pass.
    pub gates_after: usize,
    /// Circuit depth after the pass.
    pub depth_after: usize,
}

/// The result of a pipeline run: the (possibly partially) transformed
/// circuit, the per-pass report, and the error that stopped the pipeline,
/// if any.
#[derive(Debug)]
pub struct TranspileOutcome {
    /// The transformed circuit. On error this is the state after the last
    /// completed pass, with the failing pass's partial work applied.
    pub circuit: Circuit,
    /// Per-pass statistics in execution order.
    pub stats: Vec<PassStats>,
    /// The error that aborted the pipeline, if any.
    pub error: Option<TranspileError>,
}

impl TranspileOutcome {
    /// Convert into a plain result, dropping the report.
    pub fn into_result(self) -> Result<Circuit, TranspileError> {
        match self.error {
            None => Ok(self.circuit),
            Some(error) => Err(error),
        }
    }
}

/// Core transpiler engine that executes sequences of passes.
#[derive(Default)]
pub struct Transpiler {
    synthesizer: Option<Arc<dyn RzSynthesizer>>,
}

impl Transpiler {
    /// Create a transpiler with no synthesis backend.
    pub fn new() -> Self {
        Self { synthesizer: None }
    }

    /// Register a grid-synthesis backend for [`PassType::SynthesizeRz`].
    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn RzSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Execute a sequence of passes on an owned circuit.
    ///
    /// Unknown or unavailable passes are skipped with a warning. A pass
    /// error aborts the pipeline; the outcome carries the partially
    /// transformed circuit together with the error.
    #[instrument(skip(self, circuit, passes, config))]
    pub fn execute_passes(
        &self,
        mut circuit: Circuit,
        passes: &[PassType],
        config: &PassConfig,
    ) -> TranspileOutcome {
        let mut stats = Vec::with_capacity(passes.len());
        let mut error = None;

        for &pass_type in passes {
            let Some(pass) = self.create_pass(pass_type, config) else {
                if !config.silent {
                    warn!(pass = %pass_type, "pass unavailable, skipping");
                }
                stats.push(PassStats {
                    pass: pass_type.to_string(),
                    modified: None,
                    gates_before: circuit.num_ops(),
                    gates_after: circuit.num_ops(),
                    depth_after: circuit.depth(),
                });
                continue;
            };

            let gates_before = circuit.num_ops();
            let result = pass.run(&mut circuit);
            let row = PassStats {
                pass: pass_type.to_string(),
                modified: result.as_ref().ok().copied(),
                gates_before,
                gates_after: circuit.num_ops(),
                depth_after: circuit.depth(),
            };
            if !config.silent {
                info!(
                    pass = %row.pass,
                    modified = ?row.modified,
                    gates_before = row.gates_before,
                    gates_after = row.gates_after,
                    depth_after = row.depth_after,
                    "pass executed"
                );
            }
            stats.push(row);

            if let Err(e) = result {
                error = Some(e);
                break;
            }
        }

        if !config.silent {
            info!(stats = %circuit.stats(), "pipeline finished");
        }

        TranspileOutcome {
            circuit,
            stats,
            error,
        }
    }

    /// Execute a predefined sequence (see [`sequences`]).
    pub fn execute_sequence(
        &self,
        circuit: Circuit,
        sequence: &[PassType],
        config: &PassConfig,
    ) -> TranspileOutcome {
        self.execute_passes(circuit, sequence, config)
    }

    /// Create and configure a pass instance. Returns `None` when the pass's
    /// collaborator is unavailable.
    fn create_pass(&self, pass_type: PassType, config: &PassConfig) -> Option<Box<dyn Pass>> {
        match pass_type {
            PassType::Decompose => Some(Box::new(DecomposePass::new(config.keep_ccx))),
            PassType::RemoveTrivialRz => Some(Box::new(RemoveTrivialRzPass::new())),
            PassType::GateFusion => Some(Box::new(GateFusionPass::new())),
            PassType::RemovePauli => Some(Box::new(RemovePauliPass::new())),
            PassType::ToPbc => Some(Box::new(PbcPass::new(config.keep_cx))),
            PassType::CliffordReduction => Some(Box::new(CliffordReductionPass::new())),
            PassType::TFuse => Some(Box::new(TfusePass::new())),
            PassType::SynthesizeRz => {
                let synthesizer = self.synthesizer.as_ref()?;
                Some(Box::new(SynthesizeRzPass::new(
                    Arc::clone(synthesizer),
                    config.epsilon_override,
                )))
            }
        }
    }
}
