//! Roofline performance model.
//!
//! Each stage of the pass is assigned a FLOP count and a memory traffic
//! estimate per block. The expected time follows two models:
//!
//! - **AI** (arithmetic intensity): every stage runs at
//!   `min(PP, PB · flop/traffic)` on its own.
//! - **OI** (operational intensity): the whole pass moves the input and
//!   output blocks plus the workspace three times.
//!
//! # Example
//!
//! ```
//! use mpcf_rs::diagnostics::{MachineSpec, PerformanceModel, RooflineReport};
//!
//! let model = PerformanceModel::for_block(16);
//! let machine = MachineSpec::new(10e9, 20e9, 4);
//! let report = RooflineReport::compute(&model, &machine, 10, 64, 0.5).unwrap();
//! println!("{}", report.summary_line());
//! ```

use std::fmt;
use std::mem::size_of;

use tracing::info;

use crate::solver::{ConvectionError, FACE_SLICES, INPUT_SLICES};
use crate::types::{HALO, NQUANTITIES, Real};

/// Stage of the convection pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelStage {
    /// Conserved to primitive conversion of the padded block.
    Convert,
    /// WENO5 reconstruction in three directions.
    Weno,
    /// Γ/Π accumulation.
    ExtraTerm,
    /// Wave speed estimates.
    CharVel,
    /// Riemann fluxes.
    Hlle,
    /// Flux divergence.
    Div,
    /// Write-back into the destination.
    CopyBack,
}

impl KernelStage {
    /// All stages in pipeline order.
    pub const ALL: [KernelStage; 7] = [
        KernelStage::Convert,
        KernelStage::Weno,
        KernelStage::ExtraTerm,
        KernelStage::CharVel,
        KernelStage::Hlle,
        KernelStage::Div,
        KernelStage::CopyBack,
    ];

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            KernelStage::Convert => "convert",
            KernelStage::Weno => "weno",
            KernelStage::ExtraTerm => "extraterm",
            KernelStage::CharVel => "charvel",
            KernelStage::Hlle => "hlle",
            KernelStage::Div => "div",
            KernelStage::CopyBack => "copyback",
        }
    }
}

impl fmt::Display for KernelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// FLOP count and memory traffic of one stage for one block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageCost {
    pub stage: KernelStage,
    pub flop: f64,
    pub traffic_bytes: f64,
}

impl StageCost {
    /// FLOP per byte.
    pub fn intensity(&self) -> f64 {
        self.flop / self.traffic_bytes
    }
}

/// Static cost model of one block pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceModel {
    /// Block size `n`.
    pub block_size: usize,
    /// Per-stage costs in [`KernelStage::ALL`] order.
    pub stages: [StageCost; 7],
    /// Bytes of scratch memory used by the pass.
    pub footprint_bytes: usize,
}

impl PerformanceModel {
    /// Cost model for blocks of `n³` cells.
    pub fn for_block(n: usize) -> Self {
        let sz = size_of::<Real>() as f64;
        let ninputs = ((n + 2 * HALO) as f64).powi(3);
        let nfaces = (n * n * (n + 1)) as f64;
        let ncells = (n * n * n) as f64;
        // reconstruction is counted for six quantities per face
        let nq = 6.0;
        let ndir = 3.0;

        let cost = |stage, flop: f64, traffic: f64| StageCost {
            stage,
            flop,
            traffic_bytes: traffic * sz,
        };
        let stages = [
            cost(KernelStage::Convert, (3.0 + 12.0 + 3.0 * 15.0) * ninputs, 12.0 * ninputs),
            cost(
                KernelStage::Weno,
                82.0 * 2.0 * nfaces * nq * ndir,
                6.0 * 2.0 * nfaces * nq * ndir,
            ),
            cost(KernelStage::ExtraTerm, 2.0 * ndir * ncells, 6.0 * ndir * ncells),
            cost(KernelStage::CharVel, 78.0 * ndir * nfaces, 10.0 * ndir * nfaces),
            cost(KernelStage::Hlle, 166.0 * ndir * nfaces, 56.0 * ndir * nfaces),
            cost(KernelStage::Div, 5.0 * ncells, 3.0 * ndir * ncells),
            cost(KernelStage::CopyBack, 21.0 * ncells, 14.0 * ncells),
        ];

        Self {
            block_size: n,
            stages,
            footprint_bytes: workspace_scalars(n) * size_of::<Real>(),
        }
    }

    /// FLOP of one block pass.
    pub fn total_flop(&self) -> f64 {
        self.stages.iter().map(|s| s.flop).sum()
    }

    /// Cost of one stage.
    pub fn stage(&self, stage: KernelStage) -> &StageCost {
        &self.stages[stage as usize]
    }
}

/// Scalars held by a workspace for block size `n`, without allocating one.
fn workspace_scalars(n: usize) -> usize {
    let padded = (n + 2 * HALO) * (n + 2 * HALO);
    let faces = (n + 1) * n;
    let cells = n * n;
    // face states (2 · 7), fan (4) and flux (7) tiles for the z window and
    // the shared x/y sweep
    let per_face_set = (2 * NQUANTITIES + 4 + NQUANTITIES) * faces;
    INPUT_SLICES * NQUANTITIES * padded
        + (FACE_SLICES + 1) * per_face_set
        + (NQUANTITIES + 3) * cells
}

/// Peak capabilities of the target machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MachineSpec {
    /// Peak FLOP/s of one core.
    pub peak_flops_per_core: f64,
    /// Peak memory bandwidth in bytes/s, whole machine.
    pub peak_bandwidth: f64,
    /// Number of cores.
    pub cores: usize,
}

impl MachineSpec {
    pub fn new(peak_flops_per_core: f64, peak_bandwidth: f64, cores: usize) -> Self {
        Self {
            peak_flops_per_core,
            peak_bandwidth,
            cores,
        }
    }

    /// Peak FLOP/s of the whole machine.
    pub fn peak_flops(&self) -> f64 {
        self.peak_flops_per_core * self.cores as f64
    }

    /// Intensity at which compute and bandwidth limits meet, in FLOP/B.
    pub fn ridge(&self) -> f64 {
        self.peak_flops() / self.peak_bandwidth
    }

    /// Attainable FLOP/s at intensity `intensity`.
    pub fn attainable(&self, intensity: f64) -> f64 {
        self.peak_flops().min(self.peak_bandwidth * intensity)
    }
}

/// Expected and measured performance of a series of block passes.
#[derive(Clone, Debug, PartialEq)]
pub struct RooflineReport {
    pub machine: MachineSpec,
    /// Passes per block.
    pub steps: usize,
    pub blocks: usize,
    /// Scratch memory of one workspace in bytes.
    pub footprint_bytes: usize,
    pub total_flop: f64,
    /// Traffic assumed by the OI model in bytes.
    pub total_traffic_bytes: f64,
    /// Achieved intensity of the AI model in FLOP/B.
    pub ai_overall: f64,
    /// Operational intensity in FLOP/B.
    pub oi_overall: f64,
    pub expected_seconds_ai: f64,
    pub expected_seconds_oi: f64,
    pub measured_seconds: f64,
}

impl RooflineReport {
    /// Evaluate the model for `steps` passes over `blocks` blocks that took
    /// `measured_seconds` in total.
    ///
    /// # Errors
    /// [`ConvectionError::InvalidConfig`] if a count is zero or a rate or the
    /// measured time is not positive.
    pub fn compute(
        model: &PerformanceModel,
        machine: &MachineSpec,
        steps: usize,
        blocks: usize,
        measured_seconds: f64,
    ) -> Result<Self, ConvectionError> {
        if steps == 0 || blocks == 0 || machine.cores == 0 {
            return Err(ConvectionError::InvalidConfig(format!(
                "roofline needs positive counts (steps = {steps}, blocks = {blocks}, cores = {})",
                machine.cores
            )));
        }
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(machine.peak_flops_per_core)
            || !positive(machine.peak_bandwidth)
            || !positive(measured_seconds)
        {
            return Err(ConvectionError::InvalidConfig(format!(
                "roofline needs positive rates and time (PP = {}, PB = {}, t = {measured_seconds})",
                machine.peak_flops_per_core, machine.peak_bandwidth
            )));
        }

        let passes = (steps * blocks) as f64;
        let expected_seconds_ai: f64 = model
            .stages
            .iter()
            .map(|s| passes * s.flop / machine.attainable(s.intensity()))
            .sum();
        let total_flop = passes * model.total_flop();

        let n = model.block_size;
        let block_records = ((n + 2 * HALO) as f64).powi(3) + 2.0 * (n as f64).powi(3);
        let inout_bytes = passes * (NQUANTITIES * size_of::<Real>()) as f64 * block_records;
        let workspace_bytes = (steps * 3 * model.footprint_bytes) as f64;
        let oi_overall = total_flop / (inout_bytes + workspace_bytes);
        let expected_seconds_oi = total_flop / machine.attainable(oi_overall);

        Ok(Self {
            machine: *machine,
            steps,
            blocks,
            footprint_bytes: model.footprint_bytes,
            total_flop,
            total_traffic_bytes: inout_bytes + workspace_bytes,
            ai_overall: total_flop / expected_seconds_ai / machine.peak_bandwidth,
            oi_overall,
            expected_seconds_ai,
            expected_seconds_oi,
            measured_seconds,
        })
    }

    /// Measured GFLOP/s.
    pub fn measured_gflops(&self) -> f64 {
        1e-9 * self.total_flop / self.measured_seconds
    }

    /// Expected GFLOP/s under the AI model.
    pub fn expected_gflops_ai(&self) -> f64 {
        1e-9 * self.total_flop / self.expected_seconds_ai
    }

    /// Expected GFLOP/s under the OI model.
    pub fn expected_gflops_oi(&self) -> f64 {
        1e-9 * self.total_flop / self.expected_seconds_oi
    }

    /// Fraction of the AI-model time achieved, capped at 1.
    pub fn efficiency_ai(&self) -> f64 {
        (self.expected_seconds_ai / self.measured_seconds).min(1.0)
    }

    /// Fraction of the OI-model time achieved.
    pub fn efficiency_oi(&self) -> f64 {
        self.expected_seconds_oi / self.measured_seconds
    }

    /// Measured FLOP/s over machine peak.
    pub fn hw_utilization(&self) -> f64 {
        self.measured_gflops() * 1e9 / self.machine.peak_flops()
    }

    /// Milliseconds per block pass: measured, AI, OI.
    pub fn ms_per_block(&self) -> (f64, f64, f64) {
        let passes = (self.steps * self.blocks) as f64;
        (
            1e3 * self.measured_seconds / passes,
            1e3 * self.expected_seconds_ai / passes,
            1e3 * self.expected_seconds_oi / passes,
        )
    }

    /// Single-line summary.
    pub fn summary_line(&self) -> String {
        let (measured, _, _) = self.ms_per_block();
        format!(
            "{:.2} GFLOP/s ({:.1}% peak) {:.5} ms/block AI={:.2} OI={:.2} FLOP/B eff={:.1}%/{:.1}%",
            self.measured_gflops(),
            100.0 * self.hw_utilization(),
            measured,
            self.ai_overall,
            self.oi_overall,
            100.0 * self.efficiency_ai(),
            100.0 * self.efficiency_oi()
        )
    }

    /// Detailed multi-line report.
    pub fn report(&self) -> String {
        let mib = 1.0 / (1024.0 * 1024.0);
        let (measured, ai, oi) = self.ms_per_block();
        format!(
            "Memory:\n  Workspace:   {:.4} MB\n  Traffic:     {:.4} MB\n\
             Machine:\n  PP:          {:.2} GFLOP/s per core, {:.2} GFLOP/s overall\n  \
             PB:          {:.2} GB/s\n  Ridge:       {:.2} FLOP/B\n\
             Convection:\n  Measured:    {:.2} GFLOP/s\n  \
             Intensity:   {:.2} FLOP/B [AI], {:.2} FLOP/B [OI]\n  \
             Per block:   {:.5} ms (expected {:.5} [AI], {:.5} [OI])\n  \
             Expected:    {:.2} GFLOP/s [AI], {:.2} GFLOP/s [OI]\n  \
             Efficiency:  {:.2}% [AI], {:.2}% [OI]\n  Utilization: {:.2}%",
            self.footprint_bytes as f64 * mib,
            self.total_traffic_bytes * mib,
            1e-9 * self.machine.peak_flops_per_core,
            1e-9 * self.machine.peak_flops(),
            1e-9 * self.machine.peak_bandwidth,
            self.machine.ridge(),
            self.measured_gflops(),
            self.ai_overall,
            self.oi_overall,
            measured,
            ai,
            oi,
            self.expected_gflops_ai(),
            self.expected_gflops_oi(),
            100.0 * self.efficiency_ai(),
            100.0 * self.efficiency_oi(),
            100.0 * self.hw_utilization()
        )
    }

    /// Emit the report through `tracing` at info level.
    pub fn log(&self) {
        info!(
            gflops = self.measured_gflops(),
            expected_ai = self.expected_gflops_ai(),
            expected_oi = self.expected_gflops_oi(),
            utilization = self.hw_utilization(),
            "convection roofline: {}",
            self.summary_line()
        );
    }
}
