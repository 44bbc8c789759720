//! Performance model and roofline report of the convection pass.
//!
//! - [`PerformanceModel`]: per-stage FLOP and memory traffic of one block
//! - [`MachineSpec`]: peak compute and bandwidth of the target machine
//! - [`RooflineReport`]: expected versus measured throughput

mod roofline;

pub use roofline::{KernelStage, MachineSpec, PerformanceModel, RooflineReport, StageCost};
