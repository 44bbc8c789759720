//! # mpcf-rs
//!
//! Convective flux kernel for compressible two-phase flow on cubic blocks.
//!
//! This crate provides the building blocks of one convection pass:
//! - Conversion of conserved records to primitive tiles
//! - WENO5 reconstruction of face states in x, y and z
//! - HLLE and HLLC approximate Riemann solvers
//! - The non-conservative `φ ∇·v` term of the EOS parameters Γ and Π
//! - Flux divergence and blended write-back into the destination block
//! - A streaming orchestrator that walks the block one z slice at a time
//! - A roofline performance model of the pass
//!
//! # Example
//!
//! ```
//! use mpcf_rs::{BlockBuffer, ConservedState, ConvectionConfig, ConvectionWorkspace};
//! use mpcf_rs::{PrimitiveState, StandardSolver, compute_convection};
//!
//! let n = 4;
//! let water = ConservedState::from_primitive(&PrimitiveState::new(
//!     1000.0, 1.0, 0.0, 0.0, 1.0e5, 1.0 / 5.4, 6.4 * 3.0e8 / 5.4,
//! ));
//! let mut src = BlockBuffer::new(n + 6, 7);
//! src.set_from_fn(|_, _, _| water);
//! let mut dst = BlockBuffer::new(n, 7);
//!
//! let config = ConvectionConfig::new(0.0, 1.0e-4).with_solver(StandardSolver::Hllc);
//! let mut workspace = ConvectionWorkspace::new(n);
//! compute_convection(&src.view(), &mut dst.view_mut(), &mut workspace, &config).unwrap();
//! ```

pub mod diagnostics;
pub mod flux;
pub mod layout;
pub mod reconstruction;
pub mod solver;
pub mod source;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use types::{Axis, HALO, NQUANTITIES, Quantity, Real, Work};

pub use layout::{BlockBuffer, BlockLayout, BlockView, BlockViewMut, Ring};
pub use state::{ConservedState, FacePrimitive, PrimitiveSlice, PrimitiveState};

pub use flux::{FluxKind, HllcSolver, HlleSolver, RiemannSolver, StandardSolver, WaveFan};
pub use reconstruction::{FaceStates, weno_minus, weno_plus};
pub use source::{ExtraTermMode, SourceTiles};

pub use solver::{
    ConvectionConfig, ConvectionError, ConvectionKernel, ConvectionWorkspace, Location, Stage,
    StateViolation, compute_convection,
};

// Diagnostics
pub use diagnostics::{MachineSpec, PerformanceModel, RooflineReport};
