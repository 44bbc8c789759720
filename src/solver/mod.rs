//! Block convection pass.
//!
//! # Submodules
//!
//! - [`config`]: blend coefficients and solver selection
//! - [`convection`]: the streaming z-slice orchestrator
//! - [`rhs`]: flux divergence and write-back
//! - [`workspace`]: preallocated scratch buffers and ring windows
//! - [`simd_kernels`]: vectorized difference kernels
//! - [`error`]: error types

pub mod config;
pub mod convection;
pub mod error;
pub mod rhs;
pub mod simd_kernels;
pub mod workspace;

pub use config::ConvectionConfig;
pub use convection::{ConvectionKernel, compute_convection};
pub use error::{ConvectionError, Location, Stage, StateViolation};
pub use rhs::{RhsTiles, divergence_x, divergence_y, divergence_z, write_back};
pub use workspace::{ConvectionWorkspace, FACE_SLICES, INPUT_SLICES};
