//! WENO5 reconstruction of face states.
//!
//! [`weno_minus`] and [`weno_plus`] reconstruct a single face value from five
//! cell values; the sweep functions apply them to whole tiles in x, y and z.

mod sweeps;
mod weno;

pub use sweeps::{
    FaceStates, reconstruct_x, reconstruct_y, reconstruct_z, weno_x, weno_y, weno_z,
};
pub use weno::{LINEAR_WEIGHTS, WENO_EPS, weno_minus, weno_plus};
