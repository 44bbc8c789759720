//! Approximate Riemann solvers for the two-phase Euler system.
//!
//! This module provides:
//! - Wave speed estimates (HLLE bounds, HLLC pressure-based estimates)
//! - A [`FluxKind`] tag selecting the analytic flux of each conserved quantity
//! - HLLE and HLLC numerical fluxes behind the [`RiemannSolver`] trait
//! - Tile sweeps applying a solver to every face of a directional pass

mod hllc;
mod hlle;
mod kind;
mod sweep;
mod traits;
mod wave_speeds;

pub use hllc::{HllcRegion, hllc_face_velocity, hllc_flux};
pub use hlle::{HlleRegion, hlle_face_velocity, hlle_flux};
pub use kind::{Advected, FluxKind, Transverse};
pub use sweep::{FanTiles, FluxTiles, estimate_wave_speeds, riemann_fluxes};
pub use traits::{HllcSolver, HlleSolver, RiemannSolver, StandardSolver};
pub use wave_speeds::{WaveFan, checked_sound_speed, hllc_wave_speeds, hlle_wave_speeds};
