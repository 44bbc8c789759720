//! Storage precision.
//!
//! Block data, tiles and fluxes are stored as [`Real`]. The default build uses
//! `f32`, matching the single-precision layout of the block grid; the
//! `double-precision` feature switches storage to `f64`.
//!
//! WENO smoothness indicators are always evaluated in [`Work`] (`f64`), so the
//! reconstruction keeps its resolution even when storage is single precision.

/// Scalar type used for all stored block and tile values.
#[cfg(not(feature = "double-precision"))]
pub type Real = f32;

/// Scalar type used for all stored block and tile values.
#[cfg(feature = "double-precision")]
pub type Real = f64;

/// Working precision of the WENO reconstruction.
pub type Work = f64;

/// Number of scalars per conserved record: ρ, ρu, ρv, ρw, E, Γ, Π.
pub const NQUANTITIES: usize = 7;

/// Width of the WENO5 halo on each side of a block.
pub const HALO: usize = 3;
