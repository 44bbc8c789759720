//! Trait-based Riemann solver abstraction.
//!
//! A Riemann solver turns the reconstructed states on both sides of a face
//! into a wave fan, the numerical flux of each conserved quantity, and the
//! face normal velocity used by the non-conservative Γ/Π term.
//!
//! # Example
//! ```
//! use mpcf_rs::flux::{FluxKind, HllcSolver, RiemannSolver, StandardSolver};
//! use mpcf_rs::state::PrimitiveState;
//! use mpcf_rs::types::Axis;
//!
//! let l = PrimitiveState::new(1.0, 0.0, 0.0, 0.0, 1.0, 2.5, 0.0).to_face(Axis::X);
//! let r = PrimitiveState::new(0.125, 0.0, 0.0, 0.0, 0.1, 2.5, 0.0).to_face(Axis::X);
//!
//! // Using concrete type
//! let fan = HllcSolver.wave_fan(&l, &r).unwrap();
//! let mass = HllcSolver.flux(FluxKind::Mass, &l, &r, &fan);
//!
//! // Using the enum
//! let solver = StandardSolver::Hllc;
//! assert_eq!(solver.flux(FluxKind::Mass, &l, &r, &fan), mass);
//! ```

use std::fmt;

use crate::solver::StateViolation;
use crate::state::FacePrimitive;
use crate::types::Real;

use super::hllc::{hllc_face_velocity, hllc_flux};
use super::hlle::{hlle_face_velocity, hlle_flux};
use super::kind::FluxKind;
use super::wave_speeds::{WaveFan, hllc_wave_speeds, hlle_wave_speeds};

// =============================================================================
// Riemann Solver Trait
// =============================================================================

/// Approximate Riemann solver for the two-phase Euler system.
///
/// # Implementation Notes
///
/// - Fluxes must be consistent: equal states give the physical flux
/// - `flux` must not allocate; it is called seven times per face
///
/// # Extending
///
/// To add a new solver:
/// 1. Create a struct (can be zero-sized if no parameters)
/// 2. Implement `RiemannSolver` for it
/// 3. Optionally add it to `StandardSolver` for configuration-driven selection
pub trait RiemannSolver: Send + Sync {
    /// Wave fan of a face, or the violated invariant.
    fn wave_fan(
        &self,
        minus: &FacePrimitive,
        plus: &FacePrimitive,
    ) -> Result<WaveFan, StateViolation>;

    /// Numerical flux of one conserved quantity.
    fn flux(
        &self,
        kind: FluxKind,
        minus: &FacePrimitive,
        plus: &FacePrimitive,
        fan: &WaveFan,
    ) -> Real;

    /// Normal velocity at the face used for the velocity divergence.
    fn face_velocity(&self, minus: &FacePrimitive, plus: &FacePrimitive, fan: &WaveFan) -> Real;

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;
}

// =============================================================================
// Concrete Solvers
// =============================================================================

/// HLLE solver: two outer waves, no contact.
#[derive(Clone, Copy, Debug, Default)]
pub struct HlleSolver;

impl RiemannSolver for HlleSolver {
    #[inline(always)]
    fn wave_fan(
        &self,
        minus: &FacePrimitive,
        plus: &FacePrimitive,
    ) -> Result<WaveFan, StateViolation> {
        hlle_wave_speeds(minus, plus)
    }

    #[inline(always)]
    fn flux(
        &self,
        kind: FluxKind,
        minus: &FacePrimitive,
        plus: &FacePrimitive,
        fan: &WaveFan,
    ) -> Real {
        hlle_flux(kind, minus, plus, fan)
    }

    #[inline(always)]
    fn face_velocity(&self, minus: &FacePrimitive, plus: &FacePrimitive, fan: &WaveFan) -> Real {
        hlle_face_velocity(minus, plus, fan)
    }

    fn name(&self) -> &'static str {
        "hlle"
    }
}

/// HLLC solver: outer waves plus the contact.
#[derive(Clone, Copy, Debug, Default)]
pub struct HllcSolver;

impl RiemannSolver for HllcSolver {
    #[inline(always)]
    fn wave_fan(
        &self,
        minus: &FacePrimitive,
        plus: &FacePrimitive,
    ) -> Result<WaveFan, StateViolation> {
        hllc_wave_speeds(minus, plus)
    }

    #[inline(always)]
    fn flux(
        &self,
        kind: FluxKind,
        minus: &FacePrimitive,
        plus: &FacePrimitive,
        fan: &WaveFan,
    ) -> Real {
        hllc_flux(kind, minus, plus, fan)
    }

    #[inline(always)]
    fn face_velocity(&self, minus: &FacePrimitive, plus: &FacePrimitive, fan: &WaveFan) -> Real {
        hllc_face_velocity(minus, plus, fan)
    }

    fn name(&self) -> &'static str {
        "hllc"
    }
}

// =============================================================================
// Standard Solver Enum (Zero-Cost Dispatch)
// =============================================================================

/// Enum wrapper for the built-in solvers.
///
/// The block pass matches on this once and then runs fully monomorphized
/// over [`HlleSolver`] or [`HllcSolver`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StandardSolver {
    /// HLLE (robust, diffusive on contacts)
    #[default]
    Hlle,
    /// HLLC (resolves contacts and material interfaces)
    Hllc,
}

impl RiemannSolver for StandardSolver {
    #[inline]
    fn wave_fan(
        &self,
        minus: &FacePrimitive,
        plus: &FacePrimitive,
    ) -> Result<WaveFan, StateViolation> {
        match self {
            StandardSolver::Hlle => HlleSolver.wave_fan(minus, plus),
            StandardSolver::Hllc => HllcSolver.wave_fan(minus, plus),
        }
    }

    #[inline]
    fn flux(
        &self,
        kind: FluxKind,
        minus: &FacePrimitive,
        plus: &FacePrimitive,
        fan: &WaveFan,
    ) -> Real {
        match self {
            StandardSolver::Hlle => HlleSolver.flux(kind, minus, plus, fan),
            StandardSolver::Hllc => HllcSolver.flux(kind, minus, plus, fan),
        }
    }

    #[inline]
    fn face_velocity(&self, minus: &FacePrimitive, plus: &FacePrimitive, fan: &WaveFan) -> Real {
        match self {
            StandardSolver::Hlle => HlleSolver.face_velocity(minus, plus, fan),
            StandardSolver::Hllc => HllcSolver.face_velocity(minus, plus, fan),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            StandardSolver::Hlle => HlleSolver.name(),
            StandardSolver::Hllc => HllcSolver.name(),
        }
    }
}

impl fmt::Display for StandardSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
