//! HLLE (Harten-Lax-van Leer-Einfeldt) approximate Riemann solver.
//!
//! Two-wave approximation bounded by the slowest and fastest signal speeds:
//!
//! F* = (s⁺ F⁻ - s⁻ F⁺ + s⁻ s⁺ (q⁺ - q⁻)) / (s⁺ - s⁻)
//!
//! with the upwind flux taken when the whole fan moves one way.
//!
//! Reference: Toro, "Riemann Solvers and Numerical Methods for Fluid Dynamics"

use crate::state::FacePrimitive;
use crate::types::Real;

use super::kind::FluxKind;
use super::wave_speeds::WaveFan;

/// Region of the HLLE fan containing the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HlleRegion {
    /// `s⁻ > 0`: all waves move right.
    Left,
    /// `s⁺ < 0`: all waves move left.
    Right,
    /// Face inside the fan.
    Fan,
}

impl HlleRegion {
    /// Classify a face from its outer wave speeds.
    #[inline(always)]
    pub fn classify(s_minus: Real, s_plus: Real) -> Self {
        if s_minus > 0.0 {
            HlleRegion::Left
        } else if s_plus < 0.0 {
            HlleRegion::Right
        } else {
            HlleRegion::Fan
        }
    }
}

/// HLLE flux of one quantity.
///
/// A collapsed fan (`s⁺ == s⁻`) falls back to the mean of the two physical
/// fluxes.
#[inline(always)]
pub fn hlle_flux(kind: FluxKind, minus: &FacePrimitive, plus: &FacePrimitive, fan: &WaveFan) -> Real {
    match HlleRegion::classify(fan.s_minus, fan.s_plus) {
        HlleRegion::Left => kind.physical_flux(minus),
        HlleRegion::Right => kind.physical_flux(plus),
        HlleRegion::Fan => {
            let f_minus = kind.physical_flux(minus);
            let f_plus = kind.physical_flux(plus);
            let ds = fan.s_plus - fan.s_minus;
            if ds == 0.0 {
                return 0.5 * (f_minus + f_plus);
            }
            let q_minus = kind.conserved(minus);
            let q_plus = kind.conserved(plus);
            (fan.s_plus * f_minus - fan.s_minus * f_plus
                + fan.s_minus * fan.s_plus * (q_plus - q_minus))
                * (1.0 / ds)
        }
    }
}

/// HLLE-averaged normal velocity `(s⁺ v⁻ - s⁻ v⁺) / (s⁺ - s⁻)`.
///
/// Evaluated in every fan region.
#[inline(always)]
pub fn hlle_face_velocity(minus: &FacePrimitive, plus: &FacePrimitive, fan: &WaveFan) -> Real {
    let ds = fan.s_plus - fan.s_minus;
    if ds == 0.0 {
        0.5 * (minus.vn + plus.vn)
    } else {
        (fan.s_plus * minus.vn - fan.s_minus * plus.vn) * (1.0 / ds)
    }
}
