//! HLLC approximate Riemann solver.
//!
//! Restores the contact wave missing from HLLE. The fan is split by the
//! contact speed u* into a left and a right star region, each with
//!
//! F* = F + s (q* - q),   q* = (s - v)/(s - u*) · base
//!
//! Reference: Toro, Spruce & Speares (1994), "Restoration of the contact
//! surface in the HLL-Riemann solver", Shock Waves 4, 25–34.

use std::cmp::Ordering;

use crate::state::FacePrimitive;
use crate::types::Real;

use super::kind::FluxKind;
use super::wave_speeds::WaveFan;

/// Region of the HLLC fan containing the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HllcRegion {
    /// `s⁻ > 0`
    Left,
    /// `s⁺ < 0`
    Right,
    /// `u* ≥ 0` and `s⁻ ≤ 0`
    StarLeft,
    /// `u* < 0` and `s⁺ ≥ 0`
    StarRight,
}

impl HllcRegion {
    /// The four region predicates, in the order of the variants.
    #[inline(always)]
    pub fn predicates(s_minus: Real, s_plus: Real, u_star: Real) -> [bool; 4] {
        [
            s_minus > 0.0,
            s_plus < 0.0,
            u_star >= 0.0 && s_minus <= 0.0,
            u_star < 0.0 && s_plus >= 0.0,
        ]
    }

    /// Classify a face; `None` if no predicate holds (NaN speeds).
    #[inline(always)]
    pub fn classify(s_minus: Real, s_plus: Real, u_star: Real) -> Option<Self> {
        const REGIONS: [HllcRegion; 4] = [
            HllcRegion::Left,
            HllcRegion::Right,
            HllcRegion::StarLeft,
            HllcRegion::StarRight,
        ];
        Self::predicates(s_minus, s_plus, u_star)
            .iter()
            .position(|&p| p)
            .map(|k| REGIONS[k])
    }
}

/// Star-region flux on the side with outer speed `speed`.
///
/// A star region of zero width (`speed == u*`) returns the physical flux.
#[inline(always)]
fn star_flux(kind: FluxKind, side: &FacePrimitive, speed: Real, u_star: Real) -> Real {
    let f = kind.physical_flux(side);
    if speed == u_star {
        return f;
    }
    f + speed * (kind.star_state(side, speed, u_star) - kind.conserved(side))
}

/// HLLC flux of one quantity. NaN when the fan cannot be classified.
#[inline(always)]
pub fn hllc_flux(kind: FluxKind, minus: &FacePrimitive, plus: &FacePrimitive, fan: &WaveFan) -> Real {
    match HllcRegion::classify(fan.s_minus, fan.s_plus, fan.u_star) {
        Some(HllcRegion::Left) => kind.physical_flux(minus),
        Some(HllcRegion::Right) => kind.physical_flux(plus),
        Some(HllcRegion::StarLeft) => star_flux(kind, minus, fan.s_minus, fan.u_star),
        Some(HllcRegion::StarRight) => star_flux(kind, plus, fan.s_plus, fan.u_star),
        None => Real::NAN,
    }
}

/// Normal velocity of the HLLC star state on the upwind side of the contact.
///
/// `v + s (ξ - 1)` with `ξ = (s - v)/(s - u*)`; both sides are averaged when
/// `u* == 0`.
#[inline(always)]
pub fn hllc_face_velocity(minus: &FacePrimitive, plus: &FacePrimitive, fan: &WaveFan) -> Real {
    let side = |v: Real, s: Real| {
        if s == fan.u_star {
            v
        } else {
            v + s * ((s - v) / (s - fan.u_star) - 1.0)
        }
    };
    match fan.u_star.partial_cmp(&0.0) {
        Some(Ordering::Greater) => side(minus.vn, fan.s_minus),
        Some(Ordering::Less) => side(plus.vn, fan.s_plus),
        Some(Ordering::Equal) => {
            0.5 * (side(minus.vn, fan.s_minus) + side(plus.vn, fan.s_plus))
        }
        None => Real::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::wave_speeds::hllc_wave_speeds;
    use crate::types::Axis;
    use approx::assert_relative_eq;

    fn face(rho: Real, vn: Real, p: Real) -> FacePrimitive {
        FacePrimitive {
            rho,
            vn,
            vt1: 0.1,
            vt2: -0.2,
            p,
            gamma: 2.5,
            pi: 0.3,
        }
    }

    #[test]
    fn test_consistency() {
        let s = face(1.1, 0.4, 1.7);
        let fan = hllc_wave_speeds(&s, &s).unwrap();
        for kind in FluxKind::all(Axis::Z) {
            assert_relative_eq!(
                hllc_flux(kind, &s, &s, &fan),
                kind.physical_flux(&s),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn test_stationary_contact_is_exact() {
        // Pressure and velocity equilibrium across a density jump: only the
        // pressure term of the momentum flux survives.
        let l = face(1.0, 0.0, 1.0);
        let r = face(0.125, 0.0, 1.0);
        let fan = hllc_wave_speeds(&l, &r).unwrap();
        assert_relative_eq!(fan.u_star, 0.0);
        assert_relative_eq!(hllc_flux(FluxKind::Mass, &l, &r, &fan), 0.0, epsilon = 1e-6);
        assert_relative_eq!(
            hllc_flux(FluxKind::NormalMomentum, &l, &r, &fan),
            1.0,
            epsilon = 1e-5
        );
        assert_relative_eq!(hllc_face_velocity(&l, &r, &fan), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_regions_cover_clamped_fans() {
        assert_eq!(HllcRegion::classify(0.0, 2.0, 0.5), Some(HllcRegion::StarLeft));
        assert_eq!(HllcRegion::classify(-1.0, 0.0, -0.5), Some(HllcRegion::StarRight));
        assert_eq!(HllcRegion::classify(-1.0, 1.0, 0.0), Some(HllcRegion::StarLeft));
        assert_eq!(HllcRegion::classify(-1.0, 1.0, Real::NAN), None);
    }

    #[test]
    fn test_zero_width_star_region() {
        let l = face(1.0, 0.0, 1.0);
        let r = face(1.0, 0.0, 1.0);
        let fan = WaveFan {
            s_minus: 0.0,
            s_plus: 1.0,
            u_star: 0.0,
        };
        let f = hllc_flux(FluxKind::Energy, &l, &r, &fan);
        assert!(f.is_finite());
        assert_eq!(f, FluxKind::Energy.physical_flux(&l));
    }

    #[test]
    fn test_face_velocity_upwind_side() {
        let l = face(1.0, 1.0, 1.0);
        let r = face(1.0, 1.0, 1.0);
        let fan = hllc_wave_speeds(&l, &r).unwrap();
        // Uniform flow: the star velocity is the flow velocity
        assert_relative_eq!(hllc_face_velocity(&l, &r, &fan), 1.0, epsilon = 1e-5);
    }
}
