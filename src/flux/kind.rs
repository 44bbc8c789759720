//! Per-quantity analytic fluxes.
//!
//! Every transported quantity uses the same HLLE / HLLC machinery and differs
//! only in its conserved value `q`, its physical flux `f` and its HLLC star
//! state `q*`. [`FluxKind`] tags the quantity so one routine serves all seven.

use crate::state::FacePrimitive;
use crate::types::{Axis, Quantity, Real};

/// Which transverse velocity component a momentum flux carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transverse {
    First,
    Second,
}

/// Which EOS parameter an advection flux carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advected {
    Gamma,
    Pi,
}

/// Analytic flux formula of one conserved quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FluxKind {
    /// q = ρ, f = ρ vn
    Mass,
    /// q = ρ vn, f = vn ρ vn + p
    NormalMomentum,
    /// q = ρ vt, f = vn ρ vt
    TransverseMomentum(Transverse),
    /// q = e, f = vn (e + p)
    Energy,
    /// q = φ, f = vn φ
    Advected(Advected),
}

impl FluxKind {
    /// Flux kind of conserved quantity `q` for a sweep along `axis`.
    pub fn for_quantity(axis: Axis, q: Quantity) -> Self {
        let momentum = |component: Axis| {
            if component == axis {
                return FluxKind::NormalMomentum;
            }
            // Transverse components keep x, y, z order.
            let first = Axis::ALL.iter().find(|&&a| a != axis).copied();
            if first == Some(component) {
                FluxKind::TransverseMomentum(Transverse::First)
            } else {
                FluxKind::TransverseMomentum(Transverse::Second)
            }
        };
        match q {
            Quantity::Rho => FluxKind::Mass,
            Quantity::U => momentum(Axis::X),
            Quantity::V => momentum(Axis::Y),
            Quantity::W => momentum(Axis::Z),
            Quantity::P => FluxKind::Energy,
            Quantity::G => FluxKind::Advected(Advected::Gamma),
            Quantity::Pi => FluxKind::Advected(Advected::Pi),
        }
    }

    /// Flux kinds of all seven conserved quantities, in record order.
    pub fn all(axis: Axis) -> [FluxKind; 7] {
        Quantity::ALL.map(|q| FluxKind::for_quantity(axis, q))
    }

    #[inline(always)]
    fn transverse(t: Transverse, s: &FacePrimitive) -> Real {
        match t {
            Transverse::First => s.vt1,
            Transverse::Second => s.vt2,
        }
    }

    #[inline(always)]
    fn advected(a: Advected, s: &FacePrimitive) -> Real {
        match a {
            Advected::Gamma => s.gamma,
            Advected::Pi => s.pi,
        }
    }

    /// Conserved value `q` of a face state.
    #[inline(always)]
    pub fn conserved(self, s: &FacePrimitive) -> Real {
        match self {
            FluxKind::Mass => s.rho,
            FluxKind::NormalMomentum => s.vn * s.rho,
            FluxKind::TransverseMomentum(t) => Self::transverse(t, s) * s.rho,
            FluxKind::Energy => s.total_energy(),
            FluxKind::Advected(a) => Self::advected(a, s),
        }
    }

    /// Physical flux `f` normal to the face.
    #[inline(always)]
    pub fn physical_flux(self, s: &FacePrimitive) -> Real {
        match self {
            FluxKind::Mass => s.vn * s.rho,
            FluxKind::NormalMomentum => s.vn * (s.vn * s.rho) + s.p,
            FluxKind::TransverseMomentum(t) => s.vn * (Self::transverse(t, s) * s.rho),
            FluxKind::Energy => s.vn * (s.p + s.total_energy()),
            FluxKind::Advected(a) => s.vn * Self::advected(a, s),
        }
    }

    /// HLLC star state `q* = (s - vn)/(s - u*) · base` on the side of `s`.
    ///
    /// The caller guarantees `speed != u_star`.
    #[inline(always)]
    pub fn star_state(self, s: &FacePrimitive, speed: Real, u_star: Real) -> Real {
        let xi = (speed - s.vn) / (speed - u_star);
        match self {
            FluxKind::Mass => s.rho * xi,
            FluxKind::NormalMomentum => s.rho * u_star * xi,
            FluxKind::TransverseMomentum(t) => s.rho * Self::transverse(t, s) * xi,
            FluxKind::Energy => {
                xi * (s.total_energy()
                    + (u_star - s.vn) * (s.rho * u_star + s.p / (speed - s.vn)))
            }
            FluxKind::Advected(a) => Self::advected(a, s) * xi,
        }
    }
}
