//! Primitive cell and face states.

use crate::types::{Axis, Real};

use super::conserved::ConservedState;

/// Primitive variables of one cell: (ρ, u, v, w, p, Γ, Π).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrimitiveState {
    pub rho: Real,
    pub u: Real,
    pub v: Real,
    pub w: Real,
    pub p: Real,
    pub gamma: Real,
    pub pi: Real,
}

impl PrimitiveState {
    /// Create a new primitive state.
    #[inline(always)]
    pub fn new(rho: Real, u: Real, v: Real, w: Real, p: Real, gamma: Real, pi: Real) -> Self {
        Self {
            rho,
            u,
            v,
            w,
            p,
            gamma,
            pi,
        }
    }

    /// Primitive variables of a conserved state.
    ///
    /// `p = (E - ½|ρv|²/ρ - Π) / Γ`. Division by ρ and Γ is not guarded; a
    /// vacuum or a zero Γ produces non-finite values.
    #[inline(always)]
    pub fn from_conserved(q: &ConservedState) -> Self {
        let momentum_sq = q.rho_u * q.rho_u + q.rho_v * q.rho_v + q.rho_w * q.rho_w;
        Self {
            rho: q.rho,
            u: q.rho_u / q.rho,
            v: q.rho_v / q.rho,
            w: q.rho_w / q.rho,
            p: (q.energy - momentum_sq * (0.5 / q.rho) - q.pi) / q.gamma,
            gamma: q.gamma,
            pi: q.pi,
        }
    }

    /// Convert to array representation in record order.
    #[inline(always)]
    pub fn to_array(&self) -> [Real; 7] {
        [self.rho, self.u, self.v, self.w, self.p, self.gamma, self.pi]
    }

    /// Create from array representation in record order.
    #[inline(always)]
    pub fn from_array(arr: [Real; 7]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3], arr[4], arr[5], arr[6])
    }

    /// Face-local view of this state for a sweep along `axis`.
    #[inline(always)]
    pub fn to_face(&self, axis: Axis) -> FacePrimitive {
        let (vn, vt1, vt2) = axis.rotate(self.u, self.v, self.w);
        FacePrimitive {
            rho: self.rho,
            vn,
            vt1,
            vt2,
            p: self.p,
            gamma: self.gamma,
            pi: self.pi,
        }
    }
}

/// Reconstructed primitive state on one side of a face.
///
/// Velocity is rotated into the face frame: `vn` is normal to the face, `vt1`
/// and `vt2` are the transverse components in the order of [`Axis::rotate`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FacePrimitive {
    pub rho: Real,
    pub vn: Real,
    pub vt1: Real,
    pub vt2: Real,
    pub p: Real,
    pub gamma: Real,
    pub pi: Real,
}

impl FacePrimitive {
    /// Total energy `e = pΓ + ½ρ(vn² + vt1² + vt2²) + Π`.
    #[inline(always)]
    pub fn total_energy(&self) -> Real {
        self.p * self.gamma
            + 0.5 * self.rho * (self.vn * self.vn + self.vt1 * self.vt1 + self.vt2 * self.vt2)
            + self.pi
    }

    /// Whether any component is NaN.
    #[inline(always)]
    pub fn has_nan(&self) -> bool {
        self.rho.is_nan()
            || self.vn.is_nan()
            || self.vt1.is_nan()
            || self.vt2.is_nan()
            || self.p.is_nan()
            || self.gamma.is_nan()
            || self.pi.is_nan()
    }

    /// Squared sound speed of the stiffened-gas mixture, `((p + Π)/Γ + p)/ρ`.
    #[inline(always)]
    pub fn sound_speed_squared(&self) -> Real {
        ((self.p + self.pi) / self.gamma + self.p) / self.rho
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_conserved() {
        let q = ConservedState::new(2.0, 4.0, -2.0, 0.0, 20.0, 2.5, 1.0);
        let w = PrimitiveState::from_conserved(&q);
        assert_relative_eq!(w.u, 2.0);
        assert_relative_eq!(w.v, -1.0);
        // (20 - 0.5 * 20 / 2 - 1) / 2.5
        assert_relative_eq!(w.p, 5.6, epsilon = 1e-5);
    }

    #[test]
    fn test_round_trip() {
        let w = PrimitiveState::new(1.2, 0.3, -0.4, 0.5, 2.0, 2.5, 0.1);
        let back = ConservedState::from_primitive(&w).to_primitive();
        assert_relative_eq!(back.u, w.u, epsilon = 1e-5);
        assert_relative_eq!(back.v, w.v, epsilon = 1e-5);
        assert_relative_eq!(back.w, w.w, epsilon = 1e-5);
        assert_relative_eq!(back.p, w.p, epsilon = 1e-5);
    }

    #[test]
    fn test_face_rotation_and_energy() {
        let w = PrimitiveState::new(1.0, 1.0, 2.0, 3.0, 1.0, 2.5, 0.0);
        let f = w.to_face(Axis::Z);
        assert_eq!((f.vn, f.vt1, f.vt2), (3.0, 1.0, 2.0));
        let e = ConservedState::from_primitive(&w).energy;
        assert_relative_eq!(f.total_energy(), e);
    }

    #[test]
    fn test_sound_speed_ideal_gas() {
        // gamma = 1.4 -> Γ = 2.5, c² = γ p / ρ
        let f = PrimitiveState::new(1.0, 0.0, 0.0, 0.0, 1.0, 2.5, 0.0).to_face(Axis::X);
        assert_relative_eq!(f.sound_speed_squared(), 1.4, epsilon = 1e-6);
    }
}
