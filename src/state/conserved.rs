//! Conserved cell state.
//!
//! The block grid stores, per cell, the conserved variables of the
//! two-phase Euler system written with the stiffened-gas mixture
//! parameters Γ = 1/(γ-1) and Π = γ p_c/(γ-1):
//!
//! - ρ: density
//! - ρu, ρv, ρw: momentum
//! - E = Γp + ½ρ|v|² + Π: total energy
//! - Γ, Π: advected EOS parameters

use std::ops::{Add, Mul, Sub};

use crate::types::{NQUANTITIES, Real};

use super::primitive::PrimitiveState;

/// Conserved variables of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConservedState {
    /// Density ρ (must be positive)
    pub rho: Real,
    /// x-momentum ρu
    pub rho_u: Real,
    /// y-momentum ρv
    pub rho_v: Real,
    /// z-momentum ρw
    pub rho_w: Real,
    /// Total energy E
    pub energy: Real,
    /// Γ = 1/(γ-1)
    pub gamma: Real,
    /// Π = γ p_c/(γ-1)
    pub pi: Real,
}

impl ConservedState {
    /// Create a new conserved state.
    #[inline(always)]
    pub fn new(
        rho: Real,
        rho_u: Real,
        rho_v: Real,
        rho_w: Real,
        energy: Real,
        gamma: Real,
        pi: Real,
    ) -> Self {
        Self {
            rho,
            rho_u,
            rho_v,
            rho_w,
            energy,
            gamma,
            pi,
        }
    }

    /// Conserved state of a primitive state: `E = Γp + ½ρ|v|² + Π`.
    #[inline(always)]
    pub fn from_primitive(w: &PrimitiveState) -> Self {
        Self {
            rho: w.rho,
            rho_u: w.rho * w.u,
            rho_v: w.rho * w.v,
            rho_w: w.rho * w.w,
            energy: w.p * w.gamma + 0.5 * w.rho * (w.u * w.u + w.v * w.v + w.w * w.w) + w.pi,
            gamma: w.gamma,
            pi: w.pi,
        }
    }

    /// Primitive variables of this state.
    #[inline(always)]
    pub fn to_primitive(&self) -> PrimitiveState {
        PrimitiveState::from_conserved(self)
    }

    /// Read from the first seven values of a record.
    ///
    /// # Panics
    /// Panics if `record` holds fewer than seven values.
    #[inline(always)]
    pub fn from_slice(record: &[Real]) -> Self {
        Self {
            rho: record[0],
            rho_u: record[1],
            rho_v: record[2],
            rho_w: record[3],
            energy: record[4],
            gamma: record[5],
            pi: record[6],
        }
    }

    /// Write into the first seven values of a record, leaving padding untouched.
    #[inline(always)]
    pub fn write_to(&self, record: &mut [Real]) {
        record[..NQUANTITIES].copy_from_slice(&self.to_array());
    }

    /// Convert to array representation in record order.
    #[inline(always)]
    pub fn to_array(&self) -> [Real; NQUANTITIES] {
        [
            self.rho,
            self.rho_u,
            self.rho_v,
            self.rho_w,
            self.energy,
            self.gamma,
            self.pi,
        ]
    }

    /// Create from array representation in record order.
    #[inline(always)]
    pub fn from_array(arr: [Real; NQUANTITIES]) -> Self {
        Self::from_slice(&arr)
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|x| x.is_finite())
    }
}

impl Add for ConservedState {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self {
            rho: self.rho + rhs.rho,
            rho_u: self.rho_u + rhs.rho_u,
            rho_v: self.rho_v + rhs.rho_v,
            rho_w: self.rho_w + rhs.rho_w,
            energy: self.energy + rhs.energy,
            gamma: self.gamma + rhs.gamma,
            pi: self.pi + rhs.pi,
        }
    }
}

impl Sub for ConservedState {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self {
            rho: self.rho - rhs.rho,
            rho_u: self.rho_u - rhs.rho_u,
            rho_v: self.rho_v - rhs.rho_v,
            rho_w: self.rho_w - rhs.rho_w,
            energy: self.energy - rhs.energy,
            gamma: self.gamma - rhs.gamma,
            pi: self.pi - rhs.pi,
        }
    }
}

impl Mul<Real> for ConservedState {
    type Output = Self;

    #[inline(always)]
    fn mul(self, s: Real) -> Self {
        Self {
            rho: self.rho * s,
            rho_u: self.rho_u * s,
            rho_v: self.rho_v * s,
            rho_w: self.rho_w * s,
            energy: self.energy * s,
            gamma: self.gamma * s,
            pi: self.pi * s,
        }
    }
}
