//! Characteristic speed estimates at a face.
//!
//! Both estimates use the stiffened-gas sound speed
//! `a = sqrt(((p + Π)/Γ + p)/ρ)` of each side.
//!
//! Reference: Toro, "Riemann Solvers and Numerical Methods for Fluid Dynamics",
//! sections 10.5 (HLLE bounds) and 10.6 (pressure-based HLLC estimates).

use crate::solver::StateViolation;
use crate::state::FacePrimitive;
use crate::types::Real;

/// Wave fan of one face.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveFan {
    /// Slowest signal speed.
    pub s_minus: Real,
    /// Fastest signal speed.
    pub s_plus: Real,
    /// Contact speed (HLLC only, zero for HLLE).
    pub u_star: Real,
}

/// Sound speed of one side after checking positivity.
#[inline(always)]
pub fn checked_sound_speed(side: &FacePrimitive) -> Result<Real, StateViolation> {
    if side.has_nan() {
        return Err(StateViolation::NotANumber);
    }
    if side.rho <= 0.0 {
        return Err(StateViolation::NonPositiveDensity);
    }
    if side.gamma <= 0.0 {
        return Err(StateViolation::NonPositiveGamma);
    }
    let c2 = side.sound_speed_squared();
    if c2 < 0.0 {
        return Err(StateViolation::NegativeSoundSpeed);
    }
    Ok(c2.sqrt())
}

/// HLLE (Davis/Einfeldt) bounds: `s⁻ = min(v⁺ - a⁺, v⁻ - a⁻)`, `s⁺ = max(v⁺ + a⁺, v⁻ + a⁻)`.
#[inline(always)]
pub fn hlle_wave_speeds(
    minus: &FacePrimitive,
    plus: &FacePrimitive,
) -> Result<WaveFan, StateViolation> {
    let a_minus = checked_sound_speed(minus)?;
    let a_plus = checked_sound_speed(plus)?;

    let fan = WaveFan {
        s_minus: (plus.vn - a_plus).min(minus.vn - a_minus),
        s_plus: (plus.vn + a_plus).max(minus.vn + a_minus),
        u_star: 0.0,
    };
    check_fan(fan)
}

/// HLLC estimates with the pressure-based correction factors.
///
/// Outer speeds are clamped to `s⁻ ≤ 0 ≤ s⁺`.
#[inline(always)]
pub fn hllc_wave_speeds(
    minus: &FacePrimitive,
    plus: &FacePrimitive,
) -> Result<WaveFan, StateViolation> {
    let a_minus = checked_sound_speed(minus)?;
    let a_plus = checked_sound_speed(plus)?;

    let rho_a_hat = 0.25 * (minus.rho + plus.rho) * (a_minus + a_plus);
    let p_star = 0.5 * (minus.p + plus.p + (minus.vn - plus.vn) * rho_a_hat);

    let q_minus = pressure_factor(p_star, minus);
    let q_plus = pressure_factor(p_star, plus);

    // Both sides at zero sound speed: no pressure term in the contact speed
    let u_star = if rho_a_hat == 0.0 {
        0.5 * (minus.vn + plus.vn)
    } else {
        0.5 * (minus.vn + plus.vn + (minus.p - plus.p) / rho_a_hat)
    };

    let fan = WaveFan {
        s_minus: (minus.vn - a_minus * q_minus).min(0.0),
        s_plus: (plus.vn + a_plus * q_plus).max(0.0),
        u_star,
    };
    check_fan(fan)
}

/// Shock correction `q = sqrt(1 + (γ+1)/(2γ) (p*/p - 1))`, or 1 for a rarefaction.
#[inline(always)]
fn pressure_factor(p_star: Real, side: &FacePrimitive) -> Real {
    if p_star <= side.p {
        1.0
    } else {
        let g = side.gamma;
        (1.0 + 0.5 * (2.0 * g + 1.0) / (g + 1.0) * (p_star / side.p - 1.0))
            .max(0.0)
            .sqrt()
    }
}

#[inline(always)]
fn check_fan(fan: WaveFan) -> Result<WaveFan, StateViolation> {
    if fan.s_minus.is_nan() || fan.s_plus.is_nan() || fan.u_star.is_nan() {
        Err(StateViolation::NotANumber)
    } else {
        Ok(fan)
    }
}
