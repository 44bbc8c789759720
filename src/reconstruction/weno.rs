//! Fifth-order WENO reconstruction of face values.
//!
//! Jiang–Shu smoothness indicators with the optimal linear weights
//! (1/10, 6/10, 3/10). The indicators and nonlinear weights are evaluated in
//! [`Work`] precision whatever the storage type.
//!
//! Candidate polynomials are written as the centre value plus differences, so
//! a constant stencil reconstructs the constant exactly.
//!
//! # References
//! - Jiang, G.-S., Shu, C.-W. (1996). "Efficient implementation of weighted
//!   ENO schemes". J. Comput. Phys. 126, 202–228.

use crate::types::{Real, Work};

/// Regularization added to each smoothness indicator before squaring.
pub const WENO_EPS: Work = 1e-6;

/// Optimal linear weights of the three candidate stencils.
pub const LINEAR_WEIGHTS: [Work; 3] = [0.1, 0.6, 0.3];

const C13_12: Work = 13.0 / 12.0;

/// Nonlinear weights `(ω0, ω1, ω2)` from the three smoothness indicators.
#[inline(always)]
fn nonlinear_weights(is0: Work, is1: Work, is2: Work) -> (Work, Work, Work) {
    let is0 = is0 + WENO_EPS;
    let is1 = is1 + WENO_EPS;
    let is2 = is2 + WENO_EPS;

    let alpha0 = LINEAR_WEIGHTS[0] / (is0 * is0);
    let alpha1 = LINEAR_WEIGHTS[1] / (is1 * is1);
    let alpha2 = LINEAR_WEIGHTS[2] / (is2 * is2);
    let inv_sum = 1.0 / (alpha0 + alpha1 + alpha2);

    let omega0 = alpha0 * inv_sum;
    let omega1 = alpha1 * inv_sum;
    (omega0, omega1, 1.0 - omega0 - omega1)
}

/// Reconstruct the value at the right face of `c` from cells `a..=e`.
#[inline(always)]
pub fn weno_minus(a: Real, b: Real, c: Real, d: Real, e: Real) -> Real {
    let (a, b, c, d, e) = (
        Work::from(a),
        Work::from(b),
        Work::from(c),
        Work::from(d),
        Work::from(e),
    );

    let is0 = C13_12 * (a - 2.0 * b + c).powi(2) + 0.25 * (a - 4.0 * b + 3.0 * c).powi(2);
    let is1 = C13_12 * (b - 2.0 * c + d).powi(2) + 0.25 * (b - d).powi(2);
    let is2 = C13_12 * (c - 2.0 * d + e).powi(2) + 0.25 * (3.0 * c - 4.0 * d + e).powi(2);
    let (omega0, omega1, omega2) = nonlinear_weights(is0, is1, is2);

    // (2a - 7b + 11c)/6, (-b + 5c + 2d)/6, (2c + 5d - e)/6
    let p0 = (2.0 * (a - b) - 5.0 * (b - c)) / 6.0;
    let p1 = (2.0 * (d - c) - (b - c)) / 6.0;
    let p2 = (4.0 * (d - c) + (d - e)) / 6.0;

    (c + (omega0 * p0 + omega1 * p1 + omega2 * p2)) as Real
}

/// Reconstruct the value at the left face of `c` from cells `a..=e`.
///
/// Mirror image of [`weno_minus`]: `weno_plus(a, b, c, d, e) == weno_minus(e, d, c, b, a)`.
#[inline(always)]
pub fn weno_plus(a: Real, b: Real, c: Real, d: Real, e: Real) -> Real {
    weno_minus(e, d, c, b, a)
}
