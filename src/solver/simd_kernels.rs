//! Contiguous difference kernels of the flux divergence.
//!
//! The x divergence of a tile row and the z divergence between two flux
//! tiles both reduce to `out = hi - lo` or `out += hi - lo` over contiguous
//! slices. These are the only loops of the block pass with unit stride on
//! every operand, so they get SIMD versions.
//!
//! The scalar functions are always available and are the reference the SIMD
//! versions must match. With the `simd` feature, [`difference`] and
//! [`accumulate_difference`] dispatch through `pulp` to the best instruction
//! set available at runtime (AVX-512, AVX2, SSE4.1, NEON or scalar).

#[cfg(feature = "simd")]
use pulp::{Arch, Simd, WithSimd};

use crate::types::Real;

// ============================================================================
// Scalar reference implementations (always available)
// ============================================================================

/// Scalar `out[k] = hi[k] - lo[k]`.
pub fn difference_scalar(hi: &[Real], lo: &[Real], out: &mut [Real]) {
    debug_assert_eq!(hi.len(), out.len());
    debug_assert_eq!(lo.len(), out.len());

    for ((o, h), l) in out.iter_mut().zip(hi).zip(lo) {
        *o = h - l;
    }
}

/// Scalar `out[k] += hi[k] - lo[k]`.
pub fn accumulate_difference_scalar(hi: &[Real], lo: &[Real], out: &mut [Real]) {
    debug_assert_eq!(hi.len(), out.len());
    debug_assert_eq!(lo.len(), out.len());

    for ((o, h), l) in out.iter_mut().zip(hi).zip(lo) {
        *o += h - l;
    }
}

// ============================================================================
// SIMD implementations
// ============================================================================

#[cfg(feature = "simd")]
mod simd_impl {
    use super::*;

    /// Lane operations for the storage precision.
    #[cfg(not(feature = "double-precision"))]
    mod lanes {
        use pulp::Simd;

        #[inline(always)]
        pub fn split<S: Simd>(x: &[f32]) -> (&[S::f32s], &[f32]) {
            S::as_simd_f32s(x)
        }

        #[inline(always)]
        pub fn split_mut<S: Simd>(x: &mut [f32]) -> (&mut [S::f32s], &mut [f32]) {
            S::as_mut_simd_f32s(x)
        }

        #[inline(always)]
        pub fn add<S: Simd>(simd: S, a: S::f32s, b: S::f32s) -> S::f32s {
            simd.add_f32s(a, b)
        }

        #[inline(always)]
        pub fn sub<S: Simd>(simd: S, a: S::f32s, b: S::f32s) -> S::f32s {
            simd.sub_f32s(a, b)
        }
    }

    /// Lane operations for the storage precision.
    #[cfg(feature = "double-precision")]
    mod lanes {
        use pulp::Simd;

        #[inline(always)]
        pub fn split<S: Simd>(x: &[f64]) -> (&[S::f64s], &[f64]) {
            S::as_simd_f64s(x)
        }

        #[inline(always)]
        pub fn split_mut<S: Simd>(x: &mut [f64]) -> (&mut [S::f64s], &mut [f64]) {
            S::as_mut_simd_f64s(x)
        }

        #[inline(always)]
        pub fn add<S: Simd>(simd: S, a: S::f64s, b: S::f64s) -> S::f64s {
            simd.add_f64s(a, b)
        }

        #[inline(always)]
        pub fn sub<S: Simd>(simd: S, a: S::f64s, b: S::f64s) -> S::f64s {
            simd.sub_f64s(a, b)
        }
    }

    /// `out = hi - lo` with SIMD.
    #[inline(always)]
    pub fn difference_inner<S: Simd>(simd: S, hi: &[Real], lo: &[Real], out: &mut [Real]) {
        let (hi_head, hi_tail) = lanes::split::<S>(hi);
        let (lo_head, lo_tail) = lanes::split::<S>(lo);
        let (out_head, out_tail) = lanes::split_mut::<S>(out);

        for ((o, h), l) in out_head.iter_mut().zip(hi_head).zip(lo_head) {
            *o = lanes::sub(simd, *h, *l);
        }

        // Scalar tail
        difference_scalar(hi_tail, lo_tail, out_tail);
    }

    /// `out += hi - lo` with SIMD.
    #[inline(always)]
    pub fn accumulate_difference_inner<S: Simd>(
        simd: S,
        hi: &[Real],
        lo: &[Real],
        out: &mut [Real],
    ) {
        let (hi_head, hi_tail) = lanes::split::<S>(hi);
        let (lo_head, lo_tail) = lanes::split::<S>(lo);
        let (out_head, out_tail) = lanes::split_mut::<S>(out);

        for ((o, h), l) in out_head.iter_mut().zip(hi_head).zip(lo_head) {
            *o = lanes::add(simd, *o, lanes::sub(simd, *h, *l));
        }

        // Scalar tail
        accumulate_difference_scalar(hi_tail, lo_tail, out_tail);
    }
}

// ============================================================================
// Public dispatch
// ============================================================================

/// `out[k] = hi[k] - lo[k]` with automatic SIMD dispatch.
#[cfg(feature = "simd")]
pub fn difference(hi: &[Real], lo: &[Real], out: &mut [Real]) {
    debug_assert_eq!(hi.len(), out.len());
    debug_assert_eq!(lo.len(), out.len());

    struct Impl<'a> {
        hi: &'a [Real],
        lo: &'a [Real],
        out: &'a mut [Real],
    }

    impl WithSimd for Impl<'_> {
        type Output = ();

        #[inline(always)]
        fn with_simd<S: Simd>(self, simd: S) {
            simd_impl::difference_inner(simd, self.hi, self.lo, self.out);
        }
    }

    Arch::new().dispatch(Impl { hi, lo, out });
}

/// `out[k] += hi[k] - lo[k]` with automatic SIMD dispatch.
#[cfg(feature = "simd")]
pub fn accumulate_difference(hi: &[Real], lo: &[Real], out: &mut [Real]) {
    debug_assert_eq!(hi.len(), out.len());
    debug_assert_eq!(lo.len(), out.len());

    struct Impl<'a> {
        hi: &'a [Real],
        lo: &'a [Real],
        out: &'a mut [Real],
    }

    impl WithSimd for Impl<'_> {
        type Output = ();

        #[inline(always)]
        fn with_simd<S: Simd>(self, simd: S) {
            simd_impl::accumulate_difference_inner(simd, self.hi, self.lo, self.out);
        }
    }

    Arch::new().dispatch(Impl { hi, lo, out });
}

/// `out[k] = hi[k] - lo[k]`.
#[cfg(not(feature = "simd"))]
#[inline]
pub fn difference(hi: &[Real], lo: &[Real], out: &mut [Real]) {
    difference_scalar(hi, lo, out);
}

/// `out[k] += hi[k] - lo[k]`.
#[cfg(not(feature = "simd"))]
#[inline]
pub fn accumulate_difference(hi: &[Real], lo: &[Real], out: &mut [Real]) {
    accumulate_difference_scalar(hi, lo, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Deterministic pseudo-random values in [-1, 1].
    fn random_vec(n: usize, seed: u64) -> Vec<Real> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 33) as f64 / (1u64 << 31) as f64 * 2.0 - 1.0) as Real
            })
            .collect()
    }

    #[test]
    fn test_difference_scalar() {
        let mut out = vec![0.0; 3];
        difference_scalar(&[3.0, 2.0, 1.0], &[1.0, 1.0, 1.0], &mut out);
        assert_eq!(out, vec![2.0, 1.0, 0.0]);
        accumulate_difference_scalar(&[1.0, 1.0, 1.0], &[0.5, 0.0, -1.0], &mut out);
        assert_eq!(out, vec![2.5, 2.0, 2.0]);
    }

    #[test]
    fn test_dispatch_matches_scalar() {
        // Odd lengths exercise the scalar tail after the SIMD chunks
        for n in [1, 7, 16, 33, 65] {
            let hi = random_vec(n, 1);
            let lo = random_vec(n, 2);
            let init = random_vec(n, 3);

            let mut expected = vec![0.0; n];
            let mut actual = vec![0.0; n];
            difference_scalar(&hi, &lo, &mut expected);
            difference(&hi, &lo, &mut actual);
            for k in 0..n {
                assert_relative_eq!(actual[k], expected[k]);
            }

            let mut expected = init.clone();
            let mut actual = init;
            accumulate_difference_scalar(&hi, &lo, &mut expected);
            accumulate_difference(&hi, &lo, &mut actual);
            for k in 0..n {
                assert_relative_eq!(actual[k], expected[k]);
            }
        }
    }
}
