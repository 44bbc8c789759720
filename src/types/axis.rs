//! Sweep directions.

use std::fmt;

/// One of the three sweep directions of a structured block.
///
/// The axis decides which velocity component is normal to a face, the order
/// of the two transverse components, and the shape of the face tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in sweep order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Rotate a Cartesian velocity into `(normal, first transverse, second transverse)`.
    ///
    /// x: `(u, v, w)`, y: `(v, u, w)`, z: `(w, u, v)`.
    #[inline(always)]
    pub fn rotate<T: Copy>(self, u: T, v: T, w: T) -> (T, T, T) {
        match self {
            Axis::X => (u, v, w),
            Axis::Y => (v, u, w),
            Axis::Z => (w, u, v),
        }
    }

    /// Extent `(ni, nj)` of the face grid of one tile for a block of size `n`.
    ///
    /// x and y tiles hold `n + 1` faces along their first index; z tiles hold
    /// one face per cell column.
    #[inline]
    pub fn face_extent(self, n: usize) -> (usize, usize) {
        match self {
            Axis::X | Axis::Y => (n + 1, n),
            Axis::Z => (n, n),
        }
    }

    /// Lower-case axis name.
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
