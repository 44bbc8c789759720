//! Fixed-size 2D tiles in structure-of-arrays layout.
//!
//! Three tile roles appear in a block pass:
//!
//! - [`InputSoA`]: one primitive quantity over a halo-extended `(n+6)²` slice,
//!   addressed with signed coordinates starting at `-3`
//! - [`TempSoA`]: face values, `(n+1) × n`; the first index runs over faces
//! - [`OutputSoA`]: per-cell accumulators, `n × n`
//!
//! All tiles are row-major with the first index contiguous. Element access
//! through `Index` is checked in debug builds; `get` is always checked and the
//! row/slice accessors give the raw contiguous storage for tight loops.

use std::ops::{Index, IndexMut};

use crate::types::{HALO, Real};

/// Dense row-major 2D tile of [`Real`] values.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    data: Vec<Real>,
    nx: usize,
    ny: usize,
}

/// Face tile: `n + 1` faces by `n` rows.
pub type TempSoA = Tile;

/// Cell tile: `n` by `n`.
pub type OutputSoA = Tile;

impl Tile {
    /// Create a zero-initialized `nx × ny` tile.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            data: vec![0.0; nx * ny],
            nx,
            ny,
        }
    }

    /// Face tile for a block of size `n`.
    pub fn faces(n: usize) -> Self {
        Self::new(n + 1, n)
    }

    /// Cell tile for a block of size `n`.
    pub fn cells(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Extent along the contiguous index.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Extent along the strided index.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tile holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    fn offset(&self, ix: usize, iy: usize) -> usize {
        debug_assert!(
            ix < self.nx && iy < self.ny,
            "tile index ({ix}, {iy}) out of range {}x{}",
            self.nx,
            self.ny
        );
        ix + iy * self.nx
    }

    /// Checked element access.
    #[inline]
    pub fn get(&self, ix: usize, iy: usize) -> Option<Real> {
        (ix < self.nx && iy < self.ny).then(|| self.data[ix + iy * self.nx])
    }

    /// Row `iy` as a contiguous slice of length `nx`.
    #[inline]
    pub fn row(&self, iy: usize) -> &[Real] {
        let start = iy * self.nx;
        &self.data[start..start + self.nx]
    }

    /// Mutable row `iy`.
    #[inline]
    pub fn row_mut(&mut self, iy: usize) -> &mut [Real] {
        let start = iy * self.nx;
        &mut self.data[start..start + self.nx]
    }

    /// Raw storage.
    #[inline]
    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    /// Raw mutable storage.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// Set every value to `value`.
    pub fn fill(&mut self, value: Real) {
        self.data.fill(value);
    }
}

impl Index<(usize, usize)> for Tile {
    type Output = Real;

    #[inline(always)]
    fn index(&self, (ix, iy): (usize, usize)) -> &Real {
        &self.data[self.offset(ix, iy)]
    }
}

impl IndexMut<(usize, usize)> for Tile {
    #[inline(always)]
    fn index_mut(&mut self, (ix, iy): (usize, usize)) -> &mut Real {
        let offset = self.offset(ix, iy);
        &mut self.data[offset]
    }
}

/// One primitive quantity over a halo-extended slice.
///
/// Logical coordinates run over `-3..n+3` in both directions. Rows returned by
/// [`InputSoA::row`] are padded: position `k` holds logical `x = k - 3`.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSoA {
    tile: Tile,
    n: usize,
}

impl InputSoA {
    /// Create a zero-initialized input tile for a block of size `n`.
    pub fn new(n: usize) -> Self {
        let side = n + 2 * HALO;
        Self {
            tile: Tile::new(side, side),
            n,
        }
    }

    /// Interior block size.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.n
    }

    /// Padded side length `n + 6`.
    #[inline]
    pub fn side(&self) -> usize {
        self.tile.nx
    }

    #[inline(always)]
    fn padded(&self, i: isize) -> usize {
        let p = i + HALO as isize;
        debug_assert!(
            p >= 0 && (p as usize) < self.tile.nx,
            "input index {i} outside halo-extended range"
        );
        p as usize
    }

    /// Value at logical `(ix, iy)`.
    #[inline(always)]
    pub fn at(&self, ix: isize, iy: isize) -> Real {
        self.tile[(self.padded(ix), self.padded(iy))]
    }

    /// Store `value` at logical `(ix, iy)`.
    #[inline(always)]
    pub fn set(&mut self, ix: isize, iy: isize, value: Real) {
        let (px, py) = (self.padded(ix), self.padded(iy));
        self.tile[(px, py)] = value;
    }

    /// Checked access at logical `(ix, iy)`.
    pub fn get(&self, ix: isize, iy: isize) -> Option<Real> {
        let h = HALO as isize;
        if ix < -h || iy < -h {
            return None;
        }
        self.tile.get((ix + h) as usize, (iy + h) as usize)
    }

    /// Padded row at logical `iy`.
    #[inline]
    pub fn row(&self, iy: isize) -> &[Real] {
        self.tile.row(self.padded(iy))
    }

    /// Mutable padded row at logical `iy`.
    #[inline]
    pub fn row_mut(&mut self, iy: isize) -> &mut [Real] {
        let py = self.padded(iy);
        self.tile.row_mut(py)
    }

    /// Raw padded storage.
    #[inline]
    pub fn as_slice(&self) -> &[Real] {
        self.tile.as_slice()
    }

    /// Number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.tile.len()
    }

    /// Whether the tile holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tile.is_empty()
    }
}
