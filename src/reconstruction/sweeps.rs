//! Directional WENO sweeps over tiles.
//!
//! Each sweep fills a minus and a plus face tile per primitive quantity:
//!
//! - x: contiguous rows of the current slice, tile index `(face, row)`
//! - y: strided columns of the current slice, stored transposed as `(face, column)`
//! - z: five consecutive ring slices, tile index `(column, row)`; the face lies
//!   between ring slots `-3` and `-2`

use crate::layout::{InputSoA, Ring, TempSoA};
use crate::state::{FacePrimitive, PrimitiveSlice};
use crate::types::{Axis, HALO, NQUANTITIES, Quantity};

use super::weno::{weno_minus, weno_plus};

/// Reconstructed primitive values on both sides of every face of one sweep.
#[derive(Clone, Debug)]
pub struct FaceStates {
    minus: [TempSoA; NQUANTITIES],
    plus: [TempSoA; NQUANTITIES],
}

impl FaceStates {
    /// Zero-initialized face tiles for a block of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            minus: std::array::from_fn(|_| TempSoA::faces(n)),
            plus: std::array::from_fn(|_| TempSoA::faces(n)),
        }
    }

    /// Left-side (minus) tile of one quantity.
    #[inline(always)]
    pub fn minus(&self, q: Quantity) -> &TempSoA {
        &self.minus[q.index()]
    }

    /// Right-side (plus) tile of one quantity.
    #[inline(always)]
    pub fn plus(&self, q: Quantity) -> &TempSoA {
        &self.plus[q.index()]
    }

    /// Both tiles of one quantity, mutable.
    #[inline(always)]
    pub fn pair_mut(&mut self, q: Quantity) -> (&mut TempSoA, &mut TempSoA) {
        (&mut self.minus[q.index()], &mut self.plus[q.index()])
    }

    /// Left and right states at face `(i, j)` in the frame of `axis`.
    #[inline(always)]
    pub fn face(&self, axis: Axis, i: usize, j: usize) -> (FacePrimitive, FacePrimitive) {
        (
            gather(&self.minus, axis, i, j),
            gather(&self.plus, axis, i, j),
        )
    }

    /// Number of scalars stored.
    pub fn len(&self) -> usize {
        self.minus.iter().chain(self.plus.iter()).map(TempSoA::len).sum()
    }

    /// Whether no scalars are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[inline(always)]
fn gather(tiles: &[TempSoA; NQUANTITIES], axis: Axis, i: usize, j: usize) -> FacePrimitive {
    let at = |q: Quantity| tiles[q.index()][(i, j)];
    let (vn, vt1, vt2) = axis.rotate(at(Quantity::U), at(Quantity::V), at(Quantity::W));
    FacePrimitive {
        rho: at(Quantity::Rho),
        vn,
        vt1,
        vt2,
        p: at(Quantity::P),
        gamma: at(Quantity::G),
        pi: at(Quantity::Pi),
    }
}

/// x-faces of one quantity: `minus(i, j)` and `plus(i, j)` for faces `0..=n`.
pub fn weno_x(input: &InputSoA, minus: &mut TempSoA, plus: &mut TempSoA) {
    let n = input.block_size();
    debug_assert_eq!(minus.nx(), n + 1);

    for j in 0..n {
        let row = input.row(j as isize);
        let out_m = minus.row_mut(j);
        for (i, m) in out_m.iter_mut().enumerate() {
            *m = weno_minus(row[i], row[i + 1], row[i + 2], row[i + 3], row[i + 4]);
        }
        let out_p = plus.row_mut(j);
        for (i, p) in out_p.iter_mut().enumerate() {
            *p = weno_plus(row[i + 1], row[i + 2], row[i + 3], row[i + 4], row[i + 5]);
        }
    }
}

/// y-faces of one quantity, stored transposed: `minus(face, column)`.
pub fn weno_y(input: &InputSoA, minus: &mut TempSoA, plus: &mut TempSoA) {
    let n = input.block_size();
    let pitch = input.side();
    let data = input.as_slice();
    debug_assert_eq!(minus.nx(), n + 1);

    for col in 0..n {
        let column = &data[col + HALO..];
        let at = |k: usize| column[k * pitch];
        for face in 0..=n {
            minus[(face, col)] = weno_minus(
                at(face),
                at(face + 1),
                at(face + 2),
                at(face + 3),
                at(face + 4),
            );
            plus[(face, col)] = weno_plus(
                at(face + 1),
                at(face + 2),
                at(face + 3),
                at(face + 4),
                at(face + 5),
            );
        }
    }
}

/// z-faces of one quantity from six consecutive slices, oldest first.
pub fn weno_z(slices: [&InputSoA; 6], minus: &mut TempSoA, plus: &mut TempSoA) {
    let n = slices[0].block_size();

    for j in 0..n {
        let iy = j as isize;
        let rows = slices.map(|s| &s.row(iy)[HALO..HALO + n]);
        for i in 0..n {
            let c = rows.map(|r| r[i]);
            minus[(i, j)] = weno_minus(c[0], c[1], c[2], c[3], c[4]);
            plus[(i, j)] = weno_plus(c[1], c[2], c[3], c[4], c[5]);
        }
    }
}

/// Reconstruct all quantities on the x-faces of `slice`.
pub fn reconstruct_x(slice: &PrimitiveSlice, out: &mut FaceStates) {
    for q in Quantity::ALL {
        let (minus, plus) = out.pair_mut(q);
        weno_x(slice.field(q), minus, plus);
    }
}

/// Reconstruct all quantities on the y-faces of `slice`.
pub fn reconstruct_y(slice: &PrimitiveSlice, out: &mut FaceStates) {
    for q in Quantity::ALL {
        let (minus, plus) = out.pair_mut(q);
        weno_y(slice.field(q), minus, plus);
    }
}

/// Reconstruct all quantities on the z-faces between ring slots `-3` and `-2`.
pub fn reconstruct_z(ring: &Ring<PrimitiveSlice>, out: &mut FaceStates) {
    for q in Quantity::ALL {
        let slices = [-5, -4, -3, -2, -1, 0].map(|rel| ring.get(rel).field(q));
        let (minus, plus) = out.pair_mut(q);
        weno_z(slices, minus, plus);
    }
}
