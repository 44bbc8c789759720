//! Conversion of halo-extended source slices into primitive tiles.

use crate::layout::{BlockView, InputSoA};
use crate::types::{HALO, NQUANTITIES, Quantity, Real};

use super::primitive::PrimitiveState;

/// Primitive variables of one halo-extended z slice, one tile per quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveSlice {
    fields: [InputSoA; NQUANTITIES],
}

impl PrimitiveSlice {
    /// Zero-initialized slice for a block of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            fields: std::array::from_fn(|_| InputSoA::new(n)),
        }
    }

    /// Tile of one quantity.
    #[inline(always)]
    pub fn field(&self, q: Quantity) -> &InputSoA {
        &self.fields[q.index()]
    }

    /// Mutable tile of one quantity.
    #[inline(always)]
    pub fn field_mut(&mut self, q: Quantity) -> &mut InputSoA {
        &mut self.fields[q.index()]
    }

    /// Primitive state of logical cell `(ix, iy)`.
    pub fn cell(&self, ix: isize, iy: isize) -> PrimitiveState {
        PrimitiveState::from_array(std::array::from_fn(|k| self.fields[k].at(ix, iy)))
    }

    /// Number of scalars stored.
    pub fn len(&self) -> usize {
        self.fields.iter().map(InputSoA::len).sum()
    }

    /// Whether the slice stores no scalars.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert source slice `iz` into primitive variables.
    ///
    /// Reads the whole `(n+6)²` halo-extended slab. The source view must have
    /// extent `n + 6`.
    pub fn load(&mut self, src: &BlockView<'_>, iz: usize) {
        let side = self.fields[0].side();
        debug_assert_eq!(src.extent(), side);

        let [rho, u, v, w, p, g, pi] = &mut self.fields;
        for sy in 0..side {
            let iy = sy as isize - HALO as isize;
            let rows: [&mut [Real]; NQUANTITIES] = [
                rho.row_mut(iy),
                u.row_mut(iy),
                v.row_mut(iy),
                w.row_mut(iy),
                p.row_mut(iy),
                g.row_mut(iy),
                pi.row_mut(iy),
            ];
            let [rho, u, v, w, p, g, pi] = rows;
            for sx in 0..side {
                let prim = PrimitiveState::from_conserved(&src.state(sx, sy, iz));
                rho[sx] = prim.rho;
                u[sx] = prim.u;
                v[sx] = prim.v;
                w[sx] = prim.w;
                p[sx] = prim.p;
                g[sx] = prim.gamma;
                pi[sx] = prim.pi;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BlockBuffer;
    use crate::state::ConservedState;
    use approx::assert_relative_eq;

    #[test]
    fn test_load_maps_halo_coordinates() {
        let n = 2;
        let side = n + 2 * HALO;
        let mut block = BlockBuffer::new(side, 7);
        block.set_from_fn(|ix, iy, iz| {
            let w = PrimitiveState::new(
                1.0 + ix as Real,
                iy as Real,
                iz as Real,
                0.5,
                2.0,
                2.5,
                0.1,
            );
            ConservedState::from_primitive(&w)
        });

        let mut slice = PrimitiveSlice::new(n);
        slice.load(&block.view(), 4);

        let corner = slice.cell(-3, -3);
        assert_relative_eq!(corner.rho, 1.0);
        assert_relative_eq!(corner.u, 0.0);
        assert_relative_eq!(corner.v, 4.0, epsilon = 1e-5);

        let interior = slice.cell(1, 0);
        assert_relative_eq!(interior.rho, 5.0);
        assert_relative_eq!(interior.u, 3.0, epsilon = 1e-5);
        assert_relative_eq!(interior.w, 0.5, epsilon = 1e-5);
        assert_relative_eq!(interior.p, 2.0, epsilon = 1e-4);
        assert_relative_eq!(slice.field(Quantity::G).at(1, 0), 2.5);
    }
}
