//! Flux divergence and write-back of one output slice.
//!
//! The x pass overwrites the RHS tiles, the y and z passes accumulate into
//! them, and [`write_back`] blends the result into the destination block:
//!
//! ```text
//! q ← a·q - dtinvh·rhs                       ρ, ρu, ρv, ρw, E
//! φ ← a·φ - dtinvh·(rhs - divu·sum_φ / 6)    Γ, Π
//! ```

use crate::flux::FluxTiles;
use crate::layout::{BlockViewMut, OutputSoA};
use crate::source::SourceTiles;
use crate::types::{NQUANTITIES, Quantity};

use super::config::ConvectionConfig;
use super::error::{ConvectionError, Location, Stage};
use super::simd_kernels::{accumulate_difference, difference};

/// Per-cell RHS accumulators, one per conserved quantity.
#[derive(Clone, Debug)]
pub struct RhsTiles {
    tiles: [OutputSoA; NQUANTITIES],
}

impl RhsTiles {
    /// Zero-initialized tiles for a block of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            tiles: std::array::from_fn(|_| OutputSoA::cells(n)),
        }
    }

    /// Block size.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.tiles[0].nx()
    }

    /// RHS tile of one quantity.
    #[inline(always)]
    pub fn get(&self, q: Quantity) -> &OutputSoA {
        &self.tiles[q.index()]
    }

    /// Mutable RHS tile of one quantity.
    #[inline(always)]
    pub fn get_mut(&mut self, q: Quantity) -> &mut OutputSoA {
        &mut self.tiles[q.index()]
    }

    /// Number of scalars stored.
    pub fn len(&self) -> usize {
        self.tiles.iter().map(OutputSoA::len).sum()
    }

    /// Whether no scalars are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `rhs(i, j) = F(i + 1, j) - F(i, j)`; overwrites.
pub fn divergence_x(fluxes: &FluxTiles, rhs: &mut RhsTiles) {
    let n = rhs.block_size();
    for q in Quantity::ALL {
        let f = fluxes.get(q);
        let r = rhs.get_mut(q);
        for j in 0..n {
            let row = f.row(j);
            difference(&row[1..=n], &row[..n], r.row_mut(j));
        }
    }
}

/// `rhs(i, j) += F(j + 1, i) - F(j, i)` from the transposed y tiles.
pub fn divergence_y(fluxes: &FluxTiles, rhs: &mut RhsTiles) {
    let n = rhs.block_size();
    for q in Quantity::ALL {
        let f = fluxes.get(q);
        let r = rhs.get_mut(q);
        for i in 0..n {
            let faces = f.row(i);
            for j in 0..n {
                r[(i, j)] += faces[j + 1] - faces[j];
            }
        }
    }
}

/// `rhs += F_upper - F_lower` between two z-face tiles.
pub fn divergence_z(lower: &FluxTiles, upper: &FluxTiles, rhs: &mut RhsTiles) {
    let n = rhs.block_size();
    for q in Quantity::ALL {
        let (lo, hi) = (lower.get(q), upper.get(q));
        let r = rhs.get_mut(q);
        for j in 0..n {
            accumulate_difference(&hi.row(j)[..n], &lo.row(j)[..n], r.row_mut(j));
        }
    }
}

/// Blend the accumulated RHS into destination slice `iz`.
///
/// Fails on the first NaN RHS value before any cell of the slice is written.
pub fn write_back(
    rhs: &RhsTiles,
    sources: &SourceTiles,
    config: &ConvectionConfig,
    dst: &mut BlockViewMut<'_>,
    iz: usize,
) -> Result<(), ConvectionError> {
    let n = rhs.block_size();
    let update = |q: Quantity, ix: usize, iy: usize| {
        let r = rhs.get(q)[(ix, iy)];
        if q.is_eos_parameter() {
            r - sources.correction(q, ix, iy)
        } else {
            r
        }
    };

    // The slice is written all-or-nothing
    for iy in 0..n {
        for ix in 0..n {
            if let Some(q) = Quantity::ALL.into_iter().find(|&q| update(q, ix, iy).is_nan()) {
                return Err(ConvectionError::not_a_number(
                    Stage::WriteBack,
                    q,
                    Location::cell(ix, iy, iz),
                ));
            }
        }
    }

    let (a, dtinvh) = (config.a, config.dtinvh);
    for iy in 0..n {
        for ix in 0..n {
            let record = dst.record_mut(ix, iy, iz);
            for q in Quantity::ALL {
                let slot = &mut record[q.index()];
                *slot = a * *slot - dtinvh * update(q, ix, iy);
            }
        }
    }
    Ok(())
}
