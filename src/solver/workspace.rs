//! Scratch storage of the streaming convection pass.

use tracing::debug;

use crate::flux::{FanTiles, FluxTiles};
use crate::layout::Ring;
use crate::reconstruction::FaceStates;
use crate::source::SourceTiles;
use crate::state::PrimitiveSlice;
use crate::types::Real;

use super::rhs::RhsTiles;

/// Primitive slices kept resident: the five-point WENO stencil in z plus
/// the slice being loaded.
pub const INPUT_SLICES: usize = 6;

/// z-face slots kept resident: the lower and upper face of the cell slice.
pub const FACE_SLICES: usize = 2;

/// Scratch buffers for a block of `n³` cells.
///
/// A workspace is tied to one block size and can be reused across any
/// number of blocks of that size. All buffers are allocated up front; the
/// pass itself does not allocate.
#[derive(Clone, Debug)]
pub struct ConvectionWorkspace {
    pub(crate) n: usize,
    /// Primitive slices, slot `-2` is the current cell slice.
    pub(crate) input: Ring<PrimitiveSlice>,
    /// Reconstructed states on z faces, slot `-1` below the cell slice.
    pub(crate) z_faces: Ring<FaceStates>,
    pub(crate) z_fans: Ring<FanTiles>,
    pub(crate) z_fluxes: Ring<FluxTiles>,
    /// x and y sweeps share one set of face tiles.
    pub(crate) faces: FaceStates,
    pub(crate) fans: FanTiles,
    pub(crate) fluxes: FluxTiles,
    pub(crate) rhs: RhsTiles,
    pub(crate) sources: SourceTiles,
}

impl ConvectionWorkspace {
    /// Allocate a workspace for blocks of `n³` cells.
    ///
    /// # Panics
    /// Panics if `n` is zero.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "block size must be positive");
        let ws = Self {
            n,
            input: Ring::from_fn(INPUT_SLICES, |_| PrimitiveSlice::new(n)),
            z_faces: Ring::from_fn(FACE_SLICES, |_| FaceStates::new(n)),
            z_fans: Ring::from_fn(FACE_SLICES, |_| FanTiles::new(n)),
            z_fluxes: Ring::from_fn(FACE_SLICES, |_| FluxTiles::new(n)),
            faces: FaceStates::new(n),
            fans: FanTiles::new(n),
            fluxes: FluxTiles::new(n),
            rhs: RhsTiles::new(n),
            sources: SourceTiles::new(n),
        };
        debug!(n, bytes = ws.footprint_bytes(), "allocated convection workspace");
        ws
    }

    /// Block size `n`.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.n
    }

    /// Scalars held by all buffers.
    pub fn len(&self) -> usize {
        self.input.iter().map(PrimitiveSlice::len).sum::<usize>()
            + self.z_faces.iter().map(FaceStates::len).sum::<usize>()
            + self.z_fans.iter().map(FanTiles::len).sum::<usize>()
            + self.z_fluxes.iter().map(FluxTiles::len).sum::<usize>()
            + self.faces.len()
            + self.fans.len()
            + self.fluxes.len()
            + self.rhs.len()
            + self.sources.len()
    }

    /// Always false: the block size is positive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes of scratch memory held by the workspace.
    pub fn footprint_bytes(&self) -> usize {
        self.len() * std::mem::size_of::<Real>()
    }

    /// Move the z-face window up by one face.
    pub(crate) fn advance_z_faces(&mut self) {
        self.z_faces.advance();
        self.z_fans.advance();
        self.z_fluxes.advance();
    }

    /// Reset all windows before a new block.
    pub(crate) fn rewind(&mut self) {
        self.input.rewind();
        self.z_faces.rewind();
        self.z_fans.rewind();
        self.z_fluxes.rewind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HALO, NQUANTITIES};

    #[test]
    fn test_footprint_counts_every_buffer() {
        let n = 4;
        let ws = ConvectionWorkspace::new(n);
        let padded = (n + 2 * HALO) * (n + 2 * HALO);
        let faces = (n + 1) * n;
        let cells = n * n;
        let expected = INPUT_SLICES * NQUANTITIES * padded
            + (FACE_SLICES + 1) * (2 * NQUANTITIES + 4 + NQUANTITIES) * faces
            + (NQUANTITIES + 3) * cells;
        assert_eq!(ws.len(), expected);
        assert_eq!(
            ws.footprint_bytes(),
            expected * std::mem::size_of::<Real>()
        );
        assert_eq!(ws.block_size(), n);
    }

    #[test]
    #[should_panic(expected = "block size must be positive")]
    fn test_zero_block_size_panics() {
        let _ = ConvectionWorkspace::new(0);
    }
}
