//! Strided views over caller-owned block memory.
//!
//! Blocks are stored as interleaved records of at least seven scalars
//! (ρ, ρu, ρv, ρw, E, Γ, Π, then optional padding). A [`BlockLayout`] gives
//! the record width and the row and slice strides in records, so the kernel
//! can read a halo-extended source block and write a destination block that
//! live inside larger arrays.

use crate::solver::ConvectionError;
use crate::state::ConservedState;
use crate::types::{NQUANTITIES, Real};

/// Strides of an interleaved block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    /// Scalars per record (≥ 7).
    pub floats_per_point: usize,
    /// Records between consecutive rows.
    pub row_stride: usize,
    /// Records between consecutive z slices.
    pub slice_stride: usize,
}

impl BlockLayout {
    /// Create a layout from explicit strides.
    pub fn new(floats_per_point: usize, row_stride: usize, slice_stride: usize) -> Self {
        Self {
            floats_per_point,
            row_stride,
            slice_stride,
        }
    }

    /// Densely packed cube of side `side`.
    pub fn dense(side: usize, floats_per_point: usize) -> Self {
        Self::new(floats_per_point, side, side * side)
    }

    /// Scalar offset of record `(ix, iy, iz)`.
    #[inline(always)]
    pub fn offset(&self, ix: usize, iy: usize, iz: usize) -> usize {
        self.floats_per_point * (ix + iy * self.row_stride + iz * self.slice_stride)
    }

    /// Minimum slice length holding a cube of side `extent`.
    pub fn required_len(&self, extent: usize) -> usize {
        if extent == 0 {
            0
        } else {
            self.offset(extent - 1, extent - 1, extent - 1) + NQUANTITIES
        }
    }

    /// Check the layout against a cube of side `extent` stored in `len` scalars.
    pub fn validate(&self, extent: usize, len: usize) -> Result<(), ConvectionError> {
        if self.floats_per_point < NQUANTITIES {
            return Err(ConvectionError::InvalidLayout(format!(
                "records hold {} scalars, need at least {NQUANTITIES}",
                self.floats_per_point
            )));
        }
        if self.row_stride < extent || self.slice_stride < self.row_stride * extent {
            return Err(ConvectionError::InvalidLayout(format!(
                "strides ({}, {}) overlap a cube of side {extent}",
                self.row_stride, self.slice_stride
            )));
        }
        let required = self.required_len(extent);
        if len < required {
            return Err(ConvectionError::InvalidLayout(format!(
                "buffer holds {len} scalars, cube of side {extent} needs {required}"
            )));
        }
        Ok(())
    }
}

/// Read-only view of a cube of records.
#[derive(Clone, Copy, Debug)]
pub struct BlockView<'a> {
    data: &'a [Real],
    layout: BlockLayout,
    extent: usize,
}

impl<'a> BlockView<'a> {
    /// Wrap `data` as a cube of side `extent`.
    pub fn new(
        data: &'a [Real],
        layout: BlockLayout,
        extent: usize,
    ) -> Result<Self, ConvectionError> {
        layout.validate(extent, data.len())?;
        Ok(Self {
            data,
            layout,
            extent,
        })
    }

    /// Side length of the cube.
    #[inline]
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Layout of the underlying memory.
    #[inline]
    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    /// The seven conserved scalars of record `(ix, iy, iz)`.
    #[inline(always)]
    pub fn record(&self, ix: usize, iy: usize, iz: usize) -> &'a [Real] {
        let start = self.layout.offset(ix, iy, iz);
        &self.data[start..start + NQUANTITIES]
    }

    /// Conserved state of record `(ix, iy, iz)`.
    #[inline(always)]
    pub fn state(&self, ix: usize, iy: usize, iz: usize) -> ConservedState {
        ConservedState::from_slice(self.record(ix, iy, iz))
    }
}

/// Mutable view of a cube of records.
#[derive(Debug)]
pub struct BlockViewMut<'a> {
    data: &'a mut [Real],
    layout: BlockLayout,
    extent: usize,
}

impl<'a> BlockViewMut<'a> {
    /// Wrap `data` as a cube of side `extent`.
    pub fn new(
        data: &'a mut [Real],
        layout: BlockLayout,
        extent: usize,
    ) -> Result<Self, ConvectionError> {
        layout.validate(extent, data.len())?;
        Ok(Self {
            data,
            layout,
            extent,
        })
    }

    /// Side length of the cube.
    #[inline]
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// The seven conserved scalars of record `(ix, iy, iz)`.
    #[inline(always)]
    pub fn record_mut(&mut self, ix: usize, iy: usize, iz: usize) -> &mut [Real] {
        let start = self.layout.offset(ix, iy, iz);
        &mut self.data[start..start + NQUANTITIES]
    }

    /// Conserved state of record `(ix, iy, iz)`.
    #[inline(always)]
    pub fn state(&self, ix: usize, iy: usize, iz: usize) -> ConservedState {
        let start = self.layout.offset(ix, iy, iz);
        ConservedState::from_slice(&self.data[start..start + NQUANTITIES])
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> BlockView<'_> {
        BlockView {
            data: &*self.data,
            layout: self.layout,
            extent: self.extent,
        }
    }
}

/// Owned, densely packed cube of records.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockBuffer {
    data: Vec<Real>,
    layout: BlockLayout,
    side: usize,
}

impl BlockBuffer {
    /// Zero-initialized cube of side `side` with `floats_per_point` scalars per record.
    ///
    /// # Panics
    /// Panics if `floats_per_point` is less than seven.
    pub fn new(side: usize, floats_per_point: usize) -> Self {
        assert!(
            floats_per_point >= NQUANTITIES,
            "records need at least {NQUANTITIES} scalars"
        );
        Self {
            data: vec![0.0; side * side * side * floats_per_point],
            layout: BlockLayout::dense(side, floats_per_point),
            side,
        }
    }

    /// Side length.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Memory layout.
    #[inline]
    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    /// Conserved state of record `(ix, iy, iz)`.
    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> ConservedState {
        let start = self.layout.offset(ix, iy, iz);
        ConservedState::from_slice(&self.data[start..start + NQUANTITIES])
    }

    /// Store a conserved state at `(ix, iy, iz)`.
    pub fn set(&mut self, ix: usize, iy: usize, iz: usize, state: ConservedState) {
        let start = self.layout.offset(ix, iy, iz);
        state.write_to(&mut self.data[start..start + NQUANTITIES]);
    }

    /// Fill every record from a function of its coordinates.
    pub fn set_from_fn<F>(&mut self, f: F)
    where
        F: Fn(usize, usize, usize) -> ConservedState,
    {
        for iz in 0..self.side {
            for iy in 0..self.side {
                for ix in 0..self.side {
                    self.set(ix, iy, iz, f(ix, iy, iz));
                }
            }
        }
    }

    /// Read-only view of the whole cube.
    pub fn view(&self) -> BlockView<'_> {
        BlockView {
            data: &self.data,
            layout: self.layout,
            extent: self.side,
        }
    }

    /// Mutable view of the whole cube.
    pub fn view_mut(&mut self) -> BlockViewMut<'_> {
        BlockViewMut {
            data: &mut self.data,
            layout: self.layout,
            extent: self.side,
        }
    }

    /// Raw interleaved storage.
    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let layout = BlockLayout::new(8, 10, 120);
        assert_eq!(layout.offset(1, 2, 3), 8 * (1 + 20 + 360));
        assert_eq!(BlockLayout::dense(4, 7).required_len(4), 4 * 4 * 4 * 7);
    }

    #[test]
    fn test_validate_rejects_short_records() {
        let layout = BlockLayout::dense(2, 6);
        assert!(matches!(
            layout.validate(2, 1000),
            Err(ConvectionError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_validate_rejects_short_buffer() {
        let layout = BlockLayout::dense(3, 7);
        let data = vec![0.0; 3 * 3 * 3 * 7 - 1];
        assert!(BlockView::new(&data, layout, 3).is_err());
    }

    #[test]
    fn test_validate_rejects_overlapping_strides() {
        let layout = BlockLayout::new(7, 2, 4);
        assert!(layout.validate(3, 10_000).is_err());
    }

    #[test]
    fn test_strided_view_inside_larger_array() {
        // A 2³ cube embedded in a 3³ array with 8 scalars per record.
        let mut outer = BlockBuffer::new(3, 8);
        outer.set(1, 1, 1, ConservedState::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0));
        let layout = outer.layout();
        let start = layout.offset(1, 1, 1);
        let view = BlockView::new(&outer.as_slice()[start..], layout, 1).expect("layout fits");
        assert_eq!(view.state(0, 0, 0).pi, 7.0);
    }

    #[test]
    fn test_buffer_fill_and_mutate() {
        let mut block = BlockBuffer::new(2, 7);
        block.set_from_fn(|ix, iy, iz| {
            let rho = 1.0 + (ix + 2 * iy + 4 * iz) as Real;
            ConservedState::new(rho, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0)
        });
        assert_eq!(block.get(1, 1, 1).rho, 8.0);
        {
            let mut view = block.view_mut();
            view.record_mut(0, 1, 0)[4] = 3.0;
            assert_eq!(view.as_view().state(0, 1, 0).energy, 3.0);
        }
        assert_eq!(block.get(0, 1, 0).energy, 3.0);
        assert_eq!(block.view().extent(), 2);
    }
}
