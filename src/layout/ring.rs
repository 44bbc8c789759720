//! Sliding window over z slices.
//!
//! A [`Ring`] owns a fixed number of slots and a head position. Slot `0` is
//! the most recently written slot, `-1` the one before it, and so on back to
//! `-(len - 1)`. [`Ring::advance`] moves the head forward by one slot, so the
//! oldest slot becomes the new slot `0`; no data is copied.

/// Fixed-capacity ring of slots addressed by non-positive relative offsets.
#[derive(Clone, Debug)]
pub struct Ring<T> {
    slots: Vec<T>,
    head: usize,
}

impl<T> Ring<T> {
    /// Build a ring of `len` slots, creating each with `make`.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    pub fn from_fn(len: usize, make: impl FnMut(usize) -> T) -> Self {
        assert!(len > 0, "ring needs at least one slot");
        Self {
            slots: (0..len).map(make).collect(),
            head: 0,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a ring has at least one slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Physical slot for relative offset `rel`.
    #[inline(always)]
    pub fn slot(&self, rel: isize) -> usize {
        let len = self.slots.len() as isize;
        assert!(
            rel <= 0 && rel > -len,
            "ring offset {rel} outside window of {len} slots"
        );
        (self.head as isize + rel).rem_euclid(len) as usize
    }

    /// Slot at relative offset `rel`.
    #[inline(always)]
    pub fn get(&self, rel: isize) -> &T {
        &self.slots[self.slot(rel)]
    }

    /// Mutable slot at relative offset `rel`.
    #[inline(always)]
    pub fn get_mut(&mut self, rel: isize) -> &mut T {
        let slot = self.slot(rel);
        &mut self.slots[slot]
    }

    /// Most recent slot.
    #[inline]
    pub fn current(&self) -> &T {
        self.get(0)
    }

    /// Most recent slot, mutable.
    #[inline]
    pub fn current_mut(&mut self) -> &mut T {
        self.get_mut(0)
    }

    /// Rotate the window by one slot.
    #[inline]
    pub fn advance(&mut self) {
        self.head = (self.head + 1) % self.slots.len();
    }

    /// Reset the window to its initial position.
    pub fn rewind(&mut self) {
        self.head = 0;
    }

    /// Iterate over all slots in physical order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }
}
