//! A single block: an occupancy mask plus the compacted values it indexes.
//!
//! # Layout
//!
//! A block covers the indices `[offset, offset + W)`. Bit `i` of the mask is
//! set exactly when index `offset + i` holds a value, and that value lives at
//! `values[mask.rank(i)]`. The buffer has one slot per set bit and no holes,
//! so it is always ordered by bit position:
//!
//! ```text
//! mask    = 0b0000_1101         (bits 0, 2, 3)
//! values  = [v0, v2, v3]
//! rank(2) = 1  ->  values[1] = v2
//! ```

use crate::mask::Mask;

/// A fixed-width slice of the index space.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Block<M> {
    offset: usize,
    mask: M,
    values: Vec<i32>,
}

impl<M: Mask> std::fmt::Debug for Block<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("offset", &self.offset)
            .field("len", &self.values.len())
            .finish()
    }
}

impl<M: Mask> Block<M> {
    /// Create an empty block based at `offset`.
    ///
    /// `offset` must be a multiple of `M::WIDTH`.
    pub(crate) fn new(offset: usize) -> Self {
        debug_assert_eq!(offset % M::WIDTH, 0);
        Self {
            offset,
            mask: M::default(),
            values: Vec::new(),
        }
    }

    /// Smallest index covered by this block.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Occupancy mask.
    pub fn mask(&self) -> M {
        self.mask
    }

    /// Compacted values, in ascending index order.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Number of occupied indices.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return true if no index in this block holds a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return true if bit `bit` holds a value. Bits past the block width never do.
    pub fn contains(&self, bit: usize) -> bool {
        self.mask.is_set(bit)
    }

    /// Return the value stored at bit `bit`.
    pub fn get(&self, bit: usize) -> Option<i32> {
        if !self.mask.is_set(bit) {
            return None;
        }
        Some(self.values[self.mask.rank(bit)])
    }

    pub(crate) fn get_mut(&mut self, bit: usize) -> Option<&mut i32> {
        if !self.mask.is_set(bit) {
            return None;
        }
        let pos = self.mask.rank(bit);
        Some(&mut self.values[pos])
    }

    pub(crate) fn values_mut(&mut self) -> &mut [i32] {
        &mut self.values
    }

    /// Write `value` at bit `bit`, returning the value it replaced.
    ///
    /// A fresh bit grows the buffer by one slot at its rank position; an
    /// occupied bit is overwritten in place.
    pub(crate) fn upsert(&mut self, bit: usize, value: i32) -> Option<i32> {
        debug_assert!(bit < M::WIDTH);
        let pos = self.mask.rank(bit);
        if self.mask.is_set(bit) {
            return Some(std::mem::replace(&mut self.values[pos], value));
        }
        self.values.insert(pos, value);
        self.mask = self.mask.with(bit);
        None
    }

    /// Clear bit `bit` and drop its slot, returning the removed value.
    ///
    /// The caller evicts the block once it is empty.
    pub(crate) fn remove(&mut self, bit: usize) -> Option<i32> {
        if !self.mask.is_set(bit) {
            return None;
        }
        let pos = self.mask.rank(bit);
        let value = self.values.remove(pos);
        self.mask = self.mask.without(bit);
        self.values.shrink_to(self.values.len());
        Some(value)
    }

    /// Iterate over `(index, value)` pairs in ascending index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, i32)> + '_ {
        self.mask
            .ones()
            .zip(self.values.iter())
            .map(move |(bit, &v)| (self.offset + bit, v))
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.values.capacity() * std::mem::size_of::<i32>()
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.values.len(), self.mask.count());
        assert_eq!(self.offset % M::WIDTH, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_keeps_bit_order() {
        let mut b: Block<u64> = Block::new(64);
        assert_eq!(b.upsert(10, 100), None);
        assert_eq!(b.upsert(2, 20), None);
        assert_eq!(b.upsert(40, 400), None);
        assert_eq!(b.upsert(5, 50), None);

        assert_eq!(b.values(), &[20, 50, 100, 400]);
        assert_eq!(b.get(10), Some(100));
        assert_eq!(b.get(3), None);
        b.check_invariants();

        let pairs: Vec<_> = b.iter().collect();
        assert_eq!(pairs, vec![(66, 20), (69, 50), (74, 100), (104, 400)]);
    }

    #[test]
    fn test_overwrite_does_not_grow() {
        let mut b: Block<u64> = Block::new(0);
        b.upsert(7, 1);
        b.upsert(9, 2);
        assert_eq!(b.upsert(7, 3), Some(1));
        assert_eq!(b.len(), 2);
        assert_eq!(b.values(), &[3, 2]);
        b.check_invariants();
    }

    #[test]
    fn test_remove_compacts() {
        let mut b: Block<u32> = Block::new(32);
        for bit in [0, 4, 8, 31] {
            b.upsert(bit, bit as i32 * 10);
        }
        assert_eq!(b.remove(4), Some(40));
        assert_eq!(b.remove(4), None);
        assert_eq!(b.values(), &[0, 80, 310]);
        assert_eq!(b.get(8), Some(80));
        b.check_invariants();

        b.remove(0);
        b.remove(8);
        assert_eq!(b.remove(31), Some(310));
        assert!(b.is_empty());
        assert!(b.mask().is_empty());
    }

    #[test]
    fn test_bit_past_width() {
        let mut b: Block<u64> = Block::new(0);
        b.upsert(0, 7);
        assert!(!b.contains(64));
        assert_eq!(b.get(64), None);
        assert_eq!(b.get(usize::MAX), None);
        assert!(b.get_mut(64).is_none());
        assert_eq!(b.remove(64), None);
        assert_eq!(b.get(0), Some(7));

        let mut b: Block<u8> = Block::new(8);
        b.upsert(7, 1);
        assert_eq!(b.get(<u8 as Mask>::WIDTH), None);
    }

    #[test]
    fn test_get_mut_in_place() {
        let mut b: Block<u64> = Block::new(0);
        b.upsert(1, 5);
        b.upsert(3, 7);
        *b.get_mut(3).unwrap() += 1;
        assert_eq!(b.get(3), Some(8));
        assert!(b.get_mut(2).is_none());
    }
}
