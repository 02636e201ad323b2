//! Fixed-width occupancy masks with rank support.
//!
//! A mask of width $W$ records which of the $W$ indices covered by a block
//! hold a value. The only query the container needs is
//!
//! $$\mathrm{rank}(m, i) = |\{ j < i : m_j = 1 \}|$$
//!
//! which doubles as the slot of bit `i` in the compacted value buffer and,
//! for `i = W`, as the total number of occupied slots.
//!
//! Rank is a single masked `count_ones`, so it is $O(1)$ on targets with a
//! hardware popcount.

use std::fmt::Debug;
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// An unsigned integer used as a block occupancy mask.
///
/// The block width of a container is the bit-width of its mask type.
/// Implemented for `u8`, `u16`, `u32`, `u64` and `u128`.
pub trait Mask: sealed::Sealed + Copy + Default + Eq + Hash + Debug {
    /// Number of indices covered by one block.
    const WIDTH: usize;

    /// Return true if bit `bit` is set. Bits at or past `WIDTH` are never set.
    fn is_set(self, bit: usize) -> bool;

    /// Return the mask with bit `bit` set. Unchanged if `bit >= WIDTH`.
    fn with(self, bit: usize) -> Self;

    /// Return the mask with bit `bit` cleared. Unchanged if `bit >= WIDTH`.
    fn without(self, bit: usize) -> Self;

    /// Return the number of set bits in positions `[0, bit)`.
    ///
    /// `rank(Self::WIDTH)` is the population count.
    fn rank(self, bit: usize) -> usize;

    /// Return true if no bit is set.
    fn is_empty(self) -> bool {
        self == Self::default()
    }

    /// Return the population count.
    fn count(self) -> usize {
        self.rank(Self::WIDTH)
    }

    /// Iterate over the set bit positions in increasing order.
    fn ones(self) -> Ones<Self> {
        Ones { mask: self, next: 0 }
    }
}

macro_rules! impl_mask {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Mask for $t {
            const WIDTH: usize = <$t>::BITS as usize;

            #[inline]
            fn is_set(self, bit: usize) -> bool {
                if bit >= Self::WIDTH {
                    return false;
                }
                (self & (1 << bit)) != 0
            }

            #[inline]
            fn with(self, bit: usize) -> Self {
                if bit >= Self::WIDTH {
                    return self;
                }
                self | (1 << bit)
            }

            #[inline]
            fn without(self, bit: usize) -> Self {
                if bit >= Self::WIDTH {
                    return self;
                }
                self & !(1 << bit)
            }

            #[inline]
            fn rank(self, bit: usize) -> usize {
                let below: $t = if bit >= Self::WIDTH {
                    !0
                } else {
                    (1 << bit) - 1
                };
                (self & below).count_ones() as usize
            }
        }
    )*};
}

impl_mask!(u8, u16, u32, u64, u128);

/// Iterator over the set bits of a mask, lowest first.
#[derive(Debug, Clone)]
pub struct Ones<M> {
    mask: M,
    next: usize,
}

impl<M: Mask> Iterator for Ones<M> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next < M::WIDTH {
            let bit = self.next;
            self.next += 1;
            if self.mask.is_set(bit) {
                return Some(bit);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mask.count() - self.mask.rank(self.next);
        (remaining, Some(remaining))
    }
}

impl<M: Mask> ExactSizeIterator for Ones<M> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_basic() {
        let m: u64 = 0b1011;
        assert_eq!(m.rank(0), 0);
        assert_eq!(m.rank(1), 1);
        assert_eq!(m.rank(2), 2);
        assert_eq!(m.rank(3), 2);
        assert_eq!(m.rank(4), 3);
        assert_eq!(m.rank(64), 3);
        assert_eq!(m.count(), 3);
    }

    #[test]
    fn test_rank_top_bit() {
        let m: u64 = 1 << 63;
        assert_eq!(m.rank(63), 0);
        assert_eq!(m.rank(64), 1);

        let m: u8 = 0xFF;
        assert_eq!(m.rank(7), 7);
        assert_eq!(m.count(), 8);
    }

    #[test]
    fn test_set_clear() {
        let m = 0u32.with(5).with(31);
        assert!(m.is_set(5));
        assert!(m.is_set(31));
        assert!(!m.is_set(6));
        let m = m.without(5);
        assert!(!m.is_set(5));
        assert!(!m.is_empty());
        assert!(m.without(31).is_empty());
    }

    #[test]
    fn test_out_of_range_bits() {
        let m: u64 = 1;
        assert!(!m.is_set(64));
        assert!(!m.is_set(usize::MAX));
        assert_eq!(m.with(64), m);
        assert_eq!(m.without(64), m);
        assert_eq!(0u8.with(8), 0);
    }

    #[test]
    fn test_ones_order() {
        let m: u128 = (1 << 100) | (1 << 3) | 1;
        let bits: Vec<usize> = m.ones().collect();
        assert_eq!(bits, vec![0, 3, 100]);
        assert_eq!(m.ones().len(), 3);
    }

    #[test]
    fn test_widths() {
        assert_eq!(<u8 as Mask>::WIDTH, 8);
        assert_eq!(<u16 as Mask>::WIDTH, 16);
        assert_eq!(<u32 as Mask>::WIDTH, 32);
        assert_eq!(<u64 as Mask>::WIDTH, 64);
        assert_eq!(<u128 as Mask>::WIDTH, 128);
    }
}
