//! The compressed sparse array container.

use crate::block::Block;
use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::store::{split, BlockStore};

/// Default block width: the bit-width of `u64`.
pub const BLOCK_WIDTH: usize = <u64 as Mask>::WIDTH;

/// A sparse map from `usize` indices to `i32` values.
///
/// The index space is cut into blocks of `M::WIDTH` indices. Only blocks that
/// hold at least one value are stored, each as a mask plus a compacted value
/// buffer, so memory scales with the number of occupied indices rather than
/// with the largest index.
///
/// ```
/// use csa::SparseArray;
///
/// let mut a = SparseArray::new();
/// a.set(2, 25);
/// a.set(3, 30);
/// assert_eq!(a.get(3), Some(30));
/// assert_eq!(a.to_string(), "1 block {2|[2]=25:[3]=30}");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SparseArray<M = u64> {
    pub(crate) store: BlockStore<M>,
}

impl<M> Default for SparseArray<M> {
    fn default() -> Self {
        Self {
            store: BlockStore::default(),
        }
    }
}

impl<M: Mask> std::fmt::Debug for SparseArray<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparseArray")
            .field("width", &M::WIDTH)
            .field("blocks", &self.block_count())
            .field("len", &self.len())
            .finish()
    }
}

impl SparseArray<u64> {
    /// Create an empty array with the default block width of 64.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Mask> SparseArray<M> {
    /// Number of indices covered by one block.
    pub fn width(&self) -> usize {
        M::WIDTH
    }

    /// Return the value stored at `idx`.
    pub fn get(&self, idx: usize) -> Option<i32> {
        let pos = self.store.locate(idx)?;
        let (_, bit) = split::<M>(idx);
        self.store.get(pos).get(bit)
    }

    /// Return a mutable reference to the value stored at `idx`.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut i32> {
        let pos = self.store.locate(idx)?;
        let (_, bit) = split::<M>(idx);
        self.store.get_mut(pos).get_mut(bit)
    }

    /// Return true if `idx` holds a value.
    pub fn contains(&self, idx: usize) -> bool {
        self.store.locate(idx).is_some_and(|pos| {
            let (_, bit) = split::<M>(idx);
            self.store.get(pos).contains(bit)
        })
    }

    /// Store `value` at `idx`, returning the value it replaced.
    pub fn set(&mut self, idx: usize, value: i32) -> Option<i32> {
        let (_, bit) = split::<M>(idx);
        self.store.entry(idx).upsert(bit, value)
    }

    /// Remove the value at `idx` and return it.
    ///
    /// A block whose last value is removed is dropped from the array.
    pub fn delete(&mut self, idx: usize) -> Result<i32> {
        let pos = self.store.locate(idx).ok_or(Error::NotFound(idx))?;
        let (_, bit) = split::<M>(idx);
        let block = self.store.get_mut(pos);
        let value = block.remove(bit).ok_or(Error::NotFound(idx))?;
        if block.is_empty() {
            self.store.evict(pos);
        }
        Ok(value)
    }

    /// Call `f` on every stored value in ascending index order.
    ///
    /// `f` may rewrite the value in place and fold into `acc`; occupancy
    /// cannot change during the walk.
    pub fn for_each<A, F>(&mut self, acc: &mut A, mut f: F)
    where
        F: FnMut(&mut i32, &mut A),
    {
        for block in self.store.iter_mut() {
            for value in block.values_mut() {
                f(value, acc);
            }
        }
    }

    /// Iterate over `(index, value)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.store.as_slice().iter().flat_map(|b| b.iter())
    }

    /// Stored blocks, ascending by offset.
    pub fn blocks(&self) -> &[Block<M>] {
        self.store.as_slice()
    }

    /// Number of stored blocks.
    pub fn block_count(&self) -> usize {
        self.store.len()
    }

    /// Number of occupied indices.
    pub fn len(&self) -> usize {
        self.store.as_slice().iter().map(Block::len).sum()
    }

    /// Return true if no index holds a value.
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Drop every block.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Approximate heap memory usage in bytes.
    pub fn heap_bytes(&self) -> usize {
        self.store.heap_bytes()
    }
}

impl<M: Mask> FromIterator<(usize, i32)> for SparseArray<M> {
    fn from_iter<I: IntoIterator<Item = (usize, i32)>>(iter: I) -> Self {
        let mut array = Self::default();
        array.extend(iter);
        array
    }
}

impl<M: Mask> Extend<(usize, i32)> for SparseArray<M> {
    fn extend<I: IntoIterator<Item = (usize, i32)>>(&mut self, iter: I) {
        for (idx, value) in iter {
            self.set(idx, value);
        }
    }
}
