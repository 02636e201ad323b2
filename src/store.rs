//! Ordered block storage.
//!
//! Blocks are kept in a `Vec` sorted strictly ascending by offset, one block
//! per occupied `W`-wide slice of the index space. Lookups binary-search on
//! the offset; insertion and eviction shift the tail by one position, so the
//! sequence never needs re-sorting.

use crate::block::Block;
use crate::mask::Mask;

/// Split a global index into its block offset and bit position.
#[inline]
pub(crate) fn split<M: Mask>(idx: usize) -> (usize, usize) {
    let bit = idx % M::WIDTH;
    (idx - bit, bit)
}

/// Sorted, duplicate-free sequence of blocks.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct BlockStore<M> {
    blocks: Vec<Block<M>>,
}

impl<M> Default for BlockStore<M> {
    fn default() -> Self {
        Self { blocks: Vec::new() }
    }
}

impl<M: Mask> BlockStore<M> {
    /// Position of the block based at `offset`, or where it would be inserted.
    fn search(&self, offset: usize) -> Result<usize, usize> {
        self.blocks.binary_search_by_key(&offset, Block::offset)
    }

    /// Position of the block covering `idx`, if it exists.
    pub(crate) fn locate(&self, idx: usize) -> Option<usize> {
        let (offset, _) = split::<M>(idx);
        self.search(offset).ok()
    }

    /// Insert an empty block covering `idx` at its sorted position.
    ///
    /// The caller must have checked that no such block exists.
    pub(crate) fn materialize(&mut self, idx: usize) -> usize {
        let (offset, _) = split::<M>(idx);
        let pos = self.blocks.partition_point(|b| b.offset() < offset);
        debug_assert!(!self.blocks.get(pos).is_some_and(|b| b.offset() == offset));
        self.blocks.insert(pos, Block::new(offset));
        tracing::trace!(offset, pos, blocks = self.blocks.len(), "block materialized");
        pos
    }

    /// Remove the block at `pos`. Storage is released when the last block goes.
    pub(crate) fn evict(&mut self, pos: usize) -> Block<M> {
        let block = self.blocks.remove(pos);
        if self.blocks.is_empty() {
            self.blocks = Vec::new();
        }
        tracing::trace!(
            offset = block.offset(),
            blocks = self.blocks.len(),
            "block evicted"
        );
        block
    }

    /// Block covering `idx`, materializing it if needed.
    pub(crate) fn entry(&mut self, idx: usize) -> &mut Block<M> {
        let pos = match self.locate(idx) {
            Some(pos) => pos,
            None => self.materialize(idx),
        };
        &mut self.blocks[pos]
    }

    pub(crate) fn get(&self, pos: usize) -> &Block<M> {
        &self.blocks[pos]
    }

    pub(crate) fn get_mut(&mut self, pos: usize) -> &mut Block<M> {
        &mut self.blocks[pos]
    }

    pub(crate) fn as_slice(&self) -> &[Block<M>] {
        &self.blocks
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Block<M>> {
        self.blocks.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Append a block whose offset is greater than every stored offset.
    pub(crate) fn push_ordered(&mut self, block: Block<M>) -> bool {
        if self
            .blocks
            .last()
            .is_some_and(|last| last.offset() >= block.offset())
        {
            return false;
        }
        self.blocks.push(block);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.blocks = Vec::new();
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.blocks.capacity() * std::mem::size_of::<Block<M>>()
            + self.blocks.iter().map(Block::heap_bytes).sum::<usize>()
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        for w in self.blocks.windows(2) {
            assert!(w[0].offset() < w[1].offset());
        }
        for b in &self.blocks {
            assert!(!b.is_empty());
            b.check_invariants();
        }
    }
}
