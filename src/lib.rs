//! # Compressed Sparse Arrays
//!
//! *Integer maps over huge index ranges, paying only for what is stored.*
//!
//! ## Intuition First
//!
//! Picture a street with a million house numbers where only a few hundred
//! houses are built. Listing every plot wastes paper; listing only the built
//! houses loses the ability to jump straight to number 421 337. A compromise
//! is to group the plots into short rows, skip every empty row, and for each
//! remaining row keep a tiny punch card saying which plots are built plus a
//! tight list of their residents.
//!
//! ## The Problem
//!
//! - **Dense arrays**: $O(1)$ access, but memory is proportional to the largest index.
//! - **Hash maps / trees**: memory proportional to the entries, but with
//!   per-entry overhead and no locality between neighbouring indices.
//!
//! ## Historical Context
//!
//! ```text
//! 1979  Tarjan-Yao  "Storing a sparse table": split keys into fixed-size rows
//! 1989  Jacobson    Rank over bit vectors as a space-saving index
//! 2001  Bagwell     Bitmap + popcount to compact trie node children (HAMT)
//! 2016  Lemire      Roaring bitmaps: per-chunk containers in a sorted key array
//! ```
//!
//! The recurring idea is the same: a small bitmap says which slots exist,
//! and `popcount` of the bits below a slot says where its payload sits in a
//! packed array.
//!
//! ## Mathematical Formulation
//!
//! Fix a block width $W$ (the bit-width of the mask type). Index $x$ lives in
//! block $\lfloor x / W \rfloor \cdot W$ at bit $x \bmod W$. Each stored block
//! keeps a $W$-bit mask $m$ and a value buffer $v$ with $|v| = \mathrm{popcount}(m)$.
//! The value of bit $i$ is
//!
//! $$v[\mathrm{rank}(m, i)], \quad \mathrm{rank}(m, i) = \mathrm{popcount}(m \mathbin{\&} (2^i - 1)).$$
//!
//! ## Complexity Analysis
//!
//! - **Lookup**: $O(\log B)$ to find the block among $B$ blocks, $O(1)$ rank.
//! - **Insert / delete**: $O(\log B + W)$ plus an $O(B)$ shift when a block
//!   is created or dropped.
//! - **Space**: one mask and one offset per occupied block, one value per entry.
//!
//! ## What Could Go Wrong
//!
//! 1. **Uniform scatter**: if every block holds a single entry, the mask and
//!    offset overhead dominate; a hash map is smaller.
//! 2. **Block churn**: alternating insert/delete of a block's only entry
//!    shifts the block sequence each time.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **`SparseArray`**: the container, generic over its mask width (default `u64`).
//! - **`Block`**: read-only view of one block (offset, mask, compacted values).
//! - **`handle`**: the same operations over an `Option<SparseArray>`.
//! - A deterministic text form via `Display`, parsed back via `FromStr`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod block;
pub mod error;
pub mod handle;
pub mod mask;
mod store;
mod text;

pub use array::{SparseArray, BLOCK_WIDTH};
pub use block::Block;
pub use error::{Error, Result};
pub use mask::Mask;
