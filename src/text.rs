//! Canonical text form.
//!
//! # Format
//!
//! ```text
//! 0 blocks
//! 1 block {2|[2]=25:[3]=30}
//! 3 blocks {1|[2]=10}{1|[66]=30}{1|[257]=25}
//! ```
//!
//! - header: the block count, `block` when it is exactly one, `blocks` otherwise
//! - an empty array is the bare header, with no trailing space
//! - each block: `{`, its occupied count, `|`, `:`-separated `[index]=value`
//!   entries in ascending index order, `}`
//! - blocks follow in ascending offset order with no separator
//!
//! The format is deterministic: two arrays holding the same entries with the
//! same block width render identically. Parsing accepts exactly the rendered
//! form and rebuilds the same blocks.

use std::fmt;
use std::str::FromStr;

use crate::array::SparseArray;
use crate::block::Block;
use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::store::split;

impl<M: Mask> fmt::Display for SparseArray<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block_count() {
            0 => return f.write_str("0 blocks"),
            1 => f.write_str("1 block ")?,
            n => write!(f, "{n} blocks ")?,
        }
        for block in self.blocks() {
            write!(f, "{{{}|", block.len())?;
            for (i, (idx, value)) in block.iter().enumerate() {
                if i > 0 {
                    f.write_str(":")?;
                }
                write!(f, "[{idx}]={value}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

impl<M: Mask> FromStr for SparseArray<M> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut cur = Cursor { s, off: 0 };

        let n: usize = cur.number()?;
        match n {
            0 => {
                cur.expect(" blocks")?;
                cur.finish()?;
                return Ok(Self::default());
            }
            1 => cur.expect(" block ")?,
            _ => cur.expect(" blocks ")?,
        }

        let mut array = Self::default();
        for _ in 0..n {
            let block = parse_block::<M>(&mut cur)?;
            if !array.store.push_ordered(block) {
                return Err(cur.error("blocks not in ascending offset order"));
            }
        }
        cur.finish()?;

        tracing::debug!(blocks = n, len = array.len(), "parsed canonical text");
        Ok(array)
    }
}

fn parse_block<M: Mask>(cur: &mut Cursor<'_>) -> Result<Block<M>> {
    cur.expect("{")?;
    let count: usize = cur.number()?;
    if count == 0 {
        return Err(cur.error("empty block"));
    }
    cur.expect("|")?;

    let mut block: Option<Block<M>> = None;
    let mut last: Option<usize> = None;
    for i in 0..count {
        if i > 0 {
            cur.expect(":")?;
        }
        cur.expect("[")?;
        let idx: usize = cur.number()?;
        cur.expect("]=")?;
        let value: i32 = cur.number()?;

        if last.is_some_and(|prev| prev >= idx) {
            return Err(cur.error("entries not in ascending index order"));
        }
        last = Some(idx);

        let (offset, bit) = split::<M>(idx);
        let b = block.get_or_insert_with(|| Block::new(offset));
        if b.offset() != offset {
            return Err(cur.error("entry outside its block"));
        }
        b.upsert(bit, value);
    }
    cur.expect("}")?;

    block.ok_or_else(|| cur.error("empty block"))
}

struct Cursor<'a> {
    s: &'a str,
    off: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.s[self.off..]
    }

    fn error(&self, what: &str) -> Error {
        Error::InvalidEncoding(format!("{what} at byte {}", self.off))
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if !self.rest().starts_with(token) {
            return Err(self.error(&format!("expected {token:?}")));
        }
        self.off += token.len();
        Ok(())
    }

    /// Read an optionally negative decimal integer.
    fn number<T: FromStr>(&mut self) -> Result<T> {
        let rest = self.rest();
        let sign = usize::from(rest.starts_with('-'));
        let digits = rest[sign..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return Err(self.error("expected number"));
        }
        let text = &rest[..sign + digits];
        let body = &text[sign..];
        if body.len() > 1 && body.starts_with('0') {
            return Err(self.error(&format!("number {text:?} has leading zeros")));
        }
        if sign == 1 && body == "0" {
            return Err(self.error("negative zero"));
        }
        let value = text
            .parse()
            .map_err(|_| self.error(&format!("number {text:?} out of range")))?;
        self.off += text.len();
        Ok(value)
    }

    fn finish(&self) -> Result<()> {
        if self.off != self.s.len() {
            return Err(self.error("trailing input"));
        }
        Ok(())
    }
}
