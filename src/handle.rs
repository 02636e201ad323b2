//! Handle-style API over an optional container.
//!
//! Callers that keep their array behind an `Option` (created lazily, or
//! released early) can route every operation through these functions
//! instead of matching on the option themselves. A missing container is
//! reported as [`Error::AbsentContainer`] rather than created implicitly.

use crate::array::SparseArray;
use crate::error::{Error, Result};
use crate::mask::Mask;

/// Create an empty array with the default block width.
pub fn init() -> Option<SparseArray> {
    Some(SparseArray::new())
}

/// Look up `idx`.
pub fn get<M: Mask>(array: Option<&SparseArray<M>>, idx: usize) -> Result<i32> {
    array
        .ok_or(Error::AbsentContainer)?
        .get(idx)
        .ok_or(Error::NotFound(idx))
}

/// Store `value` at `idx`.
pub fn set<M: Mask>(array: Option<&mut SparseArray<M>>, idx: usize, value: i32) -> Result<()> {
    array.ok_or(Error::AbsentContainer)?.set(idx, value);
    Ok(())
}

/// Remove the value at `idx`.
pub fn delete<M: Mask>(array: Option<&mut SparseArray<M>>, idx: usize) -> Result<i32> {
    array.ok_or(Error::AbsentContainer)?.delete(idx)
}

/// Visit every value in ascending index order. No-op without a container.
pub fn for_each<M, A, F>(array: Option<&mut SparseArray<M>>, acc: &mut A, f: F)
where
    M: Mask,
    F: FnMut(&mut i32, &mut A),
{
    if let Some(array) = array {
        array.for_each(acc, f);
    }
}

/// Render the canonical text, or the empty string without a container.
pub fn tostring<M: Mask>(array: Option<&SparseArray<M>>) -> String {
    array.map(ToString::to_string).unwrap_or_default()
}

/// Release the container and leave `None` behind.
pub fn free<M>(array: &mut Option<SparseArray<M>>) {
    *array = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_container() {
        let mut c: Option<SparseArray> = None;
        assert_eq!(tostring(c.as_ref()), "");
        assert_eq!(get(c.as_ref(), 0), Err(Error::AbsentContainer));
        assert_eq!(set(c.as_mut(), 0, 1), Err(Error::AbsentContainer));
        assert_eq!(delete(c.as_mut(), 0), Err(Error::AbsentContainer));

        let mut calls = 0;
        for_each(c.as_mut(), &mut calls, |_, n| *n += 1);
        assert_eq!(calls, 0);
        assert!(c.is_none());
    }

    #[test]
    fn test_lifecycle() {
        let mut c = init();
        assert_eq!(tostring(c.as_ref()), "0 blocks");
        assert_eq!(get(c.as_ref(), 0), Err(Error::NotFound(0)));
        assert_eq!(get(c.as_ref(), 2), Err(Error::NotFound(2)));

        set(c.as_mut(), 2, 25).unwrap();
        set(c.as_mut(), 3, 30).unwrap();
        set(c.as_mut(), 100, 100).unwrap();
        assert_eq!(get(c.as_ref(), 2), Ok(25));
        assert_eq!(get(c.as_ref(), 3), Ok(30));
        assert_eq!(get(c.as_ref(), 100), Ok(100));
        assert_eq!(
            tostring(c.as_ref()),
            "2 blocks {2|[2]=25:[3]=30}{1|[100]=100}"
        );

        let mut total = 0i64;
        for_each(c.as_mut(), &mut total, |v, acc| *acc += i64::from(*v));
        assert_eq!(total, 155);

        assert_eq!(delete(c.as_mut(), 100), Ok(100));
        assert_eq!(delete(c.as_mut(), 100), Err(Error::NotFound(100)));
        assert_eq!(tostring(c.as_ref()), "1 block {2|[2]=25:[3]=30}");

        free(&mut c);
        assert!(c.is_none());
        assert_eq!(tostring(c.as_ref()), "");
        free(&mut c);
    }
}
