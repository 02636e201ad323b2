#![no_main]
use std::collections::BTreeMap;

use csa::SparseArray;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<(u16, i32, bool)>| {
    let mut a = SparseArray::new();
    let mut model = BTreeMap::new();

    for (idx, value, delete) in data {
        let idx = idx as usize;
        if delete {
            assert_eq!(a.delete(idx).ok(), model.remove(&idx));
        } else {
            assert_eq!(a.set(idx, value), model.insert(idx, value));
        }
    }

    assert_eq!(a.len(), model.len());
    for (&idx, &value) in &model {
        assert_eq!(a.get(idx), Some(value));
    }

    let blocks = a.blocks();
    for w in blocks.windows(2) {
        assert!(w[0].offset() < w[1].offset());
    }
    assert!(blocks.iter().all(|b| !b.is_empty()));

    let text = a.to_string();
    let parsed: SparseArray = text.parse().unwrap();
    assert_eq!(parsed, a);
});
