#![cfg(test)]

// Property tests for ChainedTable kept inside the crate so they can reach
// the structural layer directly, below any comparer.

use crate::chained::{ChainedTable, Cursor, Removal};
use crate::error::Error;
use proptest::prelude::*;

// Slots are given as raw seeds and reduced modulo the capacity, so the
// strategies shrink independently of the chosen capacity.
#[derive(Clone, Debug)]
enum Op {
    Push(usize, i8),
    Remove(usize, i8),
    Find(usize, i8),
    Clear,
    Walk,
    CursorStep,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<Op>)> {
    let value = -4i8..=4;
    let op = prop_oneof![
        4 => (any::<usize>(), value.clone()).prop_map(|(s, v)| Op::Push(s, v)),
        3 => (any::<usize>(), value.clone()).prop_map(|(s, v)| Op::Remove(s, v)),
        2 => (any::<usize>(), value).prop_map(|(s, v)| Op::Find(s, v)),
        1 => Just(Op::Clear),
        1 => Just(Op::Walk),
        2 => Just(Op::CursorStep),
    ];
    (1usize..=6, proptest::collection::vec(op, 1..80))
}

// Property: per-slot equivalence against a Vec-of-Vecs model.
// Invariants exercised across random operation sequences:
// - push appends at the chain tail; remove takes the first match only.
// - removal from a slot with no entries reports Unpopulated, a miss in a
//   populated slot reports Absent, and neither changes anything.
// - traversal equals the model flattened slot by slot, head to tail.
// - len equals the sum of chain lengths after every op.
// - a cursor either keeps pace with the model or reports a modification.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_chains_match_model((capacity, ops) in arb_scenario()) {
        let mut sut: ChainedTable<i8> = ChainedTable::with_capacity(capacity).unwrap();
        let mut model: Vec<Vec<i8>> = vec![Vec::new(); capacity];
        let mut cursor = Cursor::new(&sut);
        let mut cursor_seen: Vec<i8> = Vec::new();
        let mut cursor_stale = false;

        for op in ops {
            match op {
                Op::Push(seed, v) => {
                    let slot = seed % capacity;
                    sut.push(slot, v);
                    model[slot].push(v);
                    cursor_stale = true;
                }
                Op::Remove(seed, v) => {
                    let slot = seed % capacity;
                    let before = sut.version();
                    let got = sut.remove(slot, |e| *e == v);
                    let chain = &mut model[slot];
                    if chain.is_empty() {
                        prop_assert_eq!(got, Removal::Unpopulated);
                        prop_assert_eq!(sut.version(), before);
                    } else if let Some(i) = chain.iter().position(|e| *e == v) {
                        prop_assert_eq!(got, Removal::Removed(chain.remove(i)));
                        cursor_stale = true;
                    } else {
                        prop_assert_eq!(got, Removal::Absent);
                        prop_assert_eq!(sut.version(), before);
                    }
                }
                Op::Find(seed, v) => {
                    let slot = seed % capacity;
                    let found = sut.find(slot, |e| *e == v).copied();
                    let expected = model[slot].iter().find(|e| **e == v).copied();
                    prop_assert_eq!(found, expected);
                }
                Op::Clear => {
                    sut.clear();
                    model.iter_mut().for_each(Vec::clear);
                    cursor_stale = true;
                }
                Op::Walk => {
                    let walked: Vec<i8> = sut.iter().copied().collect();
                    let expected: Vec<i8> = model.iter().flatten().copied().collect();
                    prop_assert_eq!(walked, expected);
                    // Restart the cursor on a fresh snapshot.
                    cursor = Cursor::new(&sut);
                    cursor_seen.clear();
                    cursor_stale = false;
                }
                Op::CursorStep => {
                    match cursor.step(&sut) {
                        Ok(Some(v)) => {
                            prop_assert!(!cursor_stale);
                            cursor_seen.push(*v);
                        }
                        Ok(None) => {
                            prop_assert!(!cursor_stale);
                            let expected: Vec<i8> = model.iter().flatten().copied().collect();
                            prop_assert_eq!(&cursor_seen, &expected);
                        }
                        Err(e) => {
                            prop_assert!(cursor_stale);
                            prop_assert_eq!(e, Error::ConcurrentModification);
                        }
                    }
                }
            }

            // Post-conditions after each op
            let expected_len: usize = model.iter().map(Vec::len).sum();
            prop_assert_eq!(sut.len(), expected_len);
            prop_assert_eq!(sut.is_empty(), expected_len == 0);
            for (slot, chain) in model.iter().enumerate() {
                prop_assert_eq!(sut.chain_len(slot), chain.len());
                let got: Vec<i8> = sut.chain(slot).copied().collect();
                prop_assert_eq!(&got, chain);
            }
        }
    }
}

// Property: draining returns every entry in traversal order and leaves a
// table that accepts new entries in any slot.
proptest! {
    #[test]
    fn prop_drain_matches_iter(
        capacity in 1usize..=8,
        placed in proptest::collection::vec((any::<usize>(), any::<i8>()), 0..40),
    ) {
        let mut sut: ChainedTable<i8> = ChainedTable::with_capacity(capacity).unwrap();
        for &(seed, v) in &placed {
            sut.push(seed % capacity, v);
        }
        let walked: Vec<i8> = sut.iter().copied().collect();
        prop_assert_eq!(sut.drain_ordered(), walked);
        prop_assert!(sut.is_empty());
        prop_assert!(sut.first().is_none());
        for slot in 0..capacity {
            sut.push(slot, 0);
        }
        prop_assert_eq!(sut.len(), capacity);
    }
}
