use chained_hash::{Comparer, Cursor, Error, FnComparer, HashTable};
use std::collections::BTreeMap;

fn calendar(capacity: usize) -> HashTable<&'static str, i32> {
    let mut t = HashTable::with_capacity(capacity).unwrap();
    t.insert("dia", 28).unwrap();
    t.insert("mês", 12).unwrap();
    t.insert("ano", 2077).unwrap();
    t
}

#[test]
fn single_slot_table_chains_every_key() {
    let mut t = calendar(1);
    assert_eq!(t.slot_len(0), 3);
    assert_eq!(t.try_get("ano"), Some(&2077));
    assert_eq!(t.len(), 3);

    assert_eq!(t.remove("ano"), Ok(2077));
    assert_eq!(t.len(), 2);
    assert_eq!(t.try_get("ano"), None);
    assert_eq!(t.get("ano"), Err(Error::KeyNotFound));
}

#[test]
fn lookups_agree_across_capacities() {
    for capacity in [1, 2, 3, 7, 64] {
        let t = calendar(capacity);
        assert_eq!(t["dia"], 28);
        assert_eq!(t.get("mês"), Ok(&12));
        assert!(t.contains_key("ano"));
        assert!(!t.contains_key("semana"));
        let total: usize = (0..t.capacity()).map(|s| t.slot_len(s)).sum();
        assert_eq!(total, t.len());
    }
}

#[test]
fn duplicate_rejected_at_any_chain_position() {
    // Every key lands in one chain, so "dia" is the head, "mês" an inner
    // node and "ano" the tail.
    let mut t = calendar(1);
    for key in ["dia", "mês", "ano"] {
        assert_eq!(t.insert(key, 0), Err(Error::DuplicateKey));
    }
    assert_eq!(t.len(), 3);
    assert_eq!(t["mês"], 12);
}

#[test]
fn remove_reports_why_it_missed() {
    let mut t: HashTable<String, i32> = HashTable::with_capacity(1).unwrap();
    let slot = t.slot_index("x");
    assert_eq!(t.remove("x"), Err(Error::UnpopulatedSlot { slot }));
    t.insert("y".to_string(), 1).unwrap();
    assert_eq!(t.remove("x"), Err(Error::KeyNotFound));
    assert!(t.remove("x").unwrap_err().is_not_found());
    assert_eq!(t.remove_entry("y"), Ok(("y".to_string(), 1)));
    assert!(t.is_empty());
}

#[test]
fn empty_table_get_fails_but_try_get_does_not() {
    let mut t: HashTable<&str, i32> = HashTable::new();
    assert_eq!(t.get("dia"), Err(Error::EmptyTable));
    assert_eq!(t.get_mut("dia"), Err(Error::EmptyTable));
    assert_eq!(t.try_get("dia"), None);
    assert!(t.is_empty());
}

#[test]
fn blank_keys_are_rejected() {
    let mut t: HashTable<String, i32> = HashTable::new();
    assert_eq!(t.insert(String::new(), 1), Err(Error::BlankKey));
    let mut opt: HashTable<Option<u8>, i32> = HashTable::new();
    assert_eq!(opt.insert(None, 1), Err(Error::BlankKey));
    opt.insert(Some(0), 1).unwrap();
    assert_eq!(opt[&Some(0)], 1);
}

#[test]
fn values_can_be_updated_in_place() {
    let mut t = calendar(2);
    *t.get_mut("dia").unwrap() += 1;
    *t.get_mut("mês").unwrap() -= 1;
    for v in t.values_mut() {
        *v *= 10;
    }
    assert_eq!(t["dia"], 290);
    assert_eq!(t["mês"], 110);
    assert_eq!(t["ano"], 20770);
}

#[test]
fn setting_a_present_key_keeps_the_stored_value() {
    let mut t = calendar(2);
    assert_eq!(t.insert("dia", 1), Err(Error::DuplicateKey));
    assert_eq!(t.get("dia"), Ok(&28));

    let mut fresh: HashTable<&str, i32> = HashTable::new();
    assert_eq!(fresh.insert("novo", 5), Ok(()));
    assert_eq!(fresh["novo"], 5);
}

#[test]
#[should_panic(expected = "HashTable index")]
fn index_panics_on_missing_key() {
    let t = calendar(3);
    let _ = t["semana"];
}

#[test]
fn iteration_visits_every_entry_once() {
    let t = calendar(4);
    let seen: BTreeMap<&str, i32> = t.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(
        seen,
        BTreeMap::from([("ano", 2077), ("dia", 28), ("mês", 12)])
    );
    assert_eq!(t.keys().len(), 3);
    assert_eq!(t.values().copied().sum::<i32>(), 28 + 12 + 2077);

    let ordered: Vec<&str> = t.keys().copied().collect();
    let owned: Vec<&str> = t.into_iter().map(|(k, _)| k).collect();
    assert_eq!(ordered, owned);
}

#[test]
fn iteration_order_is_slot_then_chain() {
    let t = calendar(5);
    let slots: Vec<usize> = t.keys().map(|k| t.slot_index(k)).collect();
    let mut sorted = slots.clone();
    sorted.sort_unstable();
    assert_eq!(slots, sorted);
}

#[test]
fn cursor_survives_reads_and_fails_after_writes() {
    let mut t = calendar(3);
    let mut c: Cursor = t.cursor();
    let first = t.advance(&mut c).unwrap().map(|(k, _)| *k);
    assert!(first.is_some());
    assert!(t.contains_key("dia"));
    assert!(t.advance(&mut c).is_ok());

    t.remove("dia").unwrap();
    assert_eq!(t.advance(&mut c), Err(Error::ConcurrentModification));

    let mut c = t.cursor();
    let mut n = 0;
    while let Some((k, _)) = t.advance(&mut c).unwrap() {
        assert_ne!(*k, "dia");
        n += 1;
    }
    assert_eq!(n, 2);
    assert!(c.is_done());
}

#[test]
fn cursor_is_bound_to_its_table() {
    let a = calendar(3);
    let b = calendar(3);
    let mut c = a.cursor();
    assert_eq!(b.advance(&mut c), Err(Error::WrongContainer));
    assert!(a.advance(&mut c).unwrap().is_some());

    let mut other = b.cursor();
    assert_eq!(a.advance(&mut other), Err(Error::WrongContainer));
}

#[test]
fn case_insensitive_comparer() {
    #[derive(Clone, Default)]
    struct Folded;
    impl Comparer<str> for Folded {
        fn equals(&self, a: &str, b: &str) -> bool {
            a.eq_ignore_ascii_case(b)
        }
        fn hash(&self, value: &str) -> u64 {
            value.bytes().map(|b| b.to_ascii_lowercase() as u64).sum()
        }
    }
    impl Comparer<String> for Folded {
        fn equals(&self, a: &String, b: &String) -> bool {
            Comparer::<str>::equals(self, a, b)
        }
        fn hash(&self, value: &String) -> u64 {
            Comparer::<str>::hash(self, value)
        }
    }

    let mut t = HashTable::with_capacity_and_comparer(8, Folded).unwrap();
    t.insert("Brazil".to_string(), 20).unwrap();
    assert_eq!(t.get("BRAZIL"), Ok(&20));
    assert_eq!(
        t.insert("brazil".to_string(), 1),
        Err(Error::DuplicateKey)
    );
    assert_eq!(t.remove("bRaZiL"), Ok(20));
}

#[test]
fn closure_comparer_that_never_matches_hides_entries() {
    let off_by_two = FnComparer::new(|a: &i32, b: &i32| *a == *b + 2);
    let mut t = HashTable::with_capacity_and_comparer(1, off_by_two).unwrap();
    t.insert(12, "mês").unwrap();
    assert_eq!(t.try_get(&12), None);
    assert_eq!(t.get(&12), Err(Error::KeyNotFound));
    assert_eq!(t.len(), 1);
}

#[test]
fn clear_keeps_capacity() {
    let mut t = calendar(6);
    t.clear();
    assert!(t.is_empty());
    assert_eq!(t.capacity(), 6);
    assert_eq!(t.iter().count(), 0);
    t.insert("dia", 1).unwrap();
    assert_eq!(t["dia"], 1);
}
