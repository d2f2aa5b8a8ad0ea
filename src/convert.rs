//! Building tables and sets from arbitrary sequences.
//!
//! These helpers only call the containers' ordinary `insert`; the first
//! failing insert aborts the conversion and its error is returned.

use crate::blank::Blank;
use crate::comparer::Comparer;
use crate::error::Error;
use crate::hash_set::HashSet;
use crate::hash_table::HashTable;
use crate::DEFAULT_CAPACITY;

/// Conversions from any `IntoIterator` into the chained containers.
///
/// ```rust
/// use chained_hash::CollectExt;
///
/// let ranks = [("Brazil", 20), ("Canada", 15), ("Korea", 2)];
/// let by_name = ranks.to_hash_table_with(|r| r.0, |r| r.1).unwrap();
/// assert_eq!(by_name.get("Korea"), Ok(&2));
/// ```
pub trait CollectExt: IntoIterator + Sized {
    /// Table of the items keyed by `key_of(&item)`, with
    /// [`DEFAULT_CAPACITY`] slots.
    fn to_hash_table<K, F>(self, key_of: F) -> Result<HashTable<K, Self::Item>, Error>
    where
        K: Blank,
        F: FnMut(&Self::Item) -> K,
        crate::DefaultComparer: Comparer<K>,
    {
        self.to_hash_table_with(key_of, |item| item)
    }

    /// Table mapping `key_of(&item)` to `value_of(item)`.
    fn to_hash_table_with<K, V, F, G>(
        self,
        mut key_of: F,
        mut value_of: G,
    ) -> Result<HashTable<K, V>, Error>
    where
        K: Blank,
        F: FnMut(&Self::Item) -> K,
        G: FnMut(Self::Item) -> V,
        crate::DefaultComparer: Comparer<K>,
    {
        let mut table = HashTable::with_capacity(DEFAULT_CAPACITY)?;
        for item in self {
            let key = key_of(&item);
            table.insert(key, value_of(item))?;
        }
        Ok(table)
    }

    /// Set of the items, keeping equal items as separate entries.
    fn to_hash_set(self) -> Result<HashSet<Self::Item>, Error>
    where
        Self::Item: Blank,
        crate::DefaultComparer: Comparer<Self::Item>,
    {
        let mut set = HashSet::with_capacity(DEFAULT_CAPACITY)?;
        for item in self {
            set.insert(item)?;
        }
        Ok(set)
    }
}

impl<I: IntoIterator> CollectExt for I {}
