//! HashTable: unique keys mapped to values over a fixed array of chained
//! buckets.

use crate::blank::Blank;
use crate::chained::{self, ChainedTable, Cursor, Removal};
use crate::comparer::{Comparer, DefaultComparer};
use crate::error::Error;
use crate::reentrancy::ReentrancyCheck;
use crate::DEFAULT_CAPACITY;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity map from unique keys to values, resolving collisions
/// by separate chaining.
///
/// A key's slot is `comparer.hash(key) % capacity`; colliding keys are
/// appended to that slot's chain. The capacity is chosen at construction
/// and never changes, so long chains are the price of an undersized
/// table.
///
/// ```rust
/// use chained_hash::HashTable;
///
/// let mut t = HashTable::with_capacity(1).unwrap();
/// t.insert("dia".to_string(), 28).unwrap();
/// t.insert("mês".to_string(), 12).unwrap();
/// t.insert("ano".to_string(), 2077).unwrap();
///
/// assert_eq!(t.try_get("ano"), Some(&2077));
/// assert_eq!(t.len(), 3);
/// assert_eq!(t.remove("ano"), Ok(2077));
/// assert_eq!(t.try_get("ano"), None);
/// ```
pub struct HashTable<K, V, C = DefaultComparer> {
    core: ChainedTable<Entry<K, V>>,
    comparer: C,
    reentrancy: ReentrancyCheck,
}

impl<K, V> HashTable<K, V> {
    /// Empty table with [`DEFAULT_CAPACITY`] slots and the default comparer.
    pub fn new() -> Self {
        Self::with_comparer(DefaultComparer::default())
    }

    /// Empty table with `capacity` slots. Fails with
    /// [`Error::InvalidCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_and_comparer(capacity, DefaultComparer::default())
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> HashTable<K, V, C> {
    pub fn with_comparer(comparer: C) -> Self {
        Self::with_capacity_and_comparer(DEFAULT_CAPACITY, comparer)
            .expect("default capacity must be positive")
    }

    pub fn with_capacity_and_comparer(capacity: usize, comparer: C) -> Result<Self, Error> {
        Ok(Self {
            core: ChainedTable::with_capacity(capacity)?,
            comparer,
            reentrancy: ReentrancyCheck::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Number of slots; fixed for the table's lifetime.
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Number of entries chained in `slot`.
    pub fn slot_len(&self, slot: usize) -> usize {
        self.core.chain_len(slot)
    }

    /// Remove every entry; the capacity is kept.
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Entries in slot-ascending, then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.core.iter(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Values in the same order as [`iter`](Self::iter).
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Entries with mutable values, in unspecified order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.core.iter_mut(),
        }
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.iter_mut().map(|(_, v)| v)
    }

    /// Detached enumerator positioned before the first entry.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(&self.core)
    }

    /// Step `cursor` to the next entry.
    ///
    /// Returns `Ok(None)` at the end,
    /// [`Error::ConcurrentModification`] if the table was structurally
    /// modified since the cursor was created, and
    /// [`Error::WrongContainer`] if the cursor came from another container.
    pub fn advance<'a>(&'a self, cursor: &mut Cursor) -> Result<Option<(&'a K, &'a V)>, Error> {
        Ok(cursor.step(&self.core)?.map(|e| (&e.key, &e.value)))
    }
}

impl<K, V, C> HashTable<K, V, C> {
    /// Slot `key` maps to under this table's comparer.
    pub fn slot_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized,
        C: Comparer<Q>,
    {
        self.core.slot_for(self.comparer.hash(key))
    }

    /// Insert `key -> value`.
    ///
    /// Fails with [`Error::BlankKey`] for a blank key and with
    /// [`Error::DuplicateKey`] if an equal key (under the comparer) is
    /// anywhere in the table; the table is unchanged on failure.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), Error>
    where
        K: Blank,
        C: Comparer<K>,
    {
        let _g = self.reentrancy.enter();
        if key.is_blank() {
            return Err(Error::BlankKey);
        }
        let slot = self.core.slot_for(self.comparer.hash(&key));
        let comparer = &self.comparer;
        if self
            .core
            .find(slot, |e| comparer.equals(&e.key, &key))
            .is_some()
        {
            return Err(Error::DuplicateKey);
        }
        self.core.push(slot, Entry { key, value });
        Ok(())
    }

    fn lookup<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let slot = self.slot_index(key);
        self.core
            .find(slot, |e| Comparer::<Q>::equals(&self.comparer, e.key.borrow(), key))
    }

    /// Value for `key`, or `None`. Never fails.
    pub fn try_get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let _g = self.reentrancy.enter();
        self.lookup(key).map(|e| &e.value)
    }

    pub fn try_get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let _g = self.reentrancy.enter();
        let slot = self.core.slot_for(self.comparer.hash(key));
        let comparer = &self.comparer;
        self.core
            .find_mut(slot, |e| Comparer::<Q>::equals(comparer, e.key.borrow(), key))
            .map(|e| &mut e.value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let _g = self.reentrancy.enter();
        self.lookup(key).map(|e| (&e.key, &e.value))
    }

    /// Value for `key`.
    ///
    /// Fails with [`Error::EmptyTable`] if the table holds nothing and
    /// with [`Error::KeyNotFound`] if the key is absent.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let _g = self.reentrancy.enter();
        if self.core.is_empty() {
            return Err(Error::EmptyTable);
        }
        self.lookup(key)
            .map(|e| &e.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Mutable value for `key`; fails like [`get`](Self::get).
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        if self.core.is_empty() {
            return Err(Error::EmptyTable);
        }
        self.try_get_mut(key).ok_or(Error::KeyNotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let _g = self.reentrancy.enter();
        self.lookup(key).is_some()
    }

    /// Remove `key` and return its value.
    ///
    /// Fails with [`Error::UnpopulatedSlot`] if nothing was ever chained
    /// in the key's slot, and with [`Error::KeyNotFound`] if the slot's
    /// chain has no match.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V), Error>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let _g = self.reentrancy.enter();
        let slot = self.core.slot_for(self.comparer.hash(key));
        let comparer = &self.comparer;
        match self
            .core
            .remove(slot, |e| Comparer::<Q>::equals(comparer, e.key.borrow(), key))
        {
            Removal::Removed(e) => Ok((e.key, e.value)),
            Removal::Unpopulated => Err(Error::UnpopulatedSlot { slot }),
            Removal::Absent => Err(Error::KeyNotFound),
        }
    }
}

impl<K, V, C, Q> Index<&Q> for HashTable<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparer<Q>,
{
    type Output = V;

    /// Panics if the key is absent; see [`HashTable::get`].
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(v) => v,
            Err(e) => panic!("HashTable index: {e}"),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for HashTable<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Entries of a [`HashTable`] in slot/chain order.
pub struct Iter<'a, K, V> {
    inner: chained::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Entries with mutable values, in arena order.
pub struct IterMut<'a, K, V> {
    inner: chained::IterMut<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &mut e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owned entries in slot/chain order.
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, C> IntoIterator for HashTable<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            inner: self.core.drain_ordered().into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a HashTable<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut HashTable<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
