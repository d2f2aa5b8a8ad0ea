//! HashSet: bare values over the same chained buckets as `HashTable`,
//! matched by the value itself under the comparer.

use crate::blank::Blank;
use crate::chained::{self, ChainedTable, Cursor, Removal};
use crate::comparer::{Comparer, DefaultComparer};
use crate::error::Error;
use crate::reentrancy::ReentrancyCheck;
use crate::DEFAULT_CAPACITY;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

/// Fixed-capacity collection of values with separate chaining.
///
/// [`insert`](Self::insert) stores a value even when an equal one is
/// already present; each copy occupies its own chain entry and counts
/// towards [`len`](Self::len), and [`remove`](Self::remove) takes out
/// one copy at a time. Use [`insert_unique`](Self::insert_unique) for
/// classic set semantics.
///
/// ```rust
/// use chained_hash::HashSet;
///
/// let mut s = HashSet::with_capacity(4).unwrap();
/// for v in [28, 12, 2077, 7] {
///     s.insert(v).unwrap();
/// }
/// assert_eq!(s.len(), 4);
/// assert!(s.contains(&2077));
/// assert!(!s.remove(&15));
/// ```
pub struct HashSet<T, C = DefaultComparer> {
    core: ChainedTable<T>,
    comparer: C,
    reentrancy: ReentrancyCheck,
}

impl<T> HashSet<T> {
    /// Empty set with [`DEFAULT_CAPACITY`] slots and the default comparer.
    pub fn new() -> Self {
        Self::with_comparer(DefaultComparer::default())
    }

    /// Empty set with `capacity` slots. Fails with
    /// [`Error::InvalidCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_and_comparer(capacity, DefaultComparer::default())
    }
}

impl<T> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> HashSet<T, C> {
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

    /// Number of stored values, counting equal copies separately.
    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    pub fn slot_len(&self, slot: usize) -> usize {
        self.core.chain_len(slot)
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Values in slot-ascending, then chain order.
    ///
    /// The iterator yields at most as many values as the set held when it
    /// was created.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.core.iter(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        Cursor::new(&self.core)
    }

    /// Step `cursor` to the next value; see [`HashTable::advance`].
    ///
    /// [`HashTable::advance`]: crate::HashTable::advance
    pub fn advance<'a>(&'a self, cursor: &mut Cursor) -> Result<Option<&'a T>, Error> {
        cursor.step(&self.core)
    }
}

impl<T, C> HashSet<T, C> {
    pub fn slot_index<Q>(&self, value: &Q) -> usize
    where
        Q: ?Sized,
        C: Comparer<Q>,
    {
        self.core.slot_for(self.comparer.hash(value))
    }

    /// Store `value`, even if an equal value is already present.
    ///
    /// Fails with [`Error::BlankValue`] for a blank value.
    pub fn insert(&mut self, value: T) -> Result<(), Error>
    where
        T: Blank,
        C: Comparer<T>,
    {
        let _g = self.reentrancy.enter();
        if value.is_blank() {
            return Err(Error::BlankValue);
        }
        let slot = self.core.slot_for(self.comparer.hash(&value));
        self.core.push(slot, value);
        Ok(())
    }

    /// Store `value` unless an equal value is present.
    ///
    /// Returns `Ok(false)`, dropping `value`, when it is already in the set.
    pub fn insert_unique(&mut self, value: T) -> Result<bool, Error>
    where
        T: Blank,
        C: Comparer<T>,
    {
        let _g = self.reentrancy.enter();
        if value.is_blank() {
            return Err(Error::BlankValue);
        }
        let slot = self.core.slot_for(self.comparer.hash(&value));
        let comparer = &self.comparer;
        if self
            .core
            .find(slot, |v| comparer.equals(v, &value))
            .is_some()
        {
            return Ok(false);
        }
        self.core.push(slot, value);
        Ok(true)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        self.get(value).is_some()
    }

    /// First stored value equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let _g = self.reentrancy.enter();
        let slot = self.slot_index(value);
        self.core
            .find(slot, |v| Comparer::<Q>::equals(&self.comparer, v.borrow(), value))
    }

    /// Number of stored copies equal to `value`.
    pub fn count_of<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let _g = self.reentrancy.enter();
        let slot = self.slot_index(value);
        self.core
            .chain(slot)
            .filter(|v| Comparer::<Q>::equals(&self.comparer, (*v).borrow(), value))
            .count()
    }

    /// Remove one copy of `value`; returns whether anything was removed.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        self.take(value).is_some()
    }

    /// Remove and return one copy of `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparer<Q>,
    {
        let _g = self.reentrancy.enter();
        let slot = self.core.slot_for(self.comparer.hash(value));
        let comparer = &self.comparer;
        match self
            .core
            .remove(slot, |v| Comparer::<Q>::equals(comparer, v.borrow(), value))
        {
            Removal::Removed(v) => Some(v),
            Removal::Unpopulated | Removal::Absent => None,
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for HashSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Values of a [`HashSet`] in slot/chain order.
pub struct Iter<'a, T> {
    inner: chained::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct IntoIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T, C> IntoIterator for HashSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            inner: self.core.drain_ordered().into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a HashSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
