//! ChainedTable: the structural layer shared by `HashTable` and `HashSet`.
//!
//! Owns a fixed array of slots, each holding at most one non-empty
//! [`Bucket`], plus the arena all chain nodes live in. It knows nothing
//! about keys or comparers: callers pick the slot and pass a match
//! predicate, which keeps the structural invariants in one place.
//!
//! Invariants
//! - `slots.len()` is fixed at construction and never zero.
//! - A slot is `Some` iff its bucket is non-empty.
//! - Total length (`arena.len()`) equals the sum of bucket lengths.
//! - `version` changes on every structural mutation.
//! - `id` is unique per table for the life of the process.
//!
//! Traversal is expressed as a transition function over [`Position`]s
//! (slot index, node key): `first` finds the first occupied position,
//! `advance` steps along the chain and, at its end, skips empty slots
//! to the next bucket. Borrowing iterators and detached cursors are both
//! thin wrappers over that function.

use crate::bucket::{Arena, Bucket, Node, NodeKey};
use crate::error::Error;
use core::iter::FusedIterator;
use core::sync::atomic::{AtomicU64, Ordering};

/// Source of container identities; a cursor records the one it was made
/// for.
static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(0);

/// Where a traversal stands: a live node inside a given slot's chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) slot: usize,
    pub(crate) node: NodeKey,
}

/// Outcome of a removal attempt.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Removal<E> {
    Removed(E),
    /// The slot has no bucket at all.
    Unpopulated,
    /// The slot's chain holds no matching entry.
    Absent,
}

pub(crate) struct ChainedTable<E> {
    slots: Box<[Option<Bucket>]>,
    arena: Arena<E>,
    version: u64,
    id: u64,
}

impl<E> ChainedTable<E> {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        chain_trace!(capacity, "chained table created");
        Ok(Self {
            slots: (0..capacity).map(|_| None).collect(),
            arena: Arena::with_key(),
            version: 0,
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Slot for a hash code.
    #[inline]
    pub(crate) fn slot_for(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// Number of entries chained at `slot`; zero for an unpopulated or
    /// out-of-range slot.
    pub(crate) fn chain_len(&self, slot: usize) -> usize {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .map_or(0, Bucket::len)
    }

    /// Entries chained at `slot`, head to tail.
    pub(crate) fn chain(&self, slot: usize) -> impl Iterator<Item = &E> + '_ {
        self.slots[slot]
            .as_ref()
            .into_iter()
            .flat_map(move |b| b.iter(&self.arena))
    }

    pub(crate) fn find(&self, slot: usize, matches: impl FnMut(&E) -> bool) -> Option<&E> {
        let key = self.slots[slot].as_ref()?.find(&self.arena, matches)?;
        self.arena.get(key).map(|n| &n.entry)
    }

    pub(crate) fn find_mut(
        &mut self,
        slot: usize,
        matches: impl FnMut(&E) -> bool,
    ) -> Option<&mut E> {
        let key = self.slots[slot].as_ref()?.find(&self.arena, matches)?;
        self.arena.get_mut(key).map(|n| &mut n.entry)
    }

    /// Append `entry` to the chain at `slot`, creating the bucket on
    /// first use.
    pub(crate) fn push(&mut self, slot: usize, entry: E) {
        match self.slots[slot].as_mut() {
            Some(bucket) => {
                bucket.push(&mut self.arena, entry);
            }
            None => {
                self.slots[slot] = Some(Bucket::with_entry(&mut self.arena, entry));
                chain_trace!(slot, "bucket created");
            }
        }
        self.version = self.version.wrapping_add(1);
        self.debug_check();
    }

    /// Unlink the first entry at `slot` satisfying `matches`; clears the
    /// slot when its chain empties.
    pub(crate) fn remove(&mut self, slot: usize, matches: impl FnMut(&E) -> bool) -> Removal<E> {
        let Some(bucket) = self.slots[slot].as_mut() else {
            return Removal::Unpopulated;
        };
        let Some(entry) = bucket.remove_first(&mut self.arena, matches) else {
            return Removal::Absent;
        };
        if bucket.is_empty() {
            self.slots[slot] = None;
            chain_trace!(slot, "bucket released");
        }
        self.version = self.version.wrapping_add(1);
        self.debug_check();
        Removal::Removed(entry)
    }

    pub(crate) fn clear(&mut self) {
        chain_trace!(len = self.arena.len(), "chained table cleared");
        self.slots.iter_mut().for_each(|s| *s = None);
        self.arena.clear();
        self.version = self.version.wrapping_add(1);
    }

    /// First occupied position at or after slot `from`.
    pub(crate) fn seek(&self, from: usize) -> Option<Position> {
        self.slots
            .iter()
            .enumerate()
            .skip(from)
            .find_map(|(slot, b)| {
                b.as_ref()
                    .and_then(Bucket::head)
                    .map(|node| Position { slot, node })
            })
    }

    pub(crate) fn first(&self) -> Option<Position> {
        self.seek(0)
    }

    /// Position following `pos`: the next link in the same chain, or the
    /// head of the next occupied slot. A node that is no longer live is
    /// treated as the end of its chain.
    pub(crate) fn advance(&self, pos: Position) -> Option<Position> {
        match self.arena.get(pos.node).and_then(|n| n.next) {
            Some(node) => Some(Position {
                slot: pos.slot,
                node,
            }),
            None => self.seek(pos.slot + 1),
        }
    }

    pub(crate) fn entry_at(&self, pos: Position) -> Option<&E> {
        self.arena.get(pos.node).map(|n| &n.entry)
    }

    pub(crate) fn iter(&self) -> Iter<'_, E> {
        Iter {
            table: self,
            next: self.first(),
            remaining: self.len(),
        }
    }

    /// Entries in arena order, mutably.
    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, E> {
        IterMut {
            it: self.arena.values_mut(),
        }
    }

    /// Detach every entry in slot/chain order, leaving the table empty.
    pub(crate) fn drain_ordered(&mut self) -> Vec<E> {
        let order: Vec<NodeKey> = self
            .slots
            .iter()
            .flatten()
            .flat_map(|b| b.keys(&self.arena))
            .collect();
        let out = order
            .into_iter()
            .filter_map(|k| self.arena.remove(k).map(|n| n.entry))
            .collect();
        self.clear();
        out
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert_eq!(
            self.slots.iter().flatten().map(Bucket::len).sum::<usize>(),
            self.arena.len(),
            "total length must equal the sum of bucket lengths"
        );
        debug_assert!(
            self.slots.iter().flatten().all(|b| !b.is_empty()),
            "an empty bucket must not stay in its slot"
        );
    }
}

/// Borrowing traversal in slot-ascending, then chain order.
///
/// Yields at most as many entries as the table held when the iterator
/// was created.
pub(crate) struct Iter<'a, E> {
    table: &'a ChainedTable<E>,
    next: Option<Position>,
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pos = self.next?;
        self.next = self.table.advance(pos);
        self.remaining -= 1;
        self.table.entry_at(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
impl<E> FusedIterator for Iter<'_, E> {}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

/// Mutable traversal in arena order, not slot order.
pub(crate) struct IterMut<'a, E> {
    it: slotmap::basic::ValuesMut<'a, NodeKey, Node<E>>,
}

impl<'a, E> Iterator for IterMut<'a, E> {
    type Item = &'a mut E;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|n| &mut n.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CursorState {
    Start,
    At(Position),
    Done,
}

/// Detached enumeration state over a `HashTable` or `HashSet`.
///
/// A cursor holds no borrow, so the container may be mutated while one
/// exists. Stepping it afterwards fails with
/// [`Error::ConcurrentModification`] instead of reading a chain that
/// changed underneath it. Obtain one with `cursor()` on the container and
/// step it with the container's `advance`; stepping it on any other
/// container fails with [`Error::WrongContainer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    state: CursorState,
    owner: u64,
    version: u64,
    total: usize,
    yielded: usize,
}

impl Cursor {
    pub(crate) fn new<E>(table: &ChainedTable<E>) -> Self {
        Self {
            state: CursorState::Start,
            owner: table.id(),
            version: table.version(),
            total: table.len(),
            yielded: 0,
        }
    }

    /// Rewind to before the first entry. The modification check still
    /// refers to the state the cursor was created for.
    pub fn reset(&mut self) {
        self.state = CursorState::Start;
        self.yielded = 0;
    }

    /// Returns `true` once the traversal has run off the end.
    pub fn is_done(&self) -> bool {
        self.state == CursorState::Done
    }

    pub(crate) fn step<'a, E>(
        &mut self,
        table: &'a ChainedTable<E>,
    ) -> Result<Option<&'a E>, Error> {
        if table.id() != self.owner {
            return Err(Error::WrongContainer);
        }
        if table.version() != self.version {
            return Err(Error::ConcurrentModification);
        }
        let next = match self.state {
            CursorState::Done => return Ok(None),
            _ if self.yielded == self.total => None,
            CursorState::Start => table.first(),
            CursorState::At(pos) => table.advance(pos),
        };
        match next {
            Some(pos) => {
                self.state = CursorState::At(pos);
                self.yielded += 1;
                Ok(table.entry_at(pos))
            }
            None => {
                self.state = CursorState::Done;
                Ok(None)
            }
        }
    }
}
