//! chained-hash: fixed-capacity hash containers using separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a key/value table and a value set that share one chaining
//!   core, so bucket and traversal invariants live in a single place.
//! - Layers:
//!   - Bucket: head/tail/len of one slot's singly linked chain. Nodes
//!     live in an arena (`slotmap::SlotMap`) and link to each other by
//!     generational key.
//!   - ChainedTable<E>: fixed slot array of optional buckets plus the
//!     shared arena. Creates a bucket on the first insert into a slot and
//!     clears the slot when its last entry leaves. Owns the traversal
//!     state machine (slot index, node key) -> next position.
//!   - HashTable<K, V, C> / HashSet<T, C>: public API. Compute the slot
//!     through a `Comparer`, enforce key/value policy (blank rejection,
//!     duplicate keys), and map structural outcomes onto [`Error`].
//!
//! Constraints
//! - Single-threaded: containers are `!Send`/`!Sync`.
//! - Capacity (slot count) is fixed at construction; there is no
//!   rehashing, so an undersized table degrades to long chains.
//! - Slot of a key is `comparer.hash(key) % capacity`.
//! - Total length equals the sum of chain lengths; no slot ever holds an
//!   empty bucket.
//!
//! Policies
//! - HashTable rejects a duplicate key wherever the existing key sits in
//!   its chain.
//! - HashSet::insert stores equal values as separate entries (multiset
//!   behavior); HashSet::insert_unique gives classic set semantics.
//! - Expected misses use `Option`/`bool` (`try_get`, `contains`,
//!   `HashSet::remove`); `HashTable::get`/`remove` report them as errors.
//!
//! Enumeration
//! - Borrowing iterators visit slots in ascending order and each chain
//!   head to tail, and never yield more than the length at creation.
//! - A detached [`Cursor`] may outlive mutations of its container;
//!   stepping it after a structural change fails with
//!   [`Error::ConcurrentModification`].
//! - A cursor is bound to the container that created it; any other
//!   container rejects it with [`Error::WrongContainer`].
//!
//! Reentrancy
//! - Comparers are user code run while a chain is being walked. Debug
//!   builds panic if a comparer re-enters the container it is serving.
//!
//! Features
//! - `tracing`: trace-level events for construction, bucket creation and
//!   release, and `clear`.

#[macro_use]
mod trace;

mod blank;
mod bucket;
mod chained;
mod comparer;
mod convert;
mod error;
pub mod hash_set;
pub mod hash_table;
mod reentrancy;

#[cfg(test)]
mod chained_proptest;

/// Slot count used when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 10;

// Public surface
pub use blank::Blank;
pub use chained::Cursor;
pub use comparer::{Comparer, DefaultComparer, FnComparer};
pub use convert::CollectExt;
pub use error::Error;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
