//! Error kinds raised by the chained containers.

use thiserror::Error;

/// Failure of a single container operation.
///
/// Every operation either completes or fails before touching the
/// structure, so an `Err` never leaves a container half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A container was constructed with zero slots.
    #[error("capacity must be positive")]
    InvalidCapacity,
    /// A table key was blank (empty string, `None`, ...).
    #[error("key must not be blank")]
    BlankKey,
    /// A set value was blank (empty string, `None`, ...).
    #[error("value must not be blank")]
    BlankValue,
    /// The key is already registered in the table.
    #[error("key is already present in the table")]
    DuplicateKey,
    /// Lookup on a table that holds no entries at all.
    #[error("table has no entries")]
    EmptyTable,
    /// The key's chain holds no matching entry.
    #[error("no entry for the given key")]
    KeyNotFound,
    /// Removal targeted a slot that has no bucket.
    #[error("key was never inserted: slot {slot} is unpopulated")]
    UnpopulatedSlot {
        /// Slot the key hashed to.
        slot: usize,
    },
    /// A cursor was stepped after the container was structurally modified.
    #[error("container was modified while a cursor was traversing it")]
    ConcurrentModification,
    /// A cursor was stepped on a container other than the one it was
    /// created for.
    #[error("cursor belongs to a different container")]
    WrongContainer,
}

impl Error {
    /// Returns `true` for the "key absent" family of errors.
    ///
    /// These are expected control flow, unlike argument errors, which
    /// signal a caller bug.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::EmptyTable | Error::KeyNotFound | Error::UnpopulatedSlot { .. }
        )
    }
}
