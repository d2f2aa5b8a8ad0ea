//! Debug-only detection of comparer reentrancy.
//!
//! Containers call user code (`Comparer::equals`/`hash`) while walking a
//! chain. A comparer that reaches back into the same container would
//! observe it mid-operation, so debug builds panic on nested entry.
//! Release builds carry only a zero-sized marker.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

/// Per-container nesting tracker; also keeps the owner `!Send + !Sync`.
#[derive(Debug)]
pub(crate) struct ReentrancyCheck {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    _single_thread: PhantomData<*mut ()>,
}

impl ReentrancyCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Mark the start of an operation. Debug builds panic if one is
    /// already in progress on this container.
    #[inline]
    pub(crate) fn enter(&self) -> EntryGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "reentrancy detected: comparer re-entered the container it is probing"
            );
            EntryGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            EntryGuard { _owner: PhantomData }
        }
    }
}

/// Clears the in-progress flag on drop.
pub(crate) struct EntryGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ReentrancyCheck,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a ()>,
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let was = self.owner.active.replace(false);
            debug_assert!(was);
        }
    }
}
