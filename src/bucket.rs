//! Bucket: one slot's chain of entries, linked through a shared arena.
//!
//! Nodes of every chain in a container live in a single `SlotMap`; a
//! bucket only records where its chain starts and ends. Links are
//! generational keys rather than owned pointers, so unlinking a node can
//! never leave a dangling reference behind.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena index of one chained node.
    pub(crate) struct NodeKey;
}

#[derive(Debug)]
pub(crate) struct Node<E> {
    pub(crate) entry: E,
    pub(crate) next: Option<NodeKey>,
}

pub(crate) type Arena<E> = SlotMap<NodeKey, Node<E>>;

/// Head/tail/len of a singly linked chain stored in an [`Arena`].
///
/// Invariants: `len` equals the number of nodes reachable from `head`;
/// `tail` is `None` exactly when the chain is empty, otherwise it is the
/// last reachable node.
#[derive(Debug, Clone)]
pub(crate) struct Bucket {
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    len: usize,
}

impl Bucket {
    /// A chain holding exactly `entry`.
    pub(crate) fn with_entry<E>(arena: &mut Arena<E>, entry: E) -> Self {
        let mut bucket = Bucket {
            head: None,
            tail: None,
            len: 0,
        };
        bucket.push(arena, entry);
        bucket
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn head(&self) -> Option<NodeKey> {
        self.head
    }

    /// Append at the tail in O(1).
    pub(crate) fn push<E>(&mut self, arena: &mut Arena<E>, entry: E) -> NodeKey {
        let key = arena.insert(Node { entry, next: None });
        match self.tail {
            None => self.head = Some(key),
            Some(tail) => {
                arena
                    .get_mut(tail)
                    .expect("bucket tail must be a live node")
                    .next = Some(key);
            }
        }
        self.tail = Some(key);
        self.len += 1;
        key
    }

    /// First node whose entry satisfies `matches`, scanning head to tail.
    pub(crate) fn find<E>(
        &self,
        arena: &Arena<E>,
        mut matches: impl FnMut(&E) -> bool,
    ) -> Option<NodeKey> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = arena.get(k)?;
            if matches(&node.entry) {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    /// Unlink and return the first entry satisfying `matches`.
    ///
    /// Returns `None`, leaving the chain untouched, if nothing matches.
    pub(crate) fn remove_first<E>(
        &mut self,
        arena: &mut Arena<E>,
        mut matches: impl FnMut(&E) -> bool,
    ) -> Option<E> {
        let head = self.head?;

        if self.len == 1 {
            if !matches(&arena.get(head)?.entry) {
                return None;
            }
            self.head = None;
            self.tail = None;
            self.len = 0;
            return arena.remove(head).map(|n| n.entry);
        }

        let mut prev: Option<NodeKey> = None;
        let mut cur = Some(head);
        while let Some(k) = cur {
            let node = arena.get(k)?;
            if matches(&node.entry) {
                let next = node.next;
                match prev {
                    None => self.head = next,
                    Some(p) => {
                        arena
                            .get_mut(p)
                            .expect("predecessor must be a live node")
                            .next = next;
                    }
                }
                if self.tail == Some(k) {
                    self.tail = prev;
                }
                self.len -= 1;
                return arena.remove(k).map(|n| n.entry);
            }
            prev = Some(k);
            cur = node.next;
        }
        None
    }

    /// Forward traversal, head to tail. Restartable: each call begins anew.
    pub(crate) fn iter<'a, E>(&self, arena: &'a Arena<E>) -> ChainIter<'a, E> {
        ChainIter {
            arena,
            next: self.head,
        }
    }

    /// Node keys head to tail; used to detach entries in chain order.
    pub(crate) fn keys<E>(&self, arena: &Arena<E>) -> Vec<NodeKey> {
        let mut out = Vec::with_capacity(self.len);
        let mut cur = self.head;
        while let Some(k) = cur {
            out.push(k);
            cur = arena.get(k).and_then(|n| n.next);
        }
        out
    }
}

/// Entries of one chain in link order.
pub(crate) struct ChainIter<'a, E> {
    arena: &'a Arena<E>,
    next: Option<NodeKey>,
}

impl<'a, E> Iterator for ChainIter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.next?)?;
        self.next = node.next;
        Some(&node.entry)
    }
}
