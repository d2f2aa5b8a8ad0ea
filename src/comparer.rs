//! Pluggable equality and hashing.
//!
//! A container resolves its comparer once, at construction, and routes
//! every match and every slot computation through it. The hash must be a
//! pure function of the value under the comparer's equality; a comparer
//! whose equality diverges from its hash is accepted, the caller just
//! gets more collisions (or misses).

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Equality and hash-code capability for `T`.
pub trait Comparer<T: ?Sized> {
    /// Returns `true` if `a` and `b` denote the same key.
    fn equals(&self, a: &T, b: &T) -> bool;
    /// Hash code of `item`; equal items must hash alike.
    fn hash(&self, item: &T) -> u64;
}

/// Comparer using `T: Eq` and a `BuildHasher` over `T: Hash`.
///
/// Implemented for every `T: ?Sized + Hash + Eq`, so a table storing
/// `String` keys can be probed with `&str`.
#[derive(Clone, Debug, Default)]
pub struct DefaultComparer<S = DefaultHashBuilder> {
    hasher: S,
}

impl<S> DefaultComparer<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<T, S> Comparer<T> for DefaultComparer<S>
where
    T: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn hash(&self, item: &T) -> u64 {
        self.hasher.hash_one(item)
    }
}

/// Comparer with closure-defined equality and natural hashing.
///
/// ```rust
/// use chained_hash::{FnComparer, HashSet};
///
/// let ci = FnComparer::new(|a: &String, b: &String| a.eq_ignore_ascii_case(b));
/// let mut set = HashSet::with_capacity_and_comparer(1, ci).unwrap();
/// set.insert("Brazil".to_string()).unwrap();
/// // Single slot: every value collides, so the custom equality decides.
/// assert!(set.contains(&"BRAZIL".to_string()));
/// ```
#[derive(Clone)]
pub struct FnComparer<E, S = DefaultHashBuilder> {
    eq: E,
    hasher: S,
}

impl<E> FnComparer<E> {
    pub fn new(eq: E) -> Self {
        Self {
            eq,
            hasher: DefaultHashBuilder::default(),
        }
    }
}

impl<E, S> FnComparer<E, S> {
    pub fn with_hasher(eq: E, hasher: S) -> Self {
        Self { eq, hasher }
    }
}

impl<E, S: core::fmt::Debug> core::fmt::Debug for FnComparer<E, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnComparer")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl<T, E, S> Comparer<T> for FnComparer<E, S>
where
    T: ?Sized + Hash,
    E: Fn(&T, &T) -> bool,
    S: BuildHasher,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    #[inline]
    fn hash(&self, item: &T) -> u64 {
        self.hasher.hash_one(item)
    }
}
