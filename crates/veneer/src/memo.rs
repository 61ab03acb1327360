//! Memoization of resolution results.
//!
//! Resolution is a pure function of (instance id, tree revision, variant,
//! graph revision, option shape), so identical input tuples share one
//! cached result. Keying is by snapshot identity — the revision stamps on
//! the graph and tree — never by deep equality. Stamps are globally
//! unique (mutation and clone both draw from one shared counter), so
//! equal stamps always mean the same object in the same state; forked
//! copy-on-write documents can never collide in the cache.
//!
//! The key does not include the override provider. The provider must be
//! a pure function of (node, tree, variant, graph) and must stay the same
//! for the lifetime of a cache; swap providers only with a fresh or
//! cleared cache, or stale override results will be served.
//!
//! The cache is owned by whichever component performs resolution (the
//! [`crate::StyleEngine`] facade by default) and is not thread-safe;
//! sharing one across threads requires external serialization.

use std::{fmt, num::NonZeroUsize, rc::Rc};

use lru::LruCache;

use veneer_core::identifier::Id;

use crate::computed::ComputedStyle;

/// The identity of one resolution input tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct MemoKey {
    instance: Id,
    tree_revision: u64,
    variant: Option<Id>,
    graph_revision: u64,
    options: u8,
}

impl MemoKey {
    pub(crate) fn new(
        instance: Id,
        tree_revision: u64,
        variant: Option<Id>,
        graph_revision: u64,
        options: u8,
    ) -> Self {
        Self {
            instance,
            tree_revision,
            variant,
            graph_revision,
            options,
        }
    }
}

/// A bounded LRU cache of resolution results.
pub struct MemoCache {
    entries: LruCache<MemoKey, Rc<ComputedStyle>>,
}

impl fmt::Debug for MemoCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .finish()
    }
}

impl MemoCache {
    /// Create a cache holding at most `capacity` results.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Look up a cached result, promoting it to most recently used.
    pub(crate) fn get(&mut self, key: &MemoKey) -> Option<Rc<ComputedStyle>> {
        self.entries.get(key).cloned()
    }

    /// Store a result, evicting the least recently used entry when full.
    pub(crate) fn insert(&mut self, key: MemoKey, value: Rc<ComputedStyle>) {
        self.entries.put(key, value);
    }

    /// Returns the number of cached results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no results.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached result.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
