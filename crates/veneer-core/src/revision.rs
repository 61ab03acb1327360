//! Globally unique snapshot stamps.
//!
//! Every structural mutation of a [`crate::document::DocumentGraph`] or
//! [`crate::instance::InstanceTree`] stamps the structure with a fresh
//! value from one shared monotonic counter. Clones and new structures
//! draw fresh stamps too, so no two distinct states ever share one. This
//! makes the stamp a sound memoization key on its own: equal stamps imply
//! the same object in the same state.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT: AtomicU64 = AtomicU64::new(1);

/// Returns a stamp distinct from every stamp handed out before.
pub(crate) fn next_revision() -> u64 {
    NEXT.fetch_add(1, Ordering::Relaxed)
}
