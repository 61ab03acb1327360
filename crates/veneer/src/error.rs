//! Error types for cascade resolution.
//!
//! Ordinary absence — a missing source node, a deleted mixin, a dangling
//! `extends` target — is never an error; those degrade to no-ops or to an
//! empty result. The one fatal class is a cyclic reference graph, which
//! the resolver detects with explicit visited sets instead of recursing
//! until the stack overflows.

use thiserror::Error;

use veneer_core::identifier::Id;

/// The error type for cascade resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CascadeError {
    /// A cycle was detected in the `extends` chain, the mixin composition
    /// graph, or the instance-tree parent links.
    #[error("cycle detected while resolving styles at node '{node}'")]
    CycleDetected {
        /// The node at which the walk revisited itself.
        node: Id,
    },
}
