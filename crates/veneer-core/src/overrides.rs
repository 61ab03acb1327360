//! Variant-scoped override records and the override provider seam.
//!
//! Overrides are instance-scoped patches of style properties that always
//! win over structural sources. Which records apply to a given node is
//! decided outside the engine, behind the [`OverrideProvider`] trait;
//! the engine only consumes the ordered record list it returns.

use std::rc::Rc;

use crate::{
    document::DocumentGraph,
    identifier::Id,
    instance::{InstanceNode, InstanceTree},
};

/// A named alternate configuration scoping which overrides are visible
/// (e.g. a hover or pressed interaction state).
///
/// Opaque to the resolver: it is passed through to the provider and to
/// recursive ancestor resolutions untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    id: Id,
}

impl Variant {
    /// Create a variant from its identifier.
    pub fn new(id: Id) -> Self {
        Self { id }
    }

    /// Get the variant identifier.
    pub fn id(&self) -> Id {
        self.id
    }
}

/// A variant-scoped, instance-scoped patch of style properties.
///
/// Currently one kind exists; the enum leaves room for further override
/// shapes without breaking the provider contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideRecord {
    /// Adds a block of style properties as ordered (key, value) pairs.
    AddStyleBlock {
        /// Ordered property pairs; within one record, later pairs win
        /// per key.
        entries: Vec<(String, String)>,
    },
}

impl OverrideRecord {
    /// Convenience constructor for an add-style-block record.
    pub fn add_style_block<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::AddStyleBlock {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Resolves which override records apply to an instance node.
///
/// The returned list encodes precedence: later records win per key. The
/// engine retains every contributing record for provenance, so providers
/// should not pre-merge records.
///
/// Implementations must behave as pure functions of their arguments:
/// resolution results are memoized without the provider in the key, so a
/// provider whose answers drift for identical inputs will be served stale
/// results from the cache.
pub trait OverrideProvider {
    /// Resolve the ordered override records for `node` under `variant`.
    fn resolve_overrides(
        &self,
        node: &InstanceNode,
        tree: &InstanceTree,
        variant: Option<&Variant>,
        graph: &DocumentGraph,
    ) -> Vec<Rc<OverrideRecord>>;
}

/// A provider that never yields overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideProvider for NoOverrides {
    fn resolve_overrides(
        &self,
        _node: &InstanceNode,
        _tree: &InstanceTree,
        _variant: Option<&Variant>,
        _graph: &DocumentGraph,
    ) -> Vec<Rc<OverrideRecord>> {
        Vec::new()
    }
}
