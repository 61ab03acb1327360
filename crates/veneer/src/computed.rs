//! The resolved style result and its provenance maps.

use std::rc::Rc;

use indexmap::IndexMap;

use veneer_core::{
    document::{DocumentGraph, StyleMap},
    identifier::Id,
    overrides::OverrideRecord,
};

/// Where a resolved property value came from.
///
/// Ordered here from strongest to weakest source; see
/// [`ComputedStyle::source_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSource {
    /// A variant-scoped override record.
    Override,
    /// Inherited from an ancestor instance.
    Inherited,
    /// Declared directly on the node.
    OwnStyle,
    /// Contributed by a style mixin.
    Mixin,
    /// A structural default from the `extends` chain.
    ParentDefault,
}

/// The effective style of an instance node plus per-property provenance.
///
/// `style` is the final merged property map. The three provenance maps
/// record which mixin defines each property (including properties later
/// shadowed by stronger sources), every override record contributing to a
/// property in provider order, and the ancestor each inherited property
/// was copied from.
#[derive(Debug, Clone)]
pub struct ComputedStyle {
    source_id: Id,
    style: StyleMap,
    mixin_map: IndexMap<String, Id>,
    override_map: IndexMap<String, Vec<Rc<OverrideRecord>>>,
    inheritance_map: IndexMap<String, Id>,
}

impl ComputedStyle {
    /// Assemble a computed style from the cascade's accumulated state.
    pub(crate) fn new(
        source_id: Id,
        style: StyleMap,
        mixin_map: IndexMap<String, Id>,
        override_map: IndexMap<String, Vec<Rc<OverrideRecord>>>,
        inheritance_map: IndexMap<String, Id>,
    ) -> Self {
        Self {
            source_id,
            style,
            mixin_map,
            override_map,
            inheritance_map,
        }
    }

    /// Get the id of the source document node that was resolved.
    pub fn source_id(&self) -> Id {
        self.source_id
    }

    /// Borrow the effective property map.
    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    /// Borrow the property → defining-mixin map.
    pub fn mixin_map(&self) -> &IndexMap<String, Id> {
        &self.mixin_map
    }

    /// Borrow the property → contributing-override-records map.
    pub fn override_map(&self) -> &IndexMap<String, Vec<Rc<OverrideRecord>>> {
        &self.override_map
    }

    /// Borrow the property → inherited-from-ancestor map.
    pub fn inheritance_map(&self) -> &IndexMap<String, Id> {
        &self.inheritance_map
    }

    /// Classify where the effective value of `key` came from.
    ///
    /// Returns `None` when the property is absent from the resolved style.
    /// Needs the graph to distinguish a declared own value from a mixin
    /// contribution: the mixin map deliberately keeps entries for
    /// properties the node itself shadows.
    pub fn source_of(&self, key: &str, graph: &DocumentGraph) -> Option<StyleSource> {
        if !self.style.contains_key(key) {
            return None;
        }
        if self.override_map.contains_key(key) {
            return Some(StyleSource::Override);
        }
        if self.inheritance_map.contains_key(key) {
            return Some(StyleSource::Inherited);
        }
        let declared_own = graph
            .lookup(self.source_id)
            .is_some_and(|node| node.style().contains_key(key));
        if declared_own {
            return Some(StyleSource::OwnStyle);
        }
        if self.mixin_map.contains_key(key) {
            return Some(StyleSource::Mixin);
        }
        Some(StyleSource::ParentDefault)
    }
}
