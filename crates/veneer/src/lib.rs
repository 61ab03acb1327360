//! Veneer - A style cascade resolution engine for document-graph design tools.
//!
//! Given a node in a rendered instance tree, the engine computes the
//! node's effective set of visual style properties by composing five
//! layered sources of truth: structural component defaults, the node's
//! own declared properties, reusable style mixins, variant-scoped
//! overrides, and tree-based property inheritance from ancestors. The
//! result carries full provenance maps, so a consumer can tell per
//! property whether its value came from the node itself, a mixin, an
//! override, or inheritance.

pub mod config;
pub mod query;

mod cascade;
mod computed;
mod error;
mod memo;
mod mixin;

pub use veneer_core::{document, identifier, instance, overrides, property};

pub use cascade::resolve;
pub use computed::{ComputedStyle, StyleSource};
pub use error::CascadeError;
pub use memo::MemoCache;
pub use mixin::{expand as expand_mixins, mixin_map_style};

use std::rc::Rc;

use log::info;

use veneer_core::{
    document::{DocumentGraph, StyleMap},
    identifier::Id,
    instance::InstanceTree,
    overrides::{OverrideProvider, Variant},
    property::TEXT_PROPERTIES,
};

use config::{EngineConfig, ResolveOptions};

/// The cascade resolution engine: resolver plus its owned memo cache.
///
/// Resolution is a pure function of its inputs, so the engine memoizes
/// results keyed by snapshot identity (instance id, tree revision,
/// variant, graph revision, option shape) with bounded least-recently-used
/// eviction. The override provider is not part of that key: it must be a
/// pure function of (node, tree, variant, graph), and one engine must be
/// used with one provider; switching providers requires [`Self::clear_cache`]
/// or a new engine, or cached results from the old provider will be
/// served. The engine is deliberately single-threaded; wrap it in a lock
/// if it must be shared.
///
/// # Examples
///
/// ```
/// use veneer::{StyleEngine, document::{DocumentGraph, DocumentNode, ElementNode},
///     identifier::Id, instance::{InstanceNode, InstanceTree}, overrides::NoOverrides};
///
/// let mut graph = DocumentGraph::new();
/// let source = Id::new("doc-button");
/// let style = [("color".to_string(), "red".to_string())].into_iter().collect();
/// graph.insert(DocumentNode::element(source, ElementNode::new(style, vec![], None)));
///
/// let mut tree = InstanceTree::new();
/// let instance = Id::new("ins-button");
/// tree.insert(InstanceNode::new(instance, source, true), None);
///
/// let mut engine = StyleEngine::default();
/// let computed = engine
///     .resolve(instance, &tree, None, &graph, &NoOverrides)
///     .expect("acyclic document")
///     .expect("node exists");
/// assert_eq!(computed.style().get("color").map(String::as_str), Some("red"));
/// ```
#[derive(Debug)]
pub struct StyleEngine {
    cache: MemoCache,
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl StyleEngine {
    /// Create a new engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        info!(cache_capacity = config.cache_capacity().get(); "Creating style engine");
        Self {
            cache: MemoCache::new(config.cache_capacity()),
        }
    }

    /// Resolve an instance node's effective style with full default
    /// options.
    ///
    /// Returns `Ok(None)` when the instance node or its source document
    /// node is absent; see [`resolve`].
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::CycleDetected`] on a cyclic `extends`,
    /// mixin, or parent-link graph.
    pub fn resolve(
        &mut self,
        instance_id: Id,
        tree: &InstanceTree,
        variant: Option<&Variant>,
        graph: &DocumentGraph,
        provider: &dyn OverrideProvider,
    ) -> Result<Option<Rc<ComputedStyle>>, CascadeError> {
        self.resolve_with_options(
            instance_id,
            tree,
            variant,
            graph,
            provider,
            &ResolveOptions::default(),
        )
    }

    /// Resolve an instance node's effective style with an explicit option
    /// shape, for cheap partial projections.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::CycleDetected`] on a cyclic `extends`,
    /// mixin, or parent-link graph.
    pub fn resolve_with_options(
        &mut self,
        instance_id: Id,
        tree: &InstanceTree,
        variant: Option<&Variant>,
        graph: &DocumentGraph,
        provider: &dyn OverrideProvider,
        options: &ResolveOptions,
    ) -> Result<Option<Rc<ComputedStyle>>, CascadeError> {
        cascade::resolve(
            instance_id,
            tree,
            variant,
            graph,
            provider,
            options,
            &mut self.cache,
        )
    }

    /// Compute the node's explicitly declared text styling: own
    /// declarations plus overrides, filtered to the text property set.
    ///
    /// The mixin, parent-defaults, and inheritance stages are skipped, so
    /// this answers "what text styling does this node itself carry". An
    /// absent node yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::CycleDetected`] on a cyclic graph.
    pub fn text_styles(
        &mut self,
        instance_id: Id,
        tree: &InstanceTree,
        variant: Option<&Variant>,
        graph: &DocumentGraph,
        provider: &dyn OverrideProvider,
    ) -> Result<StyleMap, CascadeError> {
        let options = ResolveOptions::default()
            .with_style_mixins(false)
            .with_inherited_styles(false)
            .with_parent_styles(false);
        let resolved = self.resolve_with_options(
            instance_id,
            tree,
            variant,
            graph,
            provider,
            &options,
        )?;
        Ok(resolved
            .map(|computed| query::filter_subset(computed.style(), TEXT_PROPERTIES))
            .unwrap_or_default())
    }

    /// Whether the node carries any explicitly declared text styling.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::CycleDetected`] on a cyclic graph.
    pub fn has_text_styles(
        &mut self,
        instance_id: Id,
        tree: &InstanceTree,
        variant: Option<&Variant>,
        graph: &DocumentGraph,
        provider: &dyn OverrideProvider,
    ) -> Result<bool, CascadeError> {
        Ok(!self
            .text_styles(instance_id, tree, variant, graph, provider)?
            .is_empty())
    }

    /// Returns the number of memoized resolution results.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every memoized resolution result.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
