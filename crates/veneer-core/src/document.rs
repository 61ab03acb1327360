//! Document graph types.
//!
//! The document graph holds every authored node of a design document —
//! components, elements, and style mixins — addressable by [`Id`]. The
//! graph is treated as an immutable snapshot during resolution: every
//! structural mutation stamps it with a fresh revision from a shared
//! monotonic counter, and that revision is the graph's identity for
//! memoization purposes. Clones draw a fresh stamp too, so two graphs
//! never share a revision, even a fork and its origin. Callers that edit
//! or fork a graph mid-session get copy-on-write behavior for free: the
//! new revision can never match a memo entry recorded against another
//! state.

use indexmap::IndexMap;

use crate::{identifier::Id, revision::next_revision};

/// An ordered map from style property name to raw string value.
///
/// Values are opaque to the engine; no unit math or color parsing is ever
/// performed. Insertion order is preserved so that resolved styles render
/// deterministically.
pub type StyleMap = IndexMap<String, String>;

/// A reference from a node to a style mixin, carrying an explicit priority.
///
/// Lower priority values expand first, and during expansion the first
/// occurrence of a property wins, so a lower-priority mixin shadows a
/// higher-priority one for any property they both define.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixinRef {
    id: Id,
    priority: i64,
}

impl MixinRef {
    /// Create a new mixin reference with an explicit priority.
    pub fn new(id: Id, priority: i64) -> Self {
        Self { id, priority }
    }

    /// Get the referenced mixin's id.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the declared priority of this reference.
    pub fn priority(&self) -> i64 {
        self.priority
    }
}

/// Returns mixin ids in declared expansion order: ascending priority,
/// stable for equal priorities.
pub fn sorted_mixin_ids(refs: &[MixinRef]) -> Vec<Id> {
    let mut sorted: Vec<&MixinRef> = refs.iter().collect();
    sorted.sort_by_key(|mixin_ref| mixin_ref.priority);
    sorted.into_iter().map(MixinRef::id).collect()
}

/// A reusable component definition.
///
/// Components may extend a base component (the `extends` chain supplies
/// structural default styles) and may compose style mixins.
#[derive(Debug, Clone, Default)]
pub struct ComponentNode {
    style: StyleMap,
    mixin_refs: Vec<MixinRef>,
    extends: Option<Id>,
}

impl ComponentNode {
    /// Create a new component with its own style, mixin references, and
    /// optional base component.
    pub fn new(style: StyleMap, mixin_refs: Vec<MixinRef>, extends: Option<Id>) -> Self {
        Self {
            style,
            mixin_refs,
            extends,
        }
    }
}

/// A concrete element of a document (e.g. a rectangle or a text node).
#[derive(Debug, Clone, Default)]
pub struct ElementNode {
    style: StyleMap,
    mixin_refs: Vec<MixinRef>,
    extends: Option<Id>,
}

impl ElementNode {
    /// Create a new element with its own style, mixin references, and
    /// optional base component.
    pub fn new(style: StyleMap, mixin_refs: Vec<MixinRef>, extends: Option<Id>) -> Self {
        Self {
            style,
            mixin_refs,
            extends,
        }
    }
}

/// A named, reusable bundle of style properties.
///
/// Mixins may themselves reference other mixins, forming a composition
/// graph. A mixin referenced by a node may have been deleted from the
/// document; consumers must treat a dangling reference as contributing
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct MixinNode {
    style: StyleMap,
    mixin_refs: Vec<MixinRef>,
}

impl MixinNode {
    /// Create a new style mixin with its own style and nested references.
    pub fn new(style: StyleMap, mixin_refs: Vec<MixinRef>) -> Self {
        Self { style, mixin_refs }
    }
}

/// The payload of a document node: component, element, or style mixin.
///
/// This is matched exhaustively everywhere a node kind matters; there are
/// no ad hoc kind checks.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A reusable component definition.
    Component(ComponentNode),
    /// A concrete document element.
    Element(ElementNode),
    /// A reusable style mixin.
    Mixin(MixinNode),
}

/// A node of the document graph: an id plus its kind-specific payload.
#[derive(Debug, Clone)]
pub struct DocumentNode {
    id: Id,
    kind: NodeKind,
}

impl DocumentNode {
    /// Create a document node from an id and payload.
    pub fn new(id: Id, kind: NodeKind) -> Self {
        Self { id, kind }
    }

    /// Convenience constructor for a component node.
    pub fn component(id: Id, component: ComponentNode) -> Self {
        Self::new(id, NodeKind::Component(component))
    }

    /// Convenience constructor for an element node.
    pub fn element(id: Id, element: ElementNode) -> Self {
        Self::new(id, NodeKind::Element(element))
    }

    /// Convenience constructor for a style mixin node.
    pub fn mixin(id: Id, mixin: MixinNode) -> Self {
        Self::new(id, NodeKind::Mixin(mixin))
    }

    /// Get the node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Borrow the kind-specific payload.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Borrow the node's own style map.
    pub fn style(&self) -> &StyleMap {
        match &self.kind {
            NodeKind::Component(component) => &component.style,
            NodeKind::Element(element) => &element.style,
            NodeKind::Mixin(mixin) => &mixin.style,
        }
    }

    /// Borrow the node's mixin references in declaration order.
    pub fn mixin_refs(&self) -> &[MixinRef] {
        match &self.kind {
            NodeKind::Component(component) => &component.mixin_refs,
            NodeKind::Element(element) => &element.mixin_refs,
            NodeKind::Mixin(mixin) => &mixin.mixin_refs,
        }
    }

    /// Get the id of the base component this node extends, if any.
    ///
    /// Mixins never extend.
    pub fn extends(&self) -> Option<Id> {
        match &self.kind {
            NodeKind::Component(component) => component.extends,
            NodeKind::Element(element) => element.extends,
            NodeKind::Mixin(_) => None,
        }
    }

    /// Whether this node is element-like (a component or an element).
    ///
    /// Only element-like nodes contribute structural parent defaults and
    /// participate in ancestor inheritance.
    pub fn is_element_like(&self) -> bool {
        matches!(self.kind, NodeKind::Component(_) | NodeKind::Element(_))
    }

    /// Whether this node is a component definition.
    ///
    /// Only components contribute structural defaults along the `extends`
    /// chain.
    pub fn is_component(&self) -> bool {
        matches!(self.kind, NodeKind::Component(_))
    }

    /// Whether this node is a style mixin.
    pub fn is_mixin(&self) -> bool {
        matches!(self.kind, NodeKind::Mixin(_))
    }
}

/// The full set of authored document nodes, addressable by id.
///
/// The graph carries a `revision` stamp refreshed on every structural
/// mutation. The revision, not the address of the graph, is the identity
/// used for memoization; see [`crate::document`] module docs.
#[derive(Debug)]
pub struct DocumentGraph {
    revision: u64,
    nodes: IndexMap<Id, DocumentNode>,
}

impl Default for DocumentGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DocumentGraph {
    /// A clone is a distinct snapshot: same nodes, fresh revision.
    fn clone(&self) -> Self {
        Self {
            revision: next_revision(),
            nodes: self.nodes.clone(),
        }
    }
}

impl DocumentGraph {
    /// Create a new, empty document graph with a fresh revision stamp.
    pub fn new() -> Self {
        Self {
            revision: next_revision(),
            nodes: IndexMap::new(),
        }
    }

    /// Get the current snapshot revision.
    ///
    /// Revisions are globally unique: no two graph states ever share one,
    /// even across distinct graph objects.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Look up a node by id. Absent ids are an ordinary, non-fatal case.
    pub fn lookup(&self, id: Id) -> Option<&DocumentNode> {
        self.nodes.get(&id)
    }

    /// Whether a node with the given id exists in the graph.
    pub fn contains(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a node, replacing any node with the same id.
    ///
    /// Stamps a fresh revision: the mutated graph is a new snapshot.
    pub fn insert(&mut self, node: DocumentNode) {
        self.nodes.insert(node.id(), node);
        self.revision = next_revision();
    }

    /// Remove a node by id, returning it if present.
    ///
    /// Stamps a fresh revision even when the id was absent, so a removal
    /// attempt always produces a new snapshot.
    pub fn remove(&mut self, id: Id) -> Option<DocumentNode> {
        self.revision = next_revision();
        self.nodes.shift_remove(&id)
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &DocumentNode> {
        self.nodes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(pairs: &[(&str, &str)]) -> StyleMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_lookup_and_contains() {
        let mut graph = DocumentGraph::new();
        let id = Id::new("doc-el-1");
        graph.insert(DocumentNode::element(
            id,
            ElementNode::new(style(&[("color", "red")]), vec![], None),
        ));

        assert!(graph.contains(id));
        let node = graph.lookup(id).expect("node should exist");
        assert_eq!(node.style().get("color").map(String::as_str), Some("red"));
        assert!(graph.lookup(Id::new("doc-missing")).is_none());
    }

    #[test]
    fn test_mutation_produces_fresh_revision() {
        let mut graph = DocumentGraph::new();
        let created = graph.revision();

        graph.insert(DocumentNode::mixin(Id::new("doc-mix-1"), MixinNode::default()));
        let inserted = graph.revision();
        assert_ne!(created, inserted);

        graph.remove(Id::new("doc-mix-1"));
        let removed = graph.revision();
        assert_ne!(inserted, removed);

        // Removal of an absent id still produces a new snapshot.
        graph.remove(Id::new("doc-missing"));
        assert_ne!(removed, graph.revision());
    }

    #[test]
    fn test_clone_is_a_distinct_snapshot() {
        let mut graph = DocumentGraph::new();
        let id = Id::new("doc-el-fork");
        graph.insert(DocumentNode::element(
            id,
            ElementNode::new(style(&[("color", "red")]), vec![], None),
        ));

        let mut fork = graph.clone();
        assert_ne!(graph.revision(), fork.revision());
        assert_eq!(
            fork.lookup(id).map(|n| n.style().get("color").cloned()),
            Some(Some("red".to_string()))
        );

        // Divergent edits can never bring the two back to a shared stamp.
        fork.insert(DocumentNode::element(
            id,
            ElementNode::new(style(&[("color", "blue")]), vec![], None),
        ));
        graph.insert(DocumentNode::mixin(Id::new("doc-mix-3"), MixinNode::default()));
        assert_ne!(graph.revision(), fork.revision());
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut graph = DocumentGraph::new();
        let id = Id::new("doc-el-2");
        graph.insert(DocumentNode::element(
            id,
            ElementNode::new(style(&[("color", "red")]), vec![], None),
        ));
        graph.insert(DocumentNode::element(
            id,
            ElementNode::new(style(&[("color", "blue")]), vec![], None),
        ));

        assert_eq!(graph.len(), 1);
        let node = graph.lookup(id).expect("node should exist");
        assert_eq!(node.style().get("color").map(String::as_str), Some("blue"));
    }

    #[test]
    fn test_sorted_mixin_ids_by_priority() {
        let refs = vec![
            MixinRef::new(Id::new("mix-b"), 2),
            MixinRef::new(Id::new("mix-a"), 0),
            MixinRef::new(Id::new("mix-c"), 1),
        ];

        let sorted = sorted_mixin_ids(&refs);
        assert_eq!(sorted, vec![Id::new("mix-a"), Id::new("mix-c"), Id::new("mix-b")]);
    }

    #[test]
    fn test_sorted_mixin_ids_stable_on_ties() {
        let refs = vec![
            MixinRef::new(Id::new("mix-first"), 1),
            MixinRef::new(Id::new("mix-second"), 1),
        ];

        let sorted = sorted_mixin_ids(&refs);
        assert_eq!(sorted, vec![Id::new("mix-first"), Id::new("mix-second")]);
    }

    #[test]
    fn test_extends_only_on_element_like() {
        let base = Id::new("doc-base");
        let component = DocumentNode::component(
            Id::new("doc-comp"),
            ComponentNode::new(StyleMap::new(), vec![], Some(base)),
        );
        let mixin = DocumentNode::mixin(Id::new("doc-mix-2"), MixinNode::default());

        assert_eq!(component.extends(), Some(base));
        assert!(component.is_element_like());
        assert_eq!(mixin.extends(), None);
        assert!(mixin.is_mixin());
        assert!(!mixin.is_element_like());
    }
}
