//! Instance tree types.
//!
//! The instance tree is the rendered form of a document: each instance
//! node points back to a source node in the [`DocumentGraph`] and knows
//! its parent and children. Like the graph, the tree carries a revision
//! stamp refreshed from a shared monotonic counter on every structural
//! mutation and on clone, and that globally unique revision is the
//! tree's identity for memoization.
//!
//! Instance nodes come in two flavors: source-representation nodes map
//! 1:1 onto an authored document node, while synthetic nodes are
//! intermediate tree structure produced during rendering. Only
//! source-representation ancestors participate in style inheritance.

use indexmap::IndexMap;

use crate::{document::DocumentGraph, identifier::Id, revision::next_revision};

/// A node of the rendered instance tree.
#[derive(Debug, Clone)]
pub struct InstanceNode {
    id: Id,
    source_id: Id,
    parent: Option<Id>,
    children: Vec<Id>,
    source_rep: bool,
}

impl InstanceNode {
    /// Create a new instance node pointing at a source document node.
    ///
    /// `source_rep` marks nodes that map 1:1 onto an authored document
    /// node; synthetic intermediate nodes pass `false`.
    pub fn new(id: Id, source_id: Id, source_rep: bool) -> Self {
        Self {
            id,
            source_id,
            parent: None,
            children: Vec::new(),
            source_rep,
        }
    }

    /// Get the instance node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the id of the source document node this instance renders.
    pub fn source_id(&self) -> Id {
        self.source_id
    }

    /// Get the parent instance id, if this node is not the root.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Borrow the child instance ids in render order.
    pub fn children(&self) -> &[Id] {
        &self.children
    }

    /// Whether this node maps 1:1 onto an authored document node.
    pub fn is_source_rep(&self) -> bool {
        self.source_rep
    }
}

/// The rendered instance tree, addressable by instance id.
#[derive(Debug)]
pub struct InstanceTree {
    revision: u64,
    nodes: IndexMap<Id, InstanceNode>,
}

impl Default for InstanceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InstanceTree {
    /// A clone is a distinct snapshot: same nodes, fresh revision.
    fn clone(&self) -> Self {
        Self {
            revision: next_revision(),
            nodes: self.nodes.clone(),
        }
    }
}

impl InstanceTree {
    /// Create a new, empty instance tree with a fresh revision stamp.
    pub fn new() -> Self {
        Self {
            revision: next_revision(),
            nodes: IndexMap::new(),
        }
    }

    /// Get the current snapshot revision.
    ///
    /// Revisions are globally unique: no two tree states ever share one,
    /// even across distinct tree objects.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Look up an instance node by id.
    pub fn node(&self, id: Id) -> Option<&InstanceNode> {
        self.nodes.get(&id)
    }

    /// Get the parent of an instance node, if both exist.
    pub fn parent_of(&self, id: Id) -> Option<&InstanceNode> {
        let parent_id = self.nodes.get(&id)?.parent?;
        self.nodes.get(&parent_id)
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a node under the given parent (or as a root when `parent`
    /// is `None`), wiring up parent and child links.
    ///
    /// Stamps a fresh revision: the mutated tree is a new snapshot.
    pub fn insert(&mut self, mut node: InstanceNode, parent: Option<Id>) {
        node.parent = parent;
        let id = node.id();
        self.nodes.insert(id, node);
        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                parent_node.children.push(id);
            }
        }
        self.revision = next_revision();
    }

    /// Resolve an instance node's source document node in the graph.
    ///
    /// Returns `None` when either the instance or its source is absent;
    /// both are ordinary, non-fatal cases.
    pub fn source_of<'graph>(
        &self,
        id: Id,
        graph: &'graph DocumentGraph,
    ) -> Option<&'graph crate::document::DocumentNode> {
        let node = self.node(id)?;
        graph.lookup(node.source_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentNode, ElementNode};

    #[test]
    fn test_parent_child_wiring() {
        let mut tree = InstanceTree::new();
        let root = Id::new("ins-root");
        let child = Id::new("ins-child");

        tree.insert(InstanceNode::new(root, Id::new("doc-root"), true), None);
        tree.insert(InstanceNode::new(child, Id::new("doc-child"), true), Some(root));

        assert_eq!(tree.node(root).map(|n| n.children()), Some(&[child][..]));
        assert_eq!(tree.parent_of(child).map(InstanceNode::id), Some(root));
        assert!(tree.parent_of(root).is_none());
    }

    #[test]
    fn test_insert_produces_fresh_revision() {
        let mut tree = InstanceTree::new();
        let created = tree.revision();

        tree.insert(InstanceNode::new(Id::new("ins-a"), Id::new("doc-a"), true), None);
        assert_ne!(created, tree.revision());
    }

    #[test]
    fn test_clone_is_a_distinct_snapshot() {
        let mut tree = InstanceTree::new();
        let root = Id::new("ins-fork-root");
        tree.insert(InstanceNode::new(root, Id::new("doc-fork-root"), true), None);

        let mut fork = tree.clone();
        assert_ne!(tree.revision(), fork.revision());
        assert!(fork.node(root).is_some());

        fork.insert(
            InstanceNode::new(Id::new("ins-fork-child"), Id::new("doc-fork-child"), true),
            Some(root),
        );
        assert_ne!(tree.revision(), fork.revision());
    }

    #[test]
    fn test_source_of() {
        let mut graph = DocumentGraph::new();
        let source = Id::new("doc-src");
        graph.insert(DocumentNode::element(source, ElementNode::default()));

        let mut tree = InstanceTree::new();
        let instance = Id::new("ins-src");
        tree.insert(InstanceNode::new(instance, source, true), None);

        let node = tree.source_of(instance, &graph).expect("source should resolve");
        assert_eq!(node.id(), source);

        // A dangling source id resolves to nothing, not an error.
        let dangling = Id::new("ins-dangling");
        tree.insert(InstanceNode::new(dangling, Id::new("doc-deleted"), true), None);
        assert!(tree.source_of(dangling, &graph).is_none());
    }
}
