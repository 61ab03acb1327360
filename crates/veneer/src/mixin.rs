//! Style mixin expansion.
//!
//! A node's ordered mixin list expands into a flattened map from property
//! name to the mixin that defines it. Expansion follows nested mixin
//! composition recursively; within the flattened map the first occurrence
//! of a property in priority order wins, so an earlier mixin shadows a
//! later one and a mixin's own properties shadow its nested mixins'.
//!
//! Mixins referenced by a node may have been deleted from the document;
//! a dangling reference contributes nothing. A cyclic composition graph
//! is the one fatal case, detected via the expansion path.

use std::collections::HashSet;

use indexmap::IndexMap;

use veneer_core::{
    document::{DocumentGraph, DocumentNode, StyleMap, sorted_mixin_ids},
    identifier::Id,
};

use crate::error::CascadeError;

/// Expand a node's mixin list into a flattened property → mixin map.
///
/// With `include_self`, the node's own style keys seed the map attributed
/// to the node itself, shadowing everything its mixins define.
///
/// # Errors
///
/// Returns [`CascadeError::CycleDetected`] when the mixin composition
/// graph revisits a mixin along one expansion path. Diamond-shaped
/// composition (two mixins sharing a nested mixin) is legal.
pub fn expand(
    node: &DocumentNode,
    graph: &DocumentGraph,
    include_self: bool,
) -> Result<IndexMap<String, Id>, CascadeError> {
    let mut path = HashSet::new();
    path.insert(node.id());
    expand_inner(node, graph, include_self, &mut path)
}

fn expand_inner(
    node: &DocumentNode,
    graph: &DocumentGraph,
    include_self: bool,
    path: &mut HashSet<Id>,
) -> Result<IndexMap<String, Id>, CascadeError> {
    let mut map = IndexMap::new();

    if include_self {
        for key in node.style().keys() {
            map.insert(key.clone(), node.id());
        }
    }

    for mixin_id in sorted_mixin_ids(node.mixin_refs()) {
        // may have been deleted by the user
        let Some(mixin) = graph.lookup(mixin_id) else {
            continue;
        };
        if !mixin.is_mixin() {
            continue;
        }
        if !path.insert(mixin_id) {
            return Err(CascadeError::CycleDetected { node: mixin_id });
        }
        let nested = expand_inner(mixin, graph, true, path)?;
        path.remove(&mixin_id);

        for (key, owner) in nested {
            map.entry(key).or_insert(owner);
        }
    }

    Ok(map)
}

/// Project a flattened mixin map to property values by reading each
/// property from its defining mixin's style.
///
/// Entries whose mixin has since vanished from the graph project to
/// nothing.
pub fn mixin_map_style(map: &IndexMap<String, Id>, graph: &DocumentGraph) -> StyleMap {
    let mut style = StyleMap::new();
    for (key, owner_id) in map {
        let Some(owner) = graph.lookup(*owner_id) else {
            continue;
        };
        if let Some(value) = owner.style().get(key) {
            style.insert(key.clone(), value.clone());
        }
    }
    style
}

#[cfg(test)]
mod tests {
    use veneer_core::document::{ElementNode, MixinNode, MixinRef};

    use super::*;

    fn style(pairs: &[(&str, &str)]) -> StyleMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn mixin(graph: &mut DocumentGraph, id: &str, pairs: &[(&str, &str)], refs: Vec<MixinRef>) -> Id {
        let id = Id::new(id);
        graph.insert(DocumentNode::mixin(id, MixinNode::new(style(pairs), refs)));
        id
    }

    fn element(graph: &mut DocumentGraph, id: &str, pairs: &[(&str, &str)], refs: Vec<MixinRef>) -> Id {
        let id = Id::new(id);
        graph.insert(DocumentNode::element(
            id,
            ElementNode::new(style(pairs), refs, None),
        ));
        id
    }

    #[test]
    fn test_priority_order_first_wins() {
        let mut graph = DocumentGraph::new();
        let a = mixin(&mut graph, "mx-a", &[("color", "blue")], vec![]);
        let b = mixin(&mut graph, "mx-b", &[("color", "green"), ("width", "4px")], vec![]);
        let host = element(
            &mut graph,
            "mx-host",
            &[],
            vec![MixinRef::new(a, 0), MixinRef::new(b, 1)],
        );

        let node = graph.lookup(host).expect("host should exist");
        let map = expand(node, &graph, false).expect("expansion should succeed");

        assert_eq!(map.get("color"), Some(&a));
        assert_eq!(map.get("width"), Some(&b));

        let projected = mixin_map_style(&map, &graph);
        assert_eq!(projected.get("color").map(String::as_str), Some("blue"));
        assert_eq!(projected.get("width").map(String::as_str), Some("4px"));
    }

    #[test]
    fn test_own_style_shadows_nested() {
        let mut graph = DocumentGraph::new();
        let inner = mixin(&mut graph, "mx-inner", &[("color", "green")], vec![]);
        let outer = mixin(
            &mut graph,
            "mx-outer",
            &[("color", "blue")],
            vec![MixinRef::new(inner, 0)],
        );
        let host = element(&mut graph, "mx-host-2", &[], vec![MixinRef::new(outer, 0)]);

        let node = graph.lookup(host).expect("host should exist");
        let map = expand(node, &graph, false).expect("expansion should succeed");

        assert_eq!(map.get("color"), Some(&outer));
    }

    #[test]
    fn test_include_self_seeds_map() {
        let mut graph = DocumentGraph::new();
        let other = mixin(&mut graph, "mx-other", &[("color", "green")], vec![]);
        let host = element(
            &mut graph,
            "mx-host-3",
            &[("color", "red")],
            vec![MixinRef::new(other, 0)],
        );

        let node = graph.lookup(host).expect("host should exist");
        let map = expand(node, &graph, true).expect("expansion should succeed");

        assert_eq!(map.get("color"), Some(&host));
    }

    #[test]
    fn test_dangling_reference_is_inert() {
        let mut graph = DocumentGraph::new();
        let host = element(
            &mut graph,
            "mx-host-4",
            &[],
            vec![MixinRef::new(Id::new("mx-deleted"), 0)],
        );

        let node = graph.lookup(host).expect("host should exist");
        let map = expand(node, &graph, false).expect("expansion should succeed");
        assert!(map.is_empty());
    }

    #[test]
    fn test_diamond_composition_is_legal() {
        let mut graph = DocumentGraph::new();
        let shared = mixin(&mut graph, "mx-shared", &[("color", "blue")], vec![]);
        let left = mixin(&mut graph, "mx-left", &[], vec![MixinRef::new(shared, 0)]);
        let right = mixin(&mut graph, "mx-right", &[], vec![MixinRef::new(shared, 0)]);
        let host = element(
            &mut graph,
            "mx-host-5",
            &[],
            vec![MixinRef::new(left, 0), MixinRef::new(right, 1)],
        );

        let node = graph.lookup(host).expect("host should exist");
        let map = expand(node, &graph, false).expect("diamond should not be a cycle");
        assert_eq!(map.get("color"), Some(&shared));
    }

    #[test]
    fn test_cycle_is_detected() {
        let mut graph = DocumentGraph::new();
        let first = Id::new("mx-cyc-a");
        let second = Id::new("mx-cyc-b");
        graph.insert(DocumentNode::mixin(
            first,
            MixinNode::new(StyleMap::new(), vec![MixinRef::new(second, 0)]),
        ));
        graph.insert(DocumentNode::mixin(
            second,
            MixinNode::new(StyleMap::new(), vec![MixinRef::new(first, 0)]),
        ));
        let host = element(&mut graph, "mx-host-6", &[], vec![MixinRef::new(first, 0)]);

        let node = graph.lookup(host).expect("host should exist");
        let result = expand(node, &graph, false);
        assert_eq!(result, Err(CascadeError::CycleDetected { node: first }));
    }
}
