//! The cascade resolver.
//!
//! Computes the effective style of an instance node by merging five
//! layered sources in fixed precedence order:
//!
//! 1. Structural defaults from the `extends` chain (default-only: the
//!    most derived ancestor wins, and nothing here overrides later
//!    stages).
//! 2. The node's own declared properties (unconditional overwrite).
//! 3. Style mixins (default-only: never overwrite stages 1–2).
//! 4. Variant-scoped overrides (unconditional overwrite; later provider
//!    records win per key).
//! 5. Ancestor inheritance over the instance tree (fills gaps only, and
//!    only for the fixed inheritable property set).
//!
//! Every stage can be toggled off via [`ResolveOptions`] to compute cheap
//! partial projections. The ancestor-inheritance stage recursively
//! resolves each ancestor with *full default options* regardless of the
//! caller's options; inherited values are always the ancestor's complete
//! effective style.
//!
//! All graph walks carry explicit visited sets, so a cyclic `extends`
//! chain, mixin graph, or corrupted parent link surfaces as
//! [`CascadeError::CycleDetected`] instead of unbounded recursion.

use std::{collections::HashSet, rc::Rc};

use indexmap::IndexMap;
use log::{debug, trace};

use veneer_core::{
    document::{DocumentGraph, StyleMap},
    identifier::Id,
    instance::InstanceTree,
    overrides::{OverrideProvider, OverrideRecord, Variant},
    property::is_inheritable,
};

use crate::{
    computed::ComputedStyle,
    config::ResolveOptions,
    error::CascadeError,
    memo::{MemoCache, MemoKey},
    mixin,
};

/// Resolve the effective style of an instance node.
///
/// Returns `Ok(None)` when the instance node is absent from the tree or
/// its source document node is absent from the graph; both are ordinary
/// cases the caller branches on, not failures.
///
/// Results are memoized in `cache`, keyed by the input tuple's snapshot
/// identity; an identical tuple returns the shared cached result without
/// recomputation. The provider is not part of the key: use one provider
/// per cache, and a pure one (see [`OverrideProvider`]).
///
/// # Errors
///
/// Returns [`CascadeError::CycleDetected`] when the `extends` chain, the
/// mixin composition graph, or the instance-tree parent links form a
/// cycle.
pub fn resolve(
    instance_id: Id,
    tree: &InstanceTree,
    variant: Option<&Variant>,
    graph: &DocumentGraph,
    provider: &dyn OverrideProvider,
    options: &ResolveOptions,
    cache: &mut MemoCache,
) -> Result<Option<Rc<ComputedStyle>>, CascadeError> {
    let key = MemoKey::new(
        instance_id,
        tree.revision(),
        variant.map(Variant::id),
        graph.revision(),
        options.bits(),
    );
    if let Some(hit) = cache.get(&key) {
        trace!(instance:% = instance_id; "Cascade memo hit");
        return Ok(Some(hit));
    }

    let Some(instance) = tree.node(instance_id) else {
        return Ok(None);
    };
    let Some(source) = graph.lookup(instance.source_id()) else {
        debug!(instance:% = instance_id, source:% = instance.source_id(); "Source node missing from graph");
        return Ok(None);
    };

    debug!(instance:% = instance_id, source:% = source.id(); "Resolving computed style");

    let mut style = StyleMap::new();

    // Stage 1: structural defaults along the extends chain. Default-only
    // merge, so the most derived component wins among ancestors.
    if options.parent_styles() {
        let mut visited = HashSet::new();
        visited.insert(source.id());
        let mut current = source;
        while let Some(base_id) = current.extends() {
            if !visited.insert(base_id) {
                return Err(CascadeError::CycleDetected { node: base_id });
            }
            // A dangling extends target ends the walk silently.
            let Some(base) = graph.lookup(base_id) else {
                break;
            };
            if base.is_component() {
                for (prop, value) in base.style() {
                    style
                        .entry(prop.clone())
                        .or_insert_with(|| value.clone());
                }
            }
            current = base;
        }
    }

    // Stage 2: the node's own declared properties overwrite.
    if options.self_style() {
        for (prop, value) in source.style() {
            style.insert(prop.clone(), value.clone());
        }
    }

    // Stage 3: mixins fill remaining gaps; the full expansion is kept for
    // provenance even where own style shadows it.
    let mut mixin_map = IndexMap::new();
    if options.style_mixins() {
        mixin_map = mixin::expand(source, graph, false)?;
        for (prop, value) in mixin::mixin_map_style(&mixin_map, graph) {
            style.entry(prop).or_insert(value);
        }
    }

    // Stage 4: overrides win over everything; later provider records win
    // per key, and every contributing record is retained.
    let mut override_map: IndexMap<String, Vec<Rc<OverrideRecord>>> = IndexMap::new();
    if options.overrides() {
        let records = provider.resolve_overrides(instance, tree, variant, graph);
        trace!(instance:% = instance_id, records = records.len(); "Applying override records");
        for record in records {
            let OverrideRecord::AddStyleBlock { entries } = record.as_ref();
            for (prop, value) in entries {
                override_map
                    .entry(prop.clone())
                    .or_default()
                    .push(Rc::clone(&record));
                style.insert(prop.clone(), value.clone());
            }
        }
    }

    // Stage 5: walk instance-tree ancestors; source-representation
    // element-like ancestors donate inheritable properties into gaps.
    let mut inheritance_map = IndexMap::new();
    if options.inherited_styles() {
        // Collect the full ancestor chain before resolving any of it, so
        // a corrupted parent link surfaces as an error rather than
        // unbounded recursion through ancestor resolution.
        let mut visited = HashSet::new();
        visited.insert(instance_id);
        let mut chain = Vec::new();
        let mut parent = tree.parent_of(instance_id);
        while let Some(ancestor) = parent {
            if !visited.insert(ancestor.id()) {
                return Err(CascadeError::CycleDetected { node: ancestor.id() });
            }
            chain.push(ancestor);
            parent = tree.parent_of(ancestor.id());
        }
        for ancestor in chain {
            let donates = ancestor.is_source_rep()
                && graph
                    .lookup(ancestor.source_id())
                    .is_some_and(|node| node.is_element_like());
            if donates {
                // Ancestors always resolve with full default options, not
                // the caller's projection.
                let resolved = resolve(
                    ancestor.id(),
                    tree,
                    variant,
                    graph,
                    provider,
                    &ResolveOptions::default(),
                    cache,
                )?;
                if let Some(resolved) = resolved {
                    for (prop, value) in resolved.style() {
                        if is_inheritable(prop) && !style.contains_key(prop) {
                            style.insert(prop.clone(), value.clone());
                            inheritance_map.insert(prop.clone(), ancestor.id());
                        }
                    }
                }
            }
        }
    }

    let computed = Rc::new(ComputedStyle::new(
        source.id(),
        style,
        mixin_map,
        override_map,
        inheritance_map,
    ));
    cache.insert(key, Rc::clone(&computed));
    Ok(Some(computed))
}
