//! Derived filtered queries over resolved styles.
//!
//! These helpers let a consumer (e.g. a property inspector) ask narrow
//! questions — "does this node declare any text styling" — without
//! interpreting property values.

use veneer_core::document::StyleMap;

/// Restrict a style map to the given property names, preserving the name
/// set's order.
pub fn filter_subset(style: &StyleMap, names: &[&str]) -> StyleMap {
    names
        .iter()
        .filter_map(|name| {
            style
                .get(*name)
                .map(|value| (name.to_string(), value.clone()))
        })
        .collect()
}

/// Whether a style map defines at least one of the given properties.
pub fn has_non_empty_subset(style: &StyleMap, names: &[&str]) -> bool {
    names.iter().any(|name| style.contains_key(*name))
}
