//! The fixed inheritable and text property sets.
//!
//! Inheritance is a closed-world affair: only the property names listed
//! here may propagate from an ancestor instance to a descendant, and only
//! when the descendant has no explicit value. Everything else never
//! inherits, regardless of gaps.

/// Style properties eligible for ancestor-to-descendant inheritance.
pub const INHERITABLE_PROPERTIES: &[&str] = &[
    "color",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "letter-spacing",
    "line-height",
    "text-align",
    "text-decoration",
    "text-transform",
    "white-space",
    "word-spacing",
];

/// Text-related style properties, used by the text-styling queries.
pub const TEXT_PROPERTIES: &[&str] = &[
    "color",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "letter-spacing",
    "line-height",
    "text-align",
    "text-decoration",
    "text-transform",
];

/// Whether a property name is eligible for inheritance.
pub fn is_inheritable(name: &str) -> bool {
    INHERITABLE_PROPERTIES.contains(&name)
}
