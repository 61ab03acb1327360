//! Identifier management using string interning.
//!
//! Document nodes, instance nodes, and variants are all addressed by
//! opaque string ids. This module provides the [`Id`] type, a `Copy`
//! handle backed by a global string interner so that ids are cheap to
//! compare, hash, and store in maps.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// Uses `Mutex` for thread-safe access to the interner itself; the ids
/// handed out are plain `Copy` symbols.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// An interned identifier for a document node, instance node, or variant.
///
/// Two `Id`s created from the same string are equal and share storage.
///
/// # Examples
///
/// ```
/// use veneer_core::identifier::Id;
///
/// let button = Id::new("button-primary");
/// let again = Id::new("button-primary");
/// assert_eq!(button, again);
/// assert_eq!(button, "button-primary");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string, interning it if necessary.
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice via [`Id::new`].
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`.
    fn eq(&self, other: &str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
