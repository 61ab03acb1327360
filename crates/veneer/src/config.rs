//! Configuration types for the style engine.
//!
//! This module provides the configuration structures that control how a
//! resolution runs. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`EngineConfig`] - Engine-level settings such as memo cache capacity.
//! - [`ResolveOptions`] - Per-call stage toggles for partial projections.
//!
//! # Example
//!
//! ```
//! # use veneer::config::ResolveOptions;
//! // The default resolves every stage.
//! let options = ResolveOptions::default();
//! assert!(options.style_mixins() && options.inherited_styles());
//!
//! // A cheap "own declarations plus overrides" projection.
//! let projection = ResolveOptions::default()
//!     .with_style_mixins(false)
//!     .with_inherited_styles(false)
//!     .with_parent_styles(false);
//! assert!(projection.self_style() && projection.overrides());
//! ```

use std::num::NonZeroUsize;

use serde::Deserialize;

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    1024
}

/// Engine-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of memoized resolution results kept before
    /// least-recently-used eviction.
    #[serde(default = "default_cache_capacity")]
    cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl EngineConfig {
    /// Creates a new config with the given memo cache capacity.
    ///
    /// A capacity of zero is treated as one: the cache is load-bearing
    /// for tractability, never fully disabled.
    pub fn new(cache_capacity: usize) -> Self {
        Self { cache_capacity }
    }

    /// Returns the memo cache capacity as a non-zero count.
    pub fn cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cache_capacity).unwrap_or(NonZeroUsize::MIN)
    }
}

/// Stage toggles for a resolution call.
///
/// All fields default to true; disabling stages computes cheap partial
/// projections (e.g. "does this node declare any text styling itself"
/// without running the mixin, parent, and inheritance stages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ResolveOptions {
    /// Expand and merge the node's style mixins.
    #[serde(default = "default_true")]
    style_mixins: bool,

    /// Walk instance-tree ancestors and fill inheritable gaps.
    #[serde(default = "default_true")]
    inherited_styles: bool,

    /// Apply variant-scoped override records.
    #[serde(default = "default_true")]
    overrides: bool,

    /// Merge structural defaults from the `extends` chain.
    #[serde(default = "default_true")]
    parent_styles: bool,

    /// Apply the node's own declared properties.
    #[serde(default = "default_true", rename = "self")]
    self_style: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            style_mixins: true,
            inherited_styles: true,
            overrides: true,
            parent_styles: true,
            self_style: true,
        }
    }
}

impl ResolveOptions {
    /// Whether the mixin stage runs.
    pub fn style_mixins(&self) -> bool {
        self.style_mixins
    }

    /// Whether the ancestor-inheritance stage runs.
    pub fn inherited_styles(&self) -> bool {
        self.inherited_styles
    }

    /// Whether the override stage runs.
    pub fn overrides(&self) -> bool {
        self.overrides
    }

    /// Whether the parent-defaults stage runs.
    pub fn parent_styles(&self) -> bool {
        self.parent_styles
    }

    /// Whether the own-style stage runs.
    pub fn self_style(&self) -> bool {
        self.self_style
    }

    /// Returns a copy with the mixin stage toggled.
    pub fn with_style_mixins(mut self, enabled: bool) -> Self {
        self.style_mixins = enabled;
        self
    }

    /// Returns a copy with the ancestor-inheritance stage toggled.
    pub fn with_inherited_styles(mut self, enabled: bool) -> Self {
        self.inherited_styles = enabled;
        self
    }

    /// Returns a copy with the override stage toggled.
    pub fn with_overrides(mut self, enabled: bool) -> Self {
        self.overrides = enabled;
        self
    }

    /// Returns a copy with the parent-defaults stage toggled.
    pub fn with_parent_styles(mut self, enabled: bool) -> Self {
        self.parent_styles = enabled;
        self
    }

    /// Returns a copy with the own-style stage toggled.
    pub fn with_self_style(mut self, enabled: bool) -> Self {
        self.self_style = enabled;
        self
    }

    /// Packs the option shape into a bitfield for memo keying.
    ///
    /// Two option values with the same shape must produce the same memo
    /// key, so the encoding is position-stable.
    pub(crate) fn bits(&self) -> u8 {
        (self.self_style as u8)
            | (self.parent_styles as u8) << 1
            | (self.style_mixins as u8) << 2
            | (self.overrides as u8) << 3
            | (self.inherited_styles as u8) << 4
    }
}
