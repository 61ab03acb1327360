//! Veneer Core Types and Definitions
//!
//! This crate provides the foundational types for the Veneer style engine.
//! It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Document**: The document graph of components, elements, and style
//!   mixins ([`document`] module)
//! - **Instance**: The rendered instance tree derived from the document
//!   graph ([`instance`] module)
//! - **Overrides**: Variant-scoped override records and the override
//!   provider seam ([`overrides`] module)
//! - **Property**: The fixed inheritable and text property sets
//!   ([`property`] module)

pub mod document;
pub mod identifier;
pub mod instance;
pub mod overrides;
pub mod property;

mod revision;
