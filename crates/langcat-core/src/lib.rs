//! Langcat Core: version matching and ordering over a language artifact catalog
//!
//! A partial key over {name, version, platform, arch} is turned into a store
//! lookup, narrowed by optional platform/arch filters, ordered newest first by
//! dotted numeric version, and resolved to a single record, a list, or nothing.

pub mod context;
pub mod data_model;
pub mod engine;
pub mod error;
pub mod filter;
pub mod resolver;
pub mod store;
pub mod version;

pub use context::QueryContext;
pub use data_model::{CatalogDocument, CatalogEntry, QuerySpec, Resolution};
pub use engine::CatalogQueryEngine;
pub use error::{CatalogError, StoreError};
pub use filter::ResultFilter;
pub use store::{CatalogStore, MemoryStore};
pub use version::{compare_versions, sort_descending, ParsedVersion};

/// Langcat engine version
pub const LANGCAT_VERSION: &str = env!("CARGO_PKG_VERSION");
