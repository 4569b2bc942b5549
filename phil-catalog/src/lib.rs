//! Static content catalogs for Phil, the faith-community assistant.
//!
//! This crate owns the read-only domain data the application is composed
//! over:
//!
//! - [`Church`], [`SmallGroup`], [`Sermon`]: the record types
//! - [`Catalog`]: the assembled built-in catalogs with lookups and
//!   referential validation
//! - [`search`]: pure free-text filtering over the full catalogs
//! - [`PromptComposer`]: builds the composed prompt sent to the assistant
//!   backend from a persona line, a context descriptor, and the user text
//!
//! Catalogs are loaded once at process start and never mutated; the
//! application shares a single `Arc<Catalog>`.

pub mod catalog;
pub mod prompt;
pub mod search;
pub mod types;

// Re-export main types
pub use catalog::{Catalog, CatalogError, SeedMessage, SeedRole};
pub use prompt::{ContextDescriptor, PromptComposer, DEFAULT_PERSONA};
pub use search::{filter_churches, filter_groups};
pub use types::{Church, Sermon, SmallGroup};
