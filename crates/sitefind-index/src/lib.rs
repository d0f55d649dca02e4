//! Sitefind Search Index Library
//!
//! Builds a serializable full-text search index from a site's page set and
//! answers ranked queries against it. The build side runs once per site
//! build; the query side is shared with the browser runtime, which loads
//! the serialized index wholesale.
//!
//! # Example
//!
//! ```
//! use sitefind_core::Page;
//! use sitefind_index::{documents_from_pages, IndexSchema, SearchIndex};
//!
//! let pages = vec![Page {
//!     href: "/a".to_string(),
//!     title: "Alpha".to_string(),
//!     content: "alpha page".to_string(),
//!     lang: "en".to_string(),
//! }];
//!
//! let documents = documents_from_pages(&pages);
//! let index = SearchIndex::build(IndexSchema::for_pages(), &documents).unwrap();
//! let hits = index.search("alpha", 10);
//! assert_eq!(hits[0].href, "/a");
//! ```

pub mod document;
pub mod index;
pub mod schema;
pub mod tokenize;

pub use document::{documents_from_pages, Document, SearchHit};
pub use index::{SearchIndex, StoredDocument, INDEX_FORMAT_VERSION, MAX_INDEX_ASSET_SIZE};
pub use schema::{FieldSpec, IndexSchema};
use thiserror::Error;

/// Search-related errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Schema declaration error.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
