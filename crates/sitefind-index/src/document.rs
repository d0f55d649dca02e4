//! Document model.

use serde::{Deserialize, Serialize};
use sitefind_core::Page;

/// One indexable unit, corresponding to a single site page.
///
/// Identity is the `id`, assigned by enumeration order over the page set at
/// build time and stable for the lifetime of one built index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique per-page id.
    pub id: u32,

    /// Site-relative URL.
    pub href: String,

    /// Page title.
    pub title: String,

    /// Full plain-text page content.
    pub content: String,
}

/// A ranked query result: the projection of a document's stored fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    /// Document URL.
    pub href: String,

    /// Document title.
    pub title: String,
}

/// Turn the site's page set into documents, one per page, ids by
/// enumeration order.
pub fn documents_from_pages(pages: &[Page]) -> Vec<Document> {
    pages
        .iter()
        .enumerate()
        .map(|(id, page)| Document {
            id: id as u32,
            href: page.href.clone(),
            title: page.title.clone(),
            content: page.content.clone(),
        })
        .collect()
}
