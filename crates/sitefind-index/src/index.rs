//! The serializable search index.
//!
//! Built once per site build from the full document set, then queried
//! read-only. The serialized form is the static asset the browser runtime
//! loads wholesale on first use.

use std::{cmp::Ordering, collections::HashMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    document::{Document, SearchHit},
    schema::IndexSchema,
    tokenize::{tokenize_query, tokenize_text, DEFAULT_MIN_TERM_LEN},
    Result, SearchError,
};

/// Serialized index format version.
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Recommended ceiling for the serialized asset (500KB). Everything above
/// gets a build-time warning since the browser loads the asset wholesale.
pub const MAX_INDEX_ASSET_SIZE: usize = 500 * 1024;

/// A document as kept inside the index: the id, the verbatim values of
/// stored fields, and the tokenized terms of indexed fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Document id.
    pub id: u32,

    /// Stored URL, present when the schema stores `href`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Stored title, present when the schema stores `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Tokenized terms of the indexed fields.
    pub terms: Vec<String>,
}

/// A built, immutable full-text index over one site's document set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Index format version.
    pub version: u32,

    /// Schema the index was built with.
    pub schema: IndexSchema,

    /// Minimum token length used at build time; queries reuse it.
    pub min_term_len: usize,

    /// All indexed documents, in id order.
    pub documents: Vec<StoredDocument>,

    /// Inverted index: term -> sorted, deduplicated document indices.
    pub postings: HashMap<String, Vec<usize>>,
}

impl SearchIndex {
    /// Build an index from the full document set.
    ///
    /// Pure and one-shot: the index is rebuilt wholesale on each site
    /// build, there is no incremental path.
    pub fn build(schema: IndexSchema, documents: &[Document]) -> Result<Self> {
        Self::build_with(schema, documents, DEFAULT_MIN_TERM_LEN)
    }

    /// Build an index with an explicit minimum token length.
    pub fn build_with(
        schema: IndexSchema,
        documents: &[Document],
        min_term_len: usize,
    ) -> Result<Self> {
        schema.validate()?;

        let stored: Vec<StoredDocument> = documents
            .iter()
            .map(|doc| store_document(&schema, doc, min_term_len))
            .collect();

        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (doc_idx, doc) in stored.iter().enumerate() {
            for term in &doc.terms {
                postings.entry(term.clone()).or_default().push(doc_idx);
            }
        }

        for list in postings.values_mut() {
            list.sort_unstable();
            list.dedup();
        }

        info!(
            documents = stored.len(),
            terms = postings.len(),
            "Built search index"
        );

        Ok(Self {
            version: INDEX_FORMAT_VERSION,
            schema,
            min_term_len,
            documents: stored,
            postings,
        })
    }

    /// Query the index for the top `limit` ranked hits.
    ///
    /// An empty query (or one with no usable terms) yields no hits rather
    /// than the whole document set. Hit order is the ranking order; ties
    /// fall back to document id so results are deterministic.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query_terms = tokenize_query(query, self.min_term_len);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut scores: HashMap<usize, f32> = HashMap::new();
        for term in &query_terms {
            if let Some(list) = self.postings.get(term) {
                for &doc_idx in list {
                    scores.entry(doc_idx).or_insert_with(|| {
                        let doc = &self.documents[doc_idx];
                        score_document(&query_terms, doc, self.min_term_len)
                    });
                }
            }
        }

        let mut ranked: Vec<(usize, f32)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(doc_idx, _)| {
                let doc = &self.documents[doc_idx];
                SearchHit {
                    href: doc.href.clone().unwrap_or_default(),
                    title: doc.title.clone().unwrap_or_default(),
                }
            })
            .collect()
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Serialize the index to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SearchError::Serialization(e.to_string()))
    }

    /// Serialize the index to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SearchError::Serialization(e.to_string()))
    }

    /// Deserialize an index from JSON.
    ///
    /// Rejects unknown format versions and postings that reference
    /// documents outside the document list, so a damaged asset fails at
    /// load time instead of at query time.
    pub fn from_json(json: &str) -> Result<Self> {
        let index: Self =
            serde_json::from_str(json).map_err(|e| SearchError::Serialization(e.to_string()))?;

        if index.version != INDEX_FORMAT_VERSION {
            return Err(SearchError::Serialization(format!(
                "unsupported index format version: {}",
                index.version
            )));
        }

        for (term, list) in &index.postings {
            if list.iter().any(|&doc_idx| doc_idx >= index.documents.len()) {
                return Err(SearchError::Serialization(format!(
                    "postings for term {term} reference a missing document"
                )));
            }
        }

        Ok(index)
    }

    /// Write the serialized index asset to disk.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;

        if json.len() > MAX_INDEX_ASSET_SIZE {
            warn!(
                size = json.len(),
                max = MAX_INDEX_ASSET_SIZE,
                "Search index asset exceeds recommended size"
            );
        }

        fs::write(path, &json).map_err(|e| SearchError::Io(e.to_string()))?;

        info!(path = %path.display(), size = json.len(), "Wrote search index asset");
        Ok(())
    }
}

fn store_document(schema: &IndexSchema, doc: &Document, min_term_len: usize) -> StoredDocument {
    let mut terms = Vec::new();
    if schema.is_indexed("title") {
        terms.extend(tokenize_text(&doc.title, min_term_len));
    }
    if schema.is_indexed("content") {
        terms.extend(tokenize_text(&doc.content, min_term_len));
    }
    terms.sort();
    terms.dedup();

    StoredDocument {
        id: doc.id,
        href: schema.is_stored("href").then(|| doc.href.clone()),
        title: schema.is_stored("title").then(|| doc.title.clone()),
        terms,
    }
}

/// Title matches outrank content matches; exact title terms outrank prefix
/// matches.
fn score_document(query_terms: &[String], doc: &StoredDocument, min_term_len: usize) -> f32 {
    let title_terms = doc
        .title
        .as_deref()
        .map(|t| tokenize_text(t, min_term_len))
        .unwrap_or_default();

    let mut score = 0.0f32;
    for query_term in query_terms {
        for title_term in &title_terms {
            if title_term == query_term {
                score += 8.0;
            } else if title_term.starts_with(query_term.as_str()) {
                score += 3.0;
            }
        }
        for term in &doc.terms {
            if term == query_term {
                score += 1.0;
            }
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::document::documents_from_pages;
    use sitefind_core::Page;

    fn page(href: &str, title: &str, content: &str) -> Page {
        Page {
            href: href.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            lang: "en".to_string(),
        }
    }

    fn alpha_beta_index() -> SearchIndex {
        let pages = vec![
            page("/a", "Alpha", "alpha page"),
            page("/b", "Beta", "beta page"),
        ];
        let documents = documents_from_pages(&pages);
        SearchIndex::build(IndexSchema::for_pages(), &documents).unwrap()
    }

    #[test]
    fn test_alpha_query_single_hit() {
        let index = alpha_beta_index();

        let hits = index.search("Alpha", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].href, "/a");
        assert_eq!(hits[0].title, "Alpha");
    }

    #[test]
    fn test_empty_query_no_hits() {
        let index = alpha_beta_index();
        assert!(index.search("", 10).is_empty());
        assert!(index.search("   ", 10).is_empty());
    }

    #[test]
    fn test_unmatched_query_no_hits() {
        let index = alpha_beta_index();
        assert!(index.search("zzz", 10).is_empty());
    }

    #[test]
    fn test_shared_term_matches_both() {
        let index = alpha_beta_index();

        let hits = index.search("page", 10);
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert!(hit.href == "/a" || hit.href == "/b");
        }
    }

    #[test]
    fn test_title_match_ranks_first() {
        let pages = vec![
            page("/mentions", "Release notes", "the tracer got faster"),
            page("/tracer", "Tracer guide", "how to run traces"),
        ];
        let documents = documents_from_pages(&pages);
        let index = SearchIndex::build(IndexSchema::for_pages(), &documents).unwrap();

        let hits = index.search("tracer", 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].href, "/tracer");
        assert_eq!(hits[1].href, "/mentions");
    }

    #[test]
    fn test_limit_caps_hits() {
        let pages: Vec<Page> = (0..30)
            .map(|i| page(&format!("/p{i}"), &format!("Page {i}"), "shared topic"))
            .collect();
        let documents = documents_from_pages(&pages);
        let index = SearchIndex::build(IndexSchema::for_pages(), &documents).unwrap();

        let hits = index.search("shared", 10);
        assert_eq!(hits.len(), 10);
    }

    #[test]
    fn test_hits_only_reference_input_hrefs() {
        let pages = vec![
            page("/a", "Alpha", "alpha page"),
            page("/b", "Beta", "beta page"),
            page("/c", "Gamma", "gamma page"),
        ];
        let hrefs: Vec<String> = pages.iter().map(|p| p.href.clone()).collect();
        let documents = documents_from_pages(&pages);
        let index = SearchIndex::build(IndexSchema::for_pages(), &documents).unwrap();

        for hit in index.search("page", 10) {
            assert!(hrefs.contains(&hit.href));
        }
    }

    #[test]
    fn test_content_not_stored() {
        let index = alpha_beta_index();
        let json = index.to_json().unwrap();

        // Content is tokenized into terms but its verbatim value never
        // reaches the serialized asset.
        assert!(!json.contains("alpha page"));
        assert!(json.contains("\"href\":\"/a\""));
    }

    #[test]
    fn test_json_round_trip() {
        let index = alpha_beta_index();
        let parsed = SearchIndex::from_json(&index.to_json().unwrap()).unwrap();

        assert_eq!(parsed.document_count(), 2);
        let hits = parsed.search("beta", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].href, "/b");
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut index = alpha_beta_index();
        index.version = 99;

        let err = SearchIndex::from_json(&index.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("unsupported index format version"));
    }

    #[test]
    fn test_dangling_postings_rejected() {
        let mut index = alpha_beta_index();
        index.postings.insert("alpha".to_string(), vec![99]);

        let err = SearchIndex::from_json(&index.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("missing document"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search-index.json");

        let index = alpha_beta_index();
        index.write_to_file(&path).unwrap();

        let loaded = SearchIndex::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.document_count(), index.document_count());
        assert_eq!(loaded.term_count(), index.term_count());
    }

    #[test]
    fn test_min_term_len_travels_with_index() {
        let pages = vec![page("/go", "Go", "go go go")];
        let documents = documents_from_pages(&pages);
        let index = SearchIndex::build_with(IndexSchema::for_pages(), &documents, 3).unwrap();

        // "go" is below the build-time minimum on both sides
        assert!(index.search("go", 10).is_empty());
    }
}
