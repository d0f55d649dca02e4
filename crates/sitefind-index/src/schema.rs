//! Index schema declaration.
//!
//! The schema names the document fields and declares, per field, whether it
//! is tokenized into the postings (indexed) and whether its verbatim value
//! is kept in the serialized index for display (stored). It travels with
//! the serialized index so the runtime knows what a hit can project.

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Field names a schema may declare.
pub const KNOWN_FIELDS: [&str; 3] = ["title", "content", "href"];

/// Declaration for a single document field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,

    /// Whether the field's text is tokenized and searchable.
    pub indexed: bool,

    /// Whether the field's verbatim value is retrievable from a hit.
    pub stored: bool,
}

/// Schema for one built index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexSchema {
    /// Name of the identity field.
    pub id_field: String,

    /// Declared fields.
    pub fields: Vec<FieldSpec>,
}

impl IndexSchema {
    /// The schema used for site pages: `title` and `content` searchable,
    /// `title` and `href` retrievable from a hit.
    pub fn for_pages() -> Self {
        Self {
            id_field: "id".to_string(),
            fields: vec![
                FieldSpec {
                    name: "title".to_string(),
                    indexed: true,
                    stored: true,
                },
                FieldSpec {
                    name: "content".to_string(),
                    indexed: true,
                    stored: false,
                },
                FieldSpec {
                    name: "href".to_string(),
                    indexed: false,
                    stored: true,
                },
            ],
        }
    }

    /// Validate the schema before building an index.
    pub fn validate(&self) -> Result<()> {
        if self.id_field.is_empty() {
            return Err(SearchError::Schema("id field name is empty".to_string()));
        }

        if !self.fields.iter().any(|f| f.indexed) {
            return Err(SearchError::Schema(
                "schema declares no indexed field".to_string(),
            ));
        }

        for field in &self.fields {
            if !KNOWN_FIELDS.contains(&field.name.as_str()) {
                return Err(SearchError::Schema(format!(
                    "unknown field: {}",
                    field.name
                )));
            }
            if !field.indexed && !field.stored {
                return Err(SearchError::Schema(format!(
                    "field {} is neither indexed nor stored",
                    field.name
                )));
            }
        }

        Ok(())
    }

    /// Whether the named field is tokenized into the postings.
    pub fn is_indexed(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name && f.indexed)
    }

    /// Whether the named field's verbatim value is kept for display.
    pub fn is_stored(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name && f.stored)
    }
}
