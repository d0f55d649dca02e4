//! Page input model.
//!
//! A `Page` is one rendered site page as handed over by the site-generation
//! pipeline: a site-relative permalink, a resolved title, and the plain-text
//! rendering of the page body. Title fallback for untitled pages is the
//! pipeline's responsibility; by the time a page reaches sitefind its title
//! is final.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};

/// One rendered site page, ready for indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Site-relative permalink, e.g. `/usage/getting-started/`.
    pub href: String,

    /// Resolved page title.
    pub title: String,

    /// Plain-text page content.
    #[serde(default)]
    pub content: String,

    /// Language code of the page.
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

impl Page {
    /// Load a pages manifest (a JSON array of pages) from disk.
    pub fn load_manifest(path: &Path) -> Result<Vec<Page>> {
        let raw = fs::read_to_string(path)?;

        let pages: Vec<Page> = serde_json::from_str(&raw)
            .map_err(|e| CoreError::manifest(path, e.to_string()))?;

        debug!(count = pages.len(), path = %path.display(), "Loaded pages manifest");
        Ok(pages)
    }
}
