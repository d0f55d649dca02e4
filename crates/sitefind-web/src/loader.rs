//! Lazy loading of the search dependencies.
//!
//! The controller defers its two dependencies until the first focus event:
//! the search library script, inserted into `<head>`, and the serialized
//! index asset, fetched and parsed into an owned handle. The two loads run
//! as one async chain, library first, so the index never executes against
//! a half-loaded library, and every failure surfaces as a `LoadError`
//! instead of leaving an untracked callback behind.

use gloo_net::http::Request;
use js_sys::Promise;
use sitefind_index::SearchIndex;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlScriptElement};

use crate::controller::ControllerOptions;

/// Error type for dependency loading.
#[derive(Debug)]
pub enum LoadError {
    /// A script element failed to load or execute.
    Script(String),
    /// Network error while fetching the index asset.
    Network(String),
    /// Non-success HTTP status for the index asset.
    Http { url: String, status: u16 },
    /// The index asset could not be parsed.
    Parse(String),
    /// DOM manipulation failed.
    Dom(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Script(e) => write!(f, "Script error: {e}"),
            LoadError::Network(e) => write!(f, "Network error: {e}"),
            LoadError::Http { url, status } => {
                write!(f, "Failed to fetch {url}: HTTP {status}")
            }
            LoadError::Parse(e) => write!(f, "Parse error: {e}"),
            LoadError::Dom(e) => write!(f, "DOM error: {e}"),
        }
    }
}

impl From<LoadError> for JsValue {
    fn from(err: LoadError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Load the search dependencies in their fixed order: the library script,
/// then the serialized index.
pub async fn load_dependencies(
    document: &Document,
    options: &ControllerOptions,
) -> Result<SearchIndex, LoadError> {
    load_script(document, &options.library_src).await?;
    fetch_index(&options.index_src).await
}

/// Insert a `<script>` element into `<head>` and wait for it to load.
///
/// The element keeps document order (`async = false`) without blocking the
/// parser (`defer`), matching how the asset pipeline serves the library.
pub async fn load_script(document: &Document, src: &str) -> Result<(), LoadError> {
    let script: HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| LoadError::Dom(format!("{e:?}")))?
        .dyn_into()
        .map_err(|_| LoadError::Dom("created element is not a script".to_string()))?;

    script.set_defer(true);
    script.set_async(false);
    script.set_src(src);

    let loaded = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });

    let head = document
        .head()
        .ok_or_else(|| LoadError::Dom("document has no head".to_string()))?;
    head.append_child(&script)
        .map_err(|e| LoadError::Dom(format!("{e:?}")))?;

    JsFuture::from(loaded)
        .await
        .map_err(|_| LoadError::Script(format!("failed to load {src}")))?;

    Ok(())
}

/// Fetch and parse the serialized index asset.
pub async fn fetch_index(src: &str) -> Result<SearchIndex, LoadError> {
    let response = Request::get(src)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(LoadError::Http {
            url: src.to_string(),
            status: response.status(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    SearchIndex::from_json(&body).map_err(|e| LoadError::Parse(e.to_string()))
}
