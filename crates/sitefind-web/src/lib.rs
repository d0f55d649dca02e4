//! Sitefind Web Runtime
//!
//! Browser-side search controller compiled to WebAssembly. Wires a text
//! input to the site's serialized search index: dependencies load lazily on
//! the first focus, every keystroke re-queries once ready, and the top hits
//! render as links in the results container.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import { SearchWidget } from 'sitefind-web';
//!
//! const widget = new SearchWidget({
//!   librarySrc: '/js/search-lib.min.js',
//!   indexSrc: '/search-index.json',
//! });
//! widget.attach();
//! ```

pub mod controller;
pub mod loader;

pub use controller::{
    ControllerError, ControllerOptions, LoadGate, Phase, SearchController, DEFAULT_HIT_LIMIT,
    HAS_HITS_CLASS, LOAD_FAILED_CLASS,
};
pub use loader::{fetch_index, load_script, LoadError};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up the panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Get the version of the search runtime.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// JS-facing search widget: construct with an options object, then attach.
#[wasm_bindgen]
pub struct SearchWidget {
    controller: SearchController,
}

#[wasm_bindgen]
impl SearchWidget {
    /// Bind a widget to the page.
    ///
    /// `options` is a plain object with `librarySrc` and `indexSrc`, plus
    /// optional `inputSelector`, `resultsSelector`, and `limit`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<SearchWidget, JsValue> {
        let options: ControllerOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let controller = SearchController::new(options)?;
        Ok(Self { controller })
    }

    /// Register the focus and keyup hooks.
    pub fn attach(&self) -> Result<(), JsValue> {
        self.controller.attach().map_err(JsValue::from)
    }

    /// Remove the hooks again.
    pub fn detach(&self) {
        self.controller.detach();
    }

    /// Whether the index is loaded and queries run on keystrokes.
    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.controller.phase() == Phase::Ready
    }

    /// Re-run the query for the input's current value.
    pub fn refresh(&self) {
        self.controller.refresh();
    }
}
