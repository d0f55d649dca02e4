//! The search controller.
//!
//! Binds one text input and one results container, lazily loads the search
//! dependencies on first focus, and re-queries the index on every keyup
//! once ready. Hits render as `<li><a>` entries in ranking order and the
//! container carries a `has-hits` class whenever at least one hit is shown.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use serde::Deserialize;
use sitefind_index::{SearchHit, SearchIndex};
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlInputElement};

use crate::loader;

/// Default number of hits rendered per query.
pub const DEFAULT_HIT_LIMIT: usize = 10;

/// Class set on the results container while it holds at least one hit.
pub const HAS_HITS_CLASS: &str = "has-hits";

/// Class set on the results container when dependency loading failed.
pub const LOAD_FAILED_CLASS: &str = "search-failed";

/// Controller configuration, deserializable from a JS options object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerOptions {
    /// Selector of the search text input.
    #[serde(default = "default_input_selector")]
    pub input_selector: String,

    /// Selector of the results container.
    #[serde(default = "default_results_selector")]
    pub results_selector: String,

    /// URL of the search library script, loaded first.
    pub library_src: String,

    /// URL of the serialized index asset, loaded second.
    pub index_src: String,

    /// Maximum number of rendered hits.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_input_selector() -> String {
    "#sitefind-search-input".to_string()
}

fn default_results_selector() -> String {
    "#sitefind-search-results".to_string()
}

fn default_limit() -> usize {
    DEFAULT_HIT_LIMIT
}

/// Controller lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing loaded; waiting for the first focus.
    Uninitialized,
    /// Dependencies are loading.
    Loading,
    /// Index loaded; queries run on every keystroke.
    Ready,
    /// Dependency loading failed; search stays off for this page view.
    Failed,
}

/// Single-shot gate guarding the loading sequence.
///
/// `begin` succeeds exactly once per page lifetime, no matter how many
/// focus events fire and regardless of how the load ends.
#[derive(Debug)]
pub struct LoadGate {
    phase: Cell<Phase>,
}

impl LoadGate {
    pub fn new() -> Self {
        Self {
            phase: Cell::new(Phase::Uninitialized),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    /// Try to start loading. Returns `true` only on the first call.
    pub fn begin(&self) -> bool {
        if self.phase.get() == Phase::Uninitialized {
            self.phase.set(Phase::Loading);
            true
        } else {
            false
        }
    }

    /// Mark loading as complete.
    pub fn finish(&self) {
        debug_assert_eq!(self.phase.get(), Phase::Loading);
        self.phase.set(Phase::Ready);
    }

    /// Mark loading as failed.
    pub fn fail(&self) {
        debug_assert_eq!(self.phase.get(), Phase::Loading);
        self.phase.set(Phase::Failed);
    }
}

impl Default for LoadGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised while binding the controller to the page.
#[derive(Debug)]
pub enum ControllerError {
    /// No window or document is available.
    NoDocument,
    /// No element matched the configured selector.
    MissingElement(String),
    /// The input selector matched something that is not a text input.
    NotAnInput(String),
    /// DOM manipulation failed.
    Dom(String),
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::NoDocument => write!(f, "no document available"),
            ControllerError::MissingElement(sel) => {
                write!(f, "no element matches selector {sel}")
            }
            ControllerError::NotAnInput(sel) => {
                write!(f, "element at {sel} is not an input")
            }
            ControllerError::Dom(e) => write!(f, "DOM error: {e}"),
        }
    }
}

impl From<ControllerError> for JsValue {
    fn from(err: ControllerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn dom_error(value: JsValue) -> ControllerError {
    ControllerError::Dom(format!("{value:?}"))
}

/// The search controller bound to one input and one results container.
///
/// The index handle is owned here: it is written once, either by the lazy
/// load path or through [`SearchController::provide_index`], and read on
/// every query.
pub struct SearchController {
    inner: Rc<Inner>,
}

struct Inner {
    document: Document,
    input: HtmlInputElement,
    results: Element,
    options: ControllerOptions,
    gate: LoadGate,
    index: RefCell<Option<SearchIndex>>,
    focus_hook: RefCell<Option<Closure<dyn FnMut()>>>,
    keyup_hook: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl SearchController {
    /// Bind a controller to the page.
    ///
    /// Fails fast with a typed error when the DOM contract is not met.
    pub fn new(options: ControllerOptions) -> Result<Self, ControllerError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ControllerError::NoDocument)?;

        let input = document
            .query_selector(&options.input_selector)
            .map_err(dom_error)?
            .ok_or_else(|| ControllerError::MissingElement(options.input_selector.clone()))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| ControllerError::NotAnInput(options.input_selector.clone()))?;

        let results = document
            .query_selector(&options.results_selector)
            .map_err(dom_error)?
            .ok_or_else(|| ControllerError::MissingElement(options.results_selector.clone()))?;

        Ok(Self {
            inner: Rc::new(Inner {
                document,
                input,
                results,
                options,
                gate: LoadGate::new(),
                index: RefCell::new(None),
                focus_hook: RefCell::new(None),
                keyup_hook: RefCell::new(None),
            }),
        })
    }

    /// Register the focus and keyup hooks on the bound input.
    pub fn attach(&self) -> Result<(), ControllerError> {
        let inner = Rc::clone(&self.inner);
        let focus = Closure::<dyn FnMut()>::new(move || Inner::begin_load(&inner));
        self.inner
            .input
            .add_event_listener_with_callback("focus", focus.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        self.inner.focus_hook.replace(Some(focus));

        let inner = Rc::clone(&self.inner);
        let keyup = Closure::<dyn FnMut()>::new(move || {
            if inner.gate.phase() == Phase::Ready {
                inner.run_search();
            }
        });
        self.inner
            .input
            .add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        self.inner.keyup_hook.replace(Some(keyup));

        Ok(())
    }

    /// Remove both hooks from the input.
    pub fn detach(&self) {
        self.inner.detach_focus();
        if let Some(hook) = self.inner.keyup_hook.borrow().as_ref() {
            let _ = self
                .inner
                .input
                .remove_event_listener_with_callback("keyup", hook.as_ref().unchecked_ref());
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.inner.gate.phase()
    }

    /// Install an already-loaded index, skipping the network path.
    ///
    /// Honored only before loading has started; returns whether the index
    /// was installed. This is the injection seam for embedders and tests.
    pub fn provide_index(&self, index: SearchIndex) -> bool {
        if !self.inner.gate.begin() {
            return false;
        }
        self.inner.index.replace(Some(index));
        self.inner.gate.finish();
        true
    }

    /// Run one query with the input's current value.
    pub fn refresh(&self) {
        self.inner.run_search();
    }
}

impl Inner {
    /// First-focus handler: runs the loading sequence at most once.
    fn begin_load(inner: &Rc<Inner>) {
        if !inner.gate.begin() {
            return;
        }

        inner.detach_focus();
        // Blocks premature submission while dependencies are on the wire
        inner.input.set_required(true);

        let inner = Rc::clone(inner);
        spawn_local(async move {
            match loader::load_dependencies(&inner.document, &inner.options).await {
                Ok(index) => {
                    inner.index.replace(Some(index));
                    inner.input.set_required(false);
                    inner.gate.finish();
                    // Covers anything typed while the assets were loading
                    inner.run_search();
                }
                Err(err) => {
                    inner.input.set_required(false);
                    inner.gate.fail();
                    let _ = inner.results.class_list().add_1(LOAD_FAILED_CLASS);
                    log::error!("search is unavailable: {err}");
                }
            }
        });
    }

    fn detach_focus(&self) {
        // The closure itself stays allocated: this runs from inside it.
        if let Some(hook) = self.focus_hook.borrow().as_ref() {
            let _ = self
                .input
                .remove_event_listener_with_callback("focus", hook.as_ref().unchecked_ref());
        }
    }

    fn run_search(&self) {
        if let Err(err) = self.render_current_query() {
            log::error!("failed to render search results: {err:?}");
        }
    }

    fn render_current_query(&self) -> Result<(), JsValue> {
        while let Some(child) = self.results.first_child() {
            self.results.remove_child(&child)?;
        }

        let query = self.input.value();
        let classes = self.results.class_list();

        if query.is_empty() {
            classes.remove_1(HAS_HITS_CLASS)?;
            return Ok(());
        }

        let guard = self.index.borrow();
        let Some(index) = guard.as_ref() else {
            return Ok(());
        };

        let hits = index.search(&query, self.options.limit);
        if hits.is_empty() {
            classes.remove_1(HAS_HITS_CLASS)?;
        } else {
            classes.add_1(HAS_HITS_CLASS)?;
        }

        for hit in &hits {
            self.append_hit(hit)?;
        }

        Ok(())
    }

    fn append_hit(&self, hit: &SearchHit) -> Result<(), JsValue> {
        let item = self.document.create_element("li")?;
        let anchor: HtmlAnchorElement = self
            .document
            .create_element("a")?
            .dyn_into()
            .map_err(JsValue::from)?;

        anchor.set_href(&hit.href);
        anchor.set_text_content(Some(&hit.title));

        item.append_child(&anchor)?;
        self.results.append_child(&item)?;
        Ok(())
    }
}
