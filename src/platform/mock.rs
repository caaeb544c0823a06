//! In-memory platform adapter used by the crate's tests.
//!
//! Simulates both host variants: a standard streaming API whose opened
//! streams are recorded and can be driven from tests, and a legacy document
//! holding a small element tree with id lookup and event dispatch.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use url::Url;

use crate::capability::Capability;
use crate::error::{Error, Result};
use crate::identifiers::InstanceId;

use super::{DataCallback, Document, ElementRef, ErrorCallback, Platform, StreamHandle};

// ============================================================================
// MockStream
// ============================================================================

/// Recorded native stream that tests drive by hand.
pub(crate) struct MockStream {
    url: Url,
    closed: AtomicBool,
    on_data: DataCallback,
    on_error: ErrorCallback,
}

impl MockStream {
    /// Returns the URL the stream was opened against.
    pub(crate) fn url(&self) -> &Url {
        &self.url
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Delivers one payload, as the host event loop would.
    pub(crate) fn emit_data(&self, payload: &str) {
        (self.on_data)(payload.to_string());
    }

    /// Delivers one error, as the host event loop would.
    pub(crate) fn emit_error(&self, error: Error) {
        (self.on_error)(error);
    }
}

struct MockStreamHandle(Arc<MockStream>);

impl StreamHandle for MockStreamHandle {
    fn close(&self) {
        self.0.closed.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// InMemoryDocument
// ============================================================================

struct Node {
    tag: String,
    dom_id: Option<String>,
    src: Option<Url>,
    parent: Option<u64>,
    children: Vec<u64>,
    listeners: FxHashMap<String, DataCallback>,
    error_handler: Option<ErrorCallback>,
}

#[derive(Default)]
struct DocState {
    nodes: FxHashMap<u64, Node>,
    body: Vec<u64>,
    closed_streams: Vec<String>,
}

/// Minimal element tree standing in for the host document.
#[derive(Default)]
pub(crate) struct InMemoryDocument {
    next_ref: AtomicU64,
    /// When set, markup injection silently produces no element, like a
    /// host whose draft implementation rejects the custom tag.
    drop_injections: AtomicBool,
    state: Mutex<DocState>,
}

impl InMemoryDocument {
    fn alloc(&self, state: &mut DocState, tag: &str) -> u64 {
        let key = self.next_ref.fetch_add(1, Ordering::Relaxed);
        state.nodes.insert(
            key,
            Node {
                tag: tag.to_string(),
                dom_id: None,
                src: None,
                parent: None,
                children: Vec::new(),
                listeners: FxHashMap::default(),
                error_handler: None,
            },
        );
        key
    }

    /// Number of live elements with the given tag.
    pub(crate) fn count_by_tag(&self, tag: &str) -> usize {
        let state = self.state.lock();
        state.nodes.values().filter(|n| n.tag == tag).count()
    }

    /// Returns `true` if an element with the given DOM id is live.
    pub(crate) fn has_id(&self, dom_id: &str) -> bool {
        let state = self.state.lock();
        state
            .nodes
            .values()
            .any(|n| n.dom_id.as_deref() == Some(dom_id))
    }

    /// Source URL recorded on the element with the given DOM id.
    pub(crate) fn src_of(&self, dom_id: &str) -> Option<Url> {
        let state = self.state.lock();
        state
            .nodes
            .values()
            .find(|n| n.dom_id.as_deref() == Some(dom_id))
            .and_then(|n| n.src.clone())
    }

    /// DOM ids whose streams were closed via `close_stream`.
    pub(crate) fn closed_streams(&self) -> Vec<String> {
        self.state.lock().closed_streams.clone()
    }

    /// Fires a named custom event on the element with the given DOM id.
    pub(crate) fn dispatch(&self, dom_id: &str, event: &str, payload: &str) {
        let listener = {
            let state = self.state.lock();
            state
                .nodes
                .values()
                .find(|n| n.dom_id.as_deref() == Some(dom_id))
                .and_then(|n| n.listeners.get(event).cloned())
        };
        if let Some(listener) = listener {
            listener(payload.to_string());
        }
    }

    /// Fires the error handler on the element with the given DOM id.
    pub(crate) fn dispatch_error(&self, dom_id: &str, error: Error) {
        let handler = {
            let state = self.state.lock();
            state
                .nodes
                .values()
                .find(|n| n.dom_id.as_deref() == Some(dom_id))
                .and_then(|n| n.error_handler.clone())
        };
        if let Some(handler) = handler {
            handler(error);
        }
    }
}

impl Document for InMemoryDocument {
    fn create_container(&self) -> ElementRef {
        let mut state = self.state.lock();
        ElementRef(self.alloc(&mut state, "div"))
    }

    fn append_to_body(&self, container: ElementRef) {
        let mut state = self.state.lock();
        state.body.push(container.0);
    }

    fn inject_event_source(&self, container: ElementRef, url: &Url, id: InstanceId) {
        if self.drop_injections.load(Ordering::SeqCst) {
            return;
        }

        let mut state = self.state.lock();
        let child = self.alloc(&mut state, "event-source");
        if let Some(node) = state.nodes.get_mut(&child) {
            node.dom_id = Some(id.dom_id());
            node.src = Some(url.clone());
            node.parent = Some(container.0);
        }
        if let Some(parent) = state.nodes.get_mut(&container.0) {
            parent.children.push(child);
        }
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        let state = self.state.lock();
        state
            .nodes
            .iter()
            .find(|(_, n)| n.dom_id.as_deref() == Some(id))
            .map(|(key, _)| ElementRef(*key))
    }

    fn add_event_listener(&self, element: ElementRef, event: &str, callback: DataCallback) {
        let mut state = self.state.lock();
        if let Some(node) = state.nodes.get_mut(&element.0) {
            node.listeners.insert(event.to_string(), callback);
        }
    }

    fn set_error_handler(&self, element: ElementRef, callback: ErrorCallback) {
        let mut state = self.state.lock();
        if let Some(node) = state.nodes.get_mut(&element.0) {
            node.error_handler = Some(callback);
        }
    }

    fn parent(&self, element: ElementRef) -> Option<ElementRef> {
        let state = self.state.lock();
        state
            .nodes
            .get(&element.0)
            .and_then(|n| n.parent)
            .map(ElementRef)
    }

    fn remove(&self, element: ElementRef) {
        let mut state = self.state.lock();
        let mut pending = vec![element.0];
        while let Some(key) = pending.pop() {
            if let Some(node) = state.nodes.remove(&key) {
                pending.extend(node.children);
            }
        }
        state.body.retain(|key| *key != element.0);
    }

    fn close_stream(&self, element: ElementRef) {
        let mut state = self.state.lock();
        let dom_id = state
            .nodes
            .get(&element.0)
            .and_then(|n| n.dom_id.clone())
            .unwrap_or_default();
        state.closed_streams.push(dom_id);
    }
}

// ============================================================================
// MockPlatform
// ============================================================================

/// Configurable host environment for tests.
pub(crate) struct MockPlatform {
    standard: bool,
    legacy: bool,
    document: InMemoryDocument,
    streams: Mutex<Vec<Arc<MockStream>>>,
}

impl MockPlatform {
    fn new(standard: bool, legacy: bool) -> Self {
        Self {
            standard,
            legacy,
            document: InMemoryDocument::default(),
            streams: Mutex::new(Vec::new()),
        }
    }

    /// Host exposing the standard streaming API.
    pub(crate) fn standard() -> Self {
        Self::new(true, false)
    }

    /// Host exposing only the legacy draft API.
    pub(crate) fn legacy_only() -> Self {
        Self::new(false, true)
    }

    /// Legacy host whose document silently drops markup injection.
    pub(crate) fn legacy_with_failing_injection() -> Self {
        let platform = Self::new(false, true);
        platform
            .document
            .drop_injections
            .store(true, Ordering::SeqCst);
        platform
    }

    /// Host exposing both mechanisms.
    pub(crate) fn standard_and_legacy() -> Self {
        Self::new(true, true)
    }

    /// Host exposing neither mechanism.
    pub(crate) fn unsupported() -> Self {
        Self::new(false, false)
    }

    /// Streams opened through this platform, in order.
    pub(crate) fn streams(&self) -> Vec<Arc<MockStream>> {
        self.streams.lock().clone()
    }

    /// The in-memory document, for direct inspection and event dispatch.
    pub(crate) fn doc(&self) -> &InMemoryDocument {
        &self.document
    }
}

impl Platform for MockPlatform {
    fn has_standard_api(&self) -> bool {
        self.standard
    }

    fn has_legacy_api(&self) -> bool {
        self.legacy
    }

    fn open_stream(
        &self,
        url: &Url,
        on_data: DataCallback,
        on_error: ErrorCallback,
    ) -> Result<Box<dyn StreamHandle>> {
        if !self.standard {
            return Err(Error::unsupported(Capability::probe(self)));
        }

        let stream = Arc::new(MockStream {
            url: url.clone(),
            closed: AtomicBool::new(false),
            on_data,
            on_error,
        });
        self.streams.lock().push(Arc::clone(&stream));

        Ok(Box::new(MockStreamHandle(stream)))
    }

    fn document(&self) -> Option<&dyn Document> {
        self.legacy.then_some(&self.document as &dyn Document)
    }
}
