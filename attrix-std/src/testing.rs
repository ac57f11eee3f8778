//! Testing utilities for Attrix.
//!
//! This module provides in-memory collaborators so handlers and listeners
//! can be exercised without a browser or a server.
//!
//! # Features
//!
//! - [`MemoryPage`]: An element store implementing [`Page`], with drivers
//!   to fire events and inspect content
//! - [`MockTransport`]: A transport recording requests and answering from a
//!   scripted responder

use attrix_core::{
    DataValue, DynListener, LifecycleEvent, Mutation, Page, PageError, Phase, Request, Response,
    Scope, Selector, Transport, TransportError, Trigger,
};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

// ============================================================================
// Node
// ============================================================================

/// An element stored in a [`MemoryPage`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    tag: String,
    html: String,
    data: Vec<(String, DataValue)>,
    classes: Vec<String>,
    fields: Option<Vec<(String, String)>>,
    valid: Option<bool>,
}

impl Node {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the inner content.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    /// Add a data attribute.
    pub fn data(mut self, name: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.data.push((name.into(), value.into()));
        self
    }

    /// Add a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Make this element a form with the given fields.
    pub fn form<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.fields = Some(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Report client-side validity.
    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }
}

// ============================================================================
// Memory Page
// ============================================================================

type Observer = Arc<dyn Fn(&mut LifecycleEvent) + Send + Sync>;

#[derive(Default)]
struct PageState {
    elements: BTreeMap<String, Node>,
    listeners: Vec<(Scope, String, Arc<dyn DynListener>)>,
    observers: Vec<(Selector, Observer)>,
    lifecycle: Vec<(Selector, Phase)>,
    replaced: Vec<(Selector, String)>,
}

/// An in-memory page.
///
/// Elements are addressed by `#identifier` selectors only.
///
/// # Example
///
/// ```rust,ignore
/// let page = Arc::new(MemoryPage::new().with_element("btn", Node::new("button")));
/// attrix.describe("#btn", Parameters::new())?;
/// page.trigger("#btn", "click").await;
/// assert_eq!(page.html("btn").as_deref(), Some("btn_from_response"));
/// ```
#[derive(Default)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl MemoryPage {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_element(self, id: impl Into<String>, node: Node) -> Self {
        self.insert(id, node);
        self
    }

    /// Insert or replace an element.
    pub fn insert(&self, id: impl Into<String>, node: Node) {
        self.state.lock().unwrap().elements.insert(id.into(), node);
    }

    /// Set (or add) a data attribute on an existing element.
    pub fn set_data(&self, id: &str, name: &str, value: impl Into<DataValue>) {
        let mut state = self.state.lock().unwrap();
        if let Some(node) = state.elements.get_mut(id) {
            let value = value.into();
            match node.data.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => *existing = value,
                None => node.data.push((name.to_owned(), value)),
            }
        }
    }

    /// Change the reported validity of a form.
    pub fn set_valid(&self, id: &str, valid: bool) {
        if let Some(node) = self.state.lock().unwrap().elements.get_mut(id) {
            node.valid = Some(valid);
        }
    }

    /// Inner content of an element.
    pub fn html(&self, id: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .elements
            .get(id)
            .map(|node| node.html.clone())
    }

    /// Whether an element with this identifier exists.
    pub fn contains(&self, id: &str) -> bool {
        self.state.lock().unwrap().elements.contains_key(id)
    }

    /// Content that replaced removed elements, in order.
    pub fn replacements(&self) -> Vec<(Selector, String)> {
        self.state.lock().unwrap().replaced.clone()
    }

    /// Observe lifecycle notifications of one element.
    pub fn on_lifecycle<F>(&self, selector: impl Into<Selector>, observer: F)
    where
        F: Fn(&mut LifecycleEvent) + Send + Sync + 'static,
    {
        self.state
            .lock()
            .unwrap()
            .observers
            .push((selector.into(), Arc::new(observer)));
    }

    /// Every lifecycle notification emitted so far.
    pub fn lifecycle_log(&self) -> Vec<(Selector, Phase)> {
        self.state.lock().unwrap().lifecycle.clone()
    }

    /// Current subscriptions as `(scope, event)` pairs.
    pub fn bindings(&self) -> Vec<(Scope, String)> {
        self.state
            .lock()
            .unwrap()
            .listeners
            .iter()
            .map(|(scope, event, _)| (scope.clone(), event.clone()))
            .collect()
    }

    /// Number of subscriptions.
    pub fn listener_count(&self) -> usize {
        self.state.lock().unwrap().listeners.len()
    }

    /// Fire `event` on `scope`, awaiting every matching listener in
    /// subscription order.
    pub async fn dispatch(&self, scope: Scope, event: &str) -> Trigger {
        // Listeners call back into the page, so the lock is released first.
        let listeners: Vec<Arc<dyn DynListener>> = self
            .state
            .lock()
            .unwrap()
            .listeners
            .iter()
            .filter(|(s, e, _)| *s == scope && e == event)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();

        let mut trigger = Trigger::new(event, scope);
        for listener in listeners {
            listener.on_trigger_dyn(&mut trigger).await;
        }
        trigger
    }

    /// Fire `event` on an element.
    pub async fn trigger(&self, selector: impl Into<Selector>, event: &str) -> Trigger {
        self.dispatch(Scope::Element(selector.into()), event).await
    }

    /// Fire the document `ready` event.
    pub async fn ready(&self) -> Trigger {
        self.dispatch(Scope::Document, "ready").await
    }

    fn with_node<T>(&self, selector: &Selector, f: impl FnOnce(&Node) -> T) -> Option<T> {
        let id = selector.id_part()?;
        self.state.lock().unwrap().elements.get(id).map(f)
    }
}

impl Page for MemoryPage {
    fn exists(&self, selector: &Selector) -> bool {
        self.with_node(selector, |_| ()).is_some()
    }

    fn id_of(&self, selector: &Selector) -> Option<String> {
        let id = selector.id_part()?;
        self.contains(id).then(|| id.to_owned())
    }

    fn tag_name(&self, selector: &Selector) -> Option<String> {
        self.with_node(selector, |node| node.tag.to_ascii_lowercase())
    }

    fn data(&self, selector: &Selector) -> Vec<(String, DataValue)> {
        self.with_node(selector, |node| node.data.clone())
            .unwrap_or_default()
    }

    fn subscribe(&self, scope: Scope, event: &str, listener: Arc<dyn DynListener>) {
        self.state
            .lock()
            .unwrap()
            .listeners
            .push((scope, event.to_owned(), listener));
    }

    fn emit(&self, selector: &Selector, event: &mut LifecycleEvent) {
        let observers: Vec<Observer> = {
            let mut state = self.state.lock().unwrap();
            state.lifecycle.push((selector.clone(), event.phase()));
            state
                .observers
                .iter()
                .filter(|(s, _)| s == selector)
                .map(|(_, observer)| Arc::clone(observer))
                .collect()
        };
        for observer in observers {
            observer(event);
        }
    }

    fn apply(&self, selector: &Selector, mutation: Mutation) -> Result<(), PageError> {
        let not_found = || PageError::ElementNotFound(selector.clone());
        let id = selector.id_part().ok_or_else(not_found)?;
        let mut state = self.state.lock().unwrap();

        match mutation {
            Mutation::Remove => {
                state.elements.remove(id).ok_or_else(not_found)?;
            }
            Mutation::Replace(html) => {
                state.elements.remove(id).ok_or_else(not_found)?;
                state.replaced.push((selector.clone(), html));
            }
            mutation => {
                let node = state.elements.get_mut(id).ok_or_else(not_found)?;
                match mutation {
                    Mutation::Fill(html) => node.html = html,
                    Mutation::Append(html) => node.html.push_str(&html),
                    Mutation::Prepend(html) => node.html.insert_str(0, &html),
                    Mutation::Empty => node.html.clear(),
                    Mutation::Remove | Mutation::Replace(_) => {}
                }
            }
        }
        Ok(())
    }

    fn form_validity(&self, form: &Selector) -> Option<bool> {
        self.with_node(form, |node| node.valid).flatten()
    }

    fn serialize_form(&self, form: &Selector) -> Option<Vec<(String, String)>> {
        self.with_node(form, |node| node.fields.clone()).flatten()
    }

    fn with_class(&self, class: &str) -> Vec<Selector> {
        self.state
            .lock()
            .unwrap()
            .elements
            .iter()
            .filter(|(_, node)| node.classes.iter().any(|c| c == class))
            .map(|(id, _)| Selector::id(id))
            .collect()
    }
}

// ============================================================================
// Mock Transport
// ============================================================================

type Responder = Box<dyn Fn(&Request) -> Result<Response, TransportError> + Send + Sync>;

/// A transport that records requests and answers from a responder.
///
/// The default responder echoes the operation identifier as
/// `"{op}_from_response"` with status 200.
pub struct MockTransport {
    requests: Mutex<Vec<Request>>,
    responder: Responder,
}

impl MockTransport {
    /// Create a transport with the echo responder.
    pub fn new() -> Self {
        Self::with_responder(|request| {
            Ok(Response::ok(format!("{}_from_response", request.payload.op())))
        })
    }

    /// Create a transport answering with `responder`.
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&Request) -> Result<Response, TransportError> + Send + Sync + 'static,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Requests sent so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests sent.
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let outcome = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrix_core::Payload;

    #[test]
    fn mutations_follow_content_semantics() {
        let page = MemoryPage::new().with_element("box", Node::new("div").html("box"));
        let sel = Selector::id("box");

        page.apply(&sel, Mutation::Append("!".into())).unwrap();
        page.apply(&sel, Mutation::Prepend("<".into())).unwrap();
        assert_eq!(page.html("box").as_deref(), Some("<box!"));

        page.apply(&sel, Mutation::Empty).unwrap();
        assert_eq!(page.html("box").as_deref(), Some(""));

        page.apply(&sel, Mutation::Replace("<p/>".into())).unwrap();
        assert!(!page.contains("box"));
        assert_eq!(page.replacements(), vec![(sel.clone(), "<p/>".to_string())]);

        assert_eq!(
            page.apply(&sel, Mutation::Fill("x".into())),
            Err(PageError::ElementNotFound(sel))
        );
    }

    #[test]
    fn forms_report_fields_and_validity() {
        let page = MemoryPage::new()
            .with_element("f", Node::new("form").form([("q", "rust")]).valid(true))
            .with_element("plain", Node::new("div"));

        assert_eq!(page.form_validity(&Selector::id("f")), Some(true));
        assert_eq!(
            page.serialize_form(&Selector::id("f")),
            Some(vec![("q".to_string(), "rust".to_string())])
        );
        assert_eq!(page.form_validity(&Selector::id("plain")), None);
        assert_eq!(page.serialize_form(&Selector::id("plain")), None);
    }

    #[tokio::test]
    async fn echo_responder_uses_op() {
        let transport = MockTransport::new();
        let response = transport
            .send(Request::new(Default::default(), Payload::new("box")))
            .await
            .unwrap();

        assert_eq!(response.body, "box_from_response");
        assert_eq!(transport.count(), 1);
    }
}
