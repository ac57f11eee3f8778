//! # Element Capability (Page)
//!
//! Attrix never talks to a rendering library directly. Element lookup,
//! data attributes, event subscription and content mutation all go through
//! the [`Page`] trait, implemented by the host environment.
//!
//! Elements are addressed by [`Selector`]s of the form `#identifier`.

use crate::{
    error::PageError,
    listener::DynListener,
    value::{DataValue, Payload},
};
use std::{fmt, sync::Arc};

/// Address of an element, usually `#identifier`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector(String);

impl Selector {
    /// Wrap a raw selector string.
    pub fn new(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    /// Build the selector addressing the element with the given identifier.
    ///
    /// An identifier already written as `#id` is taken as is.
    pub fn id(id: &str) -> Self {
        Self(format!("#{}", id.strip_prefix('#').unwrap_or(id)))
    }

    /// The raw selector string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier part of an `#identifier` selector.
    pub fn id_part(&self) -> Option<&str> {
        self.0.strip_prefix('#').filter(|id| !id.is_empty())
    }

    /// Whether the selector can address nothing (empty or a bare `#`).
    pub fn is_degenerate(&self) -> bool {
        let trimmed = self.0.trim();
        trimmed.is_empty() || trimmed == "#"
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Selector> for Selector {
    fn from(value: &Selector) -> Self {
        value.clone()
    }
}

/// One selector or an ordered collection of them.
///
/// Always normalized to a sequence; entries are processed in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Elements(Vec<Selector>);

impl Elements {
    /// The normalized selector sequence.
    pub fn as_slice(&self) -> &[Selector] {
        &self.0
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the descriptor holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Elements {
    type Item = Selector;
    type IntoIter = std::vec::IntoIter<Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Selector> for Elements {
    fn from(value: Selector) -> Self {
        Self(vec![value])
    }
}

impl From<&str> for Elements {
    fn from(value: &str) -> Self {
        Self(vec![Selector::from(value)])
    }
}

impl From<String> for Elements {
    fn from(value: String) -> Self {
        Self(vec![Selector::from(value)])
    }
}

impl<S: Into<Selector>> From<Vec<S>> for Elements {
    fn from(value: Vec<S>) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<Selector>, const N: usize> From<[S; N]> for Elements {
    fn from(value: [S; N]) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<Selector>> FromIterator<S> for Elements {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Where an event subscription is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Document-wide scope; used for `ready`, which fires once per page load.
    Document,
    /// Events dispatched on one element.
    Element(Selector),
}

/// A content change applied to a target element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Replace the inner content.
    Fill(String),
    /// Replace the element itself with new content.
    Replace(String),
    /// Insert content after the existing content.
    Append(String),
    /// Insert content before the existing content.
    Prepend(String),
    /// Remove all inner content.
    Empty,
    /// Remove the element.
    Remove,
}

/// Phase of a request lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Emitted before a request is sent. Cancelable.
    Before,
    /// Emitted after a request completed, whatever its outcome.
    After,
}

/// A lifecycle notification scoped to the source element.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleEvent {
    phase: Phase,
    payload: Option<Payload>,
    form: Vec<(String, String)>,
    canceled: bool,
}

impl LifecycleEvent {
    /// Build the cancelable notification emitted before a request.
    pub fn before(payload: Payload, form: Vec<(String, String)>) -> Self {
        Self {
            phase: Phase::Before,
            payload: Some(payload),
            form,
            canceled: false,
        }
    }

    /// Build the notification emitted after a request completed.
    pub fn after() -> Self {
        Self {
            phase: Phase::After,
            payload: None,
            form: Vec::new(),
            canceled: false,
        }
    }

    /// The lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The request payload, for `Before` notifications.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Mutable access to the payload, letting observers adjust the request.
    pub fn payload_mut(&mut self) -> Option<&mut Payload> {
        self.payload.as_mut()
    }

    /// Serialized form fields about to be merged into the request.
    pub fn form_fields(&self) -> &[(String, String)] {
        &self.form
    }

    /// Veto the request. Has no effect on `After` notifications.
    pub fn cancel(&mut self) {
        if self.phase == Phase::Before {
            self.canceled = true;
        }
    }

    /// Whether an observer vetoed the request.
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Split the notification back into its payload and form fields.
    pub fn into_parts(self) -> (Option<Payload>, Vec<(String, String)>) {
        (self.payload, self.form)
    }
}

/// The host document, as seen by Attrix.
///
/// Implementations are expected to use interior mutability: Attrix shares
/// one page between the registry and every bound listener.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an Attrix page",
    label = "missing `Page` implementation",
    note = "Hosts must implement `Page` to expose element lookup, events and mutation."
)]
pub trait Page: Send + Sync + 'static {
    /// Whether any element matches the selector.
    fn exists(&self, selector: &Selector) -> bool;

    /// The identifier of the matched element.
    fn id_of(&self, selector: &Selector) -> Option<String>;

    /// The lowercase tag name of the matched element.
    fn tag_name(&self, selector: &Selector) -> Option<String>;

    /// Raw data attributes of the matched element, in document order.
    fn data(&self, selector: &Selector) -> Vec<(String, DataValue)>;

    /// Attach a listener for `event` on the given scope.
    fn subscribe(&self, scope: Scope, event: &str, listener: Arc<dyn DynListener>);

    /// Deliver a lifecycle notification to observers of the element.
    fn emit(&self, selector: &Selector, event: &mut LifecycleEvent);

    /// Apply a content mutation to the matched element.
    fn apply(&self, selector: &Selector, mutation: Mutation) -> Result<(), PageError>;

    /// Client-side validity of a form, or `None` when unsupported.
    fn form_validity(&self, form: &Selector) -> Option<bool>;

    /// Serialized fields of a form, or `None` when no such form exists.
    fn serialize_form(&self, form: &Selector) -> Option<Vec<(String, String)>>;

    /// Selectors of all elements carrying the given class.
    fn with_class(&self, class: &str) -> Vec<Selector>;
}
