//! # Event Listener
//!
//! The unit a handler leaves behind on the page: something the host calls
//! every time a subscribed event fires.
//!
//! Like the rest of Attrix, listeners come in two flavours: [`Listener`]
//! uses native `async fn` for static dispatch, and [`DynListener`] is the
//! object-safe form stored by [`Page`](crate::Page) implementations.

use futures::future::BoxFuture;
use std::future::Future;

use crate::element::Scope;

/// An event occurrence delivered to a listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    event: String,
    scope: Scope,
    default_prevented: bool,
}

impl Trigger {
    /// Create a trigger for `event` fired on `scope`.
    pub fn new(event: impl Into<String>, scope: Scope) -> Self {
        Self {
            event: event.into(),
            scope,
            default_prevented: false,
        }
    }

    /// The event name.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The scope the event fired on.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a listener suppressed the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Reacts to a fired event.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an Attrix `Listener`",
    label = "missing `Listener` implementation",
    note = "Listeners must implement `on_trigger`."
)]
pub trait Listener: Send + Sync + 'static {
    /// Called each time the subscribed event fires.
    fn on_trigger(&self, trigger: &mut Trigger) -> impl Future<Output = ()> + Send;
}

/// Dynamic object-safe version of [`Listener`].
pub trait DynListener: Send + Sync + 'static {
    /// Called each time the subscribed event fires (dynamic dispatch version).
    fn on_trigger_dyn<'a>(&'a self, trigger: &'a mut Trigger) -> BoxFuture<'a, ()>;
}

// Blanket implementation: any Listener is a DynListener.
impl<T: Listener> DynListener for T {
    fn on_trigger_dyn<'a>(&'a self, trigger: &'a mut Trigger) -> BoxFuture<'a, ()> {
        Box::pin(self.on_trigger(trigger))
    }
}
