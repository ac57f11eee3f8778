//! # Handler
//!
//! A handler is a named strategy that wires one element to behaviour. The
//! registry calls it once per described element, synchronously, with the
//! merged parameter set; whatever the handler leaves behind on the page
//! (usually a [`Listener`](crate::Listener) subscription) is its effect.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|cx, element, params| { ...; Ok(()) }`
//! 2. **Struct implementation**: `impl Handler for MyHandler`

use crate::{context::Context, element::Selector, error::DescribeError, params::Parameters};
use std::sync::Arc;

/// Wires one element according to its parameters.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an Attrix `Handler`",
    label = "missing `Handler` implementation",
    note = "Handlers must implement `call`, or be a closure `Fn(&Context, &Selector, Parameters) -> Result<(), DescribeError>`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Wire `element` using `params`.
    fn call(&self, cx: &Context, element: &Selector, params: Parameters)
    -> Result<(), DescribeError>;
}

// Blanket impl for closures
impl<F> Handler for F
where
    F: Fn(&Context, &Selector, Parameters) -> Result<(), DescribeError> + Send + Sync + 'static,
{
    fn call(
        &self,
        cx: &Context,
        element: &Selector,
        params: Parameters,
    ) -> Result<(), DescribeError> {
        (self)(cx, element, params)
    }
}

/// A registered handler and its default parameters.
#[derive(Clone)]
pub struct HandlerEntry {
    handler: Arc<dyn Handler>,
    defaults: Parameters,
}

impl HandlerEntry {
    /// Create an entry.
    pub fn new<H: Handler>(handler: H, defaults: Parameters) -> Self {
        Self {
            handler: Arc::new(handler),
            defaults,
        }
    }

    /// The handler.
    pub fn handler(&self) -> &dyn Handler {
        &*self.handler
    }

    /// The default parameters. Read-only; merges copy them.
    pub fn defaults(&self) -> &Parameters {
        &self.defaults
    }
}

impl<H: Handler> From<(H, Parameters)> for HandlerEntry {
    fn from((handler, defaults): (H, Parameters)) -> Self {
        Self::new(handler, defaults)
    }
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
