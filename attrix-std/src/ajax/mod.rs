//! The built-in `ajax` handler.
//!
//! # Setup
//!
//! Runs once per described element:
//!
//! 1. Layer the element's data attributes into the parameters
//! 2. Derive the operation identifier (id, then `op` data, then explicit `op`)
//! 3. Resolve the event ([`event`]), the target ([`target`]) and the
//!    response callables ([`callbacks`])
//! 4. Subscribe an [`AjaxListener`] on the page
//!
//! # Trigger
//!
//! Every time the event fires the listener re-reads the element's data,
//! checks the form, emits the cancelable `before` notification, sends the
//! request and dispatches the response.

pub mod callbacks;
pub mod event;
mod listener;
pub mod options;
pub mod target;

pub use listener::AjaxListener;
pub use options::{
    AjaxOptions, CompleteSpec, ContentAction, ErrorSpec, EventSpec, FormSpec, SuccessSpec,
    TargetSpec,
};

use attrix_core::{
    Context, DescribeError, Handler, HandlerEntry, Namespace, Param, Parameters, Selector,
};
use std::sync::Arc;

use crate::data::element_data;

/// The default handler: binds an element to an HTTP request.
#[derive(Debug, Clone, Default)]
pub struct AjaxHandler {
    local: Namespace,
}

impl AjaxHandler {
    /// Create the handler with no local callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks consulted before the application's own namespace.
    pub fn with_local(mut self, local: Namespace) -> Self {
        self.local = local;
        self
    }

    /// Default parameters of the handler.
    pub fn defaults() -> Parameters {
        Parameters::new()
            .with("method", "GET")
            .with("event", "auto")
            .with("target", "this")
            .with("success", "fill")
            .with("error", "log")
            .with("complete", Param::Null)
            .with("form", Param::Null)
            .with("op", Param::Null)
    }

    /// A registry entry for this handler with its defaults.
    pub fn entry() -> HandlerEntry {
        HandlerEntry::new(Self::new(), Self::defaults())
    }

    /// Run the setup phase, returning the armed listener or `None` when the
    /// binding is skipped.
    pub fn prepare(
        &self,
        cx: &Context,
        element: &Selector,
        mut params: Parameters,
    ) -> Result<Option<(event::EventBinding, AjaxListener)>, DescribeError> {
        let page = cx.page();
        let data = element_data(page.as_ref(), element, &cx.settings().data_prefix);
        params.overlay_element(&data);

        let options = AjaxOptions::from_params(&params)?;

        let op = options
            .op
            .clone()
            .or_else(|| page.id_of(element))
            .or_else(|| element.id_part().map(str::to_owned))
            .filter(|op| !op.is_empty())
            .ok_or_else(|| DescribeError::OperationRequired(element.clone()))?;

        let Some(binding) = event::resolve_event(&options.event, page.as_ref(), element) else {
            return Ok(None);
        };
        let Some(target) = target::resolve_target(&options.target, element) else {
            return Ok(None);
        };
        let callbacks = callbacks::resolve_callbacks(
            &options.success,
            &options.error,
            &options.complete,
            cx,
            &self.local,
            element,
        )?;

        let listener = AjaxListener {
            element: element.clone(),
            op,
            method: options.method,
            form: options.form.as_ref().map(FormSpec::selector),
            target,
            callbacks,
            data_prefix: cx.settings().data_prefix.clone(),
            page: Arc::clone(page),
            transport: Arc::clone(cx.transport()),
        };
        Ok(Some((binding, listener)))
    }
}

impl Handler for AjaxHandler {
    fn call(
        &self,
        cx: &Context,
        element: &Selector,
        params: Parameters,
    ) -> Result<(), DescribeError> {
        let Some((binding, listener)) = self.prepare(cx, element, params)? else {
            return Ok(());
        };
        tracing::debug!(
            element = %element,
            event = %binding.event,
            op = listener.op(),
            "Binding request"
        );
        cx.page()
            .subscribe(binding.scope, &binding.event, Arc::new(listener));
        Ok(())
    }
}
