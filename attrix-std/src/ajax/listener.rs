//! The trigger phase of the ajax handler.

use super::{callbacks::ResponseCallbacks, target::ResolvedTarget};
use crate::data::element_data;
use attrix_core::{
    DynTransport, Failure, LifecycleEvent, Listener, Method, Page, Payload, Request, Response,
    Selector, Success, Trigger, TransportError,
};
use std::sync::Arc;

/// Listener armed by the ajax handler for one element.
///
/// Owns everything resolved at setup; nothing is shared with other
/// elements' bindings.
pub struct AjaxListener {
    pub(crate) element: Selector,
    pub(crate) op: String,
    pub(crate) method: Method,
    pub(crate) form: Option<Selector>,
    pub(crate) target: ResolvedTarget,
    pub(crate) callbacks: ResponseCallbacks,
    pub(crate) data_prefix: String,
    pub(crate) page: Arc<dyn Page>,
    pub(crate) transport: Arc<dyn DynTransport>,
}

impl AjaxListener {
    /// The element this listener was bound for.
    pub fn element(&self) -> &Selector {
        &self.element
    }

    /// The operation identifier sent with every request.
    pub fn op(&self) -> &str {
        &self.op
    }

    /// Build the payload from a fresh read of the element's data.
    fn payload(&self) -> Payload {
        let data = element_data(self.page.as_ref(), &self.element, &self.data_prefix);
        Payload::new(self.op.clone()).with_data(data)
    }

    /// Serialized form fields, or `None` when the form is invalid.
    fn form_fields(&self) -> Option<Vec<(String, String)>> {
        let Some(form) = &self.form else {
            return Some(Vec::new());
        };
        if self.page.form_validity(form) == Some(false) {
            return None;
        }
        Some(self.page.serialize_form(form).unwrap_or_default())
    }

    fn dispatch(&self, outcome: Result<Response, TransportError>) {
        let page = self.page.as_ref();
        match outcome {
            Ok(response) if response.is_success() => {
                let target = self.target.locate(page, &self.element);
                (self.callbacks.success)(&Success {
                    body: &response.body,
                    status: response.status,
                    response: &response,
                    target: target.as_ref(),
                    page,
                });
            }
            Ok(response) => {
                let error = TransportError::status(response.status, response.body.clone());
                (self.callbacks.error)(&Failure {
                    status: error.status,
                    body: &error.body,
                    error: &error,
                    page,
                });
            }
            Err(error) => {
                (self.callbacks.error)(&Failure {
                    status: error.status,
                    body: &error.body,
                    error: &error,
                    page,
                });
            }
        }
        (self.callbacks.complete)();
    }
}

impl Listener for AjaxListener {
    async fn on_trigger(&self, trigger: &mut Trigger) {
        let payload = self.payload();
        tracing::debug!(
            element = %self.element,
            event = trigger.event(),
            query = %payload.to_query(),
            "Triggering request"
        );

        let Some(form) = self.form_fields() else {
            tracing::debug!(element = %self.element, "Form is invalid, request aborted");
            return;
        };

        let mut before = LifecycleEvent::before(payload, form);
        self.page.emit(&self.element, &mut before);
        if before.is_canceled() {
            tracing::debug!(element = %self.element, "Request canceled by `before` observer");
            return;
        }

        let (payload, form) = before.into_parts();
        let mut payload = payload.unwrap_or_else(|| Payload::new(self.op.clone()));
        payload.extend_form(form);

        trigger.prevent_default();

        let request = Request::new(self.method, payload);
        let outcome = self.transport.send_dyn(request).await;
        self.dispatch(outcome);
    }
}
