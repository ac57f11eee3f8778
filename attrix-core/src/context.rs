//! # Describe Context
//!
//! Everything a handler may need while wiring an element: the page, the
//! transport, the application's callback namespace and the settings.
//!
//! A context is built once with the registry and handed to every handler
//! invocation by reference. Cloning is cheap; all members are shared.

use crate::{callback::Namespace, element::Page, settings::Settings, transport::DynTransport};
use std::sync::Arc;

/// Shared collaborators passed to handlers.
#[derive(Clone)]
pub struct Context {
    page: Arc<dyn Page>,
    transport: Arc<dyn DynTransport>,
    callbacks: Arc<Namespace>,
    settings: Arc<Settings>,
}

impl Context {
    /// Create a context with default settings and no callbacks.
    pub fn new(page: Arc<dyn Page>, transport: Arc<dyn DynTransport>) -> Self {
        Self {
            page,
            transport,
            callbacks: Arc::new(Namespace::new()),
            settings: Arc::new(Settings::new()),
        }
    }

    /// Replace the callback namespace.
    pub fn with_callbacks(mut self, callbacks: Namespace) -> Self {
        self.callbacks = Arc::new(callbacks);
        self
    }

    /// Replace the settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    /// The host page.
    pub fn page(&self) -> &Arc<dyn Page> {
        &self.page
    }

    /// The transport.
    pub fn transport(&self) -> &Arc<dyn DynTransport> {
        &self.transport
    }

    /// Callbacks exposed by the application.
    pub fn callbacks(&self) -> &Namespace {
        &self.callbacks
    }

    /// The settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("callbacks", &self.callbacks)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
