//! Describing elements.
//!
//! [`Attrix`] is the application-scoped entry point: it owns the handler
//! registry and the [`Context`] handed to handlers. Build it once at start
//! and keep it around; nothing in this crate reaches for global state.

use crate::registry::HandlerRegistry;
use attrix_core::{
    Context, DescribeError, DynTransport, Elements, Handler, HandlerEntry, Namespace, Page,
    Parameters, Selector, Settings,
};
use std::sync::Arc;

/// Handler registry plus the collaborators handlers need.
///
/// # Example
///
/// ```rust,ignore
/// let mut attrix = Attrix::builder(page, transport)
///     .callbacks(Namespace::new().with_complete("app.done", || {}))
///     .build();
///
/// attrix.describe(["#save", "#load"], Parameters::new().with("method", "POST"))?;
/// ```
#[derive(Debug)]
pub struct Attrix {
    registry: HandlerRegistry,
    cx: Context,
}

impl Attrix {
    /// Create an instance with default settings and no callbacks.
    pub fn new(page: Arc<dyn Page>, transport: Arc<dyn DynTransport>) -> Self {
        Self::builder(page, transport).build()
    }

    /// Start building an instance.
    pub fn builder(page: Arc<dyn Page>, transport: Arc<dyn DynTransport>) -> AttrixBuilder {
        AttrixBuilder {
            cx: Context::new(page, transport),
            settings: Settings::new(),
            callbacks: Namespace::new(),
            handlers: Vec::new(),
        }
    }

    /// The context handed to handlers.
    pub fn context(&self) -> &Context {
        &self.cx
    }

    /// The handler registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Register or overwrite a handler and its default parameters.
    pub fn register_handler<H: Handler>(
        &mut self,
        alias: impl Into<String>,
        handler: H,
        defaults: Parameters,
    ) {
        self.registry.register(alias, HandlerEntry::new(handler, defaults));
    }

    /// Register or overwrite a prepared entry.
    pub fn register_entry(&mut self, alias: impl Into<String>, entry: impl Into<HandlerEntry>) {
        self.registry.register(alias, entry);
    }

    /// Describe elements with the default handler.
    pub fn describe(
        &mut self,
        elements: impl Into<Elements>,
        params: Parameters,
    ) -> Result<(), DescribeError> {
        let alias = self.registry.default_alias().to_owned();
        self.describe_with(elements, &alias, params)
    }

    /// Describe elements with the handler registered under `alias`.
    ///
    /// Every element is attempted, in order, even when an earlier one
    /// fails. A single failure is returned as is; several are returned as
    /// [`DescribeError::Multiple`].
    pub fn describe_with(
        &mut self,
        elements: impl Into<Elements>,
        alias: &str,
        params: Parameters,
    ) -> Result<(), DescribeError> {
        let entry = self.registry.resolve(alias)?;

        let mut failures = Vec::new();
        for element in elements.into() {
            tracing::debug!(element = %element, alias, "Describing element");
            let merged = Parameters::layered(entry.defaults(), &params);
            if let Err(err) = entry.handler().call(&self.cx, &element, merged) {
                tracing::warn!(element = %element, alias, error = %err, "Describe failed");
                failures.push(err);
            }
        }

        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(DescribeError::Multiple(failures)),
        }
    }

    /// Describe every element carrying `marker_class` (the configured marker
    /// class when `None`) with the handler under `alias` (the default when
    /// `None`).
    pub fn automate(
        &mut self,
        marker_class: Option<&str>,
        alias: Option<&str>,
    ) -> Result<(), DescribeError> {
        let class = marker_class.unwrap_or(&self.cx.settings().marker_class);
        let elements: Vec<Selector> = self.cx.page().with_class(class);
        tracing::debug!(class, count = elements.len(), "Automating marked elements");

        let alias = match alias {
            Some(alias) => alias.to_owned(),
            None => self.registry.default_alias().to_owned(),
        };
        self.describe_with(elements, &alias, Parameters::new())
    }
}

/// Builder for [`Attrix`].
pub struct AttrixBuilder {
    cx: Context,
    settings: Settings,
    callbacks: Namespace,
    handlers: Vec<(String, HandlerEntry)>,
}

impl AttrixBuilder {
    /// Use these settings.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Expose these callbacks by name.
    pub fn callbacks(mut self, callbacks: Namespace) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Register a handler up front.
    pub fn handler(mut self, alias: impl Into<String>, entry: impl Into<HandlerEntry>) -> Self {
        self.handlers.push((alias.into(), entry.into()));
        self
    }

    /// Build the instance.
    pub fn build(self) -> Attrix {
        let mut registry = HandlerRegistry::new(self.settings.default_handler.clone());
        for (alias, entry) in self.handlers {
            registry.register(alias, entry);
        }
        Attrix {
            registry,
            cx: self
                .cx
                .with_settings(self.settings)
                .with_callbacks(self.callbacks),
        }
    }
}
