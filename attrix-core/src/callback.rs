//! Named callbacks.
//!
//! Configuration may refer to callbacks by name (`success: "app.render"`).
//! Names are only ever looked up in a [`Namespace`] the application filled
//! on purpose; there is no ambient global scope.

use crate::{
    element::{Page, Selector},
    transport::{Response, TransportError},
};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Arguments of a success callback.
pub struct Success<'a> {
    /// Response body.
    pub body: &'a str,
    /// HTTP status.
    pub status: u16,
    /// The full response.
    pub response: &'a Response,
    /// The resolved target element, if it could be located.
    pub target: Option<&'a Selector>,
    /// The page the request originated from.
    pub page: &'a dyn Page,
}

/// Arguments of an error callback.
pub struct Failure<'a> {
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// Response body, possibly empty.
    pub body: &'a str,
    /// The transport failure.
    pub error: &'a TransportError,
    /// The page the request originated from.
    pub page: &'a dyn Page,
}

/// Called with the response of a successful request.
pub type SuccessFn = Arc<dyn Fn(&Success<'_>) + Send + Sync>;
/// Called when a request failed.
pub type ErrorFn = Arc<dyn Fn(&Failure<'_>) + Send + Sync>;
/// Called after every request.
pub type CompleteFn = Arc<dyn Fn() + Send + Sync>;
/// Produces the target element from the source element.
pub type TargetFn = Arc<dyn Fn(&Selector) -> Option<Selector> + Send + Sync>;

/// A callable exposed under a name.
#[derive(Clone)]
pub enum Callback {
    /// Usable as `success`.
    Success(SuccessFn),
    /// Usable as `error`.
    Error(ErrorFn),
    /// Usable as `complete`.
    Complete(CompleteFn),
}

impl Callback {
    /// Short name of the callback kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Callback::Success(_) => "success",
            Callback::Error(_) => "error",
            Callback::Complete(_) => "complete",
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback::{}(..)", self.kind())
    }
}

/// An entry of a [`Namespace`].
#[derive(Debug, Clone)]
pub enum Entry {
    /// A callable.
    Callback(Callback),
    /// A nested namespace, addressed by the next path segment.
    Namespace(Namespace),
}

/// A tree of named callbacks addressed by dotted paths.
///
/// # Example
///
/// ```rust,ignore
/// let callbacks = Namespace::new()
///     .with_success("cart.render", |s| println!("{}", s.body))
///     .with_complete("cart.done", || println!("done"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: BTreeMap<String, Entry>,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a callback at a dotted path, creating intermediate namespaces.
    ///
    /// A callback already sitting on an intermediate segment is replaced by
    /// a namespace.
    pub fn insert(&mut self, path: &str, callback: Callback) {
        let mut segments = path.split('.').peekable();
        let mut current = self;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                current
                    .entries
                    .insert(segment.to_owned(), Entry::Callback(callback));
                return;
            }
            let slot = current
                .entries
                .entry(segment.to_owned())
                .or_insert_with(|| Entry::Namespace(Namespace::new()));
            if !matches!(slot, Entry::Namespace(_)) {
                *slot = Entry::Namespace(Namespace::new());
            }
            let Entry::Namespace(next) = slot else {
                return;
            };
            current = next;
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, path: &str, callback: Callback) -> Self {
        self.insert(path, callback);
        self
    }

    /// Register a success callback.
    pub fn with_success<F>(self, path: &str, f: F) -> Self
    where
        F: Fn(&Success<'_>) + Send + Sync + 'static,
    {
        self.with(path, Callback::Success(Arc::new(f)))
    }

    /// Register an error callback.
    pub fn with_error<F>(self, path: &str, f: F) -> Self
    where
        F: Fn(&Failure<'_>) + Send + Sync + 'static,
    {
        self.with(path, Callback::Error(Arc::new(f)))
    }

    /// Register a complete callback.
    pub fn with_complete<F>(self, path: &str, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.with(path, Callback::Complete(Arc::new(f)))
    }

    /// The entry stored directly under `segment`.
    pub fn get(&self, segment: &str) -> Option<&Entry> {
        self.entries.get(segment)
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the namespace has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
