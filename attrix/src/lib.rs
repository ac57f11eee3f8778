//! # attrix - Declarative Element Binding
//!
//! `attrix` turns page elements into request triggers from a description:
//! which element, which handler, which parameters. The element's own data
//! attributes fill in whatever the description leaves out, so most bindings
//! need nothing more than an identifier.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use attrix::prelude::*;
//!
//! let mut attrix = Attrix::builder(page, transport)
//!     .callbacks(Namespace::new().with_success("app.render", |s| render(s.body)))
//!     .build();
//!
//! // GET ?op=greet on click, response replaces the button's content
//! attrix.describe("#greet", Parameters::new())?;
//!
//! // POST the search form on submit and render into #results
//! attrix.describe(
//!     "#search",
//!     Parameters::new()
//!         .with("method", "POST")
//!         .with("form", "search-form")
//!         .with("target", Selector::id("results")),
//! )?;
//!
//! // Everything marked with the `xross` class, using data attributes only
//! attrix.automate(None, None)?;
//! ```
//!
//! ## Host Integration
//!
//! The library never touches a document or a socket itself. Provide a
//! [`Page`] for the element store and a [`Transport`] for HTTP; the
//! [`testing`] module has in-memory versions of both.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use attrix_core::{
    // Errors
    AttrixError,
    BoxError,
    // Callbacks
    Callback,
    CompleteFn,
    // Context
    Context,
    // Values
    Data,
    DataValue,
    DescribeError,
    DynListener,
    DynTransport,
    Elements,
    Entry,
    ErrorFn,
    Failure,
    // Handler
    Handler,
    HandlerEntry,
    LifecycleEvent,
    Listener,
    Method,
    Mutation,
    Namespace,
    // Page
    Page,
    PageError,
    Param,
    Parameters,
    Payload,
    Phase,
    Request,
    ResolveError,
    Response,
    Scope,
    Selector,
    // Settings
    Settings,
    Success,
    SuccessFn,
    TargetFn,
    // Transport
    Transport,
    TransportError,
    Trigger,
};

pub use attrix_std::{
    AjaxHandler, Attrix, AttrixBuilder, HandlerRegistry, element_data, resolve, resolve_from_param,
};

/// The built-in `ajax` handler and its options.
pub mod ajax {
    pub use attrix_std::ajax::{
        AjaxHandler, AjaxListener, AjaxOptions, CompleteSpec, ContentAction, ErrorSpec, EventSpec,
        FormSpec, SuccessSpec, TargetSpec,
    };
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use attrix_std::testing::*;
}

/// Prelude module - common imports for Attrix.
///
/// # Usage
///
/// ```rust,ignore
/// use attrix::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Attrix, DescribeError, Failure, Handler, HandlerEntry, Method, Namespace, Page, Param,
        Parameters, Selector, Settings, Success, Transport,
    };
}
