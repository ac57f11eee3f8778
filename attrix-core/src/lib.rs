//! # attrix-core
//!
//! Core traits for the Attrix declarative element binding framework.
//!
//! This crate has minimal dependencies and is meant to be imported by host
//! integrations (a page implementation, a transport) that don't need the
//! standard handlers from `attrix-std`.
//!
//! # Capabilities
//!
//! Attrix depends on its environment only through two traits:
//!
//! - [`Page`] - element lookup, data attributes, event subscription,
//!   lifecycle notifications and content mutation
//! - [`Transport`] - sending a [`Request`] and waiting for a [`Response`]
//!
//! # Extension Points
//!
//! - [`Handler`] - wires one element from a [`Parameters`] set; registered
//!   under an alias
//! - [`Listener`] - what a handler leaves on the page; runs on every trigger
//! - [`Namespace`] - callbacks the application exposes by name
//!
//! # Error Types
//!
//! - [`AttrixError`] - Top-level error type
//! - [`DescribeError`] - Binding errors
//! - [`ResolveError`] - Callback name resolution errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callback;
mod context;
mod element;
mod error;
mod handler;
mod listener;
mod params;
mod settings;
mod transport;
mod value;

// Re-exports
pub use callback::{
    Callback, CompleteFn, Entry, ErrorFn, Failure, Namespace, Success, SuccessFn, TargetFn,
};
pub use context::Context;
pub use element::{Elements, LifecycleEvent, Mutation, Page, Phase, Scope, Selector};
pub use error::{AttrixError, BoxError, DescribeError, PageError, ResolveError};
pub use handler::{Handler, HandlerEntry};
pub use listener::{DynListener, Listener, Trigger};
pub use params::{Param, Parameters};
pub use settings::{DEFAULT_DATA_PREFIX, DEFAULT_HANDLER, DEFAULT_MARKER_CLASS, Settings};
pub use transport::{
    DynTransport, Method, Request, Response, Transport, TransportError, UnknownMethod,
};
pub use value::{Data, DataValue, Payload};
