//! Error types for Attrix.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`AttrixError`] - Top-level error type
//! - [`DescribeError`] - Errors raised while binding elements to a handler
//! - [`ResolveError`] - Errors from callback name resolution
//! - [`PageError`] - Errors reported by the host page
//!
//! Transport failures live next to the transport trait as
//! [`TransportError`](crate::TransportError).

use crate::element::Selector;
use crate::transport::TransportError;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Attrix operations.
#[derive(Error, Debug)]
pub enum AttrixError {
    /// An element could not be described.
    #[error("describe error: {0}")]
    Describe(#[from] DescribeError),

    /// A callback name could not be resolved.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// The transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The page rejected an operation.
    #[error("page error: {0}")]
    Page(#[from] PageError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur while describing elements.
///
/// Only these conditions are fatal to a `describe` call; everything else
/// (missing `ready` elements, degenerate targets) is logged and skipped.
#[derive(Error, Debug)]
pub enum DescribeError {
    /// The requested alias is not the default one and nothing is registered under it.
    #[error("you are trying to use an unregistered handler: `{0}`")]
    UnregisteredHandler(String),

    /// The element has no identifier and no explicit `op` was configured.
    #[error("no operation identifier available for `{0}`")]
    OperationRequired(Selector),

    /// An option holds a value of the wrong kind.
    #[error("option `{option}` expects {expected}, got {found}")]
    InvalidOption {
        /// Name of the offending option.
        option: &'static str,
        /// Human readable description of the accepted values.
        expected: &'static str,
        /// What was supplied instead.
        found: String,
    },

    /// A named callback could not be resolved.
    #[error("cannot resolve `{option}` callback")]
    Callback {
        /// Name of the option holding the callback name.
        option: &'static str,
        /// Underlying resolution failure.
        #[source]
        source: ResolveError,
    },

    /// Several elements of one descriptor failed.
    #[error("{} elements failed to describe", .0.len())]
    Multiple(Vec<DescribeError>),

    /// A custom handler failed.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur while resolving a callback by name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The name was empty.
    #[error("empty callback name")]
    Empty,

    /// No entry exists at the given path.
    #[error("no callback registered at `{0}`")]
    NotFound(String),

    /// The path ends on a namespace rather than a callback.
    #[error("`{0}` is a namespace, not a callback")]
    NotCallable(String),

    /// The path resolves to a callback of another kind.
    #[error("`{path}` is a {found} callback, expected a {expected} callback")]
    WrongKind {
        /// The resolved path.
        path: String,
        /// The kind the caller asked for.
        expected: &'static str,
        /// The kind actually registered.
        found: &'static str,
    },
}

/// Errors reported by a [`Page`](crate::Page) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// No element matches the selector.
    #[error("element not found: {0}")]
    ElementNotFound(Selector),

    /// The host refused the operation.
    #[error("page rejected operation: {0}")]
    Rejected(String),
}

// Convenience conversions
impl From<BoxError> for AttrixError {
    fn from(err: BoxError) -> Self {
        AttrixError::Custom(err)
    }
}

impl From<BoxError> for DescribeError {
    fn from(err: BoxError) -> Self {
        DescribeError::Custom(err)
    }
}
