//! # attrix-std
//!
//! Standard implementations for the Attrix declarative element binding
//! framework.
//!
//! This crate provides:
//! - **Entry point**: [`Attrix`] with `describe`, `describe_with` and `automate`
//! - **Registry**: [`HandlerRegistry`], lazily bootstrapping the default handler
//! - **The `ajax` handler**: [`AjaxHandler`] and its typed options
//! - **Name resolution**: [`resolve`], [`resolve_from_param`]
//! - **Testing**: [`testing::MemoryPage`], [`testing::MockTransport`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use attrix_core;

// Modules
pub mod ajax;
pub mod data;
pub mod describe;
pub mod registry;
pub mod resolve;
pub mod testing;

pub use ajax::AjaxHandler;
pub use data::element_data;
pub use describe::{Attrix, AttrixBuilder};
pub use registry::HandlerRegistry;
pub use resolve::{resolve, resolve_from_param};
