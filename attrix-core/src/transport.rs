//! HTTP transport abstraction.
//!
//! Attrix builds requests and interprets responses; moving bytes is left to
//! the host through [`Transport`].

use crate::value::Payload;
use futures::future::BoxFuture;
use std::{fmt, future::Future, str::FromStr};
use thiserror::Error;

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// `GET`, the read-style default.
    #[default]
    Get,
    /// `POST`.
    Post,
    /// `PUT`.
    Put,
    /// `PATCH`.
    Patch,
    /// `DELETE`.
    Delete,
    /// `HEAD`.
    Head,
    /// `OPTIONS`.
    Options,
}

impl Method {
    /// The canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown HTTP verb.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown HTTP method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            _ => Err(UnknownMethod(s.to_owned())),
        }
    }
}

/// A request issued by a triggered listener.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP verb.
    pub method: Method,
    /// Operation identifier, element data and form fields.
    pub payload: Payload,
    /// Whether transport-level caching is allowed.
    pub cache: bool,
}

impl Request {
    /// Create an uncached request.
    pub fn new(method: Method, payload: Payload) -> Self {
        Self {
            method,
            payload,
            cache: false,
        }
    }

    /// URL-encoded payload.
    pub fn query(&self) -> String {
        self.payload.to_query()
    }
}

/// A response returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body, treated as HTML.
    pub body: String,
}

impl Response {
    /// Create a response with the given status.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A failed request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// Response body, when the server answered.
    pub body: String,
    /// Description of the failure.
    pub message: String,
}

impl TransportError {
    /// A failure reported by the server with a non-success status.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
            message: format!("server responded with status {status}"),
        }
    }

    /// A failure before any response was received.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: String::new(),
            message: message.into(),
        }
    }
}

/// Sends requests on behalf of bound listeners.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an Attrix `Transport`",
    label = "missing `Transport` implementation",
    note = "Transports must implement `send`."
)]
pub trait Transport: Send + Sync + 'static {
    /// Send one request and wait for its outcome.
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

/// Dynamic object-safe version of [`Transport`].
pub trait DynTransport: Send + Sync + 'static {
    /// Send one request (dynamic dispatch version).
    fn send_dyn(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>>;
}

impl<T: Transport> DynTransport for T {
    fn send_dyn(&self, request: Request) -> BoxFuture<'_, Result<Response, TransportError>> {
        Box::pin(self.send(request))
    }
}
