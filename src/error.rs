//! Error taxonomy module
//!
//! Registration-time failures (`ConfigurationError`) are separated from
//! request-time failures (`DispatchError` and its causes). Request-time
//! failures never propagate past the dispatch boundary; they become the
//! `Failed` variant of a dispatch outcome and are written back as a 404
//! with the raw message as the body.

use thiserror::Error;

use crate::routing::Verb;

/// Malformed operation metadata discovered while extracting descriptors
/// from a context declaration. Fatal to that context only; registration
/// of the remaining contexts continues.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A query-bound operation declared a parameter without a query name.
    #[error("{verb} {path}: parameter {index} has no query name binding")]
    UnnamedQueryParameter {
        verb: Verb,
        path: String,
        index: usize,
    },

    /// A query-bound operation declared a structured-object parameter,
    /// which can only be carried in a request body.
    #[error("{verb} {path}: parameter '{name}' cannot bind an object from the query string")]
    ObjectQueryParameter {
        verb: Verb,
        path: String,
        name: String,
    },
}

/// A required parameter is missing, fails type coercion, or the request
/// body does not deserialize into the declared shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("missing required parameter '{0}'")]
    Missing(String),

    #[error("invalid value '{value}' for parameter '{name}': {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },

    #[error("malformed request body: {0}")]
    Body(String),
}

/// Failure raised by the handler itself during invocation.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Terminal request-time failure captured at the dispatch boundary.
///
/// Every variant surfaces to the caller as a 404 whose body is the raw
/// `Display` message; callers cannot distinguish the classes from the
/// status code alone (inherited behavior, kept deliberately).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No descriptor registered for the resolved verb and path.
    #[error("route not found")]
    RouteNotFound,

    /// Parameter binding failed.
    #[error("{0}")]
    Parameter(#[from] ParameterError),

    /// The invoked operation returned an error.
    #[error("{0}")]
    Handler(String),
}
