//! webctx — a minimal registration-driven HTTP routing layer.
//!
//! Handler units declare their operations (verb, path, typed parameters,
//! produced media types) as plain data; a startup registration phase
//! compiles them into an immutable per-verb route registry. At request
//! time the dispatcher resolves verb+path to one operation, binds query
//! or body data into typed arguments, invokes the handler, and a content
//! negotiator serializes the result as JSON, XML, or plain text.

pub mod binding;
pub mod config;
pub mod contexts;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
