//! Request dispatch module
//!
//! The control core: resolves verb+path against the registry, drives
//! parameter binding, invokes the handler, and captures the result or
//! the failure. A request moves through
//! `Received → Resolved → Bound → Invoked → {Completed | Failed}` with
//! no suspension points; dispatch is synchronous on the calling worker.

use serde_json::Value;

use crate::binding;
use crate::error::DispatchError;
use crate::routing::{RouteRegistry, Verb};

/// Per-request, short-lived carrier of the raw inbound data. Created at
/// request entry and discarded once the response is written.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub verb: Verb,
    pub path: String,
    /// Raw query string without the leading `?`, if present.
    pub query: Option<String>,
    /// Raw request body; empty for bodiless requests.
    pub body: Vec<u8>,
    /// Literal Accept header value, if present.
    pub accept: Option<String>,
}

/// Result of dispatching one request: exactly one of a produced value
/// (with the operation's declared media types, for negotiation) or a
/// captured failure.
#[derive(Debug)]
pub enum DispatchOutcome {
    Completed { value: Value, produced: Vec<String> },
    Failed(DispatchError),
}

/// Resolves and invokes operations against an immutable registry.
///
/// Shared by reference across worker tasks; the registry never changes
/// after startup, so lookups need no locking.
#[derive(Debug)]
pub struct Dispatcher {
    registry: RouteRegistry,
}

impl Dispatcher {
    pub const fn new(registry: RouteRegistry) -> Self {
        Self { registry }
    }

    pub const fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Run one request through the dispatch state machine.
    pub fn dispatch(&self, ctx: &RequestContext) -> DispatchOutcome {
        // Received → Resolved
        let (lookup_path, query) = resolve_target(ctx);
        let Some(op) = self.registry.resolve(ctx.verb, lookup_path) else {
            return DispatchOutcome::Failed(DispatchError::RouteNotFound);
        };

        // Resolved → Bound
        let bound = if ctx.verb.binds_from_query() {
            let values = binding::parse_query(query.unwrap_or(""));
            binding::bind_query(&op.params, &values)
        } else {
            binding::bind_body(&op.params, &ctx.body)
        };
        let args = match bound {
            Ok(args) => args,
            Err(e) => return DispatchOutcome::Failed(DispatchError::Parameter(e)),
        };

        // Bound → Invoked → {Completed | Failed}
        match (op.handler)(&args) {
            Ok(value) => DispatchOutcome::Completed {
                value,
                produced: op.produced.clone(),
            },
            Err(e) => DispatchOutcome::Failed(DispatchError::Handler(e.0)),
        }
    }
}

/// Determine the lookup path and effective query string.
///
/// Compatibility shim for DELETE: a raw path containing `&` is split at
/// the first `&`; the left side is the lookup path and the remainder is
/// reused as the query string. Conventional `?query` DELETEs work
/// unchanged when the path carries no `&`.
fn resolve_target(ctx: &RequestContext) -> (&str, Option<&str>) {
    if ctx.verb == Verb::Delete {
        if let Some((path, embedded_query)) = ctx.path.split_once('&') {
            return (path, Some(embedded_query));
        }
    }
    (&ctx.path, ctx.query.as_deref())
}
