//! Request handler module
//!
//! The hyper-facing glue: turns an inbound request into a
//! `RequestContext`, runs it through the dispatcher, negotiates the
//! output representation, and builds the response.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::dispatch::{DispatchOutcome, RequestContext};
use crate::http::{negotiate, response};
use crate::logger;
use crate::routing::Verb;
use crate::server::AppState;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let server_name = state.config.http.server_name.clone();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let accept = req
        .headers()
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    // Declared body size is checked before the body is read.
    if declared_body_exceeds(&req, state.config.http.max_body_size) {
        return Ok(respond(
            &state,
            &peer_addr,
            &method,
            &path,
            response::build_too_large_response(&server_name),
        ));
    }

    // Any verb outside the supported set is answered like an
    // unresolvable route.
    let Some(verb) = Verb::from_method(req.method()) else {
        logger::log_warning(&format!("Unsupported method: {method} {path}"));
        let resp = response::build_error_response("route not found", &server_name);
        return Ok(respond(&state, &peer_addr, &method, &path, resp));
    };

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes().to_vec(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            let resp = response::build_error_response("malformed request body", &server_name);
            return Ok(respond(&state, &peer_addr, &method, &path, resp));
        }
    };

    let ctx = RequestContext {
        verb,
        path: path.clone(),
        query,
        body,
        accept,
    };
    let resp = match state.dispatcher.dispatch(&ctx) {
        DispatchOutcome::Completed { value, produced } => {
            let (representation, content_type) =
                negotiate::select_representation(&produced, ctx.accept.as_deref());
            match representation {
                Some(rep) => match negotiate::serialize(rep, &value) {
                    Ok(serialized) => {
                        response::build_ok_response(Some(serialized), &content_type, &server_name)
                    }
                    Err(e) => {
                        logger::log_dispatch_failure(&method, &path, &e);
                        response::build_error_response(&e.to_string(), &server_name)
                    }
                },
                // Unsupported representation: header only, empty body.
                None => response::build_ok_response(None, &content_type, &server_name),
            }
        }
        DispatchOutcome::Failed(err) => {
            logger::log_dispatch_failure(&method, &path, &err);
            response::build_error_response(&err.to_string(), &server_name)
        }
    };

    Ok(respond(&state, &peer_addr, &method, &path, resp))
}

/// Emit the access line (when enabled) and hand the response back.
fn respond(
    state: &Arc<AppState>,
    peer_addr: &SocketAddr,
    method: &str,
    path: &str,
    resp: Response<Full<Bytes>>,
) -> Response<Full<Bytes>> {
    if state.config.logging.access_log {
        let body_bytes = resp
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(0);
        logger::log_access(peer_addr, method, path, resp.status().as_u16(), body_bytes);
    }
    resp
}

/// Whether the declared Content-Length exceeds the configured cap.
/// A missing or unparsable header skips the check.
fn declared_body_exceeds(req: &Request<hyper::body::Incoming>, max_body_size: u64) -> bool {
    req.headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .is_some_and(|size| size > max_body_size)
}
