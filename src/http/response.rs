//! HTTP response building module
//!
//! Builders for the engine's response shapes. Every response carries the
//! fixed server-identifying header regardless of outcome.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 200 response for a serialized outcome.
///
/// `body` is `None` when negotiation selected a media type this engine
/// cannot serialize; the Content-Type header is still written over an
/// empty body.
pub fn build_ok_response(
    body: Option<String>,
    content_type: &str,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let bytes = body.map_or_else(Bytes::new, Bytes::from);
    Response::builder()
        .status(200)
        .header("Server", server_name)
        .header("Content-Type", content_type)
        .header("Content-Length", bytes.len())
        .body(Full::new(bytes))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the 404 failure response: the raw error message as the body,
/// no content-type negotiation.
pub fn build_error_response(message: &str, server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Server", server_name)
        .header("Content-Length", message.len())
        .body(Full::new(Bytes::from(message.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 413 Payload Too Large for bodies over the configured cap.
pub fn build_too_large_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Server", server_name)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response_sets_server_header() {
        let resp = build_ok_response(Some("\"ab\"".to_string()), "application/json", "webctx");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Server").unwrap(), "webctx");
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "application/json");
    }

    #[test]
    fn test_ok_response_without_body_is_empty() {
        let resp = build_ok_response(None, "image/png", "webctx");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "0");
    }

    #[test]
    fn test_error_response_carries_raw_message() {
        let resp = build_error_response("route not found", "webctx");
        assert_eq!(resp.status(), 404);
        assert!(resp.headers().get("Content-Type").is_none());
        assert_eq!(resp.headers().get("Server").unwrap(), "webctx");
    }
}
