//! HTTP response building module
//!
//! Builders for the responses the HTTP transport sends back, decoupled from
//! the routing logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::message::{ResponseMessage, CONTENT_TYPE_JSON};

fn plain_response(status: u16, text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(text)))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::from(text)))
        })
}

/// Build 200 response carrying a serialized response envelope
pub fn build_envelope_response(envelope: &ResponseMessage) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(envelope) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize envelope: {e}"));
            return plain_response(500, "500 Internal Server Error");
        }
    };

    Response::builder()
        .status(200)
        .header("Content-Type", CONTENT_TYPE_JSON)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a plain HTTP response from an envelope (direct mode)
pub fn build_direct_response(envelope: &ResponseMessage, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = envelope.body.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(envelope.body.clone())
    };

    Response::builder()
        .status(envelope.status.code())
        .header("Content-Type", envelope.content_type.as_str())
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("direct", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 204 response for a message the router did not answer
pub fn build_no_reply_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("204", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build health check response
pub fn build_health_response(status: &'static str) -> Response<Full<Bytes>> {
    plain_response(200, status)
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    plain_response(400, "400 Bad Request")
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    plain_response(403, "403 Forbidden")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &'static str) -> Response<Full<Bytes>> {
    let mut resp = plain_response(405, "405 Method Not Allowed");
    resp.headers_mut()
        .insert("Allow", hyper::header::HeaderValue::from_static(allow));
    resp
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    plain_response(413, "413 Payload Too Large")
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool, allow: &'static str) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(204).header("Allow", allow);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Methods", allow)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
