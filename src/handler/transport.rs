//! HTTP transport module
//!
//! Carries messages between an embedded document and the [`MessageRouter`]
//! over HTTP: request envelopes are posted to the message path and the reply
//! envelope, if any, comes back as the response body. Plain GETs of a virtual
//! path are served directly.

use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::MessageRouter;
use crate::config::AppState;
use crate::http;
use crate::logger::{self, ExchangeLogEntry};
use crate::message::{RequestMessage, ResponseMessage};

/// How an inbound HTTP request reaches the router
enum Delivery {
    /// Posted envelope, the reply goes back as an envelope
    Envelope,
    /// Plain GET of a virtual path, the reply becomes the HTTP response
    Direct { is_head: bool },
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let origin = req
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    logger::log_debug(&format!(
        "Received {} {} from {peer_addr}, origin: {}",
        req.method(),
        req.uri().path(),
        origin.as_deref().unwrap_or("-")
    ));

    let mut response = dispatch(req, &state, peer_addr, origin).await;

    let headers = response.headers_mut();
    if let Ok(name) = HeaderValue::from_str(&state.config.http.server_name) {
        headers.insert(SERVER, name);
    }
    if state.config.http.enable_cors {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
    Ok(response)
}

async fn dispatch<B>(
    req: Request<B>,
    state: &AppState,
    peer_addr: SocketAddr,
    origin: Option<String>,
) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let config = &state.config;
    let path = req.uri().path().to_string();

    // 1. Health check (highest priority, never filtered)
    if req.method() == Method::GET && path == config.routes.health_path {
        return http::build_health_response("ok");
    }

    // 2. Method and path
    let delivery = match (req.method(), path.as_str()) {
        (&Method::OPTIONS, _) => {
            return http::build_options_response(
                config.http.enable_cors,
                config.routes.allowed_methods(),
            )
        }
        (&Method::POST, p) if p == config.routes.message_path => Delivery::Envelope,
        (&Method::GET, _) if config.routes.direct_get => Delivery::Direct { is_head: false },
        (&Method::HEAD, _) if config.routes.direct_get => Delivery::Direct { is_head: true },
        (method, _) => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            return http::build_405_response(config.routes.allowed_methods());
        }
    };

    // 3. Origin filter
    if !config.relay.origin_allowed(origin.as_deref()) {
        logger::log_warning(&format!(
            "Rejected message from origin {}",
            origin.as_deref().unwrap_or("(none)")
        ));
        return http::build_403_response();
    }

    // 4. Decode the message
    let message = match delivery {
        Delivery::Envelope => match read_envelope(req, config.http.max_body_size).await {
            Ok(message) => message,
            Err(resp) => return resp,
        },
        Delivery::Direct { .. } => RequestMessage::get(virtual_path(&path)),
    };
    logger::log_debug(&format!("Message: {message}"));

    // 5. Route and reply
    let mut entry = ExchangeLogEntry::new(
        peer_addr.to_string(),
        message.verb.clone(),
        message.url.clone(),
    );
    entry.origin = origin;
    let started = Instant::now();

    let reply = exchange(&state.router, message).await;

    if config.logging.access_log {
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        entry.status = reply.as_ref().map(|r| r.status.code());
        entry.body_bytes = reply.as_ref().map_or(0, |r| r.body.len());
        logger::log_exchange(&entry, &config.logging.access_log_format);
    }

    match (reply, delivery) {
        (Some(envelope), Delivery::Envelope) => http::build_envelope_response(&envelope),
        (Some(envelope), Delivery::Direct { is_head }) => {
            http::build_direct_response(&envelope, is_head)
        }
        (None, _) => http::build_no_reply_response(),
    }
}

/// Virtual path addressed by a direct request URI path
fn virtual_path(uri_path: &str) -> String {
    let trimmed = uri_path.trim_start_matches('/');
    urlencoding::decode(trimmed).map_or_else(|_| trimmed.to_string(), |p| p.into_owned())
}

/// Hand one message to the router and capture what it posts back
pub async fn exchange(router: &MessageRouter, message: RequestMessage) -> Option<ResponseMessage> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    router
        .handle(message, move |resp| {
            let _ = tx.send(resp);
        })
        .await;
    // Sender dropped unused means the router chose not to reply
    rx.await.ok()
}

/// Read and decode a posted request envelope
async fn read_envelope<B>(
    req: Request<B>,
    max_body_size: u64,
) -> Result<RequestMessage, Response<Full<Bytes>>>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    if exceeds_declared_size(&req, max_body_size) {
        return Err(http::build_413_response());
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let bytes = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<http_body_util::LengthLimitError>() => {
            logger::log_error(&format!("Message body exceeds {max_body_size} bytes"));
            return Err(http::build_413_response());
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read message body: {e}"));
            return Err(http::build_400_response());
        }
    };

    serde_json::from_slice(&bytes).map_err(|e| {
        logger::log_warning(&format!("Undecodable message envelope: {e}"));
        http::build_400_response()
    })
}

/// Validate Content-Length header against max body size
fn exceeds_declared_size<B>(req: &Request<B>, max_body_size: u64) -> bool {
    let Some(content_length) = req.headers().get("content-length") else {
        return false;
    };
    match content_length.to_str().ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Message body too large: {size} bytes (max: {max_body_size})"
            ));
            true
        }
        Some(_) => false,
        None => {
            logger::log_warning("Invalid Content-Length value, skipping size check");
            false
        }
    }
}
