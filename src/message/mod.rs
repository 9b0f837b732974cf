//! Message envelope module
//!
//! Defines the request and response envelopes exchanged between the embedded
//! document and the relay. Both are plain serde types so any transport that
//! can carry JSON can carry them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The only verb the router answers
pub const VERB_GET: &str = "GET";

/// Body sent with every 404 envelope
pub const NOT_FOUND_BODY: &str = "Not found";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Inbound request envelope
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RequestMessage {
    pub verb: String,
    /// Virtual path, e.g. `recipes/library/tiddlers.json`
    #[serde(default)]
    pub url: String,
    /// Opaque to the relay, echoed back unmodified
    #[serde(default)]
    pub cookies: Value,
}

impl RequestMessage {
    /// Build a `GET` request for a virtual path with no cookies
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            verb: VERB_GET.to_string(),
            url: url.into(),
            cookies: Value::Null,
        }
    }

    pub fn is_get(&self) -> bool {
        self.verb == VERB_GET
    }
}

impl fmt::Display for RequestMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} cookies={}", self.verb, self.url, self.cookies)
    }
}

/// Verb of every outbound envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ResponseVerb {
    #[serde(rename = "GET-RESPONSE")]
    GetResponse,
}

/// HTTP-like status carried as a string on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Status {
    #[serde(rename = "200")]
    Ok,
    #[serde(rename = "404")]
    NotFound,
}

impl Status {
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NotFound => 404,
        }
    }
}

/// Outbound response envelope
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseMessage {
    pub verb: ResponseVerb,
    pub status: Status,
    pub cookies: Value,
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub body: String,
}

impl ResponseMessage {
    /// `200` JSON envelope answering `request`
    pub fn json(request: &RequestMessage, body: String) -> Self {
        Self::reply_to(request, Status::Ok, CONTENT_TYPE_JSON, body)
    }

    /// `404` plain-text envelope answering `request`
    pub fn not_found(request: &RequestMessage) -> Self {
        Self::reply_to(
            request,
            Status::NotFound,
            CONTENT_TYPE_TEXT,
            NOT_FOUND_BODY.to_string(),
        )
    }

    fn reply_to(request: &RequestMessage, status: Status, content_type: &str, body: String) -> Self {
        Self {
            verb: ResponseVerb::GetResponse,
            status,
            cookies: request.cookies.clone(),
            url: request.url.clone(),
            content_type: content_type.to_string(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let msg: RequestMessage = serde_json::from_str(r#"{"verb":"GET"}"#).unwrap();
        assert!(msg.is_get());
        assert_eq!(msg.url, "");
        assert_eq!(msg.cookies, Value::Null);
    }

    #[test]
    fn test_request_keeps_cookies_verbatim() {
        let msg: RequestMessage = serde_json::from_value(json!({
            "verb": "GET",
            "url": "recipes/library/tiddlers.json",
            "cookies": {"session": "abc", "n": [1, 2]}
        }))
        .unwrap();
        assert_eq!(msg.cookies, json!({"session": "abc", "n": [1, 2]}));
    }

    #[test]
    fn test_response_wire_shape() {
        let req = RequestMessage {
            verb: "GET".to_string(),
            url: "nowhere".to_string(),
            cookies: json!("c=1"),
        };
        let value = serde_json::to_value(ResponseMessage::not_found(&req)).unwrap();
        assert_eq!(
            value,
            json!({
                "verb": "GET-RESPONSE",
                "status": "404",
                "cookies": "c=1",
                "url": "nowhere",
                "type": "text/plain",
                "body": "Not found"
            })
        );
    }

    #[test]
    fn test_request_display_shows_contents() {
        let msg: RequestMessage =
            serde_json::from_str(r#"{"verb":"GET","url":"a/b","cookies":{"sid":"42"}}"#).unwrap();
        assert_eq!(msg.to_string(), r#"GET a/b cookies={"sid":"42"}"#);
    }

    #[test]
    fn test_status_code() {
        assert_eq!(Status::Ok.code(), 200);
        assert_eq!(Status::NotFound.code(), 404);
    }
}
