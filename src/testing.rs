// In-memory and loopback libraries used by unit tests

use async_trait::async_trait;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::{FetchError, LibraryFetcher, Result};

enum Canned {
    Json(Value),
    Raw(String),
    Status(u16),
}

/// Serves canned responses by exact URL and records every requested URL
///
/// URLs without a canned response fail like a host that never answered.
#[derive(Default)]
pub struct MemoryLibrary {
    responses: HashMap<String, Canned>,
    requests: Mutex<Vec<String>>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), Canned::Json(body));
        self
    }

    pub fn with_raw(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Canned::Raw(body.to_string()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Canned::Status(status));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LibraryFetcher for MemoryLibrary {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Canned::Json(body)) => Ok(body.clone()),
            Some(Canned::Raw(body)) => Ok(serde_json::from_str(body)?),
            Some(Canned::Status(code)) => Err(FetchError::Status(*code)),
            None => Err(FetchError::Timeout(0)),
        }
    }
}

/// Local HTTP server standing in for a remote library
///
/// Replies are keyed by path and query, e.g.
/// `/lib/tiddlers.json?title=Foo&include_system=1`. Anything else gets an
/// empty 404.
#[derive(Default)]
pub struct LibraryServer {
    replies: HashMap<String, (u16, String, Duration)>,
}

impl LibraryServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, path_and_query: &str, status: u16, body: &str) -> Self {
        self.slow_reply(path_and_query, Duration::ZERO, status, body)
    }

    pub fn slow_reply(
        mut self,
        path_and_query: &str,
        delay: Duration,
        status: u16,
        body: &str,
    ) -> Self {
        self.replies
            .insert(path_and_query.to_string(), (status, body.to_string(), delay));
        self
    }

    /// Start serving on a loopback port and return the library base URL
    pub async fn start(self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let replies = Arc::new(self.replies);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let replies = Arc::clone(&replies);
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let replies = Arc::clone(&replies);
                        async move {
                            let key = req.uri().path_and_query().map_or("", |pq| pq.as_str());
                            let (status, body, delay) = replies
                                .get(key)
                                .cloned()
                                .unwrap_or((404, String::new(), Duration::ZERO));
                            tokio::time::sleep(delay).await;
                            Response::builder()
                                .status(status)
                                .body(Full::new(Bytes::from(body)))
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        format!("http://{addr}/lib")
    }
}

/// Base URL of a loopback port nobody listens on
pub async fn unreachable_library() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/lib")
}
