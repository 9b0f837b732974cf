//! Message routing dispatch module
//!
//! Entry point for inbound message processing: verb check, virtual path
//! classification and response shaping. The router is transport agnostic;
//! every request comes with a one-shot `respond` callback standing in for the
//! window that sent it.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::http::body;
use crate::library::{self, FetchError, LibraryFetcher};
use crate::logger;
use crate::message::{RequestMessage, ResponseMessage};
use crate::routing::{self, VirtualRoute};

/// Routes inbound messages against the catalog snapshot and the remote library
pub struct MessageRouter {
    catalog: Catalog,
    /// Pretty-printed catalog, rendered once since the catalog never changes
    catalog_body: String,
    base_url: Option<String>,
    fetcher: Arc<dyn LibraryFetcher>,
}

impl MessageRouter {
    pub fn new(catalog: Catalog, base_url: Option<String>, fetcher: Arc<dyn LibraryFetcher>) -> Self {
        let catalog_body = body::to_pretty_json(catalog.entries()).unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to render catalog: {e}"));
            "[]".to_string()
        });
        Self {
            catalog,
            catalog_body,
            base_url,
            fetcher,
        }
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle one inbound message
    ///
    /// `respond` is called at most once. Messages whose verb is not `GET` are
    /// dropped without calling it.
    pub async fn handle<R>(&self, message: RequestMessage, respond: R)
    where
        R: FnOnce(ResponseMessage),
    {
        if !message.is_get() {
            logger::log_debug(&format!("Ignoring message with verb {:?}", message.verb));
            return;
        }

        let response = self.route(&message).await;
        respond(response);
    }

    /// Resolve a `GET` message into its response envelope
    pub async fn route(&self, message: &RequestMessage) -> ResponseMessage {
        match routing::classify(&message.url) {
            VirtualRoute::Catalog => ResponseMessage::json(message, self.catalog_body.clone()),
            VirtualRoute::Tiddler { title } => match self.fetch_tiddler(title).await {
                Ok(body) => ResponseMessage::json(message, body),
                Err(e) => {
                    logger::log_error(&format!("Failed to fetch plugin data for {title:?}: {e}"));
                    ResponseMessage::not_found(message)
                }
            },
            VirtualRoute::NotFound => ResponseMessage::not_found(message),
        }
    }

    async fn fetch_tiddler(&self, title: &str) -> library::Result<String> {
        let base_url = self.base_url.as_deref().ok_or(FetchError::NotConfigured)?;
        let value = self.fetcher.get_json(&library::tiddler_url(base_url, title)).await?;
        Ok(body::strip_outer_brackets(value))
    }
}
