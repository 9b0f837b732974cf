//! Asset catalog module
//!
//! Loads the library's asset list once at startup. Loading is fail-soft:
//! every failure is logged and yields an empty catalog, the relay keeps
//! running either way.

pub mod page;

use serde_json::Value;
use std::sync::Arc;

use crate::library::{self, FetchError, LibraryFetcher};
use crate::logger;

/// Immutable snapshot of the asset list
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Arc<[Value]>,
}

impl Catalog {
    pub fn new(entries: Vec<Value>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetch the catalog from `base_url`, or return an empty one on any failure
pub async fn load(fetcher: &dyn LibraryFetcher, base_url: Option<&str>) -> Catalog {
    let Some(base_url) = base_url else {
        logger::log_error("No libraryUrl specified in the page location, serving an empty catalog");
        return Catalog::empty();
    };

    match fetch(fetcher, base_url).await {
        Ok(catalog) => {
            logger::log_catalog_loaded(base_url, catalog.len());
            catalog
        }
        Err(e) => {
            logger::log_error(&format!("Failed to fetch asset list from {base_url}: {e}"));
            Catalog::empty()
        }
    }
}

async fn fetch(fetcher: &dyn LibraryFetcher, base_url: &str) -> library::Result<Catalog> {
    match fetcher.get_json(&library::catalog_url(base_url)).await? {
        Value::Array(entries) => Ok(Catalog::new(entries)),
        other => Err(FetchError::NotAnArray(json_kind(&other))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryLibrary;
    use serde_json::json;

    const BASE: &str = "https://x.test/lib";

    #[tokio::test]
    async fn test_load_success() {
        let lib = MemoryLibrary::new().with_json(
            "https://x.test/lib/tiddlers.json?title=assetList",
            json!([{"title": "assetList", "list": ["A", "B"]}]),
        );
        let catalog = load(&lib, Some(BASE)).await;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0]["list"], json!(["A", "B"]));
        assert_eq!(lib.requests(), vec!["https://x.test/lib/tiddlers.json?title=assetList"]);
    }

    #[tokio::test]
    async fn test_load_without_library_url() {
        let lib = MemoryLibrary::new();
        let catalog = load(&lib, None).await;
        assert!(catalog.is_empty());
        assert!(lib.requests().is_empty());
    }

    #[tokio::test]
    async fn test_load_http_error_is_empty() {
        let lib = MemoryLibrary::new().with_status(
            "https://x.test/lib/tiddlers.json?title=assetList",
            503,
        );
        assert!(load(&lib, Some(BASE)).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_network_error_is_empty() {
        // Unknown URLs fail like a host that never answered
        let lib = MemoryLibrary::new();
        assert!(load(&lib, Some(BASE)).await.is_empty());
        assert_eq!(lib.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_load_non_array_is_empty() {
        let lib = MemoryLibrary::new().with_json(
            "https://x.test/lib/tiddlers.json?title=assetList",
            json!({"title": "assetList"}),
        );
        assert!(load(&lib, Some(BASE)).await.is_empty());
    }
}
