//! Remote content library module
//!
//! Builds `tiddlers.json` query URLs and fetches them. The router and the
//! catalog loader only see the [`LibraryFetcher`] trait, so tests can swap the
//! network for an in-memory library.

mod error;

pub use error::{FetchError, Result};

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Title under which the library publishes its catalog
pub const ASSET_LIST_TITLE: &str = "assetList";

/// Characters `encodeURIComponent` leaves alone but `urlencoding` escapes
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode a title the way a browser's `encodeURIComponent` does
pub fn encode_title(title: &str) -> String {
    let mut encoded = urlencoding::encode(title).into_owned();
    for (escaped, mark) in UNRESERVED_MARKS {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, mark);
        }
    }
    encoded
}

/// URL of the catalog manifest
pub fn catalog_url(base_url: &str) -> String {
    format!("{base_url}/tiddlers.json?title={ASSET_LIST_TITLE}")
}

/// URL of a single entry, system tiddlers included
pub fn tiddler_url(base_url: &str, title: &str) -> String {
    format!(
        "{base_url}/tiddlers.json?title={}&include_system=1",
        encode_title(title)
    )
}

/// Source of parsed JSON documents from the remote library
#[async_trait]
pub trait LibraryFetcher: Send + Sync {
    /// GET `url` and parse the body as JSON
    ///
    /// Any non-2xx status is an error.
    async fn get_json(&self, url: &str) -> Result<Value>;
}

/// reqwest-backed fetcher
pub struct HttpLibrary {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpLibrary {
    pub fn new(user_agent: &str, timeout_secs: Option<u64>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            timeout: timeout_secs.map(Duration::from_secs),
        })
    }

    async fn send(&self, url: &str) -> Result<Value> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl LibraryFetcher for HttpLibrary {
    async fn get_json(&self, url: &str) -> Result<Value> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.send(url))
                .await
                .map_err(|_| FetchError::Timeout(limit.as_secs()))?,
            None => self.send(url).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{unreachable_library, LibraryServer};
    use serde_json::json;

    #[test]
    fn test_catalog_url() {
        assert_eq!(
            catalog_url("https://x.test/lib"),
            "https://x.test/lib/tiddlers.json?title=assetList"
        );
    }

    #[test]
    fn test_tiddler_url_encodes_title() {
        assert_eq!(
            tiddler_url("https://x.test/lib", "$:/plugins/a b"),
            "https://x.test/lib/tiddlers.json?title=%24%3A%2Fplugins%2Fa%20b&include_system=1"
        );
    }

    #[test]
    fn test_encode_title_matches_encode_uri_component() {
        assert_eq!(encode_title("Foo"), "Foo");
        assert_eq!(encode_title("it's (ok)!*"), "it's%20(ok)!*");
        assert_eq!(encode_title("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode_title("a&b=c?"), "a%26b%3Dc%3F");
        assert_eq!(encode_title("ü"), "%C3%BC");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(FetchError::Status(500).to_string(), "HTTP error 500");
        assert_eq!(FetchError::NotConfigured.to_string(), "no library URL configured");
    }

    #[tokio::test]
    async fn test_http_library_parses_json() {
        let base = LibraryServer::new()
            .reply(
                "/lib/tiddlers.json?title=Foo&include_system=1",
                200,
                r#"[{"title":"Foo","text":"bar"}]"#,
            )
            .start()
            .await;
        let library = HttpLibrary::new("tiddler-relay-test", None).unwrap();

        let value = library.get_json(&tiddler_url(&base, "Foo")).await.unwrap();
        assert_eq!(value, json!([{"title": "Foo", "text": "bar"}]));
    }

    #[tokio::test]
    async fn test_http_library_error_status() {
        let base = LibraryServer::new()
            .reply("/lib/tiddlers.json?title=assetList", 500, "boom")
            .start()
            .await;
        let library = HttpLibrary::new("tiddler-relay-test", None).unwrap();

        let err = library.get_json(&catalog_url(&base)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_http_library_rejects_non_json() {
        let base = LibraryServer::new()
            .reply("/lib/tiddlers.json?title=assetList", 200, "<html></html>")
            .start()
            .await;
        let library = HttpLibrary::new("tiddler-relay-test", None).unwrap();

        let err = library.get_json(&catalog_url(&base)).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_http_library_unreachable_host() {
        let base = unreachable_library().await;
        let library = HttpLibrary::new("tiddler-relay-test", None).unwrap();

        let err = library.get_json(&catalog_url(&base)).await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }

    #[tokio::test]
    async fn test_http_library_timeout() {
        let base = LibraryServer::new()
            .slow_reply(
                "/lib/tiddlers.json?title=assetList",
                Duration::from_secs(5),
                200,
                "[]",
            )
            .start()
            .await;
        let library = HttpLibrary::new("tiddler-relay-test", Some(1)).unwrap();

        let err = library.get_json(&catalog_url(&base)).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(1)));
    }
}
