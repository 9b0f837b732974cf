//! Exchange log format module
//!
//! One entry per inbound message. Supported formats:
//! - `combined` (Nginx-like line with origin)
//! - `common` (same without origin)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables

use chrono::Local;

/// Exchange log entry covering one inbound message and its reply
#[derive(Debug, Clone)]
pub struct ExchangeLogEntry {
    /// Peer address of the transport connection
    pub remote_addr: String,
    /// Origin reported for the message, unchecked
    pub origin: Option<String>,
    pub time: chrono::DateTime<Local>,
    pub verb: String,
    /// Virtual path
    pub url: String,
    /// Envelope status, `None` when no reply was posted
    pub status: Option<u16>,
    /// Envelope body size in bytes
    pub body_bytes: usize,
    /// Processing time in microseconds
    pub request_time_us: u64,
}

impl ExchangeLogEntry {
    /// Create a new entry with current timestamp
    pub fn new(remote_addr: String, verb: String, url: String) -> Self {
        Self {
            remote_addr,
            origin: None,
            time: Local::now(),
            verb,
            url,
            status: None,
            body_bytes: 0,
            request_time_us: 0,
        }
    }

    /// Format the entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn status_text(&self) -> String {
        self.status.map_or_else(|| "-".to_string(), |s| s.to_string())
    }

    fn time_local(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    /// `$remote_addr - - [$time_local] "$verb $url" $status $body_bytes "$origin"`
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\"",
            self.format_common(),
            self.origin.as_deref().unwrap_or("-"),
        )
    }

    /// `$remote_addr - - [$time_local] "$verb $url" $status $body_bytes`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {}\" {} {}",
            self.remote_addr,
            self.time_local(),
            self.verb,
            self.url,
            self.status_text(),
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "origin": self.origin,
            "time": self.time.to_rfc3339(),
            "verb": self.verb,
            "url": self.url,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$remote_addr` - Peer address
    /// - `$origin` - Message origin
    /// - `$time_local` - Local time in Common Log Format
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$verb` - Message verb
    /// - `$url` - Virtual path
    /// - `$status` - Envelope status
    /// - `$body_bytes_sent` - Envelope body size
    /// - `$request_time` - Processing time in seconds (3 decimal places)
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;

        pattern
            .replace("$remote_addr", &self.remote_addr)
            .replace("$origin", self.origin.as_deref().unwrap_or("-"))
            .replace("$time_local", &self.time_local())
            .replace("$time_iso8601", &self.time.to_rfc3339())
            .replace("$verb", &self.verb)
            .replace("$url", &self.url)
            .replace("$status", &self.status_text())
            .replace("$body_bytes_sent", &self.body_bytes.to_string())
            .replace("$request_time", &format!("{request_time:.3}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> ExchangeLogEntry {
        let mut entry = ExchangeLogEntry::new(
            "192.168.1.1:5000".to_string(),
            "GET".to_string(),
            "recipes/library/tiddlers.json".to_string(),
        );
        entry.origin = Some("https://wiki.test".to_string());
        entry.status = Some(200);
        entry.body_bytes = 1234;
        entry.request_time_us = 12_000;
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format("combined");
        assert!(log.starts_with("192.168.1.1:5000 - - ["));
        assert!(log.contains("\"GET recipes/library/tiddlers.json\" 200 1234"));
        assert!(log.ends_with("\"https://wiki.test\""));
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format("common");
        assert!(log.contains("\"GET recipes/library/tiddlers.json\" 200 1234"));
        assert!(!log.contains("https://wiki.test"));
    }

    #[test]
    fn test_format_no_reply() {
        let mut entry = create_test_entry();
        entry.verb = "PUT".to_string();
        entry.status = None;
        entry.body_bytes = 0;
        assert!(entry.format("common").ends_with("\" - 0"));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["verb"], "GET");
        assert_eq!(value["status"], 200);
        assert_eq!(value["origin"], "https://wiki.test");
        assert_eq!(value["body_bytes"], 1234);
    }

    #[test]
    fn test_format_custom() {
        let log = create_test_entry().format("$verb $url -> $status in $request_time");
        assert_eq!(log, "GET recipes/library/tiddlers.json -> 200 in 0.012");
    }
}
