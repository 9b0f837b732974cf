//! Logger module
//!
//! Provides logging utilities for the relay including:
//! - Startup and shutdown logging
//! - Exchange logging with multiple formats
//! - Error, warning and debug logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::ExchangeLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        config.logging.level.eq_ignore_ascii_case("debug"),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_relay_start(addr: &SocketAddr, config: &Config, catalog_len: usize) {
    write_info("======================================");
    write_info("Library relay started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!(
        "Message endpoint: http://{addr}{}",
        config.routes.message_path
    ));
    match config.library_url() {
        Some(url) => write_info(&format!("Library: {url}")),
        None => write_info("Library: (none)"),
    }
    write_info(&format!("Catalog entries: {catalog_len}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_catalog_loaded(base_url: &str, count: usize) {
    write_info(&format!("[Catalog] Fetched {count} entries from {base_url}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_debug(message: &str) {
    if let Some(w) = writer::get() {
        w.write_debug(&format!("[DEBUG] {message}"));
    }
}

/// Log formatted exchange entry
pub fn log_exchange(entry: &ExchangeLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_shutdown(signal: &str) {
    write_info(&format!("\n[Shutdown] {signal} received, no longer accepting messages"));
}
