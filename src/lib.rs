//! Content library relay
//!
//! Answers an embedded document's requests for virtual content-server paths
//! by proxying them to a remote `tiddlers.json` library endpoint.

pub mod catalog;
pub mod config;
pub mod handler;
pub mod http;
pub mod library;
pub mod logger;
pub mod message;
pub mod routing;
pub mod server;

#[cfg(test)]
pub(crate) mod testing;
