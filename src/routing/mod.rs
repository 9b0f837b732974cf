//! Routing module
//!
//! Maps the virtual paths an embedded document asks for onto relay routes:
//! - Exact match for the catalog
//! - Prefix match for single entries
//! - Everything else falls through to not found

mod matcher;

pub use matcher::{classify, tiddler_title, VirtualRoute, CATALOG_PATH, TIDDLER_PREFIX};
