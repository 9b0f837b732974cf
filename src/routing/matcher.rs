//! Virtual path matching module
//!
//! Classifies the `url` of an inbound message against the relay's route table.
//! Routes are evaluated in order and the first match wins.

/// Virtual path of the whole catalog
pub const CATALOG_PATH: &str = "recipes/library/tiddlers.json";

/// Prefix of single-entry virtual paths
pub const TIDDLER_PREFIX: &str = "recipes/library/tiddlers/";

const JSON_SUFFIX: &str = ".json";

/// Path matching condition
#[derive(Debug, Clone, Copy)]
pub enum RouteMatch {
    /// Exact path match
    Exact(&'static str),
    /// Path prefix match
    Prefix(&'static str),
}

/// What a matched route resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Catalog,
    Tiddler,
}

/// Route table in precedence order
pub const ROUTES: [(RouteMatch, RouteKind); 2] = [
    (RouteMatch::Exact(CATALOG_PATH), RouteKind::Catalog),
    (RouteMatch::Prefix(TIDDLER_PREFIX), RouteKind::Tiddler),
];

/// Result of classifying a virtual path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualRoute<'a> {
    /// The full asset list
    Catalog,
    /// One library entry, by title
    Tiddler { title: &'a str },
    /// Anything else
    NotFound,
}

/// Check if a path matches a route rule
pub fn match_path(rule: &RouteMatch, path: &str) -> bool {
    match rule {
        RouteMatch::Exact(exact) => path == *exact,
        RouteMatch::Prefix(prefix) => path.starts_with(*prefix),
    }
}

/// Title addressed by a single-entry path, one trailing `.json` removed
pub fn tiddler_title(path: &str) -> &str {
    let title = path.strip_prefix(TIDDLER_PREFIX).unwrap_or(path);
    title.strip_suffix(JSON_SUFFIX).unwrap_or(title)
}

/// Classify a virtual path
pub fn classify(path: &str) -> VirtualRoute<'_> {
    let kind = ROUTES
        .iter()
        .find(|(rule, _)| match_path(rule, path))
        .map(|(_, kind)| *kind);

    match kind {
        Some(RouteKind::Catalog) => VirtualRoute::Catalog,
        Some(RouteKind::Tiddler) => VirtualRoute::Tiddler {
            title: tiddler_title(path),
        },
        None => VirtualRoute::NotFound,
    }
}
