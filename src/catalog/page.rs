// Page location module
// Reads query parameters from the hosting page's location

/// Query parameter naming the remote library base URL
pub const LIBRARY_URL_PARAM: &str = "libraryUrl";

/// Extract the query string of a page location
///
/// Accepts a full URL, a bare `?query` or a bare `query`. The fragment is
/// never part of the query.
fn query_of(location: &str) -> &str {
    let without_fragment = location.split_once('#').map_or(location, |(head, _)| head);
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains('=') => without_fragment,
        None => "",
    }
}

/// Decode one form-urlencoded component (`+` is a space)
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// First value of query parameter `name`, as `URLSearchParams::get` returns it
pub fn query_param(location: &str, name: &str) -> Option<String> {
    query_of(location)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key) == name)
        .map(|(_, value)| decode_component(value))
}

/// Library base URL from the page location, empty values count as absent
pub fn library_url(location: Option<&str>) -> Option<String> {
    location
        .and_then(|loc| query_param(loc, LIBRARY_URL_PARAM))
        .filter(|url| !url.is_empty())
}
