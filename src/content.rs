//! Page content helpers

use url::Url;

/// Collapse every whitespace run to a single space and trim the ends.
///
/// Page text scraped from the DOM carries layout newlines and indentation
/// that only cost tokens.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hostname of a page URL as used in `domainSettings.<hostname>` keys.
///
/// Returns `None` for URLs without a host (`file:`, `about:`, malformed).
pub fn hostname(page_url: &str) -> Option<String> {
    let parsed = Url::parse(page_url.trim()).ok()?;
    parsed.host_str().map(str::to_string)
}
