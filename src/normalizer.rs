//! Canonical string keys for comparing and deduplicating URLs.
//!
//! Two URLs are the same page when they only differ by fragment, query
//! string or trailing slash.

use url::{ParseError, Url};

/// Resolves `input` against `base` and returns its normalized form.
///
/// Absolute inputs ignore the base. Anything the URL parser rejects comes
/// back as an error so callers can skip the link and keep going.
pub fn normalize_url(input: &str, base: &Url) -> Result<String, ParseError> {
    base.join(input.trim()).map(normalize)
}

/// Parses an absolute URL and returns its normalized form.
pub fn normalize_absolute(input: &str) -> Result<String, ParseError> {
    Url::parse(input.trim()).map(normalize)
}

/// Normalizes an already parsed URL: no fragment, no query, no trailing slash.
pub fn normalize(mut url: Url) -> String {
    url.set_fragment(None);
    url.set_query(None);

    // Strip every trailing slash so normalizing twice is a no-op
    let serialized: String = url.into();
    serialized.trim_end_matches('/').to_string()
}
