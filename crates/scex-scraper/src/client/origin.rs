//! Store URL normalization.
//!
//! Operators paste anything: bare domains, `http://` origins, URLs with
//! trailing slashes or deep paths. Every adapter works from the same
//! normalized `https://domain` origin.

/// Normalizes operator input to an origin usable as a URL base: prepends
/// `https://` when no scheme is present and trims trailing slashes.
#[must_use]
pub fn normalize_store_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };
    with_scheme.trim_end_matches('/').to_owned()
}

/// Extracts the bare domain from a URL, for rate-limit reporting.
pub(crate) fn extract_domain(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    stripped
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(stripped)
        .to_owned()
}
