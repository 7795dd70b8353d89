//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Build a full API URL from the configured base and a path
///
/// # Arguments
/// * `base` - `ClientConfig::api_base`; empty for same-origin requests
/// * `path` - The API path (should start with "/api/")
///
/// # Example
/// ```rust
/// # use frontend::shared::api_utils::api_url;
/// let url = api_url("", "/api/bots");
/// assert_eq!(url, "/api/bots");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Percent-encode an id for use as a single path segment
pub fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
