//! URL helpers for building API endpoints from a configurable base URL.

/// Strip trailing slashes so endpoints can be appended safely.
///
/// ```
/// use multiverse::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://rickandmortyapi.com/api/"), "https://rickandmortyapi.com/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use multiverse::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://rickandmortyapi.com/api/", "/character"),
///     "https://rickandmortyapi.com/api/character"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Accept only absolute http(s) URLs for the configurable base URL.
pub fn is_http_url(value: &str) -> bool {
    let trimmed = value.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}
