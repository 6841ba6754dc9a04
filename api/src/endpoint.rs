//! Endpoint resolution against the configured host.

use url::Url;

use crate::error::ClientError;

/// Scheme used when neither the host nor the endpoint carries one.
const DEFAULT_SCHEME: &str = "https://";

/// Returns `true` if `value` starts with `http://` or `https://`, ignoring case.
pub fn has_http_scheme(value: &str) -> bool {
    starts_with_ignore_case(value, "http://") || starts_with_ignore_case(value, "https://")
}

/// Resolves an endpoint against the host.
///
/// Absolute `http(s)://` endpoints are returned unchanged. Anything else is
/// joined to the host with exactly one `/` in between.
///
/// ## Examples
///
/// ```rust
/// use echo_five_api::endpoint::resolve_url;
///
/// assert_eq!(
///     resolve_url("api.example.com", "/api/v1/test/simple"),
///     "api.example.com/api/v1/test/simple"
/// );
/// assert_eq!(
///     resolve_url("api.example.com", "https://other.example.com/x"),
///     "https://other.example.com/x"
/// );
/// ```
pub fn resolve_url(host: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    if has_http_scheme(endpoint) {
        return endpoint.to_string();
    }
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Appends an encoded query string, using `&` if the URL already has one.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

/// Parses a resolved URL for the transport, assuming `https://` when the
/// URL has no scheme of its own.
pub fn to_transport_url(resolved: &str) -> Result<Url, ClientError> {
    let candidate = if has_scheme(resolved) {
        resolved.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{resolved}")
    };
    Url::parse(&candidate).map_err(|source| ClientError::InvalidUrl {
        url: resolved.to_string(),
        source,
    })
}

/// Returns `true` if `value` begins with `scheme://`. A `://` later in the
/// path or query does not count.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
