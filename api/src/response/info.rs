use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

/// Transport metadata captured for one completed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestInfo {
    /// Effective URL the response was received from.
    pub url: String,
    /// Method the request was sent with.
    pub method: String,
    /// HTTP status code.
    pub http_code: u16,
    /// Negotiated protocol version, e.g. `HTTP/2.0`.
    pub http_version: String,
    /// Response `Content-Type`, if any.
    pub content_type: Option<String>,
    /// Size of the response body in bytes.
    pub size_download: u64,
    /// Seconds from sending the request to reading the last body byte.
    pub total_time: f64,
    /// Response headers; repeated headers are joined with `, `.
    pub headers: BTreeMap<String, String>,
}

impl RequestInfo {
    /// Returns the metadata as a JSON object.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.http_code)
    }

    pub(crate) fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
        let mut collected: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            collected
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        collected
    }

    pub(crate) fn content_type(headers: &HeaderMap) -> Option<String> {
        headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }
}
