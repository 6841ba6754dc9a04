//! Response handling module.
//!
//! This module provides [`ApiResponse`], the raw body and transport metadata
//! of one completed request, along with lenient accessors for the API's
//! `{ "status": .., "data": {..}, "messages": [..] }` envelope. The accessors
//! never fail: missing fields, empty bodies and malformed JSON all degrade to
//! empty values.

mod info;

pub use info::RequestInfo;

use serde_json::{Map, Value};

/// The last response received by a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    body: String,
    info: RequestInfo,
}

/// A response body as returned by [`ApiClient::response`](crate::ApiClient::response).
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody<'a> {
    /// The body exactly as received.
    Raw(&'a str),
    /// The body decoded as JSON, or `Value::Null` if it is not valid JSON.
    Decoded(Value),
}

impl ApiResponse {
    pub fn new(body: impl Into<String>, info: RequestInfo) -> Self {
        Self {
            body: body.into(),
            info,
        }
    }

    /// Returns the raw body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the transport metadata.
    pub fn info(&self) -> &RequestInfo {
        &self.info
    }

    /// Returns the HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.info.http_code
    }

    /// Decodes the body as JSON, returning `Value::Null` when it is empty or malformed.
    pub fn json(&self) -> Value {
        decode_lenient(&self.body)
    }

    /// Returns the envelope's `data` field, or an empty object.
    pub fn data(&self) -> Value {
        data_of(&self.json())
    }

    /// Returns the envelope's `messages` field, or an empty list.
    pub fn messages(&self) -> Vec<Value> {
        messages_of(&self.json())
    }

    /// Returns the envelope's `status` field as a string, or `""`.
    pub fn status(&self) -> String {
        status_of(&self.json())
    }
}

pub(crate) fn decode_lenient(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or(Value::Null)
}

pub(crate) fn data_of(decoded: &Value) -> Value {
    match decoded.get("data") {
        Some(data) if !data.is_null() => data.clone(),
        _ => Value::Object(Map::new()),
    }
}

pub(crate) fn messages_of(decoded: &Value) -> Vec<Value> {
    match decoded.get("messages") {
        Some(Value::Array(messages)) => messages.clone(),
        _ => Vec::new(),
    }
}

pub(crate) fn status_of(decoded: &Value) -> String {
    match decoded.get("status") {
        Some(Value::String(status)) => status.clone(),
        Some(Value::Number(status)) => status.to_string(),
        Some(Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn response(body: &str) -> ApiResponse {
        ApiResponse::new(
            body,
            RequestInfo {
                url: "https://api.example.com/x".to_string(),
                method: "POST".to_string(),
                http_code: 200,
                http_version: "HTTP/1.1".to_string(),
                content_type: None,
                size_download: body.len() as u64,
                total_time: 0.0,
                headers: BTreeMap::new(),
            },
        )
    }

    #[test]
    fn test_envelope_fields() {
        let r = response(
            r#"{"status":"success","data":{"foo":"Bar"},"messages":["ok","done"]}"#,
        );
        assert_eq!(r.status(), "success");
        assert_eq!(r.data(), json!({"foo": "Bar"}));
        assert_eq!(r.messages(), vec![json!("ok"), json!("done")]);
        assert_eq!(r.status_code(), 200);
    }

    #[test]
    fn test_missing_fields_default() {
        let r = response(r#"{"other":1}"#);
        assert_eq!(r.status(), "");
        assert_eq!(r.data(), json!({}));
        assert!(r.messages().is_empty());
    }

    #[test]
    fn test_malformed_and_empty_bodies_decode_to_null() {
        assert_eq!(response("not json").json(), Value::Null);
        assert_eq!(response("").json(), Value::Null);
        assert_eq!(response("   ").json(), Value::Null);
        assert_eq!(response("not json").data(), json!({}));
    }

    #[test]
    fn test_status_coercion() {
        assert_eq!(response(r#"{"status":200}"#).status(), "200");
        assert_eq!(response(r#"{"status":1.5}"#).status(), "1.5");
        assert_eq!(response(r#"{"status":true}"#).status(), "1");
        assert_eq!(response(r#"{"status":false}"#).status(), "");
        assert_eq!(response(r#"{"status":null}"#).status(), "");
    }

    #[test]
    fn test_null_data_defaults_to_empty_object() {
        assert_eq!(response(r#"{"data":null}"#).data(), json!({}));
    }

    #[test]
    fn test_non_array_messages_default_to_empty() {
        assert!(response(r#"{"messages":"oops"}"#).messages().is_empty());
    }

    #[test]
    fn test_raw_body_is_untouched() {
        let body = "{\"a\": 1}\n";
        assert_eq!(response(body).body(), body);
        assert_eq!(response(body).json(), json!({"a": 1}));
    }
}
