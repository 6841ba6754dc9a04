//! Request parameters and their wire encodings.
//!
//! Parameters are kept in a key-sorted map so every encoding derived from
//! them (JSON body, query string, signature payload) is deterministic
//! regardless of insertion order.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io;

use serde::{Serialize, Serializer};
use serde_json::ser::Formatter;
use serde_json::{Map, Value};

/// Key-sorted request parameters.
///
/// ## Examples
///
/// ```rust
/// use echo_five_api::Params;
///
/// let params = Params::new().with("foo", "Bar").with("biz", "Buz");
/// assert_eq!(params.to_json().unwrap(), r#"{"biz":"Buz","foo":"Bar"}"#);
/// assert_eq!(params.to_query_string(), "biz=Buz&foo=Bar");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter and returns the updated set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a parameter, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Encodes the parameters as a compact JSON object.
    ///
    /// Keys are sorted at every nesting level, `/` is escaped as `\/` and
    /// non-ASCII characters are written as `\uXXXX` escapes. An empty set
    /// encodes as `{}`.
    ///
    /// Top-level keys that are canonical integers (`"9"`, `"10"`, `"-3"`)
    /// sort numerically and come before all other keys, which sort by
    /// byte order. Nested keys always sort by byte order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut entries: Vec<_> = self
            .0
            .iter()
            .map(|(key, value)| (key.as_str(), sort_keys(value)))
            .collect();
        entries.sort_by(|a, b| compare_keys(a.0, b.0));
        encode_json(&OrderedObject(&entries))
    }

    /// Encodes the payload that the request signature is computed over.
    ///
    /// Identical to [`Params::to_json`] except that an empty set encodes as
    /// `[]`, which is how the server encodes an empty parameter list when it
    /// verifies the signature.
    ///
    /// The server sorts only the top level before encoding, so a verifier
    /// agrees with this payload as long as nested objects are already in
    /// byte order. Mixing integer keys with keys that start with a digit
    /// (`"10"` next to `"1x"`) may also order differently there.
    pub fn to_signing_payload(&self) -> Result<String, serde_json::Error> {
        if self.is_empty() {
            return Ok("[]".to_string());
        }
        self.to_json()
    }

    /// Flattens the parameters into `(name, value)` string pairs.
    ///
    /// Nested objects and arrays become bracketed names (`a[b]`, `a[0]`),
    /// booleans become `1`/`0` and nulls are dropped.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            flatten_into(key.clone(), value, &mut pairs);
        }
        pairs
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` query string.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_pairs())
            .finish()
    }

}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Params {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<BTreeMap<String, Value>> for Params {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Rebuilds nested objects with their keys inserted in sorted order, so the
/// output is sorted whether or not `serde_json` preserves insertion order.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Orders integer-like keys numerically ahead of every other key.
fn compare_keys(a: &str, b: &str) -> Ordering {
    match (integer_key(a), integer_key(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Parses keys written as canonical decimal integers: no sign other than a
/// leading `-`, no leading zeros, no `-0`.
fn integer_key(key: &str) -> Option<i64> {
    key.parse::<i64>()
        .ok()
        .filter(|number| number.to_string() == key)
}

/// Top-level object serialized in a caller-chosen key order.
struct OrderedObject<'a>(&'a [(&'a str, Value)]);

impl Serialize for OrderedObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

fn flatten_into(name: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((name, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => pairs.push((name, number.to_string())),
        Value::String(text) => pairs.push((name, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(format!("{name}[{index}]"), item, pairs);
            }
        }
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (key, item) in entries {
                flatten_into(format!("{name}[{key}]"), item, pairs);
            }
        }
    }
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, EscapingFormatter);
    value.serialize(&mut serializer)?;
    // The formatter only ever emits ASCII.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Compact formatter that escapes `/` and every non-ASCII character.
struct EscapingFormatter;

impl Formatter for EscapingFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            match ch {
                '/' => writer.write_all(b"\\/")?,
                c if c.is_ascii() => writer.write_all(&[c as u8])?,
                c => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        write!(writer, "\\u{unit:04x}")?;
                    }
                }
            }
        }
        Ok(())
    }
}
