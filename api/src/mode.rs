//! Body encoding strategies for `POST` requests.

use std::str::FromStr;

use strum::{Display, EnumIter, IntoEnumIterator};

/// How request parameters are placed into a `POST` body.
///
/// `GET` requests ignore the mode entirely; their parameters always travel
/// in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RequestMode {
    /// JSON object body with `Content-Type: application/json`.
    #[default]
    Json,
    /// `multipart/form-data` body, one text field per parameter.
    Form,
    /// The literal `<url>?<query>` string as a url-encoded body.
    Http,
}

impl RequestMode {
    /// Parses a mode name, falling back to [`RequestMode::Json`] for unknown names.
    pub fn parse_lenient(name: &str) -> Self {
        name.trim().parse().unwrap_or_default()
    }
}

/// Strict, case-insensitive parse of the exact mode name.
impl FromStr for RequestMode {
    type Err = strum::ParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|candidate| candidate.to_string().eq_ignore_ascii_case(name))
            .ok_or(strum::ParseError::VariantNotFound)
    }
}

impl From<&str> for RequestMode {
    fn from(name: &str) -> Self {
        Self::parse_lenient(name)
    }
}

impl From<String> for RequestMode {
    fn from(name: String) -> Self {
        Self::parse_lenient(&name)
    }
}
