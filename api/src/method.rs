//! HTTP method types for API requests.

use std::str::FromStr;

use strum::{Display, EnumIter, IntoEnumIterator};

/// HTTP methods understood by the API.
///
/// The API only distinguishes between `GET` and `POST`. Any other method
/// name is sent as `POST`, which is what the server expects for every
/// non-read operation.
///
/// ## Examples
///
/// ```rust
/// use echo_five_api::RestMethod;
///
/// assert_eq!(RestMethod::from("get"), RestMethod::Get);
/// assert_eq!(RestMethod::from(" Post "), RestMethod::Post);
/// assert_eq!(RestMethod::from("DELETE"), RestMethod::Post);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - parameters travel in the query string.
    Get,
    /// HTTP POST - parameters travel in the body.
    #[default]
    Post,
}

impl RestMethod {
    /// Parses a method name, falling back to `POST` for anything that is not `GET`.
    pub fn parse_lenient(name: &str) -> Self {
        name.trim().parse().unwrap_or_default()
    }

    /// Returns `true` if this method carries the parameters in the request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

/// Strict, case-insensitive parse of the exact method name.
impl FromStr for RestMethod {
    type Err = strum::ParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|candidate| candidate.to_string().eq_ignore_ascii_case(name))
            .ok_or(strum::ParseError::VariantNotFound)
    }
}

impl From<&str> for RestMethod {
    fn from(name: &str) -> Self {
        Self::parse_lenient(name)
    }
}

impl From<String> for RestMethod {
    fn from(name: String) -> Self {
        Self::parse_lenient(&name)
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
