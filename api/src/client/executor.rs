//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] struct for executing signed
//! requests against the API, keeping the last response and optional debug
//! telemetry on the instance.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use serde_json::Value;
use tracing::{debug, instrument, warn, Span};

use crate::config::ClientConfig;
use crate::debug::{DebugReport, DebugState};
use crate::endpoint::{append_query, resolve_url, to_transport_url};
use crate::error::{ApiError, ClientError, ConfigError, SigningError};
use crate::method::RestMethod;
use crate::mode::RequestMode;
use crate::params::Params;
use crate::response::{data_of, messages_of, status_of, ApiResponse, RequestInfo, ResponseBody};
use crate::signer::{RequestSigner, SIGNATURE_HEADER};

/// Connection timeout applied to every request.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    host: String,
    api_key: String,
    api_secret: String,
    insecure_debug_tls: bool,
}

impl ApiClientBuilder {
    fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
            api_secret: String::new(),
            insecure_debug_tls: false,
        }
    }

    /// Sets the shared secret used to sign requests.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let client = ApiClient::builder("api.example.com", "MY_API_KEY")
    ///     .secret("MY_API_SECRET")
    ///     .build()?;
    /// ```
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = secret.into();
        self
    }

    /// Skips TLS certificate verification for requests made while debug
    /// mode is active. Never enable this against production hosts.
    pub fn insecure_debug_tls(mut self, enabled: bool) -> Self {
        self.insecure_debug_tls = enabled;
        self
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the host or API key is empty.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = ClientConfig::new(self.host, self.api_key, self.api_secret)?
            .with_insecure_debug_tls(self.insecure_debug_tls);
        Ok(ApiClient::from_config(config))
    }
}

/// Client for the API.
///
/// Each call to [`request`](ApiClient::request) builds a fresh HTTP
/// connection, sends one request and stores the response on the instance,
/// replacing the previous one. `request` borrows the client mutably, so one
/// instance never has two requests in flight; use one client per task when
/// requests need to run concurrently.
///
/// ## Examples
///
/// ```rust,ignore
/// use echo_five_api::{ApiClient, Params};
///
/// let mut api = ApiClient::new("api.example.com", "MY_API_KEY", "")?;
/// api.debug_start();
///
/// let params = Params::new().with("foo", "Bar").with("biz", "Buz");
/// api.request("post", "/api/v1/test/simple", &params, "json").await?;
///
/// api.debug_stop();
/// println!("{:?}", api.response_json());
/// println!("{:?}", api.debug_get());
/// ```
#[derive(Debug)]
pub struct ApiClient {
    config: ClientConfig,
    signer: Option<RequestSigner>,
    last: Option<ApiResponse>,
    debug: DebugState,
}

/// Body of an outgoing request.
enum RequestBody {
    Empty,
    Text(String),
    Multipart(Vec<(String, String)>),
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    pub fn builder(host: impl Into<String>, api_key: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(host, api_key)
    }

    /// Creates a client. An empty `api_secret` disables request signing.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::EmptyHost`] or [`ConfigError::EmptyApiKey`]
    /// (wrapped in [`ApiError::Config`]) when either value is empty.
    pub fn new(
        host: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Self::builder(host, api_key).secret(api_secret).build()
    }

    /// Creates a client from an already validated configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        let signer = config
            .signing_enabled()
            .then(|| RequestSigner::new(config.api_secret()));
        Self {
            config,
            signer,
            last: None,
            debug: DebugState::default(),
        }
    }

    /// Creates a client from `ECHO_FIVE_API_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Executes a request and stores its response on the client.
    ///
    /// `method` is matched case-insensitively: `GET` sends `params` in the
    /// query string, anything else is a `POST` whose body is encoded
    /// according to `mode` (`json`, `form` or `http`, defaulting to `json`).
    /// Relative endpoints are resolved against the configured host.
    ///
    /// HTTP error statuses are not errors; their bodies are stored like any
    /// other response.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::Transport`] on DNS, connection, TLS, timeout or
    /// body-read failures, and [`ClientError::InvalidUrl`] when the resolved
    /// URL cannot be parsed. Failed requests leave the previous response in
    /// place and are not retried.
    #[instrument(
        name = "api_request",
        skip(self, method, params, mode),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn request(
        &mut self,
        method: impl Into<RestMethod>,
        endpoint: &str,
        params: &Params,
        mode: impl Into<RequestMode>,
    ) -> Result<&ApiResponse, ApiError> {
        let method = method.into();
        let mode = mode.into();
        Span::current().record("http.method", method.to_string().as_str());

        let mut url = resolve_url(self.config.host(), endpoint);
        let mut headers = self.base_headers(params)?;

        let body = match method {
            RestMethod::Get => {
                url = append_query(&url, &params.to_query_string());
                RequestBody::Empty
            }
            RestMethod::Post => match mode {
                RequestMode::Json => {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                    RequestBody::Text(params.to_json()?)
                }
                RequestMode::Form => RequestBody::Multipart(params.to_pairs()),
                RequestMode::Http if params.is_empty() => RequestBody::Empty,
                RequestMode::Http => {
                    headers.insert(
                        CONTENT_TYPE,
                        HeaderValue::from_static("application/x-www-form-urlencoded"),
                    );
                    RequestBody::Text(format!("{url}?{}", params.to_query_string()))
                }
            },
        };

        Span::current().record("http.url", url.as_str());
        let target = to_transport_url(&url)?;

        let insecure = self.debug.is_enabled() && self.config.insecure_debug_tls();
        if insecure {
            warn!(url = %url, "TLS certificate verification disabled for debug request");
        }

        // Built per call so the connection never outlives the request.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(ClientError::Transport)?;

        let mut request = client.request(method.to_reqwest(), target).headers(headers);
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Text(text) => request.body(text),
            RequestBody::Multipart(fields) => {
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                request.multipart(form)
            }
        };

        debug!(%method, %mode, params = params.len(), "sending request");
        let started = Instant::now();
        let response = request.send().await.map_err(ClientError::Transport)?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let http_version = format!("{:?}", response.version());
        let effective_url = response.url().to_string();
        let response_headers = RequestInfo::collect_headers(response.headers());
        let content_type = RequestInfo::content_type(response.headers());

        let bytes = response.bytes().await.map_err(ClientError::Transport)?;
        let elapsed = started.elapsed();

        let otel_status = if status.is_server_error() {
            "ERROR"
        } else if status.is_success() {
            "OK"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);
        debug!(
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            bytes = bytes.len(),
            "request completed"
        );

        self.debug.record_request(elapsed, &url);

        let info = RequestInfo {
            url: effective_url,
            method: method.to_string(),
            http_code: status.as_u16(),
            http_version,
            content_type,
            size_download: bytes.len() as u64,
            total_time: elapsed.as_secs_f64(),
            headers: response_headers,
        };
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(&*self.last.insert(ApiResponse::new(body, info)))
    }

    /// Sends a `GET` request with `params` in the query string.
    pub async fn get(&mut self, endpoint: &str, params: &Params) -> Result<&ApiResponse, ApiError> {
        self.request(RestMethod::Get, endpoint, params, RequestMode::Json)
            .await
    }

    /// Sends a `POST` request with a JSON body.
    pub async fn post(
        &mut self,
        endpoint: &str,
        params: &Params,
    ) -> Result<&ApiResponse, ApiError> {
        self.request(RestMethod::Post, endpoint, params, RequestMode::Json)
            .await
    }

    /// Builds the `Authorization` and, when signing is enabled, `X-API-Signature` headers.
    fn base_headers(&self, params: &Params) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key()))
            .map_err(|_| ConfigError::InvalidApiKey)?;
        headers.insert(AUTHORIZATION, bearer);

        if let Some(signer) = &self.signer {
            let signature = signer.sign_params(params)?;
            let value =
                HeaderValue::from_str(&signature).map_err(|_| SigningError::InvalidHeader)?;
            headers.insert(HeaderName::from_static(SIGNATURE_HEADER), value);
        }

        Ok(headers)
    }

    /// Returns the last response body, JSON-decoded when `decode` is `true`.
    ///
    /// Before any request, or for an empty or malformed body, the decoded
    /// form is `Value::Null` and the raw form is `""`.
    pub fn response(&self, decode: bool) -> ResponseBody<'_> {
        if decode {
            ResponseBody::Decoded(self.response_json())
        } else {
            ResponseBody::Raw(self.response_raw().unwrap_or_default())
        }
    }

    /// Returns the raw body of the last response, or `None` before any request.
    pub fn response_raw(&self) -> Option<&str> {
        self.last.as_ref().map(ApiResponse::body)
    }

    /// Returns the last response decoded as JSON, or `Value::Null`.
    pub fn response_json(&self) -> Value {
        self.last
            .as_ref()
            .map(ApiResponse::json)
            .unwrap_or(Value::Null)
    }

    /// Returns the `data` field of the last response, or an empty object.
    pub fn response_data(&self) -> Value {
        data_of(&self.response_json())
    }

    /// Returns the `messages` field of the last response, or an empty list.
    pub fn response_messages(&self) -> Vec<Value> {
        messages_of(&self.response_json())
    }

    /// Returns the `status` field of the last response as a string, or `""`.
    pub fn response_status(&self) -> String {
        status_of(&self.response_json())
    }

    /// Returns the transport metadata of the last response, or `None` before any request.
    pub fn request_info(&self) -> Option<&RequestInfo> {
        self.last.as_ref().map(ApiResponse::info)
    }

    pub fn last_response(&self) -> Option<&ApiResponse> {
        self.last.as_ref()
    }

    /// Enables debug mode.
    pub fn debug_start(&mut self) -> &mut Self {
        self.debug.start();
        debug!("debug mode started");
        self
    }

    /// Disables debug mode, keeping the collected stats readable.
    pub fn debug_stop(&mut self) -> &mut Self {
        self.debug.stop();
        debug!("debug mode stopped");
        self
    }

    /// Clears the collected stats and re-enables debug mode.
    pub fn debug_reset(&mut self) -> &mut Self {
        self.debug.reset();
        debug!("debug mode reset");
        self
    }

    /// Returns the collected stats, or `None` if debug mode was never started.
    pub fn debug_get(&self) -> Option<DebugReport> {
        self.debug.report()
    }

    pub fn is_debugging(&self) -> bool {
        self.debug.is_enabled()
    }
}
