//! API call wrapper
//!
//! [`ApiClient::call`] runs one request/response cycle against the backend
//! and normalizes the outcome. The classification order is fixed:
//! transport failure, 401, 429, then status class with the parsed body.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::error::{ApiError, ApiResult, DEFAULT_RETRY_AFTER_SECS};
use crate::headers::auth_headers;
use crate::invalidation::SessionInvalidator;
use crate::session::SessionStore;

/// Per-call request configuration
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method (default: `GET`)
    pub method: Method,

    /// JSON body, serialized verbatim
    pub body: Option<Value>,

    /// Extra headers; these win over the provider's headers
    pub headers: HeaderMap,

    /// Query string pairs
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
            query: Vec::new(),
        }
    }
}

impl RequestOptions {
    /// A `GET` request with no body
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    /// A request with the given method
    #[must_use]
    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// A `POST` request carrying `body`
    #[must_use]
    pub fn post(body: Value) -> Self {
        Self::with_method(Method::POST).with_body(body)
    }

    /// A `PUT` request carrying `body`
    #[must_use]
    pub fn put(body: Value) -> Self {
        Self::with_method(Method::PUT).with_body(body)
    }

    /// A `DELETE` request
    #[must_use]
    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    /// Set the JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a header, overriding any provider header of the same name
    ///
    /// Names or values that are not valid HTTP are ignored.
    #[must_use]
    pub fn with_header(
        mut self,
        name: impl TryInto<HeaderName>,
        value: impl TryInto<HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Append a query string pair
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

/// Client for the Shortlink backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoints: Endpoints,
    store: Arc<dyn SessionStore>,
    invalidator: SessionInvalidator,
}

impl ApiClient {
    /// Create a client from configuration and a session store
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        config
            .validate()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self::with_http_client(http, config, store))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_http_client(
        http: Client,
        config: &ClientConfig,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let invalidator = SessionInvalidator::new(Arc::clone(&store), config.login_path.clone());
        Self {
            http,
            endpoints: Endpoints::new(config.base_url.clone()),
            store,
            invalidator,
        }
    }

    /// Endpoint registry for this backend
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Session store shared by every call
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Invalidator triggered on 401 responses; subscribe here for events
    #[must_use]
    pub const fn invalidator(&self) -> &SessionInvalidator {
        &self.invalidator
    }

    /// Call `url` and decode a JSON payload
    ///
    /// A success response with an empty body decodes from JSON `null`, so
    /// `()`, `Option<_>` and [`Value`] accept bodiless responses. A non-empty
    /// body that does not decode into `T` is [`ApiError::MalformedBody`].
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for any non-success outcome.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn call<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let (status, bytes) = self.execute(url, options).await?;
        let body = parse_body(&bytes);

        if !status.is_success() {
            return Err(ApiError::request_failed(
                status.as_u16(),
                body.as_ref().and_then(error_message),
            ));
        }

        decode_payload(status, &bytes, body)
    }

    /// Call `url` where no payload is expected (deletes, membership changes)
    ///
    /// Only the status is classified; a success body of any shape, JSON or
    /// not, is discarded.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for any non-success outcome.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn call_ack(&self, url: &str, options: RequestOptions) -> ApiResult<()> {
        self.call_bytes(url, options).await.map(|_| ())
    }

    /// Call `url` and return the raw response body (e.g. QR-code images)
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for any non-success outcome.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn call_bytes(&self, url: &str, options: RequestOptions) -> ApiResult<Vec<u8>> {
        let (status, bytes) = self.execute(url, options).await?;

        if !status.is_success() {
            return Err(ApiError::request_failed(
                status.as_u16(),
                parse_body(&bytes).as_ref().and_then(error_message),
            ));
        }

        Ok(bytes)
    }

    /// Dispatch the request and handle transport, 401 and 429 outcomes
    async fn execute(&self, url: &str, options: RequestOptions) -> ApiResult<(StatusCode, Vec<u8>)> {
        let RequestOptions {
            method,
            body,
            headers: extra,
            query,
        } = options;

        let mut headers = auth_headers(self.store.as_ref()).await;
        for (name, value) in &extra {
            headers.insert(name.clone(), value.clone());
        }

        let mut request = self.http.request(method, url).headers(headers);
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        debug!(url = %url, "Sending API request");

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "API request failed before a response arrived");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!(status = %status, "Received API response");

        if status == StatusCode::UNAUTHORIZED {
            self.invalidator.invalidate().await;
            return Err(ApiError::Unauthorized);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = retry_after_secs(response.headers());
            warn!(retry_after_secs, "Rate limited by backend");
            return Err(ApiError::RateLimited { retry_after_secs });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok((status, bytes.to_vec()))
    }
}

/// Seconds from a `Retry-After` header, or the fallback when absent or unusable
fn retry_after_secs(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Parse a body as JSON; anything unparseable is treated as no body
fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(bytes).ok()
}

/// Server-supplied error text from an `error` or `message` field
fn error_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(ToString::to_string)
}

fn decode_payload<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
    body: Option<Value>,
) -> ApiResult<T> {
    let malformed = |reason: String| ApiError::MalformedBody {
        status: status.as_u16(),
        reason,
    };

    match body {
        Some(value) => serde_json::from_value(value).map_err(|e| malformed(e.to_string())),
        None if bytes.iter().all(u8::is_ascii_whitespace) => {
            serde_json::from_value(Value::Null).map_err(|_| malformed("empty body".to_string()))
        },
        None => Err(malformed("body is not valid JSON".to_string())),
    }
}
