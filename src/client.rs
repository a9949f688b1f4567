//! RankVectors API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Endpoint operations are implemented via traits and functions on the
//! model types, all of which funnel through [`RankVectorsClient::execute`].

use std::env;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{RankVectorsError, Result};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://rankvectors.com";

const USER_AGENT: &str = concat!("rankvectors/", env!("CARGO_PKG_VERSION"));

/// A single API call: path, method, optional JSON body and extra headers.
///
/// Built with [`ApiRequest::get`], [`ApiRequest::post`], [`ApiRequest::patch`]
/// or [`ApiRequest::new`] and handed to [`RankVectorsClient::execute`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    headers: HeaderMap,
}

impl ApiRequest {
    /// Create a request for `path` (which must start with `/`).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// A PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Add an extra header.
    ///
    /// `Authorization` and `Content-Type` are always set by the client and
    /// take precedence over headers added here.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request path, including any query string.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Immutable per-client configuration.
struct ClientConfig {
    base_url: String,
    authorization: HeaderValue,
}

/// Low-level RankVectors API client.
///
/// Holds the API key and base URL for its whole lifetime and attaches
/// bearer authentication to every request. Entity-specific operations
/// are implemented via the `Get`, `List`, and `Update` traits and the
/// convenience functions on the model types.
///
/// This struct is cheaply cloneable; clones share the configuration and
/// the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use rankvectors::RankVectorsClient;
///
/// # fn example() -> rankvectors::Result<()> {
/// // Create from environment variables
/// let client = RankVectorsClient::from_env()?;
///
/// // Or configure manually
/// let client = RankVectorsClient::new("your-api-key", Some("https://rankvectors.com"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RankVectorsClient {
    http: Client,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for RankVectorsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankVectorsClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl RankVectorsClient {
    /// Create a client from environment variables.
    ///
    /// Uses `RANKVECTORS_API_KEY` for authentication and optionally
    /// `RANKVECTORS_API_URL` for the base URL (defaults to
    /// `https://rankvectors.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if `RANKVECTORS_API_KEY` is not set or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("RANKVECTORS_API_KEY").map_err(|_| {
            RankVectorsError::InvalidConfiguration(
                "RANKVECTORS_API_KEY environment variable not set".to_string(),
            )
        })?;
        let base_url = env::var("RANKVECTORS_API_URL").ok();

        Self::new(&api_key, base_url.as_deref())
    }

    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - RankVectors API key (must be non-empty)
    /// * `base_url` - Base URL of the API; defaults to `https://rankvectors.com`.
    ///   One trailing slash is removed.
    ///
    /// # Errors
    ///
    /// Returns [`RankVectorsError::InvalidConfiguration`] if the API key is
    /// empty or whitespace-only, or the base URL is not an absolute URL. No
    /// request is made.
    pub fn new(api_key: &str, base_url: Option<&str>) -> Result<Self> {
        // Whitespace-only keys count as empty. Other keys are used as given.
        if api_key.trim().is_empty() {
            return Err(RankVectorsError::InvalidConfiguration(
                "API key is required".to_string(),
            ));
        }

        let base_url = base_url.unwrap_or(DEFAULT_BASE_URL);
        let base_url = base_url.strip_suffix('/').unwrap_or(base_url).to_string();
        Url::parse(&base_url).map_err(|e| {
            RankVectorsError::InvalidConfiguration(format!("invalid base URL '{base_url}': {e}"))
        })?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(
            |_| {
                RankVectorsError::InvalidConfiguration(
                    "API key contains characters not allowed in a header".to_string(),
                )
            },
        )?;
        authorization.set_sensitive(true);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(ClientConfig {
                base_url,
                authorization,
            }),
        })
    }

    /// Get the base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Full URL a request path resolves to.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Perform an authenticated JSON request.
    ///
    /// The URL is the base URL followed by the request path, unchanged.
    /// On a 2xx status the body is parsed as JSON into `T` (an empty body
    /// parses as `null`). Any other status becomes
    /// [`RankVectorsError::RequestFailed`].
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a body
    /// that does not match `T`.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let ApiRequest {
            method,
            path,
            body,
            mut headers,
        } = request;

        let url = self.url_for(&path);
        headers.insert(AUTHORIZATION, self.config.authorization.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        tracing::debug!(url = %url, "sending request");
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(Self::request_failed(response).await);
        }

        let text = response.text().await?;
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        Ok(serde_json::from_str(text)?)
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(ApiRequest::get(path)).await
    }

    /// Make a POST request with JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(ApiRequest::post(path).json(body)?).await
    }

    /// Make a PATCH request with JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(ApiRequest::patch(path).json(body)?).await
    }

    /// Convert a non-2xx response into an error.
    async fn request_failed(response: Response) -> RankVectorsError {
        let status = response.status();
        let message = Self::extract_error_message(response, status).await;
        tracing::warn!(status = status.as_u16(), %message, "request failed");

        RankVectorsError::RequestFailed {
            message,
            status_code: Some(status.as_u16()),
        }
    }

    /// Extract error message from a failed response.
    ///
    /// Uses the body's `error` string when present. Otherwise the message is
    /// `HTTP <code> <reason>` with the standard reason text for the code; a
    /// custom reason phrase on the status line is not used.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let fallback = format!(
            "HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status")
        );

        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return fallback,
        };

        serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|json| json.get("error")?.as_str().map(str::to_string))
            .unwrap_or(fallback)
    }
}
