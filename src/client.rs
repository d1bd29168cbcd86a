//! Shared HTTP client for the db_query backend.
//!
//! One `ApiClient` is built per process and cloned wherever it is needed.
//! Every request goes through the same pipeline: send, reject non-success
//! statuses, decode JSON. Outcomes pass through a [`ResponseInterceptor`]
//! on the way back to the caller.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::config::{ApiConfig, Config, DEFAULT_BASE_URL};
use crate::error::{ApiError, Result};

/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Hook applied to every response before it reaches the caller.
///
/// Both methods default to returning their input unchanged.
pub trait ResponseInterceptor: Send + Sync {
    /// Called with each successful response before its body is decoded.
    fn on_response(&self, response: Response) -> Response {
        response
    }

    /// Called with each failure before it is returned.
    fn on_error(&self, error: ApiError) -> ApiError {
        error
    }
}

/// Interceptor that leaves responses and errors untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl ResponseInterceptor for PassThrough {}

/// Client for the db_query backend API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    interceptor: Arc<dyn ResponseInterceptor>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let api = ApiConfig {
            base_url: base_url.into(),
        };
        api.parsed_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            http,
            interceptor: Arc::new(PassThrough),
        })
    }

    /// Creates a client for the default local backend.
    pub fn with_default_url() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api.base_url.clone())
    }

    /// Replaces the response interceptor.
    pub fn with_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.interceptor = Arc::new(interceptor);
        self
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying HTTP client for reuse.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Joins an endpoint path onto the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.http.get(self.url(path))).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.dispatch(request)
            .await
            .map_err(|e| self.interceptor.on_error(e))
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ApiError::Status { status, body });
        }

        let response = self.interceptor.on_response(response);
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
