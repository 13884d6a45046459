//! HTTP transport seam
//!
//! Cases talk to the service through [`Transport`] so the same catalog can run
//! against the live service ([`HttpTransport`]) or an in-process fake.

use std::time::Instant;

use petstore_core::{BodyShape, Config};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

pub use reqwest::Method;

/// One request, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, e.g. `/pet/10`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of the first query pair named `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `"GET /pet/10"`, used as assertion context.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// A fully read response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Label of the request that produced it
    pub label: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(label: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status,
            content_type: None,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Parse and classify the body.
    #[must_use]
    pub fn shape(&self) -> BodyShape {
        BodyShape::classify(&self.body)
    }

    /// Body truncated for error messages.
    #[must_use]
    pub fn body_excerpt(&self) -> &str {
        const MAX: usize = 200;
        if self.body.len() <= MAX {
            return &self.body;
        }
        let mut end = MAX;
        while end > 0 && !self.body.is_char_boundary(end) {
            end -= 1;
        }
        &self.body[..end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("cannot build HTTP client: {0}")]
    Build(String),
    #[error("{label}: request timed out: {message}")]
    Timeout { label: String, message: String },
    #[error("{label}: cannot connect: {message}")]
    Connect { label: String, message: String },
    #[error("{label}: request failed: {message}")]
    Request { label: String, message: String },
    #[error("{label}: cannot read response body: {message}")]
    Body { label: String, message: String },
}

/// Executes one blocking request per call.
pub trait Transport {
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response was received.
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// [`Transport`] over `reqwest::blocking`.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a client with the configured timeout and default headers.
    ///
    /// Headers whose name or value is not valid HTTP are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "skipping invalid header from config"),
            }
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.trimmed_base_url().to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let label = request.label();
        let url = format!("{}{}", self.base_url, request.path);

        let mut req = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let start = Instant::now();
        let resp = req.send().map_err(|e| classify_send_error(&label, &e))?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = resp.text().map_err(|e| TransportError::Body {
            label: label.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            request = %label,
            status,
            content_type = content_type.as_deref().unwrap_or("-"),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "response received"
        );

        Ok(ApiResponse {
            label,
            status,
            content_type,
            body,
        })
    }
}

fn classify_send_error(label: &str, e: &reqwest::Error) -> TransportError {
    let label = label.to_string();
    let message = e.to_string();
    if e.is_timeout() {
        TransportError::Timeout { label, message }
    } else if e.is_connect() {
        TransportError::Connect { label, message }
    } else {
        TransportError::Request { label, message }
    }
}
