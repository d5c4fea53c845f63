//! HTTP transport: one request in, one decoded response out.
//!
//! The transport knows nothing about refreshing. It merges headers and
//! sends. `send` hands back the status and raw body; `execute` also turns the
//! body into a JSON payload following the backend's conventions (204/302
//! sentinel, JSON or text body).

use std::fmt;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, redirect};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument, trace, warn};

use shortlink_core::error::{InvalidInputError, ProtocolError, TransportError};
use shortlink_core::{AccessToken, ApiUrl, Error, Result};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("shortlink/", env!("CARGO_PKG_VERSION"));

/// A call against the backend: method, path, optional JSON body and
/// caller-supplied headers.
///
/// The same descriptor is replayed verbatim when a call is retried after a
/// token refresh.
#[derive(Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    headers: HeaderMap,
}

impl ApiRequest {
    /// Create a request for a path relative to the API base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize and attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        let body = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("request body is not valid JSON: {e}"),
        })?;
        Ok(self.with_body(body))
    }

    /// Add a header. Caller headers take precedence over the ones the client
    /// sets, `Authorization` included.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let invalid = |reason: String| InvalidInputError::Header {
            name: name.to_string(),
            reason,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let mut header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        if header_name == AUTHORIZATION {
            header_value.set_sensitive(true);
        }
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

// Bodies may carry passwords or refresh tokens.
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &self.body.as_ref().map(|_| "[REDACTED]"))
            .field("headers", &self.headers)
            .finish()
    }
}

/// A response as received: status, content type and body bytes.
///
/// Nothing is decoded yet, so callers can act on the status before
/// deciding how to read the body.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl RawResponse {
    async fn read(response: reqwest::Response) -> std::result::Result<Self, reqwest::Error> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();
        trace!(status = %status, len = body.len(), "response received");

        Ok(Self {
            status,
            content_type,
            body,
        })
    }

    /// Parse the body as JSON, whatever the content type says.
    pub(crate) fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Apply the backend's body conventions.
    fn decode(self) -> serde_json::Result<ApiResponse> {
        let status = self.status;

        // Some backends answer 204/302 without a usable body.
        if status == StatusCode::NO_CONTENT || status == StatusCode::FOUND {
            return Ok(ApiResponse {
                status,
                payload: json!({ "success": true }),
            });
        }

        let is_json = self
            .content_type
            .as_deref()
            .is_some_and(|value| value.contains("application/json"));

        let payload = if is_json {
            self.json::<Value>()?
        } else {
            let text = String::from_utf8_lossy(&self.body);
            if text.trim().is_empty() {
                json!({})
            } else {
                Value::String(text.into_owned())
            }
        };

        Ok(ApiResponse { status, payload })
    }
}

/// A decoded backend response.
#[derive(Debug)]
pub(crate) struct ApiResponse {
    pub status: StatusCode,
    pub payload: Value,
}

impl ApiResponse {
    /// 401 or 403.
    pub fn is_auth_failure(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED || self.status == StatusCode::FORBIDDEN
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success() || self.status == StatusCode::FOUND
    }

    /// The payload on success, otherwise a protocol error carrying the
    /// backend's message.
    pub fn into_result(self) -> Result<Value> {
        if self.is_success() {
            return Ok(self.payload);
        }
        let message = self.error_message();
        Err(ProtocolError::new(self.status.as_u16(), message).into())
    }

    fn error_message(&self) -> String {
        ["message", "error"]
            .iter()
            .filter_map(|field| self.payload.get(field))
            .filter_map(Value::as_str)
            .find(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "{} {}",
                    self.status.as_u16(),
                    self.status.canonical_reason().unwrap_or_default()
                )
                .trim_end()
                .to_string()
            })
    }
}

/// HTTP client bound to one backend base URL.
/// Clone is cheap: `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: ApiUrl,
}

impl HttpTransport {
    /// Create a transport for the given backend.
    pub fn new(base: ApiUrl) -> Result<Self> {
        Self::build(base, None)
    }

    /// Create a transport whose requests fail after `timeout`.
    pub fn with_timeout(base: ApiUrl, timeout: Duration) -> Result<Self> {
        Self::build(base, Some(timeout))
    }

    fn build(base: ApiUrl, timeout: Option<Duration>) -> Result<Self> {
        if base.is_insecure() {
            warn!(base = %base, "backend is not served over HTTPS; credentials travel in clear text");
        }

        // Redirects stay visible so a 302 maps to the success sentinel.
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| TransportError::Http {
            message: e.to_string(),
        })?;

        Ok(Self { client, base })
    }

    /// Returns the backend base URL.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Send one request, attaching `token` as the `Authorization` header,
    /// and decode the body.
    pub(crate) async fn execute(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<ApiResponse> {
        let response = self
            .send(request, token)
            .await?
            .decode()
            .map_err(|e| TransportError::Decode {
                message: e.to_string(),
            })?;

        debug!(status = %response.status, "request completed");
        Ok(response)
    }

    /// Send one request and return the undecoded response.
    #[instrument(skip(self, request, token), fields(method = %request.method, path = %request.path))]
    pub(crate) async fn send(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<RawResponse> {
        let url = self.base.endpoint(&request.path);
        debug!(authorized = token.is_some(), "sending request");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(Self::merge_headers(request, token)?);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        RawResponse::read(response)
            .await
            .map_err(|e| self.map_error(e))
    }

    fn merge_headers(request: &ApiRequest, token: Option<&AccessToken>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let mut value =
                HeaderValue::from_str(token.as_str()).map_err(|e| InvalidInputError::Header {
                    name: AUTHORIZATION.to_string(),
                    reason: e.to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        // Caller headers replace ours, key by key.
        headers.extend(request.headers.clone());
        Ok(headers)
    }

    fn map_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_connect() {
            TransportError::Unreachable {
                base_url: self.base.to_string(),
            }
        } else if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_decode() || err.is_body() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        err.into()
    }
}
