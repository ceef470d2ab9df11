//! REST transport.
//!
//! A [`Transport`] sends one [`ApiRequest`] and hands back the decoded JSON
//! body. [`HttpTransport`] does it over HTTP with reqwest; the in-memory
//! transport in [`crate::testing`] records requests instead.

use std::future::Future;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::TransportError;

/// HTTP verbs the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

/// One REST call: verb, path below the origin and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Encode` if `body` cannot be serialized.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, TransportError> {
        self.body = Some(serde_json::to_value(body).map_err(|e| TransportError::Encode(e.to_string()))?);
        Ok(self)
    }
}

/// Sends API requests.
pub trait Transport: Send + Sync {
    /// Send `request` and return the response body (`Null` when empty).
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// Send `request` and decode the response into `T`.
///
/// # Errors
///
/// Returns the transport's error, or `TransportError::Decode` if the body
/// does not match `T`.
pub async fn fetch<T, R>(transport: &T, request: ApiRequest) -> Result<R, TransportError>
where
    T: Transport + ?Sized,
    R: DeserializeOwned,
{
    let body = transport.send(request).await?;
    serde_json::from_value(body).map_err(|e| TransportError::Decode(e.to_string()))
}

/// reqwest-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    user_header: String,
    user_id: Option<SecretString>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("user_header", &self.user_header)
            .field("user_id", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport for the configured dashboard.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.clone(),
            user_header: config.user_header.clone(),
            user_id: config.user_id.clone(),
        }
    }

    /// Dashboard origin this transport talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = request.method.as_str(), path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), format!("{}{}", self.base_url, request.path));
        if let Some(user_id) = &self.user_id {
            builder = builder.header(self.user_header.as_str(), user_id.expose_secret());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "API call failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "API call succeeded");
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use storeboard_core::forms::BillboardInput;

    use super::*;

    #[test]
    fn test_json_body_uses_camel_case() {
        let input = BillboardInput {
            label: "Summer".to_string(),
            image_url: "https://x/img.png".to_string(),
        };
        let request = ApiRequest::post("/api/s/billboards").json(&input).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body,
            Some(json!({"label": "Summer", "imageUrl": "https://x/img.png"}))
        );
    }

    #[test]
    fn test_method_maps_to_reqwest() {
        assert_eq!(reqwest::Method::from(Method::Patch), reqwest::Method::PATCH);
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_debug_redacts_user() {
        let config = ClientConfig::new(
            "http://localhost:3001",
            Some(SecretString::from("user_abc")),
        )
        .unwrap();
        let debug = format!("{:?}", HttpTransport::new(&config));
        assert!(!debug.contains("user_abc"));
        assert!(debug.contains("localhost:3001"));
    }
}
