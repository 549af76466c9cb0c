//! Forwarding of calculation requests to an upstream calculation service.
//!
//! The proxy relays the JSON body unchanged and hands back whatever the
//! upstream answered: parsed JSON when the upstream says so, plain text
//! otherwise. Failures are reported as `{error, detail}` bodies.

use std::time::Duration;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use reqwest::Client;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

/// Upstream path for severance calculations.
pub const SEVERANCE_PATH: &str = "/calculate/indemnizacion";

/// Time allowed for an upstream round trip.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures of the upstream proxy.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// No upstream base URL was configured.
    #[error("CALC_API_BASE no configurado")]
    NotConfigured,

    /// The upstream answered with a non-2xx status.
    #[error("Upstream error ({status}): {detail}")]
    Upstream {
        /// Status code returned by the upstream.
        status: u16,
        /// The upstream body, as JSON or as a string.
        detail: Value,
    },

    /// The request could not be read or the upstream could not be reached or understood.
    #[error("Proxy error: {message}")]
    Transport {
        /// The underlying failure.
        message: String,
    },
}

impl ProxyError {
    fn transport(err: impl std::fmt::Display) -> Self {
        ProxyError::Transport {
            message: err.to_string(),
        }
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::NotConfigured | ProxyError::Transport { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The `{error, detail}` body this error is reported with.
    pub fn body(&self) -> Value {
        match self {
            ProxyError::NotConfigured => json!({ "error": "CALC_API_BASE no configurado" }),
            ProxyError::Upstream { detail, .. } => {
                json!({ "error": "Upstream error", "detail": detail })
            }
            ProxyError::Transport { message } => {
                json!({ "error": "Proxy error", "detail": message })
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.body()),
        )
            .into_response()
    }
}

/// Client for the upstream calculation service.
#[derive(Debug, Clone)]
pub struct UpstreamProxy {
    client: Client,
    base_url: String,
}

impl UpstreamProxy {
    /// Creates a proxy for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::builder()
                .timeout(UPSTREAM_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url,
        }
    }

    /// Returns the upstream base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full upstream URL for `path`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs `payload` to `path` on the upstream and returns its answer.
    ///
    /// A JSON content type yields the parsed body; anything else is relayed
    /// as a JSON string.
    pub async fn forward(&self, path: &str, payload: &Value) -> Result<Value, ProxyError> {
        let url = self.url_for(path);
        debug!(url = %url, "Forwarding request upstream");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(ProxyError::transport)?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));

        let text = response.text().await.map_err(ProxyError::transport)?;
        let data = if is_json {
            serde_json::from_str(&text).map_err(ProxyError::transport)?
        } else {
            Value::String(text)
        };

        if !status.is_success() {
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                detail: data,
            });
        }

        Ok(data)
    }
}
