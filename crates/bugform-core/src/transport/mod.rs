//! Submission transport.
//!
//! A transport performs exactly one delivery attempt per call. It reports
//! either a reply (any HTTP status) or a transport failure; deciding what a
//! reply means is left to the workflow.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::config::FormConfig;
use crate::error::{Error, Result};
use crate::payload::ReportPayload;
use crate::util::compact_text;

/// The request could not be completed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Raised by [`HttpTransport`] when the request fails or cannot be built.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// For host-supplied transports that cannot attempt delivery at all,
    /// e.g. no network or a queue that is shut down. `HttpTransport` never
    /// returns it.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// What the endpoint answered.
///
/// `success` and `message` come from a best-effort JSON read of the body; a
/// missing or malformed body leaves both unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointReply {
    pub status: u16,
    pub success: Option<bool>,
    pub message: Option<String>,
}

impl EndpointReply {
    /// Build a reply from a status code and raw body bytes.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let payload = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);
        Self {
            status,
            success: payload.get("success").and_then(Value::as_bool),
            message: payload
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Whether the HTTP status is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Anything that is not a failed status or an explicit `success: false`
    /// counts as accepted, including a 2xx with no body.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.is_ok() && self.success != Some(false)
    }
}

/// Delivers a payload to the form endpoint.
pub trait ReportTransport {
    fn send(
        &self,
        payload: &ReportPayload,
    ) -> impl Future<Output = std::result::Result<EndpointReply, TransportError>> + Send;
}

/// Multipart POST transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport for the configured endpoint.
    pub fn from_config(config: &FormConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|error| {
            Error::InvalidConfig(format!("Failed to construct HTTP client: {error}"))
        })?;
        Self::with_client(&config.endpoint, client)
    }

    /// Builds a transport around an existing client.
    pub fn with_client(endpoint: &str, client: reqwest::Client) -> Result<Self> {
        let endpoint = endpoint.trim().to_string();
        if !crate::util::is_http_url(&endpoint) {
            return Err(Error::InvalidConfig(
                "endpoint must include http:// or https://".to_string(),
            ));
        }
        Ok(Self { endpoint, client })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(
        &self,
        payload: &ReportPayload,
    ) -> std::result::Result<reqwest::Request, TransportError> {
        let form = payload.to_multipart()?;
        Ok(self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .build()?)
    }
}

impl ReportTransport for HttpTransport {
    async fn send(
        &self,
        payload: &ReportPayload,
    ) -> std::result::Result<EndpointReply, TransportError> {
        let request = self.build_request(payload)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            files = payload.files().len(),
            "Posting bug report"
        );
        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();

        // An unreadable body degrades to an empty reply rather than a failure.
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(error) => {
                tracing::warn!("Failed to read bug report response body: {error}");
                Vec::new()
            }
        };

        if !(200..300).contains(&status) {
            tracing::debug!(
                status,
                body = %compact_text(&String::from_utf8_lossy(&body)),
                "Bug report endpoint returned non-success status"
            );
        }

        Ok(EndpointReply::from_body(status, &body))
    }
}
