// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport abstraction
//!
//! The [`Transport`] trait is the only place network I/O happens. [`ReqwestTransport`]
//! is the production implementation; tests can substitute an in-process transport
//! to observe exactly which requests were issued.

use std::time::Duration;

use reqwest::{Client, header::CONTENT_TYPE};
use thiserror::Error;
use tokio::time::timeout;
use tracing::debug;

use crate::RequestContext;

/// Status code and raw body bytes of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Body exactly as received, with no charset decoding applied
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP layer: DNS, connection, TLS, timeouts, body reads
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum TransportError {
    /// The HTTP client reported an error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// No response arrived within the configured timeout
    #[error("request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Failure reported by a non-reqwest transport
    #[error("transport failure: {message}")]
    Other { message: String },
}

impl TransportError {
    /// Whether the failure was a timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(error) => error.is_timeout(),
            Self::Timeout { .. } => true,
            Self::Other { .. } => false,
        }
    }
}

/// Issues a single HTTP request and returns the raw response
pub trait Transport: Send + Sync {
    /// Send `request` once; no retries
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no HTTP response was received
    fn send(
        &self,
        request: &RequestContext,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// [`Transport`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Option<Duration>,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::from_client(Client::new())
    }
}

impl ReqwestTransport {
    /// Transport with the HTTP client's default behaviour and no overall timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport with a bound on the total time of each request
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn with_timeout(request_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("nftscan-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            timeout: Some(request_timeout),
        })
    }

    /// Wrap an existing `reqwest` client
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    async fn execute(&self, request: &RequestContext) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method().into(), request.url().clone())
            .header("accept", "application/json");

        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_owned());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(
            endpoint = request.endpoint(),
            status,
            bytes = body.len(),
            "received response"
        );

        Ok(RawResponse { status, body })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestContext) -> Result<RawResponse, TransportError> {
        match self.timeout {
            Some(limit) => timeout(limit, self.execute(request))
                .await
                .map_err(|_| TransportError::Timeout {
                    seconds: limit.as_secs(),
                })?,
            None => self.execute(request).await,
        }
    }
}
