// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Generic descriptor-driven API client

use std::{fmt, path::Path};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::{
    ApiError, Arguments, Authenticator, Credentials, EndpointDescriptor, HmacSigner,
    ReqwestTransport, RequestContext, Transport, export::export_body,
};

/// Decoded response returned to the caller
///
/// Holds the HTTP status, the body bytes exactly as received and their JSON
/// decoding. Nothing from the client credentials is ever stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    body: Vec<u8>,
    value: Value,
}

impl ApiResponse {
    /// HTTP status code of the response
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw body bytes as received from the server
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Raw body as text, if it is valid UTF-8
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Decoded JSON payload
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Take ownership of the decoded JSON payload
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Deserialize the payload into a caller-defined type
    ///
    /// # Errors
    ///
    /// Returns a `serde_json` error if the payload does not match `T`
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.value)
    }
}

/// Executes calls described by [`EndpointDescriptor`]s against one base URL
///
/// The client owns its [`Credentials`] and is otherwise immutable; every call is an
/// independent request/response cycle, so a single client can be shared freely
/// between tasks.
pub struct Client<A = HmacSigner, T = ReqwestTransport> {
    base_url: Url,
    credentials: Credentials,
    authenticator: A,
    transport: T,
}

impl Client {
    /// Client using HMAC request signing and the default `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the key or secret is blank or the base
    /// URL is invalid
    pub fn new(api_key: &str, api_secret: &str, base_url: &str) -> Result<Self, ApiError> {
        let credentials = Credentials::new(api_key, api_secret)?;
        let base_url = parse_base_url(base_url)?;
        Ok(Self::with_parts(
            base_url,
            credentials,
            HmacSigner::new(),
            ReqwestTransport::new(),
        ))
    }
}

impl<A, T> Client<A, T> {
    /// Assemble a client from explicit parts
    pub fn with_parts(
        base_url: Url,
        credentials: Credentials,
        authenticator: A,
        transport: T,
    ) -> Self {
        Self {
            base_url,
            credentials,
            authenticator,
            transport,
        }
    }

    /// Base URL every endpoint path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Authentication strategy in use
    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    /// Transport in use
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<A: Authenticator, T: Transport> Client<A, T> {
    /// Validate, build and authenticate a request without sending it
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for argument problems, or any error raised by
    /// the authenticator
    pub async fn prepare(
        &self,
        descriptor: &EndpointDescriptor,
        arguments: &Arguments,
    ) -> Result<RequestContext, ApiError> {
        let mut request = RequestContext::build(&self.base_url, descriptor, arguments)?;
        self.authenticator
            .authenticate(&self.credentials, &mut request)
            .await?;
        Ok(request)
    }

    /// Perform one call to `descriptor`
    ///
    /// On success the body is decoded as JSON and returned. When `export_file_name`
    /// is given, the raw body is also written to that path, but only after the
    /// response was received with a 2xx status and decoded successfully.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Validation`] before any I/O when the arguments do not match
    ///   the descriptor
    /// * [`ApiError::Transport`] when no HTTP response was received
    /// * [`ApiError::HttpStatus`] for non-2xx responses, with the body
    /// * [`ApiError::Decode`] when the body is not JSON
    /// * [`ApiError::Export`] when writing the export file fails; the decoded
    ///   response is carried inside the error
    pub async fn call(
        &self,
        descriptor: &EndpointDescriptor,
        arguments: &Arguments,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.prepare(descriptor, arguments).await?;

        debug!(
            endpoint = descriptor.name,
            method = %descriptor.method,
            path = request.url().path(),
            "sending request"
        );

        let raw = self.transport.send(&request).await.map_err(|e| {
            warn!(endpoint = descriptor.name, error = %e, "request failed");
            ApiError::Transport(e)
        })?;

        if !raw.is_success() {
            warn!(
                endpoint = descriptor.name,
                status = raw.status,
                "API returned error status"
            );
            return Err(ApiError::HttpStatus {
                status: raw.status,
                body: String::from_utf8_lossy(&raw.body).into_owned(),
            });
        }

        let value = match serde_json::from_slice::<Value>(&raw.body) {
            Ok(value) => value,
            Err(source) => {
                warn!(endpoint = descriptor.name, error = %source, "response body is not JSON");
                return Err(ApiError::Decode {
                    source,
                    body: raw.body,
                });
            }
        };

        let response = ApiResponse {
            status: raw.status,
            body: raw.body,
            value,
        };

        if let Some(path) = export_file_name {
            if let Err(source) = export_body(path, &response.body).await {
                warn!(path = %path.display(), error = %source, "failed to export response");
                return Err(ApiError::Export {
                    path: path.to_path_buf(),
                    source,
                    response: Box::new(response),
                });
            }
        }

        Ok(response)
    }
}

impl<A: fmt::Debug, T: fmt::Debug> fmt::Debug for Client<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("authenticator", &self.authenticator)
            .field("transport", &self.transport)
            .finish()
    }
}

/// Parse a base URL, rejecting URLs that cannot carry a path
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] describing the problem
pub fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base_url).map_err(|e| ApiError::Configuration {
        message: format!("invalid base URL `{base_url}`: {e}"),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::Configuration {
            message: format!("base URL `{base_url}` cannot carry a path"),
        });
    }
    Ok(url)
}
