// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Generic descriptor-driven API client core
//!
//! This crate turns a static table of endpoint descriptors into authenticated HTTP
//! calls, designed for thin bindings over third-party REST APIs.
//!
//! # Core Abstractions
//!
//! - **[`EndpointDescriptor`]**: method, path template and parameter schema for one operation
//! - **[`Arguments`]**: caller-supplied values, validated against the schema before any I/O
//! - **[`RequestContext`]**: the resolved per-call request
//! - **[`Authenticator`]**: pluggable request authentication, [`HmacSigner`] by default
//! - **[`Transport`]**: pluggable HTTP execution, [`ReqwestTransport`] by default
//! - **[`Client`]**: runs validate → authenticate → send → decode → export for every call
//!
//! # Example
//!
//! ```rust,no_run
//! use api_client::{Arguments, Client, EndpointDescriptor, HttpMethod, ParamKind, ParamSpec};
//!
//! const GET_COLLECTION: EndpointDescriptor = EndpointDescriptor::new(
//!     "getCollection",
//!     HttpMethod::Get,
//!     "collections/{contract}",
//!     &[ParamSpec::required("contract", ParamKind::Address)],
//! );
//!
//! # async fn run() -> Result<(), api_client::ApiError> {
//! let client = Client::new("api-key", "api-secret", "https://api.example.com/v1")?;
//! let args = Arguments::new().with("contract", "0x1234567890123456789012345678901234567890");
//! let response = client.call(&GET_COLLECTION, &args, None).await?;
//! println!("{}", response.value());
//! # Ok(())
//! # }
//! ```

use std::{io, path::PathBuf};

use thiserror::Error;

pub mod arguments;
pub mod auth;
pub mod client;
pub mod credentials;
pub mod descriptor;
pub mod export;
pub mod non_empty_string;
pub mod request;
pub mod transport;

pub use arguments::Arguments;
pub use auth::{Authenticator, HmacSigner};
pub use client::{ApiResponse, Client, parse_base_url};
pub use credentials::Credentials;
pub use descriptor::{
    DefaultValue, EndpointDescriptor, HttpMethod, ParamKind, ParamSpec, Requirement,
};
pub use non_empty_string::{EmptyStringError, NonEmptyString};
pub use request::{RequestContext, ValidationError};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};

/// Errors surfaced by a call
///
/// Every failure kind is a distinct variant so callers can branch on it; nothing is
/// retried or replaced with a fallback value.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// Arguments did not match the endpoint schema; no request was sent
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// No HTTP response was received
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status; `body` is decoded lossily for display
    #[error("API returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body is not valid UTF-8 JSON; `body` holds the bytes as received
    #[error("failed to decode response body: {source}")]
    Decode {
        source: serde_json::Error,
        body: Vec<u8>,
    },

    /// Authentication material could not be produced
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The client was constructed with invalid settings
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The call succeeded but writing the export file failed
    #[error("failed to export response to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        source: io::Error,
        response: Box<ApiResponse>,
    },
}

impl ApiError {
    /// HTTP status code for [`ApiError::HttpStatus`] errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the call was rejected before any network I/O
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Configuration { .. })
    }
}
