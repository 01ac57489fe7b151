// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFTScan response envelope
//!
//! NFTScan answers with HTTP 200 even for many failures and reports the real
//! outcome in the body:
//!
//! ```json
//! { "code": 200, "msg": null, "data": { "total": 1, "content": [] } }
//! ```
//!
//! The client returns that body unchanged; [`ResponseEnvelope`] is an opt-in helper
//! for callers that want the embedded status checked.

use api_client::ApiResponse;
use serde::Deserialize;
use serde_json::Value;

use crate::NftScanError;

/// Envelope `code` signalling success
pub const SUCCESS_CODE: i64 = 200;

/// The `{ code, msg, data }` wrapper around every NFTScan payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseEnvelope {
    /// Status code embedded in the body
    pub code: i64,
    /// Human readable message, usually present on failure
    #[serde(default)]
    pub msg: Option<String>,
    /// Payload
    #[serde(default)]
    pub data: Value,
}

impl ResponseEnvelope {
    /// Parse the envelope from a decoded JSON value
    ///
    /// # Errors
    ///
    /// Returns [`NftScanError::MalformedEnvelope`] if `code` is missing or not an integer
    pub fn from_value(value: &Value) -> Result<Self, NftScanError> {
        Self::deserialize(value).map_err(|e| NftScanError::MalformedEnvelope {
            message: e.to_string(),
        })
    }

    /// Parse the envelope from a client response
    ///
    /// # Errors
    ///
    /// Returns [`NftScanError::MalformedEnvelope`] if the body is not an envelope
    pub fn from_response(response: &ApiResponse) -> Result<Self, NftScanError> {
        Self::from_value(response.value())
    }

    /// Whether the embedded code reports success
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Return the payload, or the embedded error when `code` is not 200
    ///
    /// # Errors
    ///
    /// Returns [`NftScanError::Api`] carrying the embedded code and message
    pub fn into_data(self) -> Result<Value, NftScanError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(NftScanError::Api {
                code: self.code,
                message: self.msg.unwrap_or_default(),
            })
        }
    }
}
