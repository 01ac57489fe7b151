// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Pluggable request authentication
//!
//! An [`Authenticator`] receives the client's [`Credentials`] and decorates each
//! validated [`RequestContext`] before it is sent. The default strategy,
//! [`HmacSigner`], attaches the API key plus an HMAC-SHA256 signature derived from
//! the secret; bindings can supply their own strategy for services with a
//! different scheme.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{ApiError, Credentials, RequestContext};

type HmacSha256 = Hmac<Sha256>;

/// Default header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-KEY";
/// Default header carrying the signing timestamp in Unix milliseconds
pub const TIMESTAMP_HEADER: &str = "X-TIMESTAMP";
/// Default header carrying the hex-encoded signature
pub const SIGNATURE_HEADER: &str = "X-SIGNATURE";

/// Strategy that adds authentication material to an outbound request
///
/// Implementations must not copy credentials anywhere other than the request
/// itself, and must not log them.
pub trait Authenticator: Send + Sync {
    /// Add authentication headers or parameters to `request`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Authentication`] when authentication material cannot be produced
    fn authenticate(
        &self,
        credentials: &Credentials,
        request: &mut RequestContext,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Signs requests with HMAC-SHA256 over the request line and body
///
/// The signed message is `timestamp ‖ METHOD ‖ path-and-query ‖ body`, where the
/// timestamp is in Unix milliseconds and an absent body contributes nothing. The
/// signature is sent lowercase hex encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HmacSigner {
    key_header: &'static str,
    timestamp_header: &'static str,
    signature_header: &'static str,
}

impl Default for HmacSigner {
    fn default() -> Self {
        Self {
            key_header: API_KEY_HEADER,
            timestamp_header: TIMESTAMP_HEADER,
            signature_header: SIGNATURE_HEADER,
        }
    }
}

impl HmacSigner {
    /// Signer using the default header names
    pub fn new() -> Self {
        Self::default()
    }

    /// Signer using custom header names
    pub const fn with_headers(
        key_header: &'static str,
        timestamp_header: &'static str,
        signature_header: &'static str,
    ) -> Self {
        Self {
            key_header,
            timestamp_header,
            signature_header,
        }
    }

    /// Compute the hex signature for `request` at `timestamp_millis`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Authentication`] if the secret cannot key the MAC
    pub fn sign(
        &self,
        secret: &str,
        timestamp_millis: i64,
        request: &RequestContext,
    ) -> Result<String, ApiError> {
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| ApiError::Authentication {
                message: format!("cannot initialise request signer: {e}"),
            })?;

        mac.update(timestamp_millis.to_string().as_bytes());
        mac.update(request.method().as_str().as_bytes());
        mac.update(request.path_and_query().as_bytes());
        if let Some(body) = request.body() {
            mac.update(body.as_bytes());
        }

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn apply(
        &self,
        credentials: &Credentials,
        request: &mut RequestContext,
        timestamp_millis: i64,
    ) -> Result<(), ApiError> {
        let signature = self.sign(credentials.api_secret(), timestamp_millis, request)?;
        request.insert_header(self.key_header, credentials.api_key());
        request.insert_header(self.timestamp_header, timestamp_millis.to_string());
        request.insert_header(self.signature_header, signature);
        Ok(())
    }
}

impl Authenticator for HmacSigner {
    fn authenticate(
        &self,
        credentials: &Credentials,
        request: &mut RequestContext,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        let result = self.apply(credentials, request, Utc::now().timestamp_millis());
        std::future::ready(result)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::HttpMethod;

    fn request() -> RequestContext {
        let url = Url::parse("https://api.example.com/api/v1/getSingleNft?x=1").unwrap();
        RequestContext::new("getSingleNft", HttpMethod::Get, url)
    }

    #[test]
    fn signature_matches_reference_mac() {
        let signer = HmacSigner::new();
        let signature = signer.sign("secret", 1_700_000_000_000, &request()).unwrap();

        let mut mac = HmacSha256::new_from_slice(b"secret").unwrap();
        mac.update(b"1700000000000GET/api/v1/getSingleNft?x=1");
        let expected = hex::encode(mac.finalize().into_bytes());

        assert_eq!(signature, expected);
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn signature_depends_on_secret_and_time() {
        let signer = HmacSigner::new();
        let base = signer.sign("secret", 1, &request()).unwrap();

        assert_ne!(base, signer.sign("other-secret", 1, &request()).unwrap());
        assert_ne!(base, signer.sign("secret", 2, &request()).unwrap());
        assert_eq!(base, signer.sign("secret", 1, &request()).unwrap());
    }

    #[tokio::test]
    async fn authenticate_sets_key_timestamp_and_signature() {
        let credentials = Credentials::new("my-key", "my-secret").unwrap();
        let mut request = request();

        HmacSigner::new()
            .authenticate(&credentials, &mut request)
            .await
            .unwrap();

        assert_eq!(request.header(API_KEY_HEADER), Some("my-key"));
        let timestamp: i64 = request.header(TIMESTAMP_HEADER).unwrap().parse().unwrap();
        let expected = HmacSigner::new().sign("my-secret", timestamp, &request).unwrap();
        assert_eq!(request.header(SIGNATURE_HEADER), Some(expected.as_str()));
        assert!(
            request
                .headers()
                .iter()
                .all(|(_, value)| !value.contains("my-secret"))
        );
    }

    #[tokio::test]
    async fn custom_header_names() {
        let credentials = Credentials::new("k", "s").unwrap();
        let mut request = request();

        HmacSigner::with_headers("Api-Key", "Api-Time", "Api-Sign")
            .authenticate(&credentials, &mut request)
            .await
            .unwrap();

        assert_eq!(request.header("api-key"), Some("k"));
        assert!(request.header("api-time").is_some());
        assert!(request.header("api-sign").is_some());
        assert!(request.header(API_KEY_HEADER).is_none());
    }
}
