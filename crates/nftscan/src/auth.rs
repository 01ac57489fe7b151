// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFTScan gateway authentication
//!
//! The gateway trades the API key and secret for a short-lived access token:
//!
//! ```text
//! GET https://restapi.nftscan.com/gw/token?apiKey=...&apiSecret=...
//! { "code": 200, "data": { "accessToken": "...", "expiration": 3600 } }
//! ```
//!
//! [`AccessTokenAuth`] performs that exchange on first use, caches the token until
//! shortly before it expires and sends it in the `Access-Token` header.

use std::fmt;

use api_client::{
    ApiError, Authenticator, Credentials, HttpMethod, RequestContext, ReqwestTransport, Transport,
    TransportError, parse_base_url,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::envelope::SUCCESS_CODE;

/// Header carrying the access token
pub const ACCESS_TOKEN_HEADER: &str = "Access-Token";

/// Tokens this close to expiry are refreshed before use
const EXPIRY_SKEW_SECONDS: i64 = 30;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenGrant {
    access_token: String,
    expiration: i64,
}

#[derive(Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn from_grant(grant: TokenGrant, now: DateTime<Utc>) -> Self {
        let lifetime = TimeDelta::try_seconds(grant.expiration.max(0)).unwrap_or(TimeDelta::MAX);
        Self {
            value: grant.access_token,
            expires_at: now
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.checked_add_signed(TimeDelta::seconds(EXPIRY_SKEW_SECONDS))
            .is_some_and(|deadline| deadline < self.expires_at)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// [`Authenticator`] implementing the NFTScan access-token scheme
///
/// The token is shared by every call made through the same authenticator. Concurrent
/// callers that find no valid token wait on a single exchange rather than each
/// requesting their own.
pub struct AccessTokenAuth<T = ReqwestTransport> {
    token_url: Url,
    transport: T,
    cached: Mutex<Option<AccessToken>>,
}

impl AccessTokenAuth {
    /// Authenticator exchanging credentials at `token_url` over the default transport
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if `token_url` is not a valid URL
    pub fn new(token_url: &str) -> Result<Self, ApiError> {
        Ok(Self::with_transport(
            parse_base_url(token_url)?,
            ReqwestTransport::new(),
        ))
    }
}

impl<T> AccessTokenAuth<T> {
    /// Authenticator exchanging credentials through a specific transport
    pub fn with_transport(token_url: Url, transport: T) -> Self {
        Self {
            token_url,
            transport,
            cached: Mutex::new(None),
        }
    }

    /// Token exchange endpoint
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Drop the cached token so the next call performs a fresh exchange
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }
}

impl<T: Transport> AccessTokenAuth<T> {
    async fn token(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(Utc::now())) {
            return Ok(token.value.clone());
        }

        let token = self.exchange(credentials).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn exchange(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        let mut url = self.token_url.clone();
        url.query_pairs_mut()
            .append_pair("apiKey", credentials.api_key())
            .append_pair("apiSecret", credentials.api_secret());
        let request = RequestContext::new("accessToken", HttpMethod::Get, url);

        debug!(path = self.token_url.path(), "requesting access token");

        let raw = self.transport.send(&request).await.map_err(|e| {
            let e = strip_url(e);
            warn!(error = %e, "access token request failed");
            ApiError::Authentication {
                message: format!("token request failed: {e}"),
            }
        })?;

        if !raw.is_success() {
            warn!(status = raw.status, "token endpoint returned error status");
            return Err(ApiError::Authentication {
                message: format!("token endpoint returned status {}", raw.status),
            });
        }

        let grant = parse_grant(&raw.body)?;
        let token = AccessToken::from_grant(grant, Utc::now());
        info!(expires_at = %token.expires_at, "obtained access token");
        Ok(token)
    }
}

impl<T: Transport> Authenticator for AccessTokenAuth<T> {
    async fn authenticate(
        &self,
        credentials: &Credentials,
        request: &mut RequestContext,
    ) -> Result<(), ApiError> {
        let token = self.token(credentials).await?;
        request.insert_header(ACCESS_TOKEN_HEADER, token);
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for AccessTokenAuth<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenAuth")
            .field("token_url", &self.token_url.as_str())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

/// reqwest errors print the request URL, which here carries the secret
fn strip_url(error: TransportError) -> TransportError {
    match error {
        TransportError::Http(e) => TransportError::Http(e.without_url()),
        other => other,
    }
}

/// Accepts both the enveloped grant and a bare `{ accessToken, expiration }` object
fn parse_grant(body: &[u8]) -> Result<TokenGrant, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ApiError::Authentication {
        message: format!("token response is not JSON: {e}"),
    })?;

    if let Some(code) = value.get("code").and_then(Value::as_i64) {
        if code != SUCCESS_CODE {
            let message = value.get("msg").and_then(Value::as_str).unwrap_or_default();
            return Err(ApiError::Authentication {
                message: format!("token endpoint returned code {code}: {message}"),
            });
        }
    }

    let grant = match value.get("data") {
        Some(data) if data.is_object() => data,
        _ => &value,
    };

    TokenGrant::deserialize(grant).map_err(|e| ApiError::Authentication {
        message: format!("unexpected token response: {e}"),
    })
}
