// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! API key and secret owned by a single client instance

use std::fmt;

use crate::{ApiError, NonEmptyString};

/// An API key/secret pair
///
/// Credentials are immutable once constructed and are only ever read by an
/// [`Authenticator`](crate::Authenticator) while decorating an outbound request.
/// The `Debug` output never contains either value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: NonEmptyString,
    api_secret: NonEmptyString,
}

impl Credentials {
    /// Create credentials from an API key and secret
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if either value is empty or whitespace-only
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let api_key = NonEmptyString::new(api_key).map_err(|_| ApiError::Configuration {
            message: "API key cannot be empty".to_string(),
        })?;
        let api_secret = NonEmptyString::new(api_secret).map_err(|_| ApiError::Configuration {
            message: "API secret cannot be empty".to_string(),
        })?;

        Ok(Self {
            api_key,
            api_secret,
        })
    }

    /// The public API key
    pub fn api_key(&self) -> &str {
        self.api_key.as_str()
    }

    /// The API secret
    pub fn api_secret(&self) -> &str {
        self.api_secret.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_key_or_secret() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(ApiError::Configuration { message }) if message.contains("key")
        ));
        assert!(matches!(
            Credentials::new("key", "  "),
            Err(ApiError::Configuration { message }) if message.contains("secret")
        ));
    }

    #[test]
    fn debug_output_is_redacted() {
        let credentials = Credentials::new("visible-key", "top-secret").unwrap();
        let debug = format!("{credentials:?}");

        assert!(!debug.contains("visible-key"));
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn accessors_return_original_values() {
        let credentials = Credentials::new("key", "secret").unwrap();
        assert_eq!(credentials.api_key(), "key");
        assert_eq!(credentials.api_secret(), "secret");
    }
}
