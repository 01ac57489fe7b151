// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string validation
//!
//! [`NonEmptyString`] makes blank credentials unrepresentable: once constructed it
//! holds at least one non-whitespace character.
//!
//! ```rust
//! use api_client::NonEmptyString;
//!
//! let api_key = NonEmptyString::new("nftscan-key").expect("valid key");
//! assert_eq!(api_key.as_str(), "nftscan-key");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new("   \t\n  ").is_err());
//! ```

use core::fmt;
use std::str::FromStr;

/// A string that contains at least one non-whitespace character
///
/// Leading and trailing whitespace is preserved; only whitespace-only and empty
/// inputs are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(Box<str>);

/// Error returned when a string is empty or whitespace-only
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("string cannot be empty or whitespace-only")]
pub struct EmptyStringError;

impl NonEmptyString {
    /// Create a new `NonEmptyString` from any string-like input
    ///
    /// # Errors
    ///
    /// Returns [`EmptyStringError`] if the input is empty or whitespace-only
    pub fn new(s: impl Into<String>) -> Result<Self, EmptyStringError> {
        let s = s.into();
        if s.trim().is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(s.into_boxed_str()))
        }
    }

    /// Get a string slice of the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = EmptyStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_padded_values() {
        let value = NonEmptyString::new(" key ").unwrap();
        assert_eq!(value.as_str(), " key ");
        assert_eq!(value.to_string(), " key ");
    }

    #[test]
    fn rejects_blank_values() {
        assert_eq!(NonEmptyString::new(""), Err(EmptyStringError));
        assert_eq!("\t\n".parse::<NonEmptyString>(), Err(EmptyStringError));
    }
}
