// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! Connection settings for [`NftScanClient`](crate::NftScanClient). Credentials are
//! never read from configuration; they are passed explicitly when a client is built.

use std::{path::Path, time::Duration};

use anyhow::{Result, ensure};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer, Serialize, de};
use url::Url;

/// Default NFTScan REST root
pub const DEFAULT_BASE_URL: &str = "https://restapi.nftscan.com/api";
/// Default API version segment
pub const DEFAULT_VERSION: &str = "v1";
/// Default access-token exchange endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://restapi.nftscan.com/gw/token";

/// A validated timeout duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(u64);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> Result<Self> {
        ensure!(seconds != 0, "timeout must be greater than 0");
        ensure!(seconds <= 300, "timeout cannot exceed 300");
        Ok(Self(seconds))
    }

    /// Get the timeout as a duration
    pub fn value(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self(30)
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

/// Connection settings for the NFTScan API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftScanConfig {
    /// REST root, without the version segment
    pub base_url: String,
    /// API version segment appended to `base_url`
    pub version: String,
    /// Endpoint used by [`AccessTokenAuth`](crate::AccessTokenAuth)
    pub token_url: String,
    /// Bound on the total time of each request (validated range: 1-300)
    pub timeout_seconds: TimeoutSeconds,
}

impl Default for NftScanConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout_seconds: TimeoutSeconds::default(),
        }
    }
}

impl NftScanConfig {
    /// Load configuration using the config crate with hierarchical sources
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. Optional `nftscan.toml` or `nftscan.json` in the working directory
    /// 3. Environment variables with the `NFTSCAN_` prefix (e.g. `NFTSCAN_BASE_URL`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a value is invalid
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("nftscan").required(false))
            .add_source(Environment::with_prefix("NFTSCAN").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a single file, falling back to defaults for absent keys
    ///
    /// The format is inferred from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or a value is invalid
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("version", DEFAULT_VERSION)?
            .set_default("token_url", DEFAULT_TOKEN_URL)?
            .set_default("timeout_seconds", 30)
    }

    /// Full API root: `base_url` joined with `version`
    ///
    /// # Errors
    ///
    /// Returns a parse error if `base_url` is not a valid URL
    pub fn api_url(&self) -> Result<Url, url::ParseError> {
        let root = self.base_url.trim_end_matches('/');
        let version = self.version.trim_matches('/');
        if version.is_empty() {
            Url::parse(root)
        } else {
            Url::parse(&format!("{root}/{version}"))
        }
    }

    /// Configuration pointing every URL at a local mock server
    pub fn for_testing(server_uri: &str) -> Self {
        Self {
            base_url: format!("{server_uri}/api"),
            version: DEFAULT_VERSION.to_string(),
            token_url: format!("{server_uri}/gw/token"),
            timeout_seconds: TimeoutSeconds(5),
        }
    }
}
