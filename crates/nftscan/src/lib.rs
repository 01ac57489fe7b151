// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFTScan API binding
//!
//! A thin, typed layer over [`api_client`]: a static table of the NFTScan v1
//! endpoints and a [`NftScanClient`] with one method per endpoint. Every method
//! returns the decoded JSON body unchanged and can optionally export the raw body
//! to a file.
//!
//! # Authentication
//!
//! NFTScan only accepts its gateway scheme. [`AccessTokenAuth`] exchanges the key
//! and secret for a short-lived access token on first use and sends it in the
//! `Access-Token` header; every [`NftScanClient`] constructor wires it in.
//!
//! # Example
//!
//! ```rust,no_run
//! use nftscan::{NftScanClient, Page};
//! use shared_types::ErcStandard;
//!
//! # async fn run() -> Result<(), api_client::ApiError> {
//! let client = NftScanClient::new("api-key", "api-secret")?;
//! let nfts = client
//!     .get_all_nft_by_user_address(
//!         ErcStandard::Erc721,
//!         "0x1234567890123456789012345678901234567890",
//!         Page::default(),
//!         None,
//!     )
//!     .await?;
//! println!("{}", nfts.value());
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;

pub use auth::{ACCESS_TOKEN_HEADER, AccessTokenAuth};
pub use client::{NftScanClient, Page};
pub use config::{NftScanConfig, TimeoutSeconds};
pub use envelope::ResponseEnvelope;

/// Failures reported inside an NFTScan response body
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NftScanError {
    /// The envelope carried a non-success code
    #[error("NFTScan returned code {code}: {message}")]
    Api { code: i64, message: String },

    /// The body is not a `{ code, msg, data }` envelope
    #[error("malformed NFTScan response: {message}")]
    MalformedEnvelope { message: String },
}
