// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Typed NFTScan client
//!
//! One method per endpoint in [`endpoints`](crate::endpoints). Each method turns its
//! typed parameters into [`Arguments`], so the same schema validation applies as for
//! the name-based [`NftScanClient::call`].

use std::path::Path;

use api_client::{
    ApiError, ApiResponse, Arguments, Authenticator, Client, Credentials, EndpointDescriptor,
    ReqwestTransport, Transport, ValidationError,
};
use serde_json::Value;
use shared_types::ErcStandard;
use tracing::debug;
use url::Url;

use crate::{
    AccessTokenAuth, NftScanConfig,
    endpoints::{self, DEFAULT_PAGE_SIZE},
};

/// Position within a paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Zero-based page number
    pub index: u32,
    /// Items per page (1 to [`MAX_PAGE_SIZE`](crate::endpoints::MAX_PAGE_SIZE))
    pub size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            index: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    /// Page `index` with `size` items
    pub const fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// The page following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            index: self.index.saturating_add(1),
            size: self.size,
        }
    }

    fn apply(self, arguments: Arguments) -> Arguments {
        arguments
            .with("page_index", self.index)
            .with("page_size", self.size)
    }
}

/// Client for the NFTScan v1 API
///
/// Authenticates through the NFTScan access-token gateway by default. Cheap to
/// share behind an `Arc`; every call is independent and the token is shared.
#[derive(Debug)]
pub struct NftScanClient<A = AccessTokenAuth, T = ReqwestTransport> {
    inner: Client<A, T>,
}

impl NftScanClient {
    /// Client for the public NFTScan endpoint
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the key or secret is blank
    pub fn new(api_key: &str, api_secret: &str) -> Result<Self, ApiError> {
        Self::with_config(api_key, api_secret, &NftScanConfig::default())
    }

    /// Client with explicit connection settings
    ///
    /// The token exchange and the API calls share the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the key or secret is blank or the
    /// configured URLs are invalid
    pub fn with_config(
        api_key: &str,
        api_secret: &str,
        config: &NftScanConfig,
    ) -> Result<Self, ApiError> {
        let credentials = Credentials::new(api_key, api_secret)?;
        let auth = AccessTokenAuth::with_transport(
            api_client::parse_base_url(&config.token_url)?,
            transport(config)?,
        );
        Ok(Self::from_client(Client::with_parts(
            api_url(config)?,
            credentials,
            auth,
            transport(config)?,
        )))
    }
}

impl<A, T> NftScanClient<A, T> {
    /// Wrap a generic client already pointed at an NFTScan API root
    pub fn from_client(inner: Client<A, T>) -> Self {
        Self { inner }
    }

    /// Underlying generic client
    pub fn inner(&self) -> &Client<A, T> {
        &self.inner
    }
}

impl<A: Authenticator, T: Transport> NftScanClient<A, T> {
    /// Call an endpoint by its NFTScan operation name
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownEndpoint`] for names not in
    /// [`endpoints::ALL`], otherwise any error from [`Client::call`]
    pub async fn call(
        &self,
        name: &str,
        arguments: &Arguments,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let descriptor = endpoints::find(name)
            .ok_or_else(|| ValidationError::UnknownEndpoint(name.to_string()))?;
        self.dispatch(descriptor, arguments, export_file_name).await
    }

    async fn dispatch(
        &self,
        descriptor: &EndpointDescriptor,
        arguments: &Arguments,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        debug!(
            endpoint = descriptor.name,
            arguments = arguments.len(),
            export = export_file_name.is_some(),
            "calling NFTScan"
        );
        self.inner
            .call(descriptor, arguments, export_file_name)
            .await
    }

    /// NFTs of one standard held by `user_address`
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_all_nft_by_user_address(
        &self,
        erc: ErcStandard,
        user_address: &str,
        page: Page,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = page.apply(
            Arguments::new()
                .with("erc", erc)
                .with("user_address", user_address),
        );
        self.dispatch(
            &endpoints::GET_ALL_NFT_BY_USER_ADDRESS,
            &arguments,
            export_file_name,
        )
        .await
    }

    /// NFTs of one standard held by `user_address`, grouped by contract
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_group_by_nft_contract(
        &self,
        erc: ErcStandard,
        user_address: &str,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = Arguments::new()
            .with("erc", erc)
            .with("user_address", user_address);
        self.dispatch(
            &endpoints::GET_GROUP_BY_NFT_CONTRACT,
            &arguments,
            export_file_name,
        )
        .await
    }

    /// NFTs minted by `user_address`
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_mint_by_user_address(
        &self,
        user_address: &str,
        page: Page,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = page.apply(Arguments::new().with("user_address", user_address));
        self.dispatch(
            &endpoints::GET_MINT_BY_USER_ADDRESS,
            &arguments,
            export_file_name,
        )
        .await
    }

    /// NFTs minted by `user_address` from the `nft_address` contract
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_mint_by_user_address_and_nft_address(
        &self,
        nft_address: &str,
        user_address: &str,
        page: Page,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = page.apply(
            Arguments::new()
                .with("nft_address", nft_address)
                .with("user_address", user_address),
        );
        self.dispatch(
            &endpoints::GET_MINT_BY_USER_ADDRESS_AND_NFT_ADDRESS,
            &arguments,
            export_file_name,
        )
        .await
    }

    /// Transaction records of the `nft_address` contract
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_nft_record_by_contract(
        &self,
        nft_address: &str,
        page: Page,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = page.apply(Arguments::new().with("nft_address", nft_address));
        self.dispatch(
            &endpoints::GET_NFT_RECORD_BY_CONTRACT,
            &arguments,
            export_file_name,
        )
        .await
    }

    /// NFTs from the `nft_address` contract held by `user_address`
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_nft_by_contract_and_user_address(
        &self,
        nft_address: &str,
        user_address: &str,
        page: Page,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = page.apply(
            Arguments::new()
                .with("nft_address", nft_address)
                .with("user_address", user_address),
        );
        self.dispatch(
            &endpoints::GET_NFT_BY_CONTRACT_AND_USER_ADDRESS,
            &arguments,
            export_file_name,
        )
        .await
    }

    /// Transaction records of one token that involve `user_address`
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_record_by_user_address_and_token_id(
        &self,
        nft_address: &str,
        token_id: &str,
        user_address: &str,
        page: Page,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = page.apply(
            Arguments::new()
                .with("nft_address", nft_address)
                .with("token_id", token_id)
                .with("user_address", user_address),
        );
        self.dispatch(
            &endpoints::GET_RECORD_BY_USER_ADDRESS_AND_TOKEN_ID,
            &arguments,
            export_file_name,
        )
        .await
    }

    /// Details of a single NFT
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_single_nft(
        &self,
        nft_address: &str,
        token_id: &str,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = Arguments::new()
            .with("nft_address", nft_address)
            .with("token_id", token_id);
        self.dispatch(&endpoints::GET_SINGLE_NFT, &arguments, export_file_name)
            .await
    }

    /// Transaction records of a single NFT
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_single_nft_record(
        &self,
        nft_address: &str,
        token_id: &str,
        page: Page,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = page.apply(
            Arguments::new()
                .with("nft_address", nft_address)
                .with("token_id", token_id),
        );
        self.dispatch(
            &endpoints::GET_SINGLE_NFT_RECORD,
            &arguments,
            export_file_name,
        )
        .await
    }

    /// Collection statistics for each contract in `nft_addresses`
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_states(
        &self,
        nft_addresses: &[&str],
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let addresses: Vec<Value> = nft_addresses
            .iter()
            .map(|address| Value::from(*address))
            .collect();
        let arguments = Arguments::new().with("nft_address", addresses);
        self.dispatch(&endpoints::GET_STATES, &arguments, export_file_name)
            .await
    }

    /// Transaction records of `user_address` within the `nft_address` contract
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_user_record_by_contract(
        &self,
        nft_address: &str,
        user_address: &str,
        page: Page,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = page.apply(
            Arguments::new()
                .with("nft_address", nft_address)
                .with("user_address", user_address),
        );
        self.dispatch(
            &endpoints::GET_USER_RECORD_BY_CONTRACT,
            &arguments,
            export_file_name,
        )
        .await
    }

    /// All transaction records of `user_address`
    ///
    /// # Errors
    ///
    /// See [`Client::call`]
    pub async fn get_user_record_by_user_address(
        &self,
        user_address: &str,
        page: Page,
        export_file_name: Option<&Path>,
    ) -> Result<ApiResponse, ApiError> {
        let arguments = page.apply(Arguments::new().with("user_address", user_address));
        self.dispatch(
            &endpoints::GET_USER_RECORD_BY_USER_ADDRESS,
            &arguments,
            export_file_name,
        )
        .await
    }
}

fn api_url(config: &NftScanConfig) -> Result<Url, ApiError> {
    let url = config.api_url().map_err(|e| ApiError::Configuration {
        message: format!("invalid base URL `{}`: {e}", config.base_url),
    })?;
    api_client::parse_base_url(url.as_str())
}

fn transport(config: &NftScanConfig) -> Result<ReqwestTransport, ApiError> {
    ReqwestTransport::with_timeout(config.timeout_seconds.value()).map_err(|e| {
        ApiError::Configuration {
            message: format!("cannot create HTTP client: {e}"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_advances() {
        assert_eq!(Page::default(), Page::new(0, 20));
        assert_eq!(Page::new(3, 50).next(), Page::new(4, 50));
        assert_eq!(Page::new(u32::MAX, 1).next().index, u32::MAX);
    }

    #[test]
    fn page_becomes_arguments() {
        let arguments = Page::new(2, 10).apply(Arguments::new());
        assert_eq!(arguments.get("page_index"), Some(&Value::from(2)));
        assert_eq!(arguments.get("page_size"), Some(&Value::from(10)));
    }

    #[test]
    fn construction_validates_credentials_and_urls() {
        assert!(NftScanClient::new("key", "secret").is_ok());
        assert!(matches!(
            NftScanClient::new(" ", "secret"),
            Err(ApiError::Configuration { .. })
        ));

        let config = NftScanConfig {
            base_url: "not a url".to_string(),
            ..NftScanConfig::default()
        };
        assert!(matches!(
            NftScanClient::with_config("key", "secret", &config),
            Err(ApiError::Configuration { .. })
        ));

        let config = NftScanConfig {
            token_url: "gateway".to_string(),
            ..NftScanConfig::default()
        };
        assert!(matches!(
            NftScanClient::with_config("key", "secret", &config),
            Err(ApiError::Configuration { .. })
        ));
    }

    #[test]
    fn default_client_targets_v1_through_the_gateway() {
        let client = NftScanClient::new("key", "secret").unwrap();
        assert_eq!(
            client.inner().base_url().as_str(),
            "https://restapi.nftscan.com/api/v1"
        );
        assert_eq!(
            client.inner().authenticator().token_url().as_str(),
            "https://restapi.nftscan.com/gw/token"
        );
    }
}
