// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFTScan endpoint table
//!
//! Every NFTScan v1 operation is a `POST {base}/{version}/{operation}` with a JSON
//! body. Pagination uses `page_index` (zero based) and `page_size` (at most
//! [`MAX_PAGE_SIZE`]).

use api_client::{DefaultValue, EndpointDescriptor, HttpMethod, ParamKind, ParamSpec};
use shared_types::ErcStandard;

/// Largest page the API serves
pub const MAX_PAGE_SIZE: u32 = 100;
/// Page size used when none is given
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Wallet type NFTScan expects for account ownership queries
pub const WALLET_TYPE: i64 = 3;

const ERC: ParamSpec = ParamSpec::required("erc", ParamKind::Enum(ErcStandard::TAGS));
const USER_ADDRESS: ParamSpec = ParamSpec::required("user_address", ParamKind::Address);
const NFT_ADDRESS: ParamSpec = ParamSpec::required("nft_address", ParamKind::Address);
const NFT_ADDRESS_LIST: ParamSpec = ParamSpec::required("nft_address", ParamKind::AddressList);
const TOKEN_ID: ParamSpec = ParamSpec::required("token_id", ParamKind::String);
const PAGE_INDEX: ParamSpec = ParamSpec::defaulted(
    "page_index",
    ParamKind::Integer { min: 0, max: None },
    DefaultValue::Integer(0),
);
const PAGE_SIZE: ParamSpec = ParamSpec::defaulted(
    "page_size",
    ParamKind::Integer {
        min: 1,
        max: Some(MAX_PAGE_SIZE as i64),
    },
    DefaultValue::Integer(DEFAULT_PAGE_SIZE as i64),
);
const WALLET: ParamSpec = ParamSpec::defaulted(
    "walletType",
    ParamKind::Integer { min: 0, max: None },
    DefaultValue::Integer(WALLET_TYPE),
);

const fn post(name: &'static str, params: &'static [ParamSpec]) -> EndpointDescriptor {
    EndpointDescriptor::new(name, HttpMethod::Post, name, params)
}

/// NFTs of one standard held by an account
pub const GET_ALL_NFT_BY_USER_ADDRESS: EndpointDescriptor = post(
    "getAllNftByUserAddress",
    &[ERC, USER_ADDRESS, PAGE_INDEX, PAGE_SIZE, WALLET],
);

/// An account's NFTs of one standard grouped by contract
pub const GET_GROUP_BY_NFT_CONTRACT: EndpointDescriptor =
    post("getGroupByNftContract", &[ERC, USER_ADDRESS]);

/// NFTs minted by an account
pub const GET_MINT_BY_USER_ADDRESS: EndpointDescriptor = post(
    "getMintByUserAddress",
    &[USER_ADDRESS, PAGE_INDEX, PAGE_SIZE],
);

/// NFTs minted by an account from one contract
pub const GET_MINT_BY_USER_ADDRESS_AND_NFT_ADDRESS: EndpointDescriptor = post(
    "getMintByUserAddressAndNftAddress",
    &[NFT_ADDRESS, USER_ADDRESS, PAGE_INDEX, PAGE_SIZE],
);

/// Transaction records of a contract
pub const GET_NFT_RECORD_BY_CONTRACT: EndpointDescriptor = post(
    "getNFTRecordByContract",
    &[NFT_ADDRESS, PAGE_INDEX, PAGE_SIZE],
);

/// NFTs from one contract held by an account
pub const GET_NFT_BY_CONTRACT_AND_USER_ADDRESS: EndpointDescriptor = post(
    "getNftByContractAndUserAddress",
    &[NFT_ADDRESS, USER_ADDRESS, PAGE_INDEX, PAGE_SIZE],
);

/// Transaction records of one token involving an account
pub const GET_RECORD_BY_USER_ADDRESS_AND_TOKEN_ID: EndpointDescriptor = post(
    "getRecordByUserAddressAndTokenId",
    &[NFT_ADDRESS, TOKEN_ID, USER_ADDRESS, PAGE_INDEX, PAGE_SIZE],
);

/// Details of a single NFT
pub const GET_SINGLE_NFT: EndpointDescriptor = post("getSingleNft", &[NFT_ADDRESS, TOKEN_ID]);

/// Transaction records of a single NFT
pub const GET_SINGLE_NFT_RECORD: EndpointDescriptor = post(
    "getSingleNftRecord",
    &[NFT_ADDRESS, TOKEN_ID, PAGE_INDEX, PAGE_SIZE],
);

/// Collection statistics for one or more contracts
pub const GET_STATES: EndpointDescriptor = post("getStates", &[NFT_ADDRESS_LIST]);

/// An account's transaction records within one contract
pub const GET_USER_RECORD_BY_CONTRACT: EndpointDescriptor = post(
    "getUserRecordByContract",
    &[NFT_ADDRESS, USER_ADDRESS, PAGE_INDEX, PAGE_SIZE],
);

/// All transaction records of an account
pub const GET_USER_RECORD_BY_USER_ADDRESS: EndpointDescriptor = post(
    "getUserRecordByUserAddress",
    &[USER_ADDRESS, PAGE_INDEX, PAGE_SIZE],
);

/// Every NFTScan endpoint known to this crate
pub const ALL: &[EndpointDescriptor] = &[
    GET_ALL_NFT_BY_USER_ADDRESS,
    GET_GROUP_BY_NFT_CONTRACT,
    GET_MINT_BY_USER_ADDRESS,
    GET_MINT_BY_USER_ADDRESS_AND_NFT_ADDRESS,
    GET_NFT_RECORD_BY_CONTRACT,
    GET_NFT_BY_CONTRACT_AND_USER_ADDRESS,
    GET_RECORD_BY_USER_ADDRESS_AND_TOKEN_ID,
    GET_SINGLE_NFT,
    GET_SINGLE_NFT_RECORD,
    GET_STATES,
    GET_USER_RECORD_BY_CONTRACT,
    GET_USER_RECORD_BY_USER_ADDRESS,
];

/// Look up an endpoint by its NFTScan operation name
pub fn find(name: &str) -> Option<&'static EndpointDescriptor> {
    ALL.iter().find(|descriptor| descriptor.name == name)
}
