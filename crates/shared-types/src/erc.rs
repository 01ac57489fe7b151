// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFT token standard tags
//!
//! NFTScan filters ownership queries by token standard and expects the
//! lowercase tags `erc721` and `erc1155` on the wire.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Non-fungible token standards accepted by the NFTScan API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErcStandard {
    /// ERC-721 non-fungible token
    Erc721,
    /// ERC-1155 multi-token
    Erc1155,
}

impl ErcStandard {
    /// Wire tags for every supported standard, in declaration order
    pub const TAGS: &'static [&'static str] = &["erc721", "erc1155"];

    /// Returns the lowercase wire tag
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Erc721 => "erc721",
            Self::Erc1155 => "erc1155",
        }
    }

    /// Returns all supported standards
    pub const fn all() -> &'static [Self] {
        &[Self::Erc721, Self::Erc1155]
    }
}

impl fmt::Display for ErcStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErcStandard {
    type Err = ErcParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept "ERC-721" and friends, the wire form is always lowercase without a dash
        match s.trim().to_lowercase().replace('-', "").as_str() {
            "erc721" => Ok(Self::Erc721),
            "erc1155" => Ok(Self::Erc1155),
            _ => Err(ErcParseError(s.to_string())),
        }
    }
}

impl From<ErcStandard> for serde_json::Value {
    fn from(value: ErcStandard) -> Self {
        serde_json::Value::String(value.as_str().to_string())
    }
}

impl Serialize for ErcStandard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErcStandard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when a string is not a supported token standard
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported token standard: {0}. Supported standards are: erc721, erc1155")]
pub struct ErcParseError(pub String);
