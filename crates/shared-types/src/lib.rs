// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the NFTScan client workspace
//!
//! This crate provides small domain types that are shared across multiple crates
//! in the workspace, avoiding circular dependencies.

pub mod erc;

pub use erc::{ErcParseError, ErcStandard};
