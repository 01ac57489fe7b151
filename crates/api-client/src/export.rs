// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Writing raw response bodies to disk
//!
//! Exports are a plain create-or-truncate write of the body bytes exactly as the
//! server sent them. The write is not atomic: if it fails midway, the file at the
//! target path may be left holding a partial body.

use std::{io, path::Path};

use tracing::info;

/// Write `body` to `path`, creating the file or overwriting an existing one
///
/// # Errors
///
/// Returns the underlying I/O error; the file may then contain a partial body
pub async fn export_body(path: &Path, body: &[u8]) -> io::Result<()> {
    tokio::fs::write(path, body).await?;
    info!(path = %path.display(), bytes = body.len(), "exported response body");
    Ok(())
}
