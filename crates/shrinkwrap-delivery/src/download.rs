// ShrinkWrap - Compression Advisor and Transform Simulator
// Copyright (C) 2025 ShrinkWrap Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Download writer

use crate::error::{DeliveryError, DeliveryResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write processed bytes as `file_name` inside `out_dir`.
///
/// The directory is created when missing. Only the final component of
/// `file_name` is used, so names cannot escape `out_dir`.
///
/// # Errors
///
/// Returns [`DeliveryError::InvalidTarget`] if `file_name` has no usable
/// final component, or [`DeliveryError::Io`] if writing fails.
pub async fn write_download(
    out_dir: impl AsRef<Path>,
    file_name: &str,
    bytes: &[u8],
) -> DeliveryResult<PathBuf> {
    let name = Path::new(file_name)
        .file_name()
        .ok_or_else(|| DeliveryError::InvalidTarget(file_name.to_string()))?;

    let out_dir = out_dir.as_ref();
    tokio::fs::create_dir_all(out_dir).await?;

    let path = out_dir.join(name);
    tokio::fs::write(&path, bytes).await?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
