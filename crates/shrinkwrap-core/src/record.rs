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

//! Uploaded file records

use crate::classifier::mime_for;
use crate::error::{ShrinkError, ShrinkResult};
use crate::payload::DataUrl;
use bytes::Bytes;
use std::path::Path;
use tracing::debug;

/// A selected file.
///
/// Records are immutable; a new selection replaces the record wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    name: String,
    raw_content: Bytes,
}

impl FileRecord {
    /// Create a record from in-memory content
    pub fn new(name: impl Into<String>, raw_content: impl Into<Bytes>) -> Self {
        FileRecord {
            name: name.into(),
            raw_content: raw_content.into(),
        }
    }

    /// Read a record from disk, naming it after the final path component.
    ///
    /// # Errors
    ///
    /// Returns [`ShrinkError::ReadError`] if the file cannot be read or the
    /// path has no usable file name.
    pub async fn load(path: impl AsRef<Path>) -> ShrinkResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ShrinkError::read_error(format!("{} has no file name", path.display()))
            })?
            .to_string();

        let content = tokio::fs::read(path).await.map_err(|e| {
            ShrinkError::read_error(format!("could not read {}: {}", path.display(), e))
        })?;

        debug!(name = %name, bytes = content.len(), "Loaded file record");
        Ok(FileRecord::new(name, content))
    }

    /// File name as selected
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the raw content in bytes
    pub fn byte_size(&self) -> u64 {
        self.raw_content.len() as u64
    }

    /// Raw file content
    pub fn raw_content(&self) -> &Bytes {
        &self.raw_content
    }

    /// Encode the content as a data URL, typed by the file extension
    pub fn to_data_url(&self) -> DataUrl {
        DataUrl::from_bytes(mime_for(&self.name), &self.raw_content)
    }
}
