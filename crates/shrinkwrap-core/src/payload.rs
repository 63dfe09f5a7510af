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

//! Data-URL payloads
//!
//! File contents travel through the pipeline as `data:<mime>;base64,<body>`
//! text. The header up to and including the `;base64,` marker is fixed; only
//! the body is ever transformed.

use crate::error::{ShrinkError, ShrinkResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

/// Separator between the data-URL header and the encoded body
pub const BASE64_MARKER: &str = ";base64,";

/// A parsed `data:` URL with a base64 body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Everything up to and including [`BASE64_MARKER`]
    header: String,
    /// Base64 body
    body: String,
}

impl DataUrl {
    /// Encode raw bytes the way a browser file reader would
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        DataUrl {
            header: format!("data:{}{}", mime, BASE64_MARKER),
            body: STANDARD.encode(bytes),
        }
    }

    /// Parse data-URL text.
    ///
    /// # Errors
    ///
    /// Returns [`ShrinkError::FormatError`] if the text is not a `data:` URL
    /// or the `;base64,` marker is missing.
    pub fn parse(text: &str) -> ShrinkResult<Self> {
        if !text.starts_with("data:") {
            return Err(ShrinkError::format_error("payload is not a data URL"));
        }
        let index = text.find(BASE64_MARKER).ok_or_else(|| {
            ShrinkError::format_error("payload is missing the ;base64, marker")
        })?;
        let split = index + BASE64_MARKER.len();
        Ok(DataUrl {
            header: text[..split].to_string(),
            body: text[split..].to_string(),
        })
    }

    /// Replace the body, keeping the header untouched
    pub fn with_body_bytes(&self, bytes: &[u8]) -> Self {
        DataUrl {
            header: self.header.clone(),
            body: STANDARD.encode(bytes),
        }
    }

    /// Header including the marker
    pub fn header(&self) -> &str {
        &self.header
    }

    /// MIME type declared in the header
    pub fn mime(&self) -> &str {
        let end = self.header.len() - BASE64_MARKER.len();
        &self.header["data:".len()..end]
    }

    /// Encoded body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decode the body into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ShrinkError::FormatError`] if the body is not valid base64.
    pub fn decode_body(&self) -> ShrinkResult<Vec<u8>> {
        STANDARD
            .decode(self.body.as_bytes())
            .map_err(|e| ShrinkError::format_error(format!("invalid base64 body: {}", e)))
    }

    /// Length of the full data-URL text
    pub fn text_len(&self) -> usize {
        self.header.len() + self.body.len()
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.header, self.body)
    }
}
