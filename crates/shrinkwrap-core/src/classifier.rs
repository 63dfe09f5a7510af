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

//! Filename classification
//!
//! Decides whether an uploaded name is an artifact ShrinkWrap produced
//! earlier and, if not, which coarse type it belongs to. The coarse type only
//! drives the suggestion request. Classification is a pure function of the
//! name and never fails.

use crate::catalog::AlgorithmKey;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse file type sent to the suggestion backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarseType {
    /// Text and document formats
    Text,
    /// Raster and vector images
    Image,
    /// PDF documents
    Pdf,
    /// Anything else
    Binary,
}

impl CoarseType {
    /// Detect coarse type from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "md" | "markdown" | "html" | "htm" | "css" | "js" | "json" | "xml"
            | "csv" | "yaml" | "yml" | "toml" | "log" | "rtf" => CoarseType::Text,
            "jpg" | "jpeg" | "png" | "gif" | "svg" | "bmp" | "webp" | "tif" | "tiff"
            | "ico" => CoarseType::Image,
            "pdf" => CoarseType::Pdf,
            _ => CoarseType::Binary,
        }
    }

    /// Label used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            CoarseType::Text => "text",
            CoarseType::Image => "image",
            CoarseType::Pdf => "pdf",
            CoarseType::Binary => "binary",
        }
    }
}

impl fmt::Display for CoarseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Whether the name carries a recognized artifact tag
    pub is_artifact: bool,
    /// Algorithm decoded from the artifact tag
    pub detected_algorithm: Option<AlgorithmKey>,
    /// Coarse type of the final extension
    pub coarse_type: CoarseType,
}

/// Classify a filename.
///
/// A name is an artifact when [`naming::decode`] recognizes its
/// `.<key>.shrnk` tag. Artifacts still get a coarse type from their final
/// segment, which is always `binary` for the artifact extension.
pub fn classify(file_name: &str) -> Classification {
    let decoded = naming::decode(file_name);
    Classification {
        is_artifact: decoded.recognized,
        detected_algorithm: decoded.algorithm,
        coarse_type: extension_of(file_name)
            .map(CoarseType::from_extension)
            .unwrap_or(CoarseType::Binary),
    }
}

/// Final dot-segment of a name, if the name has more than one segment
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// MIME type used for the data-URL header of a file
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = extension_of(file_name).unwrap_or_default().to_lowercase();
    match ext.as_str() {
        "txt" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "csv" => "text/csv",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        "rtf" => "application/rtf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/vnd.microsoft.icon",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
