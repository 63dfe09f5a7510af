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

//! Artifact filename codec
//!
//! Grammar: `<name>(.<any>)*.<algorithm>.shrnk`. Both the algorithm segment
//! and the artifact extension are matched ASCII case-insensitively; encoding
//! always writes them lowercase.
//!
//! Only artifact content has to round-trip exactly. A name that does not
//! carry a recognized tag decodes to a best-effort `_decompressed` name.

use crate::catalog::AlgorithmKey;
use crate::{Direction, ARTIFACT_EXTENSION};

/// Marker inserted into names that cannot be decoded
pub const FALLBACK_MARKER: &str = "_decompressed";

/// Result of decoding a filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    /// Whether the name carried a recognized artifact tag
    pub recognized: bool,
    /// Algorithm named by the tag
    pub algorithm: Option<AlgorithmKey>,
    /// Name in front of the tag
    pub original_name: Option<String>,
}

impl DecodedName {
    fn unrecognized() -> Self {
        DecodedName {
            recognized: false,
            algorithm: None,
            original_name: None,
        }
    }
}

/// Name the output of a transform.
///
/// Compression appends `.<key>.shrnk` to the full original name. Decompression
/// restores the decoded original name, or falls back to [`fallback_name`].
pub fn encode(original_name: &str, algorithm: AlgorithmKey, direction: Direction) -> String {
    match direction {
        Direction::Compress => {
            format!("{}.{}.{}", original_name, algorithm.as_str(), ARTIFACT_EXTENSION)
        }
        Direction::Decompress => decode(original_name)
            .original_name
            .unwrap_or_else(|| fallback_name(original_name)),
    }
}

/// Decode an artifact name.
///
/// The last two segments must be `<known key>.shrnk` and the remaining name
/// must be non-empty.
pub fn decode(name: &str) -> DecodedName {
    let mut parts = name.rsplitn(3, '.');
    let (Some(ext), Some(token), Some(rest)) = (parts.next(), parts.next(), parts.next()) else {
        return DecodedName::unrecognized();
    };

    if rest.is_empty() || !ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION) {
        return DecodedName::unrecognized();
    }

    match AlgorithmKey::from_token(token) {
        Some(algorithm) => DecodedName {
            recognized: true,
            algorithm: Some(algorithm),
            original_name: Some(rest.to_string()),
        },
        None => DecodedName::unrecognized(),
    }
}

/// Best-effort output name for an unrecognized input.
///
/// `notes.bin` becomes `notes_decompressed.bin`; `README` becomes
/// `README_decompressed`.
pub fn fallback_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() && !ext.is_empty() => {
            format!("{}{}.{}", base, FALLBACK_MARKER, ext)
        }
        _ => format!("{}{}", name, FALLBACK_MARKER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_compress_appends_tag() {
        assert_eq!(
            encode("report.pdf", AlgorithmKey::Deflate, Direction::Compress),
            "report.pdf.deflate.shrnk"
        );
        assert_eq!(
            encode("scan.pdf", AlgorithmKey::PdfOptimization, Direction::Compress),
            "scan.pdf.pdf-optimization.shrnk"
        );
    }

    #[test]
    fn decode_recovers_original_name() {
        let decoded = decode("report.pdf.deflate.shrnk");
        assert!(decoded.recognized);
        assert_eq!(decoded.algorithm, Some(AlgorithmKey::Deflate));
        assert_eq!(decoded.original_name.as_deref(), Some("report.pdf"));
    }

    #[test]
    fn decode_is_case_insensitive() {
        let decoded = decode("Photo.PNG.RLE.SHRNK");
        assert!(decoded.recognized);
        assert_eq!(decoded.algorithm, Some(AlgorithmKey::Rle));
        assert_eq!(decoded.original_name.as_deref(), Some("Photo.PNG"));
    }

    #[test]
    fn decode_rejects_unknown_key_and_extension() {
        assert!(!decode("report.pdf.zstd.shrnk").recognized);
        assert!(!decode("report.pdf.deflate.zip").recognized);
        assert!(!decode("deflate.shrnk").recognized);
        assert!(!decode(".deflate.shrnk").recognized);
        assert!(!decode("plain").recognized);
    }

    #[test]
    fn encode_decompress_restores_or_falls_back() {
        assert_eq!(
            encode("report.pdf.deflate.shrnk", AlgorithmKey::Deflate, Direction::Decompress),
            "report.pdf"
        );
        assert_eq!(
            encode("notes.bin", AlgorithmKey::Huffman, Direction::Decompress),
            "notes_decompressed.bin"
        );
        assert_eq!(
            encode("README", AlgorithmKey::Huffman, Direction::Decompress),
            "README_decompressed"
        );
    }

    #[test]
    fn fallback_for_dotfiles_appends_suffix() {
        assert_eq!(fallback_name(".bashrc"), ".bashrc_decompressed");
        assert_eq!(fallback_name("trailing."), "trailing._decompressed");
    }
}
