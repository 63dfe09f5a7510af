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

//! Static registry of supported algorithms
//!
//! Every [`AlgorithmKey`] has exactly one [`AlgorithmProfile`]. The key is the
//! token written into artifact names, so the catalog, the filename codec and
//! the simulator all agree on the set by sharing this enum.

use crate::error::ShrinkError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a supported algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlgorithmKey {
    /// Huffman coding
    #[serde(rename = "huffman")]
    Huffman,
    /// Run-length encoding
    #[serde(rename = "rle")]
    Rle,
    /// LZ77 sliding-window matching
    #[serde(rename = "lz77")]
    Lz77,
    /// DEFLATE (LZ77 + Huffman)
    #[serde(rename = "deflate")]
    Deflate,
    /// PDF-specific optimization
    #[serde(rename = "pdf-optimization")]
    PdfOptimization,
}

impl AlgorithmKey {
    /// All keys in catalog order
    pub const ALL: [AlgorithmKey; 5] = [
        AlgorithmKey::Huffman,
        AlgorithmKey::Rle,
        AlgorithmKey::Lz77,
        AlgorithmKey::Deflate,
        AlgorithmKey::PdfOptimization,
    ];

    /// Token used in artifact names and configuration
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmKey::Huffman => "huffman",
            AlgorithmKey::Rle => "rle",
            AlgorithmKey::Lz77 => "lz77",
            AlgorithmKey::Deflate => "deflate",
            AlgorithmKey::PdfOptimization => "pdf-optimization",
        }
    }

    /// Look up a key from an artifact-name segment.
    ///
    /// Matching is ASCII case-insensitive: `RLE` and `rle` are the same key.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(token))
    }

    /// Profile registered for this key
    pub fn profile(self) -> &'static AlgorithmProfile {
        match self {
            AlgorithmKey::Huffman => &CATALOG[0],
            AlgorithmKey::Rle => &CATALOG[1],
            AlgorithmKey::Lz77 => &CATALOG[2],
            AlgorithmKey::Deflate => &CATALOG[3],
            AlgorithmKey::PdfOptimization => &CATALOG[4],
        }
    }

    /// Human-readable algorithm name
    pub fn display_name(self) -> &'static str {
        self.profile().display_name
    }
}

impl fmt::Display for AlgorithmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKey {
    type Err = ShrinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s.trim()).ok_or_else(|| ShrinkError::unknown_algorithm(s))
    }
}

/// Descriptive entry for one algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmProfile {
    /// Catalog key
    pub key: AlgorithmKey,
    /// Name shown to users and matched against suggestions
    pub display_name: &'static str,
    /// One-line suitability description
    pub description: &'static str,
    /// Fraction of the original size the compressed artifact occupies, in (0, 1)
    pub compression_factor: f64,
    /// Lowercase terms that identify this algorithm inside free text
    #[serde(skip)]
    pub match_terms: &'static [&'static str],
}

impl AlgorithmProfile {
    /// Multiplier applied when estimating the decompressed size
    pub fn expansion_factor(&self) -> f64 {
        1.0 / self.compression_factor
    }
}

static CATALOG: [AlgorithmProfile; 5] = [
    AlgorithmProfile {
        key: AlgorithmKey::Huffman,
        display_name: "Huffman Coding",
        description: "Best for files with frequent repeating characters.",
        compression_factor: 0.45,
        match_terms: &["huffman"],
    },
    AlgorithmProfile {
        key: AlgorithmKey::Rle,
        display_name: "Run-Length Encoding",
        description: "Best for files with long sequences of the same character.",
        compression_factor: 0.6,
        match_terms: &["rle", "run-length", "run length"],
    },
    AlgorithmProfile {
        key: AlgorithmKey::Lz77,
        display_name: "LZ77",
        description: "Best for text with repeating sequences of characters.",
        compression_factor: 0.55,
        match_terms: &["lz77"],
    },
    AlgorithmProfile {
        key: AlgorithmKey::Deflate,
        display_name: "DEFLATE",
        description: "Combines LZ77 and Huffman. Great for general purpose use.",
        compression_factor: 0.40,
        match_terms: &["deflate"],
    },
    AlgorithmProfile {
        key: AlgorithmKey::PdfOptimization,
        display_name: "PDF Optimization",
        description: "Advanced optimization for PDF files, including image re-compression.",
        compression_factor: 0.35,
        match_terms: &["pdf"],
    },
];

/// All profiles in catalog order
pub fn profiles() -> &'static [AlgorithmProfile] {
    &CATALOG
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_exactly_one_profile() {
        for key in AlgorithmKey::ALL {
            let matching = profiles().iter().filter(|p| p.key == key).count();
            assert_eq!(matching, 1, "{key} should appear once");
            assert_eq!(key.profile().key, key);
        }
    }

    #[test]
    fn factors_are_strictly_between_zero_and_one() {
        for profile in profiles() {
            assert!(profile.compression_factor > 0.0);
            assert!(profile.compression_factor < 1.0);
        }
    }

    #[test]
    fn token_lookup_is_case_insensitive() {
        assert_eq!(AlgorithmKey::from_token("RLE"), Some(AlgorithmKey::Rle));
        assert_eq!(
            AlgorithmKey::from_token("Pdf-Optimization"),
            Some(AlgorithmKey::PdfOptimization)
        );
        assert_eq!(AlgorithmKey::from_token("gzip"), None);
        assert_eq!(AlgorithmKey::from_token(""), None);
    }

    #[test]
    fn parse_from_str() {
        assert_eq!("deflate".parse::<AlgorithmKey>().unwrap(), AlgorithmKey::Deflate);
        let err = "brotli".parse::<AlgorithmKey>().unwrap_err();
        assert_eq!(err.to_string(), "unknown algorithm: brotli");
    }

    #[test]
    fn serde_uses_artifact_tokens() {
        let json = serde_json::to_string(&AlgorithmKey::PdfOptimization).unwrap();
        assert_eq!(json, "\"pdf-optimization\"");
        let key: AlgorithmKey = serde_json::from_str("\"lz77\"").unwrap();
        assert_eq!(key, AlgorithmKey::Lz77);
    }

    #[test]
    fn expansion_factor_is_inverse() {
        let deflate = AlgorithmKey::Deflate.profile();
        assert!((deflate.expansion_factor() - 2.5).abs() < 1e-9);
    }
}
