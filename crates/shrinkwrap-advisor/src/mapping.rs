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

//! Free-text suggestion to catalog key mapping

use shrinkwrap_core::catalog::profiles;
use shrinkwrap_core::AlgorithmKey;

/// Map a suggested algorithm name to a catalog key.
///
/// Profiles are tried in catalog order; the first one whose display name or
/// one of whose match terms occurs in the text (case-insensitively) wins.
/// Returns `None` when nothing matches.
pub fn map_to_key(suggested_name: &str) -> Option<AlgorithmKey> {
    let text = suggested_name.to_lowercase();
    if text.trim().is_empty() {
        return None;
    }

    profiles()
        .iter()
        .find(|profile| {
            text.contains(&profile.display_name.to_lowercase())
                || profile.match_terms.iter().any(|term| text.contains(term))
        })
        .map(|profile| profile.key)
}

/// Pick the key a suggestion resolves to, keeping `current` when unmapped
pub fn resolve(current: AlgorithmKey, suggested_name: &str) -> AlgorithmKey {
    map_to_key(suggested_name).unwrap_or(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_map_to_their_keys() {
        for key in AlgorithmKey::ALL {
            assert_eq!(map_to_key(key.display_name()), Some(key));
        }
    }

    #[test]
    fn free_text_is_matched_case_insensitively() {
        assert_eq!(map_to_key("I'd go with huffman"), Some(AlgorithmKey::Huffman));
        assert_eq!(map_to_key("RLE"), Some(AlgorithmKey::Rle));
        assert_eq!(map_to_key("run-length encoding"), Some(AlgorithmKey::Rle));
        assert_eq!(map_to_key("\"DEFLATE\""), Some(AlgorithmKey::Deflate));
        assert_eq!(map_to_key("lz77 (sliding window)"), Some(AlgorithmKey::Lz77));
        assert_eq!(map_to_key("pdf optimizer"), Some(AlgorithmKey::PdfOptimization));
    }

    #[test]
    fn catalog_order_breaks_ties() {
        // DEFLATE is described as LZ77 + Huffman; huffman comes first
        assert_eq!(map_to_key("DEFLATE (LZ77 + Huffman)"), Some(AlgorithmKey::Huffman));
    }

    #[test]
    fn unknown_names_do_not_match() {
        assert_eq!(map_to_key("Brotli"), None);
        assert_eq!(map_to_key(""), None);
        assert_eq!(map_to_key("   "), None);
    }

    #[test]
    fn resolve_keeps_current_selection_on_miss() {
        assert_eq!(resolve(AlgorithmKey::Lz77, "zstd"), AlgorithmKey::Lz77);
        assert_eq!(resolve(AlgorithmKey::Lz77, "DEFLATE"), AlgorithmKey::Deflate);
    }
}
