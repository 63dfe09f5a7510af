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

//! Core pipeline for ShrinkWrap
//!
//! This crate provides the decision logic shared by every ShrinkWrap surface:
//! - **Algorithm catalog**: the closed set of supported algorithms and their
//!   simulated size factors
//! - **File classification**: artifact detection and coarse type mapping
//! - **Artifact naming**: `<name>.<algorithm>.shrnk` encoding and decoding
//! - **Transform simulation**: size estimation and payload truncation/repetition
//!
//! # Quick Start
//!
//! ```rust
//! use shrinkwrap_core::{
//!     classify, naming, AlgorithmKey, DataUrl, Direction, SimulatorSettings, TransformSimulator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let classification = classify("photo.png");
//!     assert!(!classification.is_artifact);
//!
//!     let payload = DataUrl::from_bytes("image/png", &[0u8; 1000]);
//!     let simulator = TransformSimulator::new(SimulatorSettings::instant());
//!     let output = simulator
//!         .run(&payload, AlgorithmKey::Rle, Direction::Compress)
//!         .await?;
//!
//!     assert_eq!(output.result.processed_size, 600);
//!     assert_eq!(
//!         naming::encode("photo.png", AlgorithmKey::Rle, Direction::Compress),
//!         "photo.png.rle.shrnk"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! # Simulation
//!
//! No real entropy coding happens here. Sizes are estimated from each
//! algorithm's fixed compression factor and the payload body is truncated or
//! repeated to match. The byte transform sits behind the [`Transformer`]
//! trait so a real codec can replace [`SimulatedCodec`] without touching
//! naming, classification or orchestration.

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod metrics;
pub mod naming;
pub mod payload;
pub mod record;
pub mod simulator;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use catalog::{AlgorithmKey, AlgorithmProfile};
pub use classifier::{classify, Classification, CoarseType};
pub use error::{ShrinkError, ShrinkResult};
pub use metrics::OperationResult;
pub use payload::DataUrl;
pub use record::FileRecord;
pub use simulator::{SimulatedCodec, SimulatorSettings, TransformOutput, TransformSimulator, Transformer};

/// File extension shared by every artifact ShrinkWrap produces
pub const ARTIFACT_EXTENSION: &str = "shrnk";

/// Maximum multiplier applied when estimating a decompressed size
pub const DEFAULT_EXPANSION_CAP: f64 = 5.0;

/// Direction of a transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Shrink the payload
    Compress,
    /// Re-expand a previously produced artifact
    Decompress,
}

impl Direction {
    /// Lowercase name used in logs and user-facing messages
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Compress => "compression",
            Direction::Decompress => "decompression",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Compress.to_string(), "compression");
        assert_eq!(Direction::Decompress.to_string(), "decompression");
    }

    #[test]
    fn direction_serde_is_lowercase() {
        let json = serde_json::to_string(&Direction::Decompress).unwrap();
        assert_eq!(json, "\"decompress\"");
    }
}
