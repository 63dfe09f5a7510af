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

//! Operation metrics

use crate::Direction;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Metrics of one completed transform
///
/// Serializes as `{ direction, originalSize, processedSize, ratioPercent,
/// elapsedSeconds }` with the duration as fractional seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    /// Direction that produced this result
    pub direction: Direction,
    /// Input size in bytes
    pub original_size: u64,
    /// Output size in bytes
    pub processed_size: u64,
    /// Space saved as a percentage (compression only)
    pub ratio_percent: Option<f64>,
    /// Wall-clock duration of the operation
    #[serde(rename = "elapsedSeconds", with = "seconds")]
    pub elapsed: Duration,
}

mod seconds {
    use super::*;

    pub fn serialize<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(elapsed.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

impl OperationResult {
    /// Result of a compression with the given factor.
    ///
    /// The ratio is `(original - processed) / original * 100`, which for an
    /// estimate of `original * factor` is `(1 - factor) * 100`. Empty inputs
    /// report a ratio of zero.
    pub fn compressed(original_size: u64, processed_size: u64, factor: f64, elapsed: Duration) -> Self {
        let ratio = if original_size == 0 {
            0.0
        } else {
            (1.0 - factor) * 100.0
        };
        OperationResult {
            direction: Direction::Compress,
            original_size,
            processed_size,
            ratio_percent: Some(ratio),
            elapsed,
        }
    }

    /// Result of a decompression. No ratio is reported.
    pub fn decompressed(original_size: u64, processed_size: u64, elapsed: Duration) -> Self {
        OperationResult {
            direction: Direction::Decompress,
            original_size,
            processed_size,
            ratio_percent: None,
            elapsed,
        }
    }

    /// Elapsed time in seconds with sub-second precision
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn compression_ratio_follows_factor() {
        let result = OperationResult::compressed(1_000_000, 600_000, 0.6, Duration::from_millis(1500));
        assert_eq!(result.direction, Direction::Compress);
        let ratio = result.ratio_percent.unwrap_or_default();
        assert!((ratio - 40.0).abs() < 1e-9);
        assert!((result.elapsed_seconds() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn empty_input_has_zero_ratio() {
        let result = OperationResult::compressed(0, 0, 0.45, Duration::ZERO);
        assert_eq!(result.ratio_percent, Some(0.0));
    }

    #[test]
    fn serializes_elapsed_as_seconds() {
        let result = OperationResult::compressed(1000, 600, 0.6, Duration::from_millis(1250));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["direction"], "compress");
        assert_eq!(json["originalSize"], 1000);
        assert_eq!(json["processedSize"], 600);
        assert_eq!(json["elapsedSeconds"], 1.25);
        assert!(json.get("elapsed").is_none());

        let back: OperationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.elapsed, Duration::from_millis(1250));
    }

    #[test]
    fn decompression_has_no_ratio() {
        let result = OperationResult::decompressed(400_000, 1_000_000, Duration::ZERO);
        assert_eq!(result.ratio_percent, None);
    }
}
