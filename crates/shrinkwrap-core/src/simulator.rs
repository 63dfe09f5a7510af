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

//! Transform simulation
//!
//! [`TransformSimulator`] wraps a [`Transformer`] with simulated latency and
//! timing. The default transformer, [`SimulatedCodec`], estimates sizes from
//! the catalog factors:
//!
//! - compression keeps a prefix of `round(len * factor)` bytes
//! - decompression repeats the input whole times plus a final partial copy
//!   until it reaches `round(len * min(1 / factor, cap))` bytes
//!
//! The data-URL header is carried over untouched; only the body changes.

use crate::catalog::AlgorithmKey;
use crate::error::ShrinkResult;
use crate::metrics::OperationResult;
use crate::payload::DataUrl;
use crate::{Direction, DEFAULT_EXPANSION_CAP};
use bytes::Bytes;
use rand::Rng;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Byte-level transform behind the simulator.
///
/// Implement this to substitute a real codec for [`SimulatedCodec`].
pub trait Transformer: Send + Sync + Debug {
    /// Transform raw bytes in the given direction
    ///
    /// # Errors
    ///
    /// Returns `ShrinkError` if the input cannot be transformed
    fn transform(&self, input: &[u8], algorithm: AlgorithmKey, direction: Direction)
        -> ShrinkResult<Vec<u8>>;

    /// Compression factor to report instead of the measured one.
    ///
    /// Estimating transformers return the catalog factor so the reported
    /// ratio is exact; real codecs keep the default and report measured sizes.
    fn nominal_factor(&self, _algorithm: AlgorithmKey) -> Option<f64> {
        None
    }
}

/// Fixed-ratio transform that truncates or repeats its input
#[derive(Debug, Clone, Copy)]
pub struct SimulatedCodec {
    expansion_cap: f64,
}

impl SimulatedCodec {
    /// Create a codec with the given decompression ceiling
    pub fn new(expansion_cap: f64) -> Self {
        SimulatedCodec { expansion_cap }
    }

    /// Multiplier applied on decompression
    pub fn expansion_multiplier(&self, algorithm: AlgorithmKey) -> f64 {
        algorithm.profile().expansion_factor().min(self.expansion_cap)
    }

    /// Estimated compressed size
    pub fn compressed_size(&self, original: u64, algorithm: AlgorithmKey) -> u64 {
        let estimate = (original as f64 * algorithm.profile().compression_factor).round() as u64;
        estimate.min(original)
    }

    /// Estimated decompressed size, bounded by the expansion cap
    pub fn decompressed_size(&self, original: u64, algorithm: AlgorithmKey) -> u64 {
        (original as f64 * self.expansion_multiplier(algorithm)).round() as u64
    }
}

impl Default for SimulatedCodec {
    fn default() -> Self {
        SimulatedCodec::new(DEFAULT_EXPANSION_CAP)
    }
}

impl Transformer for SimulatedCodec {
    fn transform(
        &self,
        input: &[u8],
        algorithm: AlgorithmKey,
        direction: Direction,
    ) -> ShrinkResult<Vec<u8>> {
        match direction {
            Direction::Compress => {
                let keep = self.compressed_size(input.len() as u64, algorithm) as usize;
                Ok(input[..keep].to_vec())
            }
            Direction::Decompress => {
                if input.is_empty() {
                    return Ok(Vec::new());
                }
                let target = self.decompressed_size(input.len() as u64, algorithm) as usize;
                let mut output = Vec::with_capacity(target);
                while output.len() + input.len() <= target {
                    output.extend_from_slice(input);
                }
                let remaining = target - output.len();
                output.extend_from_slice(&input[..remaining]);
                Ok(output)
            }
        }
    }

    fn nominal_factor(&self, algorithm: AlgorithmKey) -> Option<f64> {
        Some(algorithm.profile().compression_factor)
    }
}

/// Timing and sizing knobs for the simulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorSettings {
    /// Fixed delay before every transform
    pub latency: Duration,
    /// Upper bound of the random delay added to `latency`
    pub jitter: Duration,
    /// Maximum decompression multiplier
    pub expansion_cap: f64,
}

impl SimulatorSettings {
    /// Settings without any artificial delay
    pub fn instant() -> Self {
        SimulatorSettings {
            latency: Duration::ZERO,
            jitter: Duration::ZERO,
            ..Self::default()
        }
    }

    fn delay(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.latency;
        }
        self.latency + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        SimulatorSettings {
            latency: Duration::from_millis(1500),
            jitter: Duration::from_millis(500),
            expansion_cap: DEFAULT_EXPANSION_CAP,
        }
    }
}

/// Output of one simulated run
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// Transformed payload with the original header
    pub payload: DataUrl,
    /// Transformed raw bytes
    pub bytes: Bytes,
    /// Metrics of the run
    pub result: OperationResult,
}

/// Runs transforms with simulated latency and reports metrics
#[derive(Debug, Clone)]
pub struct TransformSimulator {
    settings: SimulatorSettings,
    transformer: Arc<dyn Transformer>,
}

impl TransformSimulator {
    /// Create a simulator backed by [`SimulatedCodec`]
    pub fn new(settings: SimulatorSettings) -> Self {
        let codec = SimulatedCodec::new(settings.expansion_cap);
        Self::with_transformer(settings, Arc::new(codec))
    }

    /// Create a simulator backed by a custom transformer
    pub fn with_transformer(settings: SimulatorSettings, transformer: Arc<dyn Transformer>) -> Self {
        TransformSimulator {
            settings,
            transformer,
        }
    }

    /// Settings in use
    pub fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }

    /// Run a transform over a parsed payload.
    ///
    /// # Errors
    ///
    /// Returns `ShrinkError::FormatError` if the body is not valid base64, or
    /// any error raised by the transformer. No partial output is returned.
    #[instrument(skip(self, payload), fields(mime = payload.mime()))]
    pub async fn run(
        &self,
        payload: &DataUrl,
        algorithm: AlgorithmKey,
        direction: Direction,
    ) -> ShrinkResult<TransformOutput> {
        let started = Instant::now();

        let delay = self.settings.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let input = payload.decode_body()?;
        let output = self.transformer.transform(&input, algorithm, direction)?;

        let original_size = input.len() as u64;
        let processed_size = output.len() as u64;
        let elapsed = started.elapsed();

        let result = match direction {
            Direction::Compress => {
                let factor = self.transformer.nominal_factor(algorithm).unwrap_or_else(|| {
                    if original_size == 0 {
                        1.0
                    } else {
                        processed_size as f64 / original_size as f64
                    }
                });
                OperationResult::compressed(original_size, processed_size, factor, elapsed)
            }
            Direction::Decompress => {
                OperationResult::decompressed(original_size, processed_size, elapsed)
            }
        };

        debug!(
            original = original_size,
            processed = processed_size,
            elapsed_ms = elapsed.as_millis() as u64,
            "Simulated {}",
            direction
        );

        Ok(TransformOutput {
            payload: payload.with_body_bytes(&output),
            bytes: Bytes::from(output),
            result,
        })
    }

    /// Parse data-URL text and run a transform over it
    ///
    /// # Errors
    ///
    /// Returns `ShrinkError::FormatError` if the text is not a base64 data URL.
    pub async fn run_text(
        &self,
        text: &str,
        algorithm: AlgorithmKey,
        direction: Direction,
    ) -> ShrinkResult<TransformOutput> {
        let payload = DataUrl::parse(text)?;
        self.run(&payload, algorithm, direction).await
    }
}
