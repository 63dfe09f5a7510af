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

//! Spinners and result summaries

use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressFinish, ProgressStyle};
use shrinkwrap_core::{Direction, OperationResult};
use std::sync::Arc;
use std::time::Duration;

/// Spinners for the slow steps (suggestion, simulated transform)
pub struct ProgressTracker {
    multi: Arc<MultiProgress>,
    quiet: bool,
}

impl ProgressTracker {
    /// Create new progress tracker
    /// Uses stderr for progress output to keep stdout clean for piping
    pub fn new(quiet: bool) -> Self {
        Self {
            multi: Arc::new(if quiet {
                MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
            } else {
                MultiProgress::with_draw_target(ProgressDrawTarget::stderr())
            }),
            quiet,
        }
    }

    /// Create spinner for indeterminate operations
    /// Auto-clears on completion for clean output
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = self
            .multi
            .add(ProgressBar::new_spinner().with_finish(ProgressFinish::AndClear));
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Format a byte count, e.g. `585.94 KiB`
pub fn format_bytes(bytes: u64) -> String {
    format!("{}", HumanBytes(bytes))
}

/// One-line summary of a run
pub fn summary(result: &OperationResult) -> String {
    let mut parts = vec![format!(
        "{} → {}",
        format_bytes(result.original_size),
        format_bytes(result.processed_size)
    )];

    match (result.direction, result.ratio_percent) {
        (Direction::Compress, Some(ratio)) => {
            parts.push(format!("{:.2}% smaller", ratio));
        }
        (Direction::Decompress, _) if result.original_size > 0 => {
            let growth = result.processed_size as f64 / result.original_size as f64;
            parts.push(format!("{:.2}x larger", growth));
        }
        _ => {}
    }

    parts.push(format!("in {:.2}s", result.elapsed_seconds()));
    parts.join(", ")
}
