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

//! `inspect`: classify a file without processing it

use crate::context::AppContext;
use crate::output;
use crate::progress::format_bytes;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use shrinkwrap_core::classifier::mime_for;
use shrinkwrap_core::{classify, naming, Direction};
use std::path::PathBuf;

/// Classify a file and show what ShrinkWrap would do with it
#[derive(Parser, Debug)]
pub struct InspectCmd {
    /// File to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Format as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    name: &'a str,
    size: u64,
    mime: &'static str,
    file_type: &'static str,
    is_artifact: bool,
    detected_algorithm: Option<&'static str>,
    available: &'static str,
    output_name: Option<String>,
}

impl InspectCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let name = super::file_name_of(&self.file)?;
        let metadata = tokio::fs::metadata(&self.file)
            .await
            .with_context(|| format!("Cannot read {}", self.file.display()))?;

        let classification = classify(name);
        let available = if classification.is_artifact {
            Direction::Decompress
        } else {
            Direction::Compress
        };
        let output_name = classification
            .detected_algorithm
            .map(|key| naming::encode(name, key, Direction::Decompress));

        let report = InspectReport {
            name,
            size: metadata.len(),
            mime: mime_for(name),
            file_type: classification.coarse_type.as_str(),
            is_artifact: classification.is_artifact,
            detected_algorithm: classification.detected_algorithm.map(|key| key.as_str()),
            available: available.as_str(),
            output_name,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }
        if ctx.quiet {
            return Ok(());
        }

        output::header(&format!("Inspecting {}", report.name));
        output::detail("Size", &format_bytes(report.size));
        output::detail("MIME type", report.mime);
        output::detail("File type", report.file_type);
        match classification.detected_algorithm {
            Some(key) => {
                output::detail("Compressed with", key.display_name());
                if let Some(original) = &report.output_name {
                    output::detail("Restores to", original);
                }
            }
            None => output::detail("Compressed with", "none"),
        }
        output::detail("Available", report.available);
        Ok(())
    }
}
