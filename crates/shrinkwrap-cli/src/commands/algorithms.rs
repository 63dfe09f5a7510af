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

//! `algorithms`: list the catalog

use crate::context::AppContext;
use anyhow::Result;
use clap::Parser;
use console::style;
use serde::Serialize;
use shrinkwrap_core::catalog::profiles;

/// List the supported algorithms
#[derive(Parser, Debug)]
pub struct AlgorithmsCmd {
    /// Format as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct AlgorithmEntry {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    compression_factor: f64,
    expected_savings_percent: f64,
}

impl AlgorithmsCmd {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let entries: Vec<AlgorithmEntry> = profiles()
            .iter()
            .map(|profile| AlgorithmEntry {
                key: profile.key.as_str(),
                name: profile.display_name,
                description: profile.description,
                compression_factor: profile.compression_factor,
                expected_savings_percent: (1.0 - profile.compression_factor) * 100.0,
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }
        if ctx.quiet {
            return Ok(());
        }

        println!("{}", style("Algorithms:").bold());
        for entry in &entries {
            println!(
                "  {:<18} {:<22} ~{:.0}% smaller",
                style(entry.key).cyan(),
                entry.name,
                entry.expected_savings_percent
            );
            println!("  {:<18} {}", "", style(entry.description).dim());
        }
        Ok(())
    }
}
