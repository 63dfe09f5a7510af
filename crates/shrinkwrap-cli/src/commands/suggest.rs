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

//! `suggest`: ask the advisor which algorithm fits a file

use crate::context::AppContext;
use crate::output;
use crate::progress::ProgressTracker;
use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Ask which algorithm suits a file
#[derive(Parser, Debug)]
pub struct SuggestCmd {
    /// File to get a suggestion for
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Format as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SuggestReport {
    suggestion: Option<String>,
    rationale: Option<String>,
    algorithm: Option<&'static str>,
    fallback: bool,
}

impl SuggestCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut session = ctx.session()?;
        let selection = session.open(&self.file).await?;

        if selection.classification.is_artifact {
            if let Some(notice) = &selection.notice {
                if !ctx.quiet && !self.json {
                    output::notice(notice);
                }
            }
            return self.report(ctx, &SuggestReport {
                suggestion: None,
                rationale: None,
                algorithm: session.algorithm().map(|key| key.as_str()),
                fallback: false,
            });
        }

        let spinner = ProgressTracker::new(ctx.quiet || self.json).spinner("Asking for a suggestion...");
        let notice = session.suggest().await;
        spinner.finish_and_clear();
        let notice = notice?;

        if let Some(notice) = &notice {
            if !ctx.quiet && !self.json {
                output::notice(notice);
            }
        }

        let outcome = session.suggestion();
        self.report(ctx, &SuggestReport {
            suggestion: outcome.map(|o| o.suggested_algorithm_name.clone()),
            rationale: outcome.and_then(|o| o.rationale.clone()),
            algorithm: session.algorithm().map(|key| key.as_str()),
            fallback: notice.is_some(),
        })
    }

    fn report(&self, ctx: &AppContext, report: &SuggestReport) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }
        if ctx.quiet {
            return Ok(());
        }

        if let Some(suggestion) = &report.suggestion {
            output::detail("Suggested", suggestion);
        }
        if let Some(rationale) = &report.rationale {
            output::detail("Why", rationale);
        }
        output::detail("Algorithm", report.algorithm.unwrap_or("none"));
        Ok(())
    }
}
