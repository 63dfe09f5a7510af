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

//! `compress` and `decompress`: select, advise, run, save, mail

use crate::context::AppContext;
use crate::output;
use crate::progress::{self, ProgressTracker};
use anyhow::{Context, Result};
use clap::{Args, Parser};
use shrinkwrap_core::{AlgorithmKey, Direction};
use shrinkwrap_delivery::write_download;
use shrinkwrap_session::{Notice, Session, SessionError};
use std::path::PathBuf;
use tracing::info;

/// Arguments shared by both directions
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// File to process
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory to write the result to (defaults to app.output_dir)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Mail the result to this address
    #[arg(long, value_name = "ADDR")]
    pub email: Option<String>,
}

/// Compress a file with a suggested or chosen algorithm
#[derive(Parser, Debug)]
pub struct CompressCmd {
    #[command(flatten)]
    pub args: ProcessArgs,

    /// Algorithm to use instead of asking for a suggestion
    #[arg(short, long, value_name = "KEY")]
    pub algorithm: Option<AlgorithmKey>,

    /// Use the default algorithm without asking for a suggestion
    #[arg(long, conflicts_with = "algorithm")]
    pub no_suggest: bool,
}

impl CompressCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut session = ctx.session()?;
        select(ctx, &mut session, &self.args).await?;

        if session.enabled_direction().is_none() {
            if self.algorithm.is_some() || self.no_suggest {
                session.skip_suggestion().map_err(report)?;
            } else {
                let spinner = ProgressTracker::new(ctx.quiet).spinner("Asking for a suggestion...");
                let notice = session.suggest().await;
                spinner.finish_and_clear();
                if let Some(notice) = notice.map_err(report)? {
                    show(ctx, &notice);
                }
                if let (Some(outcome), false) = (session.suggestion(), ctx.quiet) {
                    output::detail("Suggested", &outcome.suggested_algorithm_name);
                }
            }
        }
        if let Some(algorithm) = self.algorithm {
            session.override_algorithm(algorithm).map_err(report)?;
        }

        process(ctx, &mut session, &self.args, Direction::Compress).await
    }
}

/// Restore a `.shrnk` artifact
#[derive(Parser, Debug)]
pub struct DecompressCmd {
    #[command(flatten)]
    pub args: ProcessArgs,
}

impl DecompressCmd {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut session = ctx.session()?;
        select(ctx, &mut session, &self.args).await?;
        // plain files stay unarmed until asked; arm so the run reports the disabled direction
        if session.enabled_direction().is_none() {
            session.skip_suggestion().map_err(report)?;
        }
        process(ctx, &mut session, &self.args, Direction::Decompress).await
    }
}

async fn select(ctx: &AppContext, session: &mut Session, args: &ProcessArgs) -> Result<()> {
    let selection = session.open(&args.file).await.map_err(report)?;
    if let Some(notice) = &selection.notice {
        show(ctx, notice);
    }
    Ok(())
}

async fn process(
    ctx: &AppContext,
    session: &mut Session,
    args: &ProcessArgs,
    direction: Direction,
) -> Result<()> {
    if let Some(algorithm) = session.algorithm() {
        if !ctx.quiet {
            output::detail("Algorithm", algorithm.display_name());
        }
    }

    let verb = match direction {
        Direction::Compress => "Compressing",
        Direction::Decompress => "Decompressing",
    };
    let spinner = ProgressTracker::new(ctx.quiet).spinner(&format!("{}...", verb));
    let outcome = session.run(direction).await;
    spinner.finish_and_clear();

    let completed = outcome.map_err(report)?;
    let output_name = completed.output_name.clone();
    let summary = progress::summary(&completed.result);

    let out_dir = ctx.output_dir(args.out.as_deref());
    let path = write_download(&out_dir, &output_name, &completed.output.bytes)
        .await
        .with_context(|| format!("Failed to save {}", output_name))?;
    info!(path = %path.display(), "Saved processed file");

    if !ctx.quiet {
        output::success(&format!("Saved {}", path.display()));
        output::detail("Result", &summary);
    }
    show(ctx, &Notice::processed(direction, &output_name));

    if let Some(recipient) = &args.email {
        let dispatcher = ctx.dispatcher()?;
        let notice = session.send_email(&dispatcher, recipient).await;
        if notice.is_error() {
            anyhow::bail!("{}", notice);
        }
        show(ctx, &notice);
    }

    Ok(())
}

fn show(ctx: &AppContext, notice: &Notice) {
    if !ctx.quiet || notice.is_error() {
        output::notice(notice);
    }
}

/// Turn a session error into a user-facing error headed by its notice title.
///
/// Only `main` prints it.
fn report(error: SessionError) -> anyhow::Error {
    match error.notice() {
        Some(notice) => anyhow::Error::new(error).context(notice.title),
        None => anyhow::Error::new(error),
    }
}
