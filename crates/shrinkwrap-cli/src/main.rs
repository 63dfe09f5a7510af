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

//! ShrinkWrap command-line interface
//!
//! Classifies a file, asks for an algorithm suggestion, simulates the
//! transform and saves or mails the result.

mod commands;
mod context;
mod output;
mod progress;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use commands::*;
use context::AppContext;
use shrinkwrap_config::Config;
use shrinkwrap_observability::{init_tracing_with_config, LogConfig, LogFormat};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shrinkwrap")]
#[command(version, about = "Pick a compression algorithm and simulate the result")]
#[command(
    long_about = "ShrinkWrap classifies a file, suggests a compression algorithm for it,
simulates compressing or restoring it, and saves or mails the result."
)]
#[command(propagate_version = true)]
#[command(author = "ShrinkWrap Contributors")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Colored output (always|auto|never)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Configuration file (toml, yaml or json)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a file
    Inspect(InspectCmd),

    /// Suggest an algorithm for a file
    Suggest(SuggestCmd),

    /// Compress a file
    Compress(CompressCmd),

    /// Restore a compressed artifact
    Decompress(DecompressCmd),

    /// List supported algorithms
    Algorithms(AlgorithmsCmd),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle color output
    match cli.color.as_str() {
        "never" => console::set_colors_enabled(false),
        "always" => console::set_colors_enabled(true),
        "auto" => {}
        _ => {
            output::error(&format!("Invalid color option: {}", cli.color));
            std::process::exit(1);
        }
    }

    let result = run(cli).await;

    if let Err(e) = result {
        output::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppContext::load_config(cli.config.as_deref()).await?;
    init_logging(&config, cli.verbose, cli.quiet)?;
    let ctx = AppContext::new(config, cli.quiet);

    match cli.command {
        Commands::Inspect(cmd) => cmd.execute(&ctx).await,
        Commands::Suggest(cmd) => cmd.execute(&ctx).await,
        Commands::Compress(cmd) => cmd.execute(&ctx).await,
        Commands::Decompress(cmd) => cmd.execute(&ctx).await,
        Commands::Algorithms(cmd) => cmd.execute(&ctx),
        Commands::Version => {
            print_version();
            Ok(())
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

fn init_logging(config: &Config, verbose: bool, quiet: bool) -> Result<()> {
    let format: LogFormat = config
        .observability
        .log_format
        .parse()
        .context("Invalid observability.log_format")?;

    let mut log_config = LogConfig::for_verbosity(verbose, quiet)
        .with_format(format)
        .with_color(console::colors_enabled_stderr());
    if let Some(level) = &config.observability.log_level {
        log_config = log_config.with_default_level(level.as_str());
    }

    // A subscriber may already be installed when embedded; keep it
    if let Err(e) = init_tracing_with_config(log_config) {
        if !matches!(e, shrinkwrap_observability::LogError::AlreadyInitialized(_)) {
            return Err(e).context("Failed to initialize logging");
        }
    }
    Ok(())
}

fn print_version() {
    println!("shrinkwrap {}", env!("CARGO_PKG_VERSION"));
    println!("rust-version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("license: {}", env!("CARGO_PKG_LICENSE"));
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "shrinkwrap", &mut io::stdout());
}
