/*
 * main.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Paper CLI entry point.
 */

//! Paper CLI - Main entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "paper")]
#[command(version)]
#[command(about = "Assemble and check the paper's cross-referenced content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that loads a content directory.
#[derive(Args, Debug, Clone)]
pub struct ContentArgs {
    /// Content directory holding the section, TOC and bibliography records
    pub dir: PathBuf,

    /// TOC record file name (overrides `_paper.yml`)
    #[arg(long)]
    pub toc: Option<String>,

    /// Bibliography record file name (overrides `_paper.yml`)
    #[arg(long)]
    pub bibliography: Option<String>,

    /// Resolve sections on a single thread
    #[arg(long)]
    pub no_parallel: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the document and print it as JSON
    Assemble {
        #[command(flatten)]
        content: ContentArgs,

        /// Write output to FILE instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Report degraded records and unresolved references
    Check {
        #[command(flatten)]
        content: ContentArgs,

        /// Exit successfully even if references are unresolved
        #[arg(long)]
        allow_unresolved: bool,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the token stream of a text file (or stdin)
    Tokens {
        /// Input file; reads stdin when omitted or `-`
        input: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Assemble {
            content,
            output,
            pretty,
        } => commands::assemble::execute(commands::assemble::AssembleArgs {
            content,
            output,
            pretty,
        }),
        Commands::Check {
            content,
            allow_unresolved,
            json,
        } => commands::check::execute(commands::check::CheckArgs {
            content,
            allow_unresolved,
            json,
        }),
        Commands::Tokens { input, pretty } => {
            commands::tokens::execute(commands::tokens::TokensArgs { input, pretty })
        }
    }
}
