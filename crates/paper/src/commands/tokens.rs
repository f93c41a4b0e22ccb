/*
 * tokens.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Tokens command implementation
 */

//! Tokens command implementation.
//!
//! Prints the token stream of a piece of section text, for debugging macro
//! syntax.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use paper_xref::parse;

#[derive(Debug)]
pub struct TokensArgs {
    pub input: Option<PathBuf>,
    pub pretty: bool,
}

pub fn execute(args: TokensArgs) -> Result<ExitCode> {
    let text = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    let tokens = parse(&text);
    let json = if args.pretty {
        serde_json::to_string_pretty(&tokens)
    } else {
        serde_json::to_string(&tokens)
    }
    .context("Failed to serialize tokens")?;
    println!("{}", json);

    Ok(ExitCode::SUCCESS)
}
