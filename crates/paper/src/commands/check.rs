/*
 * check.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Check command implementation
 */

//! Check command implementation.
//!
//! Prints every degraded record and unresolved reference as a diagnostic.
//! Exits with status 1 if there is anything to report, unless
//! `--allow-unresolved` is given, in which case only degraded records fail
//! the check.

use std::process::ExitCode;

use anyhow::Result;
use paper_content::unresolved_diagnostics;

use crate::ContentArgs;

#[derive(Debug)]
pub struct CheckArgs {
    pub content: ContentArgs,
    pub allow_unresolved: bool,
    pub json: bool,
}

pub fn execute(args: CheckArgs) -> Result<ExitCode> {
    let loaded = super::load_and_assemble(&args.content)?;

    let degraded = &loaded.snapshot.diagnostics;
    let unresolved = unresolved_diagnostics(&loaded.document);

    if args.json {
        let all: Vec<serde_json::Value> = degraded
            .iter()
            .chain(unresolved.iter())
            .map(|d| d.to_json())
            .collect();
        println!("{}", serde_json::Value::Array(all));
    } else {
        for diagnostic in degraded.iter().chain(unresolved.iter()) {
            println!("{}\n", diagnostic.to_text());
        }
        println!(
            "{} sections, {} bibliography entries, {} degraded records, {} unresolved references",
            loaded.document.sections().len(),
            loaded.document.bibliography().len(),
            degraded.len(),
            unresolved.len()
        );
    }

    let failed = !degraded.is_empty() || (!unresolved.is_empty() && !args.allow_unresolved);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
