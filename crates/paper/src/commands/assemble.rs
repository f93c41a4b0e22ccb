/*
 * assemble.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Assemble command implementation
 */

//! Assemble command implementation.
//!
//! Loads a content directory, resolves every reference and writes the
//! document model as JSON:
//!
//! ```json
//! {"paper": {...}, "toc_derived": false, "document": {"sections": [...], "bibliography": [...]}}
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use paper_content::PaperMeta;
use paper_xref::Document;
use serde::Serialize;
use tracing::info;

use crate::ContentArgs;

#[derive(Debug)]
pub struct AssembleArgs {
    pub content: ContentArgs,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

#[derive(Serialize)]
struct AssembledPaper<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    paper: Option<&'a PaperMeta>,
    toc_derived: bool,
    document: &'a Document,
}

pub fn execute(args: AssembleArgs) -> Result<ExitCode> {
    let loaded = super::load_and_assemble(&args.content)?;

    let output = AssembledPaper {
        paper: loaded.snapshot.meta.as_ref(),
        toc_derived: loaded.snapshot.toc_derived,
        document: &loaded.document,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("Failed to serialize document")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                sections = loaded.document.sections().len(),
                "wrote assembled document"
            );
        }
        None => println!("{}", json),
    }

    Ok(ExitCode::SUCCESS)
}
