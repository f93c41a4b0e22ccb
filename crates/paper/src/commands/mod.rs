//! Command implementations for the paper CLI
//!
//! Each command module handles the CLI interface and delegates to
//! paper-content and paper-xref for the actual work.

pub mod assemble;
pub mod check;
pub mod tokens;

use anyhow::{Context, Result};
use paper_content::{ContentConfig, ContentSnapshot, load_content_dir};
use paper_xref::{Document, build_document};
use tracing::debug;

use crate::ContentArgs;

/// A loaded and assembled content directory.
pub struct Loaded {
    pub snapshot: ContentSnapshot,
    pub document: Document,
}

/// Read `_paper.yml`, apply command-line overrides, load the directory and
/// assemble the document.
pub fn load_and_assemble(args: &ContentArgs) -> Result<Loaded> {
    let mut config = ContentConfig::load(&args.dir)
        .with_context(|| format!("Failed to read configuration in {}", args.dir.display()))?;
    if let Some(toc) = &args.toc {
        config.toc = toc.clone();
    }
    if let Some(bibliography) = &args.bibliography {
        config.bibliography = bibliography.clone();
    }
    if args.no_parallel {
        config.parallel = false;
    }
    debug!(?config, "effective content configuration");

    let snapshot = load_content_dir(&args.dir, &config)
        .with_context(|| format!("Failed to load content from {}", args.dir.display()))?;
    let document = build_document(&snapshot.content, &snapshot.indices(), config.parallel);

    Ok(Loaded { snapshot, document })
}
