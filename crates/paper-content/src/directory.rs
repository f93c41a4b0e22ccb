/*
 * directory.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Loading a whole content directory into a snapshot.
 */

//! Loading a whole content directory.
//!
//! A content directory holds one JSON file per paper section plus the TOC
//! and bibliography records:
//!
//! ```text
//! content/
//!   _paper.yml          optional, see ContentConfig
//!   toc.json
//!   bibliography.json   [{key, text}] or a section record of \bibitem text
//!   introduction.json
//!   conclusion.json
//! ```
//!
//! Section files are loaded in file-name order. Only I/O failures are errors;
//! unparseable or misshapen records degrade with a warning.

use std::path::{Path, PathBuf};

use paper_error_reporting::{ContentLocation, DiagnosticMessage};
use paper_xref::snapshot::fingerprint;
use paper_xref::{ContentMap, Indices, RawBibEntry, TocEntry};
use serde_json::Value;

use crate::bibliography::{load_bibliography, parse_bibitems};
use crate::config::ContentConfig;
use crate::error::{Error, Result};
use crate::headings::derive_toc;
use crate::loaded::{Degradation, Sink};
use crate::section::load_section;
use crate::toc::{PaperMeta, load_toc};

/// Everything loaded from one content directory.
#[derive(Debug, Clone, Default)]
pub struct ContentSnapshot {
    pub toc: Vec<TocEntry>,
    /// True if `toc` was derived from the content rather than loaded.
    pub toc_derived: bool,
    pub meta: Option<PaperMeta>,
    pub bibliography: Vec<RawBibEntry>,
    pub content: ContentMap,
    pub diagnostics: Vec<DiagnosticMessage>,
}

impl ContentSnapshot {
    /// Build the lookup indices for this snapshot.
    pub fn indices(&self) -> Indices {
        Indices::build(self.toc.clone(), self.bibliography.clone())
    }

    /// Fingerprint of the index inputs, for [`paper_xref::SnapshotCache`].
    pub fn fingerprint(&self) -> u64 {
        fingerprint(&self.toc, &self.bibliography)
    }

    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Read and parse one JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| Error::json(path.display().to_string(), e))
}

/// Read a JSON record, turning a parse failure into a degradation.
///
/// Returns `Ok(None)` if the file does not exist or could not be parsed.
fn read_record(path: &Path, code: &'static str, title: &'static str, sink: &mut Sink) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    match read_json(path) {
        Ok(value) => Ok(Some(value)),
        Err(Error::Json { name, source }) => {
            sink.push(Degradation {
                code,
                title,
                problem: format!("`{}` is not valid JSON", name),
                detail: Some(source.to_string()),
                hint: None,
                location: Some(ContentLocation::file(file_stem(path))),
            });
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Section files in `dir`, sorted by name, excluding the given record files.
fn section_files(dir: &Path, excluded: &[&Path]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if path.is_file() && is_json && !excluded.contains(&path.as_path()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every record in `dir`.
pub fn load_content_dir(dir: &Path, config: &ContentConfig) -> Result<ContentSnapshot> {
    let mut sink = Sink::default();

    let toc_path = dir.join(&config.toc);
    let bibliography_path = dir.join(&config.bibliography);
    let bibitem_path = dir.join(format!("{}.json", config.bibliography_file));

    // Sections.
    let mut content = ContentMap::new();
    let excluded = [toc_path.as_path(), bibliography_path.as_path(), bibitem_path.as_path()];
    for path in section_files(dir, &excluded)? {
        let Some(value) = read_record(&path, "P-2-2", "Malformed Section", &mut sink)? else {
            continue;
        };
        let file = file_stem(&path);
        let (blocks, diagnostics) = load_section(&file, &value).into_parts();
        sink.extend(diagnostics);
        content.insert(file, blocks);
    }

    // Table of contents.
    let mut toc = Vec::new();
    let mut meta = None;
    match read_record(&toc_path, "P-1-1", "Malformed Table of Contents", &mut sink)? {
        Some(value) => {
            let (record, diagnostics) = load_toc(&value).into_parts();
            sink.extend(diagnostics);
            toc = record.entries;
            meta = record.meta;
        }
        None if !toc_path.exists() && !config.derive_toc => sink.push(Degradation {
            code: "P-1-1",
            title: "Malformed Table of Contents",
            problem: format!("No table of contents record `{}` was found", config.toc),
            detail: None,
            hint: Some("Is `toc` in `_paper.yml` pointing at the right file?"),
            location: Some(ContentLocation::file(file_stem(&toc_path))),
        }),
        None => {}
    }

    let mut toc_derived = false;
    if toc.is_empty() && config.derive_toc && !content.is_empty() {
        toc = derive_toc(&content);
        toc_derived = true;
        sink.push(Degradation {
            code: "P-1-4",
            title: "Derived Table of Contents",
            problem: "No usable table of contents; one was derived from the section content".to_string(),
            detail: Some(format!("{} entries derived", toc.len())),
            hint: None,
            location: Some(ContentLocation::file(file_stem(&toc_path))),
        });
    }

    // Bibliography.
    let mut bibliography = Vec::new();
    let record = read_record(&bibliography_path, "P-3-1", "Malformed Bibliography", &mut sink)?;
    match record {
        Some(value @ Value::Array(_)) => {
            let (entries, diagnostics) = load_bibliography(&value).into_parts();
            sink.extend(diagnostics);
            bibliography = entries;
        }
        record => {
            let bibitems = if bibitem_path == bibliography_path {
                record
            } else {
                read_record(&bibitem_path, "P-3-1", "Malformed Bibliography", &mut sink)?
            };
            if let Some(value) = bibitems {
                let (blocks, diagnostics) = load_section(&config.bibliography_file, &value).into_parts();
                sink.extend(diagnostics);
                let text: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
                bibliography = parse_bibitems(&text.join("\n"));
                if bibliography.is_empty() {
                    sink.push(Degradation {
                        code: "P-3-1",
                        title: "Malformed Bibliography",
                        problem: "The bibliography record has no entries".to_string(),
                        detail: Some(
                            "It is neither an array of entries nor text with `\\bibitem` commands"
                                .to_string(),
                        ),
                        hint: None,
                        location: Some(ContentLocation::file(config.bibliography_file.as_str())),
                    });
                }
            }
        }
    }

    tracing::info!(
        sections = content.len(),
        toc_entries = toc.len(),
        bibliography_entries = bibliography.len(),
        "loaded content directory"
    );

    let (_, diagnostics) = sink.finish(()).into_parts();
    Ok(ContentSnapshot {
        toc,
        toc_derived,
        meta,
        bibliography,
        content,
        diagnostics,
    })
}
