/*
 * lib.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Loading and normalization of paper content records.
 */

//! Loading and normalization of paper content records.
//!
//! This crate is the boundary between JSON on disk and the typed records the
//! `paper-xref` engine consumes. Every loader takes a parsed
//! [`serde_json::Value`] and returns a [`Loaded`] value: records with the wrong
//! shape are dropped or replaced with an empty default, and each such
//! degradation is reported as a coded warning
//! ([`paper_error_reporting::DiagnosticMessage`]) and logged with `tracing`.
//!
//! [`load_content_dir`] ties the loaders together for a content directory.

pub mod bibliography;
pub mod config;
pub mod directory;
pub mod error;
pub mod headings;
pub mod loaded;
pub mod report;
pub mod section;
pub mod toc;

pub use bibliography::{load_bibliography, parse_bibitems};
pub use config::{CONFIG_FILE, ContentConfig};
pub use directory::{ContentSnapshot, load_content_dir, read_json};
pub use error::{Error, Result};
pub use headings::{SlugAllocator, derive_toc, extract_headings, slugify};
pub use loaded::Loaded;
pub use report::{unresolved_diagnostic, unresolved_diagnostics};
pub use section::{SectionContent, load_section};
pub use toc::{PaperMeta, TocRecord, load_toc, parse_level};
