/*
 * lib.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Diagnostic messages for the paper content pipeline.
 */

//! Diagnostic messages for the paper content pipeline.
//!
//! Nothing in the content pipeline is allowed to fail hard on bad input. When a
//! record has the wrong shape, or a reference cannot be resolved, the pipeline
//! degrades to a default and records a [`DiagnosticMessage`] describing what
//! happened. Callers decide how to surface those messages (terminal text, JSON
//! for a build log, a placeholder in the rendered page).
//!
//! Messages follow the tidyverse structure:
//!
//! - **Title**: brief message (`.warning("Malformed Table of Contents")`)
//! - **Problem**: what went wrong (`.problem(...)`)
//! - **Details**: specific facts, max five (`.add_detail(...)`, `.add_info(...)`)
//! - **Hints**: optional guidance (`.add_hint(...)`)
//!
//! ```
//! use paper_error_reporting::DiagnosticMessageBuilder;
//!
//! let warning = DiagnosticMessageBuilder::warning("Malformed Table of Contents")
//!     .with_code("P-1-1")
//!     .problem("The TOC record must be a sequence of entries")
//!     .add_detail("Found a JSON object")
//!     .add_hint("Check the output of the TOC generator?")
//!     .build();
//!
//! assert!(warning.to_text().contains("Warning [P-1-1]"));
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_docs_url, get_error_info, get_subsystem};
pub use diagnostic::{
    ContentLocation, DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage, MessageContent,
};
