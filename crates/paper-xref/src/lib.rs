/*
 * lib.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Cross-reference resolution and document assembly for the paper.
 */

//! Cross-reference resolution and document assembly.
//!
//! The engine runs in four synchronous stages:
//!
//! 1. [`token::parse`] splits section text into typed tokens.
//! 2. [`BibliographyIndex`] and [`TocIndex`] are built once per content
//!    snapshot (see [`snapshot::Indices`]).
//! 3. [`resolve::resolve`] maps every token to a resolved or unresolved form.
//!    [`pipeline::resolve_content`] does this for every content file,
//!    optionally in parallel.
//! 4. [`document::assemble`] merges the resolved sections in TOC order and
//!    attaches the bibliography.
//!
//! No stage fails: unresolved references and unrecognized syntax are
//! ordinary values in the output.
//!
//! ```
//! use paper_xref::{build_document, ContentBlock, ContentMap, Indices, RawBibEntry, TocEntry};
//!
//! let indices = Indices::build(
//!     vec![TocEntry::new(2, "Introduction", "sec-intro", "introduction")],
//!     vec![RawBibEntry::new("Hermite1848", "C. Hermite, Lettre à Jacobi.")],
//! );
//! let mut content = ContentMap::new();
//! content.insert("introduction".to_string(), vec![ContentBlock {
//!     section_id: "sec-intro".to_string(),
//!     section_title: "Introduction".to_string(),
//!     level: "h2".to_string(),
//!     text: "See [cite:Hermite1848].".to_string(),
//! }]);
//!
//! let document = build_document(&content, &indices, false);
//! assert_eq!(document.sections().len(), 1);
//! assert!(document.unresolved().is_empty());
//! ```

pub mod bibliography;
pub mod document;
pub mod model;
pub mod pipeline;
pub mod resolve;
pub mod snapshot;
pub mod toc;
pub mod token;

pub use bibliography::{BibliographyEntry, BibliographyIndex};
pub use document::{Document, DocumentSection, UnresolvedKind, UnresolvedReference, assemble};
pub use model::{ContentBlock, ContentMap, RawBibEntry, TocEntry};
pub use resolve::{Marker, MarkerKind, ResolvedBlock, ResolvedToken, resolve};
pub use snapshot::{Indices, SnapshotCache};
pub use toc::{TocIndex, duplicate_slugs};
pub use token::{Token, parse, unparse};

/// Resolve every content file against `indices` and assemble the document.
pub fn build_document(content: &ContentMap, indices: &Indices, parallel: bool) -> Document {
    let resolved =
        pipeline::resolve_content(content, &indices.bibliography, &indices.toc, parallel);
    assemble(resolved, &indices.toc, &indices.bibliography)
}
