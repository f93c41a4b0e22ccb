/*
 * model.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Input record types shared by the ingestion boundary and the engine.
 */

//! Input record types.
//!
//! These are the normalized shapes the engine consumes. Loading them from
//! JSON (and degrading malformed records) is the job of `paper-content`; by
//! the time a value of one of these types exists, its shape is settled.

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// A heading record from the table of contents.
///
/// `slug` is unique within a content snapshot and is the target of
/// cross-references. `file` names the content file the heading belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u32,
    pub text: String,
    pub slug: String,
    pub file: String,
}

impl TocEntry {
    pub fn new(
        level: u32,
        text: impl Into<String>,
        slug: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            level,
            text: text.into(),
            slug: slug.into(),
            file: file.into(),
        }
    }
}

/// A bibliography record as authored: no number yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawBibEntry {
    pub key: String,
    pub text: String,
}

impl RawBibEntry {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// One semantic unit of section content: a raw string payload plus the
/// section it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub section_id: String,
    pub section_title: String,
    pub level: String,
    pub text: String,
}

/// Normalized section content keyed by content file, in load order.
///
/// Built once by the loader and only read afterwards.
pub type ContentMap = LinkedHashMap<String, Vec<ContentBlock>>;
