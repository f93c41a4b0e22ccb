/*
 * headings.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Heading extraction, slugs, and TOC derivation from section content.
 */

//! Heading extraction and slugs.
//!
//! Section text can contain Markdown headings (`#`, `##`, `###` at the start
//! of a line) and LaTeX sectioning commands (`\section{..}`,
//! `\subsection{..}`, `\subsubsection{..}`). [`extract_headings`] finds both
//! in document order. [`derive_toc`] builds a whole TOC from the section
//! records plus these headings, for when no usable TOC record exists.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use paper_xref::{ContentMap, TocEntry};
use regex::Regex;

use crate::toc::parse_level;

static MARKDOWN_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,3})[ \t]+(.+?)[ \t]*$").expect("valid heading regex"));

static LATEX_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\((?:sub){0,2}section)\*?\{([^}\n]+)\}").expect("valid sectioning regex")
});

/// Lowercase ASCII alphanumerics joined by single dashes.
///
/// ```
/// use paper_content::slugify;
///
/// assert_eq!(slugify("Galois Theory & Cubic Fields"), "galois-theory-cubic-fields");
/// assert_eq!(slugify("  --Intro--  "), "intro");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Hands out slugs that are unique within one TOC: `id`, `id-1`, `id-2`...
#[derive(Debug, Default)]
pub struct SlugAllocator {
    used: HashSet<String>,
}

impl SlugAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `slug` as taken without renaming it.
    pub fn reserve(&mut self, slug: &str) {
        self.used.insert(slug.to_string());
    }

    pub fn allocate(&mut self, base: &str) -> String {
        let base = if base.is_empty() { "section" } else { base };
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Headings found in `content`, in order, with slugs unique within the file.
pub fn extract_headings(file: &str, content: &str) -> Vec<TocEntry> {
    extract_headings_with(file, content, &mut SlugAllocator::new())
}

/// Like [`extract_headings`], drawing slugs from a shared allocator.
pub fn extract_headings_with(
    file: &str,
    content: &str,
    slugs: &mut SlugAllocator,
) -> Vec<TocEntry> {
    let mut found: Vec<(usize, u32, String)> = Vec::new();

    for caps in MARKDOWN_HEADING.captures_iter(content) {
        let (Some(whole), Some(hashes), Some(text)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        found.push((whole.start(), hashes.len() as u32, text.as_str().trim().to_string()));
    }

    for caps in LATEX_HEADING.captures_iter(content) {
        let (Some(whole), Some(command), Some(text)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let level = parse_level(command.as_str()).unwrap_or(1);
        found.push((whole.start(), level, text.as_str().trim().to_string()));
    }

    found.sort_by_key(|(position, _, _)| *position);

    found
        .into_iter()
        .filter(|(_, _, text)| !text.is_empty())
        .map(|(_, level, text)| {
            let slug = slugs.allocate(&slugify(&text));
            TocEntry::new(level, text, slug, file)
        })
        .collect()
}

/// Build a TOC from loaded content.
///
/// Each section record contributes an entry under its own id, followed by
/// the headings found in its text. Files and sections keep their load order.
pub fn derive_toc(content: &ContentMap) -> Vec<TocEntry> {
    let mut slugs = SlugAllocator::new();
    for blocks in content.values() {
        for block in blocks {
            slugs.reserve(&block.section_id);
        }
    }

    let mut entries = Vec::new();
    for (file, blocks) in content.iter() {
        let mut current_section: Option<&str> = None;
        for block in blocks {
            if current_section != Some(block.section_id.as_str()) {
                current_section = Some(block.section_id.as_str());
                let level = parse_level(&block.level).unwrap_or(1);
                entries.push(TocEntry::new(
                    level,
                    block.section_title.clone(),
                    block.section_id.clone(),
                    file.clone(),
                ));
            }
            entries.extend(extract_headings_with(file, &block.text, &mut slugs));
        }
    }
    entries
}
