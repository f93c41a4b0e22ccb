/*
 * document.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * The assembled, render-ready document model.
 */

//! The assembled, render-ready document model.
//!
//! A [`Document`] is built once by [`assemble`] and then only read. Sections
//! follow the order of files in the table of contents; content files the TOC
//! does not mention are kept and placed after them, in content order.

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::bibliography::{BibliographyEntry, BibliographyIndex};
use crate::model::TocEntry;
use crate::pipeline::ResolvedContent;
use crate::resolve::{ResolvedBlock, ResolvedToken};
use crate::toc::TocIndex;

/// One content file in the assembled document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub file: String,
    /// TOC entries of this file, in TOC order. Empty for files the TOC does
    /// not mention.
    pub entries: Vec<TocEntry>,
    pub blocks: Vec<ResolvedBlock>,
}

/// The complete paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    sections: Vec<DocumentSection>,
    bibliography: Vec<BibliographyEntry>,
}

/// Previous and next file around a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a str>,
    pub next: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedKind {
    Citation,
    CrossRef,
}

/// An unresolved reference and where it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedReference {
    pub file: String,
    pub section_id: String,
    pub kind: UnresolvedKind,
    pub identifier: String,
}

/// Merge resolved content with the TOC grouping and the bibliography.
///
/// Every file in the TOC gets a section, with an empty block list if no
/// content was loaded for it. The full bibliography listing is always
/// included.
pub fn assemble(resolved: ResolvedContent, toc: &TocIndex, bib: &BibliographyIndex) -> Document {
    let mut by_file: LinkedHashMap<String, Vec<ResolvedBlock>> = resolved.into_iter().collect();

    let mut sections: Vec<DocumentSection> = toc
        .group_by_file()
        .into_iter()
        .map(|(file, entries)| {
            let blocks = by_file.remove(&file).unwrap_or_default();
            DocumentSection {
                file,
                entries,
                blocks,
            }
        })
        .collect();

    sections.extend(by_file.into_iter().map(|(file, blocks)| DocumentSection {
        file,
        entries: Vec::new(),
        blocks,
    }));

    Document {
        sections,
        bibliography: bib.all().to_vec(),
    }
}

impl Document {
    pub fn sections(&self) -> &[DocumentSection] {
        &self.sections
    }

    pub fn bibliography(&self) -> &[BibliographyEntry] {
        &self.bibliography
    }

    /// File names in document order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.file.as_str())
    }

    pub fn section(&self, file: &str) -> Option<&DocumentSection> {
        self.sections.iter().find(|s| s.file == file)
    }

    /// Blocks of `section_id` within `file`.
    ///
    /// An unknown section id falls back to the blocks of the file's first
    /// section. Returns an empty list only when the file has no blocks.
    pub fn find_block(&self, file: &str, section_id: &str) -> Vec<&ResolvedBlock> {
        let Some(section) = self.section(file) else {
            return Vec::new();
        };
        let matching: Vec<&ResolvedBlock> = section
            .blocks
            .iter()
            .filter(|b| b.section_id == section_id)
            .collect();
        if !matching.is_empty() {
            return matching;
        }
        let Some(first) = section.blocks.first() else {
            return Vec::new();
        };
        section
            .blocks
            .iter()
            .filter(|b| b.section_id == first.section_id)
            .collect()
    }

    /// The files before and after `file` in document order.
    pub fn neighbors(&self, file: &str) -> Option<Neighbors<'_>> {
        let position = self.sections.iter().position(|s| s.file == file)?;
        Some(Neighbors {
            previous: position
                .checked_sub(1)
                .map(|i| self.sections[i].file.as_str()),
            next: self.sections.get(position + 1).map(|s| s.file.as_str()),
        })
    }

    /// Every unresolved reference, in document order.
    pub fn unresolved(&self) -> Vec<UnresolvedReference> {
        let mut found = Vec::new();
        for section in &self.sections {
            for block in &section.blocks {
                for token in &block.tokens {
                    let (kind, identifier) = match token {
                        ResolvedToken::UnresolvedCitation { key } => (UnresolvedKind::Citation, key),
                        ResolvedToken::UnresolvedCrossRef { target_id } => {
                            (UnresolvedKind::CrossRef, target_id)
                        }
                        _ => continue,
                    };
                    found.push(UnresolvedReference {
                        file: section.file.clone(),
                        section_id: block.section_id.clone(),
                        kind,
                        identifier: identifier.clone(),
                    });
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentBlock, ContentMap, RawBibEntry};
    use crate::pipeline::resolve_content;

    fn block(id: &str, text: &str) -> ContentBlock {
        ContentBlock {
            section_id: id.to_string(),
            section_title: id.to_string(),
            level: "h2".to_string(),
            text: text.to_string(),
        }
    }

    fn fixture() -> Document {
        let toc = TocIndex::build(vec![
            TocEntry::new(1, "Introduction", "sec-intro", "introduction"),
            TocEntry::new(1, "Methods", "sec-methods", "methods"),
            TocEntry::new(2, "Background", "sec-background", "introduction"),
            TocEntry::new(1, "Results", "sec-results", "results"),
        ]);
        let bib = BibliographyIndex::build(vec![RawBibEntry::new("Hermite1848", "C. Hermite")]);

        let mut content = ContentMap::new();
        content.insert(
            "methods".to_string(),
            vec![block("sec-methods", "As in [ref:sec-intro] [cite:Missing].")],
        );
        content.insert(
            "introduction".to_string(),
            vec![
                block("sec-intro", "Hello [cite:Hermite1848]."),
                block("sec-intro", "More."),
                block("sec-background", "[ref:sec-nowhere]"),
            ],
        );
        content.insert("appendix".to_string(), vec![block("app", "Extra.")]);

        let resolved = resolve_content(&content, &bib, &toc, false);
        assemble(resolved, &toc, &bib)
    }

    #[test]
    fn test_sections_follow_toc_order() {
        let doc = fixture();
        let files: Vec<&str> = doc.files().collect();
        assert_eq!(files, vec!["introduction", "methods", "results", "appendix"]);
    }

    #[test]
    fn test_toc_file_without_content_is_empty() {
        let doc = fixture();
        let results = doc.section("results").unwrap();
        assert!(results.blocks.is_empty());
        assert_eq!(results.entries.len(), 1);
    }

    #[test]
    fn test_orphan_content_has_no_entries() {
        let doc = fixture();
        let appendix = doc.section("appendix").unwrap();
        assert!(appendix.entries.is_empty());
        assert_eq!(appendix.blocks.len(), 1);
    }

    #[test]
    fn test_entries_grouped_per_file() {
        let doc = fixture();
        let slugs: Vec<&str> = doc
            .section("introduction")
            .unwrap()
            .entries
            .iter()
            .map(|e| e.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["sec-intro", "sec-background"]);
    }

    #[test]
    fn test_bibliography_always_included() {
        let doc = fixture();
        assert_eq!(doc.bibliography().len(), 1);
        assert_eq!(doc.bibliography()[0].number, 1);

        let empty = assemble(Vec::new(), &TocIndex::default(), &BibliographyIndex::default());
        assert!(empty.sections().is_empty());
        assert!(empty.bibliography().is_empty());
    }

    #[test]
    fn test_find_block() {
        let doc = fixture();
        assert_eq!(doc.find_block("introduction", "sec-intro").len(), 2);
        assert_eq!(doc.find_block("introduction", "sec-background").len(), 1);

        let fallback = doc.find_block("introduction", "no-such-section");
        assert_eq!(fallback.len(), 2);
        assert_eq!(fallback[0].section_id, "sec-intro");

        assert!(doc.find_block("results", "sec-results").is_empty());
        assert!(doc.find_block("nope", "x").is_empty());
    }

    #[test]
    fn test_neighbors() {
        let doc = fixture();
        let n = doc.neighbors("introduction").unwrap();
        assert_eq!(n.previous, None);
        assert_eq!(n.next, Some("methods"));

        let n = doc.neighbors("appendix").unwrap();
        assert_eq!(n.previous, Some("results"));
        assert_eq!(n.next, None);

        assert!(doc.neighbors("nope").is_none());
    }

    #[test]
    fn test_unresolved_listing() {
        let doc = fixture();
        let unresolved = doc.unresolved();
        assert_eq!(
            unresolved,
            vec![
                UnresolvedReference {
                    file: "introduction".to_string(),
                    section_id: "sec-background".to_string(),
                    kind: UnresolvedKind::CrossRef,
                    identifier: "sec-nowhere".to_string(),
                },
                UnresolvedReference {
                    file: "methods".to_string(),
                    section_id: "sec-methods".to_string(),
                    kind: UnresolvedKind::Citation,
                    identifier: "Missing".to_string(),
                },
            ]
        );
    }
}
