/*
 * bibliography.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Numbered, deduplicated bibliography index.
 */

//! Numbered, deduplicated bibliography index.
//!
//! Raw entries are deduplicated by key (the first occurrence wins) and
//! numbered `1..=N` in encounter order. Numbering depends only on the raw
//! entry order, never on where a key is cited.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::RawBibEntry;

/// A bibliography entry with its stable display number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographyEntry {
    pub key: String,
    pub number: usize,
    pub text: String,
}

impl BibliographyEntry {
    /// Anchor id of the entry in the rendered bibliography listing.
    pub fn anchor(&self) -> String {
        citation_anchor(&self.key)
    }
}

/// Anchor id for a citation key.
pub fn citation_anchor(key: &str) -> String {
    format!("citation-{}", key)
}

/// Key → entry lookup over the deduplicated, numbered bibliography.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibliographyIndex {
    entries: Vec<BibliographyEntry>,
    by_key: HashMap<String, usize>,
}

impl BibliographyIndex {
    /// Build the index. Later duplicates of a key are dropped silently.
    pub fn build<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = RawBibEntry>,
    {
        let mut index = Self::default();
        for entry in raw {
            if index.by_key.contains_key(&entry.key) {
                continue;
            }
            let number = index.entries.len() + 1;
            index.by_key.insert(entry.key.clone(), index.entries.len());
            index.entries.push(BibliographyEntry {
                key: entry.key,
                number,
                text: entry.text,
            });
        }
        index
    }

    pub fn lookup(&self, key: &str) -> Option<&BibliographyEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    /// All entries in number order.
    pub fn all(&self) -> &[BibliographyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(key: &str, text: &str) -> RawBibEntry {
        RawBibEntry::new(key, text)
    }

    #[test]
    fn test_empty_index() {
        let index = BibliographyIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.all().is_empty());
        assert!(index.lookup("anything").is_none());
    }

    #[test]
    fn test_numbers_follow_encounter_order() {
        let index = BibliographyIndex::build(vec![
            raw("Hermite1848", "C. Hermite, Lettre à Jacobi."),
            raw("Jacobi1868", "C. G. J. Jacobi, Allgemeine Theorie."),
            raw("Perron1907", "O. Perron, Grundlagen."),
        ]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup("Jacobi1868").unwrap().number, 2);
        let numbers: Vec<_> = index.all().iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_keys_first_wins() {
        let index = BibliographyIndex::build(vec![
            raw("a", "first"),
            raw("b", "second"),
            raw("a", "shadowed"),
            raw("c", "third"),
        ]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.lookup("a").unwrap().text, "first");
        assert_eq!(index.lookup("c").unwrap().number, 3);
    }

    #[test]
    fn test_anchor() {
        let index = BibliographyIndex::build(vec![raw("Hermite1848", "x")]);
        assert_eq!(
            index.lookup("Hermite1848").unwrap().anchor(),
            "citation-Hermite1848"
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let index = BibliographyIndex::build(vec![raw("Key", "x")]);
        assert!(index.lookup("key").is_none());
    }
}
