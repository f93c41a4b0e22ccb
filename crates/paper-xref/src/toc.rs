/*
 * toc.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Slug lookup and per-file grouping over the table of contents.
 */

//! Slug lookup and per-file grouping over the table of contents.

use std::collections::HashMap;

use hashlink::LinkedHashMap;

use crate::model::TocEntry;

/// Index over the TOC entries of one content snapshot.
///
/// Entry order is preserved exactly as given. Slugs are expected to be
/// unique; if they are not, [`TocIndex::lookup`] answers with the first entry
/// carrying the slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocIndex {
    entries: Vec<TocEntry>,
    by_slug: HashMap<String, usize>,
}

/// Slugs that appear on more than one of `entries`, in first-seen order.
pub fn duplicate_slugs(entries: &[TocEntry]) -> Vec<&str> {
    let mut seen: LinkedHashMap<&str, usize> = LinkedHashMap::new();
    for entry in entries {
        match seen.get_mut(entry.slug.as_str()) {
            Some(count) => *count += 1,
            None => {
                seen.insert(entry.slug.as_str(), 1);
            }
        }
    }
    seen.into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slug, _)| slug)
        .collect()
}

impl TocIndex {
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = TocEntry>,
    {
        let entries: Vec<TocEntry> = entries.into_iter().collect();
        let mut by_slug = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_slug.entry(entry.slug.clone()).or_insert(i);
        }
        Self { entries, by_slug }
    }

    pub fn lookup(&self, slug: &str) -> Option<&TocEntry> {
        self.by_slug.get(slug).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slugs that appear on more than one entry, in first-seen order.
    pub fn duplicate_slugs(&self) -> Vec<&str> {
        duplicate_slugs(&self.entries)
    }

    /// Partition the entries by `file`.
    ///
    /// Files appear in the order of their first entry; entries keep their
    /// original relative order within each file. Concatenating the groups'
    /// entries yields the input as a multiset.
    pub fn group_by_file(&self) -> Vec<(String, Vec<TocEntry>)> {
        let mut groups: LinkedHashMap<String, Vec<TocEntry>> = LinkedHashMap::new();
        for entry in &self.entries {
            match groups.get_mut(&entry.file) {
                Some(group) => group.push(entry.clone()),
                None => {
                    groups.insert(entry.file.clone(), vec![entry.clone()]);
                }
            }
        }
        groups.into_iter().collect()
    }

    /// Content files in TOC order, without repeats.
    pub fn files(&self) -> Vec<String> {
        self.group_by_file().into_iter().map(|(file, _)| file).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(slug: &str, file: &str) -> TocEntry {
        TocEntry::new(2, slug.to_uppercase(), slug, file)
    }

    #[test]
    fn test_group_by_file_interleaved() {
        let s1 = entry("s1", "a");
        let s2 = entry("s2", "b");
        let s3 = entry("s3", "a");
        let index = TocIndex::build(vec![s1.clone(), s2.clone(), s3.clone()]);

        let groups = index.group_by_file();
        assert_eq!(
            groups,
            vec![
                ("a".to_string(), vec![s1, s3]),
                ("b".to_string(), vec![s2]),
            ]
        );
    }

    #[test]
    fn test_grouping_preserves_multiset() {
        let entries = vec![
            entry("intro", "introduction"),
            entry("method", "methods"),
            entry("motivation", "introduction"),
            entry("results", "results"),
            entry("more-methods", "methods"),
        ];
        let index = TocIndex::build(entries.clone());
        let flattened: Vec<TocEntry> = index
            .group_by_file()
            .into_iter()
            .flat_map(|(_, group)| group)
            .collect();
        assert_eq!(flattened.len(), entries.len());
        for e in &entries {
            assert!(flattened.contains(e));
        }
        assert_eq!(index.files(), vec!["introduction", "methods", "results"]);
    }

    #[test]
    fn test_lookup() {
        let index = TocIndex::build(vec![entry("sec-intro", "introduction")]);
        assert_eq!(index.lookup("sec-intro").unwrap().file, "introduction");
        assert!(index.lookup("sec-missing").is_none());
    }

    #[test]
    fn test_duplicate_slug_first_wins() {
        let index = TocIndex::build(vec![entry("dup", "a"), entry("dup", "b")]);
        assert_eq!(index.lookup("dup").unwrap().file, "a");
        assert_eq!(index.duplicate_slugs(), vec!["dup"]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_empty() {
        let index = TocIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.group_by_file().is_empty());
        assert!(index.duplicate_slugs().is_empty());
    }

    #[test]
    fn test_duplicate_slugs_reported_once() {
        let entries = vec![entry("a", "x"), entry("dup", "x"), entry("dup", "y"), entry("dup", "z")];
        assert_eq!(duplicate_slugs(&entries), vec!["dup"]);
    }
}
