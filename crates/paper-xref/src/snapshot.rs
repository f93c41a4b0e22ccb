/*
 * snapshot.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Cached, wholesale-replaced snapshot of the paper indices.
 */

//! Cached snapshot of the paper indices.
//!
//! Building the indices is cheap but not free. A long-lived caller (a
//! watcher, a preview server) can keep a [`SnapshotCache`] and rebuild only
//! when the content fingerprint changes. The cached [`Indices`] are never
//! mutated: a rebuild swaps in a new `Arc`, and readers holding the old one
//! keep a consistent view.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::bibliography::BibliographyIndex;
use crate::model::{RawBibEntry, TocEntry};
use crate::toc::TocIndex;

/// The read-only symbol tables shared by every resolution task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indices {
    pub bibliography: BibliographyIndex,
    pub toc: TocIndex,
}

impl Indices {
    pub fn build(toc: Vec<TocEntry>, bibliography: Vec<RawBibEntry>) -> Self {
        Self {
            bibliography: BibliographyIndex::build(bibliography),
            toc: TocIndex::build(toc),
        }
    }
}

/// Fingerprint of the index inputs.
pub fn fingerprint(toc: &[TocEntry], bibliography: &[RawBibEntry]) -> u64 {
    let mut hasher = DefaultHasher::new();
    toc.hash(&mut hasher);
    bibliography.hash(&mut hasher);
    hasher.finish()
}

/// Holds the most recently built [`Indices`] together with their fingerprint.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    current: RwLock<Option<(u64, Arc<Indices>)>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached indices if `fingerprint` matches, otherwise call
    /// `build` and replace the cached snapshot with its result.
    pub fn get_or_build<F>(&self, fingerprint: u64, build: F) -> Arc<Indices>
    where
        F: FnOnce() -> Indices,
    {
        {
            let current = self.current.read().unwrap_or_else(|e| e.into_inner());
            if let Some((cached, indices)) = current.as_ref() {
                if *cached == fingerprint {
                    return Arc::clone(indices);
                }
            }
        }

        let indices = Arc::new(build());
        tracing::debug!(
            fingerprint,
            toc_entries = indices.toc.len(),
            bibliography_entries = indices.bibliography.len(),
            "rebuilt index snapshot"
        );
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Some((fingerprint, Arc::clone(&indices)));
        indices
    }

    /// The cached snapshot, if any.
    pub fn current(&self) -> Option<Arc<Indices>> {
        let current = self.current.read().unwrap_or_else(|e| e.into_inner());
        current.as_ref().map(|(_, indices)| Arc::clone(indices))
    }

    /// Drop the cached snapshot.
    pub fn clear(&self) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn inputs(n: usize) -> (Vec<TocEntry>, Vec<RawBibEntry>) {
        let toc = (0..n)
            .map(|i| TocEntry::new(2, "S", format!("s{}", i), "f"))
            .collect();
        let bib = (0..n)
            .map(|i| RawBibEntry::new(format!("k{}", i), "t"))
            .collect();
        (toc, bib)
    }

    #[test]
    fn test_fingerprint_tracks_inputs() {
        let (toc, bib) = inputs(2);
        assert_eq!(fingerprint(&toc, &bib), fingerprint(&toc, &bib));
        let (toc3, bib3) = inputs(3);
        assert_ne!(fingerprint(&toc, &bib), fingerprint(&toc3, &bib3));
    }

    #[test]
    fn test_reuses_snapshot_for_same_fingerprint() {
        let cache = SnapshotCache::new();
        let builds = Cell::new(0);
        let (toc, bib) = inputs(2);
        let fp = fingerprint(&toc, &bib);

        let first = cache.get_or_build(fp, || {
            builds.set(builds.get() + 1);
            Indices::build(toc.clone(), bib.clone())
        });
        let second = cache.get_or_build(fp, || {
            builds.set(builds.get() + 1);
            Indices::build(toc.clone(), bib.clone())
        });

        assert_eq!(builds.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_rebuild_replaces_whole_snapshot() {
        let cache = SnapshotCache::new();
        let (toc, bib) = inputs(1);
        let old = cache.get_or_build(1, || Indices::build(toc.clone(), bib.clone()));

        let (toc, bib) = inputs(3);
        let new = cache.get_or_build(2, || Indices::build(toc, bib));

        assert!(!Arc::ptr_eq(&old, &new));
        // The old snapshot is untouched.
        assert_eq!(old.toc.len(), 1);
        assert_eq!(new.toc.len(), 3);
        assert!(Arc::ptr_eq(&cache.current().unwrap(), &new));
    }

    #[test]
    fn test_clear() {
        let cache = SnapshotCache::new();
        cache.get_or_build(7, Indices::default);
        assert!(cache.current().is_some());
        cache.clear();
        assert!(cache.current().is_none());
    }
}
