/*
 * pipeline.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Per-file tokenize-and-resolve stage, sequential or on the rayon pool.
 */

//! Per-file tokenize-and-resolve stage.
//!
//! Each content file is independent once the indices exist, so files can be
//! resolved on rayon's work-stealing pool. Results always come back in the
//! input order regardless of how the work was scheduled.

use rayon::prelude::*;

use crate::bibliography::BibliographyIndex;
use crate::model::{ContentBlock, ContentMap};
use crate::resolve::ResolvedBlock;
use crate::toc::TocIndex;

/// Resolved blocks of every content file, in content-map order.
pub type ResolvedContent = Vec<(String, Vec<ResolvedBlock>)>;

fn resolve_file(blocks: &[ContentBlock], bib: &BibliographyIndex, toc: &TocIndex) -> Vec<ResolvedBlock> {
    blocks
        .iter()
        .map(|block| ResolvedBlock::from_block(block, bib, toc))
        .collect()
}

/// Tokenize and resolve all content files.
///
/// With `parallel` set, files are distributed over rayon's global pool. The
/// output is identical either way.
pub fn resolve_content(
    content: &ContentMap,
    bib: &BibliographyIndex,
    toc: &TocIndex,
    parallel: bool,
) -> ResolvedContent {
    let files: Vec<(&String, &Vec<ContentBlock>)> = content.iter().collect();

    if parallel {
        files
            .into_par_iter()
            .map(|(file, blocks)| (file.clone(), resolve_file(blocks, bib, toc)))
            .collect()
    } else {
        files
            .into_iter()
            .map(|(file, blocks)| (file.clone(), resolve_file(blocks, bib, toc)))
            .collect()
    }
}
