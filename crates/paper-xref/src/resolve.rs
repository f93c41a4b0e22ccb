/*
 * resolve.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Citation and cross-reference resolution against the paper indices.
 */

//! Citation and cross-reference resolution.
//!
//! [`resolve`] maps each [`Token`] to exactly one [`ResolvedToken`]. Lookups
//! that miss produce the unresolved variants; nothing here fails.

use serde::{Deserialize, Serialize};

use crate::bibliography::{citation_anchor, BibliographyIndex};
use crate::model::ContentBlock;
use crate::toc::TocIndex;
use crate::token::Token;

/// A token after lookup against the bibliography and TOC indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResolvedToken {
    Text {
        text: String,
    },
    Math {
        tex: String,
        inline: bool,
    },
    ResolvedCitation {
        number: usize,
        key: String,
        anchor: String,
    },
    UnresolvedCitation {
        key: String,
    },
    ResolvedCrossRef {
        label: String,
        anchor: String,
    },
    UnresolvedCrossRef {
        target_id: String,
    },
}

/// How a marker should be styled by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    Citation,
    CrossRef,
    Unresolved,
}

/// Renderer-facing description of a reference token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub href: Option<String>,
    pub kind: MarkerKind,
}

impl ResolvedToken {
    /// The marker a renderer shows for a reference token.
    ///
    /// Resolved references render as `[key]` / `[targetId]` linking to their
    /// anchor; unresolved ones render as `[?key]` / `[?targetId]` with no
    /// link. Text and math have no marker.
    pub fn marker(&self) -> Option<Marker> {
        match self {
            ResolvedToken::Text { .. } | ResolvedToken::Math { .. } => None,
            ResolvedToken::ResolvedCitation { key, anchor, .. } => Some(Marker {
                label: format!("[{}]", key),
                href: Some(format!("#{}", anchor)),
                kind: MarkerKind::Citation,
            }),
            ResolvedToken::ResolvedCrossRef { label, anchor } => Some(Marker {
                label: format!("[{}]", label),
                href: Some(format!("#{}", anchor)),
                kind: MarkerKind::CrossRef,
            }),
            ResolvedToken::UnresolvedCitation { key } => Some(Marker {
                label: format!("[?{}]", key),
                href: None,
                kind: MarkerKind::Unresolved,
            }),
            ResolvedToken::UnresolvedCrossRef { target_id } => Some(Marker {
                label: format!("[?{}]", target_id),
                href: None,
                kind: MarkerKind::Unresolved,
            }),
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            ResolvedToken::UnresolvedCitation { .. } | ResolvedToken::UnresolvedCrossRef { .. }
        )
    }
}

/// Resolve one token.
pub fn resolve_token(token: &Token, bib: &BibliographyIndex, toc: &TocIndex) -> ResolvedToken {
    match token {
        Token::Text { text } => ResolvedToken::Text { text: text.clone() },
        Token::Math { tex, inline, .. } => ResolvedToken::Math {
            tex: tex.clone(),
            inline: *inline,
        },
        Token::CitationRef { key, .. } => match bib.lookup(key) {
            Some(entry) => ResolvedToken::ResolvedCitation {
                number: entry.number,
                key: entry.key.clone(),
                anchor: citation_anchor(&entry.key),
            },
            None => ResolvedToken::UnresolvedCitation { key: key.clone() },
        },
        Token::CrossRef { target_id, .. } => match toc.lookup(target_id) {
            Some(entry) => ResolvedToken::ResolvedCrossRef {
                label: entry.slug.clone(),
                anchor: entry.slug.clone(),
            },
            None => ResolvedToken::UnresolvedCrossRef {
                target_id: target_id.clone(),
            },
        },
        // Unrecognized syntax is shown exactly as written.
        Token::UnknownMacro { raw } => ResolvedToken::Text { text: raw.clone() },
    }
}

/// Resolve a token sequence. The output has the same length and order.
pub fn resolve(tokens: &[Token], bib: &BibliographyIndex, toc: &TocIndex) -> Vec<ResolvedToken> {
    tokens
        .iter()
        .map(|token| resolve_token(token, bib, toc))
        .collect()
}

/// A content block whose text has been tokenized and resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBlock {
    pub section_id: String,
    pub section_title: String,
    pub level: String,
    pub tokens: Vec<ResolvedToken>,
}

impl ResolvedBlock {
    pub fn from_block(block: &ContentBlock, bib: &BibliographyIndex, toc: &TocIndex) -> Self {
        let tokens = crate::token::parse(&block.text);
        Self {
            section_id: block.section_id.clone(),
            section_title: block.section_title.clone(),
            level: block.level.clone(),
            tokens: resolve(&tokens, bib, toc),
        }
    }
}
