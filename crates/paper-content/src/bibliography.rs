/*
 * bibliography.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Bibliography record loading and `\bibitem` parsing.
 */

//! Bibliography record loading and `\bibitem` parsing.

use once_cell::sync::Lazy;
use paper_error_reporting::ContentLocation;
use paper_xref::RawBibEntry;
use regex::Regex;
use serde_json::Value;

use crate::loaded::{Degradation, Loaded, Sink, json_type_name};

static BIBITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\bibitem(?:\[[^\]\n]*\])?\{([^}\n]*)\}").expect("valid bibitem regex")
});

static END_BIBLIOGRAPHY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\end\{thebibliography\}").expect("valid environment regex"));

/// Load a bibliography record: an array of `{"key": ..., "text": ...}`.
///
/// Entries are returned in record order, duplicates included; numbering and
/// deduplication belong to the bibliography index.
pub fn load_bibliography(value: &Value) -> Loaded<Vec<RawBibEntry>> {
    let mut sink = Sink::default();
    let location = || ContentLocation::file("bibliography");

    let Value::Array(items) = value else {
        sink.push(Degradation {
            code: "P-3-1",
            title: "Malformed Bibliography",
            problem: "The bibliography must be an array of entries".to_string(),
            detail: Some(format!("Found {}", json_type_name(value))),
            hint: None,
            location: Some(location()),
        });
        return sink.finish(Vec::new());
    };

    let mut entries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let key = item.get("key").and_then(Value::as_str).map(str::trim);
        let text = item.get("text").and_then(Value::as_str);
        match (key, text) {
            (Some(key), Some(text)) if !key.is_empty() => {
                entries.push(RawBibEntry::new(key, text.trim()));
            }
            _ => sink.push(Degradation {
                code: "P-3-2",
                title: "Malformed Bibliography Entry",
                problem: format!("Bibliography entry {} was skipped", i + 1),
                detail: Some("Entries need a non-empty string `key` and a string `text`".to_string()),
                hint: None,
                location: Some(location().block(i)),
            }),
        }
    }

    tracing::debug!(entries = entries.len(), "loaded bibliography");
    sink.finish(entries)
}

/// Split `\bibitem{key} text` sequences into raw entries.
///
/// Each entry's text runs from the end of its `\bibitem{..}` to the next
/// `\bibitem` (or `\end{thebibliography}`), trimmed. Text before the first
/// `\bibitem` is ignored.
///
/// ```
/// use paper_content::parse_bibitems;
///
/// let entries = parse_bibitems("\\bibitem{a} First.\n\\bibitem{b} Second.");
/// assert_eq!(entries[1].key, "b");
/// assert_eq!(entries[1].text, "Second.");
/// ```
pub fn parse_bibitems(text: &str) -> Vec<RawBibEntry> {
    let end = END_BIBLIOGRAPHY
        .find(text)
        .map_or(text.len(), |m| m.start());
    let body = &text[..end];

    let items: Vec<(String, usize, usize)> = BIBITEM
        .captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let key = caps.get(1)?.as_str().trim().to_string();
            Some((key, whole.start(), whole.end()))
        })
        .collect();

    items
        .iter()
        .enumerate()
        .filter(|(_, (key, _, _))| !key.is_empty())
        .map(|(i, (key, _, text_start))| {
            let text_end = items.get(i + 1).map_or(body.len(), |(_, start, _)| *start);
            RawBibEntry::new(key.clone(), body[*text_start..text_end].trim())
        })
        .collect()
}
