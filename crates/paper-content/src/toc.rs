/*
 * toc.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Table of contents record loading.
 */

//! Table of contents record loading.
//!
//! The TOC record is normally an array of entries:
//!
//! ```json
//! [{"level": 1, "text": "Introduction", "slug": "introduction", "file": "introduction"}]
//! ```
//!
//! The older wrapped form, with paper metadata alongside the entries, is also
//! accepted:
//!
//! ```json
//! {"paper": {"title": "...", "authors": ["..."], "date": "...",
//!            "sections": [{"title": "Introduction", "id": "introduction",
//!                          "file": "introduction", "level": "h1"}]}}
//! ```
//!
//! Anything else degrades to an empty TOC with a `P-1-1` warning.

use paper_error_reporting::ContentLocation;
use paper_xref::{TocEntry, duplicate_slugs};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::headings::slugify;
use crate::loaded::{Degradation, Loaded, Sink, json_type_name};

/// Paper metadata carried by the wrapped TOC form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// The loaded TOC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocRecord {
    pub entries: Vec<TocEntry>,
    pub meta: Option<PaperMeta>,
}

/// A heading level as written in a record: `2`, `"2"`, `"h2"` or
/// `"subsection"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum LevelValue {
    Number(u32),
    Text(String),
}

impl LevelValue {
    pub fn as_number(&self) -> Option<u32> {
        match self {
            LevelValue::Number(n) => Some(*n),
            LevelValue::Text(s) => parse_level(s),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            LevelValue::Number(n) => n.to_string(),
            LevelValue::Text(s) => s.clone(),
        }
    }
}

/// Parse a textual heading level.
pub fn parse_level(s: &str) -> Option<u32> {
    let s = s.trim();
    let digits = s.strip_prefix(['h', 'H']).unwrap_or(s);
    if let Ok(n) = digits.parse::<u32>() {
        return Some(n);
    }
    match s {
        "chapter" | "section" => Some(1),
        "subsection" => Some(2),
        "subsubsection" => Some(3),
        _ => None,
    }
}

#[derive(Deserialize)]
struct TocEntryRecord {
    #[serde(alias = "title")]
    text: String,
    #[serde(default, alias = "id")]
    slug: Option<String>,
    file: String,
    #[serde(default)]
    level: Option<LevelValue>,
}

/// Load a TOC record from parsed JSON.
pub fn load_toc(value: &Value) -> Loaded<TocRecord> {
    let mut sink = Sink::default();
    let location = || ContentLocation::file("toc");

    let (items, meta) = match value {
        Value::Array(items) => (items.as_slice(), None),
        Value::Object(map) => match map.get("paper").and_then(unwrap_paper) {
            Some((items, meta)) => (items, Some(meta)),
            None => {
                sink.push(Degradation {
                    code: "P-1-1",
                    title: "Malformed Table of Contents",
                    problem: "The table of contents must be an array of entries".to_string(),
                    detail: Some("Found an object without `paper.sections`".to_string()),
                    hint: Some("Is the entry list nested under a different key?"),
                    location: Some(location()),
                });
                return sink.finish(TocRecord::default());
            }
        },
        other => {
            sink.push(Degradation {
                code: "P-1-1",
                title: "Malformed Table of Contents",
                problem: "The table of contents must be an array of entries".to_string(),
                detail: Some(format!("Found {}", json_type_name(other))),
                hint: None,
                location: Some(location()),
            });
            return sink.finish(TocRecord::default());
        }
    };

    let mut entries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match entry_from_value(item) {
            Ok(entry) => entries.push(entry),
            Err(reason) => sink.push(Degradation {
                code: "P-1-2",
                title: "Malformed TOC Entry",
                problem: format!("TOC entry {} was skipped", i + 1),
                detail: Some(reason),
                hint: Some("Does every entry have `text` (or `title`) and `file`?"),
                location: Some(location().block(i)),
            }),
        }
    }

    for slug in duplicate_slugs(&entries) {
        sink.push(Degradation {
            code: "P-1-3",
            title: "Duplicate TOC Slug",
            problem: format!("Slug `{}` appears on more than one entry", slug),
            detail: Some(format!("Cross-references to `{}` resolve to the first entry", slug)),
            hint: None,
            location: Some(location()),
        });
    }

    tracing::debug!(entries = entries.len(), "loaded table of contents");
    sink.finish(TocRecord { entries, meta })
}

fn unwrap_paper(paper: &Value) -> Option<(&[Value], PaperMeta)> {
    let sections = paper.get("sections")?.as_array()?;
    let meta = PaperMeta {
        title: paper.get("title").and_then(Value::as_str).map(str::to_string),
        authors: paper
            .get("authors")
            .and_then(Value::as_array)
            .map(|authors| {
                authors
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        date: paper.get("date").and_then(Value::as_str).map(str::to_string),
    };
    Some((sections.as_slice(), meta))
}

fn entry_from_value(value: &Value) -> Result<TocEntry, String> {
    let record: TocEntryRecord =
        serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;

    let slug = match record.slug {
        Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
        _ => slugify(&record.text),
    };
    if slug.is_empty() {
        return Err(format!("No slug could be derived from `{}`", record.text));
    }

    let level = record.level.as_ref().and_then(LevelValue::as_number).unwrap_or(1);
    Ok(TocEntry::new(level, record.text, slug, record.file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_form() {
        let loaded = load_toc(&json!([
            {"level": 1, "text": "Introduction", "slug": "sec-intro", "file": "introduction"},
            {"level": 2, "text": "Background", "slug": "sec-background", "file": "introduction"}
        ]));
        assert!(!loaded.is_degraded());
        assert_eq!(loaded.value.entries.len(), 2);
        assert_eq!(
            loaded.value.entries[1],
            TocEntry::new(2, "Background", "sec-background", "introduction")
        );
        assert!(loaded.value.meta.is_none());
    }

    #[test]
    fn test_wrapped_form() {
        let loaded = load_toc(&json!({
            "paper": {
                "title": "Hermite's Problem",
                "authors": ["A. Author"],
                "date": "2025",
                "sections": [
                    {"title": "Introduction", "id": "introduction", "file": "introduction", "level": "h1"},
                    {"title": "Galois Theory", "id": "galois", "file": "galois-theory", "level": "subsection"}
                ]
            }
        }));
        assert!(!loaded.is_degraded());
        let record = loaded.value;
        assert_eq!(record.entries[0].slug, "introduction");
        assert_eq!(record.entries[1].level, 2);
        let meta = record.meta.unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hermite's Problem"));
        assert_eq!(meta.authors, vec!["A. Author"]);
    }

    #[test]
    fn test_non_array_degrades_to_empty() {
        for value in [json!("toc"), json!(42), json!(null), json!({"sections": []})] {
            let loaded = load_toc(&value);
            assert!(loaded.value.entries.is_empty());
            assert_eq!(loaded.diagnostics.len(), 1);
            assert_eq!(loaded.diagnostics[0].code.as_deref(), Some("P-1-1"));
        }
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let loaded = load_toc(&json!([
            {"text": "Kept", "file": "a"},
            {"text": "No file"},
            "not an object",
            {"text": "Also kept", "slug": "also", "file": "b", "level": "3"}
        ]));
        let slugs: Vec<&str> = loaded.value.entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["kept", "also"]);
        assert_eq!(loaded.value.entries[0].level, 1);
        assert_eq!(loaded.value.entries[1].level, 3);
        assert_eq!(loaded.diagnostics.len(), 2);
        assert!(loaded
            .diagnostics
            .iter()
            .all(|d| d.code.as_deref() == Some("P-1-2")));
        assert_eq!(loaded.diagnostics[0].location.as_ref().unwrap().block, Some(1));
    }

    #[test]
    fn test_duplicate_slug_warns() {
        let loaded = load_toc(&json!([
            {"text": "A", "slug": "x", "file": "a"},
            {"text": "B", "slug": "x", "file": "b"}
        ]));
        assert_eq!(loaded.value.entries.len(), 2);
        assert_eq!(loaded.diagnostics.len(), 1);
        assert_eq!(loaded.diagnostics[0].code.as_deref(), Some("P-1-3"));
    }

    #[test]
    fn test_repeated_slug_warns_once() {
        let loaded = load_toc(&json!([
            {"text": "A", "slug": "x", "file": "a"},
            {"text": "B", "slug": "x", "file": "b"},
            {"text": "C", "slug": "x", "file": "c"}
        ]));
        assert_eq!(loaded.diagnostics.len(), 1);
        assert!(loaded.diagnostics[0].to_text().contains("`x`"));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("h2"), Some(2));
        assert_eq!(parse_level("H3"), Some(3));
        assert_eq!(parse_level("4"), Some(4));
        assert_eq!(parse_level("section"), Some(1));
        assert_eq!(parse_level("subsubsection"), Some(3));
        assert_eq!(parse_level("heading"), None);
    }
}
