/*
 * section.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Section record loading and content normalization.
 */

//! Section record loading.
//!
//! A content file holds one section record, or an array of them:
//!
//! ```json
//! {"title": "Introduction", "id": "introduction", "level": "h1",
//!  "content": ["First paragraph.", "Second paragraph."],
//!  "subsections": [{"title": "Motivation", "id": "motivation", "content": "..."}]}
//! ```
//!
//! `content` may be a single string or an array of strings; either way it
//! becomes one [`ContentBlock`] per string. Subsections are flattened
//! depth-first after their parent.

use paper_error_reporting::ContentLocation;
use paper_xref::ContentBlock;
use serde::Deserialize;
use serde_json::Value;

use crate::headings::slugify;
use crate::loaded::{Degradation, Loaded, Sink, json_type_name};
use crate::toc::LevelValue;

/// Section content as authored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    One(String),
    Many(Vec<Value>),
    Other(Value),
}

#[derive(Deserialize)]
struct SectionRecord {
    #[serde(default)]
    title: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    level: Option<LevelValue>,
    #[serde(default)]
    content: Option<SectionContent>,
    #[serde(default)]
    subsections: Vec<Value>,
}

/// Load the section records of content file `file`.
pub fn load_section(file: &str, value: &Value) -> Loaded<Vec<ContentBlock>> {
    let mut sink = Sink::default();
    let mut blocks = Vec::new();

    match value {
        Value::Object(_) => load_record(file, value, 0, &mut blocks, &mut sink),
        Value::Array(records) => {
            for record in records {
                load_record(file, record, 0, &mut blocks, &mut sink);
            }
        }
        other => sink.push(Degradation {
            code: "P-2-2",
            title: "Malformed Section",
            problem: "A content file must hold a section record or an array of them".to_string(),
            detail: Some(format!("Found {}", json_type_name(other))),
            hint: None,
            location: Some(ContentLocation::file(file)),
        }),
    }

    tracing::debug!(file, blocks = blocks.len(), "loaded section content");
    sink.finish(blocks)
}

fn load_record(
    file: &str,
    value: &Value,
    depth: u32,
    blocks: &mut Vec<ContentBlock>,
    sink: &mut Sink,
) {
    let record: SectionRecord = match serde_json::from_value(value.clone()) {
        Ok(record) => record,
        Err(e) => {
            sink.push(Degradation {
                code: "P-2-2",
                title: "Malformed Section",
                problem: "A section record was skipped".to_string(),
                detail: Some(e.to_string()),
                hint: Some("Is the record an object with `title`, `id` and `content`?"),
                location: Some(ContentLocation::file(file)),
            });
            return;
        }
    };

    let id = match record.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => slugify(&record.title),
    };
    if id.is_empty() {
        sink.push(Degradation {
            code: "P-2-2",
            title: "Malformed Section",
            problem: "A section record has neither an `id` nor a usable `title`".to_string(),
            detail: None,
            hint: None,
            location: Some(ContentLocation::file(file)),
        });
        return;
    }

    let level = record
        .level
        .as_ref()
        .map_or_else(|| (depth + 1).to_string(), LevelValue::as_text);

    let location = || ContentLocation::file(file).section(id.as_str());
    let texts = match record.content {
        None => Vec::new(),
        Some(SectionContent::One(text)) => vec![text],
        Some(SectionContent::Many(items)) => {
            let mut texts = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                match item {
                    Value::String(text) => texts.push(text),
                    other => sink.push(Degradation {
                        code: "P-2-1",
                        title: "Malformed Section Content",
                        problem: format!("Content item {} must be a string", i + 1),
                        detail: Some(format!("Found {}; the item was dropped", json_type_name(&other))),
                        hint: None,
                        location: Some(location().block(i)),
                    }),
                }
            }
            texts
        }
        Some(SectionContent::Other(other)) => {
            sink.push(Degradation {
                code: "P-2-1",
                title: "Malformed Section Content",
                problem: "Section content must be a string or an array of strings".to_string(),
                detail: Some(format!("Found {}", json_type_name(&other))),
                hint: None,
                location: Some(location()),
            });
            Vec::new()
        }
    };

    blocks.extend(texts.into_iter().map(|text| ContentBlock {
        section_id: id.clone(),
        section_title: record.title.clone(),
        level: level.clone(),
        text,
    }));

    for subsection in &record.subsections {
        load_record(file, subsection, depth + 1, blocks, sink);
    }
}
