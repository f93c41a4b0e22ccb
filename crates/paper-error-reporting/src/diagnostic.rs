/*
 * diagnostic.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Core diagnostic message types.
 */

//! Core diagnostic message types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// An error that prevents completion
    Error,
    /// A degraded input or unresolved reference; processing continued
    Warning,
    /// Informational message
    Info,
    /// A note providing additional context
    Note,
}

impl DiagnosticKind {
    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
            DiagnosticKind::Info => "Info",
            DiagnosticKind::Note => "Note",
        }
    }
}

/// How detail items should be presented (tidyverse x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// Error detail (✖ bullet)
    Error,
    /// Info detail (ℹ bullet)
    Info,
    /// Note detail (plain bullet)
    Note,
}

impl DetailKind {
    fn bullet(self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
            DetailKind::Note => "•",
        }
    }
}

/// The content of a message or detail item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    /// Plain text content
    Plain(String),
    /// Markdown content
    Markdown(String),
}

impl MessageContent {
    /// Get the raw string content for display
    pub fn as_str(&self) -> &str {
        match self {
            MessageContent::Plain(s) => s,
            MessageContent::Markdown(s) => s,
        }
    }

    /// Convert to JSON value with type information
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;
        match self {
            MessageContent::Plain(s) => json!({
                "type": "plain",
                "content": s
            }),
            MessageContent::Markdown(s) => json!({
                "type": "markdown",
                "content": s
            }),
        }
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        MessageContent::Markdown(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        MessageContent::Markdown(s.to_string())
    }
}

/// Where in the paper content a diagnostic applies.
///
/// Content arrives as JSON records rather than source files with line numbers,
/// so locations are expressed structurally: the content file, optionally the
/// section id within it, optionally the index of the block within the section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLocation {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<usize>,
}

impl ContentLocation {
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            section: None,
            block: None,
        }
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn block(mut self, block: usize) -> Self {
        self.block = Some(block);
        self
    }
}

impl fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file)?;
        if let Some(section) = &self.section {
            write!(f, "#{}", section)?;
        }
        if let Some(block) = self.block {
            write!(f, " (block {})", block + 1)?;
        }
        Ok(())
    }
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    /// The kind of detail (error, info, note)
    pub kind: DetailKind,
    /// The content of the detail
    pub content: MessageContent,
}

/// A diagnostic message following tidyverse-style structure.
///
/// Structure:
/// 1. **Code**: Optional error code (e.g., "P-1-1") for searchability
/// 2. **Title**: Brief error message
/// 3. **Kind**: Error, Warning, Info
/// 4. **Problem**: What went wrong (the "must" or "can't" statement)
/// 5. **Details**: Specific information (bulleted, max 5)
/// 6. **Hints**: Optional guidance for fixing (ends with ?)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    /// Optional error code (e.g., "P-1-1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Brief title for the error
    pub title: String,

    /// The kind of diagnostic (Error, Warning, Info)
    pub kind: DiagnosticKind,

    /// The problem statement (the "what" - using "must" or "can't")
    pub problem: Option<MessageContent>,

    /// Specific error details (the "where/why")
    pub details: Vec<DetailItem>,

    /// Optional hints for fixing (ends with ?)
    pub hints: Vec<MessageContent>,

    /// Where in the content the issue occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ContentLocation>,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message with just a title and kind.
    ///
    /// Prefer [`DiagnosticMessageBuilder`](crate::DiagnosticMessageBuilder) for
    /// anything with a problem statement or details.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    /// Create a warning diagnostic.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    /// Create an info diagnostic.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    /// Set the error code.
    ///
    /// Error codes follow the format `P-<subsystem>-<number>` (e.g., "P-1-1").
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Get the documentation URL for this error, if it has a cataloged code.
    ///
    /// ```
    /// use paper_error_reporting::DiagnosticMessage;
    ///
    /// let msg = DiagnosticMessage::error("Internal Error").with_code("P-0-1");
    /// assert!(msg.docs_url().is_some());
    /// ```
    pub fn docs_url(&self) -> Option<&str> {
        self.code
            .as_ref()
            .and_then(|code| crate::catalog::get_docs_url(code))
    }

    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// Render this diagnostic message as text following tidyverse style.
    ///
    /// ```text
    /// Warning [P-1-1]: title
    ///   at file#section
    /// Problem statement here
    /// ✖ Error detail
    /// ℹ Info detail
    /// ? Hint
    /// ```
    ///
    /// The first line is always present; the rest appear only when set, each
    /// on its own line. There is no trailing newline.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();

        match &self.code {
            Some(code) => lines.push(format!("{} [{}]: {}", self.kind.label(), code, self.title)),
            None => lines.push(format!("{}: {}", self.kind.label(), self.title)),
        }

        if let Some(location) = &self.location {
            lines.push(format!("  at {}", location));
        }

        if let Some(problem) = &self.problem {
            lines.push(problem.as_str().to_string());
        }

        for detail in &self.details {
            lines.push(format!("{} {}", detail.kind.bullet(), detail.content.as_str()));
        }

        for hint in &self.hints {
            lines.push(format!("? {}", hint.as_str()));
        }

        lines.join("\n")
    }

    /// Render this diagnostic message as a JSON value.
    ///
    /// ```json
    /// {
    ///   "kind": "warning",
    ///   "title": "Unresolved Citation",
    ///   "code": "P-4-1",
    ///   "problem": {"type": "markdown", "content": "..."},
    ///   "details": [{"kind": "error", "content": {...}}],
    ///   "hints": [{"type": "markdown", "content": "..."}],
    ///   "location": {"file": "introduction", "section": "intro"}
    /// }
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let kind_str = match self.kind {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Info => "info",
            DiagnosticKind::Note => "note",
        };

        let mut obj = json!({
            "kind": kind_str,
            "title": self.title,
        });

        if let Some(code) = &self.code {
            obj["code"] = json!(code);
        }

        if let Some(problem) = &self.problem {
            obj["problem"] = problem.to_json();
        }

        if !self.details.is_empty() {
            let details: Vec<_> = self
                .details
                .iter()
                .map(|d| {
                    let detail_kind = match d.kind {
                        DetailKind::Error => "error",
                        DetailKind::Info => "info",
                        DetailKind::Note => "note",
                    };
                    json!({
                        "kind": detail_kind,
                        "content": d.content.to_json()
                    })
                })
                .collect();
            obj["details"] = json!(details);
        }

        if !self.hints.is_empty() {
            let hints: Vec<_> = self.hints.iter().map(|h| h.to_json()).collect();
            obj["hints"] = json!(hints);
        }

        if let Some(location) = &self.location {
            obj["location"] = json!(location);
        }

        obj
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_content_from_str() {
        let content: MessageContent = "test".into();
        assert_eq!(content.as_str(), "test");
        assert!(matches!(content, MessageContent::Markdown(_)));
    }

    #[test]
    fn test_diagnostic_message_new() {
        let msg = DiagnosticMessage::new(DiagnosticKind::Error, "Test error");
        assert_eq!(msg.title, "Test error");
        assert_eq!(msg.kind, DiagnosticKind::Error);
        assert!(msg.code.is_none());
        assert!(msg.problem.is_none());
        assert!(msg.details.is_empty());
        assert!(msg.hints.is_empty());
        assert!(msg.location.is_none());
    }

    #[test]
    fn test_diagnostic_message_constructors() {
        assert_eq!(DiagnosticMessage::error("E").kind, DiagnosticKind::Error);
        assert_eq!(DiagnosticMessage::warning("W").kind, DiagnosticKind::Warning);
        assert_eq!(DiagnosticMessage::info("I").kind, DiagnosticKind::Info);
        assert!(DiagnosticMessage::error("E").is_error());
        assert!(!DiagnosticMessage::warning("W").is_error());
    }

    #[test]
    fn test_docs_url() {
        let msg = DiagnosticMessage::warning("Malformed").with_code("P-1-1");
        assert!(msg.docs_url().unwrap().contains("P-1-1"));

        assert!(DiagnosticMessage::error("No code").docs_url().is_none());
        assert!(
            DiagnosticMessage::error("Unknown")
                .with_code("P-999-999")
                .docs_url()
                .is_none()
        );
    }

    #[test]
    fn test_to_text_simple() {
        let msg = DiagnosticMessage::error("Something went wrong");
        assert_eq!(msg.to_text(), "Error: Something went wrong");
    }

    #[test]
    fn test_to_text_with_code() {
        let msg = DiagnosticMessage::warning("Something went wrong").with_code("P-1-1");
        assert_eq!(msg.to_text(), "Warning [P-1-1]: Something went wrong");
    }

    #[test]
    fn test_to_text_full_message() {
        use crate::builder::DiagnosticMessageBuilder;

        let msg = DiagnosticMessageBuilder::warning("Unresolved Citation")
            .with_location(ContentLocation::file("introduction").section("intro").block(0))
            .problem("Citation key `Smith1900` is not in the bibliography")
            .add_detail("Referenced from the introduction")
            .add_info("The citation is rendered as a fallback marker")
            .add_hint("Check the key spelling?")
            .build();

        let text = msg.to_text();
        assert_eq!(
            text,
            "Warning: Unresolved Citation\n\
             \x20\x20at introduction#intro (block 1)\n\
             Citation key `Smith1900` is not in the bibliography\n\
             ✖ Referenced from the introduction\n\
             ℹ The citation is rendered as a fallback marker\n\
             ? Check the key spelling?"
        );
    }

    #[test]
    fn test_to_json_full_message() {
        use crate::builder::DiagnosticMessageBuilder;

        let msg = DiagnosticMessageBuilder::warning("Malformed TOC Entry")
            .with_code("P-1-2")
            .with_location(ContentLocation::file("toc.json"))
            .problem("Entry 3 has no `slug`")
            .add_detail("Entry was skipped")
            .add_hint("Regenerate the TOC?")
            .build();

        let json = msg.to_json();
        assert_eq!(json["kind"], "warning");
        assert_eq!(json["title"], "Malformed TOC Entry");
        assert_eq!(json["code"], "P-1-2");
        assert_eq!(json["problem"]["content"], "Entry 3 has no `slug`");
        assert_eq!(json["details"][0]["kind"], "error");
        assert_eq!(json["details"][0]["content"]["content"], "Entry was skipped");
        assert_eq!(json["hints"][0]["content"], "Regenerate the TOC?");
        assert_eq!(json["location"]["file"], "toc.json");
        assert!(json["location"].get("section").is_none());
    }

    #[test]
    fn test_to_json_omits_unset_fields() {
        let json = DiagnosticMessage::info("Done").to_json();
        assert_eq!(json["kind"], "info");
        assert!(json.get("code").is_none());
        assert!(json.get("problem").is_none());
        assert!(json.get("details").is_none());
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_location_display() {
        assert_eq!(ContentLocation::file("a").to_string(), "a");
        assert_eq!(ContentLocation::file("a").section("s").to_string(), "a#s");
        assert_eq!(
            ContentLocation::file("a").section("s").block(2).to_string(),
            "a#s (block 3)"
        );
    }
}
