/*
 * builder.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Builder API for diagnostic messages.
 */

//! Builder API for diagnostic messages.
//!
//! The builder encodes the tidyverse four-part structure: title, problem,
//! details, hints.
//!
//! ```
//! use paper_error_reporting::DiagnosticMessageBuilder;
//!
//! let warning = DiagnosticMessageBuilder::warning("Unresolved Cross-Reference")
//!     .with_code("P-4-2")
//!     .problem("Target `sec-missing` is not a known heading slug")
//!     .add_detail("Referenced from `introduction`")
//!     .add_hint("Did the heading get renamed?")
//!     .build();
//!
//! assert_eq!(warning.code, Some("P-4-2".to_string()));
//! assert_eq!(warning.details.len(), 1);
//! ```

use crate::diagnostic::{
    ContentLocation, DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage, MessageContent,
};

/// Builder for creating diagnostic messages following tidyverse guidelines.
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    kind: DiagnosticKind,
    title: String,
    code: Option<String>,
    problem: Option<MessageContent>,
    details: Vec<DetailItem>,
    hints: Vec<MessageContent>,
    location: Option<ContentLocation>,
}

impl DiagnosticMessageBuilder {
    /// Create a new builder with the specified kind and title.
    ///
    /// Most code should use `.error()`, `.warning()` or `.info()` instead.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            code: None,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
        }
    }

    /// Create an error diagnostic builder.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    /// Create a warning diagnostic builder.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    /// Create an info diagnostic builder.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    /// Set the error code (`P-<subsystem>-<number>`).
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the problem statement.
    ///
    /// Start with a general, concise statement using "must" or "can't".
    pub fn problem(mut self, stmt: impl Into<MessageContent>) -> Self {
        self.problem = Some(stmt.into());
        self
    }

    /// Add an error detail (✖ bullet).
    pub fn add_detail(mut self, detail: impl Into<MessageContent>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Error,
            content: detail.into(),
        });
        self
    }

    /// Add an info detail (ℹ bullet).
    pub fn add_info(mut self, info: impl Into<MessageContent>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Info,
            content: info.into(),
        });
        self
    }

    /// Add a note detail (plain bullet).
    pub fn add_note(mut self, note: impl Into<MessageContent>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Note,
            content: note.into(),
        });
        self
    }

    /// Add a hint for fixing the problem. Hints should end with `?`.
    pub fn add_hint(mut self, hint: impl Into<MessageContent>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Attach the content location the diagnostic applies to.
    pub fn with_location(mut self, location: ContentLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Build the diagnostic message.
    pub fn build(self) -> DiagnosticMessage {
        DiagnosticMessage {
            code: self.code,
            title: self.title,
            kind: self.kind,
            problem: self.problem,
            details: self.details,
            hints: self.hints,
            location: self.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let msg = DiagnosticMessageBuilder::error("Test error").build();
        assert_eq!(msg.title, "Test error");
        assert_eq!(msg.kind, DiagnosticKind::Error);
        assert!(msg.code.is_none());
    }

    #[test]
    fn test_builder_detail_kinds_keep_order() {
        let msg = DiagnosticMessageBuilder::warning("Mixed")
            .add_detail("first")
            .add_info("second")
            .add_note("third")
            .build();

        let kinds: Vec<_> = msg.details.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DetailKind::Error, DetailKind::Info, DetailKind::Note]);
        assert_eq!(msg.details[1].content.as_str(), "second");
    }

    #[test]
    fn test_builder_location() {
        let msg = DiagnosticMessageBuilder::warning("Located")
            .with_location(ContentLocation::file("conclusion").section("summary"))
            .build();
        let location = msg.location.unwrap();
        assert_eq!(location.file, "conclusion");
        assert_eq!(location.section.as_deref(), Some("summary"));
    }
}
