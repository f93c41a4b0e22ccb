/*
 * loaded.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * A loaded value together with the diagnostics produced while loading it.
 */

use paper_error_reporting::{ContentLocation, DiagnosticMessage, DiagnosticMessageBuilder};

/// A value produced from possibly malformed input.
///
/// Loading never fails on a wrong shape: whatever could not be used is
/// dropped, and each drop is recorded as a warning in `diagnostics`.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub diagnostics: Vec<DiagnosticMessage>,
}

impl<T> Loaded<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// True if anything was dropped or replaced while loading.
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    pub fn into_parts(self) -> (T, Vec<DiagnosticMessage>) {
        (self.value, self.diagnostics)
    }
}

/// Describes one degradation; turned into a logged warning by [`Sink::push`].
pub(crate) struct Degradation<'a> {
    pub code: &'static str,
    pub title: &'static str,
    pub problem: String,
    pub detail: Option<String>,
    pub hint: Option<&'a str>,
    pub location: Option<ContentLocation>,
}

/// Collects warnings while a loader walks its input.
#[derive(Default)]
pub(crate) struct Sink {
    diagnostics: Vec<DiagnosticMessage>,
}

impl Sink {
    pub fn push(&mut self, d: Degradation<'_>) {
        tracing::warn!(code = d.code, location = ?d.location, "{}", d.problem);

        let mut builder = DiagnosticMessageBuilder::warning(d.title)
            .with_code(d.code)
            .problem(d.problem);
        if let Some(detail) = d.detail {
            builder = builder.add_detail(detail);
        }
        if let Some(hint) = d.hint {
            builder = builder.add_hint(hint);
        }
        if let Some(location) = d.location {
            builder = builder.with_location(location);
        }
        self.diagnostics.push(builder.build());
    }

    pub fn extend(&mut self, diagnostics: Vec<DiagnosticMessage>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn finish<T>(self, value: T) -> Loaded<T> {
        Loaded {
            value,
            diagnostics: self.diagnostics,
        }
    }
}

/// Short name of a JSON value's type, for problem statements.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
