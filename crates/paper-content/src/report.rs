/*
 * report.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Authoring diagnostics for unresolved references.
 */

use paper_error_reporting::{ContentLocation, DiagnosticMessage, DiagnosticMessageBuilder};
use paper_xref::{Document, UnresolvedKind, UnresolvedReference};

/// One warning per unresolved reference in `document`, in document order.
pub fn unresolved_diagnostics(document: &Document) -> Vec<DiagnosticMessage> {
    document
        .unresolved()
        .iter()
        .map(unresolved_diagnostic)
        .collect()
}

pub fn unresolved_diagnostic(reference: &UnresolvedReference) -> DiagnosticMessage {
    let location = ContentLocation::file(reference.file.as_str()).section(reference.section_id.as_str());
    match reference.kind {
        UnresolvedKind::Citation => DiagnosticMessageBuilder::warning("Unresolved Citation")
            .with_code("P-4-1")
            .problem(format!(
                "Citation key `{}` is not in the bibliography",
                reference.identifier
            ))
            .add_hint("Is the key spelled the same way as its bibliography entry?")
            .with_location(location)
            .build(),
        UnresolvedKind::CrossRef => DiagnosticMessageBuilder::warning("Unresolved Cross-Reference")
            .with_code("P-4-2")
            .problem(format!(
                "Target `{}` is not a known heading slug",
                reference.identifier
            ))
            .add_hint("Did the heading get renamed?")
            .with_location(location)
            .build(),
    }
}
