/*
 * proptest_roundtrip.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Property-based tests for the token parser and the indices.
 *
 * The parser must be total and lossless: for any input, concatenating the
 * raw text of the tokens reproduces the input. Inputs are generated both as
 * arbitrary strings and as concatenations of macro-like fragments, which
 * reach far more of the lexer's branches.
 */

use paper_xref::{BibliographyIndex, RawBibEntry, TocEntry, TocIndex, Token, parse, unparse};
use proptest::prelude::*;

/// Fragments that exercise every lexer branch, including broken macros.
fn gen_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .,§é—]{0,12}",
        Just("[cite:".to_string()),
        Just("[ref:".to_string()),
        Just("[@".to_string()),
        Just("]".to_string()),
        Just("[".to_string()),
        Just("\\cite{".to_string()),
        Just("\\ref{".to_string()),
        Just("\\eqref{".to_string()),
        Just("\\label{".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just(",".to_string()),
        Just("$".to_string()),
        Just("$$".to_string()),
        Just("\\$".to_string()),
        Just("\\(".to_string()),
        Just("\\)".to_string()),
        Just("\\[".to_string()),
        Just("\\]".to_string()),
        Just("\\".to_string()),
        Just("\n".to_string()),
        "[a-zA-Z][a-zA-Z0-9:-]{0,10}",
    ]
}

fn gen_macro_text() -> impl Strategy<Value = String> {
    prop::collection::vec(gen_fragment(), 0..40).prop_map(|parts| parts.concat())
}

fn gen_keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{1,2}", 0..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Arbitrary strings survive a parse/unparse round trip.
    #[test]
    fn test_roundtrip_arbitrary(input in any::<String>()) {
        prop_assert_eq!(unparse(&parse(&input)), input);
    }

    /// Macro-dense strings survive a parse/unparse round trip.
    #[test]
    fn test_roundtrip_macro_text(input in gen_macro_text()) {
        prop_assert_eq!(unparse(&parse(&input)), input);
    }

    /// Text runs are never empty and never adjacent.
    #[test]
    fn test_text_runs_are_maximal(input in gen_macro_text()) {
        let tokens = parse(&input);
        for pair in tokens.windows(2) {
            let both_text = matches!(pair[0], Token::Text { .. }) && matches!(pair[1], Token::Text { .. });
            prop_assert!(!both_text, "adjacent text tokens in {:?}", tokens);
        }
        for token in &tokens {
            prop_assert!(!token.raw().is_empty());
        }
    }

    /// Parsing is deterministic.
    #[test]
    fn test_parse_deterministic(input in gen_macro_text()) {
        prop_assert_eq!(parse(&input), parse(&input));
    }

    /// Numbers are dense and follow first occurrence of each key.
    #[test]
    fn test_bibliography_numbering(keys in gen_keys()) {
        let index = BibliographyIndex::build(
            keys.iter().map(|k| RawBibEntry::new(k.clone(), format!("text of {}", k))),
        );

        let mut unique: Vec<&String> = Vec::new();
        for key in &keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }

        prop_assert_eq!(index.len(), unique.len());
        for (i, entry) in index.all().iter().enumerate() {
            prop_assert_eq!(entry.number, i + 1);
        }
        for (i, key) in unique.iter().enumerate() {
            prop_assert_eq!(index.lookup(key).map(|e| e.number), Some(i + 1));
        }
    }

    /// Grouping keeps every entry and the relative order within each file.
    #[test]
    fn test_grouping_fidelity(files in prop::collection::vec("[a-d]", 0..30)) {
        let entries: Vec<TocEntry> = files
            .iter()
            .enumerate()
            .map(|(i, f)| TocEntry::new(2, format!("Heading {}", i), format!("s{}", i), f.clone()))
            .collect();
        let groups = TocIndex::build(entries.clone()).group_by_file();

        let total: usize = groups.iter().map(|(_, g)| g.len()).sum();
        prop_assert_eq!(total, entries.len());

        for (file, group) in &groups {
            let expected: Vec<&TocEntry> = entries.iter().filter(|e| &e.file == file).collect();
            let actual: Vec<&TocEntry> = group.iter().collect();
            prop_assert_eq!(actual, expected);
        }

        let mut first_seen: Vec<&String> = Vec::new();
        for f in &files {
            if !first_seen.contains(&f) {
                first_seen.push(f);
            }
        }
        let group_files: Vec<&String> = groups.iter().map(|(f, _)| f).collect();
        prop_assert_eq!(group_files, first_seen);
    }
}
