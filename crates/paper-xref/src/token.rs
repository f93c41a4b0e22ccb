/*
 * token.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Lexer for the macro syntax embedded in section prose.
 */

//! Lexer for the macro syntax embedded in section prose.
//!
//! Section text is prose mixed with LaTeX-like math and a handful of
//! reference macros. [`parse`] splits one block of text into [`Token`]s in a
//! single forward pass:
//!
//! | syntax | token |
//! |---|---|
//! | `[cite:KEY]`, `[cite:K1,K2]`, `\cite{K1,K2}`, `[@KEY]` | [`Token::CitationRef`] (one per key) |
//! | `[ref:ID]`, `\ref{ID}`, `\eqref{ID}` | [`Token::CrossRef`] |
//! | `$...$`, `\(...\)` | [`Token::Math`] with `inline: true` |
//! | `$$...$$`, `\[...\]` | [`Token::Math`] with `inline: false` |
//! | `\begin{equation}...\end{equation}`, likewise `equation*`, `align`, `align*` | [`Token::Math`] with `inline: false` |
//! | any other `\command{...}`, unclosed delimiters, `[name:...]` with an unknown name | [`Token::UnknownMacro`] |
//!
//! `\$` is an escaped dollar sign and stays in the surrounding text.
//!
//! Parsing never fails. Every token remembers the exact source slice it was
//! lexed from, so [`unparse`] reproduces the input byte-for-byte.
//!
//! Macro arguments must fit on one line and within [`MAX_MACRO_ARG`] bytes.
//! Together with remembering which math closers are known to be absent, this
//! keeps the scan linear in the input length.

use serde::{Deserialize, Serialize};

/// Longest macro argument (or bracket macro name) the lexer will look at.
pub const MAX_MACRO_ARG: usize = 256;

const CITE_COMMANDS: &[&str] = &["cite", "citep", "citet"];
const REF_COMMANDS: &[&str] = &["ref", "eqref", "autoref"];

/// Environments lexed as display math. For `align` the environment itself is
/// kept in `tex`, since the alignment markup only means something inside it.
const MATH_ENVIRONMENTS: &[(&str, bool)] = &[
    ("equation", false),
    ("equation*", false),
    ("align", true),
    ("align*", true),
];

/// A lexed piece of section text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Token {
    /// Plain prose.
    Text { text: String },
    /// A math span. `tex` excludes the delimiters, `raw` includes them.
    Math {
        tex: String,
        inline: bool,
        raw: String,
    },
    /// A citation of one bibliography key.
    CitationRef { key: String, raw: String },
    /// A reference to a heading slug.
    CrossRef { target_id: String, raw: String },
    /// Macro-like syntax that is not understood, kept verbatim.
    UnknownMacro { raw: String },
}

impl Token {
    /// The exact source text this token was lexed from.
    pub fn raw(&self) -> &str {
        match self {
            Token::Text { text } => text,
            Token::Math { raw, .. }
            | Token::CitationRef { raw, .. }
            | Token::CrossRef { raw, .. }
            | Token::UnknownMacro { raw } => raw,
        }
    }
}

/// Split one block of text into tokens.
///
/// ```
/// use paper_xref::token::{parse, Token};
///
/// let tokens = parse("See [ref:sec-intro].");
/// assert_eq!(tokens[1], Token::CrossRef {
///     target_id: "sec-intro".to_string(),
///     raw: "[ref:sec-intro]".to_string(),
/// });
/// ```
pub fn parse(input: &str) -> Vec<Token> {
    Lexer::new(input).run()
}

/// Concatenate the source text of every token.
///
/// For any string `s`, `unparse(&parse(s)) == s`.
pub fn unparse(tokens: &[Token]) -> String {
    tokens.iter().map(Token::raw).collect()
}

/// Search starts from which a closing delimiter is known not to exist.
///
/// If a search for `$$` starting at `p` found nothing, a later search
/// starting at any `q >= p` cannot find anything either.
#[derive(Default)]
struct AbsentClosers {
    display_dollar: Option<usize>,
    inline_paren: Option<usize>,
    display_bracket: Option<usize>,
    environments: [Option<usize>; MATH_ENVIRONMENTS.len()],
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    text_start: usize,
    tokens: Vec<Token>,
    absent: AbsentClosers,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            text_start: 0,
            tokens: Vec::new(),
            absent: AbsentClosers::default(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            let consumed = match self.bytes[self.pos] {
                b'\\' => self.lex_backslash(),
                b'$' => self.lex_dollar(),
                b'[' => self.lex_bracket(),
                _ => false,
            };
            if !consumed {
                self.pos += 1;
            }
        }
        self.flush_text(self.bytes.len());
        self.tokens
    }

    fn flush_text(&mut self, upto: usize) {
        if self.text_start < upto {
            self.tokens.push(Token::Text {
                text: self.src[self.text_start..upto].to_string(),
            });
        }
    }

    /// Push a token covering `start..end` and continue scanning at `end`.
    fn emit(&mut self, start: usize, end: usize, token: Token) {
        self.flush_text(start);
        self.tokens.push(token);
        self.pos = end;
        self.text_start = end;
    }

    fn emit_unknown(&mut self, start: usize, end: usize) -> bool {
        let raw = self.src[start..end].to_string();
        self.emit(start, end, Token::UnknownMacro { raw });
        true
    }

    fn emit_math(&mut self, start: usize, end: usize, open: usize, close: usize, inline: bool) -> bool {
        let tex = &self.src[start + open..end - close];
        if tex.trim().is_empty() {
            return self.emit_unknown(start, end);
        }
        let token = Token::Math {
            tex: tex.to_string(),
            inline,
            raw: self.src[start..end].to_string(),
        };
        self.emit(start, end, token);
        true
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn lex_dollar(&mut self) -> bool {
        let start = self.pos;
        if self.peek(1) == Some(b'$') {
            return match find_cached(self.src, start + 2, "$$", &mut self.absent.display_dollar) {
                Some(close) => self.emit_math(start, close + 2, 2, 2, false),
                None => self.emit_unknown(start, start + 2),
            };
        }
        match self.find_inline_dollar(start + 1) {
            Some(close) => self.emit_math(start, close + 1, 1, 1, true),
            None => self.emit_unknown(start, start + 1),
        }
    }

    /// Closing `$` for inline math: same line, skipping escaped characters.
    fn find_inline_dollar(&self, from: usize) -> Option<usize> {
        let mut i = from;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b'\n' => return None,
                b'$' => return Some(i),
                _ => i += 1,
            }
        }
        None
    }

    fn lex_backslash(&mut self) -> bool {
        let start = self.pos;
        let Some(next) = self.peek(1) else {
            return self.emit_unknown(start, start + 1);
        };

        match next {
            b'$' => {
                // Escaped dollar stays in the text run.
                self.pos += 2;
                true
            }
            b'(' => match find_cached(self.src, start + 2, "\\)", &mut self.absent.inline_paren) {
                Some(close) => self.emit_math(start, close + 2, 2, 2, true),
                None => self.emit_unknown(start, start + 2),
            },
            b'[' => match find_cached(self.src, start + 2, "\\]", &mut self.absent.display_bracket)
            {
                Some(close) => self.emit_math(start, close + 2, 2, 2, false),
                None => self.emit_unknown(start, start + 2),
            },
            b if b.is_ascii_alphabetic() => self.lex_command(start),
            _ => {
                let width = self.src[start + 1..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.emit_unknown(start, start + 1 + width)
            }
        }
    }

    fn lex_command(&mut self, start: usize) -> bool {
        let name_start = start + 1;
        let mut name_end = name_start;
        while name_end < self.bytes.len() && self.bytes[name_end].is_ascii_alphabetic() {
            name_end += 1;
        }
        let name = &self.src[name_start..name_end];

        let group = if self.bytes.get(name_end) == Some(&b'{') {
            self.find_group_close(name_end + 1)
        } else {
            None
        };

        let Some(close) = group else {
            return self.emit_unknown(start, name_end);
        };
        let end = close + 1;

        if name == "begin" {
            let env = &self.src[name_end + 1..close];
            if let Some(index) = MATH_ENVIRONMENTS.iter().position(|(e, _)| *e == env) {
                return self.lex_environment(start, end, index);
            }
        } else if CITE_COMMANDS.contains(&name) {
            if self.emit_citations(start, name_end + 1, close, end) {
                return true;
            }
        } else if REF_COMMANDS.contains(&name) {
            let target = self.src[name_end + 1..close].trim();
            if is_valid_identifier(target) {
                let token = Token::CrossRef {
                    target_id: target.to_string(),
                    raw: self.src[start..end].to_string(),
                };
                self.emit(start, end, token);
                return true;
            }
        }
        self.emit_unknown(start, end)
    }

    /// A math environment whose `\begin{..}` spans `start..body_start`.
    fn lex_environment(&mut self, start: usize, body_start: usize, index: usize) -> bool {
        let (env, keep_environment) = MATH_ENVIRONMENTS[index];
        let closer = format!("\\end{{{}}}", env);
        let Some(close) = find_cached(self.src, body_start, &closer, &mut self.absent.environments[index])
        else {
            return self.emit_unknown(start, body_start);
        };
        let end = close + closer.len();

        if self.src[body_start..close].trim().is_empty() {
            return self.emit_unknown(start, end);
        }
        let tex = if keep_environment {
            &self.src[start..end]
        } else {
            &self.src[body_start..close]
        };
        let token = Token::Math {
            tex: tex.to_string(),
            inline: false,
            raw: self.src[start..end].to_string(),
        };
        self.emit(start, end, token);
        true
    }

    fn lex_bracket(&mut self) -> bool {
        let start = self.pos;
        match self.peek(1) {
            Some(b'@') => {
                let Some(close) = self.find_bracket_close(start + 2) else {
                    return self.emit_unknown(start, start + 2);
                };
                let end = close + 1;
                let key = self.src[start + 2..close].trim();
                if is_valid_identifier(key) {
                    let token = Token::CitationRef {
                        key: key.to_string(),
                        raw: self.src[start..end].to_string(),
                    };
                    self.emit(start, end, token);
                    true
                } else {
                    self.emit_unknown(start, end)
                }
            }
            Some(b) if b.is_ascii_alphabetic() => self.lex_named_bracket(start),
            _ => false,
        }
    }

    /// `[name:arg]` macros.
    fn lex_named_bracket(&mut self, start: usize) -> bool {
        let name_start = start + 1;
        let limit = (name_start + MAX_MACRO_ARG).min(self.bytes.len());
        let mut colon = name_start;
        while colon < limit && self.bytes[colon].is_ascii_alphabetic() {
            colon += 1;
        }
        if self.bytes.get(colon) != Some(&b':') {
            // Ordinary bracketed prose.
            return false;
        }

        let Some(close) = self.find_bracket_close(colon + 1) else {
            return self.emit_unknown(start, colon + 1);
        };
        let end = close + 1;

        match &self.src[name_start..colon] {
            "cite" => {
                if self.emit_citations(start, colon + 1, close, end) {
                    return true;
                }
            }
            "ref" => {
                let target = self.src[colon + 1..close].trim();
                if is_valid_identifier(target) {
                    let token = Token::CrossRef {
                        target_id: target.to_string(),
                        raw: self.src[start..end].to_string(),
                    };
                    self.emit(start, end, token);
                    return true;
                }
            }
            _ => {}
        }
        self.emit_unknown(start, end)
    }

    /// Emit one `CitationRef` per comma-separated key in `arg_start..arg_end`.
    ///
    /// The raw slices partition `start..end`: the first token owns the macro
    /// opener, each later token owns its leading comma, and the last token
    /// owns the closer. Returns false, emitting nothing, if any key is invalid.
    fn emit_citations(&mut self, start: usize, arg_start: usize, arg_end: usize, end: usize) -> bool {
        let arg = &self.src[arg_start..arg_end];

        let mut pieces = Vec::new();
        let mut piece_start = arg_start;
        for (index, part) in arg.split(',').enumerate() {
            let key = part.trim();
            if !is_valid_identifier(key) {
                return false;
            }
            let piece_end = piece_start + part.len();
            pieces.push((index, piece_start, piece_end, key.to_string()));
            piece_start = piece_end + 1;
        }

        let last = pieces.len() - 1;
        self.flush_text(start);
        for (index, piece_start, piece_end, key) in pieces {
            let raw_start = if index == 0 { start } else { piece_start - 1 };
            let raw_end = if index == last { end } else { piece_end };
            self.tokens.push(Token::CitationRef {
                key,
                raw: self.src[raw_start..raw_end].to_string(),
            });
        }
        self.pos = end;
        self.text_start = end;
        true
    }

    /// Closing `]` of a bracket macro on the same line.
    fn find_bracket_close(&self, from: usize) -> Option<usize> {
        let limit = (from + MAX_MACRO_ARG).min(self.bytes.len());
        (from..limit)
            .take_while(|&i| !matches!(self.bytes[i], b'\n' | b'['))
            .find(|&i| self.bytes[i] == b']')
    }

    /// Closing `}` of a brace group opened just before `from`, allowing nested
    /// groups, on the same line.
    fn find_group_close(&self, from: usize) -> Option<usize> {
        let limit = (from + MAX_MACRO_ARG).min(self.bytes.len());
        let mut depth = 0usize;
        for i in from..limit {
            match self.bytes[i] {
                b'\n' => return None,
                b'{' => depth += 1,
                b'}' if depth == 0 => return Some(i),
                b'}' => depth -= 1,
                _ => {}
            }
        }
        None
    }
}

fn find_cached(src: &str, from: usize, needle: &str, absent_from: &mut Option<usize>) -> Option<usize> {
    if absent_from.is_some_and(|p| from >= p) {
        return None;
    }
    match src.get(from..).and_then(|rest| rest.find(needle)) {
        Some(offset) => Some(from + offset),
        None => {
            *absent_from = Some(from);
            None
        }
    }
}

/// Citation keys and cross-reference targets: non-empty, no whitespace and
/// none of the characters that delimit macros.
pub fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| !c.is_whitespace() && !matches!(c, '[' | ']' | '{' | '}' | ',' | ';' | '@' | '$' | '\\'))
}
