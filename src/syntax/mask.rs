// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Swift lexical forms the token lexer cannot read.
//!
//! Before lexing, the source is rewritten one character for one character,
//! so every line and column the front end reports is also a position in the
//! untouched source. Rendering maps the stand-ins back with [`unmask`].
//!
//! | Swift | Rewritten |
//! |-------|-----------|
//! | key path `\.name`, `\Type.name` | `ǂ.name`, `ǂType.name` |
//! | interpolation `"a \(f("b"))"` | `"a ǂ(f(ǁbǁ))"` |
//! | raw string `#"a\d"#` | `#"aǂd"#` |
//! | multi-line `"""` body quotes | `ǁ` |
//!
//! `ǂ` is an identifier character, so a key path lexes as an identifier
//! followed by its member path. Inside string literals both stand-ins are
//! plain content.

use std::borrow::Cow;

/// Stands in for `\`.
const BACKSLASH: char = 'ǂ';
/// Stands in for `"` inside interpolations and string bodies.
const QUOTE: char = 'ǁ';

/// Rewrite `source` so the token lexer accepts it.
#[must_use]
pub(crate) fn mask(source: &str) -> Cow<'_, str> {
    if !source.contains(['\\', '#']) && !source.contains("\"\"\"") {
        return Cow::Borrowed(source);
    }
    let mut scanner = Scanner {
        chars:  source.chars().collect(),
        index:  0,
        output: String::with_capacity(source.len())
    };
    scanner.code();
    Cow::Owned(scanner.output)
}

/// Restore the characters [`mask`] replaced.
#[must_use]
pub(crate) fn unmask(text: &str) -> Cow<'_, str> {
    if text.contains([BACKSLASH, QUOTE]) {
        Cow::Owned(
            text.chars()
                .map(|ch| match ch {
                    BACKSLASH => '\\',
                    QUOTE => '"',
                    other => other
                })
                .collect()
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Whether `text` holds a masked backslash, i.e. comes from a key path.
#[must_use]
pub(crate) fn is_masked(text: &str) -> bool {
    text.contains(BACKSLASH)
}

struct Scanner {
    chars:  Vec<char>,
    index:  usize,
    output: String
}

impl Scanner {
    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.index + ahead).copied()
    }

    fn copy(&mut self) {
        if let Some(ch) = self.peek(0) {
            self.output.push(ch);
        }
        self.index += 1;
    }

    fn put(&mut self, ch: char) {
        self.output.push(ch);
        self.index += 1;
    }

    /// Number of `#` starting `ahead` characters from the cursor.
    fn hashes(&self, ahead: usize) -> usize {
        self.chars[(self.index + ahead).min(self.chars.len())..]
            .iter()
            .take_while(|ch| **ch == '#')
            .count()
    }

    fn starts_with(&self, ahead: usize, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(offset, ch)| self.peek(ahead + offset) == Some(ch))
    }

    fn code(&mut self) {
        while let Some(ch) = self.peek(0) {
            match ch {
                '/' if self.peek(1) == Some('/') => self.line_comment(),
                '/' if self.peek(1) == Some('*') => self.block_comment(),
                '\\' => self.put(BACKSLASH),
                '"' => self.string(0),
                '#' => {
                    let hashes = self.hashes(0);
                    if self.peek(hashes) == Some('"') {
                        self.string(hashes);
                    } else {
                        for _ in 0..hashes {
                            self.copy();
                        }
                    }
                }
                _ => self.copy()
            }
        }
    }

    fn line_comment(&mut self) {
        while let Some(ch) = self.peek(0)
            && ch != '\n'
        {
            self.copy();
        }
    }

    fn block_comment(&mut self) {
        let mut depth = 0usize;
        while self.peek(0).is_some() {
            if self.starts_with(0, "/*") {
                depth += 1;
                self.copy();
                self.copy();
            } else if self.starts_with(0, "*/") {
                depth -= 1;
                self.copy();
                self.copy();
                if depth == 0 {
                    return;
                }
            } else {
                self.copy();
            }
        }
    }

    /// A string literal whose opening delimiter starts at the cursor, with
    /// `hashes` leading `#`.
    fn string(&mut self, hashes: usize) {
        for _ in 0..hashes {
            self.copy();
        }
        let multiline = self.starts_with(0, "\"\"\"");
        let quotes = if multiline { 3 } else { 1 };
        for _ in 0..quotes {
            self.copy();
        }

        while let Some(ch) = self.peek(0) {
            if ch == '"' && self.closes(quotes, hashes) {
                for _ in 0..quotes {
                    self.copy();
                }
                for _ in 0..hashes {
                    self.copy();
                }
                return;
            }
            match ch {
                '"' => self.put(QUOTE),
                '\n' if !multiline => return,
                '\\' => self.escape(hashes),
                _ => self.copy()
            }
        }
    }

    fn closes(&self, quotes: usize, hashes: usize) -> bool {
        (0..quotes).all(|offset| self.peek(offset) == Some('"')) && self.hashes(quotes) >= hashes
    }

    /// A backslash inside a string body.
    fn escape(&mut self, hashes: usize) {
        let interpolation = self.hashes(1) == hashes && self.peek(1 + hashes) == Some('(');
        if interpolation {
            self.put(BACKSLASH);
            for _ in 0..hashes {
                self.copy();
            }
            self.interpolation();
        } else if hashes > 0 {
            self.put(BACKSLASH);
        } else {
            self.copy();
            self.copy();
        }
    }

    /// The parenthesized part of `\( ... )`, cursor at `(`.
    fn interpolation(&mut self) {
        let mut depth = 0usize;
        let mut quoted = false;
        while let Some(ch) = self.peek(0) {
            match ch {
                '"' => {
                    quoted = !quoted;
                    self.put(QUOTE);
                }
                '\\' => self.put(BACKSLASH),
                '(' if !quoted => {
                    depth += 1;
                    self.copy();
                }
                ')' if !quoted => {
                    depth = depth.saturating_sub(1);
                    self.copy();
                    if depth == 0 {
                        return;
                    }
                }
                '\n' => return,
                _ => self.copy()
            }
        }
    }
}
