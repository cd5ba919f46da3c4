// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Position-based text edits over the original source.
//!
//! The front end reports positions as [`LineColumn`] (1-based line, column
//! counted in characters). [`LineIndex`] turns them into byte offsets and
//! [`Edits`] collects replacements that are applied in one forward pass, so
//! no edit ever sees another edit's output.

use proc_macro2::LineColumn;

/// Byte offsets of every line start.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    starts: Vec<usize>
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();
        Self {
            source,
            starts
        }
    }

    /// Byte offset of `position`, clamped to the end of its line.
    #[must_use]
    pub fn offset(&self, position: LineColumn) -> usize {
        let start = self.line_start(position.line);
        let line = &self.source[start..self.line_end(start)];
        start
            + line
                .char_indices()
                .nth(position.column)
                .map_or(line.len(), |(offset, _)| offset)
    }

    /// Offset of the start of the line holding `offset`.
    #[must_use]
    pub fn start_of_line(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(index) => self.starts[index],
            Err(index) => self.starts[index.saturating_sub(1)]
        }
    }

    /// Offset of the `\n` ending the line holding `offset`, or the source
    /// length on the last line.
    #[must_use]
    pub fn end_of_line(&self, offset: usize) -> usize {
        self.line_end(self.start_of_line(offset))
    }

    /// Leading whitespace of the line holding `offset`.
    #[must_use]
    pub fn indent_at(&self, offset: usize) -> &'a str {
        let start = self.start_of_line(offset);
        let line = &self.source[start..self.line_end(start)];
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..width]
    }

    /// Whether only whitespace precedes `offset` on its line.
    #[must_use]
    pub fn starts_line(&self, offset: usize) -> bool {
        self.source[self.start_of_line(offset)..offset].trim().is_empty()
    }

    /// Whether only whitespace follows `offset` on its line.
    #[must_use]
    pub fn ends_line(&self, offset: usize) -> bool {
        self.source[offset..self.end_of_line(offset)].trim().is_empty()
    }

    /// `offset` moved back over whitespace and newlines.
    #[must_use]
    pub fn skip_whitespace_back(&self, offset: usize) -> usize {
        self.source[..offset].trim_end().len()
    }

    /// `offset` moved forward over spaces and tabs.
    #[must_use]
    pub fn skip_blanks(&self, offset: usize) -> usize {
        let rest = &self.source[offset..];
        offset + rest.len() - rest.trim_start_matches([' ', '\t']).len()
    }

    fn line_start(&self, line: usize) -> usize {
        self.starts
            .get(line.saturating_sub(1))
            .copied()
            .unwrap_or(self.source.len())
    }

    fn line_end(&self, start: usize) -> usize {
        self.source[start..]
            .find('\n')
            .map_or(self.source.len(), |offset| start + offset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    start: usize,
    end:   usize,
    text:  String,
    seq:   usize
}

/// Pending replacements.
///
/// Insertions at the same offset appear in the order they were recorded. A
/// range that overlaps an earlier removal is trimmed to what is left of it.
#[derive(Debug, Clone, Default)]
pub struct Edits {
    edits: Vec<Edit>
}

impl Edits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `text` at `offset`.
    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.replace(offset, offset, text);
    }

    /// Remove `start..end`.
    pub fn remove(&mut self, start: usize, end: usize) {
        self.replace(start, end, String::new());
    }

    /// Replace `start..end` with `text`.
    pub fn replace(&mut self, start: usize, end: usize, text: impl Into<String>) {
        let seq = self.edits.len();
        self.edits.push(Edit {
            start,
            end: end.max(start),
            text: text.into(),
            seq
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply every edit to `source`.
    #[must_use]
    pub fn apply(mut self, source: &str) -> String {
        self.edits.sort_by_key(|edit| (edit.start, edit.seq));
        let mut output = String::with_capacity(source.len());
        let mut cursor = 0;
        for edit in self.edits {
            let start = edit.start.clamp(cursor, source.len());
            output.push_str(&source[cursor..start]);
            output.push_str(&edit.text);
            cursor = edit.end.clamp(start, source.len());
        }
        output.push_str(&source[cursor..]);
        output
    }
}
