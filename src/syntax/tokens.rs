// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Token-level helpers shared by the declaration parsers.
//!
//! Swift statements end at line breaks rather than at a terminator, so the
//! token runs collected here consult span positions: a token on a new line
//! ends the run unless it is an operator continuing the previous line.
//! Tokens without a source position (built in tests from `parse_quote!`)
//! never end a run this way.

use proc_macro2::{Delimiter, LineColumn, Span, TokenTree};
use syn::{buffer::Cursor, parse::ParseStream};

/// Words that begin a declaration.
pub(crate) const DECLARATION_KEYWORDS: &[&str] = &[
    "var",
    "let",
    "func",
    "init",
    "deinit",
    "subscript",
    "class",
    "struct",
    "enum",
    "actor",
    "extension",
    "protocol",
    "typealias",
    "associatedtype",
    "import",
    "case",
    "operator",
    "precedencegroup",
    "macro"
];

/// Declaration modifiers. `class` is handled separately since it is also a
/// declaration keyword.
pub(crate) const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "private",
    "fileprivate",
    "internal",
    "open",
    "package",
    "static",
    "final",
    "override",
    "mutating",
    "nonmutating",
    "lazy",
    "weak",
    "unowned",
    "dynamic",
    "optional",
    "required",
    "convenience",
    "indirect",
    "nonisolated",
    "isolated",
    "prefix",
    "postfix",
    "infix",
    "distributed",
    "consuming",
    "borrowing"
];

/// Words that follow a `class` modifier.
const CLASS_MEMBER_KEYWORDS: &[&str] = &["var", "let", "func", "subscript", "init"];

/// Accessor specifiers inside an accessor block.
pub(crate) const ACCESSOR_KEYWORDS: &[&str] = &[
    "get",
    "set",
    "willSet",
    "didSet",
    "init",
    "_modify",
    "_read",
    "modify",
    "read",
    "unsafeAddress",
    "unsafeMutableAddress"
];

/// Compiler directives that start their own line.
const DIRECTIVES: &[&str] = &[
    "if",
    "elseif",
    "else",
    "endif",
    "warning",
    "error",
    "sourceLocation"
];

/// Characters of operators that may continue an expression on a new line.
const CONTINUATION_CHARS: &str = ".+-*/%=<>!&|^?~:";

/// Identifier with its source extent.
///
/// Swift identifiers may contain `$`, which the lexer splits off as a
/// separate punctuation token; [`parse_name`] glues adjacent pieces back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Identifier text.
    pub text:  String,
    /// Position of the first character.
    pub start: LineColumn,
    /// Position just past the last character.
    pub end:   LineColumn
}

/// Whether a span carries a real source position.
///
/// Tokens built without a source map all share one empty span.
#[must_use]
pub(crate) fn is_located(span: Span) -> bool {
    span.start() != span.end()
}

/// Whether `token` is the punctuation character `ch`.
#[must_use]
pub(crate) fn is_punct(token: &TokenTree, ch: char) -> bool {
    matches!(token, TokenTree::Punct(punct) if punct.as_char() == ch)
}

/// Word at the cursor, if any.
#[must_use]
pub(crate) fn word_at(cursor: Cursor<'_>) -> Option<String> {
    cursor.ident().map(|(ident, _)| ident.to_string())
}

/// Punctuation character at the cursor, if any.
#[must_use]
pub(crate) fn punct_at(cursor: Cursor<'_>) -> Option<char> {
    cursor.punct().map(|(punct, _)| punct.as_char())
}

/// Whether the next token is the word `expected`.
#[must_use]
pub(crate) fn peek_word(input: ParseStream<'_>, expected: &str) -> bool {
    word_at(input.cursor()).is_some_and(|word| word == expected)
}

/// Whether the next token is the punctuation `ch`.
#[must_use]
pub(crate) fn peek_punct(input: ParseStream<'_>, ch: char) -> bool {
    punct_at(input.cursor()) == Some(ch)
}

/// Whether the next token is a lone `=` (assignment, not `==`).
#[must_use]
pub(crate) fn peek_assignment(input: ParseStream<'_>) -> bool {
    let Some((punct, rest)) = input.cursor().punct() else {
        return false;
    };
    punct.as_char() == '=' && punct_at(rest) != Some('=')
}

/// Whether the next tokens are a `->` arrow.
#[must_use]
pub(crate) fn peek_arrow(cursor: Cursor<'_>) -> bool {
    cursor
        .punct()
        .is_some_and(|(punct, rest)| punct.as_char() == '-' && punct_at(rest) == Some('>'))
}

/// Whether `word` acts as a modifier when followed by `rest`.
#[must_use]
pub(crate) fn is_modifier(word: &str, rest: Cursor<'_>) -> bool {
    if word == "class" {
        return word_at(rest).is_some_and(|next| {
            CLASS_MEMBER_KEYWORDS.contains(&next.as_str())
                || MODIFIER_KEYWORDS.contains(&next.as_str())
        });
    }
    MODIFIER_KEYWORDS.contains(&word)
}

/// Whether a modifier detail such as `(set)` starts at the cursor.
#[must_use]
pub(crate) fn has_modifier_detail(cursor: Cursor<'_>) -> bool {
    cursor
        .group(Delimiter::Parenthesis)
        .is_some_and(|(inside, ..)| inside.ident().is_some_and(|(_, after)| after.eof()))
}

/// Skip a modifier detail directly after a modifier.
#[must_use]
pub(crate) fn skip_modifier_detail(cursor: Cursor<'_>) -> Cursor<'_> {
    match cursor.group(Delimiter::Parenthesis) {
        Some((_, _, rest)) if has_modifier_detail(cursor) => rest,
        _ => cursor
    }
}

/// Cursor past a doc comment, if one starts here.
///
/// The lexer turns `///` comments into `#[doc = "..."]` tokens.
#[must_use]
pub(crate) fn skip_doc_comment(cursor: Cursor<'_>) -> Option<Cursor<'_>> {
    let (punct, rest) = cursor.punct()?;
    if punct.as_char() != '#' {
        return None;
    }
    let rest = match rest.punct() {
        Some((bang, after)) if bang.as_char() == '!' => after,
        _ => rest
    };
    rest.group(Delimiter::Bracket).map(|(_, _, after)| after)
}

/// Whether a compiler directive (`#if`, `#endif`, ...) starts here.
#[must_use]
pub(crate) fn is_directive(cursor: Cursor<'_>) -> bool {
    cursor.punct().is_some_and(|(punct, rest)| {
        punct.as_char() == '#' && word_at(rest).is_some_and(|word| DIRECTIVES.contains(&word.as_str()))
    })
}

/// Whether a new declaration begins at the cursor.
#[must_use]
pub(crate) fn starts_declaration(cursor: Cursor<'_>) -> bool {
    if let Some((punct, _)) = cursor.punct() {
        return match punct.as_char() {
            '@' | ';' => true,
            '#' => skip_doc_comment(cursor).is_some() || is_directive(cursor),
            _ => false
        };
    }
    let mut cursor = cursor;
    while let Some((ident, rest)) = cursor.ident() {
        let word = ident.to_string();
        if DECLARATION_KEYWORDS.contains(&word.as_str()) {
            return true;
        }
        if !is_modifier(&word, rest) {
            return false;
        }
        cursor = skip_modifier_detail(rest);
    }
    false
}

/// Whether a brace group at the cursor is an accessor block rather than a
/// getter body or trailing closure.
#[must_use]
pub(crate) fn is_accessor_block(cursor: Cursor<'_>) -> bool {
    let Some((inside, _, _)) = cursor.group(Delimiter::Brace) else {
        return false;
    };
    if punct_at(inside) == Some('@') {
        return true;
    }
    let Some((ident, rest)) = inside.ident() else {
        return false;
    };
    ACCESSOR_KEYWORDS.contains(&ident.to_string().as_str())
        && (rest.eof()
            || rest.ident().is_some()
            || rest.group(Delimiter::Brace).is_some()
            || rest.group(Delimiter::Parenthesis).is_some())
}

/// Whether a token on a new line continues the previous line's expression.
#[must_use]
fn continues_expression(token: &TokenTree) -> bool {
    matches!(token, TokenTree::Punct(punct) if CONTINUATION_CHARS.contains(punct.as_char()))
}

/// Whether `token` starts on a later line than `previous` ends.
#[must_use]
fn on_new_line(previous: &TokenTree, token: &TokenTree) -> bool {
    let (previous, current) = (previous.span(), token.span());
    is_located(previous) && is_located(current) && current.start().line > previous.end().line
}

/// Whether `token` (at `cursor`) ends a run that currently ends in `previous`.
fn ends_run(previous: &TokenTree, token: &TokenTree, cursor: Cursor<'_>, stop_at_comma: bool) -> bool {
    if is_punct(token, ';') || (stop_at_comma && is_punct(token, ',')) {
        return true;
    }
    if on_new_line(previous, token) && !continues_expression(token) {
        return true;
    }
    if is_punct(previous, '.') {
        return false;
    }
    starts_declaration(cursor) || is_accessor_block(cursor)
}

/// Collect an expression: stops at a top-level comma, an accessor block, a
/// new declaration, or a line break that does not continue the expression.
///
/// # Errors
///
/// Never fails; the `Result` matches [`ParseStream::step`].
pub(crate) fn collect_expression(input: ParseStream<'_>) -> syn::Result<Vec<TokenTree>> {
    collect_run(input, true)
}

/// Collect an unrecognized statement. Always consumes at least one token.
///
/// # Errors
///
/// Never fails; the `Result` matches [`ParseStream::step`].
pub(crate) fn collect_statement(input: ParseStream<'_>) -> syn::Result<Vec<TokenTree>> {
    collect_run(input, false)
}

fn collect_run(input: ParseStream<'_>, stop_at_comma: bool) -> syn::Result<Vec<TokenTree>> {
    input.step(|cursor| {
        let mut rest = *cursor;
        let mut tokens: Vec<TokenTree> = Vec::new();
        while let Some((token, next)) = rest.token_tree() {
            if let Some(previous) = tokens.last()
                && ends_run(previous, &token, rest, stop_at_comma)
            {
                break;
            }
            if tokens.is_empty() && stop_at_comma && is_punct(&token, ',') {
                break;
            }
            tokens.push(token);
            rest = next;
        }
        Ok((tokens, rest))
    })
}

/// Consume the remaining tokens of a delimited group's contents.
///
/// # Errors
///
/// Never fails; the `Result` matches [`ParseStream::step`].
pub(crate) fn collect_all(input: ParseStream<'_>) -> syn::Result<Vec<TokenTree>> {
    input.step(|cursor| {
        let mut rest = *cursor;
        let mut tokens = Vec::new();
        while let Some((token, next)) = rest.token_tree() {
            tokens.push(token);
            rest = next;
        }
        Ok((tokens, rest))
    })
}

/// Consume tokens up to (not including) a brace group or the word `where`.
///
/// # Errors
///
/// Never fails; the `Result` matches [`ParseStream::step`].
pub(crate) fn collect_until_body(input: ParseStream<'_>) -> syn::Result<Vec<TokenTree>> {
    input.step(|cursor| {
        let mut rest = *cursor;
        let mut tokens: Vec<TokenTree> = Vec::new();
        while let Some((token, next)) = rest.token_tree() {
            if rest.group(Delimiter::Brace).is_some() || word_at(rest).is_some_and(|w| w == "where") {
                break;
            }
            if let Some(previous) = tokens.last()
                && ends_run(previous, &token, rest, false)
            {
                break;
            }
            tokens.push(token);
            rest = next;
        }
        Ok((tokens, rest))
    })
}

/// Skip statement separators and doc comments.
///
/// # Errors
///
/// Never fails; the `Result` matches [`ParseStream::step`].
pub(crate) fn skip_trivia(input: ParseStream<'_>) -> syn::Result<()> {
    input.step(|cursor| {
        let mut rest = *cursor;
        loop {
            if let Some(after) = skip_doc_comment(rest) {
                rest = after;
            } else if let Some((punct, after)) = rest.punct()
                && punct.as_char() == ';'
            {
                rest = after;
            } else {
                break;
            }
        }
        Ok(((), rest))
    })
}

/// Parse an identifier, gluing `$` pieces (`_$observationRegistrar`).
///
/// # Errors
///
/// Fails when no identifier starts at the cursor.
pub(crate) fn parse_name(input: ParseStream<'_>) -> syn::Result<Name> {
    input.step(|cursor| {
        let mut rest = *cursor;
        let mut text = String::new();
        let mut start: Option<LineColumn> = None;
        let mut end = LineColumn {
            line:   0,
            column: 0
        };
        let mut last_was_word = false;
        loop {
            let (piece, span, next, is_word) = if let Some((ident, next)) = rest.ident() {
                (ident.to_string(), ident.span(), next, true)
            } else if let Some((punct, next)) = rest.punct()
                && punct.as_char() == '$'
            {
                ("$".to_owned(), punct.span(), next, false)
            } else {
                break;
            };
            if start.is_some() && ((is_word && last_was_word) || !touches(end, span)) {
                break;
            }
            start.get_or_insert(span.start());
            text.push_str(&piece);
            end = span.end();
            last_was_word = is_word;
            rest = next;
        }
        match start {
            Some(start) if text != "$" => Ok((
                Name {
                    text,
                    start,
                    end
                },
                rest
            )),
            _ => Err(cursor.error("expected identifier"))
        }
    })
}

/// Whether `span` starts exactly where the previous piece ended.
fn touches(previous_end: LineColumn, span: Span) -> bool {
    !is_located(span) || span.start() == previous_end
}

/// Parse a generic parameter clause `<T, U: P>` and return the parameter
/// names.
///
/// # Errors
///
/// Fails on an unbalanced clause.
pub(crate) fn parse_generic_parameters(input: ParseStream<'_>) -> syn::Result<Vec<String>> {
    input.step(|cursor| {
        let mut rest = *cursor;
        let mut names = Vec::new();
        let mut depth = 0_usize;
        let mut expect_name = false;
        while let Some((token, next)) = rest.token_tree() {
            rest = next;
            match &token {
                TokenTree::Punct(punct) if punct.as_char() == '<' => {
                    depth += 1;
                    expect_name = depth == 1;
                }
                TokenTree::Punct(punct) if punct.as_char() == '>' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok((names, rest));
                    }
                }
                TokenTree::Punct(punct) if punct.as_char() == ',' && depth == 1 => {
                    expect_name = true;
                }
                TokenTree::Ident(ident) if expect_name => {
                    names.push(ident.to_string());
                    expect_name = false;
                }
                _ => expect_name = false
            }
        }
        Err(cursor.error("unterminated generic parameter clause"))
    })
}

/// Split a token slice at top-level `separator` characters, treating
/// `<`...`>` after a word as nesting.
#[must_use]
pub(crate) fn split_top_level(tokens: &[TokenTree], separator: char) -> Vec<&[TokenTree]> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut from = 0;
    for (index, token) in tokens.iter().enumerate() {
        let after_word = index > 0 && matches!(tokens[index - 1], TokenTree::Ident(_));
        let after_minus = index > 0 && is_punct(&tokens[index - 1], '-');
        if is_punct(token, '<') && (after_word || depth > 0) {
            depth += 1;
        } else if is_punct(token, '>') && depth > 0 && !after_minus {
            depth -= 1;
        } else if is_punct(token, separator) && depth == 0 {
            parts.push(&tokens[from..index]);
            from = index + 1;
        }
    }
    if from < tokens.len() {
        parts.push(&tokens[from..]);
    }
    parts
}

/// Position just past the last token of a slice.
#[must_use]
pub(crate) fn end_of(tokens: &[TokenTree]) -> Option<LineColumn> {
    tokens.last().map(|token| token.span().end())
}

/// Position of the first token of a slice.
#[must_use]
pub(crate) fn start_of(tokens: &[TokenTree]) -> Option<LineColumn> {
    tokens.first().map(|token| token.span().start())
}

/// Whether a group of the given delimiter is next.
#[must_use]
pub(crate) fn peek_group(input: ParseStream<'_>, delimiter: Delimiter) -> bool {
    input.cursor().group(delimiter).is_some()
}

/// Start position of the next token.
#[must_use]
pub(crate) fn next_start(input: ParseStream<'_>) -> LineColumn {
    input.cursor().span().start()
}
