// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Token-to-text rendering.
//!
//! Expressions and types are carried into generated code as text. When the
//! tokens come from real source the original horizontal spacing is kept;
//! line breaks inside an expression collapse to a single space. Tokens
//! without positions are spaced by operator heuristics.

use proc_macro2::{Delimiter, LineColumn, Spacing, TokenTree};

use super::{mask::unmask, tokens::is_located};

/// A flattened piece of rendered text.
#[derive(Debug, Clone)]
struct Atom {
    text:    String,
    kind:    AtomKind,
    start:   LineColumn,
    end:     LineColumn,
    located: bool
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtomKind {
    Word,
    Literal,
    Operator { joint: bool },
    Open,
    Close
}

/// Render tokens as Swift source text.
#[must_use]
pub fn render(tokens: &[TokenTree]) -> String {
    let mut atoms = Vec::new();
    flatten(tokens, &mut atoms);
    let atoms = merge_operators(atoms);

    let mut text = String::new();
    let mut previous: Option<&Atom> = None;
    let mut after_prefix = false;
    for atom in &atoms {
        if let Some(previous) = previous
            && needs_space(previous, atom, after_prefix)
        {
            text.push(' ');
        }
        text.push_str(&atom.text);
        after_prefix = matches!(atom.kind, AtomKind::Operator { .. })
            && !is_postfix(previous, atom)
            && previous.is_none_or(|p| matches!(p.kind, AtomKind::Open | AtomKind::Operator { .. }));
        previous = Some(atom);
    }
    text
}

/// Render tokens with every space removed, for signature comparison.
#[must_use]
pub(crate) fn render_compact(tokens: &[TokenTree], erase: &[String]) -> String {
    let mut atoms = Vec::new();
    flatten(tokens, &mut atoms);
    atoms
        .into_iter()
        .map(|atom| {
            if atom.kind == AtomKind::Word && erase.contains(&atom.text) {
                "_".to_owned()
            } else {
                atom.text
            }
        })
        .collect()
}

fn flatten(tokens: &[TokenTree], atoms: &mut Vec<Atom>) {
    for token in tokens {
        match token {
            TokenTree::Group(group) => {
                let (open, close) = match group.delimiter() {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::Brace => ("{", "}"),
                    Delimiter::None => ("", "")
                };
                let inner: Vec<TokenTree> = group.stream().into_iter().collect();
                if open.is_empty() {
                    flatten(&inner, atoms);
                    continue;
                }
                atoms.push(atom(open, AtomKind::Open, group.span_open()));
                flatten(&inner, atoms);
                atoms.push(atom(close, AtomKind::Close, group.span_close()));
            }
            TokenTree::Ident(ident) => {
                atoms.push(atom(unmask(&ident.to_string()), AtomKind::Word, ident.span()));
            }
            TokenTree::Literal(literal) => {
                atoms.push(atom(unmask(&literal.to_string()), AtomKind::Literal, literal.span()));
            }
            TokenTree::Punct(punct) => atoms.push(atom(
                punct.as_char().to_string(),
                AtomKind::Operator {
                    joint: punct.spacing() == Spacing::Joint
                },
                punct.span()
            ))
        }
    }
}

fn atom(text: impl Into<String>, kind: AtomKind, span: proc_macro2::Span) -> Atom {
    Atom {
        text: text.into(),
        kind,
        start: span.start(),
        end: span.end(),
        located: is_located(span)
    }
}

/// Join unlocated joint punctuation into multi-character operators.
fn merge_operators(atoms: Vec<Atom>) -> Vec<Atom> {
    let mut merged: Vec<Atom> = Vec::with_capacity(atoms.len());
    for atom in atoms {
        if let Some(last) = merged.last_mut()
            && !atom.located
            && matches!(last.kind, AtomKind::Operator { joint: true })
            && matches!(atom.kind, AtomKind::Operator { .. })
        {
            last.text.push_str(&atom.text);
            last.kind = atom.kind;
            continue;
        }
        merged.push(atom);
    }
    merged
}

fn is_postfix(previous: Option<&Atom>, atom: &Atom) -> bool {
    matches!(atom.text.as_str(), "?" | "!")
        && previous.is_some_and(|p| matches!(p.kind, AtomKind::Word | AtomKind::Literal | AtomKind::Close))
}

fn needs_space(previous: &Atom, next: &Atom, after_prefix: bool) -> bool {
    if previous.located && next.located {
        if previous.end.line == next.start.line {
            return next.start.column > previous.end.column;
        }
        return previous.kind != AtomKind::Open && next.kind != AtomKind::Close && next.text != ".";
    }
    heuristic_space(previous, next, after_prefix)
}

fn heuristic_space(previous: &Atom, next: &Atom, after_prefix: bool) -> bool {
    if previous.kind == AtomKind::Open || next.kind == AtomKind::Close {
        return false;
    }
    if next.kind == AtomKind::Open {
        return next.text == "{";
    }
    if let AtomKind::Operator { .. } = next.kind {
        return match next.text.as_str() {
            "." | "," | ":" | ";" => false,
            "?" | "!" => !matches!(previous.kind, AtomKind::Word | AtomKind::Literal | AtomKind::Close),
            _ => !matches!(previous.text.as_str(), "." | "@" | "#" | "$")
        };
    }
    if let AtomKind::Operator { .. } = previous.kind {
        return match previous.text.as_str() {
            "." | "@" | "#" | "$" => false,
            "," | ":" | ";" => true,
            _ => !after_prefix
        };
    }
    true
}
