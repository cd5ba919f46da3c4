// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Expression classification.
//!
//! Expressions are never evaluated. Each one keeps its rendered text plus a
//! coarse shape, which is all argument interpretation and the literal type
//! check look at.

use proc_macro2::{Delimiter, LineColumn, TokenTree};

use super::{
    mask::{is_masked, unmask},
    render::render,
    tokens::{end_of, is_punct, start_of}
};

/// Shape of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// `"..."`. Holds the text between the quotes, escapes untouched.
    StringLiteral {
        /// Literal contents as written.
        raw: String
    },

    /// `true` or `false`.
    BooleanLiteral(bool),

    /// `42`, `-1`, `0xFF`.
    IntegerLiteral,

    /// `3.14`, `-2.5e3`.
    FloatLiteral,

    /// `nil`.
    NilLiteral,

    /// `.member`, `Base.member`, `.a.b`.
    MemberAccess {
        /// Everything before the last `.`; `None` for an implicit `.member`.
        base:   Option<String>,
        /// Last member name.
        member: String
    },

    /// A bare name.
    DeclReference(String),

    /// `callee(...)` where the callee is a name or member path.
    FunctionCall {
        /// Callee text, e.g. `URL`, `.init`, `JSONEncoder.init`.
        callee: String
    },

    /// Anything else.
    Other
}

/// An expression with its source text and extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    /// Classified shape.
    pub kind:  ExprKind,
    /// Rendered source text.
    pub text:  String,
    /// Position of the first token.
    pub start: LineColumn,
    /// Position just past the last token.
    pub end:   LineColumn
}

impl Expr {
    /// Build an expression from its tokens. Returns `None` for an empty run.
    #[must_use]
    pub fn from_tokens(tokens: &[TokenTree]) -> Option<Self> {
        let start = start_of(tokens)?;
        let end = end_of(tokens)?;
        Some(Self {
            kind: classify(tokens),
            text: render(tokens),
            start,
            end
        })
    }

    /// Whether the expression is the given implicit member (`.standard`).
    #[must_use]
    pub fn is_implicit_member(&self, name: &str) -> bool {
        matches!(&self.kind, ExprKind::MemberAccess { base: None, member } if member == name)
    }
}

fn classify(tokens: &[TokenTree]) -> ExprKind {
    match tokens {
        [TokenTree::Literal(literal)] => literal_kind(literal),
        [TokenTree::Punct(minus), TokenTree::Literal(literal)] if minus.as_char() == '-' => {
            match literal_kind(literal) {
                kind @ (ExprKind::IntegerLiteral | ExprKind::FloatLiteral) => kind,
                _ => ExprKind::Other
            }
        }
        [TokenTree::Ident(ident)] => match ident.to_string().as_str() {
            "true" => ExprKind::BooleanLiteral(true),
            "false" => ExprKind::BooleanLiteral(false),
            "nil" => ExprKind::NilLiteral,
            name => ExprKind::DeclReference(name.to_owned())
        },
        _ => path_or_call(tokens)
    }
}

fn literal_kind(literal: &proc_macro2::Literal) -> ExprKind {
    let text = literal.to_string();
    match syn::Lit::new(literal.clone()) {
        syn::Lit::Str(_) if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') => {
            ExprKind::StringLiteral {
                raw: unmask(&text[1..text.len() - 1]).into_owned()
            }
        }
        syn::Lit::Int(_) => ExprKind::IntegerLiteral,
        syn::Lit::Float(_) => ExprKind::FloatLiteral,
        _ => ExprKind::Other
    }
}

/// Member paths (`.a`, `A.b.c`) and calls on them (`A.b(...)`).
fn path_or_call(tokens: &[TokenTree]) -> ExprKind {
    let (path, is_call) = match tokens.split_last() {
        Some((TokenTree::Group(group), path)) if group.delimiter() == Delimiter::Parenthesis => {
            (path, true)
        }
        _ => (tokens, false)
    };
    let Some((leading_dot, segments)) = path_segments(path) else {
        return ExprKind::Other;
    };
    if is_call {
        return ExprKind::FunctionCall {
            callee: render(path)
        };
    }
    let Some((member, base)) = segments.split_last() else {
        return ExprKind::Other;
    };
    let prefix = if leading_dot { "." } else { "" };
    match (leading_dot, base.is_empty()) {
        (false, true) => ExprKind::DeclReference(member.clone()),
        (true, true) => ExprKind::MemberAccess {
            base:   None,
            member: member.clone()
        },
        _ => ExprKind::MemberAccess {
            base:   Some(format!("{prefix}{}", base.join("."))),
            member: member.clone()
        }
    }
}

/// Split `[.]a.b.c` into its segments. `None` when the tokens are not a
/// plain dotted path.
fn path_segments(tokens: &[TokenTree]) -> Option<(bool, Vec<String>)> {
    let leading_dot = tokens.first().is_some_and(|token| is_punct(token, '.'));
    let rest = if leading_dot { &tokens[1..] } else { tokens };
    let mut segments = Vec::new();
    for (index, token) in rest.iter().enumerate() {
        match token {
            TokenTree::Ident(ident) if index % 2 == 0 => {
                let segment = ident.to_string();
                if is_masked(&segment) {
                    return None;
                }
                segments.push(segment);
            }
            token if index % 2 == 1 && is_punct(token, '.') => {}
            _ => return None
        }
    }
    if segments.is_empty() || rest.len() % 2 == 0 {
        return None;
    }
    Some((leading_dot, segments))
}

#[cfg(test)]
mod tests {
    use super::{super::mask::mask, *};

    fn expr(source: &str) -> Expr {
        let tokens: Vec<TokenTree> = source.parse::<proc_macro2::TokenStream>().unwrap().into_iter().collect();
        Expr::from_tokens(&tokens).unwrap()
    }

    #[test]
    fn literals() {
        assert_eq!(
            expr("\"someKey\"").kind,
            ExprKind::StringLiteral {
                raw: "someKey".into()
            }
        );
        assert_eq!(expr("true").kind, ExprKind::BooleanLiteral(true));
        assert_eq!(expr("42").kind, ExprKind::IntegerLiteral);
        assert_eq!(expr("-1").kind, ExprKind::IntegerLiteral);
        assert_eq!(expr("3.14").kind, ExprKind::FloatLiteral);
        assert_eq!(expr("-2.5").kind, ExprKind::FloatLiteral);
        assert_eq!(expr("nil").kind, ExprKind::NilLiteral);
    }

    #[test]
    fn member_paths() {
        assert_eq!(
            expr(".standard").kind,
            ExprKind::MemberAccess {
                base:   None,
                member: "standard".into()
            }
        );
        assert_eq!(
            expr("Int.self").kind,
            ExprKind::MemberAccess {
                base:   Some("Int".into()),
                member: "self".into()
            }
        );
        assert_eq!(
            expr("Constants.keys.name").kind,
            ExprKind::MemberAccess {
                base:   Some("Constants.keys".into()),
                member: "name".into()
            }
        );
        assert_eq!(expr("someKey").kind, ExprKind::DeclReference("someKey".into()));
        assert!(expr(".standard").is_implicit_member("standard"));
    }

    #[test]
    fn calls() {
        assert_eq!(
            expr(".init()").kind,
            ExprKind::FunctionCall {
                callee: ".init".into()
            }
        );
        assert_eq!(
            expr("MyCodable(value: 1)").kind,
            ExprKind::FunctionCall {
                callee: "MyCodable".into()
            }
        );
        assert_eq!(expr("URL(string: \"x\")!").kind, ExprKind::Other);
    }

    #[test]
    fn key_paths_and_interpolation_keep_their_text() {
        let key_path = expr(&mask("\\Settings.count"));
        assert_eq!(key_path.kind, ExprKind::Other);
        assert_eq!(key_path.text, "\\Settings.count");
        assert_eq!(
            expr(&mask("\"v\\(version)_key\"")).kind,
            ExprKind::StringLiteral {
                raw: "v\\(version)_key".into()
            }
        );
    }

    #[test]
    fn text_is_rendered_source() {
        assert_eq!(expr("[\"a\": 1]").text, "[\"a\": 1]");
        assert_eq!(expr("a ?? b").kind, ExprKind::Other);
    }
}
