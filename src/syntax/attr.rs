// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attributes and their labeled argument lists.

use proc_macro2::{Delimiter, LineColumn, TokenStream, TokenTree};
use syn::{
    Token,
    ext::IdentExt,
    parse::{Parse, ParseStream, Parser, discouraged::Speculative}
};

use super::{
    expr::Expr,
    render::render,
    tokens::{is_located, is_punct, peek_punct, skip_trivia}
};

/// `label: expression` or a bare `expression` inside an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledExpr {
    /// Argument label.
    pub label: Option<String>,
    /// Argument value.
    pub value: Expr
}

impl Parse for LabeledExpr {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let cursor = input.cursor();
        let labeled = cursor
            .ident()
            .and_then(|(_, rest)| rest.punct())
            .is_some_and(|(punct, rest)| {
                punct.as_char() == ':' && rest.punct().is_none_or(|(next, _)| next.as_char() != ':')
            });
        let label = if labeled {
            let ident = syn::Ident::parse_any(input)?;
            input.parse::<Token![:]>()?;
            Some(ident.to_string())
        } else {
            None
        };
        let tokens = collect_argument(input)?;
        let value = Expr::from_tokens(&tokens).ok_or_else(|| input.error("expected expression"))?;
        Ok(Self {
            label,
            value
        })
    }
}

/// Argument tokens up to the next top-level comma. Inside an argument list
/// line breaks never end an expression.
fn collect_argument(input: ParseStream<'_>) -> syn::Result<Vec<TokenTree>> {
    input.step(|cursor| {
        let mut rest = *cursor;
        let mut tokens: Vec<TokenTree> = Vec::new();
        let mut depth = 0_usize;
        while let Some((token, next)) = rest.token_tree() {
            let after_word = matches!(tokens.last(), Some(TokenTree::Ident(_)));
            let after_minus = tokens.last().is_some_and(|last| is_punct(last, '-'));
            if is_punct(&token, ',') && depth == 0 {
                break;
            }
            if is_punct(&token, '<') && (after_word || depth > 0) {
                depth += 1;
            } else if is_punct(&token, '>') && depth > 0 && !after_minus {
                depth -= 1;
            }
            tokens.push(token);
            rest = next;
        }
        Ok((tokens, rest))
    })
}

/// `@Name` or `@Name(arguments)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name without `@`.
    pub name:      String,
    /// Argument list; `None` when no parentheses were written.
    pub arguments: Option<Vec<LabeledExpr>>,
    /// Full attribute text as written, starting with `@`.
    pub text:      String,
    /// Position of `@`.
    pub start:     LineColumn,
    /// Position just past the attribute.
    pub end:       LineColumn
}

impl Attribute {
    /// Labeled arguments, empty when there is no argument list.
    #[must_use]
    pub fn arguments(&self) -> &[LabeledExpr] {
        self.arguments.as_deref().unwrap_or_default()
    }

    /// Value of the argument with `label`.
    #[must_use]
    pub fn argument(&self, label: &str) -> Option<&Expr> {
        self.arguments()
            .iter()
            .find(|argument| argument.label.as_deref() == Some(label))
            .map(|argument| &argument.value)
    }

    /// Synthesize an argument-less attribute positioned at `at`.
    #[must_use]
    pub fn synthesized(name: &str, at: LineColumn) -> Self {
        Self {
            name:      name.to_owned(),
            arguments: None,
            text:      format!("@{name}"),
            start:     at,
            end:       at
        }
    }

    /// Parse every attribute at the cursor, skipping doc comments between
    /// them.
    ///
    /// # Errors
    ///
    /// Fails on a malformed attribute.
    pub fn parse_outer(input: ParseStream<'_>) -> syn::Result<Vec<Self>> {
        let mut attributes = Vec::new();
        loop {
            skip_trivia(input)?;
            if !peek_punct(input, '@') {
                return Ok(attributes);
            }
            attributes.push(input.parse()?);
        }
    }
}

/// Every attribute written anywhere in `tokens`, nested groups included.
///
/// Used for bodies the front end does not parse as declarations; a token
/// run that does not read as an attribute is skipped.
#[must_use]
pub(crate) fn nested_attributes(tokens: TokenStream) -> Vec<Attribute> {
    let mut found = Vec::new();
    let scan = |input: ParseStream<'_>| -> syn::Result<()> {
        while !input.is_empty() {
            if peek_punct(input, '@') {
                let fork = input.fork();
                if let Ok(attribute) = fork.parse::<Attribute>() {
                    input.advance_to(&fork);
                    found.push(attribute);
                    continue;
                }
            }
            if let TokenTree::Group(group) = input.parse::<TokenTree>()? {
                found.extend(nested_attributes(group.stream()));
            }
        }
        Ok(())
    };
    if scan.parse2(tokens).is_err() {
        return Vec::new();
    }
    found
}

impl Parse for Attribute {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let at: Token![@] = input.parse()?;
        let start = at.spans[0].start();
        let first = syn::Ident::parse_any(input)?;
        let mut name = first.to_string();
        let mut end = first.span().end();
        while peek_punct(input, '.')
            && input
                .cursor()
                .punct()
                .is_some_and(|(_, rest)| rest.ident().is_some())
        {
            input.parse::<Token![.]>()?;
            let segment = syn::Ident::parse_any(input)?;
            name.push('.');
            name.push_str(&segment.to_string());
            end = segment.span().end();
        }

        let mut text = format!("@{name}");
        let mut arguments = None;
        if let Some((TokenTree::Group(group), _)) = input.cursor().token_tree()
            && group.delimiter() == Delimiter::Parenthesis
            && (!is_located(group.span()) || group.span_open().start().line == end.line)
        {
            text.push_str(&render(&[TokenTree::Group(group)]));
            let content;
            let paren = syn::parenthesized!(content in input);
            end = paren.span.close().end();
            let mut list = Vec::new();
            while !content.is_empty() {
                list.push(content.parse::<LabeledExpr>()?);
                if content.is_empty() {
                    break;
                }
                content.parse::<Token![,]>()?;
            }
            arguments = Some(list);
        }

        Ok(Self {
            name,
            arguments,
            text,
            start,
            end
        })
    }
}
