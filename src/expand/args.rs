// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute argument interpretation.
//!
//! Arguments are never evaluated. Each recognized label is classified by the
//! shape of its expression and rendered to the text that gets spliced into
//! generated code:
//!
//! | Label | Accepted shapes | Rendering |
//! |-------|-----------------|-----------|
//! | `key` | string literal, member access, name | verbatim |
//! | `defaultValue` | anything | verbatim |
//! | `defaults` | `.standard`, `.member`, `A.b`, name | `.standard` is dropped, `.x` becomes `UserDefaults.x` |
//! | `encoder` / `decoder` | `.init()`, `.member`, `.call()`, `A.b`, name, call | `.init()` becomes `JSONEncoder()`, leading dot gets the coder type |
//! | `rawType` | `T.self` | `T` |
//! | `keyPrefix` | string literal | contents |
//!
//! Any other shape for a label other than `defaultValue` is treated as if the
//! argument were absent.

use crate::{
    config::{DECODER_TYPE, ENCODER_TYPE, INIT_SHORTHAND, STANDARD_MEMBER, STORE_TYPE},
    syntax::{Attribute, Expr, ExprKind}
};

/// Arguments of one attribute, rendered for splicing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentBundle {
    /// Explicit key expression.
    pub key:           Option<String>,
    /// Default value expression, kept whole for the literal check.
    pub default_value: Option<Expr>,
    /// Store override.
    pub store:         Option<String>,
    /// Encoder override.
    pub encoder:       Option<String>,
    /// Decoder override.
    pub decoder:       Option<String>,
    /// Raw type name from `rawType: T.self`.
    pub raw_type:      Option<String>,
    /// Container key prefix.
    pub key_prefix:    Option<String>
}

impl ArgumentBundle {
    /// Interpret every recognized label of `attribute`.
    ///
    /// Labels appearing more than once resolve to their first occurrence.
    #[must_use]
    pub fn from_attribute(attribute: &Attribute) -> Self {
        Self {
            key:           attribute.argument("key").and_then(key),
            default_value: attribute.argument("defaultValue").cloned(),
            store:         attribute.argument("defaults").and_then(store),
            encoder:       attribute
                .argument("encoder")
                .and_then(|expr| coder(expr, ENCODER_TYPE)),
            decoder:       attribute
                .argument("decoder")
                .and_then(|expr| coder(expr, DECODER_TYPE)),
            raw_type:      attribute.argument("rawType").and_then(raw_type),
            key_prefix:    attribute.argument("keyPrefix").and_then(string_contents)
        }
    }

    /// Default value text.
    #[must_use]
    pub fn default_text(&self) -> Option<&str> {
        self.default_value.as_ref().map(|expr| expr.text.as_str())
    }
}

fn key(expr: &Expr) -> Option<String> {
    match &expr.kind {
        ExprKind::StringLiteral {
            raw
        } => Some(format!("\"{raw}\"")),
        ExprKind::MemberAccess {
            ..
        }
        | ExprKind::DeclReference(_) => Some(expr.text.clone()),
        _ => None
    }
}

fn store(expr: &Expr) -> Option<String> {
    match &expr.kind {
        ExprKind::MemberAccess {
            ..
        } if expr.text == STANDARD_MEMBER => None,
        ExprKind::MemberAccess {
            ..
        } => Some(qualify(&expr.text, STORE_TYPE)),
        ExprKind::DeclReference(name) => Some(name.clone()),
        _ => None
    }
}

fn coder(expr: &Expr, coder_type: &str) -> Option<String> {
    match &expr.kind {
        ExprKind::FunctionCall {
            ..
        } if expr.text == INIT_SHORTHAND => Some(format!("{coder_type}()")),
        ExprKind::MemberAccess {
            ..
        }
        | ExprKind::FunctionCall {
            ..
        } => Some(qualify(&expr.text, coder_type)),
        ExprKind::DeclReference(name) => Some(name.clone()),
        _ => None
    }
}

fn qualify(text: &str, type_name: &str) -> String {
    if text.starts_with('.') {
        format!("{type_name}{text}")
    } else {
        text.to_owned()
    }
}

fn raw_type(expr: &Expr) -> Option<String> {
    match &expr.kind {
        ExprKind::MemberAccess {
            base: Some(base),
            ..
        } => Some(base.clone()),
        _ => None
    }
}

fn string_contents(expr: &Expr) -> Option<String> {
    match &expr.kind {
        ExprKind::StringLiteral {
            raw
        } => Some(raw.clone()),
        _ => None
    }
}
