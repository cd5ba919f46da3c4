// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Literal `defaultValue` checks.
//!
//! Only literal defaults can be checked; any other expression is accepted as
//! written and left to the compiler.

use super::value_type::ValueType;
use crate::syntax::{Expr, ExprKind};

/// Kind of a literal expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralType {
    /// `"..."`
    String,
    /// `true` / `false`
    Boolean,
    /// `42`
    Integer,
    /// `3.14`
    Float
}

/// Outcome of checking a literal against a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMatch {
    /// The literal fits the type.
    Match,
    /// The literal cannot be the type.
    Mismatch,
    /// The literal may or may not fit; accepted.
    Indeterminate
}

impl LiteralType {
    /// Literal kind of an expression; `None` for non-literals and `nil`.
    #[must_use]
    pub fn of(expr: &Expr) -> Option<Self> {
        match expr.kind {
            ExprKind::StringLiteral {
                ..
            } => Some(Self::String),
            ExprKind::BooleanLiteral(_) => Some(Self::Boolean),
            ExprKind::IntegerLiteral => Some(Self::Integer),
            ExprKind::FloatLiteral => Some(Self::Float),
            _ => None
        }
    }

    /// Check this literal against `ty`. Optionals are checked against their
    /// wrapped type.
    ///
    /// | Literal | Matches | Indeterminate |
    /// |---------|---------|---------------|
    /// | string | `String`, `NSString` | |
    /// | boolean | `Bool` | |
    /// | integer | integers, `Float`, `Double`, `NSNumber` | |
    /// | float | `Float`, `Double` | `NSNumber` |
    #[must_use]
    pub fn check(self, ty: &ValueType) -> TypeMatch {
        if let ValueType::Optional(wrapped) = ty {
            return self.check(wrapped);
        }
        let fits = match self {
            Self::String => ty.is_string(),
            Self::Boolean => *ty == ValueType::Bool,
            Self::Integer => ty.is_integer() || ty.is_floating_point() || *ty == ValueType::NsNumber,
            Self::Float if *ty == ValueType::NsNumber => return TypeMatch::Indeterminate,
            Self::Float => ty.is_floating_point()
        };
        if fits { TypeMatch::Match } else { TypeMatch::Mismatch }
    }
}
