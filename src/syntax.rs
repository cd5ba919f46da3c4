// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declaration front end.
//!
//! Reads the subset of Swift declaration syntax the accessor expansions need
//! and records source positions for every piece the driver later edits.
//!
//! # Lexing
//!
//! Source text is tokenized by `proc-macro2`'s fallback lexer with
//! `span-locations` enabled, then parsed with `syn`'s [`ParseStream`]
//! machinery. Swift and Rust agree on identifiers, numbers, plain string
//! literals, punctuation and balanced delimiters, which is all the
//! declaration grammar below needs. Key paths, interpolation, raw strings
//! and multi-line strings are first rewritten character for character by
//! [`mask`], which keeps every reported line and column valid for the
//! original text. What the lexer still cannot read (backtick identifiers)
//! surfaces as a parse diagnostic.
//!
//! # Grammar
//!
//! ```text
//! SourceFile  := Member*
//! Member      := Attribute* Modifier* ( Variable | Group | Function | Other )
//! Attribute   := '@' Name [ '(' LabeledExpr,* ')' ]
//! Variable    := ('var' | 'let') Binding (',' Binding)*
//! Binding     := Pattern [':' Type] ['=' Expr] [AccessorBlock]
//! Group       := ('class' | 'struct' | 'enum' | 'actor' | 'extension' | 'protocol')
//!                Name [Generics] [':' Inheritance] [where ...] '{' Member* '}'
//! Function    := ('func' Name | 'init') [Generics] '(' Param,* ')' Effects ['->' Type] [Body]
//! Other       := tokens up to the next declaration start
//! ```
//!
//! # Module Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`tokens`] | Lookahead predicates, identifier gluing, token runs |
//! | [`mask`] | Swift-only lexical forms rewritten before lexing |
//! | [`render`] | Token-to-text rendering that keeps source spacing |
//! | [`ty`] | [`TypeSyntax`] |
//! | [`expr`] | [`Expr`] classification |
//! | [`attr`] | [`Attribute`], [`LabeledExpr`] |
//! | [`decl`] | [`VariableDecl`] and its bindings |
//! | [`group`] | [`DeclGroup`], [`FunctionDecl`], [`Member`], [`SourceFile`] |
//!
//! [`ParseStream`]: syn::parse::ParseStream

mod attr;
mod decl;
mod expr;
mod group;
mod mask;
mod render;
mod tokens;
mod ty;


pub use attr::{Attribute, LabeledExpr};
pub use decl::{AccessorBlock, BindingSpecifier, Modifier, Pattern, PatternBinding, VariableDecl};
pub use expr::{Expr, ExprKind};
pub use group::{
    DeclGroup, FunctionDecl, GroupKind, Member, OtherDecl, Parameter, Signature, SourceFile
};
pub use render::render;
pub use tokens::Name;
pub use ty::{TypeAnnotation, TypeSyntax};

/// Parse a whole source file.
///
/// # Errors
///
/// Returns a `syn::Error` positioned at the first token the front end
/// could not read.
pub fn parse_source(source: &str) -> syn::Result<SourceFile> {
    syn::parse_str(&mask::mask(source))
}
