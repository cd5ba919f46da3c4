// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type syntax.
//!
//! Only the shapes the value-type resolver distinguishes get their own
//! variant; everything else keeps just enough structure to be rendered back.

use std::fmt;

use proc_macro2::{Delimiter, LineColumn};
use syn::{
    Token,
    ext::IdentExt,
    parse::{Parse, ParseStream}
};

use super::tokens::{peek_arrow, peek_group, peek_punct, peek_word, word_at};

/// A written type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSyntax {
    /// `Name` or `Name<Args>`.
    Identifier {
        /// Type name.
        name:         String,
        /// Generic arguments, empty when absent.
        generic_args: Vec<TypeSyntax>
    },

    /// `Base.Name`.
    Member {
        /// Qualifying type.
        base:         Box<TypeSyntax>,
        /// Member type name.
        name:         String,
        /// Generic arguments, empty when absent.
        generic_args: Vec<TypeSyntax>
    },

    /// `T?`.
    Optional(Box<TypeSyntax>),

    /// `T!`.
    ImplicitlyUnwrapped(Box<TypeSyntax>),

    /// `[T]`.
    Array(Box<TypeSyntax>),

    /// `[K: V]`.
    Dictionary {
        /// Key type.
        key:   Box<TypeSyntax>,
        /// Value type.
        value: Box<TypeSyntax>
    },

    /// `(A, B)`. A single parenthesized type is kept as a one-element tuple.
    Tuple(Vec<TypeSyntax>),

    /// `(A) async throws -> R`.
    Function {
        /// Parameter types.
        parameters: Vec<TypeSyntax>,
        /// Effect words between the parameters and the arrow.
        effects:    Vec<String>,
        /// Result type.
        result:     Box<TypeSyntax>
    },

    /// `some P`, `any P`, `T.Type`, `A & B`, attributed types.
    Other(String)
}

impl TypeSyntax {
    /// Whether the outermost layer is `?`.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// The type with one outer `?` removed.
    #[must_use]
    pub fn unwrapped(&self) -> &Self {
        match self {
            Self::Optional(wrapped) => wrapped,
            other => other
        }
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier {
                name,
                generic_args
            } => {
                f.write_str(name)?;
                write_generic_args(f, generic_args)
            }
            Self::Member {
                base,
                name,
                generic_args
            } => {
                write!(f, "{base}.{name}")?;
                write_generic_args(f, generic_args)
            }
            Self::Optional(wrapped) => write!(f, "{wrapped}?"),
            Self::ImplicitlyUnwrapped(wrapped) => write!(f, "{wrapped}!"),
            Self::Array(element) => write!(f, "[{element}]"),
            Self::Dictionary {
                key,
                value
            } => write!(f, "[{key}: {value}]"),
            Self::Tuple(elements) => {
                f.write_str("(")?;
                write_list(f, elements)?;
                f.write_str(")")
            }
            Self::Function {
                parameters,
                effects,
                result
            } => {
                f.write_str("(")?;
                write_list(f, parameters)?;
                f.write_str(")")?;
                for effect in effects {
                    write!(f, " {effect}")?;
                }
                write!(f, " -> {result}")
            }
            Self::Other(text) => f.write_str(text)
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[TypeSyntax]) -> fmt::Result {
    for (index, ty) in types.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

fn write_generic_args(f: &mut fmt::Formatter<'_>, args: &[TypeSyntax]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    write_list(f, args)?;
    f.write_str(">")
}

/// Type annotation with the position just past its last token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAnnotation {
    /// Annotated type.
    pub ty:  TypeSyntax,
    /// Position just past the type.
    pub end: LineColumn
}

impl Parse for TypeAnnotation {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let (ty, end) = parse_type(input)?;
        Ok(Self {
            ty,
            end
        })
    }
}

impl Parse for TypeSyntax {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        parse_type(input).map(|(ty, _)| ty)
    }
}

const EFFECT_WORDS: &[&str] = &["async", "throws", "rethrows"];

/// Parse a type, returning it with the end of its last token.
fn parse_type(input: ParseStream<'_>) -> syn::Result<(TypeSyntax, LineColumn)> {
    let (mut ty, mut end) = parse_primary(input)?;
    loop {
        if peek_punct(input, '?') {
            let mark: Token![?] = input.parse()?;
            end = mark.spans[0].end();
            ty = TypeSyntax::Optional(Box::new(ty));
        } else if peek_punct(input, '!') {
            let mark: Token![!] = input.parse()?;
            end = mark.spans[0].end();
            ty = TypeSyntax::ImplicitlyUnwrapped(Box::new(ty));
        } else if peek_punct(input, '.')
            && input
                .cursor()
                .punct()
                .and_then(|(_, rest)| word_at(rest))
                .is_some_and(|word| word == "Type" || word == "Protocol")
        {
            input.parse::<Token![.]>()?;
            let word = syn::Ident::parse_any(input)?;
            end = word.span().end();
            ty = TypeSyntax::Other(format!("{ty}.{word}"));
        } else if peek_punct(input, '&') {
            input.parse::<Token![&]>()?;
            let (rhs, rhs_end) = parse_type(input)?;
            end = rhs_end;
            ty = TypeSyntax::Other(format!("{ty} & {rhs}"));
        } else {
            return Ok((ty, end));
        }
    }
}

fn parse_primary(input: ParseStream<'_>) -> syn::Result<(TypeSyntax, LineColumn)> {
    if peek_group(input, Delimiter::Bracket) {
        let content;
        let bracket = syn::bracketed!(content in input);
        let key = content.parse::<TypeSyntax>()?;
        let ty = if content.peek(Token![:]) {
            content.parse::<Token![:]>()?;
            let value = content.parse::<TypeSyntax>()?;
            TypeSyntax::Dictionary {
                key:   Box::new(key),
                value: Box::new(value)
            }
        } else {
            TypeSyntax::Array(Box::new(key))
        };
        if !content.is_empty() {
            return Err(content.error("unexpected token in collection type"));
        }
        return Ok((ty, bracket.span.close().end()));
    }

    if peek_group(input, Delimiter::Parenthesis) {
        let content;
        let paren = syn::parenthesized!(content in input);
        let mut end = paren.span.close().end();
        let mut elements = Vec::new();
        while !content.is_empty() {
            skip_element_prefix(&content)?;
            elements.push(content.parse::<TypeSyntax>()?);
            if content.peek(Token![...]) {
                content.parse::<Token![...]>()?;
            }
            if content.is_empty() {
                break;
            }
            content.parse::<Token![,]>()?;
        }
        let mut effects = Vec::new();
        while let Some(word) = word_at(input.cursor()).filter(|word| EFFECT_WORDS.contains(&word.as_str())) {
            let ident = syn::Ident::parse_any(input)?;
            end = ident.span().end();
            effects.push(word);
        }
        if peek_arrow(input.cursor()) {
            input.parse::<Token![->]>()?;
            let (result, result_end) = parse_type(input)?;
            return Ok((
                TypeSyntax::Function {
                    parameters: elements,
                    effects,
                    result: Box::new(result)
                },
                result_end
            ));
        }
        if !effects.is_empty() {
            return Err(input.error("expected `->` in function type"));
        }
        return Ok((TypeSyntax::Tuple(elements), end));
    }

    if peek_punct(input, '@') {
        input.parse::<Token![@]>()?;
        let attribute = syn::Ident::parse_any(input)?;
        let (inner, end) = parse_type(input)?;
        return Ok((TypeSyntax::Other(format!("@{attribute} {inner}")), end));
    }

    if peek_word(input, "some") || peek_word(input, "any") || peek_word(input, "inout") {
        let keyword = syn::Ident::parse_any(input)?;
        let (inner, end) = parse_type(input)?;
        return Ok((TypeSyntax::Other(format!("{keyword} {inner}")), end));
    }

    if input.cursor().ident().is_none() {
        return Err(input.error("expected type"));
    }
    let ident = syn::Ident::parse_any(input)?;
    let mut end = ident.span().end();
    let mut generic_args = Vec::new();
    if peek_punct(input, '<') {
        let (args, args_end) = parse_generic_args(input)?;
        generic_args = args;
        end = args_end;
    }
    let mut ty = TypeSyntax::Identifier {
        name: ident.to_string(),
        generic_args
    };
    while peek_punct(input, '.')
        && input
            .cursor()
            .punct()
            .and_then(|(_, rest)| word_at(rest))
            .is_some_and(|word| word != "Type" && word != "Protocol")
    {
        input.parse::<Token![.]>()?;
        let member = syn::Ident::parse_any(input)?;
        end = member.span().end();
        let mut generic_args = Vec::new();
        if peek_punct(input, '<') {
            let (args, args_end) = parse_generic_args(input)?;
            generic_args = args;
            end = args_end;
        }
        ty = TypeSyntax::Member {
            base: Box::new(ty),
            name: member.to_string(),
            generic_args
        };
    }
    Ok((ty, end))
}

fn parse_generic_args(input: ParseStream<'_>) -> syn::Result<(Vec<TypeSyntax>, LineColumn)> {
    input.parse::<Token![<]>()?;
    let mut args = Vec::new();
    loop {
        args.push(input.parse::<TypeSyntax>()?);
        if peek_punct(input, ',') {
            input.parse::<Token![,]>()?;
            continue;
        }
        let close: Token![>] = input.parse()?;
        return Ok((args, close.spans[0].end()));
    }
}

/// Skip a tuple element label (`name:`), parameter names (`_ name:`) and
/// parameter attributes.
fn skip_element_prefix(input: ParseStream<'_>) -> syn::Result<()> {
    let cursor = input.cursor();
    if let Some((_, rest)) = cursor.ident() {
        let label_then_colon = rest.punct().is_some_and(|(punct, _)| punct.as_char() == ':');
        let two_names_then_colon = rest
            .ident()
            .and_then(|(_, after)| after.punct())
            .is_some_and(|(punct, _)| punct.as_char() == ':');
        if label_then_colon {
            syn::Ident::parse_any(input)?;
            input.parse::<Token![:]>()?;
        } else if two_names_then_colon {
            syn::Ident::parse_any(input)?;
            syn::Ident::parse_any(input)?;
            input.parse::<Token![:]>()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(source: &str) -> TypeSyntax {
        syn::parse_str(source).unwrap()
    }

    #[test]
    fn identifier_and_optional() {
        assert_eq!(
            ty("Int?"),
            TypeSyntax::Optional(Box::new(TypeSyntax::Identifier {
                name:         "Int".into(),
                generic_args: vec![]
            }))
        );
        assert!(ty("String?").is_optional());
        assert_eq!(ty("String?").unwrapped().to_string(), "String");
    }

    #[test]
    fn collections_render_back() {
        assert_eq!(ty("[Int]").to_string(), "[Int]");
        assert_eq!(ty("[String:Int]").to_string(), "[String: Int]");
        assert_eq!(ty("[String: [Int?]]?").to_string(), "[String: [Int?]]?");
    }

    #[test]
    fn member_and_generic_types() {
        assert_eq!(ty("Foundation.URL").to_string(), "Foundation.URL");
        assert_eq!(ty("Array<Int>").to_string(), "Array<Int>");
        assert_eq!(ty("Dictionary<String, Array<Int>>").to_string(), "Dictionary<String, Array<Int>>");
        assert!(matches!(ty("Foundation.URL"), TypeSyntax::Member { .. }));
    }

    #[test]
    fn tuples_and_functions() {
        assert!(matches!(ty("(Int, String)"), TypeSyntax::Tuple(ref elements) if elements.len() == 2));
        assert!(matches!(ty("(a: Int, b: String)"), TypeSyntax::Tuple(_)));
        let function = ty("(Int) async throws -> String");
        assert!(matches!(function, TypeSyntax::Function { .. }));
        assert_eq!(function.to_string(), "(Int) async throws -> String");
    }

    #[test]
    fn other_shapes() {
        assert_eq!(ty("some View").to_string(), "some View");
        assert_eq!(ty("Int.Type").to_string(), "Int.Type");
        assert_eq!(ty("A & B").to_string(), "A & B");
    }

    #[test]
    fn missing_type_is_error() {
        assert!(syn::parse_str::<TypeSyntax>("= 5").is_err());
    }
}
