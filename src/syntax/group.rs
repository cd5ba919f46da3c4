// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declaration groups, functions and whole source files.

use proc_macro2::{Delimiter, LineColumn, TokenTree};
use syn::{
    Token,
    ext::IdentExt,
    parse::{Parse, ParseStream}
};

use super::{
    attr::{Attribute, nested_attributes},
    decl::{Modifier, VariableDecl, has_type_level_modifier},
    render::{render, render_compact},
    tokens::{
        Name, collect_all, collect_statement, collect_until_body, end_of, is_punct, next_start,
        parse_generic_parameters, parse_name, peek_group, peek_punct, peek_word, skip_trivia,
        split_top_level, starts_declaration, word_at
    },
    ty::TypeSyntax
};

/// Kind of a declaration group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// `class`
    Class,
    /// `struct`
    Struct,
    /// `enum`
    Enum,
    /// `actor`
    Actor,
    /// `extension`
    Extension,
    /// `protocol`
    Protocol
}

impl GroupKind {
    /// Kind introduced by `keyword`.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(Self::Class),
            "struct" => Some(Self::Struct),
            "enum" => Some(Self::Enum),
            "actor" => Some(Self::Actor),
            "extension" => Some(Self::Extension),
            "protocol" => Some(Self::Protocol),
            _ => None
        }
    }

    /// Introducing keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Actor => "actor",
            Self::Extension => "extension",
            Self::Protocol => "protocol"
        }
    }
}

/// A member of a group, or a top-level item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// `var`/`let`.
    Variable(VariableDecl),
    /// `func`/`init`.
    Function(FunctionDecl),
    /// Nested type or extension.
    Group(DeclGroup),
    /// Anything else, kept verbatim.
    Other(OtherDecl)
}

/// A statement or declaration the expansions never touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherDecl {
    /// Leading attributes.
    pub attributes: Vec<Attribute>,
    /// Position of the first token.
    pub start:      LineColumn,
    /// Position just past the last token.
    pub end:        LineColumn
}

/// One function parameter, reduced to what signature comparison needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// First (argument label) name; `_` for unlabeled.
    pub label: String,
    /// Type text without spaces, generic parameters erased to `_`.
    pub ty:    String
}

impl Parameter {
    /// Parameter with an already-normalized type.
    #[must_use]
    pub fn new(label: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ty:    ty.into()
        }
    }
}

/// Comparable shape of a function declaration.
///
/// Two functions are equivalent when they agree on instance-ness, name,
/// parameter labels and types, and result type, with generic parameters
/// treated as interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// `false` for `static`/`class` functions.
    pub is_instance: bool,
    /// Base name (`init` for initializers).
    pub name:        String,
    /// Parameters in order.
    pub parameters:  Vec<Parameter>,
    /// Result type, `Void` when absent.
    pub result:      String
}

/// A `func` or `init` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// Leading attributes.
    pub attributes:         Vec<Attribute>,
    /// Modifiers.
    pub modifiers:          Vec<Modifier>,
    /// Base name.
    pub name:               String,
    /// Generic parameter names.
    pub generic_parameters: Vec<String>,
    /// Parameters.
    pub parameters:         Vec<Parameter>,
    /// Normalized result type.
    pub result:             String,
    /// Attributes written inside the body, on local declarations.
    pub body_attributes:    Vec<Attribute>,
    /// Position of the first token.
    pub start:              LineColumn,
    /// Position just past the declaration.
    pub end:                LineColumn
}

impl FunctionDecl {
    /// Comparable signature.
    #[must_use]
    pub fn signature(&self) -> Signature {
        Signature {
            is_instance: !has_type_level_modifier(&self.modifiers),
            name:        self.name.clone(),
            parameters:  self.parameters.clone(),
            result:      self.result.clone()
        }
    }

    fn parse_rest(
        input: ParseStream<'_>,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
        start: LineColumn
    ) -> syn::Result<Self> {
        let keyword = syn::Ident::parse_any(input)?;
        let mut end = keyword.span().end();
        let name = if keyword == "init" {
            if peek_punct(input, '?') || peek_punct(input, '!') {
                let mark: TokenTree = input.parse()?;
                end = mark.span().end();
            }
            "init".to_owned()
        } else if input.cursor().ident().is_some() {
            let name: Name = parse_name(input)?;
            end = name.end;
            name.text
        } else {
            let operator = collect_operator(input)?;
            end = end_of(&operator).unwrap_or(end);
            operator.iter().map(ToString::to_string).collect()
        };

        let generic_parameters = if peek_punct(input, '<') {
            parse_generic_parameters(input)?
        } else {
            Vec::new()
        };

        let mut parameters = Vec::new();
        if peek_group(input, Delimiter::Parenthesis) {
            let content;
            let paren = syn::parenthesized!(content in input);
            end = paren.span.close().end();
            let tokens = collect_all(&content)?;
            for part in split_top_level(&tokens, ',') {
                if let Some(parameter) = parameter(part, &generic_parameters) {
                    parameters.push(parameter);
                }
            }
        }

        let clause = collect_until_body(input)?;
        end = end_of(&clause).unwrap_or(end);
        if peek_word(input, "where") {
            input.parse::<TokenTree>()?;
            let constraints = collect_until_body(input)?;
            end = end_of(&constraints).unwrap_or(end);
        }
        let result = result_type(&clause, &generic_parameters);

        let mut body_attributes = Vec::new();
        if peek_group(input, Delimiter::Brace) {
            let body: TokenTree = input.parse()?;
            end = body.span().end();
            if let TokenTree::Group(group) = body {
                body_attributes = nested_attributes(group.stream());
            }
        }

        Ok(Self {
            attributes,
            modifiers,
            name,
            generic_parameters,
            parameters,
            result,
            body_attributes,
            start,
            end
        })
    }
}

/// Operator function name: punctuation up to `<` or `(`.
fn collect_operator(input: ParseStream<'_>) -> syn::Result<Vec<TokenTree>> {
    input.step(|cursor| {
        let mut rest = *cursor;
        let mut tokens = Vec::new();
        while let Some((punct, next)) = rest.punct() {
            if punct.as_char() == '<' && !tokens.is_empty() {
                break;
            }
            tokens.push(TokenTree::Punct(punct));
            rest = next;
        }
        Ok((tokens, rest))
    })
}

fn parameter(tokens: &[TokenTree], generics: &[String]) -> Option<Parameter> {
    let colon = tokens.iter().position(|token| is_punct(token, ':'))?;
    let label = match tokens.first()? {
        TokenTree::Ident(ident) => ident.to_string(),
        _ => return None
    };
    let ty_tokens = &tokens[colon + 1..];
    let ty_end = ty_tokens
        .iter()
        .position(|token| is_punct(token, '='))
        .unwrap_or(ty_tokens.len());
    Some(Parameter {
        label,
        ty: render_compact(&ty_tokens[..ty_end], generics)
    })
}

fn result_type(clause: &[TokenTree], generics: &[String]) -> String {
    let arrow = clause
        .windows(2)
        .position(|pair| is_punct(&pair[0], '-') && is_punct(&pair[1], '>'));
    match arrow {
        Some(index) => normalize_void(render_compact(&clause[index + 2..], generics)),
        None => "Void".to_owned()
    }
}

fn normalize_void(result: String) -> String {
    if result == "()" { "Void".to_owned() } else { result }
}

/// A `class`, `struct`, `enum`, `actor`, `extension` or `protocol`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclGroup {
    /// Leading attributes.
    pub attributes:         Vec<Attribute>,
    /// Modifiers.
    pub modifiers:          Vec<Modifier>,
    /// Group kind.
    pub kind:               GroupKind,
    /// Declared (or extended) type name.
    pub name:               String,
    /// Generic parameter names.
    pub generic_parameters: Vec<String>,
    /// Inherited types and conformances as written.
    pub inheritance:        Vec<String>,
    /// Members in source order.
    pub members:            Vec<Member>,
    /// Position of the first token, attributes included.
    pub start:              LineColumn,
    /// Position of the introducing keyword.
    pub keyword_start:      LineColumn,
    /// Position of the closing `}`.
    pub close_brace:        LineColumn,
    /// Position just past the closing `}`.
    pub end:                LineColumn
}

impl DeclGroup {
    /// First attribute named `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// Whether an attribute named `name` is present.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Variable members.
    pub fn variables(&self) -> impl Iterator<Item = &VariableDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Variable(variable) => Some(variable),
            _ => None
        })
    }

    /// Function members.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Function(function) => Some(function),
            _ => None
        })
    }

    /// Whether a member variable `name` with the given instance-ness exists.
    #[must_use]
    pub fn has_variable(&self, name: &str, is_instance: bool) -> bool {
        self.variables().any(|variable| {
            variable.is_instance() == is_instance
                && variable
                    .bindings
                    .iter()
                    .any(|binding| binding.identifier() == Some(name))
        })
    }

    /// Whether an equivalent function exists.
    #[must_use]
    pub fn has_function(&self, signature: &Signature) -> bool {
        self.functions()
            .any(|function| &function.signature() == signature)
    }

    /// Whether `name` (bare or module-qualified) appears in the inheritance
    /// clause.
    #[must_use]
    pub fn inherits(&self, name: &str) -> bool {
        self.inheritance.iter().any(|inherited| {
            inherited == name || inherited.rsplit('.').next() == Some(name)
        })
    }
}

impl DeclGroup {
    fn parse_rest(
        input: ParseStream<'_>,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
        start: LineColumn
    ) -> syn::Result<Self> {
        let keyword = syn::Ident::parse_any(input)?;
        let keyword_start = keyword.span().start();
        let kind = GroupKind::from_keyword(&keyword.to_string())
            .ok_or_else(|| syn::Error::new(keyword.span(), "expected type declaration"))?;

        let name = if kind == GroupKind::Extension {
            input.parse::<TypeSyntax>()?.to_string()
        } else {
            parse_name(input)?.text
        };
        let generic_parameters = if peek_punct(input, '<') {
            parse_generic_parameters(input)?
        } else {
            Vec::new()
        };

        let mut inheritance = Vec::new();
        if peek_punct(input, ':') {
            input.parse::<Token![:]>()?;
            let tokens = collect_until_body(input)?;
            inheritance = split_top_level(&tokens, ',')
                .into_iter()
                .map(render)
                .filter(|text| !text.is_empty())
                .collect();
        }
        if peek_word(input, "where") {
            input.parse::<TokenTree>()?;
            collect_until_body(input)?;
        }

        let content;
        let brace = syn::braced!(content in input);
        let members = parse_members(&content)?;
        let close = brace.span.close();

        Ok(Self {
            attributes,
            modifiers,
            kind,
            name,
            generic_parameters,
            inheritance,
            members,
            start,
            keyword_start,
            close_brace: close.start(),
            end: close.end()
        })
    }
}

/// Parse members until the stream is exhausted.
fn parse_members(input: ParseStream<'_>) -> syn::Result<Vec<Member>> {
    let mut members = Vec::new();
    loop {
        skip_trivia(input)?;
        if input.is_empty() {
            return Ok(members);
        }
        members.push(input.parse()?);
    }
}

impl Parse for Member {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let start = next_start(input);
        let attributes = Attribute::parse_outer(input)?;
        let modifiers = if starts_declaration(input.cursor()) {
            Modifier::parse_all(input)?
        } else {
            Vec::new()
        };

        match word_at(input.cursor()).as_deref() {
            Some("var" | "let") => {
                VariableDecl::parse_rest(input, attributes, modifiers, start).map(Self::Variable)
            }
            Some("func" | "init") => {
                FunctionDecl::parse_rest(input, attributes, modifiers, start).map(Self::Function)
            }
            Some(keyword) if GroupKind::from_keyword(keyword).is_some() => {
                DeclGroup::parse_rest(input, attributes, modifiers, start).map(Self::Group)
            }
            _ => {
                let tokens = collect_statement(input)?;
                let end = end_of(&tokens)
                    .or_else(|| attributes.last().map(|attribute| attribute.end))
                    .unwrap_or(start);
                Ok(Self::Other(OtherDecl {
                    attributes,
                    start,
                    end
                }))
            }
        }
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Top-level items in source order.
    pub items: Vec<Member>
}

impl Parse for SourceFile {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        Ok(Self {
            items: parse_members(input)?
        })
    }
}
