// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Variable declarations.
//!
//! ```text
//! VariableDecl
//! ├── attributes: Vec<Attribute>     (@DefaultsValue(...), @ObservationIgnored)
//! ├── modifiers: Vec<Modifier>       (public, static, private(set))
//! ├── specifier: BindingSpecifier    (var | let)
//! └── bindings: Vec<PatternBinding>
//!     └── PatternBinding
//!         ├── pattern: Pattern                    (identifier, tuple, _)
//!         ├── type_annotation: Option<TypeAnnotation>
//!         ├── initializer: Option<Expr>
//!         ├── accessor_block: Option<AccessorBlock>
//!         └── end                                 (where accessors are spliced)
//! ```

use proc_macro2::{Delimiter, LineColumn, TokenTree};
use syn::{
    Token,
    ext::IdentExt,
    parse::{Parse, ParseStream}
};

use super::{
    attr::Attribute,
    expr::Expr,
    render::render,
    tokens::{
        ACCESSOR_KEYWORDS, Name, collect_all, collect_expression, has_modifier_detail,
        is_accessor_block, is_modifier, is_punct, next_start, parse_name, peek_assignment,
        peek_group, peek_punct, peek_word
    },
    ty::TypeAnnotation
};

/// A declaration modifier such as `public`, `static` or `private(set)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    /// Modifier word.
    pub name:   String,
    /// Parenthesized detail (`set` in `private(set)`).
    pub detail: Option<String>,
    /// Position of the modifier word.
    pub start:  LineColumn
}

impl Modifier {
    /// Parse the modifiers at the cursor.
    ///
    /// # Errors
    ///
    /// Never fails for well-formed modifier runs.
    pub fn parse_all(input: ParseStream<'_>) -> syn::Result<Vec<Self>> {
        let mut modifiers = Vec::new();
        while let Some((ident, rest)) = input.cursor().ident()
            && is_modifier(&ident.to_string(), rest)
        {
            let ident = syn::Ident::parse_any(input)?;
            let start = ident.span().start();
            let mut detail = None;
            if has_modifier_detail(input.cursor()) {
                let content;
                syn::parenthesized!(content in input);
                detail = Some(syn::Ident::parse_any(&content)?.to_string());
            }
            modifiers.push(Self {
                name: ident.to_string(),
                detail,
                start
            });
        }
        Ok(modifiers)
    }
}

/// Whether any modifier makes the declaration type-level.
#[must_use]
pub(crate) fn has_type_level_modifier(modifiers: &[Modifier]) -> bool {
    modifiers
        .iter()
        .any(|modifier| modifier.name == "static" || modifier.name == "class")
}

/// `var` or `let`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSpecifier {
    /// Mutable binding.
    Var,
    /// Constant binding.
    Let
}

/// Binding pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A single name.
    Identifier(Name),
    /// `(a, b)`.
    Tuple(String),
    /// `_`.
    Wildcard
}

/// An explicit accessor block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessorBlock {
    /// `{ expression }`: shorthand getter body.
    Getter {
        /// Position just past `}`.
        end: LineColumn
    },
    /// `{ get {...} set {...} }` or observers `{ didSet {...} }`.
    Accessors {
        /// Accessor specifiers in order (`get`, `set`, `didSet`, ...).
        specifiers: Vec<String>,
        /// Position just past `}`.
        end:        LineColumn
    }
}

impl AccessorBlock {
    /// Whether the block makes the property computed.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        match self {
            Self::Getter {
                ..
            } => true,
            Self::Accessors {
                specifiers, ..
            } => specifiers.iter().any(|specifier| specifier == "get")
        }
    }

    /// Position just past the block.
    #[must_use]
    pub fn end(&self) -> LineColumn {
        match self {
            Self::Getter {
                end
            }
            | Self::Accessors {
                end, ..
            } => *end
        }
    }
}

impl Parse for AccessorBlock {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let is_accessors = is_accessor_block(input.cursor());
        let content;
        let brace = syn::braced!(content in input);
        let end = brace.span.close().end();
        if !is_accessors {
            collect_all(&content)?;
            return Ok(Self::Getter {
                end
            });
        }
        let tokens = collect_all(&content)?;
        let specifiers = tokens
            .iter()
            .enumerate()
            .filter_map(|(index, token)| match token {
                TokenTree::Ident(ident)
                    if ACCESSOR_KEYWORDS.contains(&ident.to_string().as_str())
                        && (index == 0 || !is_punct(&tokens[index - 1], '.')) =>
                {
                    Some(ident.to_string())
                }
                _ => None
            })
            .collect();
        Ok(Self::Accessors {
            specifiers,
            end
        })
    }
}

/// One `pattern[: Type][= value][{ accessors }]` binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternBinding {
    /// Bound pattern.
    pub pattern:         Pattern,
    /// Explicit type.
    pub type_annotation: Option<TypeAnnotation>,
    /// Initial value.
    pub initializer:     Option<Expr>,
    /// Explicit accessors or observers.
    pub accessor_block:  Option<AccessorBlock>,
    /// Position just past the pattern, type and initializer.
    pub end:             LineColumn
}

impl PatternBinding {
    /// Bound name for identifier patterns.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match &self.pattern {
            Pattern::Identifier(name) => Some(&name.text),
            _ => None
        }
    }
}

/// A `var`/`let` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    /// Attributes in source order.
    pub attributes:      Vec<Attribute>,
    /// Modifiers in source order.
    pub modifiers:       Vec<Modifier>,
    /// `var` or `let`.
    pub specifier:       BindingSpecifier,
    /// Position of the specifier keyword.
    pub specifier_start: LineColumn,
    /// Bindings; at least one.
    pub bindings:        Vec<PatternBinding>,
    /// Position of the first token, attributes included.
    pub start:           LineColumn,
    /// Position just past the declaration.
    pub end:             LineColumn
}

impl VariableDecl {
    /// Parse the declaration after its attributes and modifiers.
    ///
    /// # Errors
    ///
    /// Fails when the specifier or a binding pattern is malformed.
    pub fn parse_rest(
        input: ParseStream<'_>,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
        start: LineColumn
    ) -> syn::Result<Self> {
        let keyword = syn::Ident::parse_any(input)?;
        let specifier = match keyword.to_string().as_str() {
            "var" => BindingSpecifier::Var,
            "let" => BindingSpecifier::Let,
            _ => return Err(syn::Error::new(keyword.span(), "expected `var` or `let`"))
        };
        let specifier_start = keyword.span().start();

        let mut bindings = Vec::new();
        loop {
            let binding = parse_binding(input)?;
            bindings.push(binding);
            if peek_punct(input, ',') {
                input.parse::<Token![,]>()?;
                continue;
            }
            break;
        }

        let end = bindings
            .last()
            .map_or(specifier_start, |binding| {
                binding
                    .accessor_block
                    .as_ref()
                    .map_or(binding.end, AccessorBlock::end)
            });
        Ok(Self {
            attributes,
            modifiers,
            specifier,
            specifier_start,
            bindings,
            start,
            end
        })
    }

    /// Whether this is a `var`.
    #[must_use]
    pub fn is_var(&self) -> bool {
        self.specifier == BindingSpecifier::Var
    }

    /// Whether the declaration is instance-level (no `static`/`class`).
    #[must_use]
    pub fn is_instance(&self) -> bool {
        !has_type_level_modifier(&self.modifiers)
    }

    /// The only binding, when there is exactly one.
    #[must_use]
    pub fn single_binding(&self) -> Option<&PatternBinding> {
        match self.bindings.as_slice() {
            [binding] => Some(binding),
            _ => None
        }
    }

    /// Name of the first identifier binding.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.bindings.first().and_then(PatternBinding::identifier)
    }

    /// Whether an attribute with `name` is present.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute.name == name)
    }

    /// Whether the declaration has a computed accessor block.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.accessor_block.as_ref().is_some_and(AccessorBlock::is_computed))
    }

    /// Position where added attributes go: the first modifier, or the
    /// specifier when there are none.
    #[must_use]
    pub fn declaration_head(&self) -> LineColumn {
        self.modifiers
            .first()
            .map_or(self.specifier_start, |modifier| modifier.start)
    }
}

impl Parse for VariableDecl {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let start = next_start(input);
        let attributes = Attribute::parse_outer(input)?;
        let modifiers = Modifier::parse_all(input)?;
        if !peek_word(input, "var") && !peek_word(input, "let") {
            return Err(input.error("expected `var` or `let`"));
        }
        Self::parse_rest(input, attributes, modifiers, start)
    }
}

fn parse_binding(input: ParseStream<'_>) -> syn::Result<PatternBinding> {
    let (pattern, mut end) = if peek_group(input, Delimiter::Parenthesis) {
        let tree: TokenTree = input.parse()?;
        let end = tree.span().end();
        (Pattern::Tuple(render(&[tree])), end)
    } else {
        let name = parse_name(input)?;
        let end = name.end;
        if name.text == "_" {
            (Pattern::Wildcard, end)
        } else {
            (Pattern::Identifier(name), end)
        }
    };

    let mut type_annotation = None;
    if peek_punct(input, ':') {
        input.parse::<Token![:]>()?;
        let annotation: TypeAnnotation = input.parse()?;
        end = annotation.end;
        type_annotation = Some(annotation);
    }

    let mut initializer = None;
    if peek_assignment(input) {
        input.parse::<Token![=]>()?;
        let tokens = collect_expression(input)?;
        let value = Expr::from_tokens(&tokens).ok_or_else(|| input.error("expected initial value"))?;
        end = value.end;
        initializer = Some(value);
    }

    let accessor_block = if peek_group(input, Delimiter::Brace)
        && (initializer.is_none() || is_accessor_block(input.cursor()))
    {
        Some(input.parse::<AccessorBlock>()?)
    } else {
        None
    };

    Ok(PatternBinding {
        pattern,
        type_annotation,
        initializer,
        accessor_block,
        end
    })
}
