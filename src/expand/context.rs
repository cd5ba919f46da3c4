// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Enclosing-container context.
//!
//! Accessor expansions never look upward in the tree. The driver summarizes
//! the enclosing declaration once into a [`Context`] and hands it down, and
//! [`Site`] combines it with the attribute's own arguments.

use super::args::ArgumentBundle;
use crate::{
    config::{OBSERVABLE_ATTRIBUTE, STANDARD_STORE, STORE_FIELD},
    error::ExpansionError,
    model::MacroAttribute,
    syntax::{DeclGroup, PatternBinding, TypeAnnotation, VariableDecl}
};

/// What an accessor expansion knows about its enclosing declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// The container tracks changes, so instance accessors are wrapped in
    /// `access`/`withMutation`.
    pub observable: bool,
    /// Prefix for derived keys of container-scoped attributes.
    pub key_prefix: String
}

impl Context {
    /// Context for declarations outside any type.
    #[must_use]
    pub fn top_level() -> Self {
        Self::default()
    }

    /// Context for the members of `group`.
    #[must_use]
    pub fn for_group(group: &DeclGroup) -> Self {
        let container = group.attributes.iter().find(|attribute| {
            MacroAttribute::from_name(&attribute.name).is_some_and(MacroAttribute::is_container)
        });
        let observable = group.has_attribute(OBSERVABLE_ATTRIBUTE)
            || group.attributes.iter().any(|attribute| {
                MacroAttribute::from_name(&attribute.name)
                    == Some(MacroAttribute::ObservableUserDefaultsData)
            });
        Self {
            observable,
            key_prefix: container
                .and_then(|attribute| ArgumentBundle::from_attribute(attribute).key_prefix)
                .unwrap_or_default()
        }
    }
}

/// A validated store-backed variable, with its key and store resolved.
#[derive(Debug, Clone)]
pub(crate) struct Site<'a> {
    /// Variable name.
    pub name:       &'a str,
    /// Declared type.
    pub annotation: &'a TypeAnnotation,
    /// Key expression.
    pub key:        String,
    /// Store expression.
    pub store:      String,
    /// Wrap accessors in change tracking.
    pub tracking:   bool
}

impl<'a> Site<'a> {
    /// Check the shape every store-backed family requires and resolve where
    /// the value lives.
    ///
    /// # Errors
    ///
    /// - [`ExpansionError::NotVariable`] unless `decl` is a `var` with one
    ///   identifier binding, a type annotation, no initializer and no
    ///   accessor block
    /// - [`ExpansionError::StaticVariable`] for a type-level member under a
    ///   container-scoped attribute
    pub fn resolve(
        decl: &'a VariableDecl,
        attribute: MacroAttribute,
        args: &ArgumentBundle,
        context: &Context
    ) -> Result<Self, ExpansionError> {
        let (name, annotation) = decl
            .single_binding()
            .filter(|binding| decl.is_var() && is_plain_stored(binding))
            .and_then(|binding| Some((binding.identifier()?, binding.type_annotation.as_ref()?)))
            .ok_or(ExpansionError::NotVariable)?;
        let standalone = attribute.is_standalone();
        if !standalone && !decl.is_instance() {
            return Err(ExpansionError::StaticVariable);
        }

        let key = args.key.clone().unwrap_or_else(|| {
            let prefix = if standalone { "" } else { context.key_prefix.as_str() };
            format!("\"{prefix}{name}\"")
        });
        let store = if standalone {
            args.store.clone().unwrap_or_else(|| STANDARD_STORE.to_owned())
        } else {
            STORE_FIELD.to_owned()
        };
        Ok(Self {
            name,
            annotation,
            key,
            store,
            tracking: context.observable && decl.is_instance()
        })
    }
}

/// Binding shape shared by the tracked family and container eligibility.
pub(crate) fn is_plain_stored(binding: &PatternBinding) -> bool {
    binding.initializer.is_none() && binding.accessor_block.is_none()
}
