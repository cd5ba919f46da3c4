// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Observable store-backed containers.
//!
//! `@ObservableUserDefaultsData` layers change tracking onto a container:
//!
//! | Role | Produces |
//! |------|----------|
//! | member | store field, `init`, registrar, `access`, `withMutation` |
//! | member attribute | `@DefaultsValue` on uninitialized vars, `@ObservationDefaultsTracked` on initialized ones |
//! | extension | `extension Name: Observation.Observable {}` under the container's `@available` |
//!
//! Only classes qualify: tracking reports mutations against `self`, which a
//! value type does not keep across a mutation.

use tracing::trace;

use super::{
    args::ArgumentBundle,
    container::{Attachment, store_members},
    template::Lines
};
use crate::{
    config::{
        AVAILABILITY_ATTRIBUTE, CONFORMANCE, IGNORED_ATTRIBUTE, REGISTRAR_FIELD,
        qualified_conformance, qualified_registrar
    },
    error::ExpansionError,
    model::{MacroAttribute, is_storage_attribute},
    syntax::{DeclGroup, GroupKind, Parameter, Signature, VariableDecl}
};

/// Member role.
///
/// # Errors
///
/// - [`ExpansionError::InvalidApplication`] for an enum or actor
/// - [`ExpansionError::ClassNeeded`] for any other non-class declaration
pub fn members(
    group: &DeclGroup,
    attribute: &str,
    args: &ArgumentBundle
) -> Result<Vec<Lines>, ExpansionError> {
    let kind = match group.kind {
        GroupKind::Class => None,
        GroupKind::Enum => Some("enumeration"),
        GroupKind::Actor => Some("actor"),
        GroupKind::Struct | GroupKind::Extension | GroupKind::Protocol => {
            return Err(ExpansionError::ClassNeeded);
        }
    };
    if let Some(kind) = kind {
        return Err(ExpansionError::InvalidApplication {
            attribute: attribute.to_owned(),
            kind,
            name: group.name.clone()
        });
    }

    let mut members = store_members(group, args);
    if !group.has_variable(REGISTRAR_FIELD, true) {
        members.push(Lines::single(format!(
            "@{IGNORED_ATTRIBUTE} private let {REGISTRAR_FIELD} = {}()",
            qualified_registrar()
        )));
    }
    let key_path = format!("KeyPath<{}, Member>", group.name);

    let access = Signature {
        is_instance: true,
        name:        "access".into(),
        parameters:  vec![Parameter::new("keyPath", erased_key_path(group))],
        result:      "Void".into()
    };
    if !group.has_function(&access) {
        let mut function = Lines::single("internal nonisolated func access<Member>(");
        function.push(1, format!("keyPath: {key_path}"));
        function.push(0, ") {");
        function.push(1, format!("{REGISTRAR_FIELD}.access(self, keyPath: keyPath)"));
        function.push(0, "}");
        members.push(function);
    }

    let with_mutation = Signature {
        is_instance: true,
        name:        "withMutation".into(),
        parameters:  vec![
            Parameter::new("keyPath", erased_key_path(group)),
            Parameter::new("_", "()throws->_")
        ],
        result:      "_".into()
    };
    if !group.has_function(&with_mutation) {
        let mut function =
            Lines::single("internal nonisolated func withMutation<Member, MutationResult>(");
        function.push(1, format!("keyPath: {key_path},"));
        function.push(1, "_ mutation: () throws -> MutationResult");
        function.push(0, ") rethrows -> MutationResult {");
        function.push(
            1,
            format!("try {REGISTRAR_FIELD}.withMutation(of: self, keyPath: keyPath, mutation)")
        );
        function.push(0, "}");
        members.push(function);
    }
    Ok(members)
}

/// `KeyPath<Name,_>`: the key path parameter as declared functions are
/// compared.
fn erased_key_path(group: &DeclGroup) -> String {
    format!("KeyPath<{},_>", group.name)
}

/// Member-attribute role.
///
/// Variables that cannot be tracked (computed, type-level, `let`, unnamed,
/// with an accessor block) and variables already ignored, tracked or
/// store-backed are left alone.
#[must_use]
pub fn member_attributes(group: &DeclGroup) -> Vec<Attachment<'_>> {
    group
        .variables()
        .filter(|decl| is_trackable(decl))
        .filter_map(|decl| {
            let binding = decl.single_binding()?;
            if binding.accessor_block.is_some() {
                return None;
            }
            let attribute = if binding.initializer.is_some() {
                MacroAttribute::ObservationDefaultsTracked
            } else {
                MacroAttribute::DefaultsValue
            };
            trace!(member = decl.identifier(), attribute = attribute.name(), "observable attachment");
            Some(Attachment {
                decl,
                attributes: vec![attribute.name()]
            })
        })
        .collect()
}

fn is_trackable(decl: &VariableDecl) -> bool {
    decl.is_var()
        && decl.is_instance()
        && !decl.is_computed()
        && decl.identifier().is_some()
        && !decl.attributes.iter().any(|attribute| {
            attribute.name == IGNORED_ATTRIBUTE
                || MacroAttribute::from_name(&attribute.name)
                    == Some(MacroAttribute::ObservationDefaultsTracked)
                || is_storage_attribute(&attribute.name)
        })
}

/// Extension role: the conformance, unless the container already declares
/// it.
///
/// `enclosing` names the types the container is nested in, outermost first;
/// the extension is written for the qualified name.
#[must_use]
pub fn extension(group: &DeclGroup, enclosing: &[&str]) -> Option<Lines> {
    if group.inherits(CONFORMANCE) {
        return None;
    }
    let mut lines = Lines::new();
    for attribute in &group.attributes {
        if attribute.name == AVAILABILITY_ATTRIBUTE {
            lines.push(0, attribute.text.clone());
        }
    }
    let name = enclosing
        .iter()
        .copied()
        .chain(std::iter::once(group.name.as_str()))
        .collect::<Vec<_>>()
        .join(".");
    lines.push(0, format!("extension {name}: {} {{", qualified_conformance()));
    lines.push(0, "}");
    Some(lines)
}
