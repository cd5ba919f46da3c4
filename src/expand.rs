// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Expansion families.
//!
//! Each recognized attribute is a pure function from a declaration, its
//! arguments and the enclosing [`Context`] to generated code or an
//! [`ExpansionError`]. Nothing here touches source text; the driver decides
//! where the results go.
//!
//! # Architecture
//!
//! ```text
//! expand.rs (dispatch)
//! │
//! ├── args.rs        → ArgumentBundle: key, defaultValue, defaults, coders, rawType
//! ├── context.rs     → Context (observable, key prefix), Site (key + store)
//! ├── template.rs    → Lines, Accessor, AccessorTemplate, AccessorExpansion
//! │
//! ├── plain.rs       → typed reads, register-or-coalesce defaults
//! ├── raw.rs         → raw-representable values
//! ├── codable.rs     → encoded blobs
//! ├── tracked.rs     → in-memory tracked values with a backing peer
//! │
//! ├── container.rs   → @UserDefaultsData member and member-attribute roles
//! └── observable.rs  → @ObservableUserDefaultsData roles and extension
//! ```
//!
//! # Roles
//!
//! | Entry point | Attributes | Output |
//! |-------------|------------|--------|
//! | [`expand_accessors`] | accessor families | accessors and peers |
//! | [`expand_members`] | container families | new members |
//! | [`expand_member_attributes`] | container families | attributes for members |
//! | [`expand_extensions`] | observable container | conformance extension |

mod args;
mod codable;
mod container;
mod context;
mod observable;
mod plain;
mod raw;
mod template;
mod tracked;

use tracing::debug;

use crate::{
    error::ExpansionError,
    model::{Family, MacroAttribute},
    syntax::{Attribute, DeclGroup, VariableDecl}
};

pub use self::{
    args::ArgumentBundle,
    container::Attachment,
    context::Context,
    template::{Accessor, AccessorExpansion, AccessorTemplate, Getter, Line, Lines}
};

/// Expand an accessor attribute on `decl`.
///
/// Container attributes produce no accessors.
///
/// # Errors
///
/// Returns the family's [`ExpansionError`]; see [`ExpansionError`] for the
/// taxonomy.
pub fn expand_accessors(
    decl: &VariableDecl,
    attribute: MacroAttribute,
    args: &ArgumentBundle,
    context: &Context
) -> Result<AccessorExpansion, ExpansionError> {
    debug!(
        attribute = attribute.name(),
        variable = decl.identifier(),
        observable = context.observable,
        "expanding accessors"
    );
    match attribute.family() {
        Family::Plain => plain::expand(decl, attribute, args, context),
        Family::Raw => raw::expand(decl, attribute, args, context),
        Family::Codable => codable::expand(decl, attribute, args, context),
        Family::Tracked => Ok(tracked::expand(decl)),
        Family::Container | Family::ObservableContainer => Ok(AccessorExpansion::default())
    }
}

/// Members a container attribute adds to `group`.
///
/// # Errors
///
/// [`ExpansionError::ClassOrStructNeeded`] for `@UserDefaultsData` on
/// anything but a class or struct;
/// [`ExpansionError::InvalidApplication`] or [`ExpansionError::ClassNeeded`]
/// for `@ObservableUserDefaultsData` on anything but a class.
pub fn expand_members(group: &DeclGroup, attribute: &Attribute) -> Result<Vec<Lines>, ExpansionError> {
    let args = ArgumentBundle::from_attribute(attribute);
    debug!(container = %group.name, attribute = %attribute.name, "expanding members");
    match MacroAttribute::from_name(&attribute.name).map(MacroAttribute::family) {
        Some(Family::Container) => container::members(group, &args),
        Some(Family::ObservableContainer) => observable::members(group, &attribute.name, &args),
        _ => Ok(Vec::new())
    }
}

/// Attributes a container attribute attaches to the variables of `group`.
#[must_use]
pub fn expand_member_attributes<'a>(group: &'a DeclGroup, attribute: &Attribute) -> Vec<Attachment<'a>> {
    match MacroAttribute::from_name(&attribute.name).map(MacroAttribute::family) {
        Some(Family::Container) => container::member_attributes(group),
        Some(Family::ObservableContainer) => observable::member_attributes(group),
        _ => Vec::new()
    }
}

/// Extensions a container attribute adds for `group`.
///
/// `enclosing` lists the names of the types `group` is nested in, outermost
/// first; it is empty for a top-level declaration.
#[must_use]
pub fn expand_extensions(group: &DeclGroup, attribute: &Attribute, enclosing: &[&str]) -> Vec<Lines> {
    match MacroAttribute::from_name(&attribute.name).map(MacroAttribute::family) {
        Some(Family::ObservableContainer) => {
            observable::extension(group, enclosing).into_iter().collect()
        }
        _ => Vec::new()
    }
}

#[cfg(test)]
mod tests;
