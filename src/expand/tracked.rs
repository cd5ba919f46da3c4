// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory observable values.
//!
//! An initialized member of an observable container keeps its value in a
//! private backing property and only reports accesses and mutations:
//!
//! ```text
//! var count = 0
//!     @storageRestrictions(initializes: _count)
//!     init(initialValue) { _count = initialValue }
//!     get { access(keyPath: \.count); return _count }
//!     set { withMutation(keyPath: \.count) { _count = newValue } }
//!
//! @ObservationIgnored private var _count = 0
//! ```

use super::template::{Accessor, AccessorExpansion, Lines, access_call, with_mutation};
use crate::{
    config::IGNORED_ATTRIBUTE,
    syntax::{Modifier, VariableDecl}
};

const ACCESS_LEVELS: &[&str] = &["open", "public", "package", "internal", "fileprivate", "private"];

/// Expand a tracking-only attribute.
///
/// Declarations that cannot hold a tracked value (computed, type-level,
/// `let`, unnamed) expand to nothing.
#[must_use]
pub(crate) fn expand(decl: &VariableDecl) -> AccessorExpansion {
    let Some(binding) = decl.single_binding() else {
        return AccessorExpansion::default();
    };
    let Some(name) = binding.identifier() else {
        return AccessorExpansion::default();
    };
    if !decl.is_var() || !decl.is_instance() || decl.is_computed() {
        return AccessorExpansion::default();
    }
    let storage = format!("_{name}");

    let mut initializer = Accessor::new(
        "init(initialValue)",
        Lines::single(format!("{storage} = initialValue"))
    );
    initializer
        .attributes
        .push(format!("@storageRestrictions(initializes: {storage})"));

    let mut get = Lines::single(access_call(name));
    get.push(0, format!("return {storage}"));
    let set = with_mutation(name, Lines::single(format!("{storage} = newValue")));

    let mut peer = format!("@{IGNORED_ATTRIBUTE} private ");
    for modifier in retained_modifiers(&decl.modifiers) {
        peer.push_str(&modifier.name);
        if let Some(detail) = &modifier.detail {
            peer.push_str(&format!("({detail})"));
        }
        peer.push(' ');
    }
    peer.push_str(&format!("var {storage}"));
    if let Some(annotation) = &binding.type_annotation {
        peer.push_str(&format!(": {}", annotation.ty));
    }
    if let Some(value) = &binding.initializer {
        peer.push_str(&format!(" = {}", value.text));
    }

    AccessorExpansion {
        accessors: vec![initializer, Accessor::new("get", get), Accessor::new("set", set)],
        peers:     vec![Lines::single(peer)]
    }
}

/// Modifiers carried over to the backing property; access levels are
/// replaced by `private`.
fn retained_modifiers(modifiers: &[Modifier]) -> impl Iterator<Item = &Modifier> {
    modifiers
        .iter()
        .filter(|modifier| !ACCESS_LEVELS.contains(&modifier.name.as_str()))
}
