// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Plain values read through a typed store method.
//!
//! ```text
//! @UserDefaultsValue(defaultValue: "a") var s: String
//!     get { UserDefaults.standard.string(forKey: "s") ?? "a" }
//!
//! @UserDefaultsValue(defaultValue: 42) var n: Int
//!     get {
//!         UserDefaults.standard.register(defaults: ["n": 42])
//!         return UserDefaults.standard.integer(forKey: "n")
//!     }
//! ```
//!
//! Typed reads of `Bool`, `Int`, `Float` and `Double` return a zero value
//! rather than nil, so a default for them is registered with the store
//! instead of appended with `??`.

use super::{
    args::ArgumentBundle,
    context::{Context, Site},
    template::{AccessorExpansion, AccessorTemplate, Getter, Lines}
};
use crate::{
    error::ExpansionError,
    model::{LiteralType, MacroAttribute, TypeMatch, ValueType},
    syntax::VariableDecl
};

/// Expand a plain accessor attribute.
///
/// # Errors
///
/// Shape errors from [`Site::resolve`], then type resolution errors, then
/// [`ExpansionError::TypesMismatch`] for a literal default of the wrong kind
/// and [`ExpansionError::DefaultValueNeeded`] when the type has no natural
/// empty value.
pub(crate) fn expand(
    decl: &VariableDecl,
    attribute: MacroAttribute,
    args: &ArgumentBundle,
    context: &Context
) -> Result<AccessorExpansion, ExpansionError> {
    let site = Site::resolve(decl, attribute, args, context)?;
    let value_type = ValueType::resolve(&site.annotation.ty)?;

    if let Some(literal) = args.default_value.as_ref().and_then(LiteralType::of)
        && literal.check(&value_type) == TypeMatch::Mismatch
    {
        return Err(ExpansionError::TypesMismatch);
    }
    let default = args.default_text();
    if value_type.requires_default() && default.is_none() {
        return Err(ExpansionError::DefaultValueNeeded);
    }

    let Site {
        name,
        key,
        store,
        tracking,
        ..
    } = site;
    let read = format!(
        "{store}.{}(forKey: {key}){}",
        value_type.retrieval_method(),
        value_type.cast_suffix()
    );
    let (registration, fallback) = match default {
        Some(default) if value_type.yields_nil_on_absence() => (None, Some(default.to_owned())),
        Some(default) => (Some(format!("{store}.register(defaults: [{key}: {default}])")), None),
        None => (None, None)
    };
    let template = AccessorTemplate {
        getter:   Getter {
            registration,
            value: Lines::single(read),
            fallback
        },
        setter:   Lines::single(format!(
            "{store}.{}(newValue, forKey: {key})",
            value_type.setter_method()
        )),
        tracking: tracking.then(|| name.to_owned())
    };
    Ok(AccessorExpansion {
        accessors: template.accessors(),
        peers:     Vec::new()
    })
}
