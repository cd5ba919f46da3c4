// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw-representable values stored as their raw value.
//!
//! ```text
//! @RawUserDefaultsValue(rawType: Int.self) var e: Kind?
//!     get { (UserDefaults.standard.object(forKey: "e") as? Int).flatMap(Kind.init(rawValue:)) }
//!     set { UserDefaults.standard.setValue(newValue?.rawValue, forKey: "e") }
//! ```

use super::{
    args::ArgumentBundle,
    context::{Context, Site},
    template::{AccessorExpansion, AccessorTemplate, Getter, Lines}
};
use crate::{
    error::ExpansionError,
    model::{MacroAttribute, ValueType},
    syntax::VariableDecl
};

/// Expand a raw-representable accessor attribute.
///
/// # Errors
///
/// Shape errors from [`Site::resolve`], [`ExpansionError::UnsupportedType`]
/// when `rawType` is missing or not a storable type, and
/// [`ExpansionError::DefaultValueNeeded`] for a non-optional variable without
/// a default.
pub(crate) fn expand(
    decl: &VariableDecl,
    attribute: MacroAttribute,
    args: &ArgumentBundle,
    context: &Context
) -> Result<AccessorExpansion, ExpansionError> {
    let site = Site::resolve(decl, attribute, args, context)?;
    let raw_type = args
        .raw_type
        .as_deref()
        .and_then(ValueType::from_name)
        .ok_or(ExpansionError::UnsupportedType)?;
    let optional = site.annotation.ty.is_optional();
    let default = args.default_text();
    if !optional && default.is_none() {
        return Err(ExpansionError::DefaultValueNeeded);
    }

    let Site {
        name,
        annotation,
        key,
        store,
        tracking
    } = site;
    let read = format!(
        "({store}.object(forKey: {key}) as? {}).flatMap({}.init(rawValue:))",
        raw_type.native_type(),
        annotation.ty.unwrapped()
    );
    let chain = if optional { "?" } else { "" };
    let template = AccessorTemplate {
        getter:   Getter {
            registration: None,
            value:        Lines::single(read),
            fallback:     default.map(str::to_owned)
        },
        setter:   Lines::single(format!(
            "{store}.{}(newValue{chain}.rawValue, forKey: {key})",
            raw_type.setter_method()
        )),
        tracking: tracking.then(|| name.to_owned())
    };
    Ok(AccessorExpansion {
        accessors: template.accessors(),
        peers:     Vec::new()
    })
}
