// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Values stored as encoded data.
//!
//! The payload type is taken from the declaration as written; the store only
//! ever sees a data blob, so the value type table is not consulted. Decode
//! and encode failures are swallowed with `try?`: a value that cannot be
//! decoded reads as absent and a value that cannot be encoded clears the key.
//!
//! ```text
//! @CodableUserDefaultsValue() var value: Payload?
//!     get {
//!         UserDefaults.standard.data(forKey: "value").flatMap {
//!             try? JSONDecoder().decode(Payload.self, from: $0)
//!         }
//!     }
//!     set { UserDefaults.standard.set(try? JSONEncoder().encode(newValue), forKey: "value") }
//! ```

use super::{
    args::ArgumentBundle,
    context::{Context, Site},
    template::{AccessorExpansion, AccessorTemplate, Getter, Lines}
};
use crate::{
    config::{DECODER_TYPE, ENCODER_TYPE},
    error::ExpansionError,
    model::MacroAttribute,
    syntax::{TypeSyntax, VariableDecl}
};

/// Expand a codable accessor attribute.
///
/// # Errors
///
/// Shape errors from [`Site::resolve`],
/// [`ExpansionError::DefaultValueNeeded`] for a non-optional variable without
/// a default, and [`ExpansionError::NotVariable`] for tuple and function
/// types.
pub(crate) fn expand(
    decl: &VariableDecl,
    attribute: MacroAttribute,
    args: &ArgumentBundle,
    context: &Context
) -> Result<AccessorExpansion, ExpansionError> {
    let site = Site::resolve(decl, attribute, args, context)?;
    let default = args.default_text();
    if !site.annotation.ty.is_optional() && default.is_none() {
        return Err(ExpansionError::DefaultValueNeeded);
    }
    let payload = payload_type(&site.annotation.ty)?;

    let Site {
        name,
        key,
        store,
        tracking,
        ..
    } = site;
    let decoder = args
        .decoder
        .clone()
        .unwrap_or_else(|| format!("{DECODER_TYPE}()"));
    let encoder = args
        .encoder
        .clone()
        .unwrap_or_else(|| format!("{ENCODER_TYPE}()"));

    let mut read = Lines::single(format!("{store}.data(forKey: {key}).flatMap {{"));
    read.push(1, format!("try? {decoder}.decode({payload}.self, from: $0)"));
    read.push(0, "}");

    let template = AccessorTemplate {
        getter:   Getter {
            registration: None,
            value:        read,
            fallback:     default.map(str::to_owned)
        },
        setter:   Lines::single(format!(
            "{store}.set(try? {encoder}.encode(newValue), forKey: {key})"
        )),
        tracking: tracking.then(|| name.to_owned())
    };
    Ok(AccessorExpansion {
        accessors: template.accessors(),
        peers:     Vec::new()
    })
}

/// Declared type with one level of optionality removed.
fn payload_type(ty: &TypeSyntax) -> Result<String, ExpansionError> {
    match ty.unwrapped() {
        TypeSyntax::Tuple(_)
        | TypeSyntax::Function {
            ..
        } => Err(ExpansionError::NotVariable),
        payload => Ok(payload.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TypeAnnotation;

    fn ty(source: &str) -> TypeSyntax {
        syn::parse_str::<TypeAnnotation>(source).unwrap().ty
    }

    #[test]
    fn payload_unwraps_one_optional() {
        assert_eq!(payload_type(&ty("Payload?")).unwrap(), "Payload");
        assert_eq!(payload_type(&ty("[Payload]")).unwrap(), "[Payload]");
        assert_eq!(payload_type(&ty("Payload??")).unwrap(), "Payload?");
        assert_eq!(payload_type(&ty("Box<Payload>")).unwrap(), "Box<Payload>");
    }

    #[test]
    fn tuples_and_functions_are_rejected() {
        assert_eq!(payload_type(&ty("(Int, Int)")), Err(ExpansionError::NotVariable));
        assert_eq!(payload_type(&ty("(() -> Void)?")), Err(ExpansionError::NotVariable));
    }
}
