// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Store-backed containers.
//!
//! A container attribute on a class or struct has two roles:
//!
//! | Role | Produces |
//! |------|----------|
//! | member | `private let userDefaults: UserDefaults` and a matching `init` |
//! | member attribute | `@DefaultsValue` on every plain stored `var` |
//!
//! Injected members are skipped when the container already declares an
//! equivalent one, so expanding an already expanded container adds nothing.

use tracing::trace;

use super::{args::ArgumentBundle, context::is_plain_stored, template::Lines};
use crate::{
    config::{IGNORED_ATTRIBUTE, OBSERVABLE_ATTRIBUTE, STANDARD_STORE, STORE_FIELD, STORE_TYPE},
    error::ExpansionError,
    model::{MacroAttribute, is_storage_attribute},
    syntax::{DeclGroup, GroupKind, Modifier, Parameter, Signature, VariableDecl}
};

/// Attributes a container attaches to one of its variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment<'a> {
    /// The receiving variable.
    pub decl:       &'a VariableDecl,
    /// Attribute names, without `@`, in attachment order.
    pub attributes: Vec<&'static str>
}

/// Member role of `@UserDefaultsData`.
///
/// # Errors
///
/// Returns [`ExpansionError::ClassOrStructNeeded`] for anything but a class or
/// struct.
pub fn members(group: &DeclGroup, args: &ArgumentBundle) -> Result<Vec<Lines>, ExpansionError> {
    if !matches!(group.kind, GroupKind::Class | GroupKind::Struct) {
        return Err(ExpansionError::ClassOrStructNeeded);
    }
    Ok(store_members(group, args))
}

/// Member-attribute role of `@UserDefaultsData`.
///
/// Every instance `var` with a single binding and no initializer or accessor
/// block is store-backed: it receives `@DefaultsValue` unless it already
/// carries a storage attribute. When the container is also `@Observable`,
/// store-backed members are hidden from the platform observation with
/// `@ObservationIgnored`.
#[must_use]
pub fn member_attributes(group: &DeclGroup) -> Vec<Attachment<'_>> {
    let observable = group.has_attribute(OBSERVABLE_ATTRIBUTE);
    group
        .variables()
        .filter(|decl| decl.is_var() && decl.is_instance())
        .filter(|decl| decl.single_binding().is_some_and(is_plain_stored))
        .filter_map(|decl| {
            let mut attributes = Vec::new();
            if !decl.attributes.iter().any(|attribute| is_storage_attribute(&attribute.name)) {
                attributes.push(MacroAttribute::DefaultsValue.name());
            }
            if observable && !decl.has_attribute(IGNORED_ATTRIBUTE) {
                attributes.push(IGNORED_ATTRIBUTE);
            }
            trace!(member = decl.identifier(), ?attributes, "container attachment");
            (!attributes.is_empty()).then_some(Attachment {
                decl,
                attributes
            })
        })
        .collect()
}

/// Store field and initializer, each skipped when already declared.
pub(crate) fn store_members(group: &DeclGroup, args: &ArgumentBundle) -> Vec<Lines> {
    let mut members = Vec::new();
    if !group.has_variable(STORE_FIELD, true) {
        members.push(Lines::single(format!("private let {STORE_FIELD}: {STORE_TYPE}")));
    }
    let signature = Signature {
        is_instance: true,
        name:        "init".into(),
        parameters:  vec![Parameter::new(STORE_FIELD, STORE_TYPE)],
        result:      "Void".into()
    };
    if !group.has_function(&signature) {
        let store = args.store.as_deref().unwrap_or(STANDARD_STORE);
        let mut init = Lines::single(format!(
            "{}init({STORE_FIELD}: {STORE_TYPE} = {store}) {{",
            init_visibility(&group.modifiers)
        ));
        init.push(1, format!("self.{STORE_FIELD} = {STORE_FIELD}"));
        init.push(0, "}");
        members.push(init);
    }
    members
}

/// Access level of the generated initializer, with a trailing space.
///
/// `open` containers get a `public` initializer. `private` and `package`
/// containers get none, which leaves the initializer at the default level.
fn init_visibility(modifiers: &[Modifier]) -> &'static str {
    modifiers
        .iter()
        .find_map(|modifier| match modifier.name.as_str() {
            "public" | "open" => Some("public "),
            "internal" => Some("internal "),
            "fileprivate" => Some("fileprivate "),
            "private" => Some(""),
            _ => None
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Member, parse_source};

    fn group(source: &str) -> DeclGroup {
        match parse_source(source).unwrap().items.into_iter().next() {
            Some(Member::Group(group)) => group,
            other => panic!("expected a group, got {other:?}")
        }
    }

    fn rendered(members: &[Lines]) -> Vec<String> {
        members.iter().map(|lines| lines.render("", "    ")).collect()
    }

    #[test]
    fn injects_field_and_initializer() {
        let container = group("@UserDefaultsData(defaults: .test)\nopen class Defaults {\n}");
        let args = ArgumentBundle::from_attribute(&container.attributes[0]);
        assert_eq!(
            rendered(&members(&container, &args).unwrap()),
            [
                "private let userDefaults: UserDefaults".to_owned(),
                "public init(userDefaults: UserDefaults = UserDefaults.test) {\n    self.userDefaults = userDefaults\n}".to_owned()
            ]
        );
    }

    #[test]
    fn visibility_follows_container() {
        for (modifiers, expected) in [
            ("public final", "public "),
            ("final", ""),
            ("fileprivate", "fileprivate "),
            ("package", ""),
            ("internal", "internal "),
            ("private", "")
        ] {
            let container = group(&format!("{modifiers} class A {{}}"));
            assert_eq!(init_visibility(&container.modifiers), expected, "{modifiers}");
        }
    }

    #[test]
    fn existing_members_are_not_duplicated() {
        let container = group(
            "struct A {\n    private let userDefaults: UserDefaults\n    init(userDefaults: UserDefaults = .standard) {\n        self.userDefaults = userDefaults\n    }\n}"
        );
        assert!(members(&container, &ArgumentBundle::default()).unwrap().is_empty());
    }

    #[test]
    fn rejects_other_kinds() {
        for source in ["enum A {}", "actor A {}", "extension A {}", "protocol A {}"] {
            assert_eq!(
                members(&group(source), &ArgumentBundle::default()),
                Err(ExpansionError::ClassOrStructNeeded),
                "{source}"
            );
        }
    }

    #[test]
    fn attaches_to_plain_stored_vars_only() {
        let container = group(
            "class A {\n    var a: Int\n    var b = 1\n    var c: Int { 1 }\n    let d: Int\n    static var e: Int\n    @DefaultsValue(key: \"k\")\n    var f: Int\n    var g: Int, h: Int\n    var i: Int { didSet {} }\n}"
        );
        let attachments = member_attributes(&container);
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].decl.identifier(), Some("a"));
        assert_eq!(attachments[0].attributes, ["DefaultsValue"]);
    }

    #[test]
    fn observable_containers_hide_store_backed_members() {
        let container = group(
            "@Observable\nclass A {\n    var a: Int\n    @DefaultsValue(key: \"k\")\n    var b: Int\n    @ObservationIgnored\n    var c: Int\n    var d = true\n}"
        );
        let attachments: Vec<(Option<&str>, Vec<&str>)> = member_attributes(&container)
            .into_iter()
            .map(|attachment| (attachment.decl.identifier(), attachment.attributes))
            .collect();
        assert_eq!(
            attachments,
            [
                (Some("a"), vec!["DefaultsValue", "ObservationIgnored"]),
                (Some("b"), vec!["ObservationIgnored"]),
                (Some("c"), vec!["DefaultsValue"])
            ]
        );
    }
}
