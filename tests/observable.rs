// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Observable container expansion.

use defaults_expand::{ExpansionError, expand_source};
use pretty_assertions::assert_eq;

#[test]
fn declared_conformance_skips_extension() {
    let expansion = expand_source("@ObservableUserDefaultsData\nclass Store: Observable {\n}\n");
    assert!(expansion.is_clean());
    assert!(!expansion.source.contains("extension"));
    assert!(expansion.source.contains("_$observationRegistrar"));
}

#[test]
fn hand_written_helpers_are_not_duplicated() {
    let expansion = expand_source(concat!(
        "@ObservableUserDefaultsData\n",
        "class Store {\n",
        "    private let userDefaults: UserDefaults\n",
        "    func access<M>(keyPath: KeyPath<Store, M>) {}\n",
        "}\n"
    ));
    assert!(expansion.is_clean());
    assert_eq!(expansion.source.matches("func access").count(), 1);
    assert_eq!(expansion.source.matches("userDefaults: UserDefaults").count(), 2);
    assert_eq!(expansion.source.matches("func withMutation").count(), 1);
}

#[test]
fn nested_container_extends_qualified_name() {
    let expansion = expand_source(concat!(
        "enum App {\n",
        "    @ObservableUserDefaultsData\n",
        "    class Store: Equatable {\n",
        "    }\n",
        "}\n"
    ));
    assert!(expansion.is_clean());
    assert!(
        expansion
            .source
            .ends_with("}\n\nextension App.Store: Observation.Observable {\n}\n"),
        "{}",
        expansion.source
    );
    assert!(expansion.source.contains("\n            keyPath: KeyPath<Store, Member>\n"));
}

#[test]
fn tracked_members_keep_modifiers_on_backing_storage() {
    let expansion = expand_source(concat!(
        "@ObservableUserDefaultsData\n",
        "class Store {\n",
        "    public private(set) var total: Double = 0\n",
        "}\n"
    ));
    assert!(expansion.is_clean());
    assert!(expansion.source.contains(concat!(
        "    public private(set) var total: Double = 0 {\n",
        "        @storageRestrictions(initializes: _total)\n",
        "        init(initialValue) {\n",
        "            _total = initialValue\n",
        "        }\n"
    )));
    assert!(
        expansion
            .source
            .contains("\n    @ObservationIgnored private var _total: Double = 0\n")
    );
}

#[test]
fn explicit_attributes_win_over_attachment() {
    let expansion = expand_source(concat!(
        "@ObservableUserDefaultsData\n",
        "class Store {\n",
        "    @CodableDefaultsValue\n",
        "    var session: Session?\n",
        "    @ObservationDefaultsTracked\n",
        "    static var counter = 0\n",
        "}\n"
    ));
    assert!(expansion.is_clean());
    assert!(expansion.source.contains(concat!(
        "            access(keyPath: \\.session)\n",
        "            return userDefaults.data(forKey: \"session\").flatMap {\n",
        "                try? JSONDecoder().decode(Session.self, from: $0)\n",
        "            }\n"
    )));
    assert!(expansion.source.contains("    static var counter = 0\n"));
    assert!(!expansion.source.contains("_counter"));
}

#[test]
fn kind_gating_names_the_declaration() {
    let expansion = expand_source("@ObservableUserDefaultsData\nenum Mode {\n    case a\n}\n");
    assert_eq!(expansion.source, "enum Mode {\n    case a\n}\n");
    assert_eq!(
        expansion.diagnostics[0].error(),
        Some(&ExpansionError::InvalidApplication {
            attribute: "ObservableUserDefaultsData".into(),
            kind:      "enumeration",
            name:      "Mode".into()
        })
    );
}

#[test]
fn expanded_output_expands_again_unchanged() {
    let first = expand_source("@ObservableUserDefaultsData\nclass Counter {\n    var count: Int\n}\n");
    assert!(first.is_clean());
    assert!(first.source.contains("access(keyPath: \\.count)"));

    let again = expand_source(&first.source);
    assert!(again.is_clean(), "{:?}", again.diagnostics);
    assert_eq!(again.source, first.source);

    let annotated = expand_source(&format!("@ObservableUserDefaultsData\n{}", first.source));
    assert!(annotated.is_clean(), "{:?}", annotated.diagnostics);
    assert_eq!(annotated.source, first.source);
}

#[test]
fn tracked_initializer_keeps_interpolation() {
    let expansion = expand_source(concat!(
        "@ObservableUserDefaultsData\n",
        "class Store {\n",
        "    var greeting = \"hi \\(name)\"\n",
        "}\n"
    ));
    assert!(expansion.is_clean(), "{:?}", expansion.diagnostics);
    assert!(
        expansion
            .source
            .contains("\n    @ObservationIgnored private var _greeting = \"hi \\(name)\"\n"),
        "{}",
        expansion.source
    );
}
