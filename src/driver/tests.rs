// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for source splicing.

use pretty_assertions::assert_eq;

use super::*;
use crate::error::{DiagnosticKind, Location};

#[test]
fn attribute_on_its_own_line_is_removed_with_the_line() {
    let expansion = expand_source("@UserDefaultsValue(defaultValue: 1)\nvar count: Int\n");
    assert!(expansion.is_clean());
    assert_eq!(
        expansion.source,
        concat!(
            "var count: Int {\n",
            "    get {\n",
            "        UserDefaults.standard.register(defaults: [\"count\": 1])\n",
            "        return UserDefaults.standard.integer(forKey: \"count\")\n",
            "    }\n",
            "    set {\n",
            "        UserDefaults.standard.setValue(newValue, forKey: \"count\")\n",
            "    }\n",
            "}\n"
        )
    );
}

#[test]
fn inline_attribute_is_removed_with_trailing_space() {
    let expansion = expand_source("@UserDefaultsValue var flag: Bool\n");
    assert_eq!(
        expansion.source,
        concat!(
            "var flag: Bool {\n",
            "    get {\n",
            "        UserDefaults.standard.bool(forKey: \"flag\")\n",
            "    }\n",
            "    set {\n",
            "        UserDefaults.standard.setValue(newValue, forKey: \"flag\")\n",
            "    }\n",
            "}\n"
        )
    );
}

#[test]
fn failures_are_local_and_positioned() {
    let source = concat!(
        "struct A {\n",
        "    @UserDefaultsValue\n",
        "    var name: String\n",
        "    @UserDefaultsValue var ok: Int\n",
        "}\n"
    );
    let expansion = expand_source(source);
    assert!(!expansion.is_clean());
    assert_eq!(expansion.diagnostics.len(), 1);
    let diagnostic = &expansion.diagnostics[0];
    assert_eq!(diagnostic.location, Location::new(2, 5));
    assert_eq!(diagnostic.attribute.as_deref(), Some("UserDefaultsValue"));
    assert_eq!(diagnostic.error(), Some(&ExpansionError::DefaultValueNeeded));
    assert_eq!(
        expansion.source,
        concat!(
            "struct A {\n",
            "    var name: String\n",
            "    var ok: Int {\n",
            "        get {\n",
            "            UserDefaults.standard.integer(forKey: \"ok\")\n",
            "        }\n",
            "        set {\n",
            "            UserDefaults.standard.setValue(newValue, forKey: \"ok\")\n",
            "        }\n",
            "    }\n",
            "}\n"
        )
    );
}

#[test]
fn unreadable_source_is_returned_unchanged() {
    let source = "let `default` = 1\n";
    let expansion = expand_source(source);
    assert_eq!(expansion.source, source);
    assert_eq!(expansion.diagnostics.len(), 1);
    assert!(matches!(expansion.diagnostics[0].kind, DiagnosticKind::Parse(_)));
    assert_eq!(expansion.diagnostics[0].attribute, None);
}

#[test]
fn key_paths_and_interpolation_do_not_block_siblings() {
    let source = concat!(
        "@UserDefaultsValue\n",
        "var count: Int\n",
        "let greeting = \"hi \\(name(\"x\"))\"\n",
        "let path = \\Settings.count\n",
        "let pattern = #\"\\d+\"#\n"
    );
    let expansion = expand_source(source);
    assert!(expansion.is_clean(), "{:?}", expansion.diagnostics);
    assert!(
        expansion
            .source
            .contains("        UserDefaults.standard.integer(forKey: \"count\")\n")
    );
    assert!(expansion.source.ends_with(concat!(
        "}\n",
        "let greeting = \"hi \\(name(\"x\"))\"\n",
        "let path = \\Settings.count\n",
        "let pattern = #\"\\d+\"#\n"
    )));
}

#[test]
fn failure_after_a_key_path_is_located_on_its_line() {
    let expansion = expand_source("let path = \\Settings.count\n@UserDefaultsValue\nvar name: String\n");
    assert_eq!(expansion.diagnostics.len(), 1);
    assert_eq!(expansion.diagnostics[0].location, Location::new(2, 1));
}

#[test]
fn initialized_variable_is_not_store_backed() {
    let expansion = expand_source("@UserDefaultsValue\nvar count: Int = 1\n");
    assert_eq!(expansion.source, "var count: Int = 1\n");
    assert_eq!(expansion.diagnostics.len(), 1);
    assert_eq!(
        expansion.diagnostics[0].error(),
        Some(&ExpansionError::NotVariable)
    );
}

#[test]
fn source_without_attributes_is_untouched() {
    let source = "struct A {\n    var a: Int\n    func f() {}\n}\n";
    let expansion = expand_source(source);
    assert!(expansion.is_clean());
    assert_eq!(expansion.source, source);
}

#[test]
fn misplaced_attributes_are_reported() {
    let expansion = expand_source(concat!(
        "@UserDefaultsValue\n",
        "func f() {}\n",
        "@UserDefaultsData\n",
        "enum E {}\n",
        "@ObservableUserDefaultsData var x: Int\n",
        "@DefaultsValue\n",
        "class C {}\n"
    ));
    assert_eq!(expansion.source, "func f() {}\nenum E {}\nvar x: Int\nclass C {}\n");
    let errors: Vec<(usize, Option<&ExpansionError>)> = expansion
        .diagnostics
        .iter()
        .map(|diagnostic| (diagnostic.location.line, diagnostic.error()))
        .collect();
    assert_eq!(
        errors,
        [
            (1, Some(&ExpansionError::NotVariable)),
            (3, Some(&ExpansionError::ClassOrStructNeeded)),
            (5, Some(&ExpansionError::ClassNeeded)),
            (6, Some(&ExpansionError::NotVariable))
        ]
    );
}

#[test]
fn attributes_on_local_variables_are_misplaced() {
    let expansion = expand_source(concat!(
        "func f() {\n",
        "    @UserDefaultsValue var a: Int\n",
        "    if a > 0 {\n",
        "        @DefaultsValue\n",
        "        var b: Int\n",
        "    }\n",
        "}\n"
    ));
    assert_eq!(
        expansion.source,
        "func f() {\n    var a: Int\n    if a > 0 {\n        var b: Int\n    }\n}\n"
    );
    let errors: Vec<(Location, Option<&ExpansionError>)> = expansion
        .diagnostics
        .iter()
        .map(|diagnostic| (diagnostic.location, diagnostic.error()))
        .collect();
    assert_eq!(
        errors,
        [
            (Location::new(2, 5), Some(&ExpansionError::NotVariable)),
            (Location::new(4, 9), Some(&ExpansionError::NotVariable))
        ]
    );
}

#[test]
fn only_the_first_accessor_attribute_expands() {
    let expansion = expand_source(concat!(
        "@UserDefaultsValue(key: \"a\")\n",
        "@CodableUserDefaultsValue\n",
        "var count: Int\n"
    ));
    assert!(expansion.is_clean());
    assert!(expansion.source.starts_with("var count: Int {\n"));
    assert!(expansion.source.contains("integer(forKey: \"a\")"));
    assert!(!expansion.source.contains("JSONDecoder"));
}

#[test]
fn indentation_follows_options() {
    let options = Options {
        indent_width: 2
    };
    let expansion = expand_source_with("@UserDefaultsValue\nvar n: Double\n", &options);
    assert_eq!(
        expansion.source,
        concat!(
            "var n: Double {\n",
            "  get {\n",
            "    UserDefaults.standard.double(forKey: \"n\")\n",
            "  }\n",
            "  set {\n",
            "    UserDefaults.standard.setValue(newValue, forKey: \"n\")\n",
            "  }\n",
            "}\n"
        )
    );
}

#[test]
fn members_go_before_the_closing_brace() {
    let expansion = expand_source(concat!(
        "enum Outer {\n",
        "    @UserDefaultsData\n",
        "    struct Inner {\n",
        "        let id: Int\n",
        "    }\n",
        "}\n"
    ));
    assert!(expansion.is_clean());
    assert_eq!(
        expansion.source,
        concat!(
            "enum Outer {\n",
            "    struct Inner {\n",
            "        let id: Int\n",
            "\n",
            "        private let userDefaults: UserDefaults\n",
            "\n",
            "        init(userDefaults: UserDefaults = UserDefaults.standard) {\n",
            "            self.userDefaults = userDefaults\n",
            "        }\n",
            "    }\n",
            "}\n"
        )
    );
}

#[test]
fn failed_container_keeps_members_unattached() {
    let expansion = expand_source("@ObservableUserDefaultsData\nstruct S {\n    var a: Int\n}\n");
    assert_eq!(expansion.source, "struct S {\n    var a: Int\n}\n");
    assert_eq!(expansion.diagnostics[0].error(), Some(&ExpansionError::ClassNeeded));
    assert_eq!(expansion.diagnostics[0].location, Location::new(1, 1));
}
