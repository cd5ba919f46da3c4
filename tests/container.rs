// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Store-backed container expansion.

use defaults_expand::{ExpansionError, expand_source};
use pretty_assertions::assert_eq;

#[test]
fn empty_open_class() {
    let expansion = expand_source("@UserDefaultsData(defaults: .test)\nopen class Defaults {\n}\n");
    assert!(expansion.is_clean());
    assert_eq!(
        expansion.source,
        concat!(
            "open class Defaults {\n",
            "\n",
            "    private let userDefaults: UserDefaults\n",
            "\n",
            "    public init(userDefaults: UserDefaults = UserDefaults.test) {\n",
            "        self.userDefaults = userDefaults\n",
            "    }\n",
            "}\n"
        )
    );
}

#[test]
fn initializer_visibility_follows_container() {
    for (modifiers, expected) in [
        ("public", "    public init("),
        ("package", "    init("),
        ("fileprivate", "    fileprivate init("),
        ("private", "    init("),
        ("final", "    init(")
    ] {
        let expansion = expand_source(&format!("@UserDefaultsData\n{modifiers} class A {{}}\n"));
        assert!(
            expansion.source.contains(&format!("\n{expected}userDefaults: UserDefaults")),
            "{modifiers}: {}",
            expansion.source
        );
    }
}

#[test]
fn re_expansion_adds_nothing() {
    let first = expand_source("@UserDefaultsData\nstruct Flags {\n    var enabled: Bool\n}\n");
    assert!(first.is_clean());
    assert_eq!(
        first.source,
        concat!(
            "struct Flags {\n",
            "    var enabled: Bool {\n",
            "        get {\n",
            "            userDefaults.bool(forKey: \"enabled\")\n",
            "        }\n",
            "        set {\n",
            "            userDefaults.setValue(newValue, forKey: \"enabled\")\n",
            "        }\n",
            "    }\n",
            "\n",
            "    private let userDefaults: UserDefaults\n",
            "\n",
            "    init(userDefaults: UserDefaults = UserDefaults.standard) {\n",
            "        self.userDefaults = userDefaults\n",
            "    }\n",
            "}\n"
        )
    );

    let second = expand_source(&format!("@UserDefaultsData\n{}", first.source));
    assert!(second.is_clean());
    assert_eq!(second.source, first.source);
}

#[test]
fn observable_classes_hide_store_backed_members() {
    let expansion = expand_source(concat!(
        "@Observable\n",
        "@UserDefaultsData\n",
        "class Model {\n",
        "    @SomeMacro\n",
        "    var value: Int\n",
        "    @DefaultsValue(key: \"k\")\n",
        "    var keyed: String?\n",
        "    var title = \"\"\n",
        "}\n"
    ));
    assert!(expansion.is_clean());
    assert_eq!(
        expansion.source,
        concat!(
            "@Observable\n",
            "class Model {\n",
            "    @SomeMacro\n",
            "    @ObservationIgnored\n",
            "    var value: Int {\n",
            "        get {\n",
            "            access(keyPath: \\.value)\n",
            "            return userDefaults.integer(forKey: \"value\")\n",
            "        }\n",
            "        set {\n",
            "            withMutation(keyPath: \\.value) {\n",
            "                userDefaults.setValue(newValue, forKey: \"value\")\n",
            "            }\n",
            "        }\n",
            "    }\n",
            "    @ObservationIgnored\n",
            "    var keyed: String? {\n",
            "        get {\n",
            "            access(keyPath: \\.keyed)\n",
            "            return userDefaults.string(forKey: \"k\")\n",
            "        }\n",
            "        set {\n",
            "            withMutation(keyPath: \\.keyed) {\n",
            "                userDefaults.setValue(newValue, forKey: \"k\")\n",
            "            }\n",
            "        }\n",
            "    }\n",
            "    var title = \"\"\n",
            "\n",
            "    private let userDefaults: UserDefaults\n",
            "\n",
            "    init(userDefaults: UserDefaults = UserDefaults.standard) {\n",
            "        self.userDefaults = userDefaults\n",
            "    }\n",
            "}\n"
        )
    );
}

#[test]
fn older_spelling_and_key_prefix() {
    let expansion = expand_source(concat!(
        "@UserDefault(keyPrefix: \"v1_\")\n",
        "struct Legacy {\n",
        "    var token: String?\n",
        "    @DefaultValue(key: Keys.mode)\n",
        "    var mode: Int\n",
        "}\n"
    ));
    assert!(expansion.is_clean());
    assert!(expansion.source.contains("userDefaults.string(forKey: \"v1_token\")"));
    assert!(expansion.source.contains("userDefaults.integer(forKey: Keys.mode)"));
    assert!(!expansion.source.contains("@UserDefault"));
}

#[test]
fn member_failures_do_not_stop_siblings() {
    let expansion = expand_source(concat!(
        "@UserDefaultsData\n",
        "class Settings {\n",
        "    var name: String\n",
        "    var count: Int\n",
        "}\n"
    ));
    assert_eq!(expansion.diagnostics.len(), 1);
    assert_eq!(
        expansion.diagnostics[0].error(),
        Some(&ExpansionError::DefaultValueNeeded)
    );
    assert_eq!(expansion.diagnostics[0].location.line, 3);
    assert!(expansion.source.contains("    var name: String\n    var count: Int {\n"));
    assert!(expansion.source.contains("private let userDefaults: UserDefaults"));
}
