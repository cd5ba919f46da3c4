// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for the accessor families.

use pretty_assertions::assert_eq;

use super::*;

fn expand(source: &str, context: &Context) -> Result<String, ExpansionError> {
    let decl: VariableDecl = syn::parse_str(source).unwrap();
    let attribute = &decl.attributes[0];
    let macro_attribute = MacroAttribute::from_name(&attribute.name).unwrap();
    let args = ArgumentBundle::from_attribute(attribute);
    expand_accessors(&decl, macro_attribute, &args, context)
        .map(|expansion| expansion.render_block("", "    "))
}

fn top_level(source: &str) -> Result<String, ExpansionError> {
    expand(source, &Context::top_level())
}

fn getter(source: &str) -> String {
    let block = top_level(source).unwrap();
    let start = block.find("get {\n").unwrap() + "get {\n".len();
    let end = block.find("\n    }\n    set").unwrap();
    block[start..end]
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn integer_without_default() {
    assert_eq!(
        top_level("@UserDefaultsValue() var count: Int").unwrap(),
        " {\n    get {\n        UserDefaults.standard.integer(forKey: \"count\")\n    }\n    set {\n        UserDefaults.standard.setValue(newValue, forKey: \"count\")\n    }\n}"
    );
}

#[test]
fn string_default_is_coalesced() {
    assert_eq!(
        getter("@UserDefaultsValue(defaultValue: \"a\") var s: String"),
        "UserDefaults.standard.string(forKey: \"s\") ?? \"a\""
    );
}

#[test]
fn scalar_default_is_registered() {
    let read = getter("@UserDefaultsValue(defaultValue: 42) var n: Int");
    assert_eq!(
        read,
        "UserDefaults.standard.register(defaults: [\"n\": 42])\nreturn UserDefaults.standard.integer(forKey: \"n\")"
    );
    assert!(!read.contains("??"));

    let read = getter("@UserDefaultsValue(defaultValue: true) var flag: Bool");
    assert!(read.starts_with("UserDefaults.standard.register(defaults: [\"flag\": true])"));
}

#[test]
fn non_literal_defaults_are_trusted() {
    assert_eq!(
        getter("@UserDefaultsValue(defaultValue: Self.value) var n: Int"),
        "UserDefaults.standard.register(defaults: [\"n\": Self.value])\nreturn UserDefaults.standard.integer(forKey: \"n\")"
    );
    assert_eq!(
        getter("@UserDefaultsValue(defaultValue: .distantPast) var d: Date"),
        "UserDefaults.standard.object(forKey: \"d\") as? Date ?? .distantPast"
    );
}

#[test]
fn casts_and_methods() {
    assert_eq!(
        getter("@UserDefaultsValue var value: Int8?"),
        "UserDefaults.standard.object(forKey: \"value\") as? Int8"
    );
    assert_eq!(
        getter("@UserDefaultsValue var value: Int?"),
        "UserDefaults.standard.object(forKey: \"value\") as? Int"
    );
    assert_eq!(
        getter("@UserDefaultsValue var value: String?"),
        "UserDefaults.standard.string(forKey: \"value\")"
    );
    assert_eq!(
        getter("@UserDefaultsValue(defaultValue: []) var value: [String]"),
        "UserDefaults.standard.array(forKey: \"value\") as? [String] ?? []"
    );
    assert_eq!(
        getter("@UserDefaultsValue(defaultValue: [:]) var value: [String: [Int]]"),
        "UserDefaults.standard.dictionary(forKey: \"value\") as? [String: [Int]] ?? [:]"
    );
}

#[test]
fn url_uses_direct_setter() {
    let block = top_level("@UserDefaultsValue(defaultValue: Links.home) var link: URL").unwrap();
    assert!(block.contains("UserDefaults.standard.set(newValue, forKey: \"link\")"));
    let block = top_level("@UserDefaultsValue var link: URL?").unwrap();
    assert!(block.contains("UserDefaults.standard.setValue(newValue, forKey: \"link\")"));
    let block = top_level("@UserDefaultsValue var count: Int").unwrap();
    assert!(block.contains("setValue(newValue"));
}

#[test]
fn nilability_gating() {
    for ty in ["String", "Data", "URL", "Date", "NSNumber", "UInt8", "[Int]", "[String: Int]"] {
        assert_eq!(
            top_level(&format!("@UserDefaultsValue var value: {ty}")),
            Err(ExpansionError::DefaultValueNeeded),
            "{ty}"
        );
        assert!(top_level(&format!("@UserDefaultsValue var value: {ty}?")).is_ok(), "{ty}?");
    }
    for ty in ["Bool", "Int", "Float", "Double"] {
        assert!(top_level(&format!("@UserDefaultsValue var value: {ty}")).is_ok(), "{ty}");
    }
}

#[test]
fn literal_compatibility() {
    assert_eq!(
        top_level("@UserDefaultsValue(defaultValue: true) var value: String"),
        Err(ExpansionError::TypesMismatch)
    );
    assert_eq!(
        top_level("@UserDefaultsValue(defaultValue: \"1\") var value: Int"),
        Err(ExpansionError::TypesMismatch)
    );
    assert_eq!(
        top_level("@UserDefaultsValue(defaultValue: 1.5) var value: Int?"),
        Err(ExpansionError::TypesMismatch)
    );
    assert!(top_level("@UserDefaultsValue(defaultValue: 1) var value: UInt64").is_ok());
    assert!(top_level("@UserDefaultsValue(defaultValue: 1) var value: Double").is_ok());
    assert!(top_level("@UserDefaultsValue(defaultValue: 1.5) var value: NSNumber").is_ok());
}

#[test]
fn type_errors() {
    assert_eq!(
        top_level("@UserDefaultsValue var value: [Int: String]?"),
        Err(ExpansionError::DictKeyType)
    );
    assert_eq!(
        top_level("@UserDefaultsValue var value: Payload?"),
        Err(ExpansionError::UnsupportedType)
    );
    assert_eq!(
        top_level("@UserDefaultsValue var value: (Int, Int)"),
        Err(ExpansionError::NotVariable)
    );
    assert_eq!(top_level("@UserDefaultsValue let value: Int"), Err(ExpansionError::NotVariable));
}

#[test]
fn explicit_key_and_store() {
    let block = top_level(
        "@UserDefaultsValue(key: Keys.count, defaults: .shared) var count: Int"
    )
    .unwrap();
    assert!(block.contains("UserDefaults.shared.integer(forKey: Keys.count)"));
    assert!(block.contains("UserDefaults.shared.setValue(newValue, forKey: Keys.count)"));
}

#[test]
fn scoped_attribute_reads_container_field() {
    let context = Context {
        observable: false,
        key_prefix: "com.app.".into()
    };
    let block = expand("@DefaultsValue var count: Int", &context).unwrap();
    assert!(block.contains("userDefaults.integer(forKey: \"com.app.count\")"));
    assert_eq!(
        expand("@DefaultsValue static var count: Int", &context),
        Err(ExpansionError::StaticVariable)
    );
    assert!(expand("@UserDefaultsValue static var count: Int", &context).is_ok());
}

#[test]
fn observable_plain_accessors() {
    let context = Context {
        observable: true,
        key_prefix: String::new()
    };
    assert_eq!(
        expand("@DefaultsValue(defaultValue: 1) var count: Int", &context).unwrap(),
        concat!(
            " {\n",
            "    get {\n",
            "        access(keyPath: \\.count)\n",
            "        userDefaults.register(defaults: [\"count\": 1])\n",
            "        return userDefaults.integer(forKey: \"count\")\n",
            "    }\n",
            "    set {\n",
            "        withMutation(keyPath: \\.count) {\n",
            "            userDefaults.setValue(newValue, forKey: \"count\")\n",
            "        }\n",
            "    }\n",
            "}"
        )
    );
}

#[test]
fn raw_representable() {
    assert_eq!(
        top_level("@RawUserDefaultsValue(rawType: Int.self) var kind: Kind?").unwrap(),
        concat!(
            " {\n",
            "    get {\n",
            "        (UserDefaults.standard.object(forKey: \"kind\") as? Int).flatMap(Kind.init(rawValue:))\n",
            "    }\n",
            "    set {\n",
            "        UserDefaults.standard.setValue(newValue?.rawValue, forKey: \"kind\")\n",
            "    }\n",
            "}"
        )
    );
    assert_eq!(
        getter("@RawUserDefaultsValue(rawType: String.self, defaultValue: .light) var theme: Theme"),
        "(UserDefaults.standard.object(forKey: \"theme\") as? String).flatMap(Theme.init(rawValue:)) ?? .light"
    );
}

#[test]
fn raw_representable_errors() {
    assert_eq!(
        top_level("@RawUserDefaultsValue(rawType: Int.self) var kind: Kind"),
        Err(ExpansionError::DefaultValueNeeded)
    );
    assert_eq!(
        top_level("@RawUserDefaultsValue var kind: Kind?"),
        Err(ExpansionError::UnsupportedType)
    );
    assert_eq!(
        top_level("@RawUserDefaultsValue(rawType: Character.self) var kind: Kind?"),
        Err(ExpansionError::UnsupportedType)
    );
}

#[test]
fn codable_swallows_coding_failures() {
    assert_eq!(
        top_level("@CodableUserDefaultsValue(defaultValue: Payload()) var payload: Payload").unwrap(),
        concat!(
            " {\n",
            "    get {\n",
            "        UserDefaults.standard.data(forKey: \"payload\").flatMap {\n",
            "            try? JSONDecoder().decode(Payload.self, from: $0)\n",
            "        } ?? Payload()\n",
            "    }\n",
            "    set {\n",
            "        UserDefaults.standard.set(try? JSONEncoder().encode(newValue), forKey: \"payload\")\n",
            "    }\n",
            "}"
        )
    );
}

#[test]
fn codable_coders_and_errors() {
    let block = top_level(
        "@CodableUserDefaultsValue(encoder: .init(), decoder: SomeClass.decoder) var payload: Payload?"
    )
    .unwrap();
    assert!(block.contains("try? SomeClass.decoder.decode(Payload.self, from: $0)"));
    assert!(block.contains("try? JSONEncoder().encode(newValue)"));

    assert_eq!(
        top_level("@CodableUserDefaultsValue var payload: Payload"),
        Err(ExpansionError::DefaultValueNeeded)
    );
    assert_eq!(
        top_level("@CodableUserDefaultsValue var handler: (() -> Void)?"),
        Err(ExpansionError::NotVariable)
    );
}

#[test]
fn observable_codable_wraps_closure_read() {
    let context = Context {
        observable: true,
        key_prefix: "p.".into()
    };
    let block = expand("@CodableDefaultsValue var payload: Payload?", &context).unwrap();
    assert!(block.contains(concat!(
        "        access(keyPath: \\.payload)\n",
        "        return userDefaults.data(forKey: \"p.payload\").flatMap {\n",
        "            try? JSONDecoder().decode(Payload.self, from: $0)\n",
        "        }\n"
    )));
}

#[test]
fn tracked_family() {
    let block = top_level("@ObservationDefaultsTracked var count = 0").unwrap();
    assert_eq!(
        block,
        concat!(
            " {\n",
            "    @storageRestrictions(initializes: _count)\n",
            "    init(initialValue) {\n",
            "        _count = initialValue\n",
            "    }\n",
            "    get {\n",
            "        access(keyPath: \\.count)\n",
            "        return _count\n",
            "    }\n",
            "    set {\n",
            "        withMutation(keyPath: \\.count) {\n",
            "            _count = newValue\n",
            "        }\n",
            "    }\n",
            "}"
        )
    );
}

#[test]
fn older_spellings_expand_like_current_ones() {
    assert_eq!(
        top_level("@UserDefaultValue(defaultValue: 1) var count: Int"),
        top_level("@UserDefaultsValue(defaultValue: 1) var count: Int")
    );
}
