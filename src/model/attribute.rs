// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Recognized attribute names.
//!
//! The table is closed: an attribute whose name is not listed here is left
//! alone by every expansion. Older spellings resolve to the same attribute as
//! their current names.
//!
//! | Spellings | Family | Scope |
//! |-----------|--------|-------|
//! | `UserDefaultsValue`, `UserDefaultValue` | plain | standalone |
//! | `RawUserDefaultsValue`, `RawUserDefaultValue` | raw | standalone |
//! | `CodableUserDefaultsValue`, `CodableUserDefaultValue` | codable | standalone |
//! | `DefaultsValue`, `DefaultValue` | plain | container |
//! | `RawDefaultsValue`, `RawDefaultValue` | raw | container |
//! | `CodableDefaultsValue`, `CodableDefaultValue` | codable | container |
//! | `ObservationDefaultsTracked` | tracked | container |
//! | `UserDefaultsData`, `UserDefault` | container | type |
//! | `ObservableUserDefaultsData` | observable container | type |

/// Expansion family an attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Store-backed value read through a typed store method.
    Plain,
    /// Raw-representable value stored as its raw value.
    Raw,
    /// Value stored as an encoded blob.
    Codable,
    /// In-memory value with change tracking only.
    Tracked,
    /// Class or struct receiving a store field and initializer.
    Container,
    /// Container with change tracking and a conformance extension.
    ObservableContainer
}

/// A recognized attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroAttribute {
    /// `@UserDefaultsValue`
    UserDefaultsValue,
    /// `@RawUserDefaultsValue`
    RawUserDefaultsValue,
    /// `@CodableUserDefaultsValue`
    CodableUserDefaultsValue,
    /// `@DefaultsValue`
    DefaultsValue,
    /// `@RawDefaultsValue`
    RawDefaultsValue,
    /// `@CodableDefaultsValue`
    CodableDefaultsValue,
    /// `@ObservationDefaultsTracked`
    ObservationDefaultsTracked,
    /// `@UserDefaultsData`
    UserDefaultsData,
    /// `@ObservableUserDefaultsData`
    ObservableUserDefaultsData
}

const SPELLINGS: &[(&str, MacroAttribute)] = &[
    ("UserDefaultsValue", MacroAttribute::UserDefaultsValue),
    ("UserDefaultValue", MacroAttribute::UserDefaultsValue),
    ("RawUserDefaultsValue", MacroAttribute::RawUserDefaultsValue),
    ("RawUserDefaultValue", MacroAttribute::RawUserDefaultsValue),
    ("CodableUserDefaultsValue", MacroAttribute::CodableUserDefaultsValue),
    ("CodableUserDefaultValue", MacroAttribute::CodableUserDefaultsValue),
    ("DefaultsValue", MacroAttribute::DefaultsValue),
    ("DefaultValue", MacroAttribute::DefaultsValue),
    ("RawDefaultsValue", MacroAttribute::RawDefaultsValue),
    ("RawDefaultValue", MacroAttribute::RawDefaultsValue),
    ("CodableDefaultsValue", MacroAttribute::CodableDefaultsValue),
    ("CodableDefaultValue", MacroAttribute::CodableDefaultsValue),
    ("ObservationDefaultsTracked", MacroAttribute::ObservationDefaultsTracked),
    ("UserDefaultsData", MacroAttribute::UserDefaultsData),
    ("UserDefault", MacroAttribute::UserDefaultsData),
    ("ObservableUserDefaultsData", MacroAttribute::ObservableUserDefaultsData)
];

impl MacroAttribute {
    /// Look up an attribute by any of its spellings.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == name)
            .map(|(_, attribute)| *attribute)
    }

    /// Current spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UserDefaultsValue => "UserDefaultsValue",
            Self::RawUserDefaultsValue => "RawUserDefaultsValue",
            Self::CodableUserDefaultsValue => "CodableUserDefaultsValue",
            Self::DefaultsValue => "DefaultsValue",
            Self::RawDefaultsValue => "RawDefaultsValue",
            Self::CodableDefaultsValue => "CodableDefaultsValue",
            Self::ObservationDefaultsTracked => "ObservationDefaultsTracked",
            Self::UserDefaultsData => "UserDefaultsData",
            Self::ObservableUserDefaultsData => "ObservableUserDefaultsData"
        }
    }

    /// Expansion family.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::UserDefaultsValue | Self::DefaultsValue => Family::Plain,
            Self::RawUserDefaultsValue | Self::RawDefaultsValue => Family::Raw,
            Self::CodableUserDefaultsValue | Self::CodableDefaultsValue => Family::Codable,
            Self::ObservationDefaultsTracked => Family::Tracked,
            Self::UserDefaultsData => Family::Container,
            Self::ObservableUserDefaultsData => Family::ObservableContainer
        }
    }

    /// Whether the attribute carries its own store and ignores any
    /// enclosing container's key prefix.
    #[must_use]
    pub const fn is_standalone(self) -> bool {
        matches!(
            self,
            Self::UserDefaultsValue | Self::RawUserDefaultsValue | Self::CodableUserDefaultsValue
        )
    }

    /// Whether the attribute expands a single variable into accessors.
    #[must_use]
    pub const fn is_accessor(self) -> bool {
        !self.is_container()
    }

    /// Whether the attribute is attached to a class or struct.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self.family(), Family::Container | Family::ObservableContainer)
    }

    /// Whether the attribute backs its variable with the store.
    #[must_use]
    pub const fn is_storage(self) -> bool {
        matches!(self.family(), Family::Plain | Family::Raw | Family::Codable)
    }
}

/// Whether `name` is one of the store-backing accessor spellings.
///
/// A variable carrying one of these is never given another accessor
/// attribute by its container.
#[must_use]
pub fn is_storage_attribute(name: &str) -> bool {
    MacroAttribute::from_name(name).is_some_and(MacroAttribute::is_storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_spellings_resolve() {
        assert_eq!(
            MacroAttribute::from_name("UserDefaultValue"),
            Some(MacroAttribute::UserDefaultsValue)
        );
        assert_eq!(
            MacroAttribute::from_name("RawDefaultValue"),
            Some(MacroAttribute::RawDefaultsValue)
        );
        assert_eq!(
            MacroAttribute::from_name("UserDefault"),
            Some(MacroAttribute::UserDefaultsData)
        );
        assert_eq!(MacroAttribute::from_name("Observable"), None);
        assert_eq!(MacroAttribute::from_name("userDefaultsValue"), None);
    }

    #[test]
    fn every_spelling_round_trips_to_current_name() {
        for (spelling, attribute) in SPELLINGS {
            assert_eq!(MacroAttribute::from_name(attribute.name()), Some(*attribute), "{spelling}");
        }
    }

    #[test]
    fn storage_set_is_the_twelve_accessor_spellings() {
        let storage: Vec<&str> = SPELLINGS
            .iter()
            .map(|(spelling, _)| *spelling)
            .filter(|spelling| is_storage_attribute(spelling))
            .collect();
        assert_eq!(storage.len(), 12);
        assert!(!is_storage_attribute("ObservationDefaultsTracked"));
        assert!(!is_storage_attribute("UserDefaultsData"));
        assert!(!is_storage_attribute("ObservationIgnored"));
    }

    #[test]
    fn roles() {
        assert!(MacroAttribute::CodableUserDefaultsValue.is_standalone());
        assert!(!MacroAttribute::CodableDefaultsValue.is_standalone());
        assert!(MacroAttribute::ObservationDefaultsTracked.is_accessor());
        assert!(MacroAttribute::ObservableUserDefaultsData.is_container());
        assert_eq!(MacroAttribute::RawDefaultsValue.family(), Family::Raw);
    }
}
