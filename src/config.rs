// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Names baked into generated code, and driver options.
//!
//! Every expansion family reads its store, coder and observation names from
//! here so the families cannot drift apart.

/// Store type of the injected field and initializer parameter.
pub const STORE_TYPE: &str = "UserDefaults";

/// Store used when no `defaults` argument is given.
pub const STANDARD_STORE: &str = "UserDefaults.standard";

/// Shorthand member that means "the standard store".
pub const STANDARD_MEMBER: &str = ".standard";

/// Name of the private store field injected into containers.
pub const STORE_FIELD: &str = "userDefaults";

/// Coder types used by the codable family.
pub const ENCODER_TYPE: &str = "JSONEncoder";
/// See [`ENCODER_TYPE`].
pub const DECODER_TYPE: &str = "JSONDecoder";

/// Shorthand for a default-constructed coder.
pub const INIT_SHORTHAND: &str = ".init()";

/// Module providing the change-observation capability.
pub const OBSERVATION_MODULE: &str = "Observation";

/// Conformance added to observable containers.
pub const CONFORMANCE: &str = "Observable";

/// Registrar type backing `access`/`withMutation`.
pub const REGISTRAR_TYPE: &str = "ObservationRegistrar";

/// Name of the injected registrar field.
pub const REGISTRAR_FIELD: &str = "_$observationRegistrar";

/// Attribute that hides a member from platform observation.
pub const IGNORED_ATTRIBUTE: &str = "ObservationIgnored";

/// Generic observable-conformance attribute.
pub const OBSERVABLE_ATTRIBUTE: &str = "Observable";

/// Availability attribute propagated onto conformance extensions.
pub const AVAILABILITY_ATTRIBUTE: &str = "available";

/// `Observation.Observable`.
#[must_use]
pub fn qualified_conformance() -> String {
    format!("{OBSERVATION_MODULE}.{CONFORMANCE}")
}

/// `Observation.ObservationRegistrar`.
#[must_use]
pub fn qualified_registrar() -> String {
    format!("{OBSERVATION_MODULE}.{REGISTRAR_TYPE}")
}

/// Options for whole-source expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Spaces per indentation level in generated code.
    pub indent_width: usize
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent_width: 4
        }
    }
}

impl Options {
    /// One indentation level.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_names() {
        assert_eq!(qualified_conformance(), "Observation.Observable");
        assert_eq!(qualified_registrar(), "Observation.ObservationRegistrar");
    }

    #[test]
    fn default_indent_is_four_spaces() {
        assert_eq!(Options::default().indent_unit(), "    ");
        let options = Options {
            indent_width: 2
        };
        assert_eq!(options.indent_unit(), "  ");
    }
}
