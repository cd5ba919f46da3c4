// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Diagnostic taxonomy for accessor expansion.
//!
//! Every expansion either produces generated syntax or fails with exactly one
//! [`ExpansionError`]. Failures are local: a failing member never prevents its
//! siblings from expanding.
//!
//! # Taxonomy
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`NotVariable`](ExpansionError::NotVariable) | Target is not a single-binding `var` with a usable type |
//! | [`DefaultValueNeeded`](ExpansionError::DefaultValueNeeded) | Declared type cannot be read without a default |
//! | [`DictKeyType`](ExpansionError::DictKeyType) | Dictionary key does not resolve to `String` |
//! | [`UnsupportedType`](ExpansionError::UnsupportedType) | Declared or `rawType` type is outside the value table |
//! | [`TypesMismatch`](ExpansionError::TypesMismatch) | Literal `defaultValue` disagrees with the declared type |
//! | [`ClassOrStructNeeded`](ExpansionError::ClassOrStructNeeded) | Container attribute on an enum, actor, protocol or extension |
//! | [`ClassNeeded`](ExpansionError::ClassNeeded) | Observable container attribute on a non-class |
//! | [`StaticVariable`](ExpansionError::StaticVariable) | Container-scoped accessor on a `static`/`class` member |
//! | [`InvalidApplication`](ExpansionError::InvalidApplication) | Observable container attribute on an enum or actor |

use std::fmt;

use proc_macro2::LineColumn;
use thiserror::Error;

/// Closed set of expansion failures.
///
/// The `Display` text is the message shown to the user at the attribute's
/// source location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    /// Target is not a single-binding `var` declaration.
    #[error("Must be `var` declaration.")]
    NotVariable,

    /// The declared type has no natural empty value and no default was given.
    #[error("This type requires a default value.")]
    DefaultValueNeeded,

    /// A dictionary key type did not resolve to `String`.
    #[error("The Dictionary key type must be `String`.")]
    DictKeyType,

    /// The declared (or `rawType`) type is not a storable value type.
    #[error("Unsupported type.")]
    UnsupportedType,

    /// A literal `defaultValue` does not match the declared type.
    #[error("The type of the variable and the `defaultValue` must match.")]
    TypesMismatch,

    /// Container attribute applied to something other than a class or struct.
    #[error("Must be a `class` or `struct`.")]
    ClassOrStructNeeded,

    /// Observable container attribute applied to something other than a class.
    #[error("Must be a `class`.")]
    ClassNeeded,

    /// Container-scoped accessor attribute applied to a type-level member.
    #[error("Must not be a `static` variable declaration.")]
    StaticVariable,

    /// Observable container attribute applied to an enum or actor.
    #[error("'@{attribute}' cannot be applied to {kind} type '{name}'")]
    InvalidApplication {
        /// Attribute name as written, without `@`.
        attribute: String,
        /// Declaration kind (`enumeration`, `actor`).
        kind:      &'static str,
        /// Name of the rejected declaration.
        name:      String
    }
}

/// 1-based source position of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Location {
    /// Line, starting at 1.
    pub line:   usize,
    /// Column, starting at 1.
    pub column: usize
}

impl Location {
    /// Create a location from 1-based line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column
        }
    }
}

impl From<LineColumn> for Location {
    fn from(position: LineColumn) -> Self {
        Self {
            line:   position.line,
            column: position.column + 1
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// What went wrong at a diagnostic location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An expansion rejected its declaration.
    Expansion(ExpansionError),

    /// The declaration front end could not read the source.
    Parse(String)
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expansion(error) => error.fmt(f),
            Self::Parse(message) => f.write_str(message)
        }
    }
}

/// A diagnostic tied to the attribute that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Position of the triggering attribute (`@`).
    pub location:  Location,
    /// Attribute name, when the diagnostic comes from an expansion.
    pub attribute: Option<String>,
    /// Failure description.
    pub kind:      DiagnosticKind
}

impl Diagnostic {
    /// Diagnostic for a failed expansion of `attribute`.
    #[must_use]
    pub fn expansion(
        location: impl Into<Location>,
        attribute: impl Into<String>,
        error: ExpansionError
    ) -> Self {
        Self {
            location:  location.into(),
            attribute: Some(attribute.into()),
            kind:      DiagnosticKind::Expansion(error)
        }
    }

    /// Diagnostic for a front-end failure.
    #[must_use]
    pub fn parse(error: &syn::Error) -> Self {
        Self {
            location:  error.span().start().into(),
            attribute: None,
            kind:      DiagnosticKind::Parse(error.to_string())
        }
    }

    /// The expansion error, if this is not a parse diagnostic.
    #[must_use]
    pub fn error(&self) -> Option<&ExpansionError> {
        match &self.kind {
            DiagnosticKind::Expansion(error) => Some(error),
            DiagnosticKind::Parse(_) => None
        }
    }

    /// Message shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_taxonomy() {
        assert_eq!(ExpansionError::NotVariable.to_string(), "Must be `var` declaration.");
        assert_eq!(
            ExpansionError::DefaultValueNeeded.to_string(),
            "This type requires a default value."
        );
        assert_eq!(
            ExpansionError::DictKeyType.to_string(),
            "The Dictionary key type must be `String`."
        );
        assert_eq!(ExpansionError::UnsupportedType.to_string(), "Unsupported type.");
        assert_eq!(
            ExpansionError::TypesMismatch.to_string(),
            "The type of the variable and the `defaultValue` must match."
        );
        assert_eq!(
            ExpansionError::ClassOrStructNeeded.to_string(),
            "Must be a `class` or `struct`."
        );
        assert_eq!(ExpansionError::ClassNeeded.to_string(), "Must be a `class`.");
        assert_eq!(
            ExpansionError::StaticVariable.to_string(),
            "Must not be a `static` variable declaration."
        );
    }

    #[test]
    fn invalid_application_names_kind_and_type() {
        let error = ExpansionError::InvalidApplication {
            attribute: "ObservableUserDefaultsData".into(),
            kind:      "enumeration",
            name:      "Defaults".into()
        };
        assert_eq!(
            error.to_string(),
            "'@ObservableUserDefaultsData' cannot be applied to enumeration type 'Defaults'"
        );
    }

    #[test]
    fn location_from_line_column_is_one_based() {
        let location = Location::from(LineColumn {
            line:   3,
            column: 4
        });
        assert_eq!(location, Location::new(3, 5));
        assert_eq!(location.to_string(), "3:5");
    }

    #[test]
    fn diagnostic_display() {
        let diagnostic =
            Diagnostic::expansion(Location::new(1, 1), "DefaultsValue", ExpansionError::NotVariable);
        assert_eq!(diagnostic.to_string(), "1:1: Must be `var` declaration.");
        assert_eq!(diagnostic.error(), Some(&ExpansionError::NotVariable));
        assert_eq!(diagnostic.attribute.as_deref(), Some("DefaultsValue"));
    }
}
