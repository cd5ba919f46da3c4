// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storable value types.
//!
//! [`ValueType`] is the closed set of types the store can hold natively. A
//! declared type resolves into it (or fails) before any code is generated,
//! and every piece of retrieval code is derived from the resolved value:
//!
//! | Type | Retrieval | Cast | Needs default | Nil on absence |
//! |------|-----------|------|---------------|----------------|
//! | `Bool` | `bool` | | no | no |
//! | `Int` | `integer` | | no | no |
//! | `Float` / `Double` | `float` / `double` | | no | no |
//! | `String`, `URL`, `Data` | `string`, `url`, `data` | | yes | yes |
//! | `Int8`..`UInt64`, `NSString`, `NSNumber`, `Date`, `NSDate`, `NSData` | `object` | `as? T` | yes | yes |
//! | `[E]` / `[String: V]` | `array` / `dictionary` | `as? [..]` | yes | yes |
//! | `W?` | from `W` | from `W` | no | yes |

use crate::{error::ExpansionError, syntax::TypeSyntax};

/// A type the store can hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `Bool`
    Bool,
    /// `Int`
    Int,
    /// `Int8`
    Int8,
    /// `Int16`
    Int16,
    /// `Int32`
    Int32,
    /// `Int64`
    Int64,
    /// `UInt`
    UInt,
    /// `UInt8`
    UInt8,
    /// `UInt16`
    UInt16,
    /// `UInt32`
    UInt32,
    /// `UInt64`
    UInt64,
    /// `Float`
    Float,
    /// `Double`
    Double,
    /// `String`
    String,
    /// `NSString`
    NsString,
    /// `NSNumber`
    NsNumber,
    /// `URL`
    Url,
    /// `Date`
    Date,
    /// `NSDate`
    NsDate,
    /// `Data`
    Data,
    /// `NSData`
    NsData,
    /// `[Element]`
    Array(Box<ValueType>),
    /// `[String: Value]`; the key is always `String`.
    Dictionary(Box<ValueType>),
    /// `Wrapped?`
    Optional(Box<ValueType>)
}

impl ValueType {
    /// Look a primitive up by its type name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let value = match name {
            "Bool" => Self::Bool,
            "Int" => Self::Int,
            "Int8" => Self::Int8,
            "Int16" => Self::Int16,
            "Int32" => Self::Int32,
            "Int64" => Self::Int64,
            "UInt" => Self::UInt,
            "UInt8" => Self::UInt8,
            "UInt16" => Self::UInt16,
            "UInt32" => Self::UInt32,
            "UInt64" => Self::UInt64,
            "Float" => Self::Float,
            "Double" => Self::Double,
            "String" => Self::String,
            "NSString" => Self::NsString,
            "NSNumber" => Self::NsNumber,
            "URL" => Self::Url,
            "Date" => Self::Date,
            "NSDate" => Self::NsDate,
            "Data" => Self::Data,
            "NSData" => Self::NsData,
            _ => return None
        };
        Some(value)
    }

    /// Resolve a declared type.
    ///
    /// # Errors
    ///
    /// - [`ExpansionError::UnsupportedType`] for a named type outside the
    ///   table, including generic spellings like `Array<Int>`
    /// - [`ExpansionError::DictKeyType`] for a dictionary whose key is not
    ///   `String`
    /// - [`ExpansionError::NotVariable`] for any other type shape
    pub fn resolve(ty: &TypeSyntax) -> Result<Self, ExpansionError> {
        match ty {
            TypeSyntax::Identifier {
                name,
                generic_args
            } => {
                if !generic_args.is_empty() {
                    return Err(ExpansionError::UnsupportedType);
                }
                Self::from_name(name).ok_or(ExpansionError::UnsupportedType)
            }
            TypeSyntax::Optional(wrapped) => Ok(Self::Optional(Box::new(Self::resolve(wrapped)?))),
            TypeSyntax::Array(element) => Ok(Self::Array(Box::new(Self::resolve(element)?))),
            TypeSyntax::Dictionary {
                key,
                value
            } => {
                let key = Self::resolve(key)?;
                if key != Self::String {
                    return Err(ExpansionError::DictKeyType);
                }
                Self::dictionary(key, Self::resolve(value)?)
            }
            _ => Err(ExpansionError::NotVariable)
        }
    }

    /// Build a dictionary type, rejecting non-`String` keys.
    ///
    /// # Errors
    ///
    /// Returns [`ExpansionError::DictKeyType`] when `key` is not `String`.
    pub fn dictionary(key: Self, value: Self) -> Result<Self, ExpansionError> {
        if key != Self::String {
            return Err(ExpansionError::DictKeyType);
        }
        Ok(Self::Dictionary(Box::new(value)))
    }

    /// Whether a read needs an explicit default.
    ///
    /// `Bool`, `Int`, `Float` and `Double` have natural empty values and
    /// optionals read as `nil`; everything else must be given a default.
    #[must_use]
    pub fn requires_default(&self) -> bool {
        !matches!(
            self,
            Self::Bool | Self::Int | Self::Float | Self::Double | Self::Optional(_)
        )
    }

    /// Whether the store's typed read yields `nil` when the key is absent.
    ///
    /// Only the four scalar reads return a zero value instead.
    #[must_use]
    pub fn yields_nil_on_absence(&self) -> bool {
        !matches!(self, Self::Bool | Self::Int | Self::Float | Self::Double)
    }

    /// Name of the store's typed read, called as `store.<method>(forKey:)`.
    #[must_use]
    pub fn retrieval_method(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Url => "url",
            Self::Data => "data",
            Self::Array(_) => "array",
            Self::Dictionary(_) => "dictionary",
            Self::Optional(wrapped) if wrapped.requires_default() => wrapped.retrieval_method(),
            _ => "object"
        }
    }

    /// Cast appended after the read (` as? T`), empty when the read is
    /// already typed.
    #[must_use]
    pub fn cast_suffix(&self) -> String {
        match self {
            Self::Bool | Self::Int | Self::Float | Self::Double | Self::String | Self::Url | Self::Data => {
                String::new()
            }
            Self::Optional(wrapped) if wrapped.requires_default() => wrapped.cast_suffix(),
            Self::Optional(wrapped) => format!(" as? {}", wrapped.native_type()),
            other => format!(" as? {}", other.native_type())
        }
    }

    /// Name of the store's write method.
    #[must_use]
    pub fn setter_method(&self) -> &'static str {
        match self {
            Self::Url => "set",
            _ => "setValue"
        }
    }

    /// Type name as written in generated code.
    #[must_use]
    pub fn native_type(&self) -> String {
        match self {
            Self::Array(element) => format!("[{}]", element.native_type()),
            Self::Dictionary(value) => format!("[String: {}]", value.native_type()),
            Self::Optional(wrapped) => format!("{}?", wrapped.native_type()),
            primitive => primitive.primitive_name().to_owned()
        }
    }

    fn primitive_name(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt => "UInt",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::NsString => "NSString",
            Self::NsNumber => "NSNumber",
            Self::Url => "URL",
            Self::Date => "Date",
            Self::NsDate => "NSDate",
            Self::Data => "Data",
            Self::NsData => "NSData",
            Self::Array(_) | Self::Dictionary(_) | Self::Optional(_) => ""
        }
    }

    /// Whether this is one of the fixed-width or native integer types.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// Whether this is `Float` or `Double`.
    #[must_use]
    pub fn is_floating_point(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Whether this is `String` or `NSString`.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String | Self::NsString)
    }
}
