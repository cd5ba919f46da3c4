// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type and attribute model.
//!
//! Everything the expansion families decide before rendering code lives here:
//! which store type a declaration resolves to, whether a literal default fits
//! it, and which attributes are recognized.
//!
//! ```text
//! model.rs
//! ├── value_type.rs → ValueType lattice and per-type store metadata
//! ├── literal.rs    → LiteralType and the compatibility table
//! └── attribute.rs  → MacroAttribute name table, storage attribute set
//! ```

mod attribute;
mod literal;
mod value_type;

pub use attribute::{Family, MacroAttribute, is_storage_attribute};
pub use literal::{LiteralType, TypeMatch};
pub use value_type::ValueType;
