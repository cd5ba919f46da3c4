// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Quick Navigation
//!
//! - **Whole files**: [`expand_source`], [`expand_source_with`]
//! - **Single declarations**: [`expand::expand_accessors`] and the container
//!   roles in [`expand`]
//! - **Front end**: [`syntax::parse_source`]
//! - **Failures**: [`ExpansionError`], [`Diagnostic`]
//!
//! # Architecture
//!
//! ```text
//! lib.rs
//! │
//! ├── syntax/   → Swift declaration front end (syn over proc-macro2 tokens)
//! ├── model/    → ValueType, LiteralType, MacroAttribute
//! ├── expand/   → argument bundle, templates, expansion families
//! ├── driver/   → whole-source walk and text splicing
//! ├── config    → generated names, Options
//! └── error     → ExpansionError, Diagnostic
//! ```
//!
//! # Generated Names
//!
//! | Name | Value |
//! |------|-------|
//! | store type | `UserDefaults` |
//! | standard store | `UserDefaults.standard` |
//! | container field | `userDefaults` |
//! | coders | `JSONEncoder()`, `JSONDecoder()` |
//! | registrar | `_$observationRegistrar: Observation.ObservationRegistrar` |
//! | conformance | `Observation.Observable` |
//!
//! # Single Declarations
//!
//! ```rust
//! use defaults_expand::{
//!     expand::{ArgumentBundle, Context, expand_accessors},
//!     model::MacroAttribute,
//!     syntax::VariableDecl
//! };
//!
//! let decl: VariableDecl = syn::parse_str("@UserDefaultsValue var link: URL?").unwrap();
//! let args = ArgumentBundle::from_attribute(&decl.attributes[0]);
//! let expansion =
//!     expand_accessors(&decl, MacroAttribute::UserDefaultsValue, &args, &Context::top_level())
//!         .unwrap();
//! assert_eq!(expansion.accessors.len(), 2);
//! ```

pub mod config;
mod driver;
pub mod error;
pub mod expand;
pub mod model;
pub mod syntax;

pub use config::Options;
pub use driver::{Expansion, expand_source, expand_source_with};
pub use error::{Diagnostic, DiagnosticKind, ExpansionError, Location};
