// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Whole-source expansion.
//!
//! The driver plays the part of a compiler's macro-expansion pass: it parses
//! a source file, presents every annotated declaration to its expansion
//! family and splices the generated code back into the original text.
//!
//! # Pipeline
//!
//! ```text
//! source ──► parse_source ──► SourceFile
//!                               │
//!                               ▼ walk (recursive over groups)
//!            ┌─────────────────────────────────────────────┐
//!            │ group:    Context::for_group                │
//!            │           expand_members / member attrs /   │
//!            │           extensions                        │
//!            │ variable: explicit or attached attribute    │
//!            │           expand_accessors                  │
//!            └─────────────────────────────────────────────┘
//!                               │ Edits (offset-ordered)
//!                               ▼
//!                     Expansion { source, diagnostics }
//! ```
//!
//! # Placement
//!
//! | Output | Where |
//! |--------|-------|
//! | recognized attribute | removed, with its line when alone on it |
//! | attached plain attribute | before the declaration's modifiers |
//! | accessor block | after the binding |
//! | peers | after the declaration, one per line |
//! | members | before the closing brace, separated by blank lines |
//! | extensions | after the outermost enclosing group, separated by a blank line |
//!
//! A failing expansion leaves its declaration as written, minus the consumed
//! attribute, and records a [`Diagnostic`] at the attribute.

mod edit;

use proc_macro2::LineColumn;
use tracing::{debug, trace};

use self::edit::{Edits, LineIndex};
use crate::{
    config::{CONFORMANCE, Options},
    error::{Diagnostic, ExpansionError},
    expand::{
        AccessorExpansion, ArgumentBundle, Attachment, Context, Lines, expand_accessors,
        expand_extensions, expand_member_attributes, expand_members
    },
    model::{Family, MacroAttribute},
    syntax::{Attribute, DeclGroup, GroupKind, Member, VariableDecl, parse_source}
};

/// Result of expanding a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Expanded source text.
    pub source:      String,
    /// Diagnostics in source order.
    pub diagnostics: Vec<Diagnostic>
}

impl Expansion {
    /// Whether every expansion succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Expand every recognized attribute in `source` with default options.
#[must_use]
pub fn expand_source(source: &str) -> Expansion {
    expand_source_with(source, &Options::default())
}

/// Expand every recognized attribute in `source`.
///
/// A source the front end cannot read is returned unchanged with a single
/// parse diagnostic.
#[must_use]
pub fn expand_source_with(source: &str, options: &Options) -> Expansion {
    let file = match parse_source(source) {
        Ok(file) => file,
        Err(error) => {
            debug!(%error, "source not expanded");
            return Expansion {
                source:      source.to_owned(),
                diagnostics: vec![Diagnostic::parse(&error)]
            };
        }
    };

    let mut driver = Driver {
        index:       LineIndex::new(source),
        unit:        options.indent_unit(),
        conformed:   conformed_names(&file.items),
        edits:       Edits::new(),
        diagnostics: Vec::new()
    };
    driver.members(&file.items, &Context::top_level(), &[], &Scope::default());

    let Driver {
        edits,
        mut diagnostics,
        ..
    } = driver;
    diagnostics.sort_by_key(|diagnostic| diagnostic.location);
    debug!(diagnostics = diagnostics.len(), "source expanded");
    Expansion {
        source: if edits.is_empty() {
            source.to_owned()
        } else {
            edits.apply(source)
        },
        diagnostics
    }
}

/// Enclosing declarations of the group being expanded.
#[derive(Debug, Clone, Copy, Default)]
struct Scope<'s> {
    /// Names of the enclosing types, outermost first.
    names:     &'s [&'s str],
    /// The top-level group; extensions of nested groups go after it.
    outermost: Option<&'s DeclGroup>
}

struct Driver<'a> {
    index:       LineIndex<'a>,
    unit:        String,
    /// Types a file-level extension already declares observable.
    conformed:   Vec<String>,
    edits:       Edits,
    diagnostics: Vec<Diagnostic>
}

impl Driver<'_> {
    fn members(
        &mut self,
        members: &[Member],
        context: &Context,
        attachments: &[Attachment<'_>],
        scope: &Scope<'_>
    ) {
        for member in members {
            match member {
                Member::Variable(decl) => {
                    let attached = attachments
                        .iter()
                        .find(|attachment| std::ptr::eq(attachment.decl, decl));
                    self.variable(decl, context, attached);
                }
                Member::Group(group) => self.group(group, scope),
                Member::Function(function) => {
                    self.misplaced(&function.attributes);
                    self.misplaced(&function.body_attributes);
                }
                Member::Other(other) => self.misplaced(&other.attributes)
            }
        }
    }

    fn group(&mut self, group: &DeclGroup, scope: &Scope<'_>) {
        let mut container = None;
        for attribute in &group.attributes {
            let Some(recognized) = MacroAttribute::from_name(&attribute.name) else {
                continue;
            };
            self.remove_attribute(attribute);
            if !recognized.is_container() {
                self.report(attribute.start, &attribute.name, ExpansionError::NotVariable);
            } else if container.is_none() {
                container = Some(attribute);
            }
        }

        let context = Context::for_group(group);
        debug!(
            kind = group.kind.keyword(),
            name = %group.name,
            container = container.map(|attribute| attribute.name.as_str()),
            observable = context.observable,
            "expanding group"
        );

        let names: Vec<&str> = scope
            .names
            .iter()
            .copied()
            .chain(std::iter::once(group.name.as_str()))
            .collect();

        let mut members = Vec::new();
        let mut attachments = Vec::new();
        let mut extensions = Vec::new();
        if let Some(attribute) = container {
            match expand_members(group, attribute) {
                Ok(added) => {
                    members = added;
                    attachments = expand_member_attributes(group, attribute);
                    if !self.conformed.contains(&names.join(".")) {
                        extensions = expand_extensions(group, attribute, scope.names);
                    }
                }
                Err(error) => self.report(attribute.start, &attribute.name, error)
            }
        }

        let outermost = scope.outermost.unwrap_or(group);
        let inner = Scope {
            names:     &names,
            outermost: Some(outermost)
        };
        self.members(&group.members, &context, &attachments, &inner);
        self.insert_members(group, &members);
        self.insert_extensions(outermost, &extensions);
    }

    fn variable(&mut self, decl: &VariableDecl, context: &Context, attached: Option<&Attachment<'_>>) {
        let mut chosen: Option<(MacroAttribute, Attribute)> = None;
        for attribute in &decl.attributes {
            let Some(recognized) = MacroAttribute::from_name(&attribute.name) else {
                continue;
            };
            self.remove_attribute(attribute);
            if recognized.is_container() {
                self.report(attribute.start, &attribute.name, misplaced_error(recognized));
            } else if chosen.is_none() {
                chosen = Some((recognized, attribute.clone()));
            }
        }

        if let Some(attachment) = attached {
            for name in &attachment.attributes {
                match MacroAttribute::from_name(name) {
                    Some(recognized) => {
                        if chosen.is_none() {
                            trace!(variable = decl.identifier(), attribute = *name, "attached");
                            chosen = Some((
                                recognized,
                                Attribute::synthesized(name, decl.declaration_head())
                            ));
                        }
                    }
                    None => self.insert_attribute(decl, name)
                }
            }
        }

        let Some((recognized, attribute)) = chosen else {
            return;
        };
        let args = ArgumentBundle::from_attribute(&attribute);
        match expand_accessors(decl, recognized, &args, context) {
            Ok(expansion) => self.insert_accessors(decl, &expansion),
            Err(error) => self.report(attribute.start, &attribute.name, error)
        }
    }

    /// Recognized attributes on declarations no family accepts.
    fn misplaced(&mut self, attributes: &[Attribute]) {
        for attribute in attributes {
            if let Some(recognized) = MacroAttribute::from_name(&attribute.name) {
                self.remove_attribute(attribute);
                self.report(attribute.start, &attribute.name, misplaced_error(recognized));
            }
        }
    }

    fn report(&mut self, at: LineColumn, attribute: &str, error: ExpansionError) {
        debug!(attribute, line = at.line, %error, "expansion failed");
        self.diagnostics.push(Diagnostic::expansion(at, attribute, error));
    }

    fn remove_attribute(&mut self, attribute: &Attribute) {
        let start = self.index.offset(attribute.start);
        let end = self.index.offset(attribute.end);
        if self.index.starts_line(start) && self.index.ends_line(end) {
            let line_end = self.index.end_of_line(end);
            self.edits
                .remove(self.index.start_of_line(start), line_end + 1);
        } else {
            self.edits.remove(start, self.index.skip_blanks(end));
        }
    }

    fn insert_attribute(&mut self, decl: &VariableDecl, name: &str) {
        let head = self.index.offset(decl.declaration_head());
        if self.index.starts_line(head) {
            let indent = self.index.indent_at(head);
            self.edits.insert(head, format!("@{name}\n{indent}"));
        } else {
            self.edits.insert(head, format!("@{name} "));
        }
    }

    fn insert_accessors(&mut self, decl: &VariableDecl, expansion: &AccessorExpansion) {
        let Some(binding) = decl.single_binding() else {
            return;
        };
        let indent = self.index.indent_at(self.index.offset(decl.specifier_start));
        if !expansion.accessors.is_empty() {
            let block = expansion.render_block(indent, &self.unit);
            self.edits.insert(self.index.offset(binding.end), block);
        }
        let end = self.index.offset(decl.end);
        for peer in &expansion.peers {
            self.edits
                .insert(end, format!("\n{}", peer.render(indent, &self.unit)));
        }
    }

    fn insert_members(&mut self, group: &DeclGroup, members: &[Lines]) {
        if members.is_empty() {
            return;
        }
        let indent = self.index.indent_at(self.index.offset(group.keyword_start));
        let inner = format!("{indent}{}", self.unit);
        let rendered: Vec<String> = members
            .iter()
            .map(|member| member.render(&inner, &self.unit))
            .collect();
        let close = self.index.offset(group.close_brace);
        let after_last = self.index.skip_whitespace_back(close);
        self.edits.replace(
            after_last,
            close,
            format!("\n\n{}\n{indent}", rendered.join("\n\n"))
        );
    }

    /// Extensions go after `outermost`, at its indentation.
    fn insert_extensions(&mut self, outermost: &DeclGroup, extensions: &[Lines]) {
        let indent = self.index.indent_at(self.index.offset(outermost.keyword_start));
        let end = self.index.offset(outermost.end);
        for extension in extensions {
            self.edits
                .insert(end, format!("\n\n{}", extension.render(indent, &self.unit)));
        }
    }
}

/// Names of the file-level extensions that declare the observation
/// conformance.
fn conformed_names(items: &[Member]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Member::Group(group) if group.kind == GroupKind::Extension && group.inherits(CONFORMANCE) => {
                Some(group.name.clone())
            }
            _ => None
        })
        .collect()
}

/// Error for a recognized attribute on a declaration its family rejects.
fn misplaced_error(attribute: MacroAttribute) -> ExpansionError {
    match attribute.family() {
        Family::Container => ExpansionError::ClassOrStructNeeded,
        Family::ObservableContainer => ExpansionError::ClassNeeded,
        Family::Plain | Family::Raw | Family::Codable | Family::Tracked => {
            ExpansionError::NotVariable
        }
    }
}

#[cfg(test)]
mod tests;
