// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed templates for generated code.
//!
//! Families build these structures instead of strings; indentation and the
//! tracking wrapper are applied once, when the driver renders them.
//!
//! ```text
//! AccessorTemplate
//! ├── getter: Getter { registration?, value: Lines, fallback? }
//! ├── setter: Lines
//! └── tracking: Option<name>   → access(keyPath:) / withMutation(keyPath:)
//!         │
//!         ▼ accessors()
//! Vec<Accessor { attributes, specifier, body: Lines }>
//! ```

/// One line of generated code, indented by `depth` levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Nesting depth relative to the block.
    pub depth: usize,
    /// Line contents without indentation.
    pub text:  String
}

/// A block of generated lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lines(Vec<Line>);

impl Lines {
    /// Empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Block holding a single line.
    #[must_use]
    pub fn single(text: impl Into<String>) -> Self {
        let mut lines = Self::new();
        lines.push(0, text);
        lines
    }

    /// Append a line at `depth`.
    pub fn push(&mut self, depth: usize, text: impl Into<String>) {
        self.0.push(Line {
            depth,
            text: text.into()
        });
    }

    /// Append another block nested `depth` levels deeper.
    pub fn nest(&mut self, depth: usize, lines: Lines) {
        self.0.extend(lines.0.into_iter().map(|line| Line {
            depth: line.depth + depth,
            text:  line.text
        }));
    }

    /// Prepend `prefix` to the first line.
    #[must_use]
    pub fn prefixed(mut self, prefix: &str) -> Self {
        if let Some(first) = self.0.first_mut() {
            first.text.insert_str(0, prefix);
        }
        self
    }

    /// Append `suffix` to the last line.
    #[must_use]
    pub fn suffixed(mut self, suffix: &str) -> Self {
        if let Some(last) = self.0.last_mut() {
            last.text.push_str(suffix);
        }
        self
    }

    /// Whether the block has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lines in order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.0
    }

    /// Render with every line starting at `indent`, one `unit` per depth
    /// level. Lines are joined by `\n` without a trailing newline.
    #[must_use]
    pub fn render(&self, indent: &str, unit: &str) -> String {
        self.0
            .iter()
            .map(|line| format!("{indent}{}{}", unit.repeat(line.depth), line.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One accessor inside a generated accessor block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// Attributes written on their own lines above the specifier.
    pub attributes: Vec<String>,
    /// `get`, `set` or `init(initialValue)`.
    pub specifier:  String,
    /// Statements of the body.
    pub body:       Lines
}

impl Accessor {
    /// Accessor without attributes.
    #[must_use]
    pub fn new(specifier: impl Into<String>, body: Lines) -> Self {
        Self {
            attributes: Vec::new(),
            specifier: specifier.into(),
            body
        }
    }
}

/// Getter of a store-backed accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Getter {
    /// Statement registering the default before the read.
    pub registration: Option<String>,
    /// The read expression.
    pub value:        Lines,
    /// Expression after `??` when the read yields nil.
    pub fallback:     Option<String>
}

/// Getter and setter of a store-backed variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorTemplate {
    /// Read side.
    pub getter:   Getter,
    /// Statements of the setter.
    pub setter:   Lines,
    /// Name of the variable when accesses are tracked.
    pub tracking: Option<String>
}

impl AccessorTemplate {
    /// Lower to `get` and `set` accessors.
    ///
    /// The value expression gets an explicit `return` whenever it is not the
    /// only statement of the getter.
    #[must_use]
    pub fn accessors(self) -> Vec<Accessor> {
        let Self {
            getter,
            setter,
            tracking
        } = self;

        let mut get = Lines::new();
        if let Some(name) = &tracking {
            get.push(0, access_call(name));
        }
        let needs_return = tracking.is_some() || getter.registration.is_some();
        if let Some(registration) = getter.registration {
            get.push(0, registration);
        }
        let mut value = getter.value;
        if let Some(fallback) = getter.fallback {
            value = value.suffixed(&format!(" ?? {fallback}"));
        }
        if needs_return {
            value = value.prefixed("return ");
        }
        get.nest(0, value);

        let set = match &tracking {
            Some(name) => with_mutation(name, setter),
            None => setter
        };
        vec![Accessor::new("get", get), Accessor::new("set", set)]
    }
}

/// `access(keyPath: \.name)`
#[must_use]
pub fn access_call(name: &str) -> String {
    format!("access(keyPath: \\.{name})")
}

/// `withMutation(keyPath: \.name) { body }`
#[must_use]
pub fn with_mutation(name: &str, body: Lines) -> Lines {
    let mut lines = Lines::single(format!("withMutation(keyPath: \\.{name}) {{"));
    lines.nest(1, body);
    lines.push(0, "}");
    lines
}

/// Result of expanding one accessor attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessorExpansion {
    /// Accessors added to the binding.
    pub accessors: Vec<Accessor>,
    /// Declarations added next to the variable.
    pub peers:     Vec<Lines>
}

impl AccessorExpansion {
    /// Render the accessor block, starting with ` {` and ending with `}` at
    /// `indent`.
    #[must_use]
    pub fn render_block(&self, indent: &str, unit: &str) -> String {
        let inner = format!("{indent}{unit}");
        let body_indent = format!("{inner}{unit}");
        let mut block = String::from(" {\n");
        for accessor in &self.accessors {
            for attribute in &accessor.attributes {
                block.push_str(&format!("{inner}{attribute}\n"));
            }
            block.push_str(&format!("{inner}{} {{\n", accessor.specifier));
            if !accessor.body.is_empty() {
                block.push_str(&accessor.body.render(&body_indent, unit));
                block.push('\n');
            }
            block.push_str(&format!("{inner}}}\n"));
        }
        block.push_str(&format!("{indent}}}"));
        block
    }
}
