//! Layout configuration for JSON output.
//!
//! This module provides the types that control how a document is rendered:
//!
//! - [`Layout`]: compact, one-line, or multi-line rendering
//! - [`IndentUnit`]: spaces or tabs for multi-line indentation
//! - [`JsonOptions`]: the full configuration surface, with builder-style
//!   `with_*` methods
//!
//! ## Examples
//!
//! ```rust
//! use jsonemit::{IndentUnit, JsonOptions, Layout};
//!
//! // Compact output, no whitespace at all
//! let options = JsonOptions::new();
//!
//! // Multi-line with 2-space indentation
//! let options = JsonOptions::pretty();
//!
//! // Custom configuration
//! let options = JsonOptions::new()
//!     .with_layout(Layout::MultiLine)
//!     .with_indent_unit(IndentUnit::Tab)
//!     .with_escape_html(true);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::fragment::FragmentBuilder;

/// How much whitespace the generator inserts between tokens.
///
/// | Layout | between elements | key/value separator | document trailer |
/// |---|---|---|---|
/// | `Compact` | `,` | `:` | nothing |
/// | `OneLine` | `, ` | `: ` | `\n` |
/// | `MultiLine` | `,\n` + indent | `: ` | `\n` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// No whitespace at all.
    #[default]
    Compact,
    /// Single spaces after separators, trailing newline at document end.
    OneLine,
    /// Newline plus indentation between elements, trailing newline at
    /// document end.
    MultiLine,
}

impl Layout {
    /// Returns the layout's text name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Layout::Compact => "compact",
            Layout::OneLine => "oneLine",
            Layout::MultiLine => "multiLine",
        }
    }

    /// Newline plus indentation before the first element of a container.
    /// Only `MultiLine` produces anything.
    pub(crate) fn indent(self, b: &mut FragmentBuilder, unit: IndentUnit, size: usize, depth: usize) {
        if self == Layout::MultiLine {
            b.push_byte(b'\n');
            b.indent(unit, size, depth);
        }
    }

    /// Separator whitespace between elements: newline plus indentation for
    /// `MultiLine`, a single space for `OneLine`.
    pub(crate) fn indent_or_space(
        self,
        b: &mut FragmentBuilder,
        unit: IndentUnit,
        size: usize,
        depth: usize,
    ) {
        match self {
            Layout::MultiLine => {
                b.push_byte(b'\n');
                b.indent(unit, size, depth);
            }
            Layout::OneLine => b.push_byte(b' '),
            Layout::Compact => {}
        }
    }

    /// The space after a key/value colon.
    pub(crate) fn space(self, b: &mut FragmentBuilder) {
        match self {
            Layout::MultiLine | Layout::OneLine => b.push_byte(b' '),
            Layout::Compact => {}
        }
    }

    /// The trailing newline at document end.
    pub(crate) fn line_feed(self, b: &mut FragmentBuilder) {
        match self {
            Layout::MultiLine | Layout::OneLine => b.push_byte(b'\n'),
            Layout::Compact => {}
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(Layout::Compact),
            "oneLine" => Ok(Layout::OneLine),
            "multiLine" => Ok(Layout::MultiLine),
            other => Err(Error::custom(format!("unknown layout {other:?}"))),
        }
    }
}

/// The character used for one step of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentUnit {
    /// Indent with spaces (default width 2).
    #[default]
    Space,
    /// Indent with tabs (default width 1).
    Tab,
}

impl IndentUnit {
    /// The raw byte for one unit.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            IndentUnit::Space => b' ',
            IndentUnit::Tab => b'\t',
        }
    }

    /// The number of units per indentation level when the configured size
    /// is zero.
    #[must_use]
    pub const fn default_size(self) -> usize {
        match self {
            IndentUnit::Space => 2,
            IndentUnit::Tab => 1,
        }
    }
}

/// Configuration for a JSON generator. Pure value, immutable per generator.
///
/// # Examples
///
/// ```rust
/// use jsonemit::{JsonOptions, Layout};
///
/// let options = JsonOptions::new().with_layout(Layout::OneLine);
/// assert_eq!(options.layout, Layout::OneLine);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonOptions {
    /// Whitespace layout.
    pub layout: Layout,
    /// Indentation character for multi-line output.
    pub indent_unit: IndentUnit,
    /// Units per indentation level; zero selects the unit's default.
    pub indent_size: usize,
    /// Escape `&`, `<`, `>` in strings for safe HTML embedding.
    pub escape_html: bool,
}

impl JsonOptions {
    /// Creates default options: compact layout, no HTML escaping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for multi-line output with the default 2-space
    /// indentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonemit::{JsonOptions, Layout};
    ///
    /// let options = JsonOptions::pretty();
    /// assert_eq!(options.layout, Layout::MultiLine);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        JsonOptions {
            layout: Layout::MultiLine,
            ..Default::default()
        }
    }

    /// Sets the whitespace layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the indentation character.
    #[must_use]
    pub fn with_indent_unit(mut self, unit: IndentUnit) -> Self {
        self.indent_unit = unit;
        self
    }

    /// Sets the number of indent units per nesting level. Zero selects the
    /// unit's default (2 for spaces, 1 for tabs).
    #[must_use]
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }

    /// Enables or disables HTML-safe escaping of `&`, `<`, `>`.
    #[must_use]
    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }
}
