//! Style types for text rendering
//!
//! A [`Style`] is the declarative form of a highlight group: colors and
//! attributes, or a link to another group. A [`ResolvedStyle`] is the pair
//! of escape sequences a span is wrapped in once all links are flattened.

use std::fmt;
use std::sync::Arc;

use crossterm::style::{
    Attribute, Color as TermColor, Colored, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::Command;

use crate::error::{HighlightError, Result};

/// 24-bit terminal color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from a hex string like "#C099FF"
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || HighlightError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    fn to_term(self) -> TermColor {
        TermColor::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A named highlight group
///
/// When `link` is set the direct fields are ignored; theme resolution
/// replaces them with the link target's.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    /// Highlight group name
    pub group: String,
    /// Group this one is an alias of
    pub link: Option<String>,
    /// Foreground color
    pub fg: Option<Color>,
    /// Background color
    pub bg: Option<Color>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create an unstyled group
    pub fn new(group: &str) -> Self {
        Self {
            group: group.to_string(),
            ..Default::default()
        }
    }

    /// Create a group that aliases `target`
    pub fn link(group: &str, target: &str) -> Self {
        Self {
            group: group.to_string(),
            link: Some(target.to_string()),
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Whether this group is still an alias
    pub fn is_link(&self) -> bool {
        self.link.is_some()
    }

    /// Take on the look of `target`, dropping the link
    pub(crate) fn inherit(&mut self, target: &Style) {
        self.fg = target.fg;
        self.bg = target.bg;
        self.bold = target.bold;
        self.italic = target.italic;
        self.underline = target.underline;
        self.link = None;
    }

    /// Build the escape sequences for this style.
    ///
    /// Any link is ignored; callers resolve links first. Colors are left
    /// out when `NO_COLOR` is set; attributes are kept.
    pub fn to_resolved(&self) -> ResolvedStyle {
        self.escape_codes(!Colored::ansi_color_disabled_memoized())
    }

    /// Build the escape sequences, with or without colors
    pub(crate) fn escape_codes(&self, with_color: bool) -> ResolvedStyle {
        let mut start = String::new();
        if with_color {
            if let Some(fg) = self.fg {
                write_command(&mut start, SetForegroundColor(fg.to_term()));
            }
            if let Some(bg) = self.bg {
                write_command(&mut start, SetBackgroundColor(bg.to_term()));
            }
        }
        if self.bold {
            write_command(&mut start, SetAttribute(Attribute::Bold));
        }
        if self.italic {
            write_command(&mut start, SetAttribute(Attribute::Italic));
        }
        if self.underline {
            write_command(&mut start, SetAttribute(Attribute::Underlined));
        }
        ResolvedStyle::new(&start, reset_code())
    }
}

fn write_command(out: &mut String, command: impl Command) {
    // Writing into a String cannot fail.
    let _ = command.write_ansi(out);
}

/// The "reset all attributes" escape sequence
pub fn reset_code() -> &'static str {
    "\x1b[0m"
}

/// Escape sequences wrapped around a span of text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedStyle {
    start: Arc<str>,
    end: Arc<str>,
}

impl ResolvedStyle {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: Arc::from(start),
            end: Arc::from(end),
        }
    }

    /// Sequence written before the span
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Sequence written after the span
    pub fn end(&self) -> &str {
        &self.end
    }
}
