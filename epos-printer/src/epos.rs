//! ePOS-Print command builder
//!
//! Provides a fluent API for building the ordered list of ePOS-Print XML
//! fragments that make up one print job.

use std::fmt::Display;

use quick_xml::escape::escape;
use serde::Deserialize;

use crate::icon::Icon;
use crate::soap;

/// Character columns of font A on 80mm paper
pub const COLUMNS: usize = 48;

/// Character columns of font B on 80mm paper
pub const SMALL_COLUMNS: usize = 64;

/// Gutter inserted between columns when a row overflows
const GUTTER: &str = "  ";

/// Default `feed` distance in device units
pub const DEFAULT_FEED_UNITS: u32 = 30;

/// Default line spacing in device units
pub const DEFAULT_LINE_SPACING: u32 = 30;

/// Drawing area of a horizontal rule, in dots
const RULE_WIDTH: u32 = 576;
const RULE_HEIGHT: u32 = 15;

/// Text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Font size: `Sm` selects font B, `Md` selects font A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Sm,
    #[default]
    Md,
}

impl FontSize {
    pub fn font_name(self) -> &'static str {
        match self {
            FontSize::Sm => "font_b",
            FontSize::Md => "font_a",
        }
    }
}

/// Stroke weight of a horizontal rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineThickness {
    #[default]
    Thin,
    Medium,
    Thick,
}

impl LineThickness {
    pub fn as_str(self) -> &'static str {
        match self {
            LineThickness::Thin => "thin",
            LineThickness::Medium => "medium",
            LineThickness::Thick => "thick",
        }
    }
}

/// Left column of [`EposBuilder::row_badge`]: plain text followed by a badge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BadgeColumn {
    pub text: String,
    pub badge: String,
}

impl BadgeColumn {
    pub fn new(text: impl Into<String>, badge: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: badge.into(),
        }
    }

    /// Rendered width: text, separating space, badge
    pub fn width(&self) -> usize {
        width(&self.text) + width(&self.badge) + 1
    }
}

/// ePOS-Print command builder
///
/// Accumulates XML fragments in call order. Style changes (font, alignment,
/// spacing, emphasis) are emitted as their own fragments and stay in effect
/// on the device until changed again; the builder keeps no style state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EposBuilder {
    buf: Vec<String>,
}

impl EposBuilder {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Fragments in emission order
    pub fn fragments(&self) -> &[String] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drop every fragment so the builder can be reused for a new job
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    fn push(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.buf.push(fragment.into());
        self
    }

    fn push_text(&mut self, s: &str) -> &mut Self {
        self.push(format!("<text>{}</text>", escape(s)))
    }

    fn push_line(&mut self, s: &str) -> &mut Self {
        self.push(format!("<text>{}&#10;</text>", escape(s)))
    }

    fn emphasis(&mut self, on: bool) -> &mut Self {
        self.push(format!(r#"<text em="{}"/>"#, on))
    }

    // === Paper Control ===

    /// Feed to the cutter and cut
    pub fn cut(&mut self) -> &mut Self {
        self.push(r#"<cut type="feed"/>"#)
    }

    /// Feed paper by `units` device units
    pub fn feed(&mut self, units: u32) -> &mut Self {
        self.push(format!(r#"<feed unit="{}"/>"#, units))
    }

    /// Single newline
    pub fn new_line(&mut self) -> &mut Self {
        self.push("<text>&#10;</text>")
    }

    // === Mode Switches ===

    /// Select font A (`Md`) or font B (`Sm`) for subsequent text
    pub fn font(&mut self, size: FontSize) -> &mut Self {
        self.push(format!(r#"<text font="{}"/>"#, size.font_name()))
    }

    /// Set alignment for subsequent text
    pub fn align(&mut self, align: Align) -> &mut Self {
        self.push(format!(r#"<text align="{}"/>"#, align.as_str()))
    }

    /// Set line spacing in device units
    pub fn spacing(&mut self, units: u32) -> &mut Self {
        self.push(format!(r#"<text linespc="{}"/>"#, units))
    }

    // === Text Output ===

    /// Text line in font A
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.font(FontSize::Md);
        self.push_line(s)
    }

    /// Emphasized text line
    pub fn bold(&mut self, s: &str) -> &mut Self {
        self.emphasis(true);
        self.push_line(s);
        self.emphasis(false)
    }

    /// Reverse-video token followed by a space, without newline
    pub fn badge(&mut self, s: &str) -> &mut Self {
        self.push(r#"<text reverse="true"/>"#);
        self.push_text(s);
        self.push(r#"<text reverse="false"/>"#);
        self.push("<text> </text>")
    }

    /// Double-size emphasized title, optionally preceded by a right-aligned icon
    pub fn header(&mut self, title: impl Display, icon: Option<Icon>) -> &mut Self {
        if let Some(icon) = icon {
            self.align(Align::Right);
            self.icon(icon);
            self.align(Align::Left);
        }
        self.font(FontSize::Md);
        self.push(r#"<text dw="true" dh="true" em="true"/>"#);
        self.push_line(&title.to_string());
        self.push(r#"<text dw="false" dh="false" em="false"/>"#)
    }

    /// Right-aligned line; alignment is restored to left afterwards
    pub fn row_right(&mut self, s: &str, bold: bool) -> &mut Self {
        self.align(Align::Right);
        if bold {
            self.emphasis(true);
        }
        self.push_line(s);
        if bold {
            self.emphasis(false);
        }
        self.align(Align::Left)
    }

    // === Graphics ===

    /// Horizontal rule across the full printable width
    pub fn line(&mut self, thickness: LineThickness) -> &mut Self {
        self.push("<page>");
        self.push(format!(
            r#"<area x="0" y="0" width="{}" height="{}"/>"#,
            RULE_WIDTH, RULE_HEIGHT
        ));
        self.push(format!(
            r#"<line x1="0" y1="0" x2="{}" y2="0" style="{}"/>"#,
            RULE_WIDTH - 1,
            thickness.as_str()
        ));
        self.push("</page>")
    }

    /// Built-in bitmap
    pub fn icon(&mut self, icon: Icon) -> &mut Self {
        self.push(icon.fragment())
    }

    /// Built-in bitmap by name; unknown names append nothing
    pub fn icon_named(&mut self, name: &str) -> &mut Self {
        match Icon::from_name(name) {
            Some(icon) => self.icon(icon),
            None => self,
        }
    }

    // === Layout Helpers ===

    /// Two columns with `right` flush against the row width
    ///
    /// Rows are 48 columns wide, 64 when `small`. When both sides do not fit,
    /// a two-space gutter follows `left` and `right` is truncated.
    pub fn row(&mut self, left: &str, right: &str, small: bool) -> &mut Self {
        let max = if small { SMALL_COLUMNS } else { COLUMNS };
        let total = width(left) + width(right);

        let line = if total < max {
            format!("{}{}{}", left, " ".repeat(max - total), right)
        } else {
            let end = max.saturating_sub(width(left) + GUTTER.len());
            format!("{}{}{}", left, GUTTER, truncate(right, end))
        };
        self.push_line(&line)
    }

    /// Row whose left column carries a reverse-video badge after the text
    ///
    /// On overflow the right column is cut to `48 - text + badge - 1`
    /// characters after the gutter.
    pub fn row_badge(&mut self, left: &BadgeColumn, right: &str) -> &mut Self {
        let total = left.width() + width(right);

        self.push_text(&format!("{} ", left.text));
        self.push(r#"<text reverse="true"/>"#);
        self.push_text(&left.badge);
        self.push(r#"<text reverse="false"/>"#);

        let tail = if total < COLUMNS {
            format!("{}{}", " ".repeat(COLUMNS - total), right)
        } else {
            let end = (COLUMNS + width(&left.badge)).saturating_sub(width(&left.text) + 1);
            format!("{}{}", GUTTER, truncate(right, end))
        };
        self.push_line(&tail)
    }

    /// Right-aligned label/value pair for totals
    ///
    /// `max` is the width of the value column: the label is padded so that it
    /// ends `max` columns before the row edge, and the value is preceded by
    /// `max - len(right)` spaces.
    pub fn foot(&mut self, left: &str, right: &str, max: usize, bold: bool) -> &mut Self {
        let padding = COLUMNS.saturating_sub(width(left) + max);
        let gap = max.saturating_sub(width(right));

        self.push_text(&format!("{}{}{}", " ".repeat(padding), left, " ".repeat(gap)));
        if bold {
            self.emphasis(true);
        }
        self.push_line(right);
        if bold {
            self.emphasis(false);
        }
        self
    }

    // === Build ===

    /// Complete SOAP request body for the current fragments
    pub fn to_envelope(&self) -> String {
        soap::envelope(&self.buf)
    }

    /// Take ownership of the fragments
    pub fn into_fragments(self) -> Vec<String> {
        self.buf
    }
}

/// Column width of a string (one column per character)
fn width(s: &str) -> usize {
    s.chars().count()
}

/// First `n` characters of `s`
fn truncate(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
