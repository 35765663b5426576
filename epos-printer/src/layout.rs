//! JSON layout scripts
//!
//! A script is a JSON array of operations, replayed in order on an
//! [`EposBuilder`]:
//!
//! ```json
//! [
//!   { "op": "header", "text": "Order 42", "icon": "takeout" },
//!   { "op": "line", "thickness": "medium" },
//!   { "op": "row", "left": "Burger", "right": "9.00" },
//!   { "op": "foot", "left": "Total", "right": "9.00", "max": 8, "bold": true },
//!   { "op": "cut" }
//! ]
//! ```

use serde::Deserialize;

use crate::epos::{
    Align, BadgeColumn, DEFAULT_FEED_UNITS, DEFAULT_LINE_SPACING, EposBuilder, FontSize,
    LineThickness,
};
use crate::error::PrintResult;
use crate::icon::Icon;

fn default_feed() -> u32 {
    DEFAULT_FEED_UNITS
}

fn default_spacing() -> u32 {
    DEFAULT_LINE_SPACING
}

/// One layout operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LayoutOp {
    Cut,
    Header {
        text: String,
        #[serde(default)]
        icon: Option<Icon>,
    },
    Feed {
        #[serde(default = "default_feed")]
        lines: u32,
    },
    Line {
        #[serde(default)]
        thickness: LineThickness,
    },
    Badge {
        text: String,
    },
    Text {
        text: String,
    },
    Font {
        #[serde(default)]
        size: FontSize,
    },
    Align {
        align: Align,
    },
    Row {
        left: String,
        right: String,
        #[serde(default)]
        small: bool,
    },
    Foot {
        left: String,
        right: String,
        max: usize,
        #[serde(default)]
        bold: bool,
    },
    Bold {
        text: String,
    },
    Spacing {
        #[serde(default = "default_spacing")]
        units: u32,
    },
    RowBadge {
        left: BadgeColumn,
        right: String,
    },
    RowRight {
        text: String,
        #[serde(default)]
        bold: bool,
    },
    NewLine,
    /// Unknown icon names are accepted and print nothing
    Icon {
        kind: String,
    },
}

impl LayoutOp {
    pub fn apply(&self, builder: &mut EposBuilder) {
        match self {
            LayoutOp::Cut => builder.cut(),
            LayoutOp::Header { text, icon } => builder.header(text, *icon),
            LayoutOp::Feed { lines } => builder.feed(*lines),
            LayoutOp::Line { thickness } => builder.line(*thickness),
            LayoutOp::Badge { text } => builder.badge(text),
            LayoutOp::Text { text } => builder.text(text),
            LayoutOp::Font { size } => builder.font(*size),
            LayoutOp::Align { align } => builder.align(*align),
            LayoutOp::Row { left, right, small } => builder.row(left, right, *small),
            LayoutOp::Foot {
                left,
                right,
                max,
                bold,
            } => builder.foot(left, right, *max, *bold),
            LayoutOp::Bold { text } => builder.bold(text),
            LayoutOp::Spacing { units } => builder.spacing(*units),
            LayoutOp::RowBadge { left, right } => builder.row_badge(left, right),
            LayoutOp::RowRight { text, bold } => builder.row_right(text, *bold),
            LayoutOp::NewLine => builder.new_line(),
            LayoutOp::Icon { kind } => builder.icon_named(kind),
        };
    }
}

/// Ordered list of layout operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LayoutScript {
    pub ops: Vec<LayoutOp>,
}

impl LayoutScript {
    pub fn from_json(json: &str) -> PrintResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replay every operation onto `builder`
    pub fn apply(&self, builder: &mut EposBuilder) {
        for op in &self.ops {
            op.apply(builder);
        }
    }

    /// Fresh builder holding this script's fragments
    pub fn to_builder(&self) -> EposBuilder {
        let mut builder = EposBuilder::new();
        self.apply(&mut builder);
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrintError;

    #[test]
    fn test_script_matches_direct_calls() {
        let script = LayoutScript::from_json(
            r#"[
                { "op": "header", "text": "Order 42", "icon": "takeout" },
                { "op": "font", "size": "sm" },
                { "op": "row", "left": "Burger", "right": "9.00", "small": true },
                { "op": "row_badge", "left": { "text": "Fries", "badge": "x2" }, "right": "4.00" },
                { "op": "foot", "left": "Total", "right": "13.00", "max": 8, "bold": true },
                { "op": "row_right", "text": "Paid" },
                { "op": "line" },
                { "op": "new_line" },
                { "op": "cut" }
            ]"#,
        )
        .unwrap();

        let mut expected = EposBuilder::new();
        expected
            .header("Order 42", Some(Icon::Takeout))
            .font(FontSize::Sm)
            .row("Burger", "9.00", true)
            .row_badge(&BadgeColumn::new("Fries", "x2"), "4.00")
            .foot("Total", "13.00", 8, true)
            .row_right("Paid", false)
            .line(LineThickness::Thin)
            .new_line()
            .cut();

        assert_eq!(script.to_builder(), expected);
    }

    #[test]
    fn test_defaults() {
        let script =
            LayoutScript::from_json(r#"[{ "op": "feed" }, { "op": "spacing" }, { "op": "font" }]"#)
                .unwrap();

        assert_eq!(
            script.ops,
            [
                LayoutOp::Feed { lines: 30 },
                LayoutOp::Spacing { units: 30 },
                LayoutOp::Font { size: FontSize::Md },
            ]
        );
    }

    #[test]
    fn test_unknown_icon_is_silent() {
        let script = LayoutScript::from_json(r#"[{ "op": "icon", "kind": "rocket" }]"#).unwrap();
        assert!(script.to_builder().is_empty());
    }

    #[test]
    fn test_demo_receipt_parses() {
        let script = LayoutScript::from_json(include_str!("../demos/receipt.json")).unwrap();
        assert_eq!(script.ops.len(), 19);
        assert_eq!(script.ops.last(), Some(&LayoutOp::Cut));

        let envelope = script.to_builder().to_envelope();
        assert!(envelope.contains(&Icon::Takeout.fragment()));
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let err = LayoutScript::from_json(r#"[{ "op": "barcode" }]"#).unwrap_err();
        assert!(matches!(err, PrintError::Layout(_)));
    }
}
