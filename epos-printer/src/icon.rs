//! Built-in monochrome icons
//!
//! Bitmaps are stored as base64 assets under `assets/icons/` and embedded at
//! compile time. Each payload is a packed 1-bit raster, MSB first, rows padded
//! to whole bytes, exactly as the `<image mode="mono">` element expects.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

/// Order-type glyphs printed in receipt headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Takeout,
    Delivery,
    Latch,
}

struct IconAsset {
    width: u32,
    height: u32,
    payload: &'static str,
}

static TAKEOUT: IconAsset = IconAsset {
    width: 46,
    height: 42,
    payload: include_str!("../assets/icons/takeout.b64"),
};

static DELIVERY: IconAsset = IconAsset {
    width: 46,
    height: 42,
    payload: include_str!("../assets/icons/delivery.b64"),
};

static LATCH: IconAsset = IconAsset {
    width: 43,
    height: 42,
    payload: include_str!("../assets/icons/latch.b64"),
};

impl Icon {
    pub const ALL: [Icon; 3] = [Icon::Takeout, Icon::Delivery, Icon::Latch];

    /// Look up an icon by its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "takeout" => Some(Icon::Takeout),
            "delivery" => Some(Icon::Delivery),
            "latch" => Some(Icon::Latch),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Icon::Takeout => "takeout",
            Icon::Delivery => "delivery",
            Icon::Latch => "latch",
        }
    }

    fn asset(self) -> &'static IconAsset {
        match self {
            Icon::Takeout => &TAKEOUT,
            Icon::Delivery => &DELIVERY,
            Icon::Latch => &LATCH,
        }
    }

    /// Width in dots
    pub fn width(self) -> u32 {
        self.asset().width
    }

    /// Height in dots
    pub fn height(self) -> u32 {
        self.asset().height
    }

    /// Base64 raster payload as embedded in the `<image>` element
    pub fn payload(self) -> &'static str {
        self.asset().payload.trim_end()
    }

    /// Decoded raster bytes
    pub fn bitmap(self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.payload())
    }

    /// `<image>` fragment for this icon
    pub fn fragment(self) -> String {
        format!(
            r#"<image width="{}" height="{}" color="color_1" mode="mono">{}</image>"#,
            self.width(),
            self.height(),
            self.payload()
        )
    }
}
