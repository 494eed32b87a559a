//! Contrast-aware text color selection for cell micro-labels.
//!
//! Cell coordinates are drawn inside the painted cell, so the text color has
//! to flip between a dark and a light pair depending on how bright the fill
//! is. Brightness is the standard sRGB relative luminance.

use log::warn;
use pg_core::Rgb8;

/// The main/sub text color pair for one cell's stacked labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColors {
    pub main: &'static str,
    pub sub: &'static str,
}

/// Dark text, for bright fills. Also the fallback when a fill fails to parse.
pub const DARK_TEXT: TextColors = TextColors {
    main: "#111827",
    sub: "#374151",
};

/// Light text, for dark fills.
pub const LIGHT_TEXT: TextColors = TextColors {
    main: "#ffffff",
    sub: "#e5e7eb",
};

/// sRGB relative luminance in `0.0..=1.0`.
pub fn relative_luminance(color: Rgb8) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = f64::from(channel) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Pick the readable text pair for a fill hex. Dark text on bright
/// backgrounds (luminance above 0.5), light text otherwise. A fill that
/// fails to parse gets the dark pair — the export must not fail over one
/// bad palette entry.
pub fn contrast_colors(hex: &str) -> TextColors {
    let Some(rgb) = Rgb8::from_hex(hex) else {
        warn!("unparseable fill {hex:?}, defaulting to dark labels");
        return DARK_TEXT;
    };
    if relative_luminance(rgb) > 0.5 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}
