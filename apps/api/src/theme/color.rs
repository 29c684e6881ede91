//! Color value type and conversions — hex parsing, HSL, WCAG luminance and
//! contrast ratio, perceived-brightness darkness test.
//!
//! Everything here is pure math over 24-bit RGB. The rest of the theme
//! pipeline treats `Color` as an opaque value and reaches for `Hsl` only
//! when it needs to reason about hue, saturation, or lightness.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    /// The string is not 3/4/6/8 hex digits after stripping `#`.
    /// Callers scanning untrusted text drop the token instead of propagating.
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),
}

/// A 24-bit RGB color. Canonical wire form is lowercase `#rrggbb`.
///
/// Ordering is by `(r, g, b)`, which coincides with lexicographic order of
/// the canonical hex string — the sort the scanner relies on for
/// deterministic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string: `#`-prefixed or bare, 3/4/6/8 digits,
    /// any case. 4- and 8-digit forms carry an alpha channel, which is
    /// dropped.
    pub fn parse(input: &str) -> Result<Self, PaletteError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PaletteError::InvalidColorFormat(input.to_string()));
        }

        match digits.len() {
            // Shorthand: each digit expands to a doubled pair (0xa -> 0xaa).
            3 | 4 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| PaletteError::InvalidColorFormat(input.to_string()))
                };
                Ok(Self::new(channel(0)?, channel(1)?, channel(2)?))
            }
            6 | 8 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 2], 16)
                        .map_err(|_| PaletteError::InvalidColorFormat(input.to_string()))
                };
                Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => Err(PaletteError::InvalidColorFormat(input.to_string())),
        }
    }

    /// Builds a color from float channels, clamping each into [0, 255]
    /// before rounding. Never fails.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        let quantize = |v: f64| v.clamp(0.0, 255.0).round() as u8;
        Self::new(quantize(r), quantize(g), quantize(b))
    }

    /// Canonical lowercase `#rrggbb` form.
    pub fn hex(&self) -> String {
        self.to_string()
    }

    pub fn to_hsl(&self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // Achromatic: hue is undefined, conventionally 0.
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            h: h * 60.0,
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    /// WCAG 2.x relative luminance, in [0, 1].
    pub fn luminance(&self) -> f64 {
        fn linearize(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// Perceived-brightness darkness test. Deliberately NOT the WCAG
    /// luminance: callers use this to pick a lighten/darken direction,
    /// never for accessibility decisions.
    pub fn is_dark(&self) -> bool {
        let brightness =
            0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64;
        brightness < 127.5
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).map_err(de::Error::custom)
    }
}

/// WCAG contrast ratio between two colors: `(L_max + 0.05) / (L_min + 0.05)`.
/// Always in [1, 21] and symmetric in its arguments.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = a.luminance();
    let lb = b.luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Circular distance between two hues, in [0, 180].
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// HSL triple: hue in degrees [0, 360), saturation and lightness in percent
/// [0, 100]. Components stay f64 so repeated adjustments don't accumulate
/// integer rounding; quantization happens once, at the `Color` edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Normalizes hue into [0, 360) and clamps saturation/lightness into
    /// [0, 100].
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    pub fn with_hue(self, h: f64) -> Self {
        Self::new(h, self.s, self.l)
    }

    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    pub fn to_color(&self) -> Color {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 100.0);
        let l = self.l.clamp(0.0, 100.0);

        // Chroma form, kept in percent units until the final scaling:
        // (v * 255) / 100 is exact for integer percentages where
        // (v / 100) * 255 is not, and l = 30 grays must land on #4d4d4d.
        let c = (100.0 - (2.0 * l - 100.0).abs()) * s / 100.0;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r1, g1, b1) = match hp as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Color::from_channels(
            (r1 + m) * 255.0 / 100.0,
            (g1 + m) * 255.0 / 100.0,
            (b1 + m) * 255.0 / 100.0,
        )
    }
}
