use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ChartError, ChartResult};

/// Alpha applied to a line series fill.
pub const SERIES_FILL_ALPHA: f64 = 0.1;
/// Alpha applied to derived histogram bars.
pub const HISTOGRAM_FILL_ALPHA: f64 = 0.6;
/// Alpha applied to derived histogram bars under the pointer.
pub const HISTOGRAM_HOVER_ALPHA: f64 = 0.8;
/// Channel multiplier for the derived histogram border.
pub const HISTOGRAM_BORDER_SHADE: f64 = 0.75;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    /// Parses `#RRGGBB`. Returns `None` for anything else.
    #[must_use]
    pub fn parse_hex(input: &str) -> Option<Self> {
        let (red, green, blue) = parse_hex_channels(input)?;
        Some(Self::from_rgba8(red, green, blue, 1.0))
    }

    /// Parses `#RRGGBB`, `rgb(r,g,b)` or `rgba(r,g,b,a)`.
    pub fn from_css(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        if trimmed.starts_with('#') {
            return Self::parse_hex(trimmed)
                .ok_or_else(|| ChartError::InvalidData(format!("invalid hex color `{input}`")));
        }

        let (body, expects_alpha) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(ChartError::InvalidData(format!(
                "unsupported color syntax `{input}`"
            )));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ChartError::InvalidData(format!("unterminated color `{input}`")))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if expects_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ChartError::InvalidData(format!(
                "color `{input}` must have {expected} components"
            )));
        }

        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|_| {
                ChartError::InvalidData(format!("invalid color channel `{part}` in `{input}`"))
            })?;
        }
        let alpha = if expects_alpha {
            parts[3].parse::<f64>().map_err(|_| {
                ChartError::InvalidData(format!("invalid alpha `{}` in `{input}`", parts[3]))
            })?
        } else {
            1.0
        };

        let color = Self::from_rgba8(channels[0], channels[1], channels[2], alpha);
        color.validate()?;
        Ok(color)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Scales the RGB channels, keeping alpha.
    #[must_use]
    pub fn shaded(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self::rgba(
            self.red * factor,
            self.green * factor,
            self.blue * factor,
            self.alpha,
        )
    }

    /// Channels rounded to 8-bit values.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        )
    }

    /// CSS `rgba(r,g,b,a)` form understood by canvas hosts.
    #[must_use]
    pub fn to_css(self) -> String {
        let (red, green, blue) = self.to_rgb8();
        format!("rgba({red},{green},{blue},{})", self.alpha)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CssColorVisitor;

        impl Visitor<'_> for CssColorVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a `#RRGGBB`, `rgb(...)` or `rgba(...)` color string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Color, E> {
                Color::from_css(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CssColorVisitor)
    }
}

/// Converts a `#RRGGBB` series color into its translucent fill.
///
/// Malformed input yields `rgba(0,0,0,0.1)` instead of an error.
#[must_use]
pub fn translucent_fill(hex: &str) -> Color {
    Color::parse_hex(hex)
        .unwrap_or(Color::BLACK)
        .with_alpha(SERIES_FILL_ALPHA)
}

/// Fill/border colors of a histogram dataset, normal and hovered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramPalette {
    pub fill: Color,
    pub border: Color,
    pub hover_fill: Color,
    pub hover_border: Color,
}

impl HistogramPalette {
    /// Fixed light-blue palette used when no color is configured.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            fill: Color::from_rgba8(151, 187, 205, 0.5),
            border: Color::from_rgba8(151, 187, 205, 0.8),
            hover_fill: Color::from_rgba8(151, 187, 205, 0.75),
            hover_border: Color::from_rgba8(151, 187, 205, 1.0),
        }
    }

    /// Derives the palette from a `#RRGGBB` color.
    ///
    /// Malformed input yields opaque black for every role.
    #[must_use]
    pub fn derived(hex: &str) -> Self {
        match Color::parse_hex(hex) {
            Some(base) => {
                // Kept on the 8-bit grid so the CSS form round-trips exactly.
                let (red, green, blue) = base.shaded(HISTOGRAM_BORDER_SHADE).to_rgb8();
                let border = Color::from_rgba8(red, green, blue, 1.0);
                Self {
                    fill: base.with_alpha(HISTOGRAM_FILL_ALPHA),
                    border,
                    hover_fill: base.with_alpha(HISTOGRAM_HOVER_ALPHA),
                    hover_border: border,
                }
            }
            None => Self {
                fill: Color::BLACK,
                border: Color::BLACK,
                hover_fill: Color::BLACK,
                hover_border: Color::BLACK,
            },
        }
    }
}

fn parse_hex_channels(input: &str) -> Option<(u8, u8, u8)> {
    let digits = input.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_rejects_short_and_non_hex_input() {
        assert!(Color::parse_hex("#FFF").is_none());
        assert!(Color::parse_hex("#GG0000").is_none());
        assert!(Color::parse_hex("FF0000").is_none());
        assert!(Color::parse_hex("#FF00001").is_none());
    }

    #[test]
    fn css_round_trip_keeps_channels() {
        let color = Color::from_css("rgba(12,34,56,0.25)").expect("css color");
        assert_eq!(color.to_rgb8(), (12, 34, 56));
        assert_eq!(color.to_css(), "rgba(12,34,56,0.25)");
    }

    #[test]
    fn derived_border_survives_css_round_trip() {
        let palette = HistogramPalette::derived("#336699");
        let parsed = Color::from_css(&palette.border.to_css()).expect("css border");
        assert_eq!(parsed, palette.border);
    }

    #[test]
    fn css_rejects_out_of_range_alpha() {
        let err = Color::from_css("rgba(0,0,0,1.5)").expect_err("alpha > 1");
        assert!(format!("{err}").contains("alpha"));
    }
}
