//! Color handling for arbor mindmaps
//!
//! This module provides the [`Color`] type, an 8-bit RGBA value parsed from
//! `#RRGGBB` / `#RRGGBBAA` strings with the help of the color crate, plus the
//! two color rules the painter depends on: REC.709 relative luminance and the
//! depth fade law.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Rgba8, Srgb};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors produced while parsing a [`Color`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value is not a `#RRGGBB` or `#RRGGBBAA` hex string.
    #[error("invalid color `{value}`: {reason}")]
    InvalidFormat { value: String, reason: String },
}

impl ColorError {
    fn invalid(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// An 8-bit per channel RGBA color.
///
/// Colors are only ever created from hex strings or from other colors, so
/// the value always round-trips through [`fmt::Display`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Color {
    rgba: [u8; 4],
}

impl Color {
    /// Opaque white, used for text on dark fills.
    pub const WHITE: Self = Self::from_rgba8(255, 255, 255, 255);

    /// Opaque black, used for text on light fills.
    pub const BLACK: Self = Self::from_rgba8(0, 0, 0, 255);

    /// Create a new `Color` from a hex string.
    ///
    /// Only `#RRGGBB` and `#RRGGBBAA` are accepted (hex digits in either
    /// case). Named CSS colors and the short `#RGB` forms are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_core::color::Color;
    ///
    /// let coral = Color::new("#FF6F61").unwrap();
    /// assert_eq!(coral.to_string(), "#FF6F61");
    ///
    /// let translucent = Color::new("#ff6f6180").unwrap();
    /// assert_eq!(translucent.alpha(), 0x80);
    ///
    /// assert!(Color::new("red").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        let Some(digits) = color_str.strip_prefix('#') else {
            return Err(ColorError::invalid(color_str, "expected a leading `#`"));
        };
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorError::invalid(
                color_str,
                format!("expected 6 or 8 hex digits, found {}", digits.len()),
            ));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::invalid(
                color_str,
                format!("`{bad}` is not a hex digit"),
            ));
        }

        let parsed = DynamicColor::from_str(color_str)
            .map_err(|err| ColorError::invalid(color_str, err.to_string()))?;
        let Rgba8 { r, g, b, a } = parsed.to_alpha_color::<Srgb>().to_rgba8();

        Ok(Self::from_rgba8(r, g, b, a))
    }

    /// Create a color directly from its channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { rgba: [r, g, b, a] }
    }

    /// Red channel.
    pub fn red(self) -> u8 {
        self.rgba[0]
    }

    /// Green channel.
    pub fn green(self) -> u8 {
        self.rgba[1]
    }

    /// Blue channel.
    pub fn blue(self) -> u8 {
        self.rgba[2]
    }

    /// Alpha channel, `255` is fully opaque.
    pub fn alpha(self) -> u8 {
        self.rgba[3]
    }

    /// Returns `true` when the alpha channel is `255`.
    pub fn is_opaque(self) -> bool {
        self.alpha() == u8::MAX
    }

    /// Relative luminance in `[0, 1]` using the REC.709 channel weights.
    ///
    /// The alpha channel does not take part in the computation.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_core::color::Color;
    ///
    /// assert_eq!(Color::BLACK.luminance(), 0.0);
    /// assert!(Color::WHITE.luminance() > 0.999);
    /// ```
    pub fn luminance(self) -> f32 {
        let [r, g, b, _] = self.rgba.map(f32::from);
        (0.2126 * r + 0.7152 * g + 0.0722 * b) / 255.0
    }

    /// Returns the color one depth level further from its branch color.
    ///
    /// Every channel, alpha included, moves half of the remaining distance
    /// toward `255` (integer truncation). Each channel is non-decreasing,
    /// so luminance never drops; white is the fixed point.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_core::color::Color;
    ///
    /// let red = Color::new("#FF0000").unwrap();
    /// assert_eq!(red.faded().to_string(), "#FF7F7F");
    /// assert_eq!(Color::WHITE.faded(), Color::WHITE);
    /// ```
    pub fn faded(self) -> Self {
        Self {
            rgba: self.rgba.map(fade_channel),
        }
    }
}

fn fade_channel(channel: u8) -> u8 {
    let halfway = (u16::from(channel) + u16::from(u8::MAX)) / 2;
    u8::try_from(halfway).unwrap_or(u8::MAX)
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.rgba;
        write!(f, "#{r:02X}{g:02X}{b:02X}")?;
        if a != u8::MAX {
            write!(f, "{a:02X}")?;
        }
        Ok(())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        let color = Color::new("#FF6F61").unwrap();
        assert_eq!(color.red(), 0xFF);
        assert_eq!(color.green(), 0x6F);
        assert_eq!(color.blue(), 0x61);
        assert_eq!(color.alpha(), 0xFF);
        assert!(color.is_opaque());
    }

    #[test]
    fn test_parse_eight_digit_hex() {
        let color = Color::new("#6B5B9580").unwrap();
        assert_eq!(color.red(), 0x6B);
        assert_eq!(color.green(), 0x5B);
        assert_eq!(color.blue(), 0x95);
        assert_eq!(color.alpha(), 0x80);
        assert!(!color.is_opaque());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            Color::new("#ff6f61").unwrap(),
            Color::new("#FF6F61").unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_malformed_values() {
        for value in ["red", "FF6F61", "#FFF", "#12345", "#1234567", "#GG0000", "", "#"] {
            let err = Color::new(value).unwrap_err();
            let ColorError::InvalidFormat { value: reported, .. } = err;
            assert_eq!(reported, value);
        }
    }

    #[test]
    fn test_display_drops_opaque_alpha() {
        assert_eq!(Color::new("#00ff00").unwrap().to_string(), "#00FF00");
        assert_eq!(Color::new("#00ff00ff").unwrap().to_string(), "#00FF00");
        assert_eq!(Color::new("#00ff0040").unwrap().to_string(), "#00FF0040");
    }

    #[test]
    fn test_luminance_weights() {
        let red = Color::new("#FF0000").unwrap();
        let green = Color::new("#00FF00").unwrap();
        let blue = Color::new("#0000FF").unwrap();
        assert_approx_eq!(f32, red.luminance(), 0.2126, epsilon = 1e-6);
        assert_approx_eq!(f32, green.luminance(), 0.7152, epsilon = 1e-6);
        assert_approx_eq!(f32, blue.luminance(), 0.0722, epsilon = 1e-6);
        assert_approx_eq!(f32, Color::WHITE.luminance(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_luminance_ignores_alpha() {
        let opaque = Color::new("#6B5B95").unwrap();
        let translucent = Color::new("#6B5B9510").unwrap();
        assert_approx_eq!(f32, opaque.luminance(), translucent.luminance());
    }

    #[test]
    fn test_faded_moves_halfway_to_white() {
        assert_eq!(Color::BLACK.faded(), Color::from_rgba8(127, 127, 127, 255));
        assert_eq!(
            Color::new("#FF6F61").unwrap().faded().to_string(),
            "#FFB7B0"
        );
        assert_eq!(
            Color::new("#00000000").unwrap().faded().to_string(),
            "#7F7F7F7F"
        );
    }

    #[test]
    fn test_faded_reaches_white() {
        let mut color = Color::BLACK;
        for _ in 0..16 {
            color = color.faded();
        }
        assert_eq!(color, Color::WHITE);
    }
}
