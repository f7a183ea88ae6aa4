//! RGB colors parsed from hex strings or well-known names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An opaque 24-bit RGB color.
///
/// Colors parse from `#rgb`, `#rrggbb` (the `#` is optional when the string
/// contains a hex letter) or a name such as `"red"` or `"cyan"`, and always
/// serialize back to `#rrggbb`.
///
/// # Examples
///
/// ```rust
/// use scene::Color;
///
/// let background: Color = "#303030".parse().unwrap();
/// assert_eq!(background, Color::new(0x30, 0x30, 0x30));
///
/// let red: Color = "red".parse().unwrap();
/// assert_eq!(red.to_string(), "#ff0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the channels as a tuple.
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Looks up a named color.
    pub fn named(name: &str) -> Option<Self> {
        let rgb = match name.trim().to_ascii_lowercase().as_str() {
            "black" => (0x00, 0x00, 0x00),
            "white" => (0xff, 0xff, 0xff),
            "red" => (0xff, 0x00, 0x00),
            "green" => (0x00, 0x80, 0x00),
            "blue" => (0x00, 0x00, 0xff),
            "yellow" => (0xff, 0xff, 0x00),
            "magenta" => (0xff, 0x00, 0xff),
            "cyan" => (0x00, 0xff, 0xff),
            "orange" => (0xff, 0xa5, 0x00),
            "gray" | "grey" => (0x80, 0x80, 0x80),
            _ => return None,
        };
        Some(Self::new(rgb.0, rgb.1, rgb.2))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a string is neither a hex color nor a known name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color {input:?}: {reason}")]
pub struct ParseColorError {
    input: String,
    reason: &'static str,
}

impl ParseColorError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ParseColorError::new(s, "color string is empty"));
        }

        if let Some(color) = Self::named(raw) {
            return Ok(color);
        }

        let has_hash = raw.starts_with('#');
        let hex = raw.trim_start_matches('#');
        if !has_hash && !hex.chars().any(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::new(s, "unknown color name"));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::new(s, "expected hex digits"));
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        let parsed = match hex.len() {
            6 => channel(&hex[0..2])
                .zip(channel(&hex[2..4]))
                .zip(channel(&hex[4..6]))
                .map(|((r, g), b)| Self::new(r, g, b)),
            3 => channel(&hex[0..1])
                .zip(channel(&hex[1..2]))
                .zip(channel(&hex[2..3]))
                .map(|((r, g), b)| Self::new(r * 17, g * 17, b * 17)),
            _ => None,
        };
        parsed.ok_or_else(|| ParseColorError::new(s, "expected 3 or 6 hex digits"))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        Self::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

impl From<Color> for plotters::style::RGBColor {
    fn from(color: Color) -> Self {
        Self(color.r, color.g, color.b)
    }
}
