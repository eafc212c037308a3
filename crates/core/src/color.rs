//! Color values rendered as CSS color strings.
//!
//! Scene markup carries colors as opaque strings. [`Rgba`] is a convenience
//! for building those strings from channel values or hex codes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InkError;

/// 8-bit RGB with a fractional alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Creates a color, clamping alpha to [0, 1].
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// A gray with equal channels.
    pub fn gray(level: u8, a: f64) -> Self {
        Self::new(level, level, level, a)
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive) as an opaque color.
    pub fn from_hex(hex: &str) -> Result<Rgba, InkError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(InkError::InvalidColor(format!(
                "expected 6 hex digits, got {:?}",
                hex
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| InkError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgba::new(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
            1.0,
        ))
    }

    /// CSS functional notation, e.g. `rgba(100,100,100,0.3)`.
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> String {
        c.to_css()
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_css(&s)
            .or_else(|_| Rgba::from_hex(&s))
            .map_err(serde::de::Error::custom)
    }
}

/// Parses the `rgba(r,g,b,a)` form produced by [`Rgba::to_css`].
fn parse_css(s: &str) -> Result<Rgba, InkError> {
    let bad = || InkError::InvalidColor(format!("not an rgba() color: {s:?}"));
    let inner = s
        .trim()
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(bad)?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [r, g, b, a] = parts.as_slice() else {
        return Err(bad());
    };
    Ok(Rgba::new(
        r.parse().map_err(|_| bad())?,
        g.parse().map_err(|_| bad())?,
        b.parse().map_err(|_| bad())?,
        a.parse().map_err(|_| bad())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_css_formats_channels_and_alpha() {
        assert_eq!(Rgba::gray(100, 0.3).to_css(), "rgba(100,100,100,0.3)");
        assert_eq!(Rgba::new(255, 0, 10, 1.0).to_css(), "rgba(255,0,10,1)");
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Rgba::gray(0, 1.7).a, 1.0);
        assert_eq!(Rgba::gray(0, -0.5).a, 0.0);
        assert_eq!(Rgba::gray(0, 0.5).with_alpha(2.0).a, 1.0);
    }

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        assert_eq!(Rgba::from_hex("#ff0080").unwrap(), Rgba::new(255, 0, 128, 1.0));
        assert_eq!(Rgba::from_hex("FF0080").unwrap(), Rgba::new(255, 0, 128, 1.0));
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(Rgba::from_hex("#gggggg").is_err());
        assert!(Rgba::from_hex("#fff").is_err());
        assert!(Rgba::from_hex("").is_err());
        assert!(Rgba::from_hex("#ff00ff00").is_err());
        assert!(Rgba::from_hex("ééé").is_err());
    }

    #[test]
    fn serde_round_trip_through_css() {
        let c = Rgba::new(12, 34, 56, 0.25);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"rgba(12,34,56,0.25)\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn deserialize_accepts_hex() {
        let c: Rgba = serde_json::from_str("\"#0a0b0c\"").unwrap();
        assert_eq!(c, Rgba::new(10, 11, 12, 1.0));
    }
}
