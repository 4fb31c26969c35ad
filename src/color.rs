//! CSS-style colours used by themes and paint commands

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An 8-bit straight-alpha RGBA colour.
///
/// Parses and prints the two CSS notations the designer uses: `#rrggbb`
/// (and the short `#rgb`) for opaque colours, `rgba(r, g, b, a)` for
/// translucent ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    /// Build a colour from a CSS alpha in `0.0..=1.0`.
    pub fn with_alpha(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(r, g, b, a)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 0xff
    }

    /// CSS alpha in `0.0..=1.0`, rounded to two decimals.
    pub fn alpha(&self) -> f32 {
        (self.a as f32 / 255.0 * 100.0).round() / 100.0
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let digits = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::rgb(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Self::rgb(
                digits(hex.get(0..2)?)?,
                digits(hex.get(2..4)?)?,
                digits(hex.get(4..6)?)?,
            )),
            _ => None,
        }
    }

    fn parse_functional(body: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return None;
        }
        let r = parts[0].parse::<u8>().ok()?;
        let g = parts[1].parse::<u8>().ok()?;
        let b = parts[2].parse::<u8>().ok()?;
        if with_alpha {
            let a = parts[3].parse::<f32>().ok()?;
            Some(Self::with_alpha(r, g, b, a))
        } else {
            Some(Self::rgb(r, g, b))
        }
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        let parsed = if let Some(hex) = lower.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if let Some(body) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            Self::parse_functional(body, true)
        } else if let Some(body) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            Self::parse_functional(body, false)
        } else {
            None
        };
        parsed.ok_or_else(|| Error::Validation(format!("Invalid colour: {}", s)))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_rgba() {
        assert_eq!("#0077b5".parse::<Rgba>().unwrap(), Rgba::rgb(0x00, 0x77, 0xb5));
        assert_eq!("#FFF".parse::<Rgba>().unwrap(), Rgba::WHITE);
        let c: Rgba = "rgba(255, 255, 255, 0.9)".parse().unwrap();
        assert_eq!(c.a, 230);
        assert_eq!(c.to_string(), "rgba(255, 255, 255, 0.9)");
    }

    #[test]
    fn rejects_garbage() {
        assert!("blue".parse::<Rgba>().is_err());
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("rgba(1,2,3)".parse::<Rgba>().is_err());
    }

    #[test]
    fn opaque_colours_print_as_hex() {
        assert_eq!(Rgba::rgb(0x1f, 0x29, 0x37).to_string(), "#1f2937");
    }
}
