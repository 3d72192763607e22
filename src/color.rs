//! Display color parsing for palette entries.
//!
//! Supports the following formats:
//! - Hex: `#RGB`, `#RRGGBB`, `#RRGGBBAA`
//! - Anything else CSS understands: `rgb()`, `hsl()`, named colors (`blue`)

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 6, or 8")]
    InvalidLength(usize),
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a color string into RGBA.
///
/// # Examples
///
/// ```
/// use gridfill::color::parse_color;
///
/// assert_eq!(parse_color("#0F0").unwrap(), image::Rgba([0, 255, 0, 255]));
/// assert_eq!(parse_color("blue").unwrap(), image::Rgba([0, 0, 255, 255]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    match s.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => parse_css(s),
    }
}

fn parse_hex(hex: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        [r1, r0, g1, g0, b1, b0] => Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, 255])),
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0]))
        }
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

fn parse_css(s: &str) -> Result<Rgba<u8>, ColorError> {
    let color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    match color.to_rgb() {
        Ok(CssColor::RGBA(rgba)) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        _ => Err(ColorError::CssParse(format!("'{}' does not resolve to an sRGB color", s))),
    }
}

/// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

/// Expand `0xRRGGBB` to a fully opaque color.
pub fn unpack_rgb(rgb: u32) -> Rgba<u8> {
    Rgba([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#F00"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("#00ff7f"), Ok(Rgba([0, 255, 127, 255])));
        assert_eq!(parse_color("#11223344"), Ok(Rgba([0x11, 0x22, 0x33, 0x44])));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert_eq!(parse_color("#GG0000"), Err(ColorError::InvalidHex('G')));
    }

    #[test]
    fn test_parse_named_and_functional() {
        assert_eq!(parse_color("green"), Ok(Rgba([0, 128, 0, 255])));
        assert_eq!(parse_color("rgb(255, 255, 0)"), Ok(Rgba([255, 255, 0, 255])));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_color("not-a-color"), Err(ColorError::CssParse(_))));
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(to_hex(Rgba([0, 0, 255, 255])), "#0000FF");
        assert_eq!(to_hex(Rgba([1, 2, 3, 4])), "#01020304");
    }

    #[test]
    fn test_unpack_rgb() {
        assert_eq!(unpack_rgb(0x123456), Rgba([0x12, 0x34, 0x56, 255]));
        assert_eq!(unpack_rgb(0xAB00_FF00), Rgba([0, 0xFF, 0, 255]));
    }
}
