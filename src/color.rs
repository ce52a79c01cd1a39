//! RGBA color parsed from hex strings

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),
}

/// RGBA color with components in 0.0..=1.0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ColorError::InvalidHexColor(hex.to_string()));
        }

        match hex.len() {
            3 | 4 => {
                let mut nibbles = [255u8; 4];
                for (slot, c) in nibbles.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)? * 17;
                }
                Ok(Self::rgba(nibbles[0], nibbles[1], nibbles[2], nibbles[3]))
            }
            6 | 8 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                let a = if hex.len() == 8 {
                    parse_hex_byte(&hex[6..8])?
                } else {
                    255
                };
                Ok(Self::rgba(r, g, b, a))
            }
            _ => Err(ColorError::InvalidHexColor(hex.to_string())),
        }
    }
}

fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| ColorError::InvalidHexColor(c.to_string()))
}

fn parse_hex_byte(s: &str) -> Result<u8, ColorError> {
    u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexColor(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_long_forms() {
        assert_eq!(Color::from_hex("#FFFFFF").unwrap(), Color::rgba(255, 255, 255, 255));
        assert_eq!(Color::from_hex("000000").unwrap(), Color::rgba(0, 0, 0, 255));

        let c = Color::from_hex("#ff000080").unwrap();
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.a - 128.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_hex_short_forms() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::rgba(255, 255, 255, 255));

        let c = Color::from_hex("#0f08").unwrap();
        assert_eq!(c.g, 1.0);
        assert!((c.a - 136.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }
}
