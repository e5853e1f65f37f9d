use raylib::prelude::*;

// Material blue shades used by the committee cards and accents
pub const BLUE_300: Color = Color::new(0x64, 0xb5, 0xf6, 0xff);
pub const BLUE_400: Color = Color::new(0x42, 0xa5, 0xf5, 0xff);
pub const BLUE_500: Color = Color::new(0x21, 0x96, 0xf3, 0xff);
pub const BLUE_600: Color = Color::new(0x1e, 0x88, 0xe5, 0xff);
pub const BLUE_700: Color = Color::new(0x19, 0x76, 0xd2, 0xff);
pub const BLUE_800: Color = Color::new(0x15, 0x65, 0xc0, 0xff);
pub const BLUE_900: Color = Color::new(0x0d, 0x47, 0xa1, 0xff);

pub const PAGE_BACKGROUND: Color = Color::new(0x12, 0x12, 0x12, 0xff);
pub const TEXT_PRIMARY: Color = Color::new(0xff, 0xff, 0xff, 0xff);
pub const DIVIDER: Color = Color::new(0xff, 0xff, 0xff, 0x33);

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ColorError {
    #[error("color '{0}' must look like #rrggbb or #rrggbbaa")]
    Malformed(String),
}

/// Parses `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex(value: &str) -> Result<Color, ColorError> {
    let malformed = || ColorError::Malformed(value.to_string());
    let hex = value.strip_prefix('#').ok_or_else(malformed)?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(malformed());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed());
    let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
    Ok(Color::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

/// Color read from settings as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(pub Color);

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_hex(&value).map(HexColor)
    }
}

impl From<Color> for HexColor {
    fn from(color: Color) -> Self {
        HexColor(color)
    }
}

/// Scales the color's alpha channel by `opacity` (clamped to 0..=1).
pub fn with_opacity(color: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    Color::new(color.r, color.g, color.b, (color.a as f32 * opacity).round() as u8)
}
