//! Color values and color-name parsing.
//!
//! The palette model is the terminal's indexed palette (0-255) plus the
//! terminal's default color. 24-bit color is deliberately not represented;
//! embedded truecolor sequences are recognized and skipped by the escape
//! parser instead (see [`crate::ansi`]).

use crate::error::ColorError;

/// A single foreground or background color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// The terminal's default color.
    #[default]
    Default,
    /// An indexed palette color (0-255).
    Indexed(u8),
}

/// Basic palette names, indexes 0-7. `bright` prefixed names map to 8-15.
const NAMES: &[&str] = &[
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

impl Color {
    /// Whether this is the terminal default color.
    #[inline]
    pub fn is_default(self) -> bool {
        matches!(self, Color::Default)
    }

    /// Parse a color token from the configuration grammar.
    ///
    /// Accepts `default` and `*` (terminal default), the eight basic names,
    /// their `bright` variants (palette 8-15), and `colorN` for N in 0-255.
    pub fn parse(token: &str) -> Result<Color, ColorError> {
        let lower = token.to_ascii_lowercase();
        if lower == "default" || lower == "*" {
            return Ok(Color::Default);
        }
        if let Some(pos) = NAMES.iter().position(|&n| n == lower) {
            return Ok(Color::Indexed(pos as u8));
        }
        if let Some(rest) = lower.strip_prefix("bright") {
            if let Some(pos) = NAMES.iter().position(|&n| n == rest) {
                return Ok(Color::Indexed(pos as u8 + 8));
            }
        }
        if let Some(num) = lower.strip_prefix("color") {
            if let Ok(n) = num.parse::<u16>() {
                if n < 256 {
                    return Ok(Color::Indexed(n as u8));
                }
            }
        }
        Err(ColorError::UnknownColor(token.to_string()))
    }
}

impl std::fmt::Display for Color {
    /// Dump name: `default` or `colorN`, both re-parseable by [`Color::parse`].
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Default => write!(f, "default"),
            Color::Indexed(n) => write!(f, "color{n}"),
        }
    }
}
