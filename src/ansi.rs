//! Embedded SGR escape-sequence parsing.
//!
//! Displayed content (e.g. a mail body) can carry its own terminal styling
//! as SGR (Select Graphic Rendition) sequences: `ESC [` followed by
//! semicolon-separated decimal codes, terminated by `m`. This module parses
//! them incrementally into an [`AnsiColor`] overlay that the merge layer
//! applies on top of the configured rules.
//!
//! # Supported codes
//!
//! - `0` reset, `1` bold, `3` italic, `4` underline, `5` blink, `7` reverse
//! - `30`-`37` / `40`-`47` basic palette foreground/background
//! - `39` / `49` reset foreground/background to terminal default
//! - `38;5;N` / `48;5;N` indexed palette (0-255)
//! - `38;2;R;G;B` / `48;2;R;G;B` truecolor: recognized and skipped without
//!   touching the overlay (the palette model has no 24-bit representation)
//! - anything else is skipped code by code; leading zeros are padding
//!
//! Overlay state accumulates across calls until a reset code, mirroring how
//! terminal styling is cumulative until reset. Callers create one
//! [`AnsiColor`] per styled region and drop it when the region ends.

use crate::attrs::AttrFlags;
use crate::color::Color;

/// Accumulated overlay state for one styled content region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnsiColor {
    attrs: AttrFlags,
    fg: Color,
    bg: Color,
}

impl AnsiColor {
    /// Fresh overlay: no colors, no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated attribute bits.
    #[inline]
    pub fn attrs(&self) -> AttrFlags {
        self.attrs
    }

    /// Overlay foreground; [`Color::Default`] passes through to lower layers.
    #[inline]
    pub fn fg(&self) -> Color {
        self.fg
    }

    /// Overlay background; [`Color::Default`] passes through to lower layers.
    #[inline]
    pub fn bg(&self) -> Color {
        self.bg
    }

    /// Whether the overlay would change anything when applied.
    pub fn is_set(&self) -> bool {
        !self.attrs.is_empty() || !self.fg.is_default() || !self.bg.is_default()
    }

    /// Clear all accumulated state (code `0`, or end of the styled region).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A code terminator within the sequence body.
#[inline]
fn is_end_char(b: u8) -> bool {
    b == b'm' || b == b';'
}

/// Whether `bytes[i]` exists and terminates a code.
#[inline]
fn end_at(bytes: &[u8], i: usize) -> bool {
    bytes.get(i).copied().is_some_and(is_end_char)
}

/// Length of a well-formed SGR sequence at the start of `text`, including
/// the trailing `m`; 0 if `text` does not begin with one.
///
/// Never mutates parser state; use it to detect and skip sequences.
pub fn sequence_length(text: &str) -> usize {
    let bytes = text.as_bytes();
    if bytes.len() < 3 || bytes[0] != 0x1b || bytes[1] != b'[' {
        return 0;
    }
    let mut i = 2;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b';') {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'm' {
        i + 1
    } else {
        0
    }
}

/// Parse one SGR sequence at the start of `text`, accumulating into `ansi`.
///
/// Returns the sequence length in bytes, or 0 if `text` does not begin with
/// a well-formed sequence. With `dry_run` the length is returned without
/// touching the overlay. Calling repeatedly accumulates state in `ansi`.
pub fn parse_single(text: &str, ansi: &mut AnsiColor, dry_run: bool) -> usize {
    let seq_len = sequence_length(text);
    if seq_len == 0 {
        return 0;
    }
    if dry_run {
        return seq_len;
    }

    let bytes = &text.as_bytes()[..seq_len];
    let mut pos = 2; // skip "ESC ["
    while pos < seq_len {
        match bytes[pos] {
            // A leading zero before another digit is insignificant padding.
            b'0' if bytes.get(pos + 1).copied().is_some_and(|b| b.is_ascii_digit()) => {
                pos += 1;
            }
            b'0' => {
                ansi.reset();
                pos += 2;
            }
            b'1' if end_at(bytes, pos + 1) => {
                ansi.attrs |= AttrFlags::BOLD;
                pos += 2;
            }
            b'3' if end_at(bytes, pos + 1) => {
                ansi.attrs |= AttrFlags::ITALIC;
                pos += 2;
            }
            b'3' => pos = parse_color_code(bytes, pos, ansi, true),
            b'4' if end_at(bytes, pos + 1) => {
                ansi.attrs |= AttrFlags::UNDERLINE;
                pos += 2;
            }
            b'4' => pos = parse_color_code(bytes, pos, ansi, false),
            b'5' if end_at(bytes, pos + 1) => {
                ansi.attrs |= AttrFlags::BLINK;
                pos += 2;
            }
            b'7' if end_at(bytes, pos + 1) => {
                ansi.attrs |= AttrFlags::REVERSE;
                pos += 2;
            }
            // Unrecognized code: skip it individually.
            _ => pos = skip_code(bytes, pos),
        }
    }

    seq_len
}

/// Parse a `3x`/`4x` color code starting at `pos`; returns the new position.
fn parse_color_code(bytes: &[u8], pos: usize, ansi: &mut AnsiColor, foreground: bool) -> usize {
    let set = |ansi: &mut AnsiColor, color: Color| {
        if foreground {
            ansi.fg = color;
        } else {
            ansi.bg = color;
        }
    };

    match bytes.get(pos + 1).copied() {
        // 30-37 / 40-47 basic palette
        Some(d @ b'0'..=b'7') if end_at(bytes, pos + 2) => {
            set(ansi, Color::Indexed(d - b'0'));
            pos + 3
        }
        // 39 / 49 reset to terminal default
        Some(b'9') if end_at(bytes, pos + 2) => {
            set(ansi, Color::Default);
            pos + 3
        }
        // 38;5;N / 38;2;R;G;B extended forms
        Some(b'8') => parse_extended_color(bytes, pos, ansi, foreground),
        _ => skip_code(bytes, pos),
    }
}

/// Parse `38;5;N`, skip `38;2;R;G;B`, or skip anything malformed.
fn parse_extended_color(bytes: &[u8], pos: usize, ansi: &mut AnsiColor, foreground: bool) -> usize {
    let body = &bytes[pos..];
    let indexed = body.starts_with(b"38;5;") || body.starts_with(b"48;5;");
    let truecolor = body.starts_with(b"38;2;") || body.starts_with(b"48;2;");
    let has_digit = bytes.get(pos + 5).copied().is_some_and(|b| b.is_ascii_digit());

    if indexed && has_digit {
        let (value, digits_end) = read_number(bytes, pos + 5);
        if value < 256 && end_at(bytes, digits_end) {
            if foreground {
                ansi.fg = Color::Indexed(value as u8);
            } else {
                ansi.bg = Color::Indexed(value as u8);
            }
            // Consume the terminator as well.
            return digits_end + 1;
        }
        // Out-of-range palette index: skip the whole 38;5;N unit.
        let mut p = skip_code(bytes, pos);
        p = skip_code(bytes, p);
        skip_code(bytes, p)
    } else if truecolor && has_digit {
        // Truecolor is recognized but not representable; skip R, G and B
        // without altering the overlay.
        let mut p = pos + 5;
        p = skip_code(bytes, p);
        p = skip_code(bytes, p);
        skip_code(bytes, p)
    } else {
        skip_code(bytes, pos)
    }
}

/// Skip one code: advance past its digits and its terminator.
fn skip_code(bytes: &[u8], pos: usize) -> usize {
    let mut p = pos;
    while p < bytes.len() && !is_end_char(bytes[p]) {
        p += 1;
    }
    (p + 1).min(bytes.len())
}

/// Read a decimal number; returns (value, index one past the last digit).
fn read_number(bytes: &[u8], from: usize) -> (u32, usize) {
    let mut value: u32 = 0;
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value.saturating_mul(10) + u32::from(bytes[i] - b'0');
        i += 1;
    }
    (value, i)
}
