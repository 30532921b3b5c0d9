//! Conversion to terminal types.
//!
//! The engine's [`Style`] stays backend-agnostic; this module maps it to
//! [`crossterm`]'s `ContentStyle` at the rendering boundary. Unset colors
//! map to `None` so the terminal's own defaults apply.

use crossterm::style::{Attribute, Attributes, Color as CtColor, ContentStyle};

use crate::attrs::AttrFlags;
use crate::color::Color;
use crate::style::Style;

impl From<Color> for Option<CtColor> {
    fn from(color: Color) -> Self {
        match color {
            Color::Default => None,
            Color::Indexed(n) => Some(CtColor::AnsiValue(n)),
        }
    }
}

/// Attribute-bit to crossterm attribute mapping.
const ATTR_MAP: &[(AttrFlags, Attribute)] = &[
    (AttrFlags::BOLD, Attribute::Bold),
    (AttrFlags::UNDERLINE, Attribute::Underlined),
    (AttrFlags::ITALIC, Attribute::Italic),
    (AttrFlags::BLINK, Attribute::SlowBlink),
    (AttrFlags::REVERSE, Attribute::Reverse),
];

impl From<AttrFlags> for Attributes {
    fn from(flags: AttrFlags) -> Self {
        let mut attributes = Attributes::default();
        for &(flag, attribute) in ATTR_MAP {
            if flags.contains(flag) {
                attributes.set(attribute);
            }
        }
        attributes
    }
}

impl From<&Style> for ContentStyle {
    fn from(style: &Style) -> Self {
        ContentStyle {
            foreground_color: style.fg().into(),
            background_color: style.bg().into(),
            underline_color: None,
            attributes: style.attrs().into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pairs::PairPool;

    #[test]
    fn colors_map_to_ansi_values() {
        assert_eq!(Option::<CtColor>::from(Color::Default), None);
        assert_eq!(
            Option::<CtColor>::from(Color::Indexed(202)),
            Some(CtColor::AnsiValue(202))
        );
    }

    #[test]
    fn styles_carry_attributes_and_colors() {
        let mut pool = PairPool::new(8);
        let pair = pool.acquire(Color::Indexed(1), Color::Indexed(4)).unwrap();
        let style = Style::new(AttrFlags::BOLD | AttrFlags::REVERSE, Some(pair));

        let content: ContentStyle = (&style).into();
        assert_eq!(content.foreground_color, Some(CtColor::AnsiValue(1)));
        assert_eq!(content.background_color, Some(CtColor::AnsiValue(4)));
        assert!(content.attributes.has(Attribute::Bold));
        assert!(content.attributes.has(Attribute::Reverse));
        assert!(!content.attributes.has(Attribute::Underlined));
    }

    #[test]
    fn unset_style_is_the_terminal_default() {
        let content: ContentStyle = (&Style::default()).into();
        assert_eq!(content.foreground_color, None);
        assert_eq!(content.background_color, None);
        assert_eq!(content.attributes, Attributes::default());
    }
}
