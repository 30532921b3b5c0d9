//! The resolvable style unit.
//!
//! A [`Style`] is attribute bits plus an optional handle into the physical
//! color-pair cache. No handle means "terminal default colors". Equality
//! is structural: two styles are equal when they render the same, even if
//! the pair handles were acquired at different times.

use crate::attrs::AttrFlags;
use crate::color::Color;
use crate::pairs::PairRef;

/// Attribute bits plus an optional color pair.
#[derive(Clone, Debug, Default)]
pub struct Style {
    attrs: AttrFlags,
    pair: Option<PairRef>,
}

impl Style {
    /// Build a style from attributes and an optional pair handle.
    pub fn new(attrs: AttrFlags, pair: Option<PairRef>) -> Self {
        Self { attrs, pair }
    }

    /// Attribute bits.
    #[inline]
    pub fn attrs(&self) -> AttrFlags {
        self.attrs
    }

    /// Foreground color; [`Color::Default`] when no pair is attached.
    #[inline]
    pub fn fg(&self) -> Color {
        self.pair.as_ref().map_or(Color::Default, |p| p.fg())
    }

    /// Background color; [`Color::Default`] when no pair is attached.
    #[inline]
    pub fn bg(&self) -> Color {
        self.pair.as_ref().map_or(Color::Default, |p| p.bg())
    }

    /// The pair handle, if one is attached.
    #[inline]
    pub fn pair(&self) -> Option<&PairRef> {
        self.pair.as_ref()
    }

    /// Whether anything is set at all. An unset style is the zero value
    /// every lookup falls back to.
    pub fn is_set(&self) -> bool {
        !self.attrs.is_empty() || self.pair.is_some()
    }

    /// The (fg, bg, attrs) triple this style renders as. The merge layer
    /// works on triples so it can combine styles without touching the pool.
    pub(crate) fn triple(&self) -> (Color, Color, AttrFlags) {
        (self.fg(), self.bg(), self.attrs)
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.attrs == other.attrs && self.fg() == other.fg() && self.bg() == other.bg()
    }
}

impl Eq for Style {}
