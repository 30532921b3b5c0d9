//! Quote-depth style table.
//!
//! Quoted text (`> `, `> > `, ...) is styled per nesting depth. The table
//! is a fixed array of [`QUOTE_DEPTH_MAX`] independent slots; depths past
//! the highest configured level wrap cyclically during resolution, so a
//! deeply nested quote reuses the configured palette instead of going
//! unstyled.

use crate::style::Style;

/// Maximum configurable quote depth.
pub const QUOTE_DEPTH_MAX: usize = 10;

/// Fixed-size table of per-depth quote styles.
#[derive(Default)]
pub struct QuotedColors {
    levels: [Option<Style>; QUOTE_DEPTH_MAX],
}

impl QuotedColors {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the style for one depth. Depth must be below
    /// [`QUOTE_DEPTH_MAX`]; the command layer validates before calling.
    pub fn set(&mut self, depth: usize, style: Style) {
        self.levels[depth] = Some(style);
    }

    /// The style for one depth; the zero value when unset.
    pub fn get(&self, depth: usize) -> Style {
        self.levels
            .get(depth)
            .and_then(Option::as_ref)
            .cloned()
            .unwrap_or_default()
    }

    /// The style used when rendering at an arbitrary depth: wraps over the
    /// configured levels (`depth % used`), matching how deep quoting cycles
    /// through the palette.
    pub fn get_cyclic(&self, depth: usize) -> Style {
        let used = self.used();
        if used == 0 {
            return Style::default();
        }
        self.get(depth % used)
    }

    /// Clear one depth. Returns whether a style was actually removed.
    pub fn reset(&mut self, depth: usize) -> bool {
        match self.levels.get_mut(depth) {
            Some(slot) => slot.take().is_some(),
            None => false,
        }
    }

    /// Clear every depth.
    pub fn reset_all(&mut self) {
        for slot in &mut self.levels {
            *slot = None;
        }
    }

    /// One past the highest configured depth; 0 when nothing is set.
    pub fn used(&self) -> usize {
        self.levels
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + 1)
    }

    /// Visit set depths in ascending order.
    pub fn for_each_set(&self, mut f: impl FnMut(usize, &Style)) {
        for (depth, slot) in self.levels.iter().enumerate() {
            if let Some(style) = slot {
                f(depth, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrFlags;

    fn attrs_style(attrs: AttrFlags) -> Style {
        Style::new(attrs, None)
    }

    #[test]
    fn unset_depth_is_zero_value() {
        let table = QuotedColors::new();
        assert!(!table.get(3).is_set());
        assert_eq!(table.used(), 0);
    }

    #[test]
    fn set_and_reset_single_depth() {
        let mut table = QuotedColors::new();
        table.set(2, attrs_style(AttrFlags::BOLD));
        assert!(table.get(2).is_set());
        assert_eq!(table.used(), 3);
        assert!(table.reset(2));
        assert_eq!(table.used(), 0);
    }

    #[test]
    fn deep_quotes_cycle_over_configured_levels() {
        let mut table = QuotedColors::new();
        table.set(0, attrs_style(AttrFlags::BOLD));
        table.set(1, attrs_style(AttrFlags::UNDERLINE));

        assert_eq!(table.get_cyclic(0).attrs(), AttrFlags::BOLD);
        assert_eq!(table.get_cyclic(1).attrs(), AttrFlags::UNDERLINE);
        assert_eq!(table.get_cyclic(2).attrs(), AttrFlags::BOLD);
        assert_eq!(table.get_cyclic(7).attrs(), AttrFlags::UNDERLINE);
    }

    #[test]
    fn reset_all_clears_everything() {
        let mut table = QuotedColors::new();
        for depth in 0..QUOTE_DEPTH_MAX {
            table.set(depth, attrs_style(AttrFlags::BLINK));
        }
        table.reset_all();
        assert_eq!(table.used(), 0);
    }
}
