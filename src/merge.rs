//! Style merging and the merged-style cache.
//!
//! Resolution overlays up to four layers (category default, quote depth,
//! pattern rules, embedded-escape overlay) into one effective style. The
//! overlay operation is field-wise: a color explicitly set in the upper
//! layer replaces the lower layer's, an unset (terminal default) color
//! passes through, and attribute bits are unioned.
//!
//! Overlaying works on plain (fg, bg, attrs) triples so it never touches
//! the pair pool; only the final combination acquires a physical pair, and
//! [`MergeCache`] memoizes that acquisition per distinct combination. Any
//! configuration mutation flushes the whole cache - correctness over cache
//! longevity, and mutations only happen at configuration time.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::attrs::AttrFlags;
use crate::color::Color;
use crate::error::ColorError;
use crate::pairs::PairPool;
use crate::style::Style;

/// A style reduced to its renderable fields.
pub(crate) type StyleTriple = (Color, Color, AttrFlags);

/// Overlay `over` onto `base`: set colors win, unset colors fall through,
/// attribute bits accumulate.
pub(crate) fn overlay(base: StyleTriple, over: StyleTriple) -> StyleTriple {
    let (base_fg, base_bg, base_attrs) = base;
    let (over_fg, over_bg, over_attrs) = over;
    (
        if over_fg.is_default() { base_fg } else { over_fg },
        if over_bg.is_default() { base_bg } else { over_bg },
        base_attrs | over_attrs,
    )
}

/// Memoized triple-to-style cache.
#[derive(Default)]
pub(crate) struct MergeCache {
    cache: FxHashMap<StyleTriple, Style>,
}

impl MergeCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Turn a merged triple into a renderable [`Style`], acquiring its
    /// color pair once per distinct combination.
    ///
    /// Pool exhaustion degrades to an uncolored style with the attributes
    /// kept, rather than failing resolution.
    pub(crate) fn resolve(&mut self, pool: &mut PairPool, triple: StyleTriple) -> Style {
        if let Some(style) = self.cache.get(&triple) {
            return style.clone();
        }

        let (fg, bg, attrs) = triple;
        let pair = if fg.is_default() && bg.is_default() {
            None
        } else {
            match pool.acquire(fg, bg) {
                Ok(pair) => Some(pair),
                Err(ColorError::ResourceExhausted) => None,
                Err(_) => None,
            }
        };

        let style = Style::new(attrs, pair);
        trace!(?triple, "merged new style combination");
        self.cache.insert(triple, style.clone());
        style
    }

    /// Number of memoized combinations.
    pub(crate) fn len(&self) -> usize {
        self.cache.len()
    }

    /// Flush every entry, releasing the pair handles the cache held.
    pub(crate) fn clear(&mut self) {
        self.cache.clear();
    }

    /// Visit memoized styles for the trace dump.
    pub(crate) fn for_each(&self, mut f: impl FnMut(&Style)) {
        for style in self.cache.values() {
            f(style);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const RED: Color = Color::Indexed(1);
    const GREEN: Color = Color::Indexed(2);
    const BLUE: Color = Color::Indexed(4);

    #[test]
    fn set_fields_win_unset_fall_through() {
        let base = (RED, GREEN, AttrFlags::BOLD);
        let over = (BLUE, Color::Default, AttrFlags::UNDERLINE);
        let merged = overlay(base, over);
        assert_eq!(merged.0, BLUE);
        assert_eq!(merged.1, GREEN);
        assert_eq!(merged.2, AttrFlags::BOLD | AttrFlags::UNDERLINE);
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let base = (RED, GREEN, AttrFlags::BLINK);
        let merged = overlay(base, (Color::Default, Color::Default, AttrFlags::empty()));
        assert_eq!(merged, base);
    }

    #[test]
    fn cache_memoizes_pair_acquisition() {
        let mut pool = PairPool::new(8);
        let mut cache = MergeCache::new();

        let a = cache.resolve(&mut pool, (RED, GREEN, AttrFlags::BOLD));
        let b = cache.resolve(&mut pool, (RED, GREEN, AttrFlags::BOLD));
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn all_default_triple_needs_no_pair() {
        let mut pool = PairPool::new(8);
        let mut cache = MergeCache::new();
        let style = cache.resolve(
            &mut pool,
            (Color::Default, Color::Default, AttrFlags::REVERSE),
        );
        assert!(style.pair().is_none());
        assert_eq!(style.attrs(), AttrFlags::REVERSE);
        assert!(pool.is_empty());
    }

    #[test]
    fn exhaustion_degrades_to_uncolored() {
        let mut pool = PairPool::new(1);
        let mut cache = MergeCache::new();
        let first = cache.resolve(&mut pool, (RED, GREEN, AttrFlags::empty()));
        assert!(first.pair().is_some());

        // Pool full and the only slot is held by the cached style.
        let second = cache.resolve(&mut pool, (BLUE, GREEN, AttrFlags::BOLD));
        assert!(second.pair().is_none());
        assert_eq!(second.attrs(), AttrFlags::BOLD);
    }
}
