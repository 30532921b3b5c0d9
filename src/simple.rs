//! Category default table.
//!
//! One optional [`Style`] per display category. Lookup never fails: an
//! unset category yields the zero value and the renderer falls back to
//! unstyled text.

use rustc_hash::FxHashMap;

use crate::category::CategoryId;
use crate::style::Style;

/// Map of category defaults.
#[derive(Default)]
pub struct SimpleColors {
    table: FxHashMap<CategoryId, Style>,
}

impl SimpleColors {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the default style for a category.
    pub fn set(&mut self, cid: CategoryId, style: Style) {
        self.table.insert(cid, style);
    }

    /// Clear one category back to "unset".
    ///
    /// Returns whether a style was actually removed.
    pub fn reset(&mut self, cid: CategoryId) -> bool {
        self.table.remove(&cid).is_some()
    }

    /// The category's default style; the zero value when unset.
    pub fn get(&self, cid: CategoryId) -> Style {
        self.table.get(&cid).cloned().unwrap_or_default()
    }

    /// Whether a category has an explicit default.
    pub fn is_set(&self, cid: CategoryId) -> bool {
        self.table.contains_key(&cid)
    }

    /// Visit set categories in [`CategoryId::ALL`] order.
    pub fn for_each_set(&self, mut f: impl FnMut(CategoryId, &Style)) {
        for &cid in CategoryId::ALL {
            if let Some(style) = self.table.get(&cid) {
                f(cid, style);
            }
        }
    }

    /// Drop every default.
    pub fn clear(&mut self) {
        self.table.clear();
    }
}
