//! The color engine context.
//!
//! [`ColorEngine`] owns every piece of shared state: the physical pair
//! pool, the category default table, the quote-depth table, the pattern
//! rule lists, the merge cache and the notification queue. All mutation
//! and all resolution go through it, on one logical thread; constructing a
//! fresh engine per test is cheap.

use tracing::{debug, warn};

use crate::ansi::AnsiColor;
use crate::attrs::AttrFlags;
use crate::category::CategoryId;
use crate::color::Color;
use crate::command::{self, CommandOutcome};
use crate::error::ColorError;
use crate::merge::{overlay, MergeCache};
use crate::notify::{ColorEvent, Notifications};
use crate::pairs::PairPool;
use crate::quoted::{QuotedColors, QUOTE_DEPTH_MAX};
use crate::rules::{MatchSpan, RegexColors};
use crate::simple::SimpleColors;
use crate::style::Style;

/// Terminal facts the engine consumes from the environment.
///
/// Capability negotiation (truecolor detection, pair counting) happens
/// outside this crate; the engine only honors what it is told.
#[derive(Clone, Copy, Debug)]
pub struct Capabilities {
    /// Whether an explicit color can be mixed with the terminal default.
    pub default_colors: bool,
    /// Number of simultaneous color pairs the terminal provides.
    pub color_pairs: usize,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            default_colors: true,
            color_pairs: 256,
        }
    }
}

/// Owns all theming state for one process lifetime.
pub struct ColorEngine {
    caps: Capabilities,
    pool: PairPool,
    simple: SimpleColors,
    quoted: QuotedColors,
    rules: RegexColors,
    merged: MergeCache,
    notifications: Notifications,
}

impl ColorEngine {
    /// Create an engine for a terminal with the given capabilities.
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            pool: PairPool::new(caps.color_pairs),
            simple: SimpleColors::new(),
            quoted: QuotedColors::new(),
            rules: RegexColors::new(),
            merged: MergeCache::new(),
            notifications: Notifications::default(),
        }
    }

    /// Terminal capabilities this engine was constructed with.
    pub fn caps(&self) -> Capabilities {
        self.caps
    }

    /// The physical pair pool (read-only; useful for dumps and tests).
    pub fn pair_pool(&self) -> &PairPool {
        &self.pool
    }

    /// The category default table.
    pub fn simple_colors(&self) -> &SimpleColors {
        &self.simple
    }

    /// The quote-depth table.
    pub fn quoted_colors(&self) -> &QuotedColors {
        &self.quoted
    }

    /// The pattern rule lists.
    pub fn regex_colors(&self) -> &RegexColors {
        &self.rules
    }

    pub(crate) fn merge_cache(&self) -> &MergeCache {
        &self.merged
    }

    // === Configuration mutation ===

    /// Set a category's default style.
    ///
    /// The default-color capability must have been checked by the caller
    /// (the command interpreter does); this only applies the mutation.
    pub fn set_simple(&mut self, cid: CategoryId, fg: Color, bg: Color, attrs: AttrFlags) {
        let style = self.make_style(fg, bg, attrs);
        self.simple.set(cid, style);
        self.mutated(ColorEvent::Set(cid));
    }

    /// Clear a category's default back to "unset".
    pub fn reset_simple(&mut self, cid: CategoryId) {
        if self.simple.reset(cid) {
            self.mutated(ColorEvent::Reset(cid));
        }
    }

    /// Set the style for one quote depth.
    pub fn set_quoted(
        &mut self,
        depth: usize,
        fg: Color,
        bg: Color,
        attrs: AttrFlags,
    ) -> Result<(), ColorError> {
        if depth >= QUOTE_DEPTH_MAX {
            return Err(ColorError::QuoteDepthRange(depth));
        }
        let style = self.make_style(fg, bg, attrs);
        self.quoted.set(depth, style);
        self.mutated(ColorEvent::Set(CategoryId::Quoted));
        Ok(())
    }

    /// Clear one quote depth.
    pub fn reset_quoted(&mut self, depth: usize) -> Result<(), ColorError> {
        if depth >= QUOTE_DEPTH_MAX {
            return Err(ColorError::QuoteDepthRange(depth));
        }
        if self.quoted.reset(depth) {
            self.mutated(ColorEvent::Reset(CategoryId::Quoted));
        }
        Ok(())
    }

    /// Clear every quote depth.
    pub fn reset_quoted_all(&mut self) {
        self.quoted.reset_all();
        self.mutated(ColorEvent::Reset(CategoryId::Quoted));
    }

    /// Install a pattern rule for a patterned category.
    ///
    /// `match_group` is only meaningful for [`CategoryId::Status`]; other
    /// callers pass 0. Nothing is mutated when the pattern fails to
    /// compile or the group is out of range.
    pub fn add_rule(
        &mut self,
        cid: CategoryId,
        pattern: &str,
        fg: Color,
        bg: Color,
        attrs: AttrFlags,
        match_group: usize,
    ) -> Result<(), ColorError> {
        if !cid.has_pattern() {
            return Err(ColorError::UnknownObject(cid.to_string()));
        }
        // Validate before acquiring any pool slot.
        let regex = crate::rules::RegexRule::compile(pattern, match_group)?;
        let style = self.make_style(fg, bg, attrs);
        if self.rules.get_mut(cid).install(pattern, regex, match_group, style) {
            self.mutated(ColorEvent::Set(cid));
        }
        Ok(())
    }

    /// Remove one rule by exact pattern text. Returns whether it existed.
    pub fn remove_rule(&mut self, cid: CategoryId, pattern: &str) -> bool {
        let changed = self.rules.get_mut(cid).remove(pattern);
        if changed {
            self.mutated(ColorEvent::Reset(cid));
        }
        changed
    }

    /// Remove every rule for a category (the `*` wildcard).
    pub fn clear_rules(&mut self, cid: CategoryId) {
        if self.rules.clear_category(cid) {
            self.mutated(ColorEvent::Reset(cid));
        }
    }

    /// Clear everything: defaults, quote levels, rules, merge cache, pool.
    ///
    /// Tables are cleared before the pool so no stale [`PairRef`] handle
    /// survives register renumbering.
    ///
    /// [`PairRef`]: crate::pairs::PairRef
    pub fn clear_all(&mut self) {
        debug!("clearing all color configuration");
        self.simple.clear();
        self.quoted.reset_all();
        self.rules.clear();
        self.merged.clear();
        self.pool.clear();
        self.notifications.push(ColorEvent::ClearedAll);
    }

    // === Resolution ===

    /// Resolve the effective style for a render unit.
    ///
    /// Precedence, lowest first: category default, quote-depth default
    /// (quote-bearing categories only; `depth` is ignored otherwise),
    /// every pattern rule matching `text` in insertion order, and finally
    /// the embedded-escape overlay. Each layer's set fields replace the
    /// lower layers'; unset fields fall through to the terminal default.
    pub fn resolve(
        &mut self,
        cid: CategoryId,
        depth: usize,
        text: Option<&str>,
        ansi: Option<&AnsiColor>,
    ) -> Style {
        let mut triple = self.simple.get(cid).triple();

        if cid.is_quoted() {
            triple = overlay(triple, self.quoted.get_cyclic(depth).triple());
        }

        if cid.has_pattern() {
            if let Some(text) = text {
                if let Some(list) = self.rules.get(cid) {
                    for style in list.matching_styles(text) {
                        triple = overlay(triple, style.triple());
                    }
                }
            }
        }

        if let Some(ansi) = ansi {
            triple = overlay(triple, (ansi.fg(), ansi.bg(), ansi.attrs()));
        }

        self.merged.resolve(&mut self.pool, triple)
    }

    /// Span-level pattern matches for one category, later rules winning on
    /// overlap. Used by callers that color sub-ranges (status bar, body
    /// text) rather than whole units.
    pub fn pattern_spans(&self, cid: CategoryId, text: &str) -> Vec<MatchSpan> {
        self.rules
            .get(cid)
            .map(|list| list.matches(text).into_vec())
            .unwrap_or_default()
    }

    // === Commands and notifications ===

    /// Run one configuration statement against this engine.
    pub fn run_command(&mut self, line: &str) -> Result<CommandOutcome, ColorError> {
        command::run_command(self, line)
    }

    /// Take every pending change notification.
    pub fn take_events(&mut self) -> Vec<ColorEvent> {
        self.notifications.drain()
    }

    // === Internals ===

    /// Build a style, acquiring a pair when any color is explicit. Pool
    /// exhaustion degrades to "no color" instead of failing the statement.
    fn make_style(&mut self, fg: Color, bg: Color, attrs: AttrFlags) -> Style {
        if fg.is_default() && bg.is_default() {
            return Style::new(attrs, None);
        }
        match self.pool.acquire(fg, bg) {
            Ok(pair) => Style::new(attrs, Some(pair)),
            Err(err) => {
                warn!(?fg, ?bg, %err, "falling back to uncolored style");
                Style::new(attrs, None)
            }
        }
    }

    /// Record a mutation: flush the merge cache and queue the event.
    fn mutated(&mut self, event: ColorEvent) {
        self.merged.clear();
        self.notifications.push(event);
    }
}

impl Default for ColorEngine {
    fn default() -> Self {
        Self::new(Capabilities::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const RED: Color = Color::Indexed(1);
    const GREEN: Color = Color::Indexed(2);
    const BLUE: Color = Color::Indexed(4);
    const CYAN: Color = Color::Indexed(6);

    #[test]
    fn resolve_unconfigured_category_is_unset() {
        let mut engine = ColorEngine::default();
        let style = engine.resolve(CategoryId::Header, 0, None, None);
        assert!(!style.is_set());
    }

    #[test]
    fn resolve_uses_category_default() {
        let mut engine = ColorEngine::default();
        engine.set_simple(CategoryId::Header, RED, Color::Default, AttrFlags::BOLD);
        let style = engine.resolve(CategoryId::Header, 0, None, None);
        assert_eq!(style.fg(), RED);
        assert_eq!(style.attrs(), AttrFlags::BOLD);
    }

    #[test]
    fn quote_depth_overlays_category_default() {
        let mut engine = ColorEngine::default();
        engine.set_simple(CategoryId::Quoted, Color::Default, GREEN, AttrFlags::empty());
        engine.set_quoted(1, BLUE, Color::Default, AttrFlags::BOLD).unwrap();

        let style = engine.resolve(CategoryId::Quoted, 1, None, None);
        assert_eq!(style.fg(), BLUE);
        assert_eq!(style.bg(), GREEN);
        assert_eq!(style.attrs(), AttrFlags::BOLD);
    }

    #[test]
    fn matching_rule_overlays_default() {
        let mut engine = ColorEngine::default();
        engine.set_simple(CategoryId::Index, RED, GREEN, AttrFlags::empty());
        engine
            .add_rule(CategoryId::Index, "urgent", BLUE, Color::Default, AttrFlags::BOLD, 0)
            .unwrap();

        let style = engine.resolve(CategoryId::Index, 0, Some("an urgent mail"), None);
        assert_eq!(style.fg(), BLUE);
        assert_eq!(style.bg(), GREEN);
        assert_eq!(style.attrs(), AttrFlags::BOLD);

        let other = engine.resolve(CategoryId::Index, 0, Some("nothing here"), None);
        assert_eq!(other.fg(), RED);
        assert_eq!(other.attrs(), AttrFlags::empty());
    }

    #[test]
    fn escape_overlay_wins_over_everything() {
        let mut engine = ColorEngine::default();
        engine.set_simple(CategoryId::Body, RED, GREEN, AttrFlags::empty());
        engine
            .add_rule(CategoryId::Body, ".*", BLUE, Color::Default, AttrFlags::empty(), 0)
            .unwrap();

        let mut ansi = AnsiColor::new();
        crate::ansi::parse_single("\x1b[1;36m", &mut ansi, false);

        let style = engine.resolve(CategoryId::Body, 0, Some("text"), Some(&ansi));
        assert_eq!(style.fg(), CYAN);
        assert_eq!(style.bg(), GREEN); // falls through rule and overlay
        assert_eq!(style.attrs(), AttrFlags::BOLD);
    }

    #[test]
    fn mutation_emits_event_and_flushes_cache() {
        let mut engine = ColorEngine::default();
        engine.set_simple(CategoryId::Header, RED, Color::Default, AttrFlags::empty());
        assert_eq!(
            engine.take_events(),
            vec![ColorEvent::Set(CategoryId::Header)]
        );

        engine.reset_simple(CategoryId::Header);
        assert_eq!(
            engine.take_events(),
            vec![ColorEvent::Reset(CategoryId::Header)]
        );
        // Resetting an unset category is silent.
        engine.reset_simple(CategoryId::Header);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn clear_all_resets_every_table() {
        let mut engine = ColorEngine::default();
        engine.set_simple(CategoryId::Header, RED, Color::Default, AttrFlags::empty());
        engine.set_quoted(0, GREEN, Color::Default, AttrFlags::empty()).unwrap();
        engine
            .add_rule(CategoryId::Body, "x", BLUE, Color::Default, AttrFlags::empty(), 0)
            .unwrap();

        engine.clear_all();
        assert!(!engine.simple_colors().is_set(CategoryId::Header));
        assert_eq!(engine.quoted_colors().used(), 0);
        assert!(engine.regex_colors().get(CategoryId::Body).is_none());
        assert!(engine.pair_pool().is_empty());
        assert!(engine.take_events().contains(&ColorEvent::ClearedAll));
    }

    #[test]
    fn deep_quotes_wrap_over_set_levels() {
        let mut engine = ColorEngine::default();
        engine.set_quoted(0, RED, Color::Default, AttrFlags::empty()).unwrap();
        engine.set_quoted(1, GREEN, Color::Default, AttrFlags::empty()).unwrap();

        let style = engine.resolve(CategoryId::Quoted, 4, None, None);
        assert_eq!(style.fg(), RED);
        let style = engine.resolve(CategoryId::Quoted, 5, None, None);
        assert_eq!(style.fg(), GREEN);
    }
}
