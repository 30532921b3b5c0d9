//! Per-category pattern rule lists.
//!
//! A patterned category owns an insertion-ordered list of regex rules.
//! Order is semantically significant: when two rules' match spans overlap,
//! the rule inserted later wins for the overlapping region (newest
//! configuration takes precedence).
//!
//! The `status` category additionally supports capture-group sub-match
//! coloring: a rule may name a capture group, and only that group's span
//! is colored (group 0 is the whole match).

use std::ops::Range;

use regex::Regex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::category::CategoryId;
use crate::error::ColorError;
use crate::style::Style;

/// One colored region of scanned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSpan {
    /// Byte range into the scanned text.
    pub range: Range<usize>,
    /// Style for the region.
    pub style: Style,
}

/// A single pattern rule.
#[derive(Debug)]
pub struct RegexRule {
    pattern: String,
    regex: Regex,
    match_group: usize,
    style: Style,
}

impl RegexRule {
    /// Compile and validate a pattern and its capture group, without
    /// touching any list. Validation is separate from installation so a
    /// failing statement mutates nothing.
    pub(crate) fn compile(pattern: &str, match_group: usize) -> Result<Regex, ColorError> {
        let regex = Regex::new(pattern)?;
        if match_group >= regex.captures_len() {
            return Err(ColorError::MatchGroupRange {
                group: match_group,
                pattern: pattern.to_string(),
            });
        }
        Ok(regex)
    }

    /// Raw pattern text, the dump and removal key.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Capture group whose span is reported; 0 is the whole match.
    pub fn match_group(&self) -> usize {
        self.match_group
    }

    /// The rule's style.
    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// Insertion-ordered rule list for one category.
#[derive(Debug, Default)]
pub struct RegexColorList {
    rules: Vec<RegexRule>,
}

impl RegexColorList {
    /// Install a rule at the end of the list.
    ///
    /// Re-adding an identical pattern is idempotent: with the same style it
    /// is a no-op, with a different style it replaces the existing entry in
    /// place (keeping its position). Returns whether the list changed.
    pub fn add(
        &mut self,
        pattern: &str,
        style: Style,
        match_group: usize,
    ) -> Result<bool, ColorError> {
        let regex = RegexRule::compile(pattern, match_group)?;
        Ok(self.install(pattern, regex, match_group, style))
    }

    /// Install an already-compiled rule; see [`RegexColorList::add`] for
    /// the idempotence rules.
    pub(crate) fn install(
        &mut self,
        pattern: &str,
        regex: Regex,
        match_group: usize,
        style: Style,
    ) -> bool {
        if let Some(existing) = self.rules.iter_mut().find(|r| r.pattern == pattern) {
            if existing.style == style && existing.match_group == match_group {
                return false;
            }
            existing.style = style;
            existing.match_group = match_group;
            return true;
        }
        self.rules.push(RegexRule {
            pattern: pattern.to_string(),
            regex,
            match_group,
            style,
        });
        true
    }

    /// Remove the rule with this exact pattern text. Returns whether a rule
    /// was removed.
    pub fn remove(&mut self, pattern: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.pattern != pattern);
        before != self.rules.len()
    }

    /// Remove every rule (the `*` wildcard).
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Whether the list holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RegexRule> {
        self.rules.iter()
    }

    /// Styles of every rule whose pattern matches `text`, in insertion
    /// order. Used when a whole render unit (e.g. an index line) is styled
    /// by overlaying each matching rule.
    pub fn matching_styles<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Style> {
        self.rules
            .iter()
            .filter(move |r| r.regex.is_match(text))
            .map(|r| &r.style)
    }

    /// Evaluate every rule against `text` and produce ordered,
    /// non-overlapping spans. Later rules overwrite earlier ones where
    /// they overlap.
    pub fn matches(&self, text: &str) -> SmallVec<[MatchSpan; 4]> {
        let mut spans: SmallVec<[MatchSpan; 4]> = SmallVec::new();
        for rule in &self.rules {
            if rule.match_group == 0 {
                for m in rule.regex.find_iter(text) {
                    overlay_span(&mut spans, m.range(), &rule.style);
                }
            } else {
                for caps in rule.regex.captures_iter(text) {
                    // A group that did not participate contributes nothing.
                    if let Some(m) = caps.get(rule.match_group) {
                        overlay_span(&mut spans, m.range(), &rule.style);
                    }
                }
            }
        }
        spans
    }
}

/// Overlay `range` onto `spans`, trimming or splitting earlier spans so the
/// new one wins in the overlap. Empty ranges contribute nothing.
fn overlay_span(spans: &mut SmallVec<[MatchSpan; 4]>, range: Range<usize>, style: &Style) {
    if range.is_empty() {
        return;
    }
    let mut out: SmallVec<[MatchSpan; 4]> = SmallVec::with_capacity(spans.len() + 2);
    for span in spans.drain(..) {
        if span.range.end <= range.start || span.range.start >= range.end {
            out.push(span);
            continue;
        }
        if span.range.start < range.start {
            out.push(MatchSpan {
                range: span.range.start..range.start,
                style: span.style.clone(),
            });
        }
        if span.range.end > range.end {
            out.push(MatchSpan {
                range: range.end..span.range.end,
                style: span.style,
            });
        }
    }
    out.push(MatchSpan {
        range,
        style: style.clone(),
    });
    out.sort_by_key(|s| s.range.start);
    *spans = out;
}

/// Rule lists for every patterned category.
#[derive(Debug, Default)]
pub struct RegexColors {
    lists: FxHashMap<CategoryId, RegexColorList>,
}

impl RegexColors {
    /// Create an empty set of lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// The list for a category, empty when nothing was ever added.
    pub fn get(&self, cid: CategoryId) -> Option<&RegexColorList> {
        self.lists.get(&cid)
    }

    /// The list for a category, created on first use.
    pub fn get_mut(&mut self, cid: CategoryId) -> &mut RegexColorList {
        self.lists.entry(cid).or_default()
    }

    /// Remove every rule for one category. Returns whether anything was
    /// removed.
    pub fn clear_category(&mut self, cid: CategoryId) -> bool {
        match self.lists.remove(&cid) {
            Some(list) => {
                trace!(category = %cid, rules = list.len(), "cleared rule list");
                !list.is_empty()
            }
            None => false,
        }
    }

    /// Remove every rule for every category.
    pub fn clear(&mut self) {
        self.lists.clear();
    }

    /// Visit non-empty lists in [`CategoryId::ALL`] order.
    pub fn for_each_list(&self, mut f: impl FnMut(CategoryId, &RegexColorList)) {
        for &cid in CategoryId::ALL {
            if let Some(list) = self.lists.get(&cid) {
                if !list.is_empty() {
                    f(cid, list);
                }
            }
        }
    }
}
