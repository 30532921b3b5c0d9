//! Configuration dumps.
//!
//! [`dump_config`] renders the complete live configuration as statement
//! text that [`run_config`](crate::command::run_config) accepts back,
//! so a dump followed by `uncolor *` and a replay reproduces the exact
//! configuration. [`log_state`] emits the internal tables at trace level
//! for debugging.

use std::fmt::Write as _;

use tracing::trace;

use crate::engine::ColorEngine;
use crate::style::Style;

/// Render the whole configuration as re-parseable `color` statements.
pub fn dump_config(engine: &ColorEngine) -> String {
    let mut out = String::new();

    out.push_str("# Simple colors\n");
    engine.simple_colors().for_each_set(|cid, style| {
        let _ = writeln!(out, "color {cid}{}", style_tokens(style));
    });

    out.push_str("\n# Quoted colors\n");
    engine.quoted_colors().for_each_set(|depth, style| {
        if depth == 0 {
            let _ = writeln!(out, "color quoted{}", style_tokens(style));
        } else {
            let _ = writeln!(out, "color quoted{depth}{}", style_tokens(style));
        }
    });

    out.push_str("\n# Regex colors\n");
    engine.regex_colors().for_each_list(|cid, list| {
        for rule in list.iter() {
            let _ = write!(
                out,
                "color {cid}{} \"{}\"",
                style_tokens(rule.style()),
                escape_pattern(rule.pattern())
            );
            if rule.match_group() != 0 {
                let _ = write!(out, " {}", rule.match_group());
            }
            out.push('\n');
        }
    });

    out
}

/// ` [attrs] fg bg` with a leading space, as statement tokens.
fn style_tokens(style: &Style) -> String {
    let attrs = style.attrs().keyword_list();
    if attrs.is_empty() {
        format!(" {} {}", style.fg(), style.bg())
    } else {
        format!(" {attrs} {} {}", style.fg(), style.bg())
    }
}

/// Escape a pattern for a double-quoted statement token.
fn escape_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Emit the internal tables at trace level: every pair register with its
/// outstanding handle count, and the merge cache contents.
pub fn log_state(engine: &ColorEngine) {
    let pool = engine.pair_pool();
    trace!(
        pairs = pool.len(),
        capacity = pool.capacity(),
        "color pair pool"
    );
    pool.for_each_slot(|slot, refs| {
        trace!(
            index = slot.index(),
            fg = %slot.fg(),
            bg = %slot.bg(),
            refs,
            "pair register"
        );
    });

    trace!(entries = engine.merge_cache().len(), "merge cache");
    engine.merge_cache().for_each(|style| {
        trace!(
            fg = %style.fg(),
            bg = %style.bg(),
            attrs = ?style.attrs(),
            "merged style"
        );
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::attrs::AttrFlags;
    use crate::category::CategoryId;
    use crate::color::Color;
    use crate::command::run_config;

    #[test]
    fn dump_is_re_parseable() {
        let mut e = ColorEngine::default();
        let input = "\
color error bold color1 default
color quoted color6 default
color quoted2 color2 color0
color index underline color4 default \"urgent .*\"
color status color7 color4
color status color1 color4 \"msgs:(\\d+)\" 1
mono tilde reverse
";
        assert!(run_config(&mut e, input).is_empty());

        let dump = dump_config(&e);
        let mut replayed = ColorEngine::default();
        assert!(run_config(&mut replayed, &dump).is_empty());

        let style = replayed.simple_colors().get(CategoryId::Error);
        assert_eq!(style.fg(), Color::Indexed(1));
        assert_eq!(style.attrs(), AttrFlags::BOLD);
        assert_eq!(replayed.quoted_colors().get(0).fg(), Color::Indexed(6));
        assert_eq!(replayed.quoted_colors().get(2).bg(), Color::Indexed(0));
        assert_eq!(
            replayed.simple_colors().get(CategoryId::Tilde).attrs(),
            AttrFlags::REVERSE
        );

        let index = replayed.regex_colors().get(CategoryId::Index).unwrap();
        assert_eq!(index.iter().next().unwrap().pattern(), "urgent .*");
        let status = replayed.regex_colors().get(CategoryId::Status).unwrap();
        assert_eq!(status.iter().next().unwrap().match_group(), 1);
        assert!(replayed.simple_colors().is_set(CategoryId::Status));
    }

    #[test]
    fn patterns_with_quotes_survive_the_round_trip() {
        let mut e = ColorEngine::default();
        e.add_rule(
            CategoryId::Body,
            r#"said "no" loudly"#,
            Color::Indexed(1),
            Color::Default,
            AttrFlags::empty(),
            0,
        )
        .unwrap();

        let dump = dump_config(&e);
        let mut replayed = ColorEngine::default();
        assert!(run_config(&mut replayed, &dump).is_empty());
        let list = replayed.regex_colors().get(CategoryId::Body).unwrap();
        assert_eq!(list.iter().next().unwrap().pattern(), r#"said "no" loudly"#);
    }

    #[test]
    fn empty_engine_dumps_only_headers() {
        let e = ColorEngine::default();
        let dump = dump_config(&e);
        assert!(!dump.lines().any(|l| l.starts_with("color ")));
        let mut replayed = ColorEngine::default();
        assert!(run_config(&mut replayed, &dump).is_empty());
    }
}
