//! Property-based tests for swatch.
//!
//! Uses proptest to hammer the pair pool, the escape parser, the command
//! interpreter and span overlaying with randomized inputs.

use proptest::prelude::*;
use swatch::ansi::{parse_single, sequence_length};
use swatch::pairs::PairPool;
use swatch::{run_command, AnsiColor, CategoryId, Color, ColorEngine};

fn arb_color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::Default), any::<u8>().prop_map(Color::Indexed)]
}

proptest! {
    /// The pool never exceeds its capacity and dedupes exact pairs, no
    /// matter the acquisition order or which handles are dropped.
    #[test]
    fn pool_stays_within_capacity(
        capacity in 1usize..32,
        requests in prop::collection::vec((arb_color(), arb_color(), any::<bool>()), 0..200),
    ) {
        let mut pool = PairPool::new(capacity);
        let mut held = Vec::new();

        for (fg, bg, keep) in requests {
            match pool.acquire(fg, bg) {
                Ok(pair) => {
                    prop_assert_eq!(pair.fg(), fg);
                    prop_assert_eq!(pair.bg(), bg);
                    if keep {
                        held.push(pair);
                    }
                }
                Err(_) => {
                    // Exhaustion is only legal when every slot is held.
                    prop_assert_eq!(pool.len(), capacity);
                }
            }
            prop_assert!(pool.len() <= capacity);
        }
    }

    /// Acquiring the same pair twice always yields the same register.
    #[test]
    fn pool_dedupes_pairs(
        fg in arb_color(),
        bg in arb_color(),
        noise in prop::collection::vec((arb_color(), arb_color()), 0..8),
    ) {
        let mut pool = PairPool::new(64);
        let first = pool.acquire(fg, bg).ok();
        let mut held = Vec::new();
        for (nfg, nbg) in noise {
            if let Ok(pair) = pool.acquire(nfg, nbg) {
                held.push(pair);
            }
        }
        let second = pool.acquire(fg, bg).ok();
        if let (Some(a), Some(b)) = (first, second) {
            prop_assert_eq!(a.index(), b.index());
        }
    }

    /// The escape parser never panics and either consumes a whole
    /// well-formed sequence or refuses the input entirely.
    #[test]
    fn ansi_parser_consumes_whole_sequences_or_nothing(body in "[0-9;]{0,24}", tail in ".{0,8}") {
        let mut ansi = AnsiColor::new();

        let well_formed = format!("\x1b[{body}m{tail}");
        let len = parse_single(&well_formed, &mut ansi, false);
        prop_assert_eq!(len, 3 + body.len());

        let unterminated = format!("\x1b[{body}");
        prop_assert_eq!(sequence_length(&unterminated), 0);
        let mut untouched = AnsiColor::new();
        prop_assert_eq!(parse_single(&unterminated, &mut untouched, false), 0);
        prop_assert!(!untouched.is_set());
    }

    /// Arbitrary statement text never panics the interpreter; it either
    /// applies cleanly or reports an error.
    #[test]
    fn interpreter_never_panics(line in ".{0,80}") {
        let mut engine = ColorEngine::default();
        let _ = run_command(&mut engine, &line);
    }

    /// Span output is always sorted, non-overlapping and within bounds.
    #[test]
    fn spans_are_sorted_and_disjoint(
        text in "[a-d ]{0,40}",
        patterns in prop::collection::vec("[a-d]{1,3}", 1..6),
    ) {
        let mut engine = ColorEngine::default();
        for (i, pattern) in patterns.iter().enumerate() {
            let statement = format!("color body color{} default \"{pattern}\"", i + 1);
            run_command(&mut engine, &statement).ok();
        }

        let spans = engine.pattern_spans(CategoryId::Body, &text);
        for window in spans.windows(2) {
            prop_assert!(window[0].range.end <= window[1].range.start);
        }
        for span in &spans {
            prop_assert!(span.range.start < span.range.end);
            prop_assert!(span.range.end <= text.len());
        }
    }

    /// Resolution is deterministic: the same inputs always produce the
    /// same style, before and after unrelated resolutions.
    #[test]
    fn resolution_is_deterministic(
        depth in 0usize..30,
        text in "[a-z ]{0,20}",
    ) {
        let mut engine = ColorEngine::default();
        run_command(&mut engine, "color quoted color1 default").ok();
        run_command(&mut engine, "color quoted1 color2 default").ok();
        run_command(&mut engine, "color body color3 default \"[a-m]+\"").ok();

        let first = engine.resolve(CategoryId::Quoted, depth, None, None);
        let _ = engine.resolve(CategoryId::Body, 0, Some(&text), None);
        let again = engine.resolve(CategoryId::Quoted, depth, None, None);
        prop_assert_eq!(first, again);
    }
}
