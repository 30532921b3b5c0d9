//! The configuration command interpreter.
//!
//! Four statements drive all theming: `color` and `mono` install styles,
//! `uncolor` and `unmono` remove them. The grammar:
//!
//! ```text
//! color   OBJECT [ATTR...] FG BG [PATTERN [GROUP]]
//! mono    OBJECT ATTR...   [PATTERN]
//! uncolor OBJECT [PATTERN... | *]
//! uncolor *
//! ```
//!
//! `OBJECT` is a category token, a `quotedN` depth token, or the two-token
//! `compose X` form. A statement is atomic: every token is validated
//! before anything is applied, so a failing statement leaves the engine
//! exactly as it was. `color` with no arguments dumps the current
//! configuration instead of mutating.
//!
//! `unmono` is accepted and fully validated but applies nothing:
//! attribute-only styles live in the same tables as colored ones, so the
//! removal statements for them are `uncolor`.

use tracing::debug;

use crate::attrs::AttrFlags;
use crate::category::{CategoryId, ComposeCategory};
use crate::color::Color;
use crate::dump;
use crate::engine::ColorEngine;
use crate::error::ColorError;
use crate::quoted::QUOTE_DEPTH_MAX;

/// What a successful statement produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The statement mutated (or validated, for `unmono`) the engine.
    Applied,
    /// A no-argument `color` query; the re-parseable configuration text.
    Dump(String),
}

/// The object a statement addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Object {
    Simple(CategoryId),
    Quoted(usize),
}

/// Run one configuration statement. Blank lines and `#` comments are
/// accepted and do nothing.
pub fn run_command(
    engine: &mut ColorEngine,
    line: &str,
) -> Result<CommandOutcome, ColorError> {
    let tokens = tokenize(line);
    let Some((command, args)) = tokens.split_first() else {
        return Ok(CommandOutcome::Applied);
    };

    match command.as_str() {
        "color" => parse_color(engine, args, true),
        "mono" => parse_color(engine, args, false),
        "uncolor" => parse_uncolor(engine, args, true),
        "unmono" => parse_uncolor(engine, args, false),
        other => Err(ColorError::UnknownCommand(other.to_string())),
    }
}

/// Run a whole configuration text, one statement per line.
///
/// Statement failures do not stop later lines; the returned list pairs
/// each failing 1-based line number with its error.
pub fn run_config(engine: &mut ColorEngine, input: &str) -> Vec<(usize, ColorError)> {
    let mut errors = Vec::new();
    for (i, line) in input.lines().enumerate() {
        if let Err(err) = run_command(engine, line) {
            debug!(line = i + 1, %err, "configuration statement rejected");
            errors.push((i + 1, err));
        }
    }
    errors
}

/// Split a statement into tokens. Double quotes group a token with
/// whitespace; a backslash inside quotes escapes the next character. A
/// `#` at the start of a token begins a comment.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '#' {
            break;
        }

        let mut token = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            if c == '"' {
                chars.next();
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                token.push(escaped);
                            }
                        }
                        _ => token.push(q),
                    }
                }
            } else {
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }
    tokens
}

/// Parse an object reference. Consumes one token, or two for `compose X`.
/// Returns the object and how many tokens it consumed.
fn parse_object(tokens: &[String], command: &'static str) -> Result<(Object, usize), ColorError> {
    let first = tokens
        .first()
        .ok_or(ColorError::TooFewArguments { command })?;
    let lower = first.to_ascii_lowercase();

    if lower == "compose" {
        let sub = tokens
            .get(1)
            .ok_or(ColorError::TooFewArguments { command })?;
        let compose = ComposeCategory::parse(sub)
            .ok_or_else(|| ColorError::UnknownObject(format!("compose {sub}")))?;
        return Ok((Object::Simple(CategoryId::Compose(compose)), 2));
    }

    // `quoted` is depth 0; `quotedN` addresses one depth directly.
    if let Some(digits) = lower.strip_prefix("quoted") {
        if !digits.is_empty() {
            let depth: usize = digits.parse().map_err(|_| ColorError::InvalidNumber {
                command,
                value: first.to_string(),
            })?;
            if depth >= QUOTE_DEPTH_MAX {
                return Err(ColorError::QuoteDepthRange(depth));
            }
            return Ok((Object::Quoted(depth), 1));
        }
        return Ok((Object::Quoted(0), 1));
    }

    let cid =
        CategoryId::parse(first).ok_or_else(|| ColorError::UnknownObject(first.to_string()))?;
    Ok((Object::Simple(cid), 1))
}

/// `color`/`mono` statement body.
fn parse_color(
    engine: &mut ColorEngine,
    args: &[String],
    is_color: bool,
) -> Result<CommandOutcome, ColorError> {
    let command: &'static str = if is_color { "color" } else { "mono" };

    // A bare `color` is a query.
    if args.is_empty() {
        return Ok(CommandOutcome::Dump(dump::dump_config(engine)));
    }

    let (object, consumed) = parse_object(args, command)?;
    let mut rest = &args[consumed..];

    // Attribute keywords come before the colors, greedily.
    let mut attrs = AttrFlags::empty();
    let mut saw_attr = false;
    while let Some(token) = rest.first() {
        match AttrFlags::parse_keyword(token) {
            Some(flags) => {
                attrs |= flags;
                saw_attr = true;
                rest = &rest[1..];
            }
            None => break,
        }
    }

    let (fg, bg) = if is_color {
        let fg_token = rest
            .first()
            .ok_or(ColorError::TooFewArguments { command })?;
        let bg_token = rest
            .get(1)
            .ok_or(ColorError::TooFewArguments { command })?;
        rest = &rest[2..];
        (Color::parse(fg_token)?, Color::parse(bg_token)?)
    } else {
        // `mono` takes attributes only; reject a trailing non-keyword
        // unless the object can treat it as a pattern.
        if !saw_attr {
            return Err(ColorError::TooFewArguments { command });
        }
        (Color::Default, Color::Default)
    };

    // The tree glyph column combines with the line's default background at
    // render time, so it needs default-color support even with explicit
    // colors.
    if is_color && !engine.caps().default_colors {
        let tree = object == Object::Simple(CategoryId::Tree);
        if fg.is_default() || bg.is_default() || tree {
            return Err(ColorError::CapabilityUnsupported);
        }
    }

    match object {
        Object::Quoted(depth) => {
            if !rest.is_empty() {
                return Err(ColorError::TooManyArguments { command });
            }
            engine.set_quoted(depth, fg, bg, attrs)?;
        }
        Object::Simple(cid) if cid.has_pattern() => {
            // Status takes an optional pattern plus an optional capture
            // group; other patterned categories default to matching
            // everything when no pattern is given.
            let (pattern, match_group, extra) = if cid == CategoryId::Status {
                match rest {
                    [] => (None, 0, &[] as &[String]),
                    [pattern] => (Some(pattern.as_str()), 0, &[] as &[String]),
                    [pattern, group, extra @ ..] => {
                        let group: usize =
                            group.parse().map_err(|_| ColorError::InvalidNumber {
                                command,
                                value: group.to_string(),
                            })?;
                        (Some(pattern.as_str()), group, extra)
                    }
                }
            } else {
                match rest {
                    [] => (Some(".*"), 0, &[] as &[String]),
                    [pattern, extra @ ..] => (Some(pattern.as_str()), 0, extra),
                }
            };
            if !extra.is_empty() {
                return Err(ColorError::TooManyArguments { command });
            }
            match pattern {
                // `color status ...` without a pattern sets the default.
                None => engine.set_simple(cid, fg, bg, attrs),
                // A lone `*` means "match anything".
                Some("*") => engine.add_rule(cid, ".*", fg, bg, attrs, match_group)?,
                Some(pattern) => engine.add_rule(cid, pattern, fg, bg, attrs, match_group)?,
            }
        }
        Object::Simple(cid) => {
            if !rest.is_empty() {
                return Err(ColorError::TooManyArguments { command });
            }
            engine.set_simple(cid, fg, bg, attrs);
        }
    }

    Ok(CommandOutcome::Applied)
}

/// `uncolor`/`unmono` statement body.
///
/// With `apply` false (`unmono`) the statement is validated but nothing
/// is removed.
fn parse_uncolor(
    engine: &mut ColorEngine,
    args: &[String],
    apply: bool,
) -> Result<CommandOutcome, ColorError> {
    let command: &'static str = if apply { "uncolor" } else { "unmono" };

    let first = args
        .first()
        .ok_or(ColorError::TooFewArguments { command })?;

    // `uncolor *` resets the world.
    if first.as_str() == "*" {
        if args.len() > 1 {
            return Err(ColorError::TooManyArguments { command });
        }
        if apply {
            engine.clear_all();
        }
        return Ok(CommandOutcome::Applied);
    }

    let (object, consumed) = parse_object(args, command)?;
    let rest = &args[consumed..];

    match object {
        Object::Quoted(depth) => {
            if !rest.is_empty() {
                return Err(ColorError::TooManyArguments { command });
            }
            if apply {
                engine.reset_quoted(depth)?;
            }
        }
        Object::Simple(cid) if cid.has_pattern() => {
            // `uncolor status` with no pattern drops the simple default;
            // for other patterned categories (and `CAT *`) it clears the
            // rule list.
            if rest.is_empty() && cid == CategoryId::Status {
                if apply {
                    engine.reset_simple(cid);
                }
            } else if rest.is_empty() || (rest.len() == 1 && rest[0] == "*") {
                if apply {
                    engine.clear_rules(cid);
                }
            } else if apply {
                for pattern in rest {
                    // Removing an uninstalled pattern is not an error.
                    engine.remove_rule(cid, pattern);
                }
            }
        }
        Object::Simple(cid) => {
            if !rest.is_empty() {
                return Err(ColorError::TooManyArguments { command });
            }
            if apply {
                engine.reset_simple(cid);
            }
        }
    }

    Ok(CommandOutcome::Applied)
}
