//! Style attribute flags.
//!
//! Attributes are the non-color half of a [`Style`](crate::style::Style):
//! bold, underline, italic, blink and reverse video. They are kept as a
//! bitmask so layered styles can be merged with a single union.

bitflags::bitflags! {
    /// Attribute flags for styled text.
    #[repr(transparent)]
    #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct AttrFlags: u8 {
        /// Bold text.
        const BOLD      = 0b0000_0001;
        /// Underlined text.
        const UNDERLINE = 0b0000_0010;
        /// Italic text.
        const ITALIC    = 0b0000_0100;
        /// Blinking text.
        const BLINK     = 0b0000_1000;
        /// Reverse video (swap fg/bg).
        const REVERSE   = 0b0001_0000;
    }
}

impl std::fmt::Debug for AttrFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Keyword/flag pairs in the order they appear in configuration dumps.
const KEYWORDS: &[(&str, AttrFlags)] = &[
    ("blink", AttrFlags::BLINK),
    ("bold", AttrFlags::BOLD),
    ("italic", AttrFlags::ITALIC),
    ("reverse", AttrFlags::REVERSE),
    ("underline", AttrFlags::UNDERLINE),
];

impl AttrFlags {
    /// Parse a single attribute keyword from the configuration grammar.
    ///
    /// `none` and `normal` are accepted and mean "no attributes". Returns
    /// `None` for tokens that are not attribute keywords, so the command
    /// parser can fall through to color parsing.
    pub fn parse_keyword(token: &str) -> Option<AttrFlags> {
        if token.eq_ignore_ascii_case("none") || token.eq_ignore_ascii_case("normal") {
            return Some(AttrFlags::empty());
        }
        KEYWORDS
            .iter()
            .find(|(name, _)| token.eq_ignore_ascii_case(name))
            .map(|&(_, flags)| flags)
    }

    /// Space-separated keyword list, e.g. `"bold underline"`.
    ///
    /// Empty flags produce an empty string; the dump writer omits the field
    /// entirely in that case so the output stays re-parseable.
    pub fn keyword_list(self) -> String {
        let mut out = String::new();
        for &(name, flags) in KEYWORDS {
            if self.contains(flags) {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(name);
            }
        }
        out
    }
}
