//! Display categories.
//!
//! A category is a named display role (header, status bar, thread tree,
//! ...) with its own default style. The set is closed: general UI roles,
//! a disjoint compose-view sub-enumeration, and the quote-bearing `Quoted`
//! category. Some categories additionally carry an ordered list of pattern
//! rules; `Status` is the only one that supports pattern rules *and* a
//! simple default at the same time.

/// Compose-view display roles, selected by the two-token `compose X` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComposeCategory {
    /// Compose-view header fields.
    Header,
    /// Encryption is possible.
    SecurityEncrypt,
    /// Signing is possible.
    SecuritySign,
    /// Both encryption and signing are possible.
    SecurityBoth,
    /// No security operation is possible.
    SecurityNone,
}

/// A display category.
#[allow(missing_docs)] // Variant names mirror the configuration tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryId {
    Attachment,
    AttachHeaders,
    Body,
    Bold,
    Error,
    Hdrdefault,
    Header,
    Index,
    IndexAuthor,
    IndexCollapsed,
    IndexDate,
    IndexFlags,
    IndexLabel,
    IndexNumber,
    IndexSize,
    IndexSubject,
    IndexTag,
    IndexTags,
    Indicator,
    Italic,
    Markers,
    Message,
    Normal,
    Options,
    Progress,
    Prompt,
    /// Quoted text; carries a quote depth at resolution time.
    Quoted,
    Search,
    SidebarBackground,
    SidebarDivider,
    SidebarFlagged,
    SidebarHighlight,
    SidebarIndicator,
    SidebarNew,
    SidebarOrdinary,
    SidebarSpoolfile,
    SidebarUnread,
    Signature,
    Status,
    StripeEven,
    StripeOdd,
    Tilde,
    Tree,
    Underline,
    Warning,
    /// Compose-view roles, a disjoint sub-enumeration.
    Compose(ComposeCategory),
}

/// Mapping of configuration tokens to general category ids.
const FIELDS: &[(&str, CategoryId)] = &[
    ("attachment", CategoryId::Attachment),
    ("attach_headers", CategoryId::AttachHeaders),
    ("body", CategoryId::Body),
    ("bold", CategoryId::Bold),
    ("error", CategoryId::Error),
    ("hdrdefault", CategoryId::Hdrdefault),
    ("header", CategoryId::Header),
    ("index", CategoryId::Index),
    ("index_author", CategoryId::IndexAuthor),
    ("index_collapsed", CategoryId::IndexCollapsed),
    ("index_date", CategoryId::IndexDate),
    ("index_flags", CategoryId::IndexFlags),
    ("index_label", CategoryId::IndexLabel),
    ("index_number", CategoryId::IndexNumber),
    ("index_size", CategoryId::IndexSize),
    ("index_subject", CategoryId::IndexSubject),
    ("index_tag", CategoryId::IndexTag),
    ("index_tags", CategoryId::IndexTags),
    ("indicator", CategoryId::Indicator),
    ("italic", CategoryId::Italic),
    ("markers", CategoryId::Markers),
    ("message", CategoryId::Message),
    ("normal", CategoryId::Normal),
    ("options", CategoryId::Options),
    ("progress", CategoryId::Progress),
    ("prompt", CategoryId::Prompt),
    ("quoted", CategoryId::Quoted),
    ("search", CategoryId::Search),
    ("sidebar_background", CategoryId::SidebarBackground),
    ("sidebar_divider", CategoryId::SidebarDivider),
    ("sidebar_flagged", CategoryId::SidebarFlagged),
    ("sidebar_highlight", CategoryId::SidebarHighlight),
    ("sidebar_indicator", CategoryId::SidebarIndicator),
    ("sidebar_new", CategoryId::SidebarNew),
    ("sidebar_ordinary", CategoryId::SidebarOrdinary),
    ("sidebar_spoolfile", CategoryId::SidebarSpoolfile),
    ("sidebar_unread", CategoryId::SidebarUnread),
    ("signature", CategoryId::Signature),
    ("status", CategoryId::Status),
    ("stripe_even", CategoryId::StripeEven),
    ("stripe_odd", CategoryId::StripeOdd),
    ("tilde", CategoryId::Tilde),
    ("tree", CategoryId::Tree),
    ("underline", CategoryId::Underline),
    ("warning", CategoryId::Warning),
];

/// Mapping of compose tokens to their sub-enumeration.
const COMPOSE_FIELDS: &[(&str, ComposeCategory)] = &[
    ("header", ComposeCategory::Header),
    ("security_encrypt", ComposeCategory::SecurityEncrypt),
    ("security_sign", ComposeCategory::SecuritySign),
    ("security_both", ComposeCategory::SecurityBoth),
    ("security_none", ComposeCategory::SecurityNone),
];

impl ComposeCategory {
    /// Parse the second token of a `compose X` category.
    pub fn parse(token: &str) -> Option<ComposeCategory> {
        COMPOSE_FIELDS
            .iter()
            .find(|(name, _)| token.eq_ignore_ascii_case(name))
            .map(|&(_, id)| id)
    }

    /// Configuration token for this role (without the `compose` prefix).
    pub fn name(self) -> &'static str {
        COMPOSE_FIELDS
            .iter()
            .find(|&&(_, id)| id == self)
            .map_or("UNKNOWN", |&(name, _)| name)
    }
}

impl CategoryId {
    /// Every category, in dump order. Compose roles come last.
    pub const ALL: &'static [CategoryId] = &[
        CategoryId::Attachment,
        CategoryId::AttachHeaders,
        CategoryId::Body,
        CategoryId::Bold,
        CategoryId::Error,
        CategoryId::Hdrdefault,
        CategoryId::Header,
        CategoryId::Index,
        CategoryId::IndexAuthor,
        CategoryId::IndexCollapsed,
        CategoryId::IndexDate,
        CategoryId::IndexFlags,
        CategoryId::IndexLabel,
        CategoryId::IndexNumber,
        CategoryId::IndexSize,
        CategoryId::IndexSubject,
        CategoryId::IndexTag,
        CategoryId::IndexTags,
        CategoryId::Indicator,
        CategoryId::Italic,
        CategoryId::Markers,
        CategoryId::Message,
        CategoryId::Normal,
        CategoryId::Options,
        CategoryId::Progress,
        CategoryId::Prompt,
        CategoryId::Quoted,
        CategoryId::Search,
        CategoryId::SidebarBackground,
        CategoryId::SidebarDivider,
        CategoryId::SidebarFlagged,
        CategoryId::SidebarHighlight,
        CategoryId::SidebarIndicator,
        CategoryId::SidebarNew,
        CategoryId::SidebarOrdinary,
        CategoryId::SidebarSpoolfile,
        CategoryId::SidebarUnread,
        CategoryId::Signature,
        CategoryId::Status,
        CategoryId::StripeEven,
        CategoryId::StripeOdd,
        CategoryId::Tilde,
        CategoryId::Tree,
        CategoryId::Underline,
        CategoryId::Warning,
        CategoryId::Compose(ComposeCategory::Header),
        CategoryId::Compose(ComposeCategory::SecurityEncrypt),
        CategoryId::Compose(ComposeCategory::SecuritySign),
        CategoryId::Compose(ComposeCategory::SecurityBoth),
        CategoryId::Compose(ComposeCategory::SecurityNone),
    ];

    /// Parse a single general-category token.
    ///
    /// The `compose X` and `quotedN` forms are multi-token and handled by
    /// the command interpreter, not here.
    pub fn parse(token: &str) -> Option<CategoryId> {
        FIELDS
            .iter()
            .find(|(name, _)| token.eq_ignore_ascii_case(name))
            .map(|&(_, id)| id)
    }

    /// Whether this category owns an ordered pattern rule list.
    pub fn has_pattern(self) -> bool {
        matches!(
            self,
            CategoryId::Attachment
                | CategoryId::Body
                | CategoryId::Header
                | CategoryId::Index
                | CategoryId::IndexAuthor
                | CategoryId::IndexCollapsed
                | CategoryId::IndexDate
                | CategoryId::IndexFlags
                | CategoryId::IndexLabel
                | CategoryId::IndexNumber
                | CategoryId::IndexSize
                | CategoryId::IndexSubject
                | CategoryId::IndexTag
                | CategoryId::IndexTags
                | CategoryId::Status
        )
    }

    /// Whether resolution for this category takes a quote depth.
    #[inline]
    pub fn is_quoted(self) -> bool {
        self == CategoryId::Quoted
    }

    /// Configuration token for this category.
    ///
    /// Compose roles return their bare sub-token; [`std::fmt::Display`]
    /// prepends the `compose ` prefix for dumps.
    pub fn name(self) -> &'static str {
        if let CategoryId::Compose(sub) = self {
            return sub.name();
        }
        FIELDS
            .iter()
            .find(|&&(_, id)| id == self)
            .map_or("UNKNOWN", |&(name, _)| name)
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryId::Compose(sub) => write!(f, "compose {}", sub.name()),
            other => write!(f, "{}", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_general_names() {
        assert_eq!(CategoryId::parse("header"), Some(CategoryId::Header));
        assert_eq!(CategoryId::parse("index_author"), Some(CategoryId::IndexAuthor));
        assert_eq!(CategoryId::parse("bogus"), None);
    }

    #[test]
    fn parse_compose_names() {
        assert_eq!(
            ComposeCategory::parse("security_both"),
            Some(ComposeCategory::SecurityBoth)
        );
        assert_eq!(ComposeCategory::parse("body"), None);
    }

    #[test]
    fn status_is_the_only_patterned_default() {
        assert!(CategoryId::Status.has_pattern());
        assert!(!CategoryId::Normal.has_pattern());
        assert!(!CategoryId::Quoted.has_pattern());
    }

    #[test]
    fn every_category_round_trips_through_its_name() {
        for &cid in CategoryId::ALL {
            match cid {
                CategoryId::Compose(sub) => {
                    assert_eq!(ComposeCategory::parse(sub.name()), Some(sub));
                }
                other => assert_eq!(CategoryId::parse(other.name()), Some(other)),
            }
        }
    }

    #[test]
    fn display_prefixes_compose() {
        let cid = CategoryId::Compose(ComposeCategory::SecuritySign);
        assert_eq!(cid.to_string(), "compose security_sign");
        assert_eq!(CategoryId::Tree.to_string(), "tree");
    }
}
