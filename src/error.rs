//! Error types for configuration and resource handling.

/// Errors produced by the color engine and the command interpreter.
///
/// Every variant is recoverable at the statement level: a failed statement
/// mutates nothing and later statements still apply (see
/// [`run_config`](crate::command::run_config)).
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    /// The statement keyword is not `color`, `mono`, `uncolor` or `unmono`.
    #[error("{0}: unknown command")]
    UnknownCommand(String),
    /// The category token does not name a known display category.
    #[error("{0}: no such object")]
    UnknownObject(String),
    /// The color token is not a recognized color name.
    #[error("{0}: no such color")]
    UnknownColor(String),
    /// The attribute token is not a recognized attribute keyword.
    #[error("{0}: no such attribute")]
    UnknownAttribute(String),
    /// The statement has fewer tokens than its shape requires.
    #[error("{command}: too few arguments")]
    TooFewArguments {
        /// Command keyword, for the error message.
        command: &'static str,
    },
    /// The statement has trailing tokens its shape does not allow.
    #[error("{command}: too many arguments")]
    TooManyArguments {
        /// Command keyword, for the error message.
        command: &'static str,
    },
    /// A numeric argument (quote depth, match group) failed to parse.
    #[error("{command}: invalid number: {value}")]
    InvalidNumber {
        /// Command keyword, for the error message.
        command: &'static str,
        /// The offending token.
        value: String,
    },
    /// Quote depth outside the supported range.
    #[error("quote depth {0} out of range")]
    QuoteDepthRange(usize),
    /// The pattern failed to compile; the rule was not installed.
    #[error("bad pattern: {0}")]
    PatternCompile(#[from] regex::Error),
    /// The capture-group index exceeds the pattern's group count.
    #[error("match group {group} out of range for pattern {pattern:?}")]
    MatchGroupRange {
        /// Requested capture group.
        group: usize,
        /// Raw pattern text.
        pattern: String,
    },
    /// No free or reclaimable color-pair slot is available.
    #[error("no free color pairs")]
    ResourceExhausted,
    /// The terminal cannot mix default and explicit colors.
    #[error("default colors not supported")]
    CapabilityUnsupported,
}

/// Coarse classification matching the recovery strategies callers care
/// about, independent of the concrete variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or unknown statement; rejected, nothing mutated.
    Config,
    /// Invalid pattern syntax; rule not installed.
    PatternCompile,
    /// Color-pair pool exhausted.
    ResourceExhausted,
    /// Terminal capability missing for the requested combination.
    CapabilityUnsupported,
}

impl ColorError {
    /// Classify this error into the four recovery classes.
    pub fn class(&self) -> ErrorClass {
        match self {
            ColorError::PatternCompile(_) => ErrorClass::PatternCompile,
            ColorError::ResourceExhausted => ErrorClass::ResourceExhausted,
            ColorError::CapabilityUnsupported => ErrorClass::CapabilityUnsupported,
            _ => ErrorClass::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_variants() {
        assert_eq!(
            ColorError::UnknownObject("foo".into()).class(),
            ErrorClass::Config
        );
        assert_eq!(
            ColorError::ResourceExhausted.class(),
            ErrorClass::ResourceExhausted
        );
        assert_eq!(
            ColorError::CapabilityUnsupported.class(),
            ErrorClass::CapabilityUnsupported
        );
    }
}
