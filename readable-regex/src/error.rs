//! Error types for pattern construction
//!
//! Errors are categorized by their source: an illegal order of builder
//! calls, a structurally invalid argument, the regex engine rejecting the
//! assembled text, or a failure while instantiating a value from a match.

use thiserror::Error;

/// The main error type of the builder
#[derive(Error, Debug)]
pub enum ReadableRegexError {
    /// A builder method was called at a point where it is not allowed
    #[error("incorrect construction: {0}")]
    Construction(#[from] ConstructionError),

    /// An argument is structurally invalid (bad group name, bounds, ranges)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The engine rejected the assembled pattern text
    #[error("engine rejected pattern: {0}")]
    Engine(#[from] fancy_regex::Error),

    /// A value could not be created from the groups of a match
    #[error("instantiation failed: {0}")]
    Instantiation(#[from] InstantiationError),
}

impl ReadableRegexError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        ReadableRegexError::InvalidArgument(message.into())
    }
}

/// Illegal moves rejected by the order checker
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionError {
    /// A repetition directly after another repetition, or as the first call
    #[error(
        "a repetition cannot follow another repetition, a group start, or the start of the pattern"
    )]
    RepetitionNotAllowed,

    /// `reluctant` or `possessive` without a repetition right before it
    #[error("reluctant and possessive must directly follow a repetition")]
    ReluctantWithoutRepetition,

    /// `end_group` while no group is open
    #[error("no open group to close")]
    NoOpenGroup,

    /// Finishing while groups are still open
    #[error("{0} unclosed group(s) remain, close them with end_group")]
    UnclosedGroups(usize),
}

/// Errors produced while filling a value from named groups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstantiationError {
    /// The type needs a group the pattern never opened
    #[error("pattern has no group named '{0}'")]
    MissingGroup(String),

    /// The data is not matched by the pattern over its whole length
    #[error("pattern does not match the complete input")]
    NoExactMatch,

    /// The group exists but did not take part in the match
    #[error("group '{0}' did not participate in the match")]
    UnmatchedGroup(String),

    /// The captured text could not be converted to the requested type
    #[error("cannot convert group '{name}' value '{value}': {reason}")]
    Conversion {
        /// Name of the group
        name: String,
        /// Captured text
        value: String,
        /// Conversion failure message
        reason: String,
    },
}

/// Result type alias for builder operations
pub type Result<T> = std::result::Result<T, ReadableRegexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_error_display() {
        let err = ConstructionError::UnclosedGroups(2);
        assert_eq!(
            err.to_string(),
            "2 unclosed group(s) remain, close them with end_group"
        );
    }

    #[test]
    fn test_regex_error_from_construction_error() {
        let err: ReadableRegexError = ConstructionError::NoOpenGroup.into();
        assert_eq!(
            err.to_string(),
            "incorrect construction: no open group to close"
        );
        assert!(matches!(
            err,
            ReadableRegexError::Construction(ConstructionError::NoOpenGroup)
        ));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = ReadableRegexError::invalid_argument("bad bounds");
        assert_eq!(err.to_string(), "invalid argument: bad bounds");
    }

    #[test]
    fn test_conversion_error_display() {
        let err = InstantiationError::Conversion {
            name: "age".to_string(),
            value: "x".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot convert group 'age' value 'x': invalid digit found in string"
        );
    }

    #[test]
    fn test_regex_error_from_instantiation_error() {
        let err: ReadableRegexError = InstantiationError::NoExactMatch.into();
        assert_eq!(
            err.to_string(),
            "instantiation failed: pattern does not match the complete input"
        );
    }
}
