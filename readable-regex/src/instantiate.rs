//! Creating values from the named groups of a match
//!
//! A type declares which named groups it needs through [`FromGroups`] and
//! builds itself from a [`MatchedGroups`] view. [`instantiate`] checks the
//! pattern provides every declared group, requires a whole-input match and
//! hands the groups to the type.
//!
//! # Example
//! ```
//! use readable_regex::{instantiate, regex, FromGroups, MatchedGroups, Result};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl FromGroups for Point {
//!     const GROUP_NAMES: &'static [&'static str] = &["x", "y"];
//!
//!     fn from_groups(groups: &MatchedGroups<'_>) -> Result<Self> {
//!         Ok(Point {
//!             x: groups.parse("x")?,
//!             y: groups.parse("y")?,
//!         })
//!     }
//! }
//!
//! let number = regex().literal("-").optional()?.digit().one_or_more()?;
//! let pattern = regex()
//!     .named_group("x", &number)?
//!     .literal(",")
//!     .named_group("y", &number)?
//!     .build()?;
//!
//! let point: Point = instantiate(&pattern, "3,-4")?;
//! assert_eq!((point.x, point.y), (3, -4));
//! # Ok::<(), readable_regex::ReadableRegexError>(())
//! ```

use std::fmt::Display;
use std::str::FromStr;

use fancy_regex::Captures;

use crate::error::{InstantiationError, Result};
use crate::pattern::Pattern;

/// A type that can be built from the named groups of a match
pub trait FromGroups: Sized {
    /// Group names the type reads; each must be opened on the pattern
    const GROUP_NAMES: &'static [&'static str];

    /// Build the value from the matched groups
    fn from_groups(groups: &MatchedGroups<'_>) -> Result<Self>;
}

/// Read access to the groups of a whole-input match
pub struct MatchedGroups<'t> {
    captures: Captures<'t>,
}

impl<'t> MatchedGroups<'t> {
    /// Text of a named group, `None` if it did not take part in the match
    pub fn get(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    /// Text of a named group that must have taken part in the match
    pub fn require(&self, name: &str) -> Result<&'t str> {
        self.get(name)
            .ok_or_else(|| InstantiationError::UnmatchedGroup(name.to_string()).into())
    }

    /// Parse the text of a named group into `T`
    pub fn parse<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.require(name)?;
        value.parse().map_err(|err: T::Err| {
            InstantiationError::Conversion {
                name: name.to_string(),
                value: value.to_string(),
                reason: err.to_string(),
            }
            .into()
        })
    }
}

/// Create a `T` from `data`, which must be matched by `pattern` completely
pub fn instantiate<T: FromGroups>(pattern: &Pattern, data: &str) -> Result<T> {
    if let Some(missing) = T::GROUP_NAMES.iter().find(|name| !pattern.has_group(name)) {
        return Err(InstantiationError::MissingGroup(missing.to_string()).into());
    }

    let captures = pattern
        .exact_captures(data)?
        .ok_or(InstantiationError::NoExactMatch)?;
    T::from_groups(&MatchedGroups { captures })
}
