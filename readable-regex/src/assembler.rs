//! Pattern text assembler
//!
//! Turns every logical building block into engine syntax. Each block is
//! emitted so that a following repetition binds to the whole block: single
//! token escapes are already atomic, everything longer is wrapped in a
//! non-capturing group.
//!
//! The assembler does not check call order; see [`crate::order`] for that
//! and [`crate::ReadableRegex`] for the combination of both.

use std::fmt;

use tracing::debug;

use crate::error::{ReadableRegexError, Result};
use crate::flags::PatternFlags;
use crate::pattern::Pattern;

/// A validated capture group name: a letter followed by letters or digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupName(String);

impl GroupName {
    /// Validate `name` against `[A-Za-z][A-Za-z0-9]*`
    pub fn new(name: &str) -> Result<Self> {
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric());
        if !valid {
            return Err(ReadableRegexError::invalid_argument(format!(
                "the group name '{name}' is not valid: it should start with a letter \
                 and only contain letters and digits"
            )));
        }
        Ok(GroupName(name.to_string()))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A repetition modifier with validated bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    /// `+`
    OneOrMore,
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `{min}`, `{min,}` or `{min,max}`
    Bounded {
        /// Lower bound
        min: u32,
        /// Upper bound, `None` for unbounded
        max: Option<u32>,
    },
}

impl Repetition {
    /// Exactly `n` times, `n` must be at least one
    pub fn exactly(n: u32) -> Result<Self> {
        Repetition::between(n, n)
    }

    /// At least `n` times
    pub fn at_least(n: u32) -> Self {
        Repetition::Bounded { min: n, max: None }
    }

    /// At most `n` times, `n` must be at least one
    pub fn at_most(n: u32) -> Result<Self> {
        Repetition::between(0, n)
    }

    /// Between `n` and `m` times (inclusive), with `m >= 1` and `n <= m`
    pub fn between(n: u32, m: u32) -> Result<Self> {
        if m == 0 {
            return Err(ReadableRegexError::invalid_argument(
                "the number of times the block should repeat must be larger than zero",
            ));
        }
        if n > m {
            return Err(ReadableRegexError::invalid_argument(format!(
                "the lower bound {n} is larger than the upper bound {m}"
            )));
        }
        Ok(Repetition::Bounded {
            min: n,
            max: Some(m),
        })
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repetition::OneOrMore => write!(f, "+"),
            Repetition::Optional => write!(f, "?"),
            Repetition::ZeroOrMore => write!(f, "*"),
            Repetition::Bounded { min, max: None } => write!(f, "{{{min},}}"),
            Repetition::Bounded {
                min,
                max: Some(max),
            } if min == max => write!(f, "{{{min}}}"),
            Repetition::Bounded {
                min,
                max: Some(max),
            } => write!(f, "{{{min},{max}}}"),
        }
    }
}

/// The kinds of groups that can be opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// A capturing group, optionally named
    Capturing(Option<GroupName>),
    /// `(?:`
    NonCapturing,
    /// `(?<=`
    PositiveLookbehind,
    /// `(?<!`
    NegativeLookbehind,
    /// `(?=`
    PositiveLookahead,
    /// `(?!`
    NegativeLookahead,
}

impl GroupKind {
    fn opening_token(&self) -> String {
        match self {
            GroupKind::Capturing(None) => "(".to_string(),
            GroupKind::Capturing(Some(name)) => format!("(?<{name}>"),
            GroupKind::NonCapturing => "(?:".to_string(),
            GroupKind::PositiveLookbehind => "(?<=".to_string(),
            GroupKind::NegativeLookbehind => "(?<!".to_string(),
            GroupKind::PositiveLookahead => "(?=".to_string(),
            GroupKind::NegativeLookahead => "(?!".to_string(),
        }
    }
}

/// Accumulates pattern text and the metadata needed to finish it
///
/// Not synchronized: one assembler belongs to one builder and is mutated
/// from one thread at a time.
#[derive(Debug, Clone, Default)]
pub struct PatternAssembler {
    text: String,
    group_names: Vec<Option<String>>,
    open_groups: usize,
    force_multiline: bool,
}

impl PatternAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        PatternAssembler::default()
    }

    /// The pattern text assembled so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Names of the capturing groups opened so far, `None` for unnamed ones
    pub fn group_names(&self) -> &[Option<String>] {
        &self.group_names
    }

    /// Number of groups opened and not yet closed
    pub fn open_groups(&self) -> usize {
        self.open_groups
    }

    /// Whether a line anchor requires the multiline flag
    pub fn requires_multiline(&self) -> bool {
        self.force_multiline
    }

    /// Append `regex` without any processing
    pub fn raw(&mut self, regex: &str) {
        self.text.push_str(regex);
    }

    /// Embed a finished pattern as a non-capturing group.
    ///
    /// The embedded pattern keeps its own flags inside the group. Its group
    /// names are not added to this assembler's list.
    pub fn embed(&mut self, pattern: &Pattern) {
        let embedded = pattern.enabled_flags().scoped_group(pattern.as_str());
        self.text.push_str(&embedded);
    }

    /// A literal string, every meta character escaped
    pub fn literal(&mut self, value: &str) {
        self.text.push_str("(?:");
        self.text.push_str(&fancy_regex::escape(value));
        self.text.push(')');
    }

    pub fn digit(&mut self) {
        self.text.push_str(r"\d");
    }

    pub fn whitespace(&mut self) {
        self.text.push_str(r"\s");
    }

    pub fn tab(&mut self) {
        self.text.push_str(r"\t");
    }

    pub fn word_character(&mut self) {
        self.text.push_str(r"\w");
    }

    pub fn non_word_character(&mut self) {
        self.text.push_str(r"\W");
    }

    pub fn word_boundary(&mut self) {
        self.text.push_str(r"\b");
    }

    pub fn non_word_boundary(&mut self) {
        self.text.push_str(r"\B");
    }

    pub fn any_character(&mut self) {
        self.text.push('.');
    }

    pub fn start_of_input(&mut self) {
        self.text.push_str(r"\A");
    }

    pub fn end_of_input(&mut self) {
        self.text.push_str(r"\z");
    }

    /// `^` as a line anchor; finishing will enable multiline
    pub fn start_of_line(&mut self) {
        self.force_multiline = true;
        self.text.push_str("(?:^)");
    }

    /// `$` as a line anchor; finishing will enable multiline
    pub fn end_of_line(&mut self) {
        self.force_multiline = true;
        self.text.push_str("(?:$)");
    }

    /// A class of inclusive ranges given as consecutive boundary pairs,
    /// e.g. `['a', 'z', '0', '9']` for `[a-z0-9]`
    pub fn range(&mut self, boundaries: &[char]) -> Result<()> {
        let class = range_class(boundaries, false)?;
        self.text.push_str(&class);
        Ok(())
    }

    /// The negation of [`PatternAssembler::range`]
    pub fn not_in_range(&mut self, boundaries: &[char]) -> Result<()> {
        let class = range_class(boundaries, true)?;
        self.text.push_str(&class);
        Ok(())
    }

    /// Any single character of `characters`
    pub fn any_character_of(&mut self, characters: &str) -> Result<()> {
        let class = set_class(characters, false)?;
        self.text.push_str(&class);
        Ok(())
    }

    /// Any single character not in `characters`
    pub fn any_character_except(&mut self, characters: &str) -> Result<()> {
        let class = set_class(characters, true)?;
        self.text.push_str(&class);
        Ok(())
    }

    /// An alternation of finished patterns, wrapped in a non-capturing group
    pub fn one_of<'a, I>(&mut self, alternatives: I)
    where
        I: IntoIterator<Item = &'a Pattern>,
    {
        let union = alternatives
            .into_iter()
            .map(|p| {
                let flags = p.enabled_flags();
                if flags.is_empty() {
                    p.as_str().to_string()
                } else {
                    flags.scoped_group(p.as_str())
                }
            })
            .collect::<Vec<_>>()
            .join("|");
        self.text.push_str("(?:");
        self.text.push_str(&union);
        self.text.push(')');
    }

    pub fn repeat(&mut self, repetition: Repetition) {
        self.text.push_str(&repetition.to_string());
    }

    pub fn reluctant(&mut self) {
        self.text.push('?');
    }

    pub fn possessive(&mut self) {
        self.text.push('+');
    }

    /// Open a group; capturing groups are recorded in the group name list
    pub fn start_group(&mut self, kind: GroupKind) {
        self.text.push_str(&kind.opening_token());
        if let GroupKind::Capturing(name) = kind {
            self.group_names
                .push(name.map(|n| n.as_str().to_string()));
        }
        self.open_groups += 1;
    }

    /// Close the innermost group, whatever kind opened it
    pub fn end_group(&mut self) {
        self.text.push(')');
        self.open_groups = self.open_groups.saturating_sub(1);
    }

    /// Compile the assembled text with `flags`, adding multiline when a
    /// line anchor was used
    pub fn finish(&self, flags: PatternFlags) -> Result<Pattern> {
        let mut flags = flags;
        if self.force_multiline && !flags.contains(PatternFlags::MULTILINE) {
            flags |= PatternFlags::MULTILINE;
        }
        debug!(pattern = %self.text, ?flags, "finishing pattern");
        Pattern::compile(self.text.clone(), flags, self.group_names.clone())
    }
}

/// Characters with a meaning inside a character class
fn push_class_char(out: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
        out.push('\\');
    }
    out.push(c);
}

fn range_class(boundaries: &[char], negated: bool) -> Result<String> {
    if boundaries.is_empty() {
        return Err(ReadableRegexError::invalid_argument(
            "an empty range is pointless, supply boundaries",
        ));
    }
    if boundaries.len() % 2 != 0 {
        return Err(ReadableRegexError::invalid_argument(
            "supply an even number of boundaries",
        ));
    }

    let mut class = String::from(if negated { "[^" } else { "[" });
    for pair in boundaries.chunks_exact(2) {
        let (low, high) = (pair[0], pair[1]);
        if low > high {
            return Err(ReadableRegexError::invalid_argument(format!(
                "range boundaries '{low}' and '{high}' are out of order"
            )));
        }
        push_class_char(&mut class, low);
        class.push('-');
        push_class_char(&mut class, high);
    }
    class.push(']');
    Ok(class)
}

fn set_class(characters: &str, negated: bool) -> Result<String> {
    if characters.is_empty() {
        return Err(ReadableRegexError::invalid_argument(
            "an empty character set is pointless, supply characters",
        ));
    }

    let mut class = String::from(if negated { "[^" } else { "[" });
    for c in characters.chars() {
        push_class_char(&mut class, c);
    }
    class.push(']');
    Ok(class)
}
