//! Finished, immutable patterns
//!
//! A [`Pattern`] owns the assembled text, the flags it was compiled with
//! and the ordered capture group names. It never changes after it has been
//! created and can be shared between threads freely.

use std::fmt;

use fancy_regex::{CaptureMatches, Captures, Match, Matches, Regex};

use crate::error::Result;
use crate::flags::PatternFlags;

/// A compiled pattern produced by finishing a builder
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    flags: PatternFlags,
    groups: Vec<Option<String>>,
    search: Regex,
    exact: Regex,
}

impl Pattern {
    /// Hand `text` and `flags` to the engine.
    ///
    /// Two engine handles are compiled: one for searching and one anchored
    /// to both ends of the input for whole-input matching.
    pub(crate) fn compile(
        text: String,
        flags: PatternFlags,
        groups: Vec<Option<String>>,
    ) -> Result<Self> {
        let search = Regex::new(&flags.apply_inline(&text))?;
        let exact = Regex::new(&flags.apply_inline(&format!(r"\A(?:{text})\z")))?;
        Ok(Pattern {
            text,
            flags,
            groups,
            search,
            exact,
        })
    }

    /// The pattern text, without the inline flag prefix
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Flags the engine compiled this pattern with.
    ///
    /// Includes flags the builder enabled on its own, such as multiline
    /// for line anchors. This is the set recorded at compile time, as the
    /// engine does not report its active flags back.
    pub fn enabled_flags(&self) -> PatternFlags {
        self.flags
    }

    /// Capture group names in the order the groups were opened, `None` for
    /// unnamed groups
    pub fn groups(&self) -> &[Option<String>] {
        &self.groups
    }

    /// Number of capture groups opened directly on the builder
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Whether a group with this name was opened
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.iter().flatten().any(|g| g == name)
    }

    /// Check if the pattern matches the complete text
    pub fn matches_text_exactly(&self, text: &str) -> Result<bool> {
        Ok(self.exact.is_match(text)?)
    }

    /// Check if the pattern matches anywhere in the text
    pub fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.search.is_match(text)?)
    }

    /// Find the first occurrence in the text
    pub fn find<'t>(&self, text: &'t str) -> Result<Option<Match<'t>>> {
        Ok(self.search.find(text)?)
    }

    /// Iterate over all non-overlapping occurrences
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.search.find_iter(text)
    }

    /// Capture groups of the first occurrence
    pub fn captures<'t>(&self, text: &'t str) -> Result<Option<Captures<'t>>> {
        Ok(self.search.captures(text)?)
    }

    /// Capture groups of every occurrence
    pub fn captures_iter<'r, 't>(&'r self, text: &'t str) -> CaptureMatches<'r, 't> {
        self.search.captures_iter(text)
    }

    /// Capture groups of a match spanning the complete text
    pub fn exact_captures<'t>(&self, text: &'t str) -> Result<Option<Captures<'t>>> {
        Ok(self.exact.captures(text)?)
    }

    /// The engine handle used for searching
    pub fn underlying(&self) -> &Regex {
        &self.search
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadableRegexError;

    fn compile(text: &str, flags: PatternFlags) -> Pattern {
        Pattern::compile(text.to_string(), flags, Vec::new()).unwrap()
    }

    #[test]
    fn test_display_is_pattern_text() {
        let pattern = compile("a1?", PatternFlags::MULTILINE);
        assert_eq!(pattern.to_string(), "a1?");
        assert_eq!(pattern.as_str(), "a1?");
        assert_eq!(pattern.underlying().as_str(), "(?m)a1?");
    }

    #[test]
    fn test_exact_versus_search() {
        let pattern = compile(r"\d", PatternFlags::empty());
        assert!(pattern.matches_text_exactly("1").unwrap());
        assert!(!pattern.matches_text_exactly("12").unwrap());
        assert!(pattern.is_match("a1b").unwrap());
        assert!(!pattern.is_match("ab").unwrap());
    }

    #[test]
    fn test_exact_match_with_alternation() {
        // The anchors must apply to the whole alternation
        let pattern = compile("a|ab", PatternFlags::empty());
        assert!(pattern.matches_text_exactly("ab").unwrap());
        assert!(!pattern.matches_text_exactly("abb").unwrap());
    }

    #[test]
    fn test_find_iter() {
        let pattern = compile(r"\d+", PatternFlags::empty());
        let found: Vec<&str> = pattern
            .find_iter("a1 22 333")
            .map(|m| m.unwrap().as_str())
            .collect();
        assert_eq!(found, vec!["1", "22", "333"]);
    }

    #[test]
    fn test_enabled_flags() {
        let flags = PatternFlags::CASE_INSENSITIVE | PatternFlags::DOT_ALL;
        let pattern = compile("a", flags);
        assert_eq!(pattern.enabled_flags(), flags);
        assert!(pattern.matches_text_exactly("A").unwrap());
        assert_eq!(pattern.underlying().as_str(), "(?is)a");
    }

    #[test]
    fn test_groups() {
        let pattern = Pattern::compile(
            "(?<a>x)(y)".to_string(),
            PatternFlags::empty(),
            vec![Some("a".to_string()), None],
        )
        .unwrap();
        assert_eq!(pattern.group_count(), 2);
        assert!(pattern.has_group("a"));
        assert!(!pattern.has_group("b"));
        let caps = pattern.exact_captures("xy").unwrap().unwrap();
        assert_eq!(caps.name("a").map(|m| m.as_str()), Some("x"));
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("y"));
    }

    #[test]
    fn test_invalid_text_is_an_engine_error() {
        let result = Pattern::compile("[a-".to_string(), PatternFlags::empty(), Vec::new());
        assert!(matches!(result, Err(ReadableRegexError::Engine(_))));
    }

    #[test]
    fn test_pattern_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pattern>();
    }
}
