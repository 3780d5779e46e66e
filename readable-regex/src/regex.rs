//! The order-checked builder
//!
//! [`ReadableRegex`] pairs an [`OrderChecker`] with a [`PatternAssembler`].
//! Every primitive operation first asks the checker whether the move is
//! legal and then lets the assembler emit the text. Operations that can
//! never be illegal (blocks, group starts) return the builder directly,
//! the others return a [`Result`].
//!
//! Composite operations such as [`ReadableRegex::group`] are built from the
//! checked primitives and are not checked a second time.
//!
//! # Example
//! ```
//! use readable_regex::regex;
//!
//! let pattern = regex()
//!     .literal("http")
//!     .literal("s")
//!     .optional()?
//!     .literal("://")
//!     .any_character_except(" ")?
//!     .zero_or_more()?
//!     .build()?;
//!
//! assert!(pattern.matches_text_exactly("https://www.github.com")?);
//! assert_eq!(pattern.to_string(), "(?:http)(?:s)?(?:://)[^ ]*");
//! # Ok::<(), readable_regex::ReadableRegexError>(())
//! ```

use std::borrow::Borrow;

use crate::assembler::{GroupKind, GroupName, PatternAssembler, Repetition};
use crate::error::Result;
use crate::flags::PatternFlags;
use crate::order::{Move, OrderChecker};
use crate::pattern::Pattern;

/// Start an empty builder
pub fn regex() -> ReadableRegex {
    ReadableRegex::new()
}

/// Start a builder seeded with raw pattern text
pub fn regex_from(raw: &str) -> ReadableRegex {
    ReadableRegex::new().regex_from_string(raw)
}

/// Builds a pattern through composable, order-checked calls
///
/// A builder is owned by one thread; the [`Pattern`] it produces can be
/// shared freely.
#[derive(Debug, Clone, Default)]
pub struct ReadableRegex {
    checker: OrderChecker,
    assembler: PatternAssembler,
}

impl ReadableRegex {
    /// Create an empty builder
    pub fn new() -> Self {
        ReadableRegex::default()
    }

    /// The order checker state
    pub fn order_checker(&self) -> &OrderChecker {
        &self.checker
    }

    /// The assembler state
    pub fn assembler(&self) -> &PatternAssembler {
        &self.assembler
    }

    /// The pattern text assembled so far
    pub fn text(&self) -> &str {
        self.assembler.text()
    }

    fn block(mut self, emit: impl FnOnce(&mut PatternAssembler)) -> Self {
        self.checker.standalone_block();
        emit(&mut self.assembler);
        self
    }

    fn try_move(
        mut self,
        mv: Move,
        emit: impl FnOnce(&mut PatternAssembler) -> Result<()>,
    ) -> Result<Self> {
        let next = self.checker.after(mv)?;
        emit(&mut self.assembler)?;
        self.checker = next;
        Ok(self)
    }

    fn open(mut self, kind: GroupKind) -> Self {
        self.checker.start_group();
        self.assembler.start_group(kind);
        self
    }

    fn repeat(self, repetition: Repetition) -> Result<Self> {
        self.try_move(Move::Repetition, |a| {
            a.repeat(repetition);
            Ok(())
        })
    }

    // ---- Standalone blocks ----

    /// Append raw pattern text.
    ///
    /// The text is not validated and is treated as a standalone block, so a
    /// repetition may follow it. Malformed text surfaces as an engine error
    /// when the pattern is finished.
    pub fn regex_from_string(self, raw: &str) -> Self {
        self.block(|a| a.raw(raw))
    }

    /// Embed another builder as a non-capturing group.
    ///
    /// `sub` is finished first. Its capture groups still capture, but their
    /// names are not added to this builder's group list.
    pub fn add(self, sub: &ReadableRegex) -> Result<Self> {
        let pattern = sub.build()?;
        Ok(self.add_pattern(&pattern))
    }

    /// Embed a finished pattern as a non-capturing group
    pub fn add_pattern(self, pattern: &Pattern) -> Self {
        self.block(|a| a.embed(pattern))
    }

    /// A literal string; meta characters need no escaping
    pub fn literal(self, value: &str) -> Self {
        self.block(|a| a.literal(value))
    }

    /// `\d`
    pub fn digit(self) -> Self {
        self.block(PatternAssembler::digit)
    }

    /// `\s`
    pub fn whitespace(self) -> Self {
        self.block(PatternAssembler::whitespace)
    }

    /// `\t`
    pub fn tab(self) -> Self {
        self.block(PatternAssembler::tab)
    }

    /// Exactly one of the alternatives, each finished on its own
    pub fn one_of<I>(self, alternatives: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<ReadableRegex>,
    {
        let patterns = alternatives
            .into_iter()
            .map(|alternative| alternative.borrow().build())
            .collect::<Result<Vec<_>>>()?;
        Ok(self.block(|a| a.one_of(&patterns)))
    }

    /// Any character in the inclusive ranges given as boundary pairs
    pub fn range(self, boundaries: &[char]) -> Result<Self> {
        self.try_move(Move::StandaloneBlock, |a| a.range(boundaries))
    }

    /// Any character outside the inclusive ranges given as boundary pairs
    pub fn not_in_range(self, boundaries: &[char]) -> Result<Self> {
        self.try_move(Move::StandaloneBlock, |a| a.not_in_range(boundaries))
    }

    /// Any single character of `characters`
    pub fn any_character_of(self, characters: &str) -> Result<Self> {
        self.try_move(Move::StandaloneBlock, |a| a.any_character_of(characters))
    }

    /// Any single character not in `characters`
    pub fn any_character_except(self, characters: &str) -> Result<Self> {
        self.try_move(Move::StandaloneBlock, |a| {
            a.any_character_except(characters)
        })
    }

    /// `\w`
    pub fn word_character(self) -> Self {
        self.block(PatternAssembler::word_character)
    }

    /// `\W`
    pub fn non_word_character(self) -> Self {
        self.block(PatternAssembler::non_word_character)
    }

    /// `\b`
    pub fn word_boundary(self) -> Self {
        self.block(PatternAssembler::word_boundary)
    }

    /// `\B`
    pub fn non_word_boundary(self) -> Self {
        self.block(PatternAssembler::non_word_boundary)
    }

    /// `.`
    pub fn any_character(self) -> Self {
        self.block(PatternAssembler::any_character)
    }

    /// Start of a line; enables multiline when the pattern is finished
    pub fn start_of_line(self) -> Self {
        self.block(PatternAssembler::start_of_line)
    }

    /// `\A`
    pub fn start_of_input(self) -> Self {
        self.block(PatternAssembler::start_of_input)
    }

    /// End of a line; enables multiline when the pattern is finished
    pub fn end_of_line(self) -> Self {
        self.block(PatternAssembler::end_of_line)
    }

    /// `\z`
    pub fn end_of_input(self) -> Self {
        self.block(PatternAssembler::end_of_input)
    }

    /// One or more word characters
    pub fn word(self) -> Result<Self> {
        self.word_character().one_or_more()
    }

    /// Zero or more of any character
    pub fn anything(self) -> Result<Self> {
        self.any_character().zero_or_more()
    }

    // ---- Repetitions ----

    pub fn one_or_more(self) -> Result<Self> {
        self.repeat(Repetition::OneOrMore)
    }

    pub fn optional(self) -> Result<Self> {
        self.repeat(Repetition::Optional)
    }

    pub fn zero_or_more(self) -> Result<Self> {
        self.repeat(Repetition::ZeroOrMore)
    }

    pub fn exactly_n_times(self, n: u32) -> Result<Self> {
        self.repeat(Repetition::exactly(n)?)
    }

    pub fn at_least_n_times(self, n: u32) -> Result<Self> {
        self.repeat(Repetition::at_least(n))
    }

    pub fn between_n_and_m_times(self, n: u32, m: u32) -> Result<Self> {
        self.repeat(Repetition::between(n, m)?)
    }

    pub fn at_most_n_times(self, n: u32) -> Result<Self> {
        self.between_n_and_m_times(0, n)
    }

    /// Make the preceding repetition match as little as possible
    pub fn reluctant(self) -> Result<Self> {
        self.try_move(Move::ReluctantOrPossessive, |a| {
            a.reluctant();
            Ok(())
        })
    }

    /// Make the preceding repetition never give back what it matched
    pub fn possessive(self) -> Result<Self> {
        self.try_move(Move::ReluctantOrPossessive, |a| {
            a.possessive();
            Ok(())
        })
    }

    // ---- Groups ----

    /// Open an unnamed capturing group
    pub fn start_group(self) -> Self {
        self.open(GroupKind::Capturing(None))
    }

    /// Open a named capturing group; the name must match `[A-Za-z][A-Za-z0-9]*`
    pub fn start_named_group(self, name: &str) -> Result<Self> {
        let name = GroupName::new(name)?;
        Ok(self.open(GroupKind::Capturing(Some(name))))
    }

    /// Open a non-capturing group
    pub fn start_unnamed_group(self) -> Self {
        self.open(GroupKind::NonCapturing)
    }

    pub fn start_positive_lookbehind(self) -> Self {
        self.open(GroupKind::PositiveLookbehind)
    }

    pub fn start_negative_lookbehind(self) -> Self {
        self.open(GroupKind::NegativeLookbehind)
    }

    pub fn start_positive_lookahead(self) -> Self {
        self.open(GroupKind::PositiveLookahead)
    }

    pub fn start_negative_lookahead(self) -> Self {
        self.open(GroupKind::NegativeLookahead)
    }

    /// Close the innermost open group of any kind
    pub fn end_group(self) -> Result<Self> {
        self.try_move(Move::EndGroup, |a| {
            a.end_group();
            Ok(())
        })
    }

    /// `sub` inside an unnamed capturing group
    pub fn group(self, sub: &ReadableRegex) -> Result<Self> {
        self.start_group().add(sub)?.end_group()
    }

    /// `sub` inside a named capturing group
    pub fn named_group(self, name: &str, sub: &ReadableRegex) -> Result<Self> {
        self.start_named_group(name)?.add(sub)?.end_group()
    }

    pub fn positive_lookbehind(self, sub: &ReadableRegex) -> Result<Self> {
        self.start_positive_lookbehind().add(sub)?.end_group()
    }

    pub fn negative_lookbehind(self, sub: &ReadableRegex) -> Result<Self> {
        self.start_negative_lookbehind().add(sub)?.end_group()
    }

    pub fn positive_lookahead(self, sub: &ReadableRegex) -> Result<Self> {
        self.start_positive_lookahead().add(sub)?.end_group()
    }

    pub fn negative_lookahead(self, sub: &ReadableRegex) -> Result<Self> {
        self.start_negative_lookahead().add(sub)?.end_group()
    }

    // ---- Finishing ----

    /// Finish without extra flags
    pub fn build(&self) -> Result<Pattern> {
        self.build_with_flags(PatternFlags::empty())
    }

    /// Finish with `flags`.
    ///
    /// Fails while groups are still open. The builder is only borrowed, so
    /// it can be finished again or extended further afterwards.
    pub fn build_with_flags(&self, flags: PatternFlags) -> Result<Pattern> {
        self.checker.finish()?;
        self.assembler.finish(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConstructionError, ReadableRegexError};

    fn is_construction_error<T>(result: Result<T>, expected: ConstructionError) -> bool {
        matches!(result, Err(ReadableRegexError::Construction(e)) if e == expected)
    }

    #[test]
    fn test_repetition_at_start() {
        assert!(is_construction_error(
            regex().one_or_more(),
            ConstructionError::RepetitionNotAllowed
        ));
    }

    #[test]
    fn test_repetition_after_repetition() {
        let result = regex().digit().one_or_more().unwrap().optional();
        assert!(is_construction_error(
            result,
            ConstructionError::RepetitionNotAllowed
        ));
    }

    #[test]
    fn test_reluctant_needs_repetition() {
        assert!(is_construction_error(
            regex().digit().reluctant(),
            ConstructionError::ReluctantWithoutRepetition
        ));
        assert!(
            regex()
                .digit()
                .one_or_more()
                .unwrap()
                .possessive()
                .is_ok()
        );
    }

    #[test]
    fn test_end_group_without_start() {
        assert!(is_construction_error(
            regex().digit().end_group(),
            ConstructionError::NoOpenGroup
        ));
    }

    #[test]
    fn test_build_with_open_group() {
        assert!(is_construction_error(
            regex().start_group().digit().build(),
            ConstructionError::UnclosedGroups(1)
        ));
    }

    #[test]
    fn test_invalid_argument_does_not_touch_checker() {
        let builder = regex().start_group();
        let before = *builder.order_checker();
        assert!(matches!(
            builder.clone().range(&['a']),
            Err(ReadableRegexError::InvalidArgument(_))
        ));
        assert!(matches!(
            builder.clone().start_named_group("0a"),
            Err(ReadableRegexError::InvalidArgument(_))
        ));
        assert_eq!(*builder.order_checker(), before);
        assert_eq!(builder.text(), "(");
    }

    #[test]
    fn test_invalid_bounds_are_invalid_arguments() {
        for result in [
            regex().digit().exactly_n_times(0),
            regex().digit().between_n_and_m_times(3, 2),
            regex().digit().at_most_n_times(0),
        ] {
            assert!(matches!(result, Err(ReadableRegexError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_composite_group_text() {
        let pattern = regex()
            .named_group("first", &regex().digit())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(pattern.as_str(), r"(?<first>(?:\d))");
        assert_eq!(pattern.groups(), &[Some("first".to_string())]);
    }

    #[test]
    fn test_sub_expression_names_are_not_merged() {
        let inner = regex()
            .named_group("inner", &regex().digit())
            .unwrap();
        let pattern = regex()
            .named_group("outer", &inner)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(pattern.groups(), &[Some("outer".to_string())]);

        // The inner group still captures in the engine
        let caps = pattern.captures("5").unwrap().unwrap();
        assert_eq!(caps.name("inner").map(|m| m.as_str()), Some("5"));
    }

    #[test]
    fn test_build_is_repeatable() {
        let builder = regex().digit();
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first.as_str(), second.as_str());

        let extended = builder.one_or_more().unwrap().build().unwrap();
        assert_eq!(extended.as_str(), r"\d+");
    }

    #[test]
    fn test_regex_from_seeds_text() {
        let pattern = regex_from("[a-c]").one_or_more().unwrap().build().unwrap();
        assert_eq!(pattern.as_str(), "[a-c]+");
    }

    #[test]
    fn test_one_of_text() {
        let pattern = regex()
            .one_of([regex().literal("abc"), regex().digit()])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(pattern.as_str(), r"(?:(?:abc)|\d)");
    }

    #[test]
    fn test_one_of_accepts_references() {
        let digit = regex().digit();
        let pattern = regex()
            .one_of([&digit, &digit])
            .unwrap()
            .exactly_n_times(2)
            .unwrap()
            .build()
            .unwrap();
        assert!(pattern.matches_text_exactly("12").unwrap());
    }

    #[test]
    fn test_one_of_propagates_sub_errors() {
        assert!(is_construction_error(
            regex().one_of([regex().start_group()]),
            ConstructionError::UnclosedGroups(1)
        ));
    }
}
