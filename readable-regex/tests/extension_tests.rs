//! Extending the builder
//!
//! New operations are added with extension traits on [`ReadableRegex`].
//! Builders with different finishing rules are composed from the public
//! [`OrderChecker`] and [`PatternAssembler`] primitives.

use readable_regex::{
    Move, OrderChecker, Pattern, PatternAssembler, PatternFlags, ReadableRegex, Result, regex,
};

trait DigitWhitespaceDigit {
    fn digit_whitespace_digit(self) -> Self;
}

impl DigitWhitespaceDigit for ReadableRegex {
    fn digit_whitespace_digit(self) -> Self {
        self.digit().whitespace().digit()
    }
}

/// A builder that always finishes with dot-all and only knows a few blocks
#[derive(Default)]
struct DotAllRegex {
    checker: OrderChecker,
    assembler: PatternAssembler,
}

impl DotAllRegex {
    fn any_character(mut self) -> Self {
        self.checker.standalone_block();
        self.assembler.any_character();
        self
    }

    fn literal(mut self, value: &str) -> Self {
        self.checker.standalone_block();
        self.assembler.literal(value);
        self
    }

    fn zero_or_more(mut self) -> Result<Self> {
        self.checker.check(Move::Repetition)?;
        self.assembler.repeat(readable_regex::Repetition::ZeroOrMore);
        Ok(self)
    }

    fn build(&self) -> Result<Pattern> {
        self.checker.finish()?;
        self.assembler.finish(PatternFlags::DOT_ALL)
    }
}

#[test]
fn test_method_can_be_added() -> Result<()> {
    let pattern = regex()
        .literal("a")
        .digit_whitespace_digit()
        .literal("a")
        .build()?;

    assert!(pattern.matches_text_exactly("a1 4a")?);
    assert!(!pattern.is_match("1 1")?);
    assert!(!pattern.is_match("a11a")?);
    Ok(())
}

#[test]
fn test_extension_keeps_order_checking() {
    let result = regex().digit_whitespace_digit().one_or_more();
    assert!(result.is_ok());
    let result = regex()
        .digit_whitespace_digit()
        .one_or_more()
        .and_then(|r| r.optional());
    assert!(result.is_err());
}

#[test]
fn test_finishing_can_be_replaced() -> Result<()> {
    let pattern = DotAllRegex::default().build()?;
    assert_eq!(pattern.enabled_flags(), PatternFlags::DOT_ALL);

    let pattern = DotAllRegex::default()
        .literal("<")
        .any_character()
        .zero_or_more()?
        .literal(">")
        .build()?;
    assert!(pattern.matches_text_exactly("<a\nb>")?);
    Ok(())
}

#[test]
fn test_composed_builder_checks_order() {
    assert!(DotAllRegex::default().zero_or_more().is_err());
}
