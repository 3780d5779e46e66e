//! Engine flags that can be enabled when finishing a pattern

use bitflags::bitflags;

use crate::error::{ReadableRegexError, Result};

bitflags! {
    /// Flags understood by the regex engine.
    ///
    /// The bit values are the classic integer codes of the engine family
    /// (`CASE_INSENSITIVE = 0x02`, `MULTILINE = 0x08`, `DOTALL = 0x20`), so a
    /// flag set can be passed around as a plain bitmask. Combining is a
    /// bitwise OR and adding a flag twice has no effect.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PatternFlags: u32 {
        /// Case insensitive matching
        const CASE_INSENSITIVE = 0x02;
        /// `^` and `$` match at line boundaries instead of only at the input ends
        const MULTILINE = 0x08;
        /// `.` also matches line terminators
        const DOT_ALL = 0x20;
    }
}

impl PatternFlags {
    /// The inline flag letter the engine uses for a single flag
    fn letter(self) -> Option<char> {
        match self {
            f if f == PatternFlags::CASE_INSENSITIVE => Some('i'),
            f if f == PatternFlags::MULTILINE => Some('m'),
            f if f == PatternFlags::DOT_ALL => Some('s'),
            _ => None,
        }
    }

    /// Inline letters of every flag in the set, e.g. `"ms"`
    pub fn letters(self) -> String {
        self.iter().filter_map(PatternFlags::letter).collect()
    }

    /// Parse flags from a string of inline letters like `"ims"`
    pub fn from_letters(letters: &str) -> Result<Self> {
        letters.chars().try_fold(PatternFlags::empty(), |flags, c| {
            let flag = match c {
                'i' => PatternFlags::CASE_INSENSITIVE,
                'm' => PatternFlags::MULTILINE,
                's' => PatternFlags::DOT_ALL,
                other => {
                    return Err(ReadableRegexError::invalid_argument(format!(
                        "unknown flag '{other}', expected one of 'i', 'm', 's'"
                    )));
                }
            };
            Ok(flags | flag)
        })
    }

    /// Prefix `text` with an inline flag group, `(?ms)text`
    pub(crate) fn apply_inline(self, text: &str) -> String {
        if self.is_empty() {
            text.to_string()
        } else {
            format!("(?{}){}", self.letters(), text)
        }
    }

    /// Wrap `text` in a non-capturing group that carries these flags,
    /// `(?:text)` or `(?ms:text)`
    pub(crate) fn scoped_group(self, text: &str) -> String {
        format!("(?{}:{})", self.letters(), text)
    }
}
