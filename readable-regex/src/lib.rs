//! Readable Regex
//!
//! Build regular expressions through composable calls instead of writing
//! pattern syntax by hand. The builder checks the order of the calls, so
//! a finished pattern is always coherent: no repetition without something
//! to repeat, no unbalanced groups.
//!
//! ```
//! use readable_regex::regex;
//!
//! let pattern = regex()
//!     .start_group()
//!     .word()?
//!     .end_group()?
//!     .whitespace()
//!     .start_named_group("secondWord")?
//!     .word()?
//!     .end_group()?
//!     .build()?;
//!
//! let caps = pattern.exact_captures("abc def")?.expect("matches");
//! assert_eq!(caps.get(1).map(|m| m.as_str()), Some("abc"));
//! assert_eq!(caps.name("secondWord").map(|m| m.as_str()), Some("def"));
//! # Ok::<(), readable_regex::ReadableRegexError>(())
//! ```

pub mod assembler;
pub mod error;
pub mod flags;
pub mod instantiate;
pub mod order;
pub mod pattern;
pub mod regex;

pub use assembler::{GroupKind, GroupName, PatternAssembler, Repetition};
pub use error::{ConstructionError, InstantiationError, ReadableRegexError, Result};
pub use flags::PatternFlags;
pub use instantiate::{FromGroups, MatchedGroups, instantiate};
pub use order::{Move, OrderChecker};
pub use pattern::Pattern;
pub use regex::{ReadableRegex, regex, regex_from};
