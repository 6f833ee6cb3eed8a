//! A small backtracking regular-expression engine and the grep built on it.
//!
//! Supported syntax: literals, `.`, `\d`, `\w`, `[...]`, `[^...]`, `^`, `$`,
//! `?`, `+`, `(...|...)` and backreferences `\1` through `\9`.
//!
//! ```rust
//! let pattern = tinygrep::compile(r"(cat|dog) and \1").unwrap();
//!
//! assert!(pattern.matches("cat and cat"));
//! assert!(!pattern.matches("cat and dog"));
//! ```

pub mod ast;
pub mod captures;
pub mod config;
pub mod cursor;
pub mod error;
pub mod input;
pub mod matcher;
pub mod parser;
pub mod pattern;
pub mod search;

pub use captures::Captures;
pub use error::{InvalidPattern, SyntaxError};
pub use pattern::{compile, Match, Pattern};

/// Compile `pattern` and test it against `input` in one go.
pub fn is_match(input: &str, pattern: &str) -> Result<bool, InvalidPattern> {
    Ok(compile(pattern)?.matches(input))
}
