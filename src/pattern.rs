use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use crate::ast::Node;
use crate::captures::Captures;
use crate::cursor::Cursor;
use crate::error::InvalidPattern;
use crate::matcher;

/// A compiled pattern, ready to be matched against any number of subjects.
///
/// The tree is immutable once built. Every call to [`Pattern::matches`] or
/// [`Pattern::find`] uses its own cursor and capture table, so one pattern
/// can be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    root: Node,
    group_count: usize,
}

/// The leftmost match of a pattern in a subject.
///
/// Offsets are rune offsets into the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub captures: Captures,
}

impl Match {
    /// Text captured by group `index` in the successful attempt.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.captures.get(index)
    }
}

/// Compile `pattern`.
pub fn compile(pattern: &str) -> Result<Pattern, InvalidPattern> {
    Pattern::new(pattern)
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, InvalidPattern> {
        let (root, group_count) = crate::parser::parse(pattern)?;
        debug!("compiled {:?} into {:?}", pattern, root);
        Ok(Self {
            source: pattern.to_string(),
            root,
            group_count,
        })
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of numbered capture groups.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// The compiled pattern tree.
    pub fn tree(&self) -> &Node {
        &self.root
    }

    /// Whether the pattern matches anywhere in `subject`.
    pub fn matches(&self, subject: &str) -> bool {
        self.find(subject).is_some()
    }

    /// Find the leftmost match in `subject`.
    ///
    /// Every start offset from 0 up to and including the subject length is
    /// tried in turn, each with an empty capture table.
    pub fn find(&self, subject: &str) -> Option<Match> {
        let runes: Vec<char> = subject.chars().collect();
        let mut cursor = Cursor::new(&runes);
        let mut captures = Captures::new();

        for start in 0..=runes.len() {
            captures.clear();
            cursor.reset(start);
            match matcher::attempt(&self.root, &mut cursor, &mut captures) {
                Ok(outcome) => {
                    let end = start + outcome.consumed;
                    return Some(Match {
                        start,
                        end,
                        text: cursor.text_between(start, end),
                        captures,
                    });
                }
                Err(mismatch) => trace!("no match at offset {}: {}", start, mismatch),
            }
        }
        None
    }
}

impl FromStr for Pattern {
    type Err = InvalidPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_match(pattern: &str, subject: &str) -> bool {
        compile(pattern).unwrap().matches(subject)
    }

    #[test]
    fn should_search_for_literal_substrings() {
        for (subject, expected) in [
            ("xxabcxx", true),
            ("abc", true),
            ("ab", false),
            ("acb", false),
            ("", false),
        ] {
            assert_eq!(expected, is_match("abc", subject), "subject {:?}", subject);
        }
    }

    #[test]
    fn should_match_empty_pattern_everywhere() {
        let pattern = compile("").unwrap();
        assert!(pattern.matches(""));
        assert!(pattern.matches("anything"));
        assert_eq!(Some(0), pattern.find("xyz").map(|m| m.start));
    }

    #[test]
    fn should_match_digit_and_word_classes() {
        assert!(is_match(r"\d", "sally has 3 apples"));
        assert!(!is_match(r"\d", "sally has no apples"));
        assert!(is_match(r"\d", "٣"));
        assert!(is_match(r"\w", "--_--"));
        assert!(is_match(r"\w", "€é"));
        assert!(!is_match(r"\w", "-+= !"));
        for subject in ["²", "½", "\u{093E}"] {
            assert!(!is_match(r"\w", subject), "subject {:?}", subject);
        }
        assert!(is_match(r"\d", "½"));
        assert!(is_match(r"\d apple", "sally has 3 apples"));
    }

    #[test]
    fn should_anchor_to_both_ends() {
        assert!(is_match("^abc$", "abc"));
        assert!(!is_match("^abc$", "abcd"));
        assert!(!is_match("^abc$", "xabc"));
        assert!(is_match("^log", "logs"));
        assert!(!is_match("^log", "slog"));
        assert!(is_match("dog$", "hotdog"));
        assert!(!is_match("dog$", "dogs"));
        assert!(is_match("^$", ""));
        assert!(!is_match("^$", "x"));
    }

    #[test]
    fn should_repeat_greedily_with_giveback() {
        assert!(is_match("a+", "a"));
        assert!(is_match("a+", "xxaaa"));
        assert!(!is_match("a+", "bbb"));
        assert!(is_match("a?b", "b"));
        assert!(is_match("a?b", "ab"));
        assert!(is_match("ca?t", "ct"));
        assert!(is_match("ca+at", "caaats"));
        assert!(is_match("^a+$", "aaaa"));
        assert!(is_match("g.+gol", "goøö0Ogol"));
        assert!(is_match(r"^\d+ \w+s?$", "42 dogs"));
    }

    #[test]
    fn should_match_sets() {
        for c in ["a", "b", "c"] {
            assert!(is_match("[abc]", c));
            assert!(!is_match("[^abc]", c));
        }
        assert!(!is_match("[abc]", "xyz"));
        assert!(is_match("[^abc]", "d"));
        assert!(is_match("[^xyz]", "abcd"));
        assert!(is_match(r"[\d_]", "a_b"));
    }

    #[test]
    fn should_round_trip_captures_through_backreferences() {
        let pattern = compile(r"(cat|dog) and \1").unwrap();
        assert!(pattern.matches("cat and cat"));
        assert!(pattern.matches("dog and dog"));
        assert!(!pattern.matches("cat and dog"));
    }

    #[test]
    fn should_report_leftmost_match_with_captures() {
        let pattern = compile(r"(\w+) (\d)").unwrap();
        let found = pattern.find("-- apples 3 pears 4").unwrap();

        assert_eq!(3, found.start);
        assert_eq!(11, found.end);
        assert_eq!("apples 3", found.text);
        assert_eq!(Some("apples"), found.group(1));
        assert_eq!(Some("3"), found.group(2));
    }

    #[test]
    fn should_prefer_first_declared_branch() {
        let found = compile("(a|ab)").unwrap().find("ab").unwrap();
        assert_eq!("a", found.text);

        let found = compile("(ab|a)").unwrap().find("ab").unwrap();
        assert_eq!("ab", found.text);
    }

    #[test]
    fn should_not_revisit_a_group_once_a_branch_matched() {
        assert!(!is_match("(a|ab)c", "abc"));
        assert!(is_match("(ab|a)c", "abc"));
    }

    #[test]
    fn should_support_top_level_alternation() {
        let pattern = compile("cat|dog").unwrap();
        assert!(pattern.matches("hotdog"));
        assert!(!pattern.matches("cow"));
        assert_eq!(0, pattern.group_count());
        assert_eq!(Some("dog"), pattern.find("hotdog").unwrap().group(0));
    }

    #[test]
    fn should_not_carry_captures_across_start_offsets() {
        // group 2 captures "a" in the failed attempt at offset 0; at offset 3
        // the `c` branch runs instead and group 2 must be unbound again
        let pattern = compile(r"(b(a)|c)q\2").unwrap();
        assert!(!pattern.matches("baqcqa"));
        assert!(pattern.matches("baqa"));
    }

    #[test]
    fn should_behave_identically_when_compiled_twice() {
        let first = compile(r"(a)(b)\2").unwrap();
        let second = compile(r"(a)(b)\2").unwrap();
        assert_eq!(first, second);
        for subject in ["abb", "aba", "xxabbxx", ""] {
            assert_eq!(first.matches(subject), second.matches(subject));
        }
    }

    #[test]
    fn should_parse_from_str_and_display_source() {
        let pattern: Pattern = r"\d+".parse().unwrap();
        assert_eq!(r"\d+", pattern.to_string());
        assert_eq!(r"\d+", pattern.as_str());
        assert!("(ab".parse::<Pattern>().is_err());
    }
}
