use thiserror::Error;

/// The cursor ran off the end of its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected end of input")]
pub struct EndOfInput;

/// A pattern that could not be compiled.
///
/// `offset` is the rune offset in the pattern text where the problem was
/// detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pattern at offset {offset}: {reason}")]
pub struct InvalidPattern {
    pub offset: usize,
    pub reason: SyntaxError,
}

impl InvalidPattern {
    pub fn new(offset: usize, reason: SyntaxError) -> Self {
        Self { offset, reason }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unterminated group, expected ')'")]
    UnterminatedGroup,
    #[error("unmatched ')'")]
    UnmatchedParenthesis,
    #[error("unterminated character set, expected ']'")]
    UnterminatedSet,
    #[error("character set has no members")]
    EmptySet,
    #[error("quantifier '{0}' has nothing to repeat")]
    DanglingQuantifier(char),
    #[error("quantifier '{quantifier}' cannot be applied to {operand}")]
    Unquantifiable {
        quantifier: char,
        operand: &'static str,
    },
    #[error("'$' has no preceding element")]
    DanglingEndAnchor,
    #[error("'^' is only allowed at the start of a sequence")]
    MisplacedStartAnchor,
    #[error("unsupported escape '\\{0}'")]
    InvalidEscape(char),
    #[error("backreference '\\0' does not name a group")]
    ZeroBackreference,
    #[error("unexpected end of pattern")]
    UnexpectedEnd,
    #[error("trailing '\\' at end of pattern")]
    DanglingEscape,
}

/// Why a node failed to match at a position.
///
/// These are ordinary control flow for the engine and never reach callers of
/// [`Pattern::matches`](crate::Pattern::matches).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("end of input")]
    EndOfInput,
    #[error("rune does not match")]
    NoMatch,
    #[error("not at start of subject")]
    NotAtStart,
    #[error("not at end of subject")]
    NotAtEnd,
    #[error("fewer repetitions than required")]
    TooFewRepetitions,
    #[error("no alternative matched")]
    NoBranchMatched,
    #[error("group {0} has not captured anything")]
    UnboundCapture(usize),
    #[error("no giveback offset lets the next element match")]
    GivebackExhausted,
}

impl From<EndOfInput> for Mismatch {
    fn from(_: EndOfInput) -> Self {
        Mismatch::EndOfInput
    }
}
