use crate::error::EndOfInput;

/// A single token of pattern text.
///
/// A token is one rune, or two runes when the first one is the escape
/// character `\`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Char(char),
    Escaped(char),
    /// A `\` with nothing after it.
    DanglingEscape,
}

/// A rune-indexed view over a piece of text with a movable offset.
///
/// The same type walks both the pattern (while compiling) and the subject
/// (while matching). Offsets are rune indexes, never byte indexes.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    runes: &'a [char],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(runes: &'a [char]) -> Self {
        Self { runes, offset: 0 }
    }

    /// Look at the rune under the cursor without moving.
    pub fn peek(&self) -> Result<char, EndOfInput> {
        self.runes.get(self.offset).copied().ok_or(EndOfInput)
    }

    /// Return the rune under the cursor and step past it.
    pub fn advance(&mut self) -> Result<char, EndOfInput> {
        let rune = self.peek()?;
        self.offset += 1;
        Ok(rune)
    }

    /// Step back one rune. Only valid after a successful `advance`.
    pub fn unadvance(&mut self) {
        debug_assert!(self.offset > 0, "unadvance at start of input");
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.runes.len()
    }

    /// Current offset, to be handed back to `reset` later.
    pub fn mark(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self, offset: usize) {
        debug_assert!(offset <= self.runes.len(), "reset past end of input");
        self.offset = offset.min(self.runes.len());
    }

    /// The runes in `start..end` as an owned string.
    pub fn text_between(&self, start: usize, end: usize) -> String {
        self.runes[start..end].iter().collect()
    }

    /// Read one token of pattern text.
    pub fn read_token(&mut self) -> Result<Token, EndOfInput> {
        match self.advance()? {
            '\\' => match self.advance() {
                Ok(escaped) => Ok(Token::Escaped(escaped)),
                Err(EndOfInput) => Ok(Token::DanglingEscape),
            },
            rune => Ok(Token::Char(rune)),
        }
    }

    /// Read the next token without consuming it.
    pub fn peek_token(&mut self) -> Option<Token> {
        let checkpoint = self.mark();
        let token = self.read_token().ok();
        self.reset(checkpoint);
        token
    }
}
