use crate::ast::{ClassKind, Node, SetMember};
use crate::cursor::{Cursor, Token};
use crate::error::{InvalidPattern, SyntaxError};

/// Runes that may be escaped to stand for themselves.
const METACHARACTERS: &[char] = &['\\', '.', '[', ']', '(', ')', '|', '?', '+', '*', '^', '$'];

/// Compile a pattern string into a pattern tree.
///
/// Returns the tree and the number of numbered capture groups in it.
pub fn parse(pattern: &str) -> Result<(Node, usize), InvalidPattern> {
    let runes: Vec<char> = pattern.chars().collect();
    let mut parser = Parser::new(&runes);
    let root = parser.parse()?;
    Ok((root, parser.group_count()))
}

/// Recursive-descent parser over the tokens of a pattern.
///
/// Group numbers come from a counter owned by the parser, so two patterns
/// compiled independently never influence each other's numbering.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    next_group_id: usize,
}

type ParseResult<T> = Result<T, InvalidPattern>;

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern runes.
    pub fn new(pattern: &'a [char]) -> Self {
        Self {
            cursor: Cursor::new(pattern),
            next_group_id: 1,
        }
    }

    /// Number of numbered groups allocated so far.
    pub fn group_count(&self) -> usize {
        self.next_group_id - 1
    }

    /// Allocate a new group ID for capturing groups.
    fn alloc_group_id(&mut self) -> usize {
        let id = self.next_group_id;
        self.next_group_id += 1;
        id
    }

    fn error(&self, offset: usize, reason: SyntaxError) -> InvalidPattern {
        InvalidPattern::new(offset, reason)
    }

    /// Entry point for parsing a whole pattern.
    ///
    /// Example:
    /// - Pattern: `ab`  → Seq([Literal('a'), Literal('b')])
    /// - Pattern: `a|b` → Group { index: 0, branches: [Seq([Literal('a')]), Seq([Literal('b')])] }
    pub fn parse(&mut self) -> ParseResult<Node> {
        let mut branches = self.parse_alt()?;
        if let Some(Token::Char(')')) = self.cursor.peek_token() {
            return Err(self.error(self.cursor.mark(), SyntaxError::UnmatchedParenthesis));
        }

        if branches.len() == 1 {
            Ok(branches.pop().unwrap_or(Node::Seq(Vec::new())))
        } else {
            Ok(Node::Group { index: 0, branches })
        }
    }

    /// Parse alternation (`|`), stopping in front of `)` or at the end.
    ///
    /// Example:
    /// - Pattern: `cat|dog` → [Seq([Literal('c'), ..]), Seq([Literal('d'), ..])]
    fn parse_alt(&mut self) -> ParseResult<Vec<Node>> {
        let mut branches = vec![self.parse_seq()?];
        while let Some(Token::Char('|')) = self.cursor.peek_token() {
            self.cursor.read_token().ok();
            branches.push(self.parse_seq()?);
        }
        Ok(branches)
    }

    /// Parse a sequence of elements up to `|`, `)` or the end of the pattern.
    ///
    /// `^` is only accepted as the first element and wraps the element after
    /// it. `$` wraps the element already parsed before it.
    ///
    /// Example:
    /// - Pattern: `^ab$` → Seq([StartAnchor(Literal('a')), EndAnchor(Literal('b'))])
    fn parse_seq(&mut self) -> ParseResult<Node> {
        let mut nodes = Vec::new();
        while let Some(token) = self.cursor.peek_token() {
            let offset = self.cursor.mark();
            match token {
                Token::Char(')') | Token::Char('|') => break,
                Token::Char('^') if nodes.is_empty() => {
                    self.cursor.read_token().ok();
                    let inner = self.parse_anchored()?;
                    nodes.push(Node::StartAnchor(Box::new(inner)));
                }
                Token::Char('$') => {
                    self.cursor.read_token().ok();
                    let last = nodes
                        .pop()
                        .ok_or_else(|| self.error(offset, SyntaxError::DanglingEndAnchor))?;
                    nodes.push(Node::EndAnchor(Box::new(last)));
                }
                _ => nodes.push(self.parse_element()?),
            }
        }
        Ok(Node::Seq(nodes))
    }

    /// Parse the element following a `^`.
    ///
    /// A `^` with nothing after it anchors an empty sequence.
    fn parse_anchored(&mut self) -> ParseResult<Node> {
        match self.cursor.peek_token() {
            None | Some(Token::Char(')')) | Some(Token::Char('|')) | Some(Token::Char('$')) => {
                Ok(Node::Seq(Vec::new()))
            }
            Some(_) => self.parse_element(),
        }
    }

    /// Parse an atom and an optional quantifier (`?`, `+`) after it.
    ///
    /// Example:
    /// - Pattern: `a?` → Repeat { node: Literal('a'), min: 0, max: Some(1) }
    /// - Pattern: `b+` → Repeat { node: Literal('b'), min: 1, max: None }
    /// - Pattern: `c`  → Literal('c')
    fn parse_element(&mut self) -> ParseResult<Node> {
        let atom = self.parse_atom()?;
        let offset = self.cursor.mark();
        let quantifier = match self.cursor.peek_token() {
            Some(Token::Char(q @ ('?' | '+'))) => q,
            _ => return Ok(atom),
        };
        self.cursor.read_token().ok();

        if !atom.is_quantifiable() {
            return Err(self.error(
                offset,
                SyntaxError::Unquantifiable {
                    quantifier,
                    operand: atom.describe(),
                },
            ));
        }

        Ok(match quantifier {
            '?' => Node::zero_or_one(atom),
            _ => Node::one_or_more(atom),
        })
    }

    /// Parse a single atom: group, set, escape, wildcard or literal.
    ///
    /// Examples:
    /// - Pattern: `(a|b)` → Group { index, branches: [Seq([Literal('a')]), Seq([Literal('b')])] }
    /// - Pattern: `[abc]` → Set { members: [Literal('a'), ..], negated: false }
    /// - Pattern: `\d`    → Class(Digit)
    /// - Pattern: `\1`    → BackRef { index: 1 }
    /// - Pattern: `.`     → Class(Any)
    fn parse_atom(&mut self) -> ParseResult<Node> {
        let offset = self.cursor.mark();
        let token = self
            .cursor
            .read_token()
            .map_err(|_| self.error(offset, SyntaxError::UnexpectedEnd))?;

        match token {
            Token::Char('(') => self.parse_group(offset),
            Token::Char('[') => self.parse_set(offset),
            Token::Char('.') => Ok(Node::Class(ClassKind::Any)),
            Token::Char(q @ ('?' | '+')) => Err(self.error(offset, SyntaxError::DanglingQuantifier(q))),
            Token::Char('^') => Err(self.error(offset, SyntaxError::MisplacedStartAnchor)),
            Token::Char('$') => Err(self.error(offset, SyntaxError::DanglingEndAnchor)),
            Token::Char(c) => Ok(Node::Literal(c)),
            Token::Escaped('d') => Ok(Node::Class(ClassKind::Digit)),
            Token::Escaped('w') => Ok(Node::Class(ClassKind::Word)),
            Token::Escaped('0') => Err(self.error(offset, SyntaxError::ZeroBackreference)),
            Token::Escaped(c) if c.is_ascii_digit() => Ok(Node::BackRef {
                index: (c as u8 - b'0') as usize,
            }),
            Token::Escaped(c) if METACHARACTERS.contains(&c) => Ok(Node::Literal(c)),
            Token::Escaped(c) => Err(self.error(offset, SyntaxError::InvalidEscape(c))),
            Token::DanglingEscape => Err(self.error(offset, SyntaxError::DanglingEscape)),
        }
    }

    /// Parse the inside of a capturing group; the `(` is already consumed.
    ///
    /// The group index is allocated before the first branch is parsed, so
    /// outer groups number lower than the groups nested inside them.
    fn parse_group(&mut self, open: usize) -> ParseResult<Node> {
        let index = self.alloc_group_id();
        let branches = self.parse_alt()?;
        match self.cursor.read_token() {
            Ok(Token::Char(')')) => Ok(Node::Group { index, branches }),
            _ => Err(self.error(open, SyntaxError::UnterminatedGroup)),
        }
    }

    /// Parse a character set, e.g. `[abc]` or `[^abc]`; the `[` is already
    /// consumed.
    ///
    /// Examples:
    /// - Pattern: `[abc]`  → Set { members: [Literal('a'), Literal('b'), Literal('c')], negated: false }
    /// - Pattern: `[^\d]`  → Set { members: [Class(Digit)], negated: true }
    fn parse_set(&mut self, open: usize) -> ParseResult<Node> {
        let negated = if let Some(Token::Char('^')) = self.cursor.peek_token() {
            self.cursor.read_token().ok();
            true
        } else {
            false
        };

        let mut members = Vec::new();
        loop {
            let member = match self.cursor.read_token() {
                Ok(Token::Char(']')) => break,
                Ok(Token::Char(c)) => SetMember::Literal(c),
                Ok(Token::Escaped('d')) => SetMember::Class(ClassKind::Digit),
                Ok(Token::Escaped('w')) => SetMember::Class(ClassKind::Word),
                Ok(Token::Escaped(c)) => SetMember::Literal(c),
                Ok(Token::DanglingEscape) | Err(_) => {
                    return Err(self.error(open, SyntaxError::UnterminatedSet))
                }
            };
            members.push(member);
        }

        if members.is_empty() {
            return Err(self.error(open, SyntaxError::EmptySet));
        }
        Ok(Node::Set { members, negated })
    }
}
