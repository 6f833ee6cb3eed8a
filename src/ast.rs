use unicode_categories::UnicodeCategories;

/// Built-in single-rune classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// `\d`, any Unicode numeric code point.
    Digit,
    /// `\w`, a Unicode letter (L*), a decimal digit (Nd), or `_`.
    Word,
    /// `.`, any rune.
    Any,
}

impl ClassKind {
    pub fn matches(self, rune: char) -> bool {
        match self {
            ClassKind::Digit => rune.is_numeric(),
            ClassKind::Word => rune.is_letter() || rune.is_number_decimal_digit() || rune == '_',
            ClassKind::Any => true,
        }
    }
}

/// One member of a `[...]` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMember {
    Literal(char),
    Class(ClassKind),
}

impl SetMember {
    pub fn matches(self, rune: char) -> bool {
        match self {
            SetMember::Literal(c) => c == rune,
            SetMember::Class(kind) => kind.matches(rune),
        }
    }
}

/// A compiled pattern tree.
///
/// Trees are built once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(char),
    Class(ClassKind),
    Set {
        members: Vec<SetMember>,
        negated: bool,
    },
    /// `^`, the wrapped node must begin at subject offset 0.
    StartAnchor(Box<Node>),
    /// `$`, the subject must be used up once the wrapped node has matched.
    EndAnchor(Box<Node>),
    /// Greedy repetition. `max: None` is unbounded.
    Repeat {
        node: Box<Node>,
        min: usize,
        max: Option<usize>,
    },
    /// A capturing alternation. Every branch is a `Seq`.
    Group {
        index: usize,
        branches: Vec<Node>,
    },
    BackRef {
        index: usize,
    },
    Seq(Vec<Node>),
}

impl Node {
    /// `inner?`
    pub fn zero_or_one(inner: Node) -> Self {
        Node::Repeat {
            node: Box::new(inner),
            min: 0,
            max: Some(1),
        }
    }

    /// `inner+`
    pub fn one_or_more(inner: Node) -> Self {
        Node::Repeat {
            node: Box::new(inner),
            min: 1,
            max: None,
        }
    }

    /// Whether a quantifier may be applied directly to this node.
    pub fn is_quantifiable(&self) -> bool {
        matches!(self, Node::Literal(_) | Node::Class(_) | Node::Set { .. })
    }

    /// Short human description used in compile errors.
    pub fn describe(&self) -> &'static str {
        match self {
            Node::Literal(_) => "a literal",
            Node::Class(_) => "a character class",
            Node::Set { .. } => "a character set",
            Node::StartAnchor(_) => "a start anchor",
            Node::EndAnchor(_) => "an end anchor",
            Node::Repeat { .. } => "a quantified element",
            Node::Group { .. } => "a group",
            Node::BackRef { .. } => "a backreference",
            Node::Seq(_) => "a sequence",
        }
    }
}
