use crate::error::Span;

/// A parsed stylesheet. Every byte of the source lives in exactly one node,
/// so emitting an untouched tree gives back the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    AtRule(AtRule),
    StringLiteral(StringLiteral),
    Group(Group),
    Comment(String),
    Text(String),
}

/// `@keyword` plus its prelude and, when present, its block.
///
/// The terminating `;` is not part of the at-rule; it stays in the
/// surrounding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    pub keyword: String,
    pub span: Span,
    pub children: Vec<Node>,
}

impl AtRule {
    pub fn is_import(&self) -> bool {
        self.keyword.eq_ignore_ascii_case("import")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    /// Raw text between the quotes, escapes included.
    pub value: String,
    pub quote: Quote,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub delimiter: Delimiter,
    pub span: Span,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Brace,
    Paren,
    Bracket,
    Interpolation,
}

impl Delimiter {
    pub fn open(self) -> &'static str {
        match self {
            Delimiter::Brace => "{",
            Delimiter::Paren => "(",
            Delimiter::Bracket => "[",
            Delimiter::Interpolation => "#{",
        }
    }

    pub fn close(self) -> char {
        match self {
            Delimiter::Brace | Delimiter::Interpolation => '}',
            Delimiter::Paren => ')',
            Delimiter::Bracket => ']',
        }
    }
}
