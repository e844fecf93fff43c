use crate::ast::{AtRule, Delimiter, Group, Node, Quote, StringLiteral, Stylesheet};
use crate::error::{ParseError, Span};

pub fn parse(input: &str) -> Result<Stylesheet, ParseError> {
    let mut parser = Parser::new(input);
    let nodes = parser.parse_nodes(None)?;
    Ok(Stylesheet { nodes })
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

/// Collects nodes for one level of the tree, merging plain characters into
/// a single `Node::Text`.
#[derive(Default)]
struct NodeBuf {
    nodes: Vec<Node>,
    text: String,
}

impl NodeBuf {
    fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    fn push(&mut self, node: Node) {
        self.flush();
        self.nodes.push(node);
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.nodes.push(Node::Text(std::mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Vec<Node> {
        self.flush();
        self.nodes
    }

    /// Whether the pending text ends in a standalone `url` function name.
    fn ends_with_url(&self) -> bool {
        let split = self.text.len().saturating_sub(3);
        match (self.text.get(..split), self.text.get(split..)) {
            (Some(head), Some(tail)) => {
                tail.eq_ignore_ascii_case("url") && !head.chars().last().is_some_and(is_ident_char)
            }
            _ => false,
        }
    }
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        let start = Span::start();
        Self {
            src,
            pos: 0,
            line: start.line,
            column: start.column,
        }
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn parse_nodes(&mut self, open: Option<(Delimiter, Span)>) -> Result<Vec<Node>, ParseError> {
        let mut buf = NodeBuf::default();
        loop {
            match self.peek() {
                None => {
                    return match open {
                        Some((delimiter, span)) => Err(ParseError::Unclosed {
                            open: delimiter.open(),
                            span,
                        }),
                        None => Ok(buf.finish()),
                    };
                }
                Some(ch @ ('}' | ')' | ']')) => {
                    return match open {
                        Some((delimiter, _)) if delimiter.close() == ch => {
                            self.bump();
                            Ok(buf.finish())
                        }
                        _ => Err(ParseError::Unexpected {
                            found: ch,
                            span: self.span(),
                        }),
                    };
                }
                Some(_) => self.parse_item(&mut buf, true)?,
            }
        }
    }

    fn parse_item(&mut self, buf: &mut NodeBuf, allow_at_rule: bool) -> Result<(), ParseError> {
        let Some(ch) = self.peek() else {
            return Ok(());
        };
        let next = self.peek_at(1);

        match ch {
            '"' | '\'' => {
                let literal = self.parse_string()?;
                buf.push(Node::StringLiteral(literal));
            }
            '/' if next == Some('*') => {
                let comment = self.parse_block_comment()?;
                buf.push(Node::Comment(comment));
            }
            '/' if next == Some('/') => {
                let comment = self.parse_line_comment();
                buf.push(Node::Comment(comment));
            }
            '#' if next == Some('{') => {
                let group = self.parse_group(Delimiter::Interpolation)?;
                buf.push(Node::Group(group));
            }
            '{' => {
                let group = self.parse_group(Delimiter::Brace)?;
                buf.push(Node::Group(group));
            }
            '(' if buf.ends_with_url() && !self.quoted_url_follows() => {
                let group = self.parse_raw_url()?;
                buf.push(Node::Group(group));
            }
            '(' => {
                let group = self.parse_group(Delimiter::Paren)?;
                buf.push(Node::Group(group));
            }
            '[' => {
                let group = self.parse_group(Delimiter::Bracket)?;
                buf.push(Node::Group(group));
            }
            '@' if allow_at_rule && next.is_some_and(is_ident_start) => {
                let rule = self.parse_at_rule()?;
                buf.push(Node::AtRule(rule));
            }
            '\\' => {
                self.bump();
                buf.push_char(ch);
                if let Some(escaped) = self.bump() {
                    buf.push_char(escaped);
                }
            }
            _ => {
                self.bump();
                buf.push_char(ch);
            }
        }
        Ok(())
    }

    fn parse_string(&mut self) -> Result<StringLiteral, ParseError> {
        let span = self.span();
        let Some(open) = self.bump() else {
            return Err(ParseError::UnterminatedString(span));
        };
        let quote = if open == '"' { Quote::Double } else { Quote::Single };
        let start = self.pos;

        loop {
            match self.peek() {
                None | Some('\n') => return Err(ParseError::UnterminatedString(span)),
                Some('\\') => {
                    self.bump();
                    if self.bump().is_none() {
                        return Err(ParseError::UnterminatedString(span));
                    }
                }
                Some(ch) if ch == open => break,
                Some(_) => {
                    self.bump();
                }
            }
        }

        let value = self.src[start..self.pos].to_string();
        self.bump();
        Ok(StringLiteral { value, quote, span })
    }

    fn parse_block_comment(&mut self) -> Result<String, ParseError> {
        let span = self.span();
        let start = self.pos;
        self.bump();
        self.bump();
        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedComment(span)),
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.bump();
                    self.bump();
                    return Ok(self.src[start..self.pos].to_string());
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn parse_line_comment(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn parse_group(&mut self, delimiter: Delimiter) -> Result<Group, ParseError> {
        let span = self.span();
        for _ in delimiter.open().chars() {
            self.bump();
        }
        let children = self.parse_nodes(Some((delimiter, span)))?;
        Ok(Group {
            delimiter,
            span,
            children,
        })
    }

    fn quoted_url_follows(&self) -> bool {
        self.src[self.pos + 1..]
            .trim_start()
            .starts_with(['"', '\''])
    }

    /// Unquoted `url(...)` bodies are taken verbatim so that `//` in a URL
    /// is not read as a comment.
    fn parse_raw_url(&mut self) -> Result<Group, ParseError> {
        let span = self.span();
        self.bump();
        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::Unclosed {
                        open: Delimiter::Paren.open(),
                        span,
                    })
                }
                Some(')') => break,
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        let raw = &self.src[start..self.pos];
        self.bump();

        let children = if raw.is_empty() {
            Vec::new()
        } else {
            vec![Node::Text(raw.to_string())]
        };
        Ok(Group {
            delimiter: Delimiter::Paren,
            span,
            children,
        })
    }

    fn parse_at_rule(&mut self) -> Result<AtRule, ParseError> {
        let span = self.span();
        self.bump();
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        let keyword = self.src[start..self.pos].to_string();

        let mut buf = NodeBuf::default();
        loop {
            match self.peek() {
                None | Some(';' | '}' | ')' | ']') => break,
                Some('{') => {
                    let block = self.parse_group(Delimiter::Brace)?;
                    buf.push(Node::Group(block));
                    break;
                }
                Some(_) => self.parse_item(&mut buf, false)?,
            }
        }

        Ok(AtRule {
            keyword,
            span,
            children: buf.finish(),
        })
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '-' || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}
