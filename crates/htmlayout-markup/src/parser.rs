use crate::ast::{Content, Document, Node, Span};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};

/// Deepest element nesting accepted; the root is at depth 1.
pub const MAX_DEPTH: usize = 256;

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
    /// Elements currently open.
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0, depth: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .map(|t| (t.line, t.col))
            .or_else(|| self.tokens.last().map(|t| (t.line, t.col)))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self.current_pos();
        ParseError::new(msg, line, col)
    }

    /// Skip whitespace-only text; anything else outside the root is an error.
    fn skip_blank(&mut self, where_: &str) -> Result<(), ParseError> {
        while let Token::Text(t) = self.peek() {
            if !t.trim().is_empty() {
                return Err(self.err(format!("text is not allowed {where_} the root element")));
            }
            self.advance();
        }
        Ok(())
    }

    // ── Document ──────────────────────────────────────────────────────────

    pub fn parse_document(&mut self) -> Result<Document, ParseError> {
        self.skip_blank("before")?;

        let root = match self.peek() {
            Token::StartTag { .. } => self.parse_element()?,
            Token::Eof => return Err(self.err("document is empty")),
            tok => return Err(self.err(format!("expected the root element, got {:?}", tok))),
        };

        self.skip_blank("after")?;
        match self.peek() {
            Token::Eof => Ok(Document { root }),
            Token::StartTag { name, .. } => Err(self.err(format!(
                "extra content after the root element: <{name}> (a fragment has exactly one root)"
            ))),
            Token::EndTag(name) => Err(self.err(format!("unexpected end tag </{name}>"))),
            tok => Err(self.err(format!("unexpected {:?} after the root element", tok))),
        }
    }

    // ── Element ───────────────────────────────────────────────────────────

    fn parse_element(&mut self) -> Result<Node, ParseError> {
        let (line, col) = self.current_pos();
        let span = Span::new(line, col);
        let (tag, attrs, self_closing) = match self.advance() {
            Token::StartTag { name, attrs, self_closing } => (name, attrs, self_closing),
            tok => return Err(self.err(format!("expected a start tag, got {:?}", tok))),
        };

        if self.depth >= MAX_DEPTH {
            return Err(ParseError::new(
                format!("elements nested deeper than {MAX_DEPTH} levels"),
                line,
                col,
            ));
        }

        let mut content = Vec::new();
        if !self_closing {
            self.depth += 1;
            let parsed = self.parse_content(&tag, span, &mut content);
            self.depth -= 1;
            parsed?;
        }

        Ok(Node { tag, attrs, content, span })
    }

    /// Parse everything up to the matching `</tag>`.
    ///
    /// Whitespace-only runs are dropped; adjacent runs (split by a comment or
    /// a CDATA section) are merged into one.
    fn parse_content(&mut self, tag: &str, open: Span, content: &mut Vec<Content>) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Token::StartTag { .. } => content.push(Content::Element(self.parse_element()?)),
                Token::Text(_) => {
                    if let Token::Text(t) = self.advance() {
                        match content.last_mut() {
                            Some(Content::Text(prev)) => prev.push_str(&t),
                            _ => content.push(Content::Text(t)),
                        }
                    }
                }
                Token::EndTag(name) => {
                    if name != tag {
                        return Err(self.err(format!(
                            "mismatched end tag: expected </{tag}> (opened at {open}), got </{name}>"
                        )));
                    }
                    self.advance();
                    break;
                }
                Token::Eof => {
                    return Err(self.err(format!("unclosed <{tag}> (opened at {open})")));
                }
            }
        }
        content.retain(|c| !matches!(c, Content::Text(t) if t.trim().is_empty()));
        Ok(())
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parse a markup fragment into a [`Document`].
pub fn parse_str(src: &str) -> Result<Document, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_document()
}
