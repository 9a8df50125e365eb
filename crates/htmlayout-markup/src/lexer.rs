use crate::ast::{Attr, Span};
use crate::error::ParseError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `<name attr="v">` or `<name attr="v"/>`
    StartTag {
        name: String,
        attrs: Vec<Attr>,
        self_closing: bool,
    },
    /// `</name>`
    EndTag(String),
    /// Character data with entities decoded. Never empty.
    Text(String),
    // Sentinel
    Eof,
}

/// A token plus the 1-based position where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        // A leading byte-order mark is not content.
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        Self { src, pos: 0, line: 1, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let (line, col) = (self.line, self.col);
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(TokenWithPos { token, line, col });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Consume everything up to and including `terminator`.
    /// Returns the skipped text without the terminator.
    fn skip_past(&mut self, terminator: &str, what: &str) -> Result<&'s str, ParseError> {
        let (line, col) = (self.line, self.col);
        let start = self.pos;
        match self.rest().find(terminator) {
            Some(offset) => {
                let body = &self.src[start..start + offset];
                self.advance_by(body.chars().count() + terminator.chars().count());
                Ok(body)
            }
            None => Err(ParseError::new(format!("unterminated {what}"), line, col)),
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Ok(Token::Eof);
            }
            if rest.starts_with("<!--") {
                self.advance_by(4);
                self.skip_past("-->", "comment")?;
            } else if rest.starts_with("<![CDATA[") {
                self.advance_by(9);
                let body = self.skip_past("]]>", "CDATA section")?;
                if !body.is_empty() {
                    return Ok(Token::Text(body.to_string()));
                }
            } else if rest.starts_with("<?") {
                self.advance_by(2);
                self.skip_past("?>", "processing instruction")?;
            } else if rest.starts_with("<!") {
                // <!DOCTYPE ...> and friends carry nothing the builder uses.
                self.advance_by(2);
                self.skip_past(">", "declaration")?;
            } else if rest.starts_with("</") {
                return self.lex_end_tag();
            } else if rest.starts_with('<') {
                return self.lex_start_tag();
            } else {
                return self.lex_text();
            }
        }
    }

    // ── Tags ──────────────────────────────────────────────────────────────

    fn lex_name(&mut self, what: &str) -> Result<String, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' || c == ':' => {}
            Some(c) => return Err(self.err(format!("expected {what}, got {c:?}"))),
            None => return Err(self.err(format!("expected {what}, got end of input"))),
        }
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')) {
            self.advance();
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn lex_end_tag(&mut self) -> Result<Token, ParseError> {
        self.advance_by(2); // consume `</`
        let name = self.lex_name("tag name")?;
        self.skip_whitespace();
        match self.advance() {
            Some('>') => Ok(Token::EndTag(name)),
            Some(c) => Err(self.err(format!("expected '>' to close </{name}, got {c:?}"))),
            None => Err(self.err(format!("unterminated end tag </{name}"))),
        }
    }

    fn lex_start_tag(&mut self) -> Result<Token, ParseError> {
        self.advance(); // consume `<`
        let name = self.lex_name("tag name")?;
        let mut attrs: Vec<Attr> = Vec::new();

        loop {
            let had_space = matches!(self.peek(), Some(c) if c.is_whitespace());
            self.skip_whitespace();
            match self.peek() {
                Some('>') => {
                    self.advance();
                    return Ok(Token::StartTag { name, attrs, self_closing: false });
                }
                Some('/') => {
                    self.advance();
                    return match self.advance() {
                        Some('>') => Ok(Token::StartTag { name, attrs, self_closing: true }),
                        _ => Err(self.err(format!("expected '>' after '/' in <{name}>"))),
                    };
                }
                None => return Err(self.err(format!("unterminated start tag <{name}"))),
                Some(_) if !had_space => {
                    return Err(self.err(format!("expected whitespace before attribute in <{name}>")));
                }
                Some(_) => {
                    let attr = self.lex_attr()?;
                    if attrs.iter().any(|a| a.name == attr.name) {
                        return Err(ParseError::new(
                            format!("duplicate attribute {:?} in <{name}>", attr.name),
                            attr.span.line,
                            attr.span.col,
                        ));
                    }
                    attrs.push(attr);
                }
            }
        }
    }

    fn lex_attr(&mut self) -> Result<Attr, ParseError> {
        let span = Span::new(self.line, self.col);
        let name = self.lex_name("attribute name")?;
        self.skip_whitespace();
        if self.peek() != Some('=') {
            return Err(self.err(format!("attribute {name:?} has no value")));
        }
        self.advance(); // consume `=`
        self.skip_whitespace();
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.err(format!("value of attribute {name:?} must be quoted"))),
        };
        self.advance();
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.err(format!("unterminated value of attribute {name:?}"))),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('<') => return Err(self.err(format!("'<' not allowed in value of attribute {name:?}"))),
                Some('&') => value.push_str(&self.lex_entity()?),
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }
        Ok(Attr { name, value, span })
    }

    // ── Text ──────────────────────────────────────────────────────────────

    fn lex_text(&mut self) -> Result<Token, ParseError> {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            match c {
                '<' => break,
                '&' => s.push_str(&self.lex_entity()?),
                c => {
                    self.advance();
                    s.push(c);
                }
            }
        }
        Ok(Token::Text(s))
    }

    /// Decode `&name;`, `&#NN;` or `&#xHH;` at the cursor.
    fn lex_entity(&mut self) -> Result<String, ParseError> {
        let (line, col) = (self.line, self.col);
        self.advance(); // consume `&`
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '#') {
            self.advance();
        }
        let name = &self.src[start..self.pos];
        if self.advance() != Some(';') {
            return Err(ParseError::new(format!("unterminated entity reference &{name}"), line, col));
        }
        let decoded = match name {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = name.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    return Err(ParseError::new(format!("unknown entity &{name};"), line, col));
                };
                match code.and_then(char::from_u32) {
                    Some(c) => c,
                    None => {
                        return Err(ParseError::new(
                            format!("invalid character reference &{name};"),
                            line,
                            col,
                        ));
                    }
                }
            }
        };
        Ok(decoded.to_string())
    }
}
