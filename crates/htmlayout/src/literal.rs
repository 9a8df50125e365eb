//! Parser for the literal text of `data-*` attributes.
//!
//! Only data is accepted: strings, numbers, booleans, `None`, lists, tuples
//! and dicts, nested freely. Nothing is ever evaluated, so markup from an
//! untrusted source cannot run code.
//!
//! ```rust
//! use htmlayout::literal::parse_literal;
//! use htmlayout::Value;
//!
//! let v = parse_literal("['A', 'B']").unwrap();
//! assert_eq!(v, Value::List(vec![Value::from("A"), Value::from("B")]));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

const MAX_DEPTH: usize = 64;

// ── LiteralError ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralError {
    pub message: String,
    /// Byte offset into the literal text.
    pub offset: usize,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at offset {})", self.message, self.offset)
    }
}

impl std::error::Error for LiteralError {}

// ── Entry point ───────────────────────────────────────────────────────────

/// Parse one complete literal. Surrounding whitespace is ignored; anything
/// else after the value is an error.
pub fn parse_literal(src: &str) -> Result<Value, LiteralError> {
    let mut p = LiteralParser { src, pos: 0, depth: 0 };
    p.skip_whitespace();
    if p.peek().is_none() {
        return Err(p.err("empty literal"));
    }
    let value = p.parse_value()?;
    p.skip_whitespace();
    match p.peek() {
        None => Ok(value),
        Some(c) => Err(p.err(format!("unexpected {c:?} after the literal"))),
    }
}

// ── LiteralParser ─────────────────────────────────────────────────────────

struct LiteralParser<'s> {
    src: &'s str,
    pos: usize,
    depth: usize,
}

impl<'s> LiteralParser<'s> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn err(&self, msg: impl Into<String>) -> LiteralError {
        LiteralError { message: msg.into(), offset: self.pos }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(self.err(format!("expected {expected:?}, got {c:?}"))),
            None => Err(self.err(format!("expected {expected:?}, got end of input"))),
        }
    }

    // ── Values ────────────────────────────────────────────────────────────

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.err("expected a value, got end of input")),
            Some('\'' | '"') => self.parse_string().map(Value::Str),
            Some('[') => self.nested(|p| p.parse_sequence(']').map(Value::List)),
            Some('(') => self.nested(Self::parse_paren),
            Some('{') => self.nested(Self::parse_dict),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_keyword(),
            Some(c) => Err(self.err(format!("unexpected {c:?}"))),
        }
    }

    fn nested(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.err(format!("literal nested deeper than {MAX_DEPTH} levels")));
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn parse_keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        match &self.src[start..self.pos] {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::None),
            word => Err(LiteralError {
                message: format!("{word:?} is not a literal (quote it to make a string)"),
                offset: start,
            }),
        }
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.advance();
        }
        let mut is_float = false;
        let mut digits = 0;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
            digits += 1;
        }
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(LiteralError { message: "expected digits".to_string(), offset: start });
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.advance();
            if matches!(self.peek(), Some('-' | '+')) {
                self.advance();
            }
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.err("expected exponent digits"));
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            return Err(self.err("invalid character in number"));
        }

        let text = &self.src[start..self.pos];
        let text = text.strip_prefix('+').unwrap_or(text);
        if is_float {
            text.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| LiteralError { message: format!("invalid float {text:?}"), offset: start })
        } else {
            text.parse::<i64>()
                .map(Value::Int)
                .map_err(|_| LiteralError { message: format!("integer {text:?} out of range"), offset: start })
        }
    }

    fn parse_string(&mut self) -> Result<String, LiteralError> {
        let start = self.pos;
        let quote = self.advance();
        let mut s = String::new();
        loop {
            match self.advance() {
                None => {
                    return Err(LiteralError {
                        message: "unterminated string literal".to_string(),
                        offset: start,
                    });
                }
                Some(c) if Some(c) == quote => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('0') => s.push('\0'),
                    Some('\\') => s.push('\\'),
                    Some('\'') => s.push('\''),
                    Some('"') => s.push('"'),
                    Some('u') => s.push(self.parse_unicode_escape()?),
                    Some(c) => {
                        // Unknown escapes stay as written, like Python.
                        s.push('\\');
                        s.push(c);
                    }
                    None => return Err(self.err("unterminated escape sequence")),
                },
                Some(c) => s.push(c),
            }
        }
        Ok(s)
    }

    fn parse_unicode_escape(&mut self) -> Result<char, LiteralError> {
        let start = self.pos;
        for _ in 0..4 {
            match self.advance() {
                Some(c) if c.is_ascii_hexdigit() => {}
                _ => return Err(self.err("\\u escape needs 4 hex digits")),
            }
        }
        u32::from_str_radix(&self.src[start..self.pos], 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| LiteralError {
                message: format!("invalid \\u escape {:?}", &self.src[start..self.pos]),
                offset: start,
            })
    }

    // ── Containers ────────────────────────────────────────────────────────

    /// `item, item, ...` up to `close`; a trailing comma is allowed.
    /// The opening bracket is consumed here.
    fn parse_sequence(&mut self, close: char) -> Result<Vec<Value>, LiteralError> {
        let open = self.pos;
        self.advance();
        // Running out of input is reported at the opening bracket.
        let unclosed = || LiteralError {
            message: format!("unclosed list, expected {close:?}"),
            offset: open,
        };
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(c) if c == close => {
                    self.advance();
                    return Ok(items);
                }
                None => return Err(unclosed()),
                Some(_) => {}
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(c) if c == close => {}
                Some(c) => return Err(self.err(format!("expected ',' or {close:?}, got {c:?}"))),
                None => return Err(unclosed()),
            }
        }
    }

    /// `()` is an empty tuple, `(x)` is just `x`, `(x,)` and `(x, y)` are tuples.
    fn parse_paren(&mut self) -> Result<Value, LiteralError> {
        self.advance(); // consume `(`
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.advance();
            return Ok(Value::List(Vec::new()));
        }
        let first = self.parse_value()?;
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.advance();
            return Ok(first);
        }
        let mut items = vec![first];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(')') => {
                    self.advance();
                    return Ok(Value::List(items));
                }
                Some(',') => {
                    self.advance();
                    self.skip_whitespace();
                    if self.peek() != Some(')') {
                        items.push(self.parse_value()?);
                    }
                }
                Some(c) => return Err(self.err(format!("expected ',' or ')', got {c:?}"))),
                None => return Err(self.err("expected ',' or ')', got end of input")),
            }
        }
    }

    fn parse_dict(&mut self) -> Result<Value, LiteralError> {
        self.advance(); // consume `{`
        let mut map = BTreeMap::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.advance();
                return Ok(Value::Dict(map));
            }
            let key_pos = self.pos;
            let key = match self.parse_value()? {
                Value::Str(s) => s,
                Value::Int(i) => i.to_string(),
                other => {
                    return Err(LiteralError {
                        message: format!("dict keys must be strings or integers, got {other}"),
                        offset: key_pos,
                    });
                }
            };
            self.skip_whitespace();
            match self.peek() {
                Some(':') => {
                    self.advance();
                }
                Some(',' | '}') => return Err(self.err("set literals are not supported")),
                _ => self.expect(':')?,
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some('}') => {}
                Some(c) => return Err(self.err(format!("expected ',' or '}}', got {c:?}"))),
                None => return Err(self.err("unterminated dict literal")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(src: &str) -> Value { parse_literal(src).unwrap() }
    fn err(src: &str) -> LiteralError { parse_literal(src).unwrap_err() }

    fn list(items: Vec<Value>) -> Value { Value::List(items) }

    #[test] fn int() { assert_eq!(ok("42"), Value::Int(42)); }
    #[test] fn negative_int() { assert_eq!(ok("-7"), Value::Int(-7)); }
    #[test] fn plus_sign() { assert_eq!(ok("+3"), Value::Int(3)); }
    #[test] fn float() { assert_eq!(ok("0.75"), Value::Float(0.75)); }
    #[test] fn float_leading_dot() { assert_eq!(ok(".5"), Value::Float(0.5)); }
    #[test] fn float_exponent() { assert_eq!(ok("1e3"), Value::Float(1000.0)); }
    #[test] fn python_bools() {
        assert_eq!(ok("True"), Value::Bool(true));
        assert_eq!(ok("False"), Value::Bool(false));
    }
    #[test] fn json_bools() {
        assert_eq!(ok("true"), Value::Bool(true));
        assert_eq!(ok("null"), Value::None);
    }
    #[test] fn none() { assert_eq!(ok("None"), Value::None); }
    #[test] fn single_quoted() { assert_eq!(ok("'Red'"), Value::from("Red")); }
    #[test] fn double_quoted() { assert_eq!(ok("\"Red\""), Value::from("Red")); }
    #[test] fn escapes() { assert_eq!(ok(r"'a\'b\né'"), Value::from("a'b\né")); }
    #[test] fn unknown_escape_kept() { assert_eq!(ok(r"'\d+'"), Value::from(r"\d+")); }
    #[test] fn surrounding_whitespace() { assert_eq!(ok("  1  "), Value::Int(1)); }

    #[test]
    fn list_of_ints() {
        assert_eq!(ok("[1, 2, 3]"), list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
    }

    #[test]
    fn list_trailing_comma() {
        assert_eq!(ok("['A','B',]"), list(vec![Value::from("A"), Value::from("B")]));
    }

    #[test] fn empty_list() { assert_eq!(ok("[]"), list(vec![])); }
    #[test] fn empty_tuple() { assert_eq!(ok("()"), list(vec![])); }
    #[test] fn parenthesized_value() { assert_eq!(ok("(5)"), Value::Int(5)); }
    #[test] fn one_tuple() { assert_eq!(ok("(5,)"), list(vec![Value::Int(5)])); }
    #[test] fn tuple() { assert_eq!(ok("(1, 'x')"), list(vec![Value::Int(1), Value::from("x")])); }

    #[test]
    fn nested_options() {
        let v = ok("[{'label': 'Red', 'value': 'r'}, {'label': 'Blue', 'value': 'b', 'disabled': True}]");
        let items = v.as_list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_dict().unwrap()["label"], Value::from("Red"));
        assert_eq!(items[1].as_dict().unwrap()["disabled"], Value::Bool(true));
    }

    #[test]
    fn json_object() {
        let v = ok(r#"{"color": "red", "fontSize": 12}"#);
        assert_eq!(v.as_dict().unwrap()["fontSize"], Value::Int(12));
    }

    #[test]
    fn int_dict_keys_are_stringified() {
        let v = ok("{0: 'zero', 10: 'ten'}");
        assert_eq!(v.as_dict().unwrap()["10"], Value::from("ten"));
    }

    #[test] fn empty_dict() { assert_eq!(ok("{}"), Value::Dict(BTreeMap::new())); }

    #[test] fn err_empty() { assert_eq!(err("   ").message, "empty literal"); }
    #[test] fn err_bare_word() { err("yes"); }
    #[test] fn err_name_lookup() { err("__import__"); }
    #[test] fn err_call() { err("print(1)"); }
    #[test] fn err_expression() { err("1 + 1"); }
    #[test] fn err_unclosed_list() { err("[1, 2"); }
    #[test] fn err_missing_comma() { err("[1 2]"); }
    #[test] fn err_unterminated_string() { err("'abc"); }
    #[test] fn err_set() { err("{1, 2}"); }
    #[test] fn err_list_key() { err("{[1]: 2}"); }
    #[test] fn err_int_overflow() { err("99999999999999999999"); }
    #[test] fn err_trailing_garbage() { err("[1]]"); }
    #[test] fn err_number_suffix() { err("12px"); }

    #[test]
    fn err_deep_nesting() {
        let src = format!("{}{}", "[".repeat(100), "]".repeat(100));
        assert!(err(&src).message.contains("nested"));
    }

    #[test]
    fn err_offset_points_at_problem() {
        assert_eq!(err("[1, yes]").offset, 4);
    }

    #[test]
    fn unclosed_list_points_at_its_bracket() {
        let e = err("[1, 2");
        assert_eq!(e.offset, 0);
        assert!(e.message.starts_with("unclosed list"), "{}", e.message);
        assert_eq!(err("{'a': [1, 2").offset, 6);
        assert_eq!(err("['A', ").offset, 0);
    }
}
