use crate::error::Error;
use crate::syntax::token::{Token, TokenKind};

/// Tokenizer for a single expression clause: an assignment right-hand side or
/// one of the three clauses of a `for` header. Clauses never span lines, so
/// only columns are tracked.
pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source: source.as_bytes(), pos: 0 }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, self.column()));
                break;
            }
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, Error> {
        let col = self.column();
        let ch = self.advance();

        let kind = match ch {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,

            b'=' => {
                if self.peek() == b'=' { self.advance(); TokenKind::EqEq }
                else { TokenKind::Eq }
            }
            b'!' => {
                if self.peek() == b'=' { self.advance(); TokenKind::BangEq }
                else {
                    return Err(Error::eval_at(col, "expected `!=`, bare `!` is not valid"));
                }
            }
            b'<' => {
                if self.peek() == b'=' { self.advance(); TokenKind::LtEq }
                else { TokenKind::Lt }
            }
            b'>' => {
                if self.peek() == b'=' { self.advance(); TokenKind::GtEq }
                else { TokenKind::Gt }
            }

            b'0'..=b'9' | b'.' => TokenKind::Number(self.read_number(ch, col)?),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => TokenKind::Ident(self.read_ident(ch)),

            other => {
                return Err(Error::eval_at(col, format!("unexpected character `{}`", other as char)));
            }
        };

        Ok(Token::new(kind, col))
    }

    // ─── Primitives ──────────────────────────────────────────────────────────

    fn advance(&mut self) -> u8 {
        let ch = self.source[self.pos];
        self.pos += 1;
        ch
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() { 0 } else { self.source[self.pos] }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn column(&self) -> usize {
        self.pos + 1
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_ascii_whitespace() {
            self.advance();
        }
    }

    // ─── Readers ─────────────────────────────────────────────────────────────

    /// Digits with an optional fractional part and exponent (`2.5e-3`).
    /// A leading `.` is accepted (`.5`) but must be followed by a digit. An
    /// `e` not followed by exponent digits is left for the identifier reader.
    fn read_number(&mut self, first: u8, col: usize) -> Result<f64, Error> {
        let mut s = String::new();
        s.push(first as char);
        let mut seen_dot = first == b'.';
        while !self.is_at_end() {
            match self.peek() {
                b'0'..=b'9' => s.push(self.advance() as char),
                b'.' if !seen_dot => {
                    seen_dot = true;
                    s.push(self.advance() as char);
                }
                b'e' | b'E' if self.exponent_follows() => {
                    s.push(self.advance() as char);
                    if matches!(self.peek(), b'+' | b'-') {
                        s.push(self.advance() as char);
                    }
                    while self.peek().is_ascii_digit() {
                        s.push(self.advance() as char);
                    }
                    break;
                }
                _ => break,
            }
        }
        s.parse().map_err(|_| Error::eval_at(col, format!("malformed number `{s}`")))
    }

    /// True when the `e`/`E` at the cursor starts `[+-]?digits`.
    fn exponent_follows(&self) -> bool {
        let at = |offset: usize| self.source.get(self.pos + offset).copied().unwrap_or(0);
        match at(1) {
            b'+' | b'-' => at(2).is_ascii_digit(),
            b => b.is_ascii_digit(),
        }
    }

    fn read_ident(&mut self, first: u8) -> String {
        let mut s = String::new();
        s.push(first as char);
        while !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == b'_') {
            s.push(self.advance() as char);
        }
        s
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn lex(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn lex_err(src: &str) -> Error {
        Lexer::new(src).tokenize().unwrap_err()
    }

    #[test]
    fn empty() {
        assert_eq!(lex(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn integer_becomes_number() {
        assert_eq!(lex("42"), vec![TokenKind::Number(42.0), TokenKind::Eof]);
    }

    #[test]
    fn fractional_numbers() {
        assert_eq!(lex("3.25"), vec![TokenKind::Number(3.25), TokenKind::Eof]);
        assert_eq!(lex(".5"), vec![TokenKind::Number(0.5), TokenKind::Eof]);
    }

    #[test]
    fn exponent_numbers() {
        assert_eq!(lex("1e3"), vec![TokenKind::Number(1000.0), TokenKind::Eof]);
        assert_eq!(lex("2.5E-1"), vec![TokenKind::Number(0.25), TokenKind::Eof]);
        assert_eq!(lex("1e+2"), vec![TokenKind::Number(100.0), TokenKind::Eof]);
    }

    #[test]
    fn bare_e_stays_an_identifier() {
        assert_eq!(
            lex("2e"),
            vec![TokenKind::Number(2.0), TokenKind::Ident("e".into()), TokenKind::Eof]
        );
        assert_eq!(
            lex("3e+x"),
            vec![
                TokenKind::Number(3.0), TokenKind::Ident("e".into()),
                TokenKind::Plus, TokenKind::Ident("x".into()), TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lone_dot_is_malformed() {
        assert_eq!(lex_err(".").kind, ErrorKind::Eval);
    }

    #[test]
    fn identifiers() {
        assert_eq!(
            lex("box_1 + i"),
            vec![TokenKind::Ident("box_1".into()), TokenKind::Plus, TokenKind::Ident("i".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn two_char_operators() {
        assert_eq!(lex("=="), vec![TokenKind::EqEq,   TokenKind::Eof]);
        assert_eq!(lex("!="), vec![TokenKind::BangEq, TokenKind::Eof]);
        assert_eq!(lex("<="), vec![TokenKind::LtEq,   TokenKind::Eof]);
        assert_eq!(lex(">="), vec![TokenKind::GtEq,   TokenKind::Eof]);
    }

    #[test]
    fn assignment_clause() {
        assert_eq!(
            lex("i=i+1"),
            vec![
                TokenKind::Ident("i".into()), TokenKind::Eq,
                TokenKind::Ident("i".into()), TokenKind::Plus, TokenKind::Number(1.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn bare_bang_error() {
        assert_eq!(lex_err("!x").kind, ErrorKind::Eval);
    }

    #[test]
    fn unexpected_character_reports_column() {
        let err = lex_err("1 + #");
        assert!(err.message.starts_with("5:"), "got {}", err.message);
    }
}
