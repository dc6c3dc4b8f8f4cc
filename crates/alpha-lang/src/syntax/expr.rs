//! Precedence-climbing parser for expression clauses.
//!
//! ```text
//! clause         := IDENT '=' clause | equality
//! equality       := comparison (('==' | '!=') comparison)*
//! comparison     := additive (('<' | '<=' | '>' | '>=') additive)*
//! additive       := multiplicative (('+' | '-') multiplicative)*
//! multiplicative := unary (('*' | '/' | '%') unary)*
//! unary          := '-' unary | primary
//! primary        := NUMBER | IDENT | '(' clause ')'
//! ```

use crate::error::Error;
use crate::syntax::ast::{BinOp, Clause, Expr};
use crate::syntax::lexer::Lexer;
use crate::syntax::token::{Token, TokenKind};

/// Lex and parse `source` into a `Clause`. Never fails: a malformed clause
/// carries its error until it is evaluated.
pub fn parse_clause(source: &str) -> Clause {
    let source = source.trim();
    let parsed = Lexer::new(source)
        .tokenize()
        .and_then(|tokens| ExprParser::new(tokens).parse());
    Clause { source: source.to_string(), parsed }
}

/// Deepest run of parentheses, unary minuses and chained assignments.
pub const MAX_NESTING: usize = 128;

/// Most operator nodes one clause may hold. Bounds the height of
/// left-leaning chains like `1 + 1 + ... + 1` for the evaluator.
pub const MAX_OPERATORS: usize = 1024;

pub struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    operators: usize,
}

impl ExprParser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0, depth: 0, operators: 0 }
    }

    pub fn parse(mut self) -> Result<Expr, Error> {
        if self.is_at_end() {
            return Err(self.unexpected("expression"));
        }
        let expr = self.parse_assignment()?;
        if !self.is_at_end() {
            return Err(self.unexpected("end of expression"));
        }
        Ok(expr)
    }

    // ─── Precedence levels ───────────────────────────────────────────────────

    fn parse_assignment(&mut self) -> Result<Expr, Error> {
        if let TokenKind::Ident(name) = self.peek_kind() {
            if self.peek_next_is(&TokenKind::Eq) {
                self.advance();
                self.advance();
                self.count_operator()?;
                self.descend()?;
                let value = self.parse_assignment()?;
                self.depth -= 1;
                return Ok(Expr::Assign { name, value: Box::new(value) });
            }
        }
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Expr, Error> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq   => BinOp::Eq,
                TokenKind::BangEq => BinOp::NotEq,
                _ => break,
            };
            let column = self.advance().column;
            self.count_operator()?;
            let right = self.parse_comparison()?;
            left = Expr::BinOp { left: Box::new(left), op, right: Box::new(right), column };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, Error> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt   => BinOp::Lt,
                TokenKind::LtEq => BinOp::LtEq,
                TokenKind::Gt   => BinOp::Gt,
                TokenKind::GtEq => BinOp::GtEq,
                _ => break,
            };
            let column = self.advance().column;
            self.count_operator()?;
            let right = self.parse_additive()?;
            left = Expr::BinOp { left: Box::new(left), op, right: Box::new(right), column };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, Error> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus  => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let column = self.advance().column;
            self.count_operator()?;
            let right = self.parse_multiplicative()?;
            left = Expr::BinOp { left: Box::new(left), op, right: Box::new(right), column };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, Error> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star    => BinOp::Mul,
                TokenKind::Slash   => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            let column = self.advance().column;
            self.count_operator()?;
            let right = self.parse_unary()?;
            left = Expr::BinOp { left: Box::new(left), op, right: Box::new(right), column };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, Error> {
        if self.check(&TokenKind::Minus) {
            self.advance();
            self.count_operator()?;
            self.descend()?;
            let operand = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Neg(Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, Error> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Number(v) => { self.advance(); Ok(Expr::Number(v)) }
            TokenKind::Ident(name) => { self.advance(); Ok(Expr::Ident(name, tok.column)) }
            TokenKind::LParen => {
                self.advance();
                self.descend()?;
                let inner = self.parse_assignment()?;
                self.depth -= 1;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    // ─── Limits ──────────────────────────────────────────────────────────────

    fn descend(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(Error::eval_at(self.peek().column, "expression nested too deeply"));
        }
        Ok(())
    }

    fn count_operator(&mut self) -> Result<(), Error> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(Error::eval_at(self.peek().column, "expression has too many operators"));
        }
        Ok(())
    }

    // ─── Token primitives ────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind.clone()
    }

    fn peek_next_is(&self, kind: &TokenKind) -> bool {
        self.tokens.get(self.pos + 1).is_some_and(|t| t.kind == *kind)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() { self.pos += 1; }
        tok
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.tokens[self.pos].kind == *kind
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&describe(&kind)))
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.tokens[self.pos].kind, TokenKind::Eof)
    }

    fn unexpected(&self, expected: &str) -> Error {
        let tok = self.peek();
        Error::eval_at(tok.column, format!("expected {expected}, found {}", describe(&tok.kind)))
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number(v) => format!("number `{v}`"),
        TokenKind::Ident(s)  => format!("identifier `{s}`"),
        TokenKind::Plus      => "`+`".into(),
        TokenKind::Minus     => "`-`".into(),
        TokenKind::Star      => "`*`".into(),
        TokenKind::Slash     => "`/`".into(),
        TokenKind::Percent   => "`%`".into(),
        TokenKind::Eq        => "`=`".into(),
        TokenKind::EqEq      => "`==`".into(),
        TokenKind::BangEq    => "`!=`".into(),
        TokenKind::Lt        => "`<`".into(),
        TokenKind::LtEq      => "`<=`".into(),
        TokenKind::Gt        => "`>`".into(),
        TokenKind::GtEq      => "`>=`".into(),
        TokenKind::LParen    => "`(`".into(),
        TokenKind::RParen    => "`)`".into(),
        TokenKind::Eof       => "end of expression".into(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(src: &str) -> Expr {
        parse_clause(src).parsed.expect("parse failed")
    }

    fn parse_err(src: &str) -> Error {
        parse_clause(src).parsed.expect_err("expected parse error")
    }

    fn num(v: f64) -> Box<Expr> { Box::new(Expr::Number(v)) }

    #[test]
    fn literal() {
        assert_eq!(parse("42"), Expr::Number(42.0));
    }

    #[test]
    fn multiplication_binds_tighter() {
        match parse("1 + 2 * 3") {
            Expr::BinOp { op: BinOp::Add, left, right, .. } => {
                assert_eq!(left, num(1.0));
                assert!(matches!(*right, Expr::BinOp { op: BinOp::Mul, .. }));
            }
            other => panic!("expected Add at root, got {other:?}"),
        }
    }

    #[test]
    fn left_associative_subtraction() {
        match parse("10 - 3 - 2") {
            Expr::BinOp { op: BinOp::Sub, left, right, .. } => {
                assert!(matches!(*left, Expr::BinOp { op: BinOp::Sub, .. }));
                assert_eq!(right, num(2.0));
            }
            other => panic!("expected Sub at root, got {other:?}"),
        }
    }

    #[test]
    fn comparison_below_arithmetic() {
        assert!(matches!(parse("i + 1 < n * 2"), Expr::BinOp { op: BinOp::Lt, .. }));
    }

    #[test]
    fn equality_below_relational() {
        assert!(matches!(parse("a < b == c < d"), Expr::BinOp { op: BinOp::Eq, .. }));
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert!(matches!(parse("(1 + 2) * 3"), Expr::BinOp { op: BinOp::Mul, .. }));
    }

    #[test]
    fn unary_minus() {
        assert_eq!(parse("--4"), Expr::Neg(Box::new(Expr::Neg(num(4.0)))));
    }

    #[test]
    fn assignment_clause() {
        match parse("i = i + 1") {
            Expr::Assign { name, value } => {
                assert_eq!(name, "i");
                assert!(matches!(*value, Expr::BinOp { op: BinOp::Add, .. }));
            }
            other => panic!("expected Assign, got {other:?}"),
        }
    }

    #[test]
    fn chained_assignment_is_right_associative() {
        match parse("a = b = 2") {
            Expr::Assign { name, value } => {
                assert_eq!(name, "a");
                assert!(matches!(*value, Expr::Assign { .. }));
            }
            other => panic!("expected Assign, got {other:?}"),
        }
    }

    #[test]
    fn equality_is_not_assignment() {
        assert!(matches!(parse("i == 3"), Expr::BinOp { op: BinOp::Eq, .. }));
    }

    #[test]
    fn assignment_needs_identifier_target() {
        let err = parse_err("1 = 2");
        assert_eq!(err.kind, ErrorKind::Eval);
        assert!(err.message.contains("found `=`"));
    }

    #[test]
    fn empty_clause() {
        assert!(parse_err("   ").message.contains("expected expression"));
    }

    #[test]
    fn dangling_operator() {
        assert!(parse_err("1 +").message.contains("end of expression"));
    }

    #[test]
    fn unclosed_paren() {
        assert!(parse_err("(1 + 2").message.contains("expected `)`"));
    }

    #[test]
    fn trailing_tokens() {
        assert!(parse_err("1 2").message.contains("expected end of expression"));
    }

    #[test]
    fn clause_keeps_trimmed_source() {
        assert_eq!(parse_clause("  i < 3 ").source, "i < 3");
    }

    // ── limits ───────────────────────────────────────────────────────────────

    fn parens(levels: usize) -> String {
        format!("{}1{}", "(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        assert_eq!(parse(&parens(MAX_NESTING)), Expr::Number(1.0));
    }

    #[test]
    fn deep_parentheses_are_rejected() {
        for levels in [MAX_NESTING + 1, 1000, 100_000] {
            let err = parse_err(&parens(levels));
            assert_eq!(err.kind, ErrorKind::Eval);
            assert!(err.message.contains("nested too deeply"), "got {}", err.message);
        }
    }

    #[test]
    fn deep_unary_and_assignment_chains_are_rejected() {
        let negs = format!("{}1", "-".repeat(MAX_NESTING + 1));
        assert!(parse_err(&negs).message.contains("nested too deeply"));

        let assigns = format!("{}1", "a = ".repeat(MAX_NESTING + 1));
        assert!(parse_err(&assigns).message.contains("nested too deeply"));
    }

    #[test]
    fn long_operator_chains_are_rejected() {
        let ok = vec!["1"; MAX_OPERATORS + 1].join(" + ");
        assert!(parse_clause(&ok).parsed.is_ok());

        let long = vec!["1"; MAX_OPERATORS + 2].join(" + ");
        assert!(parse_err(&long).message.contains("too many operators"));
    }
}
