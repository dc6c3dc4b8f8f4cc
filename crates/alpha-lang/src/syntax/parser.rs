//! Statement → `Command`.
//!
//! Errors on individual statements are collected and the statement dropped;
//! parsing carries on with the next one. Loop bodies are split and parsed
//! recursively when their loop is parsed.

use crate::error::Error;
use crate::scene::Shape;
use crate::syntax::ast::{Command, ForLoop};
use crate::syntax::expr::parse_clause;
use crate::syntax::preprocess::preprocess;
use crate::syntax::splitter::{is_ident_byte, matching_close, split_statements, starts_with_for};

/// Output of a parse: every command that parsed, and every diagnostic met
/// along the way, in source order.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub commands: Vec<Command>,
    pub errors: Vec<Error>,
}

/// Preprocess, split and parse a whole script.
pub fn parse_program(source: &str) -> Parsed {
    let mut parser = Parser::new();
    let commands = parser.parse_block(source);
    Parsed { commands, errors: parser.errors }
}

/// Loops nested deeper than this are rejected with a syntax error.
pub const MAX_LOOP_NESTING: usize = 64;

#[derive(Default)]
pub struct Parser {
    errors: Vec<Error>,
    loop_depth: usize,
}

impl Parser {
    pub fn new() -> Self { Self::default() }

    pub fn errors(&self) -> &[Error] { &self.errors }

    /// Parse a block of source text: the whole script, or a loop body.
    ///
    /// A syntax error from splitting is reported first, since splitting runs
    /// to completion before any statement is parsed. The statements found
    /// before it are still parsed.
    pub fn parse_block(&mut self, code: &str) -> Vec<Command> {
        let split = split_statements(&preprocess(code));
        if let Some(e) = split.error {
            self.report(e);
        }
        let mut commands = Vec::with_capacity(split.statements.len());
        for stmt in &split.statements {
            match self.parse_statement(stmt) {
                Ok(cmd) => commands.push(cmd),
                Err(e) => self.report(e),
            }
        }
        commands
    }

    pub fn parse_statement(&mut self, stmt: &str) -> Result<Command, Error> {
        let stmt = stmt.trim();
        if starts_with_for(stmt) {
            return self.parse_for(stmt);
        }

        let Some(body) = stmt.strip_suffix(';') else {
            return Err(Error::unknown_command(format!("command must end with `;`: {stmt}")));
        };
        let body = body.trim();

        if let Some(call) = body.strip_prefix("object.") {
            return parse_call(call, body);
        }
        parse_assignment(body)
            .ok_or_else(|| Error::unknown_command(format!("unknown command: {body}")))
    }

    // ─── for ─────────────────────────────────────────────────────────────────

    /// `for ( init ; cond ; incr ) { body }`, where the block must end the
    /// statement.
    fn parse_for(&mut self, stmt: &str) -> Result<Command, Error> {
        let malformed = || Error::syntax(format!("invalid for loop syntax: {stmt}"));
        let bytes = stmt.as_bytes();

        let open = skip_whitespace(bytes, 3);
        let header_end = matching_close(bytes, open, b'(', b')').ok_or_else(malformed)?;
        let header = &stmt[open + 1..header_end - 1];

        let clauses = split_header(header);
        let [init, condition, increment] = clauses.as_slice() else { return Err(malformed()) };
        if [init, condition, increment].iter().any(|c| c.trim().is_empty()) {
            return Err(malformed());
        }

        let brace = skip_whitespace(bytes, header_end);
        let block_end = matching_close(bytes, brace, b'{', b'}').ok_or_else(malformed)?;
        if block_end != stmt.len() {
            return Err(malformed());
        }

        if self.loop_depth >= MAX_LOOP_NESTING {
            return Err(Error::syntax(format!("for loops nested deeper than {MAX_LOOP_NESTING} levels")));
        }
        self.loop_depth += 1;
        let body = self.parse_block(&stmt[brace + 1..block_end - 1]);
        self.loop_depth -= 1;
        Ok(Command::ForLoop(ForLoop {
            init: parse_clause(init),
            condition: parse_clause(condition),
            increment: parse_clause(increment),
            body,
        }))
    }

    fn report(&mut self, e: Error) {
        tracing::debug!(error = %e, "statement rejected");
        self.errors.push(e);
    }
}

// ─── Calls ───────────────────────────────────────────────────────────────────

/// `method(arg, ...)` following the `object.` prefix.
fn parse_call(call: &str, full: &str) -> Result<Command, Error> {
    let name_len = call.bytes().take_while(|b| is_ident_byte(*b)).count();
    let (method, rest) = call.split_at(name_len);
    let rest = rest.trim_start();

    let args = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .filter(|inner| !inner.contains(['(', ')']))
        .ok_or_else(|| Error::unknown_command(format!("malformed call: {full}")))?;
    let args: Vec<&str> = args.split(',').map(str::trim).collect();

    let arity = match method {
        "create" | "color" | "collidable" => 2,
        "move" => 3,
        _ => return Err(Error::unknown_command(format!("unknown command: {full}"))),
    };
    if args.len() != arity {
        return Err(Error::unknown_command(format!(
            "object.{method} expects {arity} arguments, got {}: {full}", args.len()
        )));
    }

    let arg = |i: usize| args[i].to_string();
    Ok(match method {
        "create" => Command::CreateObject { shape: Shape::from_token(args[0]), name: arg(1) },
        "color"  => Command::SetColor { name: arg(0), color: arg(1) },
        "move"   => Command::MoveObject { name: arg(0), x: arg(1), y: arg(2) },
        _        => Command::SetCollidable { name: arg(0), value: arg(1) },
    })
}

// ─── Assignment ──────────────────────────────────────────────────────────────

/// `ident = expr` with a single `=`. `None` when the statement has another
/// shape.
fn parse_assignment(body: &str) -> Option<Command> {
    let bytes = body.as_bytes();
    if !bytes.first().is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_') {
        return None;
    }
    let name_len = bytes.iter().take_while(|b| is_ident_byte(**b)).count();
    let eq = skip_whitespace(bytes, name_len);
    if bytes.get(eq) != Some(&b'=') || bytes.get(eq + 1) == Some(&b'=') {
        return None;
    }
    let rhs = body[eq + 1..].trim();
    if rhs.is_empty() {
        return None;
    }
    Some(Command::Assign { var: body[..name_len].to_string(), expr: parse_clause(rhs) })
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Split a loop header on `;` outside parentheses.
fn split_header(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, b) in header.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b';' if depth == 0 => {
                parts.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&header[start..]);
    parts
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() { i += 1; }
    i
}

// ─── Tests ───────────────────────────────────────────────────────────────────
