//! Top-level statement splitting over preprocessed source.
//!
//! A statement is either everything up to and including the next `;`, or a
//! whole `for(...){...}` block found by counting nested delimiters. Splitting
//! stops at the first structural error; statements collected before it are
//! kept.

use crate::error::Error;

/// Result of splitting: the statement units found, plus the syntax error that
/// halted splitting, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    pub statements: Vec<String>,
    pub error: Option<Error>,
}

pub fn split_statements(code: &str) -> Split {
    let bytes = code.as_bytes();
    let mut split = Split::default();
    let mut i = skip_whitespace(bytes, 0);

    while i < bytes.len() {
        if starts_with_for(&code[i..]) {
            match for_block_end(bytes, i) {
                Ok(end) => {
                    split.statements.push(code[i..end].trim().to_string());
                    i = end;
                }
                Err(e) => {
                    split.error = Some(e);
                    break;
                }
            }
        } else {
            // trailing text without a `;` is dropped silently
            let Some(semi) = find_byte(bytes, i, b';') else { break };
            split.statements.push(code[i..=semi].trim().to_string());
            i = semi + 1;
        }
        i = skip_whitespace(bytes, i);
    }

    split
}

/// True when `text` begins with the `for` keyword rather than an identifier
/// that merely starts with those letters (`format`, `fortune`).
pub fn starts_with_for(text: &str) -> bool {
    text.starts_with("for")
        && !text.as_bytes().get(3).is_some_and(|b| is_ident_byte(*b))
}

/// Given `bytes[open]` holding an opening delimiter, returns the index one
/// past its matching close, or `None` if the delimiters never balance.
pub fn matching_close(bytes: &[u8], open: usize, open_ch: u8, close_ch: u8) -> Option<usize> {
    if bytes.get(open) != Some(&open_ch) { return None; }
    let mut depth = 0usize;
    for (offset, &b) in bytes[open..].iter().enumerate() {
        if b == open_ch {
            depth += 1;
        } else if b == close_ch {
            depth -= 1;
            if depth == 0 { return Some(open + offset + 1); }
        }
    }
    None
}

pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

// ─── Primitives ──────────────────────────────────────────────────────────────

/// Index one past the closing `}` of the for-block starting at `start`.
fn for_block_end(bytes: &[u8], start: usize) -> Result<usize, Error> {
    let open = find_byte(bytes, start, b'(')
        .ok_or_else(|| Error::syntax("expected `(` after for"))?;
    let header_end = matching_close(bytes, open, b'(', b')')
        .ok_or_else(|| Error::syntax("unmatched parentheses in for statement"))?;

    let brace = skip_whitespace(bytes, header_end);
    if bytes.get(brace) != Some(&b'{') {
        return Err(Error::syntax("expected `{` after for(...)"));
    }
    matching_close(bytes, brace, b'{', b'}')
        .ok_or_else(|| Error::syntax("unmatched braces in for loop"))
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..].iter().position(|&b| b == needle).map(|p| from + p)
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() { i += 1; }
    i
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn split_ok(code: &str) -> Vec<String> {
        let split = split_statements(code);
        assert!(split.error.is_none(), "unexpected error: {:?}", split.error);
        split.statements
    }

    fn split_err(code: &str) -> Split {
        let split = split_statements(code);
        assert!(split.error.is_some(), "expected a syntax error for `{code}`");
        split
    }

    #[test]
    fn empty() {
        assert!(split_ok("").is_empty());
        assert!(split_ok("   ").is_empty());
    }

    #[test]
    fn simple_statements() {
        assert_eq!(
            split_ok("x = 1; object.create(square, a);"),
            vec!["x = 1;", "object.create(square, a);"]
        );
    }

    #[test]
    fn count_independent_of_whitespace() {
        let tight = split_ok("a=1;for(i=0;i<2;i=i+1){b=i;}c=2;");
        let loose = split_ok("  a = 1 ;   for ( i = 0 ; i < 2 ; i = i + 1 )   {  b = i ;  }   c = 2 ;  ");
        assert_eq!(tight.len(), 3);
        assert_eq!(loose.len(), 3);
    }

    #[test]
    fn for_block_is_one_unit() {
        let stmts = split_ok("for(i=0;i<3;i=i+1){ object.create(square, b); } x = 1;");
        assert_eq!(stmts, vec!["for(i=0;i<3;i=i+1){ object.create(square, b); }", "x = 1;"]);
    }

    #[test]
    fn nested_for_blocks() {
        let src = "for(i=0;i<2;i=i+1){ for(j=0;j<2;j=j+1){ x = (i + j); } } y = 0;";
        let stmts = split_ok(src);
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].ends_with("} }"));
    }

    #[test]
    fn nested_parens_in_header() {
        let stmts = split_ok("for(i=(0);i<(2*(1+1));i=(i+1)){x=i;}");
        assert_eq!(stmts, vec!["for(i=(0);i<(2*(1+1));i=(i+1)){x=i;}"]);
    }

    #[test]
    fn trailing_text_without_semicolon_dropped() {
        assert_eq!(split_ok("x = 1; y = 2"), vec!["x = 1;"]);
    }

    #[test]
    fn for_prefix_identifier_is_not_a_loop() {
        assert_eq!(split_ok("format = 3;"), vec!["format = 3;"]);
        assert!(starts_with_for("for(i=0;i<1;i=i+1){}"));
        assert!(starts_with_for("for (i=0;i<1;i=i+1){}"));
        assert!(!starts_with_for("forward = 1;"));
    }

    #[test]
    fn missing_brace_halts_splitting() {
        let split = split_err("a = 1; for(i=0;i<3;i=i+1) b = 2; c = 3;");
        assert_eq!(split.statements, vec!["a = 1;"]);
        let err = split.error.unwrap();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.message.contains("expected `{`"));
    }

    #[test]
    fn unmatched_parens() {
        let split = split_err("for(i=0;i<3;i=i+1 { x = 1; }");
        assert!(split.statements.is_empty());
        assert!(split.error.is_some_and(|e| e.message.contains("parentheses")));
    }

    #[test]
    fn unmatched_braces() {
        let split = split_err("x = 0; for(i=0;i<3;i=i+1){ x = 1;");
        assert_eq!(split.statements, vec!["x = 0;"]);
        assert!(split.error.is_some_and(|e| e.message.contains("braces")));
    }

    #[test]
    fn for_without_paren() {
        let split = split_err("for { x = 1; }");
        assert!(split.error.is_some_and(|e| e.message.contains("expected `(`")));
    }

    #[test]
    fn matching_close_counts_depth() {
        let b = b"(a(b)c)d";
        assert_eq!(matching_close(b, 0, b'(', b')'), Some(7));
        assert_eq!(matching_close(b, 2, b'(', b')'), Some(5));
        assert_eq!(matching_close(b"((", 0, b'(', b')'), None);
    }
}
