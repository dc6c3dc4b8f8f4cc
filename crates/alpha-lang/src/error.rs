/// Diagnostic categories. Each one determines how far an error reaches:
/// syntax errors halt statement splitting, unknown commands skip a single
/// statement, eval errors turn the statement (or loop clause) into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    UnknownCommand,
    Eval,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax         => "syntax",
            Self::UnknownCommand => "unknown command",
            Self::Eval           => "eval",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[{}] {message}", kind.as_str())]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }

    pub fn unknown_command(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCommand, message)
    }

    pub fn eval(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Eval, message)
    }

    /// Column-aware eval error, used by the expression lexer and parser.
    pub fn eval_at(column: usize, message: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Eval, format!("{column}: {message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_kind_prefix() {
        assert_eq!(Error::syntax("expected `{` after for(...)").to_string(),
            "[syntax] expected `{` after for(...)");
        assert_eq!(Error::unknown_command("object.destroy(box)").to_string(),
            "[unknown command] object.destroy(box)");
        assert_eq!(Error::eval_at(3, "undefined: `j`").to_string(),
            "[eval] 3: undefined: `j`");
    }
}
