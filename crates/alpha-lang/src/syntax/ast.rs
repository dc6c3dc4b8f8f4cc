use crate::error::Error;
use crate::scene::Shape;

// ─── Commands ────────────────────────────────────────────────────────────────

/// One parsed statement of an Alpha script.
///
/// Object `name` arguments are kept as raw text: variable substitution
/// happens at execution time, against whatever the variables hold then.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `object.create(shape, name);`
    CreateObject { shape: Shape, name: String },
    /// `object.color(name, color);`
    SetColor { name: String, color: String },
    /// `object.move(name, x, y);`. The coordinates are integer literals,
    /// read from their text when the command runs.
    MoveObject { name: String, x: String, y: String },
    /// `object.collidable(name, value);`
    SetCollidable { name: String, value: String },
    /// `ident = expr;`
    Assign { var: String, expr: Clause },
    /// `for(init; cond; incr) { body }`
    ForLoop(ForLoop),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub init: Clause,
    pub condition: Clause,
    pub increment: Clause,
    pub body: Vec<Command>,
}

/// An expression clause: its source text plus the outcome of parsing it.
/// Parse failures are held back until the clause is evaluated so that they
/// surface in execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub source: String,
    pub parsed: Result<Expr, Error>,
}

// ─── Expressions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    /// Variable reference; the column is kept for the "undefined" message.
    Ident(String, usize),

    /// `a + b`, `a < b`, etc.
    BinOp {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
        column: usize,
    },

    /// `-x`
    Neg(Box<Expr>),

    /// `i = i + 1`, yields the stored value.
    Assign {
        name: String,
        value: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add, Sub, Mul, Div, Mod,
    Eq, NotEq, Lt, LtEq, Gt, GtEq,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add   => "+",  Self::Sub  => "-",
            Self::Mul   => "*",  Self::Div  => "/",  Self::Mod => "%",
            Self::Eq    => "==", Self::NotEq => "!=",
            Self::Lt    => "<",  Self::LtEq => "<=",
            Self::Gt    => ">",  Self::GtEq => ">=",
        }
    }
}
