//! Expression evaluator over the variable store.

use crate::error::Error;
use crate::runtime::value::Value;
use crate::runtime::variables::Variables;
use crate::syntax::ast::{BinOp, Clause, Expr};
use crate::syntax::expr::parse_clause;

pub struct Evaluator<'a> {
    vars: &'a mut Variables,
}

impl<'a> Evaluator<'a> {
    pub fn new(vars: &'a mut Variables) -> Self {
        Self { vars }
    }

    /// Parse and evaluate raw clause text in one go.
    pub fn eval_str(&mut self, source: &str) -> Result<Value, Error> {
        self.eval_clause(&parse_clause(source))
    }

    pub fn eval_clause(&mut self, clause: &Clause) -> Result<Value, Error> {
        match &clause.parsed {
            Ok(expr) => self.eval_expr(expr),
            Err(e) => Err(Error::eval(format!("in `{}`: {}", clause.source, e.message))),
        }
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value, Error> {
        match expr {
            Expr::Number(v) => Ok(Value::Number(*v)),

            Expr::Ident(name, column) => self.vars.get(name)
                .map(Value::Number)
                .ok_or_else(|| Error::eval_at(*column, format!("undefined: `{name}`"))),

            Expr::Neg(operand) => match self.eval_expr(operand)? {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(Error::eval(format!("unary `-` not supported on `{}`", other.type_name()))),
            },

            Expr::BinOp { left, op, right, column } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                eval_binop(*op, l, r, *column)
            }

            Expr::Assign { name, value } => {
                let v = self.eval_expr(value)?;
                let n = v.as_number()
                    .map_err(|_| Error::eval(format!("cannot assign `{}` value to `{name}`", v.type_name())))?;
                self.vars.set(name.as_str(), n);
                Ok(Value::Number(n))
            }
        }
    }
}

fn eval_binop(op: BinOp, l: Value, r: Value, column: usize) -> Result<Value, Error> {
    let (Value::Number(a), Value::Number(b)) = (l, r) else {
        return Err(Error::eval_at(column, format!(
            "operator `{}` not supported for `{}` and `{}`",
            op.symbol(), l.type_name(), r.type_name()
        )));
    };
    Ok(match op {
        BinOp::Add   => Value::Number(a + b),
        BinOp::Sub   => Value::Number(a - b),
        BinOp::Mul   => Value::Number(a * b),
        BinOp::Div   => Value::Number(a / b),
        BinOp::Mod   => Value::Number(a % b),
        BinOp::Eq    => Value::Bool(a == b),
        BinOp::NotEq => Value::Bool(a != b),
        BinOp::Lt    => Value::Bool(a < b),
        BinOp::LtEq  => Value::Bool(a <= b),
        BinOp::Gt    => Value::Bool(a > b),
        BinOp::GtEq  => Value::Bool(a >= b),
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
