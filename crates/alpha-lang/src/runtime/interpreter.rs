//! Command executor. Runs parsed commands in order against the variable
//! store and the scene.
//!
//! A failing command is reported and skipped; execution always continues with
//! the next command. A failing loop clause ends that loop.

use crate::config::ObjectDefaults;
use crate::error::Error;
use crate::runtime::eval::Evaluator;
use crate::runtime::value::Value;
use crate::runtime::variables::Variables;
use crate::scene::{GameObject, Scene};
use crate::syntax::ast::{Clause, Command, ForLoop};

pub struct Interpreter<'a> {
    vars: &'a mut Variables,
    scene: &'a mut Scene,
    defaults: &'a ObjectDefaults,
    diagnostics: &'a mut Vec<Error>,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        vars: &'a mut Variables,
        scene: &'a mut Scene,
        defaults: &'a ObjectDefaults,
        diagnostics: &'a mut Vec<Error>,
    ) -> Self {
        Self { vars, scene, defaults, diagnostics }
    }

    pub fn run(&mut self, commands: &[Command]) {
        for cmd in commands {
            if let Err(e) = self.exec_command(cmd) {
                self.report(e);
            }
        }
    }

    pub fn exec_command(&mut self, cmd: &Command) -> Result<(), Error> {
        tracing::trace!(?cmd, "exec");
        match cmd {
            Command::CreateObject { shape, name } => {
                let key = self.vars.substitute(name);
                self.scene.insert(key, GameObject::new(shape.clone(), self.defaults));
            }

            Command::SetColor { name, color } => {
                if let Some(obj) = self.scene.get_mut(&self.vars.substitute(name)) {
                    obj.color = color.clone();
                }
            }

            Command::MoveObject { name, x, y } => {
                if let Some(obj) = self.scene.get_mut(&self.vars.substitute(name)) {
                    let x = parse_int(x)?;
                    let y = parse_int(y)?;
                    obj.x = x;
                    obj.y = y;
                }
            }

            Command::SetCollidable { name, value } => {
                if let Some(obj) = self.scene.get_mut(&self.vars.substitute(name)) {
                    obj.collidable = value.eq_ignore_ascii_case("true");
                }
            }

            Command::Assign { var, expr } => {
                let v = self.eval(expr)?;
                let n = v.as_number()
                    .map_err(|_| Error::eval(format!("cannot assign `{}` value to `{var}`", v.type_name())))?;
                self.vars.set(var.as_str(), n);
            }

            Command::ForLoop(f) => self.exec_for(f)?,
        }
        Ok(())
    }

    /// Runs until the condition turns falsy. There is no iteration cap.
    fn exec_for(&mut self, f: &ForLoop) -> Result<(), Error> {
        self.eval(&f.init)?;
        while self.eval(&f.condition)?.is_truthy() {
            self.run(&f.body);
            self.eval(&f.increment)?;
        }
        Ok(())
    }

    fn eval(&mut self, clause: &Clause) -> Result<Value, Error> {
        Evaluator::new(&mut *self.vars).eval_clause(clause)
    }

    fn report(&mut self, e: Error) {
        tracing::debug!(error = %e, "command failed");
        self.diagnostics.push(e);
    }
}

/// Leading base-10 integer of `text`: optional whitespace and sign, then the
/// digit run. Anything after the digits is ignored (`12px` → 12).
pub fn parse_int(text: &str) -> Result<f64, Error> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return Err(Error::eval(format!("expected an integer coordinate, got `{text}`")));
    }
    digits[..len]
        .parse::<f64>()
        .map(|n| sign * n)
        .map_err(|_| Error::eval(format!("expected an integer coordinate, got `{text}`")))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
