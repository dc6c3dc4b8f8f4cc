use std::fmt;

use crate::error::Error;

/// Result of evaluating an expression clause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

impl Value {
    /// Loop-condition truthiness: `true`, or any number other than zero and NaN.
    pub fn is_truthy(&self) -> bool {
        match *self {
            Self::Bool(b) => b,
            Self::Number(n) => n != 0.0 && !n.is_nan(),
        }
    }

    pub fn as_number(&self) -> Result<f64, Error> {
        match *self {
            Self::Number(n) => Ok(n),
            Self::Bool(b) => Err(Error::eval(format!("expected a number, got `{b}`"))),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Number(n) => f.write_str(&format_number(n)),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Render a number the way it is spliced into object names: integral values
/// without a fractional part, `-0` as `0`, non-finite values spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".into()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".into() } else { "-Infinity".into() }
    } else if n == 0.0 {
        "0".into()
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Number(-2.0).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
    }

    #[test]
    fn bool_is_not_a_number() {
        assert!(Value::Bool(true).as_number().is_err());
        assert_eq!(Value::Number(4.5).as_number(), Ok(4.5));
    }

    #[test]
    fn number_rendering() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn display() {
        assert_eq!(Value::Number(2.0).to_string(), "2");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }
}
