//! Compile-time constant values.

use std::fmt;

use smol_str::SmolStr;

/// A Java compile-time constant. `byte` and `short` constants are carried
/// as [`Constant::Int`], as the language promotes them in every operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    String(SmolStr),
}

impl Constant {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Constant::Int(v) => Some(*v),
            Constant::Char(c) => Some(*c as i32),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Constant::Int(v) => Some(i64::from(*v)),
            Constant::Long(v) => Some(*v),
            Constant::Char(c) => Some(i64::from(*c as u32)),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Constant::Int(v) => Some(f64::from(*v)),
            Constant::Long(v) => Some(*v as f64),
            Constant::Float(v) => Some(f64::from(*v)),
            Constant::Double(v) => Some(*v),
            Constant::Char(c) => Some(f64::from(*c as u32)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Constant::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Constant::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Constant::Int(_)
                | Constant::Long(_)
                | Constant::Float(_)
                | Constant::Double(_)
                | Constant::Char(_)
        )
    }
}

/// Renders the value the way string concatenation would.
impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(v) => write!(f, "{v}"),
            Constant::Long(v) => write!(f, "{v}"),
            Constant::Float(v) => write_floating(f, f64::from(*v)),
            Constant::Double(v) => write_floating(f, *v),
            Constant::Bool(v) => write!(f, "{v}"),
            Constant::Char(c) => write!(f, "{c}"),
            Constant::String(s) => f.write_str(s),
        }
    }
}

fn write_floating(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else if value.fract() == 0.0 && value.abs() < 1e7 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}
