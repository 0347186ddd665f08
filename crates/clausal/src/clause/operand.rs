use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Operand
///
/// Right-hand side of a terminal clause. `Single` vs `Multi` is chosen by
/// arity at construction time: one value stays single, two or more become a
/// multi-value list. `Empty` matches absent/blank fields; `Function` defers
/// evaluation to the consuming engine.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Operand {
    Single(Value),
    Multi(Vec<Value>),
    Empty,
    Function { name: String, args: Vec<String> },
}

impl Operand {
    /// Choose the operand shape for an ordered, non-empty value list.
    ///
    /// Callers guarantee non-emptiness; a defensively empty input collapses
    /// to `Empty` rather than producing a zero-length `Multi`.
    #[must_use]
    pub fn from_values(mut values: Vec<Value>) -> Self {
        match values.len() {
            0 => Self::Empty,
            1 => Self::Single(values.remove(0)),
            _ => Self::Multi(values),
        }
    }

    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<String>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{value}"),
            Self::Multi(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
            Self::Empty => write!(f, "EMPTY"),
            Self::Function { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{arg}\"")?;
                }
                write!(f, ")")
            }
        }
    }
}
