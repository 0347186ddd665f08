mod condition;
mod property;

use crate::{
    clause::{Clause, CompareOp, Operand},
    value::Value,
};

/// Terminal clause shorthand shared by the builder test modules.
pub(crate) fn term(field: &str) -> Clause {
    Clause::terminal(field, CompareOp::Eq, Operand::Single(Value::Int(1)))
}
