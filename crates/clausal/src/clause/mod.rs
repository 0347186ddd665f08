//! Module: clause
//! Responsibility: immutable boolean-expression AST and its diagnostic rendering.
//! Does not own: clause construction state, connective precedence handling.
//! Boundary: the artifact handed to external query consumers.

mod operand;


use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use operand::Operand;

///
/// CompareOp
///
/// Comparison operator of a terminal clause. The builder never interprets
/// these; they are carried verbatim into the tree.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Like,
    NotLike,
    Is,
    IsNot,
}

impl CompareOp {
    /// Default operator for a single-value operand.
    pub const DEFAULT_SINGLE: Self = Self::Eq;

    /// Default operator for a multi-value operand.
    pub const DEFAULT_MULTI: Self = Self::In;
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        };
        write!(f, "{symbol}")
    }
}

///
/// TerminalClause
///
/// Leaf of the expression tree: one field compared against one operand.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TerminalClause {
    pub field: String,
    pub op: CompareOp,
    pub operand: Operand,
}

impl TerminalClause {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, operand: Operand) -> Self {
        Self {
            field: field.into(),
            op,
            operand,
        }
    }
}

impl fmt::Display for TerminalClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.operand)
    }
}

///
/// Clause
///
/// Immutable boolean-expression node.
///
/// Shape invariants, maintained by the construction layer:
/// - `And`/`Or` never contain fewer than two children
/// - an empty construction state is `Option<Clause>::None`, never a variant
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Clause {
    Terminal(TerminalClause),
    And(Vec<Clause>),
    Or(Vec<Clause>),
    Not(Box<Clause>),
}

impl Clause {
    #[must_use]
    pub fn terminal(field: impl Into<String>, op: CompareOp, operand: Operand) -> Self {
        Self::Terminal(TerminalClause::new(field, op, operand))
    }

    /// Binding strength for diagnostic rendering; higher binds tighter.
    const fn binding(&self) -> u8 {
        match self {
            Self::Or(_) => 1,
            Self::And(_) => 2,
            Self::Not(_) => 3,
            Self::Terminal(_) => 4,
        }
    }

    fn fmt_child(child: &Self, parent_binding: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if child.binding() < parent_binding {
            write!(f, "({child})")
        } else {
            write!(f, "{child}")
        }
    }

    fn fmt_composite(
        children: &[Self],
        keyword: &str,
        binding: u8,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                write!(f, " {keyword} ")?;
            }
            Self::fmt_child(child, binding, f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    /// Human-readable precedence-annotated trace, e.g. `NOT (a = 1 OR b = 2) AND c = 3`.
    /// Diagnostics and test assertions only; not a parser input.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(terminal) => write!(f, "{terminal}"),
            Self::And(children) => Self::fmt_composite(children, "AND", self.binding(), f),
            Self::Or(children) => Self::fmt_composite(children, "OR", self.binding(), f),
            Self::Not(inner) => {
                write!(f, "NOT ")?;
                Self::fmt_child(inner, self.binding(), f)
            }
        }
    }
}
