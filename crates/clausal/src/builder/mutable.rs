use crate::clause::Clause;
use std::fmt;

///
/// GroupOperator
///
/// The two connectives a group accumulator can carry. A dedicated variant
/// (rather than reusing `BuilderOperator`) makes non-groupable operators
/// unrepresentable inside a `MutableClause`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupOperator {
    Or,
    And,
}

impl GroupOperator {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
        }
    }
}

///
/// MutableClause
///
/// Transient, combinable wrapper around a clause under construction.
/// `Empty` is the absorbing "no clause" element: it disappears from groups,
/// annihilates negations, and renders to nothing.
///
/// `Clone` is the deep-copy contract: members and negation targets are owned,
/// so a clone shares no mutable substructure with the original.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MutableClause {
    Empty,
    Leaf(Clause),
    Group {
        op: GroupOperator,
        members: Vec<MutableClause>,
    },
    Negation(Box<MutableClause>),
}

impl MutableClause {
    #[must_use]
    pub const fn leaf(clause: Clause) -> Self {
        Self::Leaf(clause)
    }

    #[must_use]
    pub fn negation(inner: Self) -> Self {
        Self::Negation(Box::new(inner))
    }

    /// Combine with `right` under `op`.
    ///
    /// When `self` is already a group of the same operator the new member is
    /// appended, so an A-AND-B-AND-C sequence yields one 3-ary node rather
    /// than a nested 2-ary chain. Flattening never reaches into `right`.
    #[must_use]
    pub fn combine(self, op: GroupOperator, right: Self) -> Self {
        match self {
            Self::Group {
                op: group_op,
                mut members,
            } if group_op == op => {
                members.push(right);
                Self::Group { op, members }
            }
            other => Self::Group {
                op,
                members: vec![other, right],
            },
        }
    }

    /// Render to the immutable AST.
    ///
    /// - `Empty` renders to nothing
    /// - groups drop members that render to nothing; a group with zero real
    ///   members renders to nothing and a group with exactly one collapses to
    ///   that member (no singleton And/Or survives)
    /// - a negation of nothing is nothing
    #[must_use]
    pub fn as_clause(&self) -> Option<Clause> {
        match self {
            Self::Empty => None,
            Self::Leaf(clause) => Some(clause.clone()),
            Self::Group { op, members } => {
                let mut rendered: Vec<Clause> =
                    members.iter().filter_map(Self::as_clause).collect();
                match rendered.len() {
                    0 => None,
                    1 => rendered.pop(),
                    _ => Some(match op {
                        GroupOperator::And => Clause::And(rendered),
                        GroupOperator::Or => Clause::Or(rendered),
                    }),
                }
            }
            Self::Negation(inner) => inner.as_clause().map(|clause| Clause::Not(Box::new(clause))),
        }
    }
}

impl fmt::Display for MutableClause {
    /// Diagnostic rendering of the in-progress structure; groups keep their
    /// explicit parentheses regardless of precedence.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Leaf(clause) => write!(f, "{clause}"),
            Self::Group { op, members } => {
                write!(f, "(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op.keyword())?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, ")")
            }
            Self::Negation(inner) => write!(f, "NOT {inner}"),
        }
    }
}
