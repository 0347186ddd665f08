use crate::{
    builder::mutable::{GroupOperator, MutableClause},
    error::StateError,
};
use std::fmt;

///
/// BuilderOperator
///
/// Connective algebra of the construction layer. Declaration order is the
/// precedence order, loosest first: grouping markers, then OR, AND, NOT.
/// The derived `Ord` and the `ALL` constant expose that order; it is an
/// observable property of the algebra and is asserted by tests.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum BuilderOperator {
    Lparen = 0x00,
    Rparen = 0x01,
    Or = 0x02,
    And = 0x03,
    Not = 0x04,
}

impl BuilderOperator {
    /// Every operator, in declaration (precedence) order.
    pub const ALL: [Self; 5] = [Self::Lparen, Self::Rparen, Self::Or, Self::And, Self::Not];

    #[must_use]
    pub const fn precedence(self) -> u8 {
        self as u8
    }

    /// Combine two partially built clauses under this operator.
    ///
    /// - `And`/`Or` group `left` and `right`, flattening into `left` when it
    ///   is already a group of the same operator
    /// - `Not` negates `left` and ignores `right` (prefix operator)
    /// - grouping markers are not combinable and surface a state error
    pub fn combine(
        self,
        left: MutableClause,
        right: MutableClause,
    ) -> Result<MutableClause, StateError> {
        match self {
            Self::And => Ok(left.combine(GroupOperator::And, right)),
            Self::Or => Ok(left.combine(GroupOperator::Or, right)),
            Self::Not => Ok(MutableClause::negation(left)),
            Self::Lparen | Self::Rparen => Err(StateError::NotCombinable { operator: self }),
        }
    }
}

impl fmt::Display for BuilderOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::Lparen => "(",
            Self::Rparen => ")",
            Self::Or => "or",
            Self::And => "and",
            Self::Not => "not",
        };
        write!(f, "{keyword}")
    }
}
