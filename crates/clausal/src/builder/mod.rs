//! Module: builder
//! Responsibility: clause construction — connective algebra, precedence state
//! machine, typed condition facade, order-by and top-level query builders.
//! Does not own: the immutable AST shape or its rendering.
//! Boundary: the fluent user-facing construction layer.

pub mod condition;
pub mod mutable;
pub mod operator;
pub mod order_by;
pub mod precedence;
pub mod query;

#[cfg(test)]
mod tests;

// re-exports
pub use condition::ConditionBuilder;
pub use mutable::{GroupOperator, MutableClause};
pub use operator::BuilderOperator;
pub use order_by::{OrderBy, OrderByBuilder, OrderDirection, SortKey};
pub use precedence::ClauseBuilder;
pub use query::{Query, QueryBuilder};
