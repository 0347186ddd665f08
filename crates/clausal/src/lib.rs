//! Clausal: a fluent boolean-query clause builder. Turns an ordered sequence
//! of builder calls into an immutable expression tree obeying conventional
//! operator precedence, and pairs it with an order-by list in a `Query`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod builder;
pub mod clause;
pub mod date;
pub mod error;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No construction internals or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        builder::{
            ClauseBuilder, ConditionBuilder, OrderBy, OrderByBuilder, OrderDirection, Query,
            QueryBuilder, SortKey,
        },
        clause::{Clause, CompareOp, Operand, TerminalClause},
        date::{CanonicalDateSupport, DateSupport},
        error::BuilderError,
        value::Value,
    };
}
