use crate::{
    builder::{
        condition::ConditionBuilder,
        order_by::{OrderBy, OrderByBuilder},
    },
    clause::Clause,
    error::BuilderError,
};
use serde::{Deserialize, Serialize};

///
/// Query
///
/// Immutable query value object: the optional where-clause paired with the
/// ordered sort-key list. Produced by `QueryBuilder::build`; rebuilding the
/// underlying builders never mutates a previously produced `Query`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Query {
    pub where_clause: Option<Clause>,
    pub order_by: OrderBy,
}

impl Query {
    #[must_use]
    pub const fn new(where_clause: Option<Clause>, order_by: OrderBy) -> Self {
        Self {
            where_clause,
            order_by,
        }
    }
}

///
/// QueryBuilder
///
/// Top-level builder composing one where-sub-builder and one
/// order-by-sub-builder. `where_clause()` / `order_by()` navigate into the
/// halves; `build` combines their outputs into a `Query`.
///

#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    where_builder: ConditionBuilder,
    order_builder: OrderByBuilder,
}

impl QueryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate both sub-builders from an existing query for incremental
    /// modification.
    pub fn from_query(query: &Query) -> Result<Self, BuilderError> {
        let mut builder = Self::new();
        if let Some(clause) = &query.where_clause {
            builder.where_builder.clause(clause.clone())?;
        }
        for key in &query.order_by {
            builder
                .order_builder
                .add(key.field.clone(), key.direction, false)?;
        }
        Ok(builder)
    }

    /// Navigate into the where-clause half.
    pub fn where_clause(&mut self) -> &mut ConditionBuilder {
        &mut self.where_builder
    }

    /// Navigate into the order-by half.
    pub fn order_by(&mut self) -> &mut OrderByBuilder {
        &mut self.order_builder
    }

    /// Reset both halves.
    pub fn clear(&mut self) -> &mut Self {
        self.where_builder.clear();
        self.order_builder.clear();
        self
    }

    /// Combine both halves into an immutable `Query`.
    pub fn build(&self) -> Result<Query, BuilderError> {
        Ok(Query {
            where_clause: self.where_builder.build()?,
            order_by: self.order_builder.build(),
        })
    }
}
