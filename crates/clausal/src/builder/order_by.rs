use crate::error::ArgumentError;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        };
        write!(f, "{keyword}")
    }
}

///
/// SortKey
///
/// One entry of the order-by half of a query. A direction of `None` leaves
/// the ordering to the consuming engine's field default.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortKey {
    pub field: String,
    pub direction: Option<OrderDirection>,
}

impl SortKey {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: Option<OrderDirection>) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

///
/// OrderBy
///
/// Ordered, immutable sort-key list produced by `OrderByBuilder::build`.
///

#[derive(
    Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize,
)]
pub struct OrderBy(#[into_iterator(owned, ref)] Vec<SortKey>);

impl OrderBy {
    #[must_use]
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }
}

///
/// OrderByBuilder
///
/// Accumulates sort keys in priority order. Prepending (`make_first`) lets a
/// later call take precedence over everything added so far.
///

#[derive(Clone, Debug, Default)]
pub struct OrderByBuilder {
    keys: Vec<SortKey>,
}

impl OrderByBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sort entry; `make_first` prepends instead of appending.
    pub fn add(
        &mut self,
        field: impl Into<String>,
        direction: Option<OrderDirection>,
        make_first: bool,
    ) -> Result<&mut Self, ArgumentError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(ArgumentError::EmptyFieldName);
        }

        let key = SortKey { field, direction };
        if make_first {
            self.keys.insert(0, key);
        } else {
            self.keys.push(key);
        }
        Ok(self)
    }

    /// Append a sort entry with an unspecified direction.
    pub fn add_sort(&mut self, field: impl Into<String>) -> Result<&mut Self, ArgumentError> {
        self.add(field, None, false)
    }

    /// Append an ascending sort entry.
    pub fn asc(&mut self, field: impl Into<String>) -> Result<&mut Self, ArgumentError> {
        self.add(field, Some(OrderDirection::Asc), false)
    }

    /// Append a descending sort entry.
    pub fn desc(&mut self, field: impl Into<String>) -> Result<&mut Self, ArgumentError> {
        self.add(field, Some(OrderDirection::Desc), false)
    }

    /// Prepend an ascending sort entry, giving it top priority.
    pub fn asc_first(&mut self, field: impl Into<String>) -> Result<&mut Self, ArgumentError> {
        self.add(field, Some(OrderDirection::Asc), true)
    }

    /// Prepend a descending sort entry, giving it top priority.
    pub fn desc_first(&mut self, field: impl Into<String>) -> Result<&mut Self, ArgumentError> {
        self.add(field, Some(OrderDirection::Desc), true)
    }

    /// Discard all accumulated sort entries.
    pub fn clear(&mut self) -> &mut Self {
        self.keys.clear();
        self
    }

    /// Snapshot the accumulated entries without consuming the builder.
    #[must_use]
    pub fn build(&self) -> OrderBy {
        OrderBy(self.keys.clone())
    }
}
