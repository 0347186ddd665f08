use crate::{
    builder::precedence::ClauseBuilder,
    clause::{Clause, CompareOp, Operand},
    date::{CanonicalDateSupport, DateSupport},
    error::{ArgumentError, BuilderError},
    value::Value,
};
use std::{fmt, sync::Arc};
use time::OffsetDateTime;

///
/// ConditionBuilder
///
/// Typed condition facade over the precedence state machine. Converts typed
/// inputs (string, number, date, function call, range; single value or
/// collection) into terminal clauses, owning value-to-operand coercion and
/// date-to-canonical-string conversion via the injected `DateSupport`
/// collaborator.
///
/// Every input is validated before any state mutation, so a rejected call
/// leaves the builder in its prior valid state. Every successful call
/// returns the same builder for chaining.
///

#[derive(Clone)]
pub struct ConditionBuilder {
    builder: ClauseBuilder,
    date_support: Arc<dyn DateSupport>,
}

impl Default for ConditionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConditionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionBuilder")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

impl ConditionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_date_support(Arc::new(CanonicalDateSupport))
    }

    /// Construct with an explicit date-support collaborator.
    #[must_use]
    pub fn with_date_support(date_support: Arc<dyn DateSupport>) -> Self {
        Self {
            builder: ClauseBuilder::new(),
            date_support,
        }
    }

    // ------------------------------------------------------------------
    // Connectives and grouping (state machine delegation)
    // ------------------------------------------------------------------

    pub fn and(&mut self) -> Result<&mut Self, BuilderError> {
        self.builder.and()?;
        Ok(self)
    }

    pub fn or(&mut self) -> Result<&mut Self, BuilderError> {
        self.builder.or()?;
        Ok(self)
    }

    pub fn not(&mut self) -> Result<&mut Self, BuilderError> {
        self.builder.not()?;
        Ok(self)
    }

    pub fn sub(&mut self) -> Result<&mut Self, BuilderError> {
        self.builder.sub()?;
        Ok(self)
    }

    pub fn endsub(&mut self) -> Result<&mut Self, BuilderError> {
        self.builder.endsub()?;
        Ok(self)
    }

    pub fn default_and(&mut self) -> &mut Self {
        self.builder.default_and();
        self
    }

    pub fn default_or(&mut self) -> &mut Self {
        self.builder.default_or();
        self
    }

    pub fn default_none(&mut self) -> &mut Self {
        self.builder.default_none();
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.builder.clear();
        self
    }

    /// Render the constructed where-clause without consuming the builder.
    pub fn build(&self) -> Result<Option<Clause>, BuilderError> {
        Ok(self.builder.build()?)
    }

    // ------------------------------------------------------------------
    // Generic conditions
    // ------------------------------------------------------------------

    /// Feed a pre-built clause through the state machine.
    pub fn clause(&mut self, clause: Clause) -> Result<&mut Self, BuilderError> {
        self.builder.clause(clause)?;
        Ok(self)
    }

    /// Add a terminal condition with an explicit operator and operand.
    pub fn add_condition(
        &mut self,
        field: impl Into<String>,
        op: CompareOp,
        operand: Operand,
    ) -> Result<&mut Self, BuilderError> {
        let field = validated_field(field)?;
        self.clause(Clause::terminal(field, op, operand))
    }

    /// Add an IS EMPTY condition for the field.
    pub fn add_empty_condition(
        &mut self,
        field: impl Into<String>,
    ) -> Result<&mut Self, BuilderError> {
        let field = validated_field(field)?;
        self.clause(Clause::terminal(field, CompareOp::Is, Operand::Empty))
    }

    // ------------------------------------------------------------------
    // String conditions
    // ------------------------------------------------------------------

    /// `field = value`.
    pub fn add_string_condition(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, BuilderError> {
        self.values_condition(field, None, vec![Value::Text(value.into())])
    }

    /// `field <op> value`.
    pub fn add_string_condition_with(
        &mut self,
        field: impl Into<String>,
        op: CompareOp,
        value: impl Into<String>,
    ) -> Result<&mut Self, BuilderError> {
        self.values_condition(field, Some(op), vec![Value::Text(value.into())])
    }

    /// Arity chooses the shape: one value compares with `=`, several with `IN`.
    pub fn add_string_conditions<I, V>(
        &mut self,
        field: impl Into<String>,
        values: I,
    ) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|v| Value::Text(v.into()))
            .collect();
        self.values_condition(field, None, values)
    }

    pub fn add_string_conditions_with<I, V>(
        &mut self,
        field: impl Into<String>,
        op: CompareOp,
        values: I,
    ) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|v| Value::Text(v.into()))
            .collect();
        self.values_condition(field, Some(op), values)
    }

    /// `field >= start AND field <= end`, omitting an absent bound.
    pub fn add_string_range_condition(
        &mut self,
        field: impl Into<String>,
        start: Option<impl Into<String>>,
        end: Option<impl Into<String>>,
    ) -> Result<&mut Self, BuilderError> {
        self.range_condition(
            field,
            start.map(|v| Value::Text(v.into())),
            end.map(|v| Value::Text(v.into())),
        )
    }

    // ------------------------------------------------------------------
    // Number conditions
    // ------------------------------------------------------------------

    pub fn add_number_condition(
        &mut self,
        field: impl Into<String>,
        value: impl Into<i64>,
    ) -> Result<&mut Self, BuilderError> {
        self.values_condition(field, None, vec![Value::Int(value.into())])
    }

    pub fn add_number_condition_with(
        &mut self,
        field: impl Into<String>,
        op: CompareOp,
        value: impl Into<i64>,
    ) -> Result<&mut Self, BuilderError> {
        self.values_condition(field, Some(op), vec![Value::Int(value.into())])
    }

    pub fn add_number_conditions<I>(
        &mut self,
        field: impl Into<String>,
        values: I,
    ) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = i64>,
    {
        let values = values.into_iter().map(Value::Int).collect();
        self.values_condition(field, None, values)
    }

    pub fn add_number_conditions_with<I>(
        &mut self,
        field: impl Into<String>,
        op: CompareOp,
        values: I,
    ) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = i64>,
    {
        let values = values.into_iter().map(Value::Int).collect();
        self.values_condition(field, Some(op), values)
    }

    pub fn add_number_range_condition(
        &mut self,
        field: impl Into<String>,
        start: Option<i64>,
        end: Option<i64>,
    ) -> Result<&mut Self, BuilderError> {
        self.range_condition(field, start.map(Value::Int), end.map(Value::Int))
    }

    // ------------------------------------------------------------------
    // Date conditions
    // ------------------------------------------------------------------
    //
    // Dates are embedded as their canonical text form, produced by the
    // injected collaborator; they are never compared as native date values.

    pub fn add_date_condition(
        &mut self,
        field: impl Into<String>,
        date: OffsetDateTime,
    ) -> Result<&mut Self, BuilderError> {
        let value = self.date_value(date);
        self.values_condition(field, None, vec![value])
    }

    pub fn add_date_condition_with(
        &mut self,
        field: impl Into<String>,
        op: CompareOp,
        date: OffsetDateTime,
    ) -> Result<&mut Self, BuilderError> {
        let value = self.date_value(date);
        self.values_condition(field, Some(op), vec![value])
    }

    pub fn add_date_conditions<I>(
        &mut self,
        field: impl Into<String>,
        dates: I,
    ) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = OffsetDateTime>,
    {
        let values = dates.into_iter().map(|d| self.date_value(d)).collect();
        self.values_condition(field, None, values)
    }

    pub fn add_date_conditions_with<I>(
        &mut self,
        field: impl Into<String>,
        op: CompareOp,
        dates: I,
    ) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = OffsetDateTime>,
    {
        let values = dates.into_iter().map(|d| self.date_value(d)).collect();
        self.values_condition(field, Some(op), values)
    }

    pub fn add_date_range_condition(
        &mut self,
        field: impl Into<String>,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
    ) -> Result<&mut Self, BuilderError> {
        let start = start.map(|d| self.date_value(d));
        let end = end.map(|d| self.date_value(d));
        self.range_condition(field, start, end)
    }

    // ------------------------------------------------------------------
    // Function conditions
    // ------------------------------------------------------------------

    pub fn add_function_condition<I, V>(
        &mut self,
        field: impl Into<String>,
        function: impl Into<String>,
        args: I,
    ) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.add_function_condition_with(field, CompareOp::DEFAULT_SINGLE, function, args)
    }

    pub fn add_function_condition_with<I, V>(
        &mut self,
        field: impl Into<String>,
        op: CompareOp,
        function: impl Into<String>,
        args: I,
    ) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let field = validated_field(field)?;
        let function = function.into();
        if function.is_empty() {
            return Err(ArgumentError::EmptyFunctionName { field }.into());
        }
        let args = args.into_iter().map(Into::into).collect();
        self.clause(Clause::terminal(field, op, Operand::function(function, args)))
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn date_value(&self, date: OffsetDateTime) -> Value {
        Value::Text(self.date_support.date_to_canonical_string(date))
    }

    /// Arity picks the operand shape and, absent an explicit operator, the
    /// default comparison: one value compares with `=`, several with `IN`.
    fn values_condition(
        &mut self,
        field: impl Into<String>,
        op: Option<CompareOp>,
        values: Vec<Value>,
    ) -> Result<&mut Self, BuilderError> {
        let field = validated_field(field)?;
        if values.is_empty() {
            return Err(ArgumentError::EmptyValues { field }.into());
        }

        let operand = Operand::from_values(values);
        let op = op.unwrap_or(match operand {
            Operand::Single(_) => CompareOp::DEFAULT_SINGLE,
            _ => CompareOp::DEFAULT_MULTI,
        });
        self.clause(Clause::terminal(field, op, operand))
    }

    /// Synthesize `field >= start` / `field <= end`, AND-combined through the
    /// connective algebra when both bounds are present, and feed the result
    /// through the state machine as one clause.
    fn range_condition(
        &mut self,
        field: impl Into<String>,
        start: Option<Value>,
        end: Option<Value>,
    ) -> Result<&mut Self, BuilderError> {
        use crate::builder::{mutable::MutableClause, operator::BuilderOperator};

        let field = validated_field(field)?;
        let lower = start.map(|value| {
            Clause::terminal(field.clone(), CompareOp::Gte, Operand::Single(value))
        });
        let upper = end.map(|value| {
            Clause::terminal(field.clone(), CompareOp::Lte, Operand::Single(value))
        });

        let combined = match (lower, upper) {
            (Some(lower), Some(upper)) => BuilderOperator::And
                .combine(MutableClause::leaf(lower), MutableClause::leaf(upper))
                .map_err(BuilderError::State)?
                .as_clause(),
            (Some(bound), None) | (None, Some(bound)) => Some(bound),
            (None, None) => return Err(ArgumentError::EmptyRange { field }.into()),
        };
        match combined {
            Some(clause) => self.clause(clause),
            // Two real leaves always render; kept for completeness.
            None => Ok(self),
        }
    }
}

fn validated_field(field: impl Into<String>) -> Result<String, ArgumentError> {
    let field = field.into();
    if field.trim().is_empty() {
        return Err(ArgumentError::EmptyFieldName);
    }
    Ok(field)
}
