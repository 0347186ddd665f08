use crate::{
    builder::{mutable::MutableClause, operator::BuilderOperator},
    clause::Clause,
    error::StateError,
};

///
/// BuilderState
///
/// Explicit construction state. Every operation validates its transition
/// against this enum before touching the stacks, so an illegal call leaves
/// the builder exactly as it was.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum BuilderState {
    /// Nothing built yet (start, after `clear`, or inside a fresh sub-group).
    #[default]
    Empty,
    /// A connective or negation was consumed; a clause or sub-group must follow.
    AwaitingOperand,
    /// A complete expression exists; connecting and finishing are both legal.
    HasClause,
}

///
/// ClauseBuilder
///
/// Precedence state machine: turns an ordered sequence of calls (add a
/// clause, connect with and/or/not, open or close a sub-group, set a default
/// connective) into one immutable `Clause` obeying conventional precedence
/// (NOT tightest, AND next, OR loosest, explicit grouping overrides all).
///
/// Internally an operator stack and an operand stack; connectives with lower
/// precedence force the pending tighter ones to resolve first, and `Lparen`
/// entries frame open sub-groups. `build` resolves whatever remains without
/// consuming the builder.
///
/// Plain mutable value with no internal synchronization; `Clone` is the
/// divergent-reuse mechanism and shares no mutable substructure.
///

#[derive(Clone, Debug, Default)]
pub struct ClauseBuilder {
    state: BuilderState,
    operators: Vec<BuilderOperator>,
    operands: Vec<MutableClause>,
    default_connective: Option<BuilderOperator>,
    open_groups: usize,
}

impl ClauseBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Operands
    // ------------------------------------------------------------------

    /// Add a complete clause.
    ///
    /// Legal while empty or after a connective. When a complete clause
    /// already exists the active default connective is injected first;
    /// without one the call is ambiguous and fails.
    pub fn clause(&mut self, clause: Clause) -> Result<&mut Self, StateError> {
        self.begin_operand("clause")?;
        self.operands.push(MutableClause::leaf(clause));
        self.state = BuilderState::HasClause;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Connectives
    // ------------------------------------------------------------------

    /// Connect the existing clause with the next one under AND.
    pub fn and(&mut self) -> Result<&mut Self, StateError> {
        self.connective(BuilderOperator::And)
    }

    /// Connect the existing clause with the next one under OR.
    pub fn or(&mut self) -> Result<&mut Self, StateError> {
        self.connective(BuilderOperator::Or)
    }

    /// Negate the next clause or sub-group. Consecutive calls stack; double
    /// negation is preserved structurally, never simplified.
    pub fn not(&mut self) -> Result<&mut Self, StateError> {
        self.begin_operand("not")?;
        // Prefix operator: pushed without resolving anything beneath it.
        self.operators.push(BuilderOperator::Not);
        self.state = BuilderState::AwaitingOperand;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Sub-groups
    // ------------------------------------------------------------------

    /// Open a parenthesized sub-group. The sub-group is a fresh instance of
    /// this same state machine; the surrounding state is framed on the stack.
    pub fn sub(&mut self) -> Result<&mut Self, StateError> {
        self.begin_operand("sub")?;
        self.operators.push(BuilderOperator::Lparen);
        self.open_groups += 1;
        self.state = BuilderState::Empty;
        Ok(self)
    }

    /// Close the innermost open sub-group and combine its completed
    /// expression into the parent exactly as `clause` would.
    pub fn endsub(&mut self) -> Result<&mut Self, StateError> {
        if self.open_groups == 0 {
            return Err(StateError::NoOpenSubGroup);
        }
        if self.state != BuilderState::HasClause {
            return Err(StateError::IncompleteSubGroup);
        }

        while self.operators.last() != Some(&BuilderOperator::Lparen) {
            apply_top(&mut self.operators, &mut self.operands)?;
        }
        self.operators.pop();
        self.open_groups -= 1;
        self.state = BuilderState::HasClause;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Default connective
    // ------------------------------------------------------------------

    /// Combine consecutive clauses with AND when no explicit connective is called.
    pub fn default_and(&mut self) -> &mut Self {
        self.default_connective = Some(BuilderOperator::And);
        self
    }

    /// Combine consecutive clauses with OR when no explicit connective is called.
    pub fn default_or(&mut self) -> &mut Self {
        self.default_connective = Some(BuilderOperator::Or);
        self
    }

    /// Clear the implicit connective; consecutive clauses become illegal again.
    pub fn default_none(&mut self) -> &mut Self {
        self.default_connective = None;
        self
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Reset to the empty state, discarding all progress, open sub-groups,
    /// and the default connective.
    pub fn clear(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Render the constructed expression without consuming the builder.
    ///
    /// A fresh builder yields `Ok(None)`; unclosed sub-groups and dangling
    /// connectives are state errors.
    pub fn build(&self) -> Result<Option<Clause>, StateError> {
        if self.open_groups > 0 {
            return Err(StateError::UnclosedSubGroups {
                depth: self.open_groups,
            });
        }
        match self.state {
            BuilderState::Empty => Ok(None),
            BuilderState::AwaitingOperand => Err(StateError::OperandExpected {
                operation: "build",
            }),
            BuilderState::HasClause => {
                let mut operators = self.operators.clone();
                let mut operands = self.operands.clone();
                while !operators.is_empty() {
                    apply_top(&mut operators, &mut operands)?;
                }
                let expression = operands
                    .pop()
                    .expect("operand stack invariant: HasClause implies one expression");
                Ok(expression.as_clause())
            }
        }
    }

    // ------------------------------------------------------------------
    // Internal transitions
    // ------------------------------------------------------------------

    /// Validate that an operand-starting operation (`clause`, `not`, `sub`)
    /// is legal, injecting the default connective when one is active and a
    /// complete clause already exists.
    fn begin_operand(&mut self, operation: &'static str) -> Result<(), StateError> {
        match self.state {
            BuilderState::Empty | BuilderState::AwaitingOperand => Ok(()),
            BuilderState::HasClause => match self.default_connective {
                Some(connective) => {
                    self.push_connective(connective)?;
                    self.state = BuilderState::AwaitingOperand;
                    Ok(())
                }
                None => Err(StateError::MissingConnective { operation }),
            },
        }
    }

    fn connective(&mut self, connective: BuilderOperator) -> Result<&mut Self, StateError> {
        if self.state != BuilderState::HasClause {
            return Err(StateError::NothingToConnect { connective });
        }
        self.push_connective(connective)?;
        self.state = BuilderState::AwaitingOperand;
        Ok(self)
    }

    /// Shunting-yard push: resolve stacked operators that bind at least as
    /// tightly as the incoming connective, stopping at an open sub-group.
    fn push_connective(&mut self, connective: BuilderOperator) -> Result<(), StateError> {
        while let Some(&top) = self.operators.last() {
            if top == BuilderOperator::Lparen || top.precedence() < connective.precedence() {
                break;
            }
            apply_top(&mut self.operators, &mut self.operands)?;
        }
        self.operators.push(connective);
        Ok(())
    }
}

/// Pop the top operator and replace its operand(s) with their combination.
fn apply_top(
    operators: &mut Vec<BuilderOperator>,
    operands: &mut Vec<MutableClause>,
) -> Result<(), StateError> {
    let operator = operators
        .pop()
        .expect("operator stack invariant: apply_top called on non-empty stack");
    let combined = match operator {
        BuilderOperator::Not => {
            let inner = operands
                .pop()
                .expect("operand stack invariant: NOT requires one operand");
            operator.combine(inner, MutableClause::Empty)?
        }
        _ => {
            let right = operands
                .pop()
                .expect("operand stack invariant: connective requires a right operand");
            let left = operands
                .pop()
                .expect("operand stack invariant: connective requires a left operand");
            operator.combine(left, right)?
        }
    };
    operands.push(combined);
    Ok(())
}
