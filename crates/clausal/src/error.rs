use crate::builder::BuilderOperator;
use thiserror::Error as ThisError;

///
/// ArgumentError
///
/// Raised synchronously at the condition-facade boundary for inputs that can
/// never produce a terminal clause. Always local to the offending call; the
/// builder's prior state is untouched.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ArgumentError {
    #[error("field name must be non-empty")]
    EmptyFieldName,

    #[error("condition on field '{field}' requires at least one value")]
    EmptyValues { field: String },

    #[error("function condition on field '{field}' requires a non-empty function name")]
    EmptyFunctionName { field: String },

    #[error("range condition on field '{field}' requires at least one bound")]
    EmptyRange { field: String },
}

///
/// StateError
///
/// Raised by the precedence state machine when a call is illegal in the
/// current state. Fatal to the in-progress call only: the state before the
/// illegal call remains valid and usable.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StateError {
    #[error(
        "cannot call {operation}(): a complete clause already exists and no connective is pending (call and()/or() or set a default connective)"
    )]
    MissingConnective { operation: &'static str },

    #[error("cannot call {connective}(): there is no clause to connect to")]
    NothingToConnect { connective: BuilderOperator },

    #[error("cannot call {operation}(): a clause or sub-group must follow the pending connective")]
    OperandExpected { operation: &'static str },

    #[error("cannot close a sub-group: none is open")]
    NoOpenSubGroup,

    #[error("cannot close a sub-group before it contains a complete clause")]
    IncompleteSubGroup,

    #[error("cannot build: {depth} sub-group(s) still open")]
    UnclosedSubGroups { depth: usize },

    #[error("operator {operator} cannot combine clauses; it only delimits sub-groups")]
    NotCombinable { operator: BuilderOperator },
}

///
/// BuilderError
///
/// Union of the two error kinds surfaced by the fluent builder API.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BuilderError {
    #[error("{0}")]
    Argument(#[from] ArgumentError),

    #[error("{0}")]
    State(#[from] StateError),
}
