use crate::{
    builder::{condition::ConditionBuilder, tests::term},
    clause::{Clause, CompareOp, Operand},
    date::DateSupport,
    error::{ArgumentError, BuilderError, StateError},
    value::Value,
};
use std::sync::Arc;
use time::{OffsetDateTime, macros::datetime};

fn text(s: &str) -> Operand {
    Operand::Single(Value::Text(s.to_string()))
}

fn built(builder: &ConditionBuilder) -> Clause {
    builder.build().expect("valid state").expect("non-empty")
}

// ----------------------------------------------------------------------
// Arity and operator defaults
// ----------------------------------------------------------------------

#[test]
fn single_string_defaults_to_equality() {
    let mut builder = ConditionBuilder::new();
    builder.add_string_condition("status", "open").unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal("status", CompareOp::Eq, text("open"))
    );
}

#[test]
fn several_strings_default_to_membership() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_string_conditions("status", ["open", "blocked"])
        .unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal(
            "status",
            CompareOp::In,
            Operand::Multi(vec![
                Value::Text("open".to_string()),
                Value::Text("blocked".to_string()),
            ]),
        )
    );
}

#[test]
fn a_one_element_collection_behaves_like_a_single_value() {
    let mut builder = ConditionBuilder::new();
    builder.add_string_conditions("status", ["open"]).unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal("status", CompareOp::Eq, text("open"))
    );
}

#[test]
fn explicit_operator_overrides_the_default() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_string_condition_with("summary", CompareOp::Like, "timeout")
        .unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal("summary", CompareOp::Like, text("timeout"))
    );

    let mut excluded = ConditionBuilder::new();
    excluded
        .add_string_conditions_with("status", CompareOp::NotIn, ["closed", "done"])
        .unwrap();

    assert_eq!(
        built(&excluded),
        Clause::terminal(
            "status",
            CompareOp::NotIn,
            Operand::Multi(vec![
                Value::Text("closed".to_string()),
                Value::Text("done".to_string()),
            ]),
        )
    );
}

#[test]
fn number_conditions_coerce_into_int_values() {
    let mut builder = ConditionBuilder::new();
    builder.add_number_condition("priority", 3_i32).unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal("priority", CompareOp::Eq, Operand::Single(Value::Int(3)))
    );

    let mut bounded = ConditionBuilder::new();
    bounded
        .add_number_condition_with("priority", CompareOp::Gt, 3_i64)
        .unwrap();

    assert_eq!(
        built(&bounded),
        Clause::terminal("priority", CompareOp::Gt, Operand::Single(Value::Int(3)))
    );

    let mut listed = ConditionBuilder::new();
    listed.add_number_conditions("priority", [1, 2, 3]).unwrap();

    assert_eq!(
        built(&listed),
        Clause::terminal(
            "priority",
            CompareOp::In,
            Operand::Multi(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        )
    );
}

#[test]
fn empty_condition_uses_the_is_operator() {
    let mut builder = ConditionBuilder::new();
    builder.add_empty_condition("labels").unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal("labels", CompareOp::Is, Operand::Empty)
    );
}

#[test]
fn add_condition_takes_operator_and_operand_verbatim() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_condition("labels", CompareOp::IsNot, Operand::Empty)
        .unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal("labels", CompareOp::IsNot, Operand::Empty)
    );
}

// ----------------------------------------------------------------------
// Argument validation
// ----------------------------------------------------------------------

#[test]
fn blank_field_names_are_rejected() {
    let mut builder = ConditionBuilder::new();

    for field in ["", "   ", "\t"] {
        let err = builder
            .add_string_condition(field, "open")
            .expect_err("blank field");
        assert_eq!(err, BuilderError::Argument(ArgumentError::EmptyFieldName));
    }
}

#[test]
fn an_empty_value_collection_is_rejected() {
    let mut builder = ConditionBuilder::new();

    let err = builder
        .add_string_conditions("status", Vec::<String>::new())
        .expect_err("no values");
    assert_eq!(
        err,
        BuilderError::Argument(ArgumentError::EmptyValues {
            field: "status".to_string(),
        })
    );

    let err = builder
        .add_number_conditions("priority", [])
        .expect_err("no values");
    assert_eq!(
        err,
        BuilderError::Argument(ArgumentError::EmptyValues {
            field: "priority".to_string(),
        })
    );
}

#[test]
fn a_rejected_argument_leaves_prior_state_intact() {
    let mut builder = ConditionBuilder::new();
    builder.add_string_condition("status", "open").unwrap();

    builder
        .add_string_conditions("assignee", Vec::<String>::new())
        .expect_err("no values");

    // No connective was consumed and no clause was added.
    assert_eq!(
        built(&builder),
        Clause::terminal("status", CompareOp::Eq, text("open"))
    );
    builder
        .and()
        .unwrap()
        .add_string_condition("assignee", "alex")
        .unwrap();
    assert_eq!(
        built(&builder),
        Clause::And(vec![
            Clause::terminal("status", CompareOp::Eq, text("open")),
            Clause::terminal("assignee", CompareOp::Eq, text("alex")),
        ])
    );
}

// ----------------------------------------------------------------------
// Date conditions
// ----------------------------------------------------------------------

/// Stub collaborator that tags conversions, proving the builder delegates.
struct TaggedDates;

impl DateSupport for TaggedDates {
    fn date_to_canonical_string(&self, date: OffsetDateTime) -> String {
        format!("@{}", date.unix_timestamp())
    }
}

#[test]
fn date_conditions_delegate_to_the_injected_collaborator() {
    let mut builder = ConditionBuilder::with_date_support(Arc::new(TaggedDates));
    let date = datetime!(2026-08-27 14:05 UTC);
    builder.add_date_condition("created", date).unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal(
            "created",
            CompareOp::Eq,
            text(&format!("@{}", date.unix_timestamp())),
        )
    );
}

#[test]
fn default_date_support_renders_minute_precision() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_date_condition_with("created", CompareOp::Gte, datetime!(2026-08-27 14:05:59 UTC))
        .unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal("created", CompareOp::Gte, text("2026-08-27 14:05"))
    );
}

#[test]
fn several_dates_default_to_membership() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_date_conditions(
            "due",
            [datetime!(2026-01-02 03:04 UTC), datetime!(2026-05-06 07:08 UTC)],
        )
        .unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal(
            "due",
            CompareOp::In,
            Operand::Multi(vec![
                Value::Text("2026-01-02 03:04".to_string()),
                Value::Text("2026-05-06 07:08".to_string()),
            ]),
        )
    );
}

// ----------------------------------------------------------------------
// Function conditions
// ----------------------------------------------------------------------

#[test]
fn function_condition_defaults_to_equality() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_function_condition("assignee", "currentUser", Vec::<String>::new())
        .unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal(
            "assignee",
            CompareOp::Eq,
            Operand::function("currentUser", vec![]),
        )
    );
}

#[test]
fn function_condition_with_operator_and_arguments() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_function_condition_with("due", CompareOp::Lte, "endOfWeek", ["-1d"])
        .unwrap();

    assert_eq!(
        built(&builder),
        Clause::terminal(
            "due",
            CompareOp::Lte,
            Operand::function("endOfWeek", vec!["-1d".to_string()]),
        )
    );
}

#[test]
fn an_empty_function_name_is_rejected() {
    let mut builder = ConditionBuilder::new();

    let err = builder
        .add_function_condition("assignee", "", Vec::<String>::new())
        .expect_err("no function name");
    assert_eq!(
        err,
        BuilderError::Argument(ArgumentError::EmptyFunctionName {
            field: "assignee".to_string(),
        })
    );
}

// ----------------------------------------------------------------------
// Range conditions
// ----------------------------------------------------------------------

#[test]
fn a_bounded_range_becomes_one_and_group() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_number_range_condition("priority", Some(1), Some(5))
        .unwrap();

    assert_eq!(
        built(&builder),
        Clause::And(vec![
            Clause::terminal("priority", CompareOp::Gte, Operand::Single(Value::Int(1))),
            Clause::terminal("priority", CompareOp::Lte, Operand::Single(Value::Int(5))),
        ])
    );
}

#[test]
fn a_half_open_range_is_a_bare_bound() {
    let mut lower = ConditionBuilder::new();
    lower
        .add_number_range_condition("priority", Some(2), None)
        .unwrap();
    assert_eq!(
        built(&lower),
        Clause::terminal("priority", CompareOp::Gte, Operand::Single(Value::Int(2)))
    );

    let mut upper = ConditionBuilder::new();
    upper
        .add_string_range_condition("version", None::<String>, Some("2.0"))
        .unwrap();
    assert_eq!(
        built(&upper),
        Clause::terminal("version", CompareOp::Lte, text("2.0"))
    );
}

#[test]
fn a_range_with_no_bounds_is_rejected() {
    let mut builder = ConditionBuilder::new();

    let err = builder
        .add_number_range_condition("priority", None, None)
        .expect_err("no bounds");
    assert_eq!(
        err,
        BuilderError::Argument(ArgumentError::EmptyRange {
            field: "priority".to_string(),
        })
    );
}

#[test]
fn a_date_range_stays_atomic_inside_a_wider_chain() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_string_condition("status", "open")
        .unwrap()
        .and()
        .unwrap()
        .add_date_range_condition(
            "created",
            Some(datetime!(2026-01-01 00:00 UTC)),
            Some(datetime!(2026-12-31 23:59 UTC)),
        )
        .unwrap();

    // The range enters the chain as one clause, not two.
    assert_eq!(
        built(&builder),
        Clause::And(vec![
            Clause::terminal("status", CompareOp::Eq, text("open")),
            Clause::And(vec![
                Clause::terminal("created", CompareOp::Gte, text("2026-01-01 00:00")),
                Clause::terminal("created", CompareOp::Lte, text("2026-12-31 23:59")),
            ]),
        ])
    );
}

// ----------------------------------------------------------------------
// State machine delegation
// ----------------------------------------------------------------------

#[test]
fn connectives_and_grouping_chain_fluently() {
    let mut builder = ConditionBuilder::new();
    builder
        .add_string_condition("status", "open")
        .unwrap()
        .or()
        .unwrap()
        .sub()
        .unwrap()
        .add_number_condition("priority", 1_i64)
        .unwrap()
        .and()
        .unwrap()
        .not()
        .unwrap()
        .add_empty_condition("assignee")
        .unwrap()
        .endsub()
        .unwrap();

    assert_eq!(
        built(&builder),
        Clause::Or(vec![
            Clause::terminal("status", CompareOp::Eq, text("open")),
            Clause::And(vec![
                Clause::terminal("priority", CompareOp::Eq, Operand::Single(Value::Int(1))),
                Clause::Not(Box::new(Clause::terminal(
                    "assignee",
                    CompareOp::Is,
                    Operand::Empty,
                ))),
            ]),
        ])
    );
}

#[test]
fn state_errors_surface_through_the_facade() {
    let mut builder = ConditionBuilder::new();

    let err = builder.and().expect_err("nothing to connect");
    assert!(matches!(
        err,
        BuilderError::State(StateError::NothingToConnect { .. })
    ));

    builder.add_string_condition("status", "open").unwrap();
    let err = builder
        .add_string_condition("assignee", "alex")
        .expect_err("ambiguous connective");
    assert_eq!(
        err,
        BuilderError::State(StateError::MissingConnective { operation: "clause" })
    );
}

#[test]
fn default_connective_applies_to_typed_conditions() {
    let mut builder = ConditionBuilder::new();
    builder.default_and();
    builder.add_string_condition("status", "open").unwrap();
    builder.add_number_condition("priority", 2_i64).unwrap();

    assert_eq!(
        built(&builder),
        Clause::And(vec![
            Clause::terminal("status", CompareOp::Eq, text("open")),
            Clause::terminal("priority", CompareOp::Eq, Operand::Single(Value::Int(2))),
        ])
    );
}

#[test]
fn clear_resets_the_facade() {
    let mut builder = ConditionBuilder::new();
    builder.add_string_condition("status", "open").unwrap();
    builder.clear();

    assert_eq!(builder.build().unwrap(), None);
}

#[test]
fn pre_built_clauses_feed_through_unchanged() {
    let mut builder = ConditionBuilder::new();
    builder.clause(term("a")).unwrap();

    assert_eq!(built(&builder), term("a"));
}
