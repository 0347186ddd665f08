use crate::{
    builder::precedence::ClauseBuilder,
    clause::{Clause, CompareOp, Operand},
    error::StateError,
    value::Value,
};
use proptest::prelude::*;

/// Abstract expression shape driven through the builder call sequence.
#[derive(Clone, Debug)]
enum Node {
    Leaf(u8),
    And(Vec<Node>),
    Or(Vec<Node>),
    Not(Box<Node>),
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = any::<u8>().prop_map(Node::Leaf);
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..4).prop_map(Node::And),
            prop::collection::vec(inner.clone(), 2..4).prop_map(Node::Or),
            inner.prop_map(|n| Node::Not(Box::new(n))),
        ]
    })
}

fn leaf_clause(n: u8) -> Clause {
    Clause::terminal(
        format!("f{n}"),
        CompareOp::Eq,
        Operand::Single(Value::Int(i64::from(n))),
    )
}

/// Drive the builder with the call sequence a caller would use for this
/// shape: composites become explicit sub-groups, negations prefix calls.
fn emit(builder: &mut ClauseBuilder, node: &Node) -> Result<(), StateError> {
    match node {
        Node::Leaf(n) => {
            builder.clause(leaf_clause(*n))?;
        }
        Node::And(children) => emit_group(builder, children, ClauseBuilder::and)?,
        Node::Or(children) => emit_group(builder, children, ClauseBuilder::or)?,
        Node::Not(inner) => {
            builder.not()?;
            emit(builder, inner)?;
        }
    }
    Ok(())
}

fn emit_group(
    builder: &mut ClauseBuilder,
    children: &[Node],
    connect: fn(&mut ClauseBuilder) -> Result<&mut ClauseBuilder, StateError>,
) -> Result<(), StateError> {
    builder.sub()?;
    let mut first = true;
    for child in children {
        if !first {
            connect(builder)?;
        }
        emit(builder, child)?;
        first = false;
    }
    builder.endsub()?;
    Ok(())
}

/// Every composite in a rendered clause carries at least two children;
/// singletons must have collapsed away during rendering.
fn assert_well_formed(clause: &Clause) {
    match clause {
        Clause::Terminal(_) => {}
        Clause::And(children) | Clause::Or(children) => {
            assert!(children.len() >= 2, "degenerate composite: {clause}");
            for child in children {
                assert_well_formed(child);
            }
        }
        Clause::Not(inner) => assert_well_formed(inner),
    }
}

proptest! {
    #[test]
    fn any_emitted_shape_builds_a_well_formed_clause(node in arb_node()) {
        let mut builder = ClauseBuilder::new();
        emit(&mut builder, &node).expect("legal call sequence");

        let clause = builder.build().expect("complete").expect("non-empty");
        assert_well_formed(&clause);
        prop_assert!(!clause.to_string().is_empty());
    }

    #[test]
    fn build_is_idempotent(node in arb_node()) {
        let mut builder = ClauseBuilder::new();
        emit(&mut builder, &node).expect("legal call sequence");

        prop_assert_eq!(builder.build().expect("complete"), builder.build().expect("complete"));
    }

    #[test]
    fn a_clone_builds_the_same_clause(node in arb_node()) {
        let mut builder = ClauseBuilder::new();
        emit(&mut builder, &node).expect("legal call sequence");

        let copy = builder.clone();
        prop_assert_eq!(builder.build().expect("complete"), copy.build().expect("complete"));
    }

    #[test]
    fn rebuilding_a_built_clause_round_trips(node in arb_node()) {
        let mut builder = ClauseBuilder::new();
        emit(&mut builder, &node).expect("legal call sequence");
        let clause = builder.build().expect("complete").expect("non-empty");

        // A rendered clause fed back in as a single operand survives intact.
        let mut rebuilt = ClauseBuilder::new();
        rebuilt.clause(clause.clone()).expect("fresh builder");
        prop_assert_eq!(rebuilt.build().expect("complete"), Some(clause));
    }
}
