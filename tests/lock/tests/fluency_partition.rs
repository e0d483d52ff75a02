//! Fluency is sound and partitions the language's non-builtin symbols.

use std::collections::BTreeSet;

use proptest::prelude::*;

use wayfinder_kernel::fstrips::{Action, Effect, Problem, UniversalEffect};
use wayfinder_kernel::grounding::approximate_symbol_fluency;
use wayfinder_kernel::syntax::{Expression, Language, SymbolRef};

const PREDICATES: usize = 6;
const FUNCTIONS: usize = 3;

#[derive(Debug, Clone)]
enum EffectShape {
    Add(usize),
    Del(usize),
    Assign(usize, usize),
    Nested(Box<EffectShape>),
}

fn effect_shape() -> impl Strategy<Value = EffectShape> {
    let leaf = prop_oneof![
        (0..PREDICATES).prop_map(EffectShape::Add),
        (0..PREDICATES).prop_map(EffectShape::Del),
        (0..FUNCTIONS, 0..FUNCTIONS).prop_map(|(l, r)| EffectShape::Assign(l, r)),
    ];
    leaf.prop_recursive(2, 8, 1, |inner| inner.prop_map(|e| EffectShape::Nested(Box::new(e))))
}

fn build(shape: &EffectShape) -> Effect {
    match shape {
        EffectShape::Add(p) => Effect::add(Expression::atom(format!("p{p}"), vec![])),
        EffectShape::Del(p) => Effect::del(Expression::atom(format!("p{p}"), vec![])),
        EffectShape::Assign(l, r) => Effect::assign(
            Expression::term(format!("f{l}"), vec![]),
            Expression::term(format!("f{r}"), vec![]),
        ),
        EffectShape::Nested(inner) => Effect::Universal(UniversalEffect {
            variables: Vec::new(),
            effects: vec![build(inner)],
        }),
    }
}

/// Head symbols written by a shape, looking through nesting.
fn heads(shape: &EffectShape, out: &mut BTreeSet<SymbolRef>) {
    match shape {
        EffectShape::Add(p) | EffectShape::Del(p) => {
            out.insert(SymbolRef::predicate(format!("p{p}")));
        }
        EffectShape::Assign(l, _) => {
            out.insert(SymbolRef::function(format!("f{l}")));
        }
        EffectShape::Nested(inner) => heads(inner, out),
    }
}

fn problem(actions: &[Vec<EffectShape>]) -> Problem {
    let mut lang = Language::new("random");
    for p in 0..PREDICATES {
        lang.declare_predicate(&format!("p{p}"), 0).unwrap();
    }
    for f in 0..FUNCTIONS {
        lang.declare_function(&format!("f{f}"), 0).unwrap();
    }
    lang.attach_equality();
    lang.attach_arithmetic();

    let mut problem = Problem::new("random", "random", lang);
    for (i, effects) in actions.iter().enumerate() {
        problem
            .add_action(Action::new(format!("act{i}")).with_effects(effects.iter().map(build).collect()))
            .unwrap();
    }
    problem
}

proptest! {
    #[test]
    fn fluent_and_static_partition_the_user_symbols(
        actions in prop::collection::vec(prop::collection::vec(effect_shape(), 0..4), 0..5),
    ) {
        let problem = problem(&actions);
        let fluency = approximate_symbol_fluency(&problem).unwrap();

        let mut written = BTreeSet::new();
        for effects in &actions {
            for shape in effects {
                heads(shape, &mut written);
            }
        }
        prop_assert_eq!(&fluency.fluent, &written);
        prop_assert!(fluency.fluent.is_disjoint(&fluency.statics));

        let user: BTreeSet<SymbolRef> = problem
            .language
            .symbols()
            .filter(|decl| !decl.builtin)
            .map(|decl| decl.symbol.clone())
            .collect();
        let union: BTreeSet<SymbolRef> = fluency.fluent.union(&fluency.statics).cloned().collect();
        prop_assert_eq!(union, user);
    }
}

#[test]
fn builtins_are_neither_fluent_nor_static() {
    let problem = problem(&[vec![EffectShape::Add(0)]]);
    let fluency = approximate_symbol_fluency(&problem).unwrap();
    let equality = SymbolRef::predicate("=");
    let plus = SymbolRef::function("+");
    assert!(!fluency.is_fluent(&equality) && !fluency.is_static(&equality));
    assert!(!fluency.is_fluent(&plus) && !fluency.is_static(&plus));
    assert_eq!(fluency.fluent.len(), 1);
    assert_eq!(fluency.statics.len(), PREDICATES - 1 + FUNCTIONS);
}
