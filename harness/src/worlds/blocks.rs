//! Lifted blocksworld with a single gripper.
//!
//! Towers are listed bottom to top. The goal is the conjunction of every
//! `on`/`ontable` fact of the goal towers; `clear` and the gripper are left
//! unconstrained.

use wayfinder_kernel::fstrips::{Action, Effect, Problem};
use wayfinder_kernel::syntax::{Constant, Expression, Language, LanguageError, Variable, EQUALITY};

pub const BLOCK: &str = "block";

fn block(name: &str) -> Expression {
    Expression::constant(&Constant::new(name, BLOCK))
}

fn atom(predicate: &str, args: Vec<Expression>) -> Expression {
    Expression::atom(predicate, args)
}

/// Facts describing `towers`: `on`, `ontable` and, when `with_clear`, `clear`.
fn tower_facts(towers: &[&[&str]], with_clear: bool) -> Vec<Expression> {
    let mut facts = Vec::new();
    for tower in towers {
        if let Some(bottom) = tower.first() {
            facts.push(atom("ontable", vec![block(bottom)]));
        }
        for pair in tower.windows(2) {
            facts.push(atom("on", vec![block(pair[1]), block(pair[0])]));
        }
        if with_clear {
            if let Some(top) = tower.last() {
                facts.push(atom("clear", vec![block(top)]));
            }
        }
    }
    facts
}

fn schemas() -> Vec<Action> {
    let x = Variable::new("x", BLOCK);
    let y = Variable::new("y", BLOCK);
    let vx = Expression::var(&x);
    let vy = Expression::var(&y);
    let handempty = || atom("handempty", vec![]);

    vec![
        Action::new("pick-up")
            .with_parameters(vec![x.clone()])
            .with_precondition(Expression::and(vec![
                atom("clear", vec![vx.clone()]),
                atom("ontable", vec![vx.clone()]),
                handempty(),
            ]))
            .with_effects(vec![
                Effect::del(atom("ontable", vec![vx.clone()])),
                Effect::del(atom("clear", vec![vx.clone()])),
                Effect::del(handempty()),
                Effect::add(atom("holding", vec![vx.clone()])),
            ]),
        Action::new("put-down")
            .with_parameters(vec![x.clone()])
            .with_precondition(atom("holding", vec![vx.clone()]))
            .with_effects(vec![
                Effect::del(atom("holding", vec![vx.clone()])),
                Effect::add(atom("clear", vec![vx.clone()])),
                Effect::add(atom("ontable", vec![vx.clone()])),
                Effect::add(handempty()),
            ]),
        Action::new("stack")
            .with_parameters(vec![x.clone(), y.clone()])
            .with_precondition(Expression::and(vec![
                atom("holding", vec![vx.clone()]),
                atom("clear", vec![vy.clone()]),
                Expression::not(atom(EQUALITY, vec![vx.clone(), vy.clone()])),
            ]))
            .with_effects(vec![
                Effect::del(atom("holding", vec![vx.clone()])),
                Effect::del(atom("clear", vec![vy.clone()])),
                Effect::add(atom("clear", vec![vx.clone()])),
                Effect::add(handempty()),
                Effect::add(atom("on", vec![vx.clone(), vy.clone()])),
            ]),
        Action::new("unstack")
            .with_parameters(vec![x, y])
            .with_precondition(Expression::and(vec![
                atom("on", vec![vx.clone(), vy.clone()]),
                atom("clear", vec![vx.clone()]),
                handempty(),
            ]))
            .with_effects(vec![
                Effect::del(atom("on", vec![vx.clone(), vy.clone()])),
                Effect::del(atom("clear", vec![vx.clone()])),
                Effect::del(handempty()),
                Effect::add(atom("holding", vec![vx])),
                Effect::add(atom("clear", vec![vy])),
            ]),
    ]
}

/// Build a blocksworld problem moving `initial` towers into `goal` towers.
///
/// Blocks are the ones named in `initial`.
///
/// # Errors
///
/// Returns [`LanguageError::DuplicateConstant`] if a block appears twice in
/// `initial`.
pub fn blocksworld(name: &str, initial: &[&[&str]], goal: &[&[&str]]) -> Result<Problem, LanguageError> {
    let mut lang = Language::new("blocksworld");
    lang.declare_sort(BLOCK)?;
    for tower in initial {
        for b in *tower {
            lang.declare_constant(b, BLOCK)?;
        }
    }
    lang.declare_predicate("on", 2)?;
    lang.declare_predicate("ontable", 1)?;
    lang.declare_predicate("clear", 1)?;
    lang.declare_predicate("holding", 1)?;
    lang.declare_predicate("handempty", 0)?;
    lang.attach_equality();

    let mut problem = Problem::new("blocksworld", name, lang);
    for fact in tower_facts(initial, true) {
        problem.init.add(fact);
    }
    problem.init.add(atom("handempty", vec![]));
    problem.goal = Expression::and(tower_facts(goal, false));
    for schema in schemas() {
        problem.actions.insert(schema.name.clone(), schema);
    }
    Ok(problem)
}
