//! Walker guarantees on whole problems: copy mode never touches its input,
//! and removing an action removes that action and nothing else.

use proptest::prelude::*;

use lock_tests::fixtures::blocks_three;
use wayfinder_kernel::fstrips::{
    Action, Dispatch, NodeHandler, Problem, ProblemWalker, Rewrite, WalkContext, WalkerError,
};
use wayfinder_kernel::grounding::ground_problem;
use wayfinder_kernel::syntax::{Constant, Expression};

/// Renames one constant everywhere it occurs.
struct RenameConstant {
    from: String,
}

impl NodeHandler for RenameConstant {
    fn on_expression(
        &mut self,
        node: Expression,
        _context: WalkContext,
    ) -> Result<Dispatch<Expression>, WalkerError> {
        Ok(match node {
            Expression::Constant(c) if c.name == self.from => {
                Dispatch::Handled(Rewrite::Keep(Expression::constant(&Constant::new("renamed", c.sort))))
            }
            other => Dispatch::Unhandled(other),
        })
    }
}

/// Removes the named actions.
struct Suppress {
    names: Vec<String>,
}

impl NodeHandler for Suppress {
    fn on_action(&mut self, action: Action) -> Result<Dispatch<Action>, WalkerError> {
        Ok(if self.names.contains(&action.name) {
            Dispatch::Handled(Rewrite::Remove)
        } else {
            Dispatch::Unhandled(action)
        })
    }
}

fn grounded_blocks() -> Problem {
    ground_problem(&blocks_three()).unwrap()
}

proptest! {
    #[test]
    fn copy_mode_leaves_the_input_untouched(block in prop::sample::select(vec!["a", "b", "c"])) {
        let problem = grounded_blocks();
        let before = problem.clone();

        let mut walker = ProblemWalker::new(RenameConstant { from: block.to_string() });
        let rewritten = walker.run_copy(&problem).unwrap().into_kept().unwrap();

        prop_assert_eq!(&problem, &before);
        prop_assert_ne!(&rewritten.goal, &before.goal);
        prop_assert!(rewritten.goal.to_string().contains("renamed"));
    }

    #[test]
    fn suppress_removes_exactly_the_targeted_actions(picks in prop::collection::vec(any::<prop::sample::Index>(), 0..5)) {
        let original = grounded_blocks();
        let names: Vec<String> = original.actions.keys().cloned().collect();
        let targets: Vec<String> = picks.iter().map(|i| i.get(&names).clone()).collect();

        let mut problem = original.clone();
        ProblemWalker::new(Suppress { names: targets.clone() }).visit_problem(&mut problem).unwrap();

        for (name, action) in &original.actions {
            if targets.contains(name) {
                prop_assert!(!problem.actions.contains_key(name), "{} survived", name);
            } else {
                prop_assert_eq!(problem.actions.get(name), Some(action));
            }
        }
        prop_assert_eq!(&problem.goal, &original.goal);
        prop_assert_eq!(&problem.init, &original.init);
    }
}

#[test]
fn suppressing_one_action_keeps_the_rest_identical() {
    let original = grounded_blocks();
    let mut problem = original.clone();
    ProblemWalker::new(Suppress {
        names: vec!["stack(a,b)".into()],
    })
    .visit_problem(&mut problem)
    .unwrap();

    assert_eq!(problem.actions.len(), original.actions.len() - 1);
    assert!(problem.action("stack(a,b)").is_none());
    let mut expected = original;
    expected.actions.remove("stack(a,b)");
    assert_eq!(problem, expected);
}

#[test]
fn in_place_run_rewrites_the_value_it_is_given() {
    let problem = grounded_blocks();
    let mut walker = ProblemWalker::new(RenameConstant { from: "a".into() });
    let rewritten = walker.run(problem).unwrap().into_kept().unwrap();
    assert!(rewritten.goal.to_string().contains("renamed"));
    assert!(!rewritten.goal.to_string().contains("(a"));
}
