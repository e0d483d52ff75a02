//! Tree search keeps exactly one live node per reached state, and that
//! node hangs under the closed map's recorded owner.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use proptest::prelude::*;

use lock_tests::fixtures::{blocks_three, numbered_graph};
use wayfinder_harness::model::GroundForwardSearchModel;
use wayfinder_kernel::grounding::{ground_problem, prune_static};
use wayfinder_search::tree::ROOT;
use wayfinder_search::{
    zero_heuristic, CostModel, ExpansionBudget, SearchModel, SearchPolicy, SearchTree, StepCost,
    Termination, TreeSearch,
};

fn assert_single_owner<S, A>(tree: &SearchTree<S, A>)
where
    S: Clone + Eq + Hash + Debug,
    A: Clone,
{
    let mut seen = HashSet::new();
    for id in tree.live_nodes() {
        let node = tree.node(id);
        assert!(seen.insert(node.state.clone()), "{:?} held by two live nodes", node.state);
        let entry = tree.closed_entry(&node.state).expect("live state is closed");
        assert_eq!(entry.owner, node.parent, "owner of {:?}", node.state);
        if id != ROOT {
            let parent = tree.node(node.parent.expect("non-root has a parent"));
            assert!(parent.children.contains(&id));
        }
    }
}

/// Every live expanded node backs up `1 + min(child.h)`.
fn assert_backed_up<S, A>(tree: &SearchTree<S, A>)
where
    S: Clone + Eq + Hash + Debug,
    A: Clone,
{
    for id in tree.live_nodes() {
        let node = tree.node(id);
        if !node.expanded {
            continue;
        }
        let best = node
            .children
            .iter()
            .map(|&c| tree.node(c).h)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(node.h, best + 1.0, "h of {:?}", node.state);
    }
}

/// Step a tree by hand, checking the invariants after every expansion.
///
/// With the zero heuristic every live leaf is selectable, so selection may
/// only come back empty once no live node is left unexpanded.
fn grow<M: SearchModel>(model: &M, steps: usize, cost_model: CostModel) -> SearchTree<M::State, M::Action> {
    let mut tree = SearchTree::new(model.initial_state(), 0.0);
    let mut step_cost = StepCost::new(cost_model);
    for _ in 0..steps {
        let Some(id) = tree.select_frontier(2.0) else {
            let open: Vec<_> = tree
                .live_nodes()
                .into_iter()
                .filter(|&id| !tree.node(id).expanded)
                .map(|id| tree.node(id).state.clone())
                .collect();
            assert!(open.is_empty(), "selection gave up with live leaves {open:?}");
            break;
        };
        tree.expand(id, model, &zero_heuristic, &mut step_cost);
        assert_single_owner(&tree);
        assert_backed_up(&tree);
    }
    tree
}

proptest! {
    #[test]
    fn reparenting_keeps_one_live_node_per_state(
        (n, edges) in (2usize..9).prop_flat_map(|n| {
            (Just(n), prop::collection::vec((0..n, 0..n, 1u8..5), 0..24))
        }),
        steps in 1usize..30,
    ) {
        let graph = numbered_graph(n, &edges);
        grow(&graph, steps, CostModel::ActionCost);
        grow(&graph, steps, CostModel::Uniform);
    }
}

#[test]
fn cheaper_rediscovery_moves_the_node() {
    // s0 -5-> s1, s0 -1-> s2, s2 -1-> s1, s1 -1-> s3.
    let graph = numbered_graph(4, &[(0, 1, 5), (0, 2, 1), (2, 1, 1), (1, 3, 1)]);
    let s1 = "s1".to_string();

    // Root, then s1 (first of the tied unexpanded children).
    let tree = grow(&graph, 2, CostModel::ActionCost);
    let entry = tree.closed_entry(&s1).unwrap();
    assert!((entry.cost - 5.0).abs() < f64::EPSILON);
    assert_eq!(entry.owner, Some(ROOT));

    // Expanding s2 reaches s1 for 2; the old s1 node and its subtree drop out.
    let tree = grow(&graph, 3, CostModel::ActionCost);
    let entry = tree.closed_entry(&s1).unwrap();
    assert!((entry.cost - 2.0).abs() < f64::EPSILON);
    assert_eq!(tree.node(entry.owner.unwrap()).state, "s2");

    let live: Vec<&str> = tree
        .live_nodes()
        .into_iter()
        .map(|id| tree.node(id).state.as_str())
        .collect();
    assert_eq!(live, ["s0", "s2", "s1"]);
    assert_eq!(tree.len(), 5);
}

#[test]
fn childless_owner_does_not_end_the_search() {
    // s1 loses s4 to s2, which reaches it cheaper; the goal s5 hangs
    // under s3 and must still be found.
    let graph = numbered_graph(
        6,
        &[(0, 1, 1), (0, 2, 1), (0, 3, 1), (1, 4, 10), (2, 4, 1), (3, 5, 1)],
    );
    let policy = SearchPolicy {
        cost_model: CostModel::ActionCost,
        ..SearchPolicy::default()
    };
    let outcome = TreeSearch::new(&graph, policy, zero_heuristic).run().unwrap();
    assert_eq!(outcome.plan, Some(vec!["e2".to_string(), "e5".to_string()]));
    assert_eq!(outcome.termination, Termination::GoalReached);
    assert_single_owner(&outcome.tree);
    assert_backed_up(&outcome.tree);
}

#[test]
fn blocksworld_tree_search_keeps_the_invariant() {
    let mut problem = ground_problem(&blocks_three()).unwrap();
    prune_static(&mut problem).unwrap();
    let model = GroundForwardSearchModel::new(&problem).unwrap();

    let tree = grow(&model, 40, CostModel::Uniform);
    assert!(tree.nexpansions() > 0);

    let outcome = TreeSearch::new(
        &model,
        SearchPolicy::with_budget(ExpansionBudget::Limit(10_000)),
        zero_heuristic,
    )
    .run()
    .unwrap();
    assert!(outcome.plan.is_some());
    assert_single_owner(&outcome.tree);
}
