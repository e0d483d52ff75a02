//! Optimality and re-expansion properties of the graph strategies, checked
//! against the naive oracles on random graphs.

use proptest::prelude::*;

use lock_tests::fixtures::{numbered_graph, CountingModel};
use lock_tests::oracle::{cheapest_plan_cost, perfect_heuristic, replay_cost, shortest_plan_length};
use wayfinder_harness::worlds::explicit_graph::ExplicitGraph;
use wayfinder_search::{
    zero_heuristic, AStarSearch, BreadthFirstSearch, CostModel, DepthFirstSearch, GreedySearch,
    SearchModel, SearchPolicy,
};

/// Random graphs over `n` states with unit-cost edges.
fn unit_graph() -> impl Strategy<Value = ExplicitGraph> {
    (2usize..8).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n), 0..20)
            .prop_map(move |edges| {
                let edges: Vec<_> = edges.into_iter().map(|(a, b)| (a, b, 1)).collect();
                numbered_graph(n, &edges)
            })
    })
}

/// Random weighted graphs where every non-goal state has an expensive
/// edge straight to the goal, so the goal is reachable from everywhere.
fn escapable_graph() -> impl Strategy<Value = ExplicitGraph> {
    (2usize..8).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 1u8..6), 0..20).prop_map(move |mut edges| {
            edges.extend((0..n - 1).map(|s| (s, n - 1, 20)));
            numbered_graph(n, &edges)
        })
    })
}

fn action_cost_policy() -> SearchPolicy {
    SearchPolicy {
        cost_model: CostModel::ActionCost,
        ..SearchPolicy::default()
    }
}

proptest! {
    #[test]
    fn bfs_returns_a_shortest_plan(graph in unit_graph()) {
        let outcome = BreadthFirstSearch::new(&graph, SearchPolicy::default()).run().unwrap();
        let expected = shortest_plan_length(&graph);
        prop_assert_eq!(outcome.plan.as_ref().map(Vec::len), expected);
        if let Some(plan) = &outcome.plan {
            prop_assert!(replay_cost(&graph, plan).is_some());
        }
    }

    #[test]
    fn dfs_finds_a_plan_exactly_when_one_exists(graph in unit_graph()) {
        let outcome = DepthFirstSearch::new(&graph, SearchPolicy::default()).run().unwrap();
        prop_assert_eq!(outcome.plan.is_some(), shortest_plan_length(&graph).is_some());
        if let Some(plan) = &outcome.plan {
            prop_assert!(replay_cost(&graph, plan).is_some());
        }
    }

    #[test]
    fn blind_search_never_expands_a_state_twice(graph in unit_graph()) {
        let counted = CountingModel::new(graph.clone());
        BreadthFirstSearch::new(&counted, SearchPolicy::default()).run().unwrap();
        prop_assert!(counted.max_expansions_of_any_state() <= 1);

        let counted = CountingModel::new(graph);
        DepthFirstSearch::new(&counted, SearchPolicy::default()).run().unwrap();
        prop_assert!(counted.max_expansions_of_any_state() <= 1);
    }

    #[test]
    fn astar_with_zero_heuristic_is_optimal(graph in escapable_graph()) {
        let outcome = AStarSearch::new(&graph, action_cost_policy(), zero_heuristic).run().unwrap();
        let plan = outcome.plan.expect("goal reachable from every state");
        let cost = replay_cost(&graph, &plan).expect("plan reaches the goal");
        let best = cheapest_plan_cost(&graph).expect("goal reachable");
        prop_assert!((cost - best).abs() < 1e-9, "plan cost {} vs optimum {}", cost, best);
    }

    #[test]
    fn astar_with_perfect_heuristic_is_optimal_and_expands_each_state_once(graph in escapable_graph()) {
        let h = perfect_heuristic(&graph);
        let heuristic = |s: &String| h.get(&format!("{s:?}")).copied().unwrap_or(0.0);
        let counted = CountingModel::new(graph.clone());
        let outcome = AStarSearch::new(&counted, action_cost_policy(), heuristic).run().unwrap();

        let plan = outcome.plan.expect("goal reachable from every state");
        let cost = replay_cost(&graph, &plan).expect("plan reaches the goal");
        let best = cheapest_plan_cost(&graph).expect("goal reachable");
        prop_assert!((cost - best).abs() < 1e-9, "plan cost {} vs optimum {}", cost, best);
        prop_assert!(counted.max_expansions_of_any_state() <= 1);
    }

    #[test]
    fn astar_never_expands_more_than_uniform_cost_search(graph in escapable_graph()) {
        let h = perfect_heuristic(&graph);
        let heuristic = |s: &String| h.get(&format!("{s:?}")).copied().unwrap_or(0.0);
        let informed = AStarSearch::new(&graph, action_cost_policy(), heuristic).run().unwrap();
        let blind = AStarSearch::new(&graph, action_cost_policy(), zero_heuristic).run().unwrap();
        prop_assert!(informed.stats.nexpansions <= blind.stats.nexpansions);
    }
}

/// `s0 -> x` is expensive, `s0 -> y -> x` is cheap. Greedy pops `x` first
/// (lowest h), then finds it again strictly cheaper through `y`.
fn rediscovery_graph() -> ExplicitGraph {
    ExplicitGraph::new("s0")
        .edge("s0", "s0-x", "x", 10.0)
        .edge("s0", "s0-y", "y", 1.0)
        .edge("y", "y-x", "x", 1.0)
        .edge("x", "x-z", "z", 1.0)
        .edge("z", "z-g", "g", 1.0)
        .goal("g")
}

fn rediscovery_heuristic(state: &String) -> f64 {
    match state.as_str() {
        "x" => 1.0,
        "y" => 5.0,
        "z" => 6.0,
        _ => 0.0,
    }
}

#[test]
fn greedy_reopens_a_state_only_when_strictly_cheaper() {
    let counted = CountingModel::new(rediscovery_graph());
    let outcome = GreedySearch::new(&counted, action_cost_policy(), rediscovery_heuristic)
        .run()
        .unwrap();

    assert_eq!(
        outcome.plan,
        Some(vec!["s0-y".into(), "y-x".into(), "x-z".into(), "z-g".into()])
    );
    let expansions = counted.expansions();
    assert_eq!(expansions["\"x\""], 2);
    // The first `z` entry went stale and was skipped.
    assert_eq!(expansions["\"z\""], 1);
    assert_eq!(outcome.stats.nexpansions, 5);
    assert_eq!(outcome.stats.iterations, 7);
}

#[test]
fn uniform_cost_model_ignores_declared_costs() {
    let graph = rediscovery_graph();
    let uniform = AStarSearch::new(&graph, SearchPolicy::default(), zero_heuristic)
        .run()
        .unwrap();
    // Three steps through the expensive edge beat four cheap ones.
    assert_eq!(
        uniform.plan,
        Some(vec!["s0-x".into(), "x-z".into(), "z-g".into()])
    );
    assert!(graph.action_cost(&"s0-x".to_string()) > 1.0);

    let weighted = AStarSearch::new(&graph, action_cost_policy(), zero_heuristic)
        .run()
        .unwrap();
    assert_eq!(weighted.plan.map(|p| p.len()), Some(4));
}
