//! Shared helpers for wayfinder benchmark suites.

use serde_json::{json, Value};

use wayfinder_harness::model::GroundForwardSearchModel;
use wayfinder_harness::runner::RunSummary;
use wayfinder_harness::worlds::blocks::blocksworld;
use wayfinder_harness::worlds::explicit_graph::ExplicitGraph;
use wayfinder_kernel::fstrips::Problem;
use wayfinder_kernel::grounding::{ground_problem, prune_static};

/// A named lifted problem to benchmark.
pub struct Regime {
    pub name: &'static str,
    pub problem: Problem,
}

/// The blocksworld regimes, smallest first.
///
/// # Panics
///
/// Panics if a fixture declares a block twice (a bug in this file).
#[must_use]
pub fn regimes() -> Vec<Regime> {
    fn build(name: &'static str, initial: &[&[&str]], goal: &[&[&str]]) -> Regime {
        Regime {
            name,
            problem: blocksworld(name, initial, goal).expect("valid blocksworld fixture"),
        }
    }
    vec![
        build("blocks3_sussman", &[&["a", "c"], &["b"]], &[&["c", "b", "a"]]),
        build("blocks4_reverse", &[&["a", "b", "c", "d"]], &[&["d", "c", "b", "a"]]),
        build(
            "blocks5_scatter",
            &[&["e", "d", "c", "b", "a"]],
            &[&["a", "c"], &["e", "b"], &["d"]],
        ),
    ]
}

/// Ground, prune and wrap a problem once, so benches time search alone.
///
/// # Panics
///
/// Panics if any pipeline step fails. Benchmark setup failures are fatal.
#[must_use]
pub fn prepare_model(problem: &Problem) -> GroundForwardSearchModel {
    let mut grounded = ground_problem(problem).expect("grounding");
    prune_static(&mut grounded).expect("static pruning");
    GroundForwardSearchModel::new(&grounded).expect("ground model")
}

/// A `width x width` grid with moves in four directions; start at the top
/// left corner, goal at the bottom right. Wide frontiers, many duplicates.
#[must_use]
pub fn grid_graph(width: usize) -> ExplicitGraph {
    let cell = |x: usize, y: usize| format!("{x},{y}");
    let mut graph = ExplicitGraph::new(cell(0, 0));
    for x in 0..width {
        for y in 0..width {
            if x + 1 < width {
                graph = graph
                    .edge(cell(x, y), "right", cell(x + 1, y), 1.0)
                    .edge(cell(x + 1, y), "left", cell(x, y), 1.0);
            }
            if y + 1 < width {
                graph = graph
                    .edge(cell(x, y), "down", cell(x, y + 1), 1.0)
                    .edge(cell(x, y + 1), "up", cell(x, y), 1.0);
            }
        }
    }
    graph.goal(cell(width.saturating_sub(1), width.saturating_sub(1)))
}

/// Manhattan distance to the grid's goal corner. Consistent on
/// [`grid_graph`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_manhattan(width: usize) -> impl Fn(&String) -> f64 {
    let goal = width.saturating_sub(1);
    move |state: &String| {
        let mut parts = state.split(',').filter_map(|p| p.parse::<usize>().ok());
        match (parts.next(), parts.next()) {
            (Some(x), Some(y)) => (goal.abs_diff(x) + goal.abs_diff(y)) as f64,
            _ => 0.0,
        }
    }
}

/// Run metadata recorded next to timings in the auditable report.
#[must_use]
pub fn summary_metadata<A>(summary: &RunSummary<A>) -> Value {
    json!({
        "digest": summary.report.digest(),
        "frontier_high_water": summary.stats.frontier_high_water,
        "iterations": summary.stats.iterations,
        "nexpansions": summary.stats.nexpansions,
        "plan_length": summary.plan.as_ref().map(Vec::len),
        "termination": summary.termination.as_str(),
    })
}
