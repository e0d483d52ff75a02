//! Canonical fixtures. The `report_fixture` binary and the in-process
//! tests both build their inputs from here, so the two cannot drift.

use std::cell::RefCell;
use std::collections::BTreeMap;

use wayfinder_harness::worlds::blocks::blocksworld;
use wayfinder_harness::worlds::explicit_graph::ExplicitGraph;
use wayfinder_kernel::fstrips::Problem;
use wayfinder_search::SearchModel;

/// `s0 --a(1)--> s1`, goal `s1`.
#[must_use]
pub fn two_state_graph() -> ExplicitGraph {
    ExplicitGraph::new("s0").edge("s0", "a", "s1", 1.0).goal("s1")
}

/// Initial state is the goal.
#[must_use]
pub fn goal_at_start_graph() -> ExplicitGraph {
    ExplicitGraph::new("s0")
        .edge("s0", "a", "s1", 1.0)
        .edge("s1", "b", "s0", 1.0)
        .goal("s0")
}

/// Five reachable states with cycles and no goal among them. The goal `g`
/// is only reachable from a state the initial state cannot reach.
#[must_use]
pub fn trapped_graph() -> ExplicitGraph {
    ExplicitGraph::new("s0")
        .edge("s0", "a", "s1", 1.0)
        .edge("s0", "b", "s2", 1.0)
        .edge("s1", "c", "s3", 1.0)
        .edge("s2", "d", "s3", 1.0)
        .edge("s3", "e", "s4", 1.0)
        .edge("s4", "f", "s0", 1.0)
        .edge("x", "g", "g", 1.0)
        .goal("g")
}

/// Build a graph over states `s0..s{n-1}` from `(from, to, cost)` triples.
/// Every edge gets its own label `e{index}`; the goal is `s{n-1}`.
#[must_use]
pub fn numbered_graph(n: usize, edges: &[(usize, usize, u8)]) -> ExplicitGraph {
    let mut graph = ExplicitGraph::new("s0");
    for (i, &(from, to, cost)) in edges.iter().enumerate() {
        graph = graph.edge(format!("s{from}"), format!("e{i}"), format!("s{to}"), f64::from(cost));
    }
    graph.goal(format!("s{}", n.saturating_sub(1)))
}

/// Three blocks, `a` on `b` on the table beside `c`; goal tower c-b-a.
///
/// # Panics
///
/// Never: the fixture declares each block once.
#[must_use]
pub fn blocks_three() -> Problem {
    blocksworld("three", &[&["b", "a"], &["c"]], &[&["c", "b", "a"]]).expect("valid fixture")
}

/// Four blocks in one tower, goal is the reversed tower.
///
/// # Panics
///
/// Never: the fixture declares each block once.
#[must_use]
pub fn blocks_reverse_four() -> Problem {
    blocksworld("reverse-four", &[&["a", "b", "c", "d"]], &[&["d", "c", "b", "a"]])
        .expect("valid fixture")
}

/// Wraps a model and counts how often each state is expanded.
#[derive(Debug)]
pub struct CountingModel<M: SearchModel> {
    pub inner: M,
    expansions: RefCell<BTreeMap<String, u64>>,
}

impl<M: SearchModel> CountingModel<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            expansions: RefCell::new(BTreeMap::new()),
        }
    }

    /// Expansion count per state, keyed by the state's `Debug` rendering.
    #[must_use]
    pub fn expansions(&self) -> BTreeMap<String, u64> {
        self.expansions.borrow().clone()
    }

    #[must_use]
    pub fn max_expansions_of_any_state(&self) -> u64 {
        self.expansions.borrow().values().copied().max().unwrap_or(0)
    }
}

impl<M: SearchModel> SearchModel for CountingModel<M> {
    type State = M::State;
    type Action = M::Action;

    fn initial_state(&self) -> M::State {
        self.inner.initial_state()
    }

    fn is_goal(&self, state: &M::State) -> bool {
        self.inner.is_goal(state)
    }

    fn successors(&self, state: &M::State) -> Vec<(M::Action, M::State)> {
        *self
            .expansions
            .borrow_mut()
            .entry(format!("{state:?}"))
            .or_default() += 1;
        self.inner.successors(state)
    }

    fn action_cost(&self, action: &M::Action) -> f64 {
        self.inner.action_cost(action)
    }
}
