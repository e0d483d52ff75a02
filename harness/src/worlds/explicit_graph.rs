//! `ExplicitGraph`: a search model given as a labelled edge list.
//!
//! States are names, actions are edge labels. Successors come out in the
//! order their edges were added. A label's cost is the cost given on the
//! last edge that used it.

use std::collections::{BTreeMap, BTreeSet};

use wayfinder_search::SearchModel;

#[derive(Debug, Clone, Default)]
pub struct ExplicitGraph {
    initial: String,
    goals: BTreeSet<String>,
    edges: BTreeMap<String, Vec<(String, String)>>,
    costs: BTreeMap<String, f64>,
}

impl ExplicitGraph {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            ..Self::default()
        }
    }

    /// Add `from --label--> to` with the given action cost.
    #[must_use]
    pub fn edge(mut self, from: impl Into<String>, label: impl Into<String>, to: impl Into<String>, cost: f64) -> Self {
        let label = label.into();
        self.costs.insert(label.clone(), cost);
        self.edges.entry(from.into()).or_default().push((label, to.into()));
        self
    }

    #[must_use]
    pub fn goal(mut self, state: impl Into<String>) -> Self {
        self.goals.insert(state.into());
        self
    }

    /// Every state reachable from the initial state, the initial state included.
    #[must_use]
    pub fn reachable(&self) -> BTreeSet<String> {
        let mut seen = BTreeSet::from([self.initial.clone()]);
        let mut stack = vec![self.initial.clone()];
        while let Some(state) = stack.pop() {
            for (_, next) in self.edges.get(&state).into_iter().flatten() {
                if seen.insert(next.clone()) {
                    stack.push(next.clone());
                }
            }
        }
        seen
    }
}

impl SearchModel for ExplicitGraph {
    type State = String;
    type Action = String;

    fn initial_state(&self) -> String {
        self.initial.clone()
    }

    fn is_goal(&self, state: &String) -> bool {
        self.goals.contains(state)
    }

    fn successors(&self, state: &String) -> Vec<(String, String)> {
        self.edges.get(state).cloned().unwrap_or_default()
    }

    fn action_cost(&self, action: &String) -> f64 {
        self.costs
            .get(action)
            .copied()
            .unwrap_or(wayfinder_search::contract::UNIT_ACTION_COST)
    }
}
