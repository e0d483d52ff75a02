//! Reference answers computed without the engines.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use wayfinder_search::SearchModel;

/// Fewest actions from the initial state to any goal, by plain BFS.
#[must_use]
pub fn shortest_plan_length<M: SearchModel>(model: &M) -> Option<usize> {
    let init = model.initial_state();
    let mut depth: HashMap<M::State, usize> = HashMap::from([(init.clone(), 0)]);
    let mut queue = VecDeque::from([init]);
    while let Some(state) = queue.pop_front() {
        let d = depth[&state];
        if model.is_goal(&state) {
            return Some(d);
        }
        for (_, next) in model.successors(&state) {
            if !depth.contains_key(&next) {
                depth.insert(next.clone(), d + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Cheapest action-cost distance from `from` to every reachable state.
fn distances<M: SearchModel>(model: &M, from: &M::State) -> HashMap<M::State, f64> {
    let mut best: HashMap<M::State, f64> = HashMap::from([(from.clone(), 0.0)]);
    let mut settled: HashSet<M::State> = HashSet::new();
    loop {
        let next = best
            .iter()
            .filter(|(s, _)| !settled.contains(*s))
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(s, d)| (s.clone(), *d));
        let Some((state, d)) = next else {
            return best;
        };
        settled.insert(state.clone());
        for (action, succ) in model.successors(&state) {
            let cost = d + model.action_cost(&action);
            if !best.get(&succ).is_some_and(|&old| old <= cost) {
                best.insert(succ, cost);
            }
        }
    }
}

/// Cheapest plan cost from the initial state to any goal, by Dijkstra.
#[must_use]
pub fn cheapest_plan_cost<M: SearchModel>(model: &M) -> Option<f64> {
    cheapest_cost_from(model, &model.initial_state())
}

/// Cheapest cost from `from` to any goal.
#[must_use]
pub fn cheapest_cost_from<M: SearchModel>(model: &M, from: &M::State) -> Option<f64> {
    distances(model, from)
        .into_iter()
        .filter(|(s, _)| model.is_goal(s))
        .map(|(_, d)| d)
        .min_by(f64::total_cmp)
}

/// The perfect heuristic `h*` for every state reachable from the initial
/// state, infinite where no goal is reachable. `h*` is consistent.
#[must_use]
pub fn perfect_heuristic<M: SearchModel>(model: &M) -> BTreeMap<String, f64> {
    distances(model, &model.initial_state())
        .into_keys()
        .map(|s| {
            let h = cheapest_cost_from(model, &s).unwrap_or(f64::INFINITY);
            (format!("{s:?}"), h)
        })
        .collect()
}

/// Replay `plan` from the initial state. Returns the plan cost if every
/// step is applicable and the last state is a goal.
#[must_use]
pub fn replay_cost<M: SearchModel>(model: &M, plan: &[M::Action]) -> Option<f64>
where
    M::Action: PartialEq,
{
    let mut state = model.initial_state();
    let mut cost = 0.0;
    for step in plan {
        let (action, next) = model.successors(&state).into_iter().find(|(a, _)| a == step)?;
        cost += model.action_cost(&action);
        state = next;
    }
    model.is_goal(&state).then_some(cost)
}
