//! Blind search: breadth-first and depth-first graph search.
//!
//! The two strategies share one loop and differ only in which end of the
//! open list is popped. Duplicate states may sit in the open list; a state
//! is expanded at most once because the closed set is checked on pop.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::contract::SearchModel;
use crate::error::SearchError;
use crate::frontier::{Discipline, OpenList};
use crate::node::NodeArena;
use crate::policy::{SearchPolicy, StepCost};
use crate::stats::{SearchOutcome, SearchStats, Termination};

/// Breadth-first search. On unit-cost models the plan has the fewest
/// actions among all plans.
#[derive(Debug)]
pub struct BreadthFirstSearch<'m, M> {
    model: &'m M,
    policy: SearchPolicy,
}

impl<'m, M: SearchModel> BreadthFirstSearch<'m, M> {
    #[must_use]
    pub fn new(model: &'m M, policy: SearchPolicy) -> Self {
        Self { model, policy }
    }

    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn run(&self) -> Result<SearchOutcome<M::Action>, SearchError> {
        self.policy.validate()?;
        Ok(blind_search(self.model, &self.policy, Discipline::Fifo))
    }
}

/// Depth-first search. Complete on finite state spaces; no optimality.
#[derive(Debug)]
pub struct DepthFirstSearch<'m, M> {
    model: &'m M,
    policy: SearchPolicy,
}

impl<'m, M: SearchModel> DepthFirstSearch<'m, M> {
    #[must_use]
    pub fn new(model: &'m M, policy: SearchPolicy) -> Self {
        Self { model, policy }
    }

    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn run(&self) -> Result<SearchOutcome<M::Action>, SearchError> {
        self.policy.validate()?;
        Ok(blind_search(self.model, &self.policy, Discipline::Lifo))
    }
}

fn blind_search<M: SearchModel>(
    model: &M,
    policy: &SearchPolicy,
    discipline: Discipline,
) -> SearchOutcome<M::Action> {
    let mut arena = NodeArena::new();
    let mut open = OpenList::new(discipline);
    let mut closed: HashSet<M::State> = HashSet::new();
    let mut stats = SearchStats::default();
    let mut step_cost = StepCost::new(policy.cost_model);

    open.push(arena.push_root(model.initial_state()));

    while let Some(id) = open.pop() {
        stats.iterations += 1;
        let state = arena.get(id).state.clone();

        if model.is_goal(&state) {
            stats.num_goals += 1;
            stats.frontier_high_water = open.high_water();
            info!(?discipline, expansions = stats.nexpansions, "goal found");
            return SearchOutcome {
                plan: Some(arena.extract_path(id)),
                stats,
                termination: Termination::GoalReached,
            };
        }

        if closed.contains(&state) {
            debug!(node = id, "state already closed");
            continue;
        }
        closed.insert(state.clone());

        if policy.max_expansions.is_exhausted(stats.nexpansions) {
            stats.frontier_high_water = open.high_water();
            info!(?discipline, expansions = stats.nexpansions, "expansion budget reached");
            return SearchOutcome {
                plan: None,
                stats,
                termination: Termination::BudgetExhausted,
            };
        }

        for (action, successor) in model.successors(&state) {
            let cost = step_cost.of(model, &action);
            open.push(arena.push_child(id, action, successor, cost));
        }
        stats.nexpansions += 1;
    }

    stats.frontier_high_water = open.high_water();
    info!(?discipline, expansions = stats.nexpansions, "search space exhausted");
    SearchOutcome {
        plan: None,
        stats,
        termination: Termination::SpaceExhausted,
    }
}
