//! Informed search: A* and greedy best-first.
//!
//! Both keep a closed map from state to the best accumulated cost seen. A
//! successor is enqueued only if its state is unseen or reached strictly
//! cheaper than before. Entries left behind in the queue by a later, cheaper
//! path are skipped on pop.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::contract::SearchModel;
use crate::error::SearchError;
use crate::frontier::PriorityFrontier;
use crate::node::NodeArena;
use crate::policy::{SearchPolicy, StepCost};
use crate::stats::{SearchOutcome, SearchStats, Termination};

/// How the queue priority is built from `g` and `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ordering {
    /// `g + h`
    AStar,
    /// `h` only
    Greedy,
}

impl Ordering {
    fn priority(self, g: f64, h: f64) -> f64 {
        match self {
            Self::AStar => g + h,
            Self::Greedy => h,
        }
    }
}

/// A* search. With a consistent, non-negative heuristic the plan has
/// minimal cost under the policy's cost model.
pub struct AStarSearch<'m, M, H> {
    model: &'m M,
    policy: SearchPolicy,
    heuristic: H,
}

impl<'m, M, H> AStarSearch<'m, M, H>
where
    M: SearchModel,
    H: Fn(&M::State) -> f64,
{
    #[must_use]
    pub fn new(model: &'m M, policy: SearchPolicy, heuristic: H) -> Self {
        Self {
            model,
            policy,
            heuristic,
        }
    }

    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn run(&self) -> Result<SearchOutcome<M::Action>, SearchError> {
        self.policy.validate()?;
        Ok(best_first(self.model, &self.policy, &self.heuristic, Ordering::AStar))
    }
}

/// Greedy best-first search: the queue is ordered by `h` alone. Accumulated
/// cost still drives the closed map.
pub struct GreedySearch<'m, M, H> {
    model: &'m M,
    policy: SearchPolicy,
    heuristic: H,
}

impl<'m, M, H> GreedySearch<'m, M, H>
where
    M: SearchModel,
    H: Fn(&M::State) -> f64,
{
    #[must_use]
    pub fn new(model: &'m M, policy: SearchPolicy, heuristic: H) -> Self {
        Self {
            model,
            policy,
            heuristic,
        }
    }

    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn run(&self) -> Result<SearchOutcome<M::Action>, SearchError> {
        self.policy.validate()?;
        Ok(best_first(self.model, &self.policy, &self.heuristic, Ordering::Greedy))
    }
}

/// The heuristic that knows nothing. A* with it is uniform-cost search.
#[must_use]
pub fn zero_heuristic<S>(_state: &S) -> f64 {
    0.0
}

fn best_first<M, H>(
    model: &M,
    policy: &SearchPolicy,
    heuristic: &H,
    ordering: Ordering,
) -> SearchOutcome<M::Action>
where
    M: SearchModel,
    H: Fn(&M::State) -> f64,
{
    let mut arena = NodeArena::new();
    let mut open = PriorityFrontier::new();
    let mut closed: HashMap<M::State, f64> = HashMap::new();
    let mut stats = SearchStats::default();
    let mut step_cost = StepCost::new(policy.cost_model);

    let init = model.initial_state();
    let h0 = heuristic(&init);
    closed.insert(init.clone(), 0.0);
    open.push(ordering.priority(0.0, h0), arena.push_root(init));

    while let Some(id) = open.pop() {
        stats.iterations += 1;
        let (state, g) = {
            let node = arena.get(id);
            (node.state.clone(), node.accumulated_cost)
        };

        if closed.get(&state).is_some_and(|&best| g > best) {
            debug!(node = id, g, "skipping stale queue entry");
            continue;
        }

        if model.is_goal(&state) {
            stats.num_goals += 1;
            stats.frontier_high_water = open.high_water();
            info!(?ordering, cost = g, expansions = stats.nexpansions, "goal found");
            return SearchOutcome {
                plan: Some(arena.extract_path(id)),
                stats,
                termination: Termination::GoalReached,
            };
        }

        if policy.max_expansions.is_exhausted(stats.nexpansions) {
            stats.frontier_high_water = open.high_water();
            info!(?ordering, expansions = stats.nexpansions, "expansion budget reached");
            return SearchOutcome {
                plan: None,
                stats,
                termination: Termination::BudgetExhausted,
            };
        }

        for (action, successor) in model.successors(&state) {
            let step = step_cost.of(model, &action);
            let cost = g + step;
            if closed.get(&successor).is_some_and(|&best| best <= cost) {
                continue;
            }
            closed.insert(successor.clone(), cost);
            let h = heuristic(&successor);
            let child = arena.push_child(id, action, successor, step);
            open.push(ordering.priority(cost, h), child);
        }
        stats.nexpansions += 1;
    }

    stats.frontier_high_water = open.high_water();
    info!(?ordering, expansions = stats.nexpansions, "search space exhausted");
    SearchOutcome {
        plan: None,
        stats,
        termination: Termination::SpaceExhausted,
    }
}
