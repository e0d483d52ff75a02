//! Run statistics and outcomes.

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Nodes popped (or frontier selections, for tree search).
    pub iterations: u64,
    /// Goal states found. A run stops at the first one, so this is 0 or 1.
    pub num_goals: u64,
    /// Nodes whose successors were generated.
    pub nexpansions: u64,
    /// Largest open list size reached. Always 0 for tree search.
    pub frontier_high_water: u64,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A goal state was popped.
    GoalReached,
    /// The expansion budget ran out first.
    BudgetExhausted,
    /// Nothing left to explore.
    SpaceExhausted,
}

impl Termination {
    /// Stable snake-case label, used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::BudgetExhausted => "budget_exhausted",
            Self::SpaceExhausted => "space_exhausted",
        }
    }
}

/// Result of a graph search run.
///
/// `plan` is `Some` exactly when `termination` is
/// [`Termination::GoalReached`]. An empty plan means the initial state is
/// already a goal.
#[derive(Debug, Clone)]
pub struct SearchOutcome<A> {
    pub plan: Option<Vec<A>>,
    pub stats: SearchStats,
    pub termination: Termination,
}

impl<A> SearchOutcome<A> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.plan.is_some()
    }
}
