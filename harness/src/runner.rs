//! Strategy runner: one entry point over every search strategy.
//!
//! # Pipeline
//!
//! ```text
//! Problem → ground_problem() → prune_static() → GroundForwardSearchModel::new()
//!   → run_strategy() → RunSummary (plan + stats + SearchReport)
//! ```
//!
//! The runner owns no search logic. It picks the engine, runs it, and wraps
//! the outcome in a report whose digest identifies the run.

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use wayfinder_kernel::fstrips::Problem;
use wayfinder_kernel::grounding::{ground_problem, prune_static, GroundingError};
use wayfinder_search::{
    zero_heuristic, AStarSearch, BreadthFirstSearch, DepthFirstSearch, GreedySearch, SearchError,
    SearchModel, SearchPolicy, SearchReport, SearchStats, Termination, TreeSearch,
};

use crate::model::{GroundForwardSearchModel, ModelError};

/// Search strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    AStar,
    Greedy,
    Tree,
}

impl Strategy {
    /// Every strategy, in a fixed order.
    pub const ALL: [Self; 5] = [
        Self::BreadthFirst,
        Self::DepthFirst,
        Self::AStar,
        Self::Greedy,
        Self::Tree,
    ];

    /// Stable name, used as the report's `strategy` field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "bfs",
            Self::DepthFirst => "dfs",
            Self::AStar => "astar",
            Self::Greedy => "greedy",
            Self::Tree => "tree",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy \"{name}\" (expected one of bfs, dfs, astar, greedy, tree)")]
pub struct UnknownStrategy {
    pub name: String,
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| UnknownStrategy { name: s.to_string() })
    }
}

/// What a run produced, whichever engine ran it.
#[derive(Debug, Clone)]
pub struct RunSummary<A> {
    pub strategy: Strategy,
    pub plan: Option<Vec<A>>,
    pub stats: SearchStats,
    pub termination: Termination,
    pub report: SearchReport,
}

impl<A> RunSummary<A> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.plan.is_some()
    }
}

/// Error from [`solve_problem`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// Grounding or static pruning failed.
    #[error("grounding failed: {0}")]
    Grounding(#[from] GroundingError),

    /// The grounded problem is outside the ground model's fragment.
    #[error("model construction failed: {0}")]
    Model(#[from] ModelError),

    /// The search rejected its policy.
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

/// Run `strategy` on `model`. Blind strategies ignore `heuristic`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if `policy` fails validation.
pub fn run_strategy<M, H>(
    model: &M,
    strategy: Strategy,
    policy: &SearchPolicy,
    heuristic: H,
) -> Result<RunSummary<M::Action>, SearchError>
where
    M: SearchModel,
    M::Action: Display,
    H: Fn(&M::State) -> f64,
{
    let name = strategy.name();
    let (plan, stats, termination) = match strategy {
        Strategy::BreadthFirst => {
            let o = BreadthFirstSearch::new(model, policy.clone()).run()?;
            (o.plan, o.stats, o.termination)
        }
        Strategy::DepthFirst => {
            let o = DepthFirstSearch::new(model, policy.clone()).run()?;
            (o.plan, o.stats, o.termination)
        }
        Strategy::AStar => {
            let o = AStarSearch::new(model, policy.clone(), &heuristic).run()?;
            (o.plan, o.stats, o.termination)
        }
        Strategy::Greedy => {
            let o = GreedySearch::new(model, policy.clone(), &heuristic).run()?;
            (o.plan, o.stats, o.termination)
        }
        Strategy::Tree => {
            let o = TreeSearch::new(model, policy.clone(), &heuristic).run()?;
            (o.plan, o.stats, o.termination)
        }
    };

    let report = SearchReport::new(name, plan.as_deref(), stats, termination);
    info!(
        strategy = name,
        solved = plan.is_some(),
        expansions = stats.nexpansions,
        termination = termination.as_str(),
        "run complete"
    );
    Ok(RunSummary {
        strategy,
        plan,
        stats,
        termination,
        report,
    })
}

/// Ground, prune and solve a lifted problem with the zero heuristic.
///
/// # Errors
///
/// See [`RunError`].
pub fn solve_problem(
    problem: &Problem,
    strategy: Strategy,
    policy: &SearchPolicy,
) -> Result<RunSummary<String>, RunError> {
    let mut grounded = ground_problem(problem)?;
    prune_static(&mut grounded)?;
    let model = GroundForwardSearchModel::new(&grounded)?;
    run_strategy(&model, strategy, policy, zero_heuristic).map_err(RunError::from)
}
