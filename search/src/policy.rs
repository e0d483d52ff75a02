//! Search policy types.

use tracing::warn;

use crate::contract::{SearchModel, UNIT_ACTION_COST};
use crate::error::SearchError;

/// Default UCB exploration constant for tree search.
pub const DEFAULT_EXPLORATION: f64 = 2.0;

/// Budget and cost configuration shared by every strategy.
///
/// Plain data; call [`SearchPolicy::validate`] (every strategy does on
/// `run`) before trusting it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    /// Cap on node expansions.
    pub max_expansions: ExpansionBudget,
    /// How step costs are charged.
    pub cost_model: CostModel,
    /// UCB exploration constant `c` in `h - sqrt(c ln(N) / n)`.
    pub exploration: f64,
}

impl SearchPolicy {
    /// Policy with the given budget and defaults otherwise.
    #[must_use]
    pub fn with_budget(max_expansions: ExpansionBudget) -> Self {
        Self {
            max_expansions,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `exploration` is negative
    /// or not finite.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidPolicy {
                detail: format!(
                    "exploration constant must be finite and non-negative, got {}",
                    self.exploration
                ),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: ExpansionBudget::Unbounded,
            cost_model: CostModel::Uniform,
            exploration: DEFAULT_EXPLORATION,
        }
    }
}

/// Cap on the number of expansions a run may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionBudget {
    #[default]
    Unbounded,
    Limit(u64),
}

impl ExpansionBudget {
    /// Negative means unbounded, anything else is a limit.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        u64::try_from(raw).map_or(Self::Unbounded, Self::Limit)
    }

    /// Graph searches stop once `expansions` reaches the limit.
    #[must_use]
    pub fn is_exhausted(self, expansions: u64) -> bool {
        match self {
            Self::Unbounded => false,
            Self::Limit(limit) => expansions >= limit,
        }
    }

    /// Tree search keeps iterating while `expansions` has not passed the
    /// limit, so a limit of `n` allows `n + 1` expansions. Only a positive
    /// limit bounds a tree search; `Limit(0)` is unbounded there.
    #[must_use]
    pub fn allows_tree_step(self, expansions: u64) -> bool {
        match self {
            Self::Unbounded | Self::Limit(0) => true,
            Self::Limit(limit) => expansions <= limit,
        }
    }
}

/// How the cost of a step is charged to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostModel {
    /// Every step costs 1, whatever the model reports.
    #[default]
    Uniform,
    /// Steps cost [`SearchModel::action_cost`].
    ActionCost,
}

/// Per-run step cost evaluator.
///
/// Under [`CostModel::Uniform`] a model that reports non-unit costs is
/// flagged once per run.
#[derive(Debug)]
pub struct StepCost {
    model: CostModel,
    flagged: bool,
}

impl StepCost {
    #[must_use]
    pub fn new(model: CostModel) -> Self {
        Self {
            model,
            flagged: false,
        }
    }

    /// Cost to charge for `action` under this run's cost model.
    pub fn of<M: SearchModel>(&mut self, model: &M, action: &M::Action) -> f64 {
        let reported = model.action_cost(action);
        match self.model {
            CostModel::ActionCost => reported,
            CostModel::Uniform => {
                if !self.flagged && (reported - UNIT_ACTION_COST).abs() > f64::EPSILON {
                    self.flagged = true;
                    warn!(
                        ?action,
                        reported,
                        "model reports a non-unit action cost; uniform cost model charges 1 per step"
                    );
                }
                UNIT_ACTION_COST
            }
        }
    }
}
