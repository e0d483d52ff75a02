//! Action schemas.

use std::fmt;

use crate::fstrips::effect::Effect;
use crate::syntax::{Expression, Variable};

/// Cost charged for an action that declares none.
pub const DEFAULT_ACTION_COST: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: String,
    pub parameters: Vec<Variable>,
    pub precondition: Expression,
    pub effects: Vec<Effect>,
    pub cost: Option<f64>,
}

impl Action {
    /// A parameterless action with a trivially true precondition and no effects.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            precondition: Expression::Tautology,
            effects: Vec::new(),
            cost: None,
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Variable>) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_precondition(mut self, precondition: Expression) -> Self {
        self.precondition = precondition;
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Declared cost, or [`DEFAULT_ACTION_COST`].
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost.unwrap_or(DEFAULT_ACTION_COST)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.parameters.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str(")")
    }
}
