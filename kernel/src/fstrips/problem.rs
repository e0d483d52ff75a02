//! Planning problems: language, initial state, goal and actions.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::fstrips::action::Action;
use crate::syntax::{Expression, Language};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("action \"{name}\" is already part of the problem")]
    DuplicateAction { name: String },
}

/// Initial interpretation: the ground atoms that hold, plus values of ground
/// function terms. Everything not listed is false / undefined.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitialState {
    pub atoms: Vec<Expression>,
    pub values: Vec<(Expression, Expression)>,
}

impl InitialState {
    pub fn add(&mut self, atom: Expression) {
        if !self.atoms.contains(&atom) {
            self.atoms.push(atom);
        }
    }

    /// Set `term := value`, replacing any previous value for `term`.
    pub fn set(&mut self, term: Expression, value: Expression) {
        match self.values.iter_mut().find(|(t, _)| *t == term) {
            Some(entry) => entry.1 = value,
            None => self.values.push((term, value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub domain_name: String,
    pub name: String,
    pub language: Language,
    pub init: InitialState,
    pub goal: Expression,
    /// Keyed by action name. Ordered so that every pass over the actions is
    /// deterministic.
    pub actions: BTreeMap<String, Action>,
}

impl Problem {
    #[must_use]
    pub fn new(domain_name: impl Into<String>, name: impl Into<String>, language: Language) -> Self {
        Self {
            domain_name: domain_name.into(),
            name: name.into(),
            language,
            init: InitialState::default(),
            goal: Expression::Tautology,
            actions: BTreeMap::new(),
        }
    }

    /// # Errors
    ///
    /// Returns [`ProblemError::DuplicateAction`] if an action with the same
    /// name is already present.
    pub fn add_action(&mut self, action: Action) -> Result<(), ProblemError> {
        if self.actions.contains_key(&action.name) {
            return Err(ProblemError::DuplicateAction { name: action.name });
        }
        self.actions.insert(action.name.clone(), action);
        Ok(())
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }
}
