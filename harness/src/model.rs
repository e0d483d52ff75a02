//! `GroundForwardSearchModel`: a grounded problem as a [`SearchModel`].
//!
//! States are sets of true fluent state variables. Static atoms are split
//! off once at construction and every formula is compiled against them, so
//! successor generation only ever touches fluents.
//!
//! Supported: ground atoms (including builtin equality), `and`, `or`, `not`,
//! `implies`, Tautology, Contradiction; conditional add and delete effects.
//! Anything else is rejected at construction with a [`ModelError`].
//! Function values in the initial state are ignored.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;
use tracing::debug;

use wayfinder_kernel::fstrips::{Effect, EffectKind, Problem};
use wayfinder_kernel::grounding::{approximate_symbol_fluency, GroundingError, StateVariable, SymbolFluency};
use wayfinder_kernel::syntax::{Connective, Expression, ExpressionKind, EQUALITY};
use wayfinder_search::SearchModel;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("formula \"{formula}\" of type \"{kind}\" is not supported by the ground model")]
    UnsupportedFormula { formula: String, kind: ExpressionKind },

    #[error("effect \"{effect}\" of type \"{kind}\" in action \"{action}\" is not supported by the ground model")]
    UnsupportedEffect {
        action: String,
        effect: String,
        kind: EffectKind,
    },

    #[error("action \"{action}\" has parameters; ground the problem first")]
    LiftedAction { action: String },

    #[error(transparent)]
    Grounding(#[from] GroundingError),
}

/// A set of true fluent state variables. Everything absent is false.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GroundState(BTreeSet<StateVariable>);

impl GroundState {
    #[must_use]
    pub fn contains(&self, variable: &StateVariable) -> bool {
        self.0.contains(variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateVariable> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<StateVariable> for GroundState {
    fn from_iter<I: IntoIterator<Item = StateVariable>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for GroundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("}")
    }
}

/// A formula with every static part already decided.
#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Const(bool),
    Holds(StateVariable),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    Implies(Box<Condition>, Box<Condition>),
}

impl Condition {
    fn holds(&self, state: &GroundState) -> bool {
        match self {
            Self::Const(value) => *value,
            Self::Holds(variable) => state.contains(variable),
            Self::And(parts) => parts.iter().all(|p| p.holds(state)),
            Self::Or(parts) => parts.iter().any(|p| p.holds(state)),
            Self::Not(inner) => !inner.holds(state),
            Self::Implies(lhs, rhs) => !lhs.holds(state) || rhs.holds(state),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CompiledEffect {
    condition: Condition,
    variable: StateVariable,
    add: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct GroundAction {
    name: String,
    precondition: Condition,
    effects: Vec<CompiledEffect>,
    cost: f64,
}

/// Forward search over the states of a grounded problem.
#[derive(Debug, Clone)]
pub struct GroundForwardSearchModel {
    init: GroundState,
    goal: Condition,
    /// Sorted by name.
    actions: Vec<GroundAction>,
    fluency: SymbolFluency,
}

/// Compiles formulas against the static part of the initial state.
struct Compiler<'a> {
    fluency: &'a SymbolFluency,
    statics: &'a BTreeSet<StateVariable>,
}

impl Compiler<'_> {
    fn formula(&self, formula: &Expression) -> Result<Condition, ModelError> {
        match formula {
            Expression::Tautology => Ok(Condition::Const(true)),
            Expression::Contradiction => Ok(Condition::Const(false)),
            Expression::Atom(atom) if atom.predicate == EQUALITY => match atom.subterms.as_slice() {
                [lhs, rhs] if lhs.is_ground() && rhs.is_ground() => Ok(Condition::Const(lhs == rhs)),
                _ => Err(unsupported(formula)),
            },
            Expression::Atom(_) => {
                let variable = StateVariable::from_atom(formula)?;
                if self.fluency.is_fluent(&variable.symbol) {
                    Ok(Condition::Holds(variable))
                } else {
                    Ok(Condition::Const(self.statics.contains(&variable)))
                }
            }
            Expression::CompoundFormula(compound) => {
                let parts = compound
                    .subformulas
                    .iter()
                    .map(|f| self.formula(f))
                    .collect::<Result<Vec<_>, _>>()?;
                match (compound.connective, <[Condition; 1]>::try_from(parts)) {
                    (Connective::Not, Ok([inner])) => Ok(Condition::Not(Box::new(inner))),
                    (Connective::And, Ok([single])) | (Connective::Or, Ok([single])) => Ok(single),
                    (Connective::And, Err(parts)) => Ok(Condition::And(parts)),
                    (Connective::Or, Err(parts)) => Ok(Condition::Or(parts)),
                    (Connective::Implies, Err(parts)) if parts.len() == 2 => {
                        let mut parts = parts.into_iter();
                        match (parts.next(), parts.next()) {
                            (Some(lhs), Some(rhs)) => Ok(Condition::Implies(Box::new(lhs), Box::new(rhs))),
                            _ => Err(unsupported(formula)),
                        }
                    }
                    _ => Err(unsupported(formula)),
                }
            }
            other => Err(unsupported(other)),
        }
    }

    fn effect(&self, action: &str, effect: &Effect) -> Result<CompiledEffect, ModelError> {
        let (condition, atom, add) = match effect {
            Effect::Add(e) => (&e.condition, &e.atom, true),
            Effect::Del(e) => (&e.condition, &e.atom, false),
            other => {
                return Err(ModelError::UnsupportedEffect {
                    action: action.to_string(),
                    effect: other.to_string(),
                    kind: other.kind(),
                })
            }
        };
        Ok(CompiledEffect {
            condition: self.formula(condition)?,
            variable: StateVariable::from_atom(atom)?,
            add,
        })
    }
}

fn unsupported(formula: &Expression) -> ModelError {
    ModelError::UnsupportedFormula {
        formula: formula.to_string(),
        kind: formula.kind(),
    }
}

impl GroundForwardSearchModel {
    /// # Errors
    ///
    /// [`ModelError::LiftedAction`] if an action still has parameters,
    /// [`ModelError::UnsupportedFormula`] / [`ModelError::UnsupportedEffect`]
    /// for constructs outside the supported fragment, and
    /// [`ModelError::Grounding`] for non-ground atoms or effects without a
    /// head symbol.
    pub fn new(problem: &Problem) -> Result<Self, ModelError> {
        let fluency = approximate_symbol_fluency(problem).map_err(GroundingError::from)?;

        let mut init = BTreeSet::new();
        let mut statics = BTreeSet::new();
        for atom in &problem.init.atoms {
            let variable = StateVariable::from_atom(atom)?;
            if fluency.is_fluent(&variable.symbol) {
                init.insert(variable);
            } else {
                statics.insert(variable);
            }
        }

        let compiler = Compiler {
            fluency: &fluency,
            statics: &statics,
        };
        let goal = compiler.formula(&problem.goal)?;
        let mut actions = Vec::with_capacity(problem.actions.len());
        for action in problem.actions.values() {
            if !action.parameters.is_empty() {
                return Err(ModelError::LiftedAction {
                    action: action.name.clone(),
                });
            }
            let effects = action
                .effects
                .iter()
                .map(|e| compiler.effect(&action.name, e))
                .collect::<Result<Vec<_>, _>>()?;
            actions.push(GroundAction {
                name: action.name.clone(),
                precondition: compiler.formula(&action.precondition)?,
                effects,
                cost: action.cost(),
            });
        }

        debug!(
            problem = %problem.name,
            fluents = init.len(),
            statics = statics.len(),
            actions = actions.len(),
            "ground model built"
        );
        Ok(Self {
            init: GroundState(init),
            goal,
            actions,
            fluency,
        })
    }

    #[must_use]
    pub fn fluency(&self) -> &SymbolFluency {
        &self.fluency
    }

    #[must_use]
    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    /// Names of the actions applicable in `state`, in name order.
    #[must_use]
    pub fn applicable(&self, state: &GroundState) -> Vec<&str> {
        self.actions
            .iter()
            .filter(|a| a.precondition.holds(state))
            .map(|a| a.name.as_str())
            .collect()
    }

    fn apply(action: &GroundAction, state: &GroundState) -> GroundState {
        let mut next = state.0.clone();
        let fired: Vec<&CompiledEffect> = action
            .effects
            .iter()
            .filter(|e| e.condition.holds(state))
            .collect();
        for effect in fired.iter().filter(|e| !e.add) {
            next.remove(&effect.variable);
        }
        for effect in fired.iter().filter(|e| e.add) {
            next.insert(effect.variable.clone());
        }
        GroundState(next)
    }
}

impl SearchModel for GroundForwardSearchModel {
    type State = GroundState;
    type Action = String;

    fn initial_state(&self) -> GroundState {
        self.init.clone()
    }

    fn is_goal(&self, state: &GroundState) -> bool {
        self.goal.holds(state)
    }

    fn successors(&self, state: &GroundState) -> Vec<(String, GroundState)> {
        self.actions
            .iter()
            .filter(|a| a.precondition.holds(state))
            .map(|a| (a.name.clone(), Self::apply(a, state)))
            .collect()
    }

    fn action_cost(&self, action: &String) -> f64 {
        self.actions
            .binary_search_by(|a| a.name.as_str().cmp(action.as_str()))
            .map_or(wayfinder_search::contract::UNIT_ACTION_COST, |i| self.actions[i].cost)
    }
}
