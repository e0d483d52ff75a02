//! Static pruning: fold static atoms to truth values and drop what becomes
//! unreachable.
//!
//! Only formulas are rewritten. Atoms below an effect's atom / lhs / rhs are
//! write targets, not tests, and are left alone.

use std::collections::{BTreeSet, HashSet};

use tracing::info;

use crate::fstrips::{
    Action, Dispatch, Effect, NodeHandler, Problem, ProblemWalker, Rewrite, WalkContext, WalkerError,
};
use crate::grounding::fluency::{approximate_symbol_fluency, SymbolFluency};
use crate::grounding::{GroundingError, StateVariable};
use crate::syntax::{Atom, CompoundFormula, Connective, Expression, SymbolRef, EQUALITY};

/// Walker handler that evaluates static and equality atoms against the
/// initial state.
#[derive(Debug, Clone)]
pub struct StaticPruner {
    statics: BTreeSet<SymbolRef>,
    static_atoms: HashSet<StateVariable>,
    removed: Vec<String>,
}

impl StaticPruner {
    /// # Errors
    ///
    /// [`GroundingError::NonGroundElement`] if an initial atom over a static
    /// predicate is not ground.
    pub fn new(problem: &Problem, fluency: &SymbolFluency) -> Result<Self, GroundingError> {
        let mut static_atoms = HashSet::new();
        for atom in &problem.init.atoms {
            if atom.symbol().is_some_and(|s| fluency.is_static(&s)) {
                static_atoms.insert(StateVariable::from_atom(atom)?);
            }
        }
        Ok(Self {
            statics: fluency.statics.clone(),
            static_atoms,
            removed: Vec::new(),
        })
    }

    /// Names of the actions removed so far, in removal order.
    #[must_use]
    pub fn removed_actions(&self) -> &[String] {
        &self.removed
    }

    fn evaluate(&self, atom: &Atom) -> Option<bool> {
        if atom.predicate == EQUALITY {
            return match atom.subterms.as_slice() {
                [lhs, rhs] if lhs.is_ground() && rhs.is_ground() => Some(lhs == rhs),
                _ => None,
            };
        }
        if !self.statics.contains(&SymbolRef::predicate(atom.predicate.as_str())) {
            return None;
        }
        let variable = StateVariable::from_atom(&Expression::Atom(atom.clone())).ok()?;
        Some(self.static_atoms.contains(&variable))
    }
}

impl NodeHandler for StaticPruner {
    fn on_expression(
        &mut self,
        node: Expression,
        context: WalkContext,
    ) -> Result<Dispatch<Expression>, WalkerError> {
        if context == WalkContext::Effect {
            return Ok(Dispatch::Handled(Rewrite::Keep(node)));
        }
        let folded = match node {
            Expression::Atom(atom) => match self.evaluate(&atom) {
                Some(true) => Expression::Tautology,
                Some(false) => Expression::Contradiction,
                None => Expression::Atom(atom),
            },
            Expression::CompoundFormula(formula) => simplify(formula),
            other => other,
        };
        Ok(Dispatch::Handled(Rewrite::Keep(folded)))
    }

    fn on_effect(&mut self, effect: Effect) -> Result<Dispatch<Effect>, WalkerError> {
        let dead = match &effect {
            Effect::Universal(u) => u.effects.is_empty(),
            other => other.condition() == Some(&Expression::Contradiction),
        };
        if dead {
            Ok(Dispatch::Handled(Rewrite::Remove))
        } else {
            Ok(Dispatch::Handled(Rewrite::Keep(effect)))
        }
    }

    fn on_action(&mut self, action: Action) -> Result<Dispatch<Action>, WalkerError> {
        if action.precondition == Expression::Contradiction {
            self.removed.push(action.name);
            return Ok(Dispatch::Handled(Rewrite::Remove));
        }
        Ok(Dispatch::Handled(Rewrite::Keep(action)))
    }
}

/// Propagate Tautology / Contradiction through one connective.
#[must_use]
pub fn simplify(formula: CompoundFormula) -> Expression {
    let CompoundFormula {
        connective,
        mut subformulas,
    } = formula;
    match connective {
        Connective::And => {
            if subformulas.contains(&Expression::Contradiction) {
                return Expression::Contradiction;
            }
            subformulas.retain(|f| *f != Expression::Tautology);
            match subformulas.len() {
                0 => Expression::Tautology,
                1 => subformulas.remove(0),
                _ => Expression::and(subformulas),
            }
        }
        Connective::Or => {
            if subformulas.contains(&Expression::Tautology) {
                return Expression::Tautology;
            }
            subformulas.retain(|f| *f != Expression::Contradiction);
            match subformulas.len() {
                0 => Expression::Contradiction,
                1 => subformulas.remove(0),
                _ => Expression::or(subformulas),
            }
        }
        Connective::Not => {
            let folded = match subformulas.first() {
                Some(Expression::Tautology) => Some(Expression::Contradiction),
                Some(Expression::Contradiction) => Some(Expression::Tautology),
                _ => None,
            };
            folded.unwrap_or_else(|| Expression::compound(Connective::Not, subformulas))
        }
        Connective::Implies => {
            if subformulas.len() != 2 {
                return Expression::compound(Connective::Implies, subformulas);
            }
            let rhs = subformulas.swap_remove(1);
            let lhs = subformulas.swap_remove(0);
            match (lhs, rhs) {
                (Expression::Contradiction, _) | (_, Expression::Tautology) => Expression::Tautology,
                (Expression::Tautology, rhs) => rhs,
                (lhs, Expression::Contradiction) => Expression::not(lhs),
                (lhs, rhs) => Expression::implies(lhs, rhs),
            }
        }
    }
}

/// Fold static atoms of a ground problem and remove the actions whose
/// precondition became a contradiction. Returns the removed action names.
///
/// # Errors
///
/// [`GroundingError::Fluency`] if fluency cannot be computed,
/// [`GroundingError::Walker`] if the rewrite fails.
pub fn prune_static(problem: &mut Problem) -> Result<Vec<String>, GroundingError> {
    let fluency = approximate_symbol_fluency(problem)?;
    let mut walker = ProblemWalker::new(StaticPruner::new(problem, &fluency)?);
    walker.visit_problem(problem)?;

    let removed = walker.into_handler().removed;
    info!(
        problem = %problem.name,
        removed = removed.len(),
        remaining = problem.actions.len(),
        "static pruning complete"
    );
    Ok(removed)
}
