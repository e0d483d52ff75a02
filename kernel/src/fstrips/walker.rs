//! `ProblemWalker`: generic traversal and rewriting of FSTRIPS entities.
//!
//! The walker owns the recursion; a [`NodeHandler`] supplies the rewrite for
//! each node kind. Recursion is bottom-up: children are rewritten first and
//! the handler then sees the node with its rewritten children in place.
//!
//! # Modes
//!
//! - In place: [`ProblemWalker::run`] moves the value through the walker and
//!   hands it back. Nothing is copied.
//! - Copy: [`ProblemWalker::run_copy`] deep-copies first; the input is never
//!   touched.
//!
//! If a walk fails part-way, a value walked in place through `run` is lost
//! (it was moved); use copy mode when the input must survive errors.
//! [`ProblemWalker::visit_problem`] borrows its problem and leaves it
//! unchanged on error.
//!
//! # Removal
//!
//! Handlers return [`Rewrite::Remove`] to drop a node. Removal from a
//! sequence (subterms, subformulas, effects, the problem's actions) deletes
//! the element. Removal of a required slot (goal, precondition, condition,
//! quantified body, if-then-else branch) is a [`WalkerError`].

use std::collections::BTreeMap;

use tracing::debug;

use thiserror::Error;

use crate::fstrips::action::Action;
use crate::fstrips::effect::{
    AddEffect, DelEffect, Effect, EffectKind, FunctionalEffect, UniversalEffect,
};
use crate::fstrips::problem::Problem;
use crate::syntax::{
    Atom, CompoundFormula, CompoundTerm, Expression, ExpressionKind, IfThenElse, QuantifiedFormula,
};

/// Typed failure for a walk. Every variant carries the rendering of the
/// offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkerError {
    /// Strict walker reached a node its handler declined.
    #[error("problem walker: no handler was specified for node \"{node}\" of type \"{kind}\"")]
    NoHandler { node: String, kind: String },

    /// Structurally malformed expression.
    #[error("unexpected expression \"{node}\" of type \"{kind}\"")]
    UnexpectedExpression { node: String, kind: ExpressionKind },

    /// Effect kind the walker cannot recurse into.
    #[error("effect \"{effect}\" of type \"{kind}\" cannot be analysed")]
    UnanalysableEffect { effect: String, kind: EffectKind },

    /// A handler removed a node that has no sequence to be dropped from.
    #[error("handler removed the required node in slot \"{slot}\"")]
    RequiredNodeRemoved { slot: &'static str },

    /// A handler rejected a node.
    #[error("handler failed on \"{node}\": {detail}")]
    Handler { node: String, detail: String },
}

/// Whether the walk is currently below an effect's atom / lhs / rhs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkContext {
    Formula,
    Effect,
}

/// Result of rewriting one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite<T> {
    Keep(T),
    Remove,
}

impl<T> Rewrite<T> {
    #[must_use]
    pub fn into_kept(self) -> Option<T> {
        match self {
            Self::Keep(value) => Some(value),
            Self::Remove => None,
        }
    }

    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Remove)
    }
}

/// What a handler did with a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<T> {
    Handled(Rewrite<T>),
    /// The handler has nothing registered for this node; it is handed back.
    Unhandled(T),
}

/// Per-kind rewrite hooks. Every hook defaults to declining the node.
pub trait NodeHandler {
    /// # Errors
    ///
    /// Implementations may fail with [`WalkerError::Handler`].
    fn on_expression(
        &mut self,
        node: Expression,
        context: WalkContext,
    ) -> Result<Dispatch<Expression>, WalkerError> {
        let _ = context;
        Ok(Dispatch::Unhandled(node))
    }

    /// # Errors
    ///
    /// Implementations may fail with [`WalkerError::Handler`].
    fn on_effect(&mut self, effect: Effect) -> Result<Dispatch<Effect>, WalkerError> {
        Ok(Dispatch::Unhandled(effect))
    }

    /// # Errors
    ///
    /// Implementations may fail with [`WalkerError::Handler`].
    fn on_action(&mut self, action: Action) -> Result<Dispatch<Action>, WalkerError> {
        Ok(Dispatch::Unhandled(action))
    }
}

/// A handler with nothing registered: pure traversal.
impl NodeHandler for () {}

/// Anything the walker can be run on.
pub trait Walkable: Sized {
    /// # Errors
    ///
    /// Propagates any [`WalkerError`] raised during the walk.
    fn walk<H: NodeHandler>(self, walker: &mut ProblemWalker<H>) -> Result<Rewrite<Self>, WalkerError>;
}

impl Walkable for Expression {
    fn walk<H: NodeHandler>(self, walker: &mut ProblemWalker<H>) -> Result<Rewrite<Self>, WalkerError> {
        walker.visit_expression(self, WalkContext::Formula)
    }
}

impl Walkable for Effect {
    fn walk<H: NodeHandler>(self, walker: &mut ProblemWalker<H>) -> Result<Rewrite<Self>, WalkerError> {
        walker.visit_effect(self)
    }
}

impl Walkable for Action {
    fn walk<H: NodeHandler>(self, walker: &mut ProblemWalker<H>) -> Result<Rewrite<Self>, WalkerError> {
        walker.visit_action(self)
    }
}

impl Walkable for Problem {
    fn walk<H: NodeHandler>(
        mut self,
        walker: &mut ProblemWalker<H>,
    ) -> Result<Rewrite<Self>, WalkerError> {
        walker.visit_problem(&mut self)?;
        Ok(Rewrite::Keep(self))
    }
}

/// Recursive walker over expressions, effects, actions and problems.
#[derive(Debug, Clone)]
pub struct ProblemWalker<H> {
    handler: H,
    raise_on_undefined: bool,
}

impl<H: NodeHandler> ProblemWalker<H> {
    /// Lenient walker: declined nodes are kept unchanged.
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            raise_on_undefined: false,
        }
    }

    /// Strict walker: a declined node fails with [`WalkerError::NoHandler`].
    #[must_use]
    pub fn strict(handler: H) -> Self {
        Self {
            handler,
            raise_on_undefined: true,
        }
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    #[must_use]
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Walk `target` in place.
    ///
    /// # Errors
    ///
    /// Returns the first [`WalkerError`] raised by the walk or the handler.
    pub fn run<W: Walkable>(&mut self, target: W) -> Result<Rewrite<W>, WalkerError> {
        target.walk(self)
    }

    /// Walk a deep copy of `target`, leaving it untouched.
    ///
    /// # Errors
    ///
    /// Returns the first [`WalkerError`] raised by the walk or the handler.
    pub fn run_copy<W: Walkable + Clone>(&mut self, target: &W) -> Result<Rewrite<W>, WalkerError> {
        target.clone().walk(self)
    }

    /// Rewrite the goal, then every action. Actions rewritten to
    /// [`Rewrite::Remove`] are deleted from the problem.
    ///
    /// The rewritten goal and actions are staged and only written back once
    /// the whole walk has succeeded; on error `problem` is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the first [`WalkerError`] raised by the walk or the handler.
    pub fn visit_problem(&mut self, problem: &mut Problem) -> Result<(), WalkerError> {
        let goal = self.visit_required(problem.goal.clone(), WalkContext::Formula, "goal")?;

        let mut actions = BTreeMap::new();
        for (name, action) in &problem.actions {
            match self.visit_action(action.clone())? {
                Rewrite::Keep(action) => {
                    actions.insert(name.clone(), action);
                }
                Rewrite::Remove => debug!(action = %name, "walker removed action"),
            }
        }

        problem.goal = goal;
        problem.actions = actions;
        Ok(())
    }

    /// Rewrite the precondition, then each effect (dropping removed ones),
    /// then hand the action to the handler.
    ///
    /// # Errors
    ///
    /// Returns the first [`WalkerError`] raised by the walk or the handler.
    pub fn visit_action(&mut self, mut action: Action) -> Result<Rewrite<Action>, WalkerError> {
        let precondition = std::mem::replace(&mut action.precondition, Expression::Tautology);
        action.precondition = self.visit_required(precondition, WalkContext::Formula, "precondition")?;
        action.effects = self.visit_effects(std::mem::take(&mut action.effects))?;

        let dispatch = self.handler.on_action(action)?;
        self.resolve(dispatch, |a| (a.to_string(), "Action".to_string()))
    }

    /// Rewrite an effect's parts, then hand the effect to the handler.
    ///
    /// # Errors
    ///
    /// [`WalkerError::UnanalysableEffect`] for linear effects, otherwise the
    /// first error raised by the walk or the handler.
    pub fn visit_effect(&mut self, effect: Effect) -> Result<Rewrite<Effect>, WalkerError> {
        let effect = match effect {
            Effect::Add(AddEffect { condition, atom }) => Effect::Add(AddEffect {
                condition: self.visit_required(condition, WalkContext::Formula, "effect condition")?,
                atom: self.visit_required(atom, WalkContext::Effect, "effect atom")?,
            }),
            Effect::Del(DelEffect { condition, atom }) => Effect::Del(DelEffect {
                condition: self.visit_required(condition, WalkContext::Formula, "effect condition")?,
                atom: self.visit_required(atom, WalkContext::Effect, "effect atom")?,
            }),
            Effect::Functional(FunctionalEffect {
                condition,
                lhs,
                rhs,
            }) => Effect::Functional(FunctionalEffect {
                condition: self.visit_required(condition, WalkContext::Formula, "effect condition")?,
                lhs: self.visit_required(lhs, WalkContext::Effect, "effect lhs")?,
                rhs: self.visit_required(rhs, WalkContext::Effect, "effect rhs")?,
            }),
            Effect::Universal(UniversalEffect { variables, effects }) => {
                Effect::Universal(UniversalEffect {
                    variables,
                    effects: self.visit_effects(effects)?,
                })
            }
            linear @ Effect::Linear(_) => {
                return Err(WalkerError::UnanalysableEffect {
                    effect: linear.to_string(),
                    kind: linear.kind(),
                });
            }
        };

        let dispatch = self.handler.on_effect(effect)?;
        self.resolve(dispatch, |e| (e.to_string(), e.kind().to_string()))
    }

    /// Rewrite an expression's children, then hand the node to the handler.
    ///
    /// `context` is passed unchanged to every node below this one.
    ///
    /// # Errors
    ///
    /// [`WalkerError::UnexpectedExpression`] for malformed quantifiers and
    /// conditionals, otherwise the first error raised by the walk or the
    /// handler.
    pub fn visit_expression(
        &mut self,
        node: Expression,
        context: WalkContext,
    ) -> Result<Rewrite<Expression>, WalkerError> {
        if let Some(malformed) = malformed_part(&node) {
            return Err(WalkerError::UnexpectedExpression {
                node: malformed.to_string(),
                kind: malformed.kind(),
            });
        }

        let node = match node {
            leaf @ (Expression::Variable(_)
            | Expression::Constant(_)
            | Expression::Tautology
            | Expression::Contradiction) => leaf,
            Expression::Atom(Atom {
                predicate,
                subterms,
            }) => Expression::Atom(Atom {
                predicate,
                subterms: self.visit_sequence(subterms, context)?,
            }),
            Expression::CompoundTerm(CompoundTerm { symbol, subterms }) => {
                Expression::CompoundTerm(CompoundTerm {
                    symbol,
                    subterms: self.visit_sequence(subterms, context)?,
                })
            }
            Expression::CompoundFormula(CompoundFormula {
                connective,
                subformulas,
            }) => Expression::CompoundFormula(CompoundFormula {
                connective,
                subformulas: self.visit_sequence(subformulas, context)?,
            }),
            Expression::IfThenElse(IfThenElse {
                condition,
                subterms,
            }) => {
                let condition = self.visit_required(*condition, context, "if-then-else condition")?;
                let subterms = self.visit_sequence(subterms, context)?;
                if subterms.len() != 2 {
                    return Err(WalkerError::RequiredNodeRemoved {
                        slot: "if-then-else branch",
                    });
                }
                Expression::IfThenElse(IfThenElse {
                    condition: Box::new(condition),
                    subterms,
                })
            }
            Expression::QuantifiedFormula(QuantifiedFormula {
                quantifier,
                variables,
                formula,
            }) => {
                let formula = self.visit_required(*formula, context, "quantified formula")?;
                let variables = self.visit_sequence(variables, context)?;
                Expression::QuantifiedFormula(QuantifiedFormula {
                    quantifier,
                    variables,
                    formula: Box::new(formula),
                })
            }
        };

        let dispatch = self.handler.on_expression(node, context)?;
        self.resolve(dispatch, |n| (n.to_string(), n.kind().to_string()))
    }

    fn visit_required(
        &mut self,
        node: Expression,
        context: WalkContext,
        slot: &'static str,
    ) -> Result<Expression, WalkerError> {
        self.visit_expression(node, context)?
            .into_kept()
            .ok_or(WalkerError::RequiredNodeRemoved { slot })
    }

    fn visit_sequence(
        &mut self,
        nodes: Vec<Expression>,
        context: WalkContext,
    ) -> Result<Vec<Expression>, WalkerError> {
        let mut kept = Vec::with_capacity(nodes.len());
        for node in nodes {
            if let Rewrite::Keep(node) = self.visit_expression(node, context)? {
                kept.push(node);
            }
        }
        Ok(kept)
    }

    fn visit_effects(&mut self, effects: Vec<Effect>) -> Result<Vec<Effect>, WalkerError> {
        let mut kept = Vec::with_capacity(effects.len());
        for effect in effects {
            if let Rewrite::Keep(effect) = self.visit_effect(effect)? {
                kept.push(effect);
            }
        }
        Ok(kept)
    }

    fn resolve<T>(
        &self,
        dispatch: Dispatch<T>,
        describe: impl FnOnce(&T) -> (String, String),
    ) -> Result<Rewrite<T>, WalkerError> {
        match dispatch {
            Dispatch::Handled(rewrite) => Ok(rewrite),
            Dispatch::Unhandled(node) if self.raise_on_undefined => {
                let (node, kind) = describe(&node);
                Err(WalkerError::NoHandler { node, kind })
            }
            Dispatch::Unhandled(node) => Ok(Rewrite::Keep(node)),
        }
    }
}

/// The part of `node` that violates its kind's shape, if any.
fn malformed_part(node: &Expression) -> Option<&Expression> {
    match node {
        Expression::QuantifiedFormula(q) => q
            .variables
            .iter()
            .find(|v| !matches!(v, Expression::Variable(_))),
        Expression::IfThenElse(ite) if ite.subterms.len() != 2 => Some(node),
        _ => None,
    }
}
