//! Variable substitution and quantifier elimination handlers.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::fstrips::{
    Dispatch, Effect, NodeHandler, ProblemWalker, Rewrite, UniversalEffect, WalkContext, Walkable,
    WalkerError,
};
use crate::grounding::GroundingError;
use crate::syntax::{Constant, Expression, Language, QuantifiedFormula, Quantifier, Variable};

/// Replaces every occurrence of a bound variable with its mapped term.
///
/// Variables are matched by name. Scopes are not tracked: a quantifier that
/// reuses a substituted name is rewritten too. [`substitute`] renames such
/// shadowing variables apart before substituting.
#[derive(Debug, Clone, Default)]
pub struct TermSubstitution {
    bindings: BTreeMap<String, Expression>,
}

impl TermSubstitution {
    #[must_use]
    pub fn new(bindings: impl IntoIterator<Item = (Variable, Expression)>) -> Self {
        Self {
            bindings: bindings.into_iter().map(|(v, e)| (v.name, e)).collect(),
        }
    }

    pub fn bind(&mut self, variable: &Variable, value: Expression) {
        self.bindings.insert(variable.name.clone(), value);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl NodeHandler for TermSubstitution {
    fn on_expression(
        &mut self,
        node: Expression,
        _context: WalkContext,
    ) -> Result<Dispatch<Expression>, WalkerError> {
        match node {
            Expression::Variable(v) => match self.bindings.get(&v.name) {
                Some(value) => Ok(Dispatch::Handled(Rewrite::Keep(value.clone()))),
                None => Ok(Dispatch::Unhandled(Expression::Variable(v))),
            },
            other => Ok(Dispatch::Unhandled(other)),
        }
    }
}

/// Every combination of constants for `variables`, in declaration order.
///
/// # Errors
///
/// Returns [`GroundingError::UnknownSort`] if a variable's sort is not part
/// of `language`.
pub fn bindings(
    owner: &str,
    variables: &[Variable],
    language: &Language,
) -> Result<Vec<Vec<Constant>>, GroundingError> {
    let domains = variables
        .iter()
        .map(|v| {
            language
                .constants_of(&v.sort)
                .ok_or_else(|| GroundingError::UnknownSort {
                    owner: owner.to_string(),
                    variable: v.to_string(),
                    sort: v.sort.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if domains.is_empty() {
        return Ok(vec![Vec::new()]);
    }
    Ok(domains
        .into_iter()
        .map(|domain| domain.iter().cloned())
        .multi_cartesian_product()
        .collect())
}

/// Apply one binding of `variables` to a copy of `target`.
///
/// Quantifiers and universal effects that rebind one of `variables` keep
/// their own scope: their bound variable is renamed apart first.
///
/// # Errors
///
/// Propagates walker failures.
pub fn substitute<W: Walkable>(
    target: W,
    variables: &[Variable],
    binding: &[Constant],
) -> Result<Option<W>, WalkerError> {
    let renamer = ShadowRenamer::new(variables);
    let Some(target) = ProblemWalker::new(renamer).run(target)?.into_kept() else {
        return Ok(None);
    };
    let substitution = TermSubstitution::new(
        variables
            .iter()
            .cloned()
            .zip(binding.iter().map(Expression::constant)),
    );
    Ok(ProblemWalker::new(substitution).run(target)?.into_kept())
}

/// Renames variables bound by a quantifier or universal effect when their
/// name is about to be substituted. Fresh names are `name'n`.
#[derive(Debug)]
struct ShadowRenamer {
    names: BTreeSet<String>,
    fresh: usize,
}

impl ShadowRenamer {
    fn new(variables: &[Variable]) -> Self {
        Self {
            names: variables.iter().map(|v| v.name.clone()).collect(),
            fresh: 0,
        }
    }

    /// Rename the shadowing entries of `bound`; the returned substitution
    /// maps each old name to its replacement.
    fn rename(&mut self, bound: Vec<Expression>) -> (Vec<Expression>, TermSubstitution) {
        let mut renaming = TermSubstitution::default();
        let bound = bound
            .into_iter()
            .map(|entry| match entry {
                Expression::Variable(v) if self.names.contains(&v.name) => {
                    self.fresh += 1;
                    let renamed = Variable::new(format!("{}'{}", v.name, self.fresh), v.sort.clone());
                    renaming.bind(&v, Expression::var(&renamed));
                    Expression::Variable(renamed)
                }
                other => other,
            })
            .collect();
        (bound, renaming)
    }
}

impl NodeHandler for ShadowRenamer {
    fn on_expression(
        &mut self,
        node: Expression,
        _context: WalkContext,
    ) -> Result<Dispatch<Expression>, WalkerError> {
        let Expression::QuantifiedFormula(q) = node else {
            return Ok(Dispatch::Unhandled(node));
        };
        let (variables, renaming) = self.rename(q.variables);
        let formula = if renaming.is_empty() {
            *q.formula
        } else {
            ProblemWalker::new(renaming)
                .run(*q.formula)?
                .into_kept()
                .ok_or(WalkerError::RequiredNodeRemoved {
                    slot: "quantified formula",
                })?
        };
        Ok(Dispatch::Handled(Rewrite::Keep(Expression::QuantifiedFormula(
            QuantifiedFormula {
                quantifier: q.quantifier,
                variables,
                formula: Box::new(formula),
            },
        ))))
    }

    fn on_effect(&mut self, effect: Effect) -> Result<Dispatch<Effect>, WalkerError> {
        let Effect::Universal(UniversalEffect { variables, effects }) = effect else {
            return Ok(Dispatch::Unhandled(effect));
        };
        let (variables, renaming) = self.rename(variables);
        let effects = if renaming.is_empty() {
            effects
        } else {
            let mut walker = ProblemWalker::new(renaming);
            let mut renamed = Vec::with_capacity(effects.len());
            for sub in effects {
                renamed.extend(walker.run(sub)?.into_kept());
            }
            renamed
        };
        Ok(Dispatch::Handled(Rewrite::Keep(Effect::Universal(UniversalEffect {
            variables,
            effects,
        }))))
    }
}

/// Rewrites `exists` into a disjunction and `forall` into a conjunction over
/// every binding of the quantified variables.
///
/// The walker is bottom-up, so inner quantifiers are already gone when an
/// outer one is expanded. An empty domain gives `Or([])` / `And([])`, which
/// evaluate to false / true.
#[derive(Debug, Clone, Copy)]
pub struct QuantifierEliminator<'a> {
    language: &'a Language,
}

impl<'a> QuantifierEliminator<'a> {
    #[must_use]
    pub fn new(language: &'a Language) -> Self {
        Self { language }
    }

    fn expand(&self, q: QuantifiedFormula) -> Result<Expression, WalkerError> {
        let rendering = Expression::QuantifiedFormula(q.clone()).to_string();
        let variables: Vec<Variable> = q
            .variables
            .iter()
            .filter_map(|v| match v {
                Expression::Variable(v) => Some(v.clone()),
                _ => None,
            })
            .collect();
        let combos = bindings(&rendering, &variables, self.language).map_err(|err| {
            WalkerError::Handler {
                node: rendering.clone(),
                detail: err.to_string(),
            }
        })?;

        let mut parts = Vec::with_capacity(combos.len());
        for binding in &combos {
            if let Some(part) = substitute((*q.formula).clone(), &variables, binding)? {
                parts.push(part);
            }
        }
        Ok(match q.quantifier {
            Quantifier::Exists => Expression::or(parts),
            Quantifier::Forall => Expression::and(parts),
        })
    }
}

impl NodeHandler for QuantifierEliminator<'_> {
    fn on_expression(
        &mut self,
        node: Expression,
        _context: WalkContext,
    ) -> Result<Dispatch<Expression>, WalkerError> {
        match node {
            Expression::QuantifiedFormula(q) => Ok(Dispatch::Handled(Rewrite::Keep(self.expand(q)?))),
            other => Ok(Dispatch::Unhandled(other)),
        }
    }
}
