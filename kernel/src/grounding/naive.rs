//! Naive grounding: instantiate every action over the Cartesian product of
//! its parameter domains.
//!
//! The output problem shares the input's language, initial state and
//! symbols. Every action in it is parameterless, quantifier-free and has no
//! universal effects, so it can be handed straight to a ground search model.

use itertools::Itertools;
use tracing::{debug, info};

use crate::fstrips::{Action, Effect, Problem, ProblemWalker, UniversalEffect};
use crate::grounding::substitution::{bindings, substitute, QuantifierEliminator};
use crate::grounding::GroundingError;
use crate::syntax::{Constant, Expression, Language, Variable};

/// Ground every action of `problem` and eliminate quantifiers from the goal.
///
/// Instances are named `schema(c1,c2,...)`; parameterless schemas keep their
/// name. A parameter whose sort has no constants yields no instances.
///
/// # Errors
///
/// [`GroundingError::UnknownSort`] for a parameter of an undeclared sort,
/// [`GroundingError::Walker`] if a rewrite fails.
pub fn ground_problem(problem: &Problem) -> Result<Problem, GroundingError> {
    let mut grounded = Problem::new(
        problem.domain_name.clone(),
        problem.name.clone(),
        problem.language.clone(),
    );
    grounded.init = problem.init.clone();
    grounded.goal = eliminate_quantifiers(problem.goal.clone(), &problem.language)?;

    for schema in problem.actions.values() {
        let instances = ground_action(schema, &problem.language)?;
        debug!(schema = %schema.name, instances = instances.len(), "grounded action schema");
        for instance in instances {
            grounded.actions.insert(instance.name.clone(), instance);
        }
    }

    info!(
        problem = %problem.name,
        schemas = problem.actions.len(),
        actions = grounded.actions.len(),
        "naive grounding complete"
    );
    Ok(grounded)
}

/// All ground instances of one action schema.
///
/// # Errors
///
/// See [`ground_problem`].
pub fn ground_action(schema: &Action, language: &Language) -> Result<Vec<Action>, GroundingError> {
    let combos = bindings(&schema.name, &schema.parameters, language)?;
    let mut instances = Vec::with_capacity(combos.len());

    for binding in &combos {
        let mut template = schema.clone();
        template.parameters.clear();
        template.name = instance_name(&schema.name, binding);

        let Some(mut instance) = substitute(template, &schema.parameters, binding)? else {
            continue;
        };
        instance.effects = expand_universal(instance.effects, language)?;
        let Some(instance) = ProblemWalker::new(QuantifierEliminator::new(language))
            .run(instance)?
            .into_kept()
        else {
            continue;
        };
        instances.push(instance);
    }
    Ok(instances)
}

fn instance_name(schema: &str, binding: &[Constant]) -> String {
    if binding.is_empty() {
        schema.to_string()
    } else {
        format!("{schema}({})", binding.iter().map(|c| c.name.as_str()).join(","))
    }
}

fn eliminate_quantifiers(formula: Expression, language: &Language) -> Result<Expression, GroundingError> {
    Ok(ProblemWalker::new(QuantifierEliminator::new(language))
        .run(formula)?
        .into_kept()
        .unwrap_or(Expression::Tautology))
}

/// Replace universal effects by one copy of their body per binding.
fn expand_universal(effects: Vec<Effect>, language: &Language) -> Result<Vec<Effect>, GroundingError> {
    let mut expanded = Vec::with_capacity(effects.len());
    for effect in effects {
        match effect {
            Effect::Universal(UniversalEffect { variables, effects }) => {
                let variables: Vec<Variable> = variables
                    .into_iter()
                    .filter_map(|v| match v {
                        Expression::Variable(v) => Some(v),
                        _ => None,
                    })
                    .collect();
                let owner = format!("forall {}", variables.iter().join(" "));
                for binding in bindings(&owner, &variables, language)? {
                    for sub in &effects {
                        if let Some(sub) = substitute(sub.clone(), &variables, &binding)? {
                            expanded.extend(expand_universal(vec![sub], language)?);
                        }
                    }
                }
            }
            other => expanded.push(other),
        }
    }
    Ok(expanded)
}
