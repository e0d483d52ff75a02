//! Approximate symbol fluency.
//!
//! A symbol is fluent if some action effect (at any nesting depth) writes
//! it, and static otherwise. The approximation is sound but coarse: an
//! effect that can never fire still makes its head fluent.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::fstrips::{AddEffect, DelEffect, Effect, Problem};
use crate::syntax::{Expression, SymbolKind, SymbolRef};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FluencyError {
    /// An effect's atom slot is not an atom, or its lhs is not a function
    /// term, so no head symbol can be read off it.
    #[error("unexpected element type: cannot extract a head symbol from effect \"{effect}\"")]
    UnexpectedElementType { effect: String },
}

/// Partition of the non-builtin symbols of a problem's language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolFluency {
    pub fluent: BTreeSet<SymbolRef>,
    pub statics: BTreeSet<SymbolRef>,
}

impl SymbolFluency {
    #[must_use]
    pub fn is_fluent(&self, symbol: &SymbolRef) -> bool {
        self.fluent.contains(symbol)
    }

    #[must_use]
    pub fn is_static(&self, symbol: &SymbolRef) -> bool {
        self.statics.contains(symbol)
    }
}

/// Classify every symbol of `problem` as fluent or static.
///
/// Fluent symbols are the heads of add/delete atoms, functional and linear
/// left-hand sides, looking through universal effects. Static symbols are
/// the remaining non-builtin symbols of the language.
///
/// # Errors
///
/// Returns [`FluencyError::UnexpectedElementType`] when an effect writes to
/// something that has no head symbol of the right kind.
pub fn approximate_symbol_fluency(problem: &Problem) -> Result<SymbolFluency, FluencyError> {
    let mut fluent = BTreeSet::new();
    for action in problem.actions.values() {
        for effect in &action.effects {
            collect_heads(effect, &mut fluent)?;
        }
    }

    let statics = problem
        .language
        .symbols()
        .filter(|decl| !decl.builtin && !fluent.contains(&decl.symbol))
        .map(|decl| decl.symbol.clone())
        .collect();

    Ok(SymbolFluency { fluent, statics })
}

fn collect_heads(effect: &Effect, out: &mut BTreeSet<SymbolRef>) -> Result<(), FluencyError> {
    match effect {
        Effect::Add(AddEffect { atom, .. }) | Effect::Del(DelEffect { atom, .. }) => {
            out.insert(head(atom, SymbolKind::Predicate, effect)?);
        }
        Effect::Functional(e) => {
            out.insert(head(&e.lhs, SymbolKind::Function, effect)?);
        }
        Effect::Linear(e) => {
            for y in &e.y {
                out.insert(head(y, SymbolKind::Function, effect)?);
            }
        }
        Effect::Universal(e) => {
            for sub in &e.effects {
                collect_heads(sub, out)?;
            }
        }
    }
    Ok(())
}

fn head(target: &Expression, kind: SymbolKind, effect: &Effect) -> Result<SymbolRef, FluencyError> {
    match target.symbol() {
        Some(symbol) if symbol.kind == kind => Ok(symbol),
        _ => Err(FluencyError::UnexpectedElementType {
            effect: effect.to_string(),
        }),
    }
}
