//! `StateVariable`: one ground fluent, identified by symbol and arguments.

use std::fmt;

use crate::grounding::GroundingError;
use crate::syntax::{Constant, Expression, SymbolRef};

/// A ground atom or ground function term whose value a state tracks.
///
/// Equality and hashing are structural over `(symbol, binding)`: two state
/// variables built from different but equal expressions are the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateVariable {
    pub symbol: SymbolRef,
    pub binding: Vec<Constant>,
}

impl StateVariable {
    #[must_use]
    pub fn new(symbol: SymbolRef, binding: Vec<Constant>) -> Self {
        Self { symbol, binding }
    }

    /// Build from a ground atom whose arguments are all constants.
    ///
    /// # Errors
    ///
    /// Returns [`GroundingError::NonGroundElement`] for anything else.
    pub fn from_atom(atom: &Expression) -> Result<Self, GroundingError> {
        match atom {
            Expression::Atom(a) => Self::from_application(atom, &a.subterms),
            other => Err(non_ground(other)),
        }
    }

    /// Build from a ground compound term whose arguments are all constants.
    ///
    /// # Errors
    ///
    /// Returns [`GroundingError::NonGroundElement`] for anything else.
    pub fn from_term(term: &Expression) -> Result<Self, GroundingError> {
        match term {
            Expression::CompoundTerm(t) => Self::from_application(term, &t.subterms),
            other => Err(non_ground(other)),
        }
    }

    fn from_application(node: &Expression, subterms: &[Expression]) -> Result<Self, GroundingError> {
        let binding = subterms
            .iter()
            .map(|sub| match sub {
                Expression::Constant(c) => Ok(c.clone()),
                _ => Err(non_ground(node)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let symbol = node.symbol().ok_or_else(|| non_ground(node))?;
        Ok(Self { symbol, binding })
    }
}

fn non_ground(node: &Expression) -> GroundingError {
    GroundingError::NonGroundElement {
        element: node.to_string(),
    }
}

impl fmt::Display for StateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol.name)?;
        if self.binding.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, c) in self.binding.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}
