//! Action effects.

use std::fmt;

use crate::syntax::Expression;

/// `condition -> atom` becomes true.
#[derive(Debug, Clone, PartialEq)]
pub struct AddEffect {
    pub condition: Expression,
    pub atom: Expression,
}

/// `condition -> atom` becomes false.
#[derive(Debug, Clone, PartialEq)]
pub struct DelEffect {
    pub condition: Expression,
    pub atom: Expression,
}

/// `condition -> lhs := rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalEffect {
    pub condition: Expression,
    pub lhs: Expression,
    pub rhs: Expression,
}

/// `forall variables: effects`.
#[derive(Debug, Clone, PartialEq)]
pub struct UniversalEffect {
    /// [`Expression::Variable`] nodes bound by this effect.
    pub variables: Vec<Expression>,
    pub effects: Vec<Effect>,
}

/// Matrix-form update `y := A x + b`, applied under `condition`.
///
/// Only the left-hand column `y` is ever inspected (for its head symbols);
/// the rest is carried along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearEffect {
    pub condition: Expression,
    pub y: Vec<Expression>,
    pub a: Vec<Vec<f64>>,
    pub x: Vec<Expression>,
    pub b: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Add(AddEffect),
    Del(DelEffect),
    Functional(FunctionalEffect),
    Universal(UniversalEffect),
    Linear(LinearEffect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Add,
    Del,
    Functional,
    Universal,
    Linear,
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "AddEffect",
            Self::Del => "DelEffect",
            Self::Functional => "FunctionalEffect",
            Self::Universal => "UniversalEffect",
            Self::Linear => "LinearEffect",
        };
        f.write_str(name)
    }
}

impl Effect {
    /// Unconditional add effect.
    #[must_use]
    pub fn add(atom: Expression) -> Self {
        Self::Add(AddEffect {
            condition: Expression::Tautology,
            atom,
        })
    }

    /// Unconditional delete effect.
    #[must_use]
    pub fn del(atom: Expression) -> Self {
        Self::Del(DelEffect {
            condition: Expression::Tautology,
            atom,
        })
    }

    /// Unconditional functional assignment.
    #[must_use]
    pub fn assign(lhs: Expression, rhs: Expression) -> Self {
        Self::Functional(FunctionalEffect {
            condition: Expression::Tautology,
            lhs,
            rhs,
        })
    }

    /// Attach a condition. Universal effects have no condition slot and are
    /// returned unchanged.
    #[must_use]
    pub fn when(mut self, condition: Expression) -> Self {
        match &mut self {
            Self::Add(AddEffect { condition: c, .. })
            | Self::Del(DelEffect { condition: c, .. })
            | Self::Functional(FunctionalEffect { condition: c, .. })
            | Self::Linear(LinearEffect { condition: c, .. }) => *c = condition,
            Self::Universal(_) => {}
        }
        self
    }

    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        match self {
            Self::Add(_) => EffectKind::Add,
            Self::Del(_) => EffectKind::Del,
            Self::Functional(_) => EffectKind::Functional,
            Self::Universal(_) => EffectKind::Universal,
            Self::Linear(_) => EffectKind::Linear,
        }
    }

    /// The condition slot, if this kind of effect has one.
    #[must_use]
    pub fn condition(&self) -> Option<&Expression> {
        match self {
            Self::Add(e) => Some(&e.condition),
            Self::Del(e) => Some(&e.condition),
            Self::Functional(e) => Some(&e.condition),
            Self::Linear(e) => Some(&e.condition),
            Self::Universal(_) => None,
        }
    }
}

fn write_condition(f: &mut fmt::Formatter<'_>, condition: &Expression) -> fmt::Result {
    if *condition == Expression::Tautology {
        Ok(())
    } else {
        write!(f, "({condition}) -> ")
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(e) => {
                write_condition(f, &e.condition)?;
                write!(f, "ADD({})", e.atom)
            }
            Self::Del(e) => {
                write_condition(f, &e.condition)?;
                write!(f, "DEL({})", e.atom)
            }
            Self::Functional(e) => {
                write_condition(f, &e.condition)?;
                write!(f, "{} := {}", e.lhs, e.rhs)
            }
            Self::Universal(e) => {
                f.write_str("forall")?;
                for v in &e.variables {
                    write!(f, " {v}")?;
                }
                f.write_str(" : [")?;
                for (i, sub) in e.effects.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{sub}")?;
                }
                f.write_str("]")
            }
            Self::Linear(e) => {
                write_condition(f, &e.condition)?;
                f.write_str("[")?;
                for (i, y) in e.y.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{y}")?;
                }
                f.write_str("] := A x + b")
            }
        }
    }
}
