//! Terms and formulas as a single owned expression tree.
//!
//! Every node owns its children; there is no sharing, so `Clone` is a deep
//! copy and rewriting one tree can never affect another.

use std::fmt;

use crate::syntax::symbols::{Constant, SymbolRef, Variable};

/// Logical connective of a [`CompoundFormula`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
    Not,
    Implies,
}

impl Connective {
    const fn infix(self) -> &'static str {
        match self {
            Self::And => " & ",
            Self::Or => " | ",
            Self::Implies => " -> ",
            Self::Not => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Exists,
    Forall,
}

/// `predicate(subterms...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    pub predicate: String,
    pub subterms: Vec<Expression>,
}

/// `function(subterms...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundTerm {
    pub symbol: String,
    pub subterms: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundFormula {
    pub connective: Connective,
    pub subformulas: Vec<Expression>,
}

/// A quantified formula. `variables` holds [`Expression::Variable`] nodes only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantifiedFormula {
    pub quantifier: Quantifier,
    pub variables: Vec<Expression>,
    pub formula: Box<Expression>,
}

/// Conditional term. `subterms` is always `[then, else]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IfThenElse {
    pub condition: Box<Expression>,
    pub subterms: Vec<Expression>,
}

/// A node of the expression tree: either a term or a formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Variable(Variable),
    Constant(Constant),
    Atom(Atom),
    CompoundTerm(CompoundTerm),
    CompoundFormula(CompoundFormula),
    QuantifiedFormula(QuantifiedFormula),
    IfThenElse(IfThenElse),
    Tautology,
    Contradiction,
}

/// Runtime kind of an [`Expression`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Variable,
    Constant,
    Atom,
    CompoundTerm,
    CompoundFormula,
    QuantifiedFormula,
    IfThenElse,
    Tautology,
    Contradiction,
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Variable => "Variable",
            Self::Constant => "Constant",
            Self::Atom => "Atom",
            Self::CompoundTerm => "CompoundTerm",
            Self::CompoundFormula => "CompoundFormula",
            Self::QuantifiedFormula => "QuantifiedFormula",
            Self::IfThenElse => "IfThenElse",
            Self::Tautology => "Tautology",
            Self::Contradiction => "Contradiction",
        };
        f.write_str(name)
    }
}

impl Expression {
    #[must_use]
    pub const fn kind(&self) -> ExpressionKind {
        match self {
            Self::Variable(_) => ExpressionKind::Variable,
            Self::Constant(_) => ExpressionKind::Constant,
            Self::Atom(_) => ExpressionKind::Atom,
            Self::CompoundTerm(_) => ExpressionKind::CompoundTerm,
            Self::CompoundFormula(_) => ExpressionKind::CompoundFormula,
            Self::QuantifiedFormula(_) => ExpressionKind::QuantifiedFormula,
            Self::IfThenElse(_) => ExpressionKind::IfThenElse,
            Self::Tautology => ExpressionKind::Tautology,
            Self::Contradiction => ExpressionKind::Contradiction,
        }
    }

    #[must_use]
    pub fn var(variable: &Variable) -> Self {
        Self::Variable(variable.clone())
    }

    #[must_use]
    pub fn constant(constant: &Constant) -> Self {
        Self::Constant(constant.clone())
    }

    #[must_use]
    pub fn atom(predicate: impl Into<String>, subterms: Vec<Expression>) -> Self {
        Self::Atom(Atom {
            predicate: predicate.into(),
            subterms,
        })
    }

    #[must_use]
    pub fn term(symbol: impl Into<String>, subterms: Vec<Expression>) -> Self {
        Self::CompoundTerm(CompoundTerm {
            symbol: symbol.into(),
            subterms,
        })
    }

    #[must_use]
    pub fn and(subformulas: Vec<Expression>) -> Self {
        Self::compound(Connective::And, subformulas)
    }

    #[must_use]
    pub fn or(subformulas: Vec<Expression>) -> Self {
        Self::compound(Connective::Or, subformulas)
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(formula: Expression) -> Self {
        Self::compound(Connective::Not, vec![formula])
    }

    #[must_use]
    pub fn implies(lhs: Expression, rhs: Expression) -> Self {
        Self::compound(Connective::Implies, vec![lhs, rhs])
    }

    #[must_use]
    pub fn compound(connective: Connective, subformulas: Vec<Expression>) -> Self {
        Self::CompoundFormula(CompoundFormula {
            connective,
            subformulas,
        })
    }

    #[must_use]
    pub fn exists(variables: &[Variable], formula: Expression) -> Self {
        Self::quantified(Quantifier::Exists, variables, formula)
    }

    #[must_use]
    pub fn forall(variables: &[Variable], formula: Expression) -> Self {
        Self::quantified(Quantifier::Forall, variables, formula)
    }

    #[must_use]
    pub fn quantified(quantifier: Quantifier, variables: &[Variable], formula: Expression) -> Self {
        Self::QuantifiedFormula(QuantifiedFormula {
            quantifier,
            variables: variables.iter().map(Self::var).collect(),
            formula: Box::new(formula),
        })
    }

    #[must_use]
    pub fn ite(condition: Expression, then: Expression, otherwise: Expression) -> Self {
        Self::IfThenElse(IfThenElse {
            condition: Box::new(condition),
            subterms: vec![then, otherwise],
        })
    }

    /// The predicate of an atom or the function of a compound term.
    #[must_use]
    pub fn symbol(&self) -> Option<SymbolRef> {
        match self {
            Self::Atom(a) => Some(SymbolRef::predicate(a.predicate.as_str())),
            Self::CompoundTerm(t) => Some(SymbolRef::function(t.symbol.as_str())),
            _ => None,
        }
    }

    /// True if no variable occurs anywhere below this node.
    #[must_use]
    pub fn is_ground(&self) -> bool {
        match self {
            Self::Variable(_) | Self::QuantifiedFormula(_) => false,
            Self::Constant(_) | Self::Tautology | Self::Contradiction => true,
            Self::Atom(Atom { subterms, .. }) | Self::CompoundTerm(CompoundTerm { subterms, .. }) => {
                subterms.iter().all(Self::is_ground)
            }
            Self::CompoundFormula(c) => c.subformulas.iter().all(Self::is_ground),
            Self::IfThenElse(ite) => {
                ite.condition.is_ground() && ite.subterms.iter().all(Self::is_ground)
            }
        }
    }
}

fn write_application(f: &mut fmt::Formatter<'_>, head: &str, args: &[Expression]) -> fmt::Result {
    f.write_str(head)?;
    if args.is_empty() {
        return Ok(());
    }
    f.write_str("(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{arg}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(v) => write!(f, "{v}"),
            Self::Constant(c) => write!(f, "{c}"),
            Self::Atom(a) => write_application(f, &a.predicate, &a.subterms),
            Self::CompoundTerm(t) => write_application(f, &t.symbol, &t.subterms),
            Self::CompoundFormula(c) => match (c.connective, c.subformulas.as_slice()) {
                (Connective::Not, [inner]) => write!(f, "~{inner}"),
                (connective, subformulas) => {
                    f.write_str("(")?;
                    for (i, sub) in subformulas.iter().enumerate() {
                        if i > 0 {
                            f.write_str(connective.infix())?;
                        }
                        write!(f, "{sub}")?;
                    }
                    f.write_str(")")
                }
            },
            Self::QuantifiedFormula(q) => {
                let word = match q.quantifier {
                    Quantifier::Exists => "exists",
                    Quantifier::Forall => "forall",
                };
                f.write_str(word)?;
                for v in &q.variables {
                    write!(f, " {v}")?;
                }
                write!(f, " : {}", q.formula)
            }
            Self::IfThenElse(ite) => {
                write!(f, "ite({}", ite.condition)?;
                for sub in &ite.subterms {
                    write!(f, ", {sub}")?;
                }
                f.write_str(")")
            }
            Self::Tautology => f.write_str("T"),
            Self::Contradiction => f.write_str("F"),
        }
    }
}
