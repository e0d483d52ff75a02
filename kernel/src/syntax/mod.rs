//! Syntax module: the symbol table and the expression tree.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod expression;
pub mod symbols;

pub use expression::{
    Atom, CompoundFormula, CompoundTerm, Connective, Expression, ExpressionKind, IfThenElse,
    QuantifiedFormula, Quantifier,
};
pub use symbols::{
    Constant, Language, LanguageError, SymbolDecl, SymbolKind, SymbolRef, Variable, EQUALITY,
};
