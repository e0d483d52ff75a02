//! Symbol table: sorts, constants, predicates and functions.
//!
//! The language is the minimal shape the walker, the grounder and the search
//! model need. Symbols are identified by name; [`SymbolRef`] adds the
//! predicate/function distinction so the two namespaces never collide.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Name of the builtin equality predicate.
pub const EQUALITY: &str = "=";

/// Builtin comparison predicates attached by [`Language::attach_arithmetic`].
const BUILTIN_COMPARISONS: [&str; 4] = ["<", "<=", ">", ">="];

/// Builtin arithmetic functions attached by [`Language::attach_arithmetic`].
const BUILTIN_ARITHMETIC: [&str; 4] = ["+", "-", "*", "/"];

/// Failure while declaring or looking up language elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("sort \"{sort}\" is already declared")]
    DuplicateSort { sort: String },

    #[error("sort \"{sort}\" is not declared")]
    UnknownSort { sort: String },

    #[error("constant \"{name}\" is already declared")]
    DuplicateConstant { name: String },

    #[error("{kind} symbol \"{name}\" is already declared")]
    DuplicateSymbol { kind: SymbolKind, name: String },
}

/// Whether a symbol names a predicate or a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    Predicate,
    Function,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate => f.write_str("predicate"),
            Self::Function => f.write_str("function"),
        }
    }
}

/// A predicate or function symbol, identified by kind and name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolRef {
    pub kind: SymbolKind,
    pub name: String,
}

impl SymbolRef {
    #[must_use]
    pub fn predicate(name: impl Into<String>) -> Self {
        Self {
            kind: SymbolKind::Predicate,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            kind: SymbolKind::Function,
            name: name.into(),
        }
    }
}

impl fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A declared predicate or function symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDecl {
    pub symbol: SymbolRef,
    pub arity: usize,
    /// Builtin symbols (equality, arithmetic) are interpreted, never fluent.
    pub builtin: bool,
}

/// A typed constant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constant {
    pub name: String,
    pub sort: String,
}

impl Constant {
    #[must_use]
    pub fn new(name: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sort: sort.into(),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A typed logical variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    pub name: String,
    pub sort: String,
}

impl Variable {
    #[must_use]
    pub fn new(name: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sort: sort.into(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

/// A first-order language: sorts with their constants, plus symbol declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Language {
    name: String,
    sorts: BTreeMap<String, Vec<Constant>>,
    symbols: BTreeMap<SymbolRef, SymbolDecl>,
}

impl Language {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sorts: BTreeMap::new(),
            symbols: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a new, initially empty sort.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::DuplicateSort`] if the sort already exists.
    pub fn declare_sort(&mut self, sort: &str) -> Result<(), LanguageError> {
        if self.sorts.contains_key(sort) {
            return Err(LanguageError::DuplicateSort { sort: sort.into() });
        }
        self.sorts.insert(sort.to_string(), Vec::new());
        Ok(())
    }

    /// Declare a constant of an existing sort.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::UnknownSort`] or
    /// [`LanguageError::DuplicateConstant`].
    pub fn declare_constant(&mut self, name: &str, sort: &str) -> Result<Constant, LanguageError> {
        if self.sorts.values().flatten().any(|c| c.name == name) {
            return Err(LanguageError::DuplicateConstant { name: name.into() });
        }
        let members = self
            .sorts
            .get_mut(sort)
            .ok_or_else(|| LanguageError::UnknownSort { sort: sort.into() })?;
        let constant = Constant::new(name, sort);
        members.push(constant.clone());
        Ok(constant)
    }

    /// Declare a (non-builtin) predicate symbol.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::DuplicateSymbol`] if the name is taken.
    pub fn declare_predicate(&mut self, name: &str, arity: usize) -> Result<SymbolRef, LanguageError> {
        self.declare(SymbolRef::predicate(name), arity, false)
    }

    /// Declare a (non-builtin) function symbol.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageError::DuplicateSymbol`] if the name is taken.
    pub fn declare_function(&mut self, name: &str, arity: usize) -> Result<SymbolRef, LanguageError> {
        self.declare(SymbolRef::function(name), arity, false)
    }

    /// Attach the builtin equality predicate. Idempotent.
    pub fn attach_equality(&mut self) {
        self.attach_builtin(SymbolRef::predicate(EQUALITY), 2);
    }

    /// Attach builtin comparison predicates and arithmetic functions. Idempotent.
    pub fn attach_arithmetic(&mut self) {
        self.attach_equality();
        for name in BUILTIN_COMPARISONS {
            self.attach_builtin(SymbolRef::predicate(name), 2);
        }
        for name in BUILTIN_ARITHMETIC {
            self.attach_builtin(SymbolRef::function(name), 2);
        }
    }

    fn attach_builtin(&mut self, symbol: SymbolRef, arity: usize) {
        self.symbols.entry(symbol.clone()).or_insert(SymbolDecl {
            symbol,
            arity,
            builtin: true,
        });
    }

    fn declare(
        &mut self,
        symbol: SymbolRef,
        arity: usize,
        builtin: bool,
    ) -> Result<SymbolRef, LanguageError> {
        if self.symbols.contains_key(&symbol) {
            return Err(LanguageError::DuplicateSymbol {
                kind: symbol.kind,
                name: symbol.name,
            });
        }
        self.symbols.insert(
            symbol.clone(),
            SymbolDecl {
                symbol: symbol.clone(),
                arity,
                builtin,
            },
        );
        Ok(symbol)
    }

    #[must_use]
    pub fn symbol(&self, symbol: &SymbolRef) -> Option<&SymbolDecl> {
        self.symbols.get(symbol)
    }

    /// Whether `symbol` is declared and builtin.
    #[must_use]
    pub fn is_builtin(&self, symbol: &SymbolRef) -> bool {
        self.symbols.get(symbol).is_some_and(|d| d.builtin)
    }

    /// All declared symbols, predicates first, each group sorted by name.
    pub fn symbols(&self) -> impl Iterator<Item = &SymbolDecl> {
        self.symbols.values()
    }

    pub fn predicates(&self) -> impl Iterator<Item = &SymbolDecl> {
        self.symbols
            .values()
            .filter(|d| d.symbol.kind == SymbolKind::Predicate)
    }

    pub fn functions(&self) -> impl Iterator<Item = &SymbolDecl> {
        self.symbols
            .values()
            .filter(|d| d.symbol.kind == SymbolKind::Function)
    }

    /// Constants of a sort, in declaration order.
    #[must_use]
    pub fn constants_of(&self, sort: &str) -> Option<&[Constant]> {
        self.sorts.get(sort).map(Vec::as_slice)
    }

    pub fn constants(&self) -> impl Iterator<Item = &Constant> {
        self.sorts.values().flatten()
    }

    /// Look a constant up by name.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants().find(|c| c.name == name)
    }
}
