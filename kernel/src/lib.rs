//! Wayfinder Kernel: the symbolic side of the planner.
//!
//! # API Surface
//!
//! - [`fstrips::walker::ProblemWalker`] -- traverse and rewrite expressions,
//!   effects, actions and whole problems
//! - [`grounding::fluency::approximate_symbol_fluency`] -- split symbols into
//!   fluent and static
//! - [`grounding::naive::ground_problem`] -- instantiate action schemas over
//!   the language's constants
//! - [`grounding::pruning::prune_static`] -- fold static atoms and drop dead
//!   actions and effects
//!
//! # Module Dependency Direction
//!
//! `syntax` ← `fstrips` ← `grounding`
//!
//! One-way only. No cycles.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fstrips;
pub mod grounding;
pub mod syntax;
