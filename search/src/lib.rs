//! Wayfinder Search: forward state-space search over any [`SearchModel`].
//!
//! This crate knows nothing about planning languages. It depends only on
//! the [`SearchModel`] contract; `wayfinder_harness` adapts grounded
//! problems to it.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfinder_kernel ─┐
//!                   ├─ wayfinder_harness
//! wayfinder_search ─┘
//! ```
//!
//! # Key types
//!
//! - [`BreadthFirstSearch`], [`DepthFirstSearch`] -- blind graph search
//! - [`AStarSearch`], [`GreedySearch`] -- informed graph search
//! - [`TreeSearch`] -- persistent tree with UCB selection
//! - [`SearchPolicy`] -- budget, cost model and exploration constant
//! - [`SearchReport`] -- canonical JSON summary with a SHA-256 digest

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod blind;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod report;
pub mod stats;
pub mod tree;

pub use blind::{BreadthFirstSearch, DepthFirstSearch};
pub use contract::SearchModel;
pub use error::SearchError;
pub use heuristic::{zero_heuristic, AStarSearch, GreedySearch};
pub use policy::{CostModel, ExpansionBudget, SearchPolicy, StepCost};
pub use report::SearchReport;
pub use stats::{SearchOutcome, SearchStats, Termination};
pub use tree::{SearchTree, TreeOutcome, TreeSearch};
