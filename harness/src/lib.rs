//! Wayfinder Harness: search models and the strategy runner.
//!
//! The harness turns grounded problems into [`wayfinder_search::SearchModel`]s
//! and runs them through the search engines. It implements no search logic
//! itself; strategies live in `wayfinder-search`, grounding in
//! `wayfinder-kernel`.
//!
//! - [`model::GroundForwardSearchModel`] -- forward search over a grounded
//!   STRIPS problem with conditional effects
//! - [`runner::run_strategy`] / [`runner::solve_problem`] -- strategy dispatch
//!   and the lifted-problem pipeline
//! - [`worlds`] -- explicit graphs and blocksworld

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod model;
pub mod runner;
pub mod worlds;
