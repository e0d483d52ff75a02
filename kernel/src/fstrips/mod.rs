//! FSTRIPS module: effects, actions, problems and the problem walker.
//!
//! Depends on `syntax`. Does not import from `grounding`.

pub mod action;
pub mod effect;
pub mod problem;
pub mod walker;

pub use action::{Action, DEFAULT_ACTION_COST};
pub use effect::{
    AddEffect, DelEffect, Effect, EffectKind, FunctionalEffect, LinearEffect, UniversalEffect,
};
pub use problem::{InitialState, Problem, ProblemError};
pub use walker::{Dispatch, NodeHandler, ProblemWalker, Rewrite, WalkContext, Walkable, WalkerError};
