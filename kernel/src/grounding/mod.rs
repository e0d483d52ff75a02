//! Grounding module: state variables, symbol fluency, naive grounding and
//! static pruning.
//!
//! Depends on `syntax` and `fstrips`. Every rewrite here is expressed as a
//! [`crate::fstrips::NodeHandler`] run through the problem walker.

pub mod fluency;
pub mod naive;
pub mod pruning;
pub mod state_variable;
pub mod substitution;

use thiserror::Error;

use crate::fstrips::WalkerError;

pub use fluency::{approximate_symbol_fluency, FluencyError, SymbolFluency};
pub use naive::{ground_action, ground_problem};
pub use pruning::{prune_static, StaticPruner};
pub use state_variable::StateVariable;
pub use substitution::{QuantifierEliminator, TermSubstitution};

/// Typed failure for grounding and pruning passes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroundingError {
    #[error("sort \"{sort}\" of variable \"{variable}\" in \"{owner}\" is not declared")]
    UnknownSort {
        owner: String,
        variable: String,
        sort: String,
    },

    #[error("\"{element}\" is not a ground atom or term over constants")]
    NonGroundElement { element: String },

    #[error(transparent)]
    Walker(#[from] WalkerError),

    #[error(transparent)]
    Fluency(#[from] FluencyError),
}
