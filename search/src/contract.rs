//! Search model contract trait.

use std::fmt::Debug;
use std::hash::Hash;

/// Cost of an action when the model does not say otherwise.
pub const UNIT_ACTION_COST: f64 = 1.0;

/// A forward state space that strategies can explore.
///
/// # Contract
///
/// - `successors` must be deterministic: the same state yields the same
///   `(action, state)` pairs in the same order. Every tie-break in the
///   strategies builds on this.
/// - States are compared by value. Two states that are `==` are the same
///   search state, however they were reached.
/// - `action_cost` must be finite and non-negative.
pub trait SearchModel {
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + Debug;

    /// The state every search starts from.
    fn initial_state(&self) -> Self::State;

    /// Whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Every applicable action paired with the state it leads to.
    fn successors(&self, state: &Self::State) -> Vec<(Self::Action, Self::State)>;

    /// Cost of applying `action`.
    fn action_cost(&self, action: &Self::Action) -> f64 {
        let _ = action;
        UNIT_ACTION_COST
    }
}
