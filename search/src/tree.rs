//! Tree search: a persistent best-first search tree with UCB selection.
//!
//! Unlike the graph strategies, expanded nodes are kept: the tree grows
//! across iterations and every node's `h` is refined from its children.
//!
//! Nodes live in an arena and link to each other by [`NodeId`]. When a
//! state is reached strictly cheaper than before, the node that held it is
//! detached from its owner's child list; it stays in the arena but is no
//! longer reachable from the root (it is no longer *live*).
//!
//! # Invariant
//!
//! For every live non-root node, the closed map's owner of its state is its
//! parent. No state is held by two live nodes. Every live expanded node has
//! `h = 1 + min(child.h)`, which is infinite once it has no children left.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::contract::SearchModel;
use crate::error::SearchError;
use crate::node::NodeId;
use crate::policy::{SearchPolicy, StepCost};
use crate::stats::{SearchStats, Termination};

/// Id of the root in every [`SearchTree`].
pub const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub struct TreeNode<S, A> {
    pub state: S,
    pub parent: Option<NodeId>,
    pub action: Option<A>,
    pub accumulated_cost: f64,
    /// Heuristic estimate; after expansion, `1 + min(child.h)`.
    pub h: f64,
    pub visits: u64,
    /// Live children, in creation order.
    pub children: Vec<NodeId>,
    pub expanded: bool,
}

/// Best known cost of a state and the node whose child holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedEntry {
    pub cost: f64,
    /// `None` for the root state.
    pub owner: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SearchTree<S, A> {
    nodes: Vec<TreeNode<S, A>>,
    closed: HashMap<S, ClosedEntry>,
    nexpansions: u64,
}

impl<S, A> SearchTree<S, A>
where
    S: Clone + Eq + std::hash::Hash,
    A: Clone,
{
    /// A tree holding only the root.
    #[must_use]
    pub fn new(root: S, h: f64) -> Self {
        let mut closed = HashMap::new();
        closed.insert(
            root.clone(),
            ClosedEntry {
                cost: 0.0,
                owner: None,
            },
        );
        Self {
            nodes: vec![TreeNode {
                state: root,
                parent: None,
                action: None,
                accumulated_cost: 0.0,
                h,
                visits: 0,
                children: Vec::new(),
                expanded: false,
            }],
            closed,
            nexpansions: 0,
        }
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode<S, A> {
        &self.nodes[id]
    }

    /// Nodes ever created, live or detached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn nexpansions(&self) -> u64 {
        self.nexpansions
    }

    #[must_use]
    pub fn closed_entry(&self, state: &S) -> Option<&ClosedEntry> {
        self.closed.get(state)
    }

    /// Ids of the nodes reachable from the root, in depth-first pre-order.
    #[must_use]
    pub fn live_nodes(&self) -> Vec<NodeId> {
        let mut live = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            live.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        live
    }

    /// Actions from the root to `id`.
    #[must_use]
    pub fn extract_path(&self, id: NodeId) -> Vec<A> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(i) = current {
            if let Some(action) = &self.nodes[i].action {
                path.push(action.clone());
            }
            current = self.nodes[i].parent;
        }
        path.reverse();
        path
    }

    /// Descend from the root to an unexpanded node.
    ///
    /// At each expanded node, take the unexpanded child with the lowest
    /// finite `h` if there is one; otherwise the expanded child minimising
    /// `h - sqrt(exploration * ln(visits) / child.visits)`. A child whose
    /// subtree yields nothing is passed over for the next best sibling.
    /// Returns `None` when no live unexpanded node has a finite score: the
    /// tree is exhausted.
    #[must_use]
    pub fn select_frontier(&self, exploration: f64) -> Option<NodeId> {
        self.descend(ROOT, exploration)
    }

    fn descend(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        if !self.nodes[id].expanded {
            return Some(id);
        }
        self.ranked_children(id, exploration)
            .into_iter()
            .find_map(|child| self.descend(child, exploration))
    }

    /// Children of `id` worth descending into, best first. Ties keep
    /// creation order.
    fn ranked_children(&self, id: NodeId, exploration: f64) -> Vec<NodeId> {
        let node = &self.nodes[id];
        let mut scored: Vec<(NodeId, f64)> = node
            .children
            .iter()
            .filter(|&&c| !self.nodes[c].expanded)
            .map(|&c| (c, self.nodes[c].h))
            .filter(|(_, h)| h.is_finite())
            .collect();
        if scored.is_empty() {
            scored = node
                .children
                .iter()
                .filter(|&&c| self.nodes[c].expanded)
                .map(|&c| (c, self.ucb(node.visits, &self.nodes[c], exploration)))
                .filter(|(_, score)| score.is_finite())
                .collect();
        }
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.into_iter().map(|(c, _)| c).collect()
    }

    #[allow(clippy::cast_precision_loss)]
    fn ucb(&self, parent_visits: u64, child: &TreeNode<S, A>, exploration: f64) -> f64 {
        let bonus = (exploration * (parent_visits as f64).ln() / child.visits as f64).sqrt();
        child.h - bonus
    }

    /// Expand `id`: add a child for every successor state that is new or
    /// reached strictly cheaper than before, then back up `h` to the root.
    pub fn expand<M, H>(&mut self, id: NodeId, model: &M, heuristic: &H, step_cost: &mut StepCost)
    where
        M: SearchModel<State = S, Action = A>,
        H: Fn(&S) -> f64,
    {
        self.nexpansions += 1;
        self.nodes[id].expanded = true;
        let state = self.nodes[id].state.clone();
        let g = self.nodes[id].accumulated_cost;

        for (action, successor) in model.successors(&state) {
            let cost = g + step_cost.of(model, &action);
            let previous = self.closed.get(&successor).copied();
            if previous.is_some_and(|entry| entry.cost <= cost) {
                continue;
            }
            if let Some(owner) = previous.and_then(|entry| entry.owner) {
                self.detach(owner, &successor);
                self.refresh(owner);
            }

            let h = heuristic(&successor);
            self.nodes.push(TreeNode {
                state: successor.clone(),
                parent: Some(id),
                action: Some(action),
                accumulated_cost: cost,
                h,
                visits: 0,
                children: Vec::new(),
                expanded: false,
            });
            let child = self.nodes.len() - 1;
            self.nodes[id].children.push(child);
            self.closed.insert(
                successor,
                ClosedEntry {
                    cost,
                    owner: Some(id),
                },
            );
        }

        self.update(id);
    }

    /// Remove `owner`'s child holding `state`.
    fn detach(&mut self, owner: NodeId, state: &S) {
        let position = self.nodes[owner]
            .children
            .iter()
            .position(|&c| self.nodes[c].state == *state);
        if let Some(position) = position {
            let detached = self.nodes[owner].children.remove(position);
            debug!(node = detached, owner, "detached node reached more cheaply elsewhere");
        }
    }

    /// Back up from `id` to the root: one more visit each, and
    /// `h = 1 + min(child.h)` (infinite without children).
    fn update(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(i) = current {
            let h = self.backed_up_h(i);
            let node = &mut self.nodes[i];
            node.visits += 1;
            node.h = h;
            current = node.parent;
        }
    }

    /// Recompute `h` from `id` to the root after `id` lost a child.
    /// Visit counts are left alone.
    fn refresh(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(i) = current {
            self.nodes[i].h = self.backed_up_h(i);
            current = self.nodes[i].parent;
        }
    }

    fn backed_up_h(&self, id: NodeId) -> f64 {
        let best = self.nodes[id]
            .children
            .iter()
            .map(|&c| self.nodes[c].h)
            .fold(f64::INFINITY, f64::min);
        best + 1.0
    }
}

/// Result of a tree search run. The tree is returned whatever the outcome.
#[derive(Debug, Clone)]
pub struct TreeOutcome<S, A> {
    pub plan: Option<Vec<A>>,
    pub stats: SearchStats,
    pub termination: Termination,
    pub tree: SearchTree<S, A>,
}

/// Anytime best-first search over a persistent tree.
pub struct TreeSearch<'m, M, H> {
    model: &'m M,
    policy: SearchPolicy,
    heuristic: H,
}

impl<'m, M, H> TreeSearch<'m, M, H>
where
    M: SearchModel,
    H: Fn(&M::State) -> f64,
{
    #[must_use]
    pub fn new(model: &'m M, policy: SearchPolicy, heuristic: H) -> Self {
        Self {
            model,
            policy,
            heuristic,
        }
    }

    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn run(&self) -> Result<TreeOutcome<M::State, M::Action>, SearchError> {
        self.policy.validate()?;

        let init = self.model.initial_state();
        let h0 = (self.heuristic)(&init);
        let mut tree = SearchTree::new(init, h0);
        let mut stats = SearchStats::default();
        let mut step_cost = StepCost::new(self.policy.cost_model);

        let finish = |tree: SearchTree<_, _>, mut stats: SearchStats, plan, termination| {
            stats.nexpansions = tree.nexpansions();
            TreeOutcome {
                plan,
                stats,
                termination,
                tree,
            }
        };

        while self.policy.max_expansions.allows_tree_step(tree.nexpansions()) {
            stats.iterations += 1;
            let Some(id) = tree.select_frontier(self.policy.exploration) else {
                info!(expansions = tree.nexpansions(), nodes = tree.len(), "search tree exhausted");
                return Ok(finish(tree, stats, None, Termination::SpaceExhausted));
            };

            if self.model.is_goal(&tree.node(id).state) {
                stats.num_goals += 1;
                info!(expansions = tree.nexpansions(), nodes = tree.len(), "goal found");
                let plan = tree.extract_path(id);
                return Ok(finish(tree, stats, Some(plan), Termination::GoalReached));
            }
            tree.expand(id, self.model, &self.heuristic, &mut step_cost);
        }

        info!(expansions = tree.nexpansions(), nodes = tree.len(), "expansion budget reached");
        Ok(finish(tree, stats, None, Termination::BudgetExhausted))
    }
}
