//! Search nodes for the graph strategies, stored in an append-only arena.
//!
//! Nodes are never removed during a run, so a [`NodeId`] stays valid until
//! the arena is dropped. Parent links are ids, not references.

/// Index of a node in its [`NodeArena`].
pub type NodeId = usize;

/// A state reached by a specific path.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    pub state: S,
    /// `None` for the root.
    pub parent: Option<NodeId>,
    /// The action that produced this node from its parent.
    pub action: Option<A>,
    /// Sum of step costs from the root.
    pub accumulated_cost: f64,
    /// Tree depth (root = 0).
    pub depth: u32,
}

/// Append-only node storage for one search run.
#[derive(Debug, Clone)]
pub struct NodeArena<S, A> {
    nodes: Vec<SearchNode<S, A>>,
}

impl<S, A: Clone> NodeArena<S, A> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node with no parent and no action.
    pub fn push_root(&mut self, state: S) -> NodeId {
        self.nodes.push(SearchNode {
            state,
            parent: None,
            action: None,
            accumulated_cost: 0.0,
            depth: 0,
        });
        self.nodes.len() - 1
    }

    /// Add a child of `parent` reached by `action` at an extra `step_cost`.
    pub fn push_child(&mut self, parent: NodeId, action: A, state: S, step_cost: f64) -> NodeId {
        let (accumulated_cost, depth) = {
            let p = &self.nodes[parent];
            (p.accumulated_cost + step_cost, p.depth + 1)
        };
        self.nodes.push(SearchNode {
            state,
            parent: Some(parent),
            action: Some(action),
            accumulated_cost,
            depth,
        });
        self.nodes.len() - 1
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Actions from the root to `id`, in application order. Empty for the
    /// root itself.
    #[must_use]
    pub fn extract_path(&self, id: NodeId) -> Vec<A> {
        let mut path = Vec::with_capacity(self.nodes[id].depth as usize);
        let mut current = Some(id);
        while let Some(i) = current {
            let node = &self.nodes[i];
            if let Some(action) = &node.action {
                path.push(action.clone());
            }
            current = node.parent;
        }
        path.reverse();
        path
    }
}

impl<S, A: Clone> Default for NodeArena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
