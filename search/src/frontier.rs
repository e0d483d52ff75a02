//! Open lists: FIFO/LIFO for blind search, a priority queue for informed
//! search.
//!
//! Both hold [`NodeId`]s only; the nodes themselves live in the arena.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use ordered_float::OrderedFloat;

use crate::node::NodeId;

/// Which end of the open list is popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Breadth-first: oldest first.
    Fifo,
    /// Depth-first: newest first.
    Lifo,
}

/// Unordered open list for blind search.
#[derive(Debug, Clone)]
pub struct OpenList {
    items: VecDeque<NodeId>,
    discipline: Discipline,
    high_water: u64,
}

impl OpenList {
    #[must_use]
    pub fn new(discipline: Discipline) -> Self {
        Self {
            items: VecDeque::new(),
            discipline,
            high_water: 0,
        }
    }

    pub fn push(&mut self, node: NodeId) {
        self.items.push_back(node);
        self.high_water = self.high_water.max(self.items.len() as u64);
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        match self.discipline {
            Discipline::Fifo => self.items.pop_front(),
            Discipline::Lifo => self.items.pop_back(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Largest size the list has reached.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// The priority ordering key: `(priority, sequence)`.
///
/// Lower priority first; equal priorities pop in insertion order. The
/// sequence number makes every key unique, so nodes are never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityKey {
    pub priority: OrderedFloat<f64>,
    pub sequence: u64,
}

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<PriorityKey>` to get
/// min-heap behavior.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    key: Reverse<PriorityKey>,
    node: NodeId,
}

/// Min-priority open list with FIFO tie-breaking.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
    high_water: u64,
}

impl PriorityFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, priority: f64, node: NodeId) {
        let key = PriorityKey {
            priority: OrderedFloat(priority),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
        });
        self.high_water = self.high_water.max(self.heap.len() as u64);
    }

    /// Pop the node with the lowest priority (oldest among equals).
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|e| e.node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the queue has reached.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
