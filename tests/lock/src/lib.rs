//! Shared fixtures and reference oracles for the lock tests.
//!
//! The oracles here are deliberately naive (plain BFS, quadratic Dijkstra)
//! so that the engines are checked against something obviously correct.

pub mod fixtures;
pub mod oracle;
