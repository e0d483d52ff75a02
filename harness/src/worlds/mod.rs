//! Ready-made worlds for the runner, the integration tests and the benches.

pub mod blocks;
pub mod explicit_graph;
