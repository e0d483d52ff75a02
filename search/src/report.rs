//! Canonical, hashable summary of a run.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (`serde_json::Map` is a
//!    `BTreeMap` unless `preserve_order` is enabled, which this workspace
//!    never does).
//! 2. No whitespace: `{"a":1,"b":2}`.
//! 3. Numbers are integers only. Costs are not reported.
//! 4. Actions are rendered with `Display`.
//!
//! Two runs that make the same decisions produce byte-identical reports and
//! therefore the same digest.

use std::fmt::Display;

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::stats::{SearchOutcome, SearchStats, Termination};
use crate::tree::TreeOutcome;

/// Domain prefix for report hashing. Null-terminated.
pub const DOMAIN_SEARCH_REPORT: &[u8] = b"WAYFINDER::SEARCH_REPORT::V1\0";

/// Report schema identifier, embedded in every report.
pub const REPORT_SCHEMA_VERSION: &str = "wayfinder.search_report.v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub strategy: String,
    /// Rendered actions, or `None` if no plan was found.
    pub plan: Option<Vec<String>>,
    pub stats: SearchStats,
    pub termination: Termination,
}

impl SearchReport {
    #[must_use]
    pub fn new<A: Display>(
        strategy: impl Into<String>,
        plan: Option<&[A]>,
        stats: SearchStats,
        termination: Termination,
    ) -> Self {
        Self {
            strategy: strategy.into(),
            plan: plan.map(|actions| actions.iter().map(ToString::to_string).collect()),
            stats,
            termination,
        }
    }

    #[must_use]
    pub fn from_outcome<A: Display>(strategy: impl Into<String>, outcome: &SearchOutcome<A>) -> Self {
        Self::new(
            strategy,
            outcome.plan.as_deref(),
            outcome.stats,
            outcome.termination,
        )
    }

    #[must_use]
    pub fn from_tree_outcome<S, A: Display>(
        strategy: impl Into<String>,
        outcome: &TreeOutcome<S, A>,
    ) -> Self {
        Self::new(
            strategy,
            outcome.plan.as_deref(),
            outcome.stats,
            outcome.termination,
        )
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "schema_version": REPORT_SCHEMA_VERSION,
            "strategy": self.strategy,
            "plan": self.plan,
            "plan_length": self.plan.as_ref().map(Vec::len),
            "termination": self.termination.as_str(),
            "stats": {
                "frontier_high_water": self.stats.frontier_high_water,
                "iterations": self.stats.iterations,
                "nexpansions": self.stats.nexpansions,
                "num_goals": self.stats.num_goals,
            },
        })
    }

    /// Canonical JSON bytes (see module docs).
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        self.to_json_value().to_string().into_bytes()
    }

    /// `"sha256:<hex>"` of the domain prefix followed by the canonical bytes.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_SEARCH_REPORT);
        hasher.update(self.canonical_bytes());
        format!("sha256:{}", hex::encode(hasher.finalize()))
    }
}
