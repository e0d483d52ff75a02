//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. A search that runs and
//! finds nothing is an outcome ([`crate::stats::Termination`]), never an
//! error.

use thiserror::Error;

/// Typed failure for pre-flight search validation.
///
/// Returned before the first node is created; no statistics exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A [`crate::policy::SearchPolicy`] field is out of range.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}
