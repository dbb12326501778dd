//! Outcome accounting for a reconciliation pass.

use serde::{Deserialize, Serialize};

/// What one reconciliation pass did.
///
/// Counters rather than a change feed: the pass logs per-record detail as
/// it goes, and callers mostly want to know whether anything was written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Records created for definitions that had none.
    #[serde(default)]
    pub created: u32,
    /// Records rewritten to match their definitions.
    #[serde(default)]
    pub updated: u32,
    /// Drifted records left alone because a human edited them.
    #[serde(default)]
    pub skipped_edited: u32,
    /// Records that already matched their definitions.
    #[serde(default)]
    pub unchanged: u32,
    /// Records left alone because their set's mode never updates.
    #[serde(default)]
    pub held: u32,
    /// Withdrawn records deleted.
    #[serde(default)]
    pub deleted: u32,
    /// Withdrawn records kept because a human edited them.
    #[serde(default)]
    pub preserved: u32,
    /// Records whose reconciliation failed; retried next pass.
    #[serde(default)]
    pub failed: u32,
}

impl RunReport {
    /// A report with nothing in it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store writes this pass performed.
    #[must_use]
    pub fn writes(&self) -> u32 {
        self.created + self.updated + self.deleted
    }

    /// Whether the pass changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.writes() == 0
    }
}
