//! Verdict: the outcome of one chain verification run.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// The result of verifying one chain's hash linkage.
///
/// Exactly one verdict is produced per completed run; the variants are
/// mutually exclusive by construction. Store-level failures (transport
/// errors, an empty chain, an ambiguous genesis) are reported as
/// [`crate::ChainwardError`] instead, never as a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The walk covered every record and ended at the known head.
    Valid {
        /// Number of hops walked; a chain of N records has N-1 hops.
        hops_checked: u64,
    },
    /// The walk ended before reaching the known head: a link is missing
    /// between the stopping point and the head.
    Broken {
        hops_checked: u64,
        /// Hash of the last record the walk reached.
        stopped_at: String,
        /// Hash of the head record the walk should have reached.
        expected_head: String,
    },
    /// Two or more records claim the same predecessor.
    Forked {
        hops_checked: u64,
        /// The hash claimed as predecessor by more than one record.
        at_hash: String,
        /// All records claiming `at_hash` as their predecessor.
        successors: Vec<Record>,
    },
    /// The walk reached the head, but visited a different number of
    /// records than the store reports for the chain: records exist that
    /// are unreachable from genesis.
    CountMismatch {
        hops_checked: u64,
        /// Record count the store reported for the chain.
        expected: u64,
        /// Absolute difference between reported and visited counts.
        discrepancy: u64,
    },
    /// The run was cancelled (deadline or caller signal) before the walk
    /// reached a terminal state. Says nothing about chain integrity.
    Incomplete { hops_checked: u64 },
}

impl Verdict {
    /// Whether this verdict attests an intact chain.
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid { .. })
    }

    /// Hops walked before the run reached its terminal state.
    pub fn hops_checked(&self) -> u64 {
        match self {
            Verdict::Valid { hops_checked }
            | Verdict::Broken { hops_checked, .. }
            | Verdict::Forked { hops_checked, .. }
            | Verdict::CountMismatch { hops_checked, .. }
            | Verdict::Incomplete { hops_checked } => *hops_checked,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Valid { hops_checked } => {
                write!(f, "valid ({hops_checked} hops checked)")
            }
            Verdict::Broken {
                hops_checked,
                stopped_at,
                expected_head,
            } => write!(
                f,
                "broken after {hops_checked} hops: stopped at '{stopped_at}', expected head '{expected_head}'"
            ),
            Verdict::Forked {
                hops_checked,
                at_hash,
                successors,
            } => write!(
                f,
                "forked after {hops_checked} hops: {} records point to hash '{at_hash}'",
                successors.len()
            ),
            Verdict::CountMismatch {
                hops_checked,
                expected,
                discrepancy,
            } => write!(
                f,
                "count mismatch: walked {} records, store reports {expected} ({discrepancy} unreachable)",
                hops_checked + 1
            ),
            Verdict::Incomplete { hops_checked } => {
                write!(f, "incomplete: cancelled after {hops_checked} hops")
            }
        }
    }
}
