//! Integrity judge: classifies a walk's terminal state into a verdict.

use chainward_types::{Record, Verdict};

use crate::walker::WalkOutcome;

/// Compare the walk's terminal state against the independently located
/// endpoints and produce the verdict.
///
/// Checked in order: fork, cancellation, wrong final hash, count
/// mismatch, valid. The variants are mutually exclusive by construction.
/// A chain of N records has N-1 hops, so `hops_checked` is always one
/// less than the number of records the walk visited.
pub fn judge(total: u64, head: &Record, outcome: WalkOutcome) -> Verdict {
    match outcome {
        WalkOutcome::Forked {
            visited,
            at_hash,
            successors,
        } => Verdict::Forked {
            hops_checked: visited - 1,
            at_hash,
            successors,
        },
        WalkOutcome::Cancelled { visited } => Verdict::Incomplete {
            hops_checked: visited - 1,
        },
        WalkOutcome::Completed { visited, last } => {
            if last.hash != head.hash {
                Verdict::Broken {
                    hops_checked: visited - 1,
                    stopped_at: last.hash,
                    expected_head: head.hash.clone(),
                }
            } else if visited != total {
                Verdict::CountMismatch {
                    hops_checked: visited - 1,
                    expected: total,
                    discrepancy: total.abs_diff(visited),
                }
            } else {
                Verdict::Valid {
                    hops_checked: visited - 1,
                }
            }
        }
    }
}
