//! Chain walker: a lazy, finite, non-restartable walk from genesis.

use std::time::Instant;

use tracing::{debug, warn};

use chainward_store::ChainStore;
use chainward_types::{CancelToken, ChainwardError, Record};

/// Terminal state of one walk.
#[derive(Debug, Clone)]
pub enum WalkOutcome {
    /// A step query returned zero successors: candidate chain end.
    Completed {
        /// Records visited, genesis included.
        visited: u64,
        /// The last record the walk reached.
        last: Record,
    },
    /// A step query returned more than one successor.
    Forked {
        visited: u64,
        /// The hash more than one record claims as predecessor.
        at_hash: String,
        /// All competing successors, as returned by the store.
        successors: Vec<Record>,
    },
    /// The walk was cancelled between steps; no further lookups were
    /// issued and the store was left untouched.
    Cancelled { visited: u64 },
}

/// One walk over one chain, from genesis toward the head.
///
/// Each step resolves "the record whose previous hash equals the current
/// record's hash" with a fresh store query; nothing is cached across
/// steps or runs, and no local deduplication is applied. The walk is not
/// restartable: drive it with [`ChainWalk::advance`] or [`ChainWalk::run`]
/// and discard it afterwards.
///
/// When a record limit is set the walk ends as [`WalkOutcome::Completed`]
/// once that many records have been visited. The verifier sets the limit
/// to the chain's reported count, which keeps the walk finite even over a
/// corrupted store whose duplicate hashes form a cycle.
pub struct ChainWalk<'a> {
    store: &'a dyn ChainStore,
    current: Record,
    visited: u64,
    max_records: Option<u64>,
    deadline: Option<Instant>,
    cancel: Option<CancelToken>,
    finished: bool,
}

impl<'a> ChainWalk<'a> {
    /// Start a walk at the given genesis record. The genesis counts as
    /// the first visited record.
    pub fn new(store: &'a dyn ChainStore, genesis: Record) -> Self {
        Self {
            store,
            current: genesis,
            visited: 1,
            max_records: None,
            deadline: None,
            cancel: None,
            finished: false,
        }
    }

    /// End the walk once this many records have been visited.
    pub fn with_max_records(mut self, max_records: u64) -> Self {
        self.max_records = Some(max_records);
        self
    }

    /// Give up and report cancellation once this instant has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Check this token between steps and stop when it is cancelled.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Records visited so far, genesis included.
    pub fn visited(&self) -> u64 {
        self.visited
    }

    /// The record the walk currently stands on.
    pub fn current(&self) -> &Record {
        &self.current
    }

    /// Take one step. Returns `Ok(None)` after advancing one hop, or
    /// `Ok(Some(outcome))` when the walk has reached a terminal state.
    /// Must not be called again once a terminal state was returned.
    pub async fn advance(&mut self) -> Result<Option<WalkOutcome>, ChainwardError> {
        debug_assert!(!self.finished, "walk advanced past its terminal state");

        if self.is_cancelled() {
            self.finished = true;
            warn!(visited = self.visited, "walk cancelled");
            return Ok(Some(WalkOutcome::Cancelled {
                visited: self.visited,
            }));
        }

        if let Some(max) = self.max_records {
            if self.visited >= max {
                self.finished = true;
                return Ok(Some(WalkOutcome::Completed {
                    visited: self.visited,
                    last: self.current.clone(),
                }));
            }
        }

        let mut successors = self
            .store
            .find_by_previous_hash(&self.current.chain_key, &self.current.hash)
            .await?;

        match successors.len() {
            0 => {
                self.finished = true;
                Ok(Some(WalkOutcome::Completed {
                    visited: self.visited,
                    last: self.current.clone(),
                }))
            }
            1 => {
                self.current = successors.remove(0);
                self.visited += 1;
                debug!(
                    visited = self.visited,
                    hash = %self.current.hash,
                    "walk advanced"
                );
                Ok(None)
            }
            n => {
                self.finished = true;
                warn!(
                    visited = self.visited,
                    at_hash = %self.current.hash,
                    successors = n,
                    "fork detected"
                );
                Ok(Some(WalkOutcome::Forked {
                    visited: self.visited,
                    at_hash: self.current.hash.clone(),
                    successors,
                }))
            }
        }
    }

    /// Drive the walk to its terminal state.
    pub async fn run(mut self) -> Result<WalkOutcome, ChainwardError> {
        loop {
            if let Some(outcome) = self.advance().await? {
                return Ok(outcome);
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return true;
            }
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainward_store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn record(minute: u32, hash: &str, previous_hash: &str) -> Record {
        Record {
            chain_key: "tenant-1".to_string(),
            recorded_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap(),
            category: None,
            subcategory: None,
            event: format!("event-{hash}"),
            hash: hash.to_string(),
            previous_hash: previous_hash.to_string(),
        }
    }

    fn linked_chain(n: u32) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let previous = if i == 0 {
                    String::new()
                } else {
                    format!("h{}", i - 1)
                };
                record(i, &format!("h{i}"), &previous)
            })
            .collect()
    }

    #[tokio::test]
    async fn walks_a_linked_chain_to_its_end() {
        let records = linked_chain(5);
        let genesis = records[0].clone();
        let store = MemoryStore::from_records(records);

        let outcome = ChainWalk::new(&store, genesis).run().await.unwrap();
        match outcome {
            WalkOutcome::Completed { visited, last } => {
                assert_eq!(visited, 5);
                assert_eq!(last.hash, "h4");
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn single_record_walk_visits_only_genesis() {
        let records = linked_chain(1);
        let genesis = records[0].clone();
        let store = MemoryStore::from_records(records);

        let outcome = ChainWalk::new(&store, genesis).run().await.unwrap();
        match outcome {
            WalkOutcome::Completed { visited, last } => {
                assert_eq!(visited, 1);
                assert_eq!(last.hash, "h0");
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reports_every_competing_successor_on_a_fork() {
        let mut records = linked_chain(3);
        records.push(record(9, "h1-evil", "h0"));
        let genesis = records[0].clone();
        let store = MemoryStore::from_records(records);

        let outcome = ChainWalk::new(&store, genesis).run().await.unwrap();
        match outcome {
            WalkOutcome::Forked {
                visited,
                at_hash,
                successors,
            } => {
                assert_eq!(visited, 1);
                assert_eq!(at_hash, "h0");
                assert_eq!(successors.len(), 2);
            }
            other => panic!("expected Forked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_token_stops_before_any_lookup() {
        let records = linked_chain(3);
        let genesis = records[0].clone();
        let store = MemoryStore::from_records(records);

        let token = CancelToken::new();
        token.cancel();
        let outcome = ChainWalk::new(&store, genesis)
            .with_cancel_token(token)
            .run()
            .await
            .unwrap();
        match outcome {
            WalkOutcome::Cancelled { visited } => assert_eq!(visited, 1),
            other => panic!("expected Cancelled, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn expired_deadline_cancels_the_walk() {
        let records = linked_chain(3);
        let genesis = records[0].clone();
        let store = MemoryStore::from_records(records);

        let outcome = ChainWalk::new(&store, genesis)
            .with_deadline(Instant::now())
            .run()
            .await
            .unwrap();
        assert!(matches!(outcome, WalkOutcome::Cancelled { .. }));
    }

    #[tokio::test]
    async fn record_limit_terminates_a_hash_cycle() {
        // Duplicate hash "x" sends the walk around y forever without a bound.
        let records = vec![
            record(0, "g", ""),
            record(1, "x", "g"),
            record(2, "y", "x"),
            record(3, "x", "y"),
        ];
        let genesis = records[0].clone();
        let store = MemoryStore::from_records(records);

        let outcome = ChainWalk::new(&store, genesis)
            .with_max_records(4)
            .run()
            .await
            .unwrap();
        match outcome {
            WalkOutcome::Completed { visited, .. } => assert_eq!(visited, 4),
            other => panic!("expected Completed, got {other:?}"),
        }
    }
}
