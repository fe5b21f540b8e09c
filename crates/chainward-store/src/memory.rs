//! MemoryStore: in-memory ChainStore for tests and demos.

use async_trait::async_trait;

use chainward_types::{ChainwardError, Record};

use crate::store::{ChainStore, Direction};

/// An immutable in-memory record set implementing [`ChainStore`].
///
/// `reported_count` lets a test inject a count that disagrees with the
/// actual record set, simulating a stale count read from an external
/// store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
    reported_count: Option<u64>,
}

impl MemoryStore {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            reported_count: None,
        }
    }

    /// Override the count this store reports, regardless of its actual
    /// record set. Fault injection for count-mismatch scenarios.
    pub fn with_reported_count(mut self, count: u64) -> Self {
        self.reported_count = Some(count);
        self
    }

    fn chain<'a>(&'a self, chain_key: &'a str) -> impl Iterator<Item = &'a Record> {
        self.records.iter().filter(move |r| r.chain_key == chain_key)
    }
}

#[async_trait]
impl ChainStore for MemoryStore {
    async fn count(&self, chain_key: &str) -> Result<u64, ChainwardError> {
        if let Some(count) = self.reported_count {
            return Ok(count);
        }
        Ok(self.chain(chain_key).count() as u64)
    }

    async fn find_extreme(
        &self,
        chain_key: &str,
        direction: Direction,
    ) -> Result<Option<Record>, ChainwardError> {
        let found = match direction {
            Direction::Earliest => self.chain(chain_key).min_by_key(|r| r.recorded_at),
            Direction::Latest => self.chain(chain_key).max_by_key(|r| r.recorded_at),
        };
        Ok(found.cloned())
    }

    async fn find_by_previous_hash(
        &self,
        chain_key: &str,
        previous_hash: &str,
    ) -> Result<Vec<Record>, ChainwardError> {
        Ok(self
            .chain(chain_key)
            .filter(|r| r.previous_hash == previous_hash)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(chain_key: &str, minute: u32, hash: &str, previous_hash: &str) -> Record {
        Record {
            chain_key: chain_key.to_string(),
            recorded_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap(),
            category: None,
            subcategory: None,
            event: format!("event-{hash}"),
            hash: hash.to_string(),
            previous_hash: previous_hash.to_string(),
        }
    }

    #[tokio::test]
    async fn counts_only_the_requested_chain() {
        let store = MemoryStore::from_records(vec![
            record("a", 0, "h0", ""),
            record("a", 1, "h1", "h0"),
            record("b", 0, "x0", ""),
        ]);
        assert_eq!(store.count("a").await.unwrap(), 2);
        assert_eq!(store.count("missing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn reported_count_overrides_the_record_set() {
        let store =
            MemoryStore::from_records(vec![record("a", 0, "h0", "")]).with_reported_count(42);
        assert_eq!(store.count("a").await.unwrap(), 42);
    }

    #[tokio::test]
    async fn extremes_by_sequence_key() {
        let store = MemoryStore::from_records(vec![
            record("a", 7, "h1", "h0"),
            record("a", 2, "h0", ""),
        ]);
        let earliest = store
            .find_extreme("a", Direction::Earliest)
            .await
            .unwrap()
            .unwrap();
        let latest = store
            .find_extreme("a", Direction::Latest)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(earliest.hash, "h0");
        assert_eq!(latest.hash, "h1");
        assert!(store
            .find_extreme("missing", Direction::Latest)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn finds_every_successor_claimant() {
        let store = MemoryStore::from_records(vec![
            record("a", 0, "h0", ""),
            record("a", 1, "h1", "h0"),
            record("a", 2, "h1-dup", "h0"),
        ]);
        let successors = store.find_by_previous_hash("a", "h0").await.unwrap();
        assert_eq!(successors.len(), 2);
    }
}
