use async_trait::async_trait;

use chainward_types::{ChainwardError, Record};

/// Which end of the chain to fetch, by sequence key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The record with the smallest sequence key (genesis candidate).
    Earliest,
    /// The record with the largest sequence key (head candidate).
    Latest,
}

/// Minimal read capability over a hash-chained audit log store.
///
/// All three operations are scoped to one `chain_key` and must be served
/// with strongly consistent reads; the store configuration contract
/// rejects eventually consistent setups before a store is constructed.
/// The verifier never writes through this interface.
#[async_trait]
pub trait ChainStore: Send + Sync + std::fmt::Debug {
    /// Total number of records in the chain.
    async fn count(&self, chain_key: &str) -> Result<u64, ChainwardError>;

    /// The record at the given end of the chain by sequence key, or
    /// `None` when the chain has no records.
    async fn find_extreme(
        &self,
        chain_key: &str,
        direction: Direction,
    ) -> Result<Option<Record>, ChainwardError>;

    /// Every record whose `previous_hash` equals `previous_hash`.
    ///
    /// Returns zero, one, or several records; the caller classifies the
    /// cardinality. No deduplication is applied: correctness of the
    /// single-predecessor check relies on the store's filtered query.
    async fn find_by_previous_hash(
        &self,
        chain_key: &str,
        previous_hash: &str,
    ) -> Result<Vec<Record>, ChainwardError>;
}
