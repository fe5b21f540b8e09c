//! Record: a single hash-chained audit log entry as stored in the backend.
//!
//! Records are owned by the external store and read-only to the verifier.
//! Each record links to its logical predecessor via `previous_hash`,
//! forming a tamper-evident chain per `chain_key`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The previous-hash value carried by a chain's genesis record.
pub const GENESIS_PREVIOUS_HASH: &str = "";

/// One entry of an append-only, hash-chained audit log.
///
/// `recorded_at` is the sequence key: it is only used to locate the
/// chain's endpoints (earliest and latest record), never to infer
/// adjacency. Adjacency is carried exclusively by `previous_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier of the logical chain this record belongs to
    /// (e.g., a customer or tenant identifier).
    pub chain_key: String,
    /// Monotonically comparable sequence key.
    pub recorded_at: DateTime<Utc>,
    /// Audit payload: event category, opaque to the verifier.
    pub category: Option<String>,
    /// Audit payload: event subcategory, opaque to the verifier.
    pub subcategory: Option<String>,
    /// Audit payload: the recorded event itself, opaque to the verifier.
    pub event: String,
    /// Hash of this record's content. Opaque; assumed pre-computed by
    /// the writer. Unique within the chain when the chain is correct.
    pub hash: String,
    /// Hash of the logical predecessor, or empty for the genesis record.
    pub previous_hash: String,
}

impl Record {
    /// Whether this record claims to be the chain's genesis record.
    pub fn is_genesis(&self) -> bool {
        self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(previous_hash: &str) -> Record {
        Record {
            chain_key: "tenant-1".to_string(),
            recorded_at: Utc::now(),
            category: Some("login".to_string()),
            subcategory: None,
            event: "user logged in".to_string(),
            hash: "abc123".to_string(),
            previous_hash: previous_hash.to_string(),
        }
    }

    #[test]
    fn genesis_has_empty_previous_hash() {
        assert!(sample("").is_genesis());
        assert!(!sample("deadbeef").is_genesis());
    }

    #[test]
    fn serializes_round_trip() {
        let record = sample("deadbeef");
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
