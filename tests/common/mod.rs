//! Shared helpers for integration tests.
//!
//! Each integration test file compiles common/ as its own module, so not
//! every helper is used in every file.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use chainward_types::Record;

/// Create a temporary file for use as a test database.
pub fn temp_db() -> NamedTempFile {
    NamedTempFile::new().expect("should create temp file for audit database")
}

/// Deterministic timestamp for the i-th record of a fixture chain.
pub fn fixture_time(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(i as i64)
}

/// Hash a record's content together with its predecessor's hash, the way
/// an audit log writer chains entries.
pub fn content_hash(chain_key: &str, recorded_at: DateTime<Utc>, event: &str, previous_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(chain_key);
    hasher.update(recorded_at.to_rfc3339());
    hasher.update(event);
    hasher.update(previous_hash);
    hex::encode(hasher.finalize())
}

/// Build a record with a freshly computed hash.
pub fn linked_record(chain_key: &str, i: usize, previous_hash: &str) -> Record {
    let recorded_at = fixture_time(i);
    let event = format!("audit event {i}");
    let hash = content_hash(chain_key, recorded_at, &event, previous_hash);
    Record {
        chain_key: chain_key.to_string(),
        recorded_at,
        category: Some("security".to_string()),
        subcategory: (i % 2 == 0).then(|| "login".to_string()),
        event,
        hash,
        previous_hash: previous_hash.to_string(),
    }
}

/// Build a correctly linked chain of `n` records, genesis first.
pub fn linked_chain(chain_key: &str, n: usize) -> Vec<Record> {
    let mut records = Vec::with_capacity(n);
    let mut previous_hash = String::new();
    for i in 0..n {
        let record = linked_record(chain_key, i, &previous_hash);
        previous_hash = record.hash.clone();
        records.push(record);
    }
    records
}

/// Build a record with explicit hash and previous hash, for the concrete
/// literal-hash scenarios.
pub fn literal_record(chain_key: &str, i: usize, hash: &str, previous_hash: &str) -> Record {
    Record {
        chain_key: chain_key.to_string(),
        recorded_at: fixture_time(i),
        category: None,
        subcategory: None,
        event: format!("event-{hash}"),
        hash: hash.to_string(),
        previous_hash: previous_hash.to_string(),
    }
}
