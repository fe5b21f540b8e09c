//! SqliteStore: SQLite-backed read access to a hash-chained audit log.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::info;

use chainward_types::{ChainwardError, Record};

use crate::store::{ChainStore, Direction};

/// A [`ChainStore`] backed by a SQLite `audit` table.
///
/// The connection sits behind a mutex so the store can be shared across
/// tasks; queries are short indexed lookups, so contention stays low.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the audit database at the given path.
    ///
    /// Enables WAL mode and creates the `audit` table and its lookup
    /// indices if they do not exist. Verification only ever reads the
    /// table; schema creation is here so a freshly provisioned database
    /// is immediately queryable.
    pub fn open(path: &Path) -> Result<Self, ChainwardError> {
        let conn = Connection::open(path).map_err(|e| {
            ChainwardError::StoreUnavailable(format!("failed to open database: {e}"))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL").map_err(|e| {
            ChainwardError::StoreUnavailable(format!("failed to set WAL mode: {e}"))
        })?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chain_key TEXT NOT NULL,
                recorded_at TEXT NOT NULL,
                category TEXT,
                subcategory TEXT,
                event TEXT NOT NULL,
                hash TEXT NOT NULL,
                previous_hash TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_audit_sequence
                ON audit(chain_key, recorded_at);
            CREATE INDEX IF NOT EXISTS idx_audit_previous_hash
                ON audit(chain_key, previous_hash);",
        )
        .map_err(|e| ChainwardError::StoreUnavailable(format!("failed to create schema: {e}")))?;

        info!(path = %path.display(), "audit store opened");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert records directly into the `audit` table.
    ///
    /// Provisioning helper for test harnesses and fixtures; the
    /// verification core never writes. Records are inserted as given,
    /// with no hash computation or linkage checks.
    pub fn seed(&self, records: &[Record]) -> Result<(), ChainwardError> {
        let conn = self.lock()?;
        for record in records {
            conn.execute(
                "INSERT INTO audit (chain_key, recorded_at, category, subcategory, event, hash, previous_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.chain_key,
                    record.recorded_at.to_rfc3339(),
                    record.category,
                    record.subcategory,
                    record.event,
                    record.hash,
                    record.previous_hash,
                ],
            )
            .map_err(|e| {
                ChainwardError::StoreUnavailable(format!("failed to insert record: {e}"))
            })?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ChainwardError> {
        self.conn
            .lock()
            .map_err(|_| ChainwardError::StoreUnavailable("connection lock poisoned".to_string()))
    }
}

/// Map one `audit` row onto a [`Record`].
fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
    let recorded_at: String = row.get(1)?;
    let recorded_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&recorded_at)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(Record {
        chain_key: row.get(0)?,
        recorded_at,
        category: row.get(2)?,
        subcategory: row.get(3)?,
        event: row.get(4)?,
        hash: row.get(5)?,
        previous_hash: row.get(6)?,
    })
}

const RECORD_COLUMNS: &str =
    "chain_key, recorded_at, category, subcategory, event, hash, previous_hash";

#[async_trait]
impl ChainStore for SqliteStore {
    async fn count(&self, chain_key: &str) -> Result<u64, ChainwardError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM audit WHERE chain_key = ?1",
                params![chain_key],
                |row| row.get(0),
            )
            .map_err(|e| ChainwardError::StoreUnavailable(format!("count query failed: {e}")))?;
        Ok(count as u64)
    }

    async fn find_extreme(
        &self,
        chain_key: &str,
        direction: Direction,
    ) -> Result<Option<Record>, ChainwardError> {
        let order = match direction {
            Direction::Earliest => "ASC",
            Direction::Latest => "DESC",
        };
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM audit
             WHERE chain_key = ?1 ORDER BY recorded_at {order} LIMIT 1"
        );
        let mut stmt = conn.prepare(&sql).map_err(|e| {
            ChainwardError::StoreUnavailable(format!("failed to prepare extreme query: {e}"))
        })?;
        let mut rows = stmt
            .query_map(params![chain_key], record_from_row)
            .map_err(|e| {
                ChainwardError::StoreUnavailable(format!("extreme query failed: {e}"))
            })?;
        match rows.next() {
            None => Ok(None),
            Some(row) => row.map(Some).map_err(|e| {
                ChainwardError::StoreUnavailable(format!("failed to read record: {e}"))
            }),
        }
    }

    async fn find_by_previous_hash(
        &self,
        chain_key: &str,
        previous_hash: &str,
    ) -> Result<Vec<Record>, ChainwardError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM audit
                 WHERE chain_key = ?1 AND previous_hash = ?2"
            ))
            .map_err(|e| {
                ChainwardError::StoreUnavailable(format!("failed to prepare link query: {e}"))
            })?;
        let rows = stmt
            .query_map(params![chain_key, previous_hash], record_from_row)
            .map_err(|e| ChainwardError::StoreUnavailable(format!("link query failed: {e}")))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| ChainwardError::StoreUnavailable(format!("failed to read record: {e}")))
    }
}
