//! Store provider: builds a [`ChainStore`] from configuration.
//!
//! The factory is also where the read-consistency contract is enforced:
//! chain verification is only sound over strongly consistent reads, so an
//! eventually consistent configuration is rejected before any store is
//! constructed.

use std::sync::Arc;

use tracing::info;

use chainward_types::{ChainwardError, ReadConsistency, StoreBackend, StoreConfig};

use crate::memory::MemoryStore;
use crate::sqlite::SqliteStore;
use crate::store::ChainStore;

/// Construct the store backend described by `config`.
pub fn new_store(config: &StoreConfig) -> Result<Arc<dyn ChainStore>, ChainwardError> {
    if config.read_consistency == ReadConsistency::Eventual {
        return Err(ChainwardError::ConfigError(
            "eventually consistent reads are unsuitable for chain verification; \
             set read_consistency = \"strong\""
                .to_string(),
        ));
    }

    match config.backend {
        StoreBackend::Sqlite => {
            let path = config.path.as_deref().ok_or_else(|| {
                ChainwardError::ConfigError(
                    "sqlite backend requires a database path".to_string(),
                )
            })?;
            let store = SqliteStore::open(path)?;
            info!(backend = "sqlite", path = %path.display(), "store ready");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!(backend = "memory", "store ready");
            Ok(Arc::new(MemoryStore::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_eventual_consistency() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            path: None,
            read_consistency: ReadConsistency::Eventual,
        };
        let err = new_store(&config).unwrap_err();
        assert!(matches!(err, ChainwardError::ConfigError(_)));
        assert!(err.to_string().contains("strong"));
    }

    #[test]
    fn sqlite_requires_a_path() {
        let config = StoreConfig {
            backend: StoreBackend::Sqlite,
            path: None,
            read_consistency: ReadConsistency::Strong,
        };
        let err = new_store(&config).unwrap_err();
        assert!(matches!(err, ChainwardError::ConfigError(_)));
    }

    #[test]
    fn builds_a_memory_store() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            path: None,
            read_consistency: ReadConsistency::Strong,
        };
        assert!(new_store(&config).is_ok());
    }

    #[test]
    fn builds_a_sqlite_store() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let config = StoreConfig::sqlite(tmp.path());
        assert!(new_store(&config).is_ok());
    }
}
